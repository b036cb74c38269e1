//
//  planning-tool
//  api/common/mod.rs
//
//  Created by Ngonidzashe Mangudya on 2026/01/12.
//  Copyright (c) 2025 IAMNGONI. All rights reserved.
//

//! Common API Types for Zephyr Scale and Jira
//!
//! This module provides the error taxonomy shared by every layer of the client
//! and the page envelope used by the Zephyr Scale list endpoints.
//!
//! # Overview
//!
//! - [`ApiError`] - Unified error type for all API operations
//! - [`ErrorKind`] - The five error classes callers branch on
//! - [`classify_response`] - Maps a non-2xx HTTP status onto an [`ApiError`]
//! - Pagination types (re-exported from [`pagination`] submodule)
//!
//! # Example
//!
//! ```rust
//! use planning_tool::api::common::{ApiError, ErrorKind};
//!
//! fn handle<T>(result: Result<T, ApiError>) {
//!     match result {
//!         Ok(_) => println!("Success!"),
//!         Err(e) if e.retriable() => println!("Try again later: {}", e),
//!         Err(e) if e.kind() == ErrorKind::NotFound => println!("Does not exist yet"),
//!         Err(e) => println!("Error: {}", e),
//!     }
//! }
//! ```

use std::fmt;

use reqwest::StatusCode;
use thiserror::Error;

mod pagination;

pub use pagination::*;

/// Result alias used throughout the library.
pub type ApiResult<T> = Result<T, ApiError>;

/// The class of an [`ApiError`].
///
/// | Kind | Source | Retriable |
/// |------|--------|-----------|
/// | `Config` | Missing or malformed credentials / URLs | No |
/// | `Auth` | HTTP 401 / 403 | No |
/// | `NotFound` | HTTP 404 | No |
/// | `Validation` | Other 4xx, local pre-flight checks, undecodable bodies | No |
/// | `Transient` | HTTP 429, 5xx, timeouts, connection failures | Yes |
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum ErrorKind {
    Config,
    Auth,
    NotFound,
    Validation,
    Transient,
}

impl fmt::Display for ErrorKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let name = match self {
            Self::Config => "ConfigError",
            Self::Auth => "AuthError",
            Self::NotFound => "NotFoundError",
            Self::Validation => "ValidationError",
            Self::Transient => "TransientError",
        };
        f.write_str(name)
    }
}

/// Unified error type for all Zephyr Scale and Jira operations.
///
/// Every variant carries enough context (endpoint, HTTP status, vendor
/// message) to diagnose a failure without re-running the request. Multi-call
/// operations wrap the failing sub-step in [`ApiError::Step`], which keeps the
/// original kind: `kind()`, `retriable()` and the other accessors look through
/// any number of step wrappers.
///
/// # Example
///
/// ```rust
/// use planning_tool::api::common::{ApiError, ErrorKind};
///
/// let err = ApiError::Transient {
///     status: Some(429),
///     endpoint: Some("PUT testcycles/BLOCK-R21".to_string()),
///     message: "Rate limit exceeded".to_string(),
/// }
/// .during("update test cycle BLOCK-R21");
///
/// assert_eq!(err.kind(), ErrorKind::Transient);
/// assert!(err.retriable());
/// assert_eq!(err.http_status(), Some(429));
/// ```
#[derive(Error, Debug)]
pub enum ApiError {
    /// Credentials or base URLs are missing or malformed.
    #[error("configuration error: {0}")]
    Config(String),

    /// The vendor rejected the credentials (401) or the action (403).
    #[error("authentication rejected by {endpoint} (HTTP {status}): {message}")]
    Auth {
        status: u16,
        endpoint: String,
        message: String,
    },

    /// The addressed record does not exist.
    #[error("not found: {endpoint}{}", detail(.message))]
    NotFound { endpoint: String, message: String },

    /// The request was refused as invalid, or failed a local pre-flight check.
    ///
    /// `status` and `endpoint` are `None` for local checks that never reached
    /// the network.
    #[error("validation failed{}: {message}", origin(.status, .endpoint))]
    Validation {
        status: Option<u16>,
        endpoint: Option<String>,
        message: String,
    },

    /// Rate limiting, a server-side failure, or a network timeout.
    ///
    /// The library never retries these itself.
    #[error("transient failure{}: {message}", origin(.status, .endpoint))]
    Transient {
        status: Option<u16>,
        endpoint: Option<String>,
        message: String,
    },

    /// A named sub-step of a multi-call operation failed.
    #[error("{step}: {cause}")]
    Step { step: String, cause: Box<ApiError> },
}

fn detail(message: &str) -> String {
    if message.is_empty() {
        String::new()
    } else {
        format!(" ({})", message)
    }
}

fn origin(status: &Option<u16>, endpoint: &Option<String>) -> String {
    match (status, endpoint) {
        (Some(status), Some(endpoint)) => format!(" at {} (HTTP {})", endpoint, status),
        (None, Some(endpoint)) => format!(" at {}", endpoint),
        (Some(status), None) => format!(" (HTTP {})", status),
        (None, None) => String::new(),
    }
}

impl ApiError {
    /// Builds a local pre-flight validation failure.
    pub fn invalid(message: impl Into<String>) -> Self {
        Self::Validation {
            status: None,
            endpoint: None,
            message: message.into(),
        }
    }

    /// Wraps this error as the failure of a named sub-step.
    pub fn during(self, step: impl Into<String>) -> Self {
        Self::Step {
            step: step.into(),
            cause: Box::new(self),
        }
    }

    /// Returns the innermost error, skipping step wrappers.
    pub fn root(&self) -> &ApiError {
        match self {
            Self::Step { cause, .. } => cause.root(),
            other => other,
        }
    }

    pub fn kind(&self) -> ErrorKind {
        match self {
            Self::Config(_) => ErrorKind::Config,
            Self::Auth { .. } => ErrorKind::Auth,
            Self::NotFound { .. } => ErrorKind::NotFound,
            Self::Validation { .. } => ErrorKind::Validation,
            Self::Transient { .. } => ErrorKind::Transient,
            Self::Step { cause, .. } => cause.kind(),
        }
    }

    /// Whether a caller may re-attempt the operation after a backoff.
    pub fn retriable(&self) -> bool {
        self.kind() == ErrorKind::Transient
    }

    pub fn http_status(&self) -> Option<u16> {
        match self.root() {
            Self::Auth { status, .. } => Some(*status),
            Self::NotFound { .. } => Some(404),
            Self::Validation { status, .. } | Self::Transient { status, .. } => *status,
            _ => None,
        }
    }

    pub fn endpoint(&self) -> Option<&str> {
        match self.root() {
            Self::Auth { endpoint, .. } | Self::NotFound { endpoint, .. } => Some(endpoint),
            Self::Validation { endpoint, .. } | Self::Transient { endpoint, .. } => {
                endpoint.as_deref()
            }
            _ => None,
        }
    }

    /// The message supplied by the vendor (or by the local check).
    pub fn vendor_message(&self) -> &str {
        match self.root() {
            Self::Config(message) => message,
            Self::Auth { message, .. }
            | Self::NotFound { message, .. }
            | Self::Validation { message, .. }
            | Self::Transient { message, .. } => message,
            Self::Step { .. } => "",
        }
    }

    /// The chain of step names from outermost to innermost.
    pub fn steps(&self) -> Vec<&str> {
        let mut steps = Vec::new();
        let mut current = self;
        while let Self::Step { step, cause } = current {
            steps.push(step.as_str());
            current = cause;
        }
        steps
    }

    /// Classifies a transport-level failure from reqwest.
    pub fn from_transport(endpoint: &str, err: reqwest::Error) -> Self {
        if err.is_builder() {
            return Self::Config(format!("could not build request for {}: {}", endpoint, err));
        }
        if err.is_decode() {
            return Self::Validation {
                status: err.status().map(|s| s.as_u16()),
                endpoint: Some(endpoint.to_string()),
                message: format!("could not decode response body: {}", err),
            };
        }
        let message = if err.is_timeout() {
            format!("request timed out: {}", err)
        } else if err.is_connect() {
            format!("connection failed: {}", err)
        } else {
            err.to_string()
        };
        Self::Transient {
            status: err.status().map(|s| s.as_u16()),
            endpoint: Some(endpoint.to_string()),
            message,
        }
    }
}

/// Extracts a human-readable message from a vendor error body.
///
/// Zephyr Scale returns errors in the format:
/// ```json
/// {"errorCode": 400, "message": "Human readable message"}
/// ```
///
/// Jira returns errors in the format:
/// ```json
/// {"errorMessages": ["Issue does not exist"], "errors": {"body": "Comment body can not be empty!"}}
/// ```
///
/// If neither shape matches, the trimmed raw body is returned.
pub fn extract_vendor_message(body: &str) -> String {
    if let Ok(json) = serde_json::from_str::<serde_json::Value>(body) {
        // Zephyr format: {"errorCode": ..., "message": "..."}
        if let Some(message) = json.get("message").and_then(|m| m.as_str()) {
            return message.to_string();
        }

        // Jira format: {"errorMessages": [...], "errors": {...}}
        let mut parts: Vec<String> = json
            .get("errorMessages")
            .and_then(|m| m.as_array())
            .map(|messages| {
                messages
                    .iter()
                    .filter_map(|m| m.as_str().map(str::to_string))
                    .collect()
            })
            .unwrap_or_default();

        if let Some(errors) = json.get("errors").and_then(|e| e.as_object()) {
            for (field, message) in errors {
                if let Some(message) = message.as_str() {
                    parts.push(format!("{}: {}", field, message));
                }
            }
        }

        if !parts.is_empty() {
            return parts.join("; ");
        }
    }

    body.trim().to_string()
}

/// Maps a non-success HTTP response onto the error taxonomy.
///
/// | Status | Result |
/// |--------|--------|
/// | 401, 403 | [`ApiError::Auth`] |
/// | 404 | [`ApiError::NotFound`] |
/// | 429, 5xx | [`ApiError::Transient`] |
/// | any other | [`ApiError::Validation`] with the vendor message |
pub fn classify_response(status: StatusCode, endpoint: &str, body: &str) -> ApiError {
    let message = extract_vendor_message(body);
    let endpoint = endpoint.to_string();
    let code = status.as_u16();

    match status {
        StatusCode::UNAUTHORIZED | StatusCode::FORBIDDEN => ApiError::Auth {
            status: code,
            endpoint,
            message,
        },
        StatusCode::NOT_FOUND => ApiError::NotFound { endpoint, message },
        StatusCode::TOO_MANY_REQUESTS => ApiError::Transient {
            status: Some(code),
            endpoint: Some(endpoint),
            message,
        },
        s if s.is_server_error() => ApiError::Transient {
            status: Some(code),
            endpoint: Some(endpoint),
            message,
        },
        _ => ApiError::Validation {
            status: Some(code),
            endpoint: Some(endpoint),
            message,
        },
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_classify_auth_statuses() {
        for status in [StatusCode::UNAUTHORIZED, StatusCode::FORBIDDEN] {
            let err = classify_response(status, "GET testcycles/BLOCK-R21", "");
            assert_eq!(err.kind(), ErrorKind::Auth);
            assert!(!err.retriable());
        }
    }

    #[test]
    fn test_classify_not_found() {
        let err = classify_response(StatusCode::NOT_FOUND, "GET statuses/1", "{}");
        assert_eq!(err.kind(), ErrorKind::NotFound);
        assert_eq!(err.http_status(), Some(404));
        assert_eq!(err.endpoint(), Some("GET statuses/1"));
    }

    #[test]
    fn test_classify_transient() {
        let err = classify_response(StatusCode::TOO_MANY_REQUESTS, "PUT testcycles/X-R1", "");
        assert!(err.retriable());
        let err = classify_response(StatusCode::BAD_GATEWAY, "GET testcases/X-T1", "");
        assert!(err.retriable());
        assert_eq!(err.http_status(), Some(502));
    }

    #[test]
    fn test_classify_validation_keeps_vendor_message() {
        let body = r#"{"errorCode": 400, "message": "Field 'name' is required"}"#;
        let err = classify_response(StatusCode::BAD_REQUEST, "POST testcycles", body);
        assert_eq!(err.kind(), ErrorKind::Validation);
        assert_eq!(err.vendor_message(), "Field 'name' is required");
    }

    #[test]
    fn test_extract_jira_message() {
        let body = r#"{"errorMessages": ["Issue does not exist"], "errors": {"body": "empty"}}"#;
        assert_eq!(extract_vendor_message(body), "Issue does not exist; body: empty");
    }

    #[test]
    fn test_extract_falls_back_to_raw_body() {
        assert_eq!(extract_vendor_message("  Bad Gateway \n"), "Bad Gateway");
    }

    #[test]
    fn test_step_preserves_kind_and_reports_steps() {
        let err = ApiError::invalid("bad key")
            .during("check custom field")
            .during("update custom field on BLOCK-R21");
        assert_eq!(err.kind(), ErrorKind::Validation);
        assert_eq!(
            err.steps(),
            vec!["update custom field on BLOCK-R21", "check custom field"]
        );
        assert_eq!(
            err.to_string(),
            "update custom field on BLOCK-R21: check custom field: validation failed: bad key"
        );
    }
}
