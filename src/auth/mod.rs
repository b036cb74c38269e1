//
//  planning-tool
//  auth/mod.rs
//
//  Created by Ngonidzashe Mangudya on 2026/01/12.
//  Copyright (c) 2025 IAMNGONI. All rights reserved.
//

//! # Authentication Module
//!
//! Holds the credentials for the two cooperating services and decides which
//! authentication scheme applies to each of them.
//!
//! ## Authentication Schemes
//!
//! - **Bearer**: Zephyr Scale (test management) accepts a single API token.
//! - **Basic**: Jira (issue tracker) accepts the account username with the API
//!   token as password.
//!
//! ## Example
//!
//! ```rust
//! use planning_tool::api::client::Host;
//! use planning_tool::auth::{AuthScheme, Credentials};
//!
//! let credentials = Credentials::new(
//!     "jira-token",
//!     "observer@example.org",
//!     "zephyr-token",
//!     "https://rubinobs.atlassian.net/rest/api/2/",
//!     "https://api.zephyrscale.smartbear.com/v2/",
//! )?;
//!
//! assert!(matches!(
//!     credentials.scheme_for(Host::TestManagement),
//!     AuthScheme::Bearer { .. }
//! ));
//! # Ok::<(), planning_tool::api::common::ApiError>(())
//! ```

use std::fmt;

use base64::engine::general_purpose::STANDARD;
use base64::Engine;
use reqwest::RequestBuilder;
use url::Url;

use crate::api::client::Host;
use crate::api::common::{ApiError, ApiResult};

/// Default Zephyr Scale Cloud API endpoint.
pub const DEFAULT_ZEPHYR_BASE_URL: &str = "https://api.zephyrscale.smartbear.com/v2/";

/// Default Jira Cloud REST endpoint for the observatory site.
pub const DEFAULT_JIRA_BASE_URL: &str = "https://rubinobs.atlassian.net/rest/api/2/";

/// The authentication scheme applied to one request.
///
/// A closed set selected by target [`Host`]; the transport never branches on
/// hosts itself.
#[derive(Clone, PartialEq, Eq)]
pub enum AuthScheme<'a> {
    /// `Authorization: Bearer <token>`
    Bearer { token: &'a str },
    /// `Authorization: Basic base64(<username>:<password>)`
    Basic { username: &'a str, password: &'a str },
}

impl AuthScheme<'_> {
    /// The full `Authorization` header value for this scheme.
    pub fn header_value(&self) -> String {
        match self {
            Self::Bearer { token } => format!("Bearer {}", token),
            Self::Basic { username, password } => {
                let encoded = STANDARD.encode(format!("{}:{}", username, password));
                format!("Basic {}", encoded)
            }
        }
    }

    /// Applies the authentication header to an HTTP request.
    pub fn apply_to_request(&self, request: RequestBuilder) -> RequestBuilder {
        request.header(reqwest::header::AUTHORIZATION, self.header_value())
    }
}

impl fmt::Debug for AuthScheme<'_> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Bearer { .. } => f.write_str("Bearer(<redacted>)"),
            Self::Basic { username, .. } => write!(f, "Basic({}:<redacted>)", username),
        }
    }
}

/// Credentials and base URLs for both services.
///
/// Immutable after construction and exclusively owned by the client built
/// from it. Accessors return exactly the values supplied to [`Credentials::new`].
#[derive(Clone)]
pub struct Credentials {
    issue_tracker_token: String,
    issue_tracker_username: String,
    test_mgmt_token: String,
    issue_tracker_base_url: String,
    test_mgmt_base_url: String,
    issue_tracker_base: Url,
    test_mgmt_base: Url,
}

impl Credentials {
    /// Validates and stores the five required values.
    ///
    /// # Errors
    ///
    /// Returns [`ApiError::Config`] when any value is empty or blank, or when a
    /// base URL is not an absolute `http`/`https` URL.
    pub fn new(
        issue_tracker_token: impl Into<String>,
        issue_tracker_username: impl Into<String>,
        test_mgmt_token: impl Into<String>,
        issue_tracker_base_url: impl Into<String>,
        test_mgmt_base_url: impl Into<String>,
    ) -> ApiResult<Self> {
        let issue_tracker_token = required("issue tracker token", issue_tracker_token.into())?;
        let issue_tracker_username =
            required("issue tracker username", issue_tracker_username.into())?;
        let test_mgmt_token = required("test management token", test_mgmt_token.into())?;
        let issue_tracker_base_url =
            required("issue tracker base URL", issue_tracker_base_url.into())?;
        let test_mgmt_base_url = required("test management base URL", test_mgmt_base_url.into())?;

        let issue_tracker_base = parse_base_url("issue tracker base URL", &issue_tracker_base_url)?;
        let test_mgmt_base = parse_base_url("test management base URL", &test_mgmt_base_url)?;

        Ok(Self {
            issue_tracker_token,
            issue_tracker_username,
            test_mgmt_token,
            issue_tracker_base_url,
            test_mgmt_base_url,
            issue_tracker_base,
            test_mgmt_base,
        })
    }

    pub fn issue_tracker_token(&self) -> &str {
        &self.issue_tracker_token
    }

    pub fn issue_tracker_username(&self) -> &str {
        &self.issue_tracker_username
    }

    pub fn test_mgmt_token(&self) -> &str {
        &self.test_mgmt_token
    }

    pub fn issue_tracker_base_url(&self) -> &str {
        &self.issue_tracker_base_url
    }

    pub fn test_mgmt_base_url(&self) -> &str {
        &self.test_mgmt_base_url
    }

    /// Base URL for `host`, normalized to end with a slash so relative paths join under it.
    pub fn base_for(&self, host: Host) -> &Url {
        match host {
            Host::TestManagement => &self.test_mgmt_base,
            Host::IssueTracker => &self.issue_tracker_base,
        }
    }

    /// Selects the authentication scheme for `host`.
    pub fn scheme_for(&self, host: Host) -> AuthScheme<'_> {
        match host {
            Host::TestManagement => AuthScheme::Bearer {
                token: &self.test_mgmt_token,
            },
            Host::IssueTracker => AuthScheme::Basic {
                username: &self.issue_tracker_username,
                password: &self.issue_tracker_token,
            },
        }
    }
}

impl fmt::Debug for Credentials {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("Credentials")
            .field("issue_tracker_token", &"<redacted>")
            .field("issue_tracker_username", &self.issue_tracker_username)
            .field("test_mgmt_token", &"<redacted>")
            .field("issue_tracker_base_url", &self.issue_tracker_base_url)
            .field("test_mgmt_base_url", &self.test_mgmt_base_url)
            .finish()
    }
}

fn required(name: &str, value: String) -> ApiResult<String> {
    if value.trim().is_empty() {
        return Err(ApiError::Config(format!("{} must not be empty", name)));
    }
    Ok(value)
}

fn parse_base_url(name: &str, value: &str) -> ApiResult<Url> {
    let mut url = Url::parse(value.trim())
        .map_err(|e| ApiError::Config(format!("{} '{}' is not a valid URL: {}", name, value, e)))?;

    if !matches!(url.scheme(), "http" | "https") || url.host_str().is_none() {
        return Err(ApiError::Config(format!(
            "{} '{}' must be an absolute http(s) URL",
            name, value
        )));
    }

    if !url.path().ends_with('/') {
        let path = format!("{}/", url.path());
        url.set_path(&path);
    }

    Ok(url)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::api::common::ErrorKind;

    fn valid() -> [&'static str; 5] {
        [
            "jira-token",
            "observer",
            "zephyr-token",
            "https://jira.example.org/rest/api/2",
            "https://zephyr.example.org/v2/",
        ]
    }

    fn build(values: [&str; 5]) -> ApiResult<Credentials> {
        Credentials::new(values[0], values[1], values[2], values[3], values[4])
    }

    #[test]
    fn test_accessors_return_supplied_values() {
        let creds = build(valid()).unwrap();
        assert_eq!(creds.issue_tracker_token(), "jira-token");
        assert_eq!(creds.issue_tracker_username(), "observer");
        assert_eq!(creds.test_mgmt_token(), "zephyr-token");
        assert_eq!(creds.issue_tracker_base_url(), "https://jira.example.org/rest/api/2");
        assert_eq!(creds.test_mgmt_base_url(), "https://zephyr.example.org/v2/");
    }

    #[test]
    fn test_any_empty_field_is_config_error() {
        for index in 0..5 {
            for empty in ["", "   "] {
                let mut values = valid();
                values[index] = empty;
                let err = build(values).unwrap_err();
                assert_eq!(err.kind(), ErrorKind::Config, "field {}", index);
            }
        }
    }

    #[test]
    fn test_relative_or_non_http_url_is_config_error() {
        for bad in ["jira.example.org/rest", "ftp://jira.example.org/", "not a url"] {
            let mut values = valid();
            values[3] = bad;
            assert_eq!(build(values).unwrap_err().kind(), ErrorKind::Config);
        }
    }

    #[test]
    fn test_base_url_gets_trailing_slash() {
        let creds = build(valid()).unwrap();
        let base = creds.base_for(Host::IssueTracker);
        assert_eq!(base.as_str(), "https://jira.example.org/rest/api/2/");
        assert_eq!(
            base.join("issue/OBS-1/comment").unwrap().as_str(),
            "https://jira.example.org/rest/api/2/issue/OBS-1/comment"
        );
    }

    #[test]
    fn test_scheme_per_host() {
        let creds = build(valid()).unwrap();
        assert_eq!(
            creds.scheme_for(Host::TestManagement).header_value(),
            "Bearer zephyr-token"
        );
        // base64("observer:jira-token")
        assert_eq!(
            creds.scheme_for(Host::IssueTracker).header_value(),
            "Basic b2JzZXJ2ZXI6amlyYS10b2tlbg=="
        );
    }

    #[test]
    fn test_debug_redacts_tokens() {
        let creds = build(valid()).unwrap();
        let debug = format!("{:?}", creds);
        assert!(!debug.contains("jira-token"));
        assert!(!debug.contains("zephyr-token"));
        assert!(debug.contains("observer"));
    }
}
