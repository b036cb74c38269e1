//
//  planning-tool
//  lib.rs
//
//  Created by Ngonidzashe Mangudya on 2026/01/12.
//  Copyright (c) 2025 IAMNGONI. All rights reserved.
//

//! # Planning Tool Library
//!
//! A client library and command-line tool for reading and writing the test
//! management records that drive night planning at the observatory: test
//! cycles, test cases, test executions and their custom fields, stored in
//! Zephyr Scale, with Jira used for identity and operational log comments.
//!
//! ## Overview
//!
//! The library backs the `zapi` CLI and can be embedded by dashboards. Every
//! operation is an `async fn` that performs its HTTP round trips in sequence;
//! nothing is spawned and nothing runs in the background.
//!
//! ## Module Structure
//!
//! - [`auth`]: Credentials and per-host authentication schemes
//! - [`api`]: HTTP transport, error taxonomy, pagination and vendor payloads
//! - [`model`]: Normalized records (test cycles, test cases, executions, ...)
//! - [`mapper`]: Raw payload to record conversion, with name resolution
//! - [`service`]: The [`ZephyrClient`] façade, one method per operation
//! - [`config`]: Configuration file and credential resolution
//! - [`output`]: Table and JSON output for the CLI
//! - [`cli`]: Command-line interface definitions using clap
//!
//! ## Example Usage
//!
//! ```rust,no_run
//! use planning_tool::auth::Credentials;
//! use planning_tool::model::CustomFieldValue;
//! use planning_tool::ZephyrClient;
//!
//! # async fn example() -> planning_tool::api::ApiResult<()> {
//! let credentials = Credentials::new(
//!     "jira-token",
//!     "observer",
//!     "zephyr-token",
//!     "https://rubinobs.atlassian.net/rest/api/2/",
//!     "https://api.zephyrscale.smartbear.com/v2/",
//! )?;
//! let client = ZephyrClient::new(credentials)?;
//!
//! client
//!     .update_test_cycle_custom_field(
//!         "BLOCK-R21",
//!         "Night Planner",
//!         CustomFieldValue::from("Bruno Quint"),
//!     )
//!     .await?;
//! client.post_comment("OBS-42", "Night plan updated").await?;
//! # Ok(())
//! # }
//! ```
//!
//! ## Error Kinds
//!
//! | Kind | Cause | Retriable |
//! |------|-------|-----------|
//! | Config | Missing or malformed credentials | No |
//! | Auth | 401 / 403 | No |
//! | NotFound | 404 | No |
//! | Validation | Other 4xx, failed local checks | No |
//! | Transient | 429, 5xx, timeouts | Yes |

/// Command-line interface definitions.
///
/// Contains all CLI commands, arguments, and subcommands defined using the
/// clap derive API.
pub mod cli;

/// HTTP transport, error taxonomy, pagination and vendor payload types.
pub mod api;

/// Credentials for both services and the authentication scheme each uses.
pub mod auth;

/// Configuration file management.
///
/// Manages the CLI's configuration stored in platform-specific locations:
/// - Linux: `~/.config/zapi/config.toml`
/// - macOS: `~/Library/Application Support/zapi/config.toml`
/// - Windows: `%APPDATA%\zapi\config.toml`
pub mod config;

/// Conversion between raw vendor payloads and domain records.
pub mod mapper;

/// Normalized test-management records.
pub mod model;

/// Output formatting for table and JSON modes.
pub mod output;

/// The Zephyr Scale / Jira façade.
pub mod service;

pub use cli::Cli;
pub use config::Config;
pub use service::ZephyrClient;

/// Application name constant.
///
/// The name of the CLI binary, used for display purposes and configuration paths.
pub const APP_NAME: &str = "zapi";

/// Application version constant.
///
/// Derived from Cargo.toml at compile time.
///
/// # Example
///
/// ```rust
/// use planning_tool::VERSION;
///
/// println!("zapi version {}", VERSION);
/// ```
pub const VERSION: &str = env!("CARGO_PKG_VERSION");

/// Exit codes for the CLI.
///
/// Standardized exit codes, allowing scripts to tell failure classes apart.
///
/// # Exit Code Ranges
///
/// - `0`: Success
/// - `1-3`: General errors, usage and configuration issues
/// - `4-7`: Authentication-related issues
/// - `8-15`: Resource-related issues
/// - `32+`: External service issues
///
/// # Example
///
/// ```rust
/// use planning_tool::api::ErrorKind;
/// use planning_tool::exit_codes;
///
/// assert_eq!(exit_codes::for_kind(ErrorKind::Transient), exit_codes::TRANSIENT);
/// ```
pub mod exit_codes {
    use crate::api::common::{ApiError, ErrorKind};

    /// Successful execution.
    pub const SUCCESS: i32 = 0;

    /// General error.
    ///
    /// An unspecified error occurred during execution.
    /// Check stderr for details.
    pub const ERROR: i32 = 1;

    /// Invalid usage or arguments. Clap exits with this code on its own.
    pub const USAGE: i32 = 2;

    /// Missing or malformed credentials, base URLs or configuration.
    pub const CONFIG_ERROR: i32 = 3;

    /// Authentication failed.
    ///
    /// A token was rejected (401) or lacks permission (403).
    pub const AUTH_ERROR: i32 = 4;

    /// Resource not found.
    pub const NOT_FOUND: i32 = 8;

    /// The request was rejected as invalid, locally or by the service.
    pub const VALIDATION: i32 = 9;

    /// Rate limited, server error or timeout. Retrying later may succeed.
    pub const TRANSIENT: i32 = 32;

    pub fn for_kind(kind: ErrorKind) -> i32 {
        match kind {
            ErrorKind::Config => CONFIG_ERROR,
            ErrorKind::Auth => AUTH_ERROR,
            ErrorKind::NotFound => NOT_FOUND,
            ErrorKind::Validation => VALIDATION,
            ErrorKind::Transient => TRANSIENT,
        }
    }

    /// Exit code for an error returned by a command.
    ///
    /// Looks through the context chain for an [`ApiError`]; anything else is
    /// a general error.
    pub fn for_error(error: &anyhow::Error) -> i32 {
        error
            .chain()
            .find_map(|cause| cause.downcast_ref::<ApiError>())
            .map(|e| for_kind(e.kind()))
            .unwrap_or(ERROR)
    }

    #[cfg(test)]
    mod tests {
        use super::*;
        use anyhow::Context;

        #[test]
        fn test_for_error_finds_api_error_in_chain() {
            let err: anyhow::Result<()> = Err(ApiError::NotFound {
                endpoint: "GET testcycles/BLOCK-R1".into(),
                message: "not found".into(),
            })
            .context("get test cycle");
            assert_eq!(for_error(&err.unwrap_err()), NOT_FOUND);
        }

        #[test]
        fn test_for_error_defaults_to_general() {
            assert_eq!(for_error(&anyhow::anyhow!("boom")), ERROR);
        }
    }
}
