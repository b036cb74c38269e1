//
//  planning-tool
//  config/mod.rs
//
//  Created by Ngonidzashe Mangudya on 2026/01/12.
//  Copyright (c) 2025 IAMNGONI. All rights reserved.
//

//! # Configuration Module
//!
//! This module loads the optional `zapi` configuration file and combines it
//! with command-line flags and environment variables into the [`Credentials`]
//! and [`ClientOptions`] a [`ZephyrClient`](crate::service::ZephyrClient) is
//! built from.
//!
//! ## Precedence
//!
//! 1. Command-line flags and environment variables
//! 2. The configuration file
//! 3. Built-in defaults
//!
//! API tokens are never read from the file; they only come from flags or the
//! environment.
//!
//! ## Configuration File Location
//!
//! - **Linux**: `~/.config/zapi/config.toml`
//! - **macOS**: `~/Library/Application Support/zapi/config.toml`
//! - **Windows**: `C:\Users\<User>\AppData\Roaming\zapi\config.toml`
//!
//! `ZAPI_CONFIG` overrides the location.
//!
//! ## Example Configuration File
//!
//! ```toml
//! [zephyr]
//! base_url = "https://api.zephyrscale.smartbear.com/v2/"
//! page_size = 50
//!
//! [jira]
//! base_url = "https://rubinobs.atlassian.net/rest/api/2/"
//! username = "observer@example.org"
//!
//! [http]
//! timeout_secs = 30
//! ```

mod file;

pub use file::*;

use std::path::{Path, PathBuf};
use std::time::Duration;

use anyhow::{Context, Result};
use directories::ProjectDirs;
use serde::{Deserialize, Serialize};

use crate::api::common::{ApiError, ApiResult};
use crate::auth::{Credentials, DEFAULT_JIRA_BASE_URL, DEFAULT_ZEPHYR_BASE_URL};
use crate::service::{ClientOptions, DEFAULT_PAGE_SIZE};

/// Environment variable overriding the configuration file location.
pub const CONFIG_ENV: &str = "ZAPI_CONFIG";

/// Default request timeout in seconds.
pub const DEFAULT_TIMEOUT_SECS: u64 = 30;

/// Contents of `config.toml`.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct Config {
    #[serde(default)]
    pub zephyr: ZephyrConfig,

    #[serde(default)]
    pub jira: JiraConfig,

    #[serde(default)]
    pub http: HttpConfig,
}

#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct ZephyrConfig {
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub base_url: Option<String>,

    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub page_size: Option<u32>,
}

#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct JiraConfig {
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub base_url: Option<String>,

    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub username: Option<String>,
}

#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct HttpConfig {
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub timeout_secs: Option<u64>,
}

/// Values supplied on the command line or through the environment.
///
/// Each field overrides its counterpart in [`Config`].
#[derive(Debug, Clone, Default)]
pub struct Overrides {
    pub zephyr_token: Option<String>,
    pub jira_token: Option<String>,
    pub jira_username: Option<String>,
    pub zephyr_base_url: Option<String>,
    pub jira_base_url: Option<String>,
    pub timeout_secs: Option<u64>,
    pub page_size: Option<u32>,
}

impl Config {
    /// Loads the configuration file, or defaults when it does not exist.
    pub fn load() -> Result<Self> {
        Self::load_from(&Self::config_path()?)
    }

    pub fn load_from(path: &Path) -> Result<Self> {
        if !config_exists(path) {
            return Ok(Self::default());
        }
        let content = read_config_file(path)?;
        toml::from_str(&content)
            .with_context(|| format!("Invalid configuration in {}", path.display()))
    }

    /// Location of `config.toml`, honouring `ZAPI_CONFIG`.
    pub fn config_path() -> Result<PathBuf> {
        if let Some(path) = std::env::var_os(CONFIG_ENV).filter(|p| !p.is_empty()) {
            return Ok(PathBuf::from(path));
        }
        let dirs = ProjectDirs::from("", "", crate::APP_NAME)
            .ok_or_else(|| anyhow::anyhow!("Could not determine config directory"))?;
        Ok(dirs.config_dir().join("config.toml"))
    }

    /// Combines the file with `overrides` into client options.
    pub fn client_options(&self, overrides: &Overrides) -> ClientOptions {
        let timeout = overrides
            .timeout_secs
            .or(self.http.timeout_secs)
            .unwrap_or(DEFAULT_TIMEOUT_SECS);
        let page_size = overrides
            .page_size
            .or(self.zephyr.page_size)
            .unwrap_or(DEFAULT_PAGE_SIZE);

        ClientOptions {
            timeout: Duration::from_secs(timeout),
            page_size,
        }
    }

    /// Combines the file with `overrides` into credentials.
    ///
    /// Fails with a configuration error naming the environment variable for
    /// each missing secret.
    pub fn resolve_credentials(&self, overrides: &Overrides) -> ApiResult<Credentials> {
        let zephyr_token = required(
            &overrides.zephyr_token,
            "Zephyr Scale API token",
            "ZEPHYR_API_TOKEN",
        )?;
        let jira_token = required(&overrides.jira_token, "Jira API token", "JIRA_API_TOKEN")?;
        let jira_username = overrides
            .jira_username
            .clone()
            .or_else(|| self.jira.username.clone());
        let jira_username = required(&jira_username, "Jira username", "JIRA_USERNAME")?;

        let jira_base_url = overrides
            .jira_base_url
            .clone()
            .or_else(|| self.jira.base_url.clone())
            .unwrap_or_else(|| DEFAULT_JIRA_BASE_URL.to_string());
        let zephyr_base_url = overrides
            .zephyr_base_url
            .clone()
            .or_else(|| self.zephyr.base_url.clone())
            .unwrap_or_else(|| DEFAULT_ZEPHYR_BASE_URL.to_string());

        Credentials::new(jira_token, jira_username, zephyr_token, jira_base_url, zephyr_base_url)
    }
}

fn required(value: &Option<String>, what: &str, env: &str) -> ApiResult<String> {
    match value.as_deref().map(str::trim) {
        Some(v) if !v.is_empty() => Ok(v.to_string()),
        _ => Err(ApiError::Config(format!("missing {}: set {}", what, env))),
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::api::common::ErrorKind;

    fn overrides() -> Overrides {
        Overrides {
            zephyr_token: Some("z".into()),
            jira_token: Some("j".into()),
            jira_username: Some("observer".into()),
            ..Default::default()
        }
    }

    #[test]
    fn test_defaults_apply() {
        let config = Config::default();
        let credentials = config.resolve_credentials(&overrides()).unwrap();
        assert_eq!(credentials.test_mgmt_base_url(), DEFAULT_ZEPHYR_BASE_URL);
        assert_eq!(credentials.issue_tracker_base_url(), DEFAULT_JIRA_BASE_URL);

        let options = config.client_options(&Overrides::default());
        assert_eq!(options.timeout, Duration::from_secs(DEFAULT_TIMEOUT_SECS));
        assert_eq!(options.page_size, DEFAULT_PAGE_SIZE);
    }

    #[test]
    fn test_overrides_beat_file() {
        let config: Config = toml::from_str(
            r#"
            [zephyr]
            base_url = "https://zephyr.file/v2/"
            page_size = 10

            [jira]
            username = "from-file"

            [http]
            timeout_secs = 5
            "#,
        )
        .unwrap();

        let mut o = overrides();
        o.jira_username = None;
        let credentials = config.resolve_credentials(&o).unwrap();
        assert_eq!(credentials.issue_tracker_username(), "from-file");
        assert_eq!(credentials.test_mgmt_base_url(), "https://zephyr.file/v2/");

        o.page_size = Some(99);
        let options = config.client_options(&o);
        assert_eq!(options.page_size, 99);
        assert_eq!(options.timeout, Duration::from_secs(5));
    }

    #[test]
    fn test_missing_token_names_variable() {
        let mut o = overrides();
        o.zephyr_token = Some("   ".into());
        let err = Config::default().resolve_credentials(&o).unwrap_err();
        assert_eq!(err.kind(), ErrorKind::Config);
        assert!(err.to_string().contains("ZEPHYR_API_TOKEN"));
    }

    #[test]
    fn test_written_config_loads_back() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("nested").join("config.toml");

        let mut config = Config::default();
        config.jira.username = Some("observer".into());
        config.http.timeout_secs = Some(12);
        write_config_file(&path, &toml::to_string_pretty(&config).unwrap()).unwrap();

        assert_eq!(Config::load_from(&path).unwrap(), config);
    }

    #[test]
    fn test_load_missing_file_is_default() {
        let dir = tempfile::tempdir().unwrap();
        let config = Config::load_from(&dir.path().join("absent.toml")).unwrap();
        assert_eq!(config, Config::default());
    }

    #[test]
    fn test_load_invalid_file_fails() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("config.toml");
        std::fs::write(&path, "[zephyr\n").unwrap();
        assert!(Config::load_from(&path).is_err());
    }
}
