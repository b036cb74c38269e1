//
//  planning-tool
//  config/file.rs
//
//  Created by Ngonidzashe Mangudya on 2026/01/12.
//  Copyright (c) 2025 IAMNGONI. All rights reserved.
//

//! # Configuration File I/O Module
//!
//! Low-level file operations for configuration management, plus the
//! commented template written by `zapi config init`.
//!
//! ## Notes
//!
//! - All functions accept `&Path` to support both `Path` and `PathBuf`
//! - Write operations automatically create parent directories

use std::path::Path;

use anyhow::{Context, Result};

/// Written by `zapi config init`. Every setting is commented out, so the
/// file starts out equivalent to no file at all.
pub const CONFIG_TEMPLATE: &str = r#"# zapi configuration
#
# API tokens are read from ZEPHYR_API_TOKEN and JIRA_API_TOKEN only.
# Flags and environment variables take precedence over this file.

[zephyr]
# base_url = "https://api.zephyrscale.smartbear.com/v2/"
# page_size = 50

[jira]
# base_url = "https://rubinobs.atlassian.net/rest/api/2/"
# username = "you@example.org"

[http]
# timeout_secs = 30
"#;

pub fn read_config_file(path: &Path) -> Result<String> {
    std::fs::read_to_string(path).with_context(|| format!("Failed to read {}", path.display()))
}

pub fn write_config_file(path: &Path, content: &str) -> Result<()> {
    if let Some(parent) = path.parent() {
        std::fs::create_dir_all(parent)?;
    }
    std::fs::write(path, content).with_context(|| format!("Failed to write {}", path.display()))?;
    Ok(())
}

pub fn config_exists(path: &Path) -> bool {
    path.exists()
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::config::Config;

    #[test]
    fn test_template_parses_to_defaults() {
        let config: Config = toml::from_str(CONFIG_TEMPLATE).unwrap();
        assert_eq!(config, Config::default());
    }

    #[test]
    fn test_write_creates_parents() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("a").join("b").join("config.toml");
        write_config_file(&path, "x = 1\n").unwrap();
        assert!(config_exists(&path));
        assert_eq!(read_config_file(&path).unwrap(), "x = 1\n");
    }
}
