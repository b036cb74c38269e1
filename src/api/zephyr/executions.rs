//
//  planning-tool
//  api/zephyr/executions.rs
//
//  Created by Ngonidzashe Mangudya on 2026/01/12.
//  Copyright (c) 2025 IAMNGONI. All rights reserved.
//

//! Test execution payloads.
//!
//! Executions reference their test case only through a versioned `self` URL,
//! e.g. `https://api.zephyrscale.smartbear.com/v2/testcases/BLOCK-T21/versions/1`.
//! [`parse_test_case_url`] extracts the key and version from it.

use serde::{Deserialize, Serialize};
use serde_json::{Map, Value};

use super::{IdRef, VersionedRef};

/// A test execution as returned by `GET testexecutions/{key}`.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct RawTestExecution {
    pub id: u64,

    pub key: String,

    pub project: IdRef,

    pub test_case: VersionedRef,

    #[serde(default)]
    pub test_cycle: Option<VersionedRef>,

    #[serde(default)]
    pub test_execution_status: Option<IdRef>,

    #[serde(default)]
    pub environment: Option<IdRef>,

    #[serde(default)]
    pub actual_end_date: Option<String>,

    /// Milliseconds.
    #[serde(default)]
    pub execution_time: Option<u64>,

    #[serde(default)]
    pub executed_by_id: Option<String>,

    #[serde(default)]
    pub assigned_to_id: Option<String>,

    #[serde(default)]
    pub comment: Option<String>,

    #[serde(default)]
    pub automated: bool,

    #[serde(default)]
    pub custom_fields: Option<Map<String, Value>>,
}

/// Extracts `(test case key, version)` from a versioned test case URL.
///
/// ```rust
/// use planning_tool::api::zephyr::parse_test_case_url;
///
/// let url = "https://api.zephyrscale.smartbear.com/v2/testcases/BLOCK-T21/versions/1";
/// assert_eq!(parse_test_case_url(url), Some(("BLOCK-T21".to_string(), Some(1))));
/// ```
pub fn parse_test_case_url(url: &str) -> Option<(String, Option<u32>)> {
    let segments: Vec<&str> = url.trim_end_matches('/').split('/').collect();
    let position = segments.iter().rposition(|s| *s == "testcases")?;
    let key = segments.get(position + 1).filter(|k| !k.is_empty())?;

    let version = match segments.get(position + 2) {
        Some(&"versions") => segments.get(position + 3).and_then(|v| v.parse().ok()),
        _ => None,
    };

    Some((key.to_string(), version))
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_parse_versioned_url() {
        let url = "https://api.zephyrscale.smartbear.com/v2/testcases/BLOCK-T21/versions/3";
        assert_eq!(parse_test_case_url(url), Some(("BLOCK-T21".to_string(), Some(3))));
    }

    #[test]
    fn test_parse_unversioned_url() {
        let url = "https://api.zephyrscale.smartbear.com/v2/testcases/BLOCK-T7";
        assert_eq!(parse_test_case_url(url), Some(("BLOCK-T7".to_string(), None)));
    }

    #[test]
    fn test_parse_rejects_other_urls() {
        assert_eq!(parse_test_case_url("https://example.org/testcycles/BLOCK-R1"), None);
        assert_eq!(parse_test_case_url("https://example.org/testcases/"), None);
    }
}
