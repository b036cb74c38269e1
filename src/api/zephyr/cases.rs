//
//  planning-tool
//  api/zephyr/cases.rs
//
//  Created by Ngonidzashe Mangudya on 2026/01/12.
//  Copyright (c) 2025 IAMNGONI. All rights reserved.
//

//! Test case and test step payloads.
//!
//! Test case steps and test execution steps share one shape; the execution
//! variant adds an actual result and a per-step status.

use serde::{Deserialize, Serialize};
use serde_json::{Map, Value};

use super::{AccountRef, IdRef};

/// A test case as returned by `GET testcases/{key}`.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct RawTestCase {
    pub id: u64,

    pub key: String,

    pub name: String,

    pub project: IdRef,

    #[serde(default)]
    pub objective: Option<String>,

    #[serde(default)]
    pub precondition: Option<String>,

    #[serde(default)]
    pub labels: Vec<String>,

    #[serde(default)]
    pub priority: Option<IdRef>,

    #[serde(default)]
    pub status: Option<IdRef>,

    #[serde(default)]
    pub folder: Option<IdRef>,

    #[serde(default)]
    pub owner: Option<AccountRef>,

    #[serde(default)]
    pub custom_fields: Option<Map<String, Value>>,
}

/// One entry of `GET testcases/{key}/teststeps`.
///
/// Exactly one of `inline` and `test_case` is set: a step is either written
/// out, or delegates to another test case.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct RawTestStep {
    #[serde(default)]
    pub inline: Option<RawInlineStep>,

    #[serde(default)]
    pub test_case: Option<RawCallToTestCase>,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct RawInlineStep {
    #[serde(default)]
    pub description: Option<String>,

    #[serde(default)]
    pub test_data: Option<String>,

    #[serde(default)]
    pub expected_result: Option<String>,

    /// Execution steps only.
    #[serde(default)]
    pub actual_result: Option<String>,

    /// Execution steps only.
    #[serde(default)]
    pub status: Option<IdRef>,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct RawCallToTestCase {
    pub test_case_key: String,

    #[serde(default, rename = "self")]
    pub self_url: Option<String>,
}
