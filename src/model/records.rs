//
//  planning-tool
//  model/records.rs
//
//  Created by Ngonidzashe Mangudya on 2026/01/12.
//  Copyright (c) 2025 IAMNGONI. All rights reserved.
//

//! Normalized test-management records.
//!
//! Every record here is produced by [`crate::mapper`] from the raw vendor
//! payload, with foreign ids resolved to display names where the dashboard
//! needs them. Records are plain values: nothing is cached between calls, so
//! each fetch is authoritative at the time it was made.

use std::collections::BTreeMap;
use std::fmt;
use std::str::FromStr;

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

use super::CustomFieldValue;

/// Custom fields keyed by their display name (e.g. `"Night Planner"`).
pub type CustomFields = BTreeMap<String, CustomFieldValue>;

/// A test cycle.
///
/// # Fields
///
/// * `key` - Human-readable key, e.g. `BLOCK-R21`
/// * `status_name` - Resolved from `status_id`; `"unknown"` when the lookup 404s
/// * `description` - HTML string as stored by the vendor
/// * `links` - Test plans this cycle belongs to
///
/// # Example
///
/// ```rust
/// use planning_tool::model::{CustomFieldValue, TestCycle};
///
/// let mut cycle = TestCycle::draft(10, "Night 2024-05-01");
/// cycle.custom_fields.insert("Night Planner".into(), CustomFieldValue::from("Bruno Quint"));
/// assert!(cycle.key.is_empty());
/// ```
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct TestCycle {
    pub id: u64,
    pub key: String,
    pub name: String,
    pub project_id: u64,
    pub status_id: Option<u64>,
    pub status_name: Option<String>,
    pub folder_id: Option<u64>,
    pub description: Option<String>,
    pub planned_start: Option<DateTime<Utc>>,
    pub planned_end: Option<DateTime<Utc>>,
    pub owner_account_id: Option<String>,
    pub custom_fields: CustomFields,
    pub links: CycleLinks,
}

impl TestCycle {
    /// A cycle that does not exist yet, to be passed to `create_test_cycle`.
    pub fn draft(project_id: u64, name: impl Into<String>) -> Self {
        Self {
            id: 0,
            key: String::new(),
            name: name.into(),
            project_id,
            status_id: None,
            status_name: None,
            folder_id: None,
            description: None,
            planned_start: None,
            planned_end: None,
            owner_account_id: None,
            custom_fields: CustomFields::new(),
            links: CycleLinks::default(),
        }
    }
}

#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct CycleLinks {
    pub test_plans: Vec<TestPlanLink>,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct TestPlanLink {
    pub id: Option<u64>,
    pub test_plan_id: u64,
    pub link_type: Option<String>,
}

/// A test case.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct TestCase {
    pub id: u64,
    pub key: String,
    pub name: String,
    pub project_id: u64,
    pub folder_id: Option<u64>,
    pub folder_name: Option<String>,
    pub status_id: Option<u64>,
    pub status_name: Option<String>,
    pub objective: Option<String>,
    pub labels: Vec<String>,
    pub owner_account_id: Option<String>,
    pub custom_fields: CustomFields,
}

/// One run of a test case inside a test cycle.
///
/// The test case is only known through the versioned URL the vendor returns,
/// so `test_case_key` and `test_case_version` are parsed from it.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct TestExecution {
    pub id: u64,
    pub key: String,
    pub project_id: u64,
    pub test_case_key: String,
    pub test_case_version: Option<u32>,
    pub test_cycle_id: Option<u64>,
    pub status_id: Option<u64>,
    pub status_name: Option<String>,
    pub executed_by: Option<String>,
    pub assigned_to: Option<String>,
    pub actual_end_date: Option<DateTime<Utc>>,
    pub execution_time_ms: Option<u64>,
    pub comment: Option<String>,
    pub automated: bool,
    pub custom_fields: CustomFields,
}

/// A step of a test case or test execution.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(tag = "type", rename_all = "snake_case")]
pub enum TestStep {
    /// A step written out in place.
    Inline {
        description: Option<String>,
        test_data: Option<String>,
        expected_result: Option<String>,
        actual_result: Option<String>,
        status_name: Option<String>,
    },
    /// A step that runs another test case.
    Call { test_case_key: String },
}

/// A workflow status.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Status {
    pub id: u64,
    pub name: String,
    pub project_id: Option<u64>,
    pub description: Option<String>,
    pub color: Option<String>,
    pub archived: bool,
    pub default: bool,
}

/// The record type a status applies to.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "SCREAMING_SNAKE_CASE")]
pub enum StatusType {
    TestCase,
    TestPlan,
    TestCycle,
    TestExecution,
}

impl StatusType {
    pub const ALL: [StatusType; 4] = [
        Self::TestCase,
        Self::TestPlan,
        Self::TestCycle,
        Self::TestExecution,
    ];

    pub fn as_str(&self) -> &'static str {
        match self {
            Self::TestCase => "TEST_CASE",
            Self::TestPlan => "TEST_PLAN",
            Self::TestCycle => "TEST_CYCLE",
            Self::TestExecution => "TEST_EXECUTION",
        }
    }
}

impl fmt::Display for StatusType {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl FromStr for StatusType {
    type Err = String;

    /// Accepts `TEST_CYCLE`, `test-cycle` and `test_cycle` alike.
    fn from_str(s: &str) -> Result<Self, Self::Err> {
        let normalized = s.trim().to_ascii_uppercase().replace('-', "_");
        Self::ALL
            .into_iter()
            .find(|t| t.as_str() == normalized)
            .ok_or_else(|| {
                format!(
                    "unknown status type '{}': expected one of TEST_CASE, TEST_PLAN, TEST_CYCLE, TEST_EXECUTION",
                    s
                )
            })
    }
}
