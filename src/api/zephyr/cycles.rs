//
//  planning-tool
//  api/zephyr/cycles.rs
//
//  Created by Ngonidzashe Mangudya on 2026/01/12.
//  Copyright (c) 2025 IAMNGONI. All rights reserved.
//

//! Test cycle payloads.
//!
//! A test cycle key has the form `{PROJECT_KEY}-R{CYCLE_NUMBER}`, for example
//! `BLOCK-R21`.

use serde::{Deserialize, Serialize};
use serde_json::{Map, Value};

use super::{AccountRef, IdRef};

/// A test cycle as returned by `GET testcycles/{key}`.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct RawTestCycle {
    pub id: u64,

    pub key: String,

    pub name: String,

    pub project: IdRef,

    #[serde(default)]
    pub jira_project_version: Option<IdRef>,

    #[serde(default)]
    pub status: Option<IdRef>,

    #[serde(default)]
    pub folder: Option<IdRef>,

    /// HTML description.
    #[serde(default)]
    pub description: Option<String>,

    #[serde(default)]
    pub planned_start_date: Option<String>,

    #[serde(default)]
    pub planned_end_date: Option<String>,

    #[serde(default)]
    pub owner: Option<AccountRef>,

    #[serde(default)]
    pub custom_fields: Option<Map<String, Value>>,

    #[serde(default)]
    pub links: Option<RawCycleLinks>,
}

/// `links` block of a test cycle.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct RawCycleLinks {
    #[serde(default)]
    pub test_plans: Vec<RawTestPlanLink>,

    #[serde(default)]
    pub issues: Vec<Value>,

    #[serde(default)]
    pub web_links: Vec<Value>,
}

/// A link from a test cycle to a test plan.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct RawTestPlanLink {
    #[serde(default)]
    pub id: Option<u64>,

    pub test_plan_id: u64,

    #[serde(default, rename = "type")]
    pub link_type: Option<String>,

    #[serde(default, rename = "self")]
    pub self_url: Option<String>,
}

/// Request payload for `POST testcycles`.
///
/// Only `project_key` and `name` are required by the vendor.
#[derive(Debug, Clone, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct CreateTestCycleRequest {
    pub project_key: String,

    pub name: String,

    #[serde(skip_serializing_if = "Option::is_none")]
    pub description: Option<String>,

    #[serde(skip_serializing_if = "Option::is_none")]
    pub planned_start_date: Option<String>,

    #[serde(skip_serializing_if = "Option::is_none")]
    pub planned_end_date: Option<String>,

    #[serde(skip_serializing_if = "Option::is_none")]
    pub status_name: Option<String>,

    #[serde(skip_serializing_if = "Option::is_none")]
    pub folder_id: Option<u64>,

    #[serde(skip_serializing_if = "Option::is_none")]
    pub owner_id: Option<String>,

    #[serde(skip_serializing_if = "Map::is_empty")]
    pub custom_fields: Map<String, Value>,
}
