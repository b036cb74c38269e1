//
//  planning-tool
//  api/zephyr/mod.rs
//
//  Created by Ngonidzashe Mangudya on 2026/01/12.
//  Copyright (c) 2025 IAMNGONI. All rights reserved.
//

//! Zephyr Scale Cloud API v2 payload types.
//!
//! These structs mirror the vendor JSON closely and are deserialized with
//! every non-identifying field optional, so additional or missing fields never
//! break decoding. The normalized records live in [`crate::model`].
//!
//! ## Endpoints
//!
//! | Resource | Path |
//! |----------|------|
//! | Test cycles | `testcycles`, `testcycles/{key}` |
//! | Test cases | `testcases/{key}`, `testcases/{key}/teststeps` |
//! | Test executions | `testexecutions`, `testexecutions/{key}` |
//! | Statuses | `statuses`, `statuses/{id}` |
//! | Folders | `folders/{id}` |
//! | Projects | `projects/{id}` |

pub mod cases;
pub mod cycles;
pub mod executions;
pub mod reference;

pub use cases::*;
pub use cycles::*;
pub use executions::*;
pub use reference::*;

use serde::{Deserialize, Serialize};

/// Reference to another resource by numeric id.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct IdRef {
    pub id: u64,

    #[serde(default, rename = "self", skip_serializing_if = "Option::is_none")]
    pub self_url: Option<String>,
}

/// Reference to a Jira account.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct AccountRef {
    pub account_id: String,

    #[serde(default, rename = "self", skip_serializing_if = "Option::is_none")]
    pub self_url: Option<String>,
}

/// Reference to a versioned resource (`.../testcases/BLOCK-T21/versions/1`).
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct VersionedRef {
    #[serde(default)]
    pub id: Option<u64>,

    #[serde(default, rename = "self")]
    pub self_url: Option<String>,
}

/// Response body of create endpoints.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct CreatedResource {
    pub id: u64,

    #[serde(default)]
    pub key: Option<String>,

    #[serde(default, rename = "self")]
    pub self_url: Option<String>,
}
