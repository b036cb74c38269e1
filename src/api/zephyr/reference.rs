//
//  planning-tool
//  api/zephyr/reference.rs
//
//  Created by Ngonidzashe Mangudya on 2026/01/12.
//  Copyright (c) 2025 IAMNGONI. All rights reserved.
//

//! Reference data used to resolve ids to names: statuses, folders, projects.

use serde::{Deserialize, Serialize};

use super::IdRef;

/// A workflow status (`GET statuses/{id}`).
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct RawStatus {
    pub id: u64,

    pub name: String,

    #[serde(default)]
    pub project: Option<IdRef>,

    #[serde(default)]
    pub description: Option<String>,

    #[serde(default)]
    pub index: Option<u32>,

    #[serde(default)]
    pub color: Option<String>,

    #[serde(default)]
    pub archived: bool,

    #[serde(default)]
    pub default: bool,
}

/// A folder (`GET folders/{id}`).
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct RawFolder {
    pub id: u64,

    pub name: String,

    #[serde(default)]
    pub parent_id: Option<u64>,

    #[serde(default)]
    pub folder_type: Option<String>,
}

/// A Zephyr-enabled Jira project (`GET projects/{id}`).
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct RawProject {
    pub id: u64,

    pub key: String,

    #[serde(default)]
    pub jira_project_id: Option<u64>,

    #[serde(default)]
    pub enabled: bool,
}
