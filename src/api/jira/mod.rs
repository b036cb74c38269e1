//
//  planning-tool
//  api/jira/mod.rs
//
//  Created by Ngonidzashe Mangudya on 2026/01/12.
//  Copyright (c) 2025 IAMNGONI. All rights reserved.
//

//! Jira REST API v2 payload types.
//!
//! Jira is used for identity (`myself`, user lookup by account id) and for
//! posting operational log comments on issues.

use serde::{Deserialize, Serialize};

/// A Jira user.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct JiraUser {
    pub account_id: String,

    #[serde(default)]
    pub display_name: Option<String>,

    #[serde(default)]
    pub email_address: Option<String>,

    #[serde(default)]
    pub active: bool,

    #[serde(default)]
    pub time_zone: Option<String>,
}

/// A comment on an issue.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Comment {
    pub id: String,

    #[serde(default)]
    pub body: String,

    #[serde(default)]
    pub author: Option<JiraUser>,

    #[serde(default)]
    pub created: Option<String>,

    #[serde(default, rename = "self")]
    pub self_url: Option<String>,
}

/// Request payload for `POST issue/{key}/comment`.
#[derive(Debug, Clone, Serialize)]
pub struct AddCommentRequest<'a> {
    pub body: &'a str,
}
