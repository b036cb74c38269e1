//
//  planning-tool
//  tests/common/mod.rs
//
//  Created by Ngonidzashe Mangudya on 2026/01/12.
//  Copyright (c) 2025 IAMNGONI. All rights reserved.
//

//! Shared helpers for the mock-server tests.

#![allow(dead_code)]

use mockito::{Matcher, ServerGuard};
use serde_json::{json, Value};

use planning_tool::auth::Credentials;
use planning_tool::service::{ClientOptions, ZephyrClient};

pub const ZEPHYR_TOKEN: &str = "zephyr-token";
pub const JIRA_TOKEN: &str = "jira-token";
pub const JIRA_USERNAME: &str = "observer";

/// `Authorization` header sent to Zephyr Scale.
pub const BEARER: &str = "Bearer zephyr-token";

/// `Authorization` header sent to Jira: base64("observer:jira-token").
pub const BASIC: &str = "Basic b2JzZXJ2ZXI6amlyYS10b2tlbg==";

pub fn credentials(server: &ServerGuard) -> Credentials {
    Credentials::new(
        JIRA_TOKEN,
        JIRA_USERNAME,
        ZEPHYR_TOKEN,
        format!("{}/rest/api/2/", server.url()),
        format!("{}/v2/", server.url()),
    )
    .unwrap()
}

/// Client pointed at `server` for both services.
pub fn client(server: &ServerGuard) -> ZephyrClient {
    ZephyrClient::new(credentials(server)).unwrap()
}

pub fn client_with_page_size(server: &ServerGuard, page_size: u32) -> ZephyrClient {
    let options = ClientOptions {
        page_size,
        ..ClientOptions::default()
    };
    ZephyrClient::with_options(credentials(server), options).unwrap()
}

/// The BLOCK-R21 test cycle as Zephyr Scale returns it.
pub fn cycle_fixture() -> Value {
    serde_json::from_str(include_str!("../fixtures/BLOCK-R21.json")).unwrap()
}

pub fn status_body(id: u64, name: &str) -> String {
    json!({
        "id": id,
        "name": name,
        "project": { "id": 10036 },
        "index": 1,
        "color": "#0fbd16",
        "archived": false,
        "default": false
    })
    .to_string()
}

pub fn test_case_body(key: &str, id: u64) -> String {
    json!({
        "id": id,
        "key": key,
        "name": format!("Observing block {}", key),
        "project": { "id": 10036 },
        "labels": ["night"],
        "status": { "id": 6360090 },
        "customFields": {}
    })
    .to_string()
}

/// Same as [`test_case_body`] but filed under folder `folder`.
pub fn test_case_in_folder(key: &str, id: u64, folder: u64) -> String {
    let mut body: Value = serde_json::from_str(&test_case_body(key, id)).unwrap();
    body["folder"] = json!({ "id": folder });
    body.to_string()
}

pub fn execution(id: u64, case_key: &str, end: &str) -> Value {
    json!({
        "id": id,
        "key": format!("BLOCK-E{}", id),
        "project": { "id": 10036 },
        "testCase": {
            "id": 1,
            "self": format!("https://api.zephyrscale.smartbear.com/v2/testcases/{}/versions/1", case_key)
        },
        "testCycle": { "id": 22355742 },
        "actualEndDate": end,
        "automated": false
    })
}

/// One page of a Zephyr Scale list response.
pub fn page(values: Vec<Value>, start_at: u32, max_results: u32, total: u32) -> String {
    let is_last = start_at + max_results >= total;
    json!({
        "next": null,
        "startAt": start_at,
        "maxResults": max_results,
        "total": total,
        "isLast": is_last,
        "values": values
    })
    .to_string()
}

/// Matches `path` with or without a trailing query string.
pub fn path_with_query(path: &str) -> Matcher {
    Matcher::Regex(format!(r"^{}(\?.*)?$", regex::escape(path)))
}

pub fn start_at(offset: u32) -> Matcher {
    Matcher::UrlEncoded("startAt".into(), offset.to_string())
}
