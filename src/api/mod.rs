//
//  planning-tool
//  api/mod.rs
//
//  Created by Ngonidzashe Mangudya on 2026/01/12.
//  Copyright (c) 2025 IAMNGONI. All rights reserved.
//

//! # API Client Layer
//!
//! This module provides the HTTP plumbing and vendor payload types for the two
//! REST backends the tool talks to.
//!
//! ## Supported Services
//!
//! - **Zephyr Scale Cloud**: API v2 at `api.zephyrscale.smartbear.com`, bearer token
//! - **Jira Cloud**: REST API v2 at your site, basic auth with an API token
//!
//! ## Architecture
//!
//! - [`client`]: Authenticated transport, one round trip per call
//! - [`common`]: Error taxonomy and the pagination cursor
//! - [`zephyr`]: Raw Zephyr Scale payloads (cycles, cases, executions, reference data)
//! - [`jira`]: Raw Jira payloads (users, comments)
//!
//! ## Error Handling
//!
//! Non-2xx responses are classified into [`ApiError`] variants:
//!
//! - `Auth`: 401 Unauthorized, 403 Forbidden
//! - `NotFound`: 404 Not Found
//! - `Transient`: 429 Too Many Requests, 5xx, timeouts
//! - `Validation`: any other 4xx, with the vendor message

/// Authenticated HTTP transport for both hosts.
pub mod client;

/// Shared error type and pagination.
pub mod common;

/// Jira REST API v2 payloads.
pub mod jira;

/// Zephyr Scale API v2 payloads.
pub mod zephyr;

pub use client::{Host, HttpTransport, TransportOptions};
pub use common::{ApiError, ApiResult, ErrorKind};
