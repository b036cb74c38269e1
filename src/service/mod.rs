//
//  planning-tool
//  service/mod.rs
//
//  Created by Ngonidzashe Mangudya on 2026/01/12.
//  Copyright (c) 2025 IAMNGONI. All rights reserved.
//

//! # Zephyr Scale / Jira Façade
//!
//! [`ZephyrClient`] is the public surface of the library: one method per
//! supported operation, composing the transport, the pagination cursor and
//! the mapper.
//!
//! ## Operation contract
//!
//! - Required inputs are validated locally before any request is made.
//! - An operation may issue several requests (resolve a key to an id, then
//!   act on the id), but returns one result. When a later request fails, the
//!   error names the sub-step that failed (see [`ApiError::steps`]).
//! - Nothing is cached across calls. Name lookups are cached only for the
//!   duration of one call.
//! - Errors are never retried here; [`ApiError::retriable`] tells the caller
//!   whether trying again makes sense.
//!
//! ## Example
//!
//! ```rust,no_run
//! use planning_tool::auth::Credentials;
//! use planning_tool::service::ZephyrClient;
//!
//! # async fn example() -> planning_tool::api::ApiResult<()> {
//! let credentials = Credentials::new(
//!     "jira-token",
//!     "observer",
//!     "zephyr-token",
//!     "https://rubinobs.atlassian.net/rest/api/2/",
//!     "https://api.zephyrscale.smartbear.com/v2/",
//! )?;
//! let client = ZephyrClient::new(credentials)?;
//!
//! let cycle = client.get_test_cycle("BLOCK-R21").await?;
//! println!("{} ({} test plans)", cycle.name, cycle.links.test_plans.len());
//!
//! let mut cases = client.list_test_cases_in_cycle("BLOCK-R21")?;
//! while let Some(case) = cases.try_next().await? {
//!     println!("{} {}", case.key, case.name);
//! }
//! # Ok(())
//! # }
//! ```

mod cases;
mod cycles;
mod executions;
mod jira;
mod statuses;

pub use cases::CycleTestCases;
pub use executions::latest_per_test_case;

use std::time::Duration;

use async_trait::async_trait;
use serde::de::DeserializeOwned;

use crate::api::client::{EndpointPages, HttpTransport, TransportOptions};
use crate::api::common::{ApiError, ApiResult, Paginator};
use crate::api::zephyr::{RawStatus, RawTestCase, RawTestCycle, RawTestExecution, RawTestStep};
use crate::auth::Credentials;
use crate::mapper::{status_from_raw, Mapper};
use crate::model::{Status, TestCase, TestCycle, TestExecution, TestStep};

/// Default number of records requested per page.
pub const DEFAULT_PAGE_SIZE: u32 = 50;

/// Tunables for a [`ZephyrClient`].
#[derive(Debug, Clone)]
pub struct ClientOptions {
    /// Per-request timeout; an expired timeout is a transient error.
    pub timeout: Duration,
    /// `maxResults` sent to list endpoints.
    pub page_size: u32,
}

impl Default for ClientOptions {
    fn default() -> Self {
        Self {
            timeout: TransportOptions::default().timeout,
            page_size: DEFAULT_PAGE_SIZE,
        }
    }
}

/// Client for the Zephyr Scale and Jira APIs.
///
/// Owns its [`Credentials`] exclusively; two clients never share state.
pub struct ZephyrClient {
    transport: HttpTransport,
    page_size: u32,
}

impl ZephyrClient {
    pub fn new(credentials: Credentials) -> ApiResult<Self> {
        Self::with_options(credentials, ClientOptions::default())
    }

    pub fn with_options(credentials: Credentials, options: ClientOptions) -> ApiResult<Self> {
        if options.page_size == 0 {
            return Err(ApiError::Config("page size must be at least 1".to_string()));
        }

        let transport = HttpTransport::new(
            credentials,
            &TransportOptions {
                timeout: options.timeout,
            },
        )?;

        Ok(Self {
            transport,
            page_size: options.page_size,
        })
    }

    pub fn credentials(&self) -> &Credentials {
        self.transport.credentials()
    }

    pub fn transport(&self) -> &HttpTransport {
        &self.transport
    }

    pub fn page_size(&self) -> u32 {
        self.page_size
    }

    fn records<T: MapRecord>(
        &self,
        path: impl Into<String>,
        query: Vec<(&'static str, String)>,
    ) -> Records<'_, T> {
        Records {
            pages: self.transport.pages(path, query, self.page_size),
            mapper: Mapper::new(&self.transport),
        }
    }
}

/// A record type that can be produced from its raw payload by a [`Mapper`].
#[async_trait]
pub trait MapRecord: Sized + Send {
    type Raw: DeserializeOwned + Send + 'static;

    async fn map(raw: Self::Raw, mapper: &mut Mapper<'_>) -> ApiResult<Self>;
}

#[async_trait]
impl MapRecord for TestCycle {
    type Raw = RawTestCycle;

    async fn map(raw: RawTestCycle, mapper: &mut Mapper<'_>) -> ApiResult<Self> {
        mapper.to_test_cycle(raw).await
    }
}

#[async_trait]
impl MapRecord for TestCase {
    type Raw = RawTestCase;

    async fn map(raw: RawTestCase, mapper: &mut Mapper<'_>) -> ApiResult<Self> {
        mapper.to_test_case(raw).await
    }
}

#[async_trait]
impl MapRecord for TestExecution {
    type Raw = RawTestExecution;

    async fn map(raw: RawTestExecution, mapper: &mut Mapper<'_>) -> ApiResult<Self> {
        mapper.to_test_execution(raw).await
    }
}

#[async_trait]
impl MapRecord for TestStep {
    type Raw = RawTestStep;

    async fn map(raw: RawTestStep, mapper: &mut Mapper<'_>) -> ApiResult<Self> {
        mapper.to_test_step(raw).await
    }
}

#[async_trait]
impl MapRecord for Status {
    type Raw = RawStatus;

    async fn map(raw: RawStatus, _mapper: &mut Mapper<'_>) -> ApiResult<Self> {
        Ok(status_from_raw(raw))
    }
}

/// Lazy sequence of mapped records from one list endpoint.
///
/// Pages are fetched on demand and each raw value is mapped as it is
/// returned. A failure ends the sequence; values already returned stay valid.
pub struct Records<'a, T: MapRecord> {
    pages: Paginator<EndpointPages<'a, T::Raw>>,
    mapper: Mapper<'a>,
}

impl<'a, T: MapRecord> Records<'a, T> {
    pub async fn try_next(&mut self) -> ApiResult<Option<T>> {
        match self.pages.try_next().await? {
            Some(raw) => T::map(raw, &mut self.mapper).await.map(Some),
            None => Ok(None),
        }
    }

    pub async fn collect_all(&mut self) -> ApiResult<Vec<T>> {
        let mut records = Vec::new();
        while let Some(record) = self.try_next().await? {
            records.push(record);
        }
        Ok(records)
    }

    /// Starts over from the first page; every request is issued again.
    pub fn restart(&mut self) {
        self.pages.restart();
    }

    pub fn pages_fetched(&self) -> usize {
        self.pages.pages_fetched()
    }
}
