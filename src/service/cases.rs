//
//  planning-tool
//  service/cases.rs
//
//  Created by Ngonidzashe Mangudya on 2026/01/12.
//  Copyright (c) 2025 IAMNGONI. All rights reserved.
//

//! Test case operations.

use std::collections::HashSet;

use serde_json::Value;
use tracing::debug;

use super::{Records, ZephyrClient};
use crate::api::client::{EndpointPages, Host, HttpTransport};
use crate::api::common::{ApiError, ApiResult, Paginator};
use crate::api::zephyr::{parse_test_case_url, RawTestCase, RawTestExecution};
use crate::mapper::Mapper;
use crate::model::{KeyKind, RecordKey, TestCase, TestStep};

impl ZephyrClient {
    pub async fn get_test_case_raw(&self, key: &str) -> ApiResult<Value> {
        let key = RecordKey::parse_as(key, KeyKind::TestCase)?;
        let path = format!("testcases/{}", key);
        self.transport.get(Host::TestManagement, &path, &[]).await
    }

    /// Fetches a test case and resolves its status and folder names.
    pub async fn get_test_case(&self, key: &str) -> ApiResult<TestCase> {
        let key = RecordKey::parse_as(key, KeyKind::TestCase)?;
        let path = format!("testcases/{}", key);
        let raw: RawTestCase = self.transport.get(Host::TestManagement, &path, &[]).await?;
        Mapper::new(&self.transport).to_test_case(raw).await
    }

    /// Lazily lists the steps of a test case.
    pub fn get_test_case_steps(&self, key: &str) -> ApiResult<Records<'_, TestStep>> {
        let key = RecordKey::parse_as(key, KeyKind::TestCase)?;
        Ok(self.records(format!("testcases/{}/teststeps", key), Vec::new()))
    }

    /// Lazily lists the distinct test cases executed in a test cycle.
    ///
    /// Test cases are discovered through the cycle's executions, in the
    /// order the vendor returns them. A test case executed several times is
    /// yielded once.
    pub fn list_test_cases_in_cycle(&self, key: &str) -> ApiResult<CycleTestCases<'_>> {
        let key = RecordKey::parse_as(key, KeyKind::TestCycle)?;
        Ok(CycleTestCases {
            cycle: key.to_string(),
            executions: self.transport.pages(
                "testexecutions",
                vec![("testCycle", key.to_string())],
                self.page_size,
            ),
            transport: &self.transport,
            mapper: Mapper::new(&self.transport),
            seen: HashSet::new(),
        })
    }
}

/// Lazy sequence of the test cases in one test cycle.
///
/// Each step pulls executions until one references a test case not yet
/// seen, then fetches and maps that test case.
pub struct CycleTestCases<'a> {
    cycle: String,
    executions: Paginator<EndpointPages<'a, RawTestExecution>>,
    transport: &'a HttpTransport,
    mapper: Mapper<'a>,
    seen: HashSet<String>,
}

impl<'a> CycleTestCases<'a> {
    pub async fn try_next(&mut self) -> ApiResult<Option<TestCase>> {
        while let Some(execution) = self
            .executions
            .try_next()
            .await
            .map_err(|e| e.during(format!("list executions of {}", self.cycle)))?
        {
            let url = execution.test_case.self_url.as_deref().unwrap_or_default();
            let (case_key, _) = parse_test_case_url(url).ok_or_else(|| {
                ApiError::invalid(format!(
                    "execution {} has no test case reference",
                    execution.key
                ))
            })?;

            if !self.seen.insert(case_key.clone()) {
                continue;
            }

            debug!(cycle = %self.cycle, test_case = %case_key, "Fetching test case");
            let path = format!("testcases/{}", case_key);
            let raw: RawTestCase = self
                .transport
                .get(Host::TestManagement, &path, &[])
                .await
                .map_err(|e| e.during(format!("fetch test case {}", case_key)))?;
            return self
                .mapper
                .to_test_case(raw)
                .await
                .map(Some)
                .map_err(|e| e.during(format!("map test case {}", case_key)));
        }
        Ok(None)
    }

    pub async fn collect_all(&mut self) -> ApiResult<Vec<TestCase>> {
        let mut cases = Vec::new();
        while let Some(case) = self.try_next().await? {
            cases.push(case);
        }
        Ok(cases)
    }

    /// Starts over from the first execution page.
    pub fn restart(&mut self) {
        self.executions.restart();
        self.seen.clear();
    }

    /// Number of execution pages fetched so far.
    pub fn pages_fetched(&self) -> usize {
        self.executions.pages_fetched()
    }
}
