//
//  planning-tool
//  service/executions.rs
//
//  Created by Ngonidzashe Mangudya on 2026/01/12.
//  Copyright (c) 2025 IAMNGONI. All rights reserved.
//

//! Test execution operations.

use std::collections::HashMap;

use serde_json::Value;

use super::{Records, ZephyrClient};
use crate::api::client::Host;
use crate::api::common::{ApiError, ApiResult};
use crate::api::zephyr::RawTestExecution;
use crate::mapper::Mapper;
use crate::model::{KeyKind, RecordKey, TestExecution, TestStep};

impl ZephyrClient {
    pub async fn get_test_execution_raw(&self, key: &str) -> ApiResult<Value> {
        let key = RecordKey::parse_as(key, KeyKind::TestExecution)?;
        let path = format!("testexecutions/{}", key);
        self.transport.get(Host::TestManagement, &path, &[]).await
    }

    pub async fn get_test_execution(&self, key: &str) -> ApiResult<TestExecution> {
        let key = RecordKey::parse_as(key, KeyKind::TestExecution)?;
        let path = format!("testexecutions/{}", key);
        let raw: RawTestExecution = self.transport.get(Host::TestManagement, &path, &[]).await?;
        Mapper::new(&self.transport).to_test_execution(raw).await
    }

    /// Lazily lists the steps of a test execution, with actual results.
    pub fn get_test_execution_steps(&self, key: &str) -> ApiResult<Records<'_, TestStep>> {
        let key = RecordKey::parse_as(key, KeyKind::TestExecution)?;
        Ok(self.records(format!("testexecutions/{}/teststeps", key), Vec::new()))
    }

    /// Lazily lists the executions of a test cycle (`…-R…`) or a test case
    /// (`…-T…`).
    pub fn list_test_executions(&self, key: &str) -> ApiResult<Records<'_, TestExecution>> {
        let key = RecordKey::parse(key)?;
        let filter = match key.kind() {
            Some(KeyKind::TestCycle) => "testCycle",
            Some(KeyKind::TestCase) => "testCase",
            _ => {
                return Err(ApiError::invalid(format!(
                    "'{}' is not a test cycle or test case key",
                    key
                )))
            }
        };
        Ok(self.records("testexecutions", vec![(filter, key.to_string())]))
    }
}

/// Keeps the most recent execution of each test case.
///
/// Recency is the actual end date, with the execution id breaking ties and
/// standing in for executions that never ended. Test cases keep the order in
/// which they first appear.
pub fn latest_per_test_case(executions: Vec<TestExecution>) -> Vec<TestExecution> {
    let mut order: Vec<String> = Vec::new();
    let mut latest: HashMap<String, TestExecution> = HashMap::new();

    for execution in executions {
        match latest.get(&execution.test_case_key) {
            None => {
                order.push(execution.test_case_key.clone());
                latest.insert(execution.test_case_key.clone(), execution);
            }
            Some(current) => {
                let newer = (execution.actual_end_date, execution.id)
                    > (current.actual_end_date, current.id);
                if newer {
                    latest.insert(execution.test_case_key.clone(), execution);
                }
            }
        }
    }

    order
        .into_iter()
        .filter_map(|key| latest.remove(&key))
        .collect()
}

#[cfg(test)]
mod tests {
    use super::*;
    use chrono::{TimeZone, Utc};

    fn execution(id: u64, case: &str, day: Option<u32>) -> TestExecution {
        TestExecution {
            id,
            key: format!("BLOCK-E{}", id),
            project_id: 1,
            test_case_key: case.to_string(),
            test_case_version: Some(1),
            test_cycle_id: None,
            status_id: None,
            status_name: None,
            executed_by: None,
            assigned_to: None,
            actual_end_date: day.map(|d| Utc.with_ymd_and_hms(2024, 5, d, 0, 0, 0).unwrap()),
            execution_time_ms: None,
            comment: None,
            automated: false,
            custom_fields: Default::default(),
        }
    }

    #[test]
    fn test_latest_per_test_case() {
        let executions = vec![
            execution(1, "BLOCK-T2", Some(3)),
            execution(2, "BLOCK-T1", Some(1)),
            execution(3, "BLOCK-T2", Some(1)),
            execution(4, "BLOCK-T1", Some(2)),
            execution(5, "BLOCK-T3", None),
            execution(6, "BLOCK-T3", None),
        ];
        let latest: Vec<u64> = latest_per_test_case(executions).iter().map(|e| e.id).collect();
        assert_eq!(latest, vec![1, 4, 6]);
    }

    #[test]
    fn test_ended_beats_never_ended() {
        let executions = vec![execution(9, "BLOCK-T1", None), execution(2, "BLOCK-T1", Some(1))];
        let latest = latest_per_test_case(executions);
        assert_eq!(latest.len(), 1);
        assert_eq!(latest[0].id, 2);
    }
}
