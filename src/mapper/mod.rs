//
//  planning-tool
//  mapper/mod.rs
//
//  Created by Ngonidzashe Mangudya on 2026/01/12.
//  Copyright (c) 2025 IAMNGONI. All rights reserved.
//

//! # Domain Mapper
//!
//! Converts raw Zephyr Scale payloads into [`crate::model`] records and back.
//!
//! ## Name resolution
//!
//! Vendor payloads only carry ids for statuses, folders and projects. The
//! [`Mapper`] resolves them with auxiliary `GET` calls and remembers every
//! id it has resolved, so a list of a hundred test cases sharing three
//! statuses costs three status lookups. A `Mapper` lives for one façade call
//! and is then dropped, so nothing is cached across calls.
//!
//! A 404 on a status or folder lookup does not fail the mapping: the name is
//! set to [`UNKNOWN`] and a warning is logged. Every other lookup failure
//! propagates.
//!
//! ## Writing back
//!
//! [`apply_cycle_updates`] overlays the updatable fields of a [`TestCycle`]
//! onto a freshly fetched raw payload. The vendor requires full bodies on
//! `PUT`, and overlaying keeps fields this crate does not model intact.

use std::collections::HashMap;

use chrono::{DateTime, SecondsFormat, Utc};
use serde_json::{Map, Value};
use tracing::warn;

use crate::api::client::{Host, HttpTransport};
use crate::api::common::{ApiError, ApiResult, ErrorKind};
use crate::api::zephyr::{
    parse_test_case_url, RawFolder, RawProject, RawStatus, RawTestCase, RawTestCycle,
    RawTestExecution, RawTestStep,
};
use crate::model::{
    CustomFieldValue, CustomFields, CycleLinks, Status, TestCase, TestCycle, TestExecution,
    TestPlanLink, TestStep, UNKNOWN,
};

/// Maps raw payloads to records, resolving ids through `transport`.
///
/// # Example
///
/// ```rust,no_run
/// use planning_tool::api::zephyr::RawTestCycle;
/// use planning_tool::api::{Host, HttpTransport};
/// use planning_tool::mapper::Mapper;
///
/// # async fn example(transport: &HttpTransport) -> planning_tool::api::ApiResult<()> {
/// let raw: RawTestCycle = transport.get(Host::TestManagement, "testcycles/BLOCK-R21", &[]).await?;
/// let cycle = Mapper::new(transport).to_test_cycle(raw).await?;
/// println!("{} is {}", cycle.key, cycle.status_name.unwrap_or_default());
/// # Ok(())
/// # }
/// ```
pub struct Mapper<'a> {
    transport: &'a HttpTransport,
    statuses: HashMap<u64, String>,
    folders: HashMap<u64, String>,
    projects: HashMap<u64, String>,
}

impl<'a> Mapper<'a> {
    pub fn new(transport: &'a HttpTransport) -> Self {
        Self {
            transport,
            statuses: HashMap::new(),
            folders: HashMap::new(),
            projects: HashMap::new(),
        }
    }

    /// Status id to name. A 404 yields [`UNKNOWN`].
    pub async fn status_name(&mut self, id: u64) -> ApiResult<String> {
        if let Some(name) = self.statuses.get(&id) {
            return Ok(name.clone());
        }

        let name = match self.get_status(id).await {
            Ok(status) => status.name,
            Err(e) if e.kind() == ErrorKind::NotFound => {
                warn!(status_id = id, "Status not found, using '{}'", UNKNOWN);
                UNKNOWN.to_string()
            }
            Err(e) => return Err(e.during(format!("resolve status {}", id))),
        };

        self.statuses.insert(id, name.clone());
        Ok(name)
    }

    /// Folder id to name. A 404 yields [`UNKNOWN`].
    pub async fn folder_name(&mut self, id: u64) -> ApiResult<String> {
        if let Some(name) = self.folders.get(&id) {
            return Ok(name.clone());
        }

        let path = format!("folders/{}", id);
        let name = match self
            .transport
            .get::<RawFolder>(Host::TestManagement, &path, &[])
            .await
        {
            Ok(folder) => folder.name,
            Err(e) if e.kind() == ErrorKind::NotFound => {
                warn!(folder_id = id, "Folder not found, using '{}'", UNKNOWN);
                UNKNOWN.to_string()
            }
            Err(e) => return Err(e.during(format!("resolve folder {}", id))),
        };

        self.folders.insert(id, name.clone());
        Ok(name)
    }

    /// Project id to project key. Unlike display names, a missing project is
    /// an error: the key is needed to write records.
    pub async fn project_key(&mut self, id: u64) -> ApiResult<String> {
        if let Some(key) = self.projects.get(&id) {
            return Ok(key.clone());
        }

        let path = format!("projects/{}", id);
        let project: RawProject = self
            .transport
            .get(Host::TestManagement, &path, &[])
            .await
            .map_err(|e| e.during(format!("resolve project {}", id)))?;

        self.projects.insert(id, project.key.clone());
        Ok(project.key)
    }

    async fn get_status(&self, id: u64) -> ApiResult<RawStatus> {
        let path = format!("statuses/{}", id);
        self.transport.get(Host::TestManagement, &path, &[]).await
    }

    async fn optional_status(&mut self, status: Option<u64>) -> ApiResult<Option<String>> {
        match status {
            Some(id) => Ok(Some(self.status_name(id).await?)),
            None => Ok(None),
        }
    }

    pub async fn to_test_cycle(&mut self, raw: RawTestCycle) -> ApiResult<TestCycle> {
        let status_name = self.optional_status(raw.status.as_ref().map(|s| s.id)).await?;
        cycle_from_raw(raw, status_name)
    }

    pub async fn to_test_case(&mut self, raw: RawTestCase) -> ApiResult<TestCase> {
        let status_name = self.optional_status(raw.status.as_ref().map(|s| s.id)).await?;
        let folder_name = match raw.folder.as_ref().map(|f| f.id) {
            Some(id) => Some(self.folder_name(id).await?),
            None => None,
        };
        Ok(case_from_raw(raw, status_name, folder_name))
    }

    pub async fn to_test_execution(&mut self, raw: RawTestExecution) -> ApiResult<TestExecution> {
        let status_name = self
            .optional_status(raw.test_execution_status.as_ref().map(|s| s.id))
            .await?;
        execution_from_raw(raw, status_name)
    }

    pub async fn to_test_step(&mut self, raw: RawTestStep) -> ApiResult<TestStep> {
        let status_id = raw
            .inline
            .as_ref()
            .and_then(|inline| inline.status.as_ref())
            .map(|s| s.id);
        let status_name = self.optional_status(status_id).await?;
        step_from_raw(raw, status_name)
    }
}

/// Builds a [`TestCycle`] from its payload and an already-resolved status name.
pub fn cycle_from_raw(raw: RawTestCycle, status_name: Option<String>) -> ApiResult<TestCycle> {
    let planned_start = parse_datetime("plannedStartDate", raw.planned_start_date.as_deref())?;
    let planned_end = parse_datetime("plannedEndDate", raw.planned_end_date.as_deref())?;

    let test_plans = raw
        .links
        .map(|links| links.test_plans)
        .unwrap_or_default()
        .into_iter()
        .map(|link| TestPlanLink {
            id: link.id,
            test_plan_id: link.test_plan_id,
            link_type: link.link_type,
        })
        .collect();

    Ok(TestCycle {
        id: raw.id,
        key: raw.key,
        name: raw.name,
        project_id: raw.project.id,
        status_id: raw.status.map(|s| s.id),
        status_name,
        folder_id: raw.folder.map(|f| f.id),
        description: raw.description,
        planned_start,
        planned_end,
        owner_account_id: raw.owner.map(|o| o.account_id),
        custom_fields: custom_fields_from(raw.custom_fields),
        links: CycleLinks { test_plans },
    })
}

pub fn case_from_raw(
    raw: RawTestCase,
    status_name: Option<String>,
    folder_name: Option<String>,
) -> TestCase {
    TestCase {
        id: raw.id,
        key: raw.key,
        name: raw.name,
        project_id: raw.project.id,
        folder_id: raw.folder.map(|f| f.id),
        folder_name,
        status_id: raw.status.map(|s| s.id),
        status_name,
        objective: raw.objective,
        labels: raw.labels,
        owner_account_id: raw.owner.map(|o| o.account_id),
        custom_fields: custom_fields_from(raw.custom_fields),
    }
}

pub fn execution_from_raw(
    raw: RawTestExecution,
    status_name: Option<String>,
) -> ApiResult<TestExecution> {
    let url = raw.test_case.self_url.as_deref().unwrap_or_default();
    let (test_case_key, test_case_version) = parse_test_case_url(url).ok_or_else(|| {
        ApiError::invalid(format!(
            "test execution {} has no test case reference (got '{}')",
            raw.key, url
        ))
    })?;

    Ok(TestExecution {
        id: raw.id,
        key: raw.key,
        project_id: raw.project.id,
        test_case_key,
        test_case_version,
        test_cycle_id: raw.test_cycle.and_then(|c| c.id),
        status_id: raw.test_execution_status.map(|s| s.id),
        status_name,
        executed_by: raw.executed_by_id,
        assigned_to: raw.assigned_to_id,
        actual_end_date: parse_datetime("actualEndDate", raw.actual_end_date.as_deref())?,
        execution_time_ms: raw.execution_time,
        comment: raw.comment,
        automated: raw.automated,
        custom_fields: custom_fields_from(raw.custom_fields),
    })
}

pub fn step_from_raw(raw: RawTestStep, status_name: Option<String>) -> ApiResult<TestStep> {
    match (raw.inline, raw.test_case) {
        (Some(inline), _) => Ok(TestStep::Inline {
            description: inline.description,
            test_data: inline.test_data,
            expected_result: inline.expected_result,
            actual_result: inline.actual_result,
            status_name,
        }),
        (None, Some(call)) => Ok(TestStep::Call {
            test_case_key: call.test_case_key,
        }),
        (None, None) => Err(ApiError::invalid(
            "test step is neither inline nor a call to a test case",
        )),
    }
}

pub fn status_from_raw(raw: RawStatus) -> Status {
    Status {
        id: raw.id,
        name: raw.name,
        project_id: raw.project.map(|p| p.id),
        description: raw.description,
        color: raw.color,
        archived: raw.archived,
        default: raw.default,
    }
}

/// Absent custom fields map to an empty set.
pub fn custom_fields_from(fields: Option<Map<String, Value>>) -> CustomFields {
    fields
        .unwrap_or_default()
        .into_iter()
        .map(|(name, value)| (name, CustomFieldValue::from_json(value)))
        .collect()
}

pub fn custom_fields_to_json(fields: &CustomFields) -> Value {
    Value::Object(
        fields
            .iter()
            .map(|(name, value)| (name.clone(), value.to_json()))
            .collect(),
    )
}

fn parse_datetime(field: &str, value: Option<&str>) -> ApiResult<Option<DateTime<Utc>>> {
    match value {
        None => Ok(None),
        Some(s) => DateTime::parse_from_rfc3339(s)
            .map(|dt| Some(dt.with_timezone(&Utc)))
            .map_err(|e| {
                ApiError::invalid(format!("{} '{}' is not an RFC 3339 date: {}", field, s, e))
            }),
    }
}

/// Formats a date the way Zephyr Scale returns it (`2024-05-01T00:00:00Z`).
pub fn format_datetime(value: &DateTime<Utc>) -> String {
    value.to_rfc3339_opts(SecondsFormat::Secs, true)
}

fn optional(value: Option<Value>) -> Value {
    value.unwrap_or(Value::Null)
}

/// Overlays the updatable fields of `cycle` onto a raw cycle payload.
///
/// Updatable: name, description, planned start/end, status, owner and custom
/// fields. Identity fields (id, key, project) and links are left untouched.
pub fn apply_cycle_updates(raw: &mut Value, cycle: &TestCycle) -> ApiResult<()> {
    let object = raw
        .as_object_mut()
        .ok_or_else(|| ApiError::invalid("test cycle payload is not a JSON object"))?;

    object.insert("name".into(), Value::String(cycle.name.clone()));
    object.insert(
        "description".into(),
        optional(cycle.description.clone().map(Value::String)),
    );
    object.insert(
        "plannedStartDate".into(),
        optional(cycle.planned_start.as_ref().map(|d| Value::String(format_datetime(d)))),
    );
    object.insert(
        "plannedEndDate".into(),
        optional(cycle.planned_end.as_ref().map(|d| Value::String(format_datetime(d)))),
    );
    object.insert(
        "status".into(),
        optional(cycle.status_id.map(|id| serde_json::json!({ "id": id }))),
    );
    object.insert(
        "owner".into(),
        optional(
            cycle
                .owner_account_id
                .as_ref()
                .map(|account| serde_json::json!({ "accountId": account })),
        ),
    );
    object.insert("customFields".into(), custom_fields_to_json(&cycle.custom_fields));

    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    fn raw_cycle() -> Value {
        json!({
            "id": 22355742,
            "key": "BLOCK-R21",
            "name": "2024-05-01 night",
            "project": {"id": 10, "self": "https://example/projects/10"},
            "status": {"id": 6360088, "self": "https://example/statuses/6360088"},
            "plannedStartDate": "2024-05-01T22:00:00Z",
            "plannedEndDate": "2024-05-02T10:00:00Z",
            "owner": {"accountId": "abc123"},
            "customFields": {"Night Planner": "Bruno Quint", "Clear": true, "Seeing": 0.7},
            "links": {"testPlans": [{"id": 1, "testPlanId": 644365, "type": "RELATED"}]},
            "jiraProjectVersion": null,
            "extra": {"kept": true}
        })
    }

    #[test]
    fn test_cycle_from_raw() {
        let raw: RawTestCycle = serde_json::from_value(raw_cycle()).unwrap();
        let cycle = cycle_from_raw(raw, Some("In Progress".into())).unwrap();

        assert_eq!(cycle.id, 22355742);
        assert_eq!(cycle.status_id, Some(6360088));
        assert_eq!(cycle.status_name.as_deref(), Some("In Progress"));
        assert_eq!(cycle.links.test_plans.len(), 1);
        assert_eq!(cycle.links.test_plans[0].test_plan_id, 644365);
        assert_eq!(
            cycle.custom_fields.get("Night Planner"),
            Some(&CustomFieldValue::from("Bruno Quint"))
        );
        assert_eq!(cycle.custom_fields.get("Clear"), Some(&CustomFieldValue::Bool(true)));
        assert_eq!(format_datetime(&cycle.planned_start.unwrap()), "2024-05-01T22:00:00Z");
    }

    #[test]
    fn test_cycle_without_optional_blocks() {
        let raw: RawTestCycle = serde_json::from_value(json!({
            "id": 1, "key": "BLOCK-R1", "name": "n", "project": {"id": 2}
        }))
        .unwrap();
        let cycle = cycle_from_raw(raw, None).unwrap();
        assert!(cycle.custom_fields.is_empty());
        assert!(cycle.links.test_plans.is_empty());
        assert_eq!(cycle.status_name, None);
    }

    #[test]
    fn test_bad_date_is_validation_error() {
        let raw: RawTestCycle = serde_json::from_value(json!({
            "id": 1, "key": "BLOCK-R1", "name": "n", "project": {"id": 2},
            "plannedStartDate": "yesterday"
        }))
        .unwrap();
        let err = cycle_from_raw(raw, None).unwrap_err();
        assert_eq!(err.kind(), ErrorKind::Validation);
        assert!(err.to_string().contains("plannedStartDate"));
    }

    #[test]
    fn test_apply_updates_round_trip() {
        let mut payload = raw_cycle();
        let raw: RawTestCycle = serde_json::from_value(payload.clone()).unwrap();
        let mut cycle = cycle_from_raw(raw, None).unwrap();

        cycle.name = "renamed".into();
        cycle.description = Some("<p>clouds</p>".into());
        cycle.planned_end = None;
        cycle.status_id = Some(42);
        cycle
            .custom_fields
            .insert("Night Planner".into(), CustomFieldValue::from("Someone Else"));

        apply_cycle_updates(&mut payload, &cycle).unwrap();

        assert_eq!(payload["extra"], json!({"kept": true}));
        assert_eq!(payload["links"]["testPlans"][0]["testPlanId"], 644365);

        let reread: RawTestCycle = serde_json::from_value(payload).unwrap();
        let updated = cycle_from_raw(reread, None).unwrap();
        assert_eq!(updated.name, "renamed");
        assert_eq!(updated.description.as_deref(), Some("<p>clouds</p>"));
        assert_eq!(updated.planned_start, cycle.planned_start);
        assert_eq!(updated.planned_end, None);
        assert_eq!(updated.status_id, Some(42));
        assert_eq!(updated.custom_fields, cycle.custom_fields);
    }

    #[test]
    fn test_apply_updates_rejects_non_object() {
        let cycle = TestCycle::draft(1, "n");
        let mut payload = json!([1, 2]);
        assert!(apply_cycle_updates(&mut payload, &cycle).is_err());
    }

    #[test]
    fn test_execution_from_raw_extracts_case() {
        let raw: RawTestExecution = serde_json::from_value(json!({
            "id": 5, "key": "BLOCK-E5", "project": {"id": 10},
            "testCase": {"id": 9, "self": "https://api.zephyrscale.smartbear.com/v2/testcases/BLOCK-T21/versions/1"},
            "testCycle": {"id": 22355742, "self": "https://api.zephyrscale.smartbear.com/v2/testcycles/22355742"},
            "testExecutionStatus": {"id": 77},
            "actualEndDate": "2024-05-02T03:04:05Z",
            "executionTime": 1200
        }))
        .unwrap();
        let execution = execution_from_raw(raw, Some("Pass".into())).unwrap();
        assert_eq!(execution.test_case_key, "BLOCK-T21");
        assert_eq!(execution.test_case_version, Some(1));
        assert_eq!(execution.test_cycle_id, Some(22355742));
        assert_eq!(execution.execution_time_ms, Some(1200));
    }

    #[test]
    fn test_step_from_raw_variants() {
        let inline: RawTestStep = serde_json::from_value(json!({
            "inline": {"description": "Open dome", "expectedResult": "Dome open"}
        }))
        .unwrap();
        match step_from_raw(inline, None).unwrap() {
            TestStep::Inline { description, .. } => {
                assert_eq!(description.as_deref(), Some("Open dome"))
            }
            other => panic!("unexpected step {:?}", other),
        }

        let call: RawTestStep =
            serde_json::from_value(json!({"testCase": {"testCaseKey": "BLOCK-T2"}})).unwrap();
        assert_eq!(
            step_from_raw(call, None).unwrap(),
            TestStep::Call { test_case_key: "BLOCK-T2".into() }
        );

        let empty: RawTestStep = serde_json::from_value(json!({})).unwrap();
        assert!(step_from_raw(empty, None).is_err());
    }
}
