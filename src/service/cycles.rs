//
//  planning-tool
//  service/cycles.rs
//
//  Created by Ngonidzashe Mangudya on 2026/01/12.
//  Copyright (c) 2025 IAMNGONI. All rights reserved.
//

//! Test cycle operations.

use serde_json::{Map, Value};
use tracing::info;

use super::{Records, ZephyrClient};
use crate::api::client::Host;
use crate::api::common::{ApiError, ApiResult};
use crate::api::zephyr::{CreateTestCycleRequest, CreatedResource, RawTestCycle};
use crate::mapper::{apply_cycle_updates, custom_fields_to_json, format_datetime, Mapper};
use crate::model::{CustomFieldValue, KeyKind, RecordKey, TestCycle, UNKNOWN};

fn cycle_path(key: &RecordKey) -> String {
    format!("testcycles/{}", key)
}

impl ZephyrClient {
    /// Fetches a test cycle exactly as the vendor returns it.
    pub async fn get_test_cycle_raw(&self, key: &str) -> ApiResult<Value> {
        let key = RecordKey::parse_as(key, KeyKind::TestCycle)?;
        self.transport
            .get(Host::TestManagement, &cycle_path(&key), &[])
            .await
    }

    /// Fetches a test cycle and resolves its status name.
    ///
    /// A 404 on the status lookup yields a cycle whose `status_name` is
    /// `"unknown"`; a 404 on the cycle itself is a `NotFound` error.
    pub async fn get_test_cycle(&self, key: &str) -> ApiResult<TestCycle> {
        let key = RecordKey::parse_as(key, KeyKind::TestCycle)?;
        let raw: RawTestCycle = self
            .transport
            .get(Host::TestManagement, &cycle_path(&key), &[])
            .await?;
        Mapper::new(&self.transport).to_test_cycle(raw).await
    }

    /// Creates a test cycle and returns its key.
    ///
    /// `cycle.project_id` is resolved to a project key first. `id`, `key`,
    /// `status_id` and `links` of the draft are ignored; the status is set by
    /// name when `status_name` is present.
    pub async fn create_test_cycle(&self, cycle: &TestCycle) -> ApiResult<String> {
        validate_cycle_fields(cycle)?;
        if cycle.project_id == 0 {
            return Err(ApiError::invalid("test cycle project id must be set"));
        }

        let mut mapper = Mapper::new(&self.transport);
        let project_key = mapper
            .project_key(cycle.project_id)
            .await
            .map_err(|e| e.during("create test cycle"))?;

        let custom_fields = match custom_fields_to_json(&cycle.custom_fields) {
            Value::Object(map) => map,
            _ => Map::new(),
        };

        let request = CreateTestCycleRequest {
            project_key,
            name: cycle.name.clone(),
            description: cycle.description.clone(),
            planned_start_date: cycle.planned_start.as_ref().map(format_datetime),
            planned_end_date: cycle.planned_end.as_ref().map(format_datetime),
            status_name: cycle.status_name.clone().filter(|name| name != UNKNOWN),
            folder_id: cycle.folder_id,
            owner_id: cycle.owner_account_id.clone(),
            custom_fields,
        };

        let created: CreatedResource = self
            .transport
            .post(Host::TestManagement, "testcycles", &request)
            .await
            .map_err(|e| e.during("create test cycle"))?;

        let key = created.key.unwrap_or_else(|| created.id.to_string());
        info!(key = %key, "Created test cycle");
        Ok(key)
    }

    /// Writes the updatable fields of `cycle` back to the vendor.
    ///
    /// The current payload is fetched first and the fields are overlaid on it,
    /// so anything not modelled by [`TestCycle`] is sent back unchanged.
    pub async fn update_test_cycle(&self, cycle: &TestCycle) -> ApiResult<()> {
        validate_cycle_fields(cycle)?;
        let key = RecordKey::parse_as(&cycle.key, KeyKind::TestCycle)?;
        let path = cycle_path(&key);

        let mut raw: Value = self
            .transport
            .get(Host::TestManagement, &path, &[])
            .await
            .map_err(|e| e.during(format!("fetch test cycle {}", key)))?;

        apply_cycle_updates(&mut raw, cycle)?;

        let _: Value = self
            .transport
            .put(Host::TestManagement, &path, &raw)
            .await
            .map_err(|e| e.during(format!("update test cycle {}", key)))?;

        info!(key = %key, "Updated test cycle");
        Ok(())
    }

    /// Sets one custom field of a test cycle.
    ///
    /// When the field already holds a value, the new value must have a
    /// compatible type; a mismatch fails before the update is sent.
    pub async fn update_test_cycle_custom_field(
        &self,
        key: &str,
        field: &str,
        value: CustomFieldValue,
    ) -> ApiResult<()> {
        let key = RecordKey::parse_as(key, KeyKind::TestCycle)?;
        let field = field.trim();
        if field.is_empty() {
            return Err(ApiError::invalid("custom field name must not be empty"));
        }
        let path = cycle_path(&key);

        let mut raw: Value = self
            .transport
            .get(Host::TestManagement, &path, &[])
            .await
            .map_err(|e| e.during(format!("fetch test cycle {}", key)))?;

        let fields = custom_fields_mut(&mut raw)?;
        if let Some(existing) = fields.get(field) {
            let existing = CustomFieldValue::from_json(existing.clone());
            if !value.is_compatible_with(&existing) {
                return Err(ApiError::invalid(format!(
                    "custom field '{}' holds a {} value, got a {} value",
                    field,
                    existing.type_name(),
                    value.type_name()
                ))
                .during("check custom field"));
            }
        }
        fields.insert(field.to_string(), value.to_json());

        let _: Value = self
            .transport
            .put(Host::TestManagement, &path, &raw)
            .await
            .map_err(|e| e.during(format!("update custom field on {}", key)))?;

        info!(key = %key, field, "Updated custom field");
        Ok(())
    }

    /// Uploads a file as an attachment of a test cycle.
    pub async fn attach_file_to_cycle(
        &self,
        key: &str,
        filename: &str,
        bytes: Vec<u8>,
    ) -> ApiResult<()> {
        let key = RecordKey::parse_as(key, KeyKind::TestCycle)?;
        if filename.trim().is_empty() {
            return Err(ApiError::invalid("attachment filename must not be empty"));
        }
        if bytes.is_empty() {
            return Err(ApiError::invalid(format!("attachment '{}' is empty", filename)));
        }

        let id = match key {
            RecordKey::Id(id) => id,
            RecordKey::Key { .. } => {
                let raw: RawTestCycle = self
                    .transport
                    .get(Host::TestManagement, &cycle_path(&key), &[])
                    .await
                    .map_err(|e| e.during(format!("resolve id of test cycle {}", key)))?;
                raw.id
            }
        };

        let path = format!("testcycles/{}/attachments", id);
        let size = bytes.len();
        let _: Value = self
            .transport
            .post_multipart(Host::TestManagement, &path, bytes, filename)
            .await
            .map_err(|e| e.during(format!("upload {} to test cycle {}", filename, key)))?;

        info!(key = %key, filename, size, "Attached file to test cycle");
        Ok(())
    }

    /// Lazily lists test cycles, optionally limited to one project.
    pub fn list_test_cycles(&self, project_key: Option<&str>) -> ApiResult<Records<'_, TestCycle>> {
        let mut query = Vec::new();
        if let Some(project) = project_key {
            let project = project.trim();
            if project.is_empty() {
                return Err(ApiError::invalid("project key must not be empty"));
            }
            query.push(("projectKey", project.to_string()));
        }
        Ok(self.records("testcycles", query))
    }
}

fn validate_cycle_fields(cycle: &TestCycle) -> ApiResult<()> {
    if cycle.name.trim().is_empty() {
        return Err(ApiError::invalid("test cycle name must not be empty"));
    }
    if let (Some(start), Some(end)) = (cycle.planned_start, cycle.planned_end) {
        if end < start {
            return Err(ApiError::invalid(format!(
                "planned end {} is before planned start {}",
                format_datetime(&end),
                format_datetime(&start)
            )));
        }
    }
    Ok(())
}

fn custom_fields_mut(raw: &mut Value) -> ApiResult<&mut Map<String, Value>> {
    let object = raw
        .as_object_mut()
        .ok_or_else(|| ApiError::invalid("test cycle payload is not a JSON object"))?;

    let fields = object
        .entry("customFields")
        .or_insert_with(|| Value::Object(Map::new()));
    if fields.is_null() {
        *fields = Value::Object(Map::new());
    }

    fields
        .as_object_mut()
        .ok_or_else(|| ApiError::invalid("customFields is not a JSON object"))
}
