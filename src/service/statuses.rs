//
//  planning-tool
//  service/statuses.rs
//
//  Created by Ngonidzashe Mangudya on 2026/01/12.
//  Copyright (c) 2025 IAMNGONI. All rights reserved.
//

//! Status lookups.

use super::{Records, ZephyrClient};
use crate::api::client::Host;
use crate::api::common::ApiResult;
use crate::api::zephyr::RawStatus;
use crate::mapper::status_from_raw;
use crate::model::{Status, StatusType};

impl ZephyrClient {
    pub async fn get_status(&self, id: u64) -> ApiResult<Status> {
        let path = format!("statuses/{}", id);
        let raw: RawStatus = self.transport.get(Host::TestManagement, &path, &[]).await?;
        Ok(status_from_raw(raw))
    }

    /// Lazily lists statuses, optionally only those for one record type.
    pub fn list_statuses(&self, status_type: Option<StatusType>) -> Records<'_, Status> {
        let query = status_type
            .map(|t| vec![("statusType", t.as_str().to_string())])
            .unwrap_or_default();
        self.records("statuses", query)
    }
}
