//
//  planning-tool
//  model/mod.rs
//
//  Created by Ngonidzashe Mangudya on 2026/01/12.
//  Copyright (c) 2025 IAMNGONI. All rights reserved.
//

//! # Domain Model
//!
//! Vendor-neutral records the façade hands out: test cycles, test cases,
//! executions, steps and statuses, plus the key and custom-field value types
//! they are built from.

mod custom_field;
mod key;
mod records;

pub use custom_field::CustomFieldValue;
pub use key::{KeyKind, RecordKey};
pub use records::*;

/// Display name used when an id could not be resolved to a name.
pub const UNKNOWN: &str = "unknown";
