//
//  planning-tool
//  model/key.rs
//
//  Created by Ngonidzashe Mangudya on 2026/01/12.
//  Copyright (c) 2025 IAMNGONI. All rights reserved.
//

//! Human-readable record keys.
//!
//! Zephyr Scale keys look like `{PROJECT}-{LETTER}{NUMBER}`, where the letter
//! tells the record type apart:
//!
//! | Letter | Record |
//! |--------|--------|
//! | `R` | Test cycle (`BLOCK-R21`) |
//! | `T` | Test case (`BLOCK-T21`) |
//! | `E` | Test execution (`BLOCK-E1024`) |
//! | `P` | Test plan (`BLOCK-P3`) |
//!
//! Most endpoints also accept the numeric id in place of the key.

use std::fmt;
use std::str::FromStr;

use once_cell::sync::Lazy;
use regex::Regex;

use crate::api::common::{ApiError, ApiResult};

/// Matches `PROJECT-<letter><number>`.
///
/// # Capture Groups
/// 1. Project key (e.g., "BLOCK")
/// 2. Kind letter (`R`, `T`, `E` or `P`)
/// 3. Sequence number (e.g., "21")
static KEY_PATTERN: Lazy<Regex> =
    Lazy::new(|| Regex::new(r"^([A-Z][A-Z0-9_]*)-([RTEP])(\d+)$").unwrap());

/// The record type encoded in a key.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum KeyKind {
    TestCycle,
    TestCase,
    TestExecution,
    TestPlan,
}

impl KeyKind {
    fn from_letter(letter: &str) -> Option<Self> {
        match letter {
            "R" => Some(Self::TestCycle),
            "T" => Some(Self::TestCase),
            "E" => Some(Self::TestExecution),
            "P" => Some(Self::TestPlan),
            _ => None,
        }
    }

    pub fn letter(&self) -> char {
        match self {
            Self::TestCycle => 'R',
            Self::TestCase => 'T',
            Self::TestExecution => 'E',
            Self::TestPlan => 'P',
        }
    }

    pub fn describe(&self) -> &'static str {
        match self {
            Self::TestCycle => "test cycle",
            Self::TestCase => "test case",
            Self::TestExecution => "test execution",
            Self::TestPlan => "test plan",
        }
    }
}

/// A parsed record key or numeric id.
///
/// # Example
///
/// ```rust
/// use planning_tool::model::{KeyKind, RecordKey};
///
/// let key: RecordKey = "BLOCK-R21".parse().unwrap();
/// assert_eq!(key.kind(), Some(KeyKind::TestCycle));
/// assert_eq!(key.to_string(), "BLOCK-R21");
///
/// let id: RecordKey = "22355742".parse().unwrap();
/// assert_eq!(id.kind(), None);
/// ```
#[derive(Debug, Clone, PartialEq, Eq, Hash)]
pub enum RecordKey {
    Key {
        project: String,
        kind: KeyKind,
        number: u64,
    },
    Id(u64),
}

impl RecordKey {
    /// Parses a key, rejecting anything that is neither a key nor a numeric id.
    pub fn parse(input: &str) -> ApiResult<Self> {
        let input = input.trim();
        if input.is_empty() {
            return Err(ApiError::invalid("record key must not be empty"));
        }

        if let Ok(id) = input.parse::<u64>() {
            return Ok(Self::Id(id));
        }

        let caps = KEY_PATTERN.captures(input).ok_or_else(|| {
            ApiError::invalid(format!(
                "malformed key '{}': expected PROJECT-<R|T|E|P><number> or a numeric id",
                input
            ))
        })?;

        let kind = KeyKind::from_letter(&caps[2])
            .ok_or_else(|| ApiError::invalid(format!("unknown key kind in '{}'", input)))?;
        let number = caps[3]
            .parse()
            .map_err(|_| ApiError::invalid(format!("key number out of range in '{}'", input)))?;

        Ok(Self::Key {
            project: caps[1].to_string(),
            kind,
            number,
        })
    }

    /// Parses a key and checks it names a record of `kind`.
    ///
    /// Numeric ids carry no kind and are accepted as is.
    pub fn parse_as(input: &str, kind: KeyKind) -> ApiResult<Self> {
        let key = Self::parse(input)?;
        match key.kind() {
            Some(actual) if actual != kind => Err(ApiError::invalid(format!(
                "'{}' is a {} key, expected a {} key",
                key,
                actual.describe(),
                kind.describe()
            ))),
            _ => Ok(key),
        }
    }

    pub fn kind(&self) -> Option<KeyKind> {
        match self {
            Self::Key { kind, .. } => Some(*kind),
            Self::Id(_) => None,
        }
    }
}

impl FromStr for RecordKey {
    type Err = ApiError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        Self::parse(s)
    }
}

impl fmt::Display for RecordKey {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Key {
                project,
                kind,
                number,
            } => write!(f, "{}-{}{}", project, kind.letter(), number),
            Self::Id(id) => write!(f, "{}", id),
        }
    }
}
