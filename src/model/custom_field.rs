//
//  planning-tool
//  model/custom_field.rs
//
//  Created by Ngonidzashe Mangudya on 2026/01/12.
//  Copyright (c) 2025 IAMNGONI. All rights reserved.
//

//! Custom field values.
//!
//! Zephyr Scale custom fields are configured per project and come back as
//! plain JSON values: checkboxes are booleans, numeric fields are numbers,
//! single-line and paragraph fields are strings, multi-choice fields are
//! arrays of option names. Anything else is kept as raw JSON so no value is
//! ever lost on the way back.

use std::fmt;

use serde::{Deserialize, Serialize};
use serde_json::Value;

/// A single custom field value.
///
/// # Example
///
/// ```rust
/// use planning_tool::model::CustomFieldValue;
/// use serde_json::json;
///
/// let planner = CustomFieldValue::from_json(json!("Bruno Quint"));
/// assert_eq!(planner, CustomFieldValue::Text("Bruno Quint".to_string()));
/// assert!(planner.is_compatible_with(&CustomFieldValue::Text("Someone".into())));
/// assert!(!planner.is_compatible_with(&CustomFieldValue::Bool(true)));
/// ```
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(untagged)]
pub enum CustomFieldValue {
    Bool(bool),
    Integer(i64),
    Number(f64),
    Text(String),
    Options(Vec<String>),
    Empty,
    Other(Value),
}

impl CustomFieldValue {
    pub fn from_json(value: Value) -> Self {
        match value {
            Value::Null => Self::Empty,
            Value::Bool(b) => Self::Bool(b),
            Value::Number(n) => match (n.as_i64(), n.as_f64()) {
                (Some(i), _) => Self::Integer(i),
                (None, Some(f)) => Self::Number(f),
                (None, None) => Self::Other(Value::Number(n)),
            },
            Value::String(s) => Self::Text(s),
            Value::Array(items) if items.iter().all(Value::is_string) => Self::Options(
                items
                    .into_iter()
                    .filter_map(|item| match item {
                        Value::String(s) => Some(s),
                        _ => None,
                    })
                    .collect(),
            ),
            other => Self::Other(other),
        }
    }

    pub fn to_json(&self) -> Value {
        match self {
            Self::Bool(b) => Value::Bool(*b),
            Self::Integer(i) => Value::from(*i),
            Self::Number(f) => Value::from(*f),
            Self::Text(s) => Value::String(s.clone()),
            Self::Options(items) => Value::from(items.clone()),
            Self::Empty => Value::Null,
            Self::Other(v) => v.clone(),
        }
    }

    /// Short name of the value's type, for error messages.
    pub fn type_name(&self) -> &'static str {
        match self {
            Self::Bool(_) => "boolean",
            Self::Integer(_) => "integer",
            Self::Number(_) => "number",
            Self::Text(_) => "text",
            Self::Options(_) => "options",
            Self::Empty => "empty",
            Self::Other(Value::Object(_)) => "object",
            Self::Other(_) => "json",
        }
    }

    /// Whether `self` may replace `existing` without changing the field's type.
    ///
    /// An empty value carries no type information, so it is compatible with
    /// anything in both directions. Integers and decimals are interchangeable.
    pub fn is_compatible_with(&self, existing: &CustomFieldValue) -> bool {
        use CustomFieldValue::*;

        match (self, existing) {
            (Empty, _) | (_, Empty) => true,
            (Bool(_), Bool(_)) | (Text(_), Text(_)) | (Options(_), Options(_)) => true,
            (Integer(_) | Number(_), Integer(_) | Number(_)) => true,
            (Other(a), Other(b)) => std::mem::discriminant(a) == std::mem::discriminant(b),
            _ => false,
        }
    }

    pub fn is_empty(&self) -> bool {
        matches!(self, Self::Empty)
    }
}

impl fmt::Display for CustomFieldValue {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Bool(b) => write!(f, "{}", b),
            Self::Integer(i) => write!(f, "{}", i),
            Self::Number(n) => write!(f, "{}", n),
            Self::Text(s) => write!(f, "{}", s),
            Self::Options(items) => write!(f, "{}", items.join(", ")),
            Self::Empty => Ok(()),
            Self::Other(v) => write!(f, "{}", v),
        }
    }
}

impl From<&str> for CustomFieldValue {
    fn from(s: &str) -> Self {
        Self::Text(s.to_string())
    }
}

impl From<String> for CustomFieldValue {
    fn from(s: String) -> Self {
        Self::Text(s)
    }
}

impl From<bool> for CustomFieldValue {
    fn from(b: bool) -> Self {
        Self::Bool(b)
    }
}

impl From<i64> for CustomFieldValue {
    fn from(i: i64) -> Self {
        Self::Integer(i)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    #[test]
    fn test_from_json_variants() {
        assert_eq!(CustomFieldValue::from_json(json!(true)), CustomFieldValue::Bool(true));
        assert_eq!(CustomFieldValue::from_json(json!(3)), CustomFieldValue::Integer(3));
        assert_eq!(CustomFieldValue::from_json(json!(2.5)), CustomFieldValue::Number(2.5));
        assert_eq!(CustomFieldValue::from_json(json!(null)), CustomFieldValue::Empty);
        assert_eq!(
            CustomFieldValue::from_json(json!(["a", "b"])),
            CustomFieldValue::Options(vec!["a".into(), "b".into()])
        );
        assert_eq!(
            CustomFieldValue::from_json(json!([1, "b"])),
            CustomFieldValue::Other(json!([1, "b"]))
        );
    }

    #[test]
    fn test_to_json_preserves_value() {
        for value in [
            json!("x"),
            json!(false),
            json!(7),
            json!(1.5),
            json!(["a"]),
            json!({"k": 1}),
            json!(null),
        ] {
            assert_eq!(CustomFieldValue::from_json(value.clone()).to_json(), value);
        }
    }

    #[test]
    fn test_serde_matches_from_json() {
        let parsed: CustomFieldValue = serde_json::from_value(json!(42)).unwrap();
        assert_eq!(parsed, CustomFieldValue::Integer(42));

        let parsed: CustomFieldValue = serde_json::from_value(json!(null)).unwrap();
        assert_eq!(parsed, CustomFieldValue::Empty);

        assert_eq!(serde_json::to_value(CustomFieldValue::Empty).unwrap(), json!(null));
    }

    #[test]
    fn test_compatibility() {
        let text = CustomFieldValue::from("a");
        assert!(text.is_compatible_with(&CustomFieldValue::from("b")));
        assert!(text.is_compatible_with(&CustomFieldValue::Empty));
        assert!(CustomFieldValue::Empty.is_compatible_with(&CustomFieldValue::Bool(true)));
        assert!(CustomFieldValue::Integer(1).is_compatible_with(&CustomFieldValue::Number(1.5)));
        assert!(!text.is_compatible_with(&CustomFieldValue::Integer(1)));
        assert!(
            !CustomFieldValue::Bool(true).is_compatible_with(&CustomFieldValue::Options(vec![]))
        );
    }

    #[test]
    fn test_display() {
        assert_eq!(CustomFieldValue::Options(vec!["a".into(), "b".into()]).to_string(), "a, b");
        assert_eq!(CustomFieldValue::Empty.to_string(), "");
        assert_eq!(CustomFieldValue::from("Bruno Quint").to_string(), "Bruno Quint");
    }
}
