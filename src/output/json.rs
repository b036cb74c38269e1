//
//  planning-tool
//  output/json.rs
//
//  Created by Ngonidzashe Mangudya on 2026/01/12.
//  Copyright (c) 2025 IAMNGONI. All rights reserved.
//

//! # JSON Output Formatting
//!
//! Serializes values to JSON with a configurable indent, so raw vendor
//! payloads can be printed the same way the dashboard tooling expects them.
//!
//! | Function | Description |
//! |----------|-------------|
//! | [`to_json_string`] | Pretty-printed with `indent` spaces, compact when `indent` is 0 |
//! | [`write_json_to`] | Same, to any writer |

use std::io::Write;

use serde::Serialize;
use serde_json::ser::{PrettyFormatter, Serializer};

/// Indent used by `-i` when not given.
pub const DEFAULT_INDENT: usize = 4;

pub fn to_json_string<T: Serialize + ?Sized>(value: &T, indent: usize) -> anyhow::Result<String> {
    let mut buffer = Vec::new();
    write_json_to(&mut buffer, value, indent)?;
    Ok(String::from_utf8(buffer)?)
}

pub fn write_json_to<W: Write, T: Serialize + ?Sized>(
    writer: &mut W,
    value: &T,
    indent: usize,
) -> anyhow::Result<()> {
    if indent == 0 {
        serde_json::to_writer(writer, value)?;
    } else {
        let spaces = " ".repeat(indent);
        let formatter = PrettyFormatter::with_indent(spaces.as_bytes());
        let mut serializer = Serializer::with_formatter(writer, formatter);
        value.serialize(&mut serializer)?;
    }
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    #[test]
    fn test_indent_width() {
        let value = json!({"key": "BLOCK-R21"});
        assert_eq!(to_json_string(&value, 2).unwrap(), "{\n  \"key\": \"BLOCK-R21\"\n}");
        assert_eq!(to_json_string(&value, 4).unwrap(), "{\n    \"key\": \"BLOCK-R21\"\n}");
    }

    #[test]
    fn test_zero_indent_is_compact() {
        let value = json!({"a": [1, 2]});
        assert_eq!(to_json_string(&value, 0).unwrap(), r#"{"a":[1,2]}"#);
    }
}
