//! Schema source formatting.
//!
//! Prepares a parsed schema source for literal embedding in the generated
//! artifact: documentation fields are recursively blanked and the
//! compacted serialization is wrapped to a fixed column width.

use serde_json::Value;

use crate::error::ParseError;

/// Column width used when wrapping the compacted schema source.
pub const WRAP_WIDTH: usize = 70;

/// Returns the compacted, documentation-stripped serialization of a
/// schema source, wrapped near [`WRAP_WIDTH`] columns and terminated by a
/// newline.
///
/// Line breaks are inserted only after commas that sit outside string
/// literals, so the wrapped text parses to the same schema.
///
/// # Errors
/// Returns `ParseError` if the stripped value cannot be serialized.
pub fn compact_source(source: &Value) -> Result<String, ParseError> {
    let mut stripped = source.clone();
    blank_docs(&mut stripped);
    let json = serde_json::to_string(&stripped)?;
    let mut output = wrap_compact(&json, WRAP_WIDTH);
    output.push('\n');
    Ok(output)
}

/// Recursively blanks every `doc` attribute in the value.
fn blank_docs(value: &mut Value) {
    match value {
        Value::Object(map) => {
            if let Some(doc) = map.get_mut("doc") {
                *doc = Value::String(String::new());
            }
            for nested in map.values_mut() {
                blank_docs(nested);
            }
        }
        Value::Array(items) => {
            for item in items.iter_mut() {
                blank_docs(item);
            }
        }
        _ => {}
    }
}

/// Wraps compact JSON by breaking after commas outside string literals
/// once a line reaches `width` characters.
fn wrap_compact(json: &str, width: usize) -> String {
    let mut output = String::with_capacity(json.len());
    let mut line_len = 0;
    let mut in_string = false;
    let mut escaped = false;

    for ch in json.chars() {
        output.push(ch);
        line_len += 1;
        if in_string {
            if escaped {
                escaped = false;
            } else if ch == '\\' {
                escaped = true;
            } else if ch == '"' {
                in_string = false;
            }
        } else if ch == '"' {
            in_string = true;
        } else if ch == ',' && line_len >= width {
            output.push('\n');
            line_len = 0;
        }
    }

    output
}
