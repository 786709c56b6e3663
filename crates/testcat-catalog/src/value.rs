//! ---
//! tc_section: "02-catalog"
//! tc_subsection: "module"
//! tc_type: "source"
//! tc_scope: "code"
//! tc_description: "Helpers for reading loosely typed YAML fields."
//! tc_version: "v0.0.0-prealpha"
//! tc_owner: "tbd"
//! ---
use serde_yaml::{Mapping, Value};

use crate::error::SectionError;

/// Placeholder printed for optional fields that were not provided.
pub const ABSENT: &str = "(none)";

/// Text of a scalar node. Sequences, mappings and `null` yield `None`.
pub(crate) fn scalar_text(value: &Value) -> Option<String> {
    match value {
        Value::String(text) => Some(text.clone()),
        Value::Number(number) => Some(number.to_string()),
        Value::Bool(flag) => Some(flag.to_string()),
        Value::Tagged(tagged) => scalar_text(&tagged.value),
        Value::Null | Value::Sequence(_) | Value::Mapping(_) => None,
    }
}

/// Read a scalar field from a list entry. Missing and `null` both read as `None`.
pub(crate) fn text_field(
    record: &Mapping,
    section: &'static str,
    field: &'static str,
) -> Result<Option<String>, SectionError> {
    match record.get(field) {
        None | Some(Value::Null) => Ok(None),
        Some(value) => scalar_text(value)
            .map(Some)
            .ok_or(SectionError::NotAScalar { section, field }),
    }
}

/// Render any YAML node on a single line, flow style.
pub fn render_value(value: &Value) -> String {
    match value {
        Value::Null => "~".to_owned(),
        Value::Bool(flag) => flag.to_string(),
        Value::Number(number) => number.to_string(),
        Value::String(text) => text.clone(),
        Value::Sequence(items) => {
            let items: Vec<String> = items.iter().map(render_value).collect();
            format!("[{}]", items.join(", "))
        }
        Value::Mapping(map) => {
            let entries: Vec<String> = map
                .iter()
                .map(|(key, value)| format!("{}: {}", render_value(key), render_value(value)))
                .collect();
            format!("{{{}}}", entries.join(", "))
        }
        Value::Tagged(tagged) => format!("{} {}", tagged.tag, render_value(&tagged.value)),
    }
}

/// Render an optional node, substituting [`ABSENT`] when missing.
pub fn render_optional(value: Option<&Value>) -> String {
    value.map(render_value).unwrap_or_else(|| ABSENT.to_owned())
}
