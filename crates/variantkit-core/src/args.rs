//! Parsers for command-line shorthands of variant fields.
//!
//! - `KEY=VALUE` for one expansion (VALUE is JSON when it parses as JSON)
//! - `NAME=task1,task2` for one display task definition

use crate::domain::error::{Result, VariantError};
use crate::domain::task_spec::DisplayTaskDefinition;

/// Parse `KEY=VALUE` into an expansion entry.
///
/// `VALUE` is read as JSON when possible (`4`, `true`, `{"a":1}`), otherwise
/// it is kept as a plain string. An empty value is the empty string.
pub fn parse_expansion_arg(arg: &str) -> Result<(String, serde_json::Value)> {
    let (key, raw) = arg.split_once('=').ok_or_else(|| {
        VariantError::InvalidExpansion(format!("expected KEY=VALUE, got {:?}", arg))
    })?;
    let key = key.trim();
    if key.is_empty() {
        return Err(VariantError::InvalidExpansion(format!(
            "empty key in {:?}",
            arg
        )));
    }

    let value = serde_json::from_str(raw)
        .unwrap_or_else(|_| serde_json::Value::String(raw.to_string()));
    Ok((key.to_string(), value))
}

/// Parse `NAME=task1,task2` into a display task definition.
///
/// Blank component names are dropped; `NAME=` yields no components.
pub fn parse_display_task_arg(arg: &str) -> Result<DisplayTaskDefinition> {
    let (name, components) = arg.split_once('=').ok_or_else(|| {
        VariantError::InvalidDisplayTask(format!("expected NAME=task1,task2, got {:?}", arg))
    })?;
    let name = name.trim();
    if name.is_empty() {
        return Err(VariantError::InvalidDisplayTask(format!(
            "empty name in {:?}",
            arg
        )));
    }

    let components = components
        .split(',')
        .map(str::trim)
        .filter(|component| !component.is_empty());
    Ok(DisplayTaskDefinition::new(name, components))
}
