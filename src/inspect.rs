//! Canonical string forms of values for display and similarity checks.

use serde::Serialize;
use serde_json::Value;

use crate::calls::record_call;

/// Renders `value` for reports.
///
/// Strings come back unchanged; everything else is serialized to compact
/// JSON, so `true`, `null`, and numbers render as their literals and
/// structured values get a deterministic form with object keys sorted.
pub fn inspect<T: Serialize + ?Sized>(value: &T) -> String {
    record_call("inspect");
    match serde_json::to_value(value) {
        Ok(Value::String(text)) => text,
        Ok(other) => other.to_string(),
        Err(err) => format!("<uninspectable: {}>", err),
    }
}
