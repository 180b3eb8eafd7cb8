//! Payload normalization
//!
//! Transforms applied to field values before any rule is evaluated. The
//! normalized value is also what handlers receive downstream.

use serde_json::Value;

/// Trim surrounding whitespace from a string value in place
///
/// Non-string values are left untouched. Applying it twice is the same as
/// applying it once.
pub fn trim(value: &mut Value) {
    if let Value::String(s) = value {
        let trimmed = s.trim();
        if trimmed.len() != s.len() {
            *s = trimmed.to_string();
        }
    }
}

/// Apply `filter` to `field` of an object payload, if the field exists
pub fn apply(payload: &mut Value, field: &str, filter: fn(&mut Value)) {
    if let Some(value) = payload.get_mut(field) {
        filter(value);
    }
}
