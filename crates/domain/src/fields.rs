//! Raw field maps and the value coercion rules shared by every device kind.
//!
//! All update payloads cross the boundary as untyped name → value maps.
//! Integers and booleans may arrive either as native JSON values or as
//! strings; enum names are resolved case-insensitively by the device model.

use serde_json::Value;

use crate::error::UpdateError;

/// Untyped field-name → value mapping, as received at the boundary.
pub type FieldMap = serde_json::Map<String, Value>;

/// Parse an integer field. Accepts JSON numbers and numeric strings.
///
/// # Errors
///
/// Returns [`UpdateError::InvalidFieldValue`] when the value is neither.
pub fn parse_i64(field: &'static str, value: &Value) -> Result<i64, UpdateError> {
    match value {
        Value::Number(number) => number.as_i64().ok_or_else(|| invalid(field, value)),
        Value::String(text) => text.trim().parse().map_err(|_| invalid(field, value)),
        _ => Err(invalid(field, value)),
    }
}

/// Parse a boolean field. Accepts JSON booleans and the canonical
/// `"true"`/`"false"` strings, case-insensitively.
///
/// # Errors
///
/// Returns [`UpdateError::InvalidFieldValue`] for anything else.
pub fn parse_bool(field: &'static str, value: &Value) -> Result<bool, UpdateError> {
    match value {
        Value::Bool(flag) => Ok(*flag),
        Value::String(text) => match text.trim() {
            t if t.eq_ignore_ascii_case("true") => Ok(true),
            t if t.eq_ignore_ascii_case("false") => Ok(false),
            _ => Err(invalid(field, value)),
        },
        _ => Err(invalid(field, value)),
    }
}

/// The trimmed string content of `value`, or `None` when it is not a
/// non-blank string.
#[must_use]
pub fn non_empty_str(value: &Value) -> Option<&str> {
    match value {
        Value::String(text) => {
            let trimmed = text.trim();
            (!trimmed.is_empty()).then_some(trimmed)
        }
        _ => None,
    }
}

/// Build the [`UpdateError::InvalidFieldValue`] for a field/value pair.
pub(crate) fn invalid(field: &'static str, value: &Value) -> UpdateError {
    let value = match value {
        Value::String(text) => text.clone(),
        other => other.to_string(),
    };
    UpdateError::InvalidFieldValue { field, value }
}
