//! Full-replacement validation — the strict contract behind device PUT.
//!
//! Unlike a partial patch, a replacement must describe the device
//! completely: the supplied field set has to equal the kind's expected set
//! exactly, and every value has to be well-typed, before anything is
//! mutated. On success the caller hands the same map to the update engine.

use std::collections::BTreeSet;

use crate::device::{Device, DeviceState, Tv};
use crate::error::{HestiaError, ReplacementError, UpdateError};
use crate::fields::{self, FieldMap};

/// Check that `body` is a complete, well-typed representation of `device`.
///
/// The caller is expected to have stripped (and verified) any `id`/`kind`
/// fields already.
///
/// # Errors
///
/// Returns [`ReplacementError::FieldSetMismatch`] when the field set is not
/// exactly the kind's expected set, [`UpdateError::InvalidFieldValue`] on
/// the first badly-typed field, and
/// [`UpdateError::MutuallyExclusiveFields`] when a TV payload carries both
/// a non-empty app and channel.
pub fn validate(device: &Device, body: &FieldMap) -> Result<(), HestiaError> {
    check_field_set(device.state.expected_fields(), body)?;
    check_types(&device.state, body)?;
    Ok(())
}

fn check_field_set(
    expected: &'static [&'static str],
    body: &FieldMap,
) -> Result<(), ReplacementError> {
    let expected: BTreeSet<&str> = expected.iter().copied().collect();
    let supplied: BTreeSet<&str> = body.keys().map(String::as_str).collect();

    if expected == supplied {
        return Ok(());
    }

    let missing = expected
        .difference(&supplied)
        .map(ToString::to_string)
        .collect();
    let extra = supplied
        .difference(&expected)
        .map(ToString::to_string)
        .collect();
    Err(ReplacementError::FieldSetMismatch { missing, extra })
}

fn check_types(state: &DeviceState, body: &FieldMap) -> Result<(), UpdateError> {
    require_bool(body, "powered_on")?;

    match state {
        DeviceState::Lamp(_) => {
            require_i64(body, "intensity")?;
            require_non_empty(body, "color")?;
        }
        DeviceState::AirConditioner(_) => {
            require_i64(body, "temperature")?;
            require_i64(body, "fan_speed")?;
            require_bool(body, "auto_clean")?;
            require_bool(body, "quiet_mode")?;
        }
        DeviceState::Tv(_) => {
            // asserted again at this stricter layer, empty values allowed
            Tv::check_exclusive(body)?;
            require_i64(body, "volume")?;
        }
    }
    Ok(())
}

fn require_i64(body: &FieldMap, field: &'static str) -> Result<(), UpdateError> {
    if let Some(value) = body.get(field) {
        fields::parse_i64(field, value)?;
    }
    Ok(())
}

fn require_bool(body: &FieldMap, field: &'static str) -> Result<(), UpdateError> {
    if let Some(value) = body.get(field) {
        fields::parse_bool(field, value)?;
    }
    Ok(())
}

fn require_non_empty(body: &FieldMap, field: &'static str) -> Result<(), UpdateError> {
    if let Some(value) = body.get(field) {
        fields::non_empty_str(value).ok_or_else(|| fields::invalid(field, value))?;
    }
    Ok(())
}
