//! Common error types used across the workspace.
//!
//! Every failure surfaced by the core maps to one of the variants below.
//! Each layer converts via `#[from]`; nothing is ever swallowed silently.

/// Top-level error for the hestia core.
#[derive(Debug, thiserror::Error)]
pub enum HestiaError {
    #[error(transparent)]
    NotFound(#[from] NotFoundError),

    #[error(transparent)]
    Update(#[from] UpdateError),

    #[error(transparent)]
    Replacement(#[from] ReplacementError),

    #[error(transparent)]
    Routine(#[from] RoutineError),
}

/// A device, room, or scenario id with no matching entity.
#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
#[error("{entity} {id} not found")]
pub struct NotFoundError {
    /// Which kind of entity was looked up (`"device"`, `"room"`, …).
    pub entity: &'static str,
    /// The identifier that failed to resolve.
    pub id: u64,
}

/// Failures raised while applying a partial update to a device.
#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
pub enum UpdateError {
    /// The value cannot be parsed as the field's semantic type, or an enum
    /// name matched no known value.
    #[error("invalid value '{value}' for field '{field}'")]
    InvalidFieldValue {
        field: &'static str,
        value: String,
    },

    /// A TV update supplied both an app and a channel in the same call.
    #[error("fields 'current_app' and 'current_channel' are mutually exclusive")]
    MutuallyExclusiveFields,

    /// The update supplied no fields, or none of them were recognized.
    #[error("update contains no recognized fields")]
    EmptyOrUnrecognized,
}

/// Failures raised while validating a full-replacement payload.
#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
pub enum ReplacementError {
    /// The supplied field set is not exactly the expected set.
    #[error("field set mismatch (missing: {missing:?}, extra: {extra:?})")]
    FieldSetMismatch {
        missing: Vec<String>,
        extra: Vec<String>,
    },

    /// The payload carried an `id` that differs from the target entity.
    #[error("field 'id' does not match the target id {expected}")]
    IdMismatch { expected: u64 },

    /// The payload carried a `kind` that differs from the target entity.
    #[error("field 'kind' does not match the existing kind '{expected}'")]
    KindMismatch { expected: &'static str },
}

/// Failures raised while applying a scenario routine.
#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
pub enum RoutineError {
    /// The scenario has no routine to apply.
    #[error("scenario routine is missing or empty")]
    MissingOrEmpty,

    /// The action at the given 1-based index is structurally invalid: no
    /// usable `device_id`, or no applicable update fields.
    #[error("invalid action at index {index}")]
    InvalidAction { index: usize },
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn should_render_not_found_with_entity_and_id() {
        let err = NotFoundError {
            entity: "device",
            id: 12,
        };
        assert_eq!(err.to_string(), "device 12 not found");
    }

    #[test]
    fn should_render_invalid_action_with_one_based_index() {
        let err = RoutineError::InvalidAction { index: 3 };
        assert_eq!(err.to_string(), "invalid action at index 3");
    }

    #[test]
    fn should_convert_sub_errors_into_top_level_error() {
        let err: HestiaError = UpdateError::EmptyOrUnrecognized.into();
        assert!(matches!(err, HestiaError::Update(_)));

        let err: HestiaError = RoutineError::MissingOrEmpty.into();
        assert!(matches!(err, HestiaError::Routine(_)));
    }
}
