//! Device service — use-cases for the device fleet.

use hestia_domain::device::{Device, DeviceState, UpdateOutcome, replacement};
use hestia_domain::error::{HestiaError, NotFoundError, ReplacementError};
use hestia_domain::fields::{self, FieldMap};
use hestia_domain::id::DeviceId;

use crate::ports::Registry;

/// Application service for device operations.
pub struct DeviceService<R> {
    registry: R,
}

impl<R> DeviceService<R>
where
    R: Registry<Id = DeviceId, Entry = Device>,
{
    /// Create a new service backed by the given registry.
    pub fn new(registry: R) -> Self {
        Self { registry }
    }

    /// Register a device with kind defaults, assigning it a fresh id.
    #[tracing::instrument(skip(self, state), fields(kind = %state.kind()))]
    pub fn register_device(&self, state: DeviceState) -> Device {
        let id = self.registry.next_id();
        let device = Device::new(id, state);
        self.registry.put(id, device.clone());
        device
    }

    /// List every registered device, ordered by id.
    #[must_use]
    pub fn list_devices(&self) -> Vec<Device> {
        self.registry
            .all_with_id()
            .into_iter()
            .map(|(_, device)| device)
            .collect()
    }

    /// Look up a device by id.
    ///
    /// # Errors
    ///
    /// Returns [`HestiaError::NotFound`] when no device with `id` exists.
    pub fn get_device(&self, id: DeviceId) -> Result<Device, HestiaError> {
        self.registry.get(id).ok_or_else(|| {
            NotFoundError {
                entity: "device",
                id: id.value(),
            }
            .into()
        })
    }

    /// Apply a partial update to a device.
    ///
    /// Returns `Ok(None)` when the update was a no-op (empty map or no
    /// recognized field); callers decide whether to tolerate that.
    ///
    /// # Errors
    ///
    /// Returns [`HestiaError::NotFound`] when the device does not exist and
    /// [`HestiaError::Update`] when a field value is invalid. A failed call
    /// may leave earlier fields of the same call applied; see
    /// [`Device::apply_update`].
    #[tracing::instrument(skip(self, body))]
    pub fn update_device(
        &self,
        id: DeviceId,
        body: &FieldMap,
    ) -> Result<Option<Device>, HestiaError> {
        let result = self
            .registry
            .update(id, |device| {
                let outcome = device.apply_update(body)?;
                Ok::<_, HestiaError>((outcome, device.clone()))
            })
            .ok_or(NotFoundError {
                entity: "device",
                id: id.value(),
            })?;

        let (outcome, device) = result?;
        match outcome {
            UpdateOutcome::Applied => Ok(Some(device)),
            UpdateOutcome::NoOp => Ok(None),
        }
    }

    /// Replace every visible field of a device.
    ///
    /// The payload may carry `id` and `kind`, but only when they match the
    /// target exactly; both are stripped before the remaining field set is
    /// validated against the kind's expected set and, on success, handed to
    /// the update engine.
    ///
    /// # Errors
    ///
    /// Returns [`HestiaError::NotFound`] for an unknown device,
    /// [`HestiaError::Replacement`] when `id`/`kind` mismatch or the field
    /// set is not exactly the expected one, and [`HestiaError::Update`] on
    /// badly-typed values.
    #[tracing::instrument(skip(self, body))]
    pub fn replace_device(&self, id: DeviceId, body: &FieldMap) -> Result<Device, HestiaError> {
        let existing = self.get_device(id)?;

        let payload = prepare_replacement(&existing, body)?;
        replacement::validate(&existing, &payload)?;

        match self.update_device(id, &payload)? {
            Some(device) => Ok(device),
            // unreachable after validation, but mirror the lenient fallback
            None => Ok(existing),
        }
    }

    /// Delete a device.
    ///
    /// Rooms and scenarios referencing it keep their dangling ids; those
    /// references fail at use time, not here.
    ///
    /// # Errors
    ///
    /// Returns [`HestiaError::NotFound`] when no device with `id` exists.
    #[tracing::instrument(skip(self))]
    pub fn delete_device(&self, id: DeviceId) -> Result<Device, HestiaError> {
        self.registry.remove(id).ok_or_else(|| {
            NotFoundError {
                entity: "device",
                id: id.value(),
            }
            .into()
        })
    }
}

/// Strip and verify the optional `id`/`kind` fields of a replacement
/// payload, returning the map that takes part in the field-set comparison.
fn prepare_replacement(existing: &Device, body: &FieldMap) -> Result<FieldMap, HestiaError> {
    let mut payload = body.clone();

    if let Some(value) = payload.remove("id") {
        let claimed = fields::parse_i64("id", &value)?;
        if u64::try_from(claimed) != Ok(existing.id.value()) {
            return Err(ReplacementError::IdMismatch {
                expected: existing.id.value(),
            }
            .into());
        }
    }

    if let Some(value) = payload.remove("kind") {
        let matches = fields::non_empty_str(&value)
            .is_some_and(|name| name.eq_ignore_ascii_case(existing.kind().as_str()));
        if !matches {
            return Err(ReplacementError::KindMismatch {
                expected: existing.kind().as_str(),
            }
            .into());
        }
    }

    Ok(payload)
}
