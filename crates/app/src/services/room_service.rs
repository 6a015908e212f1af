//! Room service — use-cases for rooms and the devices installed in them.

use std::sync::Arc;

use hestia_domain::device::Device;
use hestia_domain::error::{HestiaError, NotFoundError, ReplacementError, UpdateError};
use hestia_domain::fields::{self, FieldMap};
use hestia_domain::id::{DeviceId, RoomId};
use hestia_domain::room::{Room, RoomKind};

use crate::ports::Registry;
use crate::services::device_service::DeviceService;

/// Application service for room operations.
///
/// Holds a handle to the device service because rooms only reference
/// devices by id: every listing resolves those weak references on the fly,
/// and full updates check that the referenced devices exist.
pub struct RoomService<R, D> {
    registry: R,
    devices: Arc<DeviceService<D>>,
}

impl<R, D> RoomService<R, D>
where
    R: Registry<Id = RoomId, Entry = Room>,
    D: Registry<Id = DeviceId, Entry = Device>,
{
    /// Create a new service backed by the given registry.
    pub fn new(registry: R, devices: Arc<DeviceService<D>>) -> Self {
        Self { registry, devices }
    }

    /// Create an empty room of the given kind, assigning it a fresh id.
    #[tracing::instrument(skip(self))]
    pub fn create_room(&self, kind: RoomKind) -> Room {
        let id = self.registry.next_id();
        let room = Room::new(id, kind);
        self.registry.put(id, room.clone());
        room
    }

    /// List every room, ordered by id.
    #[must_use]
    pub fn list_rooms(&self) -> Vec<Room> {
        self.registry
            .all_with_id()
            .into_iter()
            .map(|(_, room)| room)
            .collect()
    }

    /// Look up a room by id.
    ///
    /// # Errors
    ///
    /// Returns [`HestiaError::NotFound`] when no room with `id` exists.
    pub fn get_room(&self, id: RoomId) -> Result<Room, HestiaError> {
        self.registry.get(id).ok_or_else(|| {
            NotFoundError {
                entity: "room",
                id: id.value(),
            }
            .into()
        })
    }

    /// Delete a room. Installed devices are untouched.
    ///
    /// # Errors
    ///
    /// Returns [`HestiaError::NotFound`] when no room with `id` exists.
    #[tracing::instrument(skip(self))]
    pub fn delete_room(&self, id: RoomId) -> Result<Room, HestiaError> {
        self.registry.remove(id).ok_or_else(|| {
            NotFoundError {
                entity: "room",
                id: id.value(),
            }
            .into()
        })
    }

    /// Install a device into a room.
    ///
    /// The reference is weak: nothing checks that the device exists, and
    /// installing the same id twice keeps both entries.
    ///
    /// # Errors
    ///
    /// Returns [`HestiaError::NotFound`] when the room does not exist.
    #[tracing::instrument(skip(self))]
    pub fn install_device(&self, room_id: RoomId, device_id: DeviceId) -> Result<Room, HestiaError> {
        self.registry
            .update(room_id, |room| {
                room.install_device(device_id);
                room.clone()
            })
            .ok_or_else(|| {
                NotFoundError {
                    entity: "room",
                    id: room_id.value(),
                }
                .into()
            })
    }

    /// Remove the first occurrence of a device from a room. Removing an id
    /// that is not installed is a no-op.
    ///
    /// # Errors
    ///
    /// Returns [`HestiaError::NotFound`] when the room does not exist.
    #[tracing::instrument(skip(self))]
    pub fn remove_device(&self, room_id: RoomId, device_id: DeviceId) -> Result<Room, HestiaError> {
        self.registry
            .update(room_id, |room| {
                room.remove_device(device_id);
                room.clone()
            })
            .ok_or_else(|| {
                NotFoundError {
                    entity: "room",
                    id: room_id.value(),
                }
                .into()
            })
    }

    /// Resolve a room's device references, silently skipping dangling ids.
    #[must_use]
    pub fn resolve_devices(&self, room: &Room) -> Vec<Device> {
        room.device_ids
            .iter()
            .filter_map(|device_id| self.devices.get_device(*device_id).ok())
            .collect()
    }

    /// Replace a room's device list wholesale.
    ///
    /// The payload must be exactly `{kind, device_ids}` plus an optional
    /// matching `id`. The kind is immutable, every listed id must be
    /// numeric and resolve to an existing device, and on success the
    /// previous list is discarded.
    ///
    /// # Errors
    ///
    /// Returns [`HestiaError::NotFound`] for an unknown room or a listed
    /// device that does not exist, [`HestiaError::Replacement`] when the
    /// key set or `id`/`kind` are wrong, and [`HestiaError::Update`] when a
    /// listed id is not numeric.
    #[tracing::instrument(skip(self, body))]
    pub fn update_room(&self, id: RoomId, body: &FieldMap) -> Result<Room, HestiaError> {
        let room = self.get_room(id)?;

        check_update_keys(&room, body)?;
        let device_ids = self.checked_device_ids(body.get("device_ids"))?;

        self.registry
            .update(id, |room| {
                room.device_ids = device_ids.clone();
                room.clone()
            })
            .ok_or_else(|| {
                NotFoundError {
                    entity: "room",
                    id: id.value(),
                }
                .into()
            })
    }

    /// Parse and resolve the `device_ids` payload entries.
    fn checked_device_ids(
        &self,
        value: Option<&serde_json::Value>,
    ) -> Result<Vec<DeviceId>, HestiaError> {
        let entries = value.and_then(serde_json::Value::as_array).ok_or(
            UpdateError::InvalidFieldValue {
                field: "device_ids",
                value: "expected a list of device ids".to_string(),
            },
        )?;

        let mut device_ids = Vec::with_capacity(entries.len());
        for entry in entries {
            let raw = fields::parse_i64("device_ids", entry)?;
            let device_id = u64::try_from(raw)
                .map(DeviceId::new)
                .map_err(|_| UpdateError::InvalidFieldValue {
                    field: "device_ids",
                    value: raw.to_string(),
                })?;
            // every referenced device must exist at update time
            self.devices.get_device(device_id)?;
            device_ids.push(device_id);
        }
        Ok(device_ids)
    }
}

/// Validate the key set and the immutable `id`/`kind` fields of a room
/// update payload.
fn check_update_keys(room: &Room, body: &FieldMap) -> Result<(), HestiaError> {
    let mut missing = Vec::new();
    for required in ["kind", "device_ids"] {
        if !body.contains_key(required) {
            missing.push(required.to_string());
        }
    }
    let extra: Vec<String> = body
        .keys()
        .filter(|key| !matches!(key.as_str(), "id" | "kind" | "device_ids"))
        .cloned()
        .collect();
    if !missing.is_empty() || !extra.is_empty() {
        return Err(ReplacementError::FieldSetMismatch { missing, extra }.into());
    }

    if let Some(value) = body.get("id") {
        let claimed = fields::parse_i64("id", value)?;
        if u64::try_from(claimed) != Ok(room.id.value()) {
            return Err(ReplacementError::IdMismatch {
                expected: room.id.value(),
            }
            .into());
        }
    }

    let kind_matches = body
        .get("kind")
        .and_then(fields::non_empty_str)
        .is_some_and(|name| name.eq_ignore_ascii_case(room.kind.as_str()));
    if !kind_matches {
        return Err(ReplacementError::KindMismatch {
            expected: room.kind.as_str(),
        }
        .into());
    }

    Ok(())
}
