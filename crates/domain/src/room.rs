//! Room — a physical space holding weak references to installed devices.

use serde::{Deserialize, Serialize};

use crate::id::{DeviceId, RoomId};

/// Category of a room.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "kebab-case")]
pub enum RoomKind {
    LivingRoom,
    Kitchen,
    Bedroom,
    Bathroom,
    Laundry,
}

impl RoomKind {
    pub const ALL: [Self; 5] = [
        Self::LivingRoom,
        Self::Kitchen,
        Self::Bedroom,
        Self::Bathroom,
        Self::Laundry,
    ];

    /// Resolve a kind by case-insensitive name.
    #[must_use]
    pub fn from_name(name: &str) -> Option<Self> {
        Self::ALL
            .into_iter()
            .find(|kind| kind.as_str().eq_ignore_ascii_case(name.trim()))
    }

    #[must_use]
    pub const fn as_str(self) -> &'static str {
        match self {
            Self::LivingRoom => "living-room",
            Self::Kitchen => "kitchen",
            Self::Bedroom => "bedroom",
            Self::Bathroom => "bathroom",
            Self::Laundry => "laundry",
        }
    }
}

impl std::fmt::Display for RoomKind {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(self.as_str())
    }
}

/// A room and the devices installed in it.
///
/// `device_ids` is a weak, ordered reference list: duplicates are allowed,
/// nothing checks that a device exists at insertion time, and deleting a
/// device does not prune it from here. Dangling ids simply disappear when
/// the room's devices are resolved through the registry.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Room {
    pub id: RoomId,
    pub kind: RoomKind,
    #[serde(default)]
    pub device_ids: Vec<DeviceId>,
}

impl Room {
    /// Create an empty room of the given kind.
    #[must_use]
    pub const fn new(id: RoomId, kind: RoomKind) -> Self {
        Self {
            id,
            kind,
            device_ids: Vec::new(),
        }
    }

    /// Append a device reference, keeping insertion order.
    pub fn install_device(&mut self, device_id: DeviceId) {
        self.device_ids.push(device_id);
    }

    /// Remove the first occurrence of `device_id`, reporting whether
    /// anything was removed.
    pub fn remove_device(&mut self, device_id: DeviceId) -> bool {
        match self.device_ids.iter().position(|id| *id == device_id) {
            Some(index) => {
                self.device_ids.remove(index);
                true
            }
            None => false,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn should_resolve_kind_names_case_insensitively() {
        assert_eq!(RoomKind::from_name("Living-Room"), Some(RoomKind::LivingRoom));
        assert_eq!(RoomKind::from_name("KITCHEN"), Some(RoomKind::Kitchen));
        assert_eq!(RoomKind::from_name("garage"), None);
    }

    #[test]
    fn should_keep_insertion_order_and_allow_duplicates() {
        let mut room = Room::new(RoomId::new(1), RoomKind::Bedroom);

        room.install_device(DeviceId::new(9));
        room.install_device(DeviceId::new(2));
        room.install_device(DeviceId::new(9));

        assert_eq!(
            room.device_ids,
            vec![DeviceId::new(9), DeviceId::new(2), DeviceId::new(9)]
        );
    }

    #[test]
    fn should_remove_only_the_first_occurrence() {
        let mut room = Room::new(RoomId::new(1), RoomKind::Laundry);
        room.install_device(DeviceId::new(4));
        room.install_device(DeviceId::new(4));

        assert!(room.remove_device(DeviceId::new(4)));
        assert_eq!(room.device_ids, vec![DeviceId::new(4)]);

        assert!(!room.remove_device(DeviceId::new(7)));
    }

    #[test]
    fn should_serialize_kind_in_kebab_case() {
        let room = Room::new(RoomId::new(2), RoomKind::LivingRoom);
        let json = serde_json::to_value(&room).unwrap();
        assert_eq!(json["kind"], "living-room");
    }
}
