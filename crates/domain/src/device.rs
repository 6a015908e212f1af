//! Device — the typed fleet member and its partial-update engine.
//!
//! A device is a tagged variant over the supported kinds. The generic
//! `powered_on` rule lives here; everything kind-specific (recognized
//! fields, clamping, enum lookup) lives with the variant's state struct.

mod air_conditioner;
mod lamp;
pub mod replacement;
mod tv;

pub use air_conditioner::AirConditioner;
pub use lamp::{Lamp, LampColor};
pub use tv::{Tv, TvApp, TvChannel};

use serde::{Deserialize, Serialize};

use crate::error::UpdateError;
use crate::fields::{self, FieldMap};
use crate::id::DeviceId;

/// Fixed category of a device, determining its field schema and rules.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "kebab-case")]
pub enum DeviceKind {
    Lamp,
    AirConditioner,
    Tv,
}

impl DeviceKind {
    pub const ALL: [Self; 3] = [Self::Lamp, Self::AirConditioner, Self::Tv];

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
            Self::Lamp => "lamp",
            Self::AirConditioner => "air-conditioner",
            Self::Tv => "tv",
        }
    }
}

impl std::fmt::Display for DeviceKind {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(self.as_str())
    }
}

/// Outcome of a partial update.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum UpdateOutcome {
    /// At least one field was recognized and processed.
    Applied,
    /// The map was empty or carried no recognized field; nothing changed.
    NoOp,
}

impl UpdateOutcome {
    #[must_use]
    pub const fn is_noop(self) -> bool {
        matches!(self, Self::NoOp)
    }
}

/// Kind-specific state, tagged by `kind` on the wire.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(tag = "kind", rename_all = "kebab-case")]
pub enum DeviceState {
    Lamp(Lamp),
    AirConditioner(AirConditioner),
    Tv(Tv),
}

impl DeviceState {
    #[must_use]
    pub const fn kind(&self) -> DeviceKind {
        match self {
            Self::Lamp(_) => DeviceKind::Lamp,
            Self::AirConditioner(_) => DeviceKind::AirConditioner,
            Self::Tv(_) => DeviceKind::Tv,
        }
    }

    /// The exact field names a full replacement must supply for this kind.
    #[must_use]
    pub const fn expected_fields(&self) -> &'static [&'static str] {
        match self {
            Self::Lamp(_) => Lamp::EXPECTED_FIELDS,
            Self::AirConditioner(_) => AirConditioner::EXPECTED_FIELDS,
            Self::Tv(_) => Tv::EXPECTED_FIELDS,
        }
    }

    /// Pre-mutation checks that must hold for the whole update call.
    fn check_update(&self, body: &FieldMap) -> Result<(), UpdateError> {
        match self {
            Self::Tv(_) => Tv::check_exclusive(body),
            Self::Lamp(_) | Self::AirConditioner(_) => Ok(()),
        }
    }

    fn apply_fields(&mut self, body: &FieldMap) -> Result<bool, UpdateError> {
        match self {
            Self::Lamp(lamp) => lamp.apply_fields(body),
            Self::AirConditioner(unit) => unit.apply_fields(body),
            Self::Tv(tv) => tv.apply_fields(body),
        }
    }
}

/// A smart-home device.
///
/// The `id` is assigned once at registration and immutable afterwards; the
/// kind is fixed at construction. All mutation goes through
/// [`Device::apply_update`] or the full-replacement path built on top of it.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Device {
    pub id: DeviceId,
    pub powered_on: bool,
    #[serde(flatten)]
    pub state: DeviceState,
}

impl Device {
    /// Create a device with the given kind state, powered off.
    #[must_use]
    pub const fn new(id: DeviceId, state: DeviceState) -> Self {
        Self {
            id,
            powered_on: false,
            state,
        }
    }

    #[must_use]
    pub fn lamp(id: DeviceId, color: LampColor, intensity: i64) -> Self {
        Self::new(id, DeviceState::Lamp(Lamp::new(color, intensity)))
    }

    #[must_use]
    pub fn air_conditioner(id: DeviceId) -> Self {
        Self::new(id, DeviceState::AirConditioner(AirConditioner::default()))
    }

    #[must_use]
    pub fn tv(id: DeviceId) -> Self {
        Self::new(id, DeviceState::Tv(Tv::default()))
    }

    #[must_use]
    pub const fn kind(&self) -> DeviceKind {
        self.state.kind()
    }

    /// Apply a partial update from a raw field map.
    ///
    /// The generic `powered_on` rule runs first, then the kind-specific
    /// rule. Returns [`UpdateOutcome::NoOp`] when the map is empty or none
    /// of its keys are recognized; the device is untouched in that case.
    ///
    /// Field application is not transactional: a failure on a later field
    /// leaves earlier mutations from the same call in place. The one
    /// exception is the TV app/channel exclusivity rule, which is checked
    /// before anything is applied.
    ///
    /// # Errors
    ///
    /// Returns [`UpdateError::InvalidFieldValue`] for malformed numbers,
    /// booleans, or unknown enum names, and
    /// [`UpdateError::MutuallyExclusiveFields`] when a TV update carries
    /// both a non-empty `current_app` and `current_channel`.
    pub fn apply_update(&mut self, body: &FieldMap) -> Result<UpdateOutcome, UpdateError> {
        if body.is_empty() {
            return Ok(UpdateOutcome::NoOp);
        }

        self.state.check_update(body)?;

        let mut recognized = self.apply_power(body)?;
        if self.state.apply_fields(body)? {
            recognized = true;
        }

        if recognized {
            Ok(UpdateOutcome::Applied)
        } else {
            Ok(UpdateOutcome::NoOp)
        }
    }

    /// Generic power rule, identical for every kind: presence of the field
    /// counts as recognized, the state only flips when it actually differs.
    fn apply_power(&mut self, body: &FieldMap) -> Result<bool, UpdateError> {
        let Some(value) = body.get("powered_on") else {
            return Ok(false);
        };
        let target = fields::parse_bool("powered_on", value)?;
        if target != self.powered_on {
            self.powered_on = target;
        }
        Ok(true)
    }
}

#[cfg(test)]
mod tests {
    use serde_json::json;

    use super::*;

    fn body(value: serde_json::Value) -> FieldMap {
        match value {
            serde_json::Value::Object(map) => map,
            other => panic!("expected an object, got {other}"),
        }
    }

    #[test]
    fn should_resolve_kind_names_case_insensitively() {
        assert_eq!(DeviceKind::from_name("Lamp"), Some(DeviceKind::Lamp));
        assert_eq!(
            DeviceKind::from_name(" AIR-CONDITIONER "),
            Some(DeviceKind::AirConditioner)
        );
        assert_eq!(DeviceKind::from_name("toaster"), None);
    }

    #[test]
    fn should_return_noop_when_map_is_empty() {
        let mut device = Device::lamp(DeviceId::new(1), LampColor::White, 50);
        let before = device.clone();

        let outcome = device.apply_update(&FieldMap::new()).unwrap();

        assert!(outcome.is_noop());
        assert_eq!(device, before);
    }

    #[test]
    fn should_return_noop_when_no_key_is_recognized() {
        let mut device = Device::tv(DeviceId::new(1));
        let before = device.clone();

        let outcome = device
            .apply_update(&body(json!({"brightness": 10, "bass": 3})))
            .unwrap();

        assert!(outcome.is_noop());
        assert_eq!(device, before);
    }

    #[test]
    fn should_recognize_powered_on_alone() {
        let mut device = Device::air_conditioner(DeviceId::new(1));

        let outcome = device.apply_update(&body(json!({"powered_on": true}))).unwrap();

        assert_eq!(outcome, UpdateOutcome::Applied);
        assert!(device.powered_on);
    }

    #[test]
    fn should_accept_powered_on_as_canonical_string() {
        let mut device = Device::lamp(DeviceId::new(1), LampColor::White, 50);

        device.apply_update(&body(json!({"powered_on": "True"}))).unwrap();

        assert!(device.powered_on);
    }

    #[test]
    fn should_reject_malformed_powered_on() {
        let mut device = Device::lamp(DeviceId::new(1), LampColor::White, 50);

        let err = device
            .apply_update(&body(json!({"powered_on": "on"})))
            .unwrap_err();

        assert!(matches!(err, UpdateError::InvalidFieldValue { field, .. } if field == "powered_on"));
        assert!(!device.powered_on);
    }

    #[test]
    fn should_apply_power_and_kind_fields_in_one_call() {
        let mut device = Device::lamp(DeviceId::new(1), LampColor::White, 50);

        let outcome = device
            .apply_update(&body(json!({"powered_on": true, "color": "blue", "intensity": 80})))
            .unwrap();

        assert_eq!(outcome, UpdateOutcome::Applied);
        assert!(device.powered_on);
        match &device.state {
            DeviceState::Lamp(lamp) => {
                assert_eq!(lamp.color, LampColor::Blue);
                assert_eq!(lamp.intensity, 80);
            }
            other => panic!("unexpected state {other:?}"),
        }
    }

    #[test]
    fn should_produce_same_state_when_update_applied_twice() {
        let mut device = Device::lamp(DeviceId::new(1), LampColor::White, 50);
        let update = body(json!({"powered_on": true, "intensity": 30}));

        let first = device.apply_update(&update).unwrap();
        let snapshot = device.clone();
        let second = device.apply_update(&update).unwrap();

        assert_eq!(first, second);
        assert_eq!(device, snapshot);
    }

    #[test]
    fn should_keep_earlier_mutation_when_later_field_fails() {
        let mut device = Device::lamp(DeviceId::new(1), LampColor::White, 50);

        let result = device.apply_update(&body(json!({
            "powered_on": true,
            "intensity": "very"
        })));

        assert!(result.is_err());
        // power was applied before the intensity parse failed
        assert!(device.powered_on);
    }

    #[test]
    fn should_serialize_with_kind_tag_and_flat_fields() {
        let device = Device::lamp(DeviceId::new(3), LampColor::Green, 70);
        let json = serde_json::to_value(&device).unwrap();

        assert_eq!(json["id"], 3);
        assert_eq!(json["kind"], "lamp");
        assert_eq!(json["powered_on"], false);
        assert_eq!(json["color"], "green");
        assert_eq!(json["intensity"], 70);
    }

    #[test]
    fn should_deserialize_each_kind_from_tagged_json() {
        let device: Device = serde_json::from_value(json!({
            "id": 5,
            "powered_on": true,
            "kind": "air-conditioner",
            "temperature": 18,
            "fan_speed": 2,
            "auto_clean": false,
            "quiet_mode": true
        }))
        .unwrap();

        assert_eq!(device.kind(), DeviceKind::AirConditioner);
        assert!(device.powered_on);
    }
}
