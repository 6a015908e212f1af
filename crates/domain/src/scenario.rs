//! Scenario — a named, replayable routine of device actions.

use serde::{Deserialize, Serialize};

use crate::fields::FieldMap;
use crate::id::ScenarioId;

/// A named batch of device actions replayed on demand.
///
/// Each routine entry is a raw field map carrying a mandatory `device_id`
/// plus the update fields for that device, e.g.
/// `{"device_id": 3, "powered_on": true, "intensity": 20}`. Actions are
/// validated when the scenario is applied, not when it is stored: a
/// scenario may sit in the registry with an empty routine, it just cannot
/// be applied.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Scenario {
    pub id: ScenarioId,
    pub name: String,
    #[serde(default)]
    pub routine: Vec<FieldMap>,
}

impl Scenario {
    #[must_use]
    pub fn new(id: ScenarioId, name: impl Into<String>, routine: Vec<FieldMap>) -> Self {
        Self {
            id,
            name: name.into(),
            routine,
        }
    }
}
