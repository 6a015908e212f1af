//! Scenario service — storage plus the routine executor.

use std::sync::Arc;

use hestia_domain::device::Device;
use hestia_domain::error::{HestiaError, NotFoundError, RoutineError};
use hestia_domain::fields::{self, FieldMap};
use hestia_domain::id::{DeviceId, ScenarioId};
use hestia_domain::scenario::Scenario;

use crate::ports::Registry;
use crate::services::device_service::DeviceService;

/// Application service for scenarios and their routines.
pub struct ScenarioService<R, D> {
    registry: R,
    devices: Arc<DeviceService<D>>,
}

impl<R, D> ScenarioService<R, D>
where
    R: Registry<Id = ScenarioId, Entry = Scenario>,
    D: Registry<Id = DeviceId, Entry = Device>,
{
    /// Create a new service backed by the given registry.
    pub fn new(registry: R, devices: Arc<DeviceService<D>>) -> Self {
        Self { registry, devices }
    }

    /// Store a scenario, assigning it a fresh id. The routine is not
    /// validated here; actions only get checked when the scenario is
    /// applied.
    #[tracing::instrument(skip(self, routine), fields(name = %name))]
    pub fn create_scenario(&self, name: &str, routine: Vec<FieldMap>) -> Scenario {
        let id = self.registry.next_id();
        let scenario = Scenario::new(id, name, routine);
        self.registry.put(id, scenario.clone());
        scenario
    }

    /// List every scenario, ordered by id.
    #[must_use]
    pub fn list_scenarios(&self) -> Vec<Scenario> {
        self.registry
            .all_with_id()
            .into_iter()
            .map(|(_, scenario)| scenario)
            .collect()
    }

    /// Look up a scenario by id.
    ///
    /// # Errors
    ///
    /// Returns [`HestiaError::NotFound`] when no scenario with `id` exists.
    pub fn get_scenario(&self, id: ScenarioId) -> Result<Scenario, HestiaError> {
        self.registry.get(id).ok_or_else(|| {
            NotFoundError {
                entity: "scenario",
                id: id.value(),
            }
            .into()
        })
    }

    /// Replace a scenario's name and routine.
    ///
    /// # Errors
    ///
    /// Returns [`HestiaError::NotFound`] when no scenario with `id` exists.
    #[tracing::instrument(skip(self, routine), fields(name = %name))]
    pub fn update_scenario(
        &self,
        id: ScenarioId,
        name: &str,
        routine: Vec<FieldMap>,
    ) -> Result<Scenario, HestiaError> {
        self.registry
            .update(id, |scenario| {
                scenario.name = name.to_string();
                scenario.routine = routine.clone();
                scenario.clone()
            })
            .ok_or_else(|| {
                NotFoundError {
                    entity: "scenario",
                    id: id.value(),
                }
                .into()
            })
    }

    /// Delete a scenario.
    ///
    /// # Errors
    ///
    /// Returns [`HestiaError::NotFound`] when no scenario with `id` exists.
    #[tracing::instrument(skip(self))]
    pub fn delete_scenario(&self, id: ScenarioId) -> Result<Scenario, HestiaError> {
        self.registry.remove(id).ok_or_else(|| {
            NotFoundError {
                entity: "scenario",
                id: id.value(),
            }
            .into()
        })
    }

    /// Apply a scenario's routine, one device update per action, in
    /// declaration order.
    ///
    /// Execution is fail-fast and deliberately not transactional: the
    /// executor stops at the first invalid or unresolvable action, and
    /// every action applied before that point stays applied. On success the
    /// routine is returned exactly as stored.
    ///
    /// # Errors
    ///
    /// - [`HestiaError::NotFound`] when the scenario does not exist, or an
    ///   action targets a device that does not (carrying the device id).
    /// - [`RoutineError::MissingOrEmpty`] when the routine has no actions;
    ///   nothing is executed in that case.
    /// - [`RoutineError::InvalidAction`] (1-based index) when an action has
    ///   no usable `device_id` or no applicable update fields.
    /// - [`HestiaError::Update`] when the update engine rejects an action's
    ///   field values.
    #[tracing::instrument(skip(self))]
    pub fn apply_scenario(&self, id: ScenarioId) -> Result<Vec<FieldMap>, HestiaError> {
        let scenario = self.get_scenario(id)?;

        if scenario.routine.is_empty() {
            return Err(RoutineError::MissingOrEmpty.into());
        }

        for (position, action) in scenario.routine.iter().enumerate() {
            let index = position + 1;
            self.apply_action(index, action)?;
        }

        Ok(scenario.routine)
    }

    fn apply_action(&self, index: usize, action: &FieldMap) -> Result<(), HestiaError> {
        let invalid = RoutineError::InvalidAction { index };

        // every action targets one device
        let device_id = action
            .get("device_id")
            .and_then(|value| fields::parse_i64("device_id", value).ok())
            .and_then(|raw| u64::try_from(raw).ok())
            .map(DeviceId::new)
            .ok_or(invalid.clone())?;

        // resolution failures surface as NotFound with the device id
        self.devices.get_device(device_id)?;

        let mut body = action.clone();
        body.remove("device_id");
        if body.is_empty() {
            return Err(invalid.into());
        }

        match self.devices.update_device(device_id, &body)? {
            Some(_) => Ok(()),
            None => Err(invalid.into()),
        }
    }
}
