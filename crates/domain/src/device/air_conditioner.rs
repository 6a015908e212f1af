//! Air conditioner — temperature, fan speed, and the two comfort toggles.

use serde::{Deserialize, Serialize};

use crate::error::UpdateError;
use crate::fields::{self, FieldMap};

/// Kind-specific state of an air conditioner.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct AirConditioner {
    /// Target temperature in degrees, unrestricted.
    pub temperature: i32,
    /// Fan speed, always within `[0, 2]` (0 low, 1 medium, 2 high).
    pub fan_speed: u8,
    pub auto_clean: bool,
    pub quiet_mode: bool,
}

impl Default for AirConditioner {
    fn default() -> Self {
        Self {
            temperature: 24,
            fan_speed: 0,
            auto_clean: false,
            quiet_mode: false,
        }
    }
}

impl AirConditioner {
    pub(crate) const EXPECTED_FIELDS: &'static [&'static str] = &[
        "powered_on",
        "temperature",
        "fan_speed",
        "auto_clean",
        "quiet_mode",
    ];

    /// Set the fan speed, clamping into `[0, 2]`.
    #[allow(clippy::cast_possible_truncation, clippy::cast_sign_loss)]
    pub fn set_fan_speed(&mut self, value: i64) {
        self.fan_speed = value.clamp(0, 2) as u8;
    }

    pub(crate) fn apply_fields(&mut self, body: &FieldMap) -> Result<bool, UpdateError> {
        let mut recognized = false;

        if let Some(value) = body.get("temperature") {
            let target = fields::parse_i64("temperature", value)?;
            self.temperature = i32::try_from(target)
                .map_err(|_| fields::invalid("temperature", value))?;
            recognized = true;
        }

        if let Some(value) = body.get("fan_speed") {
            self.set_fan_speed(fields::parse_i64("fan_speed", value)?);
            recognized = true;
        }

        if let Some(value) = body.get("auto_clean") {
            self.auto_clean = fields::parse_bool("auto_clean", value)?;
            recognized = true;
        }

        if let Some(value) = body.get("quiet_mode") {
            self.quiet_mode = fields::parse_bool("quiet_mode", value)?;
            recognized = true;
        }

        Ok(recognized)
    }
}
