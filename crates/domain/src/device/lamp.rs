//! Lamp — a dimmable, colored light.

use serde::{Deserialize, Serialize};

use crate::error::UpdateError;
use crate::fields::{self, FieldMap};

/// Fixed color palette available to lamps.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum LampColor {
    White,
    Yellow,
    Blue,
    Red,
    Green,
    Orange,
    Pink,
    Purple,
}

impl LampColor {
    pub const ALL: [Self; 8] = [
        Self::White,
        Self::Yellow,
        Self::Blue,
        Self::Red,
        Self::Green,
        Self::Orange,
        Self::Pink,
        Self::Purple,
    ];

    /// Resolve a color by case-insensitive name.
    #[must_use]
    pub fn from_name(name: &str) -> Option<Self> {
        Self::ALL
            .into_iter()
            .find(|color| color.as_str().eq_ignore_ascii_case(name.trim()))
    }

    #[must_use]
    pub const fn as_str(self) -> &'static str {
        match self {
            Self::White => "white",
            Self::Yellow => "yellow",
            Self::Blue => "blue",
            Self::Red => "red",
            Self::Green => "green",
            Self::Orange => "orange",
            Self::Pink => "pink",
            Self::Purple => "purple",
        }
    }
}

impl std::fmt::Display for LampColor {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(self.as_str())
    }
}

/// Kind-specific state of a lamp.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Lamp {
    pub color: LampColor,
    /// Light intensity, always within `[0, 100]`.
    pub intensity: u8,
}

impl Lamp {
    pub(crate) const EXPECTED_FIELDS: &'static [&'static str] =
        &["powered_on", "color", "intensity"];

    /// Create a lamp, clamping the intensity into `[0, 100]`.
    #[must_use]
    pub fn new(color: LampColor, intensity: i64) -> Self {
        let mut lamp = Self {
            color,
            intensity: 0,
        };
        lamp.set_intensity(intensity);
        lamp
    }

    /// Set the intensity, clamping into `[0, 100]`.
    #[allow(clippy::cast_possible_truncation, clippy::cast_sign_loss)]
    pub fn set_intensity(&mut self, value: i64) {
        self.intensity = value.clamp(0, 100) as u8;
    }

    pub(crate) fn apply_fields(&mut self, body: &FieldMap) -> Result<bool, UpdateError> {
        let mut recognized = false;

        // a lamp always shows a color, so unlike TV selections there is no
        // "absent" reading: null and blank are rejected like unknown names
        if let Some(value) = body.get("color") {
            let name = fields::non_empty_str(value).ok_or_else(|| fields::invalid("color", value))?;
            self.color =
                LampColor::from_name(name).ok_or_else(|| fields::invalid("color", value))?;
            recognized = true;
        }

        if let Some(value) = body.get("intensity") {
            self.set_intensity(fields::parse_i64("intensity", value)?);
            recognized = true;
        }

        Ok(recognized)
    }
}
