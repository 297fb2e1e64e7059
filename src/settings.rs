//! Simulation tuning
//!
//! Every field has a default in [`crate::consts`]; a JSON document only needs
//! to name the values it overrides.

use std::fmt;

use serde::{Deserialize, Serialize};

use crate::consts::*;

/// Why a settings document was rejected
#[derive(Debug)]
pub enum SettingsError {
    /// Not valid JSON, or a field has the wrong type
    Parse(serde_json::Error),
    /// Parsed, but a value is out of range
    Invalid {
        field: &'static str,
        reason: &'static str,
    },
}

impl fmt::Display for SettingsError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            SettingsError::Parse(e) => write!(f, "failed to parse settings: {}", e),
            SettingsError::Invalid { field, reason } => {
                write!(f, "invalid setting `{}`: {}", field, reason)
            }
        }
    }
}

impl std::error::Error for SettingsError {
    fn source(&self) -> Option<&(dyn std::error::Error + 'static)> {
        match self {
            SettingsError::Parse(e) => Some(e),
            SettingsError::Invalid { .. } => None,
        }
    }
}

impl From<serde_json::Error> for SettingsError {
    fn from(e: serde_json::Error) -> Self {
        SettingsError::Parse(e)
    }
}

/// Entity sizes, fence layout and herding behaviour
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct Settings {
    // === Entities ===
    /// Dog radius
    pub dog_size: f32,
    /// Sheep radius
    pub sheep_size: f32,
    /// Sheep wander step
    pub sheep_speed: f32,

    // === Pen ===
    /// Wall thickness
    pub fence_thickness: f32,
    /// Pen size as a fraction of each arena dimension
    pub fence_scale: f32,

    // === Herding ===
    /// Peak flee impulse
    pub repel_strength: f32,
    /// Awareness radius in multiples of `2 * sheep_size`
    pub awareness_factor: f32,
    /// Dog spawn distance beyond the sheep
    pub dog_offset: f32,

    // === Round ===
    /// Delay between the win and the completion notice (ms)
    pub completion_delay_ms: f64,
}

impl Default for Settings {
    fn default() -> Self {
        Self {
            dog_size: DOG_SIZE,
            sheep_size: SHEEP_SIZE,
            sheep_speed: SHEEP_SPEED,

            fence_thickness: FENCE_THICKNESS,
            fence_scale: FENCE_SCALE,

            repel_strength: REPEL_STRENGTH,
            awareness_factor: AWARENESS_FACTOR,
            dog_offset: DOG_SPAWN_OFFSET,

            completion_delay_ms: COMPLETION_DELAY_MS,
        }
    }
}

impl Settings {
    /// Parse and validate a JSON settings document
    pub fn from_json(json: &str) -> Result<Self, SettingsError> {
        let settings: Settings = serde_json::from_str(json)?;
        settings.validate()?;
        Ok(settings)
    }

    pub fn to_json(&self) -> String {
        // Plain numeric struct, serialization cannot fail
        serde_json::to_string(self).unwrap_or_default()
    }

    /// Reject values the simulation cannot run with
    pub fn validate(&self) -> Result<(), SettingsError> {
        let positive = [
            ("dog_size", self.dog_size),
            ("sheep_size", self.sheep_size),
            ("fence_thickness", self.fence_thickness),
            ("awareness_factor", self.awareness_factor),
        ];
        for (field, value) in positive {
            if !(value.is_finite() && value > 0.0) {
                return Err(SettingsError::Invalid {
                    field,
                    reason: "must be a positive number",
                });
            }
        }

        let non_negative = [
            ("sheep_speed", self.sheep_speed),
            ("repel_strength", self.repel_strength),
            ("dog_offset", self.dog_offset),
        ];
        for (field, value) in non_negative {
            if !(value.is_finite() && value >= 0.0) {
                return Err(SettingsError::Invalid {
                    field,
                    reason: "must be zero or greater",
                });
            }
        }

        if !(self.fence_scale > 0.0 && self.fence_scale < 1.0) {
            return Err(SettingsError::Invalid {
                field: "fence_scale",
                reason: "must be between 0 and 1 (exclusive)",
            });
        }

        if !(self.completion_delay_ms.is_finite() && self.completion_delay_ms >= 0.0) {
            return Err(SettingsError::Invalid {
                field: "completion_delay_ms",
                reason: "must be zero or greater",
            });
        }

        Ok(())
    }

    /// Personal space the sheep keeps around itself
    pub fn sheep_min_distance(&self) -> f32 {
        self.sheep_size * 2.0
    }

    /// Radius around the dog within which the sheep flees
    pub fn awareness_distance(&self) -> f32 {
        self.sheep_min_distance() * self.awareness_factor
    }

    /// Closest the dog may get to the sheep (centre to centre)
    pub fn separation_distance(&self) -> f32 {
        self.dog_size + self.sheep_size
    }
}
