//! State of the cart-pole system.
use balance_core::record::{Record, RecordValue};
use serde::{Deserialize, Deserializer, Serialize};

/// Snapshot of the cart-pole state.
///
/// Serialized with the field names expected by the remote training service.
#[derive(Debug, Deserialize, Serialize, PartialEq, Clone, Copy, Default)]
pub struct SimulationState {
    /// Cart position (m).
    pub cart_position: f64,

    /// Cart velocity (m/s).
    pub cart_velocity: f64,

    /// Pole angle from vertical (rad).
    pub pole_angle: f64,

    /// Pole angular velocity (rad/s).
    pub pole_angular_velocity: f64,

    /// Position of the pole's center of mass (m).
    pub pole_center_position: f64,

    /// Velocity of the pole's center of mass (m/s).
    pub pole_center_velocity: f64,

    /// Goal position of the pole, held constant through an episode (m).
    pub target_pole_position: f64,
}

impl SimulationState {
    /// Returns the fields in declaration order.
    pub fn to_array(&self) -> [f64; 7] {
        [
            self.cart_position,
            self.cart_velocity,
            self.pole_angle,
            self.pole_angular_velocity,
            self.pole_center_position,
            self.pole_center_velocity,
            self.target_pole_position,
        ]
    }

    /// Writes the fields as scalars under their serialized names, plus `halted`
    /// as 0 or 1.
    pub fn to_record(&self, halted: bool) -> Record {
        Record::from_slice(&[
            ("cart_position", RecordValue::Scalar(self.cart_position as f32)),
            ("cart_velocity", RecordValue::Scalar(self.cart_velocity as f32)),
            ("pole_angle", RecordValue::Scalar(self.pole_angle as f32)),
            (
                "pole_angular_velocity",
                RecordValue::Scalar(self.pole_angular_velocity as f32),
            ),
            (
                "pole_center_position",
                RecordValue::Scalar(self.pole_center_position as f32),
            ),
            (
                "pole_center_velocity",
                RecordValue::Scalar(self.pole_center_velocity as f32),
            ),
            (
                "target_pole_position",
                RecordValue::Scalar(self.target_pole_position as f32),
            ),
            ("halted", RecordValue::Scalar(if halted { 1.0 } else { 0.0 })),
        ])
    }
}

// The training service sends `null` for unset values.
fn zero_if_null<'de, D: Deserializer<'de>>(deserializer: D) -> Result<f64, D::Error> {
    Ok(Option::<f64>::deserialize(deserializer)?.unwrap_or(0.0))
}

/// Initial conditions of an episode.
///
/// Missing keys default to zero when deserialized.
#[derive(Debug, Deserialize, Serialize, PartialEq, Clone, Copy, Default)]
#[serde(default)]
pub struct EpisodeConfig {
    /// Initial cart position (m).
    #[serde(deserialize_with = "zero_if_null")]
    pub initial_cart_position: f64,

    /// Initial pole angle (rad).
    #[serde(deserialize_with = "zero_if_null")]
    pub initial_pole_angle: f64,

    /// Goal position of the pole (m).
    #[serde(deserialize_with = "zero_if_null")]
    pub target_pole_position: f64,
}

impl EpisodeConfig {
    /// Creates initial conditions.
    pub fn new(initial_cart_position: f64, initial_pole_angle: f64, target_pole_position: f64) -> Self {
        Self {
            initial_cart_position,
            initial_pole_angle,
            target_pole_position,
        }
    }
}

/// Control input of a tick.
#[derive(Debug, Deserialize, Serialize, PartialEq, Clone, Copy, Default)]
#[serde(default)]
pub struct Action {
    /// Command, nominally in `[-1, 1]`. Not clamped.
    #[serde(deserialize_with = "zero_if_null")]
    pub command: f64,
}

#[cfg(test)]
mod tests {
    use super::*;
    use anyhow::Result;

    #[test]
    fn test_state_field_names() -> Result<()> {
        let state = SimulationState {
            cart_position: 1.0,
            target_pole_position: 0.5,
            ..Default::default()
        };
        let value = serde_json::to_value(&state)?;
        let mut keys: Vec<_> = value.as_object().unwrap().keys().cloned().collect();
        keys.sort();
        assert_eq!(
            keys,
            vec![
                "cart_position",
                "cart_velocity",
                "pole_angle",
                "pole_angular_velocity",
                "pole_center_position",
                "pole_center_velocity",
                "target_pole_position",
            ]
        );
        assert_eq!(value["target_pole_position"], 0.5);
        Ok(())
    }

    #[test]
    fn test_missing_keys_default_to_zero() -> Result<()> {
        let config: EpisodeConfig = serde_json::from_str(r#"{"initial_pole_angle": 0.1}"#)?;
        assert_eq!(config, EpisodeConfig::new(0.0, 0.1, 0.0));

        let config: EpisodeConfig =
            serde_json::from_str(r#"{"initial_cart_position": null, "target_pole_position": 0.3}"#)?;
        assert_eq!(config, EpisodeConfig::new(0.0, 0.0, 0.3));

        let action: Action = serde_json::from_str("{}")?;
        assert_eq!(action.command, 0.0);
        let action: Action = serde_json::from_str(r#"{"command": null}"#)?;
        assert_eq!(action.command, 0.0);
        Ok(())
    }
}
