use crate::{TexError, consts::GRAVITY_Z};

/// Tunables of the navigator chair
#[derive(Clone, Copy, Debug, PartialEq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
#[cfg_attr(feature = "serde", serde(default))]
pub struct ChairConfig {
    /// In m/s
    pub max_speed: f32,
    /// Yaw applied per tick at full turn, in degrees
    pub max_turning_angle: f32,
    /// Highest selectable hover height, in m
    pub max_height: f32,
    pub min_thruster_pitch: f32,
    pub max_thruster_pitch: f32,
    /// Layer the ground ray ignores (the player's own colliders)
    pub no_collision_layer: u8,
    /// World gravity along Z, negative pulls down
    pub gravity_z: f32,
}

impl Default for ChairConfig {
    fn default() -> Self {
        Self::DEFAULT
    }
}

impl ChairConfig {
    pub const DEFAULT: Self = Self {
        max_speed: 20.0,
        max_turning_angle: 1.0,
        max_height: 30.0,
        min_thruster_pitch: 0.1,
        max_thruster_pitch: 0.3,
        no_collision_layer: 9,
        gravity_z: GRAVITY_Z,
    };

    pub fn validate(&self) -> Result<(), TexError> {
        let checks = [
            ("max_speed", self.max_speed, self.max_speed >= 0.0, "must not be negative"),
            (
                "max_turning_angle",
                self.max_turning_angle,
                self.max_turning_angle >= 0.0,
                "must not be negative",
            ),
            ("max_height", self.max_height, self.max_height > 0.0, "must be positive"),
            (
                "min_thruster_pitch",
                self.min_thruster_pitch,
                self.min_thruster_pitch <= self.max_thruster_pitch,
                "must not exceed max_thruster_pitch",
            ),
            (
                "max_thruster_pitch",
                self.max_thruster_pitch,
                true,
                "must be finite",
            ),
            ("gravity_z", self.gravity_z, true, "must be finite"),
        ];

        for (field, value, ok, reason) in checks {
            if !value.is_finite() || !ok {
                return Err(TexError::config(field, value, reason));
            }
        }

        Ok(())
    }
}
