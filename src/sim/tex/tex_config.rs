use crate::{LinearPieceCurve, TexError};
use glam::Vec3A;

/// Largest steering angle the TEx suspension allows, in degrees
pub const STEERING_ANGLE_LIMIT: f32 = 29.0;

/// What [`Drivetrain::steer_wheel`](super::Drivetrain::steer_wheel) writes to the wheel
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub enum SteerResponse {
    /// The target angle is applied in a single tick
    #[default]
    Immediate,
    /// The angle approaches the target at `steering_speed * |ratio|` degrees per second
    RateLimited,
}

/// Body-local ray origins used by the terrain check
#[derive(Clone, Copy, Debug, PartialEq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct TerrainProbes {
    pub front_left: Vec3A,
    pub front_right: Vec3A,
    pub back_left: Vec3A,
    pub back_right: Vec3A,
}

impl Default for TerrainProbes {
    fn default() -> Self {
        Self::DEFAULT
    }
}

impl TerrainProbes {
    pub const DEFAULT: Self = Self {
        front_left: Vec3A::new(2.5, -1.2, 0.0),
        front_right: Vec3A::new(2.5, 1.2, 0.0),
        back_left: Vec3A::new(-2.5, -1.2, 0.0),
        back_right: Vec3A::new(-2.5, 1.2, 0.0),
    };
}

/// Tunables of the TEx, immutable once the vehicle is built
#[derive(Clone, Debug, PartialEq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
#[cfg_attr(feature = "serde", serde(default))]
pub struct TexConfig {
    /// Unloaded RPM of the motors
    pub max_rpm: f32,
    /// Absolute top speed, in m/s
    pub max_speed: f32,
    /// Motor torque at 0 RPM, in Nm
    pub stall_torque: f32,
    /// In Nm
    pub max_brake_force: f32,
    /// In degrees, at most [`STEERING_ANGLE_LIMIT`]
    pub max_steering_angle: f32,
    /// In degrees per second at full deflection
    pub steering_speed: f32,
    /// Back wheels counter-steer for tight turns
    pub four_wheel_steering: bool,
    pub steer_response: SteerResponse,
    /// Maps `rpm / max_rpm` to a fraction of `stall_torque`
    pub torque_curve: LinearPieceCurve,
    pub wheel_radius: f32,
    /// Probe the ground ahead and limit speed near drops
    pub terrain_test: bool,
    pub terrain_probes: TerrainProbes,
}

impl Default for TexConfig {
    fn default() -> Self {
        Self {
            max_rpm: 16000.0,
            max_speed: 15.0,
            stall_torque: 3000.0,
            max_brake_force: 5000.0,
            max_steering_angle: 25.0,
            steering_speed: 30.0,
            four_wheel_steering: false,
            steer_response: SteerResponse::Immediate,
            torque_curve: LinearPieceCurve::stall_falloff(),
            wheel_radius: 0.5,
            terrain_test: false,
            terrain_probes: TerrainProbes::DEFAULT,
        }
    }
}

impl TexConfig {
    pub fn validate(&self) -> Result<(), TexError> {
        fn check(
            field: &'static str,
            value: f32,
            ok: bool,
            reason: &'static str,
        ) -> Result<(), TexError> {
            if value.is_finite() && ok {
                Ok(())
            } else {
                Err(TexError::config(field, value, reason))
            }
        }

        check("max_rpm", self.max_rpm, self.max_rpm > 0.0, "must be positive")?;
        check("max_speed", self.max_speed, self.max_speed >= 0.0, "must not be negative")?;
        check(
            "stall_torque",
            self.stall_torque,
            self.stall_torque >= 0.0,
            "must not be negative",
        )?;
        check(
            "max_brake_force",
            self.max_brake_force,
            self.max_brake_force >= 0.0,
            "must not be negative",
        )?;
        check(
            "max_steering_angle",
            self.max_steering_angle,
            (0.0..=STEERING_ANGLE_LIMIT).contains(&self.max_steering_angle),
            "must be within [0, 29] degrees",
        )?;
        check(
            "steering_speed",
            self.steering_speed,
            self.steering_speed >= 0.0,
            "must not be negative",
        )?;
        check(
            "wheel_radius",
            self.wheel_radius,
            self.wheel_radius > 0.0,
            "must be positive",
        )?;

        self.torque_curve.validate_torque_curve()
    }
}
