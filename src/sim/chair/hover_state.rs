use crate::{BodyMode, consts::chair::NUM_THRUSTERS};
use glam::{Mat3A, Quat, Vec3A};

/// Joystick input for one tick, both in `[-1, 1]`
#[derive(Clone, Copy, Debug, Default, PartialEq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct ChairControls {
    /// Positive turns right
    pub turning: f32,
    pub forward: f32,
}

/// Flight state carried between ticks
#[derive(Clone, Copy, Debug, Default, PartialEq)]
pub struct HoverState {
    /// Height above ground, or altitude when no ground was found
    pub current_height: f32,
    /// Rate-limited forward command, in m/s
    pub current_forward: f32,
    /// Rate-limited yaw command, in degrees per tick
    pub current_turning: f32,
    /// Lift trim, clamped to `[-0.75, 1]`
    pub up_ratio: f32,
    /// Whether the last ground ray found ground
    pub grounded: bool,
    pub particles_active: bool,
    pub thrusters_on: bool,
    pub previous_up_ratio: f32,
}

/// Everything the host applies after a chair tick
#[derive(Clone, Copy, Debug, PartialEq)]
pub struct FlightOutput {
    pub body_mode: BodyMode,
    /// Replacement rotation when the body had pitched or rolled
    pub level_rotation: Option<Mat3A>,
    /// World-space lift force
    pub lift_force: Vec3A,
    /// World-space thrust along the chair's heading
    pub forward_force: Vec3A,
    /// Yaw to apply this tick, in degrees
    pub yaw_delta: f32,
    /// Local rotation of the seat, purely cosmetic
    pub seat_rotation: Quat,
    pub hover: HoverState,
}

/// Altitude display
#[derive(Clone, Copy, Debug, Default, PartialEq)]
pub struct ChairHud {
    pub current_height: f32,
    pub current_height_fill: f32,
    pub target_height_fill: f32,
}

/// Per-frame presentation values
#[derive(Clone, Copy, Debug, Default, PartialEq)]
pub struct ChairFrame {
    pub hud: ChairHud,
    /// Pitch of each thruster in degrees: front left, front right, rear left, rear right
    pub thruster_angles: [f32; NUM_THRUSTERS],
    /// Start speed of the thruster particles while they are emitting
    pub particle_start_speed: Option<f32>,
}
