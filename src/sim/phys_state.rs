use std::fmt::Display;

use glam::{Mat3A, Vec3A};

/// Rigid body state read from the host at the start of every tick.
///
/// Axes follow the rotation matrix columns: X is forward, Y is right, Z is up.
#[derive(Clone, Copy, Debug, PartialEq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct BodyState {
    pub pos: Vec3A,
    pub rot_mat: Mat3A,
    pub vel: Vec3A,
    pub ang_vel: Vec3A,
    pub mass: f32,
}

impl Default for BodyState {
    fn default() -> Self {
        Self::DEFAULT
    }
}

impl BodyState {
    pub const DEFAULT: Self = Self {
        pos: Vec3A::ZERO,
        rot_mat: Mat3A::IDENTITY,
        vel: Vec3A::ZERO,
        ang_vel: Vec3A::ZERO,
        mass: 1.0,
    };

    #[must_use]
    pub const fn get_forward_dir(&self) -> Vec3A {
        self.rot_mat.x_axis
    }

    #[must_use]
    pub const fn get_right_dir(&self) -> Vec3A {
        self.rot_mat.y_axis
    }

    #[must_use]
    pub const fn get_up_dir(&self) -> Vec3A {
        self.rot_mat.z_axis
    }

    /// Speed along the body's forward axis, negative when reversing
    #[must_use]
    pub fn forward_speed(&self) -> f32 {
        self.vel.dot(self.get_forward_dir())
    }

    /// Heading around world up, in radians
    #[must_use]
    pub fn yaw(&self) -> f32 {
        let forward = self.get_forward_dir();
        forward.y.atan2(forward.x)
    }

    /// Rotation with pitch and roll removed, keeping the heading
    #[must_use]
    pub fn yaw_only_rot(&self) -> Mat3A {
        Mat3A::from_rotation_z(self.yaw())
    }

    /// Pitch of the nose below the horizon, in degrees (negative when pointing up)
    #[must_use]
    pub fn nose_pitch_below_horizon_deg(&self) -> f32 {
        (-self.get_forward_dir().z).clamp(-1.0, 1.0).asin().to_degrees()
    }
}

impl Display for BodyState {
    fn fmt(&self, f: &mut std::fmt::Formatter) -> std::fmt::Result {
        f.write_str("BodyState {")?;
        f.write_fmt(format_args!("\n\tpos: {}", self.pos))?;
        f.write_fmt(format_args!("\n\trot_mat: {}", self.rot_mat))?;
        f.write_fmt(format_args!("\n\tvel: {}", self.vel))?;
        f.write_fmt(format_args!("\n\tang_vel: {}", self.ang_vel))?;
        f.write_fmt(format_args!("\n\tmass: {}", self.mass))?;
        f.write_str("}")
    }
}
