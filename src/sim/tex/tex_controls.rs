use crate::math::clamp_to_unit_disc;
use glam::Vec2;

/// Driver input for one tick.
///
/// `steer` comes from the joystick, `throttle` from the throttle lever.
/// Each only takes effect while its control is held.
#[derive(Clone, Copy, Debug, PartialEq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct TexControls {
    pub steer: f32,
    pub throttle: f32,
    pub steer_held: bool,
    pub throttle_held: bool,
}

impl Default for TexControls {
    fn default() -> Self {
        Self::DEFAULT
    }
}

impl TexControls {
    pub const DEFAULT: Self = Self {
        steer: 0.0,
        throttle: 0.0,
        steer_held: false,
        throttle_held: false,
    };

    /// Both controls held with the given deflections
    #[must_use]
    pub const fn held(steer: f32, throttle: f32) -> Self {
        Self {
            steer,
            throttle,
            steer_held: true,
            throttle_held: true,
        }
    }

    /// Limits `(steer, throttle)` to the unit disc, so full steer and full throttle
    /// together give ~0.707 each
    #[must_use]
    pub fn clamp(mut self) -> Self {
        let v = clamp_to_unit_disc(Vec2::new(self.steer, self.throttle));
        self.steer = v.x;
        self.throttle = v.y;
        self
    }
}
