use crate::consts::tex::NUM_WHEELS;

/// The six TEx wheels, left side first
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub enum WheelId {
    LeftFront,
    LeftMid,
    LeftBack,
    RightFront,
    RightMid,
    RightBack,
}

impl WheelId {
    pub const ALL: [Self; NUM_WHEELS] = [
        Self::LeftFront,
        Self::LeftMid,
        Self::LeftBack,
        Self::RightFront,
        Self::RightMid,
        Self::RightBack,
    ];

    /// Wheels that can be steered, in sync snapshot order
    pub const STEERABLE: [Self; 4] = [
        Self::LeftFront,
        Self::LeftBack,
        Self::RightFront,
        Self::RightBack,
    ];

    #[must_use]
    pub const fn index(self) -> usize {
        self as usize
    }

    #[must_use]
    pub const fn is_left(self) -> bool {
        matches!(self, Self::LeftFront | Self::LeftMid | Self::LeftBack)
    }

    #[must_use]
    pub const fn is_front(self) -> bool {
        matches!(self, Self::LeftFront | Self::RightFront)
    }

    #[must_use]
    pub const fn is_back(self) -> bool {
        matches!(self, Self::LeftBack | Self::RightBack)
    }
}

/// Per-wheel drive state, mutated every tick
#[derive(Clone, Copy, Debug, Default, PartialEq)]
pub struct WheelState {
    /// Signed rotational speed reported by the host's wheel collider
    pub rpm: f32,
    /// Degrees, positive steers right
    pub steer_angle: f32,
    pub motor_torque: f32,
    pub brake_torque: f32,
}

impl WheelState {
    /// RPM with NaN read as a stopped wheel
    #[must_use]
    pub fn sanitized_rpm(&self) -> f32 {
        if self.rpm.is_nan() { 0.0 } else { self.rpm }
    }
}
