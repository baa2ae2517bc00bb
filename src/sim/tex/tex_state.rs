use super::{TerrainVerdict, WheelState};
use crate::{BodyMode, consts::tex::NUM_WHEELS};

/// Speed bookkeeping, recomputed at the start of every tick
#[derive(Clone, Copy, Debug, Default, PartialEq)]
pub struct TexRuntime {
    /// Magnitude of the body velocity
    pub current_speed: f32,
    /// Current speed cap, never above the configured max speed
    pub top_speed: f32,
    /// Set by the terrain check, forces a full stop at the end of the tick
    pub emergency_stop: bool,
}

/// Everything the host applies after a TEx tick
#[derive(Clone, Copy, Debug, PartialEq)]
pub struct TexOutput {
    /// Indexed by [`WheelId::index`](super::WheelId::index)
    pub wheels: [WheelState; NUM_WHEELS],
    pub body_mode: BodyMode,
    pub runtime: TexRuntime,
    pub terrain: TerrainVerdict,
}

/// Speedometer values
#[derive(Clone, Copy, Debug, Default, PartialEq)]
pub struct TexHud {
    /// Rounded to whole km/h
    pub speed_kmh: f32,
    /// Fill of the forward speed bar, `0..=1` while under max speed
    pub forward_fill: f32,
    /// Fill of the reverse speed bar
    pub backward_fill: f32,
}

/// Per-frame presentation values
#[derive(Clone, Copy, Debug, Default, PartialEq)]
pub struct TexFrame {
    pub hud: TexHud,
    /// Degrees each wheel mesh spins this frame
    pub wheel_spin_deltas: [f32; NUM_WHEELS],
    /// Local steer rotation of each wheel mesh, mirrored on the left side
    pub wheel_steer_visuals: [f32; NUM_WHEELS],
}
