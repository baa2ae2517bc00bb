use super::WheelId;

/// Fire-and-forget audio / VFX triggers
#[derive(Clone, Copy, Debug, PartialEq)]
pub enum Cue {
    MotorOn,
    MotorOff,
    /// Retune the motor loop from the relative speed change since the last frame
    MotorPitch { change: f32, min: f32, max: f32 },
    /// Gravel crunch from a single wheel
    WheelGravel(WheelId),
    ThrusterOn(u8),
    ThrusterOff(u8),
    ThrusterPitch {
        thruster: u8,
        change: f32,
        min: f32,
        max: f32,
    },
    ParticlesStart,
    /// Stop emitting, letting live particles time out
    ParticlesStop,
}

/// Receiver of [`Cue`]s, implemented by the host's audio and VFX layer
pub trait CueSink {
    fn notify(&mut self, cue: Cue);
}

/// Records every cue, handy for tests and replays
impl CueSink for Vec<Cue> {
    fn notify(&mut self, cue: Cue) {
        self.push(cue);
    }
}

/// Drops every cue
#[derive(Clone, Copy, Debug, Default)]
pub struct NoCues;

impl CueSink for NoCues {
    fn notify(&mut self, _cue: Cue) {}
}
