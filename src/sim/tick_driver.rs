use crate::TexError;

/// Fixed-timestep scheduler.
///
/// Variable frame time goes in through [`TickDriver::advance`], whole physics ticks
/// come out. Models are then stepped once per tick with [`TickDriver::tick_time`].
#[derive(Clone, Debug)]
pub struct TickDriver {
    tick_time: f32,
    accumulator: f32,
    tick_count: u64,
}

impl TickDriver {
    /// Frame time beyond this many ticks is dropped instead of simulated
    pub const MAX_TICKS_PER_FRAME: u32 = 8;

    pub fn new(tick_rate: u8) -> Result<Self, TexError> {
        if !(15..=120).contains(&tick_rate) {
            return Err(TexError::InvalidTickRate(tick_rate));
        }

        Ok(Self {
            tick_time: 1.0 / f32::from(tick_rate),
            accumulator: 0.0,
            tick_count: 0,
        })
    }

    #[must_use]
    pub const fn tick_time(&self) -> f32 {
        self.tick_time
    }

    #[must_use]
    pub const fn tick_count(&self) -> u64 {
        self.tick_count
    }

    /// Adds `frame_time` seconds and returns how many ticks are now due.
    ///
    /// The returned ticks still have to be run with [`TickDriver::step`].
    pub fn advance(&mut self, frame_time: f32) -> u32 {
        self.accumulator += frame_time.max(0.0);

        let mut ticks = 0;
        while self.accumulator >= self.tick_time && ticks < Self::MAX_TICKS_PER_FRAME {
            self.accumulator -= self.tick_time;
            ticks += 1;
        }

        if ticks == Self::MAX_TICKS_PER_FRAME {
            self.accumulator = self.accumulator.min(self.tick_time);
        }

        ticks
    }

    /// Runs `ticks` fixed ticks, handing each the tick index and tick time
    pub fn step<F: FnMut(u64, f32)>(&mut self, ticks: u32, mut tick: F) {
        for _ in 0..ticks {
            tick(self.tick_count, self.tick_time);
            self.tick_count += 1;
        }
    }

    /// Advances by `frame_time` and runs every tick that came due
    pub fn run_frame<F: FnMut(u64, f32)>(&mut self, frame_time: f32, tick: F) -> u32 {
        let ticks = self.advance(frame_time);
        self.step(ticks, tick);
        ticks
    }
}
