use fastrand::Rng;
use log::{debug, trace, warn};

use super::{
    Drivetrain, TerrainVerdict, TexConfig, TexControls, TexFrame, TexHud, TexOutput, TexRuntime,
    WheelId, WheelState, balance, check_terrain,
};
use crate::{
    Authority, BodyState, Cue, CueSink, Raycaster, SyncPayload, TexAnimationSync, TexError,
    consts::{
        MS_TO_KMH,
        tex::{NUM_WHEELS, RPM_TO_SPIN_DEG, audio as audio_consts},
    },
    math::cube,
};

/// The six-wheeled rover
pub struct Tex {
    config: TexConfig,
    controls: TexControls,
    runtime: TexRuntime,
    wheels: [WheelState; NUM_WHEELS],
    terrain: TerrainVerdict,
    /// What the wheel meshes show, written locally while authoritative
    animation: TexAnimationSync,
    motor_on: bool,
    previous_speed: f32,
    rng: Rng,
}

impl Tex {
    /// Builds a TEx at rest with its brakes on
    pub fn new(config: TexConfig) -> Result<Self, TexError> {
        Self::new_with_seed(config, fastrand::u64(..))
    }

    /// Like [`Tex::new`], with a fixed seed for the wheel sound rolls
    pub fn new_with_seed(config: TexConfig, seed: u64) -> Result<Self, TexError> {
        config
            .validate()
            .inspect_err(|err| warn!("Rejected TEx config: {err}"))?;

        let mut tex = Self {
            runtime: TexRuntime {
                top_speed: config.max_speed,
                ..Default::default()
            },
            config,
            controls: TexControls::DEFAULT,
            wheels: [WheelState::default(); NUM_WHEELS],
            terrain: TerrainVerdict::Unchecked,
            animation: TexAnimationSync::default(),
            motor_on: false,
            previous_speed: 0.0,
            rng: Rng::with_seed(seed),
        };
        tex.full_stop();

        Ok(tex)
    }

    #[must_use]
    pub const fn config(&self) -> &TexConfig {
        &self.config
    }

    #[must_use]
    pub const fn runtime(&self) -> &TexRuntime {
        &self.runtime
    }

    #[must_use]
    pub const fn wheels(&self) -> &[WheelState; NUM_WHEELS] {
        &self.wheels
    }

    #[must_use]
    pub const fn wheel(&self, id: WheelId) -> &WheelState {
        &self.wheels[id.index()]
    }

    #[must_use]
    pub const fn is_motor_on(&self) -> bool {
        self.motor_on
    }

    pub const fn set_controls(&mut self, controls: TexControls) {
        self.controls = controls;
    }

    /// Feeds the RPM each wheel collider reported after the last physics step
    pub fn set_wheel_rpms(&mut self, rpms: [f32; NUM_WHEELS]) {
        for (wheel, rpm) in self.wheels.iter_mut().zip(rpms) {
            wheel.rpm = rpm;
        }
    }

    /// Starts or stops the motor loop
    pub fn set_motor_on(&mut self, on: bool, cues: &mut impl CueSink) {
        if on == self.motor_on {
            return;
        }

        self.motor_on = on;
        cues.notify(if on { Cue::MotorOn } else { Cue::MotorOff });
    }

    /// Fixed-rate update
    ///
    /// While another peer is authoritative only the speed is tracked, and the body
    /// is reported as kinematic.
    pub fn step<R: Raycaster + ?Sized>(
        &mut self,
        tick_time: f32,
        body: &BodyState,
        authority: Authority,
        raycaster: &R,
    ) -> TexOutput {
        self.runtime.current_speed = body.vel.length();
        if !authority.is_authoritative() {
            return self.output(authority);
        }

        self.runtime.top_speed = self.config.max_speed;
        self.runtime.emergency_stop = false;
        self.terrain = TerrainVerdict::Unchecked;

        if self.config.terrain_test {
            let front_steer_angle = self.wheel(WheelId::LeftFront).steer_angle;
            self.terrain = check_terrain(
                &self.config,
                &mut self.runtime,
                body,
                self.controls.throttle,
                front_steer_angle,
                raycaster,
            );
        }

        let controls = self.controls.clamp();

        if controls.steer_held {
            self.handle_steering(controls.steer, tick_time);
        } else {
            self.reset_steering();
        }

        if controls.throttle_held {
            self.handle_acceleration(controls.throttle);
        } else {
            self.full_stop();
        }

        if self.runtime.emergency_stop {
            self.full_stop();
        }

        trace!(
            "TEx tick: speed {:.2}/{:.2}, terrain {:?}",
            self.runtime.current_speed, self.runtime.top_speed, self.terrain
        );

        self.output(authority)
    }

    fn output(&self, authority: Authority) -> TexOutput {
        TexOutput {
            wheels: self.wheels,
            body_mode: authority.body_mode(),
            runtime: self.runtime,
            terrain: self.terrain,
        }
    }

    /// Drives all six wheels, then lets each axle's differential share the torque
    pub fn handle_acceleration(&mut self, throttle: f32) {
        // Cubic response gives fine control at low throttle
        let acceleration = cube(throttle);

        let drivetrain = Drivetrain::new(&self.config, &self.runtime);
        for wheel in &mut self.wheels {
            drivetrain.compute_wheel_torque(acceleration, throttle, wheel);
        }

        // Left wheels come first, so the halves pair up front, mid and back axles
        let (left_wheels, right_wheels) = self.wheels.split_at_mut(NUM_WHEELS / 2);
        for (left, right) in left_wheels.iter_mut().zip(right_wheels) {
            balance(left, right);
        }
    }

    /// Front wheels steer; with four-wheel steering the back wheels counter-steer
    pub fn handle_steering(&mut self, direction: f32, tick_time: f32) {
        let adjusted = cube(direction);

        let drivetrain = Drivetrain::new(&self.config, &self.runtime);
        for id in WheelId::STEERABLE {
            if id.is_front() {
                drivetrain.steer_wheel(&mut self.wheels[id.index()], adjusted, tick_time);
            } else if self.config.four_wheel_steering {
                drivetrain.steer_wheel(&mut self.wheels[id.index()], -adjusted, tick_time);
            }
        }
    }

    pub fn reset_steering(&mut self) {
        for wheel in &mut self.wheels {
            wheel.steer_angle = 0.0;
        }
    }

    /// Cuts the motors and brakes every wheel
    pub fn full_stop(&mut self) {
        let drivetrain = Drivetrain::new(&self.config, &self.runtime);
        for wheel in &mut self.wheels {
            drivetrain.stop_wheel(wheel);
        }
    }

    /// Snapshot to stream to remote peers
    #[must_use]
    pub fn animation_sync(&self) -> TexAnimationSync {
        TexAnimationSync {
            wheel_rpms: self.wheels.map(|wheel| wheel.rpm),
            steer_angles: WheelId::STEERABLE.map(|id| self.wheel(id).steer_angle),
        }
    }

    /// Applies a snapshot received from the authoritative peer
    pub fn apply_animation_sync(&mut self, bytes: &[u8]) -> Result<(), TexError> {
        self.animation = TexAnimationSync::from_bytes(bytes)?;
        Ok(())
    }

    /// Variable-rate update: audio, speedometer and wheel visuals
    pub fn frame_update(
        &mut self,
        frame_time: f32,
        body: &BodyState,
        authority: Authority,
        cues: &mut impl CueSink,
    ) -> TexFrame {
        if authority.is_authoritative() {
            self.animation = self.animation_sync();
        }

        let current_speed = self.runtime.current_speed;
        if self.motor_on {
            let change = if current_speed == 0.0 {
                0.0
            } else {
                (current_speed - self.previous_speed) / current_speed
            };
            cues.notify(Cue::MotorPitch {
                change,
                min: audio_consts::MIN_MOTOR_PITCH,
                max: audio_consts::MAX_MOTOR_PITCH,
            });
            self.previous_speed = current_speed;

            self.roll_wheel_sounds(cues);
        }

        let fill = current_speed / self.config.max_speed.max(f32::EPSILON);
        let (forward_fill, backward_fill) = if body.forward_speed() >= 0.0 {
            (fill, 0.0)
        } else {
            (0.0, fill)
        };

        let hud = TexHud {
            speed_kmh: (current_speed * MS_TO_KMH).round(),
            forward_fill,
            backward_fill,
        };

        let wheel_spin_deltas = self
            .animation
            .wheel_rpms
            .map(|rpm| rpm * RPM_TO_SPIN_DEG * frame_time);

        let wheel_steer_visuals = WheelId::ALL.map(|id| {
            let angle = self.animation.steer_angle(id);
            if id.is_left() { -angle } else { angle }
        });

        TexFrame {
            hud,
            wheel_spin_deltas,
            wheel_steer_visuals,
        }
    }

    /// Each wheel has a small chance per frame of kicking up gravel
    fn roll_wheel_sounds(&mut self, cues: &mut impl CueSink) {
        for id in WheelId::ALL {
            let wheel_speed = self.wheel(id).rpm / self.config.max_rpm;
            let chance = wheel_speed.clamp(0.0, audio_consts::MAX_WHEEL_SOUND_CHANCE);

            // `chance` truncates to 0, leaving a flat 1-in-100 roll per wheel
            let roll_range = 100 - 100 * (chance as u32);
            if self.rng.u32(0..roll_range) == audio_consts::WHEEL_SOUND_ROLL {
                debug!("Gravel cue on {id:?}");
                cues.notify(Cue::WheelGravel(id));
            }
        }
    }
}
