use glam::{Quat, Vec2, Vec3, Vec3A};
use log::{debug, trace, warn};

use super::{ChairConfig, ChairControls, ChairFrame, ChairHud, FlightOutput, HoverState};
use crate::{
    Authority, BodyState, ChairSync, Cue, CueSink, LayerMask, Raycaster, SyncPayload, TexError,
    consts::chair::{self as chair_consts, NUM_THRUSTERS, thrusters as thruster_consts},
    math::{clamp_to_unit_disc, cube, rotate_towards, step_towards},
};

/// The hovering navigator chair
pub struct NavigatorChair {
    config: ChairConfig,
    controls: ChairControls,
    target_height: f32,
    hover: HoverState,
}

impl NavigatorChair {
    pub fn new(config: ChairConfig) -> Result<Self, TexError> {
        config
            .validate()
            .inspect_err(|err| warn!("Rejected chair config: {err}"))?;

        Ok(Self {
            config,
            controls: ChairControls::default(),
            target_height: 0.0,
            hover: HoverState::default(),
        })
    }

    #[must_use]
    pub const fn config(&self) -> &ChairConfig {
        &self.config
    }

    #[must_use]
    pub const fn hover(&self) -> &HoverState {
        &self.hover
    }

    #[must_use]
    pub const fn target_height(&self) -> f32 {
        self.target_height
    }

    pub const fn set_controls(&mut self, controls: ChairControls) {
        self.controls = controls;
    }

    /// Raises or lowers the requested hover height, within `[0, max_height]`
    pub fn adjust_altitude(&mut self, delta: f32) {
        self.target_height = (self.target_height + delta).clamp(0.0, self.config.max_height);
    }

    /// The chair was put away: land it the next time it is flown
    pub const fn disable(&mut self) {
        self.target_height = 0.0;
    }

    pub fn set_thruster_on(&mut self, on: bool, thruster: u8, cues: &mut impl CueSink) {
        if on == self.hover.thrusters_on {
            return;
        }

        self.hover.thrusters_on = on;
        cues.notify(if on {
            Cue::ThrusterOn(thruster)
        } else {
            Cue::ThrusterOff(thruster)
        });
    }

    fn set_particles(&mut self, active: bool, cues: &mut impl CueSink) {
        if active == self.hover.particles_active {
            return;
        }

        self.hover.particles_active = active;
        if active {
            cues.notify(Cue::ParticlesStart);
        } else {
            cues.notify(Cue::ParticlesStop);
            for thruster in 0..NUM_THRUSTERS as u8 {
                self.set_thruster_on(false, thruster, cues);
            }
        }
    }

    /// Fixed-rate update, flying toward the current target height
    pub fn step<R: Raycaster + ?Sized>(
        &mut self,
        tick_time: f32,
        body: &BodyState,
        authority: Authority,
        raycaster: &R,
        cues: &mut impl CueSink,
    ) -> FlightOutput {
        if !authority.is_authoritative() {
            return FlightOutput {
                body_mode: authority.body_mode(),
                level_rotation: None,
                lift_force: Vec3A::ZERO,
                forward_force: Vec3A::ZERO,
                yaw_delta: 0.0,
                seat_rotation: Quat::IDENTITY,
                hover: self.hover,
            };
        }

        let input = Vec2::new(self.controls.turning, self.controls.forward);
        self.handle_flight(input, self.target_height, tick_time, body, raycaster, cues)
    }

    /// Computes lift, thrust and yaw for one tick.
    ///
    /// `input` is `(turning, forward)`.
    pub fn handle_flight<R: Raycaster + ?Sized>(
        &mut self,
        input: Vec2,
        target_height: f32,
        tick_time: f32,
        body: &BodyState,
        raycaster: &R,
        cues: &mut impl CueSink,
    ) -> FlightOutput {
        let config = self.config;

        // Keep only the heading
        let level_rotation =
            (!body.get_up_dir().abs_diff_eq(Vec3A::Z, 1e-5)).then(|| body.yaw_only_rot());
        let rot_mat = level_rotation.unwrap_or(body.rot_mat);
        let forward_dir = rot_mat.x_axis;

        let input = clamp_to_unit_disc(input);
        let forward_input = cube(input.y);
        let turning_input = cube(input.x);

        let mut lift = body.mass * -config.gravity_z;

        let ground_ray_length = config.max_height * chair_consts::GROUND_RAY_HEIGHT_SCALE;
        let layer_mask = LayerMask::all_except(config.no_collision_layer);
        let ground_hit = raycaster
            .raycast(body.pos, -Vec3A::Z, ground_ray_length, layer_mask)
            .filter(|_| body.pos.z <= config.max_height * chair_consts::GROUND_FOLLOW_CEILING_SCALE);

        self.hover.grounded = ground_hit.is_some();
        if let Some(hit) = ground_hit {
            self.hover.current_height = hit.distance;
            self.set_particles(true, cues);

            let up_ratio = if target_height != 0.0 {
                ((target_height - hit.distance) / target_height)
                    .clamp(chair_consts::UP_RATIO_MIN_GROUNDED, chair_consts::UP_RATIO_MAX)
            } else {
                chair_consts::UP_RATIO_DESCEND
            };

            self.hover.up_ratio = up_ratio;
            lift *= 1.0 + up_ratio;

            if hit.distance <= chair_consts::PARKED_HEIGHT && target_height == 0.0 {
                self.set_particles(false, cues);
            }
        } else {
            // No ground reference, fall back to altitude with a gentler trim
            let current_height = body.pos.z;
            self.hover.current_height = current_height;
            self.set_particles(true, cues);

            let up_ratio = if target_height != 0.0 {
                ((target_height - current_height) / target_height)
                    .clamp(chair_consts::UP_RATIO_MIN_UNGROUNDED, chair_consts::UP_RATIO_MAX)
            } else if current_height <= 0.0 {
                chair_consts::UP_RATIO_MAX
            } else {
                chair_consts::UP_RATIO_DESCEND
            };

            self.hover.up_ratio = up_ratio;
            lift *= 1.0 + chair_consts::UNGROUNDED_LIFT_SCALE * up_ratio;
        }

        // Thrust
        let forward_velocity = body.vel.dot(forward_dir);
        let target_forward = config.max_speed * forward_input;
        self.hover.current_forward = step_towards(
            self.hover.current_forward,
            target_forward,
            config.max_speed * chair_consts::ACCEL_RATIO * tick_time,
            chair_consts::RATE_EPSILON,
        )
        .clamp(-config.max_speed, config.max_speed);
        let forward_force = forward_dir * (self.hover.current_forward * body.mass);

        // Yaw
        let target_turning = config.max_turning_angle * turning_input;
        self.hover.current_turning = step_towards(
            self.hover.current_turning,
            target_turning,
            config.max_turning_angle * chair_consts::ACCEL_RATIO * tick_time,
            chair_consts::RATE_EPSILON,
        )
        .clamp(-config.max_turning_angle, config.max_turning_angle);

        let seat_rotation = seat_lean(forward_velocity, target_turning, config.max_speed);

        trace!(
            "Chair tick: height {:.2} -> {target_height:.2}, up ratio {:.2}, grounded {}",
            self.hover.current_height, self.hover.up_ratio, self.hover.grounded
        );

        FlightOutput {
            body_mode: Authority::Authoritative.body_mode(),
            level_rotation,
            lift_force: Vec3A::Z * lift,
            forward_force,
            yaw_delta: self.hover.current_turning,
            seat_rotation,
            hover: self.hover,
        }
    }

    /// Snapshot to stream to remote peers
    #[must_use]
    pub const fn chair_sync(&self) -> ChairSync {
        ChairSync {
            current_forward: self.hover.current_forward,
            current_turning: self.hover.current_turning,
        }
    }

    /// Applies a snapshot received from the authoritative peer
    pub fn apply_chair_sync(&mut self, bytes: &[u8]) -> Result<(), TexError> {
        let sync = ChairSync::from_bytes(bytes)?;
        self.hover.current_forward = sync.current_forward;
        self.hover.current_turning = sync.current_turning;
        Ok(())
    }

    /// Variable-rate update: thrusters, particles, audio and the altitude display
    pub fn frame_update(&mut self, cues: &mut impl CueSink) -> ChairFrame {
        let config = self.config;
        let hover = self.hover;

        let forward_ratio = ratio(hover.current_forward, config.max_speed);
        let turning_ratio = ratio(hover.current_turning, config.max_turning_angle);

        let left_angle = thruster_consts::MAX_FORWARD_ANGLE_DEG * forward_ratio
            + thruster_consts::MAX_TURNING_ANGLE_DEG * turning_ratio;
        let right_angle = thruster_consts::MAX_FORWARD_ANGLE_DEG * forward_ratio
            - thruster_consts::MAX_TURNING_ANGLE_DEG * turning_ratio;

        let particle_start_speed = hover.particles_active.then(|| {
            let speed = thruster_consts::PARTICLE_BASE_SPEED
                + thruster_consts::PARTICLE_UP_SPEED * hover.up_ratio
                + thruster_consts::PARTICLE_FORWARD_SPEED * forward_ratio.abs()
                + thruster_consts::PARTICLE_TURNING_SPEED * turning_ratio.abs();
            speed * (hover.current_height / thruster_consts::PARTICLE_FADE_HEIGHT).clamp(0.0, 1.0)
        });

        if hover.thrusters_on {
            let change = ratio(hover.up_ratio - hover.previous_up_ratio, hover.up_ratio);
            for thruster in 0..NUM_THRUSTERS as u8 {
                cues.notify(Cue::ThrusterPitch {
                    thruster,
                    change: change.abs(),
                    min: config.min_thruster_pitch,
                    max: config.max_thruster_pitch,
                });
            }
            self.hover.previous_up_ratio = hover.up_ratio;
        }

        let display_max = hover
            .current_height
            .max(self.target_height)
            .max(config.max_height);
        let hud = ChairHud {
            current_height: hover.current_height,
            current_height_fill: hover.current_height / display_max,
            target_height_fill: self.target_height / display_max,
        };

        debug!("Chair thrusters: left {left_angle:.1}, right {right_angle:.1}");

        ChairFrame {
            hud,
            thruster_angles: [left_angle, right_angle, left_angle, right_angle],
            particle_start_speed,
        }
    }
}

/// `value / max`, or 0 when `max` is 0
fn ratio(value: f32, max: f32) -> f32 {
    if max == 0.0 { 0.0 } else { value / max }
}

/// Tilts the seat forward with speed and sideways into turns
fn seat_lean(forward_velocity: f32, target_turning: f32, max_speed: f32) -> Quat {
    let lean_forward = ratio(forward_velocity, max_speed).clamp(-1.0, 1.0);
    let lean_side = (target_turning * lean_forward).clamp(-1.0, 1.0);

    let lean_forward = lean_forward * chair_consts::LEAN_FORWARD_MAX_DEG.to_radians();
    let lean_side = lean_side * chair_consts::LEAN_SIDE_MAX_DEG.to_radians();

    // Local axes: X forward, Y right, Z up
    let local_up = rotate_towards(Vec3A::Z, Vec3A::Y, lean_side);
    let local_up = rotate_towards(local_up, Vec3A::X, lean_forward);

    Quat::from_rotation_arc(Vec3::Z, Vec3::from(local_up).normalize())
}

impl Default for NavigatorChair {
    fn default() -> Self {
        Self {
            config: ChairConfig::DEFAULT,
            controls: ChairControls::default(),
            target_height: 0.0,
            hover: HoverState::default(),
        }
    }
}
