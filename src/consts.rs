//! Fixed constants of the TEx drivetrain and the navigator chair.
//!
//! Units follow the host engine: distances in meters, speeds in m/s,
//! torques in Nm and angles in degrees unless the name says otherwise.

/// World gravity along Z (up)
pub const GRAVITY_Z: f32 = -9.81;

/// m/s to km/h
pub const MS_TO_KMH: f32 = 3.6;

pub mod tex {
    pub const NUM_WHEELS: usize = 6;

    pub mod drive {
        /// Factor applied to wheel RPM when estimating the wheel's linear speed.
        ///
        /// NOTE: this is actually the rad/s -> RPM factor, applied the other way around.
        pub const RPM_TO_RAD_PER_SEC: f32 = 9.5493;

        /// Throttle magnitude at which traction control starts watching for slip
        pub const TRACTION_CONTROL_MIN_THROTTLE: f32 = 0.5;
        /// Wheel speed has to exceed the vehicle speed by this factor to count as slipping
        pub const TRACTION_CONTROL_SLIP_FACTOR: f32 = 500.0;

        /// Below this target speed the governor brakes with a fixed penalty instead
        pub const GOVERNOR_PROPORTIONAL_MIN_TARGET: f32 = 1.0;
        /// Governor penalty near a zero target speed, in multiples of stall torque
        pub const GOVERNOR_HARD_STOP_STALL_SCALE: f32 = 2.0;

        /// Vehicle speed above which a zero-RPM wheel is not braked
        pub const ABS_MIN_SPEED: f32 = 5.0;

        /// Full stop brake torque, in multiples of max brake force
        pub const FULL_STOP_BRAKE_SCALE: f32 = 1.5;

        /// Summed axle RPM at or below which the differential splits torque evenly
        pub const DIFFERENTIAL_EVEN_SPLIT_RPM: f32 = 2.0;

        /// Angles closer than this are considered equal when steering
        pub const STEER_EPSILON: f32 = 0.001;
    }

    pub mod terrain {
        /// Probe ray pitch below the heading for the slow-down check
        pub const WARNING_ANGLE_DEG: f32 = 15.0;
        /// Probe ray pitch below the heading for the emergency stop check
        pub const STOP_ANGLE_DEG: f32 = 65.0;
        /// Expected ground distance below the probe points
        pub const GROUND_CLEARANCE: f32 = 3.0;
        /// Terrain is only probed while the nose is within this pitch of the horizon
        pub const MAX_PROBE_PITCH_DEG: f32 = 25.0;
        /// Top speed while a warning probe misses, as a fraction of max speed
        pub const CAUTION_SPEED_SCALE: f32 = 0.1;
    }

    pub mod audio {
        pub const MIN_MOTOR_PITCH: f32 = 0.8;
        pub const MAX_MOTOR_PITCH: f32 = 1.2;
        pub const MAX_WHEEL_SOUND_CHANCE: f32 = 0.5;
        /// The gravel cue fires when the per-frame roll lands on this value
        pub const WHEEL_SOUND_ROLL: u32 = 6;
    }

    /// RPM to degrees per second for the wheel spin visuals
    pub const RPM_TO_SPIN_DEG: f32 = -6.0;
}

pub mod chair {
    pub const NUM_THRUSTERS: usize = 4;

    /// Ground ray length, in multiples of max height
    pub const GROUND_RAY_HEIGHT_SCALE: f32 = 1.5;
    /// Above this altitude (in multiples of max height) ground hits are ignored
    pub const GROUND_FOLLOW_CEILING_SCALE: f32 = 1.2;

    pub const UP_RATIO_MIN_GROUNDED: f32 = -0.75;
    pub const UP_RATIO_MIN_UNGROUNDED: f32 = -0.5;
    pub const UP_RATIO_MAX: f32 = 1.0;
    /// Up ratio used when asked to land
    pub const UP_RATIO_DESCEND: f32 = -0.75;
    /// Lift scale per unit of up ratio without a ground reference
    pub const UNGROUNDED_LIFT_SCALE: f32 = 0.5;

    /// Fraction of max speed / max turning angle gained per second
    pub const ACCEL_RATIO: f32 = 0.5;
    pub const RATE_EPSILON: f32 = 0.001;

    pub const LEAN_FORWARD_MAX_DEG: f32 = 15.0;
    pub const LEAN_SIDE_MAX_DEG: f32 = 25.0;

    /// Hit distance at which a landing chair counts as parked
    pub const PARKED_HEIGHT: f32 = 0.65;

    pub mod thrusters {
        pub const MAX_FORWARD_ANGLE_DEG: f32 = 45.0;
        pub const MAX_TURNING_ANGLE_DEG: f32 = 35.0;

        pub const PARTICLE_BASE_SPEED: f32 = 0.3;
        pub const PARTICLE_UP_SPEED: f32 = 0.05;
        pub const PARTICLE_FORWARD_SPEED: f32 = 0.2;
        pub const PARTICLE_TURNING_SPEED: f32 = 0.2;
        /// Particle speed fades out below this height
        pub const PARTICLE_FADE_HEIGHT: f32 = 4.0;
    }
}
