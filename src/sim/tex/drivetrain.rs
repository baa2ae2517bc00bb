use super::{SteerResponse, TexConfig, TexRuntime, WheelState};
use crate::{consts::tex::drive as drive_consts, math::step_towards};

/// Per-wheel torque, brake and steering laws.
///
/// Borrows the vehicle's config and this tick's runtime so wheels can be
/// updated one at a time.
#[derive(Clone, Copy, Debug)]
pub struct Drivetrain<'a> {
    pub config: &'a TexConfig,
    pub runtime: &'a TexRuntime,
}

impl<'a> Drivetrain<'a> {
    #[must_use]
    pub const fn new(config: &'a TexConfig, runtime: &'a TexRuntime) -> Self {
        Self { config, runtime }
    }

    /// Sets `wheel`'s motor and brake torque for the given throttle.
    ///
    /// `speed_limit_ratio` scales the current top speed to the speed the governor
    /// holds the vehicle to.
    pub fn compute_wheel_torque(&self, throttle: f32, speed_limit_ratio: f32, wheel: &mut WheelState) {
        let config = self.config;
        let current_speed = self.runtime.current_speed;

        wheel.brake_torque = 0.0;
        let mut brake_force = 0.0;

        let rpm = wheel.sanitized_rpm().abs().min(config.max_rpm);

        // Torque can't get ahead of the throttle while spinning up
        let rpm_ratio = throttle.abs().min(rpm / config.max_rpm);

        let mut torque = config.torque_curve.get_output(rpm_ratio) * config.stall_torque;
        if throttle < 0.0 {
            torque = -torque;
        }

        // Traction control
        let linear_speed = rpm * drive_consts::RPM_TO_RAD_PER_SEC * config.wheel_radius;
        if throttle.abs() >= drive_consts::TRACTION_CONTROL_MIN_THROTTLE
            && linear_speed > current_speed * drive_consts::TRACTION_CONTROL_SLIP_FACTOR
        {
            brake_force += linear_speed - current_speed;
        }

        // Speed governor
        let target_speed = (self.runtime.top_speed * speed_limit_ratio).abs();
        if current_speed > target_speed {
            torque = 0.0;
            brake_force += if target_speed >= drive_consts::GOVERNOR_PROPORTIONAL_MIN_TARGET {
                (current_speed - target_speed) / target_speed * config.max_brake_force
            } else {
                drive_consts::GOVERNOR_HARD_STOP_STALL_SCALE * config.stall_torque
            };
        }

        wheel.motor_torque = torque;
        self.apply_brake(wheel, brake_force);
    }

    /// Anti-lock rule: a wheel reading exactly 0 RPM while the vehicle is still
    /// moving is not braked.
    pub fn apply_brake(&self, wheel: &mut WheelState, brake_torque: f32) {
        wheel.brake_torque =
            if wheel.rpm == 0.0 && self.runtime.current_speed >= drive_consts::ABS_MIN_SPEED {
                0.0
            } else {
                brake_torque
            };
    }

    /// Full brakes on a single wheel
    pub fn stop_wheel(&self, wheel: &mut WheelState) {
        wheel.motor_torque = 0.0;
        self.apply_brake(
            wheel,
            drive_consts::FULL_STOP_BRAKE_SCALE * self.config.max_brake_force,
        );
    }

    /// Steers `wheel` toward `target_ratio` of the max steering angle.
    ///
    /// With [`SteerResponse::Immediate`] the target angle is written as-is; the
    /// rate-limited angle is only applied with [`SteerResponse::RateLimited`].
    pub fn steer_wheel(&self, wheel: &mut WheelState, target_ratio: f32, tick_time: f32) {
        let config = self.config;
        let ratio = target_ratio.abs().min(1.0);

        let mut target_angle = config.max_steering_angle * ratio;
        if target_ratio < 0.0 {
            target_angle = -target_angle;
        }

        let rate_limited_angle = step_towards(
            wheel.steer_angle,
            target_angle,
            config.steering_speed * ratio * tick_time,
            drive_consts::STEER_EPSILON,
        );

        let steer_angle = match config.steer_response {
            SteerResponse::Immediate => target_angle,
            SteerResponse::RateLimited => rate_limited_angle,
        };

        wheel.steer_angle = steer_angle.clamp(-config.max_steering_angle, config.max_steering_angle);
    }
}

/// Open differential: redistributes an axle's summed motor torque by each
/// wheel's share of the summed RPM. Total torque is preserved.
pub fn balance(a: &mut WheelState, b: &mut WheelState) {
    let total_torque = a.motor_torque + b.motor_torque;

    let rpm_a = a.sanitized_rpm();
    let rpm_b = b.sanitized_rpm();
    let total_rpm = rpm_a + rpm_b;

    let (ratio_a, ratio_b) = if total_rpm.abs() <= drive_consts::DIFFERENTIAL_EVEN_SPLIT_RPM {
        (0.5, 0.5)
    } else {
        (rpm_a / total_rpm, rpm_b / total_rpm)
    };

    a.motor_torque = total_torque * ratio_a;
    b.motor_torque = total_torque * ratio_b;
}
