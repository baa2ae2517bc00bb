use glam::{Quat, Vec2, Vec3, Vec3A};

/// `x³`, used on stick inputs to give finer control around the center
#[must_use]
pub fn cube(x: f32) -> f32 {
    x * x * x
}

/// Limits a 2D stick input to the unit disc, keeping its direction.
///
/// A zero-length input stays zero.
#[must_use]
pub fn clamp_to_unit_disc(input: Vec2) -> Vec2 {
    let magnitude = input.length().clamp(0.0, 1.0);
    input.normalize_or_zero() * magnitude
}

/// Moves `current` toward `target` by a fixed `step`, snapping once within `epsilon`.
///
/// The step is not shortened near the target, so a step larger than `epsilon`
/// can overshoot and settle on the other side on the next call.
#[must_use]
pub fn step_towards(current: f32, target: f32, step: f32, epsilon: f32) -> f32 {
    let diff = target - current;
    if diff > epsilon {
        current + step
    } else if diff < -epsilon {
        current - step
    } else {
        target
    }
}

/// Rotates the direction `current` toward `target` by at most `max_radians`.
///
/// Negative angles rotate away from `target`. Reaching `target` returns it exactly.
#[must_use]
pub fn rotate_towards(current: Vec3A, target: Vec3A, max_radians: f32) -> Vec3A {
    let angle = current.angle_between(target);
    if angle <= max_radians {
        return target;
    }

    let Some(axis) = current.cross(target).try_normalize() else {
        return current;
    };

    Quat::from_axis_angle(Vec3::from(axis), max_radians) * current
}
