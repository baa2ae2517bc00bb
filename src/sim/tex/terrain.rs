use super::{TexConfig, TexRuntime};
use crate::{
    BodyState, LayerMask, Raycaster, consts::tex::terrain as terrain_consts, math::rotate_towards,
};
use glam::Vec3A;
use log::{trace, warn};

/// Outcome of this tick's terrain probes
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq)]
pub enum TerrainVerdict {
    /// Terrain testing is off, or the driver isn't asking to move
    #[default]
    Unchecked,
    /// Ground found ahead of every probe
    Clear,
    /// A probe found no ground nearby, speed is capped
    Caution,
    /// A probe found a drop right ahead
    EmergencyStop,
}

/// Probes the ground in the direction the driver is asking to go, lowering
/// `runtime.top_speed` (and raising `runtime.emergency_stop`) near drops.
///
/// `throttle_input` is the raw lever position, `front_steer_angle` the left front
/// wheel's angle in degrees.
pub fn check_terrain<R: Raycaster + ?Sized>(
    config: &TexConfig,
    runtime: &mut TexRuntime,
    body: &BodyState,
    throttle_input: f32,
    front_steer_angle: f32,
    raycaster: &R,
) -> TerrainVerdict {
    runtime.emergency_stop = false;

    let pitch_below_horizon = body.nose_pitch_below_horizon_deg();
    let probes = &config.terrain_probes;

    let (heading, origins) = if throttle_input > 0.0
        && pitch_below_horizon >= -terrain_consts::MAX_PROBE_PITCH_DEG
    {
        (body.get_forward_dir(), [probes.front_left, probes.front_right])
    } else if throttle_input < 0.0 && pitch_below_horizon <= terrain_consts::MAX_PROBE_PITCH_DEG {
        (-body.get_forward_dir(), [probes.back_left, probes.back_right])
    } else {
        return TerrainVerdict::Unchecked;
    };

    let warning_angle = terrain_consts::WARNING_ANGLE_DEG.to_radians();
    let stop_angle = terrain_consts::STOP_ANGLE_DEG.to_radians();
    let warning_distance = terrain_consts::GROUND_CLEARANCE / warning_angle.sin();
    let stop_distance = terrain_consts::GROUND_CLEARANCE / stop_angle.sin();

    let steer_angle = front_steer_angle.to_radians();
    let down = -body.get_up_dir();
    let right = body.get_right_dir();

    let probe_dir = |pitch: f32| -> Vec3A {
        let dir = rotate_towards(heading, down, pitch);
        rotate_towards(dir, right, steer_angle).normalize()
    };
    let warning_dir = probe_dir(warning_angle);
    let stop_dir = probe_dir(stop_angle);

    runtime.top_speed = config.max_speed;
    let mut verdict = TerrainVerdict::Clear;

    for local_origin in origins {
        let origin = body.pos + body.rot_mat * local_origin;

        if let Some(hit) = raycaster.raycast(origin, warning_dir, warning_distance, LayerMask::ALL) {
            trace!("Terrain probe at {origin} found ground {} ahead", hit.distance);
            continue;
        }

        runtime.top_speed = config.max_speed * terrain_consts::CAUTION_SPEED_SCALE;
        verdict = TerrainVerdict::Caution;

        if raycaster
            .raycast(origin, stop_dir, stop_distance, LayerMask::ALL)
            .is_none()
        {
            warn!("No ground under terrain probe at {origin}, emergency stop");
            runtime.top_speed = 0.0;
            runtime.emergency_stop = true;
            return TerrainVerdict::EmergencyStop;
        }
    }

    verdict
}
