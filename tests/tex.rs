use approx::assert_relative_eq;
use tex_sim::{
    Authority, BodyMode, BodyState, Cue, Drivetrain, FlatGround, LinearPieceCurve, NoCues,
    SteerResponse, SyncPayload, TerrainVerdict, Tex, TexConfig, TexControls, TexRuntime, WheelId,
    WheelState, balance,
    glam::{Mat3A, Vec3A},
};

const TICK_TIME: f32 = 1.0 / 60.0;

fn body_moving(vel: Vec3A) -> BodyState {
    BodyState {
        pos: Vec3A::new(0.0, 0.0, 1.0),
        vel,
        ..BodyState::DEFAULT
    }
}

fn wheel(rpm: f32) -> WheelState {
    WheelState {
        rpm,
        ..Default::default()
    }
}

fn runtime(current_speed: f32, top_speed: f32) -> TexRuntime {
    TexRuntime {
        current_speed,
        top_speed,
        emergency_stop: false,
    }
}

fn new_tex(config: TexConfig) -> Tex {
    Tex::new_with_seed(config, 42).unwrap()
}

#[test]
fn full_throttle_from_rest_gives_stall_torque() {
    let config = TexConfig::default();
    let stall_torque = config.torque_curve.get_output(0.0) * config.stall_torque;

    let mut tex = new_tex(config);
    tex.set_controls(TexControls::held(0.0, 1.0));
    let output = tex.step(TICK_TIME, &body_moving(Vec3A::ZERO), Authority::Authoritative, &FlatGround::new(0.0));

    assert_eq!(output.body_mode, BodyMode::Dynamic);
    for wheel in output.wheels {
        assert_relative_eq!(wheel.motor_torque, stall_torque);
        assert_eq!(wheel.brake_torque, 0.0);
    }
}

#[test]
fn torque_never_exceeds_stall_torque() {
    let config = TexConfig {
        torque_curve: LinearPieceCurve::new(&[(0.0, 0.4), (0.5, 0.9), (1.0, 1.0)]).unwrap(),
        ..Default::default()
    };
    let limit = config.stall_torque * config.torque_curve.max_output();

    let rpms = [f32::NAN, 0.0, 1.0, -250.0, 8000.0, 16000.0, -1e9, 1e9, f32::INFINITY];
    let throttles = [-1.0, -0.5, -0.01, 0.0, 0.3, 0.75, 1.0];
    let speeds = [0.0, 0.2, 3.0, 14.0, 40.0];

    for speed in speeds {
        let runtime = runtime(speed, config.max_speed);
        let drivetrain = Drivetrain::new(&config, &runtime);
        for rpm in rpms {
            for throttle in throttles {
                let mut wheel = wheel(rpm);
                drivetrain.compute_wheel_torque(throttle, throttle, &mut wheel);
                assert!(
                    wheel.motor_torque.abs() <= limit,
                    "rpm {rpm}, throttle {throttle}, speed {speed}: {}",
                    wheel.motor_torque
                );
            }
        }
    }
}

#[test]
fn nan_rpm_reads_as_stopped_wheel() {
    let config = TexConfig::default();
    let runtime = runtime(0.0, config.max_speed);
    let drivetrain = Drivetrain::new(&config, &runtime);

    let mut nan_wheel = wheel(f32::NAN);
    let mut stopped_wheel = wheel(0.0);
    drivetrain.compute_wheel_torque(1.0, 1.0, &mut nan_wheel);
    drivetrain.compute_wheel_torque(1.0, 1.0, &mut stopped_wheel);

    assert_eq!(nan_wheel.motor_torque, stopped_wheel.motor_torque);
}

#[test]
fn reverse_throttle_negates_torque() {
    let config = TexConfig::default();
    let runtime = runtime(1.0, config.max_speed);
    let drivetrain = Drivetrain::new(&config, &runtime);

    let mut forward = wheel(200.0);
    let mut reverse = wheel(-200.0);
    drivetrain.compute_wheel_torque(0.4, 0.7, &mut forward);
    drivetrain.compute_wheel_torque(-0.4, -0.7, &mut reverse);

    assert!(forward.motor_torque > 0.0);
    assert_relative_eq!(reverse.motor_torque, -forward.motor_torque);
}

#[test]
fn traction_control_brakes_spinning_wheel() {
    let config = TexConfig::default();
    let runtime = runtime(0.5, config.max_speed);
    let drivetrain = Drivetrain::new(&config, &runtime);

    let mut spinning = wheel(1000.0);
    drivetrain.compute_wheel_torque(1.0, 1.0, &mut spinning);

    let linear_speed = 1000.0 * 9.5493 * config.wheel_radius;
    assert_relative_eq!(spinning.brake_torque, linear_speed - 0.5, max_relative = 1e-5);
    assert_relative_eq!(spinning.motor_torque, 0.9375 * config.stall_torque, max_relative = 1e-5);

    // Below half throttle traction control stays out of it
    let mut gentle = wheel(1000.0);
    drivetrain.compute_wheel_torque(0.4, 0.4, &mut gentle);
    assert_eq!(gentle.brake_torque, 0.0);
}

#[test]
fn governor_brakes_proportionally_above_target_speed() {
    let config = TexConfig::default();
    let runtime = runtime(20.0, config.max_speed);
    let drivetrain = Drivetrain::new(&config, &runtime);

    let mut wheel = wheel(100.0);
    drivetrain.compute_wheel_torque(1.0, 1.0, &mut wheel);

    assert_eq!(wheel.motor_torque, 0.0);
    assert_relative_eq!(
        wheel.brake_torque,
        (20.0 - 15.0) / 15.0 * config.max_brake_force,
        max_relative = 1e-5
    );
}

#[test]
fn governor_hard_stops_below_one_meter_per_second_target() {
    let config = TexConfig::default();
    let runtime = runtime(2.0, config.max_speed);
    let drivetrain = Drivetrain::new(&config, &runtime);

    let mut wheel = wheel(100.0);
    drivetrain.compute_wheel_torque(0.05, 0.05, &mut wheel);

    assert_eq!(wheel.motor_torque, 0.0);
    assert_relative_eq!(wheel.brake_torque, 2.0 * config.stall_torque);
}

#[test]
fn abs_releases_stopped_wheel_while_moving() {
    let config = TexConfig::default();

    for speed in [5.0, 7.5, 100.0] {
        let runtime = runtime(speed, config.max_speed);
        let drivetrain = Drivetrain::new(&config, &runtime);
        for requested in [0.0, 1.0, 5000.0, 1e7] {
            let mut wheel = wheel(0.0);
            drivetrain.apply_brake(&mut wheel, requested);
            assert_eq!(wheel.brake_torque, 0.0);
        }
    }

    let runtime = runtime(4.9, config.max_speed);
    let drivetrain = Drivetrain::new(&config, &runtime);
    let mut wheel = wheel(0.0);
    drivetrain.apply_brake(&mut wheel, 1234.0);
    assert_eq!(wheel.brake_torque, 1234.0);
}

#[test]
fn balance_preserves_total_torque() {
    let pairs = [
        (100.0, 300.0),
        (-50.0, 400.0),
        (1000.0, 1000.0),
        (3.0, 0.5),
        (-800.0, -20.0),
        (f32::NAN, 50.0),
    ];

    for (rpm_a, rpm_b) in pairs {
        let mut a = WheelState {
            motor_torque: 1200.0,
            ..wheel(rpm_a)
        };
        let mut b = WheelState {
            motor_torque: 800.0,
            ..wheel(rpm_b)
        };
        balance(&mut a, &mut b);
        assert_relative_eq!(a.motor_torque + b.motor_torque, 2000.0, max_relative = 1e-4);
    }
}

#[test]
fn balance_splits_evenly_near_standstill() {
    for (rpm_a, rpm_b) in [(0.0, 0.0), (1.0, 1.0), (-1.0, 0.5), (2.0, 0.0), (f32::NAN, 1.5)] {
        let mut a = WheelState {
            motor_torque: 3000.0,
            ..wheel(rpm_a)
        };
        let mut b = WheelState {
            motor_torque: 1000.0,
            ..wheel(rpm_b)
        };
        balance(&mut a, &mut b);
        assert_eq!(a.motor_torque, 2000.0);
        assert_eq!(b.motor_torque, 2000.0);
    }
}

#[test]
fn balance_favors_faster_wheel() {
    let mut a = WheelState {
        motor_torque: 1000.0,
        ..wheel(300.0)
    };
    let mut b = WheelState {
        motor_torque: 1000.0,
        ..wheel(100.0)
    };
    balance(&mut a, &mut b);
    assert_relative_eq!(a.motor_torque, 1500.0);
    assert_relative_eq!(b.motor_torque, 500.0);
}

#[test]
fn differential_pairs_wheels_by_axle() {
    let mut tex = new_tex(TexConfig::default());
    tex.set_wheel_rpms([300.0, 10.0, 10.0, 100.0, 10.0, 10.0]);
    tex.handle_acceleration(1.0);

    let lf = tex.wheel(WheelId::LeftFront).motor_torque;
    let rf = tex.wheel(WheelId::RightFront).motor_torque;
    assert_relative_eq!(lf, 3.0 * rf, max_relative = 1e-5);

    let lm = tex.wheel(WheelId::LeftMid).motor_torque;
    let rm = tex.wheel(WheelId::RightMid).motor_torque;
    assert_relative_eq!(lm, rm);
}

#[test]
fn top_speed_resets_every_tick() {
    let config = TexConfig {
        terrain_test: true,
        ..Default::default()
    };
    let max_speed = config.max_speed;
    let mut tex = new_tex(config);
    let body = body_moving(Vec3A::ZERO);

    // A drop past the warning ray caps the speed
    tex.set_controls(TexControls::held(0.0, 1.0));
    let cliff = FlatGround::new(0.0).with_edge(5.0);
    let output = tex.step(TICK_TIME, &body, Authority::Authoritative, &cliff);
    assert_eq!(output.terrain, TerrainVerdict::Caution);
    assert_relative_eq!(output.runtime.top_speed, max_speed * 0.1);

    // Releasing the throttle skips the probes, the cap must not stick
    tex.set_controls(TexControls::DEFAULT);
    let output = tex.step(TICK_TIME, &body, Authority::Authoritative, &cliff);
    assert_eq!(output.terrain, TerrainVerdict::Unchecked);
    assert_eq!(output.runtime.top_speed, max_speed);
}

#[test]
fn terrain_check_clear_on_open_ground() {
    let mut tex = new_tex(TexConfig {
        terrain_test: true,
        ..Default::default()
    });
    tex.set_controls(TexControls::held(0.0, 1.0));

    let output = tex.step(
        TICK_TIME,
        &body_moving(Vec3A::ZERO),
        Authority::Authoritative,
        &FlatGround::new(0.0).with_edge(10.0),
    );

    assert_eq!(output.terrain, TerrainVerdict::Clear);
    assert_eq!(output.runtime.top_speed, 15.0);
    assert!(!output.runtime.emergency_stop);
}

#[test]
fn terrain_check_stops_at_cliff_edge() {
    // Already installed by another test is fine
    let _ = tex_sim::init_logging();

    let config = TexConfig {
        terrain_test: true,
        ..Default::default()
    };
    let full_brake = 1.5 * config.max_brake_force;
    let mut tex = new_tex(config);
    tex.set_controls(TexControls::held(0.0, 1.0));

    let output = tex.step(
        TICK_TIME,
        &body_moving(Vec3A::ZERO),
        Authority::Authoritative,
        &FlatGround::new(0.0).with_edge(2.8),
    );

    assert_eq!(output.terrain, TerrainVerdict::EmergencyStop);
    assert!(output.runtime.emergency_stop);
    assert_eq!(output.runtime.top_speed, 0.0);
    for wheel in output.wheels {
        assert_eq!(wheel.motor_torque, 0.0);
        assert_eq!(wheel.brake_torque, full_brake);
    }
}

#[test]
fn terrain_check_allows_reversing_away_from_cliff() {
    let mut tex = new_tex(TexConfig {
        terrain_test: true,
        ..Default::default()
    });
    tex.set_controls(TexControls::held(0.0, -1.0));

    let output = tex.step(
        TICK_TIME,
        &body_moving(Vec3A::ZERO),
        Authority::Authoritative,
        &FlatGround::new(0.0).with_edge(2.8),
    );

    assert_eq!(output.terrain, TerrainVerdict::Clear);
    assert!(output.wheels.iter().all(|wheel| wheel.motor_torque < 0.0));
}

#[test]
fn released_throttle_brakes_all_wheels() {
    let config = TexConfig::default();
    let full_brake = 1.5 * config.max_brake_force;
    let mut tex = new_tex(config);

    tex.set_controls(TexControls::DEFAULT);
    let output = tex.step(TICK_TIME, &body_moving(Vec3A::ZERO), Authority::Authoritative, &FlatGround::new(0.0));
    for wheel in output.wheels {
        assert_eq!(wheel.motor_torque, 0.0);
        assert_eq!(wheel.brake_torque, full_brake);
    }

    // Coasting with wheels reading 0 RPM: no brakes
    let output = tex.step(
        TICK_TIME,
        &body_moving(Vec3A::new(6.0, 0.0, 0.0)),
        Authority::Authoritative,
        &FlatGround::new(0.0),
    );
    assert!(output.wheels.iter().all(|wheel| wheel.brake_torque == 0.0));
}

#[test]
fn steering_turns_front_wheels_only() {
    let mut tex = new_tex(TexConfig::default());
    tex.set_controls(TexControls {
        steer: 1.0,
        steer_held: true,
        ..TexControls::DEFAULT
    });

    let output = tex.step(TICK_TIME, &body_moving(Vec3A::ZERO), Authority::Authoritative, &FlatGround::new(0.0));
    for id in WheelId::ALL {
        let expected = if id.is_front() { 25.0 } else { 0.0 };
        assert_eq!(output.wheels[id.index()].steer_angle, expected, "{id:?}");
    }
}

#[test]
fn four_wheel_steering_counter_steers_back_wheels() {
    let mut tex = new_tex(TexConfig {
        four_wheel_steering: true,
        ..Default::default()
    });
    tex.set_controls(TexControls {
        steer: -0.5,
        steer_held: true,
        ..TexControls::DEFAULT
    });

    let output = tex.step(TICK_TIME, &body_moving(Vec3A::ZERO), Authority::Authoritative, &FlatGround::new(0.0));
    let front = output.wheels[WheelId::LeftFront.index()].steer_angle;
    let back = output.wheels[WheelId::RightBack.index()].steer_angle;

    assert_relative_eq!(front, -25.0 * 0.125);
    assert_relative_eq!(back, 25.0 * 0.125);
    assert_eq!(output.wheels[WheelId::LeftMid.index()].steer_angle, 0.0);
}

#[test]
fn combined_input_is_clamped_to_unit_disc() {
    let mut tex = new_tex(TexConfig::default());
    tex.set_controls(TexControls::held(1.0, 1.0));

    let output = tex.step(TICK_TIME, &body_moving(Vec3A::ZERO), Authority::Authoritative, &FlatGround::new(0.0));
    let component = std::f32::consts::FRAC_1_SQRT_2;
    assert_relative_eq!(
        output.wheels[WheelId::RightFront.index()].steer_angle,
        25.0 * component.powi(3),
        max_relative = 1e-5
    );
}

#[test]
fn released_joystick_centers_wheels() {
    let mut tex = new_tex(TexConfig::default());
    let body = body_moving(Vec3A::ZERO);
    let ground = FlatGround::new(0.0);

    tex.set_controls(TexControls::held(1.0, 0.0));
    tex.step(TICK_TIME, &body, Authority::Authoritative, &ground);
    assert_ne!(tex.wheel(WheelId::LeftFront).steer_angle, 0.0);

    tex.set_controls(TexControls::DEFAULT);
    tex.step(TICK_TIME, &body, Authority::Authoritative, &ground);
    assert!(tex.wheels().iter().all(|wheel| wheel.steer_angle == 0.0));
}

#[test]
fn rate_limited_steering_approaches_target() {
    let mut tex = new_tex(TexConfig {
        steer_response: SteerResponse::RateLimited,
        ..Default::default()
    });

    // 30 deg/s at full deflection
    tex.handle_steering(1.0, 0.1);
    assert_relative_eq!(tex.wheel(WheelId::LeftFront).steer_angle, 3.0, max_relative = 1e-5);
    tex.handle_steering(1.0, 0.1);
    assert_relative_eq!(tex.wheel(WheelId::LeftFront).steer_angle, 6.0, max_relative = 1e-5);

    for _ in 0..100 {
        tex.handle_steering(1.0, 0.1);
    }
    assert_relative_eq!(tex.wheel(WheelId::LeftFront).steer_angle, 25.0, epsilon = 3.0);
    assert!(tex.wheel(WheelId::LeftFront).steer_angle <= 25.0);
}

#[test]
fn remote_peer_only_tracks_speed() {
    let mut tex = new_tex(TexConfig::default());
    let before = *tex.wheels();

    tex.set_controls(TexControls::held(1.0, 1.0));
    let output = tex.step(
        TICK_TIME,
        &body_moving(Vec3A::new(3.0, 4.0, 0.0)),
        Authority::Remote,
        &FlatGround::new(0.0),
    );

    assert_eq!(output.body_mode, BodyMode::Kinematic);
    assert_eq!(output.wheels, before);
    assert_relative_eq!(output.runtime.current_speed, 5.0);
}

#[test]
fn invalid_config_is_rejected() {
    let configs = [
        TexConfig {
            max_speed: -1.0,
            ..Default::default()
        },
        TexConfig {
            max_rpm: 0.0,
            ..Default::default()
        },
        TexConfig {
            max_steering_angle: 40.0,
            ..Default::default()
        },
        TexConfig {
            stall_torque: f32::NAN,
            ..Default::default()
        },
        TexConfig {
            torque_curve: LinearPieceCurve::new(&[(0.0, 0.2), (0.5, 1.0), (1.0, 0.1)]).unwrap(),
            ..Default::default()
        },
    ];

    for config in configs {
        assert!(Tex::new(config).is_err());
    }
}

#[test]
fn motor_cues_follow_motor_state() {
    let mut tex = new_tex(TexConfig::default());
    let mut cues = Vec::new();

    tex.set_motor_on(true, &mut cues);
    tex.set_motor_on(true, &mut cues);
    assert_eq!(cues, [Cue::MotorOn]);

    let body = body_moving(Vec3A::ZERO);
    tex.frame_update(TICK_TIME, &body, Authority::Authoritative, &mut cues);
    assert!(matches!(cues[1], Cue::MotorPitch { change, min, max } if change == 0.0 && min == 0.8 && max == 1.2));

    tex.set_motor_on(false, &mut cues);
    assert_eq!(cues.last(), Some(&Cue::MotorOff));
}

#[test]
fn motor_pitch_tracks_speed_change() {
    let mut tex = new_tex(TexConfig::default());
    let mut cues = Vec::new();
    tex.set_motor_on(true, &mut cues);

    let body = body_moving(Vec3A::new(4.0, 0.0, 0.0));
    tex.set_controls(TexControls::held(0.0, 1.0));
    tex.step(TICK_TIME, &body, Authority::Authoritative, &FlatGround::new(0.0));

    cues.clear();
    tex.frame_update(TICK_TIME, &body, Authority::Authoritative, &mut cues);
    assert!(matches!(cues[0], Cue::MotorPitch { change, .. } if change == 1.0));
}

#[test]
fn wheels_kick_up_gravel_now_and_then() {
    let mut tex = new_tex(TexConfig::default());
    let mut cues = Vec::new();
    tex.set_motor_on(true, &mut cues);

    let body = body_moving(Vec3A::ZERO);
    for _ in 0..2000 {
        tex.frame_update(TICK_TIME, &body, Authority::Authoritative, &mut cues);
    }

    let gravel = cues
        .iter()
        .filter(|cue| matches!(cue, Cue::WheelGravel(_)))
        .count();
    assert!(gravel > 0);
    assert!(gravel < 2000);
}

#[test]
fn motor_off_means_silence() {
    let mut tex = new_tex(TexConfig::default());
    let mut cues = Vec::new();
    for _ in 0..500 {
        tex.frame_update(TICK_TIME, &body_moving(Vec3A::ZERO), Authority::Authoritative, &mut cues);
    }
    assert!(cues.is_empty());
}

#[test]
fn hud_shows_reverse_speed() {
    let mut tex = new_tex(TexConfig::default());
    let body = body_moving(Vec3A::new(-5.0, 0.0, 0.0));
    tex.step(TICK_TIME, &body, Authority::Authoritative, &FlatGround::new(0.0));

    let frame = tex.frame_update(TICK_TIME, &body, Authority::Authoritative, &mut NoCues);
    assert_eq!(frame.hud.speed_kmh, 18.0);
    assert_eq!(frame.hud.forward_fill, 0.0);
    assert_relative_eq!(frame.hud.backward_fill, 5.0 / 15.0);
}

#[test]
fn hud_reads_heading_from_rotation() {
    let mut tex = new_tex(TexConfig::default());
    let body = BodyState {
        rot_mat: Mat3A::from_rotation_z(std::f32::consts::PI),
        ..body_moving(Vec3A::new(-3.0, 0.0, 0.0))
    };
    tex.step(TICK_TIME, &body, Authority::Authoritative, &FlatGround::new(0.0));

    let frame = tex.frame_update(TICK_TIME, &body, Authority::Authoritative, &mut NoCues);
    assert_relative_eq!(frame.hud.forward_fill, 3.0 / 15.0);
    assert_eq!(frame.hud.backward_fill, 0.0);
}

#[test]
fn wheel_visuals_spin_and_mirror_steering() {
    let mut tex = new_tex(TexConfig::default());
    let body = body_moving(Vec3A::ZERO);

    tex.set_controls(TexControls {
        steer: 1.0,
        steer_held: true,
        ..TexControls::DEFAULT
    });
    tex.step(TICK_TIME, &body, Authority::Authoritative, &FlatGround::new(0.0));
    tex.set_wheel_rpms([100.0; 6]);

    let frame = tex.frame_update(0.5, &body, Authority::Authoritative, &mut NoCues);
    assert!(frame.wheel_spin_deltas.iter().all(|&delta| delta == -300.0));
    assert_eq!(frame.wheel_steer_visuals[WheelId::LeftFront.index()], -25.0);
    assert_eq!(frame.wheel_steer_visuals[WheelId::RightFront.index()], 25.0);
    assert_eq!(frame.wheel_steer_visuals[WheelId::RightMid.index()], 0.0);
}

#[test]
fn remote_peer_animates_from_snapshot() {
    let mut driver = new_tex(TexConfig::default());
    let body = body_moving(Vec3A::ZERO);
    driver.set_controls(TexControls {
        steer: -1.0,
        steer_held: true,
        ..TexControls::DEFAULT
    });
    driver.step(TICK_TIME, &body, Authority::Authoritative, &FlatGround::new(0.0));
    driver.set_wheel_rpms([10.0, 20.0, 30.0, 40.0, 50.0, 60.0]);
    let bytes = driver.animation_sync().to_bytes();

    let mut passenger = new_tex(TexConfig::default());
    passenger.apply_animation_sync(&bytes).unwrap();
    let frame = passenger.frame_update(1.0, &body, Authority::Remote, &mut NoCues);

    assert_eq!(frame.wheel_spin_deltas[5], -360.0);
    assert_eq!(frame.wheel_steer_visuals[WheelId::LeftFront.index()], 25.0);
    assert_eq!(frame.wheel_steer_visuals[WheelId::RightFront.index()], -25.0);

    assert!(passenger.apply_animation_sync(&bytes[..12]).is_err());
}
