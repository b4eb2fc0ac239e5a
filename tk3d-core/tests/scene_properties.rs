use approx::assert_relative_eq;
use nalgebra::{Point3, Vector3};
use tk3d_core::{
    CameraPreset, Command, DrawList, FrameDriver, MeshKind, Projectile, ProjectileSimulator,
    SceneError, TransformStack, Transform, Tuning,
};

#[test]
fn test_stack_balanced_over_many_frames() {
    let mut driver = FrameDriver::default();
    let script = [
        Command::MoveForward,
        Command::TurretLeft,
        Command::CannonUp,
        Command::Fire,
        Command::SelectCamera(CameraPreset::Profile),
        Command::HullRight,
        Command::Fire,
        Command::ZoomIn,
    ];

    for frame in 0..240 {
        driver.apply(script[frame % script.len()]);
        let mut list = DrawList::new();
        let stats = driver.tick(&mut list).unwrap();
        assert_eq!(driver.stack().depth(), 0, "frame {frame}");
        assert_eq!(stats.draw_calls, list.len());
    }
}

#[test]
fn test_wheel_spin_does_not_leak_into_siblings() {
    let draw_with_spin = |spin: f32| {
        let mut driver = FrameDriver::default();
        driver.state_mut().tank.wheel_spin = spin;
        let mut list = DrawList::new();
        driver.tick(&mut list).unwrap();
        list
    };

    let still = draw_with_spin(0.0);
    let spun = draw_with_spin(123.0);
    assert_eq!(still.len(), spun.len());

    let rim_color = Tuning::default().tank.rim_color;
    let mut changed = 0;
    for (a, b) in still.calls.iter().zip(&spun.calls) {
        assert_eq!(a.kind, b.kind);
        let is_wheel = a.kind == MeshKind::Torus
            || (a.kind == MeshKind::Cylinder && a.color == rim_color);
        if is_wheel {
            changed += 1;
            continue;
        }
        assert_relative_eq!(a.transform, b.transform, epsilon = 1e-6);
    }
    // Tires and rims turn; nothing else moves
    assert!(changed > 0);
}

#[test]
fn test_projectile_integration_is_reproducible() {
    let run = || {
        let mut sim = ProjectileSimulator::new(9.8, 16);
        sim.spawn(Projectile::new(Point3::new(0.0, 2.0, 0.0), Vector3::new(6.0, 9.0, 1.5)));
        (0..90)
            .map(|_| {
                sim.step(1.0 / 60.0);
                sim.live().clone()
            })
            .collect::<Vec<_>>()
    };
    assert_eq!(run(), run());
}

#[test]
fn test_dropped_projectile_lands_on_expected_tick() {
    let dt = 1.0 / 60.0;
    let (height, gravity) = (5.0_f32, 9.8_f32);
    let mut sim = ProjectileSimulator::new(gravity, 1);
    sim.spawn(Projectile::new(Point3::new(0.0, height, 0.0), Vector3::zeros()));

    let mut landed_at = None;
    for tick in 1..=200 {
        sim.step(dt);
        if sim.is_empty() {
            landed_at = Some(tick);
            break;
        }
    }

    let expected = ((2.0 * height / gravity).sqrt() / dt).ceil() as i32;
    let landed_at = landed_at.expect("projectile never landed");
    assert!(
        (landed_at - expected).abs() <= 1,
        "landed on tick {landed_at}, closed form says {expected}"
    );
}

#[test]
fn test_hull_clamp_at_grid_edge() {
    let mut driver = FrameDriver::default();
    driver.state_mut().tank.x = 12.4;
    assert!(!driver.apply(Command::MoveForward));
    assert_eq!(driver.state().tank.x, 12.4);
}

#[test]
fn test_cannon_pitch_clamp_at_max() {
    let mut driver = FrameDriver::default();
    driver.state_mut().tank.cannon_pitch = 90.0;
    driver.apply(Command::CannonUp);
    assert_eq!(driver.state().tank.cannon_pitch, 90.0);
}

#[test]
fn test_scale_then_translate_composition() {
    let mut stack = TransformStack::new();
    stack.compose(&Transform::scale_matrix(2.0, 1.0, 2.0));
    stack.compose(&Transform::translation_matrix(0.0, 3.0, 0.0));
    let world = stack.current().transform_point(&Point3::new(1.0, 1.0, 1.0));
    assert_relative_eq!(world, Point3::new(2.0, 4.0, 2.0), epsilon = 1e-6);
}

#[test]
fn test_unmatched_pop_is_detected() {
    let mut stack = TransformStack::new();
    stack.push();
    stack.pop().unwrap();
    assert_eq!(stack.pop(), Err(SceneError::StackUnderflow));
}

#[test]
fn test_level_shot_travels_along_hull_forward() {
    let mut driver = FrameDriver::default();
    driver.state_mut().tank.hull_yaw = 90.0;
    driver.apply(Command::Fire);
    driver.tick(&mut DrawList::new()).unwrap();

    let shot = driver.state().projectiles.live()[0];
    let dir = shot.velocity.normalize();
    assert_relative_eq!(dir, Vector3::new(0.0, 0.0, -1.0), epsilon = 1e-5);
    assert_relative_eq!(shot.velocity.norm(), driver.tuning().tank.muzzle_speed, epsilon = 1e-4);
    assert!(shot.position.y > 0.0);
}

#[test]
fn test_fired_shell_eventually_lands() {
    let mut driver = FrameDriver::default();
    driver.state_mut().tank.cannon_pitch = 45.0;
    driver.apply(Command::Fire);

    let mut landed = 0;
    for _ in 0..600 {
        landed += driver.tick(&mut DrawList::new()).unwrap().landed;
    }
    assert_eq!(landed, 1);
    assert!(driver.state().projectiles.is_empty());
}
