/// Ballistic projectiles fired from the cannon
use std::collections::VecDeque;

use nalgebra::{Matrix4, Point3, Vector3};
use tracing::debug;

use crate::transform::{normalize_or_zero, Transform};

#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Projectile {
    pub position: Point3<f32>,
    pub velocity: Vector3<f32>,
}

impl Projectile {
    pub fn new(position: Point3<f32>, velocity: Vector3<f32>) -> Self {
        Self { position, velocity }
    }

    /// Spawn at the origin of `muzzle`, moving along its local +X.
    ///
    /// Only the linear part of `muzzle` orients the velocity, so the launch
    /// direction never picks up the muzzle's translation.
    pub fn from_muzzle(muzzle: &Matrix4<f32>, speed: f32) -> Self {
        let position = Transform::apply_point(muzzle, &Point3::origin());
        let forward = Transform::apply_direction(muzzle, &Vector3::x());
        Self::new(position, normalize_or_zero(forward) * speed)
    }

    /// One constant-acceleration step.
    ///
    /// Velocity is updated first and the position step still adds the
    /// ½·g·dt² term on top of it.
    pub fn step(&mut self, gravity: &Vector3<f32>, dt: f32) {
        self.velocity += gravity * dt;
        self.position += self.velocity * dt + gravity * (0.5 * dt * dt);
    }

    pub fn is_grounded(&self) -> bool {
        self.position.y < 0.0
    }
}

/// Live projectile set under constant gravity.
///
/// Projectiles are only ever airborne; one that drops below the ground
/// plane is removed in the same step.
#[derive(Debug, Clone)]
pub struct ProjectileSimulator {
    gravity: Vector3<f32>,
    max_live: usize,
    live: VecDeque<Projectile>,
}

impl ProjectileSimulator {
    /// `gravity` is the downward magnitude
    pub fn new(gravity: f32, max_live: usize) -> Self {
        Self {
            gravity: Vector3::new(0.0, -gravity, 0.0),
            max_live,
            live: VecDeque::new(),
        }
    }

    /// Live projectiles, oldest first
    pub fn live(&self) -> &VecDeque<Projectile> {
        &self.live
    }

    /// Live projectiles as one slice, oldest first
    pub fn as_slice(&mut self) -> &[Projectile] {
        self.live.make_contiguous()
    }

    pub fn len(&self) -> usize {
        self.live.len()
    }

    pub fn is_empty(&self) -> bool {
        self.live.is_empty()
    }

    pub fn spawn(&mut self, projectile: Projectile) {
        if self.max_live == 0 {
            return;
        }
        if self.live.len() >= self.max_live {
            self.live.pop_front();
        }
        debug!(
            x = projectile.position.x,
            y = projectile.position.y,
            z = projectile.position.z,
            live = self.live.len() + 1,
            "projectile fired"
        );
        self.live.push_back(projectile);
    }

    /// Advance every projectile and drop the ones that hit the ground.
    /// Returns how many were removed.
    pub fn step(&mut self, dt: f32) -> usize {
        let before = self.live.len();
        let gravity = self.gravity;
        for p in self.live.iter_mut() {
            p.step(&gravity, dt);
        }
        self.live.retain(|p| !p.is_grounded());

        let landed = before - self.live.len();
        if landed > 0 {
            debug!(landed, live = self.live.len(), "projectiles landed");
        }
        landed
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use approx::assert_relative_eq;

    const DT: f32 = 1.0 / 60.0;

    #[test]
    fn test_step_matches_closed_form() {
        // v1 = v0 + g dt, x1 = x0 + v1 dt + g dt²/2
        let g = Vector3::new(0.0, -9.8, 0.0);
        let mut p = Projectile::new(Point3::new(0.0, 10.0, 0.0), Vector3::new(3.0, 4.0, 0.0));
        p.step(&g, 0.5);

        assert_relative_eq!(p.velocity, Vector3::new(3.0, -0.9, 0.0), epsilon = 1e-5);
        assert_relative_eq!(
            p.position,
            Point3::new(1.5, 10.0 - 0.45 - 1.225, 0.0),
            epsilon = 1e-5
        );
    }

    #[test]
    fn test_simulation_is_deterministic() {
        let run = || {
            let mut sim = ProjectileSimulator::new(9.8, 8);
            sim.spawn(Projectile::new(Point3::new(0.0, 1.0, 0.0), Vector3::new(5.0, 8.0, -1.0)));
            sim.spawn(Projectile::new(Point3::new(2.0, 3.0, 1.0), Vector3::new(-2.0, 6.0, 4.0)));
            for _ in 0..50 {
                sim.step(DT);
            }
            sim.live().clone()
        };
        assert_eq!(run(), run());
    }

    #[test]
    fn test_removal_keeps_order_of_survivors() {
        let mut sim = ProjectileSimulator::new(9.8, 8);
        let low = Projectile::new(Point3::new(0.0, 0.001, 0.0), Vector3::new(0.0, -5.0, 0.0));
        let high_a = Projectile::new(Point3::new(1.0, 5.0, 0.0), Vector3::zeros());
        let high_b = Projectile::new(Point3::new(2.0, 5.0, 0.0), Vector3::zeros());
        sim.spawn(low);
        sim.spawn(low);
        sim.spawn(high_a);
        sim.spawn(low);
        sim.spawn(high_b);

        assert_eq!(sim.step(DT), 3);
        let xs: Vec<f32> = sim.live().iter().map(|p| p.position.x).collect();
        assert_eq!(xs, vec![1.0, 2.0]);
    }

    #[test]
    fn test_spawn_past_cap_drops_oldest() {
        let mut sim = ProjectileSimulator::new(9.8, 2);
        for x in [1.0, 2.0, 3.0] {
            sim.spawn(Projectile::new(Point3::new(x, 5.0, 0.0), Vector3::zeros()));
        }
        let xs: Vec<f32> = sim.live().iter().map(|p| p.position.x).collect();
        assert_eq!(xs, vec![2.0, 3.0]);
    }

    #[test]
    fn test_slice_keeps_firing_order_after_cap() {
        let mut sim = ProjectileSimulator::new(9.8, 3);
        for x in 1..=7 {
            sim.spawn(Projectile::new(Point3::new(x as f32, 5.0, 0.0), Vector3::zeros()));
        }
        let xs: Vec<f32> = sim.as_slice().iter().map(|p| p.position.x).collect();
        assert_eq!(xs, vec![5.0, 6.0, 7.0]);
        assert_eq!(sim.len(), 3);
    }

    #[test]
    fn test_from_muzzle_ignores_translation() {
        let muzzle = Transform::translation_matrix(4.0, 2.0, -1.0) * Transform::rotation_z(90.0);
        let p = Projectile::from_muzzle(&muzzle, 10.0);
        assert_relative_eq!(p.position, Point3::new(4.0, 2.0, -1.0), epsilon = 1e-5);
        assert_relative_eq!(p.velocity, Vector3::new(0.0, 10.0, 0.0), epsilon = 1e-5);
    }

    #[test]
    fn test_from_degenerate_muzzle_has_zero_velocity() {
        let muzzle = Transform::scale_matrix(0.0, 0.0, 0.0);
        let p = Projectile::from_muzzle(&muzzle, 10.0);
        assert_eq!(p.velocity, Vector3::zeros());
        assert!(p.velocity.iter().all(|v| v.is_finite()));
    }
}
