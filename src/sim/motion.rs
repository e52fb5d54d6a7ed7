//! Per-tick motion rules
//!
//! - [`integrate`]: projectile under constant downward gravity
//! - [`BoundedLinearMover`]: horizontal sweep reflecting at the field edges
//! - [`launch_velocity`] / [`launch_point`]: click point <-> initial velocity

use glam::Vec2;
use serde::{Deserialize, Serialize};

use super::state::Body;

/// Initial projectile velocity for a launch aimed at `point`.
///
/// `vx = (px - ox) / K`, `vy = (py - oy) / K - B`. Any point is accepted;
/// far-away clicks simply give fast shots.
#[inline]
pub fn launch_velocity(origin: Vec2, point: Vec2, time_scale: f32, bias: f32) -> Vec2 {
    let vel = (point - origin) / time_scale;
    Vec2::new(vel.x, vel.y - bias)
}

/// Inverse of [`launch_velocity`]: the click point that yields `vel`
#[inline]
pub fn launch_point(origin: Vec2, vel: Vec2, time_scale: f32, bias: f32) -> Vec2 {
    origin + Vec2::new(vel.x, vel.y + bias) * time_scale
}

/// Advance a body one tick under gravity.
///
/// Velocity is updated before position (semi-implicit Euler), so the first
/// tick already feels gravity: `vy += g; x += vx; y += vy`.
#[inline]
pub fn integrate(body: &mut Body, gravity: f32) {
    body.vel.y += gravity;
    body.pos += body.vel;
}

/// Constant-speed horizontal motion between `min` and `max`.
///
/// Reflection is reactive: the position is advanced first and the direction
/// flips on the tick that ends up past a bound, so the body can overshoot
/// by at most one tick's travel.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct BoundedLinearMover {
    /// Signed units per tick
    pub velocity: f32,
    pub min: f32,
    pub max: f32,
}

impl BoundedLinearMover {
    pub fn new(velocity: f32, min: f32, max: f32) -> Self {
        Self { velocity, min, max }
    }

    /// Advance `x` by one tick. Returns true if the direction flipped.
    pub fn step(&mut self, x: &mut f32) -> bool {
        *x += self.velocity;
        if *x > self.max || *x < self.min {
            self.velocity = -self.velocity;
            return true;
        }
        false
    }

    /// Advance a body horizontally, mirroring the velocity onto it
    pub fn advance(&mut self, body: &mut Body) -> bool {
        let flipped = self.step(&mut body.pos.x);
        body.vel.x = self.velocity;
        body.vel.y = 0.0;
        flipped
    }

    /// Current speed magnitude
    #[inline]
    pub fn speed(&self) -> f32 {
        self.velocity.abs()
    }

    /// Change the speed magnitude, keeping the current direction
    pub fn set_speed(&mut self, speed: f32) {
        self.velocity = speed.abs().copysign(self.velocity);
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::sim::state::Color;

    #[test]
    fn test_launch_velocity_straight_up() {
        let vel = launch_velocity(Vec2::new(400.0, 400.0), Vec2::new(400.0, 100.0), 20.0, 2.0);
        assert_eq!(vel, Vec2::new(0.0, -17.0));
    }

    #[test]
    fn test_launch_point_inverts_velocity() {
        let origin = Vec2::new(400.0, 400.0);
        let click = Vec2::new(130.0, 260.0);
        let vel = launch_velocity(origin, click, 20.0, 2.0);
        let back = launch_point(origin, vel, 20.0, 2.0);
        assert!((back - click).length() < 1e-3);
    }

    #[test]
    fn test_integrate_gravity_before_position() {
        let mut body = Body::new(Vec2::new(400.0, 400.0), 15, Color::BROWN);
        body.vel = Vec2::new(0.0, -17.0);

        integrate(&mut body, 0.2);
        assert!((body.vel.y - (-16.8)).abs() < 1e-4);
        assert!((body.pos.y - 383.2).abs() < 1e-3);
        assert_eq!(body.pos.x, 400.0);
    }

    #[test]
    fn test_integrate_horizontal_is_constant() {
        let mut body = Body::new(Vec2::ZERO, 1, Color::BLACK);
        body.vel = Vec2::new(2.5, 0.0);
        for _ in 0..10 {
            integrate(&mut body, 0.2);
        }
        assert_eq!(body.vel.x, 2.5);
        assert!((body.pos.x - 25.0).abs() < 1e-4);
        // y after n ticks = g * n(n+1)/2
        assert!((body.pos.y - 0.2 * 55.0).abs() < 1e-3);
    }

    #[test]
    fn test_mover_flips_on_crossing_tick() {
        let mut mover = BoundedLinearMover::new(3.0, 0.0, 500.0);
        let mut x = 50.0;

        // 150 ticks lands exactly on 500: still inside, no flip
        for _ in 0..150 {
            assert!(!mover.step(&mut x));
        }
        assert_eq!(x, 500.0);
        assert_eq!(mover.velocity, 3.0);

        // Tick 151 overshoots to 503 and flips
        assert!(mover.step(&mut x));
        assert_eq!(x, 503.0);
        assert_eq!(mover.velocity, -3.0);

        assert!(!mover.step(&mut x));
        assert_eq!(x, 500.0);
    }

    #[test]
    fn test_mover_flips_at_left_edge() {
        let mut mover = BoundedLinearMover::new(-2.0, 0.0, 500.0);
        let mut x = 3.0;
        assert!(!mover.step(&mut x));
        assert!(mover.step(&mut x));
        assert_eq!(x, -1.0);
        assert_eq!(mover.velocity, 2.0);
    }

    #[test]
    fn test_mover_advance_updates_body() {
        let mut mover = BoundedLinearMover::new(3.0, 0.0, 500.0);
        let mut body = Body::new(Vec2::new(50.0, 200.0), 20, Color::RED);
        mover.advance(&mut body);
        assert_eq!(body.pos, Vec2::new(53.0, 200.0));
        assert_eq!(body.vel.x, 3.0);
    }

    #[test]
    fn test_set_speed_keeps_direction() {
        let mut mover = BoundedLinearMover::new(-3.0, 0.0, 500.0);
        mover.set_speed(3.3);
        assert_eq!(mover.velocity, -3.3);
        assert_eq!(mover.speed(), 3.3);

        let mut mover = BoundedLinearMover::new(2.0, 0.0, 500.0);
        mover.set_speed(-4.0);
        assert_eq!(mover.velocity, 4.0);
    }
}
