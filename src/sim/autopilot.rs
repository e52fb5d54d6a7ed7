//! Seeded aiming that stands in for mouse clicks
//!
//! Picks a flight time, looks ahead to where the target will be by stepping
//! a copy of its mover, solves the launch velocity that arrives there under
//! gravity, and turns that back into a click point with some jitter so not
//! every shot lands.

use glam::Vec2;
use rand::{Rng, SeedableRng};
use rand_pcg::Pcg32;

use super::motion::launch_point;
use super::session::Session;

/// Shortest flight the autopilot will plan (ticks)
pub const MIN_FLIGHT_TICKS: u32 = 20;
/// Longest flight the autopilot will plan (ticks)
pub const MAX_FLIGHT_TICKS: u32 = 45;
/// Max click offset added per axis (units)
pub const DEFAULT_JITTER: f32 = 40.0;
/// Upper clamp on jitter; wider ranges overflow the sampler
pub const MAX_JITTER: f32 = 10_000.0;

#[derive(Debug, Clone)]
pub struct Autopilot {
    seed: u64,
    rng: Pcg32,
    jitter: f32,
}

impl Autopilot {
    pub fn new(seed: u64) -> Self {
        Self {
            seed,
            rng: Pcg32::seed_from_u64(seed),
            jitter: DEFAULT_JITTER,
        }
    }

    /// Override the click jitter (0 = perfect aim). Non-finite values fall
    /// back to 0, large ones are clamped to [`MAX_JITTER`].
    pub fn with_jitter(mut self, jitter: f32) -> Self {
        self.jitter = if jitter.is_finite() {
            jitter.abs().min(MAX_JITTER)
        } else {
            log::warn!("Ignoring non-finite autopilot jitter {jitter}");
            0.0
        };
        self
    }

    pub fn jitter(&self) -> f32 {
        self.jitter
    }

    pub fn seed(&self) -> u64 {
        self.seed
    }

    /// Next click point, or `None` when the session wouldn't accept one
    pub fn aim(&mut self, session: &Session) -> Option<Vec2> {
        if !session.can_launch() {
            return None;
        }

        let ticks = self.rng.random_range(MIN_FLIGHT_TICKS..=MAX_FLIGHT_TICKS);
        let intercept = predict_target(session, ticks);
        let vel = solve_launch(session, intercept, ticks);

        let config = session.config();
        let mut point = launch_point(
            session.origin(),
            vel,
            config.launch_time_scale,
            config.launch_bias,
        );
        if self.jitter > 0.0 {
            point += Vec2::new(
                self.rng.random_range(-self.jitter..=self.jitter),
                self.rng.random_range(-self.jitter..=self.jitter),
            );
        }

        log::debug!(
            "Autopilot aims for ({:.1}, {:.1}) in {} ticks, clicking ({:.1}, {:.1})",
            intercept.x,
            intercept.y,
            ticks,
            point.x,
            point.y
        );
        Some(point)
    }
}

/// Where the target will be after `ticks` more ticks
pub fn predict_target(session: &Session, ticks: u32) -> Vec2 {
    let mut mover = *session.mover();
    let mut pos = session.target().pos;
    for _ in 0..ticks {
        mover.step(&mut pos.x);
    }
    pos
}

/// Launch velocity that puts the projectile at `goal` after exactly `ticks`.
///
/// With gravity applied before each position update:
/// `y_n = y_0 + n * vy + g * n(n+1)/2`, `x_n = x_0 + n * vx`.
pub fn solve_launch(session: &Session, goal: Vec2, ticks: u32) -> Vec2 {
    let n = ticks.max(1) as f32;
    let delta = goal - session.origin();
    let drop = session.config().gravity * n * (n + 1.0) / 2.0;
    Vec2::new(delta.x / n, (delta.y - drop) / n)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::settings::SessionConfig;
    use crate::sim::motion::integrate;
    use crate::sim::state::Phase;

    #[test]
    fn test_same_seed_same_clicks() {
        let session = Session::new(SessionConfig::default());
        let mut a = Autopilot::new(7);
        let mut b = Autopilot::new(7);
        for _ in 0..5 {
            assert_eq!(a.aim(&session), b.aim(&session));
        }
    }

    #[test]
    fn test_no_aim_while_in_flight() {
        let mut session = Session::new(SessionConfig::default());
        let mut pilot = Autopilot::new(1);
        let point = pilot.aim(&session).expect("idle session");
        assert!(session.on_launch(point));
        assert_eq!(pilot.aim(&session), None);
    }

    #[test]
    fn test_solved_launch_reaches_goal() {
        let session = Session::new(SessionConfig::default());
        let goal = Vec2::new(120.0, 210.0);
        let ticks = 30;
        let mut body = session.projectile().clone();
        body.vel = solve_launch(&session, goal, ticks);
        for _ in 0..ticks {
            integrate(&mut body, session.config().gravity);
        }
        assert!((body.pos - goal).length() < 0.05);
    }

    #[test]
    fn test_non_finite_jitter_falls_back_to_perfect_aim() {
        let session = Session::new(SessionConfig::default());
        for jitter in [f32::INFINITY, f32::NEG_INFINITY, f32::NAN] {
            let mut pilot = Autopilot::new(5).with_jitter(jitter);
            assert_eq!(pilot.jitter(), 0.0);
            assert!(pilot.aim(&session).is_some());
        }
    }

    #[test]
    fn test_huge_jitter_is_clamped() {
        let session = Session::new(SessionConfig::default());
        let mut pilot = Autopilot::new(5).with_jitter(f32::MAX);
        assert_eq!(pilot.jitter(), MAX_JITTER);
        let point = pilot.aim(&session).expect("idle session");
        assert!(point.is_finite());
    }

    #[test]
    fn test_predict_target_follows_mover() {
        let session = Session::new(SessionConfig::default());
        let predicted = predict_target(&session, 10);
        assert_eq!(predicted, Vec2::new(80.0, 200.0));
    }

    #[test]
    fn test_perfect_aim_scores() {
        let mut session = Session::new(SessionConfig::default());
        let mut pilot = Autopilot::new(3).with_jitter(0.0);
        let point = pilot.aim(&session).expect("idle session");
        assert!(session.on_launch(point));
        while session.phase() == Phase::InFlight {
            session.tick();
        }
        assert_eq!(session.hits(), Some(1));
    }
}
