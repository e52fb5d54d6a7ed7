//! Property-based tests for the simulation core using proptest.

use glam::Vec2;
use proptest::prelude::*;

use super::collision::intersects;
use super::motion::{BoundedLinearMover, integrate};
use super::session::Session;
use super::state::{Body, Color, Phase};
use crate::settings::SessionConfig;

fn body_strategy() -> impl Strategy<Value = Body> {
    (-1000.0f32..1000.0, -1000.0f32..1000.0, 1u32..200)
        .prop_map(|(x, y, r)| Body::new(Vec2::new(x, y), r, Color::BLACK))
}

proptest! {
    #![proptest_config(ProptestConfig::with_cases(200))]

    /// Overlap doesn't depend on argument order.
    #[test]
    fn prop_intersects_symmetric(a in body_strategy(), b in body_strategy()) {
        prop_assert_eq!(intersects(&a, &b), intersects(&b, &a));
    }

    /// Circles placed exactly radius-sum apart along an axis always touch.
    #[test]
    fn prop_touching_counts(
        x in -500i32..500,
        y in -500i32..500,
        ra in 1u32..100,
        rb in 1u32..100,
        horizontal in any::<bool>(),
    ) {
        let a = Body::new(Vec2::new(x as f32, y as f32), ra, Color::BLACK);
        let gap = (ra + rb) as f32;
        let offset = if horizontal { Vec2::new(gap, 0.0) } else { Vec2::new(0.0, gap) };
        let b = Body::new(a.pos + offset, rb, Color::BLACK);
        prop_assert!(intersects(&a, &b));
    }

    /// Same start, same gravity: identical position sequence.
    #[test]
    fn prop_integrator_deterministic(
        vx in -30.0f32..30.0,
        vy in -30.0f32..30.0,
        ticks in 1usize..300,
    ) {
        let run = || {
            let mut body = Body::new(Vec2::new(400.0, 400.0), 15, Color::BROWN);
            body.vel = Vec2::new(vx, vy);
            (0..ticks)
                .map(|_| {
                    integrate(&mut body, 0.2);
                    body.pos
                })
                .collect::<Vec<_>>()
        };
        prop_assert_eq!(run(), run());
    }

    /// The mover never strays more than one tick's travel outside its range.
    #[test]
    fn prop_mover_stays_near_bounds(
        start in 0.0f32..500.0,
        speed in 0.1f32..25.0,
        leftward in any::<bool>(),
        ticks in 1usize..5000,
    ) {
        let velocity = if leftward { -speed } else { speed };
        let mut mover = BoundedLinearMover::new(velocity, 0.0, 500.0);
        let mut x = start;
        for _ in 0..ticks {
            mover.step(&mut x);
            prop_assert!(x >= -speed - 1e-3 && x <= 500.0 + speed + 1e-3, "x = {}", x);
            prop_assert!((mover.speed() - speed).abs() < 1e-6);
        }
    }

    /// Attempts never exceed the cap, whatever gets clicked.
    #[test]
    fn prop_attempts_bounded(
        clicks in prop::collection::vec((-200.0f32..700.0, -200.0f32..700.0), 1..40),
        max_attempts in 1u32..6,
    ) {
        let mut config = SessionConfig::default();
        config.max_attempts = max_attempts;
        let mut session = Session::new(config);

        for (x, y) in clicks {
            session.on_launch(Vec2::new(x, y));
            for _ in 0..400 {
                session.tick();
                if session.phase() != Phase::InFlight {
                    break;
                }
            }
            prop_assert!(session.attempts_used() <= max_attempts);
        }

        if session.attempts_used() == max_attempts {
            prop_assert_eq!(session.phase(), Phase::Finished);
            prop_assert!(!session.on_launch(Vec2::new(400.0, 100.0)));
        }
    }
}

/// Scenario from the mover description: start at 50, +3/tick in [0, 500].
#[test]
fn mover_oscillates_indefinitely() {
    let mut mover = BoundedLinearMover::new(3.0, 0.0, 500.0);
    let mut x = 50.0;
    let mut flips = Vec::new();
    for tick in 1..=2000u32 {
        if mover.step(&mut x) {
            flips.push(tick);
        }
    }
    // First flip on the tick that crosses 500, then roughly every 500/3 ticks
    assert_eq!(flips[0], 151);
    assert!(flips.len() >= 10);
    assert!(flips.windows(2).all(|w| w[1] - w[0] >= 160 && w[1] - w[0] <= 175));
}
