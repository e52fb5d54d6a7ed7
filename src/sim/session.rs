//! Session state machine
//!
//! Owns both bodies, the attempt counters and the trajectory history, and
//! advances them once per [`Session::tick`]. Launches arrive between ticks
//! through [`Session::on_launch`].
//!
//! ```text
//! Idle --launch--> InFlight --hit / out of bounds--> Idle
//!   \                  |
//!    `---- attempts used up (checked every tick) ----> Finished
//! ```

use glam::Vec2;
use serde::{Deserialize, Serialize};

use super::collision::{Bounds, intersects};
use super::motion::{BoundedLinearMover, integrate, launch_velocity};
use super::snapshot::Snapshot;
use super::state::{Body, Phase, SessionSummary};
use super::trajectory::{Path, PathOutcome, TrajectoryRecorder};
use crate::error::ConfigError;
use crate::settings::SessionConfig;

/// Something that happened during a tick
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub enum SessionEvent {
    /// Projectile hit the moving body
    Hit {
        /// 1-based attempt number
        attempt: u32,
        /// Running hit count (scoring variant only)
        hits: Option<u32>,
        /// Difficulty scalar after the hit
        difficulty: f32,
    },
    /// Projectile left the field
    Miss { attempt: u32 },
    /// Attempts exhausted; emitted once
    Finished(SessionSummary),
}

/// One run of up to `max_attempts` launches
#[derive(Debug, Clone)]
pub struct Session {
    config: SessionConfig,
    phase: Phase,
    attempts_used: u32,
    hits: u32,
    /// Multiplier on the target's base speed, >= 1
    difficulty: f32,
    time_ticks: u64,
    origin: Vec2,
    bounds: Bounds,
    projectile: Body,
    target: Body,
    mover: BoundedLinearMover,
    recorder: TrajectoryRecorder,
}

impl Session {
    /// Build a session from a config assumed to be valid
    pub fn new(config: SessionConfig) -> Self {
        let projectile = Body::from_config(&config.projectile);
        let mut target = Body::from_config(&config.target);
        let mover = BoundedLinearMover::new(config.target_speed, 0.0, config.width);
        target.vel.x = mover.velocity;

        Self {
            phase: Phase::Idle,
            attempts_used: 0,
            hits: 0,
            difficulty: 1.0,
            time_ticks: 0,
            origin: projectile.pos,
            bounds: Bounds::new(config.width, config.height),
            projectile,
            target,
            mover,
            recorder: TrajectoryRecorder::new(),
            config,
        }
    }

    /// Validate the config, then build the session
    pub fn try_new(config: SessionConfig) -> Result<Self, ConfigError> {
        config.validate()?;
        Ok(Self::new(config))
    }

    /// Whether a launch would be accepted right now
    pub fn can_launch(&self) -> bool {
        self.phase == Phase::Idle && self.attempts_used < self.config.max_attempts
    }

    /// Launch toward `point`. Returns false (and changes nothing) unless idle
    /// with attempts remaining.
    pub fn on_launch(&mut self, point: Vec2) -> bool {
        if !self.can_launch() {
            log::debug!(
                "Launch at ({:.1}, {:.1}) ignored in {:?} ({}/{} attempts)",
                point.x,
                point.y,
                self.phase,
                self.attempts_used,
                self.config.max_attempts
            );
            return false;
        }

        self.attempts_used += 1;
        self.projectile.reset_to(self.origin);
        self.projectile.vel = launch_velocity(
            self.origin,
            point,
            self.config.launch_time_scale,
            self.config.launch_bias,
        );
        self.recorder.begin_path();
        self.phase = Phase::InFlight;

        log::info!(
            "Attempt {}/{} launched toward ({:.1}, {:.1}), v=({:.2}, {:.2})",
            self.attempts_used,
            self.config.max_attempts,
            point.x,
            point.y,
            self.projectile.vel.x,
            self.projectile.vel.y
        );
        true
    }

    /// Advance the simulation by one tick, returning what happened
    pub fn tick(&mut self) -> Vec<SessionEvent> {
        let mut events = Vec::new();
        if self.phase == Phase::Finished {
            return events;
        }

        self.time_ticks += 1;
        self.mover.advance(&mut self.target);

        if self.phase == Phase::InFlight {
            integrate(&mut self.projectile, self.config.gravity);
            self.recorder.record(self.projectile.pos);
            log::trace!(
                "tick {}: projectile ({:.2}, {:.2}) target x {:.2}",
                self.time_ticks,
                self.projectile.pos.x,
                self.projectile.pos.y,
                self.target.pos.x
            );

            if intersects(&self.projectile, &self.target) {
                events.push(self.resolve_hit());
            } else if self.bounds.is_outside(self.projectile.pos) {
                events.push(self.resolve_miss());
            }
        }

        if self.attempts_used >= self.config.max_attempts {
            events.push(self.finish());
        }

        events
    }

    fn resolve_hit(&mut self) -> SessionEvent {
        self.end_attempt(PathOutcome::Hit);

        let scoring = self.config.variant.scores_hits();
        if scoring {
            self.hits += 1;
            self.difficulty *= self.config.difficulty_step;
            self.mover.set_speed(self.config.target_speed * self.difficulty);
            self.target.vel.x = self.mover.velocity;
        }

        log::debug!(
            "Attempt {} hit the target (hits {}, difficulty {:.3})",
            self.attempts_used,
            self.hits,
            self.difficulty
        );

        SessionEvent::Hit {
            attempt: self.attempts_used,
            hits: scoring.then_some(self.hits),
            difficulty: self.difficulty,
        }
    }

    fn resolve_miss(&mut self) -> SessionEvent {
        log::debug!(
            "Attempt {} left the field at ({:.1}, {:.1})",
            self.attempts_used,
            self.projectile.pos.x,
            self.projectile.pos.y
        );
        self.end_attempt(PathOutcome::OutOfBounds);
        SessionEvent::Miss {
            attempt: self.attempts_used,
        }
    }

    fn end_attempt(&mut self, outcome: PathOutcome) {
        self.recorder.end_path(outcome);
        self.projectile.reset_to(self.origin);
        self.phase = Phase::Idle;
    }

    fn finish(&mut self) -> SessionEvent {
        // The last shot gets no grace period; it is frozen where it is
        if let Some(index) = self.recorder.end_path(PathOutcome::Abandoned) {
            log::debug!("Attempt {} abandoned in flight", index + 1);
        }
        self.phase = Phase::Finished;

        let summary = self.summary();
        match summary.hits {
            Some(hits) => log::info!("Game over! You hit the target {} times!", hits),
            None => log::info!("Session finished after {} paths", summary.attempts),
        }
        SessionEvent::Finished(summary)
    }

    /// Totals so far (final once the phase is `Finished`)
    pub fn summary(&self) -> SessionSummary {
        SessionSummary {
            attempts: self.attempts_used,
            hits: self.hits(),
            difficulty: self.difficulty,
            ticks: self.time_ticks,
        }
    }

    /// Owned read-only view for renderers
    pub fn snapshot(&self) -> Snapshot {
        Snapshot::capture(self)
    }

    pub fn config(&self) -> &SessionConfig {
        &self.config
    }

    pub fn phase(&self) -> Phase {
        self.phase
    }

    pub fn is_finished(&self) -> bool {
        self.phase == Phase::Finished
    }

    pub fn attempts_used(&self) -> u32 {
        self.attempts_used
    }

    pub fn attempts_max(&self) -> u32 {
        self.config.max_attempts
    }

    /// Hit count, only tracked by the scoring variant
    pub fn hits(&self) -> Option<u32> {
        self.config.variant.scores_hits().then_some(self.hits)
    }

    pub fn difficulty(&self) -> f32 {
        self.difficulty
    }

    pub fn time_ticks(&self) -> u64 {
        self.time_ticks
    }

    /// Fixed launch origin of the projectile
    pub fn origin(&self) -> Vec2 {
        self.origin
    }

    pub fn bounds(&self) -> Bounds {
        self.bounds
    }

    pub fn projectile(&self) -> &Body {
        &self.projectile
    }

    pub fn target(&self) -> &Body {
        &self.target
    }

    /// The target's motion rule (copy it to look ahead)
    pub fn mover(&self) -> &BoundedLinearMover {
        &self.mover
    }

    pub fn active_path(&self) -> Option<&Path> {
        self.recorder.active()
    }

    pub fn paths(&self) -> &[Path] {
        self.recorder.history()
    }
}
