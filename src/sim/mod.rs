//! Deterministic simulation module
//!
//! All gameplay logic lives here. This module must be pure and deterministic:
//! - One fixed step per `tick()`, driven from outside
//! - Seeded RNG only (autopilot)
//! - No rendering, timing, or platform dependencies

pub mod autopilot;
pub mod collision;
pub mod motion;
pub mod session;
pub mod snapshot;
pub mod state;
pub mod trajectory;

#[cfg(test)]
mod proptest_sim;

pub use autopilot::Autopilot;
pub use collision::{Bounds, circles_overlap, intersects};
pub use motion::{BoundedLinearMover, integrate, launch_point, launch_velocity};
pub use session::{Session, SessionEvent};
pub use snapshot::{BodyView, PathView, Snapshot, path_hue};
pub use state::{Body, Color, Phase, SessionSummary};
pub use trajectory::{Path, PathOutcome, TrajectoryRecorder};
