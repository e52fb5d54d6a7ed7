//! Flight path recording
//!
//! One [`Path`] per launch. The active path is always the newest entry in the
//! history; once it is closed it never changes again.

use glam::Vec2;
use serde::{Deserialize, Serialize};

/// How an attempt ended
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum PathOutcome {
    /// Projectile overlapped the moving body
    Hit,
    /// Projectile left the field
    OutOfBounds,
    /// Session finished while the projectile was still in flight
    Abandoned,
}

/// Positions visited during one attempt, in tick order
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Path {
    /// 0-based attempt index, stable for colour assignment
    pub index: usize,
    pub points: Vec<Vec2>,
    /// `None` while the attempt is still in flight
    pub outcome: Option<PathOutcome>,
}

impl Path {
    fn new(index: usize) -> Self {
        Self {
            index,
            points: Vec::new(),
            outcome: None,
        }
    }

    #[inline]
    pub fn is_closed(&self) -> bool {
        self.outcome.is_some()
    }
}

/// Accumulates the active path and keeps every finished one
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct TrajectoryRecorder {
    history: Vec<Path>,
    recording: bool,
}

impl TrajectoryRecorder {
    pub fn new() -> Self {
        Self::default()
    }

    /// Start a fresh path and make it active.
    ///
    /// A path still open at this point is closed as abandoned first.
    pub fn begin_path(&mut self) -> usize {
        self.end_path(PathOutcome::Abandoned);
        let index = self.history.len();
        self.history.push(Path::new(index));
        self.recording = true;
        index
    }

    /// Append to the active path; ignored when nothing is active
    pub fn record(&mut self, pos: Vec2) {
        if let Some(path) = self.active_mut() {
            path.points.push(pos);
        }
    }

    /// Close the active path. Returns its index, or `None` if none was open.
    pub fn end_path(&mut self, outcome: PathOutcome) -> Option<usize> {
        let path = self.active_mut()?;
        path.outcome = Some(outcome);
        let index = path.index;
        self.recording = false;
        Some(index)
    }

    pub fn active(&self) -> Option<&Path> {
        if self.recording {
            self.history.last()
        } else {
            None
        }
    }

    fn active_mut(&mut self) -> Option<&mut Path> {
        if self.recording {
            self.history.last_mut()
        } else {
            None
        }
    }

    /// Every path so far, oldest first (including the active one)
    pub fn history(&self) -> &[Path] {
        &self.history
    }

    pub fn len(&self) -> usize {
        self.history.len()
    }

    pub fn is_empty(&self) -> bool {
        self.history.is_empty()
    }
}
