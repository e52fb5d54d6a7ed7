//! Read-only view of a session for renderers
//!
//! A renderer gets an owned [`Snapshot`] each frame and never touches the
//! live [`Session`]. Paths carry a hue derived from their index so colours
//! stay stable across frames: `hue = index / attempts_max`.

use glam::Vec2;
use serde::{Deserialize, Serialize};

use super::collision::Bounds;
use super::session::Session;
use super::state::{Body, Color, Phase};
use super::trajectory::{Path, PathOutcome};
use crate::consts::{PATH_SATURATION, PATH_VALUE};

/// What a renderer needs to draw one body
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct BodyView {
    pub pos: Vec2,
    pub radius: u32,
    pub color: Color,
}

impl From<&Body> for BodyView {
    fn from(body: &Body) -> Self {
        Self {
            pos: body.pos,
            radius: body.radius,
            color: body.color,
        }
    }
}

/// One recorded flight path
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct PathView {
    pub index: usize,
    pub hue: f32,
    /// History colour for this index
    pub color: Color,
    /// Still being recorded
    pub active: bool,
    pub outcome: Option<PathOutcome>,
    pub points: Vec<Vec2>,
}

impl PathView {
    fn from_path(path: &Path, attempts_max: u32) -> Self {
        let hue = path_hue(path.index, attempts_max);
        Self {
            index: path.index,
            hue,
            color: Color::from_hsv(hue, PATH_SATURATION, PATH_VALUE),
            active: !path.is_closed(),
            outcome: path.outcome,
            points: path.points.clone(),
        }
    }

    /// Colour to draw with: gray while in flight, the history colour after
    pub fn display_color(&self) -> Color {
        if self.active { Color::GRAY } else { self.color }
    }
}

/// Hue in `[0, 1)` for the path at `index`
#[inline]
pub fn path_hue(index: usize, attempts_max: u32) -> f32 {
    index as f32 / attempts_max.max(1) as f32
}

/// Everything observable about a session at one instant
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Snapshot {
    pub phase: Phase,
    pub tick: u64,
    pub attempts_used: u32,
    pub attempts_max: u32,
    /// `Some` only for the scoring variant
    pub hits: Option<u32>,
    pub difficulty: f32,
    pub bounds: Bounds,
    pub projectile: BodyView,
    pub target: BodyView,
    /// Oldest first; the active path, if any, is last
    pub paths: Vec<PathView>,
}

impl Snapshot {
    pub fn capture(session: &Session) -> Self {
        let attempts_max = session.attempts_max();
        Self {
            phase: session.phase(),
            tick: session.time_ticks(),
            attempts_used: session.attempts_used(),
            attempts_max,
            hits: session.hits(),
            difficulty: session.difficulty(),
            bounds: session.bounds(),
            projectile: session.projectile().into(),
            target: session.target().into(),
            paths: session
                .paths()
                .iter()
                .map(|path| PathView::from_path(path, attempts_max))
                .collect(),
        }
    }

    pub fn active_path(&self) -> Option<&PathView> {
        self.paths.last().filter(|p| p.active)
    }
}
