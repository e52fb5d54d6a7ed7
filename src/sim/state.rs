//! Simulation entities and session-level state types

use glam::Vec2;
use serde::{Deserialize, Serialize};

use crate::settings::BodyConfig;

/// Current phase of a session
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum Phase {
    /// No projectile in flight, waiting for a launch
    Idle,
    /// Projectile under gravity, path being recorded
    InFlight,
    /// All attempts used; terminal
    Finished,
}

/// Display colour, carried through untouched for the renderer
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct Color {
    pub r: u8,
    pub g: u8,
    pub b: u8,
}

impl Color {
    pub const BLACK: Color = Color::rgb(0, 0, 0);
    pub const RED: Color = Color::rgb(255, 0, 0);
    pub const GRAY: Color = Color::rgb(128, 128, 128);
    pub const BROWN: Color = Color::rgb(139, 69, 19);

    pub const fn rgb(r: u8, g: u8, b: u8) -> Self {
        Self { r, g, b }
    }

    pub fn from_hsv(hue: f32, saturation: f32, value: f32) -> Self {
        let (r, g, b) = crate::hsv_to_rgb(hue, saturation, value);
        Self { r, g, b }
    }
}

/// A circular body: the projectile or the moving target
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Body {
    pub pos: Vec2,
    pub vel: Vec2,
    /// Always > 0
    pub radius: u32,
    pub color: Color,
}

impl Body {
    pub fn new(pos: Vec2, radius: u32, color: Color) -> Self {
        debug_assert!(radius > 0, "body radius must be positive");
        Self {
            pos,
            vel: Vec2::ZERO,
            radius,
            color,
        }
    }

    pub fn from_config(config: &BodyConfig) -> Self {
        Self::new(Vec2::new(config.x, config.y), config.radius, config.color)
    }

    /// Move back to `origin` and drop any velocity
    pub fn reset_to(&mut self, origin: Vec2) {
        self.pos = origin;
        self.vel = Vec2::ZERO;
    }

    #[inline]
    pub fn radius_f32(&self) -> f32 {
        self.radius as f32
    }
}

/// End-of-session totals
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct SessionSummary {
    pub attempts: u32,
    /// `Some` only when the variant scores hits
    pub hits: Option<u32>,
    pub difficulty: f32,
    pub ticks: u64,
}
