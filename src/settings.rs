//! Session configuration
//!
//! Everything here is fixed once a [`Session`](crate::sim::Session) is built.
//! Configs load from JSON; missing fields fall back to the chosen variant's
//! preset, so `{"variant": "intercept"}` is a complete config.

use std::path::Path;

use serde::{Deserialize, Serialize};
use serde_json::Value;

use crate::consts::*;
use crate::error::ConfigError;
use crate::sim::Color;

/// Which rule set applies when the projectile hits the moving body
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize, Default)]
#[serde(rename_all = "lowercase")]
pub enum Variant {
    /// Hits are counted and speed the target up
    #[default]
    #[serde(alias = "score")]
    Scoring,
    /// A hit just ends the attempt
    #[serde(alias = "interceptor")]
    Intercept,
}

impl Variant {
    pub fn as_str(&self) -> &'static str {
        match self {
            Variant::Scoring => "scoring",
            Variant::Intercept => "intercept",
        }
    }

    pub fn from_str(s: &str) -> Option<Self> {
        match s.to_lowercase().as_str() {
            "scoring" | "score" => Some(Variant::Scoring),
            "intercept" | "interceptor" => Some(Variant::Intercept),
            _ => None,
        }
    }

    /// Whether a hit bumps the hit counter and difficulty scalar
    pub fn scores_hits(&self) -> bool {
        matches!(self, Variant::Scoring)
    }
}

/// Initial placement and look of one body
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct BodyConfig {
    pub x: f32,
    pub y: f32,
    pub radius: u32,
    pub color: Color,
}

/// Complete session configuration
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct SessionConfig {
    pub variant: Variant,

    // === Field ===
    pub width: f32,
    pub height: f32,

    // === Physics ===
    /// Downward acceleration per tick
    pub gravity: f32,
    /// Click offset divisor (K)
    pub launch_time_scale: f32,
    /// Upward launch bias (B)
    pub launch_bias: f32,

    // === Rules ===
    pub max_attempts: u32,
    /// Multiplier on target speed after a scoring hit
    pub difficulty_step: f32,
    /// Wall-clock tick period for realtime drivers
    pub tick_ms: u64,

    // === Bodies ===
    /// Projectile; its position is the launch origin
    pub projectile: BodyConfig,
    /// Moving body; only its x moves
    pub target: BodyConfig,
    /// Initial signed horizontal target speed (units/tick)
    pub target_speed: f32,
}

impl Default for SessionConfig {
    fn default() -> Self {
        Self::from_variant(Variant::default())
    }
}

impl SessionConfig {
    /// Preset matching the given variant
    pub fn from_variant(variant: Variant) -> Self {
        let (projectile_radius, target, target_speed) = match variant {
            Variant::Scoring => (
                15,
                BodyConfig {
                    x: 50.0,
                    y: 200.0,
                    radius: 20,
                    color: Color::RED,
                },
                3.0,
            ),
            Variant::Intercept => (
                20,
                BodyConfig {
                    x: 50.0,
                    y: 350.0,
                    radius: 10,
                    color: Color::BLACK,
                },
                2.0,
            ),
        };

        Self {
            variant,
            width: FIELD_WIDTH,
            height: FIELD_HEIGHT,
            gravity: GRAVITY,
            launch_time_scale: LAUNCH_TIME_SCALE,
            launch_bias: LAUNCH_BIAS,
            max_attempts: MAX_ATTEMPTS,
            difficulty_step: DIFFICULTY_STEP,
            tick_ms: TICK_MS,
            projectile: BodyConfig {
                x: LAUNCH_ORIGIN_X,
                y: LAUNCH_ORIGIN_Y,
                radius: projectile_radius,
                color: Color::BROWN,
            },
            target,
            target_speed,
        }
    }

    /// Parse a JSON config, filling gaps from the variant preset
    pub fn from_json(json: &str) -> Result<Self, ConfigError> {
        let overrides: Value = serde_json::from_str(json)?;

        let variant = match overrides.get("variant") {
            Some(v) => serde_json::from_value(v.clone())?,
            None => Variant::default(),
        };

        let mut merged = serde_json::to_value(Self::from_variant(variant))?;
        merge_json(&mut merged, overrides);

        let config: Self = serde_json::from_value(merged)?;
        config.validate()?;
        Ok(config)
    }

    /// Load and validate a JSON config file
    pub fn load(path: impl AsRef<Path>) -> Result<Self, ConfigError> {
        let path = path.as_ref();
        let json = std::fs::read_to_string(path).map_err(|source| ConfigError::Io {
            path: path.to_path_buf(),
            source,
        })?;
        let config = Self::from_json(&json)?;
        log::info!(
            "Loaded {} config from {}",
            config.variant.as_str(),
            path.display()
        );
        Ok(config)
    }

    /// Reject configs the simulation can't run with
    pub fn validate(&self) -> Result<(), ConfigError> {
        if !(self.width.is_finite() && self.width > 0.0) {
            return Err(ConfigError::invalid("width", "must be positive and finite"));
        }
        if !(self.height.is_finite() && self.height > 0.0) {
            return Err(ConfigError::invalid("height", "must be positive and finite"));
        }
        if !self.gravity.is_finite() {
            return Err(ConfigError::invalid("gravity", "must be finite"));
        }
        if !self.launch_time_scale.is_finite() || self.launch_time_scale == 0.0 {
            return Err(ConfigError::invalid(
                "launch_time_scale",
                "must be finite and non-zero",
            ));
        }
        if !self.launch_bias.is_finite() {
            return Err(ConfigError::invalid("launch_bias", "must be finite"));
        }
        if self.max_attempts == 0 {
            return Err(ConfigError::invalid("max_attempts", "must be at least 1"));
        }
        if !(self.difficulty_step.is_finite() && self.difficulty_step >= 1.0) {
            return Err(ConfigError::invalid("difficulty_step", "must be finite and >= 1"));
        }
        if !self.target_speed.is_finite() {
            return Err(ConfigError::invalid("target_speed", "must be finite"));
        }
        for (field, body) in [("projectile", &self.projectile), ("target", &self.target)] {
            if body.radius == 0 {
                return Err(ConfigError::invalid(field, "radius must be positive"));
            }
            if !(body.x.is_finite() && body.y.is_finite()) {
                return Err(ConfigError::invalid(field, "position must be finite"));
            }
        }
        // The mover only reflects back toward the field from within one tick of it
        if !(0.0..=self.width).contains(&self.target.x) {
            return Err(ConfigError::invalid("target", "x must lie within [0, width]"));
        }
        // An origin off the field would make every launch an instant miss
        let origin_inside = (0.0..=self.width).contains(&self.projectile.x)
            && (0.0..=self.height).contains(&self.projectile.y);
        if !origin_inside {
            return Err(ConfigError::invalid("projectile", "origin must lie inside the field"));
        }
        Ok(())
    }
}

/// Overlay `overrides` onto `base`, recursing into nested objects
fn merge_json(base: &mut Value, overrides: Value) {
    match (base, overrides) {
        (Value::Object(base), Value::Object(overrides)) => {
            for (key, value) in overrides {
                match base.get_mut(&key) {
                    Some(slot) => merge_json(slot, value),
                    None => {
                        base.insert(key, value);
                    }
                }
            }
        }
        (slot, value) => *slot = value,
    }
}
