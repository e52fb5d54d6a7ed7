//! Ballistic Intercept - a launched body versus a sweeping target
//!
//! Core modules:
//! - `sim`: Deterministic simulation (integrator, mover, collisions, session state machine)
//! - `settings`: Session configuration fixed at initialization
//! - `error`: Configuration errors
//!
//! Rendering and input capture live outside the crate. A renderer polls
//! [`sim::Session::snapshot`] once per tick; an input source feeds
//! [`sim::Session::on_launch`] between ticks.

pub mod error;
pub mod settings;
pub mod sim;

pub use error::ConfigError;
pub use settings::{BodyConfig, SessionConfig, Variant};
pub use sim::{Session, SessionEvent, Snapshot};

/// Game configuration constants
pub mod consts {
    /// Field dimensions (screen units, y grows downward)
    pub const FIELD_WIDTH: f32 = 500.0;
    pub const FIELD_HEIGHT: f32 = 500.0;

    /// Downward acceleration applied to the projectile (units/tick²)
    pub const GRAVITY: f32 = 0.2;
    /// Divisor turning the click offset into a per-tick velocity
    pub const LAUNCH_TIME_SCALE: f32 = 20.0;
    /// Upward bias subtracted from the launch vy
    pub const LAUNCH_BIAS: f32 = 2.0;

    /// Attempts per session
    pub const MAX_ATTEMPTS: u32 = 12;
    /// Target speed multiplier applied after each scoring hit
    pub const DIFFICULTY_STEP: f32 = 1.1;
    /// Wall-clock tick period for realtime drivers
    pub const TICK_MS: u64 = 20;

    /// Projectile origin (100 units above the bottom edge)
    pub const LAUNCH_ORIGIN_X: f32 = 400.0;
    pub const LAUNCH_ORIGIN_Y: f32 = FIELD_HEIGHT - 100.0;

    /// Path colouring (HSV saturation/value; hue comes from the path index)
    pub const PATH_SATURATION: f32 = 0.8;
    pub const PATH_VALUE: f32 = 1.0;
}

/// Convert HSV (all components in 0..=1, hue wraps) to 8-bit RGB
pub fn hsv_to_rgb(hue: f32, saturation: f32, value: f32) -> (u8, u8, u8) {
    let h = (hue - hue.floor()) * 6.0;
    let sector = h.floor();
    let f = h - sector;
    let p = value * (1.0 - saturation);
    let q = value * (1.0 - saturation * f);
    let t = value * (1.0 - saturation * (1.0 - f));

    let (r, g, b) = match sector as u32 {
        0 => (value, t, p),
        1 => (q, value, p),
        2 => (p, value, t),
        3 => (p, q, value),
        4 => (t, p, value),
        _ => (value, p, q),
    };

    let to_byte = |c: f32| (c * 255.0 + 0.5).clamp(0.0, 255.0) as u8;
    (to_byte(r), to_byte(g), to_byte(b))
}
