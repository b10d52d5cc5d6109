//! Hop Arcade - An endless platform-hopping arcade game
//!
//! Core modules:
//! - `sim`: Deterministic simulation (physics, platforms, landing, scoring)
//! - `config`: Data-driven game tuning
//! - `game_loop`: Host frame scheduling with clamped delta time
//! - `input`: Touch events folded into per-tick input
//! - `persistence`: High score durability behind a key/value store
//! - `leaderboard`: Optional friend leaderboard (never affects simulation)
//! - `view`: Read-only frame snapshots for renderers

pub mod config;
pub mod game_loop;
pub mod input;
pub mod leaderboard;
pub mod persistence;
pub mod sim;
pub mod view;

pub use config::{ConfigError, SimulationConfig};
pub use game_loop::{GameLoop, LoopStatus};
pub use input::{InputEvent, InputQueue};

/// Default tuning constants (overridable through `SimulationConfig`)
pub mod consts {
    /// Logical view size (portrait phone canvas)
    pub const VIEW_WIDTH: f32 = 750.0;
    pub const VIEW_HEIGHT: f32 = 1334.0;

    /// Downward acceleration (pixels/s², +y is down)
    pub const GRAVITY: f32 = 2800.0;
    /// Power gained per second of charge (scaled by 100)
    pub const CHARGE_RATE: f32 = 15.0;
    pub const MIN_POWER: f32 = 100.0;
    pub const MAX_POWER: f32 = 800.0;
    /// Launch angle above horizontal
    pub const JUMP_ANGLE_DEG: f32 = 45.0;

    /// Platform spacing bounds
    pub const MIN_DISTANCE: f32 = 100.0;
    pub const MAX_DISTANCE: f32 = 350.0;
    pub const PLATFORM_WIDTH: f32 = 100.0;
    pub const PLATFORM_HEIGHT: f32 = 20.0;
    pub const PLATFORM_DEPTH: f32 = 100.0;
    pub const SPECIAL_WIDTH_SCALE: f32 = 1.2;

    /// Landing zone radii (horizontal offset from platform center)
    pub const PERFECT_RADIUS: f32 = 15.0;
    pub const SAFE_RADIUS: f32 = 40.0;

    pub const PLAYER_WIDTH: f32 = 50.0;
    pub const PLAYER_HEIGHT: f32 = 50.0;

    /// Score at which platform spacing stops widening
    pub const DIFFICULTY_MAX_SCORE: f32 = 50.0;
    pub const BASE_SCORE: u64 = 1;
    pub const PERFECT_BONUS: u64 = 2;
    pub const SPECIAL_SCORE: u64 = 30;
    pub const SPECIAL_PLATFORM_CHANCE: f32 = 0.1;
    pub const DIRECTION_FLIP_CHANCE: f32 = 0.2;

    /// Platforms kept generated beyond the current one
    pub const AHEAD_BUFFER: usize = 4;
    /// Platforms pre-allocated in the pool
    pub const POOL_PREALLOC: usize = 10;
    /// Distance past the visible left edge before a platform is recycled
    pub const RECYCLE_MARGIN: f32 = 200.0;

    /// Player bottom may be this far above a platform top and still count as reached
    pub const LANDING_TOLERANCE: f32 = 10.0;
    /// Depth below the next platform top that ends the life
    pub const FALL_THROUGH_MARGIN: f32 = 100.0;
    /// LANDING -> IDLE delay (seconds)
    pub const LANDING_GRACE: f32 = 0.1;

    pub const CAMERA_SMOOTHING: f32 = 0.1;
    pub const CAMERA_OFFSET_Y: f32 = -200.0;

    /// Largest dt a single frame may advance (avoids catch-up after backgrounding)
    pub const MAX_FRAME_DT: f32 = 1.0 / 20.0;
}

/// Linear interpolation between `a` and `b`
#[inline]
pub fn lerp(a: f32, b: f32, t: f32) -> f32 {
    a + (b - a) * t
}

/// Degrees to radians
#[inline]
pub fn deg_to_rad(degrees: f32) -> f32 {
    degrees * std::f32::consts::PI / 180.0
}

/// Uniform sample in `[min, max)`; returns `min` for an empty range
#[inline]
pub fn random_in(rng: &mut impl rand::Rng, min: f32, max: f32) -> f32 {
    min + rng.random::<f32>() * (max - min)
}
