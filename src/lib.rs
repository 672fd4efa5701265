//! Sky Climb - progression engine for a vertical endless climber
//!
//! Core modules:
//! - `sim`: Deterministic run simulation (generation, spawning, patrol, scoring, termination)
//! - `config`: Immutable tunables, loaded from JSON and validated
//! - `highscores`: In-memory leaderboard of finished runs
//!
//! Rendering, input polling, camera smoothing and physics integration belong to
//! the host. The host feeds input and contact events into [`sim::GameLoop::tick`]
//! and mirrors the returned [`sim::RunSnapshot`].

pub mod config;
pub mod highscores;
pub mod sim;

pub use config::{ConfigError, GameConfig};
pub use highscores::HighScores;

/// Tunables of the classic climber
pub mod consts {
    /// Horizontal run speed (pixels/s)
    pub const PLAYER_SPEED: f32 = 250.0;
    /// Upward impulse applied per jump (pixels/s)
    pub const PLAYER_JUMP: f32 = 500.0;
    /// World gravity handed to the host physics (pixels/s²)
    pub const GRAVITY: f32 = 1000.0;
    /// Airborne jumps allowed before landing again
    pub const MAX_JUMPS: u32 = 3;

    pub const SILVER_POINTS: u64 = 1;
    pub const GOLD_POINTS: u64 = 5;

    /// Dragon patrol speed (pixels/s)
    pub const DRAGON_SPEED: f32 = 100.0;
    /// Vertical distance between consecutive platforms
    pub const PLATFORM_SPACING: f32 = 120.0;

    /// Default viewport
    pub const VIEWPORT_WIDTH: f32 = 800.0;
    pub const VIEWPORT_HEIGHT: f32 = 800.0;

    /// Platforms laid out when a run starts
    pub const INITIAL_PLATFORMS: usize = 15;
    /// Platforms added each time the player nears the frontier
    pub const BATCH_SIZE: usize = 4;
    /// Distance below the generation cursor that triggers a new batch
    pub const LOOKAHEAD_MARGIN: f32 = 400.0;
    /// Horizontal margins kept free of platform centers
    pub const PLATFORM_MARGIN: f32 = 100.0;
    /// First platform sits this far above the viewport bottom
    pub const FIRST_PLATFORM_OFFSET: f32 = 50.0;

    /// Player spawn: x, and height above the viewport bottom
    pub const PLAYER_START_X: f32 = 100.0;
    pub const PLAYER_START_LIFT: f32 = 200.0;

    pub const SILVER_CHANCE: f64 = 0.8;
    /// Rolled only when a silver coin spawned
    pub const GOLD_CHANCE: f64 = 0.4;
    pub const ENEMY_CHANCE: f64 = 0.25;
    /// Half of a dragon's patrol range, centered on its platform
    pub const PATROL_HALF_WIDTH: f32 = 80.0;
    pub const COIN_LIFT: f32 = 32.0;
    pub const GOLD_OFFSET_X: f32 = 40.0;
    pub const ENEMY_LIFT: f32 = 25.0;

    /// Camera follow smoothing (fraction of the gap closed per frame)
    pub const CAMERA_LERP: f32 = 0.08;
    /// Camera deadzone as fractions of the viewport
    pub const CAMERA_DEADZONE_WIDTH: f32 = 0.2;
    pub const CAMERA_DEADZONE_HEIGHT: f32 = 0.25;
}

/// Move `current` toward `target` by `factor` of the remaining gap
#[inline]
pub fn approach(current: f32, target: f32, factor: f32) -> f32 {
    current + (target - current) * factor.clamp(0.0, 1.0)
}
