//! Game configuration
//!
//! Every tunable is explicit: deserialization has no serde defaults, so a JSON
//! file must name each field. [`GameConfig::classic`] spells out the classic
//! values for hosts that do not ship a file.

use std::path::{Path, PathBuf};

use glam::Vec2;
use serde::{Deserialize, Serialize};
use thiserror::Error;

use crate::consts::*;

/// Errors raised while loading or validating a configuration
#[derive(Debug, Error)]
pub enum ConfigError {
    #[error("failed to read config file {path}")]
    Io {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },
    #[error("malformed config JSON")]
    Json(#[from] serde_json::Error),
    #[error("invalid `{field}`: {reason}")]
    Invalid { field: &'static str, reason: String },
}

/// Points awarded per coin kind
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(deny_unknown_fields)]
pub struct CoinPoints {
    pub silver: u64,
    pub gold: u64,
}

/// Visible area the host renders
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
#[serde(deny_unknown_fields)]
pub struct Viewport {
    pub width: f32,
    pub height: f32,
}

/// How a new platform's x relates to the previous platform's x
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
#[serde(tag = "mode", rename_all = "snake_case")]
pub enum OverlapPolicy {
    /// Draw x independently; consecutive platforms may line up exactly
    Allow,
    /// Redraw while x is within `min_gap` of the previous platform,
    /// keeping the last draw after `max_attempts`
    Avoid { min_gap: f32, max_attempts: u32 },
}

/// Level generation tunables
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
#[serde(deny_unknown_fields)]
pub struct GenerationConfig {
    pub initial_platforms: usize,
    pub batch_size: usize,
    pub lookahead_margin: f32,
    pub margin_left: f32,
    pub margin_right: f32,
    pub first_platform_offset: f32,
    pub overlap: OverlapPolicy,
}

/// Content spawn tunables
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
#[serde(deny_unknown_fields)]
pub struct SpawnConfig {
    pub silver_chance: f64,
    /// Conditional on a silver coin having spawned
    pub gold_chance: f64,
    pub enemy_chance: f64,
    pub patrol_half_width: f32,
    pub coin_lift: f32,
    pub gold_offset_x: f32,
    pub enemy_lift: f32,
}

/// Follow parameters handed to the host camera
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
#[serde(deny_unknown_fields)]
pub struct CameraConfig {
    pub lerp: f32,
    /// Fraction of the viewport width
    pub deadzone_width: f32,
    /// Fraction of the viewport height
    pub deadzone_height: f32,
}

/// Complete set of tunables for a climb
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(deny_unknown_fields)]
pub struct GameConfig {
    pub player_speed: f32,
    pub player_jump: f32,
    /// Passed through to the host physics; the core never integrates
    pub gravity: f32,
    pub max_jumps: u32,
    pub coin_points: CoinPoints,
    pub dragon_speed: f32,
    pub platform_spacing: f32,
    pub viewport: Viewport,
    /// Player spawn x
    pub player_start_x: f32,
    /// Player spawn height above the viewport bottom
    pub player_start_lift: f32,
    pub generation: GenerationConfig,
    pub spawn: SpawnConfig,
    pub camera: CameraConfig,
}

impl Default for GameConfig {
    fn default() -> Self {
        Self::classic()
    }
}

impl GameConfig {
    /// The classic tunables
    pub fn classic() -> Self {
        Self {
            player_speed: PLAYER_SPEED,
            player_jump: PLAYER_JUMP,
            gravity: GRAVITY,
            max_jumps: MAX_JUMPS,
            coin_points: CoinPoints {
                silver: SILVER_POINTS,
                gold: GOLD_POINTS,
            },
            dragon_speed: DRAGON_SPEED,
            platform_spacing: PLATFORM_SPACING,
            viewport: Viewport {
                width: VIEWPORT_WIDTH,
                height: VIEWPORT_HEIGHT,
            },
            player_start_x: PLAYER_START_X,
            player_start_lift: PLAYER_START_LIFT,
            generation: GenerationConfig {
                initial_platforms: INITIAL_PLATFORMS,
                batch_size: BATCH_SIZE,
                lookahead_margin: LOOKAHEAD_MARGIN,
                margin_left: PLATFORM_MARGIN,
                margin_right: PLATFORM_MARGIN,
                first_platform_offset: FIRST_PLATFORM_OFFSET,
                overlap: OverlapPolicy::Allow,
            },
            spawn: SpawnConfig {
                silver_chance: SILVER_CHANCE,
                gold_chance: GOLD_CHANCE,
                enemy_chance: ENEMY_CHANCE,
                patrol_half_width: PATROL_HALF_WIDTH,
                coin_lift: COIN_LIFT,
                gold_offset_x: GOLD_OFFSET_X,
                enemy_lift: ENEMY_LIFT,
            },
            camera: CameraConfig {
                lerp: CAMERA_LERP,
                deadzone_width: CAMERA_DEADZONE_WIDTH,
                deadzone_height: CAMERA_DEADZONE_HEIGHT,
            },
        }
    }

    /// Parse and validate a JSON document
    pub fn from_json(json: &str) -> Result<Self, ConfigError> {
        let config: Self = serde_json::from_str(json)?;
        config.validate()?;
        Ok(config)
    }

    /// Read, parse and validate a JSON file
    pub fn load(path: impl AsRef<Path>) -> Result<Self, ConfigError> {
        let path = path.as_ref();
        let json = std::fs::read_to_string(path).map_err(|source| ConfigError::Io {
            path: path.to_path_buf(),
            source,
        })?;
        let config = Self::from_json(&json)?;
        log::info!("Loaded config from {}", path.display());
        Ok(config)
    }

    /// Check every tunable is usable
    pub fn validate(&self) -> Result<(), ConfigError> {
        non_negative("player_speed", self.player_speed)?;
        non_negative("player_jump", self.player_jump)?;
        non_negative("gravity", self.gravity)?;
        non_negative("dragon_speed", self.dragon_speed)?;
        positive("platform_spacing", self.platform_spacing)?;
        positive("viewport.width", self.viewport.width)?;
        positive("viewport.height", self.viewport.height)?;
        finite("player_start_x", self.player_start_x)?;
        finite("player_start_lift", self.player_start_lift)?;

        let generation = &self.generation;
        if generation.batch_size == 0 {
            return Err(invalid("generation.batch_size", "must be at least 1"));
        }
        if generation.initial_platforms == 0 {
            return Err(invalid("generation.initial_platforms", "must be at least 1"));
        }
        non_negative("generation.lookahead_margin", generation.lookahead_margin)?;
        non_negative("generation.margin_left", generation.margin_left)?;
        non_negative("generation.margin_right", generation.margin_right)?;
        finite("generation.first_platform_offset", generation.first_platform_offset)?;
        if generation.margin_left > self.viewport.width - generation.margin_right {
            return Err(invalid(
                "generation.margin_left",
                format!(
                    "margins {} + {} leave no room in a viewport {} wide",
                    generation.margin_left, generation.margin_right, self.viewport.width
                ),
            ));
        }
        if let OverlapPolicy::Avoid { min_gap, .. } = generation.overlap {
            non_negative("generation.overlap.min_gap", min_gap)?;
        }

        let spawn = &self.spawn;
        probability("spawn.silver_chance", spawn.silver_chance)?;
        probability("spawn.gold_chance", spawn.gold_chance)?;
        probability("spawn.enemy_chance", spawn.enemy_chance)?;
        positive("spawn.patrol_half_width", spawn.patrol_half_width)?;
        finite("spawn.coin_lift", spawn.coin_lift)?;
        finite("spawn.gold_offset_x", spawn.gold_offset_x)?;
        finite("spawn.enemy_lift", spawn.enemy_lift)?;

        if !(self.camera.lerp > 0.0 && self.camera.lerp <= 1.0) {
            return Err(invalid("camera.lerp", "must be in (0, 1]"));
        }
        unit("camera.deadzone_width", self.camera.deadzone_width)?;
        unit("camera.deadzone_height", self.camera.deadzone_height)?;
        Ok(())
    }

    /// Horizontal range platform centers are drawn from
    pub fn platform_x_range(&self) -> (f32, f32) {
        (
            self.generation.margin_left,
            self.viewport.width - self.generation.margin_right,
        )
    }

    /// Height of the first platform of a run
    pub fn first_platform_y(&self) -> f32 {
        self.viewport.height - self.generation.first_platform_offset
    }

    /// Where the player appears at the start of a run
    pub fn player_start(&self) -> Vec2 {
        Vec2::new(
            self.player_start_x,
            self.viewport.height - self.player_start_lift,
        )
    }
}

fn invalid(field: &'static str, reason: impl Into<String>) -> ConfigError {
    ConfigError::Invalid {
        field,
        reason: reason.into(),
    }
}

fn finite(field: &'static str, value: f32) -> Result<(), ConfigError> {
    if value.is_finite() {
        Ok(())
    } else {
        Err(invalid(field, format!("{value} is not finite")))
    }
}

fn non_negative(field: &'static str, value: f32) -> Result<(), ConfigError> {
    finite(field, value)?;
    if value < 0.0 {
        return Err(invalid(field, format!("{value} is negative")));
    }
    Ok(())
}

fn positive(field: &'static str, value: f32) -> Result<(), ConfigError> {
    finite(field, value)?;
    if value <= 0.0 {
        return Err(invalid(field, format!("{value} must be greater than zero")));
    }
    Ok(())
}

fn unit(field: &'static str, value: f32) -> Result<(), ConfigError> {
    if (0.0..=1.0).contains(&value) {
        Ok(())
    } else {
        Err(invalid(field, format!("{value} is outside [0, 1]")))
    }
}

fn probability(field: &'static str, value: f64) -> Result<(), ConfigError> {
    if (0.0..=1.0).contains(&value) {
        Ok(())
    } else {
        Err(invalid(field, format!("{value} is not a probability")))
    }
}
