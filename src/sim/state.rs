//! Run state and entity types
//!
//! World "up" is decreasing y. Everything a run owns lives in [`RunState`];
//! the components that mutate it keep only configuration.

use glam::Vec2;
use serde::{Deserialize, Serialize};

use crate::config::{CameraConfig, GameConfig};

/// Lifecycle of a single run
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum RunPhase {
    Active,
    Terminated(TerminationCause),
}

/// Why a run ended
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum TerminationCause {
    /// Touched a dragon
    EnemyContact { enemy: u32 },
    /// Dropped below the bottom edge of the camera
    FellOutOfView,
}

/// A static platform
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct Platform {
    pub id: u32,
    pub pos: Vec2,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum CoinKind {
    Silver,
    Gold,
}

/// A collectible coin resting above its platform
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct Coin {
    pub id: u32,
    pub kind: CoinKind,
    pub pos: Vec2,
    /// Owning platform
    pub platform: u32,
}

/// A patrolling dragon; gravity never applies
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct Enemy {
    pub id: u32,
    pub pos: Vec2,
    pub min_x: f32,
    pub max_x: f32,
    pub vel_x: f32,
    /// Owning platform
    pub platform: u32,
}

impl Enemy {
    /// Whether `x` lies inside the patrol bounds
    #[inline]
    pub fn in_bounds(&self) -> bool {
        self.min_x <= self.pos.x && self.pos.x <= self.max_x
    }
}

/// The climber's body as last reported by the host physics
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct Player {
    pub pos: Vec2,
    pub vel: Vec2,
}

/// View onto the world, scrolled by the host
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct Camera {
    /// Top edge of the view in world space
    pub scroll_y: f32,
    pub viewport_height: f32,
    /// Follow registration handed to the host camera
    pub follow: Option<CameraFollow>,
}

impl Camera {
    /// Bottom edge of the view in world space
    #[inline]
    pub fn bottom(&self) -> f32 {
        self.scroll_y + self.viewport_height
    }
}

/// Follow target and smoothing the host camera should apply
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct CameraFollow {
    /// Always the player for now
    pub target: FollowTarget,
    pub lerp: f32,
    /// Deadzone size in world units
    pub deadzone: Vec2,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum FollowTarget {
    Player,
}

impl CameraFollow {
    pub fn player(camera: &CameraConfig, viewport: Vec2) -> Self {
        Self {
            target: FollowTarget::Player,
            lerp: camera.lerp,
            deadzone: Vec2::new(
                viewport.x * camera.deadzone_width,
                viewport.y * camera.deadzone_height,
            ),
        }
    }
}

/// Everything owned by one run
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct RunState {
    /// Runs started since the loop was created (0-based)
    pub run_index: u32,
    pub phase: RunPhase,
    pub score: u64,
    /// Airborne jumps used since the last platform contact
    pub jump_count: u32,
    /// Simulation tick counter
    pub time_ticks: u64,
    pub player: Player,
    pub camera: Camera,
    /// Generated platforms, oldest (lowest) first
    pub platforms: Vec<Platform>,
    pub coins: Vec<Coin>,
    pub enemies: Vec<Enemy>,
    /// Height the next generated platform will take
    pub next_platform_y: f32,
    /// x of the most recent platform
    pub last_platform_x: Option<f32>,
    /// Starting height of the player
    pub start_y: f32,
    /// Highest point (smallest y) the player has reached
    pub peak_y: f32,
    /// Next entity ID
    next_id: u32,
}

impl RunState {
    /// Empty run with the player and camera at their starting positions.
    /// Platforms are laid out by the generator.
    pub fn new(config: &GameConfig, run_index: u32) -> Self {
        let start = config.player_start();
        let viewport = Vec2::new(config.viewport.width, config.viewport.height);
        Self {
            run_index,
            phase: RunPhase::Active,
            score: 0,
            jump_count: 0,
            time_ticks: 0,
            player: Player {
                pos: start,
                vel: Vec2::ZERO,
            },
            camera: Camera {
                scroll_y: 0.0,
                viewport_height: config.viewport.height,
                follow: Some(CameraFollow::player(&config.camera, viewport)),
            },
            platforms: Vec::new(),
            coins: Vec::new(),
            enemies: Vec::new(),
            next_platform_y: config.first_platform_y(),
            last_platform_x: None,
            start_y: start.y,
            peak_y: start.y,
            next_id: 1,
        }
    }

    /// Allocate a new entity ID. Wraps past `u32::MAX`, skipping 0 (the player).
    pub fn next_entity_id(&mut self) -> u32 {
        let id = self.next_id;
        self.next_id = self.next_id.wrapping_add(1).max(1);
        id
    }

    pub fn is_active(&self) -> bool {
        self.phase == RunPhase::Active
    }

    /// y of the highest generated platform, if any
    pub fn frontier_y(&self) -> Option<f32> {
        self.platforms.last().map(|p| p.pos.y)
    }

    /// How far above its start the player has climbed
    pub fn height_climbed(&self) -> f32 {
        (self.start_y - self.peak_y).max(0.0)
    }

    pub fn platform(&self, id: u32) -> Option<&Platform> {
        self.platforms.iter().find(|p| p.id == id)
    }

    pub fn coin(&self, id: u32) -> Option<&Coin> {
        self.coins.iter().find(|c| c.id == id)
    }

    pub fn enemy(&self, id: u32) -> Option<&Enemy> {
        self.enemies.iter().find(|e| e.id == id)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_new_run_starts_clean() {
        let config = GameConfig::classic();
        let state = RunState::new(&config, 2);
        assert_eq!(state.run_index, 2);
        assert!(state.is_active());
        assert_eq!(state.score, 0);
        assert_eq!(state.jump_count, 0);
        assert!(state.platforms.is_empty());
        assert_eq!(state.next_platform_y, 750.0);
        assert_eq!(state.camera.bottom(), 800.0);
        assert_eq!(state.frontier_y(), None);
        assert_eq!(state.height_climbed(), 0.0);

        let follow = state.camera.follow.unwrap();
        assert_eq!(follow.target, FollowTarget::Player);
        assert!((follow.deadzone.x - 160.0).abs() < 1e-4);
        assert!((follow.deadzone.y - 200.0).abs() < 1e-4);
    }

    #[test]
    fn test_entity_ids_are_sequential() {
        let mut state = RunState::new(&GameConfig::classic(), 0);
        assert_eq!(state.next_entity_id(), 1);
        assert_eq!(state.next_entity_id(), 2);
        assert_eq!(state.next_entity_id(), 3);
    }

    #[test]
    fn test_entity_ids_wrap_past_zero() {
        let mut state = RunState::new(&GameConfig::classic(), 0);
        state.next_id = u32::MAX;
        assert_eq!(state.next_entity_id(), u32::MAX);
        assert_eq!(state.next_entity_id(), 1);
    }

    #[test]
    fn test_height_climbed_tracks_peak() {
        let mut state = RunState::new(&GameConfig::classic(), 0);
        state.peak_y = state.start_y - 360.0;
        assert_eq!(state.height_climbed(), 360.0);
    }
}
