//! Coins and dragons placed on freshly generated platforms

use glam::Vec2;
use rand::Rng;

use super::state::{Coin, CoinKind, Enemy, Platform, RunState};
use crate::config::{GameConfig, SpawnConfig};

/// What [`ContentSpawner::attach`] created for one platform
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct SpawnOutcome {
    pub silver: Option<u32>,
    pub gold: Option<u32>,
    pub enemy: Option<u32>,
}

/// Rolls independent per-platform content
#[derive(Debug, Clone)]
pub struct ContentSpawner {
    spawn: SpawnConfig,
    dragon_speed: f32,
}

impl ContentSpawner {
    pub fn new(config: &GameConfig) -> Self {
        Self {
            spawn: config.spawn,
            dragon_speed: config.dragon_speed,
        }
    }

    /// Populate every platform in `state.platforms[range]`
    pub fn attach_range<R: Rng>(
        &self,
        range: std::ops::Range<usize>,
        state: &mut RunState,
        rng: &mut R,
    ) {
        for index in range {
            let platform = state.platforms[index];
            self.attach(&platform, state, rng);
        }
    }

    /// Roll silver, gold (only after silver) and enemy for one platform
    pub fn attach<R: Rng>(
        &self,
        platform: &Platform,
        state: &mut RunState,
        rng: &mut R,
    ) -> SpawnOutcome {
        let mut outcome = SpawnOutcome::default();
        let coin_y = platform.pos.y - self.spawn.coin_lift;

        if rng.random_bool(self.spawn.silver_chance) {
            let id = state.next_entity_id();
            state.coins.push(Coin {
                id,
                kind: CoinKind::Silver,
                pos: Vec2::new(platform.pos.x, coin_y),
                platform: platform.id,
            });
            outcome.silver = Some(id);

            if rng.random_bool(self.spawn.gold_chance) {
                let id = state.next_entity_id();
                state.coins.push(Coin {
                    id,
                    kind: CoinKind::Gold,
                    pos: Vec2::new(platform.pos.x + self.spawn.gold_offset_x, coin_y),
                    platform: platform.id,
                });
                outcome.gold = Some(id);
            }
        }

        if rng.random_bool(self.spawn.enemy_chance) {
            let id = state.next_entity_id();
            let half_width = self.spawn.patrol_half_width;
            state.enemies.push(Enemy {
                id,
                pos: Vec2::new(platform.pos.x, platform.pos.y - self.spawn.enemy_lift),
                min_x: platform.pos.x - half_width,
                max_x: platform.pos.x + half_width,
                vel_x: self.dragon_speed,
                platform: platform.id,
            });
            outcome.enemy = Some(id);
        }

        outcome
    }
}
