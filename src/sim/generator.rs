//! Platform generation ahead of the climber

use std::ops::Range;

use glam::Vec2;
use rand::Rng;

use super::state::{Platform, RunState};
use crate::config::{GameConfig, OverlapPolicy};

/// Lays out platforms upward from the run's generation cursor
#[derive(Debug, Clone)]
pub struct LevelGenerator {
    x_min: f32,
    x_max: f32,
    spacing: f32,
    initial_platforms: usize,
    batch_size: usize,
    lookahead_margin: f32,
    overlap: OverlapPolicy,
}

impl LevelGenerator {
    pub fn new(config: &GameConfig) -> Self {
        let (x_min, x_max) = config.platform_x_range();
        Self {
            x_min,
            x_max,
            spacing: config.platform_spacing,
            initial_platforms: config.generation.initial_platforms,
            batch_size: config.generation.batch_size,
            lookahead_margin: config.generation.lookahead_margin,
            overlap: config.generation.overlap,
        }
    }

    pub fn batch_size(&self) -> usize {
        self.batch_size
    }

    /// True once the player is within the look-ahead margin of the cursor.
    /// Re-evaluated every tick, so a skipped frame only delays the batch.
    pub fn needs_batch(&self, state: &RunState) -> bool {
        state.player.pos.y < state.next_platform_y + self.lookahead_margin
    }

    /// Lay out the platforms a run starts with
    pub fn generate_initial<R: Rng>(
        &self,
        state: &mut RunState,
        rng: &mut R,
    ) -> Range<usize> {
        self.generate_batch(self.initial_platforms, state, rng)
    }

    /// Append `count` platforms above the cursor.
    /// Returns the index range of the new platforms in `state.platforms`.
    pub fn generate_batch<R: Rng>(
        &self,
        count: usize,
        state: &mut RunState,
        rng: &mut R,
    ) -> Range<usize> {
        let start = state.platforms.len();
        state.platforms.reserve(count);

        for _ in 0..count {
            let x = self.draw_x(state.last_platform_x, rng);
            let id = state.next_entity_id();
            state.platforms.push(Platform {
                id,
                pos: Vec2::new(x, state.next_platform_y),
            });
            state.last_platform_x = Some(x);
            state.next_platform_y -= self.spacing;
        }

        log::debug!(
            "Run {}: generated {} platforms, cursor now y={}",
            state.run_index,
            count,
            state.next_platform_y
        );
        start..state.platforms.len()
    }

    fn draw_x<R: Rng>(&self, previous: Option<f32>, rng: &mut R) -> f32 {
        let mut x = rng.random_range(self.x_min..=self.x_max);
        if let (OverlapPolicy::Avoid { min_gap, max_attempts }, Some(prev)) =
            (self.overlap, previous)
        {
            let mut attempts = 0;
            while (x - prev).abs() < min_gap && attempts < max_attempts {
                x = rng.random_range(self.x_min..=self.x_max);
                attempts += 1;
            }
        }
        x
    }
}
