//! Score and jump budget
//!
//! Contact callbacks may arrive more than once for the same entity in a frame
//! (two overlaps on one coin, repeated landings). Every handler treats a
//! repeat or an unknown ID as a no-op.

use super::state::{CoinKind, RunPhase, RunState, TerminationCause};
use crate::config::{CoinPoints, GameConfig};

#[derive(Debug, Clone)]
pub struct ProgressionTracker {
    max_jumps: u32,
    jump_impulse: f32,
    points: CoinPoints,
}

impl ProgressionTracker {
    pub fn new(config: &GameConfig) -> Self {
        Self {
            max_jumps: config.max_jumps,
            jump_impulse: config.player_jump,
            points: config.coin_points,
        }
    }

    pub fn max_jumps(&self) -> u32 {
        self.max_jumps
    }

    /// Landing on a live platform refills the jump budget.
    /// Returns false for a platform this run does not own.
    pub fn on_platform_contact(&self, state: &mut RunState, platform: u32) -> bool {
        if state.platform(platform).is_none() {
            return false;
        }
        state.jump_count = 0;
        true
    }

    /// Apply the jump impulse if budget remains. Returns whether it was accepted.
    pub fn on_jump_input(&self, state: &mut RunState) -> bool {
        if state.jump_count >= self.max_jumps {
            return false;
        }
        state.player.vel.y = -self.jump_impulse;
        state.jump_count += 1;
        true
    }

    /// Remove a coin and bank its points. `None` if it was already collected.
    pub fn on_collect(&self, state: &mut RunState, coin: u32) -> Option<u64> {
        let index = state.coins.iter().position(|c| c.id == coin)?;
        let coin = state.coins.remove(index);
        let points = match coin.kind {
            CoinKind::Silver => self.points.silver,
            CoinKind::Gold => self.points.gold,
        };
        state.score = state.score.saturating_add(points);
        Some(points)
    }

    /// Touching a live dragon ends the run; the loop performs the reset
    pub fn on_enemy_contact(&self, state: &mut RunState, enemy: u32) -> Option<TerminationCause> {
        if !state.is_active() || state.enemy(enemy).is_none() {
            return None;
        }
        let cause = TerminationCause::EnemyContact { enemy };
        state.phase = RunPhase::Terminated(cause);
        Some(cause)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::sim::state::{Coin, Enemy, Platform};
    use glam::Vec2;
    use proptest::prelude::*;

    fn setup() -> (ProgressionTracker, RunState) {
        let config = GameConfig::classic();
        (ProgressionTracker::new(&config), RunState::new(&config, 0))
    }

    fn add_coin(state: &mut RunState, kind: CoinKind) -> u32 {
        let id = state.next_entity_id();
        state.coins.push(Coin {
            id,
            kind,
            pos: Vec2::ZERO,
            platform: 0,
        });
        id
    }

    fn add_platform(state: &mut RunState) -> u32 {
        let id = state.next_entity_id();
        state.platforms.push(Platform {
            id,
            pos: Vec2::new(200.0, 400.0),
        });
        id
    }

    #[test]
    fn test_jump_budget_exhausts() {
        let (tracker, mut state) = setup();
        for expected in 1..=3 {
            assert!(tracker.on_jump_input(&mut state));
            assert_eq!(state.jump_count, expected);
            assert_eq!(state.player.vel.y, -500.0);
        }

        // Over budget: velocity and count untouched
        state.player.vel.y = 42.0;
        assert!(!tracker.on_jump_input(&mut state));
        assert_eq!(state.jump_count, 3);
        assert_eq!(state.player.vel.y, 42.0);
    }

    #[test]
    fn test_platform_contact_resets_budget() {
        let (tracker, mut state) = setup();
        let platform = add_platform(&mut state);
        tracker.on_jump_input(&mut state);
        tracker.on_jump_input(&mut state);
        assert!(tracker.on_platform_contact(&mut state, platform));
        assert_eq!(state.jump_count, 0);
        assert!(tracker.on_platform_contact(&mut state, platform));
        assert_eq!(state.jump_count, 0);
        assert!(tracker.on_jump_input(&mut state));
        assert_eq!(state.jump_count, 1);
    }

    #[test]
    fn test_unknown_platform_keeps_budget() {
        let (tracker, mut state) = setup();
        add_platform(&mut state);
        for _ in 0..3 {
            tracker.on_jump_input(&mut state);
        }
        assert!(!tracker.on_platform_contact(&mut state, 999_999));
        assert_eq!(state.jump_count, 3);
    }

    #[test]
    fn test_silver_then_gold_scores_six() {
        let (tracker, mut state) = setup();
        let silver = add_coin(&mut state, CoinKind::Silver);
        let gold = add_coin(&mut state, CoinKind::Gold);

        assert_eq!(tracker.on_collect(&mut state, silver), Some(1));
        assert_eq!(state.score, 1);
        assert_eq!(tracker.on_collect(&mut state, gold), Some(5));
        assert_eq!(state.score, 6);
        assert!(state.coins.is_empty());
    }

    #[test]
    fn test_double_collect_is_noop() {
        let (tracker, mut state) = setup();
        let silver = add_coin(&mut state, CoinKind::Silver);
        assert_eq!(tracker.on_collect(&mut state, silver), Some(1));
        assert_eq!(tracker.on_collect(&mut state, silver), None);
        assert_eq!(tracker.on_collect(&mut state, 12345), None);
        assert_eq!(state.score, 1);
    }

    #[test]
    fn test_score_saturates() {
        let mut config = GameConfig::classic();
        config.coin_points.gold = u64::MAX;
        assert!(config.validate().is_ok());
        let tracker = ProgressionTracker::new(&config);
        let mut state = RunState::new(&config, 0);
        let coins: Vec<u32> = (0..4).map(|_| add_coin(&mut state, CoinKind::Gold)).collect();

        for coin in coins {
            assert_eq!(tracker.on_collect(&mut state, coin), Some(u64::MAX));
        }
        assert_eq!(state.score, u64::MAX);
        assert!(state.coins.is_empty());
    }

    #[test]
    fn test_enemy_contact_terminates_once() {
        let (tracker, mut state) = setup();
        let id = state.next_entity_id();
        state.enemies.push(Enemy {
            id,
            pos: Vec2::ZERO,
            min_x: -80.0,
            max_x: 80.0,
            vel_x: 100.0,
            platform: 0,
        });

        assert_eq!(tracker.on_enemy_contact(&mut state, 999), None);
        assert!(state.is_active());

        let cause = tracker.on_enemy_contact(&mut state, id);
        assert_eq!(cause, Some(TerminationCause::EnemyContact { enemy: id }));
        assert_eq!(state.phase, RunPhase::Terminated(TerminationCause::EnemyContact { enemy: id }));
        assert_eq!(tracker.on_enemy_contact(&mut state, id), None);
    }

    proptest! {
        #[test]
        fn prop_jump_count_within_budget(ops in proptest::collection::vec(any::<bool>(), 0..200)) {
            let (tracker, mut state) = setup();
            let platform = add_platform(&mut state);
            for jump in ops {
                if jump {
                    tracker.on_jump_input(&mut state);
                } else {
                    tracker.on_platform_contact(&mut state, platform);
                    prop_assert_eq!(state.jump_count, 0);
                }
                prop_assert!(state.jump_count <= tracker.max_jumps());
            }
        }
    }
}
