//! Dragon patrol: two-phase horizontal oscillation

use super::state::Enemy;
use crate::config::GameConfig;

/// Flips dragon velocity at the patrol bounds.
/// Position integration belongs to the host physics.
#[derive(Debug, Clone)]
pub struct PatrolController {
    speed: f32,
}

impl PatrolController {
    pub fn new(config: &GameConfig) -> Self {
        Self {
            speed: config.dragon_speed,
        }
    }

    pub fn tick(&self, enemies: &mut [Enemy]) {
        for enemy in enemies {
            // The host step may overshoot a bound; pull back inside first
            if enemy.pos.x <= enemy.min_x {
                enemy.pos.x = enemy.min_x;
                enemy.vel_x = self.speed;
            } else if enemy.pos.x >= enemy.max_x {
                enemy.pos.x = enemy.max_x;
                enemy.vel_x = -self.speed;
            }
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use glam::Vec2;
    use proptest::prelude::*;

    fn dragon(x: f32, vel_x: f32) -> Enemy {
        Enemy {
            id: 1,
            pos: Vec2::new(x, 0.0),
            min_x: 220.0,
            max_x: 380.0,
            vel_x,
            platform: 1,
        }
    }

    #[test]
    fn test_flip_at_max() {
        let patrol = PatrolController::new(&GameConfig::classic());
        let mut enemies = [dragon(380.0, 100.0)];
        patrol.tick(&mut enemies);
        assert_eq!(enemies[0].vel_x, -100.0);
    }

    #[test]
    fn test_flip_at_min() {
        let patrol = PatrolController::new(&GameConfig::classic());
        let mut enemies = [dragon(220.0, -100.0)];
        patrol.tick(&mut enemies);
        assert_eq!(enemies[0].vel_x, 100.0);
    }

    #[test]
    fn test_interior_keeps_velocity() {
        let patrol = PatrolController::new(&GameConfig::classic());
        let mut enemies = [dragon(300.0, -100.0), dragon(379.9, 100.0)];
        patrol.tick(&mut enemies);
        assert_eq!(enemies[0].vel_x, -100.0);
        assert_eq!(enemies[1].vel_x, 100.0);
    }

    #[test]
    fn test_overshoot_is_clamped() {
        let patrol = PatrolController::new(&GameConfig::classic());
        let mut enemies = [dragon(391.5, 100.0), dragon(-4.0, -100.0)];
        patrol.tick(&mut enemies);
        assert_eq!(enemies[0].pos.x, 380.0);
        assert_eq!(enemies[0].vel_x, -100.0);
        assert_eq!(enemies[1].pos.x, 220.0);
        assert_eq!(enemies[1].vel_x, 100.0);
    }

    proptest! {
        #[test]
        fn prop_patrol_stays_in_bounds(
            start in 220.0f32..=380.0,
            steps in proptest::collection::vec(0.0f32..0.05, 1..400),
        ) {
            let patrol = PatrolController::new(&GameConfig::classic());
            let mut enemies = [dragon(start, 100.0)];
            for dt in steps {
                // Stand-in for the host integrating velocity
                enemies[0].pos.x += enemies[0].vel_x * dt;
                patrol.tick(&mut enemies);
                prop_assert!(enemies[0].in_bounds());
                prop_assert_eq!(enemies[0].vel_x.abs(), 100.0);
            }
        }
    }
}
