//! Fall detection against the camera's bottom edge

use super::state::{Camera, Player, TerminationCause};

/// Purely positional: no velocity or timing hysteresis
#[derive(Debug, Clone, Copy, Default)]
pub struct BoundaryMonitor;

impl BoundaryMonitor {
    pub fn check(&self, player: &Player, camera: &Camera) -> Option<TerminationCause> {
        (player.pos.y > camera.bottom()).then_some(TerminationCause::FellOutOfView)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use glam::Vec2;

    fn camera(scroll_y: f32) -> Camera {
        Camera {
            scroll_y,
            viewport_height: 800.0,
            follow: None,
        }
    }

    fn player_at(y: f32) -> Player {
        Player {
            pos: Vec2::new(100.0, y),
            vel: Vec2::ZERO,
        }
    }

    #[test]
    fn test_below_bottom_terminates() {
        let monitor = BoundaryMonitor;
        assert_eq!(
            monitor.check(&player_at(801.0), &camera(0.0)),
            Some(TerminationCause::FellOutOfView)
        );
        assert_eq!(monitor.check(&player_at(799.0), &camera(0.0)), None);
        // Exactly on the edge is still visible
        assert_eq!(monitor.check(&player_at(800.0), &camera(0.0)), None);
    }

    #[test]
    fn test_follows_scrolled_camera() {
        let monitor = BoundaryMonitor;
        let scrolled = camera(-1200.0);
        assert_eq!(monitor.check(&player_at(-399.0), &scrolled), Some(TerminationCause::FellOutOfView));
        assert_eq!(monitor.check(&player_at(-401.0), &scrolled), None);
    }
}
