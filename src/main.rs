//! Sky Climb headless demo
//!
//! Drives the progression core with a scripted host: the climber hops to the
//! next platform every few frames, sometimes misses and falls, and reports the
//! contacts a physics engine would raise. Usage:
//!
//! ```text
//! sky-climb [config.json | -] [seed] [runs]
//! ```

use glam::Vec2;
use rand::{Rng, SeedableRng};
use rand_pcg::Pcg32;

use sky_climb::approach;
use sky_climb::config::{ConfigError, GameConfig};
use sky_climb::sim::{BodySync, Camera, ContactEvent, GameLoop, Player, RunState, TickInput};

/// Host frame time
const FRAME_DT: f32 = 1.0 / 60.0;
/// Frames between hops
const HOP_FRAMES: u64 = 30;
/// Chance a hop misses its platform
const MISS_CHANCE: f64 = 0.08;
/// Chance the climber slips past a dragon on its landing platform
const DODGE_CHANCE: f64 = 0.6;
/// Player feet sit this far above a platform center when standing
const STAND_HEIGHT: f32 = 34.0;
/// Give up on a run that never ends
const MAX_FRAMES_PER_RUN: u64 = 60 * 60 * 10;

/// What the scripted climber is doing
#[derive(Debug, Clone, Copy, PartialEq)]
enum Climber {
    /// Standing on a platform (None before the first landing)
    Standing { platform: Option<u32> },
    Falling,
}

fn main() -> Result<(), ConfigError> {
    env_logger::init();

    let mut args = std::env::args().skip(1);
    let config = match args.next().as_deref() {
        None | Some("-") => GameConfig::classic(),
        Some(path) => GameConfig::load(path)?,
    };
    let seed = parse_arg(args.next(), 2024u64, "seed");
    let runs = parse_arg(args.next(), 5u32, "runs");

    log::info!("Sky Climb (headless) starting: seed {seed}, {runs} runs");

    let mut game = GameLoop::new(config, seed)?;
    let mut host_rng = Pcg32::seed_from_u64(seed ^ 0x5EED_F00D);
    let mut climber = Climber::Standing { platform: None };
    let mut frames_this_run = 0u64;
    let mut finished = 0u32;

    while finished < runs {
        frames_this_run += 1;
        let mut input = TickInput::default();
        let mut events = Vec::new();

        match climber {
            Climber::Standing { platform } if frames_this_run % HOP_FRAMES == 0 => {
                input.jump_pressed = true;
                if host_rng.random_bool(MISS_CHANCE) {
                    climber = Climber::Falling;
                } else if let Some(target) = next_platform_above(game.state(), platform) {
                    land_on(&mut game, target, &mut events, &mut host_rng);
                    climber = Climber::Standing {
                        platform: Some(target),
                    };
                }
            }
            Climber::Standing { .. } => {}
            Climber::Falling => fall(&mut game),
        }

        move_dragons(&mut game);
        follow_camera(&mut game);

        let snapshot = game.tick(&input, &events);
        if snapshot.terminated.is_some() {
            finished += 1;
            frames_this_run = 0;
            climber = Climber::Standing { platform: None };
        } else if frames_this_run >= MAX_FRAMES_PER_RUN {
            log::warn!("Run {} still going after {frames_this_run} frames", snapshot.run_index);
            game.reset();
            finished += 1;
            frames_this_run = 0;
            climber = Climber::Standing { platform: None };
        }
    }

    let board = game.history();
    log::info!(
        "Finished {finished} runs, best score {}",
        board.top_score().unwrap_or(0)
    );
    match serde_json::to_string_pretty(board) {
        Ok(json) => println!("{json}"),
        Err(err) => log::error!("Could not encode leaderboard: {err}"),
    }
    Ok(())
}

fn parse_arg<T: std::str::FromStr + std::fmt::Display + Copy>(
    arg: Option<String>,
    fallback: T,
    name: &str,
) -> T {
    match arg {
        None => fallback,
        Some(raw) => raw.parse().unwrap_or_else(|_| {
            log::warn!("Ignoring {name} `{raw}`, using {fallback}");
            fallback
        }),
    }
}

/// Lowest platform above the one the climber stands on
fn next_platform_above(state: &RunState, current: Option<u32>) -> Option<u32> {
    let floor_y = current
        .and_then(|id| state.platform(id))
        .map(|p| p.pos.y)
        .unwrap_or(f32::INFINITY);
    state
        .platforms
        .iter()
        .filter(|p| p.pos.y < floor_y)
        .max_by(|a, b| a.pos.y.total_cmp(&b.pos.y))
        .map(|p| p.id)
}

/// Teleport onto a platform and report what the landing touches
fn land_on(game: &mut GameLoop, platform: u32, events: &mut Vec<ContactEvent>, rng: &mut Pcg32) {
    let state = game.state();
    let Some(target) = state.platform(platform).copied() else {
        return;
    };

    events.push(ContactEvent::PlatformContact { platform });
    events.extend(
        state
            .coins
            .iter()
            .filter(|c| c.platform == platform)
            .map(|c| ContactEvent::CoinOverlap { coin: c.id }),
    );
    for enemy in state.enemies.iter().filter(|e| e.platform == platform) {
        if !rng.random_bool(DODGE_CHANCE) {
            events.push(ContactEvent::EnemyContact { enemy: enemy.id });
        }
    }

    game.sync(&BodySync {
        player: Some(Player {
            pos: Vec2::new(target.pos.x, target.pos.y - STAND_HEIGHT),
            vel: Vec2::ZERO,
        }),
        ..Default::default()
    });
}

/// Integrate a missed hop under gravity
fn fall(game: &mut GameLoop) {
    let gravity = game.config().gravity;
    let mut player = game.state().player;
    player.vel.y += gravity * FRAME_DT;
    player.pos += player.vel * FRAME_DT;
    game.sync(&BodySync {
        player: Some(player),
        ..Default::default()
    });
}

fn move_dragons(game: &mut GameLoop) {
    let enemy_x = game
        .state()
        .enemies
        .iter()
        .map(|e| (e.id, e.pos.x + e.vel_x * FRAME_DT))
        .collect();
    game.sync(&BodySync {
        enemy_x,
        ..Default::default()
    });
}

/// Lerp the view toward the player outside the deadzone, never below the start screen
fn follow_camera(game: &mut GameLoop) {
    let state = game.state();
    let scroll_y = follow_scroll(&state.camera, state.player.pos.y);
    game.sync(&BodySync {
        camera_scroll_y: Some(scroll_y),
        ..Default::default()
    });
}

fn follow_scroll(camera: &Camera, target_y: f32) -> f32 {
    let Some(follow) = camera.follow else {
        return camera.scroll_y;
    };
    let half_view = camera.viewport_height / 2.0;
    let half_zone = follow.deadzone.y / 2.0;
    let center = camera.scroll_y + half_view;

    let wanted = if target_y < center - half_zone {
        target_y + half_zone - half_view
    } else if target_y > center + half_zone {
        target_y - half_zone - half_view
    } else {
        return camera.scroll_y;
    };
    approach(camera.scroll_y, wanted, follow.lerp).min(0.0)
}
