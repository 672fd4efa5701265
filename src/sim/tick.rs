//! Per-frame orchestration
//!
//! One [`GameLoop::tick`] per rendered frame. Within a tick the order is fixed:
//! input → jump budget → patrol → generation → fall check → contact events.

use glam::Vec2;
use rand::{Rng, SeedableRng};
use rand_pcg::Pcg32;
use serde::{Deserialize, Serialize};

use super::boundary::BoundaryMonitor;
use super::generator::LevelGenerator;
use super::patrol::PatrolController;
use super::progression::ProgressionTracker;
use super::spawner::ContentSpawner;
use super::state::{Camera, CoinKind, Player, RunPhase, RunState, TerminationCause};
use crate::config::{ConfigError, GameConfig};
use crate::highscores::{HighScores, RunSummary};

/// Input state for a single tick
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct TickInput {
    pub left: bool,
    pub right: bool,
    /// Jump key held
    pub up: bool,
    /// Jump key went down this frame (edge reported by the host)
    pub jump_pressed: bool,
}

/// Contacts raised by the host physics during its step.
/// Each contact is delivered once; simultaneous contacts arrive in any order.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum ContactEvent {
    PlatformContact { platform: u32 },
    CoinOverlap { coin: u32 },
    EnemyContact { enemy: u32 },
}

/// Body positions written back by the host after integrating
#[derive(Debug, Clone, Default)]
pub struct BodySync {
    pub player: Option<Player>,
    /// (enemy id, integrated x)
    pub enemy_x: Vec<(u32, f32)>,
    pub camera_scroll_y: Option<f32>,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum EntityKind {
    Player,
    Platform,
    SilverCoin,
    GoldCoin,
    Enemy,
}

/// One body as the renderer and host physics see it
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct EntityView {
    /// 0 for the player
    pub id: u32,
    pub kind: EntityKind,
    pub pos: Vec2,
    pub vel: Vec2,
    /// Whether world gravity applies to this body
    pub gravity: bool,
}

/// State handed back to the host after every tick
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct RunSnapshot {
    pub run_index: u32,
    pub tick: u64,
    pub score: u64,
    pub jump_count: u32,
    /// Set on the tick a run ended; the returned state is already the fresh run
    pub terminated: Option<TerminationCause>,
    pub camera: Camera,
    pub entities: Vec<EntityView>,
}

/// Owns a run and the components that advance it
#[derive(Debug)]
pub struct GameLoop<R: Rng = Pcg32> {
    config: GameConfig,
    rng: R,
    generator: LevelGenerator,
    spawner: ContentSpawner,
    patrol: PatrolController,
    progression: ProgressionTracker,
    boundary: BoundaryMonitor,
    state: RunState,
    history: HighScores,
    /// `up` as seen last tick, for edge detection
    prev_up: bool,
}

impl GameLoop<Pcg32> {
    /// Create a loop with a seeded PCG generator
    pub fn new(config: GameConfig, seed: u64) -> Result<Self, ConfigError> {
        Self::with_rng(config, Pcg32::seed_from_u64(seed))
    }
}

impl<R: Rng> GameLoop<R> {
    /// Create a loop drawing from an injected random source
    pub fn with_rng(config: GameConfig, mut rng: R) -> Result<Self, ConfigError> {
        config.validate()?;

        let generator = LevelGenerator::new(&config);
        let spawner = ContentSpawner::new(&config);
        let state = lay_out_run(&config, &generator, &spawner, &mut rng, 0);

        Ok(Self {
            patrol: PatrolController::new(&config),
            progression: ProgressionTracker::new(&config),
            boundary: BoundaryMonitor,
            generator,
            spawner,
            rng,
            state,
            history: HighScores::new(),
            prev_up: false,
            config,
        })
    }

    pub fn config(&self) -> &GameConfig {
        &self.config
    }

    pub fn state(&self) -> &RunState {
        &self.state
    }

    /// Finished runs of this session
    pub fn history(&self) -> &HighScores {
        &self.history
    }

    /// Advance one frame
    pub fn tick(&mut self, input: &TickInput, events: &[ContactEvent]) -> RunSnapshot {
        self.state.time_ticks += 1;

        self.resolve_input(input);
        let jump_edge = input.jump_pressed || (input.up && !self.prev_up);
        self.prev_up = input.up;
        if jump_edge {
            self.progression.on_jump_input(&mut self.state);
        }

        self.patrol.tick(&mut self.state.enemies);

        if self.generator.needs_batch(&self.state) {
            let range = self.generator.generate_batch(
                self.generator.batch_size(),
                &mut self.state,
                &mut self.rng,
            );
            self.spawner.attach_range(range, &mut self.state, &mut self.rng);
        }

        let terminated = self
            .boundary
            .check(&self.state.player, &self.state.camera)
            .or_else(|| self.apply_contacts(events));

        if let Some(cause) = terminated {
            self.terminate(cause);
        }
        self.snapshot(terminated)
    }

    /// Abandon the current run and start a fresh one
    pub fn reset(&mut self) {
        log::info!(
            "Run {} reset at score {}",
            self.state.run_index,
            self.state.score
        );
        self.start_run(self.state.run_index + 1);
    }

    /// Take positions the host physics integrated since the last tick
    pub fn sync(&mut self, sync: &BodySync) {
        if let Some(player) = sync.player {
            self.state.player = player;
            self.state.peak_y = self.state.peak_y.min(player.pos.y);
        }
        for &(id, x) in &sync.enemy_x {
            if let Some(enemy) = self.state.enemies.iter_mut().find(|e| e.id == id) {
                enemy.pos.x = x.clamp(enemy.min_x, enemy.max_x);
            }
        }
        if let Some(scroll_y) = sync.camera_scroll_y {
            self.state.camera.scroll_y = scroll_y;
        }
    }

    /// Current state without advancing
    pub fn snapshot(&self, terminated: Option<TerminationCause>) -> RunSnapshot {
        let state = &self.state;
        let mut entities = Vec::with_capacity(
            1 + state.platforms.len() + state.coins.len() + state.enemies.len(),
        );

        entities.push(EntityView {
            id: 0,
            kind: EntityKind::Player,
            pos: state.player.pos,
            vel: state.player.vel,
            gravity: true,
        });
        entities.extend(state.platforms.iter().map(|p| EntityView {
            id: p.id,
            kind: EntityKind::Platform,
            pos: p.pos,
            vel: Vec2::ZERO,
            gravity: false,
        }));
        entities.extend(state.coins.iter().map(|c| EntityView {
            id: c.id,
            kind: match c.kind {
                CoinKind::Silver => EntityKind::SilverCoin,
                CoinKind::Gold => EntityKind::GoldCoin,
            },
            pos: c.pos,
            vel: Vec2::ZERO,
            gravity: true,
        }));
        entities.extend(state.enemies.iter().map(|e| EntityView {
            id: e.id,
            kind: EntityKind::Enemy,
            pos: e.pos,
            vel: Vec2::new(e.vel_x, 0.0),
            gravity: false,
        }));

        RunSnapshot {
            run_index: state.run_index,
            tick: state.time_ticks,
            score: state.score,
            jump_count: state.jump_count,
            terminated,
            camera: state.camera,
            entities,
        }
    }

    fn resolve_input(&mut self, input: &TickInput) {
        self.state.player.vel.x = if input.left {
            -self.config.player_speed
        } else if input.right {
            self.config.player_speed
        } else {
            0.0
        };
    }

    /// Feed contacts to the tracker; stops at the first one that ends the run
    fn apply_contacts(&mut self, events: &[ContactEvent]) -> Option<TerminationCause> {
        for event in events {
            match *event {
                ContactEvent::PlatformContact { platform } => {
                    self.progression.on_platform_contact(&mut self.state, platform);
                }
                ContactEvent::CoinOverlap { coin } => {
                    self.progression.on_collect(&mut self.state, coin);
                }
                ContactEvent::EnemyContact { enemy } => {
                    if let Some(cause) = self.progression.on_enemy_contact(&mut self.state, enemy)
                    {
                        return Some(cause);
                    }
                }
            }
        }
        None
    }

    fn terminate(&mut self, cause: TerminationCause) {
        self.state.phase = RunPhase::Terminated(cause);
        let summary = RunSummary {
            run_index: self.state.run_index,
            score: self.state.score,
            height: self.state.height_climbed(),
            ticks: self.state.time_ticks,
            cause,
        };
        log::info!(
            "Run {} ended ({:?}): score {}, height {:.0}, {} ticks",
            summary.run_index,
            cause,
            summary.score,
            summary.height,
            summary.ticks
        );
        if let Some(rank) = self.history.add(summary) {
            log::info!("Run {} placed #{} on the leaderboard", summary.run_index, rank);
        }
        self.start_run(self.state.run_index + 1);
    }

    fn start_run(&mut self, run_index: u32) {
        self.state = lay_out_run(
            &self.config,
            &self.generator,
            &self.spawner,
            &mut self.rng,
            run_index,
        );
    }
}

/// Fresh run with its initial platforms populated
fn lay_out_run<R: Rng>(
    config: &GameConfig,
    generator: &LevelGenerator,
    spawner: &ContentSpawner,
    rng: &mut R,
    run_index: u32,
) -> RunState {
    let mut state = RunState::new(config, run_index);
    let range = generator.generate_initial(&mut state, rng);
    spawner.attach_range(range, &mut state, rng);
    log::info!(
        "Run {} started: {} platforms, {} coins, {} dragons",
        run_index,
        state.platforms.len(),
        state.coins.len(),
        state.enemies.len()
    );
    state
}
