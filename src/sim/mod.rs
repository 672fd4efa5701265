//! Deterministic run simulation
//!
//! All progression logic lives here. This module must stay deterministic:
//! - Randomness only through the injected generator
//! - One tick per frame, fixed phase order
//! - No rendering, input-device or physics dependencies

pub mod boundary;
pub mod generator;
pub mod patrol;
pub mod progression;
pub mod spawner;
pub mod state;
pub mod tick;

pub use boundary::BoundaryMonitor;
pub use generator::LevelGenerator;
pub use patrol::PatrolController;
pub use progression::ProgressionTracker;
pub use spawner::{ContentSpawner, SpawnOutcome};
pub use state::{
    Camera, CameraFollow, Coin, CoinKind, Enemy, FollowTarget, Platform, Player, RunPhase,
    RunState, TerminationCause,
};
pub use tick::{BodySync, ContactEvent, EntityKind, EntityView, GameLoop, RunSnapshot, TickInput};
