//! # hoops_core - Possession-based basketball game simulator
//!
//! Plays a full game as a sequence of possessions driven by an explicit
//! state machine, resolving each possession from player ratings with a
//! single seeded random source.
//!
//! ## Features
//! - Deterministic simulation (same seed, same event log)
//! - Per-player and per-team box scores with fatigue-driven rotation
//! - JSON event log with end-of-period checkpoints
//! - JSON API and parallel batch runs

pub mod api;
pub mod batch;
pub mod engine;
pub mod error;
pub mod models;
pub mod replay;

pub use api::{simulate_game_json, GameRequest};
pub use batch::{simulate_batch, BatchReport};
pub use engine::{
    box_score, BoxScore, Game, GameEngine, GamePlan, GameState, GameSummary, PossessionPolicy,
    RatingPolicy, SimConfig, Trigger,
};
pub use error::{ConfigError, GameError, Result, RosterError};
pub use models::{PlayerRoster, Position, PrimitiveRatings, TeamRoster};
pub use replay::{EventLog, FileStore, GameStore, MemoryStore, StoreError};
