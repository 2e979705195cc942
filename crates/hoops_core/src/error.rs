use thiserror::Error;

use crate::engine::phase::{GameState, Trigger};
use crate::replay::io::StoreError;

/// Problems with the roster-shaped input, raised before a game exists.
#[derive(Error, Debug, Clone, PartialEq)]
pub enum RosterError {
    #[error("team {team}: {found} eligible starters, need at least {needed}")]
    NotEnoughPlayers { team: String, found: usize, needed: usize },

    #[error("team {team}: duplicate player id {player_id}")]
    DuplicatePlayer { team: String, player_id: String },

    #[error("team {team}: starter {player_id} is not on the roster")]
    UnknownStarter { team: String, player_id: String },

    #[error("team {team}: explicit starting lineup must list exactly 5 distinct players")]
    InvalidStarters { team: String },

    #[error("player {player_id}: rating {attribute}={value} outside 0..=100")]
    RatingOutOfRange { player_id: String, attribute: &'static str, value: u8 },
}

/// Fatal conditions of a simulation run.
///
/// Everything except `Persistence` indicates a resolver or state-machine
/// defect; the run stops instead of continuing on corrupt state.
#[derive(Error, Debug)]
pub enum GameError {
    #[error("roster error: {0}")]
    Roster(#[from] RosterError),

    #[error("no transition from {state:?} on {trigger:?}")]
    IllegalTransition { state: GameState, trigger: Trigger },

    #[error("team {team} lineup has {size} players, expected 5")]
    LineupSize { team: usize, size: usize },

    #[error("game already finished")]
    Finished,

    #[error("game still in progress")]
    InProgress,

    #[error("{state:?} reached without {field}")]
    MissingPossessionData { state: GameState, field: &'static str },

    #[error("transition limit of {limit} exceeded")]
    TransitionLimit { limit: u32 },

    #[error("config error: {0}")]
    Config(#[from] ConfigError),

    #[error("persistence error: {0}")]
    Persistence(#[from] StoreError),

    #[error("serialization error: {0}")]
    Serialization(#[from] serde_json::Error),
}

impl GameError {
    /// Only storage failures leave a usable, fully built log behind.
    pub fn is_recoverable(&self) -> bool {
        matches!(self, GameError::Persistence(_))
    }
}

/// Configuration parsing failures.
#[derive(Error, Debug)]
pub enum ConfigError {
    #[error("invalid YAML config: {0}")]
    Yaml(#[from] serde_yaml::Error),

    #[error("invalid JSON config: {0}")]
    Json(#[from] serde_json::Error),

    #[error("probability {name}={value} outside 0..=1")]
    Probability { name: &'static str, value: f64 },

    #[error("range {name}=({min}, {max}) must be non-empty and start above 0")]
    Range { name: &'static str, min: u32, max: u32 },

    #[error("bounds {name}=({min}, {max}) must satisfy min <= max")]
    Bounds { name: &'static str, min: f64, max: f64 },
}

pub type Result<T> = std::result::Result<T, GameError>;
