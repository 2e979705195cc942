use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use std::collections::BTreeMap;

use super::format::game_clock;
use super::snapshot::{PlayerSnapshot, TeamBoxScore};
use crate::engine::phase::GameState;

/// Full game state captured at a quarter boundary.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct GameCheckpoint {
    /// `<game_id>_cp_<n>`, n starting at 1
    pub checkpoint_id: String,
    /// Wall-clock creation time
    pub timestamp: DateTime<Utc>,
    #[serde(with = "game_clock")]
    pub game_time: u32,
    pub quarter: u8,
    pub home_score: u32,
    pub away_score: u32,
    pub current_state: GameState,
    pub offensive_team_id: usize,
    pub player_states: BTreeMap<String, PlayerSnapshot>,
    /// Index into the event list; None only when no event had been logged
    pub last_event_index: Option<usize>,
    /// Home first, then away
    pub team_stats: Vec<TeamBoxScore>,
}

impl GameCheckpoint {
    pub fn score(&self) -> (u32, u32) {
        (self.home_score, self.away_score)
    }
}
