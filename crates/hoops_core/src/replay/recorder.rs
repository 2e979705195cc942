//! EventLog - append-only record of one game
//!
//! The engine calls [`EventLog::log_event`] for every resolved action and
//! [`EventLog::create_checkpoint`] at every quarter boundary. Nothing is
//! ever removed or rewritten.

use chrono::Utc;
use serde::{Deserialize, Serialize};

use super::checkpoint::GameCheckpoint;
use super::events::{EventDetail, GameEvent};
use super::format::events_digest;
use super::snapshot::{player_states, TeamBoxScore};
use crate::engine::game_sim::Game;
use crate::models::Team;

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct PlayerEntry {
    pub player_id: String,
    pub player_name: String,
    /// Position in the team's roster
    pub player_index: usize,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct TeamEntry {
    /// 0 home, 1 away
    pub team_id: usize,
    pub team_name: String,
    #[serde(default)]
    pub abbreviation: String,
    pub players: Vec<PlayerEntry>,
    pub starting_lineup: Vec<String>,
    #[serde(default)]
    pub season: String,
    #[serde(default)]
    pub coach: String,
    #[serde(default)]
    pub record: String,
    #[serde(default)]
    pub arena: String,
}

impl TeamEntry {
    fn from_team(team_id: usize, team: &Team) -> Self {
        Self {
            team_id,
            team_name: team.info.team_name.clone(),
            abbreviation: team.info.abbreviation.clone(),
            players: team
                .players
                .iter()
                .enumerate()
                .map(|(player_index, p)| PlayerEntry {
                    player_id: p.id.clone(),
                    player_name: p.name.clone(),
                    player_index,
                })
                .collect(),
            starting_lineup: team
                .starting_lineup()
                .iter()
                .map(|&idx| team.players[idx].id.clone())
                .collect(),
            season: team.info.season.clone(),
            coach: team.info.coach.clone(),
            record: team.info.record.clone(),
            arena: team.info.arena.clone(),
        }
    }
}

/// Metadata fixed at game start.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct GameInfo {
    pub game_id: String,
    /// `YYYY-MM-DD`
    pub date: String,
    /// Seed of the run's random source
    #[serde(default)]
    pub seed: u64,
    pub teams: Vec<TeamEntry>,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct EventLog {
    pub game_info: GameInfo,
    pub events: Vec<GameEvent>,
    #[serde(default)]
    pub checkpoints: Vec<GameCheckpoint>,
}

impl EventLog {
    pub fn new(game_id: impl Into<String>, seed: u64, teams: &[Team; 2]) -> Self {
        Self {
            game_info: GameInfo {
                game_id: game_id.into(),
                date: Utc::now().format("%Y-%m-%d").to_string(),
                seed,
                teams: teams
                    .iter()
                    .enumerate()
                    .map(|(idx, team)| TeamEntry::from_team(idx, team))
                    .collect(),
            },
            events: Vec::with_capacity(600),
            checkpoints: Vec::with_capacity(4),
        }
    }

    pub fn game_id(&self) -> &str {
        &self.game_info.game_id
    }

    /// Append an event stamped with the current clock and quarter.
    ///
    /// The acting team is the substituting team for substitutions and the
    /// current offense for everything else.
    pub fn log_event(&mut self, game: &Game, detail: EventDetail, player_id: Option<String>) {
        let team_id = match &detail {
            EventDetail::Substitution { team_id, .. } => *team_id,
            _ => game.offense,
        };
        self.events.push(GameEvent {
            detail,
            timestamp: game.clock,
            quarter: game.quarter,
            team_id,
            player_id,
            player_states: player_states(&game.teams),
        });
    }

    /// Snapshot the whole game; returns the new checkpoint id.
    pub fn create_checkpoint(&mut self, game: &Game) -> String {
        let checkpoint_id = format!("{}_cp_{}", self.game_info.game_id, self.checkpoints.len() + 1);
        let checkpoint = GameCheckpoint {
            checkpoint_id: checkpoint_id.clone(),
            timestamp: Utc::now(),
            game_time: game.clock,
            quarter: game.quarter,
            home_score: game.score(0),
            away_score: game.score(1),
            current_state: game.state,
            offensive_team_id: game.offense,
            player_states: player_states(&game.teams),
            last_event_index: last_event_index(&self.events, game.quarter, game.clock),
            team_stats: game.teams.iter().map(|t| TeamBoxScore::from(&t.stats)).collect(),
        };
        self.checkpoints.push(checkpoint);
        checkpoint_id
    }

    pub fn last_checkpoint(&self) -> Option<&GameCheckpoint> {
        self.checkpoints.last()
    }

    /// Points per team summed from scoring events.
    pub fn points_from_events(&self) -> [u32; 2] {
        let mut points = [0; 2];
        for event in &self.events {
            if let Some(total) = points.get_mut(event.team_id) {
                *total += event.detail.points_scored();
            }
        }
        points
    }

    pub fn digest(&self) -> Result<String, serde_json::Error> {
        events_digest(&self.events)
    }

    pub fn to_value(&self) -> Result<serde_json::Value, serde_json::Error> {
        serde_json::to_value(self)
    }

    pub fn to_json(&self) -> Result<String, serde_json::Error> {
        serde_json::to_string_pretty(self)
    }

    pub fn from_json(json: &str) -> Result<Self, serde_json::Error> {
        serde_json::from_str(json)
    }
}

/// Index of the last event a checkpoint at (`quarter`, `clock`) covers.
///
/// Only events of `quarter` are considered. The scan stops at the first
/// event whose timestamp has reached `clock` and extends over the events
/// that share its timestamp. When no event of the quarter has reached
/// `clock` the quarter's last event is used; a quarter without events falls
/// back to the last event overall.
pub fn last_event_index(events: &[GameEvent], quarter: u8, clock: u32) -> Option<usize> {
    let last_overall = events.len().checked_sub(1)?;
    let in_quarter: Vec<usize> =
        (0..events.len()).filter(|&i| events[i].quarter == quarter).collect();

    let Some(&quarter_last) = in_quarter.last() else {
        return Some(last_overall);
    };

    let Some(start) = in_quarter.iter().position(|&i| events[i].timestamp <= clock) else {
        return Some(quarter_last);
    };

    let reached = events[in_quarter[start]].timestamp;
    let last = in_quarter[start..]
        .iter()
        .copied()
        .take_while(|&i| events[i].timestamp == reached)
        .last()
        .unwrap_or(in_quarter[start]);
    Some(last)
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::collections::BTreeMap;

    fn at(quarter: u8, timestamp: u32) -> GameEvent {
        GameEvent {
            detail: EventDetail::TipOff,
            timestamp,
            quarter,
            team_id: 0,
            player_id: None,
            player_states: BTreeMap::new(),
        }
    }

    #[test]
    fn test_last_event_index_regression() {
        let events = vec![at(1, 700), at(1, 650), at(1, 600)];
        assert_eq!(last_event_index(&events, 1, 630), Some(2));
    }

    #[test]
    fn test_last_event_index_extends_over_ties() {
        let events = vec![at(1, 700), at(1, 0), at(1, 0), at(1, 0)];
        assert_eq!(last_event_index(&events, 1, 0), Some(3));

        let events = vec![at(1, 700), at(1, 500), at(1, 500), at(1, 300)];
        assert_eq!(last_event_index(&events, 1, 600), Some(2));
    }

    #[test]
    fn test_last_event_index_fallbacks() {
        assert_eq!(last_event_index(&[], 1, 720), None);

        // nothing in the quarter reached the clock yet
        let events = vec![at(1, 700), at(1, 650)];
        assert_eq!(last_event_index(&events, 1, 100), Some(1));

        // quarter has no events
        let events = vec![at(1, 700), at(1, 0)];
        assert_eq!(last_event_index(&events, 2, 720), Some(1));
    }

    #[test]
    fn test_last_event_index_ignores_other_quarters() {
        let events = vec![at(1, 300), at(1, 0), at(2, 710), at(2, 640), at(2, 20)];
        assert_eq!(last_event_index(&events, 2, 650), Some(3));
        assert_eq!(last_event_index(&events, 1, 0), Some(1));
    }
}
