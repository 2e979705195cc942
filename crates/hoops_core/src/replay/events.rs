//! Game events
//!
//! One [`GameEvent`] per resolved action. The typed [`EventDetail`] decides
//! the event kind; the wire layout (`event_type` next to a flat `details`
//! object) is produced in `format.rs`.

use serde::{Deserialize, Serialize};
use std::collections::BTreeMap;

use super::format::EventRecord;
use super::snapshot::PlayerSnapshot;
use crate::models::ShotZone;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum EventKind {
    TipOff,
    ShotMade,
    ShotMissed,
    FreeThrow,
    Rebound,
    Turnover,
    Substitution,
    QuarterEnd,
    GameOver,
}

impl EventKind {
    pub fn as_str(self) -> &'static str {
        match self {
            EventKind::TipOff => "tip_off",
            EventKind::ShotMade => "shot_made",
            EventKind::ShotMissed => "shot_missed",
            EventKind::FreeThrow => "free_throw",
            EventKind::Rebound => "rebound",
            EventKind::Turnover => "turnover",
            EventKind::Substitution => "substitution",
            EventKind::QuarterEnd => "quarter_end",
            EventKind::GameOver => "game_over",
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum ReboundType {
    Offensive,
    Defensive,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ShotDetail {
    pub shot_type: ShotZone,
    pub points: u32,
    pub shooting_foul: bool,
    #[serde(default)]
    pub assist_player_id: Option<String>,
    #[serde(default)]
    pub defender_id: Option<String>,
}

/// Kind-specific payload, tagged by `event_type`.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(tag = "event_type", rename_all = "snake_case")]
pub enum EventDetail {
    TipOff,
    ShotMade(ShotDetail),
    ShotMissed(ShotDetail),
    FreeThrow {
        made: bool,
        /// 1-based position in the trip
        free_throw_num: u8,
        total_free_throws: u8,
    },
    Rebound {
        rebound_type: ReboundType,
    },
    Turnover {
        #[serde(default)]
        steal_player_id: Option<String>,
    },
    Substitution {
        player_in_id: String,
        player_out_id: String,
        team_id: usize,
    },
    QuarterEnd {
        quarter: u8,
        home_score: u32,
        away_score: u32,
    },
    GameOver {
        home_score: u32,
        away_score: u32,
    },
}

impl EventDetail {
    pub fn kind(&self) -> EventKind {
        match self {
            EventDetail::TipOff => EventKind::TipOff,
            EventDetail::ShotMade(_) => EventKind::ShotMade,
            EventDetail::ShotMissed(_) => EventKind::ShotMissed,
            EventDetail::FreeThrow { .. } => EventKind::FreeThrow,
            EventDetail::Rebound { .. } => EventKind::Rebound,
            EventDetail::Turnover { .. } => EventKind::Turnover,
            EventDetail::Substitution { .. } => EventKind::Substitution,
            EventDetail::QuarterEnd { .. } => EventKind::QuarterEnd,
            EventDetail::GameOver { .. } => EventKind::GameOver,
        }
    }

    /// Points this event puts on the board for the acting team.
    pub fn points_scored(&self) -> u32 {
        match self {
            EventDetail::ShotMade(shot) => shot.points,
            EventDetail::FreeThrow { made: true, .. } => 1,
            _ => 0,
        }
    }
}

#[derive(Debug, Clone, PartialEq, Deserialize)]
#[serde(try_from = "EventRecord")]
pub struct GameEvent {
    pub detail: EventDetail,
    /// Seconds left in the period when the event happened
    pub timestamp: u32,
    pub quarter: u8,
    /// Acting team index (0 home, 1 away)
    pub team_id: usize,
    /// None for quarter and game boundaries
    pub player_id: Option<String>,
    /// Every rostered player's line at emission time, keyed by player id
    pub player_states: BTreeMap<String, PlayerSnapshot>,
}

impl GameEvent {
    pub fn kind(&self) -> EventKind {
        self.detail.kind()
    }
}
