//! Roster-shaped input
//!
//! The engine does not care where rosters come from; loaders (JSON, CSV, an
//! API request) only have to produce these structs.

use serde::{Deserialize, Serialize};

use super::player::{Position, PrimitiveRatings};

#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
pub struct TeamRoster {
    pub team_id: String,
    pub team_name: String,
    #[serde(default)]
    pub abbreviation: String,
    #[serde(default)]
    pub season: String,
    #[serde(default)]
    pub coach: String,
    #[serde(default)]
    pub record: String,
    #[serde(default)]
    pub arena: String,
    /// Explicit starting five (player ids, slot order). Chosen from ratings when absent.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub starters: Option<Vec<String>>,
    pub players: Vec<PlayerRoster>,
}

#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
pub struct PlayerRoster {
    pub player_id: String,
    pub name: String,
    #[serde(default)]
    pub jersey: u8,
    pub position: Position,
    pub height_inches: u8,
    #[serde(flatten)]
    pub ratings: PrimitiveRatings,
}
