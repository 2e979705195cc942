use serde::{Deserialize, Serialize};
use std::collections::BTreeMap;

use crate::models::statistics::{round1, StatLine};
use crate::models::{Player, Team};

/// Per-player state attached to events and checkpoints.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct PlayerSnapshot {
    pub ast: u32,
    pub blk: u32,
    pub court_time: u32,
    pub drb: u32,
    /// Rounded to one decimal
    pub energy: f32,
    pub fg: u32,
    pub fga: u32,
    pub fg_threepoint: u32,
    pub fga_threepoint: u32,
    pub ft: u32,
    pub fta: u32,
    pub orb: u32,
    pub mp: u32,
    pub pf: u32,
    pub pts: u32,
    pub stl: u32,
    pub tov: u32,
}

impl From<&Player> for PlayerSnapshot {
    fn from(player: &Player) -> Self {
        let s = &player.stats;
        Self {
            ast: s.ast,
            blk: s.blk,
            court_time: player.court_time,
            drb: s.drb,
            energy: round1(player.energy),
            fg: s.fg,
            fga: s.fga,
            fg_threepoint: s.tp,
            fga_threepoint: s.tpa,
            ft: s.ft,
            fta: s.fta,
            orb: s.orb,
            mp: player.minutes,
            pf: s.pf,
            pts: s.pts,
            stl: s.stl,
            tov: s.tov,
        }
    }
}

/// Snapshot of every rostered player of both teams.
pub fn player_states(teams: &[Team; 2]) -> BTreeMap<String, PlayerSnapshot> {
    teams
        .iter()
        .flat_map(|team| team.players.iter())
        .map(|p| (p.id.clone(), PlayerSnapshot::from(p)))
        .collect()
}

/// Team aggregate line with the two-point split and shooting percentages.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct TeamBoxScore {
    pub pts: u32,
    pub fg: u32,
    pub fga: u32,
    pub tp: u32,
    pub tpa: u32,
    pub twop: u32,
    pub twopa: u32,
    pub ft: u32,
    pub fta: u32,
    pub orb: u32,
    pub drb: u32,
    pub ast: u32,
    pub stl: u32,
    pub blk: u32,
    pub tov: u32,
    pub pf: u32,
    pub fg_pct: f32,
    pub tp_pct: f32,
    pub ft_pct: f32,
}

impl From<&StatLine> for TeamBoxScore {
    fn from(s: &StatLine) -> Self {
        Self {
            pts: s.pts,
            fg: s.fg,
            fga: s.fga,
            tp: s.tp,
            tpa: s.tpa,
            twop: s.two_pt(),
            twopa: s.two_pt_attempts(),
            ft: s.ft,
            fta: s.fta,
            orb: s.orb,
            drb: s.drb,
            ast: s.ast,
            stl: s.stl,
            blk: s.blk,
            tov: s.tov,
            pf: s.pf,
            fg_pct: round1(s.fg_pct()),
            tp_pct: round1(s.tp_pct()),
            ft_pct: round1(s.ft_pct()),
        }
    }
}
