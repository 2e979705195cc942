//! Box scores rebuilt from a finished log
//!
//! Works from the serialized log alone, so a game loaded from disk can be
//! summarized without re-running it.

use serde::Serialize;

use crate::models::statistics::StatLine;
use crate::replay::{EventLog, PlayerSnapshot, TeamBoxScore};

#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct PlayerLine {
    pub player_id: String,
    pub player_name: String,
    pub starter: bool,
    pub stats: PlayerSnapshot,
}

#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct TeamBox {
    pub team_name: String,
    pub players: Vec<PlayerLine>,
    pub totals: TeamBoxScore,
}

#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct BoxScore {
    pub game_id: String,
    pub periods: u8,
    pub teams: Vec<TeamBox>,
}

impl From<&PlayerSnapshot> for StatLine {
    fn from(s: &PlayerSnapshot) -> Self {
        StatLine {
            pts: s.pts,
            fg: s.fg,
            fga: s.fga,
            tp: s.fg_threepoint,
            tpa: s.fga_threepoint,
            ft: s.ft,
            fta: s.fta,
            orb: s.orb,
            drb: s.drb,
            ast: s.ast,
            stl: s.stl,
            blk: s.blk,
            tov: s.tov,
            pf: s.pf,
        }
    }
}

/// Box score as of the last event in `log`; `None` for an empty log.
pub fn box_score(log: &EventLog) -> Option<BoxScore> {
    let last = log.events.last()?;
    let teams = log
        .game_info
        .teams
        .iter()
        .map(|entry| {
            let players: Vec<PlayerLine> = entry
                .players
                .iter()
                .filter_map(|p| {
                    let stats = last.player_states.get(&p.player_id)?.clone();
                    Some(PlayerLine {
                        player_id: p.player_id.clone(),
                        player_name: p.player_name.clone(),
                        starter: entry.starting_lineup.contains(&p.player_id),
                        stats,
                    })
                })
                .collect();
            let mut totals = StatLine::default();
            for line in &players {
                totals += StatLine::from(&line.stats);
            }
            TeamBox { team_name: entry.team_name.clone(), players, totals: TeamBoxScore::from(&totals) }
        })
        .collect();

    Some(BoxScore { game_id: log.game_info.game_id.clone(), periods: last.quarter, teams })
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::engine::test_fixtures::test_engine;

    #[test]
    fn test_box_score_matches_engine_totals() {
        let mut engine = test_engine(17);
        engine.play().unwrap();
        let box_score = box_score(engine.log()).unwrap();

        assert_eq!(box_score.teams.len(), 2);
        assert_eq!(box_score.periods, engine.game().quarter);
        for (team_box, team) in box_score.teams.iter().zip(&engine.game().teams) {
            assert_eq!(team_box.players.len(), team.players.len());
            assert_eq!(team_box.totals, TeamBoxScore::from(&team.stats));
            assert_eq!(team_box.players.iter().filter(|p| p.starter).count(), 5);
        }
    }

    #[test]
    fn test_empty_log_has_no_box_score() {
        let engine = test_engine(1);
        assert!(box_score(engine.log()).is_none());
    }
}
