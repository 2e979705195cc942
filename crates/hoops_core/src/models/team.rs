use serde::{Deserialize, Serialize};
use std::collections::HashSet;

use super::player::{Player, Position};
use super::rating::Skill;
use super::roster::TeamRoster;
use super::statistics::{StatEvent, StatLine};
use crate::error::RosterError;

pub const LINEUP_SIZE: usize = 5;

/// Slot template used when a roster does not name its starters.
const STARTING_SLOTS: [Position; LINEUP_SIZE] =
    [Position::G, Position::G, Position::F, Position::F, Position::C];

/// Immutable team metadata, captured into the event log at game start.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq, Default)]
pub struct TeamInfo {
    pub team_id: String,
    pub team_name: String,
    pub abbreviation: String,
    pub season: String,
    pub coach: String,
    pub record: String,
    pub arena: String,
}

#[derive(Debug, Clone)]
pub struct Team {
    pub info: TeamInfo,
    /// Full roster in input order; ids are unique
    pub players: Vec<Player>,
    /// Roster indices of the five on-court players, in slot order
    lineup: [usize; LINEUP_SIZE],
    starters: [usize; LINEUP_SIZE],
    pub stats: StatLine,
}

impl Team {
    pub fn from_roster(roster: TeamRoster) -> Result<Self, RosterError> {
        let TeamRoster {
            team_id,
            team_name,
            abbreviation,
            season,
            coach,
            record,
            arena,
            starters,
            players: roster_players,
        } = roster;

        let mut seen = HashSet::new();
        let mut players = Vec::with_capacity(roster_players.len());
        for entry in roster_players {
            if !seen.insert(entry.player_id.clone()) {
                return Err(RosterError::DuplicatePlayer {
                    team: team_name,
                    player_id: entry.player_id,
                });
            }
            for (attribute, value) in entry.ratings.named() {
                if value > 100 {
                    return Err(RosterError::RatingOutOfRange {
                        player_id: entry.player_id,
                        attribute,
                        value,
                    });
                }
            }
            players.push(
                Player::new(
                    entry.player_id,
                    entry.name,
                    entry.position,
                    entry.height_inches,
                    entry.ratings,
                )
                .with_jersey(entry.jersey),
            );
        }

        if players.len() < LINEUP_SIZE {
            return Err(RosterError::NotEnoughPlayers {
                team: team_name,
                found: players.len(),
                needed: LINEUP_SIZE,
            });
        }

        let lineup = match starters {
            Some(ids) => explicit_starters(&team_name, &players, &ids)?,
            None => select_starters(&players),
        };

        Ok(Self {
            info: TeamInfo { team_id, team_name, abbreviation, season, coach, record, arena },
            players,
            lineup,
            starters: lineup,
            stats: StatLine::default(),
        })
    }

    pub fn name(&self) -> &str {
        &self.info.team_name
    }

    pub fn lineup(&self) -> &[usize; LINEUP_SIZE] {
        &self.lineup
    }

    pub fn starting_lineup(&self) -> &[usize; LINEUP_SIZE] {
        &self.starters
    }

    pub fn on_court(&self, slot: usize) -> &Player {
        &self.players[self.lineup[slot]]
    }

    pub fn on_court_mut(&mut self, slot: usize) -> &mut Player {
        let idx = self.lineup[slot];
        &mut self.players[idx]
    }

    pub fn lineup_players(&self) -> impl Iterator<Item = &Player> + '_ {
        self.lineup.iter().map(move |&idx| &self.players[idx])
    }

    pub fn is_on_court(&self, roster_idx: usize) -> bool {
        self.lineup.contains(&roster_idx)
    }

    pub fn bench(&self) -> impl Iterator<Item = (usize, &Player)> + '_ {
        self.players.iter().enumerate().filter(move |(idx, _)| !self.is_on_court(*idx))
    }

    /// Composite values of the on-court players, slot order.
    pub fn lineup_ratings(&self, skill: Skill) -> [f32; LINEUP_SIZE] {
        let mut ratings = [0.0; LINEUP_SIZE];
        for (slot, player) in self.lineup_players().enumerate() {
            ratings[slot] = player.composite.get(skill);
        }
        ratings
    }

    /// Credit a stat to the player in `slot` and to the team line.
    pub fn record(&mut self, slot: usize, event: StatEvent) {
        self.on_court_mut(slot).stats.apply(event);
        self.stats.apply(event);
    }

    pub fn points(&self) -> u32 {
        self.stats.pts
    }

    /// Sum of the per-player lines; equals `stats` at every point of a game.
    pub fn player_totals(&self) -> StatLine {
        self.players.iter().map(|p| &p.stats).sum()
    }

    /// Number of distinct on-court players.
    pub fn lineup_size(&self) -> usize {
        self.lineup.iter().collect::<HashSet<_>>().len()
    }

    /// Put bench player `roster_idx` into `slot`; returns the outgoing roster index.
    pub(crate) fn substitute(&mut self, slot: usize, roster_idx: usize) -> usize {
        debug_assert!(!self.is_on_court(roster_idx));
        std::mem::replace(&mut self.lineup[slot], roster_idx)
    }

    /// Restore starters and wipe per-game state.
    pub fn reset(&mut self) {
        for player in &mut self.players {
            player.clear_stats();
        }
        self.lineup = self.starters;
        self.stats = StatLine::default();
    }

    pub fn round_minutes(&mut self) {
        for player in &mut self.players {
            player.round_minutes();
        }
    }
}

fn explicit_starters(
    team: &str,
    players: &[Player],
    ids: &[String],
) -> Result<[usize; LINEUP_SIZE], RosterError> {
    let distinct: HashSet<&String> = ids.iter().collect();
    if ids.len() != LINEUP_SIZE || distinct.len() != LINEUP_SIZE {
        return Err(RosterError::InvalidStarters { team: team.to_string() });
    }

    let mut lineup = [0; LINEUP_SIZE];
    for (slot, id) in ids.iter().enumerate() {
        lineup[slot] = players.iter().position(|p| &p.id == id).ok_or_else(|| {
            RosterError::UnknownStarter { team: team.to_string(), player_id: id.clone() }
        })?;
    }
    Ok(lineup)
}

/// Fill G, G, F, F, C with the best compatible players by overall rating,
/// falling back to the best remaining player when a slot has no fit.
fn select_starters(players: &[Player]) -> [usize; LINEUP_SIZE] {
    let mut by_overall: Vec<usize> = (0..players.len()).collect();
    by_overall.sort_by(|&a, &b| {
        players[b]
            .composite
            .get(Skill::Overall)
            .total_cmp(&players[a].composite.get(Skill::Overall))
            .then(a.cmp(&b))
    });

    let mut used = vec![false; players.len()];
    let mut lineup = [0; LINEUP_SIZE];
    for (slot, &wanted) in STARTING_SLOTS.iter().enumerate() {
        let pick = by_overall
            .iter()
            .copied()
            .find(|&idx| !used[idx] && players[idx].position.is_compatible_position(wanted))
            .or_else(|| by_overall.iter().copied().find(|&idx| !used[idx]));
        // players.len() >= LINEUP_SIZE is checked by the caller
        if let Some(idx) = pick {
            used[idx] = true;
            lineup[slot] = idx;
        }
    }
    lineup
}
