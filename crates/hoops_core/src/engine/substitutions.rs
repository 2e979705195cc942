//! Fatigue-driven rotation
//!
//! Runs at dead balls (inbound and before free throws). A tired player is
//! replaced by the freshest compatible bench player; the newcomer takes the
//! same lineup slot so positional matchups stay aligned.

use super::config::FatigueConfig;
use super::game_sim::GameEngine;
use crate::models::{Team, LINEUP_SIZE};
use crate::replay::EventDetail;

/// Roster index of the best bench replacement for the player in `slot`.
///
/// Candidates must have at least `sub_in_energy` and a position the same as
/// or adjacent to the outgoing player's. Highest energy wins; the lower
/// roster index breaks ties.
pub fn find_substitute(team: &Team, slot: usize, config: &FatigueConfig) -> Option<usize> {
    let position = team.on_court(slot).position;
    team.bench()
        .filter(|(_, p)| {
            p.energy >= config.sub_in_energy && p.position.is_compatible_position(position)
        })
        .max_by(|(ia, a), (ib, b)| a.energy.total_cmp(&b.energy).then(ib.cmp(ia)))
        .map(|(idx, _)| idx)
}

impl GameEngine {
    /// Swap out every tired on-court player of `team`, except the one in
    /// `protected` (the free-throw shooter mid-trip).
    pub(crate) fn process_substitutions(&mut self, team: usize, protected: Option<usize>) {
        if !self.config.fatigue.substitutions_enabled {
            return;
        }

        for slot in 0..LINEUP_SIZE {
            if protected == Some(slot) {
                continue;
            }
            let roster = &self.game.teams[team];
            let tired = roster.on_court(slot);
            if tired.energy >= self.config.fatigue.sub_out_energy {
                continue;
            }

            let Some(bench_idx) = find_substitute(roster, slot, &self.config.fatigue) else {
                log::warn!(
                    "{}: no rested substitute for {} ({:.1} energy)",
                    roster.name(),
                    tired.name,
                    tired.energy
                );
                continue;
            };

            let out_idx = self.game.teams[team].substitute(slot, bench_idx);
            let players = &self.game.teams[team].players;
            let player_in_id = players[bench_idx].id.clone();
            let player_out_id = players[out_idx].id.clone();
            log::debug!(
                "Q{} {}: {} in for {}",
                self.game.quarter,
                self.game.teams[team].name(),
                players[bench_idx].name,
                players[out_idx].name
            );

            self.emit(
                EventDetail::Substitution {
                    player_in_id: player_in_id.clone(),
                    player_out_id,
                    team_id: team,
                },
                Some(player_in_id),
            );
        }
    }
}
