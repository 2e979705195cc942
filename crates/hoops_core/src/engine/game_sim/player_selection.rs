//! Player Selection
//!
//! Weighted picks over a lineup. Every pick draws from the engine's RNG, so
//! the order of calls is part of the determinism contract.

use super::GameEngine;
use crate::engine::probability::weighted_choice_index;
use crate::models::{ShotZone, Skill};

/// Composite that drives a shot from `zone`.
pub(crate) fn shooting_skill(zone: ShotZone) -> Skill {
    match zone {
        ShotZone::Inside => Skill::Inside,
        ShotZone::MidRange => Skill::MidRange,
        ShotZone::ThreePoint => Skill::ThreePoint,
    }
}

/// Composite the matched defender contests a shot from `zone` with.
pub(crate) fn defending_skill(zone: ShotZone) -> Skill {
    match zone {
        ShotZone::Inside => Skill::InteriorDefense,
        ShotZone::MidRange | ShotZone::ThreePoint => Skill::PerimeterDefense,
    }
}

impl GameEngine {
    /// Lineup slot of `team` picked with probability proportional to `skill`.
    pub(crate) fn weighted_slot(&mut self, team: usize, skill: Skill) -> usize {
        let weights = self.game.teams[team].lineup_ratings(skill);
        weighted_choice_index(&weights, &mut self.rng)
    }

    /// On-court player with the best jump-ball composite; the lower slot wins ties.
    pub(crate) fn jump_ball_contestant(&self, team: usize) -> usize {
        let ratings = self.game.teams[team].lineup_ratings(Skill::JumpBall);
        let mut best = 0;
        for (slot, &rating) in ratings.iter().enumerate() {
            if rating > ratings[best] {
                best = slot;
            }
        }
        best
    }

    pub(crate) fn select_shooter(&mut self) -> usize {
        self.weighted_slot(self.game.offense, Skill::Usage)
    }

    pub(crate) fn select_rebounder(&mut self, team: usize) -> usize {
        self.weighted_slot(team, Skill::Rebounding)
    }

    /// Defender guarding `slot`: lineups are slot-aligned, so it is the same slot.
    pub(crate) fn matched_defender(&self, slot: usize) -> usize {
        slot
    }

    pub(crate) fn player_id(&self, team: usize, slot: usize) -> String {
        self.game.teams[team].on_court(slot).id.clone()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::engine::test_fixtures::test_engine;

    #[test]
    fn test_zone_skills() {
        assert_eq!(shooting_skill(ShotZone::ThreePoint), Skill::ThreePoint);
        assert_eq!(defending_skill(ShotZone::Inside), Skill::InteriorDefense);
        assert_eq!(defending_skill(ShotZone::MidRange), Skill::PerimeterDefense);
    }

    #[test]
    fn test_jump_ball_picks_best_leaper() {
        let mut engine = test_engine(1);
        let team = &mut engine.game.teams[0];
        let idx = team.lineup()[3];
        team.players[idx].composite = crate::models::CompositeRatings::from_ratings(
            &crate::models::PrimitiveRatings::uniform(99).with_height(90),
        );
        assert_eq!(engine.jump_ball_contestant(0), 3);
    }

    #[test]
    fn test_weighted_slot_in_range() {
        let mut engine = test_engine(2);
        for _ in 0..50 {
            assert!(engine.select_shooter() < crate::models::LINEUP_SIZE);
            assert!(engine.select_rebounder(1) < crate::models::LINEUP_SIZE);
        }
    }
}
