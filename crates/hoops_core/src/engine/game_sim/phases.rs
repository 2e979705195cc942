//! Phase Handlers
//!
//! One method per [`GameState`]. Each resolves its part of the possession,
//! records stats, logs events and reports a [`Trigger`]; none of them sets
//! the next state.

use super::player_selection::{defending_skill, shooting_skill};
use super::{Game, GameEngine, AWAY, HOME, REGULATION_PERIODS};
use crate::engine::phase::{period_end_trigger, GameState, Trigger};
use crate::engine::policy::PossessionContext;
use crate::engine::probability::{
    block_probability, draw_shot_zone, free_throws_awarded, make_probability, roll,
    weighted_choice_index,
};
use crate::error::{GameError, Result};
use crate::models::{Skill, StatEvent};
use crate::replay::{EventDetail, ReboundType, ShotDetail};

impl GameEngine {
    /// Jump ball between the best leaper of each lineup.
    pub(super) fn tip_off(&mut self) -> Result<Trigger> {
        let contestants = [self.jump_ball_contestant(HOME), self.jump_ball_contestant(AWAY)];
        let weights = [
            self.game.teams[HOME].on_court(contestants[HOME]).composite.get(Skill::JumpBall),
            self.game.teams[AWAY].on_court(contestants[AWAY]).composite.get(Skill::JumpBall),
        ];
        let winner = weighted_choice_index(&weights, &mut self.rng);

        self.game.offense = winner;
        if self.game.quarter <= REGULATION_PERIODS {
            self.game.quarter = 1;
        }
        self.reset_clock();
        self.game.clear_possession();

        let player_id = self.player_id(winner, contestants[winner]);
        self.emit(EventDetail::TipOff, Some(player_id));
        Ok(Trigger::TipWon)
    }

    /// New possession after a score or a period break.
    pub(super) fn inbound(&mut self) -> Result<Trigger> {
        self.game.flip_possession();
        self.game.clear_possession();

        let (offense, defense) = (self.game.offense, self.game.defense());
        self.process_substitutions(offense, None);
        self.process_substitutions(defense, None);
        Ok(Trigger::Inbounded)
    }

    /// Pick the likely passer and find out whether the possession survives.
    pub(super) fn assist_decision(&mut self) -> Result<Trigger> {
        if self.game.clock == 0 {
            return Ok(Trigger::ClockExpired);
        }

        let (assist_slot, turnover) = {
            let ctx = possession_context(&self.game);
            let assist = self.policy.assist_candidate(&ctx, &mut self.rng);
            let turnover = self.policy.turnover(&ctx, &mut self.rng);
            (assist, turnover)
        };
        self.game.possession.assist_slot = Some(assist_slot);
        if !turnover {
            return Ok(Trigger::ShotSetUp);
        }

        self.advance_clock(self.config.clock.turnover_possession_seconds);
        if self.game.clock == 0 {
            return Ok(Trigger::ClockExpired);
        }

        let steal_slot = {
            let ctx = possession_context(&self.game);
            self.policy.steal_credit(&ctx, &mut self.rng)
        };
        self.game.possession.steal_slot = Some(steal_slot);

        let (offense, defense) = (self.game.offense, self.game.defense());
        self.game.teams[offense].record(assist_slot, StatEvent::Turnover);
        self.game.teams[defense].record(steal_slot, StatEvent::Steal);

        let ball_handler = self.player_id(offense, assist_slot);
        let steal_player_id = Some(self.player_id(defense, steal_slot));
        self.emit(EventDetail::Turnover { steal_player_id }, Some(ball_handler));

        self.game.flip_possession();
        self.game.clear_possession();
        Ok(Trigger::Turnover)
    }

    pub(super) fn take_shot(&mut self) -> Result<Trigger> {
        self.advance_clock(self.config.clock.shot_possession_seconds);

        let (offense, defense) = (self.game.offense, self.game.defense());
        let shooter = self.select_shooter();
        let defender = self.matched_defender(shooter);
        let zone = draw_shot_zone(&mut self.rng);

        let probabilities = &self.config.probabilities;
        let shooter_rating =
            self.game.teams[offense].on_court(shooter).composite.get(shooting_skill(zone));
        let defender_player = self.game.teams[defense].on_court(defender);
        let defender_rating = defender_player.composite.get(defending_skill(zone));
        let blocking = defender_player.composite.get(Skill::Blocking);

        let p_make = make_probability(probabilities, zone, shooter_rating, defender_rating);
        let p_foul = probabilities.shooting_foul;
        let p_block = block_probability(probabilities, blocking);

        let made = roll(p_make, &mut self.rng);
        let fouled = roll(p_foul, &mut self.rng);
        let blocked = !made && roll(p_block, &mut self.rng);
        let free_throws = free_throws_awarded(made, fouled, zone);

        let assist_slot = self.game.possession.assist_slot.filter(|&slot| slot != shooter);

        self.game.teams[offense].record(shooter, StatEvent::FieldGoalAttempt(zone));
        if made {
            self.game.teams[offense].record(shooter, StatEvent::FieldGoalMade(zone));
            if let Some(slot) = assist_slot {
                self.game.teams[offense].record(slot, StatEvent::Assist);
            }
        }
        if fouled {
            self.game.teams[defense].record(defender, StatEvent::PersonalFoul);
        }
        if blocked {
            self.game.teams[defense].record(defender, StatEvent::Block);
        }

        let shot = ShotDetail {
            shot_type: zone,
            points: zone.points(),
            shooting_foul: fouled,
            assist_player_id: assist_slot.map(|slot| self.player_id(offense, slot)),
            defender_id: Some(self.player_id(defense, defender)),
        };
        let detail = if made { EventDetail::ShotMade(shot) } else { EventDetail::ShotMissed(shot) };
        let shooter_id = self.player_id(offense, shooter);
        self.emit(detail, Some(shooter_id));

        let possession = &mut self.game.possession;
        possession.shooter_slot = Some(shooter);
        possession.zone = Some(zone);
        possession.free_throws = free_throws;

        Ok(if fouled {
            Trigger::ShootingFoul
        } else if made {
            Trigger::ShotMade
        } else {
            Trigger::ShotMissed
        })
    }

    pub(super) fn rebound(&mut self) -> Result<Trigger> {
        if self.game.clock == 0 {
            return Ok(Trigger::ClockExpired);
        }

        let offensive = roll(self.config.probabilities.offensive_rebound, &mut self.rng);
        let trigger = if offensive {
            let team = self.game.offense;
            let slot = self.select_rebounder(team);
            self.game.teams[team].record(slot, StatEvent::OffensiveRebound);
            self.game.possession.rebounder_slot = Some(slot);
            let player_id = self.player_id(team, slot);
            self.emit(EventDetail::Rebound { rebound_type: ReboundType::Offensive }, Some(player_id));
            Trigger::OffensiveRebound
        } else {
            let team = self.game.defense();
            let slot = self.select_rebounder(team);
            self.game.teams[team].record(slot, StatEvent::DefensiveRebound);
            // the rebounding team is the offense from here on
            self.game.flip_possession();
            self.game.possession.rebounder_slot = Some(slot);
            let player_id = self.player_id(team, slot);
            self.emit(EventDetail::Rebound { rebound_type: ReboundType::Defensive }, Some(player_id));
            Trigger::DefensiveRebound
        };

        self.game.clear_possession();
        Ok(trigger)
    }

    /// Shoot every awarded free throw; the last one decides where play goes.
    pub(super) fn free_throw(&mut self) -> Result<Trigger> {
        let shooter = self.game.possession.shooter_slot.ok_or(GameError::MissingPossessionData {
            state: GameState::FreeThrow,
            field: "shooter",
        })?;
        let total = self.game.possession.free_throws;
        if total == 0 {
            return Err(GameError::MissingPossessionData {
                state: GameState::FreeThrow,
                field: "free throws",
            });
        }

        let (offense, defense) = (self.game.offense, self.game.defense());
        self.process_substitutions(offense, Some(shooter));
        self.process_substitutions(defense, None);

        let shooter_id = self.player_id(offense, shooter);
        let mut last_made = false;
        for free_throw_num in 1..=total {
            let made = roll(self.config.probabilities.free_throw_make, &mut self.rng);
            self.game.teams[offense].record(shooter, StatEvent::FreeThrowAttempt);
            if made {
                self.game.teams[offense].record(shooter, StatEvent::FreeThrowMade);
            }
            self.game.possession.free_throws -= 1;
            self.emit(
                EventDetail::FreeThrow { made, free_throw_num, total_free_throws: total },
                Some(shooter_id.clone()),
            );
            last_made = made;
        }
        self.game.possession.last_free_throw_made = last_made;

        Ok(if last_made { Trigger::LastFreeThrowMade } else { Trigger::LastFreeThrowMissed })
    }

    /// Close the period, snapshot it and decide between another period and the end.
    pub(super) fn end_of_quarter(&mut self) -> Result<Trigger> {
        let quarter = self.game.quarter;
        let (home_score, away_score) = (self.game.score(HOME), self.game.score(AWAY));
        self.emit(EventDetail::QuarterEnd { quarter, home_score, away_score }, None);
        self.log.create_checkpoint(&self.game);
        log::info!("end of period {quarter}: {home_score}-{away_score}");

        let trigger = period_end_trigger(quarter, self.game.is_tied(), REGULATION_PERIODS);
        if trigger != Trigger::Final {
            if trigger == Trigger::Overtime {
                log::info!("tied after period {quarter}, going to overtime");
            }
            self.game.quarter += 1;
            self.reset_clock();
        }
        Ok(trigger)
    }

    /// Terminal bookkeeping, run once when the game enters `GameOver`.
    pub(super) fn game_over(&mut self) -> Result<()> {
        let (home_score, away_score) = (self.game.score(HOME), self.game.score(AWAY));
        let winner = if home_score > away_score { HOME } else { AWAY };
        self.game.winner = Some(winner);

        self.emit(EventDetail::GameOver { home_score, away_score }, None);
        for team in &mut self.game.teams {
            team.round_minutes();
        }
        log::info!(
            "game {} final: {} {} - {} {}",
            self.log.game_id(),
            self.game.teams[HOME].name(),
            home_score,
            away_score,
            self.game.teams[AWAY].name()
        );
        Ok(())
    }
}

fn possession_context(game: &Game) -> PossessionContext<'_> {
    PossessionContext {
        offense: game.offense_team(),
        defense: game.defense_team(),
        quarter: game.quarter,
        clock: game.clock,
    }
}
