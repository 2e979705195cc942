//! Possession state machine: states, triggers and the transition table.
//!
//! Phase handlers never pick the next state themselves. They return a
//! [`Trigger`] and [`next_state`] resolves it; any pair that is not in the
//! table is a defect and stops the run.

use serde::{Deserialize, Serialize};

use crate::error::GameError;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum GameState {
    TipOff,
    Inbound,
    AssistDecision,
    TakeShot,
    Rebound,
    FreeThrow,
    EndOfQuarter,
    GameOver,
}

impl GameState {
    pub fn is_terminal(self) -> bool {
        matches!(self, GameState::GameOver)
    }
}

/// Outcome reported by a phase handler.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum Trigger {
    TipWon,
    Inbounded,
    ClockExpired,
    /// Possession lost, the other team sets up
    Turnover,
    ShotSetUp,
    ShotMade,
    ShotMissed,
    ShootingFoul,
    OffensiveRebound,
    DefensiveRebound,
    LastFreeThrowMade,
    LastFreeThrowMissed,
    NextPeriod,
    Overtime,
    Final,
}

/// Look up the state that follows `state` when its handler reports `trigger`.
pub fn next_state(state: GameState, trigger: Trigger) -> Result<GameState, GameError> {
    use GameState as S;
    use Trigger as T;

    let next = match (state, trigger) {
        (S::TipOff, T::TipWon) => S::AssistDecision,
        (S::Inbound, T::Inbounded) => S::AssistDecision,

        (S::AssistDecision, T::ClockExpired) => S::EndOfQuarter,
        (S::AssistDecision, T::Turnover) => S::AssistDecision,
        (S::AssistDecision, T::ShotSetUp) => S::TakeShot,

        (S::TakeShot, T::ShootingFoul) => S::FreeThrow,
        (S::TakeShot, T::ShotMade) => S::Inbound,
        (S::TakeShot, T::ShotMissed) => S::Rebound,

        (S::Rebound, T::ClockExpired) => S::EndOfQuarter,
        (S::Rebound, T::OffensiveRebound | T::DefensiveRebound) => S::AssistDecision,

        (S::FreeThrow, T::LastFreeThrowMade) => S::Inbound,
        (S::FreeThrow, T::LastFreeThrowMissed) => S::Rebound,

        (S::EndOfQuarter, T::NextPeriod | T::Overtime) => S::Inbound,
        (S::EndOfQuarter, T::Final) => S::GameOver,

        _ => return Err(GameError::IllegalTransition { state, trigger }),
    };
    Ok(next)
}

/// Period bookkeeping at the end of a quarter.
///
/// Returns `Final` only once regulation is over and the score is not tied;
/// a tie after the fourth opens another period.
pub fn period_end_trigger(quarter: u8, is_tied: bool, regulation_periods: u8) -> Trigger {
    if quarter < regulation_periods {
        Trigger::NextPeriod
    } else if is_tied {
        Trigger::Overtime
    } else {
        Trigger::Final
    }
}
