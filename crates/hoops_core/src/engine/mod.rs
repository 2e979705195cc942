pub mod config; // SimConfig: rates, fatigue, clock
pub mod game_sim;
pub mod phase; // state machine transition table
pub mod policy; // assist / turnover / steal decisions
pub mod probability;
pub mod stats;
pub mod substitutions;

#[cfg(test)]
pub(crate) mod test_fixtures;

pub use config::SimConfig;
pub use game_sim::{Game, GameEngine, GamePlan, GameSummary, Possession, AWAY, HOME};
pub use phase::{next_state, GameState, Trigger};
pub use policy::{PossessionContext, PossessionPolicy, RatingPolicy};
pub use stats::{box_score, BoxScore};
