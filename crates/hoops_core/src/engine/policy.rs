//! Pluggable possession decisions
//!
//! Who gets credit for an assist and whether a possession ends in a turnover
//! (and who stole it) are model choices rather than rules of the game, so
//! they sit behind [`PossessionPolicy`]. [`RatingPolicy`] is the default,
//! driven purely by composite ratings.

use rand::RngCore;

use super::config::ProbabilityConfig;
use super::probability::{roll, turnover_probability, weighted_choice_index};
use crate::models::{Skill, Team, LINEUP_SIZE};

/// Read-only view of the possession a policy decides on.
#[derive(Debug, Clone, Copy)]
pub struct PossessionContext<'a> {
    pub offense: &'a Team,
    pub defense: &'a Team,
    pub quarter: u8,
    /// Seconds left in the period
    pub clock: u32,
}

/// Decisions returning a lineup slot (0..5) or a yes/no outcome.
///
/// Implementations must draw only from `rng` so a seeded run stays
/// reproducible.
pub trait PossessionPolicy: Send + Sync {
    /// Offensive slot credited with the assist if the possession ends in a make.
    fn assist_candidate(&self, ctx: &PossessionContext<'_>, rng: &mut dyn RngCore) -> usize;

    fn turnover(&self, ctx: &PossessionContext<'_>, rng: &mut dyn RngCore) -> bool;

    /// Defensive slot credited with the steal.
    fn steal_credit(&self, ctx: &PossessionContext<'_>, rng: &mut dyn RngCore) -> usize;
}

#[derive(Debug, Clone, Default)]
pub struct RatingPolicy {
    probabilities: ProbabilityConfig,
}

impl RatingPolicy {
    pub fn new(probabilities: ProbabilityConfig) -> Self {
        Self { probabilities }
    }
}

impl PossessionPolicy for RatingPolicy {
    fn assist_candidate(&self, ctx: &PossessionContext<'_>, rng: &mut dyn RngCore) -> usize {
        weighted_choice_index(&ctx.offense.lineup_ratings(Skill::Passing), rng)
    }

    fn turnover(&self, ctx: &PossessionContext<'_>, rng: &mut dyn RngCore) -> bool {
        let stealing = mean(&ctx.defense.lineup_ratings(Skill::Stealing));
        let handling = mean(&ctx.offense.lineup_ratings(Skill::BallHandling));
        roll(turnover_probability(&self.probabilities, stealing, handling), rng)
    }

    fn steal_credit(&self, ctx: &PossessionContext<'_>, rng: &mut dyn RngCore) -> usize {
        weighted_choice_index(&ctx.defense.lineup_ratings(Skill::Stealing), rng)
    }
}

fn mean(values: &[f32; LINEUP_SIZE]) -> f32 {
    values.iter().sum::<f32>() / LINEUP_SIZE as f32
}
