//! Outcome base rates

use serde::{Deserialize, Serialize};

/// Fixed base rates for the outcome draws.
///
/// Free-throw and offensive-rebound rates are not rating-weighted; they stay
/// here as named values so a caller can override them per run.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
#[serde(default)]
pub struct ProbabilityConfig {
    /// Free-throw make rate (default: 0.75)
    pub free_throw_make: f64,
    /// Share of missed shots rebounded by the offense (default: 0.15)
    pub offensive_rebound: f64,
    /// Shooting foul on any field-goal attempt (default: 0.12)
    pub shooting_foul: f64,
    /// Block on a missed attempt for an average defender (default: 0.08)
    pub block_on_miss: f64,

    // === Shot making ===
    /// Make rate at the rim for an average matchup (default: 0.58)
    pub inside_make: f64,
    /// Mid-range make rate (default: 0.41)
    pub midrange_make: f64,
    /// Three-point make rate (default: 0.35)
    pub three_make: f64,
    /// Make-rate swing from shooter skill, full 0..100 range (default: 0.30)
    pub shooter_skill_swing: f64,
    /// Make-rate swing from the matched defender (default: 0.15)
    pub defender_skill_swing: f64,
    /// Make-rate floor (default: 0.05)
    pub min_make: f64,
    /// Make-rate ceiling (default: 0.95)
    pub max_make: f64,

    // === Turnovers ===
    /// Turnover rate for an even handling/steal matchup (default: 0.13)
    pub turnover_base: f64,
    /// Turnover rate floor (default: 0.05)
    pub turnover_min: f64,
    /// Turnover rate ceiling (default: 0.25)
    pub turnover_max: f64,
}

impl Default for ProbabilityConfig {
    fn default() -> Self {
        Self {
            free_throw_make: 0.75,
            offensive_rebound: 0.15,
            shooting_foul: 0.12,
            block_on_miss: 0.08,

            inside_make: 0.58,
            midrange_make: 0.41,
            three_make: 0.35,
            shooter_skill_swing: 0.30,
            defender_skill_swing: 0.15,
            min_make: 0.05,
            max_make: 0.95,

            turnover_base: 0.13,
            turnover_min: 0.05,
            turnover_max: 0.25,
        }
    }
}

impl ProbabilityConfig {
    pub(crate) fn named(&self) -> [(&'static str, f64); 14] {
        [
            ("free_throw_make", self.free_throw_make),
            ("offensive_rebound", self.offensive_rebound),
            ("shooting_foul", self.shooting_foul),
            ("block_on_miss", self.block_on_miss),
            ("inside_make", self.inside_make),
            ("midrange_make", self.midrange_make),
            ("three_make", self.three_make),
            ("shooter_skill_swing", self.shooter_skill_swing),
            ("defender_skill_swing", self.defender_skill_swing),
            ("min_make", self.min_make),
            ("max_make", self.max_make),
            ("turnover_base", self.turnover_base),
            ("turnover_min", self.turnover_min),
            ("turnover_max", self.turnover_max),
        ]
    }
}
