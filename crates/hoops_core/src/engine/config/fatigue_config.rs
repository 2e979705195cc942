//! Fatigue and rotation configuration

use serde::{Deserialize, Serialize};

#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
#[serde(default)]
pub struct FatigueConfig {
    /// Run substitution checks at dead balls (default: true)
    pub substitutions_enabled: bool,

    // === Energy ===
    /// Energy lost per possession on court at average endurance (default: 1.6)
    pub on_court_decay: f32,
    /// Energy regained per possession on the bench (default: 2.5)
    pub bench_recovery: f32,
    /// How much endurance bends the decay rate (default: 0.5)
    /// decay scales by `1 - endurance_impact * (endurance - 50) / 100`
    pub endurance_impact: f32,

    // === Rotation ===
    /// On-court players below this energy are subbed out (default: 55.0)
    pub sub_out_energy: f32,
    /// Bench players need at least this much energy to come in (default: 75.0)
    pub sub_in_energy: f32,
}

impl Default for FatigueConfig {
    fn default() -> Self {
        Self {
            substitutions_enabled: true,
            on_court_decay: 1.6,
            bench_recovery: 2.5,
            endurance_impact: 0.5,
            sub_out_energy: 55.0,
            sub_in_energy: 75.0,
        }
    }
}
