//! Game clock configuration

use serde::{Deserialize, Serialize};

#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
#[serde(default)]
pub struct ClockConfig {
    /// Length of every period, overtime included (default: 720)
    pub period_seconds: u32,
    /// Seconds consumed by a possession ending in a shot (default: 8..=24)
    pub shot_possession_seconds: (u32, u32),
    /// Seconds consumed by a possession ending in a turnover (default: 4..=16)
    pub turnover_possession_seconds: (u32, u32),
    /// Guard against a runaway state machine (default: 100_000)
    pub max_transitions: u32,
}

impl Default for ClockConfig {
    fn default() -> Self {
        Self {
            period_seconds: 720,
            shot_possession_seconds: (8, 24),
            turnover_possession_seconds: (4, 16),
            max_transitions: 100_000,
        }
    }
}
