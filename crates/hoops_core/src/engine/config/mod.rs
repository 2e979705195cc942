//! # Simulation Configuration
//!
//! Every tuning constant of the possession engine lives here so a run can be
//! reproduced from (rosters, seed, config).
//!
//! ## Usage
//! ```rust
//! use hoops_core::engine::config::SimConfig;
//!
//! let config = SimConfig::default();
//! let fast = SimConfig::up_tempo();
//! assert!(fast.clock.shot_possession_seconds.1 < config.clock.shot_possession_seconds.1);
//! ```

mod clock_config;
mod fatigue_config;
mod probability_config;

pub use clock_config::ClockConfig;
pub use fatigue_config::FatigueConfig;
pub use probability_config::ProbabilityConfig;

use serde::{Deserialize, Serialize};

use crate::error::ConfigError;

#[derive(Debug, Clone, Serialize, Deserialize, Default, PartialEq)]
#[serde(default)]
pub struct SimConfig {
    pub probabilities: ProbabilityConfig,
    pub fatigue: FatigueConfig,
    pub clock: ClockConfig,
}

impl SimConfig {
    pub fn realistic() -> Self {
        Self::default()
    }

    /// Shorter possessions, more shots per game
    pub fn up_tempo() -> Self {
        let mut cfg = Self::default();
        cfg.clock.shot_possession_seconds = (6, 18);
        cfg.clock.turnover_possession_seconds = (3, 12);
        cfg.fatigue.on_court_decay = 2.0;
        cfg
    }

    /// Starters play the whole game; nobody tires
    pub fn iron_man() -> Self {
        let mut cfg = Self::default();
        cfg.fatigue.substitutions_enabled = false;
        cfg.fatigue.on_court_decay = 0.0;
        cfg
    }

    pub fn from_yaml_str(yaml: &str) -> Result<Self, ConfigError> {
        let cfg: SimConfig = serde_yaml::from_str(yaml)?;
        cfg.validate()?;
        Ok(cfg)
    }

    pub fn from_json_str(json: &str) -> Result<Self, ConfigError> {
        let cfg: SimConfig = serde_json::from_str(json)?;
        cfg.validate()?;
        Ok(cfg)
    }

    pub fn to_yaml(&self) -> Result<String, ConfigError> {
        Ok(serde_yaml::to_string(self)?)
    }

    pub fn validate(&self) -> Result<(), ConfigError> {
        for (name, value) in self.probabilities.named() {
            if !(0.0..=1.0).contains(&value) {
                return Err(ConfigError::Probability { name, value });
            }
        }
        let p = &self.probabilities;
        for (name, min, max) in [
            ("make", p.min_make, p.max_make),
            ("turnover", p.turnover_min, p.turnover_max),
        ] {
            if min > max {
                return Err(ConfigError::Bounds { name, min, max });
            }
        }
        for (name, (min, max)) in [
            ("shot_possession_seconds", self.clock.shot_possession_seconds),
            ("turnover_possession_seconds", self.clock.turnover_possession_seconds),
        ] {
            if min == 0 || min > max {
                return Err(ConfigError::Range { name, min, max });
            }
        }
        if self.clock.period_seconds == 0 {
            return Err(ConfigError::Range { name: "period_seconds", min: 0, max: 0 });
        }
        Ok(())
    }
}

// ========== Tests ==========
