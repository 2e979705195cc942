//! Game clock, court time and energy.

use super::GameEngine;
use crate::engine::config::FatigueConfig;
use crate::engine::probability::possession_seconds;
use crate::models::Skill;

/// Energy an on-court player loses per possession.
pub fn energy_decay(config: &FatigueConfig, endurance: f32) -> f32 {
    let scale = 1.0 - config.endurance_impact * (endurance - 50.0) / 100.0;
    (config.on_court_decay * scale).max(0.0)
}

impl GameEngine {
    /// Run a possession of random length off the clock; saturates at 0.
    ///
    /// Returns the seconds actually elapsed.
    pub(crate) fn advance_clock(&mut self, range: (u32, u32)) -> u32 {
        let seconds = possession_seconds(range, &mut self.rng);
        let elapsed = seconds.min(self.game.clock);
        self.game.clock -= elapsed;
        if elapsed > 0 {
            self.accrue_time(elapsed);
        }
        elapsed
    }

    pub(crate) fn reset_clock(&mut self) {
        self.game.clock = self.config.clock.period_seconds;
    }

    /// Court time and fatigue for everyone on court, recovery for the bench.
    fn accrue_time(&mut self, elapsed: u32) {
        let fatigue = &self.config.fatigue;
        for team in &mut self.game.teams {
            let lineup = *team.lineup();
            for (idx, player) in team.players.iter_mut().enumerate() {
                if lineup.contains(&idx) {
                    player.add_court_time(elapsed);
                    let decay = energy_decay(fatigue, player.composite.get(Skill::Endurance));
                    player.adjust_energy(-decay);
                } else {
                    player.adjust_energy(fatigue.bench_recovery);
                }
            }
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::engine::test_fixtures::test_engine;

    #[test]
    fn test_energy_decay_scales_with_endurance() {
        let cfg = FatigueConfig::default();
        assert!((energy_decay(&cfg, 50.0) - cfg.on_court_decay).abs() < 1e-6);
        assert!(energy_decay(&cfg, 90.0) < energy_decay(&cfg, 50.0));
        assert!(energy_decay(&cfg, 10.0) > energy_decay(&cfg, 50.0));

        let off = FatigueConfig { on_court_decay: 0.0, ..FatigueConfig::default() };
        assert_eq!(energy_decay(&off, 10.0), 0.0);
    }

    #[test]
    fn test_clock_saturates_and_credits_court_time() {
        let mut engine = test_engine(4);
        engine.game.clock = 5;
        let elapsed = engine.advance_clock((8, 24));
        assert_eq!(elapsed, 5);
        assert_eq!(engine.game.clock, 0);

        for team in &engine.game.teams {
            for (idx, player) in team.players.iter().enumerate() {
                if team.is_on_court(idx) {
                    assert_eq!(player.court_time, 5);
                    assert!(player.energy < 100.0);
                } else {
                    assert_eq!(player.court_time, 0);
                    assert_eq!(player.energy, 100.0);
                }
            }
        }

        assert_eq!(engine.advance_clock((8, 24)), 0);
        engine.reset_clock();
        assert_eq!(engine.game.clock, 720);
    }
}
