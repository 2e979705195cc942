//! Parallel batch runs
//!
//! Each seed gets its own engine, RNG and in-memory store, so games can run
//! on any worker thread and still match a sequential run seed for seed.

use rayon::prelude::*;
use serde::Serialize;

use crate::engine::game_sim::REGULATION_PERIODS;
use crate::engine::{GameEngine, GamePlan, GameSummary, SimConfig, HOME};
use crate::error::Result;
use crate::models::TeamRoster;
use crate::replay::MemoryStore;

/// Simulate one game per seed; results come back in seed order.
pub fn simulate_batch(
    home: &TeamRoster,
    away: &TeamRoster,
    seeds: &[u64],
    config: &SimConfig,
) -> Vec<Result<GameSummary>> {
    seeds.par_iter().map(|&seed| simulate_one(home, away, seed, config)).collect()
}

fn simulate_one(
    home: &TeamRoster,
    away: &TeamRoster,
    seed: u64,
    config: &SimConfig,
) -> Result<GameSummary> {
    let plan = GamePlan {
        home_team: home.clone(),
        away_team: away.clone(),
        seed,
        config: config.clone(),
        game_id: Some(format!("batch_{seed}")),
    };
    let mut engine = GameEngine::new(plan)?;
    engine.run(&mut MemoryStore::new())
}

/// Win split and scoring averages over a batch.
#[derive(Debug, Clone, Default, PartialEq, Serialize)]
pub struct BatchReport {
    pub games: usize,
    pub home_wins: usize,
    pub away_wins: usize,
    pub overtime_games: usize,
    pub failures: usize,
    pub avg_home_score: f64,
    pub avg_away_score: f64,
}

impl BatchReport {
    pub fn from_results(results: &[Result<GameSummary>]) -> Self {
        let mut report = BatchReport::default();
        let (mut home_points, mut away_points) = (0u64, 0u64);
        for result in results {
            let Ok(summary) = result else {
                report.failures += 1;
                continue;
            };
            report.games += 1;
            if summary.winner == HOME {
                report.home_wins += 1;
            } else {
                report.away_wins += 1;
            }
            if summary.periods > REGULATION_PERIODS {
                report.overtime_games += 1;
            }
            home_points += summary.home_score as u64;
            away_points += summary.away_score as u64;
        }
        if report.games > 0 {
            report.avg_home_score = home_points as f64 / report.games as f64;
            report.avg_away_score = away_points as f64 / report.games as f64;
        }
        report
    }

    pub fn home_win_pct(&self) -> f64 {
        if self.games == 0 {
            0.0
        } else {
            self.home_wins as f64 / self.games as f64
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::engine::test_fixtures::test_roster;
    use crate::error::GameError;

    #[test]
    fn test_batch_matches_sequential_runs() {
        let home = test_roster("home", 60);
        let away = test_roster("away", 60);
        let seeds = [1, 2, 3, 4, 5, 6];
        let config = SimConfig::default();

        let batch = simulate_batch(&home, &away, &seeds, &config);
        assert_eq!(batch.len(), seeds.len());
        for (result, &seed) in batch.iter().zip(&seeds) {
            let summary = result.as_ref().unwrap();
            let again = simulate_one(&home, &away, seed, &config).unwrap();
            assert_eq!(summary, &again);
            assert_eq!(summary.seed, seed);
        }
    }

    #[test]
    fn test_report_counts_wins_and_failures() {
        let home = test_roster("home", 80);
        let away = test_roster("away", 30);
        let seeds: Vec<u64> = (0..12).collect();
        let mut results = simulate_batch(&home, &away, &seeds, &SimConfig::default());
        results.push(Err(GameError::Finished));

        let report = BatchReport::from_results(&results);
        assert_eq!(report.games, 12);
        assert_eq!(report.failures, 1);
        assert_eq!(report.home_wins + report.away_wins, 12);
        assert!(report.home_wins > report.away_wins);
        assert!(report.avg_home_score > report.avg_away_score);
        assert!(report.home_win_pct() > 0.5);
    }

    #[test]
    fn test_invalid_config_fails_every_game() {
        let home = test_roster("home", 60);
        let away = test_roster("away", 60);
        let mut config = SimConfig::default();
        config.probabilities.turnover_min = 0.4;
        config.probabilities.turnover_max = 0.2;

        let results = simulate_batch(&home, &away, &[1, 2], &config);
        assert!(results.iter().all(|r| matches!(r, Err(GameError::Config(_)))));
        assert_eq!(BatchReport::from_results(&results).failures, 2);
    }

    #[test]
    fn test_empty_report() {
        let report = BatchReport::from_results(&[]);
        assert_eq!(report, BatchReport::default());
        assert_eq!(report.home_win_pct(), 0.0);
    }
}
