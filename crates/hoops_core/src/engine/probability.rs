//! Outcome resolution helpers
//!
//! All functions are pure apart from the RNG they are handed, so the rules
//! can be tested without building a game.

use rand::Rng;

use super::config::ProbabilityConfig;
use crate::models::ShotZone;

// ============================================================================
// Selection
// ============================================================================

/// Weighted random pick; returns an index into `weights`.
///
/// Non-positive weights never win. When every weight is non-positive the
/// pick is uniform. `weights` must not be empty.
pub fn weighted_choice_index<R: Rng + ?Sized>(weights: &[f32], rng: &mut R) -> usize {
    debug_assert!(!weights.is_empty(), "weighted pick over no candidates");
    if weights.is_empty() {
        return 0;
    }
    let total: f32 = weights.iter().map(|w| w.max(0.0)).sum();
    if total <= 0.0 {
        return rng.gen_range(0..weights.len());
    }

    let mut r = rng.gen::<f32>() * total;
    let mut last_positive = 0;
    for (i, &w) in weights.iter().enumerate() {
        if w <= 0.0 {
            continue;
        }
        last_positive = i;
        r -= w;
        if r <= 0.0 {
            return i;
        }
    }
    // float residue
    last_positive
}

/// Uniform draw over the three shot zones.
pub fn draw_shot_zone<R: Rng + ?Sized>(rng: &mut R) -> ShotZone {
    ShotZone::ALL[rng.gen_range(0..ShotZone::ALL.len())]
}

/// Seconds consumed by a possession, uniform over the inclusive range.
pub fn possession_seconds<R: Rng + ?Sized>(range: (u32, u32), rng: &mut R) -> u32 {
    let (min, max) = range;
    if min >= max {
        return min;
    }
    rng.gen_range(min..=max)
}

// ============================================================================
// Rates
// ============================================================================

/// Free throws owed after a shot attempt.
///
/// | made | fouled | zone  | awarded |
/// |------|--------|-------|---------|
/// | yes  | yes    | any   | 1       |
/// | no   | yes    | three | 3       |
/// | no   | yes    | other | 2       |
/// | any  | no     | any   | 0       |
pub fn free_throws_awarded(made: bool, fouled: bool, zone: ShotZone) -> u8 {
    match (fouled, made) {
        (false, _) => 0,
        (true, true) => 1,
        (true, false) if zone.is_three() => 3,
        (true, false) => 2,
    }
}

/// Chance that a shot from `zone` goes in.
///
/// Each rating shifts the zone base rate by its swing times `(rating - 50) / 100`.
pub fn make_probability(
    config: &ProbabilityConfig,
    zone: ShotZone,
    shooter_rating: f32,
    defender_rating: f32,
) -> f64 {
    let base = match zone {
        ShotZone::Inside => config.inside_make,
        ShotZone::MidRange => config.midrange_make,
        ShotZone::ThreePoint => config.three_make,
    };
    let shooter = (shooter_rating as f64 - 50.0) / 100.0;
    let defender = (defender_rating as f64 - 50.0) / 100.0;
    let p = base + config.shooter_skill_swing * shooter - config.defender_skill_swing * defender;
    p.clamp(config.min_make, config.max_make)
}

/// Chance that the matched defender blocks a missed shot.
pub fn block_probability(config: &ProbabilityConfig, blocking: f32) -> f64 {
    (config.block_on_miss * blocking as f64 / 50.0).clamp(0.0, 1.0)
}

/// Turnover chance of one possession: base rate scaled by how the defense's
/// steal skill compares with the offense's ball handling.
pub fn turnover_probability(
    config: &ProbabilityConfig,
    defense_stealing: f32,
    offense_handling: f32,
) -> f64 {
    let ratio = if offense_handling > 0.0 {
        defense_stealing as f64 / offense_handling as f64
    } else {
        1.0
    };
    (config.turnover_base * ratio).clamp(config.turnover_min, config.turnover_max)
}

/// Bernoulli draw; `p` outside 0..=1 is clamped.
pub fn roll<R: Rng + ?Sized>(p: f64, rng: &mut R) -> bool {
    rng.gen_bool(p.clamp(0.0, 1.0))
}

#[cfg(test)]
mod tests {
    use super::*;
    use rand::SeedableRng;
    use rand_chacha::ChaCha8Rng;

    #[test]
    fn test_free_throw_rule_exhaustive() {
        for zone in ShotZone::ALL {
            assert_eq!(free_throws_awarded(true, true, zone), 1);
            assert_eq!(free_throws_awarded(true, false, zone), 0);
            assert_eq!(free_throws_awarded(false, false, zone), 0);
        }
        assert_eq!(free_throws_awarded(false, true, ShotZone::ThreePoint), 3);
        assert_eq!(free_throws_awarded(false, true, ShotZone::Inside), 2);
        assert_eq!(free_throws_awarded(false, true, ShotZone::MidRange), 2);
    }

    #[test]
    fn test_weighted_choice_skips_non_positive() {
        let mut rng = ChaCha8Rng::seed_from_u64(7);
        for _ in 0..500 {
            let idx = weighted_choice_index(&[0.0, 3.0, -1.0, 2.0, 0.0], &mut rng);
            assert!(idx == 1 || idx == 3, "picked {idx}");
        }
    }

    #[test]
    #[cfg(debug_assertions)]
    #[should_panic(expected = "no candidates")]
    fn test_weighted_choice_rejects_empty() {
        let mut rng = ChaCha8Rng::seed_from_u64(0);
        weighted_choice_index(&[], &mut rng);
    }

    #[test]
    fn test_weighted_choice_all_zero_is_uniform() {
        let mut rng = ChaCha8Rng::seed_from_u64(11);
        let mut seen = [0u32; 5];
        for _ in 0..2_000 {
            seen[weighted_choice_index(&[0.0; 5], &mut rng)] += 1;
        }
        assert!(seen.iter().all(|&n| n > 300), "{seen:?}");
    }

    #[test]
    fn test_weighted_choice_tracks_weights() {
        let mut rng = ChaCha8Rng::seed_from_u64(3);
        let mut heavy = 0;
        for _ in 0..4_000 {
            if weighted_choice_index(&[1.0, 3.0], &mut rng) == 1 {
                heavy += 1;
            }
        }
        let share = heavy as f64 / 4_000.0;
        assert!((share - 0.75).abs() < 0.04, "share {share}");
    }

    #[test]
    fn test_make_probability_bounds() {
        let cfg = ProbabilityConfig::default();
        let even = make_probability(&cfg, ShotZone::ThreePoint, 50.0, 50.0);
        assert!((even - cfg.three_make).abs() < 1e-9);

        assert!(make_probability(&cfg, ShotZone::Inside, 90.0, 20.0) > cfg.inside_make);
        assert!(make_probability(&cfg, ShotZone::Inside, 20.0, 90.0) < cfg.inside_make);

        let mut extreme = cfg.clone();
        extreme.shooter_skill_swing = 10.0;
        assert_eq!(make_probability(&extreme, ShotZone::MidRange, 100.0, 0.0), cfg.max_make);
        assert_eq!(make_probability(&extreme, ShotZone::MidRange, 0.0, 100.0), cfg.min_make);
    }

    #[test]
    fn test_turnover_probability_clamped() {
        let cfg = ProbabilityConfig::default();
        assert!((turnover_probability(&cfg, 50.0, 50.0) - 0.13).abs() < 1e-9);
        assert_eq!(turnover_probability(&cfg, 100.0, 10.0), cfg.turnover_max);
        assert_eq!(turnover_probability(&cfg, 5.0, 100.0), cfg.turnover_min);
        assert!((turnover_probability(&cfg, 40.0, 0.0) - 0.13).abs() < 1e-9);
    }

    #[test]
    fn test_possession_seconds_in_range() {
        let mut rng = ChaCha8Rng::seed_from_u64(1);
        for _ in 0..200 {
            let s = possession_seconds((8, 24), &mut rng);
            assert!((8..=24).contains(&s));
        }
        assert_eq!(possession_seconds((5, 5), &mut rng), 5);
    }

    #[test]
    fn test_zone_draw_covers_all_zones() {
        let mut rng = ChaCha8Rng::seed_from_u64(5);
        let mut seen = std::collections::HashSet::new();
        for _ in 0..100 {
            seen.insert(draw_shot_zone(&mut rng));
        }
        assert_eq!(seen.len(), 3);
    }
}
