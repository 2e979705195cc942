//! Composite ratings
//!
//! Folds the primitive 0..=100 attributes into one scalar per on-court action.
//! Each composite is a weighted mean, so it stays on the 0..=100 scale and can
//! be used directly as a selection weight.

use serde::{Deserialize, Serialize};

use super::player::PrimitiveRatings;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum Skill {
    JumpBall,
    Passing,
    BallHandling,
    Usage,
    Inside,
    MidRange,
    ThreePoint,
    Rebounding,
    InteriorDefense,
    PerimeterDefense,
    Stealing,
    Blocking,
    Endurance,
    Overall,
}

impl Skill {
    pub const ALL: [Skill; 14] = [
        Skill::JumpBall,
        Skill::Passing,
        Skill::BallHandling,
        Skill::Usage,
        Skill::Inside,
        Skill::MidRange,
        Skill::ThreePoint,
        Skill::Rebounding,
        Skill::InteriorDefense,
        Skill::PerimeterDefense,
        Skill::Stealing,
        Skill::Blocking,
        Skill::Endurance,
        Skill::Overall,
    ];

    fn index(self) -> usize {
        self as usize
    }

    /// (attribute, weight) pairs feeding this composite.
    fn components(self) -> &'static [(Attr, f32)] {
        use Attr::*;
        match self {
            Skill::JumpBall => &[(Hgt, 1.0), (Jmp, 0.25)],
            Skill::Passing => &[(Pss, 1.0), (Hndl, 0.4), (Oiq, 0.5)],
            Skill::BallHandling => &[(Hndl, 1.0), (Spd, 0.3), (Oiq, 0.4), (Stre, 0.2)],
            Skill::Usage => &[
                (Ins, 1.0),
                (Mid, 1.0),
                (Tp, 1.0),
                (Oiq, 0.5),
                (Hgt, 0.5),
                (Spd, 0.25),
                (Hndl, 0.25),
            ],
            Skill::Inside => &[(Ins, 1.0), (Hgt, 0.5), (Stre, 0.3)],
            Skill::MidRange => &[(Mid, 1.0), (Oiq, 0.3)],
            Skill::ThreePoint => &[(Tp, 1.0), (Oiq, 0.2)],
            Skill::Rebounding => &[(Reb, 1.0), (Hgt, 1.0), (Jmp, 0.3), (Stre, 0.2)],
            Skill::InteriorDefense => &[(Hgt, 1.0), (Stre, 0.5), (Jmp, 0.5), (Diq, 1.0)],
            Skill::PerimeterDefense => &[(Spd, 1.0), (Diq, 1.0), (Hgt, 0.2)],
            Skill::Stealing => &[(Spd, 0.5), (Diq, 1.0)],
            Skill::Blocking => &[(Hgt, 1.0), (Jmp, 0.5), (Diq, 0.5)],
            Skill::Endurance => &[(Stam, 1.0), (Dur, 0.5)],
            Skill::Overall => &[
                (Hgt, 0.5),
                (Stre, 0.2),
                (Spd, 0.4),
                (Jmp, 0.2),
                (Ins, 0.6),
                (Mid, 0.6),
                (Tp, 0.6),
                (Pss, 0.5),
                (Hndl, 0.5),
                (Reb, 0.4),
                (Oiq, 0.8),
                (Diq, 0.8),
                (Stam, 0.2),
            ],
        }
    }
}

#[derive(Debug, Clone, Copy)]
enum Attr {
    Hgt,
    Stre,
    Stam,
    Spd,
    Jmp,
    Ins,
    Mid,
    Tp,
    Pss,
    Hndl,
    Reb,
    Oiq,
    Diq,
    Dur,
}

impl Attr {
    fn value(self, r: &PrimitiveRatings) -> f32 {
        let v = match self {
            Attr::Hgt => r.hgt,
            Attr::Stre => r.stre,
            Attr::Stam => r.stam,
            Attr::Spd => r.spd,
            Attr::Jmp => r.jmp,
            Attr::Ins => r.ins,
            Attr::Mid => r.mid,
            Attr::Tp => r.tp,
            Attr::Pss => r.pss,
            Attr::Hndl => r.hndl,
            Attr::Reb => r.reb,
            Attr::Oiq => r.oiq,
            Attr::Diq => r.diq,
            Attr::Dur => r.dur,
        };
        v as f32
    }
}

/// Precomputed composites for one player.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct CompositeRatings {
    values: [f32; 14],
}

impl CompositeRatings {
    pub fn from_ratings(ratings: &PrimitiveRatings) -> Self {
        let mut values = [0.0; 14];
        for skill in Skill::ALL {
            values[skill.index()] = weighted_mean(ratings, skill.components());
        }
        Self { values }
    }

    #[inline]
    pub fn get(&self, skill: Skill) -> f32 {
        self.values[skill.index()]
    }
}

fn weighted_mean(ratings: &PrimitiveRatings, components: &[(Attr, f32)]) -> f32 {
    let total_weight: f32 = components.iter().map(|(_, w)| w).sum();
    if total_weight <= 0.0 {
        return 0.0;
    }
    let sum: f32 = components.iter().map(|(attr, w)| attr.value(ratings) * w).sum();
    sum / total_weight
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_uniform_ratings_give_uniform_composites() {
        let composite = CompositeRatings::from_ratings(&PrimitiveRatings::uniform(60));
        for skill in Skill::ALL {
            assert!((composite.get(skill) - 60.0).abs() < 1e-4, "{:?}", skill);
        }
    }

    #[test]
    fn test_height_dominates_jump_ball() {
        let mut tall = PrimitiveRatings::uniform(50);
        tall.hgt = 90;
        let mut short = PrimitiveRatings::uniform(50);
        short.hgt = 20;
        short.jmp = 90;

        let tall = CompositeRatings::from_ratings(&tall);
        let short = CompositeRatings::from_ratings(&short);
        assert!(tall.get(Skill::JumpBall) > short.get(Skill::JumpBall));
    }

    #[test]
    fn test_shooter_profiles() {
        let mut shooter = PrimitiveRatings::uniform(40);
        shooter.tp = 95;
        let c = CompositeRatings::from_ratings(&shooter);
        assert!(c.get(Skill::ThreePoint) > c.get(Skill::Inside));
        assert!(c.get(Skill::ThreePoint) <= 100.0);
    }
}
