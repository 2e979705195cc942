use serde::{Deserialize, Serialize};
use std::iter::Sum;
use std::ops::AddAssign;

/// Where a field-goal attempt comes from.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum ShotZone {
    #[serde(rename = "fga_inside")]
    Inside,
    #[serde(rename = "fga_midrange")]
    MidRange,
    #[serde(rename = "fga_threepoint")]
    ThreePoint,
}

impl ShotZone {
    pub const ALL: [ShotZone; 3] = [ShotZone::Inside, ShotZone::MidRange, ShotZone::ThreePoint];

    pub fn points(self) -> u32 {
        match self {
            ShotZone::ThreePoint => 3,
            ShotZone::Inside | ShotZone::MidRange => 2,
        }
    }

    pub fn is_three(self) -> bool {
        matches!(self, ShotZone::ThreePoint)
    }
}

/// One resolved contribution to a box score.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum StatEvent {
    FieldGoalAttempt(ShotZone),
    FieldGoalMade(ShotZone),
    FreeThrowAttempt,
    FreeThrowMade,
    OffensiveRebound,
    DefensiveRebound,
    Assist,
    Steal,
    Block,
    Turnover,
    PersonalFoul,
}

/// Counting stats shared by players and teams.
///
/// A team's line is the sum of its players' lines; `Team::record` keeps the
/// two in step.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct StatLine {
    pub pts: u32,
    pub fg: u32,
    pub fga: u32,
    pub tp: u32,
    pub tpa: u32,
    pub ft: u32,
    pub fta: u32,
    pub orb: u32,
    pub drb: u32,
    pub ast: u32,
    pub stl: u32,
    pub blk: u32,
    pub tov: u32,
    pub pf: u32,
}

impl StatLine {
    pub fn apply(&mut self, event: StatEvent) {
        match event {
            StatEvent::FieldGoalAttempt(zone) => {
                self.fga += 1;
                if zone.is_three() {
                    self.tpa += 1;
                }
            }
            StatEvent::FieldGoalMade(zone) => {
                self.fg += 1;
                if zone.is_three() {
                    self.tp += 1;
                }
                self.pts += zone.points();
            }
            StatEvent::FreeThrowAttempt => self.fta += 1,
            StatEvent::FreeThrowMade => {
                self.ft += 1;
                self.pts += 1;
            }
            StatEvent::OffensiveRebound => self.orb += 1,
            StatEvent::DefensiveRebound => self.drb += 1,
            StatEvent::Assist => self.ast += 1,
            StatEvent::Steal => self.stl += 1,
            StatEvent::Block => self.blk += 1,
            StatEvent::Turnover => self.tov += 1,
            StatEvent::PersonalFoul => self.pf += 1,
        }
    }

    pub fn trb(&self) -> u32 {
        self.orb + self.drb
    }

    pub fn two_pt(&self) -> u32 {
        self.fg - self.tp
    }

    pub fn two_pt_attempts(&self) -> u32 {
        self.fga - self.tpa
    }

    pub fn fg_pct(&self) -> f32 {
        pct(self.fg, self.fga)
    }

    pub fn tp_pct(&self) -> f32 {
        pct(self.tp, self.tpa)
    }

    pub fn ft_pct(&self) -> f32 {
        pct(self.ft, self.fta)
    }
}

impl AddAssign for StatLine {
    fn add_assign(&mut self, rhs: Self) {
        self.pts += rhs.pts;
        self.fg += rhs.fg;
        self.fga += rhs.fga;
        self.tp += rhs.tp;
        self.tpa += rhs.tpa;
        self.ft += rhs.ft;
        self.fta += rhs.fta;
        self.orb += rhs.orb;
        self.drb += rhs.drb;
        self.ast += rhs.ast;
        self.stl += rhs.stl;
        self.blk += rhs.blk;
        self.tov += rhs.tov;
        self.pf += rhs.pf;
    }
}

impl<'a> Sum<&'a StatLine> for StatLine {
    fn sum<I: Iterator<Item = &'a StatLine>>(iter: I) -> Self {
        let mut total = StatLine::default();
        for line in iter {
            total += *line;
        }
        total
    }
}

/// Shooting percentage: makes * 100 / attempts, 0 when nothing was attempted.
pub fn pct(makes: u32, attempts: u32) -> f32 {
    if attempts == 0 {
        0.0
    } else {
        makes as f32 * 100.0 / attempts as f32
    }
}

/// One-decimal rounding used for reported percentages and energy.
pub fn round1(value: f32) -> f32 {
    (value * 10.0).round() / 10.0
}
