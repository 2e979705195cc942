use serde::{Deserialize, Serialize};
use std::str::FromStr;

use super::rating::CompositeRatings;
use super::statistics::StatLine;

/// Player data for a single simulated game.
///
/// Built from a `PlayerRoster` entry when the game is constructed and owned by
/// exactly one `Team` until the game ends.
#[derive(Debug, Clone, PartialEq)]
pub struct Player {
    pub id: String,
    pub name: String,
    pub jersey: u8,
    pub position: Position,
    pub height_inches: u8,
    pub ratings: PrimitiveRatings,
    pub composite: CompositeRatings,

    /// Counting stats, mirrored into the owning team's line
    pub stats: StatLine,
    /// Seconds on court (exact)
    pub court_time: u32,
    /// Whole minutes; floor of `court_time` during play, rounded at game over
    pub minutes: u32,
    /// Fatigue proxy, 0.0..=100.0
    pub energy: f32,
}

impl Player {
    pub fn new(
        id: impl Into<String>,
        name: impl Into<String>,
        position: Position,
        height_inches: u8,
        ratings: PrimitiveRatings,
    ) -> Self {
        let ratings = ratings.with_height(height_inches);
        Self {
            id: id.into(),
            name: name.into(),
            jersey: 0,
            position,
            height_inches,
            composite: CompositeRatings::from_ratings(&ratings),
            ratings,
            stats: StatLine::default(),
            court_time: 0,
            minutes: 0,
            energy: 100.0,
        }
    }

    pub fn with_jersey(mut self, jersey: u8) -> Self {
        self.jersey = jersey;
        self
    }

    /// Reset per-game state (stats, time, energy) while keeping identity.
    pub fn clear_stats(&mut self) {
        self.stats = StatLine::default();
        self.court_time = 0;
        self.minutes = 0;
        self.energy = 100.0;
    }

    pub fn add_court_time(&mut self, seconds: u32) {
        self.court_time += seconds;
        self.minutes = self.court_time / 60;
    }

    /// Final minutes-played rounding (30 s and above rounds up).
    pub fn round_minutes(&mut self) {
        self.minutes = (self.court_time + 30) / 60;
    }

    pub fn adjust_energy(&mut self, delta: f32) {
        self.energy = (self.energy + delta).clamp(0.0, 100.0);
    }
}

#[derive(Debug, Clone, Copy, Serialize, Deserialize, PartialEq, Eq, Hash)]
#[serde(rename_all = "UPPERCASE")]
pub enum Position {
    G,
    GF,
    F,
    FC,
    C,
}

impl Position {
    /// Place on the guard → center spectrum.
    fn rank(self) -> i8 {
        match self {
            Position::G => 0,
            Position::GF => 1,
            Position::F => 2,
            Position::FC => 3,
            Position::C => 4,
        }
    }

    pub fn is_guard(self) -> bool {
        matches!(self, Position::G | Position::GF)
    }

    pub fn is_big(self) -> bool {
        matches!(self, Position::FC | Position::C)
    }

    /// Same or adjacent on the G–GF–F–FC–C spectrum.
    pub fn is_compatible_position(self, target: Position) -> bool {
        (self.rank() - target.rank()).abs() <= 1
    }

    pub fn code(self) -> &'static str {
        match self {
            Position::G => "G",
            Position::GF => "GF",
            Position::F => "F",
            Position::FC => "FC",
            Position::C => "C",
        }
    }
}

impl FromStr for Position {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.trim().to_uppercase().as_str() {
            "G" | "PG" | "SG" => Ok(Position::G),
            "GF" | "G-F" => Ok(Position::GF),
            "F" | "SF" | "PF" => Ok(Position::F),
            "FC" | "F-C" => Ok(Position::FC),
            "C" => Ok(Position::C),
            _ => Err(format!("Invalid position: {}", s)),
        }
    }
}

/// The 14 primitive attributes a roster supplies, plus `hgt` derived from
/// height. All values are on a 0..=100 scale.
#[derive(Debug, Clone, Copy, Serialize, Deserialize, PartialEq, Eq, Default)]
pub struct PrimitiveRatings {
    /// Derived from height; ignored on input
    #[serde(default, skip_serializing)]
    pub hgt: u8,
    pub stre: u8,
    pub stam: u8,
    pub spd: u8,
    pub jmp: u8,
    pub ins: u8,
    pub mid: u8,
    pub tp: u8,
    pub ft: u8,
    pub pss: u8,
    pub hndl: u8,
    pub reb: u8,
    pub oiq: u8,
    pub diq: u8,
    pub dur: u8,
}

impl PrimitiveRatings {
    /// Every attribute set to `value` (handy for fixtures).
    pub fn uniform(value: u8) -> Self {
        Self {
            hgt: value,
            stre: value,
            stam: value,
            spd: value,
            jmp: value,
            ins: value,
            mid: value,
            tp: value,
            ft: value,
            pss: value,
            hndl: value,
            reb: value,
            oiq: value,
            diq: value,
            dur: value,
        }
    }

    pub fn with_height(mut self, height_inches: u8) -> Self {
        self.hgt = height_rating(height_inches);
        self
    }

    /// Named view of the supplied attributes, in roster column order.
    pub fn named(&self) -> [(&'static str, u8); 14] {
        [
            ("stre", self.stre),
            ("stam", self.stam),
            ("spd", self.spd),
            ("jmp", self.jmp),
            ("ins", self.ins),
            ("mid", self.mid),
            ("tp", self.tp),
            ("ft", self.ft),
            ("pss", self.pss),
            ("hndl", self.hndl),
            ("reb", self.reb),
            ("oiq", self.oiq),
            ("diq", self.diq),
            ("dur", self.dur),
        ]
    }
}

/// Height → `hgt` rating: 5'6" (66 in) maps to 0, 7'6" (90 in) to 100.
pub fn height_rating(height_inches: u8) -> u8 {
    const MIN_INCHES: f32 = 66.0;
    const MAX_INCHES: f32 = 90.0;
    let scaled = (height_inches as f32 - MIN_INCHES) / (MAX_INCHES - MIN_INCHES) * 100.0;
    scaled.round().clamp(0.0, 100.0) as u8
}

/// Parse `"6-8"` style heights into inches.
pub fn parse_height(height: &str) -> Option<u8> {
    let (feet, inches) = height.trim().split_once('-')?;
    let feet: u8 = feet.trim().parse().ok()?;
    let inches: u8 = inches.trim().parse().ok()?;
    feet.checked_mul(12)?.checked_add(inches)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_height_rating_bounds() {
        assert_eq!(height_rating(60), 0);
        assert_eq!(height_rating(66), 0);
        assert_eq!(height_rating(78), 50);
        assert_eq!(height_rating(90), 100);
        assert_eq!(height_rating(95), 100);
    }

    #[test]
    fn test_parse_height() {
        assert_eq!(parse_height("6-8"), Some(80));
        assert_eq!(parse_height(" 7-0 "), Some(84));
        assert_eq!(parse_height("6'8"), None);
        assert_eq!(parse_height("x-1"), None);
    }

    #[test]
    fn test_position_compatibility() {
        assert!(Position::G.is_compatible_position(Position::GF));
        assert!(Position::F.is_compatible_position(Position::FC));
        assert!(Position::C.is_compatible_position(Position::C));
        assert!(!Position::G.is_compatible_position(Position::F));
        assert!(!Position::GF.is_compatible_position(Position::C));
    }

    #[test]
    fn test_position_from_str() {
        assert_eq!("gf".parse::<Position>(), Ok(Position::GF));
        assert_eq!("PG".parse::<Position>(), Ok(Position::G));
        assert!("QB".parse::<Position>().is_err());
    }

    #[test]
    fn test_energy_and_minutes() {
        let mut p = Player::new("p1", "Test", Position::G, 75, PrimitiveRatings::uniform(50));
        p.adjust_energy(-150.0);
        assert_eq!(p.energy, 0.0);
        p.adjust_energy(250.0);
        assert_eq!(p.energy, 100.0);

        p.add_court_time(89);
        assert_eq!(p.minutes, 1);
        p.round_minutes();
        assert_eq!(p.minutes, 1);
        p.add_court_time(1);
        p.round_minutes();
        assert_eq!(p.minutes, 2);
    }
}
