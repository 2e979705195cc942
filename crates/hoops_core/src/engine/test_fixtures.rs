//! Test Fixtures
//!
//! Shared rosters and engines for unit and contract tests.

use super::config::SimConfig;
use super::game_sim::{GameEngine, GamePlan};
use crate::models::{PlayerRoster, Position, PrimitiveRatings, TeamRoster};

/// Ten-man roster with every primitive rating at `rating`.
///
/// Positions run G, G, F, F, C, G, GF, F, FC, C; ids are `<name>_p<i>`.
pub fn test_roster(name: &str, rating: u8) -> TeamRoster {
    const POSITIONS: [Position; 10] = [
        Position::G,
        Position::G,
        Position::F,
        Position::F,
        Position::C,
        Position::G,
        Position::GF,
        Position::F,
        Position::FC,
        Position::C,
    ];
    let mut roster = build_roster(name, &POSITIONS, rating);
    for player in &mut roster.players {
        player.height_inches = height_for(player.position);
    }
    roster
}

/// Roster with the given positions, uniform ratings of 60 and equal heights.
pub fn roster_with_positions(name: &str, positions: &[Position]) -> TeamRoster {
    build_roster(name, positions, 60)
}

pub fn test_plan(seed: u64) -> GamePlan {
    GamePlan {
        home_team: test_roster("home", 60),
        away_team: test_roster("away", 60),
        seed,
        config: SimConfig::default(),
        game_id: Some(format!("test_{seed}")),
    }
}

pub fn test_engine(seed: u64) -> GameEngine {
    GameEngine::new(test_plan(seed)).expect("fixture rosters are valid")
}

fn build_roster(name: &str, positions: &[Position], rating: u8) -> TeamRoster {
    TeamRoster {
        team_id: name.to_string(),
        team_name: format!("{name} Testers"),
        abbreviation: name.chars().take(3).collect::<String>().to_uppercase(),
        season: "2024-25".to_string(),
        coach: "Coach".to_string(),
        record: "0-0".to_string(),
        arena: "Test Arena".to_string(),
        starters: None,
        players: positions
            .iter()
            .enumerate()
            .map(|(i, &position)| PlayerRoster {
                player_id: format!("{name}_p{i}"),
                name: format!("{name} player {i}"),
                jersey: i as u8,
                position,
                height_inches: 78,
                ratings: PrimitiveRatings::uniform(rating),
            })
            .collect(),
    }
}

fn height_for(position: Position) -> u8 {
    match position {
        Position::G => 75,
        Position::GF => 78,
        Position::F => 80,
        Position::FC => 82,
        Position::C => 84,
    }
}
