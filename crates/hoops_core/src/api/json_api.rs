use serde::Deserialize;

use crate::engine::{GameEngine, GamePlan, SimConfig};
use crate::models::TeamRoster;
use crate::replay::MemoryStore;

pub const SCHEMA_VERSION: u8 = 1;

pub mod error_codes {
    pub const INVALID_REQUEST: &str = "E_INVALID_REQUEST";
    pub const UNSUPPORTED_SCHEMA: &str = "E_UNSUPPORTED_SCHEMA";
    pub const INVALID_CONFIG: &str = "E_INVALID_CONFIG";
    pub const INVALID_ROSTER: &str = "E_INVALID_ROSTER";
    pub const SIMULATION_FAILED: &str = "E_SIMULATION_FAILED";
}

fn err_code(code: &str, message: impl std::fmt::Display) -> String {
    format!("{code}: {message}")
}

#[derive(Debug, Deserialize)]
pub struct GameRequest {
    pub schema_version: u8,
    pub seed: u64,
    pub home_team: TeamRoster,
    pub away_team: TeamRoster,
    #[serde(default)]
    pub config: Option<SimConfig>,
    #[serde(default)]
    pub game_id: Option<String>,
}

impl GameRequest {
    pub fn into_plan(self) -> Result<GamePlan, String> {
        if self.schema_version != SCHEMA_VERSION {
            return Err(err_code(
                error_codes::UNSUPPORTED_SCHEMA,
                format!("expected schema_version {SCHEMA_VERSION}, got {}", self.schema_version),
            ));
        }
        let config = self.config.unwrap_or_default();
        config.validate().map_err(|e| err_code(error_codes::INVALID_CONFIG, e))?;

        Ok(GamePlan {
            home_team: self.home_team,
            away_team: self.away_team,
            seed: self.seed,
            config,
            game_id: self.game_id,
        })
    }
}

/// Simulate one game from a JSON request and return the event log as JSON.
///
/// Errors come back as `"<CODE>: <message>"` strings.
pub fn simulate_game_json(request_json: &str) -> Result<String, String> {
    let request: GameRequest =
        serde_json::from_str(request_json).map_err(|e| err_code(error_codes::INVALID_REQUEST, e))?;
    let plan = request.into_plan()?;

    let mut engine =
        GameEngine::new(plan).map_err(|e| err_code(error_codes::INVALID_ROSTER, e))?;
    let mut store = MemoryStore::new();
    engine.run(&mut store).map_err(|e| err_code(error_codes::SIMULATION_FAILED, e))?;

    engine.log().to_json().map_err(|e| err_code(error_codes::SIMULATION_FAILED, e))
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::engine::test_fixtures::test_roster;
    use crate::replay::{EventKind, EventLog};
    use serde_json::json;

    fn request(seed: u64) -> serde_json::Value {
        json!({
            "schema_version": 1,
            "seed": seed,
            "home_team": test_roster("home", 55),
            "away_team": test_roster("away", 65),
        })
    }

    #[test]
    fn test_simulate_game_json_returns_log() {
        let out = simulate_game_json(&request(9).to_string()).unwrap();
        let log = EventLog::from_json(&out).unwrap();
        assert_eq!(log.game_info.seed, 9);
        assert_eq!(log.events.last().map(|e| e.kind()), Some(EventKind::GameOver));
    }

    #[test]
    fn test_same_request_same_log() {
        let mut req = request(4);
        req["game_id"] = json!("fixed");
        let a = simulate_game_json(&req.to_string()).unwrap();
        let b = simulate_game_json(&req.to_string()).unwrap();
        let (a, b) = (EventLog::from_json(&a).unwrap(), EventLog::from_json(&b).unwrap());
        assert_eq!(a.digest().unwrap(), b.digest().unwrap());
    }

    #[test]
    fn test_config_override_is_applied() {
        let mut req = request(10);
        req["config"] = json!({ "probabilities": { "shooting_foul": 0.0 } });
        let out = simulate_game_json(&req.to_string()).unwrap();
        let log = EventLog::from_json(&out).unwrap();
        assert!(log.events.iter().all(|e| e.kind() != EventKind::FreeThrow));
    }

    #[test]
    fn test_request_errors_carry_codes() {
        let err = simulate_game_json("{").unwrap_err();
        assert!(err.starts_with(error_codes::INVALID_REQUEST));

        let mut req = request(1);
        req["schema_version"] = json!(2);
        let err = simulate_game_json(&req.to_string()).unwrap_err();
        assert!(err.starts_with(error_codes::UNSUPPORTED_SCHEMA));

        let mut req = request(1);
        req["config"] = json!({ "probabilities": { "free_throw_make": 1.5 } });
        let err = simulate_game_json(&req.to_string()).unwrap_err();
        assert!(err.starts_with(error_codes::INVALID_CONFIG));

        let mut req = request(1);
        req["config"] = json!({ "probabilities": { "min_make": 0.9, "max_make": 0.1 } });
        let err = simulate_game_json(&req.to_string()).unwrap_err();
        assert!(err.starts_with(error_codes::INVALID_CONFIG));

        let mut req = request(1);
        req["away_team"]["players"].as_array_mut().unwrap().truncate(4);
        let err = simulate_game_json(&req.to_string()).unwrap_err();
        assert!(err.starts_with(error_codes::INVALID_ROSTER));
    }
}
