//! hoops CLI library
//!
//! Roster file loaders plus the file-level helpers behind the `hoops`
//! subcommands, kept here so they can be tested without a process.

pub mod roster_file;

use anyhow::{Context, Result};
use serde::Serialize;
use std::fs;
use std::path::Path;

use hoops_core::engine::BoxScore;
use hoops_core::replay::load_log_json;
use hoops_core::{box_score, SimConfig};

pub use roster_file::{load_roster, parse_csv_roster, parse_json_roster};

/// Load a `SimConfig` from YAML or JSON, picked by extension.
pub fn load_config(path: &Path) -> Result<SimConfig> {
    let text = fs::read_to_string(path)
        .with_context(|| format!("Failed to read config file: {}", path.display()))?;
    let is_json = path.extension().and_then(|e| e.to_str()) == Some("json");
    let config = if is_json {
        SimConfig::from_json_str(&text)
    } else {
        SimConfig::from_yaml_str(&text)
    }
    .with_context(|| format!("Invalid config: {}", path.display()))?;
    Ok(config)
}

/// What `hoops inspect` reports about a saved log.
#[derive(Debug, Clone, Serialize)]
pub struct LogReport {
    pub game_id: String,
    pub seed: u64,
    pub events: usize,
    pub checkpoints: usize,
    pub digest: String,
    pub box_score: Option<BoxScore>,
}

pub fn inspect_log(path: &Path) -> Result<LogReport> {
    let log = load_log_json(path)?;
    Ok(LogReport {
        game_id: log.game_info.game_id.clone(),
        seed: log.game_info.seed,
        events: log.events.len(),
        checkpoints: log.checkpoints.len(),
        digest: log.digest().context("Failed to hash event log")?,
        box_score: box_score(&log),
    })
}
