//! Possession-by-possession game driver
//!
//! [`GameEngine`] owns the [`Game`], the event log, the policy and the run's
//! single random source. Each step runs the handler of the current
//! [`GameState`], which reports a [`Trigger`]; the transition table decides
//! where play goes next.
//!
//! Handler bodies live in sibling files, each adding an `impl GameEngine`
//! block:
//! - `phases.rs`: one handler per state
//! - `player_selection.rs`: weighted picks (jump ball, shooter, rebounder)
//! - `clock.rs`: clock advance, court time and energy

mod clock;
mod phases;
mod player_selection;

use rand::SeedableRng;
use rand_chacha::ChaCha8Rng;
use serde::{Deserialize, Serialize};

use super::config::SimConfig;
use super::phase::{next_state, GameState, Trigger};
use super::policy::{PossessionPolicy, RatingPolicy};
use crate::error::{GameError, Result};
use crate::models::{ShotZone, Team, TeamRoster, LINEUP_SIZE};
use crate::replay::{game_key, EventDetail, EventLog, GameStore};

pub const HOME: usize = 0;
pub const AWAY: usize = 1;

/// Number of periods before overtime.
pub const REGULATION_PERIODS: u8 = 4;

/// Everything needed to start a game.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct GamePlan {
    pub home_team: TeamRoster,
    pub away_team: TeamRoster,
    pub seed: u64,
    #[serde(default)]
    pub config: SimConfig,
    /// Random v4 UUID when absent
    #[serde(default)]
    pub game_id: Option<String>,
}

/// Per-possession scratch data, cleared at every change of possession.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct Possession {
    pub assist_slot: Option<usize>,
    pub steal_slot: Option<usize>,
    pub shooter_slot: Option<usize>,
    pub rebounder_slot: Option<usize>,
    pub zone: Option<ShotZone>,
    /// Free throws still to shoot on this trip (0..=3)
    pub free_throws: u8,
    pub last_free_throw_made: bool,
}

/// Mutable state of one game.
#[derive(Debug, Clone)]
pub struct Game {
    /// Home at 0, away at 1
    pub teams: [Team; 2],
    /// Seconds left in the current period
    pub clock: u32,
    pub quarter: u8,
    pub state: GameState,
    /// Index of the team with the ball; the defense is always the other one
    pub offense: usize,
    pub possession: Possession,
    /// Set once the game is over
    pub winner: Option<usize>,
}

impl Game {
    pub fn new(home: Team, away: Team, period_seconds: u32) -> Self {
        Self {
            teams: [home, away],
            clock: period_seconds,
            quarter: 1,
            state: GameState::TipOff,
            offense: HOME,
            possession: Possession::default(),
            winner: None,
        }
    }

    pub fn defense(&self) -> usize {
        1 - self.offense
    }

    pub fn score(&self, team: usize) -> u32 {
        self.teams[team].points()
    }

    pub fn is_tied(&self) -> bool {
        self.score(HOME) == self.score(AWAY)
    }

    pub fn flip_possession(&mut self) {
        self.offense = self.defense();
        log::debug!("possession -> {}", self.teams[self.offense].name());
    }

    pub fn clear_possession(&mut self) {
        self.possession = Possession::default();
    }

    pub fn offense_team(&self) -> &Team {
        &self.teams[self.offense]
    }

    pub fn defense_team(&self) -> &Team {
        &self.teams[self.defense()]
    }

    pub fn is_over(&self) -> bool {
        self.state.is_terminal()
    }
}

/// Final result of a run.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct GameSummary {
    pub game_id: String,
    pub seed: u64,
    pub home_score: u32,
    pub away_score: u32,
    pub winner: usize,
    pub periods: u8,
    pub events: usize,
    pub digest: String,
}

pub struct GameEngine {
    pub(crate) rng: ChaCha8Rng,
    seed: u64,
    pub(crate) config: SimConfig,
    pub(crate) policy: Box<dyn PossessionPolicy>,
    pub(crate) game: Game,
    pub(crate) log: EventLog,
    transitions: u32,
    persisted: bool,
}

impl std::fmt::Debug for GameEngine {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("GameEngine")
            .field("seed", &self.seed)
            .field("state", &self.game.state)
            .field("quarter", &self.game.quarter)
            .field("clock", &self.game.clock)
            .field("events", &self.log.events.len())
            .finish()
    }
}

impl GameEngine {
    pub fn new(plan: GamePlan) -> Result<Self> {
        let GamePlan { home_team, away_team, seed, config, game_id } = plan;
        config.validate()?;
        let home = Team::from_roster(home_team)?;
        let away = Team::from_roster(away_team)?;

        let game_id = game_id.unwrap_or_else(|| uuid::Uuid::new_v4().to_string());
        let game = Game::new(home, away, config.clock.period_seconds);
        let log = EventLog::new(game_id, seed, &game.teams);
        let policy = Box::new(RatingPolicy::new(config.probabilities.clone()));

        Ok(Self {
            rng: ChaCha8Rng::seed_from_u64(seed),
            seed,
            config,
            policy,
            game,
            log,
            transitions: 0,
            persisted: false,
        })
    }

    /// Swap the assist/turnover/steal model.
    pub fn with_policy(mut self, policy: Box<dyn PossessionPolicy>) -> Self {
        self.policy = policy;
        self
    }

    pub fn game(&self) -> &Game {
        &self.game
    }

    pub fn log(&self) -> &EventLog {
        &self.log
    }

    pub fn into_log(self) -> EventLog {
        self.log
    }

    pub fn config(&self) -> &SimConfig {
        &self.config
    }

    pub fn seed(&self) -> u64 {
        self.seed
    }

    /// Run the current state's handler and move to the next state.
    ///
    /// Returns the state the game is in afterwards.
    pub fn step(&mut self) -> Result<GameState> {
        let state = self.game.state;
        if state.is_terminal() {
            return Err(GameError::Finished);
        }

        self.transitions += 1;
        if self.transitions > self.config.clock.max_transitions {
            return Err(GameError::TransitionLimit { limit: self.config.clock.max_transitions });
        }

        let trigger = match state {
            GameState::TipOff => self.tip_off()?,
            GameState::Inbound => self.inbound()?,
            GameState::AssistDecision => self.assist_decision()?,
            GameState::TakeShot => self.take_shot()?,
            GameState::Rebound => self.rebound()?,
            GameState::FreeThrow => self.free_throw()?,
            GameState::EndOfQuarter => self.end_of_quarter()?,
            GameState::GameOver => return Err(GameError::Finished),
        };
        debug_assert!(self.game.possession.free_throws == 0 || trigger == Trigger::ShootingFoul);

        let next = next_state(state, trigger)?;
        self.check_lineups()?;
        self.game.state = next;
        if next.is_terminal() {
            self.game_over()?;
        }
        Ok(next)
    }

    /// Play until the final buzzer without touching storage.
    pub fn play(&mut self) -> Result<()> {
        if self.game.is_over() {
            return Err(GameError::Finished);
        }
        log::info!(
            "game {} start: {} vs {} (seed {})",
            self.log.game_id(),
            self.game.teams[HOME].name(),
            self.game.teams[AWAY].name(),
            self.seed
        );
        while !self.game.is_over() {
            self.step()?;
        }
        Ok(())
    }

    /// Play the game and write the log once through `store`.
    ///
    /// On a storage failure the in-memory log stays available via
    /// [`GameEngine::log`].
    pub fn run(&mut self, store: &mut dyn GameStore) -> Result<GameSummary> {
        if self.persisted {
            return Err(GameError::Finished);
        }
        if !self.game.is_over() {
            self.play()?;
        }
        let payload = self.log.to_value()?;
        store.write(&game_key(self.log.game_id()), &payload)?;
        self.persisted = true;
        self.summary()
    }

    pub fn summary(&self) -> Result<GameSummary> {
        let winner = self.game.winner.ok_or(GameError::InProgress)?;
        Ok(GameSummary {
            game_id: self.log.game_id().to_string(),
            seed: self.seed,
            home_score: self.game.score(HOME),
            away_score: self.game.score(AWAY),
            winner,
            periods: self.game.quarter,
            events: self.log.events.len(),
            digest: self.log.digest()?,
        })
    }

    /// Log an event for the current game state.
    pub(crate) fn emit(&mut self, detail: EventDetail, player_id: Option<String>) {
        self.log.log_event(&self.game, detail, player_id);
    }

    fn check_lineups(&self) -> Result<()> {
        for (team, t) in self.game.teams.iter().enumerate() {
            let size = t.lineup_size();
            if size != LINEUP_SIZE {
                return Err(GameError::LineupSize { team, size });
            }
        }
        Ok(())
    }
}
