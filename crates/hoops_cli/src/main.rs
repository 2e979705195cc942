//! hoops CLI
//!
//! simulate: one game, log written to an output directory
//! inspect:  box score and digest of a saved log
//! batch:    many seeds in parallel, win split

use anyhow::Result;
use clap::{Parser, Subcommand};
use std::path::{Path, PathBuf};

use hoops_cli::{inspect_log, load_config, load_roster};
use hoops_core::engine::game_sim::REGULATION_PERIODS;
use hoops_core::engine::BoxScore;
use hoops_core::replay::game_key;
use hoops_core::{simulate_batch, BatchReport, FileStore, GameEngine, GamePlan, SimConfig};

#[derive(Parser)]
#[command(name = "hoops")]
#[command(about = "Possession-based basketball game simulator", long_about = None)]
struct Cli {
    #[command(subcommand)]
    command: Commands,
}

#[derive(Subcommand)]
enum Commands {
    /// Simulate one game and write its event log
    Simulate {
        /// Home roster (.json or .csv)
        #[arg(long)]
        home: PathBuf,

        /// Away roster (.json or .csv)
        #[arg(long)]
        away: PathBuf,

        /// Random seed (random when omitted)
        #[arg(long)]
        seed: Option<u64>,

        /// Simulation config (.yaml or .json)
        #[arg(long)]
        config: Option<PathBuf>,

        /// Directory receiving games/game_<id>.json
        #[arg(long, default_value = "output")]
        out_dir: PathBuf,

        /// Keep only the newest N game files
        #[arg(long)]
        keep: Option<usize>,
    },

    /// Print the box score and digest of a saved log
    Inspect {
        /// Event log JSON file
        log: PathBuf,
    },

    /// Simulate many seeds in parallel and print the win split
    Batch {
        #[arg(long)]
        home: PathBuf,

        #[arg(long)]
        away: PathBuf,

        /// Number of games
        #[arg(long, default_value_t = 100)]
        games: u64,

        /// First seed; game i uses seed + i
        #[arg(long, default_value_t = 0)]
        seed: u64,

        #[arg(long)]
        config: Option<PathBuf>,
    },
}

fn main() -> Result<()> {
    tracing_subscriber::fmt::init();
    let cli = Cli::parse();

    match cli.command {
        Commands::Simulate { home, away, seed, config, out_dir, keep } => {
            let config = config_or_default(config.as_deref())?;
            let seed = seed.unwrap_or_else(rand::random);
            let plan = GamePlan {
                home_team: load_roster(&home)?,
                away_team: load_roster(&away)?,
                seed,
                config,
                game_id: None,
            };

            let mut store = FileStore::new(&out_dir);
            if let Some(keep) = keep {
                store = store.with_retention(keep);
            }

            let mut engine = GameEngine::new(plan)?;
            let summary = engine.run(&mut store)?;
            let teams = &engine.game().teams;
            println!("{} {} - {} {}", teams[0].name(), summary.home_score, summary.away_score, teams[1].name());
            if summary.periods > REGULATION_PERIODS {
                println!("   Overtime:  {} extra period(s)", summary.periods - REGULATION_PERIODS);
            }
            println!("   Seed:      {}", summary.seed);
            println!("   Events:    {}", summary.events);
            println!("   Digest:    {}", summary.digest);
            println!("   Log:       {}", store.path_for(&game_key(&summary.game_id))?.display());
        }

        Commands::Inspect { log } => {
            let report = inspect_log(&log)?;
            println!("Game {} (seed {})", report.game_id, report.seed);
            println!("   Events:      {}", report.events);
            println!("   Checkpoints: {}", report.checkpoints);
            println!("   Digest:      {}", report.digest);
            match &report.box_score {
                Some(box_score) => print_box_score(box_score),
                None => println!("\n(empty log)"),
            }
        }

        Commands::Batch { home, away, games, seed, config } => {
            let config = config_or_default(config.as_deref())?;
            let home = load_roster(&home)?;
            let away = load_roster(&away)?;
            let seeds: Vec<u64> = (0..games).map(|i| seed.wrapping_add(i)).collect();

            tracing::info!("simulating {} games", seeds.len());
            let results = simulate_batch(&home, &away, &seeds, &config);
            for (seed, result) in seeds.iter().zip(&results) {
                if let Err(e) = result {
                    tracing::warn!("seed {seed} failed: {e}");
                }
            }

            let report = BatchReport::from_results(&results);
            println!("{} vs {} over {} games", home.team_name, away.team_name, report.games);
            println!(
                "   {:<24} {:>4} wins ({:.1}%)  avg {:.1}",
                home.team_name,
                report.home_wins,
                report.home_win_pct() * 100.0,
                report.avg_home_score
            );
            println!(
                "   {:<24} {:>4} wins ({:.1}%)  avg {:.1}",
                away.team_name,
                report.away_wins,
                (1.0 - report.home_win_pct()) * 100.0,
                report.avg_away_score
            );
            println!("   Overtime games: {}", report.overtime_games);
            if report.failures > 0 {
                anyhow::bail!("{} of {} games failed", report.failures, seeds.len());
            }
        }
    }

    Ok(())
}

fn config_or_default(path: Option<&Path>) -> Result<SimConfig> {
    match path {
        Some(path) => load_config(path),
        None => Ok(SimConfig::default()),
    }
}

fn print_box_score(box_score: &BoxScore) {
    for team in &box_score.teams {
        let t = &team.totals;
        println!("\n{}  {} pts", team.team_name, t.pts);
        println!("   {:<24} {:>3} {:>7} {:>7} {:>7} {:>3} {:>3} {:>3} {:>3}", "PLAYER", "MIN", "FG", "3P", "FT", "REB", "AST", "STL", "PTS");
        for line in &team.players {
            let s = &line.stats;
            let marker = if line.starter { "*" } else { " " };
            println!(
                "  {}{:<24} {:>3} {:>3}-{:<3} {:>3}-{:<3} {:>3}-{:<3} {:>3} {:>3} {:>3} {:>3}",
                marker,
                line.player_name,
                s.mp,
                s.fg,
                s.fga,
                s.fg_threepoint,
                s.fga_threepoint,
                s.ft,
                s.fta,
                s.orb + s.drb,
                s.ast,
                s.stl,
                s.pts
            );
        }
        println!(
            "   FG {:.3}  3P {:.3}  FT {:.3}  TOV {}",
            t.fg_pct, t.tp_pct, t.ft_pct, t.tov
        );
    }
}
