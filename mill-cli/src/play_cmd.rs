//! Play command - computer against computer
//!
//! ## Architecture
//!
//! - Level 1: run() - orchestration
//! - Level 2: play_game(), report_result()
//! - Level 3: formatting

use std::time::Duration;

use anyhow::{Context, Result};
use clap::Args;

use mill_core::{GameRecord, GameRunner, Position, RunnerConfig, SearchConfig, DEFAULT_DEPTH};

use crate::opponents::{self, Engine};

// ============================================================================
// COMMAND ARGUMENTS
// ============================================================================

#[derive(Args)]
pub struct PlayArgs {
    /// White player
    #[arg(long, value_enum, default_value = "alpha-beta")]
    pub white: Engine,

    /// Black player
    #[arg(long, value_enum, default_value = "alpha-beta")]
    pub black: Engine,

    /// Alpha-beta search depth
    #[arg(long, default_value_t = DEFAULT_DEPTH)]
    pub depth: u32,

    /// Per-move time limit for alpha-beta in milliseconds
    #[arg(long)]
    pub time_limit_ms: Option<u64>,

    /// Stop the game after this many plies
    #[arg(long, default_value = "400")]
    pub max_plies: usize,

    /// Don't print the board after each move
    #[arg(long)]
    pub quiet: bool,

    /// Output the game as JSON
    #[arg(long)]
    pub json: bool,
}

// ============================================================================
// LEVEL 1 - ORCHESTRATION
// ============================================================================

/// Run play command
pub fn run(args: PlayArgs, seed: Option<u64>) -> Result<()> {
    let seed = opponents::seed_or_entropy(seed);
    tracing::info!(
        "Starting game: {:?} vs {:?} (depth={}, seed={})",
        args.white,
        args.black,
        args.depth,
        seed
    );

    let record = play_game(&args, seed)?;
    report_result(&record, &args)
}

// ============================================================================
// LEVEL 2 - PHASES
// ============================================================================

fn play_game(args: &PlayArgs, seed: u64) -> Result<GameRecord> {
    let mut config = SearchConfig::with_depth(args.depth);
    if let Some(ms) = args.time_limit_ms {
        config = config.with_time_limit(Duration::from_millis(ms));
    }
    let mut white = opponents::build(args.white, &config, seed);
    let mut black = opponents::build(args.black, &config, seed.wrapping_add(1));

    let runner = GameRunner::new(RunnerConfig {
        max_plies: args.max_plies,
    });
    let show = !args.quiet && !args.json;
    let mut ply = 0;
    runner
        .play_observed(white.as_mut(), black.as_mut(), Position::new(), |position, mv| {
            if show {
                println!("{}", position);
                println!("{}: {}", ply, mv);
            }
            ply += 1;
        })
        .context("computer player produced an illegal move")
}

fn report_result(record: &GameRecord, args: &PlayArgs) -> Result<()> {
    if args.json {
        println!("{}", serde_json::to_string_pretty(record)?);
        return Ok(());
    }
    println!("{}", record.final_position);
    println!("{} after {} plies", record.result, record.plies());
    Ok(())
}
