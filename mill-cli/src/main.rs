//! Mill CLI - Command-line interface
//!
//! Commands:
//! - play: Computer against computer
//! - human: Play against the computer

mod human_cmd;
mod opponents;
mod play_cmd;

use anyhow::Result;
use clap::{Parser, Subcommand};
use tracing_subscriber::EnvFilter;

#[derive(Parser)]
#[command(name = "mill")]
#[command(about = "Nine Men's Morris engine")]
struct Cli {
    /// Random seed for reproducibility
    #[arg(long, global = true)]
    seed: Option<u64>,

    #[command(subcommand)]
    command: Commands,
}

#[derive(Subcommand)]
enum Commands {
    /// Let two computer players play a game
    Play(play_cmd::PlayArgs),
    /// Play against the computer
    Human(human_cmd::HumanArgs),
}

fn main() -> Result<()> {
    tracing_subscriber::fmt()
        .with_env_filter(EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("info")))
        .with_writer(std::io::stderr)
        .init();

    let cli = Cli::parse();

    match cli.command {
        Commands::Play(args) => play_cmd::run(args, cli.seed),
        Commands::Human(args) => human_cmd::run(args, cli.seed),
    }
}
