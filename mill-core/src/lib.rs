//! Mill Core - Nine Men's Morris rules engine and AI
//!
//! This crate provides the core game logic:
//! - Board topology (24 points, connections, mill lines)
//! - Players, phases and move variants
//! - Immutable positions with move generation and capture rules
//! - Position evaluation with pluggable evaluators
//! - Minimax alpha-beta search and simpler move choosers

pub mod board;
pub mod player;
pub mod moves;
pub mod error;
pub mod game;
pub mod eval;
pub mod ai;
pub mod runner;

// Re-exports for convenient access
pub use board::{Cell, CELL_COUNT, MILLS};
pub use player::{Color, Field, Phase, Player, STONES_PER_PLAYER};
pub use moves::{Move, Placement, Transfer};
pub use error::GameError;
pub use game::{GameResult, Position};
pub use eval::{evaluate, Evaluator, Heuristics, WIN_VALUE};
pub use ai::{
    alpha_beta, choose_move, search, AlphaBetaAI, GreedyAI, MoveChooser, RandomAI, SearchConfig,
    SearchOutcome, DEFAULT_DEPTH,
};
pub use runner::{GameRecord, GameRunner, RunnerConfig};

/// A fresh game: empty board, White to move
pub fn new_game() -> Position {
    Position::new()
}
