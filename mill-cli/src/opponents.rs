//! Computer player selection shared by the commands

use clap::ValueEnum;

use mill_core::{AlphaBetaAI, GreedyAI, Heuristics, MoveChooser, RandomAI, SearchConfig};

/// Kind of computer player
#[derive(Clone, Copy, Debug, PartialEq, Eq, ValueEnum)]
pub enum Engine {
    /// Minimax with alpha-beta pruning
    AlphaBeta,
    /// Best position one ply ahead
    Greedy,
    /// Any legal move
    Random,
}

/// Build a chooser of the given kind
pub fn build(engine: Engine, config: &SearchConfig, seed: u64) -> Box<dyn MoveChooser> {
    match engine {
        Engine::AlphaBeta => Box::new(AlphaBetaAI::with_config(config.clone(), Heuristics::default())),
        Engine::Greedy => Box::new(GreedyAI::default()),
        Engine::Random => Box::new(RandomAI::new(seed)),
    }
}

/// The given seed, or a fresh one from entropy
pub fn seed_or_entropy(seed: Option<u64>) -> u64 {
    seed.unwrap_or_else(rand::random)
}
