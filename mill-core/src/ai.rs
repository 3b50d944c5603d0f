//! Move selection: minimax with alpha-beta pruning, plus simpler choosers

use std::time::{Duration, Instant};

use rand::prelude::*;
use rand_chacha::ChaCha8Rng;
use serde::{Deserialize, Serialize};

use crate::eval::{Evaluator, Heuristics, WIN_VALUE};
use crate::game::Position;
use crate::moves::Move;
use crate::player::{Color, Phase};

// ============================================================================
// CONSTANTS
// ============================================================================

/// Search depth used when none is given
pub const DEFAULT_DEPTH: u32 = 5;

/// The side whose score the search maximises
pub const MAXIMIZER: Color = Color::White;

// ============================================================================
// CONFIGURATION
// ============================================================================

/// Alpha-beta search settings
#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
pub struct SearchConfig {
    /// Plies to look ahead
    pub depth: u32,
    /// Stop expanding siblings once this much time has passed and return the
    /// best move found so far
    pub time_limit: Option<Duration>,
}

impl Default for SearchConfig {
    fn default() -> Self {
        Self {
            depth: DEFAULT_DEPTH,
            time_limit: None,
        }
    }
}

impl SearchConfig {
    pub fn with_depth(depth: u32) -> Self {
        Self {
            depth,
            ..Default::default()
        }
    }

    pub fn with_time_limit(mut self, limit: Duration) -> Self {
        self.time_limit = Some(limit);
        self
    }
}

/// What a search found
#[derive(Clone, Copy, Debug, PartialEq)]
pub struct SearchOutcome {
    /// `NoMove` at depth 0 or when the side to move has nothing to play
    pub best_move: Move,
    /// From White's point of view
    pub score: f32,
    /// Positions visited
    pub nodes: u64,
}

// ============================================================================
// ALPHA-BETA SEARCH
// ============================================================================

struct Search<'a, E: ?Sized> {
    evaluator: &'a E,
    deadline: Option<Instant>,
    nodes: u64,
}

impl<E: Evaluator + ?Sized> Search<'_, E> {
    fn out_of_time(&self) -> bool {
        self.deadline.is_some_and(|d| Instant::now() >= d)
    }

    /// Evaluation turned towards White
    fn leaf_score(&self, position: &Position) -> f32 {
        let score = self.evaluator.evaluate(position);
        if position.to_move() == MAXIMIZER {
            score
        } else {
            -score
        }
    }

    /// Score for a side to move that has lost. Losing later is less bad.
    fn loss_score(position: &Position, depth: u32) -> f32 {
        let magnitude = WIN_VALUE + depth as f32;
        if position.to_move() == MAXIMIZER {
            -magnitude
        } else {
            magnitude
        }
    }

    fn alpha_beta(&mut self, position: &Position, depth: u32, mut alpha: f32, mut beta: f32, root: bool) -> (Move, f32) {
        self.nodes += 1;

        if depth == 0 {
            return (Move::NoMove, self.leaf_score(position));
        }
        if !root && position.is_repeated() {
            return (Move::NoMove, 0.0);
        }

        let moves = if position.active_player().phase() == Phase::Loose {
            Vec::new()
        } else {
            position.legal_moves()
        };
        if moves.is_empty() {
            return (Move::NoMove, Self::loss_score(position, depth));
        }

        let maximizing = position.to_move() == MAXIMIZER;
        let mut best_move = Move::NoMove;
        let mut best = if maximizing { f32::NEG_INFINITY } else { f32::INFINITY };

        for mv in moves {
            if best_move != Move::NoMove && self.out_of_time() {
                break;
            }

            let child = position.apply(&mv).with_switched_player();
            let (_, score) = self.alpha_beta(&child, depth - 1, alpha, beta, false);

            if root {
                tracing::debug!(%mv, score, depth, "root move");
            }

            if maximizing {
                if score > best {
                    best = score;
                    best_move = mv;
                }
                alpha = alpha.max(score);
            } else {
                if score < best {
                    best = score;
                    best_move = mv;
                }
                beta = beta.min(score);
            }

            if beta <= alpha {
                tracing::trace!(depth, alpha, beta, "cutoff");
                break;
            }
        }

        (best_move, best)
    }
}

/// Full-window alpha-beta search of `position`, scored for White
pub fn search<E: Evaluator + ?Sized>(position: &Position, config: &SearchConfig, evaluator: &E) -> SearchOutcome {
    let started = Instant::now();
    let mut search = Search {
        evaluator,
        deadline: config.time_limit.map(|limit| started + limit),
        nodes: 0,
    };
    let (best_move, score) = search.alpha_beta(
        position,
        config.depth,
        f32::NEG_INFINITY,
        f32::INFINITY,
        true,
    );

    tracing::debug!(
        %best_move,
        score,
        nodes = search.nodes,
        elapsed_ms = started.elapsed().as_millis() as u64,
        "search finished"
    );

    SearchOutcome {
        best_move,
        score,
        nodes: search.nodes,
    }
}

/// The searched move and its score; `NoMove` at depth 0.
///
/// The score is from White's point of view. At depth 0 it is the evaluation
/// itself with White to move and its negation with Black to move.
pub fn alpha_beta<E: Evaluator + ?Sized>(position: &Position, depth: u32, evaluator: &E) -> (Move, f32) {
    let outcome = search(position, &SearchConfig::with_depth(depth), evaluator);
    (outcome.best_move, outcome.score)
}

/// Best move at `depth`. Falls back to the first legal move when the search
/// names none, so this is `NoMove` only if there is nothing to play.
pub fn choose_move<E: Evaluator + ?Sized>(position: &Position, depth: u32, evaluator: &E) -> Move {
    match alpha_beta(position, depth, evaluator).0 {
        Move::NoMove => position.legal_moves().first().copied().unwrap_or(Move::NoMove),
        mv => mv,
    }
}

// ============================================================================
// MOVE CHOOSERS
// ============================================================================

/// Anything that can pick a move for the side to move
pub trait MoveChooser {
    fn choose_move(&mut self, position: &Position) -> Move;
}

/// Alpha-Beta AI player
#[derive(Clone, Debug, Default)]
pub struct AlphaBetaAI {
    pub config: SearchConfig,
    pub heuristics: Heuristics,
}

impl AlphaBetaAI {
    pub fn new(depth: u32, heuristics: Heuristics) -> Self {
        Self {
            config: SearchConfig::with_depth(depth),
            heuristics,
        }
    }

    pub fn with_config(config: SearchConfig, heuristics: Heuristics) -> Self {
        Self { config, heuristics }
    }

    pub fn search(&self, position: &Position) -> SearchOutcome {
        search(position, &self.config, &self.heuristics)
    }
}

impl MoveChooser for AlphaBetaAI {
    fn choose_move(&mut self, position: &Position) -> Move {
        match self.search(position).best_move {
            Move::NoMove => position.legal_moves().first().copied().unwrap_or(Move::NoMove),
            mv => mv,
        }
    }
}

/// One-ply lookahead: the move whose result scores best for the mover
#[derive(Clone, Debug, Default)]
pub struct GreedyAI {
    pub heuristics: Heuristics,
}

impl GreedyAI {
    pub fn new(heuristics: Heuristics) -> Self {
        Self { heuristics }
    }
}

impl MoveChooser for GreedyAI {
    fn choose_move(&mut self, position: &Position) -> Move {
        let mut best_move = Move::NoMove;
        let mut best_score = f32::NEG_INFINITY;
        for mv in position.legal_moves() {
            // Still the mover's turn after apply, so this is their score
            let score = self.heuristics.evaluate(&position.apply(&mv));
            if score > best_score {
                best_score = score;
                best_move = mv;
            }
        }
        best_move
    }
}

/// Uniformly random legal moves from a seeded generator
pub struct RandomAI {
    rng: ChaCha8Rng,
}

impl RandomAI {
    pub fn new(seed: u64) -> Self {
        Self {
            rng: ChaCha8Rng::seed_from_u64(seed),
        }
    }
}

impl MoveChooser for RandomAI {
    fn choose_move(&mut self, position: &Position) -> Move {
        position
            .legal_moves()
            .choose(&mut self.rng)
            .copied()
            .unwrap_or(Move::NoMove)
    }
}

// ============================================================================
// TESTS
// ============================================================================
