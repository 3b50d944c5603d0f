//! Game runner - drives two move choosers through a game

use serde::Serialize;

use crate::ai::MoveChooser;
use crate::error::GameError;
use crate::game::{GameResult, Position};
use crate::moves::Move;
use crate::player::Color;

/// Limits for a driven game
#[derive(Clone, Debug)]
pub struct RunnerConfig {
    /// Stop after this many plies, leaving the game undecided
    pub max_plies: usize,
}

impl Default for RunnerConfig {
    fn default() -> Self {
        Self { max_plies: 400 }
    }
}

/// A finished (or abandoned) game
#[derive(Clone, Debug, Serialize)]
pub struct GameRecord {
    pub result: GameResult,
    pub moves: Vec<Move>,
    #[serde(skip)]
    pub final_position: Position,
}

impl GameRecord {
    pub fn plies(&self) -> usize {
        self.moves.len()
    }

    /// Winning color, `None` for draws and unfinished games
    pub fn winner(&self) -> Option<Color> {
        match self.result {
            GameResult::WhiteWins => Some(Color::White),
            GameResult::BlackWins => Some(Color::Black),
            GameResult::Undecided | GameResult::Draw => None,
        }
    }
}

/// Runs games between two choosers
#[derive(Clone, Debug, Default)]
pub struct GameRunner {
    config: RunnerConfig,
}

impl GameRunner {
    pub fn new(config: RunnerConfig) -> Self {
        Self { config }
    }

    pub fn config(&self) -> &RunnerConfig {
        &self.config
    }

    /// Play from `initial` until someone loses, the position repeats, or
    /// the ply limit is hit. `observe` sees every position together with the
    /// move about to be played in it.
    pub fn play_observed<F>(
        &self,
        white: &mut dyn MoveChooser,
        black: &mut dyn MoveChooser,
        initial: Position,
        mut observe: F,
    ) -> Result<GameRecord, GameError>
    where
        F: FnMut(&Position, &Move),
    {
        let mut position = initial;
        let mut moves = Vec::new();
        tracing::info!(max_plies = self.config.max_plies, "game started");

        while position.has_no_looser() && !position.is_repeated() && moves.len() < self.config.max_plies {
            let mv = match position.to_move() {
                Color::White => white.choose_move(&position),
                Color::Black => black.choose_move(&position),
            };
            if mv == Move::NoMove {
                tracing::warn!(to_move = %position.to_move(), "chooser gave up");
                break;
            }
            if !position.legal_moves().contains(&mv) {
                return Err(GameError::IllegalMove(mv));
            }

            observe(&position, &mv);
            tracing::debug!(ply = moves.len(), %mv, "move");
            position = position.apply(&mv).with_switched_player();
            moves.push(mv);
        }

        let result = position.winner();
        tracing::info!(%result, plies = moves.len(), "game over");
        Ok(GameRecord {
            result,
            moves,
            final_position: position,
        })
    }

    pub fn play(
        &self,
        white: &mut dyn MoveChooser,
        black: &mut dyn MoveChooser,
        initial: Position,
    ) -> Result<GameRecord, GameError> {
        self.play_observed(white, black, initial, |_, _| {})
    }
}
