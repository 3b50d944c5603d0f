//! Position evaluation

use serde::{Deserialize, Serialize};

use crate::game::Position;
use crate::player::Color;

/// Win value (effectively infinite)
pub const WIN_VALUE: f32 = 100000.0;

/// Heuristic weights for position evaluation
#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
pub struct Heuristics {
    /// Per stone on the board
    pub stone_weight: f32,
    /// Per empty cell that would close a mill
    pub threat_weight: f32,
    /// Per closed mill
    pub mill_weight: f32,
}

impl Default for Heuristics {
    fn default() -> Self {
        Self {
            stone_weight: 1.0,
            threat_weight: 1.0,
            mill_weight: 0.5,
        }
    }
}

impl Heuristics {
    /// Count stones and nothing else
    pub fn material_only() -> Self {
        Self {
            stone_weight: 1.0,
            threat_weight: 0.0,
            mill_weight: 0.0,
        }
    }

    fn side_score(&self, position: &Position, color: Color) -> f32 {
        self.stone_weight * position.stones_on_board(color) as f32
            + self.threat_weight * position.incomplete_mill_count(color) as f32
            + self.mill_weight * position.mill_count(color) as f32
    }
}

/// Scores a position from the point of view of the side to move
pub trait Evaluator {
    fn evaluate(&self, position: &Position) -> f32;
}

impl Evaluator for Heuristics {
    fn evaluate(&self, position: &Position) -> f32 {
        evaluate(position, self)
    }
}

impl<F> Evaluator for F
where
    F: Fn(&Position) -> f32,
{
    fn evaluate(&self, position: &Position) -> f32 {
        self(position)
    }
}

/// Evaluate position from the side to move's perspective
pub fn evaluate(position: &Position, heuristics: &Heuristics) -> f32 {
    let current = position.to_move();
    heuristics.side_score(position, current) - heuristics.side_score(position, current.opponent())
}
