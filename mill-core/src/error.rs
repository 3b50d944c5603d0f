//! Error types for move construction and move application

use crate::board::Cell;
use crate::moves::Move;
use crate::player::Color;

/// Errors raised by the rules engine.
///
/// None of these are game outcomes. Each one means the caller handed the
/// engine something that `legal_moves` would never have produced.
#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
pub enum GameError {
    #[error("cell index {0} is outside 0..24")]
    InvalidCell(u8),

    #[error("move references cell {0} more than once")]
    DuplicateCell(Cell),

    #[error("cell {to} is not adjacent to cell {from}")]
    NotAdjacent { from: Cell, to: Cell },

    #[error("cell {0} holds no stone to move")]
    CellEmpty(Cell),

    #[error("cell {0} is already occupied")]
    CellOccupied(Cell),

    #[error("cell {cell} does not hold a {expected} stone")]
    WrongStone { cell: Cell, expected: Color },

    #[error("{color} has {on_board} stones on the board but only placed {placed}")]
    TooManyStones { color: Color, on_board: usize, placed: u8 },

    #[error("it is {to_move}'s turn, not {color}'s")]
    WrongColor { color: Color, to_move: Color },

    #[error("NoMove cannot be applied")]
    NoMove,

    #[error("move {0} is not legal in this position")]
    IllegalMove(Move),
}
