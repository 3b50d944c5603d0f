//! Move variants and their construction checks

use std::fmt;

use serde::Serialize;

use crate::board::Cell;
use crate::error::GameError;
use crate::player::Color;

/// Placing a stone from hand
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash, Serialize)]
pub struct Placement {
    color: Color,
    to: Cell,
    captured: Option<Cell>,
}

impl Placement {
    pub fn color(&self) -> Color {
        self.color
    }

    pub fn to(&self) -> Cell {
        self.to
    }

    pub fn captured(&self) -> Option<Cell> {
        self.captured
    }
}

/// A stone going from one cell to another, shared by slides and flies
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash, Serialize)]
pub struct Transfer {
    color: Color,
    from: Cell,
    to: Cell,
    captured: Option<Cell>,
}

impl Transfer {
    pub fn color(&self) -> Color {
        self.color
    }

    pub fn from(&self) -> Cell {
        self.from
    }

    pub fn to(&self) -> Cell {
        self.to
    }

    pub fn captured(&self) -> Option<Cell> {
        self.captured
    }
}

/// A move. Only obtainable through the checked constructors, so every
/// value satisfies the cell-distinctness and adjacency rules.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash, Serialize)]
pub enum Move {
    Place(Placement),
    /// Along a board line to a neighboring cell
    Slide(Transfer),
    /// To any cell
    Fly(Transfer),
    /// Nothing to play
    NoMove,
}

impl Move {
    // ========================================================================
    // CONSTRUCTORS
    // ========================================================================

    pub fn place(color: Color, to: Cell, captured: Option<Cell>) -> Result<Self, GameError> {
        if captured == Some(to) {
            return Err(GameError::DuplicateCell(to));
        }
        Ok(Move::Place(Placement { color, to, captured }))
    }

    pub fn slide(color: Color, from: Cell, to: Cell, captured: Option<Cell>) -> Result<Self, GameError> {
        let transfer = Transfer::checked(color, from, to, captured)?;
        if !from.is_adjacent(to) {
            return Err(GameError::NotAdjacent { from, to });
        }
        Ok(Move::Slide(transfer))
    }

    pub fn fly(color: Color, from: Cell, to: Cell, captured: Option<Cell>) -> Result<Self, GameError> {
        Ok(Move::Fly(Transfer::checked(color, from, to, captured)?))
    }

    /// The same move, now also taking the stone on `cell`
    pub fn with_capture(self, cell: Cell) -> Result<Self, GameError> {
        match self {
            Move::Place(p) => Move::place(p.color, p.to, Some(cell)),
            Move::Slide(t) => Move::slide(t.color, t.from, t.to, Some(cell)),
            Move::Fly(t) => Move::fly(t.color, t.from, t.to, Some(cell)),
            Move::NoMove => Err(GameError::NoMove),
        }
    }

    // Generator fast paths. Callers guarantee the construction rules.

    pub(crate) fn place_unchecked(color: Color, to: Cell) -> Self {
        Move::Place(Placement { color, to, captured: None })
    }

    pub(crate) fn slide_unchecked(color: Color, from: Cell, to: Cell) -> Self {
        debug_assert!(from.is_adjacent(to));
        Move::Slide(Transfer { color, from, to, captured: None })
    }

    pub(crate) fn fly_unchecked(color: Color, from: Cell, to: Cell) -> Self {
        debug_assert_ne!(from, to);
        Move::Fly(Transfer { color, from, to, captured: None })
    }

    /// Attach a capture to a generated move. `cell` must hold an opponent
    /// stone, which can be neither the origin nor the (empty) target.
    pub(crate) fn capturing_unchecked(self, cell: Cell) -> Self {
        debug_assert!(self.from() != Some(cell) && self.to() != Some(cell));
        match self {
            Move::Place(p) => Move::Place(Placement { captured: Some(cell), ..p }),
            Move::Slide(t) => Move::Slide(Transfer { captured: Some(cell), ..t }),
            Move::Fly(t) => Move::Fly(Transfer { captured: Some(cell), ..t }),
            Move::NoMove => Move::NoMove,
        }
    }

    // ========================================================================
    // ACCESSORS
    // ========================================================================

    pub fn color(&self) -> Option<Color> {
        match self {
            Move::Place(p) => Some(p.color),
            Move::Slide(t) | Move::Fly(t) => Some(t.color),
            Move::NoMove => None,
        }
    }

    pub fn from(&self) -> Option<Cell> {
        match self {
            Move::Slide(t) | Move::Fly(t) => Some(t.from),
            Move::Place(_) | Move::NoMove => None,
        }
    }

    pub fn to(&self) -> Option<Cell> {
        match self {
            Move::Place(p) => Some(p.to),
            Move::Slide(t) | Move::Fly(t) => Some(t.to),
            Move::NoMove => None,
        }
    }

    pub fn captured(&self) -> Option<Cell> {
        match self {
            Move::Place(p) => p.captured,
            Move::Slide(t) | Move::Fly(t) => t.captured,
            Move::NoMove => None,
        }
    }

    pub fn is_capture(&self) -> bool {
        self.captured().is_some()
    }
}

impl Transfer {
    fn checked(color: Color, from: Cell, to: Cell, captured: Option<Cell>) -> Result<Self, GameError> {
        if from == to {
            return Err(GameError::DuplicateCell(to));
        }
        if let Some(cell) = captured {
            if cell == from || cell == to {
                return Err(GameError::DuplicateCell(cell));
            }
        }
        Ok(Self { color, from, to, captured })
    }
}

impl fmt::Display for Move {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let (kind, color, from, to, captured) = match self {
            Move::Place(p) => ("Place", p.color, None, p.to, p.captured),
            Move::Slide(t) => ("Slide", t.color, Some(t.from), t.to, t.captured),
            Move::Fly(t) => ("Fly", t.color, Some(t.from), t.to, t.captured),
            Move::NoMove => return f.write_str("NoMove"),
        };
        write!(f, "{}({}, ", kind, color)?;
        if let Some(from) = from {
            write!(f, "{} -> ", from)?;
        }
        write!(f, "{}", to)?;
        if let Some(captured) = captured {
            write!(f, " x {}", captured)?;
        }
        f.write_str(")")
    }
}
