//! Colors, board contents, phases and per-player stone accounting

use std::fmt;

use serde::{Deserialize, Serialize};

/// Stones each player brings into the game
pub const STONES_PER_PLAYER: u8 = 9;

/// Player color
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum Color {
    White,
    Black,
}

impl Color {
    pub fn opponent(self) -> Self {
        match self {
            Color::White => Color::Black,
            Color::Black => Color::White,
        }
    }
}

impl fmt::Display for Color {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Color::White => write!(f, "White"),
            Color::Black => write!(f, "Black"),
        }
    }
}

/// Content of a board point
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum Field {
    #[default]
    Empty,
    White,
    Black,
}

impl Field {
    pub fn color(self) -> Option<Color> {
        match self {
            Field::Empty => None,
            Field::White => Some(Color::White),
            Field::Black => Some(Color::Black),
        }
    }

    pub fn is_empty(self) -> bool {
        self == Field::Empty
    }

    /// Two-bit code used when packing a board
    pub(crate) fn bits(self) -> u64 {
        match self {
            Field::Empty => 0,
            Field::White => 1,
            Field::Black => 2,
        }
    }
}

impl From<Color> for Field {
    fn from(color: Color) -> Self {
        match color {
            Color::White => Field::White,
            Color::Black => Field::Black,
        }
    }
}

/// Which kind of move a player may make
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum Phase {
    /// Still placing the initial stones
    Setting,
    /// Slides along board lines
    Moving,
    /// Down to three stones, may fly anywhere
    Jumping,
    /// Lost
    Loose,
}

impl fmt::Display for Phase {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let name = match self {
            Phase::Setting => "SETTING",
            Phase::Moving => "MOVING",
            Phase::Jumping => "JUMPING",
            Phase::Loose => "LOOSE",
        };
        f.write_str(name)
    }
}

/// Stone accounting for one side. Immutable, every change returns a copy.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct Player {
    color: Color,
    stones_on_board: u8,
    stones_placed: u8,
    phase: Phase,
}

impl Player {
    /// A player at the start of the game
    pub fn new(color: Color) -> Self {
        Self {
            color,
            stones_on_board: 0,
            stones_placed: 0,
            phase: Phase::Setting,
        }
    }

    /// A player with the given counts, phase derived from them.
    /// `stones_placed` is clamped to the stone supply.
    pub fn with_counts(color: Color, stones_on_board: u8, stones_placed: u8) -> Self {
        let stones_placed = stones_placed.min(STONES_PER_PLAYER);
        let in_play = stones_on_board + (STONES_PER_PLAYER - stones_placed);
        let phase = if in_play < 3 {
            Phase::Loose
        } else if stones_placed < STONES_PER_PLAYER {
            Phase::Setting
        } else {
            phase_after_setting(stones_on_board)
        };
        Self {
            color,
            stones_on_board,
            stones_placed,
            phase,
        }
    }

    pub fn color(&self) -> Color {
        self.color
    }

    pub fn stones_on_board(&self) -> u8 {
        self.stones_on_board
    }

    pub fn stones_placed(&self) -> u8 {
        self.stones_placed
    }

    /// Stones not yet placed
    pub fn stones_in_hand(&self) -> u8 {
        STONES_PER_PLAYER - self.stones_placed
    }

    /// Stones on the board plus those still to place
    pub fn stones_in_play(&self) -> u8 {
        self.stones_on_board + self.stones_in_hand()
    }

    pub fn phase(&self) -> Phase {
        self.phase
    }

    pub fn can_place(&self) -> bool {
        self.phase == Phase::Setting && self.stones_placed < STONES_PER_PLAYER
    }

    /// Account for one placed stone. Placing the last stone leaves setting.
    pub(crate) fn place_stone(self) -> Self {
        debug_assert!(self.can_place());
        let stones_placed = self.stones_placed + 1;
        let stones_on_board = self.stones_on_board + 1;
        let phase = if stones_placed == STONES_PER_PLAYER {
            phase_after_setting(stones_on_board)
        } else {
            Phase::Setting
        };
        Self {
            stones_on_board,
            stones_placed,
            phase,
            ..self
        }
    }

    /// Account for one captured stone.
    ///
    /// Down to three stones in play means jumping, fewer means the game is
    /// lost. A player still placing keeps placing.
    pub(crate) fn lose_stone(self) -> Self {
        debug_assert!(self.stones_on_board > 0);
        let stones_on_board = self.stones_on_board.saturating_sub(1);
        let in_play = stones_on_board + self.stones_in_hand();
        let phase = match (self.phase, in_play) {
            (_, n) if n < 3 => Phase::Loose,
            (Phase::Setting, _) => Phase::Setting,
            (_, 3) => Phase::Jumping,
            (phase, _) => phase,
        };
        Self {
            stones_on_board,
            phase,
            ..self
        }
    }
}

fn phase_after_setting(stones_on_board: u8) -> Phase {
    match stones_on_board {
        n if n > 3 => Phase::Moving,
        3 => Phase::Jumping,
        _ => Phase::Loose,
    }
}
