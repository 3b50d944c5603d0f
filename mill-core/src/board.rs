//! Board topology: the 24 points, their connections and the 16 mill lines
//!
//! ```text
//!   0--------1--------2
//!   |        |        |
//!   |  3-----4-----5  |
//!   |  |     |     |  |
//!   |  |  6--7--8  |  |
//!   |  |  |     |  |  |
//!   9-10-11    12-13-14
//!   |  |  |     |  |  |
//!   |  | 15-16-17  |  |
//!   |  |     |     |  |
//!   | 18----19----20  |
//!   |        |        |
//!  21-------22-------23
//! ```

use std::fmt;

use serde::{Deserialize, Serialize};

use crate::error::GameError;

/// Number of points on the board
pub const CELL_COUNT: usize = 24;

/// A validated board point in `0..24`
#[derive(Clone, Copy, Debug, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
#[serde(try_from = "u8", into = "u8")]
pub struct Cell(u8);

impl Cell {
    /// Every cell in index order
    pub const ALL: [Cell; CELL_COUNT] = {
        let mut cells = [Cell(0); CELL_COUNT];
        let mut i = 0;
        while i < CELL_COUNT {
            cells[i] = Cell(i as u8);
            i += 1;
        }
        cells
    };

    pub fn new(index: u8) -> Result<Self, GameError> {
        if (index as usize) < CELL_COUNT {
            Ok(Cell(index))
        } else {
            Err(GameError::InvalidCell(index))
        }
    }

    pub const fn index(self) -> usize {
        self.0 as usize
    }

    /// Cells joined to this one by a board line
    pub fn neighbors(self) -> &'static [Cell] {
        NEIGHBORS[self.index()]
    }

    /// The other two cells of each of the two mill lines through this cell
    pub fn mill_partners(self) -> &'static [(Cell, Cell); 2] {
        &MILL_PARTNERS[self.index()]
    }

    pub fn is_adjacent(self, other: Cell) -> bool {
        self.neighbors().contains(&other)
    }
}

impl TryFrom<u8> for Cell {
    type Error = GameError;

    fn try_from(index: u8) -> Result<Self, Self::Error> {
        Cell::new(index)
    }
}

impl From<Cell> for u8 {
    fn from(cell: Cell) -> u8 {
        cell.0
    }
}

impl fmt::Display for Cell {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.0)
    }
}

/// The 16 three-in-a-row lines
pub const MILLS: [[Cell; 3]; 16] = [
    // Horizontal
    [Cell(0), Cell(1), Cell(2)],
    [Cell(3), Cell(4), Cell(5)],
    [Cell(6), Cell(7), Cell(8)],
    [Cell(9), Cell(10), Cell(11)],
    [Cell(12), Cell(13), Cell(14)],
    [Cell(15), Cell(16), Cell(17)],
    [Cell(18), Cell(19), Cell(20)],
    [Cell(21), Cell(22), Cell(23)],
    // Vertical
    [Cell(0), Cell(9), Cell(21)],
    [Cell(3), Cell(10), Cell(18)],
    [Cell(6), Cell(11), Cell(15)],
    [Cell(1), Cell(4), Cell(7)],
    [Cell(16), Cell(19), Cell(22)],
    [Cell(8), Cell(12), Cell(17)],
    [Cell(5), Cell(13), Cell(20)],
    [Cell(2), Cell(14), Cell(23)],
];

static NEIGHBORS: [&[Cell]; CELL_COUNT] = [
    &[Cell(1), Cell(9)],
    &[Cell(0), Cell(2), Cell(4)],
    &[Cell(1), Cell(14)],
    &[Cell(4), Cell(10)],
    &[Cell(1), Cell(3), Cell(5), Cell(7)],
    &[Cell(4), Cell(13)],
    &[Cell(7), Cell(11)],
    &[Cell(4), Cell(6), Cell(8)],
    &[Cell(7), Cell(12)],
    &[Cell(0), Cell(10), Cell(21)],
    &[Cell(3), Cell(9), Cell(11), Cell(18)],
    &[Cell(6), Cell(10), Cell(15)],
    &[Cell(8), Cell(13), Cell(17)],
    &[Cell(5), Cell(12), Cell(14), Cell(20)],
    &[Cell(2), Cell(13), Cell(23)],
    &[Cell(11), Cell(16)],
    &[Cell(15), Cell(17), Cell(19)],
    &[Cell(12), Cell(16)],
    &[Cell(10), Cell(19)],
    &[Cell(16), Cell(18), Cell(20), Cell(22)],
    &[Cell(13), Cell(19)],
    &[Cell(9), Cell(22)],
    &[Cell(19), Cell(21), Cell(23)],
    &[Cell(14), Cell(22)],
];

static MILL_PARTNERS: [[(Cell, Cell); 2]; CELL_COUNT] = build_mill_partners();

/// Derive, per cell, the partner pairs of both mill lines it belongs to.
/// Fails const evaluation if any cell is on more than two lines.
const fn build_mill_partners() -> [[(Cell, Cell); 2]; CELL_COUNT] {
    let mut table = [[(Cell(0), Cell(0)); 2]; CELL_COUNT];
    let mut found = [0usize; CELL_COUNT];
    let mut m = 0;
    while m < MILLS.len() {
        let line = MILLS[m];
        let mut k = 0;
        while k < 3 {
            let cell = line[k].index();
            let pair = match k {
                0 => (line[1], line[2]),
                1 => (line[0], line[2]),
                _ => (line[0], line[1]),
            };
            table[cell][found[cell]] = pair;
            found[cell] += 1;
            k += 1;
        }
        m += 1;
    }
    table
}
