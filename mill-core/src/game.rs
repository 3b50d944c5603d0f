//! Positions and the rules engine

use std::fmt;
use std::rc::Rc;

use rustc_hash::FxHashMap;
use serde::{Deserialize, Serialize};

use crate::board::{Cell, CELL_COUNT, MILLS};
use crate::error::GameError;
use crate::moves::Move;
use crate::player::{Color, Field, Phase, Player, STONES_PER_PLAYER};

// ============================================================================
// CORE TYPES
// ============================================================================

/// Outcome of a position
#[derive(Clone, Copy, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub enum GameResult {
    Undecided,
    WhiteWins,
    BlackWins,
    Draw,
}

impl fmt::Display for GameResult {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let text = match self {
            GameResult::Undecided => "No winner yet",
            GameResult::WhiteWins => "White is the winner",
            GameResult::BlackWins => "Black is the winner",
            GameResult::Draw => "It's a draw",
        };
        f.write_str(text)
    }
}

/// Everything that makes two positions "the same" for repetition purposes
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash)]
struct PositionKey {
    /// Two bits per cell
    cells: u64,
    white: Player,
    black: Player,
    to_move: Color,
}

// ============================================================================
// POSITION
// ============================================================================

/// An immutable game position. Every operation returns a new value.
///
/// Equality compares board, players and side to move; the repetition history
/// is not part of it.
#[derive(Clone, Debug)]
pub struct Position {
    fields: [Field; CELL_COUNT],
    white: Player,
    black: Player,
    to_move: Color,

    /// Occurrence count of every earlier position since the last placement
    /// or capture. Shared between positions until one of them records a move.
    history: Rc<FxHashMap<PositionKey, u8>>,
}

impl Default for Position {
    fn default() -> Self {
        Self::new()
    }
}

impl PartialEq for Position {
    fn eq(&self, other: &Self) -> bool {
        self.key() == other.key()
    }
}

impl Eq for Position {}

impl Position {
    // ========================================================================
    // CONSTRUCTORS
    // ========================================================================

    /// Empty board, White to move, both sides with nine stones to place
    pub fn new() -> Self {
        Self {
            fields: [Field::Empty; CELL_COUNT],
            white: Player::new(Color::White),
            black: Player::new(Color::Black),
            to_move: Color::White,
            history: Rc::default(),
        }
    }

    /// Arbitrary position with an empty history. Stone counts follow the
    /// given cells, phases follow the counts (see [`Player::with_counts`]).
    /// A side cannot have more stones on the board than it has placed.
    pub fn from_cells(
        white: &[Cell],
        black: &[Cell],
        white_to_place: u8,
        black_to_place: u8,
        to_move: Color,
    ) -> Result<Self, GameError> {
        let mut fields = [Field::Empty; CELL_COUNT];
        for (&cell, color) in white
            .iter()
            .map(|c| (c, Color::White))
            .chain(black.iter().map(|c| (c, Color::Black)))
        {
            if !fields[cell.index()].is_empty() {
                return Err(GameError::CellOccupied(cell));
            }
            fields[cell.index()] = color.into();
        }

        let player = |color: Color, cells: &[Cell], to_place: u8| {
            let placed = STONES_PER_PLAYER - to_place.min(STONES_PER_PLAYER);
            if cells.len() > placed as usize {
                return Err(GameError::TooManyStones {
                    color,
                    on_board: cells.len(),
                    placed,
                });
            }
            Ok(Player::with_counts(color, cells.len() as u8, placed))
        };
        Ok(Self {
            fields,
            white: player(Color::White, white, white_to_place)?,
            black: player(Color::Black, black, black_to_place)?,
            to_move,
            history: Rc::default(),
        })
    }

    // ========================================================================
    // ACCESSORS
    // ========================================================================

    pub fn to_move(&self) -> Color {
        self.to_move
    }

    pub fn field(&self, cell: Cell) -> Field {
        self.fields[cell.index()]
    }

    pub fn player(&self, color: Color) -> &Player {
        match color {
            Color::White => &self.white,
            Color::Black => &self.black,
        }
    }

    pub fn active_player(&self) -> &Player {
        self.player(self.to_move)
    }

    pub fn stones_on_board(&self, color: Color) -> u8 {
        self.player(color).stones_on_board()
    }

    /// Cells holding a stone of `color`, in index order
    pub fn cells_of(&self, color: Color) -> impl Iterator<Item = Cell> + '_ {
        let field = Field::from(color);
        Cell::ALL.into_iter().filter(move |&c| self.field(c) == field)
    }

    pub fn empty_cells(&self) -> impl Iterator<Item = Cell> + '_ {
        Cell::ALL.into_iter().filter(move |&c| self.field(c).is_empty())
    }

    pub fn empty_neighbors(&self, cell: Cell) -> impl Iterator<Item = Cell> + '_ {
        cell.neighbors().iter().copied().filter(move |&c| self.field(c).is_empty())
    }

    /// Same position with the other side to move
    pub fn with_switched_player(&self) -> Self {
        Self {
            to_move: self.to_move.opponent(),
            ..self.clone()
        }
    }

    fn player_mut(&mut self, color: Color) -> &mut Player {
        match color {
            Color::White => &mut self.white,
            Color::Black => &mut self.black,
        }
    }

    fn key(&self) -> PositionKey {
        let cells = self
            .fields
            .iter()
            .enumerate()
            .fold(0u64, |acc, (i, f)| acc | (f.bits() << (2 * i)));
        PositionKey {
            cells,
            white: self.white,
            black: self.black,
            to_move: self.to_move,
        }
    }

    // ========================================================================
    // MILLS
    // ========================================================================

    fn holds(&self, cell: Cell, color: Color) -> bool {
        self.field(cell) == Field::from(color)
    }

    /// Would a `color` stone on `cell` complete a mill?
    pub fn closes_mill(&self, cell: Cell, color: Color) -> bool {
        cell.mill_partners()
            .iter()
            .any(|&(a, b)| self.holds(a, color) && self.holds(b, color))
    }

    /// Like [`closes_mill`](Self::closes_mill) for a stone leaving `from`,
    /// which no longer counts as a partner once it has moved.
    pub fn closes_mill_by_moving(&self, from: Cell, to: Cell, color: Color) -> bool {
        to.mill_partners().iter().any(|&(a, b)| {
            a != from && b != from && self.holds(a, color) && self.holds(b, color)
        })
    }

    /// Empty cells that would close a mill for `color`
    pub fn incomplete_mill_count(&self, color: Color) -> usize {
        self.empty_cells().filter(|&c| self.closes_mill(c, color)).count()
    }

    /// Lines fully held by `color`
    pub fn mill_count(&self, color: Color) -> usize {
        MILLS
            .iter()
            .filter(|line| line.iter().all(|&c| self.holds(c, color)))
            .count()
    }

    /// Stones of `color` the opponent may take. Stones in a mill are only
    /// exposed when every stone of `color` is in one.
    pub fn capturable_pieces(&self, color: Color) -> Vec<Cell> {
        let unprotected: Vec<Cell> = self
            .cells_of(color)
            .filter(|&c| !self.closes_mill(c, color))
            .collect();
        if unprotected.is_empty() {
            self.cells_of(color).collect()
        } else {
            unprotected
        }
    }

    // ========================================================================
    // MOVE GENERATION
    // ========================================================================

    /// Legal moves for the side to move, capturing moves first
    pub fn legal_moves(&self) -> Vec<Move> {
        self.legal_moves_for(self.to_move)
    }

    /// Legal moves `color` would have in this position
    pub fn legal_moves_for(&self, color: Color) -> Vec<Move> {
        let moves = match self.player(color).phase() {
            Phase::Setting => self.place_moves(color),
            Phase::Moving => self.slide_moves(color),
            Phase::Jumping => self.fly_moves(color),
            Phase::Loose => return Vec::new(),
        };
        self.extend_with_captures(moves, color)
    }

    fn place_moves(&self, color: Color) -> Vec<Move> {
        self.empty_cells()
            .map(|to| Move::place_unchecked(color, to))
            .collect()
    }

    fn slide_moves(&self, color: Color) -> Vec<Move> {
        self.cells_of(color)
            .flat_map(|from| {
                self.empty_neighbors(from)
                    .map(move |to| Move::slide_unchecked(color, from, to))
            })
            .collect()
    }

    fn fly_moves(&self, color: Color) -> Vec<Move> {
        let empty: Vec<Cell> = self.empty_cells().collect();
        self.cells_of(color)
            .flat_map(|from| empty.iter().map(move |&to| Move::fly_unchecked(color, from, to)))
            .collect()
    }

    fn move_closes_mill(&self, mv: &Move, color: Color) -> bool {
        match mv {
            Move::Place(p) => self.closes_mill(p.to(), color),
            Move::Slide(t) | Move::Fly(t) => self.closes_mill_by_moving(t.from(), t.to(), color),
            Move::NoMove => false,
        }
    }

    /// Split off mill-closing moves and fan each out over every capturable
    /// opponent stone. With nothing to take the move stays plain.
    fn extend_with_captures(&self, moves: Vec<Move>, color: Color) -> Vec<Move> {
        let (closing, plain): (Vec<Move>, Vec<Move>) = moves
            .into_iter()
            .partition(|mv| self.move_closes_mill(mv, color));
        if closing.is_empty() {
            return plain;
        }

        let targets = self.capturable_pieces(color.opponent());
        if targets.is_empty() {
            return closing.into_iter().chain(plain).collect();
        }

        let mut result = Vec::with_capacity(closing.len() * targets.len() + plain.len());
        for mv in closing {
            result.extend(targets.iter().map(|&cell| mv.capturing_unchecked(cell)));
        }
        result.extend(plain);
        result
    }

    // ========================================================================
    // APPLY MOVE
    // ========================================================================

    /// Play `mv` for the side to move. The turn is not flipped; call
    /// [`with_switched_player`](Self::with_switched_player) once the move is done.
    ///
    /// # Panics
    ///
    /// If the move could not have come from [`legal_moves`](Self::legal_moves)
    /// for its occupancy: wrong color, empty origin, occupied target, a
    /// capture of a non-opponent cell, or `NoMove`. Use
    /// [`try_apply`](Self::try_apply) for unvetted moves.
    pub fn apply(&self, mv: &Move) -> Self {
        match self.try_apply(mv) {
            Ok(next) => next,
            Err(e) => panic!("apply called with an illegal move {}: {}", mv, e),
        }
    }

    /// Checked form of [`apply`](Self::apply)
    pub fn try_apply(&self, mv: &Move) -> Result<Self, GameError> {
        let color = mv.color().ok_or(GameError::NoMove)?;
        if color != self.to_move {
            return Err(GameError::WrongColor {
                color,
                to_move: self.to_move,
            });
        }
        self.check_preconditions(mv, color)?;

        let mut next = self.clone();
        if matches!(mv, Move::Place(_)) || mv.is_capture() {
            // Stone counts changed, no earlier position can come back
            next.history = Rc::default();
        } else {
            let seen = Rc::make_mut(&mut next.history).entry(self.key()).or_insert(0);
            *seen = seen.saturating_add(1);
        }

        match mv {
            Move::Place(p) => {
                let player = next.player_mut(color);
                *player = player.place_stone();
                next.fields[p.to().index()] = color.into();
            }
            Move::Slide(t) | Move::Fly(t) => {
                next.fields[t.from().index()] = Field::Empty;
                next.fields[t.to().index()] = color.into();
            }
            Move::NoMove => return Err(GameError::NoMove),
        }

        if let Some(cell) = mv.captured() {
            next.fields[cell.index()] = Field::Empty;
            let opponent = next.player_mut(color.opponent());
            *opponent = opponent.lose_stone();
        }

        Ok(next)
    }

    fn check_preconditions(&self, mv: &Move, color: Color) -> Result<(), GameError> {
        match mv {
            Move::Place(_) if !self.player(color).can_place() => {
                return Err(GameError::IllegalMove(*mv));
            }
            Move::Slide(t) | Move::Fly(t) => {
                if self.field(t.from()).is_empty() {
                    return Err(GameError::CellEmpty(t.from()));
                }
                if !self.holds(t.from(), color) {
                    return Err(GameError::WrongStone { cell: t.from(), expected: color });
                }
            }
            _ => {}
        }
        if let Some(to) = mv.to() {
            if !self.field(to).is_empty() {
                return Err(GameError::CellOccupied(to));
            }
        }
        if let Some(cell) = mv.captured() {
            if !self.holds(cell, color.opponent()) {
                return Err(GameError::WrongStone { cell, expected: color.opponent() });
            }
        }
        Ok(())
    }

    // ========================================================================
    // TERMINAL STATE
    // ========================================================================

    /// This position already occurred at least twice before
    pub fn is_repeated(&self) -> bool {
        self.history.get(&self.key()).is_some_and(|&n| n >= 2)
    }

    fn has_lost(&self, color: Color) -> bool {
        self.player(color).phase() == Phase::Loose || self.legal_moves_for(color).is_empty()
    }

    pub fn winner(&self) -> GameResult {
        if self.has_lost(Color::White) {
            GameResult::BlackWins
        } else if self.has_lost(Color::Black) {
            GameResult::WhiteWins
        } else if self.is_repeated() {
            GameResult::Draw
        } else {
            GameResult::Undecided
        }
    }

    /// Neither side has lost and the side to move can move
    pub fn has_no_looser(&self) -> bool {
        self.white.phase() != Phase::Loose
            && self.black.phase() != Phase::Loose
            && !self.legal_moves().is_empty()
    }
}

// ============================================================================
// DISPLAY
// ============================================================================

impl fmt::Display for Position {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let c: Vec<char> = self
            .fields
            .iter()
            .map(|field| match field {
                Field::Empty => 'O',
                Field::White => 'W',
                Field::Black => 'B',
            })
            .collect();
        writeln!(f, "{}--------{}--------{}", c[0], c[1], c[2])?;
        writeln!(f, "|        |        |")?;
        writeln!(f, "|  {}-----{}-----{}  |", c[3], c[4], c[5])?;
        writeln!(f, "|  |     |     |  |")?;
        writeln!(f, "|  |  {}--{}--{}  |  |", c[6], c[7], c[8])?;
        writeln!(f, "|  |  |     |  |  |")?;
        writeln!(f, "{}--{}--{}     {}--{}--{}", c[9], c[10], c[11], c[12], c[13], c[14])?;
        writeln!(f, "|  |  |     |  |  |")?;
        writeln!(f, "|  |  {}--{}--{}  |  |", c[15], c[16], c[17])?;
        writeln!(f, "|  |     |     |  |")?;
        writeln!(f, "|  {}-----{}-----{}  |", c[18], c[19], c[20])?;
        writeln!(f, "|        |        |")?;
        writeln!(f, "{}--------{}--------{}", c[21], c[22], c[23])?;
        for player in [&self.white, &self.black] {
            let marker = if player.color() == self.to_move { '*' } else { ' ' };
            writeln!(
                f,
                "{} {}: stones = {} phase = {}",
                marker,
                player.color(),
                player.stones_in_play(),
                player.phase()
            )?;
        }
        Ok(())
    }
}

// ============================================================================
// TESTS
// ============================================================================

#[cfg(test)]
mod tests {
    use super::*;

    fn cell(i: u8) -> Cell {
        Cell::new(i).unwrap()
    }

    fn cells(ids: &[u8]) -> Vec<Cell> {
        ids.iter().map(|&i| cell(i)).collect()
    }

    fn setting(white: &[u8], black: &[u8], to_move: Color) -> Position {
        let to_place = |n: usize| 9 - n as u8;
        Position::from_cells(
            &cells(white),
            &cells(black),
            to_place(white.len()),
            to_place(black.len()),
            to_move,
        )
        .unwrap()
    }

    fn moving(white: &[u8], black: &[u8], to_move: Color) -> Position {
        Position::from_cells(&cells(white), &cells(black), 0, 0, to_move).unwrap()
    }

    fn white_cells(p: &Position) -> Vec<u8> {
        p.cells_of(Color::White).map(|c| c.index() as u8).collect()
    }

    #[test]
    fn test_new_game() {
        let game = Position::new();
        assert_eq!(game.to_move(), Color::White);
        assert_eq!(game.empty_cells().count(), 24);
        assert_eq!(game.active_player().phase(), Phase::Setting);
        assert_eq!(game.player(Color::Black).stones_in_hand(), 9);
        assert_eq!(game.legal_moves().len(), 24);
        assert_eq!(game.winner(), GameResult::Undecided);
        assert!(game.has_no_looser());
    }

    #[test]
    fn test_from_cells_rejects_overlap() {
        let err = Position::from_cells(&cells(&[3]), &cells(&[3]), 0, 0, Color::White);
        assert_eq!(err, Err(GameError::CellOccupied(cell(3))));
    }

    #[test]
    fn test_closes_mill() {
        let game = setting(&[1, 2], &[4, 5], Color::White);
        assert!(game.closes_mill(cell(0), Color::White));
        assert!(!game.closes_mill(cell(3), Color::White));
        assert!(!game.closes_mill(cell(7), Color::White));
        assert!(!game.closes_mill(cell(22), Color::White));
        assert!(game.closes_mill(cell(3), Color::Black));
    }

    #[test]
    fn test_closes_mill_by_moving_ignores_origin() {
        // 2 slides to 14: the 2-14-23 line loses 2 as it moves
        let game = moving(&[0, 1, 2, 23], &[5, 6, 7, 8], Color::White);
        assert!(game.closes_mill(cell(14), Color::White));
        assert!(!game.closes_mill_by_moving(cell(2), cell(14), Color::White));

        // 9 slides to 0 and completes 0-1-2 from outside the line
        let game = moving(&[1, 2, 9, 22], &[5, 6, 7, 8], Color::White);
        assert!(game.closes_mill_by_moving(cell(9), cell(0), Color::White));
    }

    #[test]
    fn test_sliding_out_and_back_into_a_mill() {
        // White mill 0-1-2; 0 slides to 9 (no mill) and back (mill again)
        let game = moving(&[0, 1, 2, 22], &[5, 6, 7, 8], Color::White);
        let out = game.legal_moves();
        let leave = Move::slide(Color::White, cell(0), cell(9), None).unwrap();
        assert!(out.contains(&leave));

        let left = game.apply(&leave).with_switched_player().with_switched_player();
        let back = left.legal_moves();
        assert!(back.iter().any(|m| m.from() == Some(cell(9))
            && m.to() == Some(cell(0))
            && m.is_capture()));
        assert!(!back.iter().any(|m| m.from() == Some(cell(9))
            && m.to() == Some(cell(0))
            && !m.is_capture()));
    }

    #[test]
    fn test_mill_counts() {
        let game = setting(&[0, 1, 2, 9], &[4, 5], Color::White);
        assert_eq!(game.mill_count(Color::White), 1);
        assert_eq!(game.mill_count(Color::Black), 0);
        // 21 closes 0-9-21
        assert_eq!(game.incomplete_mill_count(Color::White), 1);
        // 3 closes 3-4-5
        assert_eq!(game.incomplete_mill_count(Color::Black), 1);
    }

    #[test]
    fn test_capturable_pieces_prefers_unprotected() {
        let game = setting(&[9], &[0, 1, 2, 5], Color::White);
        assert_eq!(game.capturable_pieces(Color::Black), cells(&[5]));
    }

    #[test]
    fn test_capturable_pieces_all_protected() {
        let game = setting(&[9], &[0, 1, 2, 21, 22, 23], Color::White);
        assert_eq!(game.capturable_pieces(Color::Black), cells(&[0, 1, 2, 21, 22, 23]));
    }

    #[test]
    fn test_capture_moves_come_first() {
        let game = setting(&[0, 1], &[4, 5], Color::White);
        let moves = game.legal_moves();
        // 20 empty cells; placing on 2 closes a mill, and 2 black stones are takeable
        assert_eq!(moves.len(), 19 + 2);
        assert_eq!(moves[0], Move::place(Color::White, cell(2), Some(cell(4))).unwrap());
        assert_eq!(moves[1], Move::place(Color::White, cell(2), Some(cell(5))).unwrap());
        assert!(moves[2..].iter().all(|m| !m.is_capture()));
    }

    #[test]
    fn test_closing_mill_with_no_opponent_stones() {
        let game = setting(&[0, 1], &[], Color::White);
        let moves = game.legal_moves();
        assert_eq!(moves.len(), 22);
        assert_eq!(moves[0], Move::place(Color::White, cell(2), None).unwrap());
    }

    #[test]
    fn test_apply_place() {
        let game = Position::new();
        let after = game.apply(&Move::place(Color::White, cell(0), None).unwrap());
        assert_eq!(after.field(cell(0)), Field::White);
        assert_eq!(after.player(Color::White).stones_placed(), 1);
        assert_eq!(after.player(Color::White).phase(), Phase::Setting);
        // Not flipped by apply
        assert_eq!(after.to_move(), Color::White);
        // Input untouched
        assert_eq!(game.field(cell(0)), Field::Empty);
        assert_eq!(game.player(Color::White).stones_placed(), 0);
    }

    #[test]
    fn test_apply_place_with_capture() {
        let game = setting(&[0, 1], &[4], Color::White);
        let mv = Move::place(Color::White, cell(2), Some(cell(4))).unwrap();
        let after = game.apply(&mv);
        assert_eq!(white_cells(&after), vec![0, 1, 2]);
        assert_eq!(after.field(cell(4)), Field::Empty);
        assert_eq!(after.stones_on_board(Color::Black), 0);
        assert_eq!(after.stones_on_board(Color::White), 3);
    }

    #[test]
    fn test_black_captures_white() {
        let game = setting(&[0], &[1, 4], Color::Black);
        let mv = Move::place(Color::Black, cell(7), Some(cell(0))).unwrap();
        let after = game.apply(&mv);
        assert_eq!(after.cells_of(Color::White).count(), 0);
        assert_eq!(after.stones_on_board(Color::White), 0);
        assert_eq!(after.cells_of(Color::Black).count(), 3);
    }

    #[test]
    fn test_apply_slide_and_fly() {
        let game = moving(&[9, 1, 2, 22], &[4, 5, 6, 8], Color::White);
        let slide = Move::slide(Color::White, cell(9), cell(0), Some(cell(4))).unwrap();
        let after = game.apply(&slide);
        assert_eq!(white_cells(&after), vec![0, 1, 2, 22]);
        assert_eq!(after.stones_on_board(Color::Black), 3);
        assert_eq!(after.player(Color::Black).phase(), Phase::Jumping);

        let game = moving(&[22, 1, 3], &[4, 5, 6, 8], Color::White);
        let fly = Move::fly(Color::White, cell(22), cell(0), None).unwrap();
        let after = game.apply(&fly);
        assert_eq!(white_cells(&after), vec![0, 1, 3]);
    }

    #[test]
    fn test_try_apply_rejects_bad_moves() {
        let game = moving(&[10, 1, 2, 22], &[9, 5, 6, 8], Color::White);
        assert_eq!(
            game.try_apply(&Move::slide(Color::White, cell(3), cell(4), None).unwrap()),
            Err(GameError::CellEmpty(cell(3)))
        );
        assert_eq!(
            game.try_apply(&Move::slide(Color::White, cell(10), cell(9), None).unwrap()),
            Err(GameError::CellOccupied(cell(9)))
        );
        assert_eq!(
            game.try_apply(&Move::slide(Color::White, cell(9), cell(0), None).unwrap()),
            Err(GameError::WrongStone { cell: cell(9), expected: Color::White })
        );
        assert!(matches!(
            game.try_apply(&Move::slide(Color::Black, cell(9), cell(0), None).unwrap()),
            Err(GameError::WrongColor { .. })
        ));
        assert!(matches!(
            game.try_apply(&Move::place(Color::White, cell(0), None).unwrap()),
            Err(GameError::IllegalMove(_))
        ));
        assert_eq!(game.try_apply(&Move::NoMove), Err(GameError::NoMove));
    }

    #[test]
    #[should_panic]
    fn test_apply_panics_on_occupied_target() {
        let game = setting(&[0], &[1], Color::White);
        game.apply(&Move::place(Color::White, cell(1), None).unwrap());
    }

    #[test]
    fn test_jumping_moves_are_flies() {
        let game = moving(&[0, 12, 19], &[3, 5, 8, 17], Color::White);
        assert_eq!(game.active_player().phase(), Phase::Jumping);
        let moves = game.legal_moves();
        assert_eq!(moves.len(), 3 * 17);
        assert!(moves.iter().all(|m| matches!(m, Move::Fly(_))));
    }

    #[test]
    fn test_slide_moves_follow_edges() {
        let game = moving(&[0, 4, 13, 22], &[1, 9, 14, 19], Color::White);
        let moves = game.legal_moves();
        for mv in &moves {
            let (from, to) = (mv.from().unwrap(), mv.to().unwrap());
            assert!(from.is_adjacent(to));
            assert!(game.field(to).is_empty());
        }
        // 0 is boxed in by 1 and 9
        assert!(!moves.iter().any(|m| m.from() == Some(cell(0))));
    }

    #[test]
    fn test_legal_moves_is_pure() {
        let game = setting(&[0, 1, 10], &[4, 5, 19], Color::White);
        assert_eq!(game.legal_moves(), game.legal_moves());
    }

    #[test]
    fn test_blocked_player_loses() {
        // Every white stone is walled in
        let game = moving(&[0, 1, 2, 3], &[9, 4, 14, 10, 5], Color::White);
        assert!(game.legal_moves().is_empty());
        assert!(!game.has_no_looser());
        assert_eq!(game.winner(), GameResult::BlackWins);
    }

    #[test]
    fn test_loose_player_loses() {
        let game = moving(&[0, 1], &[4, 5, 6, 7], Color::White);
        assert_eq!(game.player(Color::White).phase(), Phase::Loose);
        assert_eq!(game.winner(), GameResult::BlackWins);
        let game = moving(&[0, 1, 2, 9], &[4, 5], Color::White);
        assert_eq!(game.winner(), GameResult::WhiteWins);
        assert!(!game.has_no_looser());
    }

    #[test]
    fn test_repetition_draw() {
        let w = |from, to| Move::slide(Color::White, cell(from), cell(to), None).unwrap();
        let b = |from, to| Move::slide(Color::Black, cell(from), cell(to), None).unwrap();
        let start = moving(&[0, 4, 13, 22], &[6, 11, 17, 20], Color::White);

        let mut game = start.clone();
        for round in 0..2 {
            assert!(!game.is_repeated(), "repeated too early in round {}", round);
            game = game.apply(&w(0, 1)).with_switched_player();
            game = game.apply(&b(6, 7)).with_switched_player();
            game = game.apply(&w(1, 0)).with_switched_player();
            game = game.apply(&b(7, 6)).with_switched_player();
        }
        assert_eq!(game, start);
        assert!(game.is_repeated());
        assert_eq!(game.winner(), GameResult::Draw);
    }

    #[test]
    fn test_long_repetition_cycle_keeps_applying() {
        let w = |from, to| Move::slide(Color::White, cell(from), cell(to), None).unwrap();
        let b = |from, to| Move::slide(Color::Black, cell(from), cell(to), None).unwrap();
        let start = moving(&[0, 4, 13, 22], &[6, 11, 17, 20], Color::White);

        let mut game = start.clone();
        for _ in 0..300 {
            for mv in [w(0, 1), b(6, 7), w(1, 0), b(7, 6)] {
                assert!(game.legal_moves().contains(&mv));
                game = game.apply(&mv).with_switched_player();
            }
        }
        assert_eq!(game, start);
        assert!(game.is_repeated());
        assert_eq!(game.winner(), GameResult::Draw);
    }

    #[test]
    fn test_history_resets_on_placement_and_capture() {
        let game = moving(&[0, 4, 13, 22], &[6, 11, 17, 20], Color::White);
        let slid = game.apply(&Move::slide(Color::White, cell(0), cell(1), None).unwrap());
        assert_eq!(slid.history.len(), 1);
        // Flipping the turn shares the map instead of copying it
        assert!(Rc::ptr_eq(&slid.history, &slid.with_switched_player().history));

        let captured = moving(&[1, 2, 9, 22], &[5, 6, 7, 8], Color::White)
            .apply(&Move::slide(Color::White, cell(9), cell(0), Some(cell(5))).unwrap());
        assert!(captured.history.is_empty());

        // Black has finished placing and slides, then White places again
        let game = Position::from_cells(&cells(&[0]), &cells(&[5, 6, 7, 8]), 8, 0, Color::Black).unwrap();
        let slid = game
            .apply(&Move::slide(Color::Black, cell(8), cell(12), None).unwrap())
            .with_switched_player();
        assert_eq!(slid.history.len(), 1);
        let placed = slid.apply(&Move::place(Color::White, cell(2), None).unwrap());
        assert!(placed.history.is_empty());
    }

    #[test]
    fn test_from_cells_rejects_unplaced_stones() {
        let err = Position::from_cells(&cells(&[0, 1, 2, 3, 4]), &[], 9, 9, Color::White);
        assert_eq!(
            err,
            Err(GameError::TooManyStones {
                color: Color::White,
                on_board: 5,
                placed: 0,
            })
        );
        let err = Position::from_cells(&cells(&[0]), &cells(&[5, 6, 7]), 8, 7, Color::Black);
        assert!(matches!(err, Err(GameError::TooManyStones { color: Color::Black, .. })));
        // Fewer on the board than placed is fine: the rest were captured
        assert!(Position::from_cells(&cells(&[0]), &cells(&[5]), 5, 8, Color::White).is_ok());
    }

    #[test]
    fn test_display_board() {
        let game = setting(&[0], &[23], Color::White);
        let text = game.to_string();
        assert!(text.starts_with("W--------O--------O"));
        assert!(text.contains("O--------O--------B"));
        assert!(text.contains("* White: stones = 9 phase = SETTING"));
        assert!(text.contains("  Black: stones = 9 phase = SETTING"));
    }
}
