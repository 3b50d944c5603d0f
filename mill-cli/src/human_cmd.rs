//! Human command - play against the computer on the terminal
//!
//! ## Architecture
//!
//! - Level 1: run() - orchestration
//! - Level 2: HumanPlayer (move entry), report
//! - Level 3: parsing helpers

use std::io::{self, BufRead, Write};

use anyhow::{bail, Context, Result};
use clap::Args;

use mill_core::{Color, GameRunner, Move, MoveChooser, Position, RunnerConfig, SearchConfig, DEFAULT_DEPTH};

use crate::opponents::{self, Engine};

// ============================================================================
// COMMAND ARGUMENTS
// ============================================================================

#[derive(Args)]
pub struct HumanArgs {
    /// Your color: w, white, b or black
    #[arg(long, value_parser = parse_color, default_value = "white")]
    pub color: Color,

    /// Computer player
    #[arg(long, value_enum, default_value = "alpha-beta")]
    pub engine: Engine,

    /// Alpha-beta search depth
    #[arg(long, default_value_t = DEFAULT_DEPTH)]
    pub depth: u32,
}

// ============================================================================
// LEVEL 1 - ORCHESTRATION
// ============================================================================

/// Run human command
pub fn run(args: HumanArgs, seed: Option<u64>) -> Result<()> {
    let config = SearchConfig::with_depth(args.depth);
    let mut computer = opponents::build(args.engine, &config, opponents::seed_or_entropy(seed));
    let stdin = io::stdin();
    let mut human = HumanPlayer::new(stdin.lock(), io::stdout());

    tracing::info!("You play {} against {:?}", args.color, args.engine);

    let (white, black): (&mut dyn MoveChooser, &mut dyn MoveChooser) = match args.color {
        Color::White => (&mut human, computer.as_mut()),
        Color::Black => (computer.as_mut(), &mut human),
    };

    let mut ply = 0;
    let record = GameRunner::new(RunnerConfig::default())
        .play_observed(white, black, Position::new(), |_, mv| {
            println!("{}: {}", ply, mv);
            ply += 1;
        })
        .context("illegal move in game")?;

    println!("{}", record.final_position);
    println!("{}", record.result);
    Ok(())
}

// ============================================================================
// LEVEL 2 - MOVE ENTRY
// ============================================================================

/// Lists the legal moves and reads the index of the chosen one
pub struct HumanPlayer<R, W> {
    input: R,
    output: W,
}

impl<R: BufRead, W: Write> HumanPlayer<R, W> {
    pub fn new(input: R, output: W) -> Self {
        Self { input, output }
    }

    fn ask(&mut self, position: &Position) -> io::Result<Move> {
        let moves = position.legal_moves();
        if moves.is_empty() {
            return Ok(Move::NoMove);
        }

        writeln!(self.output, "{}", position)?;
        for (index, mv) in moves.iter().enumerate() {
            writeln!(self.output, "{}: {}", index, mv)?;
        }
        writeln!(self.output, "Choose a move by number: ")?;

        loop {
            self.output.flush()?;
            let mut line = String::new();
            if self.input.read_line(&mut line)? == 0 {
                return Ok(Move::NoMove);
            }
            match parse_choice(&line, moves.len()) {
                Some(index) => return Ok(moves[index]),
                None => writeln!(self.output, "Choose a move by number (0 .. {}): ", moves.len() - 1)?,
            }
        }
    }
}

impl<R: BufRead, W: Write> MoveChooser for HumanPlayer<R, W> {
    fn choose_move(&mut self, position: &Position) -> Move {
        match self.ask(position) {
            Ok(mv) => mv,
            Err(e) => {
                tracing::warn!("Failed to read move: {}", e);
                Move::NoMove
            }
        }
    }
}

// ============================================================================
// LEVEL 3 - PARSING
// ============================================================================

fn parse_choice(line: &str, count: usize) -> Option<usize> {
    line.trim().parse::<usize>().ok().filter(|&i| i < count)
}

fn parse_color(s: &str) -> Result<Color> {
    match s.trim().to_lowercase().as_str() {
        "w" | "white" => Ok(Color::White),
        "b" | "black" => Ok(Color::Black),
        other => bail!("Invalid color input: {}", other),
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::io::Cursor;

    #[test]
    fn test_parse_color() {
        assert_eq!(parse_color("W").unwrap(), Color::White);
        assert_eq!(parse_color("black").unwrap(), Color::Black);
        assert!(parse_color("red").is_err());
    }

    #[test]
    fn test_parse_choice() {
        assert_eq!(parse_choice("3\n", 5), Some(3));
        assert_eq!(parse_choice("5\n", 5), None);
        assert_eq!(parse_choice("x", 5), None);
    }

    #[test]
    fn test_human_retries_until_valid() {
        let game = Position::new();
        let mut human = HumanPlayer::new(Cursor::new("abc\n99\n2\n"), Vec::new());
        let mv = human.choose_move(&game);
        assert_eq!(mv, game.legal_moves()[2]);
        let shown = String::from_utf8(human.output).unwrap();
        assert!(shown.contains("Choose a move by number (0 .. 23)"));
    }

    #[test]
    fn test_human_eof_gives_up() {
        let mut human = HumanPlayer::new(Cursor::new(""), Vec::new());
        assert_eq!(human.choose_move(&Position::new()), Move::NoMove);
    }
}
