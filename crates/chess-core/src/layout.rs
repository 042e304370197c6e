//! Text layout of a board, used to seed non-standard positions.
//!
//! A layout is up to eight lines, one per rank, top line first (rank 0).
//! Each line is read as up to eight characters, one per file. Letters come
//! from a fixed table (`K` king, `Q` queen, `R` rook, `B` bishop, `H` knight,
//! `P` pawn), uppercase for White and lowercase for Black; a space is an
//! empty cell. Missing lines and short lines are padded with empty cells;
//! anything past the eighth line or the eighth character is ignored.

use crate::position::BOARD_SIZE;
use crate::{Piece, Position};
use thiserror::Error;

const SIZE: usize = BOARD_SIZE as usize;

/// Errors that can occur when parsing a layout.
#[derive(Debug, Error, PartialEq, Eq)]
pub enum LayoutError {
    #[error("invalid layout: unknown character '{ch}' at file {file}, rank {rank}")]
    UnknownCharacter { ch: char, file: usize, rank: usize },
}

/// A validated layout, normalized to eight rows of eight characters.
///
/// The layout only checks the text; turning it into a board is up to the
/// engine.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Layout {
    rows: [[char; SIZE]; SIZE],
}

impl Layout {
    /// The standard starting layout.
    pub const STANDARD: &'static str =
        "RHBQKBHR\nPPPPPPPP\n        \n        \n        \n        \npppppppp\nrhbqkbhr";

    /// A layout with no pieces.
    pub fn empty() -> Self {
        Layout {
            rows: [[' '; SIZE]; SIZE],
        }
    }

    /// Parses a layout string.
    pub fn parse(text: &str) -> Result<Self, LayoutError> {
        let mut layout = Layout::empty();

        for (rank, line) in text.lines().take(SIZE).enumerate() {
            for (file, ch) in line.chars().take(SIZE).enumerate() {
                if ch != ' ' && Piece::from_letter(ch).is_none() {
                    return Err(LayoutError::UnknownCharacter { ch, file, rank });
                }
                layout.rows[rank][file] = ch;
            }
        }

        Ok(layout)
    }

    /// Returns the character at `pos` (a space for empty or off-board cells).
    pub fn char_at(&self, pos: Position) -> char {
        match pos.index() {
            Some(_) => self.rows[pos.rank as usize][pos.file as usize],
            None => ' ',
        }
    }

    /// Returns the piece described at `pos`, if any.
    pub fn piece_at(&self, pos: Position) -> Option<Piece> {
        Piece::from_letter(self.char_at(pos))
    }

    /// Sets the character at `pos`. Off-board positions are ignored.
    pub fn set(&mut self, pos: Position, piece: Option<Piece>) {
        if pos.is_on_board() {
            self.rows[pos.rank as usize][pos.file as usize] = piece.map_or(' ', Piece::letter);
        }
    }

    /// Iterates over the occupied cells.
    pub fn pieces(&self) -> impl Iterator<Item = (Position, Piece)> + '_ {
        Position::all().filter_map(move |pos| self.piece_at(pos).map(|piece| (pos, piece)))
    }

    /// Converts the layout back to text: eight lines of eight characters.
    pub fn to_text(&self) -> String {
        self.rows
            .iter()
            .map(|row| row.iter().collect::<String>())
            .collect::<Vec<_>>()
            .join("\n")
    }
}

impl Default for Layout {
    fn default() -> Self {
        Self::parse(Self::STANDARD).expect("STANDARD is valid")
    }
}

impl std::fmt::Display for Layout {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}", self.to_text())
    }
}
