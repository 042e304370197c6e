//! The 8x8 grid of cells.

use chess_core::{Color, Layout, LayoutError, Piece, PieceKind, Position, BOARD_SIZE};
use serde::{Deserialize, Serialize};
use std::fmt;

const SIZE: usize = BOARD_SIZE as usize;

/// A cell holds at most one piece.
///
/// A cell does not know its own coordinates; its position is where it sits
/// in the owning [`Board`].
pub type Cell = Option<Piece>;

/// An 8x8 board, indexed `[rank][file]`.
///
/// The board is a plain container: it performs no legality checks. All rules
/// live in [`movegen`](crate::movegen) and [`Game`](crate::Game).
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Board {
    cells: [[Cell; SIZE]; SIZE],
}

impl Board {
    /// Creates a board with no pieces.
    pub fn empty() -> Self {
        Board {
            cells: [[None; SIZE]; SIZE],
        }
    }

    /// Creates the standard starting position.
    pub fn standard() -> Self {
        Self::from_layout(Layout::STANDARD).expect("STANDARD is valid")
    }

    /// Creates a board from the text layout format. All pieces start unmoved.
    pub fn from_layout(text: &str) -> Result<Self, LayoutError> {
        let layout = Layout::parse(text)?;
        let mut board = Board::empty();
        for (pos, piece) in layout.pieces() {
            board.set_piece(pos, Some(piece));
        }
        Ok(board)
    }

    /// Converts the board to the text layout format.
    ///
    /// `has_moved` flags are not part of the layout and are lost.
    pub fn to_layout(&self) -> String {
        let mut layout = Layout::empty();
        for (pos, piece) in self.pieces() {
            layout.set(pos, Some(piece));
        }
        layout.to_text()
    }

    /// Returns the cell at `pos`, or `None` if `pos` is off the board.
    #[inline]
    pub fn get_cell(&self, pos: Position) -> Option<&Cell> {
        if pos.is_on_board() {
            Some(&self.cells[pos.rank as usize][pos.file as usize])
        } else {
            None
        }
    }

    /// Mutable variant of [`Board::get_cell`].
    #[inline]
    pub fn get_cell_mut(&mut self, pos: Position) -> Option<&mut Cell> {
        if pos.is_on_board() {
            Some(&mut self.cells[pos.rank as usize][pos.file as usize])
        } else {
            None
        }
    }

    /// Returns the piece at `pos`, if any.
    #[inline]
    pub fn piece_at(&self, pos: Position) -> Option<Piece> {
        self.get_cell(pos).copied().flatten()
    }

    /// Returns true if `pos` is on the board and holds no piece.
    #[inline]
    pub fn is_empty_at(&self, pos: Position) -> bool {
        matches!(self.get_cell(pos), Some(None))
    }

    /// Puts `piece` on `pos`, returning whatever was there.
    ///
    /// Off-board positions are ignored.
    pub fn set_piece(&mut self, pos: Position, piece: Cell) -> Cell {
        match self.get_cell_mut(pos) {
            Some(cell) => std::mem::replace(cell, piece),
            None => None,
        }
    }

    /// Removes and returns the piece on `pos`.
    pub fn take_piece(&mut self, pos: Position) -> Cell {
        self.get_cell_mut(pos).and_then(Option::take)
    }

    /// Relocates the content of `from` to `to` and clears `from`.
    ///
    /// Returns the piece that was displaced from `to`. This is a mechanical
    /// primitive: it does not check legality and does not touch `has_moved`.
    /// Nothing happens if either position is off the board.
    pub fn move_piece(&mut self, from: Position, to: Position) -> Cell {
        if !from.is_on_board() || !to.is_on_board() {
            return None;
        }
        let piece = self.take_piece(from);
        self.set_piece(to, piece)
    }

    /// Iterates over every occupied cell, rank by rank.
    pub fn pieces(&self) -> impl Iterator<Item = (Position, Piece)> + '_ {
        Position::all().filter_map(move |pos| self.piece_at(pos).map(|piece| (pos, piece)))
    }

    /// Iterates over the pieces of one color.
    pub fn pieces_of(&self, color: Color) -> impl Iterator<Item = (Position, Piece)> + '_ {
        self.pieces().filter(move |(_, piece)| piece.color == color)
    }

    /// Returns the positions of every king of `color`.
    ///
    /// A regular game has exactly one; debug layouts may have none or several.
    pub fn kings(&self, color: Color) -> impl Iterator<Item = Position> + '_ {
        self.pieces_of(color)
            .filter(|(_, piece)| piece.kind == PieceKind::King)
            .map(|(pos, _)| pos)
    }

    /// Returns the total number of pieces on the board.
    pub fn piece_count(&self) -> usize {
        self.pieces().count()
    }
}

impl Default for Board {
    fn default() -> Self {
        Self::standard()
    }
}

impl fmt::Display for Board {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.to_layout())
    }
}
