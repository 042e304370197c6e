//! Move generation.
//!
//! For an occupied cell this module answers "where could this piece go",
//! ignoring whose turn it is and whether the mover's own king ends up
//! attacked. Turn order and check filtering are applied by
//! [`rules`](crate::rules) and [`Game`](crate::Game).
//!
//! Ray pieces (rook, bishop, queen) step outward until the first occupied
//! cell, which is included. Knights and kings use fixed offsets. Pawns push
//! forward onto empty cells and capture diagonally. Cells holding a piece of
//! the mover's color are dropped at the end, after which castling tokens
//! (the cell of a friendly rook the king may castle with) are appended.

mod rays;
pub mod perft;

use crate::Board;
use chess_core::{Color, Delta, Piece, PieceKind, Position};

pub use rays::{cast_ray, is_rank_clear_between, DIAGONAL, KING_STEPS, KNIGHT_OFFSETS, ORTHOGONAL};

/// A duplicate-free list of destinations with a fixed maximum capacity.
///
/// A single piece reaches at most 27 cells (a queen in the center), so a
/// fixed-size array avoids heap allocation during generation.
#[derive(Clone)]
pub struct DestinationList {
    cells: [Position; Self::MAX_DESTINATIONS],
    len: usize,
}

impl DestinationList {
    /// Upper bound on destinations of a single piece, castling tokens included.
    pub const MAX_DESTINATIONS: usize = 32;

    /// Creates an empty list.
    #[inline]
    pub const fn new() -> Self {
        DestinationList {
            cells: [Position::new(0, 0); Self::MAX_DESTINATIONS],
            len: 0,
        }
    }

    /// Adds a destination unless it is already present.
    #[inline]
    pub fn push(&mut self, pos: Position) {
        if self.contains(pos) {
            return;
        }
        debug_assert!(self.len < Self::MAX_DESTINATIONS);
        self.cells[self.len] = pos;
        self.len += 1;
    }

    /// Returns the number of destinations.
    #[inline]
    pub const fn len(&self) -> usize {
        self.len
    }

    /// Returns true if the list is empty.
    #[inline]
    pub const fn is_empty(&self) -> bool {
        self.len == 0
    }

    /// Returns true if `pos` is in the list.
    #[inline]
    pub fn contains(&self, pos: Position) -> bool {
        self.as_slice().contains(&pos)
    }

    /// Returns a slice of the destinations.
    #[inline]
    pub fn as_slice(&self) -> &[Position] {
        &self.cells[..self.len]
    }

    /// Retains only destinations for which the predicate returns true.
    pub fn retain<F>(&mut self, mut f: F)
    where
        F: FnMut(&Position) -> bool,
    {
        let mut write = 0;
        for read in 0..self.len {
            if f(&self.cells[read]) {
                self.cells[write] = self.cells[read];
                write += 1;
            }
        }
        self.len = write;
    }
}

impl Default for DestinationList {
    fn default() -> Self {
        Self::new()
    }
}

impl<'a> IntoIterator for &'a DestinationList {
    type Item = &'a Position;
    type IntoIter = std::slice::Iter<'a, Position>;

    fn into_iter(self) -> Self::IntoIter {
        self.as_slice().iter()
    }
}

impl std::fmt::Debug for DestinationList {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_list().entries(self.as_slice()).finish()
    }
}

/// Generates every destination of the piece on `from`.
///
/// Returns an empty list if `from` is empty or off the board.
pub fn destinations(board: &Board, from: Position) -> DestinationList {
    let mut out = DestinationList::new();
    let Some(piece) = board.piece_at(from) else {
        return out;
    };

    match piece.kind {
        PieceKind::Pawn => pawn_destinations(board, from, piece, &mut out),
        PieceKind::Knight => rays::leaps(from, &KNIGHT_OFFSETS, &mut out),
        PieceKind::Bishop => rays::cast_rays(board, from, &DIAGONAL, &mut out),
        PieceKind::Rook => rays::cast_rays(board, from, &ORTHOGONAL, &mut out),
        PieceKind::Queen => {
            rays::cast_rays(board, from, &ORTHOGONAL, &mut out);
            rays::cast_rays(board, from, &DIAGONAL, &mut out);
        }
        PieceKind::King => king_steps(board, from, piece.color, &mut out),
    }

    out.retain(|&to| !board.piece_at(to).is_some_and(|p| p.color == piece.color));

    if piece.kind == PieceKind::King {
        for token in castling_tokens(board, from) {
            out.push(token);
        }
    }

    out
}

/// Pushes the pawn's forward steps and diagonal captures.
fn pawn_destinations(board: &Board, from: Position, pawn: Piece, out: &mut DestinationList) {
    let forward = Delta::new(0, pawn.color.pawn_direction());

    let one = from + forward;
    if board.is_empty_at(one) {
        out.push(one);
        let two = one + forward;
        if !pawn.has_moved && board.is_empty_at(two) {
            out.push(two);
        }
    }

    for side in [-1, 1] {
        let target = from + forward + Delta::new(side, 0);
        if board.piece_at(target).is_some_and(|p| p.color != pawn.color) {
            out.push(target);
        }
    }
}

/// Pushes the king's single steps, skipping cells next to an enemy king.
///
/// An enemy king's own cell is not skipped: kings that already touch, after
/// a castle or in a hand-made layout, may capture each other.
fn king_steps(board: &Board, from: Position, color: Color, out: &mut DestinationList) {
    let enemy_kings: Vec<Position> = board.kings(color.opposite()).collect();
    for target in KING_STEPS.iter().filter_map(|&d| from.offset(d)) {
        if enemy_kings.iter().all(|&k| k.king_distance(target) != 1) {
            out.push(target);
        }
    }
}

/// Returns where the king and rook land when the king on `king` castles with
/// the rook on `rook`.
///
/// Castling toward the lower files puts the king on file 1 and the rook on
/// file 2; toward the higher files, king on 6 and rook on 5.
pub fn castle_targets(king: Position, rook: Position) -> (Position, Position) {
    let (king_file, rook_file) = if rook.file < king.file { (1, 2) } else { (6, 5) };
    (
        Position::new(king_file, king.rank),
        Position::new(rook_file, king.rank),
    )
}

/// Returns the cells of the friendly rooks the king on `from` may castle with.
///
/// Both pieces must be unmoved, share a rank, and have nothing between them.
/// The landing cells must also be empty or held by the castling pair itself.
pub fn castling_tokens(board: &Board, from: Position) -> Vec<Position> {
    let Some(king) = board.piece_at(from) else {
        return Vec::new();
    };
    if king.kind != PieceKind::King || king.has_moved {
        return Vec::new();
    }

    board
        .pieces_of(king.color)
        .filter(|(pos, rook)| {
            rook.kind == PieceKind::Rook
                && !rook.has_moved
                && is_rank_clear_between(board, from, *pos)
        })
        .map(|(pos, _)| pos)
        .filter(|&rook| {
            let (king_to, rook_to) = castle_targets(from, rook);
            [king_to, rook_to]
                .into_iter()
                .all(|cell| cell == from || cell == rook || board.is_empty_at(cell))
        })
        .collect()
}

/// Returns true if `to` is a castling token for the king on `from`.
pub fn is_castling_token(board: &Board, from: Position, to: Position) -> bool {
    match (board.piece_at(from), board.piece_at(to)) {
        (Some(king), Some(rook)) => {
            king.kind == PieceKind::King && rook.kind == PieceKind::Rook && king.color == rook.color
        }
        _ => false,
    }
}
