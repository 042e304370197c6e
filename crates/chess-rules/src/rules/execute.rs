//! Board mutation for a single validated move.
//!
//! Applying a move happens in two steps. [`plan`] decides what kind of move
//! a destination means (plain relocation, castle, promotion) and can still
//! refuse it. [`execute`] then carries the plan out and cannot fail. The
//! split lets [`Game`](crate::Game) answer `PromotionRequired` without
//! touching the board, and lets the self-check filter play candidates on a
//! scratch copy.

use crate::movegen::{castle_targets, is_castling_token};
use crate::Board;
use chess_core::{Piece, PieceKind, Position};
use serde::{Deserialize, Serialize};
use std::fmt;
use tracing::warn;

/// What an applied move did besides relocating the moving piece.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum MoveKind {
    /// A plain relocation, possibly capturing.
    Normal,
    /// The king castled with the rook that stood on `rook_from`.
    Castle { rook_from: Position, rook_to: Position },
    /// A pawn reached the last rank and became this kind.
    Promotion(PieceKind),
}

/// The record of one applied move.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct AppliedMove {
    /// Origin of the moving piece.
    pub from: Position,
    /// The requested destination. For a castle this is the rook's cell.
    pub to: Position,
    /// The moving piece as it was before the move.
    pub piece: Piece,
    pub kind: MoveKind,
    /// The enemy piece removed from the board, if any.
    pub captured: Option<Piece>,
}

impl AppliedMove {
    /// Returns the cell the moving piece ended on.
    pub fn landing(&self) -> Position {
        match self.kind {
            MoveKind::Castle { .. } => castle_targets(self.from, self.to).0,
            _ => self.to,
        }
    }

    /// Returns true if an enemy piece was captured.
    pub fn is_capture(&self) -> bool {
        self.captured.is_some()
    }
}

impl fmt::Display for AppliedMove {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{} {} -> {}", self.piece, self.from, self.to)?;
        match self.kind {
            MoveKind::Normal => {}
            MoveKind::Castle { .. } => write!(f, " (castle)")?,
            MoveKind::Promotion(kind) => write!(f, " (promotes to {})", kind)?,
        }
        if let Some(captured) = self.captured {
            write!(f, " x {}", captured)?;
        }
        Ok(())
    }
}

/// How a validated destination is carried out.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub(crate) enum Plan {
    Relocate,
    Castle {
        rook_from: Position,
        king_to: Position,
        rook_to: Position,
    },
    Promote(PieceKind),
}

/// Why a destination from the generator cannot be carried out as requested.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub(crate) enum PlanError {
    /// The pawn reaches its last rank and no kind was given.
    PromotionRequired,
    /// The given promotion kind is not Queen, Rook, Bishop or Knight.
    InvalidPromotion(PieceKind),
    /// A castling token whose landing cells are taken by other pieces.
    BrokenCastle,
}

/// Decides how `piece` on `from` goes to `to`.
///
/// `to` must already be one of the generator's destinations for `from`.
/// A promotion kind given for a move that does not promote is ignored.
pub(crate) fn plan(
    board: &Board,
    from: Position,
    to: Position,
    piece: Piece,
    promotion: Option<PieceKind>,
) -> Result<Plan, PlanError> {
    match piece.kind {
        PieceKind::King if is_castling_token(board, from, to) => {
            let (king_to, rook_to) = castle_targets(from, to);
            let free = |cell: Position| cell == from || cell == to || board.is_empty_at(cell);
            if from.rank != to.rank || !free(king_to) || !free(rook_to) {
                warn!(%from, %to, "castle landing cells are occupied");
                return Err(PlanError::BrokenCastle);
            }
            Ok(Plan::Castle {
                rook_from: to,
                king_to,
                rook_to,
            })
        }
        PieceKind::Pawn if to.rank == piece.color.promotion_rank() => match promotion {
            None => Err(PlanError::PromotionRequired),
            Some(kind) if kind.is_promotion_target() => Ok(Plan::Promote(kind)),
            Some(kind) => Err(PlanError::InvalidPromotion(kind)),
        },
        _ => Ok(Plan::Relocate),
    }
}

/// Carries out `plan` on the board and returns the move record.
pub(crate) fn execute(
    board: &mut Board,
    from: Position,
    to: Position,
    piece: Piece,
    plan: Plan,
) -> AppliedMove {
    let (kind, captured) = match plan {
        Plan::Relocate => {
            let captured = board.move_piece(from, to);
            mark_moved(board, to);
            (MoveKind::Normal, captured)
        }
        Plan::Castle {
            rook_from,
            king_to,
            rook_to,
        } => {
            let king = board.take_piece(from);
            let rook = board.take_piece(rook_from);
            board.set_piece(king_to, king);
            board.set_piece(rook_to, rook);
            mark_moved(board, king_to);
            mark_moved(board, rook_to);
            (MoveKind::Castle { rook_from, rook_to }, None)
        }
        Plan::Promote(new_kind) => {
            board.take_piece(from);
            let promoted = Piece {
                kind: new_kind,
                color: piece.color,
                has_moved: true,
            };
            let captured = board.set_piece(to, Some(promoted));
            (MoveKind::Promotion(new_kind), captured)
        }
    };

    AppliedMove {
        from,
        to,
        piece,
        kind,
        captured,
    }
}

/// Plays `from -> to` on a copy of the board.
///
/// Promotions are played as a queen; the kind does not change which cells
/// are attacked afterwards through the promotion square. Returns `None` if
/// `from` is empty or the move cannot be planned.
pub(crate) fn simulate(board: &Board, from: Position, to: Position) -> Option<Board> {
    let piece = board.piece_at(from)?;
    let plan = plan(board, from, to, piece, Some(PieceKind::Queen)).ok()?;
    let mut scratch = board.clone();
    execute(&mut scratch, from, to, piece, plan);
    Some(scratch)
}

fn mark_moved(board: &mut Board, pos: Position) {
    if let Some(Some(piece)) = board.get_cell_mut(pos) {
        piece.has_moved = true;
    }
}
