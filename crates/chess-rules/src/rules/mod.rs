//! Check detection, legal destinations and end-of-game classification.
//!
//! Everything here is built on top of the pseudo-legal
//! [`destinations`](crate::movegen::destinations). The
//! [`SelfCheckPolicy`] decides whether a candidate that leaves the mover's
//! own king attacked is still offered.

mod execute;

pub use execute::{AppliedMove, MoveKind};
pub(crate) use execute::{execute, plan, simulate, PlanError};

use crate::movegen::{destinations, DestinationList};
use crate::{Board, SelfCheckPolicy};
use chess_core::{Color, Position};
use serde::{Deserialize, Serialize};
use std::fmt;

/// Result of a finished game.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum GameResult {
    /// The side to move is in check and has no move.
    Checkmate { winner: Color },
    /// The side to move has no move and is not in check.
    Stalemate,
}

impl GameResult {
    /// Returns the winning color, or `None` for a stalemate.
    pub fn winner(self) -> Option<Color> {
        match self {
            GameResult::Checkmate { winner } => Some(winner),
            GameResult::Stalemate => None,
        }
    }

    /// Returns true if the game ended without a winner.
    pub fn is_draw(self) -> bool {
        self == GameResult::Stalemate
    }
}

impl fmt::Display for GameResult {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            GameResult::Checkmate { winner } => write!(f, "checkmate, {} wins", winner),
            GameResult::Stalemate => write!(f, "stalemate"),
        }
    }
}

/// Returns true if some piece of `attacker` has `target` among its
/// destinations.
pub fn is_attacked_by(board: &Board, target: Position, attacker: Color) -> bool {
    board
        .pieces_of(attacker)
        .any(|(from, _)| destinations(board, from).contains(target))
}

/// Returns true if any king of `color` is attacked.
///
/// A side without a king is never in check.
pub fn is_in_check(board: &Board, color: Color) -> bool {
    board
        .kings(color)
        .any(|king| is_attacked_by(board, king, color.opposite()))
}

/// Returns the destinations of the piece on `from` under `policy`.
///
/// With [`SelfCheckPolicy::Forbidden`] each candidate is played on a copy of
/// the board and kept only if the mover is not in check afterwards.
pub fn legal_destinations(board: &Board, from: Position, policy: SelfCheckPolicy) -> DestinationList {
    let mut list = destinations(board, from);
    if policy == SelfCheckPolicy::Forbidden {
        if let Some(piece) = board.piece_at(from) {
            list.retain(|&to| match simulate(board, from, to) {
                Some(after) => !is_in_check(&after, piece.color),
                None => false,
            });
        }
    }
    list
}

/// Returns true if some piece of `color` has at least one destination.
pub fn has_any_legal_move(board: &Board, color: Color, policy: SelfCheckPolicy) -> bool {
    board
        .pieces_of(color)
        .any(|(from, _)| !legal_destinations(board, from, policy).is_empty())
}

/// Classifies the position for the side about to move.
///
/// Returns `None` while `to_move` still has a move.
pub fn evaluate(board: &Board, to_move: Color, policy: SelfCheckPolicy) -> Option<GameResult> {
    if has_any_legal_move(board, to_move, policy) {
        return None;
    }
    if is_in_check(board, to_move) {
        Some(GameResult::Checkmate {
            winner: to_move.opposite(),
        })
    } else {
        Some(GameResult::Stalemate)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    const STALEMATE: &str = "\n\n\n\n\n       P\n     K p\n       k";

    #[test]
    fn start_position_is_quiet() {
        let board = Board::standard();
        for color in Color::ALL {
            assert!(!is_in_check(&board, color));
            assert!(has_any_legal_move(&board, color, SelfCheckPolicy::Allowed));
            assert_eq!(evaluate(&board, color, SelfCheckPolicy::Forbidden), None);
        }
    }

    #[test]
    fn rook_gives_check() {
        let board = Board::from_layout("K      r").unwrap();
        assert!(is_in_check(&board, Color::White));
        assert!(!is_in_check(&board, Color::Black));
    }

    #[test]
    fn blocked_rook_gives_no_check() {
        let board = Board::from_layout("K  P   r").unwrap();
        assert!(!is_in_check(&board, Color::White));
    }

    #[test]
    fn pawn_attacks_diagonally_only() {
        // Black pawn on (1,1) attacks (0,0) and (2,0)
        let board = Board::from_layout("K\n p").unwrap();
        assert!(is_in_check(&board, Color::White));
        let board = Board::from_layout(" K\n p").unwrap();
        assert!(!is_in_check(&board, Color::White));
    }

    #[test]
    fn no_king_means_no_check() {
        let board = Board::from_layout("R      r").unwrap();
        assert!(!is_in_check(&board, Color::White));
    }

    #[test]
    fn any_of_several_kings_in_check() {
        let board = Board::from_layout("K      r\n\n\n\n\n\n\nK").unwrap();
        assert!(is_in_check(&board, Color::White));
    }

    #[test]
    fn stalemate() {
        let board = Board::from_layout(STALEMATE).unwrap();
        assert!(!is_in_check(&board, Color::Black));
        assert!(!has_any_legal_move(&board, Color::Black, SelfCheckPolicy::Allowed));
        assert_eq!(
            evaluate(&board, Color::Black, SelfCheckPolicy::Allowed),
            Some(GameResult::Stalemate)
        );
        assert_eq!(evaluate(&board, Color::White, SelfCheckPolicy::Allowed), None);
    }

    #[test]
    fn back_rank_checkmate() {
        // Black king boxed in by its own pawns, White rook on the back rank
        let board = Board::from_layout("K\n\n\n\n\n\n     ppp\nR     k").unwrap();
        assert!(is_in_check(&board, Color::Black));
        assert_eq!(
            evaluate(&board, Color::Black, SelfCheckPolicy::Allowed),
            None,
            "pawns can still push under the pseudo-legal policy"
        );
        assert_eq!(
            evaluate(&board, Color::Black, SelfCheckPolicy::Forbidden),
            Some(GameResult::Checkmate {
                winner: Color::White
            })
        );
    }

    #[test]
    fn smothered_checkmate_without_self_check_filtering() {
        // Black king in the corner walled in by pawns that cannot move, knight check
        let board = Board::from_layout("      pk\n      pp\n      H\n\n\n\n\nK").unwrap();
        assert!(is_in_check(&board, Color::Black));
        assert!(!has_any_legal_move(&board, Color::Black, SelfCheckPolicy::Allowed));
        assert_eq!(
            evaluate(&board, Color::Black, SelfCheckPolicy::Allowed),
            Some(GameResult::Checkmate {
                winner: Color::White
            })
        );
    }

    #[test]
    fn touching_kings_attack_each_other() {
        let board = Board::from_layout("K\n k").unwrap();
        assert!(is_in_check(&board, Color::White));
        assert!(is_in_check(&board, Color::Black));
        assert_eq!(evaluate(&board, Color::White, SelfCheckPolicy::Allowed), None);
    }

    #[test]
    fn castle_next_to_enemy_king_gives_check_both_ways() {
        let board = Board::from_layout("    K  R\n      k").unwrap();
        let after = simulate(&board, Position::new(4, 0), Position::new(7, 0)).unwrap();
        assert_eq!(
            after.piece_at(Position::new(6, 0)).map(|p| p.kind),
            Some(chess_core::PieceKind::King)
        );
        assert!(is_in_check(&after, Color::White));
        assert!(is_in_check(&after, Color::Black));
        assert!(destinations(&after, Position::new(6, 1)).contains(Position::new(6, 0)));
    }

    #[test]
    fn forbidden_policy_keeps_pinned_piece_in_place() {
        // White rook on (4,1) pinned by the black rook on (4,7)
        let board = Board::from_layout("    K\n    R\n\n\n\n\n\n    r").unwrap();
        let from = Position::new(4, 1);
        let loose = legal_destinations(&board, from, SelfCheckPolicy::Allowed);
        assert!(loose.contains(Position::new(0, 1)));
        let strict = legal_destinations(&board, from, SelfCheckPolicy::Forbidden);
        assert!(!strict.contains(Position::new(0, 1)));
        assert!(strict.contains(Position::new(4, 7)));
        assert!(strict.as_slice().iter().all(|to| to.file == 4));
    }

    #[test]
    fn forbidden_policy_keeps_king_off_attacked_cells() {
        // Black rook sweeps rank 1
        let board = Board::from_layout("K\n       r").unwrap();
        let from = Position::new(0, 0);
        assert!(legal_destinations(&board, from, SelfCheckPolicy::Allowed).contains(Position::new(1, 1)));
        let strict = legal_destinations(&board, from, SelfCheckPolicy::Forbidden);
        assert_eq!(strict.as_slice(), &[Position::new(1, 0)]);
    }

    #[test]
    fn result_display() {
        assert_eq!(
            GameResult::Checkmate {
                winner: Color::Black
            }
            .to_string(),
            "checkmate, Black wins"
        );
        assert_eq!(GameResult::Stalemate.to_string(), "stalemate");
        assert!(GameResult::Stalemate.is_draw());
        assert_eq!(GameResult::Stalemate.winner(), None);
    }
}
