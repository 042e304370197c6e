//! Chess piece representation.

use crate::Color;
use serde::{Deserialize, Serialize};

/// The six kinds of chess pieces.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
#[repr(u8)]
pub enum PieceKind {
    Pawn = 0,
    Knight = 1,
    Bishop = 2,
    Rook = 3,
    Queen = 4,
    King = 5,
}

impl PieceKind {
    /// All piece kinds in order.
    pub const ALL: [PieceKind; 6] = [
        PieceKind::Pawn,
        PieceKind::Knight,
        PieceKind::Bishop,
        PieceKind::Rook,
        PieceKind::Queen,
        PieceKind::King,
    ];

    /// Kinds a pawn may promote to.
    pub const PROMOTIONS: [PieceKind; 4] = [
        PieceKind::Queen,
        PieceKind::Rook,
        PieceKind::Bishop,
        PieceKind::Knight,
    ];

    /// Returns the layout letter for this kind with the given color.
    ///
    /// Knights are written `H`; uppercase is White.
    pub const fn to_letter(self, color: Color) -> char {
        let c = match self {
            PieceKind::Pawn => 'p',
            PieceKind::Knight => 'h',
            PieceKind::Bishop => 'b',
            PieceKind::Rook => 'r',
            PieceKind::Queen => 'q',
            PieceKind::King => 'k',
        };
        match color {
            Color::White => c.to_ascii_uppercase(),
            Color::Black => c,
        }
    }

    /// Parses a layout letter into a kind and color.
    pub const fn from_letter(c: char) -> Option<(PieceKind, Color)> {
        let color = if c.is_ascii_uppercase() {
            Color::White
        } else {
            Color::Black
        };
        let kind = match c.to_ascii_lowercase() {
            'p' => PieceKind::Pawn,
            'h' => PieceKind::Knight,
            'b' => PieceKind::Bishop,
            'r' => PieceKind::Rook,
            'q' => PieceKind::Queen,
            'k' => PieceKind::King,
            _ => return None,
        };
        Some((kind, color))
    }

    /// Returns true if a pawn may be promoted to this kind.
    #[inline]
    pub const fn is_promotion_target(self) -> bool {
        matches!(
            self,
            PieceKind::Queen | PieceKind::Rook | PieceKind::Bishop | PieceKind::Knight
        )
    }
}

impl std::fmt::Display for PieceKind {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        let name = match self {
            PieceKind::Pawn => "Pawn",
            PieceKind::Knight => "Knight",
            PieceKind::Bishop => "Bishop",
            PieceKind::Rook => "Rook",
            PieceKind::Queen => "Queen",
            PieceKind::King => "King",
        };
        write!(f, "{}", name)
    }
}

/// A piece on the board.
///
/// `has_moved` is set the first time the piece is relocated, castling
/// included. It gates the pawn double step and castling.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct Piece {
    pub kind: PieceKind,
    pub color: Color,
    #[serde(default)]
    pub has_moved: bool,
}

impl Piece {
    /// Creates an unmoved piece.
    #[inline]
    pub const fn new(kind: PieceKind, color: Color) -> Self {
        Piece {
            kind,
            color,
            has_moved: false,
        }
    }

    /// Returns the layout letter of this piece.
    #[inline]
    pub const fn letter(self) -> char {
        self.kind.to_letter(self.color)
    }

    /// Parses a layout letter into an unmoved piece.
    pub const fn from_letter(c: char) -> Option<Self> {
        match PieceKind::from_letter(c) {
            Some((kind, color)) => Some(Piece::new(kind, color)),
            None => None,
        }
    }
}

impl std::fmt::Display for Piece {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{} {}", self.color, self.kind)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn kind_to_letter() {
        assert_eq!(PieceKind::Pawn.to_letter(Color::White), 'P');
        assert_eq!(PieceKind::Pawn.to_letter(Color::Black), 'p');
        assert_eq!(PieceKind::King.to_letter(Color::White), 'K');
        assert_eq!(PieceKind::Knight.to_letter(Color::Black), 'h');
    }

    #[test]
    fn kind_from_letter() {
        assert_eq!(
            PieceKind::from_letter('P'),
            Some((PieceKind::Pawn, Color::White))
        );
        assert_eq!(
            PieceKind::from_letter('h'),
            Some((PieceKind::Knight, Color::Black))
        );
        assert_eq!(
            PieceKind::from_letter('Q'),
            Some((PieceKind::Queen, Color::White))
        );
        // FEN knights are not part of the layout alphabet
        assert_eq!(PieceKind::from_letter('N'), None);
        assert_eq!(PieceKind::from_letter(' '), None);
        assert_eq!(PieceKind::from_letter('x'), None);
    }

    #[test]
    fn letters_roundtrip() {
        for kind in PieceKind::ALL {
            for color in Color::ALL {
                let c = kind.to_letter(color);
                assert_eq!(PieceKind::from_letter(c), Some((kind, color)));
            }
        }
    }

    #[test]
    fn promotion_targets() {
        for kind in PieceKind::PROMOTIONS {
            assert!(kind.is_promotion_target());
        }
        assert!(!PieceKind::King.is_promotion_target());
        assert!(!PieceKind::Pawn.is_promotion_target());
    }

    #[test]
    fn new_piece_is_unmoved() {
        let piece = Piece::new(PieceKind::Rook, Color::Black);
        assert!(!piece.has_moved);
        assert_eq!(piece.letter(), 'r');
        assert_eq!(piece.color, Color::Black);
        assert_eq!(piece.to_string(), "Black Rook");
    }
}
