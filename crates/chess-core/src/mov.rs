//! Move request representation.

use crate::{PieceKind, Position};
use serde::{Deserialize, Serialize};
use std::fmt;

/// A request to move the piece on `from` to `to`.
///
/// `promotion` names the kind a pawn becomes when it reaches the opposing
/// back rank; it is ignored for every other move.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct MoveRequest {
    pub from: Position,
    pub to: Position,
    #[serde(default)]
    pub promotion: Option<PieceKind>,
}

impl MoveRequest {
    /// Creates a request without a promotion kind.
    #[inline]
    pub const fn new(from: Position, to: Position) -> Self {
        MoveRequest {
            from,
            to,
            promotion: None,
        }
    }

    /// Returns the same request with a promotion kind attached.
    #[inline]
    pub const fn promoting_to(self, kind: PieceKind) -> Self {
        MoveRequest {
            promotion: Some(kind),
            ..self
        }
    }

    /// Parses coordinate notation such as "e2e4" or "a7a8q".
    ///
    /// The promotion letter uses the layout alphabet (`q`, `r`, `b`, `h`),
    /// in either case.
    pub fn parse(s: &str) -> Option<Self> {
        if !s.is_ascii() || s.len() < 4 || s.len() > 5 {
            return None;
        }
        let from = Position::from_algebraic(&s[0..2])?;
        let to = Position::from_algebraic(&s[2..4])?;
        let promotion = match s.chars().nth(4) {
            None => None,
            Some(c) => match PieceKind::from_letter(c) {
                Some((kind, _)) if kind.is_promotion_target() => Some(kind),
                _ => return None,
            },
        };
        Some(MoveRequest {
            from,
            to,
            promotion,
        })
    }

    /// Returns the coordinate notation for this request, if both ends are on
    /// the board.
    pub fn to_notation(self) -> Option<String> {
        let mut s = self.from.to_algebraic()?;
        s.push_str(&self.to.to_algebraic()?);
        if let Some(kind) = self.promotion {
            s.push(kind.to_letter(crate::Color::Black));
        }
        Some(s)
    }
}

impl fmt::Display for MoveRequest {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self.to_notation() {
            Some(s) => write!(f, "{}", s),
            None => write!(f, "{} -> {}", self.from, self.to),
        }
    }
}
