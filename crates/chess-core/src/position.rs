//! Board coordinates and the offsets between them.

use serde::{Deserialize, Serialize};
use std::fmt;
use std::ops::{Add, Mul, Neg, Sub};

/// Number of files and ranks on the board.
pub const BOARD_SIZE: i8 = 8;

/// A `(file, rank)` coordinate.
///
/// File 0 is the `a` file and rank 0 is White's back rank. A `Position` may
/// hold off-board values (for example a cursor pushed past the edge); every
/// board accessor reports those as "no such cell" instead of panicking.
#[derive(Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
pub struct Position {
    pub file: i8,
    pub rank: i8,
}

impl Position {
    /// Creates a position. No bounds check is made.
    #[inline]
    pub const fn new(file: i8, rank: i8) -> Self {
        Position { file, rank }
    }

    /// Returns true if both coordinates are in `0..8`.
    #[inline]
    pub const fn is_on_board(self) -> bool {
        self.file >= 0 && self.file < BOARD_SIZE && self.rank >= 0 && self.rank < BOARD_SIZE
    }

    /// Returns the `rank * 8 + file` index, or `None` if off the board.
    #[inline]
    pub const fn index(self) -> Option<usize> {
        if self.is_on_board() {
            Some(self.rank as usize * BOARD_SIZE as usize + self.file as usize)
        } else {
            None
        }
    }

    /// Returns the position `delta` away, or `None` if that is off the board.
    #[inline]
    pub fn offset(self, delta: Delta) -> Option<Position> {
        let target = self + delta;
        target.is_on_board().then_some(target)
    }

    /// Number of king steps between two positions.
    #[inline]
    pub fn king_distance(self, other: Position) -> i8 {
        let d = other - self;
        d.file.abs().max(d.rank.abs())
    }

    /// Iterates over all 64 on-board positions, rank by rank.
    pub fn all() -> impl Iterator<Item = Position> {
        (0..BOARD_SIZE).flat_map(|rank| (0..BOARD_SIZE).map(move |file| Position::new(file, rank)))
    }

    /// Parses algebraic notation (e.g. "e2" is file 4, rank 1).
    pub fn from_algebraic(s: &str) -> Option<Self> {
        let bytes = s.as_bytes();
        if bytes.len() != 2 {
            return None;
        }
        let file = bytes[0].to_ascii_lowercase();
        let rank = bytes[1];
        if !(b'a'..=b'h').contains(&file) || !(b'1'..=b'8').contains(&rank) {
            return None;
        }
        Some(Position::new((file - b'a') as i8, (rank - b'1') as i8))
    }

    /// Returns algebraic notation, or `None` if off the board.
    pub fn to_algebraic(self) -> Option<String> {
        if !self.is_on_board() {
            return None;
        }
        let file = (b'a' + self.file as u8) as char;
        let rank = (b'1' + self.rank as u8) as char;
        Some(format!("{}{}", file, rank))
    }
}

impl fmt::Debug for Position {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "Position({}, {})", self.file, self.rank)
    }
}

impl fmt::Display for Position {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self.to_algebraic() {
            Some(s) => write!(f, "{}", s),
            None => write!(f, "({}, {})", self.file, self.rank),
        }
    }
}

/// A step between two positions, used for piece offsets and ray directions.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub struct Delta {
    pub file: i8,
    pub rank: i8,
}

impl Delta {
    #[inline]
    pub const fn new(file: i8, rank: i8) -> Self {
        Delta { file, rank }
    }

    pub const NORTH: Delta = Delta::new(0, 1);
    pub const SOUTH: Delta = Delta::new(0, -1);
    pub const EAST: Delta = Delta::new(1, 0);
    pub const WEST: Delta = Delta::new(-1, 0);
    pub const NORTH_EAST: Delta = Delta::new(1, 1);
    pub const NORTH_WEST: Delta = Delta::new(-1, 1);
    pub const SOUTH_EAST: Delta = Delta::new(1, -1);
    pub const SOUTH_WEST: Delta = Delta::new(-1, -1);
}

impl Add<Delta> for Position {
    type Output = Position;

    #[inline]
    fn add(self, rhs: Delta) -> Position {
        Position::new(self.file + rhs.file, self.rank + rhs.rank)
    }
}

impl Sub<Delta> for Position {
    type Output = Position;

    #[inline]
    fn sub(self, rhs: Delta) -> Position {
        Position::new(self.file - rhs.file, self.rank - rhs.rank)
    }
}

impl Sub for Position {
    type Output = Delta;

    #[inline]
    fn sub(self, rhs: Position) -> Delta {
        Delta::new(self.file - rhs.file, self.rank - rhs.rank)
    }
}

impl Add for Delta {
    type Output = Delta;

    #[inline]
    fn add(self, rhs: Delta) -> Delta {
        Delta::new(self.file + rhs.file, self.rank + rhs.rank)
    }
}

impl Mul<i8> for Delta {
    type Output = Delta;

    #[inline]
    fn mul(self, rhs: i8) -> Delta {
        Delta::new(self.file * rhs, self.rank * rhs)
    }
}

impl Neg for Delta {
    type Output = Delta;

    #[inline]
    fn neg(self) -> Delta {
        Delta::new(-self.file, -self.rank)
    }
}
