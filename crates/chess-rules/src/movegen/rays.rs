//! Direction tables, ray casting and fixed-offset reach for every piece kind.

use super::DestinationList;
use crate::Board;
use chess_core::{Delta, Position};

/// Rook directions.
pub const ORTHOGONAL: [Delta; 4] = [Delta::NORTH, Delta::EAST, Delta::SOUTH, Delta::WEST];

/// Bishop directions.
pub const DIAGONAL: [Delta; 4] = [
    Delta::NORTH_EAST,
    Delta::SOUTH_EAST,
    Delta::SOUTH_WEST,
    Delta::NORTH_WEST,
];

/// Knight jumps: (±1, ±2) and (±2, ±1).
pub const KNIGHT_OFFSETS: [Delta; 8] = [
    Delta::new(-2, 1),
    Delta::new(-1, 2),
    Delta::new(1, 2),
    Delta::new(2, 1),
    Delta::new(2, -1),
    Delta::new(1, -2),
    Delta::new(-2, -1),
    Delta::new(-1, -2),
];

/// The 8 king steps around a cell.
pub const KING_STEPS: [Delta; 8] = [
    Delta::new(-1, -1),
    Delta::new(-1, 0),
    Delta::new(-1, 1),
    Delta::new(0, -1),
    Delta::new(0, 1),
    Delta::new(1, -1),
    Delta::new(1, 0),
    Delta::new(1, 1),
];

/// Steps outward from `from` along `direction`.
///
/// Every on-board step is pushed. The ray stops on the first occupied cell,
/// which is included whatever its color, or at the edge of the board.
pub fn cast_ray(board: &Board, from: Position, direction: Delta, out: &mut DestinationList) {
    let mut current = from;
    while let Some(next) = current.offset(direction) {
        out.push(next);
        if board.piece_at(next).is_some() {
            break;
        }
        current = next;
    }
}

/// Casts a ray along each of `directions`.
pub fn cast_rays(board: &Board, from: Position, directions: &[Delta], out: &mut DestinationList) {
    for &direction in directions {
        cast_ray(board, from, direction, out);
    }
}

/// Pushes every on-board cell at one of `offsets` from `from`, occupied or not.
pub fn leaps(from: Position, offsets: &[Delta], out: &mut DestinationList) {
    for target in offsets.iter().filter_map(|&d| from.offset(d)) {
        out.push(target);
    }
}

/// Returns true if no piece stands strictly between `a` and `b` on their
/// shared rank. Positions on different ranks are never clear.
pub fn is_rank_clear_between(board: &Board, a: Position, b: Position) -> bool {
    if a.rank != b.rank {
        return false;
    }
    let (lo, hi) = if a.file < b.file {
        (a.file, b.file)
    } else {
        (b.file, a.file)
    };
    (lo + 1..hi).all(|file| board.is_empty_at(Position::new(file, a.rank)))
}

#[cfg(test)]
mod tests {
    use super::*;

    fn collect(list: &DestinationList) -> Vec<Position> {
        let mut v = list.as_slice().to_vec();
        v.sort();
        v
    }

    #[test]
    fn ray_on_empty_board_runs_to_edge() {
        let board = Board::empty();
        let mut out = DestinationList::new();
        cast_ray(&board, Position::new(0, 0), Delta::NORTH_EAST, &mut out);
        assert_eq!(out.len(), 7);
        assert!(out.contains(Position::new(7, 7)));
    }

    #[test]
    fn ray_stops_on_blocker_inclusive() {
        let board = Board::from_layout("R  p").unwrap();
        let mut out = DestinationList::new();
        cast_ray(&board, Position::new(0, 0), Delta::EAST, &mut out);
        assert_eq!(
            collect(&out),
            vec![
                Position::new(1, 0),
                Position::new(2, 0),
                Position::new(3, 0)
            ]
        );
    }

    #[test]
    fn ray_includes_friendly_blocker() {
        // Friendly pieces are filtered later, not during casting
        let board = Board::from_layout("R P").unwrap();
        let mut out = DestinationList::new();
        cast_ray(&board, Position::new(0, 0), Delta::EAST, &mut out);
        assert_eq!(
            collect(&out),
            vec![Position::new(1, 0), Position::new(2, 0)]
        );
    }

    #[test]
    fn knight_leaps_in_corner() {
        let mut out = DestinationList::new();
        leaps(Position::new(0, 0), &KNIGHT_OFFSETS, &mut out);
        assert_eq!(
            collect(&out),
            vec![Position::new(1, 2), Position::new(2, 1)]
        );
    }

    #[test]
    fn knight_leaps_in_center() {
        let mut out = DestinationList::new();
        leaps(Position::new(4, 4), &KNIGHT_OFFSETS, &mut out);
        assert_eq!(out.len(), 8);
    }

    #[test]
    fn king_steps_on_edge() {
        let mut out = DestinationList::new();
        leaps(Position::new(4, 0), &KING_STEPS, &mut out);
        assert_eq!(out.len(), 5);
    }

    #[test]
    fn rank_clear_between() {
        let board = Board::from_layout("R   K  R").unwrap();
        assert!(is_rank_clear_between(&board, Position::new(4, 0), Position::new(7, 0)));
        assert!(is_rank_clear_between(&board, Position::new(4, 0), Position::new(0, 0)));
        assert!(!is_rank_clear_between(&board, Position::new(0, 0), Position::new(7, 0)));
        assert!(!is_rank_clear_between(&board, Position::new(0, 0), Position::new(0, 7)));
    }
}
