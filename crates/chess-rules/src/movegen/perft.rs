//! Perft (performance test) for move generator validation.
//!
//! Perft counts the number of leaf nodes at a given depth, which can be
//! compared against known-correct values to validate the move generator and
//! the executor together.

use crate::{Game, MoveOutcome};

/// Counts the number of leaf nodes at the given depth.
///
/// Each promotion kind counts as its own move. Finished games are leaves.
pub fn perft(game: &Game, depth: u32) -> u64 {
    if depth == 0 {
        return 1;
    }

    let moves = game.legal_moves();

    if depth == 1 {
        return moves.len() as u64;
    }

    let mut nodes = 0u64;
    for request in moves {
        let mut next = game.clone();
        if let Ok(MoveOutcome::Applied(_)) = next.submit(request) {
            nodes += perft(&next, depth - 1);
        }
    }
    nodes
}

/// Perft with divide - shows node count for each move at depth-1.
/// Useful for debugging to identify which moves have incorrect counts.
pub fn perft_divide(game: &Game, depth: u32) -> Vec<(String, u64)> {
    let mut results = Vec::new();

    for request in game.legal_moves() {
        let mut next = game.clone();
        if !matches!(next.submit(request), Ok(MoveOutcome::Applied(_))) {
            continue;
        }
        let nodes = if depth > 1 {
            perft(&next, depth - 1)
        } else {
            1
        };
        results.push((request.to_string(), nodes));
    }

    results.sort_by(|a, b| a.0.cmp(&b.0));
    results
}
