//! Property tests over random playouts from the standard start.

use chess_core::{Color, MoveRequest, PieceKind, Position};
use chess_rules::{
    movegen::is_castling_token, EngineConfig, Game, MoveKind, MoveOutcome, RejectReason,
};
use proptest::prelude::*;

fn config(strict: bool, free: bool) -> EngineConfig {
    let base = if free {
        EngineConfig::debug()
    } else {
        EngineConfig::default()
    };
    if strict {
        base.strict()
    } else {
        base
    }
}

/// Checks the destination invariants for every occupied cell.
fn check_destinations(game: &Game) -> Result<(), TestCaseError> {
    let board = game.board();
    for (from, piece) in board.pieces() {
        for to in game.legal_destinations(from) {
            prop_assert_ne!(to, from);
            prop_assert!(to.is_on_board());
            if let Some(target) = board.piece_at(to) {
                if target.color == piece.color {
                    prop_assert!(
                        is_castling_token(board, from, to),
                        "{} on {} offered own piece on {}",
                        piece,
                        from,
                        to
                    );
                }
            }
        }
    }
    Ok(())
}

proptest! {
    #![proptest_config(ProptestConfig::with_cases(48))]

    #[test]
    fn random_playouts_keep_invariants(
        picks in prop::collection::vec(any::<usize>(), 0..60),
        strict in any::<bool>(),
    ) {
        let mut game = Game::with_config(config(strict, false));

        for pick in picks {
            check_destinations(&game)?;

            let moves = game.legal_moves();
            if moves.is_empty() {
                prop_assert!(game.is_game_over());
                break;
            }

            let request = moves[pick % moves.len()];
            let mover = game.active_color();
            let count_before = game.board().piece_count();

            let outcome = game.submit(request).unwrap();
            let applied = match outcome {
                MoveOutcome::Applied(applied) => applied,
                other => return Err(TestCaseError::fail(format!("{request} gave {other:?}"))),
            };

            prop_assert_eq!(game.active_color(), mover.opposite());
            prop_assert_eq!(applied.piece.color, mover);

            let count_after = game.board().piece_count();
            match applied.captured {
                Some(captured) => {
                    prop_assert_ne!(captured.color, mover);
                    prop_assert_eq!(count_after + 1, count_before);
                }
                None => prop_assert_eq!(count_after, count_before),
            }

            let landed = game.board().piece_at(applied.landing()).unwrap();
            prop_assert!(landed.has_moved);
            prop_assert_eq!(landed.color, mover);
            if let MoveKind::Promotion(kind) = applied.kind {
                prop_assert_eq!(landed.kind, kind);
            }

            if game.is_game_over() {
                break;
            }
        }
    }

    #[test]
    fn refused_requests_change_nothing(
        picks in prop::collection::vec((0i8..8, 0i8..8, 0i8..8, 0i8..8), 1..40),
        free in any::<bool>(),
    ) {
        let mut game = Game::with_config(config(false, free));

        for (ff, fr, tf, tr) in picks {
            let before = game.snapshot();
            let plies = game.ply_count();
            let request = MoveRequest::new(Position::new(ff, fr), Position::new(tf, tr));

            match game.submit(request).unwrap() {
                MoveOutcome::Applied(_) => {
                    prop_assert_eq!(game.ply_count(), plies + 1);
                }
                MoveOutcome::Rejected(reason) => {
                    prop_assert_eq!(game.snapshot(), before);
                    if free {
                        prop_assert_ne!(reason, RejectReason::NotYourTurn);
                    }
                }
                MoveOutcome::PromotionRequired { .. } => {
                    prop_assert_eq!(game.snapshot(), before);
                }
            }
        }
    }

    #[test]
    fn every_offered_destination_is_accepted(
        picks in prop::collection::vec(any::<usize>(), 0..30),
        strict in any::<bool>(),
    ) {
        let mut game = Game::with_config(config(strict, false));

        for pick in picks {
            if game.is_game_over() {
                break;
            }
            let color = game.active_color();
            let origins: Vec<Position> = game
                .board()
                .pieces_of(color)
                .map(|(pos, _)| pos)
                .filter(|&pos| !game.legal_destinations(pos).is_empty())
                .collect();
            if origins.is_empty() {
                break;
            }
            let from = origins[pick % origins.len()];
            let destinations: Vec<Position> = game.legal_destinations(from).into_iter().collect();
            let to = destinations[pick % destinations.len()];

            let mut outcome = game.attempt_move(from, to, None).unwrap();
            if let MoveOutcome::PromotionRequired { .. } = outcome {
                outcome = game.attempt_move(from, to, Some(PieceKind::Queen)).unwrap();
            }
            prop_assert!(outcome.is_applied(), "{} -> {} gave {:?}", from, to, outcome);
        }
    }

    #[test]
    fn strict_play_never_leaves_the_mover_in_check(
        picks in prop::collection::vec(any::<usize>(), 0..60),
    ) {
        let mut game = Game::with_config(EngineConfig::default().strict());

        for pick in picks {
            let moves = game.legal_moves();
            if moves.is_empty() {
                break;
            }
            let mover = game.active_color();
            game.submit(moves[pick % moves.len()]).unwrap();
            prop_assert!(!chess_rules::rules::is_in_check(game.board(), mover));
        }
    }
}

#[test]
fn both_colors_start_with_twenty_moves() {
    for color in Color::ALL {
        let game = Game::with_config(EngineConfig {
            starting_color: color,
            ..EngineConfig::default()
        });
        assert_eq!(game.legal_moves().len(), 20);
    }
}
