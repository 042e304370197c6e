//! Chess rules engine over a plain 8x8 grid of cells.
//!
//! This crate provides:
//! - [`Board`] - the grid, with a text layout format for arranging positions
//! - [`movegen`] - per-piece destination generation, castling tokens included
//! - [`rules`] - check detection and checkmate/stalemate classification
//! - [`Game`] - the rule engine: validates requests, applies them, tracks turns
//! - [`EngineConfig`] - turn order and self-check policy, loadable from TOML
//!
//! # Architecture
//!
//! Cells are `Option<Piece>` in a `[rank][file]` array. Generation is
//! pseudo-legal by default: a move may leave its own king attacked, with the
//! single exception that kings never step next to each other. Setting
//! [`SelfCheckPolicy::Forbidden`] filters such moves by playing each one on
//! a copy of the board.
//!
//! # Example
//!
//! ```
//! use chess_rules::{Game, MoveOutcome};
//! use chess_core::{PieceKind, Position};
//!
//! let mut game = Game::new();
//! let outcome = game
//!     .attempt_move(Position::new(4, 1), Position::new(4, 3), None)
//!     .unwrap();
//! assert!(outcome.is_applied());
//!
//! // Black to move; the g8 knight has two destinations
//! let destinations = game.legal_destinations(Position::new(6, 7));
//! assert_eq!(destinations.len(), 2);
//!
//! // A promotion kind on an ordinary move is ignored
//! match game.attempt_move(Position::new(0, 6), Position::new(0, 4), Some(PieceKind::Queen)) {
//!     Ok(MoveOutcome::Applied(applied)) => println!("{applied}"),
//!     other => panic!("unexpected: {other:?}"),
//! }
//! ```

mod board;
mod config;
mod error;
mod game;
pub mod movegen;
pub mod rules;

pub use board::{Board, Cell};
pub use config::{ConfigError, EngineConfig, SelfCheckPolicy, TurnOrder};
pub use error::EngineError;
pub use game::{Game, GameState, MoveOutcome, RejectReason};
pub use movegen::{destinations, DestinationList};
pub use rules::{AppliedMove, GameResult, MoveKind};
