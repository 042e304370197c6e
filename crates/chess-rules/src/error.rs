//! Engine error type.
//!
//! Illegal moves are not errors: they come back as
//! [`MoveOutcome::Rejected`](crate::MoveOutcome::Rejected). An error means the
//! caller handed the engine input it can never accept.

use chess_core::{LayoutError, Position};
use thiserror::Error;

/// Errors returned by [`Game`](crate::Game) operations.
#[derive(Debug, Error, PartialEq, Eq)]
pub enum EngineError {
    /// A move named a position outside the board.
    #[error("position {0} is off the board")]
    OffBoard(Position),

    /// A board layout could not be parsed.
    #[error(transparent)]
    Layout(#[from] LayoutError),
}
