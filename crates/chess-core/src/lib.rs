//! Core types for chess.
//!
//! This crate provides the fundamental types used across the rules engine:
//! - [`Piece`], [`PieceKind`] and [`Color`] for piece representation
//! - [`Position`] and [`Delta`] for board coordinates and offsets
//! - [`MoveRequest`] for move requests
//! - [`Layout`] parsing and serialization of the text board format

mod color;
mod layout;
mod mov;
mod piece;
mod position;

pub use color::Color;
pub use layout::{Layout, LayoutError};
pub use mov::MoveRequest;
pub use piece::{Piece, PieceKind};
pub use position::{Delta, Position, BOARD_SIZE};
