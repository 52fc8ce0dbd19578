//! Rules engine for a two player chess game.
//!
//! Answers whether a piece may move from one square to another, applies
//! accepted moves to a `Board`, and infers check, checkmate and stalemate.
//!
//! Coordinates are `(x, y)` with `(0, 0)` in the top left corner and rows
//! growing downward. White starts on rows 0 and 1.

pub mod board;
mod checkmate;
pub mod coretypes;
pub mod error;
pub mod movelist;
pub mod pieces;
pub mod position;

pub use board::{Board, MoveOutcome};
pub use coretypes::{Color, Direction, DirectionSet, Vector};
pub use error::{Error, ErrorKind};
pub use pieces::{Piece, PieceKind};
pub use position::Position;
