//! Cli Chess Engine error type.
//!
//! Every error in this crate is a rule violation signal, never a system fault.
//! Piece errors come from a piece rejecting a move, board errors from a
//! structural violation of board invariants.

use std::error;
use std::fmt::{self, Display};
use std::result;

/// Cli Chess Engine generic result type.
pub type Result<T> = result::Result<T, Error>;

/// A list specifying the general errors of the engine.
#[derive(Debug, Copy, Clone, Eq, PartialEq, Hash, Ord, PartialOrd)]
#[non_exhaustive]
pub enum ErrorKind {
    /// A piece attempted to capture a piece of its own color.
    AllyAttack,
    /// Direction is not one of the piece's allowed directions.
    InvalidMoveDirection,
    /// Distance is outside of what the piece may travel.
    InvalidMoveDistance,
    /// An occupied square lies on the path of a sliding piece.
    BlockedMove,
    /// Path is not aligned, or the destination shape or safety is violated.
    InvalidMovePath,

    /// Direction requested for a zero length vector.
    IndeterminateDirection,
    /// Coordinates of a position must not be negative.
    PositionOutOfRange,
    /// Two positions do not share a straight or diagonal line.
    PositionsNotAligned,

    /// Position lies outside of the playable 8x8 area.
    BoardOffBoard,
    /// Piece cannot be added to an occupied square.
    BoardSquareOccupied,
    /// There is no piece on the square.
    BoardSquareEmpty,
    /// Square holds a different piece than the one given.
    BoardPieceMismatch,
    /// Piece moved out of turn.
    BoardWrongTurn,
    /// Start and end positions of a move are the same.
    BoardSamePosition,
}

impl ErrorKind {
    pub fn as_str(&self) -> &'static str {
        match self {
            ErrorKind::AllyAttack => "ally attack",
            ErrorKind::InvalidMoveDirection => "invalid move direction",
            ErrorKind::InvalidMoveDistance => "invalid move distance",
            ErrorKind::BlockedMove => "blocked move",
            ErrorKind::InvalidMovePath => "invalid move path",

            ErrorKind::IndeterminateDirection => "indeterminate direction",
            ErrorKind::PositionOutOfRange => "position out of range",
            ErrorKind::PositionsNotAligned => "positions not aligned",

            ErrorKind::BoardOffBoard => "board off board",
            ErrorKind::BoardSquareOccupied => "board square occupied",
            ErrorKind::BoardSquareEmpty => "board square empty",
            ErrorKind::BoardPieceMismatch => "board piece mismatch",
            ErrorKind::BoardWrongTurn => "board wrong turn",
            ErrorKind::BoardSamePosition => "board same position",
        }
    }

    /// Returns true for the kinds raised by a piece rejecting a move.
    pub fn is_piece_error(&self) -> bool {
        use ErrorKind::*;
        matches!(
            self,
            AllyAttack | InvalidMoveDirection | InvalidMoveDistance | BlockedMove | InvalidMovePath
        )
    }

    /// Returns true for the structural board violations.
    pub fn is_board_error(&self) -> bool {
        use ErrorKind::*;
        matches!(
            self,
            BoardOffBoard
                | BoardSquareOccupied
                | BoardSquareEmpty
                | BoardPieceMismatch
                | BoardWrongTurn
                | BoardSamePosition
        )
    }
}

impl Display for ErrorKind {
    fn fmt(&self, f: &mut fmt::Formatter) -> fmt::Result {
        write!(f, "{}", self.as_str())
    }
}

/// The primary and general error type for the engine.
#[derive(Debug, Clone, Eq, PartialEq)]
pub enum Error {
    Simple(ErrorKind),
    Message(ErrorKind, String),
}

impl Error {
    /// Returns the kind of this error.
    pub fn kind(&self) -> ErrorKind {
        match self {
            Error::Simple(error_kind) | Error::Message(error_kind, _) => *error_kind,
        }
    }
}

impl Display for Error {
    fn fmt(&self, f: &mut fmt::Formatter) -> fmt::Result {
        match self {
            Error::Simple(error_kind) => {
                write!(f, "{error_kind}")
            }
            Error::Message(error_kind, string) => {
                write!(f, "{error_kind}: {string}")
            }
        }
    }
}

impl error::Error for Error {}

impl From<ErrorKind> for Error {
    fn from(error_kind: ErrorKind) -> Self {
        Self::Simple(error_kind)
    }
}

impl<S: ToString> From<(ErrorKind, S)> for Error {
    fn from((error_kind, stringable): (ErrorKind, S)) -> Self {
        Self::Message(error_kind, stringable.to_string())
    }
}
