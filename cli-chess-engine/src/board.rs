//! Board, the placement of pieces on an 8x8 grid and the side to move.
//!
//! Board never decides whether a move is legal by itself, the moving piece
//! does. Board validates placements, applies accepted moves, and answers
//! whole board questions such as check, checkmate and stalemate.

use std::collections::HashMap;
use std::fmt::{self, Display};

use log::{debug, info};

use crate::coretypes::{Color, Direction, DirectionSet, BOARD_SIZE, MAX_COORD, NUM_COLORS};
use crate::error::{self, ErrorKind};
use crate::movelist::Destinations;
use crate::pieces::{Piece, PieceKind};
use crate::position::Position;

/// Result of a successful `Board::move_piece`.
#[derive(Debug, Clone, Eq, PartialEq)]
pub struct MoveOutcome {
    pub start: Position,
    pub end: Position,
    /// Kind of the piece that moved.
    pub kind: PieceKind,
    /// Piece removed from `end`, if any.
    pub captured: Option<Piece>,
}

/// Pieces are kept per color, keyed by their position.
/// A position holds at most one piece across both colors.
#[derive(Debug, Clone)]
pub struct Board {
    pieces: [HashMap<Position, Piece>; NUM_COLORS],
    side_to_move: Color,
    limit: Position,
}

impl Board {
    /// Returns an empty board with White to move.
    pub fn new() -> Self {
        Self {
            pieces: [HashMap::new(), HashMap::new()],
            side_to_move: Color::White,
            limit: Position::new(MAX_COORD, MAX_COORD),
        }
    }

    /// Returns the standard starting setup.
    /// White occupies rows 0 and 1 and advances down the board,
    /// Black occupies rows 6 and 7 and advances up.
    pub fn start_position() -> Self {
        use PieceKind::*;
        const BACK_RANK: [PieceKind; BOARD_SIZE as usize] =
            [Rook, Knight, Bishop, Queen, King, Bishop, Knight, Rook];

        let mut board = Self::new();
        for (x, kind) in (0..BOARD_SIZE).zip(BACK_RANK) {
            board.place(Color::White, kind, Position::new(x, 0));
            board.place(Color::White, Pawn, Position::new(x, 1));
            board.place(Color::Black, Pawn, Position::new(x, MAX_COORD - 1));
            board.place(Color::Black, kind, Position::new(x, MAX_COORD));
        }
        board
    }

    fn place(&mut self, color: Color, kind: PieceKind, position: Position) {
        self.pieces[color as usize].insert(position, Piece::new(color, kind));
    }

    /// Greatest position of the playable area.
    pub const fn limit(&self) -> Position {
        self.limit
    }

    pub const fn side_to_move(&self) -> Color {
        self.side_to_move
    }

    /// Hands the turn over to the other side.
    pub fn pass_move(&mut self) {
        self.side_to_move = !self.side_to_move;
        debug!("{} to move", self.side_to_move);
    }

    pub fn is_on_board(&self, position: Position) -> bool {
        position.x() <= self.limit.x() && position.y() <= self.limit.y()
    }

    pub fn validate_position_on_board(&self, position: Position) -> error::Result<()> {
        match self.is_on_board(position) {
            true => Ok(()),
            false => Err((
                ErrorKind::BoardOffBoard,
                format!(
                    "position {position} is off board, x and y cannot be greater than {}",
                    self.limit.x()
                ),
            )
                .into()),
        }
    }

    /// Returns true if a piece stands on `position`.
    /// With `color` given, the piece must also be of that color.
    pub fn has_piece_at(&self, position: Position, color: Option<Color>) -> bool {
        match color {
            Some(color) => self.pieces[color as usize].contains_key(&position),
            None => self.piece_at(position).is_some(),
        }
    }

    pub fn piece_at(&self, position: Position) -> Option<&Piece> {
        self.pieces
            .iter()
            .find_map(|by_position| by_position.get(&position))
    }

    /// Like `piece_at`, failing for off board or empty squares.
    pub fn get_piece(&self, position: Position) -> error::Result<&Piece> {
        self.validate_position_on_board(position)?;
        self.piece_at(position).ok_or_else(|| {
            (
                ErrorKind::BoardSquareEmpty,
                format!("there is no chess piece on {position}"),
            )
                .into()
        })
    }

    /// Places `piece` on an empty on-board square.
    pub fn add_piece(&mut self, piece: Piece, position: Position) -> error::Result<()> {
        self.validate_position_on_board(position)?;
        if self.has_piece_at(position, None) {
            return Err((
                ErrorKind::BoardSquareOccupied,
                format!("cannot add the chess piece, position {position} is occupied"),
            )
                .into());
        }
        self.pieces[piece.color() as usize].insert(position, piece);
        Ok(())
    }

    /// Removes and returns `piece` from `position`.
    /// The square must hold this exact piece instance.
    pub fn remove_piece(&mut self, piece: &Piece, position: Position) -> error::Result<Piece> {
        let occupant = self.get_piece(position)?;
        if occupant.id() != piece.id() {
            return Err((
                ErrorKind::BoardPieceMismatch,
                format!("{position} holds {occupant}, not the given {piece}"),
            )
                .into());
        }
        self.pieces[piece.color() as usize]
            .remove(&position)
            .ok_or_else(|| ErrorKind::BoardSquareEmpty.into())
    }

    /// Every piece on the board with its position, in no particular order.
    pub fn pieces(&self) -> impl Iterator<Item = (Position, &Piece)> {
        self.pieces
            .iter()
            .flat_map(|by_position| by_position.iter().map(|(position, piece)| (*position, piece)))
    }

    /// Every piece of `color` with its position, in no particular order.
    pub fn pieces_of(&self, color: Color) -> impl Iterator<Item = (Position, &Piece)> {
        self.pieces[color as usize]
            .iter()
            .map(|(position, piece)| (*position, piece))
    }

    /// Directions `piece` could travel from `position` without leaving the
    /// board immediately, limited to the piece's allowed directions.
    pub fn get_possible_directions(
        &self,
        position: Position,
        piece: &Piece,
    ) -> error::Result<DirectionSet> {
        use Direction::*;
        self.validate_position_on_board(position)?;

        let mut directions = DirectionSet::ALL;
        if position.x() == 0 {
            for direction in [Left, UpLeft, DownLeft] {
                directions.remove(direction);
            }
        } else if position.x() == self.limit.x() {
            for direction in [Right, UpRight, DownRight] {
                directions.remove(direction);
            }
        }
        if position.y() == 0 {
            for direction in [Up, UpLeft, UpRight] {
                directions.remove(direction);
            }
        } else if position.y() == self.limit.y() {
            for direction in [Down, DownLeft, DownRight] {
                directions.remove(direction);
            }
        }

        Ok(directions.intersection(piece.allowed_move_directions()))
    }

    /// Moves the piece on `start` to `end` if the side to move owns it and
    /// the piece accepts the move, capturing any piece on `end`.
    /// The turn is not passed, see `pass_move`.
    pub fn move_piece(&mut self, start: Position, end: Position) -> error::Result<MoveOutcome> {
        if start == end {
            return Err((
                ErrorKind::BoardSamePosition,
                format!("cannot move chess piece, start {start} and end {end} positions match"),
            )
                .into());
        }
        self.validate_position_on_board(end)?;

        let moving = self.get_piece(start)?.clone();
        if moving.color() != self.side_to_move {
            return Err((
                ErrorKind::BoardWrongTurn,
                format!("{moving} cannot move, it is {}'s turn", self.side_to_move),
            )
                .into());
        }

        let attacked = self.piece_at(end).cloned();
        moving.check(start, end, self, attacked.as_ref())?;

        let captured = match attacked {
            Some(target) => Some(self.remove_piece(&target, end)?),
            None => None,
        };
        let mut moved = self.remove_piece(&moving, start)?;
        if moved.kind() == PieceKind::Pawn && !moved.is_moved() {
            moved.do_first_move();
            debug!("{moved} made its first move");
        }
        let kind = moved.kind();
        self.add_piece(moved, end)?;

        match &captured {
            Some(target) => debug!("{moving} {start} -> {end} captures {target}"),
            None => debug!("{moving} {start} -> {end}"),
        }

        Ok(MoveOutcome {
            start,
            end,
            kind,
            captured,
        })
    }

    /// Returns true if no piece of the side to move can move.
    /// A side without pieces is stalemated.
    pub fn check_stalemate(&self) -> bool {
        self.pieces_of(self.side_to_move)
            .all(|(position, piece)| piece.is_in_stalemate(position, self))
    }

    /// Position of the king of `color`, if it is on the board.
    pub fn king_position(&self, color: Color) -> Option<Position> {
        self.pieces_of(color)
            .find(|(_, piece)| piece.kind() == PieceKind::King)
            .map(|(position, _)| position)
    }

    /// Positions of the enemy pieces checking the king of `color`.
    pub fn checkers(&self, color: Color) -> Vec<Position> {
        let Some(king_pos) = self.king_position(color) else {
            return Vec::new();
        };
        let Some(king) = self.piece_at(king_pos) else {
            return Vec::new();
        };

        let mut checkers: Vec<Position> = self
            .pieces_of(!color)
            .filter(|(attacker_pos, attacker)| king.is_in_check(king_pos, *attacker_pos, attacker, self))
            .map(|(attacker_pos, _)| attacker_pos)
            .collect();
        checkers.sort();
        checkers
    }

    pub fn is_in_check(&self, color: Color) -> bool {
        !self.checkers(color).is_empty()
    }

    /// Returns true if the king of `color` is checked and cannot escape.
    /// With several checkers, a single mating one is enough.
    pub fn is_in_checkmate(&self, color: Color) -> bool {
        let Some(king_pos) = self.king_position(color) else {
            return false;
        };
        let Some(king) = self.piece_at(king_pos) else {
            return false;
        };
        let checkers = self.checkers(color);

        let mated = !checkers.is_empty()
            && checkers.iter().any(|&attacker_pos| {
                self.piece_at(attacker_pos)
                    .map_or(false, |attacker| king.is_in_checkmate(king_pos, attacker_pos, attacker, self))
            });
        if mated {
            info!("{color} is checkmated");
        }
        mated
    }

    /// Legal destinations of the piece on `position`.
    pub fn legal_destinations(&self, position: Position) -> error::Result<Destinations> {
        let piece = self.get_piece(position)?;
        Ok(piece.legal_destinations(position, self))
    }

    /// Returns pretty-printed chess board representation of Self.
    /// Row 0 is printed first, White pieces are upper case.
    pub fn pretty(&self) -> String {
        const ROW_SEP: &str = "+---+---+---+---+---+---+---+---+\n";
        let mut pretty = String::with_capacity(620);

        pretty.push_str(ROW_SEP);
        for y in 0..BOARD_SIZE {
            pretty.push_str("| ");
            for x in 0..BOARD_SIZE {
                pretty.push(match self.piece_at(Position::new(x, y)) {
                    Some(piece) => piece.to_char(),
                    None => ' ',
                });
                pretty.push_str(" | ");
            }
            pretty.push_str(&y.to_string());
            pretty.push('\n');
            pretty.push_str(ROW_SEP);
        }
        pretty.push_str("  0   1   2   3   4   5   6   7\n");

        pretty
    }
}

impl Default for Board {
    /// default value is that of a standard starting chess position.
    fn default() -> Self {
        Self::start_position()
    }
}

impl Display for Board {
    fn fmt(&self, f: &mut fmt::Formatter) -> fmt::Result {
        write!(f, "{}", self.pretty())
    }
}
