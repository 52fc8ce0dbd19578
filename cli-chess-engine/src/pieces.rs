//! Chess pieces and their movement rules.
//!
//! Every piece validates a move with the same chain of predicates:
//! attack, direction, distance, then path. Each predicate returns a
//! `Result` carrying the rule that was violated. Probing code that only
//! needs a yes or no answer uses `Piece::can_move`.
//!
//! Pawn, Knight and King override parts of the chain. Rook, Bishop and Queen
//! only differ in their allowed directions.

use std::fmt::{self, Display};
use std::hash::{Hash, Hasher};
use std::sync::atomic::{AtomicU32, Ordering};

use crate::board::Board;
use crate::coretypes::{Color, Direction, DirectionSet, Vector};
use crate::coretypes::{KNIGHT_DISTANCE, SLIDER_MAX_DISTANCE};
use crate::error::{self, ErrorKind};
use crate::movelist::Destinations;
use crate::position::Position;

static NEXT_PIECE_ID: AtomicU32 = AtomicU32::new(0);

/// Identity of a piece instance.
/// Two pieces of the same color and kind are still different pieces.
#[derive(Debug, Copy, Clone, Eq, PartialEq, Hash, Ord, PartialOrd)]
pub struct PieceId(u32);

#[derive(Debug, Copy, Clone, Eq, PartialEq, Hash)]
pub enum PieceKind {
    Pawn,
    Rook,
    Knight,
    Bishop,
    Queen,
    King,
}

/// A chess piece. Color is fixed at construction.
/// Cloning keeps the identity, a clone is the same piece.
/// Equality and hashing look at the identity only.
#[derive(Debug, Clone)]
pub struct Piece {
    id: PieceId,
    color: Color,
    kind: PieceKind,
    moved: bool,
}

impl PieceKind {
    pub const fn as_str(&self) -> &'static str {
        match self {
            PieceKind::Pawn => "Pawn",
            PieceKind::Rook => "Rook",
            PieceKind::Knight => "Knight",
            PieceKind::Bishop => "Bishop",
            PieceKind::Queen => "Queen",
            PieceKind::King => "King",
        }
    }

    /// Character of a white piece.
    pub const fn to_char(&self) -> char {
        match self {
            PieceKind::Pawn => 'P',
            PieceKind::Rook => 'R',
            PieceKind::Knight => 'N',
            PieceKind::Bishop => 'B',
            PieceKind::Queen => 'Q',
            PieceKind::King => 'K',
        }
    }
}

impl PartialEq for Piece {
    fn eq(&self, other: &Self) -> bool {
        self.id == other.id
    }
}

impl Eq for Piece {}

impl Hash for Piece {
    fn hash<H: Hasher>(&self, state: &mut H) {
        self.id.hash(state);
    }
}

impl Display for PieceKind {
    fn fmt(&self, f: &mut fmt::Formatter) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl Piece {
    pub fn new(color: Color, kind: PieceKind) -> Self {
        Self {
            id: PieceId(NEXT_PIECE_ID.fetch_add(1, Ordering::Relaxed)),
            color,
            kind,
            moved: false,
        }
    }

    /// Immutable Getters.
    pub const fn id(&self) -> PieceId {
        self.id
    }
    pub const fn color(&self) -> Color {
        self.color
    }
    pub const fn kind(&self) -> PieceKind {
        self.kind
    }
    pub const fn name(&self) -> &'static str {
        self.kind.as_str()
    }

    pub const fn to_char(&self) -> char {
        match self.color {
            Color::White => self.kind.to_char(),
            Color::Black => self.kind.to_char().to_ascii_lowercase(),
        }
    }

    pub fn is_ally(&self, other: &Piece) -> bool {
        self.color == other.color
    }

    /// Directions the piece may ever travel in.
    /// White pawns advance DOWN, black pawns advance UP.
    pub const fn allowed_move_directions(&self) -> DirectionSet {
        match self.kind {
            PieceKind::Pawn => match self.color {
                Color::White => DirectionSet::WHITE_PAWN,
                Color::Black => DirectionSet::BLACK_PAWN,
            },
            PieceKind::Rook => DirectionSet::DIRECT,
            PieceKind::Knight | PieceKind::Bishop => DirectionSet::DIAGONAL,
            PieceKind::Queen | PieceKind::King => DirectionSet::ALL,
        }
    }

    /// Greatest number of squares the piece travels in one move.
    /// The knight value is its fixed distance under the difficult metric.
    pub const fn max_move_count(&self) -> u32 {
        match self.kind {
            PieceKind::Pawn | PieceKind::King => 1,
            PieceKind::Knight => KNIGHT_DISTANCE,
            PieceKind::Rook | PieceKind::Bishop | PieceKind::Queen => SLIDER_MAX_DISTANCE,
        }
    }

    /// Squares to enumerate along a direction. Unmoved pawns may double step.
    const fn reach(&self) -> u32 {
        match self.kind {
            PieceKind::Pawn if !self.moved => 2,
            _ => self.max_move_count(),
        }
    }

    /// Only meaningful for pawns.
    pub const fn is_moved(&self) -> bool {
        self.moved
    }

    /// Marks the first move of a pawn as done. Called by the board.
    pub fn do_first_move(&mut self) {
        self.moved = true;
    }

    /// Checks whether the piece may capture `target`.
    pub fn check_attack(&self, target: &Piece) -> error::Result<()> {
        if self.is_ally(target) {
            return Err((
                ErrorKind::AllyAttack,
                format!("{self} cannot attack ally {target}"),
            )
                .into());
        }
        Ok(())
    }

    /// Checks whether the piece may travel in a direction.
    /// Pawns move straight and attack diagonally, never the other way around.
    pub fn check_move_in_direction(&self, direction: Direction, is_attack: bool) -> error::Result<()> {
        let mut allowed = self.allowed_move_directions().contains(direction);
        if self.kind == PieceKind::Pawn {
            allowed &= direction.is_diagonal() == is_attack;
        }

        match allowed {
            true => Ok(()),
            false => Err((
                ErrorKind::InvalidMoveDirection,
                format!("{} cannot move in the {direction} direction", self.name()),
            )
                .into()),
        }
    }

    /// Checks whether the piece may travel `distance` squares.
    pub fn check_move_distance(&self, distance: u32, is_attack: bool) -> error::Result<()> {
        let allowed = match self.kind {
            PieceKind::Knight => distance == KNIGHT_DISTANCE,
            PieceKind::Pawn if distance == 2 && !self.moved && !is_attack => true,
            _ => (1..=self.max_move_count()).contains(&distance),
        };

        match allowed {
            true => Ok(()),
            false => Err((
                ErrorKind::InvalidMoveDistance,
                format!(
                    "{} cannot move {distance} squares, max is {}",
                    self.name(),
                    self.max_move_count()
                ),
            )
                .into()),
        }
    }

    /// Checks whether the piece can get from `start` to `end` on `board`.
    pub fn check_path(&self, start: Position, end: Position, board: &Board) -> error::Result<()> {
        match self.kind {
            PieceKind::Knight => self.check_knight_path(start, end),
            PieceKind::King => self.check_king_path(end, board),
            _ => self.check_ray_path(start, end, board),
        }
    }

    /// Validates the move of this piece from `start` to `end`.
    /// `attacked` is the piece standing on `end`, if any.
    /// Checks run in order and stop at the first violated rule.
    pub fn check(
        &self,
        start: Position,
        end: Position,
        board: &Board,
        attacked: Option<&Piece>,
    ) -> error::Result<()> {
        self.check_geometry(start, end, attacked)?;
        self.check_path(start, end, board)
    }

    /// Like `check`, discarding which rule rejected the move.
    pub fn can_move(
        &self,
        start: Position,
        end: Position,
        board: &Board,
        attacked: Option<&Piece>,
    ) -> bool {
        self.check(start, end, board, attacked).is_ok()
    }

    /// Returns true if the piece has no legal destination from `start`.
    pub fn is_in_stalemate(&self, start: Position, board: &Board) -> bool {
        !self
            .candidate_destinations(start, board)
            .into_iter()
            .any(|end| self.can_move(start, end, board, board.piece_at(end)))
    }

    /// Every on-board square the piece could geometrically reach from `start`,
    /// ignoring occupancy.
    pub fn candidate_destinations(&self, start: Position, board: &Board) -> Destinations {
        let mut destinations = Destinations::new();
        let directions = board
            .get_possible_directions(start, self)
            .unwrap_or_default();

        for direction in directions.iter() {
            if self.kind == PieceKind::Knight {
                for offset in knight_offsets(direction) {
                    if let Ok(end) = start.offset(offset) {
                        if board.is_on_board(end) {
                            destinations.push(end);
                        }
                    }
                }
                continue;
            }

            for distance in 1..=self.reach() as i32 {
                match start.offset(direction.vector() * distance) {
                    Ok(end) if board.is_on_board(end) => destinations.push(end),
                    _ => break,
                }
            }
        }
        destinations
    }

    /// Destinations from `start` that pass every rule on the current board.
    pub fn legal_destinations(&self, start: Position, board: &Board) -> Destinations {
        self.candidate_destinations(start, board)
            .into_iter()
            .filter(|&end| self.can_move(start, end, board, board.piece_at(end)))
            .collect()
    }

    /// Attack, direction and distance rules, without looking at the path.
    /// Knights measure their distance with the difficult metric.
    pub(crate) fn check_geometry(
        &self,
        start: Position,
        end: Position,
        attacked: Option<&Piece>,
    ) -> error::Result<()> {
        let is_attack = attacked.is_some();
        if let Some(target) = attacked {
            self.check_attack(target)?;
        }

        let direction = start.direction_to(end)?;
        self.check_move_in_direction(direction, is_attack)?;

        let distance = match self.kind {
            PieceKind::Knight => start.difficult_distance_to(end),
            _ => start.distance_to(end),
        }
        .map_err(|_| self.unreachable(start, end))?;
        self.check_move_distance(distance, is_attack)
    }

    /// Walks the squares between `start` and `end`, any occupant blocks
    /// unless the ray continues through a king it is checking.
    fn check_ray_path(&self, start: Position, end: Position, board: &Board) -> error::Result<()> {
        let between = start
            .range_between(end)
            .map_err(|_| self.unreachable(start, end))?;

        for square in between {
            if let Some(occupant) = board.piece_at(square) {
                if !self.sees_through_king(occupant, square, start, end, board) {
                    return Err((
                        ErrorKind::BlockedMove,
                        format!("{} cannot move through another chess piece at {square}", self.name()),
                    )
                        .into());
                }
            }
        }
        Ok(())
    }

    /// An enemy king one square before `end` does not block this piece
    /// when this piece is checking that king. The king cannot escape by
    /// stepping further along the attack line.
    ///
    /// This asks the king, which asks this piece back about the king's own
    /// square. That inner walk ends before the king, so it never returns here.
    fn sees_through_king(
        &self,
        occupant: &Piece,
        square: Position,
        start: Position,
        end: Position,
        board: &Board,
    ) -> bool {
        let is_last_square = start
            .direction_to(end)
            .map_or(false, |direction| end - square == direction.vector());

        occupant.kind == PieceKind::King
            && !self.is_ally(occupant)
            && is_last_square
            && occupant.is_in_check(square, start, self, board)
    }

    /// A knight jumps, only the shape of the move matters.
    fn check_knight_path(&self, start: Position, end: Position) -> error::Result<()> {
        let direction = start.direction_to(end)?;
        let reached = direction.is_diagonal()
            && knight_offsets(direction)
                .into_iter()
                .any(|offset| start.offset(offset).map_or(false, |pos| pos == end));

        match reached {
            true => Ok(()),
            false => Err(self.unreachable(start, end)),
        }
    }

    /// A king may not step onto a square any enemy piece attacks.
    /// An enemy standing on `end` is captured, not asked.
    fn check_king_path(&self, end: Position, board: &Board) -> error::Result<()> {
        let covered = board
            .pieces_of(self.color.opposite())
            .filter(|&(enemy_pos, _)| enemy_pos != end)
            .any(|(enemy_pos, enemy)| match enemy.kind {
                // Kings cover their neighbors by shape alone, otherwise
                // two kings would keep asking each other.
                PieceKind::King => enemy.check_geometry(enemy_pos, end, Some(self)).is_ok(),
                _ => enemy.can_move(enemy_pos, end, board, Some(self)),
            });

        match covered {
            false => Ok(()),
            true => Err((
                ErrorKind::InvalidMovePath,
                format!(
                    "King cannot move to {end}, it is on the attack line of an enemy chess piece"
                ),
            )
                .into()),
        }
    }

    fn unreachable(&self, start: Position, end: Position) -> error::Error {
        (
            ErrorKind::InvalidMovePath,
            format!("{} cannot get from start({start}) to end({end}) position", self.name()),
        )
            .into()
    }
}

/// The two L-shaped jumps inside a diagonal quadrant.
fn knight_offsets(direction: Direction) -> [Vector; 2] {
    let unit = direction.vector();
    [
        Vector::new(unit.dx * 2, unit.dy),
        Vector::new(unit.dx, unit.dy * 2),
    ]
}

impl Display for Piece {
    fn fmt(&self, f: &mut fmt::Formatter) -> fmt::Result {
        write!(f, "{} {}", self.color, self.name())
    }
}
