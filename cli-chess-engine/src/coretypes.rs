//! The fundamental and simple types of `cli_chess_engine`.

use std::convert::TryFrom;
use std::fmt::{self, Display};
use std::ops::{Add, Mul, Neg, Not};

use crate::error::{self, ErrorKind};

///////////////
// Constants //
///////////////
pub const BOARD_SIZE: u8 = 8;
/// Largest coordinate of the playable area, on both axes.
pub const MAX_COORD: u8 = BOARD_SIZE - 1;
pub const NUM_COLORS: usize = 2;
pub const NUM_DIRECTIONS: usize = 8;

/// Sliding pieces may cross the whole board.
pub const SLIDER_MAX_DISTANCE: u32 = 8;
/// A knight always travels exactly 3 squares under the difficult metric.
pub const KNIGHT_DISTANCE: u32 = 3;

// A queen in the middle of an empty board reaches 27 squares.
// Rounded up, this bounds the destinations of any piece.
pub const MAX_DESTINATIONS: usize = 32;

/////////////////////////
// Data and Structures //
/////////////////////////

/// Color can represent the color of a piece, or a player.
/// Discriminants are used to index per color storage.
#[derive(Debug, Copy, Clone, Eq, PartialEq, Hash)]
pub enum Color {
    White = 0,
    Black = 1,
}

/// Integer displacement between two board coordinates.
/// The y axis grows downward, in the order rows are displayed.
#[derive(Debug, Copy, Clone, Eq, PartialEq, Hash, Default)]
pub struct Vector {
    pub dx: i32,
    pub dy: i32,
}

/// The 8 compass directions.
/// Enum variant discriminants are bit positions in a DirectionSet.
#[derive(Debug, Copy, Clone, Eq, PartialEq, Hash, Ord, PartialOrd)]
#[repr(u8)]
pub enum Direction {
    Up,
    Down,
    Left,
    Right,
    UpLeft,
    UpRight,
    DownLeft,
    DownRight,
}

/// A set of Directions, stored as a bit mask.
#[derive(Debug, Copy, Clone, Eq, PartialEq, Hash, Default)]
pub struct DirectionSet(u8);

impl DirectionSet {
    pub const EMPTY: DirectionSet = DirectionSet(0);
    pub const DIRECT: DirectionSet = DirectionSet(0b0000_1111);
    pub const DIAGONAL: DirectionSet = DirectionSet(0b1111_0000);
    pub const ALL: DirectionSet = DirectionSet(Self::DIRECT.0 | Self::DIAGONAL.0);
    /// White pawns advance down the board, black pawns up.
    pub const WHITE_PAWN: DirectionSet = DirectionSet(
        Direction::Down.bit() | Direction::DownLeft.bit() | Direction::DownRight.bit(),
    );
    pub const BLACK_PAWN: DirectionSet =
        DirectionSet(Direction::Up.bit() | Direction::UpLeft.bit() | Direction::UpRight.bit());
}

//////////////////////
/// Implementations //
//////////////////////

impl Color {
    pub const ALL: [Color; NUM_COLORS] = [Color::White, Color::Black];

    pub const fn opposite(&self) -> Color {
        match self {
            Color::White => Color::Black,
            Color::Black => Color::White,
        }
    }

    pub fn iter() -> impl Iterator<Item = Color> {
        Self::ALL.into_iter()
    }

    pub const fn as_str(&self) -> &'static str {
        match self {
            Color::White => "White",
            Color::Black => "Black",
        }
    }
}

impl Not for Color {
    type Output = Self;
    fn not(self) -> Self::Output {
        self.opposite()
    }
}

impl Not for &Color {
    type Output = Color;
    fn not(self) -> Self::Output {
        self.opposite()
    }
}

impl Display for Color {
    fn fmt(&self, f: &mut fmt::Formatter) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl Vector {
    pub const ZERO: Vector = Vector::new(0, 0);

    pub const fn new(dx: i32, dy: i32) -> Self {
        Self { dx, dy }
    }

    /// Manhattan length, |dx| + |dy|.
    /// A diagonal step therefore has a magnitude of 2.
    pub const fn magnitude(&self) -> u32 {
        self.dx.unsigned_abs() + self.dy.unsigned_abs()
    }

    /// Polar angle of the vector in degrees, `atan2(dx, dy)`.
    pub fn angle(&self) -> f64 {
        f64::from(self.dx).atan2(f64::from(self.dy)).to_degrees()
    }

    /// Returns true if the vector lies on a straight or diagonal line,
    /// at 0, 45, 90, 135 or 180 degrees to an axis.
    pub const fn is_aligned(&self) -> bool {
        self.dx == 0 || self.dy == 0 || self.dx.unsigned_abs() == self.dy.unsigned_abs()
    }

    pub const fn is_zero(&self) -> bool {
        self.dx == 0 && self.dy == 0
    }
}

impl Add for Vector {
    type Output = Self;
    fn add(self, rhs: Self) -> Self::Output {
        Self::new(self.dx + rhs.dx, self.dy + rhs.dy)
    }
}

impl Neg for Vector {
    type Output = Self;
    fn neg(self) -> Self::Output {
        Self::new(-self.dx, -self.dy)
    }
}

impl Mul<i32> for Vector {
    type Output = Self;
    fn mul(self, rhs: i32) -> Self::Output {
        Self::new(self.dx * rhs, self.dy * rhs)
    }
}

impl Display for Vector {
    fn fmt(&self, f: &mut fmt::Formatter) -> fmt::Result {
        write!(f, "({}, {})", self.dx, self.dy)
    }
}

impl Direction {
    pub const ALL: [Direction; NUM_DIRECTIONS] = [
        Direction::Up,
        Direction::Down,
        Direction::Left,
        Direction::Right,
        Direction::UpLeft,
        Direction::UpRight,
        Direction::DownLeft,
        Direction::DownRight,
    ];
    pub const DIRECT: [Direction; 4] = [
        Direction::Up,
        Direction::Down,
        Direction::Left,
        Direction::Right,
    ];
    pub const DIAGONAL: [Direction; 4] = [
        Direction::UpLeft,
        Direction::UpRight,
        Direction::DownLeft,
        Direction::DownRight,
    ];

    /// Unit vector of the direction.
    pub const fn vector(&self) -> Vector {
        use Direction::*;
        match self {
            Up => Vector::new(0, -1),
            Down => Vector::new(0, 1),
            Left => Vector::new(-1, 0),
            Right => Vector::new(1, 0),
            UpLeft => Vector::new(-1, -1),
            UpRight => Vector::new(1, -1),
            DownLeft => Vector::new(-1, 1),
            DownRight => Vector::new(1, 1),
        }
    }

    pub const fn is_direct(&self) -> bool {
        use Direction::*;
        matches!(self, Up | Down | Left | Right)
    }

    pub const fn is_diagonal(&self) -> bool {
        !self.is_direct()
    }

    /// Maps any nonzero vector onto the direction of its signs.
    /// A vector that is not aligned still has a direction, e.g. (-1, -2) is UpLeft.
    pub fn from_vector(vector: Vector) -> error::Result<Self> {
        use Direction::*;
        match (vector.dx.signum(), vector.dy.signum()) {
            (0, -1) => Ok(Up),
            (0, 1) => Ok(Down),
            (-1, 0) => Ok(Left),
            (1, 0) => Ok(Right),
            (-1, -1) => Ok(UpLeft),
            (1, -1) => Ok(UpRight),
            (-1, 1) => Ok(DownLeft),
            (1, 1) => Ok(DownRight),
            _ => Err((
                ErrorKind::IndeterminateDirection,
                "zero vector has no direction",
            )
                .into()),
        }
    }

    const fn bit(&self) -> u8 {
        1u8 << *self as u8
    }

    pub const fn as_str(&self) -> &'static str {
        use Direction::*;
        match self {
            Up => "UP",
            Down => "DOWN",
            Left => "LEFT",
            Right => "RIGHT",
            UpLeft => "UP LEFT",
            UpRight => "UP RIGHT",
            DownLeft => "DOWN LEFT",
            DownRight => "DOWN RIGHT",
        }
    }
}

impl TryFrom<Vector> for Direction {
    type Error = error::Error;
    fn try_from(vector: Vector) -> error::Result<Self> {
        Self::from_vector(vector)
    }
}

impl Display for Direction {
    fn fmt(&self, f: &mut fmt::Formatter) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl DirectionSet {
    pub const fn is_empty(&self) -> bool {
        self.0 == 0
    }

    pub const fn len(&self) -> usize {
        self.0.count_ones() as usize
    }

    pub const fn contains(&self, direction: Direction) -> bool {
        self.0 & direction.bit() != 0
    }

    pub fn insert(&mut self, direction: Direction) {
        self.0 |= direction.bit();
    }

    pub fn remove(&mut self, direction: Direction) {
        self.0 &= !direction.bit();
    }

    pub const fn intersection(&self, other: DirectionSet) -> DirectionSet {
        DirectionSet(self.0 & other.0)
    }

    /// Iterates over contained directions in `Direction::ALL` order.
    pub fn iter(&self) -> impl Iterator<Item = Direction> {
        let bits = self.0;
        Direction::ALL
            .into_iter()
            .filter(move |direction| bits & direction.bit() != 0)
    }
}

impl<const N: usize> From<[Direction; N]> for DirectionSet {
    fn from(directions: [Direction; N]) -> Self {
        directions.into_iter().collect()
    }
}

impl FromIterator<Direction> for DirectionSet {
    fn from_iter<T: IntoIterator<Item = Direction>>(iter: T) -> Self {
        let mut set = DirectionSet::EMPTY;
        for direction in iter {
            set.insert(direction);
        }
        set
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use Direction::*;

    #[test]
    fn logical_not_color() {
        assert_eq!(!Color::White, Color::Black);
        assert_eq!(!Color::Black, Color::White);
        assert_eq!(Color::White.opposite(), Color::Black);
    }

    #[test]
    fn vector_magnitude_is_manhattan() {
        assert_eq!(Vector::new(0, 0).magnitude(), 0);
        assert_eq!(Vector::new(-1, 2).magnitude(), 3);
        assert_eq!(Vector::new(3, -3).magnitude(), 6);
        assert_eq!(Vector::new(0, -7).magnitude(), 7);
    }

    #[test]
    fn vector_angle() {
        assert!((Vector::new(0, 1).angle() - 0.0).abs() < 1e-9);
        assert!((Vector::new(1, 0).angle() - 90.0).abs() < 1e-9);
        assert!((Vector::new(1, 1).angle() - 45.0).abs() < 1e-9);
        assert!((Vector::new(-1, -1).angle() + 135.0).abs() < 1e-9);
        assert!((Vector::new(0, -2).angle() - 180.0).abs() < 1e-9);
    }

    #[test]
    fn vector_alignment() {
        assert!(Vector::new(0, 5).is_aligned());
        assert!(Vector::new(-4, 0).is_aligned());
        assert!(Vector::new(-3, 3).is_aligned());
        assert!(!Vector::new(1, 2).is_aligned());
        assert!(!Vector::new(1, 3).is_aligned());
    }

    #[test]
    fn direction_round_trips_through_vector() {
        for direction in Direction::ALL {
            assert_eq!(Direction::from_vector(direction.vector()).unwrap(), direction);
        }
    }

    #[test]
    fn direction_from_unaligned_vector_uses_signs() {
        assert_eq!(Direction::from_vector(Vector::new(-1, -2)).unwrap(), UpLeft);
        assert_eq!(Direction::from_vector(Vector::new(2, 1)).unwrap(), DownRight);
        assert_eq!(Direction::from_vector(Vector::new(0, 6)).unwrap(), Down);
    }

    #[test]
    fn direction_of_zero_vector_fails() {
        let error = Direction::from_vector(Vector::ZERO).unwrap_err();
        assert_eq!(error.kind(), ErrorKind::IndeterminateDirection);
    }

    #[test]
    fn direct_and_diagonal_partition_all() {
        for direction in Direction::DIRECT {
            assert!(direction.is_direct());
            assert!(DirectionSet::DIRECT.contains(direction));
            assert!(!DirectionSet::DIAGONAL.contains(direction));
        }
        for direction in Direction::DIAGONAL {
            assert!(direction.is_diagonal());
            assert!(DirectionSet::DIAGONAL.contains(direction));
            assert!(!DirectionSet::DIRECT.contains(direction));
        }
        assert_eq!(DirectionSet::ALL.len(), NUM_DIRECTIONS);
    }

    #[test]
    fn direction_set_operations() {
        let mut set = DirectionSet::from([Up, DownLeft]);
        assert!(set.contains(Up));
        assert!(set.contains(DownLeft));
        assert!(!set.contains(Down));

        set.insert(Down);
        set.remove(Up);
        assert_eq!(set.iter().collect::<Vec<_>>(), vec![Down, DownLeft]);

        let common = set.intersection(DirectionSet::DIRECT);
        assert_eq!(common, DirectionSet::from([Down]));
        assert!(DirectionSet::EMPTY.is_empty());
        assert!(DirectionSet::ALL.intersection(DirectionSet::EMPTY).is_empty());
    }

    #[test]
    fn direction_display() {
        assert_eq!(DownRight.to_string(), "DOWN RIGHT");
        assert_eq!(Up.to_string(), "UP");
    }
}
