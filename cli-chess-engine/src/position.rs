//! Position, an immutable coordinate of a square.
//!
//! Distances between positions use chess geometry instead of euclidean length.
//! A straight step has a raw magnitude of 1 and a diagonal step has a raw
//! magnitude of 2, so diagonal magnitudes are halved to count squares.

use std::cmp::Ordering;
use std::convert::TryFrom;
use std::fmt::{self, Display};
use std::ops::Sub;

use crate::coretypes::{Direction, Vector};
use crate::error::{self, ErrorKind};

/// A coordinate (x, y) where x is the column and y is the row.
/// Rows grow downward. Positions are ordered row-major, so a greater
/// position is further down, then further right.
#[derive(Debug, Copy, Clone, Eq, PartialEq, Hash)]
pub struct Position {
    x: u8,
    y: u8,
}

impl Position {
    pub const fn new(x: u8, y: u8) -> Self {
        Self { x, y }
    }

    pub const fn x(&self) -> u8 {
        self.x
    }

    pub const fn y(&self) -> u8 {
        self.y
    }

    /// Translates the position by a vector.
    /// Fails if either resulting coordinate is negative.
    pub fn offset(&self, vector: Vector) -> error::Result<Self> {
        Self::try_from((
            i32::from(self.x) + vector.dx,
            i32::from(self.y) + vector.dy,
        ))
    }

    /// Direction of the vector from self to `other`.
    pub fn direction_to(&self, other: Position) -> error::Result<Direction> {
        Direction::from_vector(other - *self)
    }

    /// Number of squares between self and `other` along their direction.
    /// Diagonal magnitudes are halved, and must be even.
    pub fn distance_to(&self, other: Position) -> error::Result<u32> {
        let vector = other - *self;
        let direction = Direction::from_vector(vector)?;
        let magnitude = vector.magnitude();

        if direction.is_direct() {
            Ok(magnitude)
        } else if magnitude % 2 == 0 {
            Ok(magnitude / 2)
        } else {
            Err((
                ErrorKind::PositionsNotAligned,
                format!("{self} and {other} are not on one diagonal"),
            )
                .into())
        }
    }

    /// Raw magnitude to `other`, without halving diagonals.
    /// Used for the L-shaped knight geometry.
    pub fn difficult_distance_to(&self, other: Position) -> error::Result<u32> {
        let vector = other - *self;
        Direction::from_vector(vector)?;
        Ok(vector.magnitude())
    }

    /// Lazily yields every position strictly between self and `other`.
    /// Both positions must be on one straight or diagonal line.
    /// Neighbors have nothing between them.
    pub fn range_between(&self, other: Position) -> error::Result<Between> {
        let vector = other - *self;
        let direction = Direction::from_vector(vector)?;

        if !vector.is_aligned() {
            return Err((
                ErrorKind::PositionsNotAligned,
                format!(
                    "The angle between the vector of two positions and the x or y axis must be one of \
                     the following: 0°, 45°, 90°, 135°, or 180°. Got {:.1}° from {self} to {other}.",
                    vector.angle()
                ),
            )
                .into());
        }

        // Aligned vectors travel the same number of squares on their longest axis.
        let steps = vector.dx.unsigned_abs().max(vector.dy.unsigned_abs());

        Ok(Between {
            next: *self,
            step: direction.vector(),
            remaining: steps - 1,
        })
    }
}

/// Iterator over the positions strictly between two aligned positions.
#[derive(Debug, Clone)]
pub struct Between {
    next: Position,
    step: Vector,
    remaining: u32,
}

impl Iterator for Between {
    type Item = Position;
    fn next(&mut self) -> Option<Self::Item> {
        if self.remaining == 0 {
            return None;
        }
        // Squares strictly between two valid positions are never negative.
        self.next = self.next.offset(self.step).ok()?;
        self.remaining -= 1;
        Some(self.next)
    }

    fn size_hint(&self) -> (usize, Option<usize>) {
        let remaining = self.remaining as usize;
        (remaining, Some(remaining))
    }
}

impl ExactSizeIterator for Between {}

impl Sub for Position {
    type Output = Vector;
    fn sub(self, rhs: Self) -> Self::Output {
        Vector::new(
            i32::from(self.x) - i32::from(rhs.x),
            i32::from(self.y) - i32::from(rhs.y),
        )
    }
}

impl Ord for Position {
    fn cmp(&self, other: &Self) -> Ordering {
        (self.y, self.x).cmp(&(other.y, other.x))
    }
}

impl PartialOrd for Position {
    fn partial_cmp(&self, other: &Self) -> Option<Ordering> {
        Some(self.cmp(other))
    }
}

impl TryFrom<(i32, i32)> for Position {
    type Error = error::Error;
    fn try_from((x, y): (i32, i32)) -> error::Result<Self> {
        match (u8::try_from(x), u8::try_from(y)) {
            (Ok(x), Ok(y)) => Ok(Self::new(x, y)),
            _ => Err((
                ErrorKind::PositionOutOfRange,
                format!("x and y must be greater than or equal to 0, got x:{x}, y:{y}"),
            )
                .into()),
        }
    }
}

impl From<(u8, u8)> for Position {
    fn from((x, y): (u8, u8)) -> Self {
        Self::new(x, y)
    }
}

impl Display for Position {
    fn fmt(&self, f: &mut fmt::Formatter) -> fmt::Result {
        write!(f, "x:{}, y:{}", self.x, self.y)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use Direction::*;

    fn positions(coords: &[(u8, u8)]) -> Vec<Position> {
        coords.iter().map(|&coord| Position::from(coord)).collect()
    }

    #[test]
    fn creating_position() {
        let pos = Position::new(1, 0);
        assert_eq!(pos.x(), 1);
        assert_eq!(pos.y(), 0);

        assert!(Position::try_from((3i32, 4i32)).is_ok());
        let error = Position::try_from((-1i32, 0i32)).unwrap_err();
        assert_eq!(error.kind(), ErrorKind::PositionOutOfRange);
        assert!(Position::try_from((0i32, -3i32)).is_err());
    }

    #[test]
    fn offset_and_subtract() {
        let pos = Position::new(1, 2);
        assert_eq!(pos.offset(Vector::new(2, -1)).unwrap(), Position::new(3, 1));
        assert!(pos.offset(Vector::new(-2, 0)).is_err());
        assert_eq!(Position::new(3, 1) - pos, Vector::new(2, -1));
    }

    #[test]
    fn ordering_is_row_major() {
        let pos = Position::new(1, 3);
        assert!(Position::new(0, 4) > pos);
        assert!(Position::new(2, 3) > pos);
        assert!(Position::new(7, 2) < pos);
        assert!(Position::new(0, 3) < pos);
        assert!(Position::new(1, 3) >= pos);
        assert!(Position::new(1, 3) <= pos);
        assert!(Position::new(8, 7) > Position::new(7, 7));
    }

    /// ```text
    ///    0    1    2   3    4
    /// 0 [UL] [UL] [U] [UR] [UR]
    /// 1 [UL] [UL] [U] [UR] [UR]
    /// 2 [L ] [L ] [#] [R ] [R ]
    /// 3 [DL] [DL] [D] [DR] [DR]
    /// 4 [DL] [DL] [D] [DR] [DR]
    /// ```
    #[test]
    fn direction_to_other_position() {
        let start = Position::new(2, 2);
        let expected = [
            (Up, vec![(2, 0), (2, 1)]),
            (Down, vec![(2, 3), (2, 4)]),
            (Left, vec![(1, 2), (0, 2)]),
            (Right, vec![(3, 2), (4, 2)]),
            (UpLeft, vec![(0, 0), (1, 0), (0, 1), (1, 1)]),
            (UpRight, vec![(3, 0), (4, 0), (3, 1), (4, 1)]),
            (DownLeft, vec![(0, 3), (1, 3), (0, 4), (1, 4)]),
            (DownRight, vec![(3, 3), (4, 3), (3, 4), (4, 4)]),
        ];
        for (direction, coords) in expected {
            for end in positions(&coords) {
                assert_eq!(start.direction_to(end).unwrap(), direction);
            }
        }
        assert!(start.direction_to(start).is_err());
    }

    /// ```text
    ///    0   1   2   3   4
    /// 0 [2] [ ] [2] [ ] [2]
    /// 1 [ ] [1] [1] [1] [ ]
    /// 2 [2] [1] [#] [1] [2]
    /// 3 [ ] [1] [1] [1] [ ]
    /// 4 [2] [ ] [2] [ ] [2]
    /// ```
    #[test]
    fn distance_halves_diagonals() {
        let start = Position::new(2, 2);
        let coords_distances = [
            (2, 1, 1),
            (2, 0, 2),
            (2, 3, 1),
            (2, 4, 2),
            (1, 2, 1),
            (0, 2, 2),
            (3, 2, 1),
            (4, 2, 2),
            (1, 1, 1),
            (0, 0, 2),
            (3, 1, 1),
            (4, 0, 2),
            (1, 3, 1),
            (0, 4, 2),
            (3, 3, 1),
            (4, 4, 2),
        ];
        for (x, y, distance) in coords_distances {
            assert_eq!(start.distance_to(Position::new(x, y)).unwrap(), distance);
        }

        // Odd diagonal magnitudes are misaligned.
        let error = start.distance_to(Position::new(1, 0)).unwrap_err();
        assert_eq!(error.kind(), ErrorKind::PositionsNotAligned);
        assert!(start.distance_to(start).is_err());
    }

    /// ```text
    ///    0   1   2   3   4
    /// 0 [4] [3] [2] [3] [4]
    /// 1 [3] [2] [1] [2] [3]
    /// 2 [2] [1] [#] [1] [2]
    /// 3 [3] [2] [1] [2] [3]
    /// 4 [4] [3] [2] [3] [4]
    /// ```
    #[test]
    fn difficult_distance_is_raw_magnitude() {
        let start = Position::new(2, 2);
        for y in 0..5u8 {
            for x in 0..5u8 {
                let end = Position::new(x, y);
                if end == start {
                    continue;
                }
                let expected = (i32::from(x) - 2).unsigned_abs() + (i32::from(y) - 2).unsigned_abs();
                assert_eq!(start.difficult_distance_to(end).unwrap(), expected);
            }
        }
    }

    #[test]
    fn range_between_corners() {
        let cases: [((u8, u8), (u8, u8), Vec<(u8, u8)>); 9] = [
            ((0, 0), (4, 0), vec![(1, 0), (2, 0), (3, 0)]),
            ((0, 0), (0, 4), vec![(0, 1), (0, 2), (0, 3)]),
            ((0, 0), (4, 4), vec![(1, 1), (2, 2), (3, 3)]),
            ((4, 0), (0, 0), vec![(3, 0), (2, 0), (1, 0)]),
            ((4, 0), (0, 4), vec![(3, 1), (2, 2), (1, 3)]),
            ((4, 0), (4, 4), vec![(4, 1), (4, 2), (4, 3)]),
            ((0, 4), (4, 0), vec![(1, 3), (2, 2), (3, 1)]),
            ((4, 4), (0, 0), vec![(3, 3), (2, 2), (1, 1)]),
            ((4, 4), (0, 4), vec![(3, 4), (2, 4), (1, 4)]),
        ];
        for (start, end, between) in cases {
            let range: Vec<Position> = Position::from(start)
                .range_between(Position::from(end))
                .unwrap()
                .collect();
            assert_eq!(range, positions(&between));
        }
    }

    /// ```text
    ///    0   1   2   3   4
    /// 0 [ ] [E] [ ] [E] [ ]
    /// 1 [E] [ ] [ ] [ ] [E]
    /// 2 [ ] [ ] [S] [ ] [ ]
    /// 3 [E] [ ] [ ] [ ] [E]
    /// 4 [ ] [E] [ ] [E] [ ]
    /// ```
    #[test]
    fn range_between_rejects_unaligned() {
        let start = Position::new(2, 2);
        let ends = [(1, 0), (3, 0), (0, 1), (4, 1), (0, 3), (4, 3), (1, 4), (3, 4)];
        for end in positions(&ends) {
            let error = start.range_between(end).unwrap_err();
            assert_eq!(error.kind(), ErrorKind::PositionsNotAligned);
        }
        // Even magnitude but off the diagonal.
        assert!(Position::new(2, 0).range_between(Position::new(3, 3)).is_err());
    }

    #[test]
    fn range_between_neighbors_is_empty() {
        let start = Position::new(2, 2);
        let ends = [(1, 1), (2, 1), (3, 1), (1, 2), (3, 2), (1, 3), (2, 3), (3, 3)];
        for end in positions(&ends) {
            assert_eq!(start.range_between(end).unwrap().count(), 0);
        }
    }

    #[test]
    fn display_position() {
        assert_eq!(Position::new(0, 7).to_string(), "x:0, y:7");
    }
}
