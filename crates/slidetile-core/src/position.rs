//! Board coordinates.

use std::fmt::{self, Display};

/// A cell coordinate on an N×N board.
///
/// Cells are also addressed by their row-major index (`row * size + col`);
/// [`Position::from_index`] and [`Position::to_index`] convert between the two.
///
/// # Examples
///
/// ```
/// use slidetile_core::Position;
///
/// let pos = Position::from_index(7, 4);
/// assert_eq!(pos, Position::new(1, 3));
/// assert_eq!(pos.to_index(4), 7);
/// ```
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash)]
pub struct Position {
    row: usize,
    col: usize,
}

impl Position {
    /// Creates a position from a row and a column.
    #[must_use]
    #[inline]
    pub const fn new(row: usize, col: usize) -> Self {
        Self { row, col }
    }

    /// Converts a row-major cell index into a position.
    #[must_use]
    #[inline]
    pub const fn from_index(index: usize, size: usize) -> Self {
        Self {
            row: index / size,
            col: index % size,
        }
    }

    /// Converts the position into a row-major cell index.
    #[must_use]
    #[inline]
    pub const fn to_index(self, size: usize) -> usize {
        self.row * size + self.col
    }

    /// Returns the row (0 is the top row).
    #[must_use]
    #[inline]
    pub const fn row(self) -> usize {
        self.row
    }

    /// Returns the column (0 is the left column).
    #[must_use]
    #[inline]
    pub const fn col(self) -> usize {
        self.col
    }

    /// Returns the grid distance between two positions.
    #[must_use]
    #[inline]
    pub const fn manhattan(self, other: Self) -> usize {
        self.row.abs_diff(other.row) + self.col.abs_diff(other.col)
    }

    /// Returns the neighbouring position in `direction`, if it lies on a board of `size`.
    #[must_use]
    pub fn step(self, direction: Direction, size: usize) -> Option<Self> {
        let (dr, dc) = direction.offset();
        let row = self.row.checked_add_signed(dr)?;
        let col = self.col.checked_add_signed(dc)?;
        (row < size && col < size).then_some(Self { row, col })
    }
}

impl Display for Position {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "({}, {})", self.row, self.col)
    }
}

/// A direction in which the empty cell moves.
///
/// Moving the empty cell `Up` slides the tile above it down, and so on.
#[derive(
    Debug, Default, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, derive_more::Display,
)]
pub enum Direction {
    /// Towards row 0.
    #[default]
    #[display("up")]
    Up,
    /// Towards the bottom row.
    #[display("down")]
    Down,
    /// Towards column 0.
    #[display("left")]
    Left,
    /// Towards the rightmost column.
    #[display("right")]
    Right,
}

impl Direction {
    /// All four directions, in expansion order.
    pub const ALL: [Self; 4] = [Self::Up, Self::Down, Self::Left, Self::Right];

    /// Returns the `(row, col)` offset of a single step.
    #[must_use]
    #[inline]
    pub const fn offset(self) -> (isize, isize) {
        match self {
            Self::Up => (-1, 0),
            Self::Down => (1, 0),
            Self::Left => (0, -1),
            Self::Right => (0, 1),
        }
    }

    /// Returns the direction that undoes this one.
    #[must_use]
    #[inline]
    pub const fn opposite(self) -> Self {
        match self {
            Self::Up => Self::Down,
            Self::Down => Self::Up,
            Self::Left => Self::Right,
            Self::Right => Self::Left,
        }
    }

    /// Returns the direction leading from `from` to the orthogonally adjacent `to`.
    #[must_use]
    pub fn between(from: Position, to: Position) -> Option<Self> {
        Self::ALL
            .into_iter()
            .find(|&dir| from.step(dir, usize::MAX) == Some(to))
    }
}
