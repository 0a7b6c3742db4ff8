//! Immutable board snapshots.

use std::{
    fmt::{self, Display},
    str::FromStr,
};

use tinyvec::ArrayVec;

use crate::{CellSet, Direction, Position};

/// The largest supported board dimension.
pub const MAX_SIZE: usize = 255;

/// The value stored in the empty cell.
pub const EMPTY: u16 = 0;

/// Errors returned when a tile sequence does not describe a valid board.
#[derive(Debug, Clone, Copy, PartialEq, Eq, derive_more::Display, derive_more::Error)]
pub enum BoardError {
    /// The dimension is zero or larger than [`MAX_SIZE`].
    #[display("invalid board size: {size}")]
    InvalidSize {
        /// The rejected dimension.
        size: usize,
    },
    /// The number of tiles is not `size²`.
    #[display("expected {expected} tiles, found {actual}")]
    LengthMismatch {
        /// `size²`.
        expected: usize,
        /// The number of tiles supplied.
        actual: usize,
    },
    /// A tile value is not below `size²`.
    #[display("tile {value} at index {index} is out of range")]
    TileOutOfRange {
        /// The offending value.
        value: u16,
        /// Where it was found.
        index: usize,
    },
    /// A tile value appears more than once.
    #[display("tile {value} appears more than once")]
    DuplicateTile {
        /// The repeated value.
        value: u16,
    },
}

/// Errors returned when parsing a board from text.
#[derive(
    Debug, Clone, PartialEq, Eq, derive_more::Display, derive_more::Error, derive_more::From,
)]
pub enum ParseBoardError {
    /// A token is neither a number nor an empty-cell marker.
    #[display("invalid token {token:?}")]
    InvalidToken {
        /// The rejected token.
        token: String,
    },
    /// The number of tokens is not a perfect square.
    #[display("{count} tiles do not form a square board")]
    NotSquare {
        /// The number of tokens read.
        count: usize,
    },
    /// The tokens do not form a valid board.
    #[display("invalid board: {_0}")]
    #[from]
    Board(BoardError),
}

/// An immutable snapshot of an N×N sliding-tile board.
///
/// Tiles are stored in row-major order; the value [`EMPTY`] (`0`) marks the empty
/// cell. Every move produces a new state, so states can be stored in visited sets
/// and compared structurally.
///
/// # Examples
///
/// ```
/// use slidetile_core::{BoardState, Direction};
///
/// let board: BoardState = "1 2 3\n4 5 6\n7 0 8".parse()?;
/// assert!(board.is_solvable());
/// assert_eq!(board.manhattan_distance(), 1);
///
/// let solved = board.apply_move(Direction::Right).unwrap();
/// assert!(solved.is_goal());
/// # Ok::<(), slidetile_core::ParseBoardError>(())
/// ```
#[derive(Debug, Clone, PartialEq, Eq, Hash)]
pub struct BoardState {
    tiles: Box<[u16]>,
    size: usize,
    empty_index: usize,
}

impl BoardState {
    /// Creates a board from a row-major tile sequence.
    ///
    /// # Errors
    ///
    /// Returns [`BoardError`] if `size` is out of range or `tiles` is not a
    /// permutation of `0..size²`.
    pub fn new(size: usize, tiles: Vec<u16>) -> Result<Self, BoardError> {
        if size == 0 || size > MAX_SIZE {
            return Err(BoardError::InvalidSize { size });
        }
        let cells = size * size;
        if tiles.len() != cells {
            return Err(BoardError::LengthMismatch {
                expected: cells,
                actual: tiles.len(),
            });
        }

        let mut seen = CellSet::new(cells);
        let mut empty_index = 0;
        for (index, &value) in tiles.iter().enumerate() {
            if usize::from(value) >= cells {
                return Err(BoardError::TileOutOfRange { value, index });
            }
            if !seen.insert(usize::from(value)) {
                return Err(BoardError::DuplicateTile { value });
            }
            if value == EMPTY {
                empty_index = index;
            }
        }

        Ok(Self {
            tiles: tiles.into_boxed_slice(),
            size,
            empty_index,
        })
    }

    /// Returns the solved board of the given size.
    ///
    /// # Panics
    ///
    /// Panics if `size` is zero or larger than [`MAX_SIZE`].
    #[must_use]
    pub fn goal(size: usize) -> Self {
        assert!((1..=MAX_SIZE).contains(&size), "invalid board size: {size}");
        let cells = size * size;
        let tiles = (0..cells)
            .map(|i| Self::goal_value_for(i, cells))
            .collect::<Box<[u16]>>();
        Self {
            tiles,
            size,
            empty_index: cells - 1,
        }
    }

    #[expect(clippy::cast_possible_truncation)]
    fn goal_value_for(index: usize, cells: usize) -> u16 {
        if index + 1 == cells {
            EMPTY
        } else {
            (index + 1) as u16
        }
    }

    /// Returns the board dimension N.
    #[must_use]
    #[inline]
    pub fn size(&self) -> usize {
        self.size
    }

    /// Returns the number of cells (`N²`).
    #[must_use]
    #[inline]
    pub fn cell_count(&self) -> usize {
        self.tiles.len()
    }

    /// Returns the tiles in row-major order.
    #[must_use]
    #[inline]
    pub fn tiles(&self) -> &[u16] {
        &self.tiles
    }

    /// Returns the index of the empty cell.
    #[must_use]
    #[inline]
    pub fn empty_index(&self) -> usize {
        self.empty_index
    }

    /// Returns the tile at a cell index.
    ///
    /// # Panics
    ///
    /// Panics if `index` is out of range.
    #[must_use]
    #[inline]
    pub fn tile_at(&self, index: usize) -> u16 {
        self.tiles[index]
    }

    /// Returns the position of a cell index.
    #[must_use]
    #[inline]
    pub fn position(&self, index: usize) -> Position {
        Position::from_index(index, self.size)
    }

    /// Returns the current cell index of `value`, if it is on the board.
    #[must_use]
    pub fn position_of(&self, value: u16) -> Option<usize> {
        self.tiles.iter().position(|&t| t == value)
    }

    /// Returns the cell index `value` occupies in the solved board.
    #[must_use]
    #[inline]
    pub fn goal_index_of(&self, value: u16) -> usize {
        if value == EMPTY {
            self.cell_count() - 1
        } else {
            usize::from(value) - 1
        }
    }

    /// Returns the value that belongs at `index` in the solved board.
    #[must_use]
    #[inline]
    pub fn goal_value_at(&self, index: usize) -> u16 {
        Self::goal_value_for(index, self.cell_count())
    }

    /// Returns `true` if the cell at `index` holds its solved value.
    #[must_use]
    #[inline]
    pub fn is_resident(&self, index: usize) -> bool {
        self.tiles[index] == self.goal_value_at(index)
    }

    /// Returns `true` if the tiles are in ascending order with the empty cell last.
    #[must_use]
    pub fn is_goal(&self) -> bool {
        self.empty_index + 1 == self.cell_count()
            && (0..self.cell_count() - 1).all(|i| usize::from(self.tiles[i]) == i + 1)
    }

    /// Returns the sum of the grid distances of every tile from its solved cell.
    ///
    /// The empty cell is not counted, which keeps the estimate admissible and
    /// consistent: a single move changes it by exactly one.
    #[must_use]
    pub fn manhattan_distance(&self) -> usize {
        self.tiles
            .iter()
            .enumerate()
            .filter(|&(_, &value)| value != EMPTY)
            .map(|(index, &value)| {
                self.position(index)
                    .manhattan(self.position(self.goal_index_of(value)))
            })
            .sum()
    }

    /// Returns the number of tile pairs that appear in the wrong relative order,
    /// ignoring the empty cell.
    #[must_use]
    pub fn inversion_count(&self) -> usize {
        let values = self
            .tiles
            .iter()
            .copied()
            .filter(|&v| v != EMPTY)
            .collect::<Vec<_>>();
        values
            .iter()
            .enumerate()
            .map(|(i, &v)| values[i + 1..].iter().filter(|&&w| w < v).count())
            .sum()
    }

    /// Returns `true` if the solved board is reachable from this one.
    ///
    /// For odd sizes the inversion count must be even. For even sizes a vertical
    /// move shifts the inversion count by an odd amount, so the inversion count
    /// plus the number of rows between the empty cell and the bottom row must be
    /// even.
    #[must_use]
    pub fn is_solvable(&self) -> bool {
        let inversions = self.inversion_count();
        if self.size % 2 == 1 {
            inversions % 2 == 0
        } else {
            let rows_from_bottom = self.size - 1 - self.position(self.empty_index).row();
            (inversions + rows_from_bottom) % 2 == 0
        }
    }

    /// Returns the directions the empty cell can move in.
    #[must_use]
    pub fn legal_moves(&self) -> ArrayVec<[Direction; 4]> {
        let empty = self.position(self.empty_index);
        Direction::ALL
            .into_iter()
            .filter(|&dir| empty.step(dir, self.size).is_some())
            .collect()
    }

    /// Returns the cell the empty cell would move to in `direction`, if any.
    #[must_use]
    pub fn target_of(&self, direction: Direction) -> Option<usize> {
        self.position(self.empty_index)
            .step(direction, self.size)
            .map(|pos| pos.to_index(self.size))
    }

    /// Returns the board after moving the empty cell in `direction`.
    ///
    /// Returns `None` if the move would leave the board.
    #[must_use]
    pub fn apply_move(&self, direction: Direction) -> Option<Self> {
        self.target_of(direction).map(|target| self.swap_empty(target))
    }

    /// Returns the board after moving the empty cell to an adjacent cell.
    ///
    /// Returns `None` if `target` is not orthogonally adjacent to the empty cell.
    #[must_use]
    pub fn slide_into(&self, target: usize) -> Option<Self> {
        (target < self.cell_count()
            && self
                .position(self.empty_index)
                .manhattan(self.position(target))
                == 1)
            .then(|| self.swap_empty(target))
    }

    fn swap_empty(&self, target: usize) -> Self {
        let mut tiles = self.tiles.clone();
        tiles.swap(self.empty_index, target);
        Self {
            tiles,
            size: self.size,
            empty_index: target,
        }
    }

    /// Returns every board reachable by one move of the empty cell.
    #[must_use]
    pub fn neighbors(&self) -> Vec<Self> {
        self.legal_moves()
            .into_iter()
            .filter_map(|dir| self.apply_move(dir))
            .collect()
    }

    /// Returns the boards reachable by one move that leaves every `locked` cell untouched.
    #[must_use]
    pub fn neighbors_avoiding(&self, locked: &CellSet) -> Vec<(Direction, Self)> {
        self.legal_moves()
            .into_iter()
            .filter_map(|dir| {
                let target = self.target_of(dir)?;
                (!locked.contains(target)).then(|| (dir, self.swap_empty(target)))
            })
            .collect()
    }

    /// Returns the single move that turns `self` into `next`, if one exists.
    #[must_use]
    pub fn move_between(&self, next: &Self) -> Option<Direction> {
        if self.size != next.size {
            return None;
        }
        let dir = Direction::between(
            self.position(self.empty_index),
            next.position(next.empty_index),
        )?;
        (self.apply_move(dir).as_ref() == Some(next)).then_some(dir)
    }
}

impl Display for BoardState {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let width = (self.cell_count() - 1).to_string().len();
        for (row, chunk) in self.tiles.chunks(self.size).enumerate() {
            if row > 0 {
                writeln!(f)?;
            }
            for (col, &value) in chunk.iter().enumerate() {
                if col > 0 {
                    write!(f, " ")?;
                }
                if value == EMPTY {
                    write!(f, "{:>width$}", "_")?;
                } else {
                    write!(f, "{value:>width$}")?;
                }
            }
        }
        Ok(())
    }
}

impl FromStr for BoardState {
    type Err = ParseBoardError;

    /// Parses whitespace- or comma-separated tiles in row-major order.
    ///
    /// `_`, `.` and `0` mark the empty cell. The size is inferred from the
    /// number of tokens.
    fn from_str(s: &str) -> Result<Self, Self::Err> {
        let tiles = s
            .split(|c: char| c.is_whitespace() || c == ',')
            .filter(|token| !token.is_empty())
            .map(|token| match token {
                "_" | "." => Ok(EMPTY),
                _ => token.parse::<u16>().map_err(|_| ParseBoardError::InvalidToken {
                    token: token.to_owned(),
                }),
            })
            .collect::<Result<Vec<_>, _>>()?;

        let count = tiles.len();
        let size = count.isqrt();
        if size * size != count || size == 0 {
            return Err(ParseBoardError::NotSquare { count });
        }
        Ok(Self::new(size, tiles)?)
    }
}

#[cfg(test)]
mod tests {
    use proptest::prelude::*;

    use super::*;

    fn board(size: usize, tiles: &[u16]) -> BoardState {
        BoardState::new(size, tiles.to_vec()).unwrap()
    }

    fn random_walk(size: usize, picks: &[usize]) -> BoardState {
        let mut state = BoardState::goal(size);
        for &pick in picks {
            let moves = state.legal_moves();
            state = state.apply_move(moves[pick % moves.len()]).unwrap();
        }
        state
    }

    #[test]
    fn test_new_rejects_invalid_tiles() {
        assert_eq!(
            BoardState::new(0, vec![]),
            Err(BoardError::InvalidSize { size: 0 })
        );
        assert_eq!(
            BoardState::new(2, vec![1, 2, 0]),
            Err(BoardError::LengthMismatch {
                expected: 4,
                actual: 3
            })
        );
        assert_eq!(
            BoardState::new(2, vec![1, 2, 4, 0]),
            Err(BoardError::TileOutOfRange { value: 4, index: 2 })
        );
        assert_eq!(
            BoardState::new(2, vec![1, 1, 2, 0]),
            Err(BoardError::DuplicateTile { value: 1 })
        );
    }

    #[test]
    fn test_new_caches_empty_index() {
        let b = board(3, &[1, 2, 3, 4, 5, 6, 0, 7, 8]);
        assert_eq!(b.empty_index(), 6);
        assert_eq!(b.tile_at(6), EMPTY);
    }

    #[test]
    fn test_goal() {
        let goal = BoardState::goal(3);
        assert_eq!(goal.tiles(), &[1, 2, 3, 4, 5, 6, 7, 8, 0]);
        assert!(goal.is_goal());
        assert_eq!(goal.manhattan_distance(), 0);
        assert_eq!(goal.inversion_count(), 0);
        assert!(goal.is_solvable());
        assert!(BoardState::goal(1).is_goal());
    }

    #[test]
    fn test_goal_index_and_value() {
        let b = BoardState::goal(4);
        assert_eq!(b.goal_index_of(1), 0);
        assert_eq!(b.goal_index_of(15), 14);
        assert_eq!(b.goal_index_of(EMPTY), 15);
        assert_eq!(b.goal_value_at(14), 15);
        assert_eq!(b.goal_value_at(15), EMPTY);
    }

    #[test]
    fn test_single_move_from_goal_is_not_goal() {
        let b = board(3, &[1, 2, 3, 4, 5, 6, 7, 0, 8]);
        assert!(!b.is_goal());
        assert_eq!(b.manhattan_distance(), 1);
    }

    #[test]
    fn test_solvability_examples() {
        assert!(board(3, &[1, 2, 3, 4, 5, 6, 0, 7, 8]).is_solvable());
        assert!(!board(3, &[2, 1, 3, 4, 5, 6, 7, 8, 0]).is_solvable());
        assert!(!board(4, &[1, 2, 3, 4, 5, 6, 7, 8, 9, 10, 11, 12, 13, 15, 14, 0]).is_solvable());
        // Empty cell one row up: the vertical move shifts inversions by three.
        assert!(board(4, &[1, 2, 3, 4, 5, 6, 7, 8, 9, 10, 11, 0, 13, 14, 15, 12]).is_solvable());
        assert!(board(2, &[1, 2, 0, 3]).is_solvable());
        assert!(!board(2, &[2, 1, 3, 0]).is_solvable());
    }

    #[test]
    fn test_neighbors_of_corner_and_center() {
        let goal = BoardState::goal(3);
        let neighbors = goal.neighbors();
        assert_eq!(neighbors.len(), 2);
        assert!(neighbors.contains(&board(3, &[1, 2, 3, 4, 5, 0, 7, 8, 6])));
        assert!(neighbors.contains(&board(3, &[1, 2, 3, 4, 5, 6, 7, 0, 8])));

        let center = board(3, &[1, 2, 3, 4, 0, 5, 6, 7, 8]);
        assert_eq!(center.neighbors().len(), 4);
        assert_eq!(center.legal_moves().len(), 4);
    }

    #[test]
    fn test_neighbors_avoiding_locked_cells() {
        let center = board(3, &[1, 2, 3, 4, 0, 5, 6, 7, 8]);
        let locked = CellSet::from_fn(9, |i| i == 1 || i == 3);
        let dirs = center
            .neighbors_avoiding(&locked)
            .into_iter()
            .map(|(dir, _)| dir)
            .collect::<Vec<_>>();
        assert_eq!(dirs, vec![Direction::Down, Direction::Right]);
    }

    #[test]
    fn test_move_between() {
        let a = board(3, &[1, 2, 3, 4, 0, 5, 6, 7, 8]);
        let b = a.apply_move(Direction::Left).unwrap();
        assert_eq!(a.move_between(&b), Some(Direction::Left));
        assert_eq!(b.move_between(&a), Some(Direction::Right));
        assert_eq!(a.move_between(&a), None);
        let c = b.apply_move(Direction::Up).unwrap();
        assert_eq!(a.move_between(&c), None);
    }

    #[test]
    fn test_slide_into() {
        let goal = BoardState::goal(3);
        assert_eq!(goal.slide_into(0), None);
        assert_eq!(goal.slide_into(8), None);
        assert_eq!(goal.slide_into(5), goal.apply_move(Direction::Up));
        // Wrapping across a row boundary is not adjacency.
        let b = board(3, &[1, 2, 0, 3, 4, 5, 6, 7, 8]);
        assert_eq!(b.slide_into(3), None);
    }

    #[test]
    fn test_display_and_parse() {
        let b = board(4, &[1, 2, 3, 4, 5, 6, 7, 8, 9, 10, 11, 12, 13, 14, 0, 15]);
        let text = b.to_string();
        assert_eq!(text, " 1  2  3  4\n 5  6  7  8\n 9 10 11 12\n13 14  _ 15");
        assert_eq!(text.parse::<BoardState>(), Ok(b));
        assert_eq!(
            "1,2,3,4,5,6,0,7,8".parse::<BoardState>(),
            Ok(board(3, &[1, 2, 3, 4, 5, 6, 0, 7, 8]))
        );
    }

    #[test]
    fn test_parse_error_wraps_board_error() {
        let err = "1 1 2 0".parse::<BoardState>().unwrap_err();
        assert_eq!(err.to_string(), "invalid board: tile 1 appears more than once");
        let source = std::error::Error::source(&err).map(ToString::to_string);
        assert_eq!(source.as_deref(), Some("tile 1 appears more than once"));
        assert_eq!(
            ParseBoardError::from(BoardError::InvalidSize { size: 0 }),
            ParseBoardError::Board(BoardError::InvalidSize { size: 0 })
        );
    }

    #[test]
    fn test_parse_errors() {
        assert_eq!(
            "1 2 x 0".parse::<BoardState>(),
            Err(ParseBoardError::InvalidToken {
                token: "x".to_owned()
            })
        );
        assert_eq!(
            "1 2 0".parse::<BoardState>(),
            Err(ParseBoardError::NotSquare { count: 3 })
        );
        assert_eq!(
            "".parse::<BoardState>(),
            Err(ParseBoardError::NotSquare { count: 0 })
        );
        assert_eq!(
            "1 1 2 0".parse::<BoardState>(),
            Err(ParseBoardError::Board(BoardError::DuplicateTile { value: 1 }))
        );
    }

    proptest! {
        #[test]
        fn prop_random_walks_stay_solvable(size in 2usize..=6, picks in prop::collection::vec(0usize..4, 0..200)) {
            let b = random_walk(size, &picks);
            prop_assert!(b.is_solvable());
            prop_assert_eq!(b.tile_at(b.empty_index()), EMPTY);
        }

        #[test]
        fn prop_manhattan_bounded_by_walk_length(size in 2usize..=6, picks in prop::collection::vec(0usize..4, 0..200)) {
            let b = random_walk(size, &picks);
            prop_assert!(b.manhattan_distance() <= picks.len());
        }

        #[test]
        fn prop_single_move_changes_manhattan_by_one(size in 2usize..=6, picks in prop::collection::vec(0usize..4, 1..100)) {
            let b = random_walk(size, &picks);
            for next in b.neighbors() {
                prop_assert_eq!(b.manhattan_distance().abs_diff(next.manhattan_distance()), 1);
                prop_assert!(b.move_between(&next).is_some());
            }
        }

        #[test]
        fn prop_swapping_two_tiles_flips_solvability(size in 2usize..=5, picks in prop::collection::vec(0usize..4, 0..100)) {
            let b = random_walk(size, &picks);
            let mut tiles = b.tiles().to_vec();
            let (i, j) = if b.empty_index() > 1 { (0, 1) } else { (tiles.len() - 2, tiles.len() - 1) };
            tiles.swap(i, j);
            let swapped = BoardState::new(size, tiles).unwrap();
            prop_assert!(!swapped.is_solvable());
        }
    }
}
