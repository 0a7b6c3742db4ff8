//! Test utilities for solver strategies.
//!
//! This module provides [`SolveTester`], a harness that runs a solve and
//! checks the resulting path, plus brute-force helpers for cross-checking
//! search results on small boards.
//!
//! # Example
//!
//! ```
//! use slidetile_solver::{Strategy, testing::SolveTester};
//!
//! SolveTester::from_str(
//!     "
//!     1 2 3
//!     4 5 6
//!     _ 7 8
//!     ",
//! )
//! .solve()
//! .assert_valid()
//! .assert_strategy(Strategy::Exact)
//! .assert_move_count(2);
//! ```

use std::collections::{HashSet, VecDeque};

use slidetile_core::BoardState;

use crate::{SolveError, Solution, Solver, SolverConfig, Strategy, validate_path};

/// A test harness for running solves and asserting on their results.
///
/// # Method Chaining
///
/// All methods return `self`, enabling fluent method chaining for readable tests.
///
/// # Panics
///
/// All assertion methods panic with detailed messages on failure, using
/// `#[track_caller]` to report the correct source location. Assertions made
/// before [`solve`](Self::solve) or [`solve_with`](Self::solve_with) panic.
#[derive(Debug)]
pub struct SolveTester {
    initial: BoardState,
    result: Option<Result<Solution, SolveError>>,
}

impl SolveTester {
    /// Creates a new tester for `initial`.
    #[must_use]
    pub fn new(initial: BoardState) -> Self {
        Self {
            initial,
            result: None,
        }
    }

    /// Creates a new tester from a board string.
    ///
    /// The string format matches [`BoardState`]'s `FromStr`:
    /// - Numbers separated by whitespace or commas, row-major
    /// - `_`, `.`, or `0` represent the empty cell
    ///
    /// # Panics
    ///
    /// Panics if the string cannot be parsed as a valid board.
    #[track_caller]
    #[must_use]
    pub fn from_str(s: &str) -> Self {
        let board = s.parse().unwrap();
        Self::new(board)
    }

    /// Solves with the default configuration.
    #[must_use]
    pub fn solve(self) -> Self {
        self.solve_with(SolverConfig::default())
    }

    /// Solves with `config`.
    #[must_use]
    pub fn solve_with(mut self, config: SolverConfig) -> Self {
        self.result = Some(Solver::new(config).solve(&self.initial));
        self
    }

    /// Returns the solution.
    ///
    /// # Panics
    ///
    /// Panics if the board has not been solved, or the solve failed.
    #[track_caller]
    #[must_use]
    pub fn solution(&self) -> &Solution {
        match &self.result {
            Some(Ok(solution)) => solution,
            Some(Err(err)) => panic!("Expected a solution for\n{}\nbut got {err}", self.initial),
            None => panic!("Expected solve() to be called before inspecting the result"),
        }
    }

    /// Asserts that the solve succeeded with a legal path from the initial
    /// board to the goal, whose moves agree with its states.
    ///
    /// # Panics
    ///
    /// Panics if the solve failed or the path is invalid.
    #[track_caller]
    pub fn assert_valid(self) -> Self {
        let solution = self.solution();
        assert_valid_path(&self.initial, solution.states());
        assert_eq!(
            solution.moves().len(),
            solution.move_count(),
            "Expected one move per step"
        );
        let replayed = solution
            .moves()
            .into_iter()
            .try_fold(self.initial.clone(), |board, dir| board.apply_move(dir));
        assert_eq!(
            replayed.as_ref(),
            solution.states().last(),
            "Expected replaying the moves to reach the final state"
        );
        self
    }

    /// Asserts the exact number of moves.
    ///
    /// # Panics
    ///
    /// Panics if the solve failed or used a different number of moves.
    #[track_caller]
    pub fn assert_move_count(self, expected: usize) -> Self {
        let actual = self.solution().move_count();
        assert_eq!(
            actual, expected,
            "Expected {expected} moves for\n{}\nbut got {actual}",
            self.initial
        );
        self
    }

    /// Asserts an upper bound on the number of moves.
    ///
    /// # Panics
    ///
    /// Panics if the solve failed or used more than `max` moves.
    #[track_caller]
    pub fn assert_max_move_count(self, max: usize) -> Self {
        let actual = self.solution().move_count();
        assert!(
            actual <= max,
            "Expected at most {max} moves for\n{}\nbut got {actual}",
            self.initial
        );
        self
    }

    /// Asserts which strategy produced the solution.
    ///
    /// # Panics
    ///
    /// Panics if the solve failed or used a different strategy.
    #[track_caller]
    pub fn assert_strategy(self, expected: Strategy) -> Self {
        let actual = self.solution().strategy();
        assert_eq!(
            actual, expected,
            "Expected the {expected} strategy, but {actual} was used"
        );
        self
    }

    /// Asserts that the solve failed with `expected`.
    ///
    /// # Panics
    ///
    /// Panics if the solve succeeded or failed differently.
    #[track_caller]
    pub fn assert_error(self, expected: SolveError) -> Self {
        match &self.result {
            Some(Err(err)) => assert_eq!(*err, expected, "Expected error {expected}, got {err}"),
            Some(Ok(solution)) => panic!(
                "Expected error {expected}, but solved in {} moves",
                solution.move_count()
            ),
            None => panic!("Expected solve() to be called before inspecting the result"),
        }
        self
    }
}

/// Asserts that `states` is a legal path from `initial` to the goal.
///
/// # Panics
///
/// Panics with the offending step if the path is invalid.
#[track_caller]
pub fn assert_valid_path(initial: &BoardState, states: &[BoardState]) {
    if let Err(err) = validate_path(initial, states) {
        let context = match err {
            crate::PathError::IllegalStep { index } => {
                format!("\n{}\n->\n{}", states[index - 1], states[index])
            }
            _ => String::new(),
        };
        panic!("Expected a valid path from\n{initial}\nbut {err}{context}");
    }
}

/// Returns the optimal move count by exhaustive breadth-first search.
///
/// Only practical for boards up to 3×3. Returns `None` if the goal is unreachable.
#[must_use]
pub fn breadth_first_distance(start: &BoardState) -> Option<usize> {
    breadth_first_distance_within(start, usize::MAX)
}

/// Returns the optimal move count if it is at most `max_depth`.
#[must_use]
pub fn breadth_first_distance_within(start: &BoardState, max_depth: usize) -> Option<usize> {
    let mut visited = HashSet::from([start.clone()]);
    let mut queue = VecDeque::from([(start.clone(), 0)]);
    while let Some((board, depth)) = queue.pop_front() {
        if board.is_goal() {
            return Some(depth);
        }
        if depth == max_depth {
            continue;
        }
        for next in board.neighbors() {
            if visited.insert(next.clone()) {
                queue.push_back((next, depth + 1));
            }
        }
    }
    None
}

/// Walks away from the goal of `size`, choosing each move by index among the
/// legal ones. Always produces a solvable board.
#[must_use]
pub fn random_walk(size: usize, choices: &[usize]) -> BoardState {
    choices
        .iter()
        .fold(BoardState::goal(size), |board, &choice| {
            let moves = board.legal_moves();
            if moves.is_empty() {
                return board;
            }
            let dir = moves[choice % moves.len()];
            board.apply_move(dir).unwrap_or(board)
        })
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_breadth_first_distance() {
        let board: BoardState = "1 2 3 4 5 6 _ 7 8".parse().unwrap();
        assert_eq!(breadth_first_distance(&board), Some(2));
        assert_eq!(breadth_first_distance_within(&board, 1), None);
        assert_eq!(breadth_first_distance(&BoardState::goal(3)), Some(0));
    }

    #[test]
    fn test_breadth_first_distance_unsolvable() {
        let board: BoardState = "2 1 3 _".parse().unwrap();
        assert_eq!(breadth_first_distance(&board), None);
    }

    #[test]
    fn test_random_walk_is_solvable() {
        let board = random_walk(4, &[0, 3, 1, 2, 2, 1, 0, 3, 1, 1]);
        assert!(board.is_solvable());
        assert_eq!(board.size(), 4);
    }

    #[test]
    fn test_tester_chain() {
        SolveTester::from_str("1 2 3 4 5 6 7 _ 8")
            .solve()
            .assert_valid()
            .assert_move_count(1)
            .assert_max_move_count(1)
            .assert_strategy(Strategy::Exact);
    }

    #[test]
    #[should_panic(expected = "Expected 3 moves")]
    fn test_move_count_mismatch_panics() {
        let _ = SolveTester::from_str("1 2 3 4 5 6 7 _ 8")
            .solve()
            .assert_move_count(3);
    }

    #[test]
    #[should_panic(expected = "Expected a valid path")]
    fn test_invalid_path_panics() {
        let start: BoardState = "1 2 3 4 5 6 7 _ 8".parse().unwrap();
        assert_valid_path(&start, std::slice::from_ref(&start));
    }
}
