//! Path assembly.

use std::{collections::HashMap, mem};

use slidetile_core::{BoardState, Direction};

use crate::{PathError, Strategy, solver::SolveStats};

/// The growing sequence of states from an initial board.
///
/// Every appended state must be exactly one legal move from the current one;
/// appending the current state again is a no-op.
///
/// # Examples
///
/// ```
/// use slidetile_core::BoardState;
/// use slidetile_solver::Trajectory;
///
/// let start = BoardState::new(3, vec![1, 2, 3, 4, 5, 6, 0, 7, 8])?;
/// let mut trajectory = Trajectory::new(start);
/// trajectory.slide_through(&[7, 8])?;
/// assert!(trajectory.current().is_goal());
/// assert_eq!(trajectory.move_count(), 2);
/// # Ok::<(), Box<dyn std::error::Error>>(())
/// ```
#[derive(Debug, Clone)]
pub struct Trajectory {
    states: Vec<BoardState>,
}

impl Trajectory {
    /// Starts a trajectory at `initial`.
    #[must_use]
    pub fn new(initial: BoardState) -> Self {
        Self {
            states: vec![initial],
        }
    }

    /// Returns the first state.
    #[must_use]
    pub fn initial(&self) -> &BoardState {
        &self.states[0]
    }

    /// Returns the latest state.
    #[must_use]
    pub fn current(&self) -> &BoardState {
        &self.states[self.states.len() - 1]
    }

    /// Returns every state so far, initial first.
    #[must_use]
    pub fn states(&self) -> &[BoardState] {
        &self.states
    }

    /// Returns the number of moves so far.
    #[must_use]
    pub fn move_count(&self) -> usize {
        self.states.len() - 1
    }

    /// Appends a state one move from the current one.
    ///
    /// # Errors
    ///
    /// Returns [`PathError::IllegalStep`] if `state` is neither the current
    /// state nor one legal move from it.
    pub fn push(&mut self, state: BoardState) -> Result<(), PathError> {
        let current = self.current();
        if *current == state {
            return Ok(());
        }
        if current.move_between(&state).is_none() {
            return Err(PathError::IllegalStep {
                index: self.states.len(),
            });
        }
        self.states.push(state);
        Ok(())
    }

    /// Moves the empty cell into the adjacent `cell`.
    ///
    /// # Errors
    ///
    /// Returns [`PathError::IllegalStep`] if `cell` is not adjacent to the empty cell.
    pub fn slide_to(&mut self, cell: usize) -> Result<(), PathError> {
        let next = self
            .current()
            .slide_into(cell)
            .ok_or(PathError::IllegalStep {
                index: self.states.len(),
            })?;
        self.states.push(next);
        Ok(())
    }

    /// Moves the empty cell through each of `cells` in turn.
    ///
    /// # Errors
    ///
    /// Returns [`PathError::IllegalStep`] at the first cell that is not
    /// adjacent to the empty cell.
    pub fn slide_through(&mut self, cells: &[usize]) -> Result<(), PathError> {
        cells.iter().try_for_each(|&cell| self.slide_to(cell))
    }

    /// Appends a search result. A leading copy of the current state is skipped.
    ///
    /// # Errors
    ///
    /// Returns [`PathError::IllegalStep`] at the first state that does not
    /// follow from its predecessor.
    pub fn append_path<I>(&mut self, states: I) -> Result<(), PathError>
    where
        I: IntoIterator<Item = BoardState>,
    {
        states.into_iter().try_for_each(|state| self.push(state))
    }

    /// Removes loops, keeping only the first visit to each state.
    ///
    /// Returns the number of moves removed.
    pub fn compact(&mut self) -> usize {
        let before = self.states.len();
        let mut kept: Vec<BoardState> = Vec::with_capacity(before);
        let mut seen: HashMap<BoardState, usize> = HashMap::new();
        for state in mem::take(&mut self.states) {
            if let Some(&at) = seen.get(&state) {
                for dropped in kept.drain(at + 1..) {
                    seen.remove(&dropped);
                }
            } else {
                seen.insert(state.clone(), kept.len());
                kept.push(state);
            }
        }
        self.states = kept;
        before - self.states.len()
    }

    /// Validates the trajectory and wraps it in a [`Solution`].
    ///
    /// # Errors
    ///
    /// Returns [`PathError`] if the trajectory does not end at the goal.
    pub fn finish(self, strategy: Strategy, stats: SolveStats) -> Result<Solution, PathError> {
        validate_path(self.initial(), &self.states)?;
        Ok(Solution {
            states: self.states,
            strategy,
            stats,
        })
    }
}

/// Checks that `states` is a legal path from `initial` to the goal.
///
/// # Errors
///
/// Returns the first [`PathError`] found.
pub fn validate_path(initial: &BoardState, states: &[BoardState]) -> Result<(), PathError> {
    let (first, last) = match states {
        [] => return Err(PathError::Empty),
        [first, .., last] => (first, last),
        [only] => (only, only),
    };
    if first != initial {
        return Err(PathError::StartMismatch);
    }
    if let Some(index) = states
        .windows(2)
        .position(|pair| pair[0].move_between(&pair[1]).is_none())
    {
        return Err(PathError::IllegalStep { index: index + 1 });
    }
    if !last.is_goal() {
        return Err(PathError::NotGoal);
    }
    Ok(())
}

/// A validated path from an initial board to the goal.
#[derive(Debug, Clone)]
pub struct Solution {
    states: Vec<BoardState>,
    strategy: Strategy,
    stats: SolveStats,
}

impl Solution {
    /// Returns the states, initial first and goal last.
    #[must_use]
    pub fn states(&self) -> &[BoardState] {
        &self.states
    }

    /// Returns the direction the empty cell moves at each step.
    #[must_use]
    pub fn moves(&self) -> Vec<Direction> {
        self.states
            .windows(2)
            .filter_map(|pair| pair[0].move_between(&pair[1]))
            .collect()
    }

    /// Returns the number of moves.
    #[must_use]
    pub fn move_count(&self) -> usize {
        self.states.len() - 1
    }

    /// Consumes the solution, returning its states.
    #[must_use]
    pub fn into_states(self) -> Vec<BoardState> {
        self.states
    }

    /// Returns the strategy that produced the path.
    #[must_use]
    pub fn strategy(&self) -> Strategy {
        self.strategy
    }

    /// Returns statistics about the solve.
    #[must_use]
    pub fn stats(&self) -> &SolveStats {
        &self.stats
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn two_moves_from_goal() -> BoardState {
        BoardState::new(3, vec![1, 2, 3, 4, 5, 6, 0, 7, 8]).unwrap()
    }

    #[test]
    fn test_push_skips_current_state() {
        let start = two_moves_from_goal();
        let mut trajectory = Trajectory::new(start.clone());
        trajectory.push(start).unwrap();
        assert_eq!(trajectory.move_count(), 0);
    }

    #[test]
    fn test_push_rejects_gaps() {
        let mut trajectory = Trajectory::new(two_moves_from_goal());
        assert_eq!(
            trajectory.push(BoardState::goal(3)),
            Err(PathError::IllegalStep { index: 1 })
        );
        assert_eq!(
            trajectory.slide_to(2),
            Err(PathError::IllegalStep { index: 1 })
        );
        assert_eq!(trajectory.move_count(), 0);
    }

    #[test]
    fn test_compact_removes_loops() {
        let start = two_moves_from_goal();
        let mut trajectory = Trajectory::new(start.clone());
        // Wander up and back down before finishing.
        trajectory.slide_through(&[3, 0, 1, 0, 3, 6, 7, 8]).unwrap();
        assert_eq!(trajectory.move_count(), 8);

        assert_eq!(trajectory.compact(), 6);
        assert_eq!(trajectory.move_count(), 2);
        assert!(trajectory.current().is_goal());
        validate_path(&start, trajectory.states()).unwrap();
    }

    #[test]
    fn test_finish_reports_moves() {
        let start = two_moves_from_goal();
        let mut trajectory = Trajectory::new(start);
        trajectory.slide_through(&[7, 8]).unwrap();
        let solution = trajectory
            .finish(Strategy::Exact, SolveStats::default())
            .unwrap();
        assert_eq!(solution.moves(), vec![Direction::Right, Direction::Right]);
        assert_eq!(solution.move_count(), 2);
        assert_eq!(solution.strategy(), Strategy::Exact);
    }

    #[test]
    fn test_finish_requires_goal() {
        let trajectory = Trajectory::new(two_moves_from_goal());
        assert_eq!(
            trajectory
                .finish(Strategy::Exact, SolveStats::default())
                .unwrap_err(),
            PathError::NotGoal
        );
    }

    #[test]
    fn test_validate_path() {
        let start = two_moves_from_goal();
        let goal = BoardState::goal(3);
        assert_eq!(validate_path(&start, &[]), Err(PathError::Empty));
        assert_eq!(
            validate_path(&start, &[goal.clone()]),
            Err(PathError::StartMismatch)
        );
        assert_eq!(
            validate_path(&start, &[start.clone(), goal.clone()]),
            Err(PathError::IllegalStep { index: 1 })
        );
        assert_eq!(validate_path(&goal, &[goal.clone()]), Ok(()));
    }
}
