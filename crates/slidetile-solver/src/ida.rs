use std::collections::HashSet;

use slidetile_core::{BoardState, CellSet, Direction};

use crate::{Search, SearchBudget, SearchError};

const NAME: &str = "bounded";

/// Iterative-deepening A\* (IDA\*) with the Manhattan-distance heuristic.
///
/// Runs depth-first searches bounded by `f = g + h`. Each iteration that fails
/// raises the bound to the smallest `f` that exceeded it. Memory stays
/// proportional to the current path, since only states on that path are kept
/// for cycle detection.
///
/// The depth-first search uses an explicit stack, so deep bounds cannot
/// overflow the call stack.
#[derive(Debug, Clone, Copy)]
pub struct BoundedSearch {
    max_iterations: usize,
}

impl Default for BoundedSearch {
    fn default() -> Self {
        Self::new(crate::SolverConfig::DEFAULT_IDA_MAX_ITERATIONS)
    }
}

#[derive(Debug)]
struct Frame {
    state: BoardState,
    g: usize,
    next: usize,
}

enum Iteration {
    Found(Vec<BoardState>),
    Exceeded(usize),
}

impl BoundedSearch {
    /// Creates a search that raises its bound at most `max_iterations` times.
    #[must_use]
    pub const fn new(max_iterations: usize) -> Self {
        Self { max_iterations }
    }

    /// Returns the iteration cap.
    #[must_use]
    pub const fn max_iterations(&self) -> usize {
        self.max_iterations
    }

    /// Runs one bounded depth-first search.
    ///
    /// Returns the path on success, otherwise the smallest `f` value that
    /// exceeded `bound` (`usize::MAX` if nothing did).
    fn iterate(
        start: &BoardState,
        locked: &CellSet,
        bound: usize,
        budget: &mut SearchBudget,
    ) -> Result<Iteration, SearchError> {
        let mut next_bound = usize::MAX;
        let mut on_path = HashSet::from([start.clone()]);
        let mut stack = vec![Frame {
            state: start.clone(),
            g: 0,
            next: 0,
        }];

        while let Some(frame) = stack.last_mut() {
            let Some(&direction) = Direction::ALL.get(frame.next) else {
                if let Some(done) = stack.pop() {
                    on_path.remove(&done.state);
                }
                continue;
            };
            frame.next += 1;

            let Some(target) = frame.state.target_of(direction) else {
                continue;
            };
            if locked.contains(target) {
                continue;
            }
            let Some(child) = frame.state.apply_move(direction) else {
                continue;
            };
            if on_path.contains(&child) {
                continue;
            }
            let g = frame.g + 1;

            budget.tick()?;
            let f = g + child.manhattan_distance();
            if f > bound {
                next_bound = next_bound.min(f);
                continue;
            }
            if child.is_goal() {
                let mut path: Vec<_> = stack.into_iter().map(|frame| frame.state).collect();
                path.push(child);
                return Ok(Iteration::Found(path));
            }

            on_path.insert(child.clone());
            stack.push(Frame {
                state: child,
                g,
                next: 0,
            });
        }

        Ok(Iteration::Exceeded(next_bound))
    }
}

impl Search for BoundedSearch {
    fn name(&self) -> &'static str {
        NAME
    }

    fn search(
        &self,
        start: &BoardState,
        locked: &CellSet,
        budget: &mut SearchBudget,
    ) -> Result<Vec<BoardState>, SearchError> {
        if start.is_goal() {
            return Ok(vec![start.clone()]);
        }

        let mut bound = start.manhattan_distance();
        for iteration in 0..self.max_iterations {
            match Self::iterate(start, locked, bound, budget)? {
                Iteration::Found(path) => {
                    log::debug!(
                        "{NAME} search found a {}-move path after {} iterations",
                        path.len() - 1,
                        iteration + 1
                    );
                    return Ok(path);
                }
                Iteration::Exceeded(usize::MAX) => return Err(SearchError::Exhausted),
                Iteration::Exceeded(next) => {
                    log::trace!("{NAME} search raising bound {bound} -> {next}");
                    bound = next;
                }
            }
        }

        Err(SearchError::BoundExceeded { bound })
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::{ExactSearch, no_locks, testing};

    fn search(start: &BoardState) -> Result<Vec<BoardState>, SearchError> {
        BoundedSearch::default().search(start, &no_locks(start), &mut SearchBudget::unlimited())
    }

    #[test]
    fn test_goal_returns_single_state() {
        let goal = BoardState::goal(4);
        assert_eq!(search(&goal), Ok(vec![goal]));
    }

    #[test]
    fn test_one_move_board() {
        let start = BoardState::new(3, vec![1, 2, 3, 4, 5, 6, 7, 0, 8]).unwrap();
        let path = search(&start).unwrap();
        assert_eq!(path, vec![start, BoardState::goal(3)]);
    }

    #[test]
    fn test_matches_exact_search_length() {
        for text in [
            "0 1 3 4 2 5 7 8 6",
            "4 1 2 0 8 7 6 3 5",
            "1 2 3 0 4 6 7 5 8",
            "5 1 3 4 0 2 7 8 6",
        ] {
            let start: BoardState = text.parse().unwrap();
            let bounded = search(&start).unwrap();
            let exact = ExactSearch::new()
                .search(&start, &no_locks(&start), &mut SearchBudget::unlimited())
                .unwrap();
            testing::assert_valid_path(&start, &bounded);
            assert_eq!(bounded.len(), exact.len(), "{start}");
        }
    }

    #[test]
    fn test_solves_shallow_four_by_four() {
        let start = [Direction::Up, Direction::Left, Direction::Left, Direction::Down]
            .into_iter()
            .try_fold(BoardState::goal(4), |board, dir| board.apply_move(dir))
            .unwrap();
        let path = search(&start).unwrap();
        testing::assert_valid_path(&start, &path);
        assert_eq!(
            Some(path.len() - 1),
            testing::breadth_first_distance_within(&start, 8)
        );
    }

    #[test]
    fn test_iteration_cap() {
        let start: BoardState = "8 6 7 2 5 4 3 0 1".parse().unwrap();
        let result = BoundedSearch::new(1).search(
            &start,
            &no_locks(&start),
            &mut SearchBudget::unlimited(),
        );
        assert!(matches!(result, Err(SearchError::BoundExceeded { .. })));
    }

    #[test]
    fn test_fully_locked_board_exhausts() {
        let start = BoardState::new(2, vec![1, 2, 0, 3]).unwrap();
        let locked = CellSet::from_fn(4, |_| true);
        let result =
            BoundedSearch::default().search(&start, &locked, &mut SearchBudget::unlimited());
        assert_eq!(result, Err(SearchError::Exhausted));
    }
}
