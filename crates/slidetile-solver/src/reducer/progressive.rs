use slidetile_core::CellSet;

use super::{ReduceError, place_value};
use crate::{SearchBudget, SearchError, SolverConfig, Trajectory};

#[derive(Debug, Clone, Copy, derive_more::Display)]
enum PassOrder {
    #[display("column-major")]
    ColumnMajor,
    #[display("row-major")]
    RowMajor,
}

impl PassOrder {
    /// Every cell except the last, in traversal order.
    fn cells(self, size: usize) -> impl Iterator<Item = usize> {
        let last = size * size - 1;
        (0..size)
            .flat_map(move |major| {
                (0..size).map(move |minor| match self {
                    Self::ColumnMajor => minor * size + major,
                    Self::RowMajor => major * size + minor,
                })
            })
            .filter(move |&cell| cell != last)
    }
}

/// Alternates column-major and row-major passes until the board is solved or
/// a full round locks nothing new.
///
/// The lock set is shared by every pass of one run.
pub(super) fn run(
    trajectory: &mut Trajectory,
    config: &SolverConfig,
    budget: &mut SearchBudget,
) -> Result<(), ReduceError> {
    let size = trajectory.current().size();
    let mut locked = CellSet::new(size * size);

    for round in 0..config.max_passes() {
        let mut progress = 0;
        for order in [PassOrder::ColumnMajor, PassOrder::RowMajor] {
            progress += pass(trajectory, order, &mut locked, budget)?;
            if trajectory.current().is_goal() {
                log::debug!("progressive passes solved the board in round {}", round + 1);
                return Ok(());
            }
        }
        log::debug!(
            "progressive round {} locked {progress} cells ({} total)",
            round + 1,
            locked.len()
        );
        if progress == 0 {
            break;
        }
    }

    Err(SearchError::Stalled {
        locked: locked.len(),
    }
    .into())
}

/// Runs one pass, returning the number of newly locked cells.
///
/// A non-fatal routing failure ends the pass early.
fn pass(
    trajectory: &mut Trajectory,
    order: PassOrder,
    locked: &mut CellSet,
    budget: &mut SearchBudget,
) -> Result<usize, ReduceError> {
    let size = trajectory.current().size();
    let mut progress = 0;

    for cell in order.cells(size) {
        if locked.contains(cell) {
            continue;
        }
        let board = trajectory.current();
        if !board.is_resident(cell) {
            let value = board.goal_value_at(cell);
            match place_value(trajectory, value, cell, locked, budget) {
                Ok(()) => {}
                Err(err) if err.is_fatal() => return Err(err),
                Err(err) => {
                    log::debug!(
                        "{order} pass could not route {value} to {}: {err}\n{}\nlocked: {locked:?}",
                        trajectory.current().position(cell),
                        trajectory.current(),
                    );
                    break;
                }
            }
        }
        locked.insert(cell);
        progress += 1;
    }

    Ok(progress)
}

#[cfg(test)]
mod tests {
    use slidetile_core::BoardState;

    use super::*;

    #[test]
    fn test_pass_orders() {
        assert_eq!(
            PassOrder::ColumnMajor.cells(3).collect::<Vec<_>>(),
            vec![0, 3, 6, 1, 4, 7, 2, 5]
        );
        assert_eq!(
            PassOrder::RowMajor.cells(3).collect::<Vec<_>>(),
            vec![0, 1, 2, 3, 4, 5, 6, 7]
        );
    }

    #[test]
    fn test_resident_cells_are_locked() {
        let mut trajectory = Trajectory::new(BoardState::goal(4));
        let mut locked = CellSet::new(16);
        let progress = pass(
            &mut trajectory,
            PassOrder::RowMajor,
            &mut locked,
            &mut SearchBudget::unlimited(),
        )
        .unwrap();
        assert_eq!(progress, 15);
        assert_eq!(trajectory.move_count(), 0);
    }

    #[test]
    fn test_locked_cells_keep_their_tiles() {
        let start: BoardState = "
            12  1 10  2
             7 11  4 14
             5  _  9 15
             8 13  6  3
        "
        .parse()
        .unwrap();
        let mut trajectory = Trajectory::new(start);
        let result = run(
            &mut trajectory,
            &SolverConfig::default(),
            &mut SearchBudget::unlimited(),
        );
        let board = trajectory.current();
        if result.is_ok() {
            assert!(board.is_goal());
        }
        // The first column is always reachable greedily except its last cell.
        for cell in [0, 4, 8] {
            assert!(board.is_resident(cell), "{board}");
        }
    }
}
