//! Constructive reduction for boards too large to search directly.
//!
//! The reducer pins tiles into their goal cells one at a time and only ever
//! searches a small unsolved residue. It runs up to three tiers in order, each
//! continuing from wherever the previous one left the board:
//!
//! 1. [`ReductionTier::Progressive`]: alternating column-major and row-major
//!    passes that route each missing value home and lock it.
//! 2. [`ReductionTier::Layered`]: solves one outer row and column at a time,
//!    finishing each with a corner rotation, then searches the last 3×3 block.
//! 3. [`ReductionTier::Residue`]: searches the unsolved square left after the
//!    completed outer layers, if it is at most 4×4.
//!
//! The tiers are not complete: a solvable board can exhaust all three.

use slidetile_core::{BoardState, CellSet, Position};

use crate::{PathError, SearchBudget, SearchError, SolveError, SolverConfig, Trajectory};

mod layered;
mod progressive;
mod routing;

/// A stage of the constructive reducer.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, derive_more::Display)]
pub enum ReductionTier {
    /// Greedy column and row passes.
    #[display("progressive")]
    Progressive,
    /// Layer-by-layer placement with corner rotations.
    #[display("layered")]
    Layered,
    /// Direct search of the remaining square.
    #[display("residue")]
    Residue,
}

impl ReductionTier {
    /// All tiers, in the order they are tried.
    pub const ALL: [Self; 3] = [Self::Progressive, Self::Layered, Self::Residue];
}

/// Why a tier gave up.
#[derive(Debug, Clone, Copy, PartialEq, Eq, derive_more::Display, derive_more::From)]
pub(crate) enum ReduceError {
    #[display("{_0}")]
    Search(SearchError),
    #[display("{_0}")]
    Path(PathError),
}

impl ReduceError {
    fn is_fatal(self) -> bool {
        match self {
            Self::Search(err) => err.is_fatal(),
            Self::Path(_) => true,
        }
    }
}

impl From<ReduceError> for SolveError {
    fn from(err: ReduceError) -> Self {
        match err {
            ReduceError::Search(err) => err.into(),
            ReduceError::Path(err) => err.into(),
        }
    }
}

/// Runs the reduction tiers until the trajectory reaches the goal.
///
/// Every tier that is started is recorded in `tiers`.
pub(crate) fn reduce(
    trajectory: &mut Trajectory,
    config: &SolverConfig,
    budget: &mut SearchBudget,
    tiers: &mut Vec<ReductionTier>,
) -> Result<(), SolveError> {
    for tier in ReductionTier::ALL {
        if trajectory.current().is_goal() {
            return Ok(());
        }
        tiers.push(tier);
        log::debug!(
            "starting {tier} tier after {} moves",
            trajectory.move_count()
        );
        let result = match tier {
            ReductionTier::Progressive => progressive::run(trajectory, config, budget),
            ReductionTier::Layered => layered::run(trajectory, budget),
            ReductionTier::Residue => layered::run_residue(trajectory, config, budget),
        };
        match result {
            Ok(()) if trajectory.current().is_goal() => return Ok(()),
            Ok(()) => log::debug!("{tier} tier finished without reaching the goal"),
            Err(err) if err.is_fatal() => return Err(err.into()),
            Err(err) => log::debug!("{tier} tier failed: {err}"),
        }
    }

    if trajectory.current().is_goal() {
        Ok(())
    } else {
        Err(SolveError::NoPath)
    }
}

/// Returns how many outer layers are already solved.
///
/// Layer `k` is row `k` from column `k` rightwards together with column `k`
/// from row `k` downwards. Layers are counted from the top-left and stop at
/// the first unsolved one.
pub(crate) fn completed_layers(board: &BoardState) -> usize {
    let size = board.size();
    (0..size)
        .take_while(|&k| {
            let row = (k..size).map(|col| Position::new(k, col));
            let col = (k..size).map(|row| Position::new(row, k));
            row.chain(col)
                .all(|pos| board.is_resident(pos.to_index(size)))
        })
        .count()
}

/// Locks every cell in the first `layers` rows or columns.
pub(crate) fn locks_outside(size: usize, layers: usize) -> CellSet {
    CellSet::from_fn(size * size, |index| {
        let pos = Position::from_index(index, size);
        pos.row() < layers || pos.col() < layers
    })
}

/// Routes the goal value of `cell` into it.
///
/// `cell` itself must not be locked.
pub(crate) fn place_value(
    trajectory: &mut Trajectory,
    value: u16,
    cell: usize,
    locked: &CellSet,
    budget: &mut SearchBudget,
) -> Result<(), ReduceError> {
    let board = trajectory.current();
    let from = board.position_of(value).ok_or(SearchError::Exhausted)?;
    let cells = routing::route_tile(board, from, cell, locked, budget)?;
    trajectory.slide_through(&cells)?;
    Ok(())
}

/// Moves the empty cell to `cell` through unlocked cells.
pub(crate) fn place_empty(
    trajectory: &mut Trajectory,
    cell: usize,
    locked: &CellSet,
    budget: &mut SearchBudget,
) -> Result<(), ReduceError> {
    let cells = routing::route_empty(trajectory.current(), cell, locked, budget)?;
    trajectory.slide_through(&cells)?;
    Ok(())
}
