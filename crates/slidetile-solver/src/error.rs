/// Errors surfaced to callers of [`Solver::solve`](crate::Solver::solve).
#[derive(
    Debug, Clone, Copy, PartialEq, Eq, derive_more::Display, derive_more::Error, derive_more::IsVariant,
)]
pub enum SolveError {
    /// The board's parity proves the goal is unreachable. Detected before any search.
    #[display("board is not solvable")]
    Unsolvable,
    /// Every solving tier was exhausted without reaching the goal.
    ///
    /// The board passed the solvability check, so this reports a limit of the
    /// solver (budget, deadline, or reducer coverage), not a proof of unsolvability.
    #[display("no solution path found")]
    NoPath,
}

impl From<SearchError> for SolveError {
    fn from(_: SearchError) -> Self {
        Self::NoPath
    }
}

impl From<PathError> for SolveError {
    fn from(_: PathError) -> Self {
        Self::NoPath
    }
}

/// Errors produced by an individual search or routing step.
#[derive(
    Debug, Clone, Copy, PartialEq, Eq, derive_more::Display, derive_more::Error, derive_more::IsVariant,
)]
pub enum SearchError {
    /// The explored space was exhausted without reaching the local goal.
    #[display("search space exhausted")]
    Exhausted,
    /// The iterative-deepening threshold was raised too many times.
    #[display("cost bound exceeded (last bound {bound})")]
    BoundExceeded {
        /// The last threshold that was searched.
        bound: usize,
    },
    /// Progressive locking stopped making progress.
    #[display("reduction stalled with {locked} cells locked")]
    Stalled {
        /// Cells locked when the reducer gave up.
        locked: usize,
    },
    /// The node expansion budget ran out.
    #[display("expansion budget exhausted after {expanded} nodes")]
    BudgetExhausted {
        /// Nodes expanded so far.
        expanded: usize,
    },
    /// The wall-clock deadline passed.
    #[display("deadline exceeded")]
    DeadlineExceeded,
}

impl SearchError {
    /// Returns `true` if retrying with another strategy cannot help because
    /// the shared budget is spent.
    #[must_use]
    pub fn is_fatal(self) -> bool {
        matches!(self, Self::BudgetExhausted { .. } | Self::DeadlineExceeded)
    }
}

/// Errors found while assembling or validating a solution path.
#[derive(
    Debug, Clone, Copy, PartialEq, Eq, derive_more::Display, derive_more::Error, derive_more::IsVariant,
)]
pub enum PathError {
    /// The path contains no states.
    #[display("path is empty")]
    Empty,
    /// The first state is not the initial board.
    #[display("path does not start at the initial board")]
    StartMismatch,
    /// The last state is not solved.
    #[display("path does not end at the goal")]
    NotGoal,
    /// The state at `index` is not one legal move away from its predecessor.
    #[display("state {index} is not one move from its predecessor")]
    IllegalStep {
        /// Index of the offending state in the path.
        index: usize,
    },
}
