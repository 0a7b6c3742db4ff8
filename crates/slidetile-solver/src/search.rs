use std::fmt::Debug;

use slidetile_core::{BoardState, CellSet};

use crate::{SearchBudget, SearchError};

/// A whole-board search from a start state to the goal.
///
/// Implementations must never move a tile out of a `locked` cell, which lets
/// the constructive reducer hand them a residual region of a larger board.
pub trait Search: Debug + Send + Sync {
    /// Returns the name of the search.
    fn name(&self) -> &'static str;

    /// Searches from `start` to the goal.
    ///
    /// On success the returned states begin with `start` and end with the goal,
    /// each one legal move from the previous.
    ///
    /// # Errors
    ///
    /// Returns [`SearchError`] if the goal was not reached within the search's
    /// own limits or the shared `budget`.
    fn search(
        &self,
        start: &BoardState,
        locked: &CellSet,
        budget: &mut SearchBudget,
    ) -> Result<Vec<BoardState>, SearchError>;
}

/// Returns a lock set with nothing locked for `board`.
#[must_use]
pub fn no_locks(board: &BoardState) -> CellSet {
    CellSet::new(board.cell_count())
}
