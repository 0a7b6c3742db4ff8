use slidetile_core::BoardState;

use crate::{
    BoundedSearch, ExactSearch, ReductionTier, Search, SearchBudget, SolveError, SolverConfig,
    Strategy, Trajectory, reducer,
};

/// Statistics collected during one solve.
#[derive(Debug, Default, Clone, PartialEq, Eq)]
pub struct SolveStats {
    expanded: usize,
    tiers: Vec<ReductionTier>,
    raw_moves: usize,
}

impl SolveStats {
    /// Returns the number of nodes expanded by every search and routing step.
    #[must_use]
    pub fn expanded(&self) -> usize {
        self.expanded
    }

    /// Returns the reducer tiers that were started, in order.
    ///
    /// Empty unless the constructive strategy was used.
    #[must_use]
    pub fn tiers(&self) -> &[ReductionTier] {
        &self.tiers
    }

    /// Returns the move count before loops were removed.
    #[must_use]
    pub fn raw_moves(&self) -> usize {
        self.raw_moves
    }
}

/// Solves sliding-tile boards.
///
/// A board of size ≤ 3 is searched exactly with A\*. Larger boards go to the
/// constructive reducer unless a strategy is forced through [`SolverConfig`].
///
/// # Examples
///
/// ```
/// use slidetile_core::BoardState;
/// use slidetile_solver::{Solver, Strategy};
///
/// let solver = Solver::default();
/// let board = BoardState::new(3, vec![1, 2, 3, 4, 5, 6, 0, 7, 8])?;
///
/// let solution = solver.solve(&board)?;
/// assert_eq!(solution.move_count(), 2);
/// assert_eq!(solution.strategy(), Strategy::Exact);
/// assert!(solution.states().last().unwrap().is_goal());
/// # Ok::<(), Box<dyn std::error::Error>>(())
/// ```
#[derive(Debug, Default, Clone)]
pub struct Solver {
    config: SolverConfig,
}

impl Solver {
    /// Creates a solver with the given configuration.
    #[must_use]
    pub fn new(config: SolverConfig) -> Self {
        Self { config }
    }

    /// Returns the configuration.
    #[must_use]
    pub fn config(&self) -> &SolverConfig {
        &self.config
    }

    /// Returns the strategy used for `board`.
    #[must_use]
    pub fn strategy_for(&self, board: &BoardState) -> Strategy {
        self.config
            .strategy()
            .unwrap_or_else(|| Strategy::for_size(board.size()))
    }

    /// Solves `initial`, returning a validated path to the goal.
    ///
    /// # Errors
    ///
    /// Returns [`SolveError::Unsolvable`] if the board's parity rules out a
    /// solution. No search is attempted in that case.
    ///
    /// Returns [`SolveError::NoPath`] if the chosen strategy gave up: the
    /// budget or deadline ran out, or every reducer tier was exhausted.
    pub fn solve(&self, initial: &BoardState) -> Result<crate::Solution, SolveError> {
        if !initial.is_solvable() {
            log::debug!("rejecting unsolvable board\n{initial}");
            return Err(SolveError::Unsolvable);
        }

        let strategy = self.strategy_for(initial);
        let mut budget = self.config.budget();
        let mut stats = SolveStats::default();
        let mut trajectory = Trajectory::new(initial.clone());

        if !initial.is_goal() {
            let result = self.run(strategy, &mut trajectory, &mut budget, &mut stats);
            stats.expanded = budget.expanded();
            if let Err(err) = result {
                log::info!(
                    "{strategy} solve of a {size}x{size} board failed after {} expansions: {err}",
                    stats.expanded,
                    size = initial.size(),
                );
                return Err(err);
            }
        }

        stats.raw_moves = trajectory.move_count();
        if self.config.compact_path() {
            let removed = trajectory.compact();
            if removed > 0 {
                log::debug!("removed {removed} looping moves");
            }
        }

        let solution = trajectory.finish(strategy, stats)?;
        log::info!(
            "{strategy} solve of a {size}x{size} board: {} moves, {} expansions",
            solution.move_count(),
            solution.stats().expanded(),
            size = initial.size(),
        );
        Ok(solution)
    }

    fn run(
        &self,
        strategy: Strategy,
        trajectory: &mut Trajectory,
        budget: &mut SearchBudget,
        stats: &mut SolveStats,
    ) -> Result<(), SolveError> {
        match strategy {
            Strategy::Exact => Self::search(&ExactSearch::new(), trajectory, budget),
            Strategy::Bounded => Self::search(
                &BoundedSearch::new(self.config.ida_max_iterations()),
                trajectory,
                budget,
            ),
            Strategy::Constructive => {
                reducer::reduce(trajectory, &self.config, budget, &mut stats.tiers)
            }
        }
    }

    fn search<S>(
        search: &S,
        trajectory: &mut Trajectory,
        budget: &mut SearchBudget,
    ) -> Result<(), SolveError>
    where
        S: Search,
    {
        let start = trajectory.current();
        let path = search.search(start, &crate::no_locks(start), budget)?;
        trajectory.append_path(path)?;
        Ok(())
    }
}

/// Solves `initial` with the default configuration.
///
/// The returned states start at `initial` and end at the goal; each is one
/// legal move from the previous.
///
/// # Errors
///
/// See [`Solver::solve`].
///
/// # Examples
///
/// ```
/// use slidetile_core::BoardState;
///
/// let board = BoardState::new(3, vec![2, 1, 3, 4, 5, 6, 7, 8, 0])?;
/// assert_eq!(
///     slidetile_solver::solve(&board),
///     Err(slidetile_solver::SolveError::Unsolvable)
/// );
/// # Ok::<(), slidetile_core::BoardError>(())
/// ```
pub fn solve(initial: &BoardState) -> Result<Vec<BoardState>, SolveError> {
    Solver::default()
        .solve(initial)
        .map(crate::Solution::into_states)
}
