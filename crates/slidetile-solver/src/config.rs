use std::time::{Duration, Instant};

use crate::SearchError;

/// The top-level algorithm used for a solve.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, derive_more::Display, derive_more::IsVariant)]
pub enum Strategy {
    /// A\* with the Manhattan heuristic; optimal, memory grows with the explored set.
    #[display("exact")]
    Exact,
    /// IDA\*; optimal, memory bounded by the solution depth.
    #[display("bounded")]
    Bounded,
    /// Lock tiles region by region and search only the small residue.
    #[display("constructive")]
    Constructive,
}

impl Strategy {
    /// Boards up to this size are searched exactly when no strategy is forced.
    pub const EXACT_MAX_SIZE: usize = 3;

    /// Returns the strategy used for a board of `size` when none is configured.
    #[must_use]
    pub fn for_size(size: usize) -> Self {
        if size <= Self::EXACT_MAX_SIZE {
            Self::Exact
        } else {
            Self::Constructive
        }
    }
}

/// Tunables for [`Solver`](crate::Solver).
///
/// # Examples
///
/// ```
/// use std::time::Duration;
///
/// use slidetile_solver::{SolverConfig, Strategy};
///
/// let config = SolverConfig::default()
///     .with_strategy(Strategy::Bounded)
///     .with_timeout(Some(Duration::from_secs(5)));
/// assert_eq!(config.strategy(), Some(Strategy::Bounded));
/// ```
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct SolverConfig {
    strategy: Option<Strategy>,
    max_expansions: Option<usize>,
    ida_max_iterations: usize,
    timeout: Option<Duration>,
    compact_path: bool,
    max_passes: usize,
}

impl Default for SolverConfig {
    fn default() -> Self {
        Self {
            strategy: None,
            max_expansions: Some(Self::DEFAULT_MAX_EXPANSIONS),
            ida_max_iterations: Self::DEFAULT_IDA_MAX_ITERATIONS,
            timeout: None,
            compact_path: true,
            max_passes: Self::DEFAULT_MAX_PASSES,
        }
    }
}

impl SolverConfig {
    /// Default node expansion budget shared by every search in one solve.
    pub const DEFAULT_MAX_EXPANSIONS: usize = 20_000_000;
    /// Default cap on IDA\* threshold increases.
    pub const DEFAULT_IDA_MAX_ITERATIONS: usize = 100;
    /// Default cap on progressive column/row pass rounds.
    pub const DEFAULT_MAX_PASSES: usize = 8;

    /// Forces a strategy instead of choosing one by board size.
    #[must_use]
    pub fn with_strategy(mut self, strategy: Strategy) -> Self {
        self.strategy = Some(strategy);
        self
    }

    /// Sets the node expansion budget; `None` removes the limit.
    #[must_use]
    pub fn with_max_expansions(mut self, max_expansions: Option<usize>) -> Self {
        self.max_expansions = max_expansions;
        self
    }

    /// Sets how many times IDA\* may raise its threshold.
    #[must_use]
    pub fn with_ida_max_iterations(mut self, iterations: usize) -> Self {
        self.ida_max_iterations = iterations;
        self
    }

    /// Sets a wall-clock limit for each solve.
    #[must_use]
    pub fn with_timeout(mut self, timeout: Option<Duration>) -> Self {
        self.timeout = timeout;
        self
    }

    /// Enables or disables removing loops from the assembled path.
    #[must_use]
    pub fn with_compact_path(mut self, compact: bool) -> Self {
        self.compact_path = compact;
        self
    }

    /// Sets the cap on progressive pass rounds.
    #[must_use]
    pub fn with_max_passes(mut self, passes: usize) -> Self {
        self.max_passes = passes;
        self
    }

    /// Returns the forced strategy, if any.
    #[must_use]
    pub fn strategy(&self) -> Option<Strategy> {
        self.strategy
    }

    /// Returns the node expansion budget.
    #[must_use]
    pub fn max_expansions(&self) -> Option<usize> {
        self.max_expansions
    }

    /// Returns the IDA\* threshold iteration cap.
    #[must_use]
    pub fn ida_max_iterations(&self) -> usize {
        self.ida_max_iterations
    }

    /// Returns the wall-clock limit.
    #[must_use]
    pub fn timeout(&self) -> Option<Duration> {
        self.timeout
    }

    /// Returns whether loops are removed from the assembled path.
    #[must_use]
    pub fn compact_path(&self) -> bool {
        self.compact_path
    }

    /// Returns the cap on progressive pass rounds.
    #[must_use]
    pub fn max_passes(&self) -> usize {
        self.max_passes
    }

    /// Creates a fresh budget for one solve.
    #[must_use]
    pub fn budget(&self) -> SearchBudget {
        SearchBudget::new(self.max_expansions, self.timeout)
    }
}

/// Cooperative limits checked by every search loop.
///
/// One budget is shared by all the searches of a single solve, so fallback
/// tiers cannot extend the total work beyond it.
#[derive(Debug, Clone)]
pub struct SearchBudget {
    max_expansions: Option<usize>,
    deadline: Option<Instant>,
    expanded: usize,
}

impl SearchBudget {
    const DEADLINE_CHECK_INTERVAL: usize = 256;

    /// Creates a budget. The deadline starts counting now.
    #[must_use]
    pub fn new(max_expansions: Option<usize>, timeout: Option<Duration>) -> Self {
        Self {
            max_expansions,
            deadline: timeout.map(|t| Instant::now() + t),
            expanded: 0,
        }
    }

    /// Creates a budget without limits.
    #[must_use]
    pub fn unlimited() -> Self {
        Self::new(None, None)
    }

    /// Returns the number of nodes expanded so far.
    #[must_use]
    pub fn expanded(&self) -> usize {
        self.expanded
    }

    /// Records one node expansion.
    ///
    /// # Errors
    ///
    /// Returns [`SearchError::BudgetExhausted`] or [`SearchError::DeadlineExceeded`]
    /// once a limit is reached.
    pub fn tick(&mut self) -> Result<(), SearchError> {
        self.expanded += 1;
        if let Some(max) = self.max_expansions
            && self.expanded > max
        {
            return Err(SearchError::BudgetExhausted {
                expanded: self.expanded,
            });
        }
        if let Some(deadline) = self.deadline
            && self.expanded % Self::DEADLINE_CHECK_INTERVAL == 0
            && Instant::now() >= deadline
        {
            return Err(SearchError::DeadlineExceeded);
        }
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_strategy_for_size() {
        assert_eq!(Strategy::for_size(2), Strategy::Exact);
        assert_eq!(Strategy::for_size(3), Strategy::Exact);
        assert_eq!(Strategy::for_size(4), Strategy::Constructive);
        assert_eq!(Strategy::for_size(9), Strategy::Constructive);
    }

    #[test]
    fn test_budget_exhausts() {
        let mut budget = SearchBudget::new(Some(3), None);
        assert!(budget.tick().is_ok());
        assert!(budget.tick().is_ok());
        assert!(budget.tick().is_ok());
        assert_eq!(
            budget.tick(),
            Err(SearchError::BudgetExhausted { expanded: 4 })
        );
    }

    #[test]
    fn test_budget_deadline() {
        let mut budget = SearchBudget::new(None, Some(Duration::ZERO));
        let err = (0..SearchBudget::DEADLINE_CHECK_INTERVAL)
            .map(|_| budget.tick())
            .find(Result::is_err);
        assert_eq!(err, Some(Err(SearchError::DeadlineExceeded)));
    }

    #[test]
    fn test_unlimited_budget() {
        let mut budget = SearchBudget::unlimited();
        for _ in 0..10_000 {
            budget.tick().unwrap();
        }
        assert_eq!(budget.expanded(), 10_000);
    }

    #[test]
    fn test_config_builders() {
        let config = SolverConfig::default()
            .with_max_expansions(None)
            .with_ida_max_iterations(7)
            .with_compact_path(false)
            .with_max_passes(2);
        assert_eq!(config.strategy(), None);
        assert_eq!(config.max_expansions(), None);
        assert_eq!(config.ida_max_iterations(), 7);
        assert!(!config.compact_path());
        assert_eq!(config.max_passes(), 2);
        assert_eq!(config.timeout(), None);
    }
}
