//! Solving engine for sliding-tile puzzles.
//!
//! # Overview
//!
//! [`Solver`] picks one of three [`Strategy`] values for a board:
//!
//! - [`Strategy::Exact`]: A\* ([`ExactSearch`]) with the Manhattan-distance
//!   heuristic. Optimal; used for boards up to 3×3.
//! - [`Strategy::Bounded`]: IDA\* ([`BoundedSearch`]). Optimal with memory
//!   proportional to the solution depth; used on request and for 4×4 residues.
//! - [`Strategy::Constructive`]: pins tiles into place region by region and
//!   only searches the small unsolved remainder. Used for boards larger than
//!   3×3. See [`ReductionTier`].
//!
//! Every solve first checks the board's parity and rejects unsolvable boards
//! without searching. All searches share one [`SearchBudget`], so a node
//! limit or deadline set in [`SolverConfig`] bounds the whole solve.
//!
//! Searches and routing steps report [`SearchError`]; the reducer recovers
//! from them by falling back to the next tier, and only an exhausted solve
//! reaches the caller as [`SolveError::NoPath`].
//!
//! # Examples
//!
//! ```
//! use slidetile_core::BoardState;
//! use slidetile_solver::{Solver, SolverConfig, Strategy};
//!
//! let board: BoardState = "
//!     5  1  2  3
//!     9  6  7  4
//!    13 10 11  8
//!     _ 14 15 12
//! ".parse()?;
//!
//! let solution = Solver::new(SolverConfig::default()).solve(&board)?;
//! assert_eq!(solution.strategy(), Strategy::Constructive);
//! assert_eq!(solution.states().first(), Some(&board));
//! assert!(solution.states().last().unwrap().is_goal());
//! # Ok::<(), Box<dyn std::error::Error>>(())
//! ```

pub use self::{
    arena::FrontierOrder,
    astar::ExactSearch,
    config::{SearchBudget, SolverConfig, Strategy},
    error::{PathError, SearchError, SolveError},
    ida::BoundedSearch,
    priority_queue::PriorityQueue,
    reducer::ReductionTier,
    search::{Search, no_locks},
    solver::{SolveStats, Solver, solve},
    trajectory::{Solution, Trajectory, validate_path},
};

mod arena;
mod astar;
mod config;
mod error;
mod ida;
mod priority_queue;
mod reducer;
mod search;
mod solver;
pub mod testing;
mod trajectory;
