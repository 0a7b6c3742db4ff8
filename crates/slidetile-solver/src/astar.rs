use std::collections::HashSet;

use slidetile_core::{BoardState, CellSet};

use crate::{
    PriorityQueue, Search, SearchBudget, SearchError,
    arena::{FrontierEntry, FrontierOrder, SearchArena, SearchNode},
};

const NAME: &str = "exact";

/// Best-first search with the Manhattan-distance heuristic (A\*).
///
/// With [`FrontierOrder::Optimal`] the heuristic is consistent, so the first
/// goal node dequeued lies on a shortest path and closed states never need to
/// be reopened. Duplicate frontier entries are discarded when dequeued.
///
/// The explored set grows quickly with board size; this is intended for 3×3
/// boards and small residual regions of larger ones.
///
/// # Examples
///
/// ```
/// use slidetile_core::BoardState;
/// use slidetile_solver::{ExactSearch, Search as _, SearchBudget, no_locks};
///
/// let start = BoardState::new(3, vec![1, 2, 3, 4, 5, 6, 0, 7, 8])?;
/// let path = ExactSearch::new().search(&start, &no_locks(&start), &mut SearchBudget::unlimited())?;
/// assert_eq!(path.len(), 3);
/// assert!(path.last().unwrap().is_goal());
/// # Ok::<(), Box<dyn std::error::Error>>(())
/// ```
#[derive(Debug, Default, Clone, Copy)]
pub struct ExactSearch {
    order: FrontierOrder,
}

impl ExactSearch {
    /// Creates an optimal A\* search.
    #[must_use]
    pub const fn new() -> Self {
        Self {
            order: FrontierOrder::Optimal,
        }
    }

    /// Creates a search with the given frontier order.
    #[must_use]
    pub const fn with_order(order: FrontierOrder) -> Self {
        Self { order }
    }

    /// Returns the frontier order.
    #[must_use]
    pub const fn order(&self) -> FrontierOrder {
        self.order
    }
}

impl Search for ExactSearch {
    fn name(&self) -> &'static str {
        NAME
    }

    fn search(
        &self,
        start: &BoardState,
        locked: &CellSet,
        budget: &mut SearchBudget,
    ) -> Result<Vec<BoardState>, SearchError> {
        let mut arena = SearchArena::new();
        let mut open = PriorityQueue::new();
        let mut closed = HashSet::new();

        let root = SearchNode {
            state: start.clone(),
            g: 0,
            h: start.manhattan_distance(),
            parent: None,
        };
        let root_id = arena.push(root);
        open.enqueue(FrontierEntry::new(self.order, arena.get(root_id), root_id));

        while let Some(entry) = open.dequeue() {
            let id = entry.id();
            let node = arena.get(id);
            if closed.contains(&node.state) {
                continue;
            }
            if node.state.is_goal() {
                log::debug!(
                    "{NAME} search reached the goal at depth {} ({} nodes generated, {} closed)",
                    node.g,
                    arena.len(),
                    closed.len()
                );
                return Ok(arena.path_to(id));
            }
            budget.tick()?;

            let g = node.g + 1;
            let neighbors = node.state.neighbors_avoiding(locked);
            closed.insert(node.state.clone());

            for (_, state) in neighbors {
                if closed.contains(&state) {
                    continue;
                }
                let child = SearchNode {
                    h: state.manhattan_distance(),
                    state,
                    g,
                    parent: Some(id),
                };
                let child_id = arena.push(child);
                open.enqueue(FrontierEntry::new(
                    self.order,
                    arena.get(child_id),
                    child_id,
                ));
            }
        }

        log::debug!(
            "{NAME} search exhausted {} states without reaching the goal",
            closed.len()
        );
        Err(SearchError::Exhausted)
    }
}
