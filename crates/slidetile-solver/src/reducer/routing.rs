//! Breadth-first routing of one tile, or of the empty cell alone.
//!
//! Both searches return the cells the empty cell moves through, in order,
//! ready for [`Trajectory::slide_through`](crate::Trajectory::slide_through).

use std::collections::VecDeque;

use slidetile_core::{BoardState, CellSet, Direction, Position};

use crate::{SearchBudget, SearchError};

const UNVISITED: u32 = u32::MAX;

/// Routes the tile at `tile` to `target` without moving any locked tile.
///
/// Searches the combined `(tile cell, empty cell)` state rather than whole
/// boards. The empty cell may enter a locked cell only if it is the tile's own
/// cell or `target`.
///
/// # Errors
///
/// Returns [`SearchError::Exhausted`] if no route exists, or a budget error.
pub(crate) fn route_tile(
    board: &BoardState,
    tile: usize,
    target: usize,
    locked: &CellSet,
    budget: &mut SearchBudget,
) -> Result<Vec<usize>, SearchError> {
    if tile == target {
        return Ok(Vec::new());
    }

    let size = board.size();
    let cells = board.cell_count();
    let encode = |tile: usize, empty: usize| tile * cells + empty;
    let start = encode(tile, board.empty_index());

    let mut parents = vec![UNVISITED; cells * cells];
    let mut queue = VecDeque::from([start]);
    parents[start] = to_u32(start);

    while let Some(state) = queue.pop_front() {
        let (tile, empty) = (state / cells, state % cells);
        if tile == target {
            return Ok(unwind(&parents, state, |state| state % cells));
        }
        budget.tick()?;

        for next in adjacent(empty, size) {
            if locked.contains(next) && next != tile && next != target {
                continue;
            }
            let moved_tile = if next == tile { empty } else { tile };
            let child = encode(moved_tile, next);
            if parents[child] == UNVISITED {
                parents[child] = to_u32(state);
                queue.push_back(child);
            }
        }
    }

    Err(SearchError::Exhausted)
}

/// Routes the empty cell to `target` through unlocked cells only.
///
/// # Errors
///
/// Returns [`SearchError::Exhausted`] if no route exists, or a budget error.
pub(crate) fn route_empty(
    board: &BoardState,
    target: usize,
    locked: &CellSet,
    budget: &mut SearchBudget,
) -> Result<Vec<usize>, SearchError> {
    let start = board.empty_index();
    if start == target {
        return Ok(Vec::new());
    }

    let size = board.size();
    let mut parents = vec![UNVISITED; board.cell_count()];
    let mut queue = VecDeque::from([start]);
    parents[start] = to_u32(start);

    while let Some(cell) = queue.pop_front() {
        if cell == target {
            return Ok(unwind(&parents, cell, |cell| cell));
        }
        budget.tick()?;

        for next in adjacent(cell, size) {
            if !locked.contains(next) && parents[next] == UNVISITED {
                parents[next] = to_u32(cell);
                queue.push_back(next);
            }
        }
    }

    Err(SearchError::Exhausted)
}

fn adjacent(cell: usize, size: usize) -> impl Iterator<Item = usize> {
    let pos = Position::from_index(cell, size);
    Direction::ALL
        .into_iter()
        .filter_map(move |dir| pos.step(dir, size))
        .map(move |pos| pos.to_index(size))
}

/// Follows parent links back to the root, mapping each visited state to the
/// cell the empty cell occupies there. The root itself is excluded.
fn unwind(parents: &[u32], mut state: usize, empty_of: impl Fn(usize) -> usize) -> Vec<usize> {
    let mut cells = Vec::new();
    loop {
        let parent = parents[state] as usize;
        if parent == state {
            break;
        }
        cells.push(empty_of(state));
        state = parent;
    }
    cells.reverse();
    cells
}

#[expect(clippy::cast_possible_truncation)]
fn to_u32(state: usize) -> u32 {
    debug_assert!(state < UNVISITED as usize);
    state as u32
}
