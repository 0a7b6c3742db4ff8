use slidetile_core::{CellSet, Position};

use super::{ReduceError, completed_layers, locks_outside, place_empty, place_value};
use crate::{
    BoundedSearch, ExactSearch, Search, SearchBudget, SearchError, SolverConfig, Trajectory,
};

/// Largest square the layered reducer searches directly.
const RESIDUE_SIZE: usize = 3;

/// The two last cells of a row or column, the cell beside the outer one that
/// holds the second tile before the rotation, and a cell two steps away that
/// holds it while the first tile is brought in.
#[derive(Debug, Clone, Copy)]
struct Pair {
    first: usize,
    second: usize,
    side: usize,
    park: usize,
}

struct Layers<'a> {
    trajectory: &'a mut Trajectory,
    budget: &'a mut SearchBudget,
    locked: CellSet,
    size: usize,
}

impl Layers<'_> {
    fn index(&self, row: usize, col: usize) -> usize {
        Position::new(row, col).to_index(self.size)
    }

    fn place(&mut self, cell: usize) -> Result<(), ReduceError> {
        let value = self.trajectory.current().goal_value_at(cell);
        self.route(value, cell)?;
        self.locked.insert(cell);
        Ok(())
    }

    fn route(&mut self, value: u16, cell: usize) -> Result<(), ReduceError> {
        place_value(self.trajectory, value, cell, &self.locked, self.budget).inspect_err(|err| {
            log::warn!(
                "layered reducer could not route {value} to {}: {err}\n{}\nlocked: {:?}",
                self.trajectory.current().position(cell),
                self.trajectory.current(),
                self.locked,
            );
        })
    }

    /// Finishes a row or column whose other cells are locked.
    ///
    /// The second value is first moved to `park`, clear of the pair. The first
    /// value is then routed into `second`, the second value into `side`, and
    /// the empty cell brought to `first`. Two slides rotate both values home.
    ///
    /// Routing the first value while the second value may still sit in
    /// `first` would leave the second value walled in: `first` has no
    /// unlocked neighbour other than the cell below it.
    fn place_pair(&mut self, pair: Pair) -> Result<(), ReduceError> {
        let board = self.trajectory.current();
        if board.is_resident(pair.first) && board.is_resident(pair.second) {
            self.locked.insert(pair.first);
            self.locked.insert(pair.second);
            return Ok(());
        }
        let first_value = board.goal_value_at(pair.first);
        let second_value = board.goal_value_at(pair.second);

        self.route(second_value, pair.park)?;
        self.locked.insert(pair.park);
        self.route(first_value, pair.second)?;
        self.locked.insert(pair.second);
        self.locked.remove(pair.park);
        self.route(second_value, pair.side)?;
        self.locked.insert(pair.side);

        place_empty(self.trajectory, pair.first, &self.locked, self.budget).inspect_err(|err| {
            log::warn!(
                "layered reducer could not bring the empty cell beside a pair: {err}\n{}",
                self.trajectory.current()
            );
        })?;
        self.trajectory.slide_to(pair.second)?;
        self.trajectory.slide_to(pair.side)?;

        self.locked.remove(pair.side);
        self.locked.insert(pair.first);
        Ok(())
    }

    fn solve_layer(&mut self, k: usize) -> Result<(), ReduceError> {
        let n = self.size;

        for col in k..n - 2 {
            self.place(self.index(k, col))?;
        }
        self.place_pair(Pair {
            first: self.index(k, n - 2),
            second: self.index(k, n - 1),
            side: self.index(k + 1, n - 1),
            park: self.index(k + 2, n - 1),
        })?;

        for row in k + 1..n - 2 {
            self.place(self.index(row, k))?;
        }
        self.place_pair(Pair {
            first: self.index(n - 2, k),
            second: self.index(n - 1, k),
            side: self.index(n - 1, k + 1),
            park: self.index(n - 1, k + 2),
        })?;

        log::debug!("layer {k} placed after {} moves", self.trajectory.move_count());
        Ok(())
    }
}

/// Solves outer layers until a 3×3 block remains, then searches it exactly.
pub(super) fn run(
    trajectory: &mut Trajectory,
    budget: &mut SearchBudget,
) -> Result<(), ReduceError> {
    let size = trajectory.current().size();
    let start = completed_layers(trajectory.current()).min(size);
    let mut layers = Layers {
        locked: locks_outside(size, start),
        trajectory,
        budget,
        size,
    };

    for k in start..size.saturating_sub(RESIDUE_SIZE) {
        layers.solve_layer(k)?;
    }

    let Layers {
        trajectory,
        budget,
        locked,
        ..
    } = layers;
    let path = ExactSearch::new().search(trajectory.current(), &locked, budget)?;
    trajectory.append_path(path)?;
    Ok(())
}

/// Searches the square left inside the completed outer layers, if it is small
/// enough: up to 3×3 exactly, 4×4 with IDA\*.
pub(super) fn run_residue(
    trajectory: &mut Trajectory,
    config: &SolverConfig,
    budget: &mut SearchBudget,
) -> Result<(), ReduceError> {
    let board = trajectory.current();
    let size = board.size();
    let done = completed_layers(board).min(size);
    let residue = size - done;
    let locked = locks_outside(size, done);

    let path = match residue {
        0..=3 => ExactSearch::new().search(board, &locked, budget)?,
        4 => BoundedSearch::new(config.ida_max_iterations()).search(board, &locked, budget)?,
        _ => {
            log::debug!("{residue}x{residue} residue is too large to search");
            return Err(SearchError::Exhausted.into());
        }
    };
    trajectory.append_path(path)?;
    Ok(())
}

#[cfg(test)]
mod tests {
    use slidetile_core::BoardState;
    use slidetile_generator::{ScrambleGenerator, ScrambleSeed};

    use super::*;
    use crate::testing;

    fn solve_layered(start: &BoardState) -> Trajectory {
        let mut trajectory = Trajectory::new(start.clone());
        run(&mut trajectory, &mut SearchBudget::unlimited()).unwrap();
        testing::assert_valid_path(start, trajectory.states());
        trajectory
    }

    fn swapped(size: usize, swaps: &[(u16, u16)]) -> BoardState {
        let tiles = BoardState::goal(size)
            .tiles()
            .iter()
            .map(|&v| {
                swaps.iter().fold(v, |v, &(a, b)| {
                    if v == a {
                        b
                    } else if v == b {
                        a
                    } else {
                        v
                    }
                })
            })
            .collect();
        let board = BoardState::new(size, tiles).unwrap();
        assert!(board.is_solvable());
        board
    }

    #[test]
    fn test_layered_four_by_four() {
        let start: BoardState = "
            12  1 10  2
             7 11  4 14
             5  _  9 15
             8 13  6  3
        "
        .parse()
        .unwrap();
        solve_layered(&start);
    }

    #[test]
    fn test_layered_row_pair_swapped() {
        // 4 sits where 3 belongs, so parking 3 in the corner first would wall
        // 4 in at the end of the top row.
        solve_layered(&swapped(4, &[(3, 4), (14, 15)]));
        solve_layered(&swapped(5, &[(4, 5), (23, 24)]));
    }

    #[test]
    fn test_layered_column_pair_swapped() {
        solve_layered(&swapped(4, &[(9, 13), (14, 15)]));
        solve_layered(&swapped(5, &[(16, 21), (23, 24)]));
    }

    #[test]
    fn test_layered_inner_pairs_swapped() {
        solve_layered(&swapped(6, &[(11, 12), (26, 32), (5, 6), (34, 35)]));
    }

    #[test]
    fn test_layered_scrambles() {
        for size in 4..=7_u8 {
            let size_usize = usize::from(size);
            let generator =
                ScrambleGenerator::new(size_usize, ScrambleGenerator::default_moves(size_usize));
            for i in 0..8_u8 {
                let seed = ScrambleSeed::from_bytes([i.wrapping_mul(37).wrapping_add(size); 32]);
                solve_layered(&generator.generate_with_seed(seed).board);
            }
        }
    }

    #[test]
    fn test_layered_five_by_five() {
        let start: BoardState = "
             6 12 22  4  8
             1  2 19  9  5
            11 13  _ 24 10
            16  3  7 14 15
            21 17 23 18 20
        "
        .parse()
        .unwrap();
        assert!(start.is_solvable());
        solve_layered(&start);
    }

    #[test]
    fn test_residue_searches_inner_square() {
        let start: BoardState = "
            1  2  3  4
            5  6  7  8
            9 10 12  _
           13 14 11 15
        "
        .parse()
        .unwrap();
        let mut trajectory = Trajectory::new(start.clone());
        run_residue(
            &mut trajectory,
            &SolverConfig::default(),
            &mut SearchBudget::unlimited(),
        )
        .unwrap();
        testing::assert_valid_path(&start, trajectory.states());
    }

    #[test]
    fn test_residue_rejects_large_square() {
        let start = BoardState::goal(5)
            .apply_move(slidetile_core::Direction::Left)
            .unwrap();
        let start = BoardState::new(
            5,
            start
                .tiles()
                .iter()
                .map(|&v| match v {
                    1 => 2,
                    2 => 1,
                    v => v,
                })
                .collect(),
        )
        .unwrap();
        let mut trajectory = Trajectory::new(start);
        assert_eq!(
            run_residue(
                &mut trajectory,
                &SolverConfig::default(),
                &mut SearchBudget::unlimited(),
            ),
            Err(ReduceError::Search(SearchError::Exhausted))
        );
    }
}
