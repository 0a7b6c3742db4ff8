//! Benchmarks for the solving strategies.
//!
//! # Benchmarks
//!
//! - **`exact_3x3`**: A\* on fixed 3×3 boards, including a 31-move worst case.
//! - **`bounded_3x3`**: IDA\* on the same boards.
//! - **`constructive`**: The constructive reducer on generated 4×4, 5×5 and
//!   6×6 scrambles.
//!
//! # Test Data
//!
//! The 3×3 boards are fixed. Larger boards are generated from a fixed seed so
//! every run solves the same scrambles.
//!
//! # Running
//!
//! ```sh
//! cargo bench --bench solver
//! ```

use std::{hint, str::FromStr as _, time::Duration};

use criterion::{BenchmarkId, Criterion, PlottingBackend, criterion_group, criterion_main};
use slidetile_core::BoardState;
use slidetile_generator::{ScrambleGenerator, ScrambleSeed};
use slidetile_solver::{Solver, SolverConfig, Strategy};

const BOARDS_3X3: [(&str, &str); 3] = [
    ("shallow", "4 1 2 _ 8 7 6 3 5"),
    ("medium", "6 4 7 8 5 _ 3 2 1"),
    ("worst", "8 6 7 2 5 4 3 _ 1"),
];

const SEED: &str = "c1d44bd6afaf8af64f126546884e19298acbdc33c3924a28136715de946ef3f1";

fn bench_strategy_3x3(c: &mut Criterion, name: &str, strategy: Strategy) {
    let solver = Solver::new(SolverConfig::default().with_strategy(strategy));
    for (label, board) in BOARDS_3X3 {
        let board = BoardState::from_str(board).unwrap();
        c.bench_with_input(BenchmarkId::new(name, label), &board, |b, board| {
            b.iter(|| solver.solve(hint::black_box(board)).unwrap());
        });
    }
}

fn bench_exact_3x3(c: &mut Criterion) {
    bench_strategy_3x3(c, "exact_3x3", Strategy::Exact);
}

fn bench_bounded_3x3(c: &mut Criterion) {
    bench_strategy_3x3(c, "bounded_3x3", Strategy::Bounded);
}

fn bench_constructive(c: &mut Criterion) {
    let solver = Solver::default();
    let seed = ScrambleSeed::from_str(SEED).unwrap();
    for size in [4, 5, 6] {
        let generator = ScrambleGenerator::new(size, ScrambleGenerator::default_moves(size));
        let board = generator.generate_with_seed(seed).board;
        c.bench_with_input(
            BenchmarkId::new("constructive", format!("{size}x{size}")),
            &board,
            |b, board| {
                b.iter(|| solver.solve(hint::black_box(board)).unwrap());
            },
        );
    }
}

criterion_group!(
    name = benches;
    config =
        Criterion::default()
            .plotting_backend(PlottingBackend::Plotters)
            .measurement_time(Duration::from_secs(10));
    targets =
        bench_exact_3x3,
        bench_bounded_3x3,
        bench_constructive
);
criterion_main!(benches);
