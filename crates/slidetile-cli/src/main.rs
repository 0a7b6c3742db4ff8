//! Command-line harness for the sliding-tile solver.
//!
//! Scrambles boards (or takes one from `--board`), solves them, and reports
//! the move counts. Exits with a non-zero status if any board fails.
//!
//! # Usage
//!
//! ```sh
//! slidetile --size 5 --trials 20
//! slidetile --board "1 2 3 4 5 6 _ 7 8" --show-path
//! RUST_LOG=debug slidetile --size 6 --strategy constructive
//! ```

use std::{process, time::Duration};

use clap::{Parser, ValueEnum};
use rayon::prelude::*;
use slidetile_core::{BoardState, MAX_SIZE};
use slidetile_generator::{ScrambleGenerator, ScrambleSeed};
use slidetile_solver::{Solution, SolveError, Solver, SolverConfig, Strategy};

#[derive(Debug, Clone, Copy, Default, ValueEnum)]
enum StrategyArg {
    /// Exact search up to 3×3, constructive reduction above.
    #[default]
    Auto,
    /// A* search.
    Exact,
    /// IDA* search.
    Bounded,
    /// Constructive reduction.
    Constructive,
}

impl StrategyArg {
    fn strategy(self) -> Option<Strategy> {
        match self {
            Self::Auto => None,
            Self::Exact => Some(Strategy::Exact),
            Self::Bounded => Some(Strategy::Bounded),
            Self::Constructive => Some(Strategy::Constructive),
        }
    }
}

#[derive(Debug, Parser)]
#[command(author, version, about)]
struct Args {
    /// Board size N for generated scrambles.
    #[arg(long, value_name = "N", default_value_t = 4)]
    size: usize,

    /// Number of boards to scramble and solve.
    #[arg(long, value_name = "COUNT", default_value_t = 1)]
    trials: usize,

    /// Random-walk length. Defaults to max(60, 3·N²).
    #[arg(long, value_name = "COUNT")]
    moves: Option<usize>,

    /// Seed for a single reproducible scramble.
    #[arg(long, value_name = "HEX", conflicts_with = "trials")]
    seed: Option<ScrambleSeed>,

    /// Solve this board instead of scrambling one. `_` marks the empty cell.
    #[arg(long, value_name = "TILES", conflicts_with_all = ["size", "trials", "moves", "seed"])]
    board: Option<BoardState>,

    /// Solving strategy.
    #[arg(long, value_enum, default_value_t)]
    strategy: StrategyArg,

    /// Node expansion budget per solve.
    #[arg(long, value_name = "COUNT")]
    max_expansions: Option<usize>,

    /// Wall-clock limit per solve, in milliseconds.
    #[arg(long, value_name = "MS")]
    timeout_ms: Option<u64>,

    /// Keep loops in the assembled path.
    #[arg(long)]
    no_compact: bool,

    /// Print the direction of every move.
    #[arg(long)]
    show_path: bool,
}

impl Args {
    fn solver_config(&self) -> SolverConfig {
        let mut config = SolverConfig::default()
            .with_compact_path(!self.no_compact)
            .with_timeout(self.timeout_ms.map(Duration::from_millis));
        if let Some(strategy) = self.strategy.strategy() {
            config = config.with_strategy(strategy);
        }
        if let Some(max) = self.max_expansions {
            config = config.with_max_expansions(Some(max));
        }
        config
    }
}

struct Run {
    number: usize,
    board: BoardState,
    seed: Option<ScrambleSeed>,
    result: Result<Solution, SolveError>,
}

fn main() {
    better_panic::install();
    env_logger::init();

    let args = Args::parse();
    if !(1..=MAX_SIZE).contains(&args.size) {
        eprintln!("--size must be between 1 and {MAX_SIZE}.");
        process::exit(2);
    }
    if args.trials == 0 {
        eprintln!("--trials must be at least 1.");
        process::exit(2);
    }

    let solver = Solver::new(args.solver_config());
    let boards = boards(&args);
    log::info!("solving {} boards", boards.len());

    let runs = boards
        .into_par_iter()
        .enumerate()
        .map(|(i, (board, seed))| {
            let result = solver.solve(&board);
            Run {
                number: i + 1,
                board,
                seed,
                result,
            }
        })
        .collect::<Vec<_>>();

    let mut failures = 0;
    let mut total_moves = 0;
    for run in &runs {
        print_run(run, args.show_path);
        match &run.result {
            Ok(solution) => total_moves += solution.move_count(),
            Err(_) => failures += 1,
        }
    }

    if runs.len() > 1 {
        let solved = runs.len() - failures;
        println!("Solved {solved}/{} boards", runs.len());
        if let Some(average) = total_moves.checked_div(solved) {
            println!("Average moves: {average}");
        }
    }
    if failures > 0 {
        process::exit(1);
    }
}

fn boards(args: &Args) -> Vec<(BoardState, Option<ScrambleSeed>)> {
    if let Some(board) = &args.board {
        return vec![(board.clone(), None)];
    }
    let moves = args
        .moves
        .unwrap_or_else(|| ScrambleGenerator::default_moves(args.size));
    let generator = ScrambleGenerator::new(args.size, moves);
    if let Some(seed) = args.seed {
        let scramble = generator.generate_with_seed(seed);
        return vec![(scramble.board, Some(scramble.seed))];
    }
    (0..args.trials)
        .map(|_| {
            let scramble = generator.generate();
            (scramble.board, Some(scramble.seed))
        })
        .collect()
}

fn print_run(run: &Run, show_path: bool) {
    let size = run.board.size();
    match run.seed {
        Some(seed) => println!("Run #{} size={size} seed={seed} puzzle:", run.number),
        None => println!("Run #{} size={size} puzzle:", run.number),
    }
    println!("{}", run.board);

    match &run.result {
        Ok(solution) => {
            let stats = solution.stats();
            println!(
                "Solved in {} moves ({}, {} expansions)",
                solution.move_count(),
                solution.strategy(),
                stats.expanded()
            );
            if !stats.tiers().is_empty() {
                let tiers = stats
                    .tiers()
                    .iter()
                    .map(ToString::to_string)
                    .collect::<Vec<_>>();
                println!("Tiers: {}", tiers.join(", "));
            }
            if show_path {
                let moves = solution
                    .moves()
                    .iter()
                    .map(ToString::to_string)
                    .collect::<Vec<_>>();
                println!("Path: {}", moves.join(" "));
            }
            if let Some(last) = solution.states().last() {
                println!("Solved board:");
                println!("{last}");
            }
        }
        Err(err) => println!("Failed to solve puzzle on run #{}: {err}", run.number),
    }
    println!();
}
