//! Example searching for a hard scramble.
//!
//! This example shows how to:
//! - Create a `ScrambleGenerator` for a board size and walk length
//! - Generate scrambles in parallel and solve each one
//! - Keep the scramble whose solution needs the most moves
//!
//! # Usage
//!
//! ```sh
//! cargo run --example hardest_scramble
//! ```
//!
//! Choose the board size, walk length and sampling budget:
//!
//! ```sh
//! cargo run --example hardest_scramble -- --size 4 --moves 120 --max-tries 500
//! ```
//!
//! Reproduce a single scramble from its seed:
//!
//! ```sh
//! cargo run --example hardest_scramble -- --seed c1d44bd6afaf8af64f126546884e19298acbdc33c3924a28136715de946ef3f1
//! ```

use std::process;

use clap::Parser;
use rayon::prelude::*;
use slidetile_generator::{GeneratedScramble, ScrambleGenerator, ScrambleSeed};
use slidetile_solver::{Solution, Solver};

#[derive(Debug, Parser)]
#[command(author, version, about)]
struct Args {
    /// Board size N.
    #[arg(long, value_name = "N", default_value_t = 3)]
    size: usize,

    /// Random-walk length. Defaults to max(60, 3·N²).
    #[arg(long, value_name = "COUNT")]
    moves: Option<usize>,

    /// Scrambles to sample.
    #[arg(long, value_name = "COUNT", default_value_t = 1_000)]
    max_tries: usize,

    /// Reproduce one scramble instead of sampling.
    #[arg(long, value_name = "HEX")]
    seed: Option<ScrambleSeed>,
}

fn main() {
    let args = Args::parse();
    if !(2..=slidetile_core::MAX_SIZE).contains(&args.size) {
        eprintln!("--size must be between 2 and {}.", slidetile_core::MAX_SIZE);
        process::exit(2);
    }
    let moves = args
        .moves
        .unwrap_or_else(|| ScrambleGenerator::default_moves(args.size));
    let generator = ScrambleGenerator::new(args.size, moves);
    let solver = Solver::default();

    if let Some(seed) = args.seed {
        let scramble = generator.generate_with_seed(seed);
        match solver.solve(&scramble.board) {
            Ok(solution) => print_scramble(&scramble, &solution, None),
            Err(err) => {
                eprintln!("Failed to solve scramble {}: {err}", scramble.seed);
                process::exit(1);
            }
        }
        return;
    }

    if args.max_tries == 0 {
        eprintln!("--max-tries must be at least 1.");
        process::exit(1);
    }

    let results = (0..args.max_tries)
        .into_par_iter()
        .map(|_| {
            let scramble = generator.generate();
            let result = solver.solve(&scramble.board);
            (scramble, result)
        })
        .collect::<Vec<_>>();

    let mut failures = 0;
    let mut hardest: Option<(GeneratedScramble, Solution)> = None;
    for (scramble, result) in results {
        match result {
            Ok(solution) => {
                if hardest
                    .as_ref()
                    .is_none_or(|(_, best)| solution.move_count() > best.move_count())
                {
                    hardest = Some((scramble, solution));
                }
            }
            Err(err) => {
                eprintln!("Failed to solve scramble {}: {err}", scramble.seed);
                failures += 1;
            }
        }
    }

    if let Some((scramble, solution)) = hardest {
        print_scramble(&scramble, &solution, Some(args.max_tries));
    }
    if failures > 0 {
        eprintln!("{failures}/{} scrambles could not be solved", args.max_tries);
        process::exit(1);
    }
}

fn print_scramble(scramble: &GeneratedScramble, solution: &Solution, tries: Option<usize>) {
    println!("Seed:");
    println!("  {}", scramble.seed);
    println!();

    if let Some(tries) = tries {
        println!("Selection:");
        println!("  Max tries: {tries}");
        println!();
    }

    println!("Board:");
    for line in scramble.board.to_string().lines() {
        println!("  {line}");
    }
    println!();

    println!("Solution:");
    println!("  strategy: {}", solution.strategy());
    println!("  moves: {}", solution.move_count());
    println!("  expanded: {}", solution.stats().expanded());
}
