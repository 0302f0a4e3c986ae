use std::path::{Path, PathBuf};

use anyhow::Result;
use clap::Parser;

use gridweave_cli::{render, timed, words};
use gridweave_crossword::crossword::{Crossword, Resolution};
use gridweave_crossword::dimacs::{self, CnfExport};
use gridweave_crossword::geometry::RectGrid;
use gridweave_solver::Solver;
use gridweave_solver_splr::SplrSolver;

/// Generate a dense rectangular crossword puzzle from a word list.
#[derive(Parser, Debug)]
#[command(author, version, about, long_about = None)]
struct Args {
    /// Path to a text file containing words, one per line.
    word_file: PathBuf,
    /// The size of the grid (size × size).
    size: i64,
    /// The minimum quality score (sum of lengths of placed words).
    min_quality: i64,
}

fn main() {
    env_logger::init();
    if let Err(error) = run(Args::parse()) {
        eprintln!("Error: {error:#}");
        std::process::exit(1);
    }
}

fn run(args: Args) -> Result<()> {
    let words = words::load(&args.word_file)?;
    let crossword = Crossword::new(RectGrid::new(args.size)?, &words, args.min_quality)?;

    let formula = timed("Encoding", || crossword.encode());

    // Dump CNF for experimenting with external SAT solvers; the preprocessing may already
    // refute the formula.
    let export = timed("CNF export", || {
        dimacs::export(&formula, Path::new("crossword.cnf"))
    })?;
    if export == CnfExport::TriviallyUnsat {
        println!("Constraints unsatisfiable");
        return Ok(());
    }

    let mut solver = SplrSolver::new();
    formula.load_into(&mut solver);
    let outcome = timed("Solving", || solver.solve());

    match crossword.resolve(outcome)? {
        Resolution::Solved(placements) => {
            println!(
                "{}",
                render::rect_solution(&placements, crossword.geometry())
            );
        }
        Resolution::Unsatisfiable => println!("Constraints unsatisfiable"),
        Resolution::Unknown(reason) => println!("Solver stopped without a verdict: {reason}"),
    }
    Ok(())
}
