use std::path::PathBuf;

use anyhow::Result;
use clap::Parser;

use gridweave_cli::{render, timed, words};
use gridweave_crossword::crossword::{Crossword, Resolution};
use gridweave_crossword::dimacs::{self, CnfExport};
use gridweave_crossword::geometry::HexGrid;
use gridweave_solver::Solver;
use gridweave_solver_cadical::CadicalSolver;

/// Generate a dense hexagonal crossword puzzle from a word list.
#[derive(Parser, Debug)]
#[command(author, version, about, long_about = None)]
struct Args {
    /// Path to a text file with words.
    word_file: PathBuf,
    /// The radius of the hexagonal grid.
    radius: i64,
    /// Minimum quality (sum of word lengths).
    min_quality: i64,
    /// Solver timeout in seconds.
    #[arg(long, default_value_t = 600)]
    timeout: u32,
    /// Export the problem to a CNF file at the given path.
    #[arg(long, default_value = "hex_crossword.cnf")]
    cnf: PathBuf,
    /// Disable the symmetry breaking hook. Reserved: the default encoding emits no symmetry
    /// breaking clause either way.
    #[arg(long = "no-symmetry-break")]
    no_symmetry_break: bool,
}

fn main() {
    env_logger::init();
    if let Err(error) = run(Args::parse()) {
        eprintln!("Error: {error:#}");
        std::process::exit(1);
    }
}

fn run(args: Args) -> Result<()> {
    println!("--- Generating Hexagonal Crossword Puzzle ---");
    let words = words::load(&args.word_file)?;
    let crossword = Crossword::new(HexGrid::new(args.radius)?, &words, args.min_quality)?;
    if args.no_symmetry_break {
        log::debug!("symmetry breaking hook disabled; no clause is emitted either way");
    }

    let formula = timed("Encoding", || crossword.encode());

    let export = timed("CNF export", || dimacs::export(&formula, &args.cnf))?;
    if export == CnfExport::TriviallyUnsat {
        println!("\nProblem is unsatisfiable (detected during CNF conversion).");
        return Ok(());
    }

    let mut solver = CadicalSolver::with_timeout(args.timeout as f32);
    formula.load_into(&mut solver);
    let outcome = timed("Solving", || solver.solve());

    match crossword.resolve(outcome)? {
        Resolution::Solved(placements) => {
            println!("{}", render::hex_solution(&placements, crossword.geometry()));
        }
        Resolution::Unsatisfiable => {
            println!("\nConstraints are unsatisfiable. No solution exists.");
            println!("Try reducing the min_quality value or providing more words.");
        }
        Resolution::Unknown(reason) => {
            println!("\nSolver gave up after {} seconds: {reason}", args.timeout);
            println!("The problem may be too complex. Try increasing the timeout, reducing quality, or using a smaller grid.");
        }
    }
    Ok(())
}
