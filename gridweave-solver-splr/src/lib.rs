//! Implementation of the gridweave solver SPI wrapping the [splr](https://crates.io/crates/splr)
//! SAT solver.

use splr::{Certificate, Config, SolveIF, SolverError};

use gridweave_solver::{ConfigurableSolver, Outcome, Solver, SolverConfigurator};

/// A [ConfigurableSolver] backed by splr.
///
/// Clauses are buffered and handed to splr in one batch at [solve](Solver::solve) time, since
/// splr builds its solver state from a complete clause set.
pub struct SplrSolver {
    clauses: Vec<Vec<i32>>,
}

impl SplrSolver {
    pub fn new() -> Self {
        SplrSolver { clauses: Vec::new() }
    }
}

impl Default for SplrSolver {
    fn default() -> Self {
        SplrSolver::new()
    }
}

impl SolverConfigurator for SplrSolver {
    fn add_clause(&mut self, literals: &[i32]) {
        self.clauses.push(literals.to_vec());
    }
}

impl Solver for SplrSolver {
    fn solve(&mut self) -> Outcome {
        match splr::Solver::try_from((Config::default(), self.clauses.as_slice())) {
            Ok(mut solver) => match solver.solve() {
                Ok(Certificate::SAT(model)) => Outcome::Sat(model),
                Ok(Certificate::UNSAT) => Outcome::Unsat,
                Err(error) => Outcome::Unknown(format!("splr: {error:?}")),
            },
            // the clause loader refutes trivially inconsistent formulas before search starts
            Err(Err(SolverError::EmptyClause | SolverError::Inconsistent)) => Outcome::Unsat,
            Err(Ok(_)) => Outcome::Unsat,
            Err(Err(error)) => Outcome::Unknown(format!("splr: {error:?}")),
        }
    }
}

impl ConfigurableSolver for SplrSolver {}
