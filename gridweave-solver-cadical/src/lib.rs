//! Implementation of the gridweave solver SPI wrapping the
//! [cadical](https://crates.io/crates/cadical) SAT solver.

use gridweave_solver::{ConfigurableSolver, Outcome, Solver, SolverConfigurator};

/// A [ConfigurableSolver] backed by cadical, with an optional wall-clock budget.
pub struct CadicalSolver {
    solver: cadical::Solver,
    variable_count: usize,
    timeout: Option<f32>,
}

impl CadicalSolver {
    pub fn new() -> Self {
        CadicalSolver {
            solver: cadical::Solver::default(),
            variable_count: 0,
            timeout: None,
        }
    }

    /// Creates a solver that gives up after the given wall-clock budget, reporting an unknown
    /// outcome.
    pub fn with_timeout(seconds: f32) -> Self {
        let mut solver = CadicalSolver::new();
        solver.timeout = Some(seconds);
        solver
    }

    /// Reads the model back from the solver. Variables the solver never saw keep a negative
    /// state, so the model covers the declared variable count even when trailing variables
    /// appear in no clause.
    fn model(&self) -> Vec<i32> {
        let seen = self.solver.max_variable() as usize;
        let count = seen.max(self.variable_count);
        let mut model = Vec::with_capacity(count);
        for variable in 1..=count {
            let state = match self.solver.value(variable as i32) {
                Some(true) => variable as i32,
                Some(false) | None => -(variable as i32),
            };
            model.push(state);
        }
        model
    }
}

impl Default for CadicalSolver {
    fn default() -> Self {
        CadicalSolver::new()
    }
}

impl SolverConfigurator for CadicalSolver {
    fn allocate_variables(&mut self, variable_count: usize) {
        self.variable_count = variable_count;
    }

    fn add_clause(&mut self, literals: &[i32]) {
        self.solver.add_clause(literals.iter().copied());
    }
}

impl Solver for CadicalSolver {
    fn solve(&mut self) -> Outcome {
        if let Some(seconds) = self.timeout {
            self.solver
                .set_callbacks(Some(cadical::Timeout::new(seconds)));
        }
        match self.solver.solve() {
            Some(true) => Outcome::Sat(self.model()),
            Some(false) => Outcome::Unsat,
            None => Outcome::Unknown("cadical stopped at the time budget".to_string()),
        }
    }
}

impl ConfigurableSolver for CadicalSolver {}
