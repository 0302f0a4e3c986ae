//! This library defines the interface of a SAT solver. It is meant to be consumed by
//! `gridweave-crossword`, which encodes crossword generation problems as CNF.

/// The verdict of a solver run.
///
/// A model is a vector indexed by the variables, whose values indicate the state of the
/// corresponding variable: a positive value means the variable is true, a non-positive value
/// means it is false.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Outcome {
    /// A satisfying assignment was found.
    Sat(Vec<i32>),
    /// The formula was proved unsatisfiable.
    Unsat,
    /// The solver gave up (timeout, resource limit, internal failure); the reason is reported
    /// verbatim.
    Unknown(String),
}

/// Definition of a solver configurator, i.e. the clause sink the problem encoder writes to.
///
/// The main function to implement is [add_clause](Self::add_clause). Other functions contain
/// default implementations which may be overridden for better performances.
pub trait SolverConfigurator {
    /// Gives a hint about the number of variables. May be implemented to optimize performance.
    ///
    /// Default implementation does nothing.
    fn allocate_variables(&mut self, _variable_count: usize) {
        // Do nothing by default.
    }

    /// Adds the given literals as an *at-least-one* clause, i.e. a disjunction (= or).
    fn add_clause(&mut self, literals: &[i32]);

    /// Adds the given literals as an *exactly-one* clause.
    ///
    /// An *exactly-one* clause is equivalent to an *at-least-one* and an *at-most-one* clauses.
    fn add_exactly_one(&mut self, literals: &[i32]) {
        self.add_clause(literals);
        self.add_at_most_one(literals);
    }

    /// Adds the given literals as an *at-most-one* clause.
    ///
    /// An *at-most-one* clause is equivalent to saying there is no pair of literals for which
    /// both literals are true, i.e. for all pairs of literals, at least one is false. Default
    /// implementation adds the corresponding pairwise clauses using
    /// [add_clause](Self::add_clause).
    fn add_at_most_one(&mut self, literals: &[i32]) {
        for i in 0..literals.len() {
            for j in (i + 1)..literals.len() {
                self.add_clause(&[-literals[i], -literals[j]]);
            }
        }
    }

    /// Adds clauses describing the equivalence between the given literal and the given
    /// conjunction (= and) of literals, i.e.:
    /// *literal ⇔ conjunction\[0\] ∧ conjunction\[1\] ∧ ... ∧ conjunction\[n\]*
    ///
    /// The corresponding clauses are: *(￢literal ∨ conjunction\[0\]) ∧ ... ∧
    /// (￢literal ∨ conjunction\[n\]) ∧ (￢conjunction\[0\] ∨ ... ∨ ￢conjunction\[n\] ∨ literal)*
    fn add_and(&mut self, literal: i32, conjunction: &[i32]) {
        let mut last_clause = Vec::with_capacity(conjunction.len() + 1);
        for &conjunction_literal in conjunction {
            self.add_clause(&[-literal, conjunction_literal]);
            last_clause.push(-conjunction_literal);
        }
        last_clause.push(literal);
        self.add_clause(&last_clause);
    }

    /// Adds clauses describing the equivalence between the given literal and the given
    /// disjunction (= or) of literals, i.e.:
    /// *literal ⇔ disjunction\[0\] ∨ disjunction\[1\] ∨ ... ∨ disjunction\[n\]*
    ///
    /// The corresponding clauses are: *(disjunction\[0\] ∨ ... ∨ disjunction\[n\] ∨ ￢literal) ∧
    /// (￢disjunction\[0\] ∨ literal) ∧ ... ∧ (￢disjunction\[n\] ∨ literal)*
    fn add_or(&mut self, literal: i32, disjunction: &[i32]) {
        let mut first_clause = Vec::with_capacity(disjunction.len() + 1);
        first_clause.push(-literal);
        for &disjunction_literal in disjunction {
            first_clause.push(disjunction_literal);
            self.add_clause(&[-disjunction_literal, literal]);
        }
        self.add_clause(&first_clause);
    }
}

/// Definition of a SAT solver: given the clauses previously configured, produce an [Outcome].
///
/// Solvers are single-shot: one configured problem, one verdict.
pub trait Solver {
    /// Runs the solver on the configured problem.
    fn solve(&mut self) -> Outcome;
}

/// Definition of a configurable [Solver]: a solver that is its own clause sink.
pub trait ConfigurableSolver: SolverConfigurator + Solver {
    // Marker trait.
}

/// Tests for default [SolverConfigurator] function implementations.
#[cfg(test)]
mod test {
    use super::*;

    struct TestSolverConfigurator {
        clauses: Vec<Vec<i32>>,
    }

    impl SolverConfigurator for TestSolverConfigurator {
        fn add_clause(&mut self, literals: &[i32]) {
            self.clauses.push(literals.to_vec())
        }
    }

    #[test]
    fn add_exactly_one() {
        let mut configurator = TestSolverConfigurator { clauses: vec![] };
        let literals = vec![1, 2, 3];

        configurator.add_exactly_one(&literals);

        assert_eq!(
            vec![vec![1, 2, 3], vec![-1, -2], vec![-1, -3], vec![-2, -3]],
            configurator.clauses
        );
    }

    #[test]
    fn add_at_most_one() {
        let mut configurator = TestSolverConfigurator { clauses: vec![] };
        let literals = vec![1, 2, 3];

        configurator.add_at_most_one(&literals);

        assert_eq!(
            vec![vec![-1, -2], vec![-1, -3], vec![-2, -3]],
            configurator.clauses
        );
    }

    #[test]
    fn add_and() {
        let mut configurator = TestSolverConfigurator { clauses: vec![] };
        let conjunction = vec![-1, 6, -7];

        // 42 ⇔ -1 ∧ 6 ∧ -7
        configurator.add_and(42, &conjunction);

        // (-42 ∨ -1) ∧ (-42 ∨ 6) ∧ (-42 ∨ -7) ∧ (1 ∨ -6 ∨ 7 ∨ 42)
        assert_eq!(
            vec![
                vec![-42, -1],
                vec![-42, 6],
                vec![-42, -7],
                vec![1, -6, 7, 42],
            ],
            configurator.clauses
        );
    }

    #[test]
    fn add_or() {
        let mut configurator = TestSolverConfigurator { clauses: vec![] };
        let disjunction = vec![5, -6];

        // 42 ⇔ 5 ∨ -6
        configurator.add_or(42, &disjunction);

        // (-5 ∨ 42) ∧ (6 ∨ 42) ∧ (-42 ∨ 5 ∨ -6)
        assert_eq!(
            vec![vec![-5, 42], vec![6, 42], vec![-42, 5, -6]],
            configurator.clauses
        );
    }

    #[test]
    fn add_or_empty_disjunction_forces_literal_false() {
        let mut configurator = TestSolverConfigurator { clauses: vec![] };

        configurator.add_or(42, &[]);

        assert_eq!(vec![vec![-42]], configurator.clauses);
    }
}
