//! Binary-merge network for the pseudo-Boolean quality floor.
//!
//! The weighted sum `Σ weight·literal ≥ bound` is lowered to sorting-network CNF: each weighted
//! literal expands to a unary counter (the literal repeated `weight` times, trivially sorted),
//! counters are merged pairwise into fresh sorted unary outputs, and the constraint becomes a
//! unit clause on the root counter. Clauses are emitted in both propagation directions, so the
//! resulting CNF carries the constraint on its own and can be handed to any DIMACS solver; no
//! solver-side pseudo-Boolean support is assumed.

use std::collections::VecDeque;

use gridweave_solver::SolverConfigurator;

/// Adds clauses enforcing `Σ weight·literal ≥ bound` over the given terms.
///
/// `fresh` hands out the auxiliary variables of the merge outputs. A bound of zero is trivially
/// satisfied and adds nothing; a bound above the attainable total pins a contradiction, so the
/// infeasibility is visible to CNF preprocessing.
pub fn add_weighted_at_least<C, F>(solver: &mut C, fresh: &mut F, terms: &[(i32, usize)], bound: usize)
where
    C: SolverConfigurator + ?Sized,
    F: FnMut() -> i32,
{
    if bound == 0 {
        return;
    }
    let total: usize = terms.iter().map(|&(_, weight)| weight).sum();
    if bound > total {
        let conflict = fresh();
        solver.add_clause(&[conflict]);
        solver.add_clause(&[-conflict]);
        return;
    }

    let mut counters: VecDeque<Vec<i32>> = terms
        .iter()
        .filter(|&&(_, weight)| weight > 0)
        .map(|&(literal, weight)| vec![literal; weight])
        .collect();
    while counters.len() > 1 {
        // Queue order balances the merge tree: both fronts are the shallowest counters.
        let (left, right) = match (counters.pop_front(), counters.pop_front()) {
            (Some(left), Some(right)) => (left, right),
            _ => return,
        };
        let merged = merge(solver, fresh, &left, &right);
        counters.push_back(merged);
    }
    let root = match counters.pop_front() {
        Some(root) => root,
        None => return, // unreachable: bound ≤ total and bound > 0 imply a positive weight
    };
    solver.add_clause(&[root[bound - 1]]);
}

/// Merges two sorted unary counters into a fresh sorted unary counter of their sum.
///
/// With `a_0 = b_0 = c_0 = true` implicit, the emitted clauses are, for every in-range `i`, `j`:
///
/// - `a_i ∧ b_j → c_{i+j}`: the output counts at least the true inputs;
/// - `¬a_{i+1} ∧ ¬b_{j+1} → ¬c_{i+j+1}`: the output counts at most the true inputs.
fn merge<C, F>(solver: &mut C, fresh: &mut F, left: &[i32], right: &[i32]) -> Vec<i32>
where
    C: SolverConfigurator + ?Sized,
    F: FnMut() -> i32,
{
    let (m, n) = (left.len(), right.len());
    let output: Vec<i32> = (0..m + n).map(|_| fresh()).collect();
    for i in 0..=m {
        for j in 0..=n {
            if i + j >= 1 {
                let mut clause = Vec::with_capacity(3);
                if i > 0 {
                    clause.push(-left[i - 1]);
                }
                if j > 0 {
                    clause.push(-right[j - 1]);
                }
                clause.push(output[i + j - 1]);
                solver.add_clause(&clause);
            }
            if i + j < m + n {
                let mut clause = Vec::with_capacity(3);
                if i < m {
                    clause.push(left[i]);
                }
                if j < n {
                    clause.push(right[j]);
                }
                clause.push(-output[i + j]);
                solver.add_clause(&clause);
            }
        }
    }
    output
}
