//! DIMACS CNF export.
//!
//! The exported file targets external solvers: `p cnf <vars> <clauses>`, one clause per line,
//! each terminated by `0`, variable indices dense and starting at 1. Before writing, the formula
//! goes through unit propagation; a formula refuted at this stage is reported as trivially
//! unsatisfiable and no file is written, so callers can distinguish the case from an export.

use std::collections::HashMap;
use std::fs::File;
use std::io::{self, BufWriter, Write};
use std::path::Path;

use crate::formula::Formula;

/// The result of a CNF export.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum CnfExport {
    /// The formula was written to the requested path.
    Written { variables: usize, clauses: usize },
    /// Unit propagation refuted the formula during preprocessing; nothing was written.
    TriviallyUnsat,
}

/// Writes the given formula to the given path in DIMACS format.
pub fn export(formula: &Formula, path: &Path) -> io::Result<CnfExport> {
    if trivially_inconsistent(formula) {
        return Ok(CnfExport::TriviallyUnsat);
    }
    let file = File::create(path)?;
    let mut out = BufWriter::new(file);
    let variables = formula.variable_count();
    let clauses = formula.clauses();
    writeln!(out, "p cnf {} {}", variables, clauses.len())?;
    for clause in clauses {
        for literal in clause {
            write!(out, "{literal} ")?;
        }
        writeln!(out, "0")?;
    }
    out.flush()?;
    log::debug!(
        "wrote {} clauses over {} variables to {}",
        clauses.len(),
        variables,
        path.display()
    );
    Ok(CnfExport::Written {
        variables,
        clauses: clauses.len(),
    })
}

/// Runs unit propagation to a fixpoint and reports whether it refutes the formula.
fn trivially_inconsistent(formula: &Formula) -> bool {
    let mut assignment: HashMap<i32, bool> = HashMap::new();
    loop {
        let mut changed = false;
        for clause in formula.clauses() {
            let mut satisfied = false;
            let mut open_literal = None;
            let mut open_count = 0;
            for &literal in clause {
                match assignment.get(&literal.abs()) {
                    Some(&value) if value == (literal > 0) => {
                        satisfied = true;
                        break;
                    }
                    Some(_) => {}
                    None => {
                        open_count += 1;
                        open_literal = Some(literal);
                    }
                }
            }
            if satisfied {
                continue;
            }
            match (open_count, open_literal) {
                (0, _) => return true, // every literal refuted
                (1, Some(literal)) => {
                    assignment.insert(literal.abs(), literal > 0);
                    changed = true;
                }
                _ => {}
            }
        }
        if !changed {
            return false;
        }
    }
}
