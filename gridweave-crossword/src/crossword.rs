use std::collections::BTreeSet;

use gridweave_solver::{ConfigurableSolver, Outcome, SolverConfigurator};

use crate::alphabet::Alphabet;
use crate::constraints::Constraints;
use crate::error::CrosswordError;
use crate::formula::Formula;
use crate::geometry::{Cell, Geometry};
use crate::placement::Placement;
use crate::variables::Variables;

///
/// # A crossword generation problem, defined as a boolean satisfiability problem
///
/// Given a word list, a grid geometry and a quality floor, the problem asks for a placement of a
/// subset of the words such that every multi-cell letter run spells a listed word, every placed
/// word is bounded by empty cells or the border, the letters form one connected component, and
/// the placed word lengths sum to at least the floor. The problem definition follows.
///
/// ## Variables
///
/// - Cell symbol bits: each cell holds the binary index of its symbol (a letter or the empty
///   symbol).
/// - Selection variables: one per word, true iff the word is used.
/// - Placement variables: one per *legal* (word, start cell, direction) triple.
/// - Connectivity variables: a start flag per cell and a bounded reachability unrolling.
///
/// ## Constraints
///
/// 1. Each cell's bits spell a valid symbol, and a per-cell definition variable mirrors
///    emptiness.
/// 2. A placement writes its word's letters into the covered cells and is bounded by empty
///    cells.
/// 3. Each word is placed at most once and selected iff placed.
/// 4. A cell starts a multi-cell run in a direction iff some word is placed there: no junk runs.
/// 5. The non-empty cells form a single connected component, witnessed by a bounded-depth
///    reachability unrolling from the first non-empty cell in reading order.
/// 6. The selected word lengths sum to at least the quality floor, via a binary-merge
///    cardinality network.
///
/// The encoder is written against the [Geometry] contract and instantiated for both the
/// rectangular and the hexagonal grid.
///
/// ## See Also
///
/// - [Martin Hořeňovský's introduction to SAT solvers](https://codingnest.com/modern-sat-solvers-fast-neat-underused-part-1-of-n/),
///   which very clearly explains the basics with the example of the sudoku problem.
pub struct Crossword<G: Geometry> {
    geometry: G,
    words: Vec<String>,
    alphabet: Alphabet,
    min_quality: usize,
    variables: Variables,
}

/// The observable result of solving a crossword problem.
#[derive(Debug, Clone, PartialEq)]
pub enum Resolution {
    /// A layout meeting the quality floor: the placed words, in word order.
    Solved(Vec<Placement>),
    /// No layout satisfies the constraints.
    Unsatisfiable,
    /// The solver stopped without a verdict; the reason is reported verbatim.
    Unknown(String),
}

impl<G: Geometry> Crossword<G> {
    /// Creates a new problem from the given geometry, word list and quality floor.
    ///
    /// Words are trimmed, upper-cased and deduplicated into sorted order; blank entries are
    /// dropped. The preconditions (a non-negative floor, a non-empty word list, every word
    /// fitting the longest grid line) are checked here, before any variable is allocated.
    ///
    /// ## Example
    ///
    /// ```
    /// use gridweave_crossword::crossword::Crossword;
    /// use gridweave_crossword::geometry::RectGrid;
    ///
    /// let words = vec!["HI".to_string(), "IT".to_string()];
    /// let crossword = Crossword::new(RectGrid::new(3).unwrap(), &words, 4).unwrap();
    /// assert_eq!(["HI", "IT"], crossword.words());
    /// ```
    pub fn new(geometry: G, words: &[String], min_quality: i64) -> Result<Self, CrosswordError> {
        if min_quality < 0 {
            return Err(CrosswordError::NegativeQuality(min_quality));
        }
        let words: Vec<String> = words
            .iter()
            .map(|word| word.trim().to_uppercase())
            .filter(|word| !word.is_empty())
            .collect::<BTreeSet<String>>()
            .into_iter()
            .collect();
        if words.is_empty() {
            return Err(CrosswordError::EmptyWordList);
        }
        let max = geometry.longest_line();
        for word in &words {
            let length = word.chars().count();
            if length > max {
                return Err(CrosswordError::WordTooLong {
                    word: word.clone(),
                    length,
                    max,
                });
            }
        }
        let alphabet = Alphabet::from_words(&words);
        let variables = Variables::new(&geometry, &words, &alphabet);
        log::debug!(
            "crossword problem: {} words over {} cells, {} variables before encoding",
            words.len(),
            geometry.cells().len(),
            variables.count()
        );
        Ok(Crossword {
            geometry,
            words,
            alphabet,
            min_quality: min_quality as usize,
            variables,
        })
    }

    /// Encodes the problem into a CNF [Formula].
    pub fn encode(&self) -> Formula {
        let mut formula = Formula::new();
        self.add_clauses_to(&mut formula);
        formula
    }

    /// Adds the problem clauses to the given solver configurator.
    pub fn add_clauses_to<C: SolverConfigurator + ?Sized>(&self, solver: &mut C) {
        solver.allocate_variables(self.variables.count());
        let mut constraints = Constraints::new(
            &self.geometry,
            &self.alphabet,
            &self.words,
            self.min_quality,
            self.variables.clone(),
        );
        constraints.add_symbol_domain_clauses_to(solver);
        constraints.add_placement_clauses_to(solver);
        constraints.add_selection_clauses_to(solver);
        constraints.add_sequence_clauses_to(solver);
        constraints.add_connectivity_clauses_to(solver);
        constraints.add_quality_clauses_to(solver);
    }

    /// Encodes the problem into the given solver, runs it, and interprets the outcome.
    pub fn solve_with<S: ConfigurableSolver + ?Sized>(
        &self,
        solver: &mut S,
    ) -> Result<Resolution, CrosswordError> {
        self.add_clauses_to(solver);
        self.resolve(solver.solve())
    }

    /// Translates a solver outcome into a [Resolution].
    pub fn resolve(&self, outcome: Outcome) -> Result<Resolution, CrosswordError> {
        match outcome {
            Outcome::Sat(model) => self.interpret(&model).map(Resolution::Solved),
            Outcome::Unsat => Ok(Resolution::Unsatisfiable),
            Outcome::Unknown(reason) => Ok(Resolution::Unknown(reason)),
        }
    }

    /// Recovers the placement list from a satisfying assignment.
    ///
    /// Total on well-formed models; a model placing some word twice is reported as an
    /// [CrosswordError::AmbiguousPlacement] encoding defect.
    pub fn interpret(&self, model: &[i32]) -> Result<Vec<Placement>, CrosswordError> {
        self.variables
            .placements_in(model, &self.words, self.geometry.cells())
    }

    /// Returns the normalized word list.
    pub fn words(&self) -> &[String] {
        &self.words
    }

    /// Returns the grid geometry.
    pub fn geometry(&self) -> &G {
        &self.geometry
    }

    /// Returns the variable of the placement of the given word at the given cell and direction,
    /// or [None] if the word is unknown or the placement illegal. Intended for pinning known
    /// layouts in tests and experiments.
    pub fn placement_variable(&self, word: &str, cell: Cell, direction: usize) -> Option<i32> {
        let word_index = self.words.binary_search(&word.to_string()).ok()?;
        let cell_index = self.geometry.index_of(cell)?;
        self.variables
            .word_sites(word_index)
            .iter()
            .find(|site| site.cell == cell_index && site.direction == direction)
            .map(|site| site.variable)
    }

    /// Returns the selection variable of the given word, or [None] if the word is unknown.
    pub fn selection_variable(&self, word: &str) -> Option<i32> {
        let word_index = self.words.binary_search(&word.to_string()).ok()?;
        Some(self.variables.selection(word_index))
    }
}
