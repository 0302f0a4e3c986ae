use gridweave_solver::SolverConfigurator;

use crate::alphabet::Alphabet;
use crate::geometry::Geometry;
use crate::pb;
use crate::variables::Variables;

/// Where the crossword constraint families are lowered to clauses.
///
/// The families are:
///
/// 1. Symbol domain: each cell's bits spell a valid symbol index, and the per-cell emptiness
///    variable mirrors "the bits spell the empty symbol". See
///    [add_symbol_domain_clauses_to](Self::add_symbol_domain_clauses_to).
/// 2. Placement effect: a placed word writes its letters into the covered cells and is bounded
///    by empty cells or the grid border. See
///    [add_placement_clauses_to](Self::add_placement_clauses_to).
/// 3. Selection: a word is placed at most once, and is selected iff it is placed somewhere. See
///    [add_selection_clauses_to](Self::add_selection_clauses_to).
/// 4. Sequences: a cell starts a multi-cell letter run in some direction iff a listed word is
///    placed there in that direction, which rules out junk runs. See
///    [add_sequence_clauses_to](Self::add_sequence_clauses_to).
/// 5. Connectivity: the non-empty cells form a single connected component, encoded as a
///    bounded-depth reachability unrolling from the first non-empty cell in reading order. See
///    [add_connectivity_clauses_to](Self::add_connectivity_clauses_to).
/// 6. Quality: the lengths of the selected words sum to at least the requested floor. See
///    [add_quality_clauses_to](Self::add_quality_clauses_to).
///
/// Implementation note: functions here push clauses straight into the solver passed as
/// parameter. Holding a materialized constraint set would not scale in memory; the [Formula]
/// buffer exists for callers who do want one, and is itself just another clause sink.
///
/// [Formula]: crate::formula::Formula
pub struct Constraints<'problem, G: Geometry> {
    geometry: &'problem G,
    alphabet: &'problem Alphabet,
    words: &'problem [String],
    min_quality: usize,
    variables: Variables,
}

impl<'problem, G: Geometry> Constraints<'problem, G> {
    /// Constructs a new instance.
    pub fn new(
        geometry: &'problem G,
        alphabet: &'problem Alphabet,
        words: &'problem [String],
        min_quality: usize,
        variables: Variables,
    ) -> Self {
        Constraints {
            geometry,
            alphabet,
            words,
            min_quality,
            variables,
        }
    }

    /// Adds the clauses tying each cell's symbol bits to the alphabet: out-of-range bit patterns
    /// are forbidden, and the cell emptiness variable is defined to mirror the empty pattern.
    pub fn add_symbol_domain_clauses_to<C: SolverConfigurator + ?Sized>(&self, solver: &mut C) {
        let width = self.alphabet.bit_width();
        for cell in 0..self.variables.cell_count() {
            for pattern in self.alphabet.symbol_count()..(1 << width) {
                let blocked: Vec<i32> = self
                    .variables
                    .symbol_literals(cell, pattern)
                    .iter()
                    .map(|&literal| -literal)
                    .collect();
                solver.add_clause(&blocked);
            }
            let empty_pattern = self
                .variables
                .symbol_literals(cell, self.alphabet.empty_index());
            solver.add_and(self.variables.cell_empty(cell), &empty_pattern);
        }
    }

    /// Adds the clauses describing the effect of each placement: the word's letters occupy the
    /// covered cells, and the cells just before and after the word (when in-grid) are empty.
    pub fn add_placement_clauses_to<C: SolverConfigurator + ?Sized>(&self, solver: &mut C) {
        for site in self.variables.sites() {
            let cell = self.geometry.cells()[site.cell];
            let word = &self.words[site.word];
            for (offset, letter) in word.chars().enumerate() {
                let covered = self
                    .geometry
                    .index_of(self.geometry.step(cell, site.direction, offset as i32))
                    .expect("placement site letter off-grid");
                let symbol = self
                    .alphabet
                    .index_of(letter)
                    .expect("letter outside the derived alphabet");
                for literal in self.variables.symbol_literals(covered, symbol) {
                    solver.add_clause(&[-site.variable, literal]);
                }
            }
            let length = self.variables.word_length(site.word);
            let before = self.geometry.bound_before(cell, site.direction);
            if let Some(index) = self.geometry.index_of(before) {
                solver.add_clause(&[-site.variable, self.variables.cell_empty(index)]);
            }
            let after = self.geometry.bound_after(cell, site.direction, length);
            if let Some(index) = self.geometry.index_of(after) {
                solver.add_clause(&[-site.variable, self.variables.cell_empty(index)]);
            }
        }
    }

    /// Adds, for each word, the at-most-one constraint over its placements and the equivalence
    /// between its selection variable and the disjunction of its placements.
    pub fn add_selection_clauses_to<C: SolverConfigurator + ?Sized>(&self, solver: &mut C) {
        for word in 0..self.variables.word_count() {
            let placements: Vec<i32> = self
                .variables
                .word_sites(word)
                .iter()
                .map(|site| site.variable)
                .collect();
            solver.add_at_most_one(&placements);
            solver.add_or(self.variables.selection(word), &placements);
        }
    }

    /// Adds the clauses tying letter runs to placements: a cell begins a run of two or more
    /// letters in a direction (non-empty, with a non-empty successor and an empty or off-grid
    /// predecessor) iff some word is placed there in that direction.
    pub fn add_sequence_clauses_to<C: SolverConfigurator + ?Sized>(&self, solver: &mut C) {
        for (cell_index, &cell) in self.geometry.cells().iter().enumerate() {
            for direction in 0..self.geometry.direction_count() {
                let next = self.geometry.step(cell, direction, 1);
                let Some(next_index) = self.geometry.index_of(next) else {
                    continue;
                };
                let empty_cell = self.variables.cell_empty(cell_index);
                let empty_next = self.variables.cell_empty(next_index);
                let placements = self.variables.sites_starting(cell_index, direction);

                // A run starting here must be the start of some placed word.
                let mut run_implies_placement = Vec::with_capacity(placements.len() + 3);
                run_implies_placement.push(empty_cell);
                run_implies_placement.push(empty_next);
                let before = self.geometry.bound_before(cell, direction);
                if let Some(before_index) = self.geometry.index_of(before) {
                    run_implies_placement.push(-self.variables.cell_empty(before_index));
                }
                run_implies_placement.extend_from_slice(placements);
                solver.add_clause(&run_implies_placement);

                // Conversely, a word placed here starts a run: this cell and the next are
                // non-empty. The predecessor side is already covered by the bounding clauses.
                for &placement in placements {
                    solver.add_clause(&[-placement, -empty_cell]);
                    solver.add_clause(&[-placement, -empty_next]);
                }
            }
        }
    }

    /// Adds the single-connected-component clauses: the first non-empty cell in reading order is
    /// the component start, reachability propagates one neighbour step at a time, and every
    /// non-empty cell must be reached within the geometry's diameter bound.
    pub fn add_connectivity_clauses_to<C: SolverConfigurator + ?Sized>(&self, solver: &mut C) {
        let cell_count = self.variables.cell_count();

        // start(c) ⇔ c is non-empty and every earlier cell is empty
        let mut earlier_empties: Vec<i32> = Vec::with_capacity(cell_count);
        for cell in 0..cell_count {
            let empty = self.variables.cell_empty(cell);
            let mut conjunction = Vec::with_capacity(earlier_empties.len() + 1);
            conjunction.push(-empty);
            conjunction.extend_from_slice(&earlier_empties);
            solver.add_and(self.variables.start(cell), &conjunction);
            earlier_empties.push(empty);
        }

        // reach_0(c) ⇔ start(c)
        for cell in 0..cell_count {
            let reach = self.variables.reach(0, cell);
            let start = self.variables.start(cell);
            solver.add_clause(&[-reach, start]);
            solver.add_clause(&[reach, -start]);
        }

        // reach_i(c) ⇔ non-empty(c) ∧ (reach_{i-1}(c) ∨ ⋁ reach_{i-1}(neighbour))
        for step in 1..=self.variables.reach_steps() {
            for (cell_index, &cell) in self.geometry.cells().iter().enumerate() {
                let reach = self.variables.reach(step, cell_index);
                let empty = self.variables.cell_empty(cell_index);
                let mut reasons = vec![self.variables.reach(step - 1, cell_index)];
                reasons.extend(
                    self.geometry
                        .neighbours(cell)
                        .into_iter()
                        .filter_map(|neighbour| self.geometry.index_of(neighbour))
                        .map(|neighbour| self.variables.reach(step - 1, neighbour)),
                );

                solver.add_clause(&[-reach, -empty]);
                let mut reached_for_a_reason = Vec::with_capacity(reasons.len() + 1);
                reached_for_a_reason.push(-reach);
                reached_for_a_reason.extend_from_slice(&reasons);
                solver.add_clause(&reached_for_a_reason);
                for &reason in &reasons {
                    solver.add_clause(&[empty, -reason, reach]);
                }
            }
        }

        // closure: every non-empty cell joins the component
        let horizon = self.variables.reach_steps();
        for cell in 0..cell_count {
            solver.add_clause(&[
                self.variables.cell_empty(cell),
                self.variables.reach(horizon, cell),
            ]);
        }
    }

    /// Adds the pseudo-Boolean quality floor: the lengths of the selected words sum to at least
    /// the minimum quality.
    pub fn add_quality_clauses_to<C: SolverConfigurator + ?Sized>(&mut self, solver: &mut C) {
        let terms: Vec<(i32, usize)> = (0..self.variables.word_count())
            .map(|word| {
                (
                    self.variables.selection(word),
                    self.variables.word_length(word),
                )
            })
            .collect();
        let variables = &mut self.variables;
        pb::add_weighted_at_least(
            solver,
            &mut || variables.fresh_auxiliary(),
            &terms,
            self.min_quality,
        );
        log::debug!(
            "encoded quality floor {} over {} words, {} variables in total",
            self.min_quality,
            terms.len(),
            variables.count()
        );
    }
}

#[cfg(test)]
mod test {
    use super::*;
    use crate::geometry::RectGrid;

    #[derive(Default)]
    struct TestSolverConfigurator {
        clauses: Vec<Vec<i32>>,
        at_most_one_clauses: Vec<Vec<i32>>,
        and_clauses: Vec<(i32, Vec<i32>)>,
        or_clauses: Vec<(i32, Vec<i32>)>,
    }

    impl SolverConfigurator for TestSolverConfigurator {
        fn add_clause(&mut self, literals: &[i32]) {
            self.clauses.push(literals.to_vec())
        }
        fn add_at_most_one(&mut self, literals: &[i32]) {
            self.at_most_one_clauses.push(literals.to_vec())
        }
        fn add_and(&mut self, literal: i32, conjunction: &[i32]) {
            self.and_clauses.push((literal, conjunction.to_vec()))
        }
        fn add_or(&mut self, literal: i32, disjunction: &[i32]) {
            self.or_clauses.push((literal, disjunction.to_vec()))
        }
    }

    // The fixture in the tests below is a 2×2 grid with the single word "AB". Variable map:
    // symbol bits 1..=8 (two per cell), emptiness 9..=12, selection 13, start flags 14..=17,
    // reachability 18..=33 (four steps), placements 34 (across at (0,0)), 35 (down at (0,0)),
    // 36 (down at (1,0)), 37 (across at (0,1)).
    macro_rules! fixture {
        ($grid:ident, $constraints:ident, $side:expr, $min_quality:expr) => {
            let $grid = RectGrid::new($side).unwrap();
            let words = vec!["AB".to_string()];
            let alphabet = Alphabet::from_words(&words);
            let variables = Variables::new(&$grid, &words, &alphabet);
            #[allow(unused_mut)]
            let mut $constraints =
                Constraints::new(&$grid, &alphabet, &words, $min_quality, variables);
        };
    }

    #[test]
    fn symbol_domain_clauses() {
        fixture!(grid, constraints, 2, 0);
        let mut solver = TestSolverConfigurator::default();

        constraints.add_symbol_domain_clauses_to(&mut solver);

        // 3 symbols in 2 bits: the pattern 11 is forbidden for each cell.
        assert_eq!(
            vec![vec![-1, -2], vec![-3, -4], vec![-5, -6], vec![-7, -8]],
            solver.clauses
        );
        // empty(c) ⇔ bits spell the empty index (10 in binary, low bit first)
        assert_eq!(
            vec![
                (9, vec![-1, 2]),
                (10, vec![-3, 4]),
                (11, vec![-5, 6]),
                (12, vec![-7, 8]),
            ],
            solver.and_clauses
        );
    }

    #[test]
    fn placement_clauses() {
        fixture!(grid, constraints, 2, 0);
        let mut solver = TestSolverConfigurator::default();

        constraints.add_placement_clauses_to(&mut solver);

        // Every bound cell of every site is off-grid on a 2×2 grid, so only letter effects
        // remain: 'A' spells 00, 'B' spells 01 (low bit first).
        assert_eq!(
            vec![
                // across at (0,0): 'A' on cell 0, 'B' on cell 1
                vec![-34, -1],
                vec![-34, -2],
                vec![-34, 3],
                vec![-34, -4],
                // down at (0,0): 'A' on cell 0, 'B' on cell 2
                vec![-35, -1],
                vec![-35, -2],
                vec![-35, 5],
                vec![-35, -6],
                // down at (1,0): 'A' on cell 1, 'B' on cell 3
                vec![-36, -3],
                vec![-36, -4],
                vec![-36, 7],
                vec![-36, -8],
                // across at (0,1): 'A' on cell 2, 'B' on cell 3
                vec![-37, -5],
                vec![-37, -6],
                vec![-37, 7],
                vec![-37, -8],
            ],
            solver.clauses
        );
    }

    #[test]
    fn placement_bounding_clauses() {
        // On a 3×3 grid some sites do have in-grid bound cells. Emptiness variables are
        // 19..=27 (one per cell after the 18 symbol bits); sites are numbered from 110.
        fixture!(grid, constraints, 3, 0);
        let mut solver = TestSolverConfigurator::default();

        constraints.add_placement_clauses_to(&mut solver);

        // "AB" across at (1,1) is site 117; it implies empty at (0,1), i.e. cell 3.
        assert!(solver.clauses.contains(&vec![-117, 22]));
        // "AB" down at (1,1) is site 118; it implies empty at (1,0), i.e. cell 1.
        assert!(solver.clauses.contains(&vec![-118, 20]));
        // "AB" across at (0,1) is site 115; it implies empty at (2,1), i.e. cell 5.
        assert!(solver.clauses.contains(&vec![-115, 24]));
    }

    #[test]
    fn selection_clauses() {
        fixture!(grid, constraints, 2, 0);
        let mut solver = TestSolverConfigurator::default();

        constraints.add_selection_clauses_to(&mut solver);

        assert_eq!(vec![vec![34, 35, 36, 37]], solver.at_most_one_clauses);
        assert_eq!(vec![(13, vec![34, 35, 36, 37])], solver.or_clauses);
    }

    #[test]
    fn sequence_clauses() {
        fixture!(grid, constraints, 2, 0);
        let mut solver = TestSolverConfigurator::default();

        constraints.add_sequence_clauses_to(&mut solver);

        assert_eq!(
            vec![
                // (0,0) across: run start ⇔ placement 34
                vec![9, 10, 34],
                vec![-34, -9],
                vec![-34, -10],
                // (0,0) down: placement 35
                vec![9, 11, 35],
                vec![-35, -9],
                vec![-35, -11],
                // (1,0) down: placement 36
                vec![10, 12, 36],
                vec![-36, -10],
                vec![-36, -12],
                // (0,1) across: placement 37
                vec![11, 12, 37],
                vec![-37, -11],
                vec![-37, -12],
            ],
            solver.clauses
        );
    }

    #[test]
    fn connectivity_start_clauses() {
        fixture!(grid, constraints, 2, 0);
        let mut solver = TestSolverConfigurator::default();

        constraints.add_connectivity_clauses_to(&mut solver);

        // start(c) ⇔ non-empty(c) ∧ all earlier cells empty
        assert_eq!(
            vec![
                (14, vec![-9]),
                (15, vec![-10, 9]),
                (16, vec![-11, 9, 10]),
                (17, vec![-12, 9, 10, 11]),
            ],
            solver.and_clauses
        );
        // reach_0 ⇔ start
        assert!(solver.clauses.contains(&vec![-18, 14]));
        assert!(solver.clauses.contains(&vec![18, -14]));
        // closure at the last step: empty(c) ∨ reach_3(c)
        assert!(solver.clauses.contains(&vec![9, 30]));
        assert!(solver.clauses.contains(&vec![12, 33]));
    }

    #[test]
    fn connectivity_step_clauses() {
        fixture!(grid, constraints, 2, 0);
        let mut solver = TestSolverConfigurator::default();

        constraints.add_connectivity_clauses_to(&mut solver);

        // reach_1 of cell 0 (variable 22): implies non-empty and a step-0 reason among itself
        // and its neighbours (1,0) and (0,1), i.e. cells 1 and 2.
        assert!(solver.clauses.contains(&vec![-22, -9]));
        assert!(solver.clauses.contains(&vec![-22, 18, 19, 20]));
        assert!(solver.clauses.contains(&vec![9, -18, 22]));
        assert!(solver.clauses.contains(&vec![9, -19, 22]));
        assert!(solver.clauses.contains(&vec![9, -20, 22]));
    }

    #[test]
    fn quality_clauses() {
        fixture!(grid, constraints, 2, 2);
        let mut solver = TestSolverConfigurator::default();

        // One word of length 2, floor 2: the selection is simply forced.
        constraints.add_quality_clauses_to(&mut solver);

        assert_eq!(vec![vec![13]], solver.clauses);
    }
}
