use crate::alphabet::Alphabet;
use crate::error::CrosswordError;
use crate::geometry::{Cell, Geometry};
use crate::placement::Placement;

/// A legal placement site: a (word, start cell, direction) triple whose letters all fall
/// in-grid, together with the boolean variable deciding it.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub struct Site {
    pub word: usize,
    pub cell: usize,
    pub direction: usize,
    pub variable: i32,
}

/// Where translation of problem data from/to integer variables occurs.
///
/// Variable families, in model order:
///
/// 1. Cell symbol bits: each cell owns `bit_width` booleans holding the binary index of its
///    symbol in the alphabet, the empty symbol included. See [Self::cell_bit].
/// 2. Cell emptiness definitions: one boolean per cell, constrained by the encoder to mirror
///    "the symbol bits spell the empty index". See [Self::cell_empty].
/// 3. Word selections. See [Self::selection].
/// 4. Connectivity start flags, one per cell. See [Self::start].
/// 5. Reachability steps: `(diameter bound + 1)` booleans per cell. See [Self::reach].
/// 6. Placement sites: one boolean per *legal* (word, cell, direction) triple. Illegal triples
///    never receive a variable. See [Self::sites].
/// 7. Auxiliary variables handed out during encoding (cardinality network outputs). See
///    [Self::fresh_auxiliary].
#[derive(Clone)]
pub struct Variables {
    cell_count: usize,
    bit_width: usize,
    word_count: usize,
    word_lengths: Vec<usize>,
    reach_steps: usize,
    direction_count: usize,
    sites: Vec<Site>,
    site_ranges: Vec<(usize, usize)>,
    starts: Vec<Vec<i32>>,
    next_auxiliary: i32,
}

impl Variables {
    /// Creates the layout for the given problem, precomputing the legal placement sites.
    pub fn new(geometry: &impl Geometry, words: &[String], alphabet: &Alphabet) -> Self {
        let cell_count = geometry.cells().len();
        let bit_width = alphabet.bit_width();
        let word_count = words.len();
        let word_lengths: Vec<usize> = words.iter().map(|word| word.chars().count()).collect();
        let reach_steps = geometry.diameter_bound();
        let direction_count = geometry.direction_count();

        let fixed_count = cell_count * bit_width // symbol bits
            + cell_count                         // emptiness definitions
            + word_count                         // selections
            + cell_count                         // start flags
            + cell_count * (reach_steps + 1); // reachability steps
        let mut next = fixed_count as i32 + 1;

        let mut sites = Vec::new();
        let mut site_ranges = Vec::with_capacity(word_count);
        let mut starts = vec![Vec::new(); cell_count * direction_count];
        for (word, &length) in word_lengths.iter().enumerate() {
            let from = sites.len();
            for (cell_index, &cell) in geometry.cells().iter().enumerate() {
                for direction in 0..direction_count {
                    if fits(geometry, cell, direction, length) {
                        let variable = next;
                        next += 1;
                        sites.push(Site {
                            word,
                            cell: cell_index,
                            direction,
                            variable,
                        });
                        starts[cell_index * direction_count + direction].push(variable);
                    }
                }
            }
            site_ranges.push((from, sites.len()));
        }

        Variables {
            cell_count,
            bit_width,
            word_count,
            word_lengths,
            reach_steps,
            direction_count,
            sites,
            site_ranges,
            starts,
            next_auxiliary: next,
        }
    }

    /// Returns the variable of the given bit of the given cell's symbol.
    pub fn cell_bit(&self, cell: usize, bit: usize) -> i32 {
        (cell * self.bit_width + bit) as i32 + 1
    }

    /// Returns the variable defined to be true iff the given cell holds the empty symbol.
    pub fn cell_empty(&self, cell: usize) -> i32 {
        (self.cell_count * self.bit_width + cell) as i32 + 1
    }

    /// Returns the selection variable of the given word.
    pub fn selection(&self, word: usize) -> i32 {
        (self.cell_count * (self.bit_width + 1) + word) as i32 + 1
    }

    /// Returns the connectivity start variable of the given cell.
    pub fn start(&self, cell: usize) -> i32 {
        (self.cell_count * (self.bit_width + 1) + self.word_count + cell) as i32 + 1
    }

    /// Returns the variable stating that the given cell reaches the component start in at most
    /// `step` steps.
    pub fn reach(&self, step: usize, cell: usize) -> i32 {
        (self.cell_count * (self.bit_width + 2)
            + self.word_count
            + step * self.cell_count
            + cell) as i32
            + 1
    }

    /// Returns the number of reachability steps, i.e. the diameter bound.
    pub fn reach_steps(&self) -> usize {
        self.reach_steps
    }

    /// Returns every legal placement site.
    pub fn sites(&self) -> &[Site] {
        &self.sites
    }

    /// Returns the legal placement sites of the given word.
    pub fn word_sites(&self, word: usize) -> &[Site] {
        let (from, to) = self.site_ranges[word];
        &self.sites[from..to]
    }

    /// Returns the variables of the placements starting at the given cell in the given
    /// direction, any word.
    pub fn sites_starting(&self, cell: usize, direction: usize) -> &[i32] {
        &self.starts[cell * self.direction_count + direction]
    }

    /// Returns the literals whose conjunction states that the given cell holds the given symbol.
    pub fn symbol_literals(&self, cell: usize, symbol: usize) -> Vec<i32> {
        (0..self.bit_width)
            .map(|bit| {
                let variable = self.cell_bit(cell, bit);
                if symbol >> bit & 1 == 1 {
                    variable
                } else {
                    -variable
                }
            })
            .collect()
    }

    /// Returns the length, in letters, of the given word.
    pub fn word_length(&self, word: usize) -> usize {
        self.word_lengths[word]
    }

    /// Returns the number of cells.
    pub fn cell_count(&self) -> usize {
        self.cell_count
    }

    /// Returns the number of words.
    pub fn word_count(&self) -> usize {
        self.word_count
    }

    /// Returns the number of variables allocated so far.
    pub fn count(&self) -> usize {
        (self.next_auxiliary - 1) as usize
    }

    /// Hands out a fresh auxiliary variable.
    pub fn fresh_auxiliary(&mut self) -> i32 {
        let variable = self.next_auxiliary;
        self.next_auxiliary += 1;
        variable
    }

    /// Translates the variable states back to the placement list.
    ///
    /// Words whose placement variables are all false are simply absent. A word with more than
    /// one placement variable set indicates a defect in the encoding and is reported as an
    /// error.
    pub fn placements_in(
        &self,
        model: &[i32],
        words: &[String],
        cells: &[Cell],
    ) -> Result<Vec<Placement>, CrosswordError> {
        let mut placements = Vec::new();
        for (word_index, word) in words.iter().enumerate() {
            let mut placed: Option<Site> = None;
            let mut count = 0;
            for &site in self.word_sites(word_index) {
                let state = model
                    .get((site.variable - 1) as usize)
                    .copied()
                    .unwrap_or_default();
                if state > 0 {
                    count += 1;
                    placed = Some(site);
                }
            }
            match (count, placed) {
                (0, _) | (_, None) => {}
                (1, Some(site)) => placements.push(Placement {
                    word: word.clone(),
                    cell: cells[site.cell],
                    direction: site.direction,
                }),
                (count, Some(_)) => {
                    return Err(CrosswordError::AmbiguousPlacement {
                        word: word.clone(),
                        count,
                    })
                }
            }
        }
        Ok(placements)
    }
}

/// Returns `true` iff every letter cell of the placement is in-grid.
fn fits(geometry: &impl Geometry, cell: Cell, direction: usize, length: usize) -> bool {
    (0..length).all(|offset| geometry.contains(geometry.step(cell, direction, offset as i32)))
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::geometry::{RectGrid, HORIZONTAL, VERTICAL};

    fn variables() -> (RectGrid, Vec<String>, Variables) {
        let grid = RectGrid::new(2).unwrap();
        let words = vec!["AB".to_string()];
        let alphabet = Alphabet::from_words(&words);
        let variables = Variables::new(&grid, &words, &alphabet);
        (grid, words, variables)
    }

    #[test]
    fn layout_is_dense() {
        let (_, _, variables) = variables();

        // 4 cells × 2 symbol bits
        assert_eq!(1, variables.cell_bit(0, 0));
        assert_eq!(2, variables.cell_bit(0, 1));
        assert_eq!(8, variables.cell_bit(3, 1));
        // emptiness definitions
        assert_eq!(9, variables.cell_empty(0));
        assert_eq!(12, variables.cell_empty(3));
        // selections
        assert_eq!(13, variables.selection(0));
        // start flags
        assert_eq!(14, variables.start(0));
        assert_eq!(17, variables.start(3));
        // reachability: diameter bound of a 2×2 grid is 3, so 4 steps per cell
        assert_eq!(3, variables.reach_steps());
        assert_eq!(18, variables.reach(0, 0));
        assert_eq!(33, variables.reach(3, 3));
    }

    #[test]
    fn only_legal_sites_receive_variables() {
        let (_, _, variables) = variables();

        // "AB" fits at (0,0) both ways, at (1,0) only down, at (0,1) only across.
        let expected = vec![
            Site {
                word: 0,
                cell: 0,
                direction: HORIZONTAL,
                variable: 34,
            },
            Site {
                word: 0,
                cell: 0,
                direction: VERTICAL,
                variable: 35,
            },
            Site {
                word: 0,
                cell: 1,
                direction: VERTICAL,
                variable: 36,
            },
            Site {
                word: 0,
                cell: 2,
                direction: HORIZONTAL,
                variable: 37,
            },
        ];
        assert_eq!(expected, variables.sites());
        assert_eq!(expected, variables.word_sites(0));
        assert_eq!(37, variables.count());
    }

    #[test]
    fn sites_starting_groups_by_cell_and_direction() {
        let (_, _, variables) = variables();

        assert_eq!(&[34], variables.sites_starting(0, HORIZONTAL));
        assert_eq!(&[35], variables.sites_starting(0, VERTICAL));
        assert_eq!(&[36], variables.sites_starting(1, VERTICAL));
        assert!(variables.sites_starting(3, HORIZONTAL).is_empty());
    }

    #[test]
    fn symbol_literals_spell_the_binary_index() {
        let (_, _, variables) = variables();

        // 'A' is index 0, 'B' index 1, empty index 2; cell 0 owns bits 1 and 2.
        assert_eq!(vec![-1, -2], variables.symbol_literals(0, 0));
        assert_eq!(vec![1, -2], variables.symbol_literals(0, 1));
        assert_eq!(vec![-1, 2], variables.symbol_literals(0, 2));
    }

    #[test]
    fn fresh_auxiliary_extends_the_layout() {
        let (_, _, mut variables) = variables();

        assert_eq!(38, variables.fresh_auxiliary());
        assert_eq!(39, variables.fresh_auxiliary());
        assert_eq!(39, variables.count() as i32);
    }

    #[test]
    fn placements_in_recovers_the_placed_words() {
        let (grid, words, variables) = variables();

        let mut model = vec![-1; variables.count()];
        model[34 - 1] = 34; // "AB" across at (0,0)

        let placements = variables
            .placements_in(&model, &words, grid.cells())
            .unwrap();
        assert_eq!(
            vec![Placement {
                word: "AB".to_string(),
                cell: Cell(0, 0),
                direction: HORIZONTAL,
            }],
            placements
        );
    }

    #[test]
    fn placements_in_rejects_ambiguous_models() {
        let (grid, words, variables) = variables();

        let mut model = vec![-1; variables.count()];
        model[34 - 1] = 34;
        model[35 - 1] = 35;

        let result = variables.placements_in(&model, &words, grid.cells());
        assert_eq!(
            Err(CrosswordError::AmbiguousPlacement {
                word: "AB".to_string(),
                count: 2,
            }),
            result
        );
    }

    #[test]
    fn unplaced_words_are_absent() {
        let (grid, words, variables) = variables();

        let model = vec![-1; variables.count()];
        let placements = variables
            .placements_in(&model, &words, grid.cells())
            .unwrap();
        assert!(placements.is_empty());
    }
}
