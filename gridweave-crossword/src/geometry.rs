use std::collections::HashMap;

use itertools::Itertools;

use crate::error::CrosswordError;

/// A cell address. Rectangular grids read the pair as `(x, y)`, hexagonal grids as axial
/// `(q, r)` with the third cube coordinate `s = -q - r` left implicit.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub struct Cell(pub i32, pub i32);

/// The index of the horizontal direction of a rectangular grid.
pub const HORIZONTAL: usize = 0;

/// The index of the vertical direction of a rectangular grid.
pub const VERTICAL: usize = 1;

const RECT_DELTAS: [(i32, i32); 2] = [
    (1, 0), // horizontal
    (0, 1), // vertical
];

const HEX_DELTAS: [(i32, i32); 3] = [
    (1, 0),  // axis 0, constant r
    (0, 1),  // axis 1, constant q
    (1, -1), // axis 2, constant s
];

/// The grid contract the constraint encoder is written against.
///
/// A geometry provides the cell set in *reading order*, the placement directions as coordinate
/// deltas, and the derived stepping/bounding/adjacency functions. The encoder relies on the
/// reading order being stable: the connectivity constraints designate the first non-empty cell in
/// this order as the component start.
pub trait Geometry {
    /// Returns the cells in reading order.
    fn cells(&self) -> &[Cell];

    /// Returns the position of the given cell in [cells](Self::cells), or [None] if the cell is
    /// off-grid.
    fn index_of(&self, cell: Cell) -> Option<usize>;

    /// Returns the coordinate deltas of the placement directions, in direction order.
    fn deltas(&self) -> &'static [(i32, i32)];

    /// Returns the length of the longest straight line of the grid; no word may be longer.
    fn longest_line(&self) -> usize;

    /// Returns an upper bound on the graph diameter of any connected subset of cells under the
    /// neighbour relation. Controls the depth of the reachability unrolling.
    fn diameter_bound(&self) -> usize;

    /// Returns the number of placement directions.
    fn direction_count(&self) -> usize {
        self.deltas().len()
    }

    /// Returns `true` iff the given cell is in-grid.
    fn contains(&self, cell: Cell) -> bool {
        self.index_of(cell).is_some()
    }

    /// Returns the cell `amount` steps away from the given cell along the given direction. The
    /// result may be off-grid; callers check with [contains](Self::contains) or
    /// [index_of](Self::index_of).
    fn step(&self, cell: Cell, direction: usize, amount: i32) -> Cell {
        let (dq, dr) = self.deltas()[direction];
        Cell(cell.0 + amount * dq, cell.1 + amount * dr)
    }

    /// Returns the cell immediately before a placement starting at the given cell, possibly
    /// off-grid.
    fn bound_before(&self, cell: Cell, direction: usize) -> Cell {
        self.step(cell, direction, -1)
    }

    /// Returns the cell immediately after the last letter of a placement of the given length,
    /// possibly off-grid.
    fn bound_after(&self, cell: Cell, direction: usize, length: usize) -> Cell {
        self.step(cell, direction, length as i32)
    }

    /// Returns the in-grid neighbours of the given cell: one step forward and backward along
    /// every direction.
    fn neighbours(&self, cell: Cell) -> Vec<Cell> {
        let mut neighbours = Vec::with_capacity(2 * self.direction_count());
        for &(dq, dr) in self.deltas() {
            for candidate in [
                Cell(cell.0 + dq, cell.1 + dr),
                Cell(cell.0 - dq, cell.1 - dr),
            ] {
                if self.contains(candidate) {
                    neighbours.push(candidate);
                }
            }
        }
        neighbours
    }
}

/// A square grid of side `size`, with horizontal and vertical placement directions and
/// 4-neighbour adjacency. Reading order is row-major: `(0,0), (1,0), ..., (0,1), ...`.
#[derive(Clone, Debug)]
pub struct RectGrid {
    size: i32,
    cells: Vec<Cell>,
}

impl RectGrid {
    /// The largest supported side: cell coordinates use `i32`.
    pub const MAX_SIDE: i64 = i32::MAX as i64;

    /// Creates a grid of the given side, validating that the dimension is positive and
    /// addressable.
    pub fn new(size: i64) -> Result<Self, CrosswordError> {
        if size <= 0 {
            return Err(CrosswordError::NonPositiveDimension(size));
        }
        if size > Self::MAX_SIDE {
            return Err(CrosswordError::DimensionTooLarge {
                value: size,
                max: Self::MAX_SIDE,
            });
        }
        let size = size as i32;
        let cells = (0..size)
            .cartesian_product(0..size)
            .map(|(y, x)| Cell(x, y))
            .collect();
        Ok(RectGrid { size, cells })
    }

    /// Returns the side of the grid.
    pub fn size(&self) -> i32 {
        self.size
    }
}

impl Geometry for RectGrid {
    fn cells(&self) -> &[Cell] {
        &self.cells
    }

    fn index_of(&self, cell: Cell) -> Option<usize> {
        let Cell(x, y) = cell;
        if x < 0 || y < 0 || x >= self.size || y >= self.size {
            return None;
        }
        Some((y as i64 * self.size as i64 + x as i64) as usize)
    }

    fn deltas(&self) -> &'static [(i32, i32)] {
        &RECT_DELTAS
    }

    fn longest_line(&self) -> usize {
        self.size as usize
    }

    fn diameter_bound(&self) -> usize {
        // Tighter than size²: a connected set of k cells has diameter < k, and a component
        // cannot exceed this many cells without two rows/columns being fully disconnected.
        let side = self.size as usize;
        (side + 1) * (side + 1) / 2 - 1
    }
}

/// A hexagonal disk of the given radius in axial coordinates, with three placement axes and
/// 6-neighbour adjacency. Reading order is lexicographic by `(q, r)`.
#[derive(Clone, Debug)]
pub struct HexGrid {
    radius: i32,
    cells: Vec<Cell>,
    index: HashMap<Cell, usize>,
}

impl HexGrid {
    /// The largest supported radius: stepped coordinates must stay addressable in `i32`.
    pub const MAX_RADIUS: i64 = (i32::MAX / 2) as i64;

    /// Creates a disk of the given radius, validating that the dimension is positive and
    /// addressable.
    pub fn new(radius: i64) -> Result<Self, CrosswordError> {
        if radius <= 0 {
            return Err(CrosswordError::NonPositiveDimension(radius));
        }
        if radius > Self::MAX_RADIUS {
            return Err(CrosswordError::DimensionTooLarge {
                value: radius,
                max: Self::MAX_RADIUS,
            });
        }
        let radius = radius as i32;
        let cells: Vec<Cell> = (-radius..=radius)
            .cartesian_product(-radius..=radius)
            .map(|(q, r)| Cell(q, r))
            .filter(|&Cell(q, r)| q.abs() + r.abs() + (q + r).abs() <= 2 * radius)
            .collect();
        let index = cells
            .iter()
            .enumerate()
            .map(|(position, &cell)| (cell, position))
            .collect();
        Ok(HexGrid {
            radius,
            cells,
            index,
        })
    }

    /// Returns the radius of the disk.
    pub fn radius(&self) -> i32 {
        self.radius
    }
}

impl Geometry for HexGrid {
    fn cells(&self) -> &[Cell] {
        &self.cells
    }

    fn index_of(&self, cell: Cell) -> Option<usize> {
        self.index.get(&cell).copied()
    }

    fn deltas(&self) -> &'static [(i32, i32)] {
        &HEX_DELTAS
    }

    fn longest_line(&self) -> usize {
        2 * self.radius as usize + 1
    }

    fn diameter_bound(&self) -> usize {
        self.cells.len() / 2
    }
}
