use crate::geometry::{Cell, HORIZONTAL};

/// A word assigned to a start cell and a direction: the word's letters occupy consecutive cells
/// along that direction, beginning at the start cell.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct Placement {
    pub word: String,
    pub cell: Cell,
    pub direction: usize,
}

impl Placement {
    /// Renders the rectangular textual form, e.g. `Placement(x=0, y=2, horizontal=True)`.
    ///
    /// Downstream tooling locates placements in program output by matching this exact shape,
    /// Python-style booleans included. Do not reformat.
    pub fn rect_description(&self) -> String {
        format!(
            "Placement(x={}, y={}, horizontal={})",
            self.cell.0,
            self.cell.1,
            if self.direction == HORIZONTAL {
                "True"
            } else {
                "False"
            }
        )
    }

    /// Renders the hexagonal textual form, e.g. `@ (0,-2) orient=1`. Part of the same output
    /// contract as [rect_description](Self::rect_description).
    pub fn hex_description(&self) -> String {
        format!(
            "@ ({},{}) orient={}",
            self.cell.0, self.cell.1, self.direction
        )
    }
}
