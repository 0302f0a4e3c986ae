//! Console rendering of solved layouts.
//!
//! The per-placement lines are an output contract: the companion tooling locates them with
//! regular expressions. The grid drawings below them are informational.

use gridweave_crossword::geometry::{Cell, Geometry, HexGrid, RectGrid, HORIZONTAL};
use gridweave_crossword::placement::Placement;

/// Renders a rectangular solution: the placement listing followed by a box-drawing grid.
pub fn rect_solution(placements: &[Placement], grid: &RectGrid) -> String {
    let mut lines = listing(placements, Placement::rect_description);

    let size = grid.size() as usize;
    let mut letters = vec![vec![' '; size]; size];
    for placement in placements {
        for (offset, letter) in placement.word.chars().enumerate() {
            let Cell(x, y) = placement.cell;
            let (x, y) = if placement.direction == HORIZONTAL {
                (x as usize + offset, y as usize)
            } else {
                (x as usize, y as usize + offset)
            };
            letters[y][x] = letter;
        }
    }

    lines.push(frame('┌', '┬', '┐', size));
    for (row_index, row) in letters.iter().enumerate() {
        if row_index != 0 {
            lines.push(frame('├', '┼', '┤', size));
        }
        let mut line = String::from('│');
        for &letter in row {
            line.push(letter);
            line.push('│');
        }
        lines.push(line);
    }
    lines.push(frame('└', '┴', '┘', size));

    lines.join("\n")
}

/// Renders a hexagonal solution: the placement listing followed by a double-resolution console
/// drawing where `.` marks an empty disk cell.
pub fn hex_solution(placements: &[Placement], grid: &HexGrid) -> String {
    let mut lines = listing(placements, Placement::hex_description);

    // Axial coordinates map to a doubled character grid so the three axes stay readable:
    // (q, r) lands at column 3·(q−min_q), row 2·(r−min_r) + (q−min_q).
    let min_q = grid.cells().iter().map(|cell| cell.0).min().unwrap_or(0);
    let min_r = grid.cells().iter().map(|cell| cell.1).min().unwrap_or(0);
    let position = |Cell(q, r): Cell| {
        (
            ((r - min_r) * 2 + (q - min_q)) as usize,
            ((q - min_q) * 3) as usize,
        )
    };

    let (max_row, max_col) = grid
        .cells()
        .iter()
        .map(|&cell| position(cell))
        .fold((0, 0), |(row, col), (r, c)| (row.max(r), col.max(c)));
    let mut drawing = vec![vec![' '; max_col + 3]; max_row + 3];
    for &cell in grid.cells() {
        let (row, col) = position(cell);
        drawing[row][col] = '.';
    }
    for placement in placements {
        for (offset, letter) in placement.word.chars().enumerate() {
            let covered = grid.step(placement.cell, placement.direction, offset as i32);
            let (row, col) = position(covered);
            drawing[row][col] = letter;
        }
    }

    lines.push(String::new());
    lines.push("--- Hexagonal Grid ---".to_string());
    for row in &drawing {
        if row.iter().any(|symbol| !symbol.is_whitespace()) {
            let joined: Vec<String> = row.iter().map(|symbol| symbol.to_string()).collect();
            lines.push(joined.join(" "));
        }
    }
    lines.push("----------------------".to_string());

    lines.join("\n")
}

/// Builds the header and the numbered placement lines.
fn listing(placements: &[Placement], describe: fn(&Placement) -> String) -> Vec<String> {
    let symbols: usize = placements
        .iter()
        .map(|placement| placement.word.chars().count())
        .sum();
    let mut lines = vec![format!(
        "Placed {} words ({} symbols):",
        placements.len(),
        symbols
    )];
    for (index, placement) in placements.iter().enumerate() {
        lines.push(format!(
            "{:2}) {} {}",
            index + 1,
            placement.word,
            describe(placement)
        ));
    }
    lines
}

fn frame(left: char, junction: char, right: char, size: usize) -> String {
    let mut line = String::new();
    line.push(left);
    for column in 0..size {
        if column != 0 {
            line.push(junction);
        }
        line.push('─');
    }
    line.push(right);
    line
}

#[cfg(test)]
mod tests {
    use super::*;
    use gridweave_crossword::geometry::VERTICAL;

    #[test]
    fn rect_solution_lists_placements_and_draws_the_grid() {
        let placements = vec![
            Placement {
                word: "HI".to_string(),
                cell: Cell(0, 0),
                direction: HORIZONTAL,
            },
            Placement {
                word: "IT".to_string(),
                cell: Cell(1, 0),
                direction: VERTICAL,
            },
        ];
        let grid = RectGrid::new(3).unwrap();

        let expected = "\
Placed 2 words (4 symbols):
 1) HI Placement(x=0, y=0, horizontal=True)
 2) IT Placement(x=1, y=0, horizontal=False)
┌─┬─┬─┐
│H│I│ │
├─┼─┼─┤
│ │T│ │
├─┼─┼─┤
│ │ │ │
└─┴─┴─┘";
        assert_eq!(expected, rect_solution(&placements, &grid));
    }

    #[test]
    fn hex_solution_marks_the_disk_and_the_letters() {
        let placements = vec![Placement {
            word: "ON".to_string(),
            cell: Cell(0, -1),
            direction: 1,
        }];
        let grid = HexGrid::new(1).unwrap();

        let rendered = hex_solution(&placements, &grid);

        assert!(rendered.starts_with(
            "Placed 1 words (2 symbols):\n 1) ON @ (0,-1) orient=1\n\n--- Hexagonal Grid ---"
        ));
        assert!(rendered.ends_with("----------------------"));
        // 7 disk cells, two of them covered by letters.
        let (_, drawing) = rendered.split_once("--- Hexagonal Grid ---").unwrap();
        assert_eq!(5, drawing.matches('.').count());
        assert_eq!(1, drawing.matches('O').count());
        assert_eq!(1, drawing.matches('N').count());
    }
}
