use std::fmt;

use crate::{Cell, Grid, Path, Pos};

impl fmt::Display for Pos {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "({}, {})", self.0, self.1)
    }
}

impl fmt::Display for Cell {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        self.marker().fmt(f)
    }
}

/// The puzzle file format: dimensions followed by the rows.
impl fmt::Display for Grid {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        writeln!(f, "{}\n{}", self.height, self.width)?;
        write_rows(f, self, |_, cell| cell.marker())
    }
}

impl fmt::Display for Path {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        for (i, pos) in self.iter().enumerate() {
            if i != 0 {
                " -> ".fmt(f)?;
            }
            pos.fmt(f)?;
        }
        Ok(())
    }
}

fn write_rows(
    f: &mut fmt::Formatter<'_>,
    grid: &Grid,
    mut marker: impl FnMut(Pos, Cell) -> char,
) -> fmt::Result {
    for (pos, cell) in grid.cells() {
        if pos.1 == 0 && pos.0 != 0 {
            f.write_str("\n")?;
        }
        write!(f, "{}", marker(pos, cell))?;
    }
    Ok(())
}

/// Progress view of the grid with the position being expanded marked `*`.
/// Empty cells show as `_` so trailing ones stay visible.
#[derive(Debug, Clone, Copy)]
pub struct Snapshot<'a> {
    pub grid: &'a Grid,
    pub current: Pos,
}

impl fmt::Display for Snapshot<'_> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write_rows(f, self.grid, |pos, cell| match cell {
            _ if pos == self.current => '*',
            Cell::Empty => '_',
            _ => cell.marker(),
        })
    }
}

/// The grid with the empty cells along `path` marked `o`.
#[derive(Debug, Clone, Copy)]
pub struct Trail<'a> {
    pub grid: &'a Grid,
    pub path: &'a Path,
}

impl fmt::Display for Trail<'_> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write_rows(f, self.grid, |pos, cell| match cell {
            Cell::Empty if self.path.contains(&pos) => 'o',
            Cell::Empty => '_',
            _ => cell.marker(),
        })
    }
}
