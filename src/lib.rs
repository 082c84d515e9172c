use std::ops::Index;
use std::path::Path as FsPath;

use anyhow::{Context, Result};

pub mod config;
mod fmt;
mod parse;
pub mod solve;

pub use fmt::{Snapshot, Trail};
pub use parse::FormatError;
pub use solve::{find_path, Endpoint, InvalidInput, OutOfBudget, Path, Search, Step};

/// A grid coordinate, `(row, column)`.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash)]
pub struct Pos(pub usize, pub usize);

impl Pos {
    /// Number of orthogonal steps between two positions, ignoring walls.
    pub fn manhattan(self, other: Pos) -> usize {
        self.0.abs_diff(other.0) + self.1.abs_diff(other.1)
    }
}

#[derive(Default, Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum Cell {
    #[default]
    Empty,
    Wall,
    Start,
    Goal,
}

impl Cell {
    pub fn from_marker(ch: char) -> Option<Self> {
        Some(match ch {
            ' ' => Self::Empty,
            '#' => Self::Wall,
            'S' => Self::Start,
            '$' => Self::Goal,
            _ => return None,
        })
    }

    pub fn marker(self) -> char {
        match self {
            Self::Empty => ' ',
            Self::Wall => '#',
            Self::Start => 'S',
            Self::Goal => '$',
        }
    }

    pub fn is_wall(self) -> bool {
        matches!(self, Self::Wall)
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum Direction {
    North = 0,
    South,
    West,
    East,
}

impl Direction {
    /// Expansion order of the search. Fixes which of several equally short paths wins.
    pub const ALL: [Self; 4] = [Self::North, Self::South, Self::West, Self::East];
}

/// Rectangular, read-only grid of cells stored row-major.
#[derive(Debug, Clone, PartialEq, Eq, Hash)]
pub struct Grid {
    height: usize,
    width: usize,
    grid: Box<[Cell]>,
}

impl Index<Pos> for Grid {
    type Output = Cell;
    fn index(&self, pos: Pos) -> &Self::Output {
        assert!(self.contains(pos), "{pos:?} out of the grid");
        &self.grid[pos.0 * self.width + pos.1]
    }
}

impl Grid {
    pub fn height(&self) -> usize {
        self.height
    }

    pub fn width(&self) -> usize {
        self.width
    }

    pub fn contains(&self, pos: Pos) -> bool {
        pos.0 < self.height && pos.1 < self.width
    }

    pub fn get(&self, pos: Pos) -> Option<Cell> {
        self.contains(pos)
            .then(|| self.grid[pos.0 * self.width + pos.1])
    }

    pub fn cells(&self) -> impl Iterator<Item = (Pos, Cell)> + '_ {
        let width = self.width;
        self.grid
            .iter()
            .enumerate()
            .map(move |(idx, &cell)| (Pos(idx / width, idx % width), cell))
    }

    /// The orthogonal neighbour of `pos` in direction `dir`, if it lies inside the grid.
    pub fn sibling_pos(&self, pos: Pos, dir: Direction) -> Option<Pos> {
        const DIRECTIONS: [(isize, isize); 4] = [(-1, 0), (1, 0), (0, -1), (0, 1)];
        let (dx, dy) = DIRECTIONS[dir as usize];
        let x = pos.0.checked_add_signed(dx)?;
        let y = pos.1.checked_add_signed(dy)?;
        if self.height <= x || self.width <= y {
            return None;
        }
        Some(Pos(x, y))
    }
}

/// A loaded puzzle: the grid together with its unique start and goal.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Puzzle {
    pub grid: Grid,
    pub start: Pos,
    pub goal: Pos,
}

impl Puzzle {
    /// Read and parse the puzzle file `name` inside `dir`.
    pub fn load(dir: impl AsRef<FsPath>, name: &str) -> Result<Self> {
        let path = dir.as_ref().join(name);
        let text = std::fs::read_to_string(&path)
            .with_context(|| format!("Failed to read puzzle {}", path.display()))?;
        let puzzle = text
            .parse::<Puzzle>()
            .with_context(|| format!("Failed to parse puzzle {}", path.display()))?;
        Ok(puzzle)
    }

    pub fn solve(
        &self,
        on_step: impl FnMut(&Search<'_>, &Step),
    ) -> Result<Option<Path>, InvalidInput> {
        find_path(&self.grid, self.start, self.goal, on_step)
    }
}
