use std::fmt;
use std::str::FromStr;

use crate::{Cell, Grid, Pos, Puzzle};

/// Why a puzzle file was rejected.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum FormatError {
    MissingRowCount,
    InvalidRowCount(String),
    MissingColumnCount,
    InvalidColumnCount(String),
    /// A row whose length differs from the declared column count.
    RowWidth {
        row: usize,
        expected: usize,
        found: usize,
        line: String,
    },
    InvalidMarker {
        row: usize,
        column: usize,
        marker: char,
    },
    RowCount {
        expected: usize,
        found: usize,
    },
    StartCount(usize),
    GoalCount(usize),
}

impl fmt::Display for FormatError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::MissingRowCount => write!(f, "missing row count on line 1"),
            Self::InvalidRowCount(text) => write!(f, "invalid row count: {text:?}"),
            Self::MissingColumnCount => write!(f, "missing column count on line 2"),
            Self::InvalidColumnCount(text) => write!(f, "invalid column count: {text:?}"),
            Self::RowWidth {
                row,
                expected,
                found,
                line,
            } => write!(
                f,
                "row {row} needs to be {expected} marks long, got {found}: {line:?}"
            ),
            Self::InvalidMarker {
                row,
                column,
                marker,
            } => write!(
                f,
                "invalid marker {marker:?} at ({row}, {column}), expecting one of '#', '$', 'S' or ' '"
            ),
            Self::RowCount { expected, found } => {
                write!(f, "expecting {expected} rows, got {found}")
            }
            Self::StartCount(n) => write!(f, "needed exactly one start (S), got {n}"),
            Self::GoalCount(n) => write!(f, "needed exactly one goal ($), got {n}"),
        }
    }
}

impl std::error::Error for FormatError {}

impl FromStr for Puzzle {
    type Err = FormatError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        let mut lines = s.lines();

        let line = lines.next().ok_or(FormatError::MissingRowCount)?.trim();
        let height = line
            .parse::<usize>()
            .map_err(|_| FormatError::InvalidRowCount(line.to_owned()))?;
        let line = lines.next().ok_or(FormatError::MissingColumnCount)?.trim();
        let width = line
            .parse::<usize>()
            .map_err(|_| FormatError::InvalidColumnCount(line.to_owned()))?;

        let mut grid = Vec::new();
        let mut starts = Vec::new();
        let mut goals = Vec::new();
        let mut found_rows = 0;
        for (i, line) in lines.enumerate() {
            let found = line.chars().count();
            if found != width {
                return Err(FormatError::RowWidth {
                    row: i,
                    expected: width,
                    found,
                    line: line.to_owned(),
                });
            }
            for (j, ch) in line.chars().enumerate() {
                let cell = Cell::from_marker(ch).ok_or(FormatError::InvalidMarker {
                    row: i,
                    column: j,
                    marker: ch,
                })?;
                match cell {
                    Cell::Start => starts.push(Pos(i, j)),
                    Cell::Goal => goals.push(Pos(i, j)),
                    Cell::Empty | Cell::Wall => {}
                }
                grid.push(cell);
            }
            found_rows += 1;
        }

        if found_rows != height {
            return Err(FormatError::RowCount {
                expected: height,
                found: found_rows,
            });
        }
        let &[start] = &starts[..] else {
            return Err(FormatError::StartCount(starts.len()));
        };
        let &[goal] = &goals[..] else {
            return Err(FormatError::GoalCount(goals.len()));
        };

        Ok(Puzzle {
            grid: Grid {
                height,
                width,
                grid: grid.into(),
            },
            start,
            goal,
        })
    }
}
