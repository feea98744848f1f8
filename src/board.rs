//! # Drop Board
//!
//! A fixed-size grid of [`Marker`]s filled under gravity: a marker dropped
//! into a column lands on the lowest empty row. Row 0 is the bottom row.
//!
//! The board owns no game rules. It only answers cell and column queries and
//! performs drops; win and draw analysis live in the scanner and oracle
//! modules. Because the only mutation is an append to a column, every column's
//! occupied cells always form a contiguous run starting at row 0.

use colored::Colorize;
use connectx_lines::Dimensions;
use std::fmt;

use crate::config::RulesConfig;
use crate::error::RulesError;
use crate::marker::Marker;

/// A `(row, column)` cell coordinate, 0-indexed from the bottom-left corner
#[derive(Clone, Copy, PartialEq, Eq, Hash, Debug, PartialOrd, Ord)]
pub struct Position {
    pub row: usize,
    pub column: usize,
}

impl Position {
    pub const fn new(row: usize, column: usize) -> Self {
        Self { row, column }
    }
}

impl From<(usize, usize)> for Position {
    fn from((row, column): (usize, usize)) -> Self {
        Self { row, column }
    }
}

impl fmt::Display for Position {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "({}, {})", self.row, self.column)
    }
}

/// The game grid
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct Board {
    /// Cells, row-major with row 0 first
    cells: Vec<Marker>,
    /// Occupied cell count of each column
    heights: Vec<usize>,
    rows: usize,
    columns: usize,
}

impl Board {
    /// Creates an empty board after checking its dimensions against `config`
    pub fn new(rows: usize, columns: usize, config: &RulesConfig) -> Result<Self, RulesError> {
        if rows < config.min_rows
            || rows > config.max_rows
            || columns < config.min_columns
            || columns > config.max_columns
        {
            return Err(RulesError::InvalidDimensions {
                rows,
                columns,
                min_rows: config.min_rows,
                max_rows: config.max_rows,
                min_columns: config.min_columns,
                max_columns: config.max_columns,
            });
        }
        Ok(Self {
            cells: vec![Marker::EMPTY; rows * columns],
            heights: vec![0; columns],
            rows,
            columns,
        })
    }

    /// The classic 6 rows by 7 columns board
    pub fn classic() -> Self {
        Self {
            cells: vec![Marker::EMPTY; 6 * 7],
            heights: vec![0; 7],
            rows: 6,
            columns: 7,
        }
    }

    pub fn rows(&self) -> usize {
        self.rows
    }

    pub fn columns(&self) -> usize {
        self.columns
    }

    pub fn dimensions(&self) -> Dimensions {
        Dimensions::new(self.rows, self.columns)
    }

    /// Total number of cells
    pub fn cell_count(&self) -> usize {
        self.rows * self.columns
    }

    fn check_column(&self, column: usize) -> Result<(), RulesError> {
        if column >= self.columns {
            return Err(RulesError::ColumnOutOfBounds {
                column,
                columns: self.columns,
            });
        }
        Ok(())
    }

    /// Marker stored at `position`
    pub fn cell_at(&self, position: Position) -> Result<Marker, RulesError> {
        if position.row >= self.rows || position.column >= self.columns {
            return Err(RulesError::PositionOutOfBounds {
                row: position.row,
                column: position.column,
                rows: self.rows,
                columns: self.columns,
            });
        }
        Ok(self.cell(position.row, position.column))
    }

    /// Unchecked lookup for coordinates the caller already knows are on the board
    pub(crate) fn cell(&self, row: usize, column: usize) -> Marker {
        self.cells[row * self.columns + column]
    }

    /// Drops `marker` into `column` and returns where it landed.
    ///
    /// Dropping into a full column changes nothing and returns the top cell of
    /// that column; callers that care must check [`Board::is_column_full`] first.
    pub fn drop_marker(&mut self, column: usize, marker: Marker) -> Result<Position, RulesError> {
        self.check_column(column)?;
        if marker.is_empty() {
            return Err(RulesError::EmptyMarker);
        }

        let height = self.heights[column];
        if height == self.rows {
            tracing::warn!(column, "drop into a full column ignored");
            return Ok(Position::new(self.rows - 1, column));
        }

        self.cells[height * self.columns + column] = marker;
        self.heights[column] = height + 1;
        Ok(Position::new(height, column))
    }

    pub fn is_column_full(&self, column: usize) -> Result<bool, RulesError> {
        self.check_column(column)?;
        Ok(self.heights[column] == self.rows)
    }

    /// Number of occupied cells in `column`, i.e. the row the next drop lands on
    pub fn column_height(&self, column: usize) -> Result<usize, RulesError> {
        self.check_column(column)?;
        Ok(self.heights[column])
    }

    pub(crate) fn height(&self, column: usize) -> usize {
        self.heights[column]
    }

    /// Number of empty cells left on the board
    pub fn empty_count(&self) -> usize {
        self.cell_count() - self.heights.iter().sum::<usize>()
    }

    pub fn is_full(&self) -> bool {
        self.heights.iter().all(|&h| h == self.rows)
    }

    /// Columns that can still take a marker, left to right
    pub fn open_columns(&self) -> Vec<usize> {
        (0..self.columns)
            .filter(|&c| self.heights[c] < self.rows)
            .collect()
    }

    /// Every position on the board, row-major from the bottom row
    pub fn positions(&self) -> impl Iterator<Item = Position> + '_ {
        (0..self.rows).flat_map(move |r| (0..self.columns).map(move |c| Position::new(r, c)))
    }

    /// Checks that every column is a contiguous run of markers from row 0
    pub fn satisfies_gravity(&self) -> bool {
        (0..self.columns).all(|c| {
            (0..self.rows).all(|r| self.cell(r, c).is_empty() == (r >= self.heights[c]))
        })
    }
}

impl fmt::Display for Board {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        for r in (0..self.rows).rev() {
            write!(f, "{:>2} |", r)?;
            for c in 0..self.columns {
                write!(f, " {} |", self.cell(r, c).painted())?;
            }
            writeln!(f)?;
        }
        write!(f, "   ")?;
        for c in 0..self.columns {
            write!(f, "{:>3} ", c.to_string().dimmed())?;
        }
        writeln!(f)
    }
}
