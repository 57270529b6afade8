//! Square board of numeric cells.

use std::fmt;
use std::str::FromStr;

use itertools::Itertools;
use rand::Rng;

use crate::error::Error;
use crate::game::core::{Move, Value};

/// Range of values used for randomly generated boards.
const RANDOM_VALUES: std::ops::RangeInclusive<Value> = 1..=9;

/// Marker of a claimed cell in the text representation.
const CLAIMED_MARKER: &str = "-";

/// A single board square: either a value that can still be picked or a marker
/// that somebody already picked it.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash)]
pub enum Cell {
    /// Unclaimed cell with its value.
    Value(Value),
    /// The cell was claimed earlier in the game.
    Claimed,
}

impl Cell {
    /// Value of the cell if it can still be claimed.
    #[must_use]
    pub const fn value(self) -> Option<Value> {
        match self {
            Self::Value(value) => Some(value),
            Self::Claimed => None,
        }
    }

    #[must_use]
    #[allow(missing_docs)]
    pub const fn is_free(self) -> bool {
        matches!(self, Self::Value(_))
    }
}

/// N×N grid stored in row-major order. The dimension is fixed for the lifetime
/// of the game; only the claimed/unclaimed status of the cells changes.
///
/// An empty (0×0) board is representable: it simply has no legal moves.
#[derive(Clone, Debug, PartialEq, Eq, Hash)]
pub struct Board {
    size: usize,
    cells: Vec<Cell>,
}

impl Board {
    /// Creates a board with all cells unclaimed.
    ///
    /// # Errors
    ///
    /// Returns [`Error::InvalidBoard`] if the rows do not form a square.
    pub fn from_rows(rows: Vec<Vec<Value>>) -> Result<Self, Error> {
        Self::from_cells(
            rows.into_iter()
                .map(|row| row.into_iter().map(Cell::Value).collect())
                .collect(),
        )
    }

    fn from_cells(rows: Vec<Vec<Cell>>) -> Result<Self, Error> {
        let size = rows.len();
        if let Some((index, row)) = rows.iter().find_position(|row| row.len() != size) {
            return Err(Error::InvalidBoard(format!(
                "expected {size} cells in every row, row {index} has {}",
                row.len()
            )));
        }
        Ok(Self {
            size,
            cells: rows.into_iter().flatten().collect(),
        })
    }

    /// Generates a board with values drawn uniformly from `1..=9`.
    #[must_use]
    pub fn random(size: usize, rng: &mut impl Rng) -> Self {
        Self {
            size,
            cells: (0..size * size)
                .map(|_| Cell::Value(rng.gen_range(RANDOM_VALUES)))
                .collect(),
        }
    }

    /// Board dimension N.
    #[must_use]
    pub const fn size(&self) -> usize {
        self.size
    }

    /// Returns `true` for the degenerate 0×0 board.
    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.cells.is_empty()
    }

    #[must_use]
    #[allow(missing_docs)]
    pub const fn contains(&self, square: Move) -> bool {
        square.row < self.size && square.column < self.size
    }

    /// Cell at the given coordinates or `None` if they are outside the board.
    #[must_use]
    pub fn cell(&self, square: Move) -> Option<Cell> {
        self.contains(square)
            .then(|| self.cells[square.row * self.size + square.column])
    }

    /// Value of an unclaimed cell. Claimed and out-of-bounds cells have no
    /// value.
    #[must_use]
    pub fn value(&self, square: Move) -> Option<Value> {
        self.cell(square).and_then(Cell::value)
    }

    #[must_use]
    #[allow(missing_docs)]
    pub fn is_free(&self, square: Move) -> bool {
        self.value(square).is_some()
    }

    /// Marks the cell as claimed and returns its value. Returns `None` if the
    /// cell was already claimed or does not exist.
    pub(crate) fn claim(&mut self, square: Move) -> Option<Value> {
        if !self.contains(square) {
            return None;
        }
        let cell = &mut self.cells[square.row * self.size + square.column];
        let value = cell.value()?;
        *cell = Cell::Claimed;
        Some(value)
    }

    /// Unclaimed cells with their values in row-major order.
    pub fn free_cells(&self) -> impl Iterator<Item = (Move, Value)> + '_ {
        self.cells.iter().enumerate().filter_map(|(index, cell)| {
            cell.value()
                .map(|value| (Move::new(index / self.size, index % self.size), value))
        })
    }

    /// Values of the unclaimed cells in the given row.
    pub fn row_values(&self, row: usize) -> impl Iterator<Item = Value> + '_ {
        self.cells[row * self.size..(row + 1) * self.size]
            .iter()
            .filter_map(|cell| cell.value())
    }

    /// Values of the unclaimed cells in the given column.
    pub fn column_values(&self, column: usize) -> impl Iterator<Item = Value> + '_ {
        self.cells
            .iter()
            .skip(column)
            .step_by(self.size.max(1))
            .filter_map(|cell| cell.value())
    }

    /// Number of cells claimed so far.
    #[must_use]
    pub fn claimed_count(&self) -> usize {
        self.cells.iter().filter(|cell| !cell.is_free()).count()
    }

    /// Number of cells that can still be claimed, an upper bound on the
    /// remaining plies.
    #[must_use]
    pub fn free_count(&self) -> usize {
        self.cells.len() - self.claimed_count()
    }

    /// Sum of all unclaimed values.
    #[must_use]
    pub fn free_sum(&self) -> u64 {
        self.cells
            .iter()
            .filter_map(|cell| cell.value())
            .map(u64::from)
            .sum()
    }
}

impl FromStr for Board {
    type Err = Error;

    /// Parses rows separated by newlines, `;` or `/`. Cells are separated by
    /// commas and/or whitespace, `-` marks a claimed cell:
    ///
    /// ```
    /// use rowcol::game::{Board, Move};
    ///
    /// let board: rowcol::game::Board = "1, 2\n-, 4".parse().unwrap();
    /// assert_eq!(board.size(), 2);
    /// assert_eq!(board.value(Move::new(0, 1)), Some(2));
    /// assert_eq!(board.value(Move::new(1, 0)), None);
    /// assert_eq!(board, "1 2/- 4".parse().unwrap());
    /// ```
    fn from_str(input: &str) -> Result<Self, Self::Err> {
        let rows = input
            .split(['\n', ';', '/'])
            .map(str::trim)
            .filter(|line| !line.is_empty())
            .enumerate()
            .map(|(line, row)| {
                row.split(|c: char| c == ',' || c.is_whitespace())
                    .filter(|token| !token.is_empty())
                    .map(|token| parse_cell(token, line))
                    .collect::<Result<Vec<_>, _>>()
            })
            .collect::<Result<Vec<_>, _>>()?;
        if rows.is_empty() {
            return Err(Error::InvalidBoard("the input is empty".to_string()));
        }
        Self::from_cells(rows)
    }
}

fn parse_cell(token: &str, line: usize) -> Result<Cell, Error> {
    if token == CLAIMED_MARKER {
        return Ok(Cell::Claimed);
    }
    token
        .parse::<Value>()
        .map(Cell::Value)
        .map_err(|_| Error::InvalidBoard(format!("non-numeric value '{token}' in row {line}")))
}

impl fmt::Display for Board {
    /// Writes one row per line with `", "` between cells, which [`FromStr`]
    /// reads back.
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        for row in self.cells.chunks(self.size.max(1)) {
            writeln!(
                f,
                "{}",
                row.iter()
                    .map(|cell| match cell {
                        Cell::Value(value) => value.to_string(),
                        Cell::Claimed => CLAIMED_MARKER.to_string(),
                    })
                    .join(", ")
            )?;
        }
        Ok(())
    }
}
