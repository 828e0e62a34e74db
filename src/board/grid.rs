//! The game board: a fixed-shape grid of cells.
//!
//! Cells live in one contiguous `Vec` indexed by `(row, col)`; nothing
//! outside the board holds a reference to a cell. Per-cell capacity is
//! computed once at construction as the in-bounds orthogonal neighbor
//! count, so corners and edges detonate sooner than interior cells.
//!
//! The board exposes geometry and mutable cell access; it never validates
//! game rules. Turn order, ownership checks, and overload handling are the
//! engine's business.

use serde::{Deserialize, Serialize};
use smallvec::SmallVec;

use crate::core::PlayerId;

use super::cell::Cell;

/// Grid coordinate, `(row, col)`.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct Coord {
    pub row: usize,
    pub col: usize,
}

impl Coord {
    /// Create a coordinate.
    #[must_use]
    pub const fn new(row: usize, col: usize) -> Self {
        Self { row, col }
    }
}

impl std::fmt::Display for Coord {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "({}, {})", self.row, self.col)
    }
}

/// In-bounds orthogonal neighbors; 1 to 4 entries, stack-allocated.
pub type Neighbors = SmallVec<[Coord; 4]>;

/// Fixed `rows x cols` grid of cells.
///
/// Dimensions never change after construction. The engine is the sole
/// mutator for the session's lifetime.
#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub struct Board {
    rows: usize,
    cols: usize,
    cells: Vec<Cell>,
}

impl Board {
    /// Create an empty board with per-cell capacities precomputed.
    #[must_use]
    pub fn new(rows: usize, cols: usize) -> Self {
        assert!(rows >= 1 && cols >= 1, "Board must be at least 1x1");
        // A two-cell strip is two capacity-1 cells facing each other, which
        // would detonate into one another without end.
        assert!(rows * cols >= 3, "Board must have at least 3 cells");

        let mut cells = Vec::with_capacity(rows * cols);
        for row in 0..rows {
            for col in 0..cols {
                cells.push(Cell::new(Self::neighbor_count(rows, cols, row, col)));
            }
        }

        Self { rows, cols, cells }
    }

    fn neighbor_count(rows: usize, cols: usize, row: usize, col: usize) -> u8 {
        let mut count = 0;
        if row > 0 {
            count += 1;
        }
        if row < rows - 1 {
            count += 1;
        }
        if col > 0 {
            count += 1;
        }
        if col < cols - 1 {
            count += 1;
        }
        count
    }

    /// Number of rows.
    #[must_use]
    pub fn rows(&self) -> usize {
        self.rows
    }

    /// Number of columns.
    #[must_use]
    pub fn cols(&self) -> usize {
        self.cols
    }

    /// True when `at` lies on the board.
    #[must_use]
    pub fn in_bounds(&self, at: Coord) -> bool {
        at.row < self.rows && at.col < self.cols
    }

    fn index(&self, at: Coord) -> usize {
        debug_assert!(self.in_bounds(at));
        at.row * self.cols + at.col
    }

    /// The cell at `at`. Panics when out of bounds.
    #[must_use]
    pub fn cell(&self, at: Coord) -> &Cell {
        &self.cells[self.index(at)]
    }

    /// Mutable access to the cell at `at`. Panics when out of bounds.
    pub(crate) fn cell_mut(&mut self, at: Coord) -> &mut Cell {
        let idx = self.index(at);
        &mut self.cells[idx]
    }

    /// The cell at `at`, or `None` when out of bounds.
    #[must_use]
    pub fn get(&self, at: Coord) -> Option<&Cell> {
        if self.in_bounds(at) {
            Some(self.cell(at))
        } else {
            None
        }
    }

    /// Fixed capacity of the cell at `at`: its in-bounds neighbor count.
    #[must_use]
    pub fn capacity_of(&self, at: Coord) -> u8 {
        self.cell(at).capacity()
    }

    /// In-bounds orthogonal neighbors of `at`, in up/down/left/right order.
    #[must_use]
    pub fn neighbors(&self, at: Coord) -> Neighbors {
        let mut out = Neighbors::new();
        if at.row > 0 {
            out.push(Coord::new(at.row - 1, at.col));
        }
        if at.row < self.rows - 1 {
            out.push(Coord::new(at.row + 1, at.col));
        }
        if at.col > 0 {
            out.push(Coord::new(at.row, at.col - 1));
        }
        if at.col < self.cols - 1 {
            out.push(Coord::new(at.row, at.col + 1));
        }
        out
    }

    /// Iterate over all cells with their coordinates, row-major.
    pub fn iter(&self) -> impl Iterator<Item = (Coord, &Cell)> {
        let cols = self.cols;
        self.cells
            .iter()
            .enumerate()
            .map(move |(i, cell)| (Coord::new(i / cols, i % cols), cell))
    }

    /// Sum of pieces in cells owned by `player`.
    #[must_use]
    pub fn pieces_owned_by(&self, player: PlayerId) -> u32 {
        self.cells
            .iter()
            .filter(|c| c.owner() == Some(player))
            .map(Cell::pieces)
            .sum()
    }

    /// Total pieces on the board.
    #[must_use]
    pub fn total_pieces(&self) -> u32 {
        self.cells.iter().map(Cell::pieces).sum()
    }
}
