//! Board and cell model: the grid, per-cell capacity, and piece state.

pub mod cell;
pub mod grid;

pub use cell::Cell;
pub use grid::{Board, Coord, Neighbors};
