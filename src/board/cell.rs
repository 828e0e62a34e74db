//! A single board cell.
//!
//! Capacity is fixed at board construction (the cell's in-bounds orthogonal
//! neighbor count). Everything else mutates in place: piece count, owner,
//! and the repeat-placement counter behind the consecutive-tap mechanic.
//!
//! Invariant: a cell has an owner exactly while it holds pieces. `add_piece`
//! assigns ownership on the 0 -> 1 transition; only `clear` empties a cell,
//! dropping ownership with it.

use serde::{Deserialize, Serialize};

use crate::core::PlayerId;

/// Mutable unit of board state.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub struct Cell {
    capacity: u8,
    pieces: u32,
    owner: Option<PlayerId>,
    repeat_placements: u32,
}

impl Cell {
    /// Create an empty cell with the given fixed capacity.
    #[must_use]
    pub(crate) fn new(capacity: u8) -> Self {
        debug_assert!((1..=4).contains(&capacity));
        Self {
            capacity,
            pieces: 0,
            owner: None,
            repeat_placements: 0,
        }
    }

    /// Fixed capacity: pieces held before the cell detonates.
    #[must_use]
    pub fn capacity(&self) -> u8 {
        self.capacity
    }

    /// Current piece count.
    #[must_use]
    pub fn pieces(&self) -> u32 {
        self.pieces
    }

    /// Owning player, `None` while empty.
    #[must_use]
    pub fn owner(&self) -> Option<PlayerId> {
        self.owner
    }

    /// True when the cell holds no pieces.
    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.pieces == 0
    }

    /// True when the piece count has reached or exceeded capacity.
    #[must_use]
    pub fn is_overloaded(&self) -> bool {
        self.pieces >= u32::from(self.capacity)
    }

    /// Consecutive placements by the current owner without an owner change.
    #[must_use]
    pub fn repeat_placements(&self) -> u32 {
        self.repeat_placements
    }

    /// Add one piece. An empty cell becomes owned by `player`; a non-empty
    /// cell keeps its owner regardless of who the piece came from.
    pub(crate) fn add_piece(&mut self, player: PlayerId) {
        if self.pieces == 0 {
            self.owner = Some(player);
        }
        self.pieces += 1;
    }

    /// Empty the cell: no pieces, no owner, repeat counter reset.
    pub(crate) fn clear(&mut self) {
        self.pieces = 0;
        self.owner = None;
        self.repeat_placements = 0;
    }

    /// Reset the repeat counter (ownership changed since the last placement).
    pub(crate) fn reset_repeat_placements(&mut self) {
        self.repeat_placements = 0;
    }

    /// Bump the repeat counter and return its new value.
    pub(crate) fn bump_repeat_placements(&mut self) -> u32 {
        self.repeat_placements += 1;
        self.repeat_placements
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_new_cell_is_empty() {
        let cell = Cell::new(2);

        assert!(cell.is_empty());
        assert!(!cell.is_overloaded());
        assert_eq!(cell.owner(), None);
        assert_eq!(cell.capacity(), 2);
        assert_eq!(cell.repeat_placements(), 0);
    }

    #[test]
    fn test_first_piece_takes_ownership() {
        let mut cell = Cell::new(3);
        cell.add_piece(PlayerId::new(1));

        assert_eq!(cell.pieces(), 1);
        assert_eq!(cell.owner(), Some(PlayerId::new(1)));
    }

    #[test]
    fn test_later_pieces_keep_owner() {
        let mut cell = Cell::new(4);
        cell.add_piece(PlayerId::new(0));
        cell.add_piece(PlayerId::new(1));

        assert_eq!(cell.pieces(), 2);
        assert_eq!(cell.owner(), Some(PlayerId::new(0)));
    }

    #[test]
    fn test_overload_at_capacity() {
        let mut cell = Cell::new(2);
        cell.add_piece(PlayerId::new(0));
        assert!(!cell.is_overloaded());

        cell.add_piece(PlayerId::new(0));
        assert!(cell.is_overloaded());

        // Batch placement can push past capacity; still overloaded.
        cell.add_piece(PlayerId::new(0));
        assert!(cell.is_overloaded());
    }

    #[test]
    fn test_clear_drops_everything() {
        let mut cell = Cell::new(2);
        cell.add_piece(PlayerId::new(0));
        cell.bump_repeat_placements();

        cell.clear();

        assert!(cell.is_empty());
        assert_eq!(cell.owner(), None);
        assert_eq!(cell.repeat_placements(), 0);
    }

    #[test]
    fn test_repeat_placement_counter() {
        let mut cell = Cell::new(4);

        assert_eq!(cell.bump_repeat_placements(), 1);
        assert_eq!(cell.bump_repeat_placements(), 2);

        cell.reset_repeat_placements();
        assert_eq!(cell.repeat_placements(), 0);
        assert_eq!(cell.bump_repeat_placements(), 1);
    }
}
