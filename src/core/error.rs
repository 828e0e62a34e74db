//! Move rejection errors.
//!
//! Every invalid `submit_move` is a non-fatal typed rejection; the caller
//! (typically a UI loop) keeps running and may retry with different input.
//! Nothing here represents a corrupted engine: board and player invariants
//! hold by construction.

use thiserror::Error;

use super::player::PlayerId;

/// Reasons a move submission is rejected.
///
/// Rejections never mutate engine state.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Error)]
pub enum MoveError {
    /// The game has already been decided.
    #[error("game is over")]
    GameOver,

    /// Target coordinates are outside the board.
    #[error("coordinates ({row}, {col}) are out of bounds")]
    OutOfBounds { row: usize, col: usize },

    /// A chain reaction is still resolving; input is gated until it drains.
    #[error("a chain reaction is resolving")]
    ChainInProgress,

    /// The submitting player is not the current player.
    #[error("it is not {player}'s turn")]
    NotYourTurn { player: PlayerId },

    /// The target cell belongs to a different player.
    #[error("cell is owned by {owner}")]
    CellOwned { owner: PlayerId },
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_error_display() {
        assert_eq!(MoveError::GameOver.to_string(), "game is over");
        assert_eq!(
            MoveError::OutOfBounds { row: 5, col: 9 }.to_string(),
            "coordinates (5, 9) are out of bounds"
        );
        assert_eq!(
            MoveError::NotYourTurn { player: PlayerId::new(1) }.to_string(),
            "it is not Player 1's turn"
        );
        assert_eq!(
            MoveError::CellOwned { owner: PlayerId::new(2) }.to_string(),
            "cell is owned by Player 2"
        );
    }
}
