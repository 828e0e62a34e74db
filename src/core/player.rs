//! Player identity and per-session player state.
//!
//! ## PlayerId
//!
//! Type-safe 0-based player identifier, stable for the session's lifetime.
//! Seat order is identifier order: player 0 moves first.
//!
//! ## Player
//!
//! Mutable per-player state: display name and color, the active flag
//! (true until elimination, never reset), and a cached board-wide piece
//! tally so elimination checks are O(players) instead of O(cells).

use serde::{Deserialize, Serialize};

/// Minimum number of seats per game.
pub const MIN_PLAYERS: usize = 2;
/// Maximum number of seats; also the length of [`DEFAULT_COLORS`].
pub const MAX_PLAYERS: usize = 4;

/// Default seat colors in ARGB, red/green/blue/orange in seat order.
///
/// Opaque to the engine; carried for display consumers only.
pub const DEFAULT_COLORS: [u32; MAX_PLAYERS] = [0xFFFF_0000, 0xFF00_FF00, 0xFF00_00FF, 0xFFFF_A500];

/// Player identifier, 0-based in seat order.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct PlayerId(pub u8);

impl PlayerId {
    /// Create a new player ID.
    #[must_use]
    pub const fn new(id: u8) -> Self {
        Self(id)
    }

    /// Get the raw seat index (0-based).
    #[must_use]
    pub const fn index(self) -> usize {
        self.0 as usize
    }

    /// Iterate over all player IDs for a game with `player_count` seats.
    pub fn all(player_count: usize) -> impl Iterator<Item = PlayerId> {
        (0..player_count as u8).map(PlayerId)
    }
}

impl std::fmt::Display for PlayerId {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "Player {}", self.0)
    }
}

/// Per-player session state.
///
/// Constructed once at game start and mutated in place for the session.
/// `total_pieces` is derivable from the board; it is refreshed wholesale
/// during elimination evaluation and bumped optimistically at placement.
#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub struct Player {
    /// Stable seat identifier.
    pub id: PlayerId,

    /// Display name; defaults to `Player <n>` (1-based for display).
    pub name: String,

    /// Display color in ARGB; opaque to the engine.
    pub color: u32,

    /// True until the player is eliminated. Monotonic.
    pub active: bool,

    /// Cached count of pieces in cells this player owns.
    pub total_pieces: u32,
}

impl Player {
    /// Create an active player with zero pieces.
    #[must_use]
    pub fn new(id: PlayerId, name: impl Into<String>, color: u32) -> Self {
        Self {
            id,
            name: name.into(),
            color,
            active: true,
            total_pieces: 0,
        }
    }

    /// Default display name for a seat (1-based numbering).
    #[must_use]
    pub fn default_name(id: PlayerId) -> String {
        format!("Player {}", id.index() + 1)
    }
}
