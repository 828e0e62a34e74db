//! # chain-reaction
//!
//! A turn-based chain reaction simulation engine for 2-4 players on a
//! rectangular grid.
//!
//! Each cell's capacity equals its in-bounds orthogonal neighbor count; a
//! cell reaching capacity detonates, capturing its neighbors for the
//! detonating player and potentially cascading. The last player holding
//! pieces wins.
//!
//! ## Design Principles
//!
//! 1. **Engine only**: no rendering, input mapping, or pacing. External
//!    collaborators consume the event stream and board snapshot.
//!
//! 2. **Single-threaded sessions**: one engine instance per game, driven
//!    from one logical thread. Move intake is gated while a chain resolves.
//!
//! 3. **Deterministic propagation**: detonations drain strictly FIFO, so a
//!    given move sequence always produces the same board.
//!
//! ## Modules
//!
//! - `core`: player identity, rejection errors, event surface
//! - `board`: grid arena, cells, capacities
//! - `engine`: move intake, chain resolution, elimination, win detection
//!
//! ## Example
//!
//! ```
//! use chain_reaction::{Engine, PlayerId};
//!
//! let mut engine = Engine::new(3, 3, 2);
//! engine.submit_move(0, 0, PlayerId::new(0)).unwrap();
//!
//! assert_eq!(engine.board().cell(chain_reaction::Coord::new(0, 0)).pieces(), 1);
//! assert_eq!(engine.current_player(), PlayerId::new(1));
//! ```

pub mod board;
pub mod core;
pub mod engine;

// Re-export commonly used types
pub use crate::core::{
    EngineEvent, EventLog, EventSink, MoveError, Player, PlayerId, SinkFn, DEFAULT_COLORS,
    MAX_PLAYERS, MIN_PLAYERS,
};

pub use crate::board::{Board, Cell, Coord, Neighbors};

pub use crate::engine::{Engine, GameSetup, GameSnapshot};
