//! Core engine types: player identity, rejection errors, event surface.

pub mod error;
pub mod events;
pub mod player;

pub use error::MoveError;
pub use events::{EngineEvent, EventLog, EventSink, SinkFn};
pub use player::{Player, PlayerId, DEFAULT_COLORS, MAX_PLAYERS, MIN_PLAYERS};
