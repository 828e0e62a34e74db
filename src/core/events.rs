//! Engine state-change notifications.
//!
//! The engine pushes every discrete state transition to one registered
//! listener, synchronously, on the thread driving the engine. Presentation
//! layers (rendering, animation pacing, dialogs) consume these; no game
//! logic depends on a listener being registered.

use std::cell::RefCell;
use std::rc::Rc;

use serde::{Deserialize, Serialize};

use crate::board::Coord;
use crate::core::player::PlayerId;

/// A discrete engine state transition.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub enum EngineEvent {
    /// Board or turn state changed; consumers should re-read the snapshot.
    StateChanged,

    /// A cell is detonating. Visual hook only; fired before redistribution.
    ExplosionStarted(Coord),

    /// A chain-reaction episode fully drained.
    ExplosionCompleted,

    /// A player transitioned from active to eliminated. Fired exactly once
    /// per player.
    PlayerEliminated(PlayerId),

    /// The game is decided. `None` means a degenerate all-empty board.
    GameOver(Option<PlayerId>),
}

impl std::fmt::Display for EngineEvent {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            EngineEvent::StateChanged => write!(f, "state changed"),
            EngineEvent::ExplosionStarted(at) => write!(f, "explosion started at {}", at),
            EngineEvent::ExplosionCompleted => write!(f, "explosion sequence completed"),
            EngineEvent::PlayerEliminated(id) => write!(f, "{} eliminated", id),
            EngineEvent::GameOver(Some(id)) => write!(f, "game over, {} wins", id),
            EngineEvent::GameOver(None) => write!(f, "game over, no winner"),
        }
    }
}

/// Listener for engine events.
///
/// Invoked synchronously at the emission points; implementations must not
/// call back into the engine from inside `on_event`.
pub trait EventSink {
    fn on_event(&mut self, event: &EngineEvent);
}

/// Adapter turning any `FnMut` over events into a sink.
pub struct SinkFn<F>(pub F);

impl<F: FnMut(&EngineEvent)> EventSink for SinkFn<F> {
    fn on_event(&mut self, event: &EngineEvent) {
        (self.0)(event)
    }
}

/// Recording sink with shared handles, for tests and headless consumers.
///
/// The engine is single-threaded, so handles are `Rc`-shared: register one
/// clone as the listener and keep another to inspect the stream.
#[derive(Clone, Debug, Default)]
pub struct EventLog {
    events: Rc<RefCell<Vec<EngineEvent>>>,
}

impl EventLog {
    /// Create an empty log.
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Snapshot of all recorded events, in emission order.
    #[must_use]
    pub fn events(&self) -> Vec<EngineEvent> {
        self.events.borrow().clone()
    }

    /// Number of recorded events.
    #[must_use]
    pub fn len(&self) -> usize {
        self.events.borrow().len()
    }

    /// True when nothing has been recorded.
    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.events.borrow().is_empty()
    }

    /// Drop all recorded events.
    pub fn clear(&self) {
        self.events.borrow_mut().clear();
    }

    /// Count events matching a predicate.
    pub fn count(&self, pred: impl Fn(&EngineEvent) -> bool) -> usize {
        self.events.borrow().iter().filter(|e| pred(e)).count()
    }
}

impl EventSink for EventLog {
    fn on_event(&mut self, event: &EngineEvent) {
        self.events.borrow_mut().push(*event);
    }
}
