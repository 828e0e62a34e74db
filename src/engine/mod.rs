//! The simulation engine: move intake, chain-reaction resolution, turn
//! rotation, elimination, and win detection.
//!
//! ## Concurrency model
//!
//! One engine instance per game session, driven from a single logical
//! thread. Move intake and chain resolution are mutually exclusive via the
//! resolving flag; every explosion step is an atomic synchronous state
//! transition. There is no cancellation mid-chain.
//!
//! ## Drainage styles
//!
//! By default `submit_move` runs a triggered chain to completion before
//! returning. A presentation layer that animates one detonation at a time
//! enables stepped resolution and calls [`Engine::resolve_next_explosion_step`]
//! at its own pace; the engine's contract is the step sequence, never the
//! timing.

use std::collections::VecDeque;

use serde::{Deserialize, Serialize};
use tracing::{debug, info, trace};

use crate::board::{Board, Coord};
use crate::core::{
    EngineEvent, EventSink, MoveError, Player, PlayerId, DEFAULT_COLORS, MAX_PLAYERS, MIN_PLAYERS,
};

/// One pending detonation: the cell to detonate and the player whose pieces
/// redistribute. Owner is captured at enqueue time. Transient; lives only
/// inside a single chain-reaction episode.
#[derive(Clone, Copy, Debug)]
struct ExplosionEvent {
    at: Coord,
    owner: PlayerId,
}

/// Serializable copy of the full observable state, for pull-style consumers.
#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
pub struct GameSnapshot {
    pub board: Board,
    pub players: Vec<Player>,
    pub current_player: PlayerId,
    pub game_over: bool,
    pub resolving_chain: bool,
    pub winner: Option<PlayerId>,
}

/// Builder for a game session.
///
/// ## Example
///
/// ```
/// use chain_reaction::{GameSetup, PlayerId};
///
/// let engine = GameSetup::new(6, 4)
///     .player_count(3)
///     .player_names(["Ana", "Ben"])
///     .build();
///
/// assert_eq!(engine.current_player(), PlayerId::new(0));
/// assert_eq!(engine.players()[2].name, "Player 3");
/// ```
pub struct GameSetup {
    rows: usize,
    cols: usize,
    player_count: usize,
    names: Vec<String>,
}

impl GameSetup {
    /// Start configuring a game on a `rows x cols` board.
    #[must_use]
    pub fn new(rows: usize, cols: usize) -> Self {
        Self {
            rows,
            cols,
            player_count: MIN_PLAYERS,
            names: Vec::new(),
        }
    }

    /// Set the number of seats (2-4).
    #[must_use]
    pub fn player_count(mut self, count: usize) -> Self {
        assert!(
            (MIN_PLAYERS..=MAX_PLAYERS).contains(&count),
            "Player count must be {MIN_PLAYERS}-{MAX_PLAYERS}"
        );
        self.player_count = count;
        self
    }

    /// Set display names in seat order. Seats without a name default to
    /// `Player <n>`.
    #[must_use]
    pub fn player_names<I, S>(mut self, names: I) -> Self
    where
        I: IntoIterator<Item = S>,
        S: Into<String>,
    {
        self.names = names.into_iter().map(Into::into).collect();
        self
    }

    /// Build the engine with an empty board and all players active.
    #[must_use]
    pub fn build(self) -> Engine {
        let players = PlayerId::all(self.player_count)
            .map(|id| {
                let name = self
                    .names
                    .get(id.index())
                    .cloned()
                    .unwrap_or_else(|| Player::default_name(id));
                Player::new(id, name, DEFAULT_COLORS[id.index()])
            })
            .collect();

        Engine {
            board: Board::new(self.rows, self.cols),
            players,
            current_player: 0,
            game_over: false,
            winner: None,
            resolving: false,
            stepped: false,
            queue: VecDeque::new(),
            sink: None,
        }
    }
}

/// The chain-reaction game engine.
///
/// Owns the board and players exclusively; external collaborators observe
/// through the query surface and the registered [`EventSink`].
pub struct Engine {
    board: Board,
    players: Vec<Player>,
    current_player: usize,
    game_over: bool,
    winner: Option<PlayerId>,
    resolving: bool,
    stepped: bool,
    queue: VecDeque<ExplosionEvent>,
    sink: Option<Box<dyn EventSink>>,
}

impl Engine {
    /// Create a session with default names, resolving chains synchronously.
    #[must_use]
    pub fn new(rows: usize, cols: usize, player_count: usize) -> Self {
        GameSetup::new(rows, cols).player_count(player_count).build()
    }

    /// Register the single event listener, replacing any previous one.
    pub fn set_listener(&mut self, sink: impl EventSink + 'static) {
        self.sink = Some(Box::new(sink));
    }

    /// When enabled, a triggered chain stays pending and the caller drives
    /// it one detonation at a time; when disabled (the default),
    /// `submit_move` drains the episode before returning.
    pub fn set_stepped_resolution(&mut self, stepped: bool) {
        self.stepped = stepped;
    }

    // === Query surface ===

    /// The board, with per-cell owner, piece count, and capacity.
    #[must_use]
    pub fn board(&self) -> &Board {
        &self.board
    }

    /// All players in seat order.
    #[must_use]
    pub fn players(&self) -> &[Player] {
        &self.players
    }

    /// A player by ID.
    #[must_use]
    pub fn player(&self, id: PlayerId) -> Option<&Player> {
        self.players.get(id.index())
    }

    /// The player whose turn it is.
    #[must_use]
    pub fn current_player(&self) -> PlayerId {
        PlayerId::new(self.current_player as u8)
    }

    /// True once the game is decided. Never reverts.
    #[must_use]
    pub fn is_game_over(&self) -> bool {
        self.game_over
    }

    /// The winner, once the game is over. `None` while the game is ongoing
    /// or when a degenerate all-empty board produced no winner.
    #[must_use]
    pub fn winner(&self) -> Option<PlayerId> {
        self.winner
    }

    /// True strictly while a chain-reaction episode is pending or draining.
    #[must_use]
    pub fn is_resolving_chain(&self) -> bool {
        self.resolving
    }

    /// Owned serializable copy of the observable state.
    #[must_use]
    pub fn snapshot(&self) -> GameSnapshot {
        GameSnapshot {
            board: self.board.clone(),
            players: self.players.clone(),
            current_player: self.current_player(),
            game_over: self.game_over,
            resolving_chain: self.resolving,
            winner: self.winner,
        }
    }

    // === Command surface ===

    /// Submit a move: `player` places pieces at `(row, col)`.
    ///
    /// Rejections leave the engine untouched. An accepted move on a cell
    /// the mover already owns places one piece per consecutive placement on
    /// that cell (first placement 1, the next 2, and so on) in a single
    /// batch; overload is checked once, after the whole batch.
    ///
    /// When the batch overloads the cell, a chain-reaction episode begins
    /// and the turn does not pass until it drains.
    pub fn submit_move(&mut self, row: usize, col: usize, player: PlayerId) -> Result<(), MoveError> {
        if self.game_over {
            return Err(MoveError::GameOver);
        }
        let at = Coord::new(row, col);
        if !self.board.in_bounds(at) {
            return Err(MoveError::OutOfBounds { row, col });
        }
        if self.resolving {
            return Err(MoveError::ChainInProgress);
        }
        if player != self.current_player() {
            return Err(MoveError::NotYourTurn { player });
        }
        if let Some(owner) = self.board.cell(at).owner() {
            if owner != player {
                return Err(MoveError::CellOwned { owner });
            }
        }

        let pieces_added = {
            let cell = self.board.cell_mut(at);
            // Owner changed since the last placement here (or the cell was
            // empty): the consecutive-tap streak starts over.
            if cell.owner() != Some(player) {
                cell.reset_repeat_placements();
            }
            let batch = cell.bump_repeat_placements();
            for _ in 0..batch {
                cell.add_piece(player);
            }
            batch
        };
        self.players[player.index()].total_pieces += pieces_added;

        debug!(%player, row, col, pieces_added, "move accepted");
        self.emit(EngineEvent::StateChanged);

        if self.board.cell(at).is_overloaded() {
            self.begin_chain(at, player);
            if !self.stepped {
                self.resolve_chain();
            }
        } else {
            self.advance_turn();
            self.emit(EngineEvent::StateChanged);
        }

        Ok(())
    }

    /// Drain the pending chain-reaction episode to completion.
    ///
    /// No-op when nothing is resolving.
    pub fn resolve_chain(&mut self) {
        while self.resolve_next_explosion_step() {}
    }

    /// Process exactly one detonation of the pending episode.
    ///
    /// Returns true while more detonations remain. The episode's closing
    /// work (elimination, win evaluation, turn advancement) runs inside the
    /// call that processes the final detonation.
    pub fn resolve_next_explosion_step(&mut self) -> bool {
        if !self.resolving {
            return false;
        }
        let Some(event) = self.queue.pop_front() else {
            self.finish_episode();
            return false;
        };

        trace!(at = %event.at, owner = %event.owner, "detonating");
        self.emit(EngineEvent::ExplosionStarted(event.at));

        self.board.cell_mut(event.at).clear();

        // Redistribution captures each neighbor for the detonating player:
        // the neighbor is emptied, then receives exactly one piece.
        for neighbor in self.board.neighbors(event.at) {
            let cell = self.board.cell_mut(neighbor);
            cell.clear();
            cell.add_piece(event.owner);
            if cell.is_overloaded() {
                self.queue.push_back(ExplosionEvent {
                    at: neighbor,
                    owner: event.owner,
                });
            }
        }

        self.emit(EngineEvent::StateChanged);

        if self.queue.is_empty() {
            self.finish_episode();
            false
        } else {
            true
        }
    }

    // === Episode internals ===

    fn begin_chain(&mut self, at: Coord, owner: PlayerId) {
        self.resolving = true;
        self.queue.clear();
        self.queue.push_back(ExplosionEvent { at, owner });
    }

    fn finish_episode(&mut self) {
        self.resolving = false;
        self.evaluate_round();
        if !self.game_over {
            self.advance_turn();
            self.emit(EngineEvent::StateChanged);
        }
        self.emit(EngineEvent::ExplosionCompleted);
    }

    /// Elimination and win evaluation. Runs only on a settled board, once
    /// per drained episode.
    fn evaluate_round(&mut self) {
        let mut active_players = 0;
        let mut last_holder = None;

        for idx in 0..self.players.len() {
            let id = self.players[idx].id;
            let pieces = self.board.pieces_owned_by(id);
            self.players[idx].total_pieces = pieces;

            if pieces > 0 {
                active_players += 1;
                last_holder = Some(id);
            } else if self.players[idx].active {
                self.players[idx].active = false;
                info!(player = %id, "player eliminated");
                self.emit(EngineEvent::PlayerEliminated(id));
            }
        }

        if active_players <= 1 {
            self.game_over = true;
            self.winner = if active_players == 1 { last_holder } else { None };
            info!(winner = ?self.winner, "game over");
            self.emit(EngineEvent::GameOver(self.winner));
        }
    }

    /// Cyclic seat-order scan to the next active player. The full-lap guard
    /// only trips when no player is active, which coincides with game over.
    fn advance_turn(&mut self) {
        let original = self.current_player;
        loop {
            self.current_player = (self.current_player + 1) % self.players.len();
            if self.current_player == original || self.players[self.current_player].active {
                break;
            }
        }
    }

    fn emit(&mut self, event: EngineEvent) {
        trace!(%event, "emit");
        if let Some(sink) = self.sink.as_mut() {
            sink.on_event(&event);
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_setup_defaults() {
        let engine = Engine::new(3, 3, 2);

        assert_eq!(engine.players().len(), 2);
        assert_eq!(engine.players()[0].name, "Player 1");
        assert_eq!(engine.players()[1].name, "Player 2");
        assert_eq!(engine.current_player(), PlayerId::new(0));
        assert!(!engine.is_game_over());
        assert!(!engine.is_resolving_chain());
        assert_eq!(engine.winner(), None);
    }

    #[test]
    fn test_setup_names_pad_with_defaults() {
        let engine = GameSetup::new(4, 4)
            .player_count(3)
            .player_names(["Ana"])
            .build();

        assert_eq!(engine.players()[0].name, "Ana");
        assert_eq!(engine.players()[1].name, "Player 2");
        assert_eq!(engine.players()[2].name, "Player 3");
        assert_eq!(engine.players()[2].color, DEFAULT_COLORS[2]);
    }

    #[test]
    #[should_panic(expected = "Player count must be 2-4")]
    fn test_setup_rejects_player_count() {
        let _ = GameSetup::new(3, 3).player_count(5);
    }

    #[test]
    fn test_reject_out_of_bounds() {
        let mut engine = Engine::new(3, 3, 2);

        assert_eq!(
            engine.submit_move(3, 0, PlayerId::new(0)),
            Err(MoveError::OutOfBounds { row: 3, col: 0 })
        );
        assert_eq!(engine.board().total_pieces(), 0);
    }

    #[test]
    fn test_reject_out_of_turn() {
        let mut engine = Engine::new(3, 3, 2);

        assert_eq!(
            engine.submit_move(0, 0, PlayerId::new(1)),
            Err(MoveError::NotYourTurn { player: PlayerId::new(1) })
        );
        // Unknown seat is out of turn too.
        assert_eq!(
            engine.submit_move(0, 0, PlayerId::new(7)),
            Err(MoveError::NotYourTurn { player: PlayerId::new(7) })
        );
    }

    #[test]
    fn test_reject_opponent_cell_without_mutation() {
        let mut engine = Engine::new(3, 3, 2);
        engine.submit_move(1, 1, PlayerId::new(0)).unwrap();

        let before = engine.snapshot();
        assert_eq!(
            engine.submit_move(1, 1, PlayerId::new(1)),
            Err(MoveError::CellOwned { owner: PlayerId::new(0) })
        );
        assert_eq!(engine.snapshot(), before);
    }

    #[test]
    fn test_placement_passes_turn() {
        let mut engine = Engine::new(3, 3, 3);

        engine.submit_move(0, 0, PlayerId::new(0)).unwrap();
        assert_eq!(engine.current_player(), PlayerId::new(1));

        engine.submit_move(2, 2, PlayerId::new(1)).unwrap();
        assert_eq!(engine.current_player(), PlayerId::new(2));

        engine.submit_move(0, 2, PlayerId::new(2)).unwrap();
        assert_eq!(engine.current_player(), PlayerId::new(0));
    }

    #[test]
    fn test_repeat_placement_batches() {
        let mut engine = Engine::new(5, 5, 2);
        let center = Coord::new(2, 2);

        // First placement on a fresh cell adds one piece.
        engine.submit_move(2, 2, PlayerId::new(0)).unwrap();
        assert_eq!(engine.board().cell(center).pieces(), 1);
        engine.submit_move(4, 4, PlayerId::new(1)).unwrap();

        // Second consecutive placement on the still-owned cell adds two.
        engine.submit_move(2, 2, PlayerId::new(0)).unwrap();
        assert_eq!(engine.board().cell(center).pieces(), 3);
        assert_eq!(engine.board().cell(center).repeat_placements(), 2);
        assert_eq!(engine.players()[0].total_pieces, 3);
    }

    #[test]
    fn test_reject_while_resolving() {
        let mut engine = Engine::new(3, 3, 2);
        engine.set_stepped_resolution(true);

        engine.submit_move(0, 0, PlayerId::new(0)).unwrap();
        engine.submit_move(2, 2, PlayerId::new(1)).unwrap();
        // Second tap on the corner batches to 3 >= capacity 2.
        engine.submit_move(0, 0, PlayerId::new(0)).unwrap();

        assert!(engine.is_resolving_chain());
        assert_eq!(
            engine.submit_move(1, 1, PlayerId::new(0)),
            Err(MoveError::ChainInProgress)
        );

        engine.resolve_chain();
        assert!(!engine.is_resolving_chain());
    }

    #[test]
    fn test_step_when_idle_is_noop() {
        let mut engine = Engine::new(3, 3, 2);
        assert!(!engine.resolve_next_explosion_step());
        engine.resolve_chain();
        assert_eq!(engine.board().total_pieces(), 0);
    }

    #[test]
    fn test_snapshot_round_trip() {
        let mut engine = Engine::new(3, 3, 2);
        engine.submit_move(1, 1, PlayerId::new(0)).unwrap();

        let snapshot = engine.snapshot();
        let json = serde_json::to_string(&snapshot).unwrap();
        let back: GameSnapshot = serde_json::from_str(&json).unwrap();
        assert_eq!(snapshot, back);
    }
}
