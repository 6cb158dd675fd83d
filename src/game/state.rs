//! Game Session
//!
//! A session wraps one board: it registers players on first sight,
//! dispatches session commands, forwards directional events to the board,
//! and ends the game once the board runs out of available points.

use serde::{Deserialize, Serialize};
use tracing::{info, warn};

use crate::game::board::Board;
use crate::game::input::{Command, ControlEvent};
use crate::game::player::{Player, PlayerId};

/// Colors handed to players in registration order, wrapping around when
/// exhausted.
pub const PLAYER_COLORS: [&str; 8] = [
    "#e6194b", "#3cb44b", "#ffe119", "#4363d8",
    "#f58231", "#911eb4", "#46f0f0", "#f032e6",
];

/// Whether a session is still being played.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum GameStatus {
    /// Session is live and accepting play
    Started,
    /// Every point is held and a winner has been selected
    Ended,
}

/// A single game session: one board, a status, and the winner once the
/// game has ended.
///
/// The board owns the only player roster; session-level lookups delegate
/// to it, so roster and board can never drift apart.
#[derive(Clone, Debug)]
pub struct Game {
    /// The game board
    pub board: Board,
    /// Current session status
    pub status: GameStatus,
    /// The winning player, captured when the game ends
    pub winner: Option<Player>,
    // Registrations this session; drives round-robin color assignment.
    registered: usize,
}

impl Default for Game {
    fn default() -> Self {
        Self::new()
    }
}

impl Game {
    /// Start a session with a fresh board, an empty roster, and the
    /// status set to started.
    pub fn new() -> Self {
        Self {
            board: Board::new(),
            status: GameStatus::Started,
            winner: None,
            registered: 0,
        }
    }

    /// Reset for a new play session: fresh board, empty roster, status
    /// back to started, winner cleared.
    pub fn reset(&mut self) {
        self.board = Board::new();
        self.status = GameStatus::Started;
        self.winner = None;
        self.registered = 0;
        info!("Reset new game");
    }

    /// Register a player at the board origin with the next palette color.
    pub fn register_player(&mut self, id: PlayerId) {
        let color = PLAYER_COLORS[self.registered % PLAYER_COLORS.len()];
        self.registered += 1;
        info!("Registered player: {} ({})", id, color);
        self.board.add_player(Player::new(id, color));
    }

    /// Remove a player, returning its held points to the board. Removing
    /// an id that is not registered is a no-op.
    pub fn unregister_player(&mut self, id: &PlayerId) {
        if self.board.player(id).is_none() {
            return;
        }
        self.board.release_player_points(id);
        self.board.remove_player(id);
        info!("Unregistered player: {}", id);
    }

    /// Evaluate one inbound control event to completion: implicit join,
    /// command dispatch, board evaluation, then the end-of-game check.
    pub fn evaluate(&mut self, event: &ControlEvent) {
        // Register new players on first sight
        if self.board.player(&event.id).is_none() {
            self.register_player(event.id.clone());
        }

        // Evaluate any sent command
        if let Some(cmd) = &event.cmd {
            match cmd {
                Command::NewGame => {
                    self.reset();
                    return; // skip board evaluation
                }
                Command::Quit => {
                    self.unregister_player(&event.id);
                    return; // skip board evaluation
                }
                Command::Other(keyword) => {
                    warn!(
                        "Received unknown command '{}' from player: {}",
                        keyword, event.id
                    );
                }
            }
        }

        // Evaluate the current state of the board
        self.board.evaluate(event);

        // When all points are off the board the game is over
        if self.board.is_empty() {
            self.winner = self.select_winner();
            self.status = GameStatus::Ended;
            match &self.winner {
                Some(winner) => {
                    info!("Game ended. Winner: {} (score {})", winner.id, winner.score());
                }
                None => info!("Game ended with an empty roster"),
            }
        }
    }

    /// The player with the strictly-highest score; equal scores are broken
    /// by the lowest player id, so selection never depends on roster order.
    fn select_winner(&self) -> Option<Player> {
        self.board
            .players
            .iter()
            .max_by(|a, b| a.score().cmp(&b.score()).then_with(|| b.id.cmp(&a.id)))
            .cloned()
    }
}
