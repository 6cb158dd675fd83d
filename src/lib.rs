//! # Point Rush Game Server
//!
//! Authoritative game state for Point Rush, a phone-controlled arcade game:
//! phone controllers send directional events over a control WebSocket, the
//! server evaluates them against a shared board, and every resulting state
//! snapshot is pushed to passive view clients.
//!
//! ## Architecture
//!
//! ```text
//! ┌─────────────────────────────────────────────────────────────┐
//! │                    POINT RUSH SERVER                         │
//! ├─────────────────────────────────────────────────────────────┤
//! │  game/           - Game logic (deterministic)                │
//! │  ├── input.rs    - Control events, directions, commands      │
//! │  ├── point.rs    - Collectible points on the fixed 3x3 grid  │
//! │  ├── player.rs   - Player movement, held points, score       │
//! │  ├── board.rs    - Spatial queries and board evaluation      │
//! │  └── state.rs    - Game session, commands, win detection     │
//! │                                                              │
//! │  network/        - Networking (non-deterministic)            │
//! │  ├── protocol.rs - Wire messages and state snapshots         │
//! │  └── server.rs   - Control/view WebSocket endpoints          │
//! └─────────────────────────────────────────────────────────────┘
//! ```
//!
//! ## Evaluation Guarantee
//!
//! The `game/` module is **100% deterministic**:
//! - Integer geometry only, no floating point
//! - Fixed iteration order (roster order for players, scan order for points)
//! - Each inbound event is evaluated to completion before the next
//!
//! The network layer funnels every inbound control event onto a single
//! evaluator task, so the game state is never mutated concurrently.

#![warn(missing_docs)]
#![warn(clippy::all)]
#![deny(unsafe_code)]

pub mod game;
pub mod network;

// Re-export commonly used types
pub use game::board::{Board, BOARD_HEIGHT, BOARD_WIDTH};
pub use game::input::{Command, ControlEvent, Direction};
pub use game::player::{Player, PlayerId};
pub use game::point::Point;
pub use game::state::{Game, GameStatus};

/// Crate version
pub const VERSION: &str = env!("CARGO_PKG_VERSION");
