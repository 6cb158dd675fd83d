//! Network Layer
//!
//! WebSocket endpoints for phone controllers and view clients. This layer
//! is **non-deterministic** - all game logic runs through `game/`,
//! serialized onto a single evaluator task.

pub mod protocol;
pub mod server;

pub use protocol::{
    BoardSnapshot, ControlMessage, GameSnapshot, PlayerSnapshot, PointSnapshot,
};
pub use server::{GameServer, GameServerError, ServerConfig};
