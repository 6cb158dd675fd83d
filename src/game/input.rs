//! Control Events
//!
//! The evaluator's inbound vocabulary. Raw wire messages are parsed into
//! these types at the transport boundary (`network::protocol`), so the game
//! logic only ever dispatches on sum types.

use crate::game::player::PlayerId;

/// A movement direction sent by a controller.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum Direction {
    /// Decreases y
    North,
    /// Increases y
    South,
    /// Increases x
    East,
    /// Decreases x
    West,
}

impl Direction {
    /// Parse a wire symbol. Anything other than `n|s|e|w` yields `None`,
    /// which the evaluator treats as "no movement".
    pub fn from_symbol(symbol: &str) -> Option<Self> {
        match symbol {
            "n" => Some(Direction::North),
            "s" => Some(Direction::South),
            "e" => Some(Direction::East),
            "w" => Some(Direction::West),
            _ => None,
        }
    }
}

/// A session command sent by a controller.
#[derive(Clone, Debug, PartialEq, Eq)]
pub enum Command {
    /// Start a new game: fresh board, empty roster (`n`)
    NewGame,
    /// Remove the sending player, returning its points to the board (`q`)
    Quit,
    /// Unrecognized keyword, kept verbatim so the session can log it
    Other(String),
}

impl Command {
    /// Parse a wire keyword. Unknown keywords are preserved rather than
    /// rejected; the session logs them and proceeds with board evaluation.
    pub fn from_symbol(symbol: &str) -> Self {
        match symbol {
            "n" => Command::NewGame,
            "q" => Command::Quit,
            other => Command::Other(other.to_string()),
        }
    }
}

/// One inbound control event: a player id plus an optional direction or
/// command. An event carrying neither still joins the player.
#[derive(Clone, Debug)]
pub struct ControlEvent {
    /// Originating player, implicitly joined on first sight
    pub id: PlayerId,
    /// Movement, when the event carried a recognized direction symbol
    pub dir: Option<Direction>,
    /// Command, when the event carried one
    pub cmd: Option<Command>,
}

impl ControlEvent {
    /// Directional (possibly empty) event.
    pub fn directional(id: PlayerId, dir: Option<Direction>) -> Self {
        Self { id, dir, cmd: None }
    }

    /// Command event.
    pub fn command(id: PlayerId, cmd: Command) -> Self {
        Self { id, dir: None, cmd: Some(cmd) }
    }
}
