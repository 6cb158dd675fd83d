//! Protocol Messages
//!
//! Wire format for controller and view communication over WebSocket.
//! All messages are serialized as JSON.
//!
//! Inbound (controller -> server):
//!
//! ```json
//! { "id": "...", "dir": "n|s|e|w", "cmd": "n|q" }
//! ```
//!
//! Outbound (server -> view), pushed after every processed event: the full
//! game snapshot with status, winner, and board contents.

use serde::{Deserialize, Serialize};

use crate::game::board::Board;
use crate::game::input::{Command, ControlEvent, Direction};
use crate::game::player::{Player, PlayerId};
use crate::game::point::Point;
use crate::game::state::{Game, GameStatus};

// =============================================================================
// CONTROLLER -> SERVER MESSAGES
// =============================================================================

/// Inbound control message from a phone controller.
///
/// `dir` carries one of `n|s|e|w`, `cmd` one of `n` (new game) or `q`
/// (quit). A message is expected to carry at most one of the two; one with
/// neither still joins the player.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ControlMessage {
    /// Player id, required
    pub id: String,
    /// Direction symbol
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub dir: Option<String>,
    /// Command keyword
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub cmd: Option<String>,
}

impl ControlMessage {
    /// Parse the raw symbols into the evaluator's event type. Unknown
    /// direction symbols degrade to "no movement"; unknown command
    /// keywords are preserved for the evaluator to log.
    pub fn into_event(self) -> ControlEvent {
        ControlEvent {
            id: PlayerId::new(self.id),
            dir: self.dir.as_deref().and_then(Direction::from_symbol),
            cmd: self.cmd.as_deref().map(Command::from_symbol),
        }
    }

    /// Serialize to JSON string.
    pub fn to_json(&self) -> Result<String, serde_json::Error> {
        serde_json::to_string(self)
    }

    /// Deserialize from JSON string.
    pub fn from_json(s: &str) -> Result<Self, serde_json::Error> {
        serde_json::from_str(s)
    }
}

// =============================================================================
// SERVER -> VIEW MESSAGES
// =============================================================================

/// Snapshot of one point.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct PointSnapshot {
    /// Value credited to a holder
    pub value: u32,
    /// Logical grid column
    pub column: i32,
    /// Logical grid row
    pub row: i32,
    /// Pixel x position
    pub x: i32,
    /// Pixel y position
    pub y: i32,
}

impl From<&Point> for PointSnapshot {
    fn from(point: &Point) -> Self {
        Self {
            value: point.value,
            column: point.column,
            row: point.row,
            x: point.x,
            y: point.y,
        }
    }
}

/// Snapshot of one player: position, status flags, held points, and the
/// computed score.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct PlayerSnapshot {
    /// Player id
    pub id: String,
    /// Display color
    pub color: String,
    /// Pixel x position
    pub x: i32,
    /// Pixel y position
    pub y: i32,
    /// Player touched a board edge this pass
    pub at_edge: bool,
    /// Player collided with another player this pass
    pub hit: bool,
    /// Player picked up a point this pass
    pub awarded_point: bool,
    /// Held points
    pub points: Vec<PointSnapshot>,
    /// Sum of held point values
    pub score: u32,
}

impl From<&Player> for PlayerSnapshot {
    fn from(player: &Player) -> Self {
        Self {
            id: player.id.as_str().to_string(),
            color: player.color.clone(),
            x: player.x,
            y: player.y,
            at_edge: player.at_edge,
            hit: player.hit,
            awarded_point: player.awarded_point,
            points: player.points.iter().map(PointSnapshot::from).collect(),
            score: player.score(),
        }
    }
}

/// Snapshot of the board: available points plus the full roster.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct BoardSnapshot {
    /// Points still available on the board
    pub points: Vec<PointSnapshot>,
    /// Registered players, in registration order
    pub players: Vec<PlayerSnapshot>,
}

impl From<&Board> for BoardSnapshot {
    fn from(board: &Board) -> Self {
        Self {
            points: board.points.iter().map(PointSnapshot::from).collect(),
            players: board.players.iter().map(PlayerSnapshot::from).collect(),
        }
    }
}

/// Full game state pushed to every view client after each processed
/// event.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct GameSnapshot {
    /// `started` or `ended`
    pub status: GameStatus,
    /// The winning player, once the game has ended
    pub winner: Option<PlayerSnapshot>,
    /// Board contents
    pub board: BoardSnapshot,
}

impl From<&Game> for GameSnapshot {
    fn from(game: &Game) -> Self {
        Self {
            status: game.status,
            winner: game.winner.as_ref().map(PlayerSnapshot::from),
            board: BoardSnapshot::from(&game.board),
        }
    }
}

impl GameSnapshot {
    /// Serialize to JSON string.
    pub fn to_json(&self) -> Result<String, serde_json::Error> {
        serde_json::to_string(self)
    }

    /// Deserialize from JSON string.
    pub fn from_json(s: &str) -> Result<Self, serde_json::Error> {
        serde_json::from_str(s)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn control_message_json_roundtrip() {
        let msg = ControlMessage {
            id: "phone-1".to_string(),
            dir: Some("s".to_string()),
            cmd: None,
        };

        let json = msg.to_json().unwrap();
        let parsed = ControlMessage::from_json(&json).unwrap();

        assert_eq!(parsed.id, "phone-1");
        assert_eq!(parsed.dir.as_deref(), Some("s"));
        assert_eq!(parsed.cmd, None);
    }

    #[test]
    fn directions_and_commands_are_optional() {
        let parsed = ControlMessage::from_json(r#"{"id":"a"}"#).unwrap();
        assert_eq!(parsed.dir, None);
        assert_eq!(parsed.cmd, None);

        let event = parsed.into_event();
        assert_eq!(event.dir, None);
        assert!(event.cmd.is_none());
    }

    #[test]
    fn message_without_id_is_rejected() {
        assert!(ControlMessage::from_json(r#"{"dir":"n"}"#).is_err());
    }

    #[test]
    fn unknown_symbols_degrade_gracefully() {
        let parsed = ControlMessage::from_json(r#"{"id":"a","dir":"up"}"#).unwrap();
        assert_eq!(parsed.into_event().dir, None);

        let parsed = ControlMessage::from_json(r#"{"id":"a","cmd":"boom"}"#).unwrap();
        assert_eq!(
            parsed.into_event().cmd,
            Some(Command::Other("boom".to_string()))
        );
    }

    #[test]
    fn known_symbols_parse_into_the_event() {
        let parsed = ControlMessage::from_json(r#"{"id":"a","dir":"w"}"#).unwrap();
        assert_eq!(parsed.into_event().dir, Some(Direction::West));

        let parsed = ControlMessage::from_json(r#"{"id":"a","cmd":"q"}"#).unwrap();
        assert_eq!(parsed.into_event().cmd, Some(Command::Quit));
    }

    #[test]
    fn snapshot_matches_the_wire_shape() {
        let mut game = Game::new();
        game.evaluate(&ControlEvent::directional(PlayerId::from("a"), None));

        let json = GameSnapshot::from(&game).to_json().unwrap();
        let value: serde_json::Value = serde_json::from_str(&json).unwrap();

        assert_eq!(value["status"], "started");
        assert!(value["winner"].is_null());
        assert_eq!(value["board"]["points"].as_array().unwrap().len(), 9);

        let player = &value["board"]["players"][0];
        assert_eq!(player["id"], "a");
        assert_eq!(player["x"], 0);
        assert_eq!(player["y"], 0);
        assert_eq!(player["at_edge"], true);
        assert_eq!(player["hit"], false);
        assert_eq!(player["awarded_point"], false);
        assert_eq!(player["score"], 0);
        assert!(player["points"].as_array().unwrap().is_empty());

        let point = &value["board"]["points"][0];
        assert_eq!(point["value"], 1);
        assert_eq!(point["column"], 0);
        assert_eq!(point["row"], 0);
        assert_eq!(point["x"], 110);
        assert_eq!(point["y"], 75);
    }

    #[test]
    fn ended_game_serializes_its_winner() {
        let mut game = Game::new();
        game.evaluate(&ControlEvent::directional(PlayerId::from("a"), None));
        game.status = GameStatus::Ended;
        game.winner = Some(game.board.players[0].clone());

        let json = GameSnapshot::from(&game).to_json().unwrap();
        let value: serde_json::Value = serde_json::from_str(&json).unwrap();

        assert_eq!(value["status"], "ended");
        assert_eq!(value["winner"]["id"], "a");
    }
}
