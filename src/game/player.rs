//! Players
//!
//! A player is a controllable 50x50 box with a pixel position, an ordered
//! set of held points, and three status flags recomputed on every
//! evaluation pass.

use std::fmt;

use serde::{Deserialize, Serialize};

use crate::game::input::Direction;
use crate::game::point::Point;

/// Unit width of a player's bounding box
pub const PLAYER_WIDTH: i32 = 50;

/// Unit height of a player's bounding box
pub const PLAYER_HEIGHT: i32 = 50;

/// Increment a player moves by per directional event (player width / 2.5)
pub const MOVE_INCREMENT: i32 = 20;

/// Unique player identifier, supplied by the controller and stable for the
/// session.
///
/// Implements `Ord` so winner tie-breaks are deterministic.
#[derive(Clone, Debug, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
#[serde(transparent)]
pub struct PlayerId(String);

impl PlayerId {
    /// Create from any string-ish id.
    pub fn new(id: impl Into<String>) -> Self {
        Self(id.into())
    }

    /// View as a string slice.
    pub fn as_str(&self) -> &str {
        &self.0
    }
}

impl fmt::Display for PlayerId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.0)
    }
}

impl From<&str> for PlayerId {
    fn from(id: &str) -> Self {
        Self(id.to_string())
    }
}

/// State of a single player on the board.
#[derive(Clone, Debug, Serialize, Deserialize)]
pub struct Player {
    /// Unique player id
    pub id: PlayerId,
    /// Display color assigned at registration
    pub color: String,
    /// Pixel x position, top-left origin
    pub x: i32,
    /// Pixel y position, top-left origin
    pub y: i32,
    /// Player touches a board edge (recomputed every pass)
    pub at_edge: bool,
    /// Player collided with another player (recomputed every pass)
    pub hit: bool,
    /// Player picked up a point (recomputed every pass)
    pub awarded_point: bool,
    /// Points currently held, in pickup order
    pub points: Vec<Point>,
}

impl Player {
    /// Create a player at the board origin holding no points.
    pub fn new(id: PlayerId, color: impl Into<String>) -> Self {
        Self {
            id,
            color: color.into(),
            x: 0,
            y: 0,
            at_edge: false,
            hit: false,
            awarded_point: false,
            points: Vec::new(),
        }
    }

    /// Move one increment in the given direction. Board bounds are
    /// enforced by the board's clamp, not here.
    pub fn step(&mut self, direction: Direction) {
        match direction {
            Direction::North => self.y -= MOVE_INCREMENT,
            Direction::South => self.y += MOVE_INCREMENT,
            Direction::East => self.x += MOVE_INCREMENT,
            Direction::West => self.x -= MOVE_INCREMENT,
        }
    }

    /// Record a collision with another player: sets the hit flag and
    /// releases all held points to the caller, which is responsible for
    /// returning them to the board's available set.
    pub fn hit(&mut self) -> Vec<Point> {
        self.hit = true;
        self.reset_points()
    }

    /// Release all held points without flagging a hit; used for edge and
    /// quit resets. The caller reinserts the returned points into the
    /// board's available set.
    pub fn reset_points(&mut self) -> Vec<Point> {
        std::mem::take(&mut self.points)
    }

    /// Sum of held point values; zero when no points are held.
    pub fn score(&self) -> u32 {
        self.points.iter().map(|p| p.value).sum()
    }
}
