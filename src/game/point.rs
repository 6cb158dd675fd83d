//! Collectible Points
//!
//! A point is a static collectible on the fixed 3x3 grid. Its pixel
//! position is derived from its logical grid cell once, at construction.
//! Points move between board custody and a player's held set; they are
//! never destroyed while a session lives.

use serde::{Deserialize, Serialize};

/// Default value awarded per point
pub const DEFAULT_POINT_VALUE: u32 = 1;

/// Unit width of a point's bounding box
pub const POINT_WIDTH: i32 = 50;

/// Unit height of a point's bounding box
pub const POINT_HEIGHT: i32 = 50;

/// Pixel x offset of grid column 0
pub const GRID_OFFSET_X: i32 = 110;

/// Pixel spacing between grid columns
pub const GRID_SPACING_X: i32 = 250;

/// Pixel y offset of grid row 0
pub const GRID_OFFSET_Y: i32 = 75;

/// Pixel spacing between grid rows
pub const GRID_SPACING_Y: i32 = 200;

/// A point within the game that can be awarded to a player.
#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub struct Point {
    /// Value credited to the holder's score
    pub value: u32,
    /// Logical column position (immutable)
    pub column: i32,
    /// Logical row position (immutable)
    pub row: i32,
    /// Pixel x position, top-left origin
    pub x: i32,
    /// Pixel y position, top-left origin
    pub y: i32,
}

impl Point {
    /// Create a point with the default value at the given grid cell.
    pub fn new(column: i32, row: i32) -> Self {
        Self::with_value(column, row, DEFAULT_POINT_VALUE)
    }

    /// Create a point with an explicit value at the given grid cell.
    pub fn with_value(column: i32, row: i32, value: u32) -> Self {
        Self {
            value,
            column,
            row,
            x: GRID_OFFSET_X + column * GRID_SPACING_X,
            y: GRID_OFFSET_Y + row * GRID_SPACING_Y,
        }
    }
}
