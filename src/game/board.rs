//! Board Evaluation
//!
//! The board owns the fixed point layout and the live player roster,
//! answers all spatial queries (edge, player-player, player-point), and
//! runs the per-event evaluation pass over the entire roster.
//!
//! Every overlap test is a strict axis-aligned bounding box check; the
//! roster re-scan is O(players x (players + points)) per event, which is
//! fine at phone-controller roster sizes and human input rates.

use tracing::debug;

use crate::game::input::ControlEvent;
use crate::game::player::{Player, PlayerId, PLAYER_HEIGHT, PLAYER_WIDTH};
use crate::game::point::{Point, POINT_HEIGHT, POINT_WIDTH};

/// Unit width of the board
pub const BOARD_WIDTH: i32 = 800;

/// Unit height of the board
pub const BOARD_HEIGHT: i32 = 600;

/// Grid columns holding points
const GRID_COLUMNS: i32 = 3;

/// Grid rows holding points
const GRID_ROWS: i32 = 3;

/// Axis-aligned bounding box used for all overlap tests.
#[derive(Clone, Copy, Debug)]
pub struct BoundingBox {
    /// Top-left x
    pub x: i32,
    /// Top-left y
    pub y: i32,
    /// Box width
    pub width: i32,
    /// Box height
    pub height: i32,
}

impl BoundingBox {
    /// Strict overlap test: boxes that merely touch do not overlap.
    #[inline]
    pub fn overlaps(&self, other: &BoundingBox) -> bool {
        self.x < other.x + other.width
            && self.x + self.width > other.x
            && self.y < other.y + other.height
            && self.y + self.height > other.y
    }
}

fn player_bounds(player: &Player) -> BoundingBox {
    BoundingBox {
        x: player.x,
        y: player.y,
        width: PLAYER_WIDTH,
        height: PLAYER_HEIGHT,
    }
}

fn point_bounds(point: &Point) -> BoundingBox {
    BoundingBox {
        x: point.x,
        y: point.y,
        width: POINT_WIDTH,
        height: POINT_HEIGHT,
    }
}

/// A game board with a distinct points configuration and the registered
/// players positioned within its coordinate plane.
#[derive(Clone, Debug)]
pub struct Board {
    /// Points currently available on the board (held by no player)
    pub points: Vec<Point>,
    /// Registered players, in registration order
    pub players: Vec<Player>,
}

impl Default for Board {
    fn default() -> Self {
        Self::new()
    }
}

impl Board {
    /// Create a board with the predefined points configuration and an
    /// empty roster.
    pub fn new() -> Self {
        Self {
            points: generate_points(),
            players: Vec::new(),
        }
    }

    /// Add a player to the roster.
    pub fn add_player(&mut self, player: Player) {
        self.players.push(player);
    }

    /// Remove a player from the roster. Unknown ids are a no-op.
    pub fn remove_player(&mut self, id: &PlayerId) {
        self.players.retain(|p| &p.id != id);
    }

    /// Look up a player by id.
    pub fn player(&self, id: &PlayerId) -> Option<&Player> {
        self.players.iter().find(|p| &p.id == id)
    }

    /// Look up a player mutably by id.
    pub fn player_mut(&mut self, id: &PlayerId) -> Option<&mut Player> {
        self.players.iter_mut().find(|p| &p.id == id)
    }

    /// True when every point has been awarded to some player; the board is
    /// in effect empty and the game is over.
    pub fn is_empty(&self) -> bool {
        self.points.is_empty()
    }

    /// Player touches or crosses the near x boundary.
    pub fn at_leading_edge_x(&self, player: &Player) -> bool {
        player.x <= 0
    }

    /// Player touches or crosses the far x boundary.
    pub fn at_trailing_edge_x(&self, player: &Player) -> bool {
        player.x + PLAYER_WIDTH >= BOARD_WIDTH
    }

    /// Player touches either x boundary.
    pub fn at_edge_x(&self, player: &Player) -> bool {
        self.at_leading_edge_x(player) || self.at_trailing_edge_x(player)
    }

    /// Player touches or crosses the near y boundary.
    pub fn at_leading_edge_y(&self, player: &Player) -> bool {
        player.y <= 0
    }

    /// Player touches or crosses the far y boundary.
    pub fn at_trailing_edge_y(&self, player: &Player) -> bool {
        player.y + PLAYER_HEIGHT >= BOARD_HEIGHT
    }

    /// Player touches either y boundary.
    pub fn at_edge_y(&self, player: &Player) -> bool {
        self.at_leading_edge_y(player) || self.at_trailing_edge_y(player)
    }

    /// Player touches any board boundary.
    pub fn at_edge(&self, player: &Player) -> bool {
        self.at_edge_x(player) || self.at_edge_y(player)
    }

    /// Ids of every other registered player whose box overlaps the given
    /// player's. All simultaneous collisions are reported, not just the
    /// first; the player itself is excluded by id.
    pub fn collided_with_players(&self, player: &Player) -> Vec<PlayerId> {
        let bounds = player_bounds(player);
        self.players
            .iter()
            .filter(|other| other.id != player.id && bounds.overlaps(&player_bounds(other)))
            .map(|other| other.id.clone())
            .collect()
    }

    /// Index of the available point the player's box overlaps, if any.
    /// When the box overlaps several points the last one in scan order
    /// wins; existing view clients depend on this tie ordering.
    pub fn collided_with_point(&self, player: &Player) -> Option<usize> {
        let bounds = player_bounds(player);
        let mut awarded = None;
        for (index, point) in self.points.iter().enumerate() {
            if bounds.overlaps(&point_bounds(point)) {
                awarded = Some(index);
            }
        }
        awarded
    }

    /// Apply the event's movement to its player, then snap the position
    /// back onto the board wherever it crossed a boundary. Events for ids
    /// not on the roster are ignored.
    pub fn update_player(&mut self, event: &ControlEvent) {
        let Some(index) = self.players.iter().position(|p| p.id == event.id) else {
            debug!("Update for unregistered player ignored: {}", event.id);
            return;
        };

        if let Some(direction) = event.dir {
            self.players[index].step(direction);
        }

        // Prevent movement beyond the edges of the board
        if self.at_leading_edge_x(&self.players[index]) {
            self.players[index].x = 0;
        }
        if self.at_trailing_edge_x(&self.players[index]) {
            self.players[index].x = BOARD_WIDTH - PLAYER_WIDTH;
        }
        if self.at_leading_edge_y(&self.players[index]) {
            self.players[index].y = 0;
        }
        if self.at_trailing_edge_y(&self.players[index]) {
            self.players[index].y = BOARD_HEIGHT - PLAYER_HEIGHT;
        }
    }

    /// Return every point held by the given player to the board's
    /// available set. Unknown ids are a no-op.
    pub fn release_player_points(&mut self, id: &PlayerId) {
        let Some(player) = self.player_mut(id) else {
            return;
        };
        let lost = player.reset_points();
        self.points.extend(lost);
    }

    /// One full evaluation pass over the entire roster: edge contact,
    /// player-player collisions, and point pickups.
    ///
    /// The three checks are independent and can all fire for the same
    /// player in the same pass. Later players in the roster observe the
    /// custody changes made by earlier ones, so a point knocked loose can
    /// be picked up again within the same pass.
    pub fn evaluate_board(&mut self) {
        for index in 0..self.players.len() {
            // Edge contact releases held points back to the board
            if self.at_edge(&self.players[index]) {
                self.players[index].at_edge = true;
                let lost = self.players[index].reset_points();
                self.points.extend(lost);
            } else {
                self.players[index].at_edge = false;
            }

            // Player collisions knock points loose on both sides
            let hit_ids = self.collided_with_players(&self.players[index]);
            if !hit_ids.is_empty() {
                let lost = self.players[index].hit();
                self.points.extend(lost);
                for id in &hit_ids {
                    if let Some(other) = self.player_mut(id) {
                        let lost = other.hit();
                        self.points.extend(lost);
                    }
                }
            } else {
                self.players[index].hit = false;
            }

            // Point pickups transfer custody from board to player
            if let Some(point_index) = self.collided_with_point(&self.players[index]) {
                let point = self.points.remove(point_index);
                let player = &mut self.players[index];
                player.awarded_point = true;
                player.points.push(point);
            } else {
                self.players[index].awarded_point = false;
            }
        }
    }

    /// Evaluate one inbound event: update the acted-upon player, then
    /// re-evaluate the entire board.
    pub fn evaluate(&mut self, event: &ControlEvent) {
        self.update_player(event);
        self.evaluate_board();
    }
}

/// Generate the predefined points configuration: a 3x3 grid mapped to
/// pixel coordinates.
fn generate_points() -> Vec<Point> {
    let mut points = Vec::with_capacity((GRID_COLUMNS * GRID_ROWS) as usize);
    for row in 0..GRID_ROWS {
        for column in 0..GRID_COLUMNS {
            points.push(Point::new(column, row));
        }
    }
    points
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::game::input::Direction;

    fn board_with_players(positions: &[(&str, i32, i32)]) -> Board {
        let mut board = Board::new();
        for (id, x, y) in positions {
            let mut player = Player::new(PlayerId::from(*id), "#fff");
            player.x = *x;
            player.y = *y;
            board.add_player(player);
        }
        board
    }

    fn directional(id: &str, dir: Option<Direction>) -> ControlEvent {
        ControlEvent::directional(PlayerId::from(id), dir)
    }

    #[test]
    fn overlap_is_strict() {
        let a = BoundingBox { x: 0, y: 0, width: 50, height: 50 };
        let b = BoundingBox { x: 49, y: 0, width: 50, height: 50 };
        let c = BoundingBox { x: 50, y: 0, width: 50, height: 50 };

        assert!(a.overlaps(&b));
        assert!(!a.overlaps(&c));
    }

    #[test]
    fn generates_nine_points_on_the_grid() {
        let board = Board::new();

        assert_eq!(board.points.len(), 9);
        let first = &board.points[0];
        assert_eq!((first.column, first.row, first.x, first.y), (0, 0, 110, 75));
        let last = &board.points[8];
        assert_eq!((last.column, last.row, last.x, last.y), (2, 2, 610, 475));
    }

    #[test]
    fn edge_predicates_cover_all_four_boundaries() {
        let board = board_with_players(&[("a", 0, 300)]);
        assert!(board.at_leading_edge_x(&board.players[0]));
        assert!(board.at_edge(&board.players[0]));

        let board = board_with_players(&[("a", BOARD_WIDTH - PLAYER_WIDTH, 300)]);
        assert!(board.at_trailing_edge_x(&board.players[0]));

        let board = board_with_players(&[("a", 300, 0)]);
        assert!(board.at_leading_edge_y(&board.players[0]));

        let board = board_with_players(&[("a", 300, BOARD_HEIGHT - PLAYER_HEIGHT)]);
        assert!(board.at_trailing_edge_y(&board.players[0]));

        let board = board_with_players(&[("a", 300, 300)]);
        assert!(!board.at_edge(&board.players[0]));
    }

    #[test]
    fn repeated_south_moves_clamp_at_the_trailing_edge() {
        let mut board = board_with_players(&[("a", 0, 0)]);
        for _ in 0..40 {
            board.evaluate(&directional("a", Some(Direction::South)));
        }

        let player = board.player(&PlayerId::from("a")).unwrap();
        assert_eq!(player.y, BOARD_HEIGHT - PLAYER_HEIGHT);
        assert!(player.at_edge);
    }

    #[test]
    fn edge_clamp_is_idempotent_without_movement() {
        let mut board = board_with_players(&[("a", 300, BOARD_HEIGHT - PLAYER_HEIGHT)]);

        for _ in 0..2 {
            board.evaluate(&directional("a", None));
            let player = board.player(&PlayerId::from("a")).unwrap();
            assert_eq!((player.x, player.y), (300, BOARD_HEIGHT - PLAYER_HEIGHT));
            assert!(player.at_edge);
        }
    }

    #[test]
    fn edge_contact_releases_held_points() {
        let mut board = board_with_players(&[("a", 300, 0)]);
        let point = board.points.remove(0);
        board.players[0].points.push(point);
        assert_eq!(board.points.len(), 8);

        board.evaluate_board();

        assert!(board.players[0].at_edge);
        assert!(board.players[0].points.is_empty());
        assert_eq!(board.points.len(), 9);
    }

    #[test]
    fn collision_reporting_is_symmetric() {
        let board = board_with_players(&[("a", 200, 200), ("b", 220, 200), ("c", 600, 500)]);

        assert_eq!(
            board.collided_with_players(&board.players[0]),
            vec![PlayerId::from("b")]
        );
        assert_eq!(
            board.collided_with_players(&board.players[1]),
            vec![PlayerId::from("a")]
        );
        assert!(board.collided_with_players(&board.players[2]).is_empty());
    }

    #[test]
    fn touching_players_do_not_collide() {
        let board = board_with_players(&[("a", 200, 200), ("b", 250, 200)]);
        assert!(board.collided_with_players(&board.players[0]).is_empty());
    }

    #[test]
    fn overlapping_players_both_take_the_hit() {
        let mut board = board_with_players(&[("a", 200, 200), ("b", 220, 200)]);
        let point = board.points.remove(0);
        board.players[0].points.push(point);
        let point = board.points.remove(0);
        board.players[1].points.push(point);

        board.evaluate_board();

        assert!(board.players[0].hit);
        assert!(board.players[1].hit);
        assert!(board.players[0].points.is_empty());
        assert!(board.players[1].points.is_empty());
        assert_eq!(board.points.len(), 9);
    }

    #[test]
    fn player_standing_on_a_point_picks_it_up() {
        let mut board = board_with_players(&[("a", 110, 75)]);

        board.evaluate(&directional("a", None));

        let player = board.player(&PlayerId::from("a")).unwrap();
        assert!(player.awarded_point);
        assert_eq!(player.points.len(), 1);
        assert_eq!((player.points[0].column, player.points[0].row), (0, 0));
        assert_eq!(board.points.len(), 8);
    }

    #[test]
    fn later_points_win_when_overlapping_several() {
        // The real grid spaces points too far apart for a player to reach
        // two at once; force the layout to pin down the scan-order policy.
        let mut board = board_with_players(&[("a", 100, 100)]);
        board.points = vec![
            Point { value: 1, column: 0, row: 0, x: 90, y: 90 },
            Point { value: 1, column: 1, row: 0, x: 120, y: 120 },
        ];

        assert_eq!(board.collided_with_point(&board.players[0]), Some(1));
    }

    #[test]
    fn colliding_players_churn_a_contested_point() {
        // Both players overlap each other and the (0, 0) point. The first
        // picks it up, the second knocks it loose again and grabs it,
        // leaving both flagged as hit and awarded in the same pass.
        let mut board = board_with_players(&[("a", 110, 75), ("b", 130, 75)]);

        board.evaluate_board();

        let a = board.player(&PlayerId::from("a")).unwrap();
        let b = board.player(&PlayerId::from("b")).unwrap();
        assert!(a.hit && b.hit);
        assert!(a.awarded_point && b.awarded_point);
        assert!(a.points.is_empty());
        assert_eq!(b.points.len(), 1);
        assert_eq!(board.points.len(), 8);
    }

    #[test]
    fn update_for_unknown_player_is_a_no_op() {
        let mut board = board_with_players(&[("a", 300, 300)]);

        board.evaluate(&directional("ghost", Some(Direction::North)));

        assert_eq!(board.players.len(), 1);
        assert_eq!((board.players[0].x, board.players[0].y), (300, 300));
    }
}
