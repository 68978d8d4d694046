//! # Game Module
//!
//! Core simulation: world representation, entities, timing, combat and the
//! session state machine.
//!
//! This module contains the fundamental building blocks of Dunjy Krawl:
//! - Grid representation and coordinate rules
//! - Entity registry for the player, enemies and projectiles
//! - Timing gates and movement
//! - Combat resolution
//! - The owned game state with its per-frame `advance` entry point

pub mod combat;
pub mod entities;
pub mod motion;
pub mod state;
pub mod timing;
pub mod world;

pub use combat::*;
pub use entities::*;
pub use motion::*;
pub use state::*;
pub use timing::*;
pub use world::*;

use serde::{Deserialize, Serialize};
use uuid::Uuid;

/// Represents a 2D tile coordinate in the dungeon.
///
/// # Examples
///
/// ```
/// use dunjy_krawl::Position;
///
/// let pos = Position::new(10, 5);
/// assert_eq!(pos.x, 10);
/// assert_eq!(pos.y, 5);
///
/// let adjacent = pos.cardinal_adjacent_positions();
/// assert_eq!(adjacent.len(), 4);
/// ```
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct Position {
    pub x: i32,
    pub y: i32,
}

impl Position {
    /// Creates a new position with the given coordinates.
    pub fn new(x: i32, y: i32) -> Self {
        Self { x, y }
    }

    /// Returns the origin position (0, 0).
    pub fn origin() -> Self {
        Self::new(0, 0)
    }

    /// Calculates the Manhattan distance to another position.
    ///
    /// # Examples
    ///
    /// ```
    /// use dunjy_krawl::Position;
    ///
    /// let pos1 = Position::new(0, 0);
    /// let pos2 = Position::new(3, 4);
    /// assert_eq!(pos1.manhattan_distance(pos2), 7);
    /// ```
    pub fn manhattan_distance(self, other: Position) -> u32 {
        ((self.x - other.x).abs() + (self.y - other.y).abs()) as u32
    }

    /// Returns the per-axis sign of this position treated as a vector.
    pub fn signum(self) -> Position {
        Position::new(self.x.signum(), self.y.signum())
    }

    /// Returns only the 4 cardinal adjacent positions (no diagonals).
    pub fn cardinal_adjacent_positions(self) -> Vec<Position> {
        Direction::cardinal()
            .into_iter()
            .map(|direction| self + direction.to_delta())
            .collect()
    }
}

impl std::ops::Add for Position {
    type Output = Self;

    fn add(self, other: Self) -> Self {
        Self::new(self.x + other.x, self.y + other.y)
    }
}

impl std::ops::Sub for Position {
    type Output = Self;

    fn sub(self, other: Self) -> Self {
        Self::new(self.x - other.x, self.y - other.y)
    }
}

/// Directions for movement, facing and projectile flight.
///
/// Walking and facing only ever use the four cardinal variants; projectiles
/// may fly along any of the eight.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum Direction {
    North,
    South,
    East,
    West,
    Northeast,
    Northwest,
    Southeast,
    Southwest,
}

impl Direction {
    /// Converts a direction to a position delta.
    ///
    /// # Examples
    ///
    /// ```
    /// use dunjy_krawl::{Direction, Position};
    ///
    /// let delta = Direction::North.to_delta();
    /// assert_eq!(delta, Position::new(0, -1));
    /// ```
    pub fn to_delta(self) -> Position {
        match self {
            Direction::North => Position::new(0, -1),
            Direction::South => Position::new(0, 1),
            Direction::East => Position::new(1, 0),
            Direction::West => Position::new(-1, 0),
            Direction::Northeast => Position::new(1, -1),
            Direction::Northwest => Position::new(-1, -1),
            Direction::Southeast => Position::new(1, 1),
            Direction::Southwest => Position::new(-1, 1),
        }
    }

    /// Converts a position delta to a direction.
    ///
    /// Returns None if the delta doesn't correspond to a valid direction.
    pub fn from_delta(delta: Position) -> Option<Direction> {
        match (delta.x, delta.y) {
            (0, -1) => Some(Direction::North),
            (0, 1) => Some(Direction::South),
            (1, 0) => Some(Direction::East),
            (-1, 0) => Some(Direction::West),
            (1, -1) => Some(Direction::Northeast),
            (-1, -1) => Some(Direction::Northwest),
            (1, 1) => Some(Direction::Southeast),
            (-1, 1) => Some(Direction::Southwest),
            _ => None,
        }
    }

    /// Returns the direction pointing from `from` towards `to`, snapping each
    /// axis to its sign. Returns None when both points coincide.
    ///
    /// # Examples
    ///
    /// ```
    /// use dunjy_krawl::{Direction, Position};
    ///
    /// let aim = Direction::towards(Position::new(2, 2), Position::new(9, 0));
    /// assert_eq!(aim, Some(Direction::Northeast));
    /// assert_eq!(Direction::towards(Position::new(2, 2), Position::new(2, 2)), None);
    /// ```
    pub fn towards(from: Position, to: Position) -> Option<Direction> {
        Self::from_delta((to - from).signum())
    }

    /// Returns only the 4 cardinal directions, in the order held input is
    /// evaluated and enemy AI rolls are mapped.
    pub fn cardinal() -> [Direction; 4] {
        [
            Direction::North,
            Direction::South,
            Direction::West,
            Direction::East,
        ]
    }
}

/// Unique identifier for game entities.
pub type EntityId = Uuid;

/// Creates a new unique entity ID.
pub fn new_entity_id() -> EntityId {
    Uuid::new_v4()
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_position_creation() {
        let pos = Position::new(5, 10);
        assert_eq!(pos.x, 5);
        assert_eq!(pos.y, 10);
        assert_eq!(Position::origin(), Position::new(0, 0));
    }

    #[test]
    fn test_position_manhattan_distance() {
        let pos1 = Position::new(0, 0);
        let pos2 = Position::new(3, 4);
        assert_eq!(pos1.manhattan_distance(pos2), 7);
    }

    #[test]
    fn test_position_cardinal_adjacent() {
        let pos = Position::new(5, 5);
        let adjacent = pos.cardinal_adjacent_positions();
        assert_eq!(adjacent.len(), 4);
        assert!(adjacent.contains(&Position::new(5, 4))); // North
        assert!(adjacent.contains(&Position::new(4, 5))); // West
        assert!(!adjacent.contains(&Position::new(4, 4))); // No diagonal
    }

    #[test]
    fn test_position_arithmetic() {
        let pos1 = Position::new(5, 10);
        let pos2 = Position::new(3, 2);
        assert_eq!(pos1 + pos2, Position::new(8, 12));
        assert_eq!(pos1 - pos2, Position::new(2, 8));
        assert_eq!(Position::new(-7, 0).signum(), Position::new(-1, 0));
    }

    #[test]
    fn test_direction_round_trip() {
        for direction in [
            Direction::North,
            Direction::South,
            Direction::East,
            Direction::West,
            Direction::Northeast,
            Direction::Northwest,
            Direction::Southeast,
            Direction::Southwest,
        ] {
            assert_eq!(Direction::from_delta(direction.to_delta()), Some(direction));
        }
        assert_eq!(Direction::from_delta(Position::new(2, 0)), None);
    }

    #[test]
    fn test_direction_towards_snaps_each_axis() {
        let from = Position::new(5, 5);
        assert_eq!(Direction::towards(from, Position::new(12, 5)), Some(Direction::East));
        assert_eq!(Direction::towards(from, Position::new(5, 1)), Some(Direction::North));
        assert_eq!(
            Direction::towards(from, Position::new(1, 9)),
            Some(Direction::Southwest)
        );
    }

    #[test]
    fn test_cardinal_directions() {
        let cardinal = Direction::cardinal();
        assert_eq!(cardinal.len(), 4);
        assert!(!cardinal.contains(&Direction::Northeast));
        assert!(cardinal.iter().all(|d| d.to_delta().manhattan_distance(Position::origin()) == 1));
    }

    #[test]
    fn test_entity_id_uniqueness() {
        let id1 = new_entity_id();
        let id2 = new_entity_id();
        assert_ne!(id1, id2);
    }
}
