//! # Generation Module
//!
//! Procedural dungeon generation.
//!
//! A level is produced by a [`Generator`] from a [`GenerationConfig`], a
//! [`LevelRequest`] naming the level and difficulty, and an injected
//! [`RandomSource`]. Passing the same seed (or the same scripted values)
//! reproduces the same dungeon.

pub mod dungeon;

pub use dungeon::*;

use crate::game::{Grid, Position, TileType};
use crate::utils::RandomSource;
use crate::{KrawlError, KrawlResult};
use serde::{Deserialize, Serialize};

/// Configuration for procedural generation.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct GenerationConfig {
    /// Grid width in tiles
    pub columns: u32,
    /// Grid height in tiles
    pub rows: u32,
    /// Number of room placement attempts
    pub max_rooms: u32,
    /// Minimum room edge
    pub min_room_size: u32,
    /// Maximum room edge
    pub max_room_size: u32,
    /// Enemies on level 1 at difficulty 1
    pub base_enemies: u32,
    /// Extra enemies per level beyond the first
    pub enemies_per_level: u32,
    /// Extra enemies per difficulty tier beyond the first
    pub enemies_per_difficulty: u32,
}

impl GenerationConfig {
    /// Creates the default configuration, sized to the default viewport.
    ///
    /// # Examples
    ///
    /// ```
    /// use dunjy_krawl::GenerationConfig;
    ///
    /// let config = GenerationConfig::new();
    /// assert!(config.min_room_size >= 1);
    /// assert!(config.max_room_size >= config.min_room_size);
    /// assert!(config.validate().is_ok());
    /// ```
    pub fn new() -> Self {
        use crate::config;
        Self {
            columns: config::DEFAULT_DUNGEON_WIDTH,
            rows: config::DEFAULT_DUNGEON_HEIGHT,
            max_rooms: config::MAX_ROOMS,
            min_room_size: config::MIN_ROOM_SIZE,
            max_room_size: config::MAX_ROOM_SIZE,
            base_enemies: config::BASE_ENEMIES,
            enemies_per_level: 1,
            enemies_per_difficulty: 1,
        }
    }

    /// Creates a configuration for testing with a small 20x15 grid.
    pub fn for_testing() -> Self {
        Self {
            columns: 20,
            rows: 15,
            max_rooms: 4,
            min_room_size: 3,
            max_room_size: 5,
            ..Self::new()
        }
    }

    /// Number of enemies to place on a level. Never decreases as the level
    /// or the difficulty grows.
    ///
    /// # Examples
    ///
    /// ```
    /// use dunjy_krawl::{GenerationConfig, LevelRequest};
    ///
    /// let config = GenerationConfig::new();
    /// assert_eq!(config.enemy_count(LevelRequest::new(1, 1)), 2);
    /// assert_eq!(config.enemy_count(LevelRequest::new(3, 2)), 5);
    /// ```
    pub fn enemy_count(&self, request: LevelRequest) -> u32 {
        let per_level = self
            .enemies_per_level
            .saturating_mul(request.level.saturating_sub(1));
        let per_difficulty = self
            .enemies_per_difficulty
            .saturating_mul(request.difficulty.saturating_sub(1));
        self.base_enemies
            .saturating_add(per_level)
            .saturating_add(per_difficulty)
    }

    /// Interior tile used for enemies once the rooms run out.
    pub fn fallback_enemy_tile(&self) -> Position {
        Position::new(self.columns as i32 - 3, self.rows as i32 - 3)
    }

    /// Tile used for the player when no room could be placed.
    pub fn fallback_player_tile(&self) -> Position {
        Position::new(1, 1)
    }

    /// Checks that the grid is within bounds and every room size fits inside
    /// it with a wall border.
    pub fn validate(&self) -> KrawlResult<()> {
        let limit = crate::config::MAX_GRID_DIMENSION;
        if self.columns > limit || self.rows > limit {
            return Err(KrawlError::InvalidConfig(format!(
                "grid {}x{} exceeds the {}x{} limit",
                self.columns, self.rows, limit, limit
            )));
        }
        if self.max_rooms > limit {
            return Err(KrawlError::InvalidConfig(format!(
                "max_rooms {} exceeds the limit of {}",
                self.max_rooms, limit
            )));
        }
        let enemy_limit = crate::config::MAX_ENEMIES_PER_TERM;
        if [
            self.base_enemies,
            self.enemies_per_level,
            self.enemies_per_difficulty,
        ]
        .iter()
        .any(|&count| count > enemy_limit)
        {
            return Err(KrawlError::InvalidConfig(format!(
                "enemy counts must not exceed {}",
                enemy_limit
            )));
        }
        if self.min_room_size == 0 {
            return Err(KrawlError::InvalidConfig(
                "min_room_size must be at least 1".to_string(),
            ));
        }
        if self.max_room_size < self.min_room_size {
            return Err(KrawlError::InvalidConfig(format!(
                "max_room_size {} is smaller than min_room_size {}",
                self.max_room_size, self.min_room_size
            )));
        }
        let required = self.max_room_size.saturating_add(2).max(5);
        if self.columns < required || self.rows < required {
            return Err(KrawlError::InvalidConfig(format!(
                "grid {}x{} too small for rooms up to {} tiles (needs at least {}x{})",
                self.columns, self.rows, self.max_room_size, required, required
            )));
        }
        Ok(())
    }
}

impl Default for GenerationConfig {
    fn default() -> Self {
        Self::new()
    }
}

/// Which level of which difficulty tier is being generated.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct LevelRequest {
    pub level: u32,
    pub difficulty: u32,
}

impl LevelRequest {
    pub fn new(level: u32, difficulty: u32) -> Self {
        Self { level, difficulty }
    }
}

/// Represents a rectangular room in the dungeon.
///
/// Rooms only exist during generation; the finished [`Dungeon`] keeps them
/// for inspection.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Room {
    /// Placement order among accepted rooms
    pub id: u32,
    /// Top-left corner of the room
    pub top_left: Position,
    /// Width of the room, every tile of which is floor
    pub width: u32,
    /// Height of the room, every tile of which is floor
    pub height: u32,
}

impl Room {
    /// Creates a new room with the given parameters.
    ///
    /// # Examples
    ///
    /// ```
    /// use dunjy_krawl::{Room, Position};
    ///
    /// let room = Room::new(1, Position::new(5, 5), 6, 4);
    /// assert_eq!(room.id, 1);
    /// assert_eq!(room.center(), Position::new(8, 7));
    /// ```
    pub fn new(id: u32, top_left: Position, width: u32, height: u32) -> Self {
        Self {
            id,
            top_left,
            width,
            height,
        }
    }

    /// Gets the bottom-right corner of the room.
    pub fn bottom_right(&self) -> Position {
        Position::new(
            self.top_left.x + self.width as i32 - 1,
            self.top_left.y + self.height as i32 - 1,
        )
    }

    /// Gets the center position of the room (rounded towards the top-left).
    pub fn center(&self) -> Position {
        Position::new(
            self.top_left.x + self.width as i32 / 2,
            self.top_left.y + self.height as i32 / 2,
        )
    }

    /// Gets the area of the room in tiles.
    pub fn area(&self) -> u32 {
        self.width * self.height
    }

    /// Checks if a position is inside this room.
    pub fn contains(&self, pos: Position) -> bool {
        pos.x >= self.top_left.x
            && pos.y >= self.top_left.y
            && pos.x < self.top_left.x + self.width as i32
            && pos.y < self.top_left.y + self.height as i32
    }

    /// Checks if this room overlaps another.
    ///
    /// Edges are compared inclusively against `x + width`, so rooms that touch,
    /// or that are separated by less than one wall tile, count as overlapping.
    pub fn overlaps(&self, other: &Room) -> bool {
        let (x, y) = (self.top_left.x, self.top_left.y);
        let (w, h) = (self.width as i32, self.height as i32);
        let (ox, oy) = (other.top_left.x, other.top_left.y);
        let (ow, oh) = (other.width as i32, other.height as i32);

        x <= ox + ow && x + w >= ox && y <= oy + oh && y + h >= oy
    }

    /// Gets all positions within this room.
    pub fn all_positions(&self) -> Vec<Position> {
        let mut positions = Vec::with_capacity(self.area() as usize);
        for y in self.top_left.y..(self.top_left.y + self.height as i32) {
            for x in self.top_left.x..(self.top_left.x + self.width as i32) {
                positions.push(Position::new(x, y));
            }
        }
        positions
    }
}

/// A finished level: the carved grid plus where everything starts.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Dungeon {
    pub grid: Grid,
    pub rooms: Vec<Room>,
    pub player_spawn: Position,
    pub enemy_spawns: Vec<Position>,
}

/// Trait for procedural generators.
pub trait Generator<T> {
    /// Generates content for a level using the injected randomness.
    fn generate(
        &self,
        config: &GenerationConfig,
        request: LevelRequest,
        rng: &mut dyn RandomSource,
    ) -> KrawlResult<T>;

    /// Validates that the generated content meets requirements.
    fn validate(&self, content: &T, config: &GenerationConfig) -> KrawlResult<()>;

    /// Gets the generator type name for logging and debugging.
    fn generator_type(&self) -> &'static str;
}

/// Validates that a dungeon can host a game.
pub fn validate_dungeon(dungeon: &Dungeon) -> KrawlResult<()> {
    if dungeon.grid.floor_count() == 0 {
        return Err(KrawlError::GenerationFailed(
            "Level has no floor tiles".to_string(),
        ));
    }

    if let Some(first) = dungeon.rooms.first() {
        if !first.contains(dungeon.player_spawn) {
            return Err(KrawlError::GenerationFailed(format!(
                "Player spawn {:?} is outside the first room",
                dungeon.player_spawn
            )));
        }
    }

    if dungeon.grid.get_tile(dungeon.player_spawn) != Some(TileType::Floor) {
        return Err(KrawlError::GenerationFailed(format!(
            "Player spawn {:?} is not a floor tile",
            dungeon.player_spawn
        )));
    }

    if let Some(spawn) = dungeon
        .enemy_spawns
        .iter()
        .find(|spawn| !dungeon.grid.in_bounds(**spawn))
    {
        return Err(KrawlError::GenerationFailed(format!(
            "Enemy spawn {:?} is outside the grid",
            spawn
        )));
    }

    Ok(())
}
