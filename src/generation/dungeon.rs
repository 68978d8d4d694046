//! # Dungeon Generation
//!
//! Procedural dungeon layout generation using a room-and-corridor algorithm.
//!
//! Each level starts as solid wall. A fixed number of rectangular rooms is
//! attempted at random positions; overlapping candidates are dropped. Every
//! accepted room is joined to the previously accepted one by an L-shaped
//! corridor, the player starts in the first room and enemies fill the rest.

use crate::game::{Grid, Position, TileType};
use crate::generation::{
    validate_dungeon, Dungeon, GenerationConfig, Generator, LevelRequest, Room,
};
use crate::utils::RandomSource;
use crate::{KrawlError, KrawlResult};
use log::{debug, log_enabled, trace, warn, Level};
use std::collections::{HashSet, VecDeque};

/// Primary dungeon generator using the room-and-corridor algorithm.
///
/// This generator creates dungeons by:
/// 1. Placing rooms randomly, skipping any candidate that overlaps
/// 2. Connecting consecutive rooms with L-shaped corridors
/// 3. Choosing the player spawn and the enemy spawns
/// 4. Validating the result
#[derive(Debug, Clone)]
pub struct RoomCorridorGenerator {
    /// Whether to verify every room is reachable from the first one
    pub ensure_connectivity: bool,
}

impl RoomCorridorGenerator {
    /// Creates a new dungeon generator with default settings.
    ///
    /// # Examples
    ///
    /// ```
    /// use dunjy_krawl::{create_rng, GenerationConfig, Generator, LevelRequest, RoomCorridorGenerator};
    ///
    /// let generator = RoomCorridorGenerator::new();
    /// let mut rng = create_rng(42);
    /// let dungeon = generator
    ///     .generate(&GenerationConfig::new(), LevelRequest::new(1, 1), &mut rng)
    ///     .unwrap();
    /// assert!(dungeon.grid.is_floor(dungeon.player_spawn));
    /// ```
    pub fn new() -> Self {
        Self {
            ensure_connectivity: true,
        }
    }

    /// Places rooms and carves them, connecting each to its predecessor.
    fn place_rooms(
        &self,
        grid: &mut Grid,
        config: &GenerationConfig,
        rng: &mut dyn RandomSource,
    ) -> KrawlResult<Vec<Room>> {
        let mut rooms: Vec<Room> = Vec::new();

        for attempt in 0..config.max_rooms {
            let candidate = self.generate_room_candidate(config, rng, rooms.len() as u32);

            if let Some(existing) = rooms.iter().find(|room| candidate.overlaps(room)) {
                debug!(
                    "Room attempt {} at {:?} overlaps room {}, skipping",
                    attempt, candidate.top_left, existing.id
                );
                continue;
            }

            grid.carve_rect(candidate.top_left, candidate.width, candidate.height)?;

            if let Some(previous) = rooms.last() {
                self.carve_l_corridor(grid, previous.center(), candidate.center())?;
            }

            rooms.push(candidate);
        }

        Ok(rooms)
    }

    /// Draws a room candidate. Sizes are drawn before the position so the
    /// position range can keep the room off the outer border.
    fn generate_room_candidate(
        &self,
        config: &GenerationConfig,
        rng: &mut dyn RandomSource,
        room_id: u32,
    ) -> Room {
        let min = config.min_room_size as i32;
        let max = config.max_room_size as i32;

        let width = rng.uniform_int(min, max);
        let height = rng.uniform_int(min, max);
        let x = rng.uniform_int(1, config.columns as i32 - width - 1);
        let y = rng.uniform_int(1, config.rows as i32 - height - 1);

        Room::new(room_id, Position::new(x, y), width as u32, height as u32)
    }

    /// Carves an L-shaped corridor: along `start`'s row to `end.x`, then
    /// along `end`'s column to `end.y`.
    fn carve_l_corridor(&self, grid: &mut Grid, start: Position, end: Position) -> KrawlResult<()> {
        for x in start.x.min(end.x)..=start.x.max(end.x) {
            let pos = Position::new(x, start.y);
            if grid.in_bounds(pos) {
                grid.set_tile(pos, TileType::Floor)?;
            }
        }

        for y in start.y.min(end.y)..=start.y.max(end.y) {
            let pos = Position::new(end.x, y);
            if grid.in_bounds(pos) {
                grid.set_tile(pos, TileType::Floor)?;
            }
        }

        Ok(())
    }

    /// Picks the player spawn, carving the fallback tile when no room exists.
    fn choose_player_spawn(
        &self,
        grid: &mut Grid,
        rooms: &[Room],
        config: &GenerationConfig,
    ) -> KrawlResult<Position> {
        match rooms.first() {
            Some(first) => Ok(first.center()),
            None => {
                let fallback = config.fallback_player_tile();
                warn!("No rooms placed, spawning player at fallback {:?}", fallback);
                grid.set_tile(fallback, TileType::Floor)?;
                Ok(fallback)
            }
        }
    }

    /// Places enemies at the centers of rooms after the first, then at the
    /// fallback tile once the rooms run out.
    fn choose_enemy_spawns(
        &self,
        grid: &mut Grid,
        rooms: &[Room],
        player_spawn: Position,
        config: &GenerationConfig,
        request: LevelRequest,
    ) -> KrawlResult<Vec<Position>> {
        let wanted = config.enemy_count(request) as usize;
        let mut spawns: Vec<Position> = rooms.iter().skip(1).take(wanted).map(Room::center).collect();

        if spawns.len() < wanted {
            let fallback = self.fallback_enemy_spawn(grid, player_spawn, config)?;
            debug!(
                "{} rooms for {} enemies, placing {} at {:?}",
                rooms.len(),
                wanted,
                wanted - spawns.len(),
                fallback
            );
            spawns.resize(wanted, fallback);
        }

        Ok(spawns)
    }

    /// The configured fallback tile if it is floor and not the player's,
    /// otherwise the floor tile farthest from the player. Carves the
    /// configured tile as a last resort.
    fn fallback_enemy_spawn(
        &self,
        grid: &mut Grid,
        player_spawn: Position,
        config: &GenerationConfig,
    ) -> KrawlResult<Position> {
        let preferred = config.fallback_enemy_tile();
        if grid.is_floor(preferred) && preferred != player_spawn {
            return Ok(preferred);
        }

        let mut farthest: Option<(u32, Position)> = None;
        for pos in grid.floor_positions() {
            let distance = pos.manhattan_distance(player_spawn);
            if farthest.map_or(true, |(best, _)| distance > best) {
                farthest = Some((distance, pos));
            }
        }

        match farthest {
            Some((distance, pos)) if distance > 0 => Ok(pos),
            _ => {
                warn!("No floor away from the player, carving enemy fallback {:?}", preferred);
                grid.set_tile(preferred, TileType::Floor)?;
                Ok(preferred)
            }
        }
    }

    /// Validates that all rooms are reachable from the first one.
    fn validate_connectivity(&self, grid: &Grid, rooms: &[Room]) -> KrawlResult<()> {
        if !self.ensure_connectivity || rooms.is_empty() {
            return Ok(());
        }

        // Flood fill from the first room's center
        let mut visited = HashSet::new();
        let mut queue = VecDeque::new();

        let start_pos = rooms[0].center();
        queue.push_back(start_pos);
        visited.insert(start_pos);

        while let Some(pos) = queue.pop_front() {
            for adjacent_pos in pos.cardinal_adjacent_positions() {
                if visited.contains(&adjacent_pos) {
                    continue;
                }

                if grid.is_walkable(adjacent_pos) {
                    visited.insert(adjacent_pos);
                    queue.push_back(adjacent_pos);
                }
            }
        }

        for room in rooms {
            if !visited.contains(&room.center()) {
                return Err(KrawlError::GenerationFailed(format!(
                    "Room {} is not connected to other rooms",
                    room.id
                )));
            }
        }

        Ok(())
    }
}

impl Generator<Dungeon> for RoomCorridorGenerator {
    fn generate(
        &self,
        config: &GenerationConfig,
        request: LevelRequest,
        rng: &mut dyn RandomSource,
    ) -> KrawlResult<Dungeon> {
        config.validate()?;

        // Create empty level (all walls)
        let mut grid = Grid::new(config.columns, config.rows);

        let rooms = self.place_rooms(&mut grid, config, rng)?;
        let player_spawn = self.choose_player_spawn(&mut grid, &rooms, config)?;
        let enemy_spawns =
            self.choose_enemy_spawns(&mut grid, &rooms, player_spawn, config, request)?;

        let dungeon = Dungeon {
            grid,
            rooms,
            player_spawn,
            enemy_spawns,
        };

        self.validate(&dungeon, config)?;

        debug!(
            "Generated level {} (difficulty {}): {} rooms, {} enemies, player at {:?}",
            request.level,
            request.difficulty,
            dungeon.rooms.len(),
            dungeon.enemy_spawns.len(),
            dungeon.player_spawn
        );
        if log_enabled!(Level::Trace) {
            trace!("Level {} layout:\n{}", request.level, dungeon.grid.to_ascii());
        }

        Ok(dungeon)
    }

    fn validate(&self, dungeon: &Dungeon, _config: &GenerationConfig) -> KrawlResult<()> {
        validate_dungeon(dungeon)?;
        self.validate_connectivity(&dungeon.grid, &dungeon.rooms)
    }

    fn generator_type(&self) -> &'static str {
        "RoomCorridorGenerator"
    }
}

impl Default for RoomCorridorGenerator {
    fn default() -> Self {
        Self::new()
    }
}
