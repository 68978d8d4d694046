//! # World Module
//!
//! The dungeon tile grid and the coordinate rules every move is checked against.

use crate::game::Position;
use crate::{KrawlError, KrawlResult};
use serde::{Deserialize, Serialize};

/// The two cell states of the dungeon.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum TileType {
    /// Solid rock, impassable
    Wall,
    /// Open ground, passable and targetable
    Floor,
}

impl TileType {
    /// Returns true if entities can stand on this tile.
    pub fn is_passable(self) -> bool {
        self == TileType::Floor
    }

    /// Returns the character used for text dumps of the grid.
    pub fn glyph(self) -> char {
        match self {
            TileType::Wall => '#',
            TileType::Floor => '.',
        }
    }
}

/// Fixed-size rectangular dungeon grid.
///
/// Tiles are stored row-major (`tiles[y][x]`). A grid is rebuilt wholesale by
/// the generator at the start of every level and is otherwise only read.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Grid {
    /// Width in tiles (columns)
    pub width: u32,
    /// Height in tiles (rows)
    pub height: u32,
    /// Tile matrix, indexed `[row][column]`
    pub tiles: Vec<Vec<TileType>>,
}

impl Grid {
    /// Creates a grid of the given size filled entirely with walls.
    ///
    /// # Examples
    ///
    /// ```
    /// use dunjy_krawl::{Grid, Position};
    ///
    /// let grid = Grid::new(20, 15);
    /// assert!(grid.in_bounds(Position::new(19, 14)));
    /// assert!(!grid.is_floor(Position::new(5, 5)));
    /// ```
    pub fn new(width: u32, height: u32) -> Self {
        Self {
            width,
            height,
            tiles: vec![vec![TileType::Wall; width as usize]; height as usize],
        }
    }

    /// Overwrites every tile with `tile_type`.
    pub fn fill(&mut self, tile_type: TileType) {
        for row in self.tiles.iter_mut() {
            row.fill(tile_type);
        }
    }

    /// Checks whether a position lies inside the grid.
    pub fn in_bounds(&self, pos: Position) -> bool {
        pos.x >= 0 && pos.y >= 0 && pos.x < self.width as i32 && pos.y < self.height as i32
    }

    /// Gets the tile at a position, or None when out of bounds.
    pub fn get_tile(&self, pos: Position) -> Option<TileType> {
        if !self.in_bounds(pos) {
            return None;
        }
        Some(self.tiles[pos.y as usize][pos.x as usize])
    }

    /// Checks whether the tile at a position is floor. Out-of-bounds
    /// positions are never floor.
    pub fn is_floor(&self, pos: Position) -> bool {
        self.get_tile(pos) == Some(TileType::Floor)
    }

    /// A position is a valid destination iff it is in bounds and floor.
    pub fn is_walkable(&self, pos: Position) -> bool {
        self.get_tile(pos).map_or(false, TileType::is_passable)
    }

    /// Sets the tile at a position.
    pub fn set_tile(&mut self, pos: Position, tile_type: TileType) -> KrawlResult<()> {
        if !self.in_bounds(pos) {
            return Err(KrawlError::InvalidPosition { x: pos.x, y: pos.y });
        }
        self.tiles[pos.y as usize][pos.x as usize] = tile_type;
        Ok(())
    }

    /// Carves a `width` x `height` rectangle of floor starting at `top_left`.
    pub fn carve_rect(&mut self, top_left: Position, width: u32, height: u32) -> KrawlResult<()> {
        for y in top_left.y..top_left.y + height as i32 {
            for x in top_left.x..top_left.x + width as i32 {
                self.set_tile(Position::new(x, y), TileType::Floor)?;
            }
        }
        Ok(())
    }

    /// Counts floor tiles.
    pub fn floor_count(&self) -> usize {
        self.tiles
            .iter()
            .flat_map(|row| row.iter())
            .filter(|tile| **tile == TileType::Floor)
            .count()
    }

    /// Lists floor positions in row-major order.
    pub fn floor_positions(&self) -> Vec<Position> {
        let mut positions = Vec::new();
        for (y, row) in self.tiles.iter().enumerate() {
            for (x, tile) in row.iter().enumerate() {
                if *tile == TileType::Floor {
                    positions.push(Position::new(x as i32, y as i32));
                }
            }
        }
        positions
    }

    /// Renders the grid as text, one line per row.
    pub fn to_ascii(&self) -> String {
        self.tiles
            .iter()
            .map(|row| row.iter().map(|tile| tile.glyph()).collect::<String>())
            .collect::<Vec<_>>()
            .join("\n")
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_new_grid_is_all_wall() {
        let grid = Grid::new(10, 8);
        assert_eq!(grid.tiles.len(), 8);
        assert_eq!(grid.tiles[0].len(), 10);
        assert_eq!(grid.floor_count(), 0);
    }

    #[test]
    fn test_bounds() {
        let grid = Grid::new(10, 8);
        assert!(grid.in_bounds(Position::new(0, 0)));
        assert!(grid.in_bounds(Position::new(9, 7)));
        assert!(!grid.in_bounds(Position::new(10, 7)));
        assert!(!grid.in_bounds(Position::new(9, 8)));
        assert!(!grid.in_bounds(Position::new(-1, 0)));
        assert_eq!(grid.get_tile(Position::new(-1, 3)), None);
    }

    #[test]
    fn test_walkable_requires_floor_and_bounds() {
        let mut grid = Grid::new(10, 8);
        let pos = Position::new(3, 3);
        assert!(!grid.is_walkable(pos));

        grid.set_tile(pos, TileType::Floor).unwrap();
        assert!(grid.is_floor(pos));
        assert!(grid.is_walkable(pos));
        assert!(!grid.is_walkable(Position::new(30, 3)));
    }

    #[test]
    fn test_set_tile_out_of_bounds_fails() {
        let mut grid = Grid::new(4, 4);
        let result = grid.set_tile(Position::new(4, 0), TileType::Floor);
        assert!(matches!(
            result,
            Err(KrawlError::InvalidPosition { x: 4, y: 0 })
        ));
    }

    #[test]
    fn test_carve_rect_and_fill() {
        let mut grid = Grid::new(10, 8);
        grid.carve_rect(Position::new(2, 1), 3, 2).unwrap();
        assert_eq!(grid.floor_count(), 6);
        assert_eq!(grid.floor_positions()[0], Position::new(2, 1));

        grid.fill(TileType::Wall);
        assert_eq!(grid.floor_count(), 0);
    }

    #[test]
    fn test_ascii_dump() {
        let mut grid = Grid::new(3, 2);
        grid.set_tile(Position::new(1, 1), TileType::Floor).unwrap();
        assert_eq!(grid.to_ascii(), "###\n#.#");
    }
}
