//! # Dunjy Krawl
//!
//! A tile-based roguelike-lite: procedurally generated dungeons, a player
//! character, wandering enemies, melee and ranged combat, and level progression.
//!
//! ## Architecture Overview
//!
//! The crate is built around a single owned simulation context,
//! [`GameState`], which is advanced once per frame:
//!
//! - **Grid Model**: the tile matrix and coordinate validity rules
//! - **Dungeon Generator**: room-and-corridor level generation
//! - **Entity Registry**: player, enemies, projectiles and the swing marker
//! - **Motion & Timing Gate**: independent update cadences per entity group
//! - **Combat Resolver**: swings, shots, projectile hits and contact damage
//! - **Game State Machine**: start, running and game-over states plus progression
//!
//! Rendering and hardware input live in [`rendering`] and [`input`]. They only
//! read [`Snapshot`]s and write [`InputState`]; the simulation never calls them.

pub mod game;
pub mod generation;
pub mod input;
pub mod rendering;
pub mod utils;

// Core module re-exports
pub use game::*;
pub use generation::*;
pub use input::*;
pub use rendering::*;
pub use utils::*;

/// Core error type for the Dunjy Krawl engine.
#[derive(thiserror::Error, Debug)]
pub enum KrawlError {
    /// I/O operation failed
    #[error("I/O error: {0}")]
    Io(#[from] std::io::Error),

    /// Serialization/deserialization error
    #[error("Serialization error: {0}")]
    Serde(#[from] serde_json::Error),

    /// Configuration values are unusable
    #[error("Invalid configuration: {0}")]
    InvalidConfig(String),

    /// A tile write targeted a coordinate outside the grid
    #[error("Position ({x}, {y}) is outside the grid")]
    InvalidPosition { x: i32, y: i32 },

    /// Game state is invalid
    #[error("Invalid game state: {0}")]
    InvalidState(String),

    /// Generation failed
    #[error("Generation failed: {0}")]
    GenerationFailed(String),
}

/// Result type used throughout the Dunjy Krawl codebase.
pub type KrawlResult<T> = Result<T, KrawlError>;

/// Version information for the game.
pub const VERSION: &str = env!("CARGO_PKG_VERSION");

/// Game configuration constants.
pub mod config {
    /// Edge length of one tile in pixels
    pub const TILE_SIZE: u32 = 32;

    /// Viewport width in pixels
    pub const VIEWPORT_WIDTH: u32 = 800;

    /// Viewport height in pixels
    pub const VIEWPORT_HEIGHT: u32 = 600;

    /// Default dungeon width in tiles
    pub const DEFAULT_DUNGEON_WIDTH: u32 = VIEWPORT_WIDTH / TILE_SIZE;

    /// Default dungeon height in tiles
    pub const DEFAULT_DUNGEON_HEIGHT: u32 = VIEWPORT_HEIGHT / TILE_SIZE;

    /// Room placement attempts per level
    pub const MAX_ROOMS: u32 = 8;

    /// Smallest room edge in tiles
    pub const MIN_ROOM_SIZE: u32 = 4;

    /// Largest room edge in tiles
    pub const MAX_ROOM_SIZE: u32 = 8;

    /// Upper bound on either grid dimension accepted from a configuration
    pub const MAX_GRID_DIMENSION: u32 = 1024;

    /// Upper bound on each enemy-count term accepted from a configuration
    pub const MAX_ENEMIES_PER_TERM: u32 = 1024;

    /// Enemies on level 1 at difficulty 1
    pub const BASE_ENEMIES: u32 = 2;

    /// Default player starting health
    pub const DEFAULT_PLAYER_HEALTH: u32 = 3;

    /// Ranged ammo granted at the start of every level
    pub const STARTING_AMMO: u32 = 5;

    /// Levels per difficulty tier
    pub const MAX_LEVEL: u32 = 5;

    /// Ticks a swing marker stays visible
    pub const SWING_DURATION_TICKS: u32 = 10;

    /// Minimum milliseconds between player steps
    pub const PLAYER_MOVE_INTERVAL_MS: u64 = 120;

    /// Minimum milliseconds between enemy steps
    pub const ENEMY_MOVE_INTERVAL_MS: u64 = 450;

    /// Minimum milliseconds between projectile steps
    pub const PROJECTILE_MOVE_INTERVAL_MS: u64 = 60;
}
