//! # Entities Module
//!
//! The player, enemies, projectiles and swing marker, plus the registry that
//! owns them for the duration of a level.

use crate::game::{new_entity_id, Direction, EntityId, Position};
use serde::{Deserialize, Serialize};

/// Anything that occupies a tile and can be moved by the motion system.
pub trait Entity {
    /// Current tile.
    fn position(&self) -> Position;

    /// Moves the entity. Callers validate the destination first.
    fn set_position(&mut self, position: Position);
}

/// The player character.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Player {
    /// Current tile
    pub position: Position,
    /// Cardinal direction the player last moved or tried to move in
    pub facing: Direction,
    /// Remaining hit points, never below zero
    pub hp: u32,
}

impl Player {
    /// Creates a player at `position` facing south.
    pub fn new(position: Position, hp: u32) -> Self {
        Self {
            position,
            facing: Direction::South,
            hp,
        }
    }

    /// Tile directly in front of the player.
    pub fn facing_tile(&self) -> Position {
        self.position + self.facing.to_delta()
    }

    /// Returns true while the player has hit points left.
    pub fn is_alive(&self) -> bool {
        self.hp > 0
    }

    /// Removes hit points, saturating at zero. Returns the remaining total.
    pub fn take_damage(&mut self, amount: u32) -> u32 {
        self.hp = self.hp.saturating_sub(amount);
        self.hp
    }
}

impl Entity for Player {
    fn position(&self) -> Position {
        self.position
    }

    fn set_position(&mut self, position: Position) {
        self.position = position;
    }
}

/// A wandering enemy.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Enemy {
    pub id: EntityId,
    pub position: Position,
}

impl Enemy {
    pub fn new(position: Position) -> Self {
        Self {
            id: new_entity_id(),
            position,
        }
    }
}

impl Entity for Enemy {
    fn position(&self) -> Position {
        self.position
    }

    fn set_position(&mut self, position: Position) {
        self.position = position;
    }
}

/// A fired shot in flight.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Projectile {
    pub id: EntityId,
    pub position: Position,
    pub direction: Direction,
}

impl Projectile {
    pub fn new(position: Position, direction: Direction) -> Self {
        Self {
            id: new_entity_id(),
            position,
            direction,
        }
    }

    /// Tile the projectile will enter on its next step.
    pub fn next_position(&self) -> Position {
        self.position + self.direction.to_delta()
    }
}

/// Presentation marker left by a melee swing. Never consulted by game logic.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct SwingEffect {
    /// Tile the swing targeted
    pub target: Position,
    /// Ticks left before the marker disappears
    pub remaining: u32,
}

/// Mutable collections of everything living on the current level.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct EntityRegistry {
    pub player: Player,
    pub enemies: Vec<Enemy>,
    pub projectiles: Vec<Projectile>,
    pub swing: Option<SwingEffect>,
}

impl EntityRegistry {
    /// Populates a fresh level: one player and an enemy per spawn point.
    ///
    /// # Examples
    ///
    /// ```
    /// use dunjy_krawl::{EntityRegistry, Position};
    ///
    /// let registry = EntityRegistry::new(
    ///     Position::new(2, 2),
    ///     3,
    ///     &[Position::new(8, 4), Position::new(9, 9)],
    /// );
    /// assert_eq!(registry.enemies.len(), 2);
    /// assert!(registry.projectiles.is_empty());
    /// ```
    pub fn new(player_spawn: Position, player_hp: u32, enemy_spawns: &[Position]) -> Self {
        Self {
            player: Player::new(player_spawn, player_hp),
            enemies: enemy_spawns.iter().copied().map(Enemy::new).collect(),
            projectiles: Vec::new(),
            swing: None,
        }
    }

    /// Index of the first enemy standing on `pos`, in list order.
    pub fn enemy_index_at(&self, pos: Position) -> Option<usize> {
        self.enemies.iter().position(|enemy| enemy.position == pos)
    }

    /// Removes and returns the first enemy standing on `pos`.
    pub fn remove_enemy_at(&mut self, pos: Position) -> Option<Enemy> {
        self.enemy_index_at(pos).map(|index| self.enemies.remove(index))
    }

    /// Removes and returns every enemy standing on `pos`, preserving order.
    pub fn remove_enemies_at(&mut self, pos: Position) -> Vec<Enemy> {
        let mut removed = Vec::new();
        let mut kept = Vec::with_capacity(self.enemies.len());
        for enemy in self.enemies.drain(..) {
            if enemy.position == pos {
                removed.push(enemy);
            } else {
                kept.push(enemy);
            }
        }
        self.enemies = kept;
        removed
    }

    /// Counts down the swing marker, dropping it when it expires.
    pub fn tick_swing(&mut self) {
        if let Some(swing) = self.swing.as_mut() {
            swing.remaining = swing.remaining.saturating_sub(1);
            if swing.remaining == 0 {
                self.swing = None;
            }
        }
    }
}
