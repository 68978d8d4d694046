//! # Input Module
//!
//! Input state consumed by the simulation, and the macroquad handler that
//! fills it from the keyboard and mouse.
//!
//! The simulation never reads hardware. Each frame the host writes the set of
//! held movement keys, queues discrete actions (already edge-detected, so a
//! held key fires once) and updates the aim tile.

use crate::game::{Direction, Position};
use macroquad::prelude::*;
use serde::{Deserialize, Serialize};
use std::collections::VecDeque;

/// Discrete player actions.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum Action {
    /// Melee swing at the tile in front of the player
    Melee,
    /// Fire a projectile towards the aim tile
    Fire,
    /// Start a new run from the start screen
    Begin,
    /// Leave the game-over screen
    Restart,
}

/// Set of held cardinal directions, stored as a bitmask.
///
/// # Examples
///
/// ```
/// use dunjy_krawl::{Direction, HeldDirections};
///
/// let mut held = HeldDirections::empty();
/// held.insert(Direction::East);
/// held.insert(Direction::North);
/// let order: Vec<_> = held.iter().collect();
/// assert_eq!(order, vec![Direction::North, Direction::East]);
/// ```
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct HeldDirections(u8);

impl HeldDirections {
    pub fn empty() -> Self {
        Self(0)
    }

    fn bit(direction: Direction) -> u8 {
        match direction {
            Direction::North => 0b0001,
            Direction::South => 0b0010,
            Direction::West => 0b0100,
            Direction::East => 0b1000,
            // Diagonals are never held; they map to no bit.
            _ => 0,
        }
    }

    pub fn insert(&mut self, direction: Direction) {
        self.0 |= Self::bit(direction);
    }

    pub fn remove(&mut self, direction: Direction) {
        self.0 &= !Self::bit(direction);
    }

    pub fn contains(&self, direction: Direction) -> bool {
        let bit = Self::bit(direction);
        bit != 0 && self.0 & bit == bit
    }

    pub fn is_empty(&self) -> bool {
        self.0 == 0
    }

    /// Held directions in evaluation order: North, South, West, East.
    pub fn iter(&self) -> impl Iterator<Item = Direction> + '_ {
        Direction::cardinal()
            .into_iter()
            .filter(move |direction| self.contains(*direction))
    }
}

impl FromIterator<Direction> for HeldDirections {
    fn from_iter<I: IntoIterator<Item = Direction>>(iter: I) -> Self {
        let mut held = Self::empty();
        for direction in iter {
            held.insert(direction);
        }
        held
    }
}

/// Everything the simulation reads from its input collaborator.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct InputState {
    held: HeldDirections,
    pending: VecDeque<Action>,
    aim: Position,
}

impl InputState {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn held(&self) -> HeldDirections {
        self.held
    }

    /// Replaces the held-direction set.
    pub fn set_held(&mut self, held: HeldDirections) {
        self.held = held;
    }

    pub fn press(&mut self, direction: Direction) {
        self.held.insert(direction);
    }

    pub fn release(&mut self, direction: Direction) {
        self.held.remove(direction);
    }

    /// Queues a discrete action for the next tick.
    pub fn push_action(&mut self, action: Action) {
        self.pending.push_back(action);
    }

    /// Takes every queued action in arrival order.
    pub fn drain_actions(&mut self) -> Vec<Action> {
        self.pending.drain(..).collect()
    }

    pub fn pending_actions(&self) -> usize {
        self.pending.len()
    }

    pub fn aim(&self) -> Position {
        self.aim
    }

    /// Sets the aim target in grid coordinates.
    pub fn set_aim(&mut self, aim: Position) {
        self.aim = aim;
    }
}

/// Input handler for the windowed host.
///
/// Reads macroquad's keyboard and mouse state and writes it into an
/// [`InputState`].
pub struct InputHandler {
    /// Tile edge in pixels, used to turn the mouse position into a tile
    pub tile_size: f32,
}

impl InputHandler {
    /// Creates a new input handler.
    ///
    /// # Examples
    ///
    /// ```
    /// use dunjy_krawl::InputHandler;
    ///
    /// let input_handler = InputHandler::new(32.0);
    /// assert_eq!(input_handler.tile_size, 32.0);
    /// ```
    pub fn new(tile_size: f32) -> Self {
        Self { tile_size }
    }

    /// Returns true when the player asked to close the game.
    pub fn quit_requested(&self) -> bool {
        is_key_pressed(KeyCode::Escape)
    }

    /// Copies this frame's keyboard and mouse state into `input`.
    pub fn poll(&self, input: &mut InputState) {
        input.set_held(self.held_directions());

        if is_key_pressed(KeyCode::Space) {
            input.push_action(Action::Melee);
        }
        if is_mouse_button_pressed(MouseButton::Left) || is_key_pressed(KeyCode::F) {
            input.push_action(Action::Fire);
        }
        if is_key_pressed(KeyCode::Enter) {
            input.push_action(Action::Begin);
        }
        if is_key_pressed(KeyCode::R) {
            input.push_action(Action::Restart);
        }

        let (mouse_x, mouse_y) = mouse_position();
        input.set_aim(self.pixel_to_tile(mouse_x, mouse_y));
    }

    fn held_directions(&self) -> HeldDirections {
        let mut held = HeldDirections::empty();
        if is_key_down(KeyCode::Up) || is_key_down(KeyCode::W) {
            held.insert(Direction::North);
        }
        if is_key_down(KeyCode::Down) || is_key_down(KeyCode::S) {
            held.insert(Direction::South);
        }
        if is_key_down(KeyCode::Left) || is_key_down(KeyCode::A) {
            held.insert(Direction::West);
        }
        if is_key_down(KeyCode::Right) || is_key_down(KeyCode::D) {
            held.insert(Direction::East);
        }
        held
    }

    /// Converts a pixel coordinate to the tile underneath it.
    pub fn pixel_to_tile(&self, x: f32, y: f32) -> Position {
        Position::new(
            (x / self.tile_size).floor() as i32,
            (y / self.tile_size).floor() as i32,
        )
    }
}
