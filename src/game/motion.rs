//! # Motion
//!
//! Player and enemy movement. Every step is checked against the grid before
//! it is applied; rejected steps leave the entity where it was.

use crate::game::{Direction, Enemy, Entity, GameEvent, Grid, Player};
use crate::input::HeldDirections;
use crate::utils::RandomSource;

/// Moves an entity one tile if the destination is walkable.
pub fn try_step<E: Entity>(entity: &mut E, direction: Direction, grid: &Grid) -> bool {
    let destination = entity.position() + direction.to_delta();
    if grid.is_walkable(destination) {
        entity.set_position(destination);
        true
    } else {
        false
    }
}

/// Applies held movement input to the player.
///
/// Directions are taken in the fixed North, South, West, East order, each as
/// its own single-tile step, so two perpendicular keys give a diagonal move
/// when both steps are open. The player ends up facing the last direction
/// processed even if that step was blocked.
pub fn move_player(player: &mut Player, held: HeldDirections, grid: &Grid) -> Option<GameEvent> {
    let from = player.position;
    for direction in held.iter() {
        try_step(player, direction, grid);
        player.facing = direction;
    }

    (player.position != from).then(|| GameEvent::PlayerMoved {
        from,
        to: player.position,
    })
}

/// Moves every enemy one random cardinal step, skipping blocked rolls.
/// Returns how many enemies actually moved.
pub fn move_enemies(enemies: &mut [Enemy], grid: &Grid, rng: &mut dyn RandomSource) -> usize {
    let directions = Direction::cardinal();
    let mut moved = 0;
    for enemy in enemies.iter_mut() {
        let roll = rng.uniform_int(0, directions.len() as i32 - 1);
        let direction = directions[roll as usize];
        if try_step(enemy, direction, grid) {
            moved += 1;
        }
    }
    moved
}
