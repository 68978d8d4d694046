//! # Combat Module
//!
//! Melee swings, ranged shots, projectile flight and player-enemy contact.
//! Every function mutates the [`EntityRegistry`] in place and reports what
//! happened as [`GameEvent`]s.

use crate::game::{
    Direction, EntityRegistry, GameEvent, Grid, KillCause, Position, Projectile, SwingEffect,
};

/// Swings at the tile in front of the player.
///
/// The first enemy on the target tile is slain. A swing marker is left on the
/// target whether or not anything was hit.
pub fn swing(registry: &mut EntityRegistry, duration: u32) -> Vec<GameEvent> {
    let target = registry.player.facing_tile();
    let mut events = vec![GameEvent::Swing { target }];

    if let Some(enemy) = registry.remove_enemy_at(target) {
        events.push(GameEvent::EnemySlain {
            enemy: enemy.id,
            position: target,
            cause: KillCause::Melee,
        });
    }

    registry.swing = Some(SwingEffect {
        target,
        remaining: duration,
    });
    events
}

/// Fires a projectile from the player towards `aim`.
///
/// Nothing happens when `ammo` is zero, when `aim` is the player's own tile,
/// or when the tile next to the player in the aim direction is not walkable.
/// An enemy already standing on that tile is slain on the spot and no
/// projectile is left in flight. A successful shot costs one ammo.
pub fn fire(
    registry: &mut EntityRegistry,
    grid: &Grid,
    aim: Position,
    ammo: &mut u32,
) -> Vec<GameEvent> {
    if *ammo == 0 {
        return Vec::new();
    }
    let origin = registry.player.position;
    let Some(direction) = Direction::towards(origin, aim) else {
        return Vec::new();
    };
    let spawn = origin + direction.to_delta();
    if !grid.is_walkable(spawn) {
        return Vec::new();
    }

    *ammo -= 1;
    let mut events = vec![GameEvent::ProjectileFired {
        position: spawn,
        direction,
        ammo_left: *ammo,
    }];

    match registry.remove_enemy_at(spawn) {
        Some(enemy) => events.push(GameEvent::EnemySlain {
            enemy: enemy.id,
            position: spawn,
            cause: KillCause::Projectile,
        }),
        None => registry.projectiles.push(Projectile::new(spawn, direction)),
    }
    events
}

/// Advances every projectile one step along its direction.
///
/// A projectile leaving the grid or entering a wall is destroyed. One that
/// enters an enemy's tile destroys itself and the first enemy found there.
pub fn step_projectiles(registry: &mut EntityRegistry, grid: &Grid) -> Vec<GameEvent> {
    let mut events = Vec::new();
    let mut in_flight = Vec::with_capacity(registry.projectiles.len());

    for mut projectile in std::mem::take(&mut registry.projectiles) {
        let next = projectile.next_position();
        if !grid.is_walkable(next) {
            events.push(GameEvent::ProjectileExpired { position: next });
            continue;
        }

        if let Some(enemy) = registry.remove_enemy_at(next) {
            events.push(GameEvent::EnemySlain {
                enemy: enemy.id,
                position: next,
                cause: KillCause::Projectile,
            });
            continue;
        }

        projectile.position = next;
        in_flight.push(projectile);
    }

    registry.projectiles = in_flight;
    events
}

/// Applies contact damage: every enemy sharing the player's tile deals one
/// point of damage and is removed.
pub fn resolve_contacts(registry: &mut EntityRegistry) -> Vec<GameEvent> {
    let position = registry.player.position;
    registry
        .remove_enemies_at(position)
        .into_iter()
        .map(|enemy| GameEvent::PlayerHit {
            enemy: enemy.id,
            hp_left: registry.player.take_damage(1),
        })
        .collect()
}
