//! Per-frame simulation tick
//!
//! Advances the world by one step. Movement and spawning are expressed per
//! tick, so their pace follows the display refresh rate; only the fire
//! cool-down is measured in elapsed seconds.

use super::collision::{find_hits, first_overlap};
use super::state::{GameOverCause, World};

/// Controls held during a single tick
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct TickInput {
    pub left: bool,
    pub right: bool,
    pub fire: bool,
}

/// Things that happened during a tick, in order
#[derive(Debug, Clone, Copy, PartialEq)]
pub enum GameEvent {
    ProjectileFired { id: u32 },
    EnemySpawned { id: u32 },
    /// A projectile destroyed an enemy; `score` is the new total
    EnemyDestroyed {
        projectile_id: u32,
        enemy_id: u32,
        score: u32,
    },
    GameOver(GameOverCause),
}

/// Advance the world by one tick
///
/// `dt` is the wall-clock time since the previous tick in seconds. Does
/// nothing unless the world is running. A terminal collision ends the tick
/// immediately, so nothing scores after the run is over.
pub fn tick(world: &mut World, input: &TickInput, dt: f32) -> Vec<GameEvent> {
    let mut events = Vec::new();
    if !world.is_running() {
        return events;
    }
    world.ticks += 1;

    // 1. Player movement, both bounds checked against the pre-move position
    let width = world.width();
    let player = &mut world.player;
    let x = player.pos.x;
    let (speed, half) = (player.speed, player.half_width());
    if input.left && x - speed - half >= 0.0 {
        player.pos.x -= speed;
    }
    if input.right && x + speed + half <= width {
        player.pos.x += speed;
    }

    // 2. Fire, debounced by a wall-clock cool-down
    player.fire_cooldown = (player.fire_cooldown - dt.max(0.0)).max(0.0);
    if input.fire && player.can_fire() {
        player.fire_cooldown = world.settings.fire_cooldown_secs;
        let id = world.spawn_projectile();
        log::trace!("Projectile {id} fired at x={:.1}", world.player.pos.x);
        events.push(GameEvent::ProjectileFired { id });
    }

    // 3. Projectiles climb; anything at or above the top edge is gone
    for projectile in &mut world.projectiles {
        projectile.pos.y -= projectile.speed;
    }
    world.projectiles.retain(|p| p.pos.y > 0.0);

    // 4. Random enemy spawn
    if world.roll_spawn() {
        let id = world.spawn_enemy();
        events.push(GameEvent::EnemySpawned { id });
    }

    // 5. Enemies descend; the first to reach the floor ends the run
    for enemy in &mut world.enemies {
        enemy.pos.y += enemy.speed;
    }
    let floor = world.height();
    if let Some(enemy_id) = world
        .enemies
        .iter()
        .find(|e| e.bottom() >= floor)
        .map(|e| e.id)
    {
        finish(world, GameOverCause::FloorBreach { enemy_id }, &mut events);
        return events;
    }

    // 6. Projectile vs enemy: match everything first, then remove by id
    let hits = find_hits(&world.projectiles, &world.enemies);
    if !hits.is_empty() {
        world
            .projectiles
            .retain(|p| !hits.iter().any(|h| h.projectile_id == p.id));
        world
            .enemies
            .retain(|e| !hits.iter().any(|h| h.enemy_id == e.id));

        for hit in hits {
            world.score += 1;
            log::debug!(
                "Enemy {} destroyed by projectile {} (score {})",
                hit.enemy_id,
                hit.projectile_id,
                world.score
            );
            events.push(GameEvent::EnemyDestroyed {
                projectile_id: hit.projectile_id,
                enemy_id: hit.enemy_id,
                score: world.score,
            });
        }
    }

    // 7. Enemy vs player
    let ship = world.player.bounds();
    if let Some(enemy_id) = first_overlap(&ship, &world.enemies).map(|e| e.id) {
        finish(world, GameOverCause::PlayerHit { enemy_id }, &mut events);
    }

    events
}

fn finish(world: &mut World, cause: GameOverCause, events: &mut Vec<GameEvent>) {
    if world.end_run(cause) {
        log::info!(
            "Run over after {} ticks: {:?}, score {}",
            world.ticks,
            cause,
            world.score
        );
        events.push(GameEvent::GameOver(cause));
    }
}
