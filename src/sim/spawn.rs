//! Enemy waves and bomb drops

use rand::Rng;

use super::state::{Bomb, Enemy, World};
use crate::consts::*;

/// Spawn one enemy on the top edge with random position, stop line and interval
pub fn spawn_enemy<R: Rng + ?Sized>(world: &mut World, rng: &mut R) {
    let x = rng.random_range(0..=FIELD_WIDTH as u32) as f32;
    let stop_y = rng.random_range(ENEMY_STOP_MIN as u32..=(FIELD_HEIGHT / 2.0) as u32) as f32;
    let interval = rng.random_range(ENEMY_INTERVAL_MIN..ENEMY_INTERVAL_MAX);
    let variant = rng.random_range(0..ENEMY_VARIANTS);

    log::debug!(
        "tick {}: enemy at x={} stops at y={} drops every {} ticks",
        world.tick,
        x,
        stop_y,
        interval
    );
    world.enemies.push(Enemy::new(x, stop_y, interval, variant));
}

/// Every stopped, armed enemy whose interval divides the global tick stages a bomb
///
/// Staged bombs stay with their enemy until `release_bombs`, so an enemy
/// destroyed later in the same tick never drops. Returns the number staged.
pub fn drop_bombs<R: Rng + ?Sized>(world: &mut World, rng: &mut R) -> usize {
    let mut staged = 0;
    for enemy in &mut world.enemies {
        if !enemy.drops_bomb_at(world.tick) {
            continue;
        }
        let radius = rng.random_range(BOMB_RADIUS_MIN as u32..=BOMB_RADIUS_MAX as u32) as f32;
        let color = rng.random_range(0..BOMB_COLORS);
        let bomb = Bomb::new(enemy, &world.player, radius, color);
        enemy.pending_bomb = Some(bomb);
        staged += 1;
    }
    staged
}

/// Move the bombs staged by surviving enemies into play, in enemy order
pub fn release_bombs(world: &mut World) -> usize {
    let before = world.bombs.len();
    for enemy in &mut world.enemies {
        if let Some(bomb) = enemy.pending_bomb.take() {
            world.bombs.push(bomb);
        }
    }
    let released = world.bombs.len() - before;
    if released > 0 {
        log::debug!("tick {}: {} bomb(s) dropped", world.tick, released);
    }
    released
}

/// Periodic spawning for the current tick; bombs are only staged here
pub fn run_spawner<R: Rng + ?Sized>(world: &mut World, rng: &mut R) {
    if world.tick % ENEMY_SPAWN_EVERY == 0 {
        spawn_enemy(world, rng);
    }
    drop_bombs(world, rng);
}
