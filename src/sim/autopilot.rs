//! Demo driver: an AI that plays the game
//!
//! `autopilot_input` is a pure function of the world, so a seeded run driven
//! by it is fully reproducible.

use glam::Vec2;

use super::bounds::Aabb;
use super::state::{Bomb, BombState, Facing, World};
use super::tick::TickInput;
use crate::consts::*;

/// Bombs closer than this (center to center) are dodged
const DANGER_RADIUS: f32 = 160.0;
/// Raise the shield when a threat gets this close
const SHIELD_RADIUS: f32 = 120.0;
/// Burn score on hyper mode when a threat gets this close
const HYPER_RADIUS: f32 = 90.0;
/// Horizontal distance treated as "lined up" with the target
const ALIGN_TOLERANCE: f32 = PLAYER_SPEED;
/// Rest height while hunting
const HOME_Y: f32 = PLAYER_START.y;
const FIRE_EVERY: u64 = 10;
const FAN_EVERY: u64 = 50;
/// Field population that makes a gravity well worth its cost
const CROWD_SIZE: usize = 6;
/// Bomb count that triggers the one-shot EMP
const EMP_BOMB_COUNT: usize = 8;

/// Closest active bomb moving toward the player, with its distance
fn nearest_threat(world: &World) -> Option<(&Bomb, f32)> {
    let player = world.player.pos;
    world
        .bombs
        .iter()
        .filter(|b| b.state == BombState::Active)
        .filter(|b| b.direction().dot(player - b.pos) > 0.0)
        .map(|b| (b, b.pos.distance(player)))
        .filter(|(_, dist)| *dist < DANGER_RADIUS)
        .min_by(|a, b| a.1.partial_cmp(&b.1).unwrap_or(std::cmp::Ordering::Equal))
}

/// Sign of a component as a key step, ignoring small components
fn key_step(v: f32) -> i8 {
    if v > 0.3 {
        1
    } else if v < -0.3 {
        -1
    } else {
        0
    }
}

fn press(input: &mut TickInput, dx: i8, dy: i8) {
    input.left = dx < 0;
    input.right = dx > 0;
    input.up = dy < 0;
    input.down = dy > 0;
}

/// Sidestep perpendicular to the bomb's path, away from its line
fn dodge_step(world: &World, bomb: &Bomb) -> (i8, i8) {
    let dir = bomb.direction();
    let mut perp = Vec2::new(-dir.y, dir.x);
    let away = world.player.pos - bomb.pos;
    let side = perp.dot(away);
    if side < 0.0 || (side == 0.0 && perp.dot(Aabb::field().center - world.player.pos) < 0.0) {
        perp = -perp;
    }

    // Against a wall, go the other way
    let reach = world.player.pos + perp * (PLAYER_SIZE + Vec2::splat(PLAYER_BOOST_SPEED));
    if reach.x < 0.0 || reach.x > FIELD_WIDTH || reach.y < 0.0 || reach.y > FIELD_HEIGHT {
        perp = -perp;
    }
    (key_step(perp.x), key_step(perp.y))
}

/// Horizontal hunt of the enemy closest in x; faces up once lined up
fn hunt_step(world: &World) -> (i8, i8) {
    let player = world.player.pos;
    let target = world
        .enemies
        .iter()
        .min_by(|a, b| {
            let da = (a.pos.x - player.x).abs();
            let db = (b.pos.x - player.x).abs();
            da.partial_cmp(&db).unwrap_or(std::cmp::Ordering::Equal)
        })
        .map(|e| e.pos.x);

    let Some(target_x) = target else {
        return (0, 0);
    };

    let dx = target_x - player.x;
    if dx.abs() > ALIGN_TOLERANCE {
        let dy = if player.y < HOME_Y - 100.0 { 1 } else { 0 };
        return (dx.signum() as i8, dy);
    }
    if world.player.facing != Facing::Up || player.y >= HOME_Y {
        (0, -1)
    } else {
        (0, 0)
    }
}

/// Input the demo driver would press for the current world
pub fn autopilot_input(world: &World) -> TickInput {
    let mut input = TickInput::default();
    if !world.is_running() {
        return input;
    }

    match nearest_threat(world) {
        Some((bomb, dist)) => {
            let (dx, dy) = dodge_step(world, bomb);
            press(&mut input, dx, dy);
            input.boost = true;
            if dist < SHIELD_RADIUS && world.shield.is_none() && world.score >= SHIELD_COST {
                input.shield = true;
            }
            if dist < HYPER_RADIUS && !world.player.is_hyper() && world.score > HYPER_COST {
                input.hyper = true;
            }
        }
        None => {
            let (dx, dy) = hunt_step(world);
            press(&mut input, dx, dy);
        }
    }

    input.fire = world.tick % FIRE_EVERY == 0;
    input.multi_shot = world.tick % FAN_EVERY == 0;

    let crowd = world.enemies.len() + world.bombs.len();
    input.gravity =
        crowd >= CROWD_SIZE && world.gravity_wells.is_empty() && world.score >= GRAVITY_COST;
    input.emp = !world.emp_active && world.bombs.len() >= EMP_BOMB_COUNT;
    input
}
