//! Player abilities triggered by discrete input events
//!
//! Each trigger checks the score (and any other precondition) first; a refused
//! activation leaves the world and score untouched.

use super::state::{AreaEffect, Beam, Shield, World};
use super::tick::{TickInput, TickRules};
use crate::consts::*;

/// Spread offsets in degrees for a multi-shot fan: -50, -50+step, ..., <= 50
pub fn fan_offsets(step_deg: i32) -> Vec<i32> {
    let step = step_deg.max(1) as usize;
    (-FAN_HALF_ANGLE_DEG..=FAN_HALF_ANGLE_DEG)
        .step_by(step)
        .collect()
}

/// Fire one beam along the facing, or a fan when `multi_shot` is held
pub fn fire(world: &mut World, multi_shot: bool, step_deg: i32) {
    if multi_shot {
        let offsets = fan_offsets(step_deg);
        log::debug!("tick {}: multi-shot fan of {} beams", world.tick, offsets.len());
        for offset in offsets {
            world.beams.push(Beam::new(&world.player, offset as f32));
        }
    } else {
        world.beams.push(Beam::new(&world.player, 0.0));
    }
}

/// Hyper mode: needs more than 100 points
pub fn trigger_hyper(world: &mut World) -> bool {
    if world.score <= HYPER_COST {
        log::debug!("Hyper refused (score {})", world.score);
        return false;
    }
    world.score -= HYPER_COST;
    world.player.enter_hyper();
    log::info!("Hyper mode for {} ticks (score {})", HYPER_TICKS, world.score);
    true
}

/// EMP: disables every live enemy and bomb, once per session
pub fn trigger_emp(world: &mut World) -> bool {
    if world.emp_active {
        return false;
    }
    world.emp_active = true;
    for enemy in &mut world.enemies {
        enemy.disable();
    }
    for bomb in &mut world.bombs {
        bomb.disable();
    }
    world.flash_ticks = EMP_FLASH_TICKS;
    log::info!(
        "EMP: {} enemies and {} bombs disabled",
        world.enemies.len(),
        world.bombs.len()
    );
    true
}

/// Gravity well: costs 200 points
pub fn trigger_gravity(world: &mut World) -> bool {
    if !world.spend(GRAVITY_COST) {
        log::debug!("Gravity well refused (score {})", world.score);
        return false;
    }
    world.gravity_wells.push(AreaEffect::new(GRAVITY_LIFE));
    log::info!("Gravity well for {} ticks (score {})", GRAVITY_LIFE, world.score);
    true
}

/// Shield: costs 50 points and only one may exist
pub fn trigger_shield(world: &mut World) -> bool {
    if world.shield.is_some() || !world.spend(SHIELD_COST) {
        log::debug!(
            "Shield refused (score {}, shield up: {})",
            world.score,
            world.shield.is_some()
        );
        return false;
    }
    world.shield = Some(Shield::new(&world.player));
    log::info!("Shield raised facing {:?} (score {})", world.player.facing, world.score);
    true
}

/// Apply every triggered ability for this tick in a fixed order
pub fn apply_abilities(world: &mut World, input: &TickInput, rules: &TickRules) {
    if input.hyper {
        trigger_hyper(world);
    }
    if input.fire {
        fire(world, input.multi_shot, rules.multi_shot_step_deg);
    }
    if input.emp {
        trigger_emp(world);
    }
    if input.gravity {
        trigger_gravity(world);
    }
    if input.shield {
        trigger_shield(world);
    }
}
