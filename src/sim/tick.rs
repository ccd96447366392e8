//! Fixed timestep simulation tick
//!
//! One call advances the world by exactly one tick:
//! abilities -> spawner -> kinematics -> collisions -> bomb release -> tick counter.
//!
//! Bombs picked by the spawner are held by their enemy until collisions are
//! resolved, so an enemy destroyed this tick never drops one.

use rand::Rng;
use serde::{Deserialize, Serialize};

use super::ability::apply_abilities;
use super::collision::{CollisionReport, resolve_collisions};
use super::spawn::{release_bombs, run_spawner};
use super::state::World;
use crate::consts::MULTI_SHOT_STEP_DEG;

/// Input snapshot for a single tick (deterministic)
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct TickInput {
    // Held keys
    pub up: bool,
    pub down: bool,
    pub left: bool,
    pub right: bool,
    /// Double movement speed
    pub boost: bool,
    /// Turns `fire` into a spread fan
    pub multi_shot: bool,

    // Key-down events this tick
    pub fire: bool,
    pub hyper: bool,
    pub emp: bool,
    pub gravity: bool,
    pub shield: bool,
    /// External quit signal
    pub quit: bool,
}

impl TickInput {
    /// Summed direction step of the held movement keys (y down)
    pub fn movement(&self) -> (i8, i8) {
        let dx = i8::from(self.right) - i8::from(self.left);
        let dy = i8::from(self.down) - i8::from(self.up);
        (dx, dy)
    }
}

/// Tunable rules that are not fixed constants
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct TickRules {
    /// Angular step between beams of a multi-shot fan
    pub multi_shot_step_deg: i32,
}

impl Default for TickRules {
    fn default() -> Self {
        Self {
            multi_shot_step_deg: MULTI_SHOT_STEP_DEG,
        }
    }
}

/// Result of advancing one tick
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum TickOutcome {
    /// Still playing; what the resolver did this tick
    Running(CollisionReport),
    /// The player was destroyed (also returned for every tick after that)
    Defeated,
    /// Quit signal seen; the world was left untouched
    Quit,
}

/// Advance the world by one fixed tick
pub fn tick<R: Rng + ?Sized>(
    world: &mut World,
    input: &TickInput,
    rules: &TickRules,
    rng: &mut R,
) -> TickOutcome {
    if !world.is_running() {
        return TickOutcome::Defeated;
    }
    if input.quit {
        return TickOutcome::Quit;
    }

    world.flash_ticks = world.flash_ticks.saturating_sub(1);

    apply_abilities(world, input, rules);
    run_spawner(world, rng);
    world.update_entities(input);

    let report = resolve_collisions(world);
    if report.player_defeated {
        return TickOutcome::Defeated;
    }
    release_bombs(world);

    world.tick += 1;
    TickOutcome::Running(report)
}
