//! Deterministic simulation module
//!
//! All gameplay logic lives here. This module must be pure and deterministic:
//! - Fixed timestep only
//! - Seeded RNG only
//! - Stable iteration order (insertion order of every collection)
//! - No rendering or platform dependencies

pub mod ability;
pub mod autopilot;
pub mod bounds;
pub mod collision;
pub mod spawn;
pub mod state;
pub mod tick;

pub use ability::{apply_abilities, fan_offsets};
pub use autopilot::autopilot_input;
pub use bounds::{Aabb, check_bound, in_bounds};
pub use collision::{CollisionReport, resolve_collisions};
pub use state::{
    AreaEffect, Beam, Bomb, BombInterval, BombState, Enemy, EnemyPhase, Explosion, Expression,
    Facing, Player, PlayerMode, RunState, Shield, World,
};
pub use tick::{TickInput, TickOutcome, TickRules, tick};
