//! Musou Kokaton - a fixed-tick arcade shoot-em-up
//!
//! Core modules:
//! - `sim`: Deterministic simulation (entities, spawning, collisions, abilities)
//! - `game`: Fixed-rate loop that drives the simulation and hands frames off
//! - `renderer`: Frame snapshots and presenters
//! - `platform`: Clock and input sources
//! - `settings`: Launch-time configuration

pub mod game;
pub mod platform;
pub mod renderer;
pub mod settings;
pub mod sim;

pub use game::{ExitReason, Game, GameExit};
pub use settings::{Settings, SettingsError};

use glam::Vec2;

/// Game configuration constants
pub mod consts {
    use glam::Vec2;

    /// Play field dimensions (y grows downward)
    pub const FIELD_WIDTH: f32 = 1100.0;
    pub const FIELD_HEIGHT: f32 = 650.0;

    /// Target tick rate (ticks per second)
    pub const TICK_RATE: u32 = 50;
    /// Pause after the defeat frame before the loop exits
    pub const DEFEAT_PAUSE_MS: u64 = 2000;

    /// Player defaults
    pub const PLAYER_START: Vec2 = Vec2::new(900.0, 400.0);
    pub const PLAYER_SIZE: Vec2 = Vec2::new(56.0, 52.0);
    pub const PLAYER_SPEED: f32 = 10.0;
    pub const PLAYER_BOOST_SPEED: f32 = 20.0;
    pub const HYPER_TICKS: i32 = 500;

    /// Enemy defaults
    pub const ENEMY_SIZE: Vec2 = Vec2::new(70.0, 60.0);
    pub const ENEMY_DESCENT_SPEED: f32 = 6.0;
    pub const ENEMY_SPAWN_EVERY: u64 = 200;
    pub const ENEMY_STOP_MIN: f32 = 50.0;
    pub const ENEMY_INTERVAL_MIN: u32 = 50;
    pub const ENEMY_INTERVAL_MAX: u32 = 300; // exclusive
    pub const ENEMY_VARIANTS: u8 = 3;

    /// Bomb defaults
    pub const BOMB_SPEED: f32 = 6.0;
    pub const BOMB_RADIUS_MIN: f32 = 10.0;
    pub const BOMB_RADIUS_MAX: f32 = 50.0;
    pub const BOMB_COLORS: u8 = 6;
    /// Per-tick speed factor for inactive bombs
    pub const BOMB_DECAY: f32 = 0.9;
    /// Below this enemy->player distance the bomb falls straight down
    pub const MIN_AIM_DISTANCE: f32 = 1e-3;

    /// Beam defaults
    pub const BEAM_SIZE: Vec2 = Vec2::new(40.0, 16.0);
    pub const BEAM_SPEED: f32 = 10.0;
    pub const FAN_HALF_ANGLE_DEG: i32 = 50;
    pub const MULTI_SHOT_STEP_DEG: i32 = 5;

    /// Explosion defaults
    pub const EXPLOSION_SIZE: Vec2 = Vec2::new(100.0, 100.0);
    pub const EXPLOSION_ENEMY_LIFE: i32 = 100;
    pub const EXPLOSION_SMALL_LIFE: i32 = 50;

    /// Shield defaults
    pub const SHIELD_THICKNESS: f32 = 20.0;
    pub const SHIELD_LIFE: i32 = 400;

    /// Gravity well defaults
    pub const GRAVITY_LIFE: i32 = 400;

    /// EMP flash overlay duration
    pub const EMP_FLASH_TICKS: u32 = 3;

    /// Ability costs and rewards
    pub const HYPER_COST: u32 = 100;
    pub const GRAVITY_COST: u32 = 200;
    pub const SHIELD_COST: u32 = 50;
    pub const ENEMY_KILL_SCORE: u32 = 10;
    pub const BOMB_KILL_SCORE: u32 = 1;
}

/// Unit vector for a heading in degrees (screen space: 0 = right, 90 = up)
#[inline]
pub fn heading_to_vec(degrees: f32) -> Vec2 {
    let rad = degrees.to_radians();
    Vec2::new(rad.cos(), -rad.sin())
}
