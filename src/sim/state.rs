//! World state and entity kinematics
//!
//! Every entity kind owns its position and lifecycle state and exposes a
//! per-tick `update`. Removable entities return `false` from `update` when
//! they should leave their collection.

use glam::Vec2;
use serde::{Deserialize, Serialize};

use super::bounds::{Aabb, aim, in_bounds};
use super::tick::TickInput;
use crate::consts::*;
use crate::heading_to_vec;

/// One of the eight directions the player can face
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum Facing {
    Right,
    UpRight,
    Up,
    UpLeft,
    Left,
    DownLeft,
    Down,
    DownRight,
}

impl Facing {
    /// Facing for a summed key step; `None` for the neutral (0, 0) step
    pub fn from_step(dx: i8, dy: i8) -> Option<Self> {
        match (dx.signum(), dy.signum()) {
            (1, 0) => Some(Facing::Right),
            (1, -1) => Some(Facing::UpRight),
            (0, -1) => Some(Facing::Up),
            (-1, -1) => Some(Facing::UpLeft),
            (-1, 0) => Some(Facing::Left),
            (-1, 1) => Some(Facing::DownLeft),
            (0, 1) => Some(Facing::Down),
            (1, 1) => Some(Facing::DownRight),
            _ => None,
        }
    }

    /// Raw key step for this facing (components in -1..=1, y down)
    pub fn step(self) -> (i8, i8) {
        match self {
            Facing::Right => (1, 0),
            Facing::UpRight => (1, -1),
            Facing::Up => (0, -1),
            Facing::UpLeft => (-1, -1),
            Facing::Left => (-1, 0),
            Facing::DownLeft => (-1, 1),
            Facing::Down => (0, 1),
            Facing::DownRight => (1, 1),
        }
    }

    /// Heading in degrees (0 = right, 90 = up)
    pub fn degrees(self) -> f32 {
        match self {
            Facing::Right => 0.0,
            Facing::UpRight => 45.0,
            Facing::Up => 90.0,
            Facing::UpLeft => 135.0,
            Facing::Left => 180.0,
            Facing::DownLeft => -135.0,
            Facing::Down => -90.0,
            Facing::DownRight => -45.0,
        }
    }

    /// Unit vector for this facing
    pub fn unit(self) -> Vec2 {
        heading_to_vec(self.degrees())
    }
}

/// Player mode
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum PlayerMode {
    Normal,
    /// Bombs are absorbed instead of ending the run
    Hyper,
}

/// Which face the player sprite shows
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum Expression {
    Normal,
    /// Shown after a kill until the player next moves
    Elated,
    Defeated,
}

/// The player ("Kokaton")
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Player {
    pub pos: Vec2,
    pub facing: Facing,
    pub speed: f32,
    pub mode: PlayerMode,
    pub hyper_ticks: i32,
    pub expression: Expression,
}

impl Default for Player {
    fn default() -> Self {
        Self {
            pos: PLAYER_START,
            facing: Facing::Right,
            speed: PLAYER_SPEED,
            mode: PlayerMode::Normal,
            hyper_ticks: HYPER_TICKS,
            expression: Expression::Normal,
        }
    }
}

impl Player {
    pub fn rect(&self) -> Aabb {
        Aabb::new(self.pos, PLAYER_SIZE)
    }

    pub fn is_hyper(&self) -> bool {
        self.mode == PlayerMode::Hyper
    }

    /// Switch to hyper mode with a fresh countdown
    pub fn enter_hyper(&mut self) {
        self.mode = PlayerMode::Hyper;
        self.hyper_ticks = HYPER_TICKS;
    }

    /// Move by the held direction keys, then run the hyper countdown
    pub fn update(&mut self, input: &TickInput) {
        self.speed = if input.boost {
            PLAYER_BOOST_SPEED
        } else {
            PLAYER_SPEED
        };

        let (dx, dy) = input.movement();
        let delta = Vec2::new(dx as f32, dy as f32) * self.speed;
        self.pos += delta;
        if !in_bounds(&self.rect()) {
            self.pos -= delta;
        }

        if let Some(facing) = Facing::from_step(dx, dy) {
            self.facing = facing;
            self.expression = Expression::Normal;
        }

        if self.mode == PlayerMode::Hyper {
            self.hyper_ticks -= 1;
            if self.hyper_ticks < 0 {
                self.mode = PlayerMode::Normal;
                self.expression = Expression::Normal;
                log::info!("Hyper mode expired");
            }
        }
    }
}

/// Vertical state of an enemy
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum EnemyPhase {
    Descending,
    Stopped,
}

/// How often a stopped enemy drops bombs
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum BombInterval {
    /// Drop whenever the global tick is a multiple of this value
    Every(u32),
    Never,
}

/// A descending bomb dropper
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Enemy {
    pub pos: Vec2,
    pub vel: Vec2,
    pub stop_y: f32,
    pub phase: EnemyPhase,
    pub interval: BombInterval,
    pub can_attack: bool,
    /// Sprite variant (0..ENEMY_VARIANTS)
    pub variant: u8,
    /// Hit by an EMP (drawn distorted)
    pub disabled: bool,
    /// Bomb dropped this tick, released only if the enemy survives collisions
    pub pending_bomb: Option<Bomb>,
}

impl Enemy {
    /// New enemy centered on the top edge at `x`
    pub fn new(x: f32, stop_y: f32, interval: u32, variant: u8) -> Self {
        Self {
            pos: Vec2::new(x, 0.0),
            vel: Vec2::new(0.0, ENEMY_DESCENT_SPEED),
            stop_y,
            phase: EnemyPhase::Descending,
            interval: BombInterval::Every(interval.max(1)),
            can_attack: true,
            variant,
            disabled: false,
            pending_bomb: None,
        }
    }

    pub fn rect(&self) -> Aabb {
        Aabb::new(self.pos, ENEMY_SIZE)
    }

    pub fn update(&mut self) {
        self.pos += self.vel;
        match self.phase {
            EnemyPhase::Descending if self.pos.y >= self.stop_y => {
                self.vel = Vec2::ZERO;
                self.phase = EnemyPhase::Stopped;
            }
            EnemyPhase::Descending | EnemyPhase::Stopped => {}
        }
    }

    /// Whether this enemy drops a bomb on global tick `tick`
    ///
    /// The modulus runs against the global counter, not time since stopping.
    pub fn drops_bomb_at(&self, tick: u64) -> bool {
        if self.phase != EnemyPhase::Stopped || !self.can_attack {
            return false;
        }
        match self.interval {
            BombInterval::Every(n) => tick % u64::from(n) == 0,
            BombInterval::Never => false,
        }
    }

    /// EMP effect: never drop another bomb
    pub fn disable(&mut self) {
        self.interval = BombInterval::Never;
        self.disabled = true;
        self.pending_bomb = None;
    }
}

/// Bomb state
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum BombState {
    Active,
    /// EMP'd: decelerates every tick
    Inactive,
}

/// A bomb aimed at where the player was when it was dropped
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Bomb {
    pub pos: Vec2,
    dir: Vec2,
    pub speed: f32,
    pub radius: f32,
    /// Palette index (0..BOMB_COLORS)
    pub color: u8,
    pub state: BombState,
}

impl Bomb {
    /// Drop a bomb from `enemy`, aimed at the player's current center
    pub fn new(enemy: &Enemy, player: &Player, radius: f32, color: u8) -> Self {
        let dir = aim(&enemy.rect(), &player.rect());
        Self {
            pos: enemy.pos + Vec2::new(0.0, (ENEMY_SIZE.y / 2.0).floor()),
            dir,
            speed: BOMB_SPEED,
            radius,
            color,
            state: BombState::Active,
        }
    }

    pub fn rect(&self) -> Aabb {
        Aabb::new(self.pos, Vec2::splat(self.radius * 2.0))
    }

    /// Travel direction, fixed at construction
    pub fn direction(&self) -> Vec2 {
        self.dir
    }

    /// Returns false once the bomb has left the field
    pub fn update(&mut self) -> bool {
        self.pos += self.dir * self.speed;
        if !in_bounds(&self.rect()) {
            return false;
        }
        match self.state {
            BombState::Active => {}
            BombState::Inactive => self.speed *= BOMB_DECAY,
        }
        true
    }

    /// EMP effect: halve speed and start decelerating
    pub fn disable(&mut self) {
        self.speed /= 2.0;
        self.state = BombState::Inactive;
    }
}

/// A player projectile
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Beam {
    pub pos: Vec2,
    dir: Vec2,
    pub speed: f32,
    /// Travel heading in degrees (facing plus spread offset)
    pub heading: f32,
    /// Spread offset; the image itself only follows the facing
    pub offset: f32,
}

impl Beam {
    /// Fire from the player's facing rotated by `offset` degrees
    pub fn new(player: &Player, offset: f32) -> Self {
        let heading = player.facing.degrees() + offset;
        let dir = heading_to_vec(heading);
        Self {
            pos: player.pos + dir * PLAYER_SIZE,
            dir,
            speed: BEAM_SPEED,
            heading,
            offset,
        }
    }

    /// Rotation of the beam image: the facing angle, without the spread
    pub fn image_angle(&self) -> f32 {
        self.heading - self.offset
    }

    pub fn rect(&self) -> Aabb {
        Aabb::rotated(self.pos, BEAM_SIZE, self.image_angle())
    }

    pub fn direction(&self) -> Vec2 {
        self.dir
    }

    /// Returns false once the beam has left the field
    pub fn update(&mut self) -> bool {
        self.pos += self.dir * self.speed;
        in_bounds(&self.rect())
    }
}

/// Short-lived explosion visual
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Explosion {
    pub pos: Vec2,
    pub life: i32,
}

impl Explosion {
    pub fn new(pos: Vec2, life: i32) -> Self {
        Self { pos, life }
    }

    pub fn rect(&self) -> Aabb {
        Aabb::new(self.pos, EXPLOSION_SIZE)
    }

    /// Which of the two alternating images to show
    pub fn phase(&self) -> u8 {
        phase_for_life(self.life)
    }

    /// Returns false once life has gone negative
    pub fn update(&mut self) -> bool {
        self.life -= 1;
        self.life >= 0
    }
}

/// ⌊life / 10⌋ mod 2 with floor semantics for negative life
pub fn phase_for_life(life: i32) -> u8 {
    life.div_euclid(10).rem_euclid(2) as u8
}

/// A bomb-blocking wall placed in front of the player
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Shield {
    pub pos: Vec2,
    /// Orientation in degrees, fixed at creation
    pub heading: f32,
    pub size: Vec2,
    pub life: i32,
}

impl Shield {
    /// Place one body length ahead of the player's facing
    pub fn new(player: &Player) -> Self {
        let (fx, fy) = player.facing.step();
        let offset = Vec2::new(fx as f32, fy as f32) * PLAYER_SIZE;
        Self {
            pos: player.pos + offset,
            heading: player.facing.degrees(),
            size: Vec2::new(SHIELD_THICKNESS, PLAYER_SIZE.y * 2.0),
            life: SHIELD_LIFE,
        }
    }

    pub fn rect(&self) -> Aabb {
        Aabb::rotated(self.pos, self.size, self.heading)
    }

    /// Returns false once life reaches zero
    pub fn update(&mut self) -> bool {
        self.life -= 1;
        self.life > 0
    }
}

/// Full-field gravity well
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct AreaEffect {
    pub life: i32,
}

impl AreaEffect {
    pub fn new(life: i32) -> Self {
        Self { life }
    }

    pub fn rect(&self) -> Aabb {
        Aabb::field()
    }

    /// Returns false once life has gone negative
    pub fn update(&mut self) -> bool {
        self.life -= 1;
        self.life >= 0
    }
}

/// Whether the session is still being played
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum RunState {
    Running,
    /// Absorbing: the player was hit outside hyper mode
    Terminated,
}

/// Complete simulation state
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct World {
    /// Global tick counter
    pub tick: u64,
    pub score: u32,
    pub player: Player,
    pub enemies: Vec<Enemy>,
    pub bombs: Vec<Bomb>,
    pub beams: Vec<Beam>,
    pub explosions: Vec<Explosion>,
    /// At most one shield is alive
    pub shield: Option<Shield>,
    pub gravity_wells: Vec<AreaEffect>,
    /// EMP latch; once set, further triggers do nothing
    pub emp_active: bool,
    /// Remaining ticks of the EMP flash overlay
    pub flash_ticks: u32,
    pub run_state: RunState,
}

impl Default for World {
    fn default() -> Self {
        Self::new()
    }
}

impl World {
    pub fn new() -> Self {
        Self {
            tick: 0,
            score: 0,
            player: Player::default(),
            enemies: Vec::new(),
            bombs: Vec::new(),
            beams: Vec::new(),
            explosions: Vec::new(),
            shield: None,
            gravity_wells: Vec::new(),
            emp_active: false,
            flash_ticks: 0,
            run_state: RunState::Running,
        }
    }

    pub fn is_running(&self) -> bool {
        self.run_state == RunState::Running
    }

    /// Deduct `cost` if the score covers it
    pub fn spend(&mut self, cost: u32) -> bool {
        match self.score.checked_sub(cost) {
            Some(rest) => {
                self.score = rest;
                true
            }
            None => false,
        }
    }

    /// Run one kinematics step for every entity, dropping expired ones
    pub fn update_entities(&mut self, input: &TickInput) {
        self.player.update(input);
        self.beams.retain_mut(Beam::update);
        for enemy in &mut self.enemies {
            enemy.update();
        }
        self.bombs.retain_mut(Bomb::update);
        self.explosions.retain_mut(Explosion::update);
        self.gravity_wells.retain_mut(AreaEffect::update);
        if self.shield.as_mut().is_some_and(|s| !s.update()) {
            self.shield = None;
        }
    }
}
