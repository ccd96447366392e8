//! Frame snapshots and presenters
//!
//! The simulation never draws. Each tick the game loop captures a `Frame`
//! (plain, serializable data) and hands it to a `Presenter`.

pub mod headless;

pub use headless::HeadlessPresenter;

use glam::Vec2;
use serde::{Deserialize, Serialize};

use crate::consts::*;
use crate::sim::{BombState, Expression, Facing, RunState, World};

/// Colors for game elements
pub mod colors {
    /// Bomb palette, indexed by `Bomb::color`
    pub const BOMB_PALETTE: [[u8; 3]; 6] = [
        [255, 0, 0],
        [0, 255, 0],
        [0, 0, 255],
        [255, 255, 0],
        [255, 0, 255],
        [0, 255, 255],
    ];
}

/// RGB for a bomb palette index (wraps out-of-range indices)
pub fn bomb_rgb(index: u8) -> [u8; 3] {
    colors::BOMB_PALETTE[usize::from(index) % colors::BOMB_PALETTE.len()]
}

/// What a sprite is, with the visual state the presenter needs
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub enum SpriteKind {
    Player {
        facing: Facing,
        expression: Expression,
        /// Hyper mode
        distorted: bool,
    },
    Enemy {
        variant: u8,
        /// Hit by the EMP
        distorted: bool,
    },
    Bomb {
        rgb: [u8; 3],
        inactive: bool,
    },
    Beam,
    Explosion {
        /// Which of the two alternating images
        phase: u8,
    },
    Shield,
    GravityWell {
        life: i32,
    },
}

/// One drawable entity
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Sprite {
    pub kind: SpriteKind,
    pub center: Vec2,
    /// Unrotated image size
    pub size: Vec2,
    /// Rotation in degrees (counter-clockwise)
    pub angle_deg: f32,
}

impl Sprite {
    fn upright(kind: SpriteKind, center: Vec2, size: Vec2) -> Self {
        Self {
            kind,
            center,
            size,
            angle_deg: 0.0,
        }
    }
}

/// Everything needed to draw one tick
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Frame {
    pub tick: u64,
    pub score: u32,
    pub status: RunState,
    /// EMP flash overlay is showing
    pub flash: bool,
    /// Back to front
    pub sprites: Vec<Sprite>,
}

impl Frame {
    /// Snapshot the world in draw order
    pub fn capture(world: &World) -> Self {
        let mut sprites = Vec::with_capacity(
            1 + world.enemies.len()
                + world.bombs.len()
                + world.beams.len()
                + world.explosions.len()
                + world.gravity_wells.len()
                + 1,
        );

        let player = &world.player;
        sprites.push(Sprite::upright(
            SpriteKind::Player {
                facing: player.facing,
                expression: player.expression,
                distorted: player.is_hyper(),
            },
            player.pos,
            PLAYER_SIZE,
        ));

        for beam in &world.beams {
            sprites.push(Sprite {
                kind: SpriteKind::Beam,
                center: beam.pos,
                size: BEAM_SIZE,
                angle_deg: beam.image_angle(),
            });
        }

        for enemy in &world.enemies {
            sprites.push(Sprite::upright(
                SpriteKind::Enemy {
                    variant: enemy.variant,
                    distorted: enemy.disabled,
                },
                enemy.pos,
                ENEMY_SIZE,
            ));
        }

        for bomb in &world.bombs {
            sprites.push(Sprite::upright(
                SpriteKind::Bomb {
                    rgb: bomb_rgb(bomb.color),
                    inactive: bomb.state == BombState::Inactive,
                },
                bomb.pos,
                Vec2::splat(bomb.radius * 2.0),
            ));
        }

        for explosion in &world.explosions {
            sprites.push(Sprite::upright(
                SpriteKind::Explosion {
                    phase: explosion.phase(),
                },
                explosion.pos,
                EXPLOSION_SIZE,
            ));
        }

        if let Some(shield) = &world.shield {
            sprites.push(Sprite {
                kind: SpriteKind::Shield,
                center: shield.pos,
                size: shield.size,
                angle_deg: shield.heading,
            });
        }

        for well in &world.gravity_wells {
            let field = well.rect();
            sprites.push(Sprite::upright(
                SpriteKind::GravityWell { life: well.life },
                field.center,
                field.size,
            ));
        }

        Self {
            tick: world.tick,
            score: world.score,
            status: world.run_state,
            flash: world.flash_ticks > 0,
            sprites,
        }
    }

    /// Number of sprites matching `pred`
    pub fn count(&self, pred: impl Fn(&SpriteKind) -> bool) -> usize {
        self.sprites.iter().filter(|s| pred(&s.kind)).count()
    }
}

/// Receives one frame per tick
pub trait Presenter {
    fn present(&mut self, frame: &Frame);
}

/// Keeps every presented frame (for tests and replays)
#[derive(Debug, Default)]
pub struct RecordingPresenter {
    pub frames: Vec<Frame>,
}

impl Presenter for RecordingPresenter {
    fn present(&mut self, frame: &Frame) {
        self.frames.push(frame.clone());
    }
}
