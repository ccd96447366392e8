//! Collision and scoring resolution
//!
//! Runs once per tick in a fixed order. Each step collects the entities it
//! claims, then commits the removals before the next step looks at the world,
//! so an entity consumed early is invisible to every later step:
//! 1. Enemy x Beam
//! 2. Bomb x Beam
//! 3. Bomb x Player (may end the run)
//! 4. Shield x Bomb
//! 5. Gravity well x Bomb
//! 6. Gravity well x Enemy

use serde::{Deserialize, Serialize};

use super::bounds::Aabb;
use super::state::{Expression, Explosion, RunState, World};
use crate::consts::*;

/// What happened during one resolution pass
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct CollisionReport {
    pub enemies_shot: u32,
    pub bombs_shot: u32,
    /// Bombs that hit the player in hyper mode
    pub bombs_absorbed: u32,
    pub shield_blocked: u32,
    pub bombs_crushed: u32,
    pub enemies_crushed: u32,
    /// The player was hit outside hyper mode
    pub player_defeated: bool,
}

/// For every `target`, claim all still-unclaimed `hitters` overlapping it
///
/// A hitter is consumed by the first target that claims it. Returns the
/// per-target hit mask and the per-hitter claimed mask.
fn claim_overlaps(targets: &[Aabb], hitters: &[Aabb]) -> (Vec<bool>, Vec<bool>) {
    let mut target_hit = vec![false; targets.len()];
    let mut claimed = vec![false; hitters.len()];
    for (t, target) in targets.iter().enumerate() {
        for (h, hitter) in hitters.iter().enumerate() {
            if !claimed[h] && target.overlaps(hitter) {
                claimed[h] = true;
                target_hit[t] = true;
            }
        }
    }
    (target_hit, claimed)
}

/// Mask of `items` overlapping a single `area`
fn overlapping(area: &Aabb, items: &[Aabb]) -> Vec<bool> {
    items.iter().map(|rect| area.overlaps(rect)).collect()
}

/// Drop every item whose mask entry is set
fn remove_marked<T>(items: &mut Vec<T>, marks: &[bool]) {
    let mut idx = 0;
    items.retain(|_| {
        let keep = !marks[idx];
        idx += 1;
        keep
    });
}

/// Resolve all collisions for this tick, mutating the world and score
pub fn resolve_collisions(world: &mut World) -> CollisionReport {
    let mut report = CollisionReport::default();

    // --- 1. Enemy x Beam ---
    let enemy_rects: Vec<_> = world.enemies.iter().map(|e| e.rect()).collect();
    let beam_rects: Vec<_> = world.beams.iter().map(|b| b.rect()).collect();
    let (enemy_hit, beams_used) = claim_overlaps(&enemy_rects, &beam_rects);
    for (enemy, _) in world.enemies.iter().zip(&enemy_hit).filter(|(_, hit)| **hit) {
        world
            .explosions
            .push(Explosion::new(enemy.pos, EXPLOSION_ENEMY_LIFE));
        world.score += ENEMY_KILL_SCORE;
        world.player.expression = Expression::Elated;
        report.enemies_shot += 1;
    }
    remove_marked(&mut world.enemies, &enemy_hit);
    remove_marked(&mut world.beams, &beams_used);

    // --- 2. Bomb x Beam ---
    let bomb_rects: Vec<_> = world.bombs.iter().map(|b| b.rect()).collect();
    let beam_rects: Vec<_> = world.beams.iter().map(|b| b.rect()).collect();
    let (bomb_hit, beams_used) = claim_overlaps(&bomb_rects, &beam_rects);
    for (bomb, _) in world.bombs.iter().zip(&bomb_hit).filter(|(_, hit)| **hit) {
        world
            .explosions
            .push(Explosion::new(bomb.pos, EXPLOSION_SMALL_LIFE));
        world.score += BOMB_KILL_SCORE;
        report.bombs_shot += 1;
    }
    remove_marked(&mut world.bombs, &bomb_hit);
    remove_marked(&mut world.beams, &beams_used);

    // --- 3. Bomb x Player ---
    let bomb_rects: Vec<_> = world.bombs.iter().map(|b| b.rect()).collect();
    let hits = overlapping(&world.player.rect(), &bomb_rects);
    let hit_count = hits.iter().filter(|h| **h).count() as u32;
    remove_marked(&mut world.bombs, &hits);
    if hit_count > 0 {
        if world.player.is_hyper() {
            world.score += hit_count * BOMB_KILL_SCORE;
            report.bombs_absorbed = hit_count;
        } else {
            world.player.expression = Expression::Defeated;
            world.run_state = RunState::Terminated;
            report.player_defeated = true;
            log::info!("Player hit at tick {} (score {})", world.tick, world.score);
            return report;
        }
    }

    // --- 4. Shield x Bomb ---
    if let Some(shield_rect) = world.shield.as_ref().map(|s| s.rect()) {
        let bomb_rects: Vec<_> = world.bombs.iter().map(|b| b.rect()).collect();
        let hits = overlapping(&shield_rect, &bomb_rects);
        let blocked = hits.iter().filter(|h| **h).count() as u32;
        if blocked > 0 {
            remove_marked(&mut world.bombs, &hits);
            world
                .explosions
                .push(Explosion::new(shield_rect.center, EXPLOSION_SMALL_LIFE));
            world.shield = None;
            report.shield_blocked = blocked;
        }
    }

    // --- 5. Gravity well x Bomb ---
    for well_rect in world.gravity_wells.iter().map(|w| w.rect()).collect::<Vec<_>>() {
        let bomb_rects: Vec<_> = world.bombs.iter().map(|b| b.rect()).collect();
        let hits = overlapping(&well_rect, &bomb_rects);
        for (bomb, _) in world.bombs.iter().zip(&hits).filter(|(_, hit)| **hit) {
            world
                .explosions
                .push(Explosion::new(bomb.pos, EXPLOSION_SMALL_LIFE));
            world.player.expression = Expression::Elated;
            report.bombs_crushed += 1;
        }
        remove_marked(&mut world.bombs, &hits);
    }

    // --- 6. Gravity well x Enemy ---
    for well_rect in world.gravity_wells.iter().map(|w| w.rect()).collect::<Vec<_>>() {
        let enemy_rects: Vec<_> = world.enemies.iter().map(|e| e.rect()).collect();
        let hits = overlapping(&well_rect, &enemy_rects);
        for (enemy, _) in world.enemies.iter().zip(&hits).filter(|(_, hit)| **hit) {
            world
                .explosions
                .push(Explosion::new(enemy.pos, EXPLOSION_SMALL_LIFE));
            world.player.expression = Expression::Elated;
            report.enemies_crushed += 1;
        }
        remove_marked(&mut world.enemies, &hits);
    }

    report
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::sim::state::{AreaEffect, Beam, Bomb, Enemy, EnemyPhase, Player, Shield};
    use glam::Vec2;
    use proptest::prelude::*;

    fn enemy_at(pos: Vec2) -> Enemy {
        let mut enemy = Enemy::new(pos.x, 100.0, 60, 0);
        enemy.pos = pos;
        enemy.vel = Vec2::ZERO;
        enemy.phase = EnemyPhase::Stopped;
        enemy
    }

    fn beam_at(pos: Vec2) -> Beam {
        let mut beam = Beam::new(&Player::default(), 0.0);
        beam.pos = pos;
        beam
    }

    fn bomb_at(pos: Vec2, radius: f32) -> Bomb {
        let mut bomb = Bomb::new(&enemy_at(Vec2::new(100.0, 100.0)), &Player::default(), radius, 0);
        bomb.pos = pos;
        bomb
    }

    #[test]
    fn test_enemy_beam_removes_both_and_scores() {
        let mut world = World::new();
        world.enemies.push(enemy_at(Vec2::new(300.0, 200.0)));
        world.enemies.push(enemy_at(Vec2::new(600.0, 200.0)));
        world.beams.push(beam_at(Vec2::new(305.0, 200.0)));

        let report = resolve_collisions(&mut world);
        assert_eq!(report.enemies_shot, 1);
        assert_eq!(world.score, 10);
        assert_eq!(world.enemies.len(), 1);
        assert_eq!(world.enemies[0].pos.x, 600.0);
        assert!(world.beams.is_empty());
        assert_eq!(world.explosions.len(), 1);
        assert_eq!(world.explosions[0].life, EXPLOSION_ENEMY_LIFE);
        assert_eq!(world.explosions[0].pos, Vec2::new(300.0, 200.0));
        assert_eq!(world.player.expression, Expression::Elated);
    }

    #[test]
    fn test_many_beams_one_enemy_scores_once() {
        let mut world = World::new();
        world.enemies.push(enemy_at(Vec2::new(300.0, 200.0)));
        for dx in [-10.0, 0.0, 10.0] {
            world.beams.push(beam_at(Vec2::new(300.0 + dx, 200.0)));
        }
        let report = resolve_collisions(&mut world);
        assert_eq!(report.enemies_shot, 1);
        assert_eq!(world.score, 10);
        assert!(world.beams.is_empty());
        assert_eq!(world.explosions.len(), 1);
    }

    #[test]
    fn test_beam_consumed_by_first_enemy_only() {
        // Two overlapping enemies, one beam: only one kill
        let mut world = World::new();
        world.enemies.push(enemy_at(Vec2::new(300.0, 200.0)));
        world.enemies.push(enemy_at(Vec2::new(320.0, 200.0)));
        world.beams.push(beam_at(Vec2::new(310.0, 200.0)));
        let report = resolve_collisions(&mut world);
        assert_eq!(report.enemies_shot, 1);
        assert_eq!(world.enemies.len(), 1);
        assert_eq!(world.enemies[0].pos.x, 320.0);
    }

    #[test]
    fn test_beam_spent_on_enemy_cannot_hit_bomb() {
        let mut world = World::new();
        world.enemies.push(enemy_at(Vec2::new(300.0, 200.0)));
        world.bombs.push(bomb_at(Vec2::new(300.0, 210.0), 15.0));
        world.beams.push(beam_at(Vec2::new(300.0, 205.0)));
        let report = resolve_collisions(&mut world);
        assert_eq!(report.enemies_shot, 1);
        assert_eq!(report.bombs_shot, 0);
        assert_eq!(world.bombs.len(), 1);
        assert_eq!(world.score, 10);
    }

    #[test]
    fn test_bomb_beam() {
        let mut world = World::new();
        world.bombs.push(bomb_at(Vec2::new(500.0, 300.0), 20.0));
        world.beams.push(beam_at(Vec2::new(510.0, 300.0)));
        let report = resolve_collisions(&mut world);
        assert_eq!(report.bombs_shot, 1);
        assert_eq!(world.score, 1);
        assert!(world.bombs.is_empty() && world.beams.is_empty());
        assert_eq!(world.explosions[0].life, EXPLOSION_SMALL_LIFE);
        // Shooting bombs does not cheer the player up
        assert_eq!(world.player.expression, Expression::Normal);
    }

    #[test]
    fn test_bomb_hits_normal_player_ends_run() {
        let mut world = World::new();
        world.score = 30;
        world.bombs.push(bomb_at(world.player.pos, 10.0));
        world.gravity_wells.push(AreaEffect::new(100));
        world.enemies.push(enemy_at(Vec2::new(300.0, 200.0)));
        let report = resolve_collisions(&mut world);
        assert!(report.player_defeated);
        assert_eq!(world.run_state, RunState::Terminated);
        assert_eq!(world.player.expression, Expression::Defeated);
        assert_eq!(world.score, 30);
        assert!(world.bombs.is_empty());
        // Later steps never ran
        assert_eq!(world.enemies.len(), 1);
        assert_eq!(report.enemies_crushed, 0);
    }

    #[test]
    fn test_hyper_player_absorbs_three_bombs() {
        let mut world = World::new();
        world.player.enter_hyper();
        assert_eq!(world.player.hyper_ticks, 500);
        let p = world.player.pos;
        for dx in [-10.0, 0.0, 10.0] {
            world.bombs.push(bomb_at(p + Vec2::new(dx, 0.0), 12.0));
        }
        let report = resolve_collisions(&mut world);
        assert_eq!(report.bombs_absorbed, 3);
        assert!(world.bombs.is_empty());
        assert_eq!(world.score, 3);
        assert!(world.is_running());
        assert_eq!(world.player.hyper_ticks, 500);
    }

    #[test]
    fn test_shield_blocks_bombs() {
        let mut world = World::new();
        world.player.pos = Vec2::new(500.0, 400.0);
        let shield = Shield::new(&world.player);
        let shield_pos = shield.pos;
        world.shield = Some(shield);
        world.bombs.push(bomb_at(shield_pos + Vec2::new(0.0, 20.0), 10.0));
        world.bombs.push(bomb_at(shield_pos - Vec2::new(0.0, 20.0), 10.0));
        world.bombs.push(bomb_at(Vec2::new(100.0, 100.0), 10.0));

        let report = resolve_collisions(&mut world);
        assert_eq!(report.shield_blocked, 2);
        assert!(world.shield.is_none());
        assert_eq!(world.bombs.len(), 1);
        assert_eq!(world.explosions.len(), 1);
        assert_eq!(world.explosions[0].pos, shield_pos);
        assert_eq!(world.score, 0);
    }

    #[test]
    fn test_shield_without_contact_survives() {
        let mut world = World::new();
        world.shield = Some(Shield::new(&world.player));
        world.bombs.push(bomb_at(Vec2::new(100.0, 100.0), 10.0));
        resolve_collisions(&mut world);
        assert!(world.shield.is_some());
        assert_eq!(world.bombs.len(), 1);
    }

    #[test]
    fn test_gravity_well_crushes_everything_without_score() {
        let mut world = World::new();
        world.gravity_wells.push(AreaEffect::new(400));
        world.bombs.push(bomb_at(Vec2::new(100.0, 300.0), 10.0));
        world.bombs.push(bomb_at(Vec2::new(200.0, 300.0), 10.0));
        world.enemies.push(enemy_at(Vec2::new(300.0, 0.0))); // half above the field
        world.enemies.push(enemy_at(Vec2::new(700.0, 200.0)));

        let report = resolve_collisions(&mut world);
        assert_eq!(report.bombs_crushed, 2);
        assert_eq!(report.enemies_crushed, 2);
        assert!(world.bombs.is_empty() && world.enemies.is_empty());
        assert_eq!(world.explosions.len(), 4);
        assert!(world.explosions.iter().all(|e| e.life == EXPLOSION_SMALL_LIFE));
        assert_eq!(world.score, 0);
        assert_eq!(world.player.expression, Expression::Elated);
        assert_eq!(world.gravity_wells.len(), 1);
    }

    #[test]
    fn test_beam_kill_scores_before_gravity_well() {
        let mut world = World::new();
        world.gravity_wells.push(AreaEffect::new(400));
        world.enemies.push(enemy_at(Vec2::new(300.0, 200.0)));
        world.beams.push(beam_at(Vec2::new(300.0, 200.0)));
        let report = resolve_collisions(&mut world);
        assert_eq!(report.enemies_shot, 1);
        assert_eq!(report.enemies_crushed, 0);
        assert_eq!(world.score, 10);
    }

    proptest! {
        #[test]
        fn prop_each_enemy_scores_at_most_once(
            enemies in prop::collection::vec((50.0f32..1050.0, 50.0f32..600.0), 0..8),
            beams in prop::collection::vec((50.0f32..1050.0, 50.0f32..600.0), 0..24),
        ) {
            let mut world = World::new();
            world.player.pos = Vec2::new(-1000.0, -1000.0);
            world.enemies = enemies.iter().map(|&(x, y)| enemy_at(Vec2::new(x, y))).collect();
            world.beams = beams.iter().map(|&(x, y)| beam_at(Vec2::new(x, y))).collect();
            let enemies_before = world.enemies.len();
            let beams_before = world.beams.len();

            let report = resolve_collisions(&mut world);

            let killed = enemies_before - world.enemies.len();
            prop_assert_eq!(killed as u32, report.enemies_shot);
            prop_assert_eq!(world.score, report.enemies_shot * ENEMY_KILL_SCORE);
            // Every kill spends at least one beam
            prop_assert!(beams_before - world.beams.len() >= killed);
            // Survivors overlap no surviving beam
            for enemy in &world.enemies {
                for beam in &world.beams {
                    prop_assert!(!enemy.rect().overlaps(&beam.rect()));
                }
            }
        }
    }
}
