//! Combat resolution
//!
//! Runs after every combatant has moved for the tick. Resolves the player's
//! melee swing, bullet and bomb collisions, and explosion area damage, and
//! removes spent projectiles. Per-combatant invulnerability windows live on
//! the combatants themselves; this module additionally enforces the
//! one-application-per-tick rules (one melee victim per swing, one bullet
//! damaging a given target per tick).

use super::combatant::Combatant;
use super::projectile::{Affiliation, Explosion};
use super::state::{GameEvent, WorldState};

/// Resolve melee, bullets, and bombs for this tick.
pub fn resolve(world: &mut WorldState) {
    let WorldState {
        player,
        enemies,
        boss,
        bullets,
        bombs,
        explosions,
        events,
        tuning,
        ..
    } = world;

    // Player melee: at most one victim per swing, nearest-in-list wins,
    // enemies before the boss.
    if !player.hit_registered {
        if let Some(zone) = player.attack_hitbox() {
            let mut landed = false;
            for enemy in enemies.iter_mut() {
                if !enemy.is_dead() && zone.overlaps(&enemy.hitbox) {
                    enemy.take_damage(tuning.player.melee_damage_enemy);
                    landed = true;
                    break;
                }
            }
            if !landed && boss.active && !boss.is_dead() && zone.overlaps(&boss.hitbox) {
                boss.take_damage(tuning.player.melee_damage_boss);
                landed = true;
            }
            if landed {
                player.hit_registered = true;
                events.push(GameEvent::HitLanded);
            }
        }
    }

    // Bullets. A target takes damage from at most one bullet per tick;
    // additional overlapping bullets are discarded without effect. A shield
    // absorbs enemy fire entirely.
    let mut player_hit = false;
    let mut boss_hit = false;
    let mut enemy_hit = vec![false; enemies.len()];
    for i in (0..bullets.len()).rev() {
        let bullet = &bullets[i];
        if bullet.out_of_bounds() {
            bullets.remove(i);
            continue;
        }
        match bullet.origin {
            Affiliation::EnemySide => {
                if !player.is_dead() && bullet.rect.overlaps(&player.hitbox) {
                    if !player.shielding && !player_hit {
                        player.take_damage(bullet.damage);
                        player_hit = true;
                    }
                    bullets.remove(i);
                }
            }
            Affiliation::PlayerSide => {
                let mut consumed = false;
                for (j, enemy) in enemies.iter_mut().enumerate() {
                    if !enemy.is_dead() && bullet.rect.overlaps(&enemy.hitbox) {
                        if !enemy_hit[j] {
                            enemy.take_damage(bullet.damage);
                            enemy_hit[j] = true;
                        }
                        consumed = true;
                        break;
                    }
                }
                if !consumed && boss.active && !boss.is_dead() && bullet.rect.overlaps(&boss.hitbox)
                {
                    if !boss_hit {
                        boss.take_damage(bullet.damage);
                        boss_hit = true;
                    }
                    consumed = true;
                }
                if consumed {
                    bullets.remove(i);
                }
            }
        }
    }

    // Bombs. Ground contact has already marked the bomb exploded during the
    // motion step; a shielded player catches a falling bomb and detonates it
    // in place, while an unshielded player takes contact damage and the bomb
    // keeps falling.
    for i in (0..bombs.len()).rev() {
        if bombs[i].exploded {
            let bomb = bombs.remove(i);
            explosions.push(Explosion::new(bomb.blast_center(), &tuning.bomb));
            events.push(GameEvent::BombExploded);
            continue;
        }
        if !player.is_dead() && bombs[i].rect.overlaps(&player.hitbox) {
            if player.shielding {
                let bomb = bombs.remove(i);
                explosions.push(Explosion::new(bomb.blast_center(), &tuning.bomb));
                events.push(GameEvent::BombExploded);
            } else {
                player.take_damage(tuning.bomb.contact_damage);
            }
        }
    }
}

/// Advance explosion lifetimes, apply their one-time area damage, and drop
/// expired ones. The damage check fires exactly once per explosion even when
/// a shield nullifies it.
pub fn update_explosions(world: &mut WorldState, dt: f32) {
    let WorldState {
        player,
        explosions,
        tuning,
        ..
    } = world;

    for explosion in explosions.iter_mut() {
        explosion.advance(dt);
        if !explosion.has_damaged && !player.is_dead() && explosion.covers(player.hitbox.center())
        {
            if !player.shielding {
                player.take_damage(tuning.bomb.explosion_damage);
            }
            explosion.has_damaged = true;
        }
    }
    explosions.retain(|e| !e.expired());
}

#[cfg(test)]
mod tests {
    use glam::Vec2;

    use super::*;
    use crate::consts::SIM_DT;
    use crate::sim::projectile::{Bomb, Bullet};
    use crate::sim::state::WorldState;

    fn world() -> WorldState {
        let mut w = WorldState::with_seed(7);
        w.phase = crate::sim::state::GamePhase::Explore;
        w
    }

    fn enemy_bullet(w: &WorldState, x: f32, y: f32) -> Bullet {
        Bullet::new(
            x,
            y,
            w.tuning.enemy.bullet_size,
            Vec2::new(-w.tuning.enemy.bullet_speed, 0.0),
            w.tuning.enemy.bullet_damage,
            Affiliation::EnemySide,
        )
    }

    #[test]
    fn test_melee_hits_one_enemy_per_swing() {
        let mut w = world();
        // stack two enemies inside the melee zone to the player's right
        let zone_x = w.player.hitbox.x + w.player.hitbox.w + 10.0;
        for e in w.enemies.iter_mut().take(2) {
            e.pos.x = zone_x;
            e.pos.y = 0.0;
            e.hitbox.set_pos(zone_x, 0.0);
        }
        w.player.attacking = true;
        w.player.attack_time = 0.1;

        resolve(&mut w);

        let hurt = w
            .enemies
            .iter()
            .filter(|e| e.health < e.max_health)
            .count();
        assert_eq!(hurt, 1);
        assert!(w.player.hit_registered);
        assert!(w.events.contains(&GameEvent::HitLanded));

        // same swing cannot land again
        resolve(&mut w);
        let hurt_after = w
            .enemies
            .iter()
            .filter(|e| e.health < e.max_health)
            .count();
        assert_eq!(hurt_after, 1);
    }

    #[test]
    fn test_one_bullet_damages_player_per_tick() {
        let mut w = world();
        let px = w.player.hitbox.x;
        let py = w.player.hitbox.y + 10.0;
        w.bullets.push(enemy_bullet(&w, px, py));
        w.bullets.push(enemy_bullet(&w, px, py));

        resolve(&mut w);

        // both consumed, only one applied damage
        assert!(w.bullets.is_empty());
        assert_eq!(
            w.player.health,
            w.player.max_health - w.tuning.enemy.bullet_damage
        );
    }

    #[test]
    fn test_player_side_bullets_one_hit_per_enemy_per_tick() {
        let mut w = world();
        let hx = w.enemies[0].hitbox;
        let dmg = 10.0;
        for _ in 0..2 {
            w.bullets.push(Bullet::new(
                hx.x,
                hx.y + 10.0,
                20.0,
                Vec2::new(500.0, 0.0),
                dmg,
                Affiliation::PlayerSide,
            ));
        }

        resolve(&mut w);

        // both consumed, only one applied damage
        assert!(w.bullets.is_empty());
        assert_eq!(w.enemies[0].health, w.enemies[0].max_health - dmg);
    }

    #[test]
    fn test_player_side_bullet_falls_through_to_boss() {
        let mut w = world();
        w.boss.active = true;
        let hx = w.boss.hitbox;
        w.bullets.push(Bullet::new(
            hx.x,
            hx.y + 10.0,
            20.0,
            Vec2::new(500.0, 0.0),
            10.0,
            Affiliation::PlayerSide,
        ));

        resolve(&mut w);

        assert!(w.bullets.is_empty());
        assert_eq!(w.boss.health, w.boss.max_health - 10.0);
        // no enemy was touched
        assert!(w.enemies.iter().all(|e| e.health == e.max_health));
    }

    #[test]
    fn test_shield_absorbs_bullets_without_damage() {
        let mut w = world();
        w.player.shielding = true;
        w.bullets
            .push(enemy_bullet(&w, w.player.hitbox.x, w.player.hitbox.y + 10.0));

        resolve(&mut w);

        assert!(w.bullets.is_empty());
        assert_eq!(w.player.health, w.player.max_health);
    }

    #[test]
    fn test_shielded_bomb_catch_detonates() {
        let mut w = world();
        w.player.shielding = true;
        let c = w.player.hitbox.center();
        w.bombs.push(Bomb::new(c.x, c.y, 0.0, &w.tuning.bomb));

        resolve(&mut w);

        assert!(w.bombs.is_empty());
        assert_eq!(w.explosions.len(), 1);
        assert!(w.events.contains(&GameEvent::BombExploded));
        assert_eq!(w.player.health, w.player.max_health);
    }

    #[test]
    fn test_unshielded_bomb_contact_damages_without_detonating() {
        let mut w = world();
        let c = w.player.hitbox.center();
        w.bombs.push(Bomb::new(c.x, c.y, 0.0, &w.tuning.bomb));

        resolve(&mut w);

        assert_eq!(w.bombs.len(), 1);
        assert!(w.explosions.is_empty());
        assert_eq!(
            w.player.health,
            w.player.max_health - w.tuning.bomb.contact_damage
        );
    }

    #[test]
    fn test_explosion_damages_once_then_expires() {
        let mut w = world();
        let c = w.player.hitbox.center();
        w.explosions.push(Explosion::new(c, &w.tuning.bomb));

        update_explosions(&mut w, SIM_DT);
        assert_eq!(
            w.player.health,
            w.player.max_health - w.tuning.bomb.explosion_damage
        );

        // burns out without applying damage again
        let after_first = w.player.health;
        for _ in 0..30 {
            update_explosions(&mut w, SIM_DT);
        }
        assert_eq!(w.player.health, after_first);
        assert!(w.explosions.is_empty());
    }

    #[test]
    fn test_shield_blocks_explosion_but_spends_it() {
        let mut w = world();
        w.player.shielding = true;
        let c = w.player.hitbox.center();
        w.explosions.push(Explosion::new(c, &w.tuning.bomb));

        update_explosions(&mut w, SIM_DT);

        assert_eq!(w.player.health, w.player.max_health);
        assert!(w.explosions[0].has_damaged);
    }
}
