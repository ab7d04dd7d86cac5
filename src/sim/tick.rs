//! Fixed-timestep simulation tick
//!
//! One entry point, `tick`, advances the whole world by one step from a
//! snapshot of the player's input. The pass order is fixed: encounter
//! direction, combatants, projectile motion, combat resolution, explosions,
//! then encounter bookkeeping. Everything downstream of the seed and the
//! input script is deterministic.

use serde::{Deserialize, Serialize};

use super::combatant::Combatant;
use super::state::{GamePhase, WorldState};
use super::{combat, director};

/// Player input sampled once per tick
#[derive(Debug, Clone, Copy, Default, Serialize, Deserialize)]
pub struct TickInput {
    pub move_left: bool,
    pub move_right: bool,
    pub jump: bool,
    pub sprint: bool,
    pub attack: bool,
    pub dash: bool,
    pub heal: bool,
    pub shield: bool,
    /// Edge-triggered: the embedder sends true for one tick per key press
    pub advance_dialog: bool,
}

/// Advance the world by `dt` seconds.
pub fn tick(world: &mut WorldState, input: &TickInput, dt: f32) {
    world.events.clear();
    if world.phase.is_terminal() {
        return;
    }

    director::pre_tick(world, input);
    if world.phase == GamePhase::Dialog {
        return;
    }

    world.time_ticks += 1;

    {
        let WorldState {
            player,
            enemies,
            boss,
            bullets,
            bombs,
            rng,
            events,
            ..
        } = world;

        player.tick(dt, input, events);

        let target = if player.is_dead() {
            None
        } else {
            Some(player.hitbox)
        };
        for enemy in enemies.iter_mut() {
            enemy.tick(dt, target.as_ref(), rng, bullets, events);
        }
        boss.tick(dt, target.as_ref(), rng, bullets, bombs, events);

        for bullet in bullets.iter_mut() {
            bullet.advance(dt);
        }
        for bomb in bombs.iter_mut() {
            bomb.advance(dt);
        }
    }

    combat::resolve(world);
    combat::update_explosions(world, dt);
    director::post_tick(world);
}
