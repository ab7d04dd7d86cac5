//! Encounter direction
//!
//! Drives everything above the individual combatants: the intro dialog,
//! wave spawning, kill accounting, boss activation, and the terminal
//! win/lose transitions.

use rand::Rng;

use super::combatant::Combatant;
use super::enemy::Enemy;
use super::state::{GameEvent, GamePhase, WorldState};
use super::tick::TickInput;

/// Pre-combat pass: advance the intro dialog and respawn the enemy wave
/// when the field is clear.
pub fn pre_tick(world: &mut WorldState, input: &TickInput) {
    if world.phase == GamePhase::Dialog {
        if input.advance_dialog {
            world.dialog_index += 1;
            if world.dialog_index >= world.tuning.encounter.dialog_lines {
                world.phase = GamePhase::Explore;
                log::info!("dialog complete, encounter begins");
            }
        }
        return;
    }

    if world.phase == GamePhase::Explore
        && world.enemies.is_empty()
        && world.kill_count < world.tuning.encounter.kill_target
    {
        spawn_wave(world);
    }
}

/// Spawn one full enemy wave. The first wave uses the narrow band away from
/// the start position; later waves use the full band.
pub fn spawn_wave(world: &mut WorldState) {
    let enc = &world.tuning.encounter;
    let (min_x, max_x) = if world.kill_count == 0 {
        (enc.first_wave_spawn_min, enc.first_wave_spawn_max)
    } else {
        (enc.spawn_min, enc.spawn_max)
    };
    let count = enc.wave_size;
    for _ in 0..count {
        let x = world.rng.random_range(min_x..max_x);
        let enemy = Enemy::new(x, 0.0, &world.tuning.enemy, &mut world.rng);
        world.enemies.push(enemy);
    }
    world.wave_index += 1;
    log::info!(
        "wave {} spawned: {} enemies in [{min_x}, {max_x})",
        world.wave_index,
        count
    );
}

/// Post-combat pass: count fresh kills, remove lingered bodies, activate the
/// boss at the kill target, and settle terminal transitions.
pub fn post_tick(world: &mut WorldState) {
    // Kill accounting. Each body is counted exactly once, on the tick it
    // dies; the body itself lingers until its timer runs out.
    for enemy in world.enemies.iter_mut() {
        if enemy.is_dead() && !enemy.counted_kill {
            enemy.counted_kill = true;
            world.kill_count += 1;
            world.events.push(GameEvent::EnemyDied);
            log::debug!("enemy down, kill count {}", world.kill_count);
        }
    }
    world.enemies.retain(|e| !e.ready_for_removal());

    // Boss activation is edge-triggered on reaching the kill target.
    if !world.boss.active
        && world.kill_count >= world.tuning.encounter.kill_target
        && !world.boss.is_dead()
        && !world.phase.is_terminal()
    {
        world.boss.active = true;
        world.phase = GamePhase::Combat;
        world.events.push(GameEvent::BossActivated);
        log::info!("kill target reached, boss engaged");
    }

    if world.phase.is_terminal() {
        return;
    }

    // Player death ends the run from any phase.
    if world.player.is_dead() {
        world.phase = GamePhase::GameOver;
        world.events.push(GameEvent::PlayerDied);
        log::info!("player defeated after {} ticks", world.time_ticks);
        return;
    }

    // Victory the tick the boss falls.
    if world.boss.active && world.boss.is_dead() {
        world.boss.active = false;
        world.phase = GamePhase::Victory;
        world.kill_count = world.tuning.encounter.win_target;
        world.events.push(GameEvent::BossDied);
        log::info!("boss defeated after {} ticks", world.time_ticks);
    }
}
