//! Headless encounter runner
//!
//! Drives the simulation at the fixed timestep with a simple scripted
//! fighter, useful for balance runs and soak testing:
//!
//! ```text
//! frontline [seed] [tuning.json]
//! ```

use std::time::{SystemTime, UNIX_EPOCH};

use frontline::consts::SIM_DT;
use frontline::sim::{Combatant, GamePhase, TickInput, WorldState, tick};
use frontline::tuning::Tuning;

/// Wall-clock cap so a stalemate run still terminates
const MAX_SIM_SECONDS: f32 = 600.0;

fn main() {
    env_logger::init();

    let mut args = std::env::args().skip(1);
    let seed: u64 = args
        .next()
        .and_then(|s| s.parse().ok())
        .unwrap_or_else(|| {
            SystemTime::now()
                .duration_since(UNIX_EPOCH)
                .map(|d| d.as_nanos() as u64)
                .unwrap_or(0x5EED)
        });
    let tuning = match args.next() {
        Some(path) => Tuning::load_or_default(&path),
        None => Tuning::default(),
    };

    log::info!("starting encounter, seed {seed}");
    let mut world = WorldState::new(seed, tuning);

    let max_ticks = (MAX_SIM_SECONDS / SIM_DT) as u64;
    let mut ticks: u64 = 0;
    while !world.phase.is_terminal() && ticks < max_ticks {
        let input = scripted_input(&world, ticks);
        tick(&mut world, &input, SIM_DT);
        ticks += 1;

        if ticks % (60 * 10) == 0 {
            log::info!(
                "t={}s phase={:?} hp={:.0} kills={} enemies={}",
                ticks / 60,
                world.phase,
                world.player.health,
                world.kill_count,
                world.enemies.len()
            );
        }
    }

    match world.phase {
        GamePhase::Victory => log::info!("victory in {:.1}s", ticks as f32 * SIM_DT),
        GamePhase::GameOver => log::info!("defeated at {:.1}s", ticks as f32 * SIM_DT),
        _ => log::info!("time limit reached in phase {:?}", world.phase),
    }
}

/// A blunt but serviceable fighter: skip the dialog, sprint at the nearest
/// threat, swing in range, heal when hurt, shield against boss fire.
fn scripted_input(world: &WorldState, ticks: u64) -> TickInput {
    let mut input = TickInput::default();

    if world.phase == GamePhase::Dialog {
        input.advance_dialog = true;
        return input;
    }

    let me = world.player.hitbox.center();
    let target_x = world
        .enemies
        .iter()
        .filter(|e| !e.is_dead())
        .map(|e| e.hitbox.center().x)
        .min_by(|a, b| {
            (a - me.x)
                .abs()
                .partial_cmp(&(b - me.x).abs())
                .unwrap_or(std::cmp::Ordering::Equal)
        })
        .or_else(|| world.boss.active.then(|| world.boss.hitbox.center().x));

    if let Some(tx) = target_x {
        let dist = (tx - me.x).abs();
        if dist > 120.0 {
            input.sprint = true;
            if tx > me.x {
                input.move_right = true;
            } else {
                input.move_left = true;
            }
        } else {
            input.attack = true;
        }
        // close fast on the boss, block its bursts at range
        if world.boss.active && dist > 400.0 {
            input.dash = ticks % 30 == 0;
        } else if world.boss.active && dist > 150.0 {
            input.shield = ticks % 2 == 0;
        }
    }

    if world.player.health < world.player.max_health * 0.6 {
        input.heal = true;
    }

    input
}
