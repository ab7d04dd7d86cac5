//! Frontline - side-scrolling combat simulation core
//!
//! Core modules:
//! - `sim`: Deterministic simulation (combatant state machines, projectiles, combat resolution)
//! - `tuning`: Data-driven game balance

pub mod sim;
pub mod tuning;

pub use tuning::Tuning;

/// Game configuration constants
pub mod consts {
    /// Fixed simulation timestep (60 Hz)
    pub const SIM_DT: f32 = 1.0 / 60.0;
    /// Maximum substeps per frame to prevent spiral of death
    pub const MAX_SUBSTEPS: u32 = 8;

    /// World extents (projectile bounds checks, position clamping)
    pub const WORLD_WIDTH: f32 = 5000.0;
    pub const WORLD_HEIGHT: f32 = 2000.0;

    /// Ground plane; combatants and bombs cannot fall below it
    pub const GROUND_Y: f32 = 0.0;
}

/// Move `current` toward `target` by at most `max_delta`, never overshooting
#[inline]
pub fn move_toward(current: f32, target: f32, max_delta: f32) -> f32 {
    let delta = target - current;
    if delta.abs() <= max_delta {
        target
    } else {
        current + max_delta.copysign(delta)
    }
}

/// Horizontal distance between two x positions
#[inline]
pub fn horizontal_distance(a: f32, b: f32) -> f32 {
    (a - b).abs()
}
