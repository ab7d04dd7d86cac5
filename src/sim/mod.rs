//! Deterministic encounter simulation
//!
//! Rules for this module tree:
//! - No wall-clock reads, no I/O, no global state. Ticks consume a
//!   [`tick::TickInput`] snapshot and a fixed `dt`.
//! - All randomness flows through the seeded generator owned by
//!   [`state::WorldState`]. Same seed plus same input script gives the same
//!   world, tick for tick.
//! - Combatant modules never touch each other directly; cross-combatant
//!   effects go through [`combat`] and [`director`].

pub mod boss;
pub mod combat;
pub mod combatant;
pub mod director;
pub mod enemy;
pub mod player;
pub mod projectile;
pub mod rect;
pub mod state;
pub mod tick;

pub use combatant::{Combatant, Cooldown, Facing};
pub use rect::Rect;
pub use state::{GameEvent, GamePhase, WorldState};
pub use tick::{TickInput, tick};
