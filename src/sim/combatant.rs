//! Shared combatant shape
//!
//! Player, Enemy, and Boss are three distinct state machines that agree on a
//! small capability set: a position, a hitbox that tracks it, clamped health,
//! and debounced damage intake. Cooldown bookkeeping is the same countdown
//! everywhere, so it lives in one small utility instead of a base type.

use glam::Vec2;
use serde::{Deserialize, Serialize};

use super::rect::Rect;

/// Horizontal facing
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum Facing {
    Left,
    Right,
}

impl Facing {
    /// Direction multiplier for velocities and offsets
    #[inline]
    pub fn sign(self) -> f32 {
        match self {
            Facing::Left => -1.0,
            Facing::Right => 1.0,
        }
    }

    /// Facing that looks from `from_x` toward `target_x`
    #[inline]
    pub fn toward(from_x: f32, target_x: f32) -> Self {
        if target_x > from_x {
            Facing::Right
        } else {
            Facing::Left
        }
    }
}

/// A countdown timer gating re-use of an ability.
///
/// Counts down to zero each tick and clamps there; an ability is usable iff
/// the cooldown is ready. Also serves as the post-damage invulnerability
/// window.
#[derive(Debug, Clone, Copy, Default, Serialize, Deserialize)]
pub struct Cooldown {
    remaining: f32,
}

impl Cooldown {
    pub fn ready() -> Self {
        Self { remaining: 0.0 }
    }

    /// Start (or restart) the countdown
    pub fn set(&mut self, secs: f32) {
        self.remaining = secs.max(0.0);
    }

    /// Advance time; remaining never goes negative
    pub fn tick(&mut self, dt: f32) {
        self.remaining = (self.remaining - dt).max(0.0);
    }

    #[inline]
    pub fn is_ready(&self) -> bool {
        self.remaining <= 0.0
    }

    #[inline]
    pub fn remaining(&self) -> f32 {
        self.remaining
    }
}

/// Capability set common to every entity with health and an AI/attack state
/// machine. The combat resolver and the director talk to combatants through
/// this seam; variant-specific behavior stays in the variant's own tick.
pub trait Combatant {
    fn position(&self) -> Vec2;
    fn hitbox(&self) -> Rect;
    fn health(&self) -> f32;
    fn max_health(&self) -> f32;
    /// Apply damage with the debounce window; no-op while the window is open
    /// or when already dead. Health is floored at zero.
    fn take_damage(&mut self, amount: f32);
    fn is_dead(&self) -> bool {
        self.health() <= 0.0
    }
}
