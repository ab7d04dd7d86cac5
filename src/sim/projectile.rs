//! Projectile and area-damage entities
//!
//! Bullets fly straight and die on impact or at the world edge. Bombs
//! free-fall and always detonate at the ground plane. Explosions are timed
//! area-damage events that fire at most once over their lifetime.

use glam::Vec2;
use serde::{Deserialize, Serialize};

use crate::consts::{GROUND_Y, WORLD_HEIGHT, WORLD_WIDTH};
use crate::tuning::BombTuning;

use super::rect::Rect;

/// Which side fired a projectile; the resolver matches it against the other
/// side's combatants, so projectiles never hold entity references
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum Affiliation {
    PlayerSide,
    EnemySide,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Bullet {
    pub rect: Rect,
    pub vel: Vec2,
    pub damage: f32,
    pub origin: Affiliation,
}

impl Bullet {
    pub fn new(x: f32, y: f32, size: f32, vel: Vec2, damage: f32, origin: Affiliation) -> Self {
        Self {
            rect: Rect::new(x, y, size, size),
            vel,
            damage,
            origin,
        }
    }

    pub fn advance(&mut self, dt: f32) {
        self.rect.x += self.vel.x * dt;
        self.rect.y += self.vel.y * dt;
    }

    pub fn out_of_bounds(&self) -> bool {
        self.rect.x < 0.0
            || self.rect.x > WORLD_WIDTH
            || self.rect.y < 0.0
            || self.rect.y > WORLD_HEIGHT
    }
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Bomb {
    pub rect: Rect,
    pub vel: Vec2,
    /// Set the tick the bomb reaches the ground plane
    pub exploded: bool,
}

impl Bomb {
    /// Thrown from (x, y) arcing toward the target's horizontal position
    pub fn new(x: f32, y: f32, target_x: f32, tuning: &BombTuning) -> Self {
        let dir = if target_x > x { 1.0 } else { -1.0 };
        Self {
            rect: Rect::new(x, y, tuning.size, tuning.size),
            vel: Vec2::new(tuning.speed_x * dir, tuning.fall_speed),
            exploded: false,
        }
    }

    /// Free-fall; detonates unconditionally at the ground plane
    pub fn advance(&mut self, dt: f32) {
        self.rect.x += self.vel.x * dt;
        self.rect.y += self.vel.y * dt;
        if self.rect.y <= GROUND_Y {
            self.rect.y = GROUND_Y;
            self.exploded = true;
        }
    }

    /// Blast center used when this bomb converts into an explosion
    pub fn blast_center(&self) -> Vec2 {
        self.rect.center()
    }
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Explosion {
    pub pos: Vec2,
    pub radius: f32,
    /// Counts down to zero; the explosion is discarded at zero whether or not
    /// it ever damaged anything
    pub life: f32,
    /// Exactly-once gate for the area-damage event
    pub has_damaged: bool,
}

impl Explosion {
    pub fn new(pos: Vec2, tuning: &BombTuning) -> Self {
        Self {
            pos,
            radius: tuning.explosion_radius,
            life: tuning.explosion_life,
            has_damaged: false,
        }
    }

    pub fn advance(&mut self, dt: f32) {
        self.life -= dt;
    }

    pub fn expired(&self) -> bool {
        self.life <= 0.0
    }

    /// Whether a target centered at `p` is inside the blast radius
    pub fn covers(&self, p: Vec2) -> bool {
        self.pos.distance(p) <= self.radius
    }
}
