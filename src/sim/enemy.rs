//! Enemy AI and state
//!
//! Patrols until the player crosses the detection radius, waits out a fixed
//! reaction delay, then chases to attack range and fires ranged attacks.

use glam::Vec2;
use rand::Rng;
use rand_pcg::Pcg32;
use serde::{Deserialize, Serialize};

use crate::horizontal_distance;
use crate::tuning::EnemyTuning;

use super::combatant::{Combatant, Cooldown, Facing};
use super::projectile::{Affiliation, Bullet};
use super::rect::Rect;
use super::state::GameEvent;

/// Behavior states; exactly one active at a time
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum EnemyState {
    /// Oscillating between randomly chosen bounds
    Patrol,
    /// Player detected, reaction delay running (idle, fenced warning period)
    Alerted,
    /// Closing distance to attack range
    Chase,
    /// In range; attack windows run here
    Attack,
    Dead,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Enemy {
    pub pos: Vec2,
    pub facing: Facing,
    pub health: f32,
    pub max_health: f32,
    pub state: EnemyState,

    /// One-way latch; once set, the enemy never returns to patrol
    pub detected: bool,
    delay_timer: f32,

    patrol_target_x: f32,

    // Attack window bookkeeping
    attack_time: f32,
    /// Set when the window's single shot has been fired
    fired: bool,
    pub shoot_cooldown: Cooldown,
    pub damage_cooldown: Cooldown,

    /// Accumulates once dead; the director removes the body after the linger
    pub death_time: f32,
    /// Exactly-once kill accounting, owned by the director
    pub counted_kill: bool,

    pub hitbox: Rect,

    #[serde(skip)]
    tuning: EnemyTuning,
}

impl Enemy {
    pub fn new(x: f32, y: f32, tuning: &EnemyTuning, rng: &mut Pcg32) -> Self {
        let mut e = Self {
            pos: Vec2::new(x, y),
            facing: Facing::Right,
            health: tuning.max_health,
            max_health: tuning.max_health,
            state: EnemyState::Patrol,
            detected: false,
            delay_timer: 0.0,
            patrol_target_x: x,
            attack_time: 0.0,
            fired: false,
            shoot_cooldown: Cooldown::ready(),
            damage_cooldown: Cooldown::ready(),
            death_time: 0.0,
            counted_kill: false,
            hitbox: Rect::new(x, y, tuning.hitbox_w, tuning.hitbox_h),
            tuning: tuning.clone(),
        };
        e.pick_patrol_target(rng);
        e
    }

    /// Choose a new random patrol endpoint near the current position
    fn pick_patrol_target(&mut self, rng: &mut Pcg32) {
        let leg = rng.random_range(self.tuning.patrol_min_move..=self.tuning.patrol_max_move);
        if rng.random_bool(0.5) {
            self.patrol_target_x = self.pos.x + leg;
            self.facing = Facing::Right;
        } else {
            self.patrol_target_x = self.pos.x - leg;
            self.facing = Facing::Left;
        }
    }

    /// Advance one tick. `target` is the player hitbox when one exists; with
    /// no target, chase/attack are skipped for the tick and the enemy
    /// patrols. Spawned bullets are appended to `bullets`.
    pub fn tick(
        &mut self,
        dt: f32,
        target: Option<&Rect>,
        rng: &mut Pcg32,
        bullets: &mut Vec<Bullet>,
        events: &mut Vec<GameEvent>,
    ) {
        if self.state == EnemyState::Dead {
            self.death_time += dt;
            return;
        }

        self.shoot_cooldown.tick(dt);
        self.damage_cooldown.tick(dt);

        let Some(target) = target else {
            self.patrol(dt, rng);
            self.refresh_hitbox();
            return;
        };

        let own_center = self.hitbox.center().x;
        let target_center = target.center().x;
        let dist = horizontal_distance(own_center, target_center);

        if dist <= self.tuning.detection_radius {
            self.detected = true;
        }

        if !self.detected {
            self.patrol(dt, rng);
            self.refresh_hitbox();
            return;
        }

        // Reaction delay: remain idle so the player gets a warning period
        self.delay_timer += dt;
        if self.delay_timer < self.tuning.detect_delay {
            self.state = EnemyState::Alerted;
            self.refresh_hitbox();
            return;
        }

        if dist <= self.tuning.attack_range {
            self.state = EnemyState::Attack;
            self.facing = Facing::toward(own_center, target_center);
            self.run_attack_window(dt, target_center, bullets, events);
        } else {
            self.state = EnemyState::Chase;
            // an interrupted window restarts from scratch next time, but a
            // shot already fired still pays the full shoot cooldown
            if self.fired {
                self.shoot_cooldown.set(self.tuning.shoot_cooldown);
            }
            self.attack_time = 0.0;
            self.fired = false;
            self.chase(dt, own_center, target_center);
        }

        self.refresh_hitbox();
    }

    /// Attack windows: once the cooldown elapses a window opens; the bullet
    /// leaves at a fixed fire offset within it, exactly once per window
    fn run_attack_window(
        &mut self,
        dt: f32,
        target_center: f32,
        bullets: &mut Vec<Bullet>,
        events: &mut Vec<GameEvent>,
    ) {
        if self.attack_time == 0.0 && !self.shoot_cooldown.is_ready() {
            return;
        }

        self.attack_time += dt;
        if !self.fired && self.attack_time >= self.tuning.fire_delay {
            bullets.push(self.spawn_bullet(target_center));
            self.fired = true;
            events.push(GameEvent::EnemyShot);
        }
        if self.attack_time >= self.tuning.attack_duration {
            self.attack_time = 0.0;
            self.fired = false;
            self.shoot_cooldown.set(self.tuning.shoot_cooldown);
        }
    }

    fn spawn_bullet(&self, target_center: f32) -> Bullet {
        let center = self.hitbox.center();
        let size = self.tuning.bullet_size;
        let x = match self.facing {
            Facing::Right => self.hitbox.x + self.hitbox.w,
            Facing::Left => self.hitbox.x - size,
        };
        let dir = if target_center > center.x { 1.0 } else { -1.0 };
        Bullet::new(
            x,
            center.y - size / 2.0,
            size,
            Vec2::new(self.tuning.bullet_speed * dir, 0.0),
            self.tuning.bullet_damage,
            Affiliation::EnemySide,
        )
    }

    /// Horizontal chase that stops at attack range to avoid overlap
    fn chase(&mut self, dt: f32, own_center: f32, target_center: f32) {
        self.facing = Facing::toward(own_center, target_center);
        self.pos.x += self.tuning.speed * self.facing.sign() * dt;
    }

    fn patrol(&mut self, dt: f32, rng: &mut Pcg32) {
        self.state = EnemyState::Patrol;
        match self.facing {
            Facing::Right => {
                self.pos.x += self.tuning.speed * dt;
                if self.pos.x >= self.patrol_target_x {
                    self.pick_patrol_target(rng);
                }
            }
            Facing::Left => {
                self.pos.x -= self.tuning.speed * dt;
                if self.pos.x <= self.patrol_target_x {
                    self.pick_patrol_target(rng);
                }
            }
        }
    }

    fn refresh_hitbox(&mut self) {
        self.hitbox.set_pos(self.pos.x, self.pos.y);
    }

    /// Removal gate: dead and lingered long enough
    pub fn ready_for_removal(&self) -> bool {
        self.state == EnemyState::Dead && self.death_time >= self.tuning.death_linger
    }
}

impl Combatant for Enemy {
    fn position(&self) -> Vec2 {
        self.pos
    }

    fn hitbox(&self) -> Rect {
        self.hitbox
    }

    fn health(&self) -> f32 {
        self.health
    }

    fn max_health(&self) -> f32 {
        self.max_health
    }

    fn take_damage(&mut self, amount: f32) {
        if self.state == EnemyState::Dead || !self.damage_cooldown.is_ready() {
            return;
        }
        self.damage_cooldown.set(self.tuning.damage_cooldown);
        self.health = (self.health - amount).max(0.0);
        if self.health <= 0.0 {
            self.state = EnemyState::Dead;
            self.death_time = 0.0;
        }
    }
}
