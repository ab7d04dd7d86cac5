//! Boss state machine
//!
//! Dormant until the director activates it. Combines chase/idle positioning
//! with three attack modalities picked by priority and random trials:
//! bomb throw, committed roll, and a fixed-count bullet burst.
//!
//! The roll is deliberately uninterruptible: while committed, no other
//! branch is evaluated until the travel distance is exhausted.

use glam::Vec2;
use rand::Rng;
use rand_pcg::Pcg32;
use serde::{Deserialize, Serialize};

use crate::consts::WORLD_WIDTH;
use crate::horizontal_distance;
use crate::tuning::{BombTuning, BossTuning};

use super::combatant::{Combatant, Cooldown, Facing};
use super::projectile::{Affiliation, Bomb, Bullet};
use super::rect::Rect;
use super::state::GameEvent;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum BossState {
    Idle,
    Run,
    Roll,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Boss {
    pub pos: Vec2,
    pub facing: Facing,
    pub health: f32,
    pub max_health: f32,
    pub state: BossState,

    /// Dormant until the director flips this on; inert while false
    pub active: bool,

    pub bomb_cooldown: Cooldown,
    pub roll_cooldown: Cooldown,
    pub shoot_cooldown: Cooldown,
    pub damage_cooldown: Cooldown,

    // Committed roll
    rolling: bool,
    roll_direction: f32,
    roll_distance_left: f32,

    // Burst in progress: shots still to fire and time to the next one
    burst_left: u32,
    burst_timer: f32,

    pub hitbox: Rect,

    #[serde(skip)]
    tuning: BossTuning,
    #[serde(skip)]
    bomb_tuning: BombTuning,
}

impl Boss {
    pub fn new(x: f32, y: f32, tuning: &BossTuning, bomb_tuning: &BombTuning) -> Self {
        Self {
            pos: Vec2::new(x, y),
            facing: Facing::Left,
            health: tuning.max_health,
            max_health: tuning.max_health,
            state: BossState::Idle,
            active: false,
            bomb_cooldown: Cooldown::ready(),
            roll_cooldown: Cooldown::ready(),
            shoot_cooldown: Cooldown::ready(),
            damage_cooldown: Cooldown::ready(),
            rolling: false,
            roll_direction: 1.0,
            roll_distance_left: 0.0,
            burst_left: 0,
            burst_timer: 0.0,
            hitbox: Rect::new(x, y, tuning.hitbox_w, tuning.hitbox_h),
            tuning: tuning.clone(),
            bomb_tuning: bomb_tuning.clone(),
        }
    }

    /// Advance one tick. Bullets and bombs spawned by the decision are
    /// appended to the world-owned collections.
    pub fn tick(
        &mut self,
        dt: f32,
        target: Option<&Rect>,
        rng: &mut Pcg32,
        bullets: &mut Vec<Bullet>,
        bombs: &mut Vec<Bomb>,
        events: &mut Vec<GameEvent>,
    ) {
        if !self.active || self.is_dead() {
            return;
        }

        self.damage_cooldown.tick(dt);
        self.bomb_cooldown.tick(dt);
        self.roll_cooldown.tick(dt);

        // Mid-roll: the committed move is the only thing that runs
        if self.rolling {
            self.advance_roll(dt);
            return;
        }

        let Some(target) = target else {
            // no designated target in the world; skip behavior this tick
            return;
        };

        let own_center = self.hitbox.center().x;
        let target_center = target.center().x;
        self.facing = Facing::toward(own_center, target_center);
        let dist = horizontal_distance(own_center, target_center);

        if dist <= self.tuning.engage_range {
            if dist > self.tuning.burst_range {
                self.state = BossState::Run;
                self.pos.x += self.tuning.speed * self.facing.sign() * dt;
            } else {
                self.state = BossState::Idle;
            }

            // Priority-ordered decision: bomb, then roll, then burst. Each
            // random trial is an independent per-tick draw.
            if self.bomb_cooldown.is_ready() && rng.random_bool(self.tuning.bomb_chance) {
                bombs.push(self.spawn_bomb(target_center));
                self.bomb_cooldown.set(self.tuning.bomb_cooldown);
                events.push(GameEvent::BombThrown);
            } else if self.roll_cooldown.is_ready()
                && dist <= self.tuning.roll_range
                && rng.random_bool(self.tuning.roll_chance)
            {
                self.start_roll(target_center, own_center);
            } else if dist <= self.tuning.burst_range
                && self.burst_left == 0
                && self.shoot_cooldown.is_ready()
            {
                self.burst_left = self.tuning.burst_count;
                bullets.push(self.spawn_bullet());
                events.push(GameEvent::BossShot);
                self.burst_left -= 1;
                self.burst_timer = self.tuning.burst_interval;
                if self.burst_left == 0 {
                    self.shoot_cooldown.set(self.tuning.shoot_cooldown);
                }
            }
        } else {
            self.state = BossState::Idle;
        }

        // A burst in progress continues regardless of the decision above;
        // the shoot cooldown is armed only after the last shot
        if self.burst_left > 0 {
            self.burst_timer -= dt;
            if self.burst_timer <= 0.0 {
                bullets.push(self.spawn_bullet());
                events.push(GameEvent::BossShot);
                self.burst_left -= 1;
                self.burst_timer = self.tuning.burst_interval;
                if self.burst_left == 0 {
                    self.shoot_cooldown.set(self.tuning.shoot_cooldown);
                }
            }
        } else {
            self.shoot_cooldown.tick(dt);
        }

        self.clamp_and_refresh();
    }

    fn start_roll(&mut self, target_center: f32, own_center: f32) {
        self.rolling = true;
        self.state = BossState::Roll;
        self.roll_direction = if target_center > own_center { 1.0 } else { -1.0 };
        self.roll_distance_left = self.tuning.roll_distance;
        self.facing = if self.roll_direction > 0.0 {
            Facing::Right
        } else {
            Facing::Left
        };
    }

    fn advance_roll(&mut self, dt: f32) {
        // commit to the fixed travel distance; never overshoot it
        let step = (self.tuning.roll_speed * dt).min(self.roll_distance_left);
        self.pos.x += step * self.roll_direction;
        self.roll_distance_left -= step;

        if self.roll_distance_left <= 0.0 {
            self.rolling = false;
            self.state = BossState::Idle;
            self.roll_cooldown.set(self.tuning.roll_cooldown);
        }
        self.clamp_and_refresh();
    }

    fn spawn_bullet(&self) -> Bullet {
        let size = self.tuning.bullet_size;
        let x = match self.facing {
            Facing::Right => self.hitbox.x + self.hitbox.w,
            Facing::Left => self.hitbox.x - size,
        };
        let y = self.hitbox.y + self.hitbox.h * 0.45;
        Bullet::new(
            x,
            y,
            size,
            Vec2::new(self.tuning.bullet_speed * self.facing.sign(), 0.0),
            self.tuning.bullet_damage,
            Affiliation::EnemySide,
        )
    }

    fn spawn_bomb(&self, target_center: f32) -> Bomb {
        let c = self.hitbox.center();
        Bomb::new(c.x, c.y, target_center, &self.bomb_tuning)
    }

    fn clamp_and_refresh(&mut self) {
        self.pos.x = self.pos.x.clamp(0.0, WORLD_WIDTH - self.hitbox.w);
        self.hitbox.set_pos(self.pos.x, self.pos.y);
    }

    pub fn is_rolling(&self) -> bool {
        self.rolling
    }
}

impl Combatant for Boss {
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
        if !self.damage_cooldown.is_ready() {
            return;
        }
        self.health = (self.health - amount).max(0.0);
        self.damage_cooldown.set(self.tuning.damage_cooldown);
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::consts::SIM_DT;
    use rand::SeedableRng;

    fn rig() -> (Boss, Pcg32) {
        let boss = Boss::new(2000.0, 0.0, &BossTuning::default(), &BombTuning::default());
        (boss, Pcg32::seed_from_u64(42))
    }

    struct Out {
        bullets: Vec<Bullet>,
        bombs: Vec<Bomb>,
    }

    fn tick_n(boss: &mut Boss, target: Option<&Rect>, rng: &mut Pcg32, n: u32) -> Out {
        let mut out = Out {
            bullets: Vec::new(),
            bombs: Vec::new(),
        };
        let mut events = Vec::new();
        for _ in 0..n {
            boss.tick(SIM_DT, target, rng, &mut out.bullets, &mut out.bombs, &mut events);
        }
        out
    }

    #[test]
    fn test_inert_until_activated() {
        let (mut boss, mut rng) = rig();
        let target = Rect::new(2100.0, 0.0, 100.0, 155.0);
        let out = tick_n(&mut boss, Some(&target), &mut rng, 120);
        assert!(out.bullets.is_empty());
        assert!(out.bombs.is_empty());
        assert_eq!(boss.pos.x, 2000.0);
        assert_eq!(boss.state, BossState::Idle);
    }

    #[test]
    fn test_idle_outside_engagement_range() {
        let (mut boss, mut rng) = rig();
        boss.active = true;
        let target = Rect::new(4000.0, 0.0, 100.0, 155.0);
        let out = tick_n(&mut boss, Some(&target), &mut rng, 120);
        assert!(out.bullets.is_empty() && out.bombs.is_empty());
        assert_eq!(boss.pos.x, 2000.0);
    }

    #[test]
    fn test_chases_within_engagement_band() {
        let (mut boss, mut rng) = rig();
        boss.active = true;
        // exhaust attack options so only movement remains observable
        boss.bomb_cooldown.set(100.0);
        boss.roll_cooldown.set(100.0);
        boss.shoot_cooldown.set(100.0);
        let target = Rect::new(1400.0, 0.0, 100.0, 155.0);
        tick_n(&mut boss, Some(&target), &mut rng, 60);
        assert_eq!(boss.state, BossState::Run);
        assert!(boss.pos.x < 2000.0);
        assert_eq!(boss.facing, Facing::Left);
    }

    #[test]
    fn test_roll_atomicity_exact_distance_no_other_decisions() {
        let (mut boss, mut rng) = rig();
        boss.active = true;
        let start_x = boss.pos.x;
        let own_center = boss.hitbox.center().x;
        boss.start_roll(own_center + 100.0, own_center);
        assert!(boss.is_rolling());
        assert_eq!(boss.state, BossState::Roll);

        // everything is ready and in range, yet nothing but the roll may run
        let target = Rect::new(2100.0, 0.0, 100.0, 155.0);
        let mut ticks = 0;
        let mut out = Out {
            bullets: Vec::new(),
            bombs: Vec::new(),
        };
        let mut events = Vec::new();
        while boss.is_rolling() {
            boss.tick(SIM_DT, Some(&target), &mut rng, &mut out.bullets, &mut out.bombs, &mut events);
            ticks += 1;
            assert!(ticks < 600, "roll never completed");
        }
        assert!(out.bullets.is_empty());
        assert!(out.bombs.is_empty());
        // net displacement equals the committed distance exactly
        assert!((boss.pos.x - start_x - 420.0).abs() < 1e-3);
        assert_eq!(boss.state, BossState::Idle);
        // roll cooldown armed on completion
        assert!(!boss.roll_cooldown.is_ready());
    }

    #[test]
    fn test_burst_fires_fixed_count_then_arms_cooldown() {
        let (mut boss, mut rng) = rig();
        boss.active = true;
        // suppress the higher-priority branches
        boss.bomb_cooldown.set(1000.0);
        boss.roll_cooldown.set(1000.0);
        let target = Rect::new(2100.0, 0.0, 100.0, 155.0); // inside burst range
        let out = tick_n(&mut boss, Some(&target), &mut rng, 60); // 1 s
        // 3 shots: commit tick + two at 0.18 s intervals, all within 1 s
        assert_eq!(out.bullets.len(), 3);
        assert!(!boss.shoot_cooldown.is_ready());
        // no further shots until the 2.8 s cooldown elapses
        let out2 = tick_n(&mut boss, Some(&target), &mut rng, 60);
        assert!(out2.bullets.is_empty());
    }

    #[test]
    fn test_bomb_throw_respects_cooldown() {
        let (mut boss, mut rng) = rig();
        boss.active = true;
        boss.roll_cooldown.set(1000.0);
        boss.shoot_cooldown.set(1000.0);
        let target = Rect::new(2100.0, 0.0, 100.0, 155.0);
        // over 20 s the 0.25 trial is overwhelmingly likely to succeed;
        // with the 5 s cooldown at most 4-5 bombs can leave in that span
        let out = tick_n(&mut boss, Some(&target), &mut rng, 1200);
        assert!(!out.bombs.is_empty());
        assert!(out.bombs.len() <= 5);
    }

    #[test]
    fn test_damage_debounce_and_floor() {
        let (mut boss, _) = rig();
        boss.take_damage(30.0);
        boss.take_damage(30.0);
        assert_eq!(boss.health, 470.0);
        boss.health = 10.0;
        boss.damage_cooldown = Cooldown::ready();
        boss.take_damage(30.0);
        assert_eq!(boss.health, 0.0);
        assert!(boss.is_dead());
    }

    #[test]
    fn test_deterministic_decisions_for_fixed_seed() {
        let (mut a, mut rng_a) = rig();
        let (mut b, mut rng_b) = rig();
        a.active = true;
        b.active = true;
        let target = Rect::new(2100.0, 0.0, 100.0, 155.0);
        let out_a = tick_n(&mut a, Some(&target), &mut rng_a, 600);
        let out_b = tick_n(&mut b, Some(&target), &mut rng_b, 600);
        assert_eq!(out_a.bullets.len(), out_b.bullets.len());
        assert_eq!(out_a.bombs.len(), out_b.bombs.len());
        assert_eq!(a.pos.x, b.pos.x);
        assert_eq!(a.state, b.state);
    }
}
