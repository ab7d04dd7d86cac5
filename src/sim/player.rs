//! Player state machine
//!
//! Movement, jump/gravity integration, and the four abilities: attack,
//! shield, dash, and heal. Reads a per-tick input snapshot; never polls.

use glam::Vec2;
use serde::{Deserialize, Serialize};

use crate::consts::{GROUND_Y, WORLD_WIDTH};
use crate::tuning::PlayerTuning;

use super::combatant::{Combatant, Cooldown, Facing};
use super::rect::Rect;
use super::state::GameEvent;
use super::tick::TickInput;

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Player {
    pub pos: Vec2,
    pub facing: Facing,
    pub health: f32,
    pub max_health: f32,

    /// Vertical velocity (jump/gravity integration)
    pub vel_y: f32,
    pub on_ground: bool,

    // Attack window
    pub attacking: bool,
    pub attack_time: f32,
    /// Set on the first landed hit of a swing; blocks further hits until the
    /// window closes
    pub hit_registered: bool,

    /// Damage-immune stance; nullifies projectile and blast damage entirely
    pub shielding: bool,

    // Dash burst
    pub dashing: bool,
    pub dash_time: f32,

    pub dash_cooldown: Cooldown,
    pub heal_cooldown: Cooldown,
    pub damage_cooldown: Cooldown,

    pub hitbox: Rect,

    #[serde(skip)]
    tuning: PlayerTuning,
}

impl Player {
    pub fn new(x: f32, y: f32, tuning: &PlayerTuning) -> Self {
        let mut p = Self {
            pos: Vec2::new(x, y),
            facing: Facing::Right,
            health: tuning.max_health,
            max_health: tuning.max_health,
            vel_y: 0.0,
            on_ground: true,
            attacking: false,
            attack_time: 0.0,
            hit_registered: false,
            shielding: false,
            dashing: false,
            dash_time: 0.0,
            dash_cooldown: Cooldown::ready(),
            heal_cooldown: Cooldown::ready(),
            damage_cooldown: Cooldown::ready(),
            hitbox: Rect::new(x, y, tuning.hitbox_w, tuning.hitbox_h),
            tuning: tuning.clone(),
        };
        p.refresh_hitbox();
        p
    }

    /// Advance one simulation tick from an input snapshot
    pub fn tick(&mut self, dt: f32, input: &TickInput, events: &mut Vec<GameEvent>) {
        if self.is_dead() {
            return;
        }

        self.dash_cooldown.tick(dt);
        self.heal_cooldown.tick(dt);
        self.damage_cooldown.tick(dt);

        // Heal: silent no-op at full health or on cooldown; the cooldown is
        // only consumed when the heal actually applies
        if input.heal && self.heal_cooldown.is_ready() && self.health < self.max_health {
            self.health = (self.health + self.tuning.heal_amount).min(self.max_health);
            self.heal_cooldown.set(self.tuning.heal_cooldown);
            events.push(GameEvent::Healed);
        }

        // Shield is a held stance
        self.shielding = input.shield;

        let speed = if self.shielding {
            self.tuning.shield_speed
        } else if input.sprint {
            self.tuning.sprint_speed
        } else {
            self.tuning.walk_speed
        };

        if input.move_right {
            self.pos.x += speed * dt;
            self.facing = Facing::Right;
        }
        if input.move_left {
            self.pos.x -= speed * dt;
            self.facing = Facing::Left;
        }

        if input.jump && self.on_ground {
            self.vel_y = self.tuning.jump_impulse;
            self.on_ground = false;
        }

        // Dash start
        if input.dash && self.dash_cooldown.is_ready() && !self.dashing {
            self.dashing = true;
            self.dash_time = 0.0;
            self.dash_cooldown.set(self.tuning.dash_cooldown);
            events.push(GameEvent::Dashed);
        }

        // Attack start; disallowed mid-swing and while shielding
        if input.attack && !self.attacking && !self.shielding {
            self.attacking = true;
            self.attack_time = 0.0;
            self.hit_registered = false;
            events.push(GameEvent::AttackSwung);
        }

        // Attack window
        if self.attacking {
            self.attack_time += dt;
            if self.attack_time >= self.tuning.attack_duration {
                self.attacking = false;
                self.attack_time = 0.0;
            }
        } else {
            self.hit_registered = false;
        }

        // Dash execution suspends normal movement and gravity for its duration
        if self.dashing {
            self.dash_time += dt;
            self.pos.x += self.tuning.dash_speed * self.facing.sign() * dt;
            if self.dash_time >= self.tuning.dash_duration {
                self.dashing = false;
            }
            self.clamp_and_refresh();
            return;
        }

        // Gravity
        self.vel_y += self.tuning.gravity * dt;
        self.pos.y += self.vel_y * dt;
        if self.pos.y <= GROUND_Y {
            self.pos.y = GROUND_Y;
            self.vel_y = 0.0;
            self.on_ground = true;
        }

        self.clamp_and_refresh();
    }

    fn clamp_and_refresh(&mut self) {
        self.pos.x = self.pos.x.clamp(0.0, WORLD_WIDTH - self.hitbox.w);
        self.health = self.health.clamp(0.0, self.max_health);
        self.refresh_hitbox();
    }

    fn refresh_hitbox(&mut self) {
        self.hitbox.set_pos(self.pos.x, self.pos.y);
    }

    /// Melee zone offset in the facing direction; only valid while the attack
    /// window is open and no hit has registered yet
    pub fn attack_hitbox(&self) -> Option<Rect> {
        if !self.attacking {
            return None;
        }
        let w = self.tuning.attack_width;
        let h = self.hitbox.h;
        let x = match self.facing {
            Facing::Right => self.hitbox.x + self.hitbox.w,
            Facing::Left => self.hitbox.x - w,
        };
        Some(Rect::new(x, self.hitbox.y, w, h))
    }

    /// HUD readout: seconds until dash is usable again (0 = ready)
    pub fn dash_remaining(&self) -> f32 {
        self.dash_cooldown.remaining()
    }

    /// HUD readout: seconds until heal is usable again (0 = ready)
    pub fn heal_remaining(&self) -> f32 {
        self.heal_cooldown.remaining()
    }
}

impl Combatant for Player {
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
        if self.is_dead() || !self.damage_cooldown.is_ready() {
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

    fn player() -> Player {
        Player::new(100.0, 0.0, &PlayerTuning::default())
    }

    fn run(p: &mut Player, input: &TickInput, ticks: u32) {
        let mut events = Vec::new();
        for _ in 0..ticks {
            p.tick(SIM_DT, input, &mut events);
        }
    }

    #[test]
    fn test_damage_debounce_single_decrement() {
        let mut p = player();
        p.take_damage(10.0);
        p.take_damage(10.0);
        assert_eq!(p.health, 90.0);
    }

    #[test]
    fn test_damage_applies_again_after_window() {
        let mut p = player();
        p.take_damage(10.0);
        run(&mut p, &TickInput::default(), 30); // 0.5 s > 0.3 s window
        p.take_damage(10.0);
        assert_eq!(p.health, 80.0);
    }

    #[test]
    fn test_heal_no_op_at_full_health() {
        let mut p = player();
        let input = TickInput {
            heal: true,
            ..Default::default()
        };
        let mut events = Vec::new();
        p.tick(SIM_DT, &input, &mut events);
        assert_eq!(p.health, 100.0);
        // cooldown untouched, so a later heal still works immediately
        assert!(p.heal_cooldown.is_ready());
        assert!(events.is_empty());
    }

    #[test]
    fn test_heal_restores_and_arms_cooldown() {
        let mut p = player();
        p.take_damage(50.0);
        let input = TickInput {
            heal: true,
            ..Default::default()
        };
        let mut events = Vec::new();
        p.tick(SIM_DT, &input, &mut events);
        assert_eq!(p.health, 80.0);
        assert!(!p.heal_cooldown.is_ready());
        assert!(events.contains(&GameEvent::Healed));
        // held input does not re-trigger during cooldown
        p.tick(SIM_DT, &input, &mut events);
        assert_eq!(p.health, 80.0);
    }

    #[test]
    fn test_attack_blocked_while_shielding() {
        let mut p = player();
        let input = TickInput {
            attack: true,
            shield: true,
            ..Default::default()
        };
        let mut events = Vec::new();
        p.tick(SIM_DT, &input, &mut events);
        assert!(!p.attacking);
        assert!(p.attack_hitbox().is_none());
    }

    #[test]
    fn test_attack_window_opens_and_closes() {
        let mut p = player();
        let swing = TickInput {
            attack: true,
            ..Default::default()
        };
        let mut events = Vec::new();
        p.tick(SIM_DT, &swing, &mut events);
        assert!(p.attacking);
        let zone = p.attack_hitbox().unwrap();
        // facing right: zone starts at the hitbox's right edge
        assert_eq!(zone.x, p.hitbox.x + p.hitbox.w);
        assert_eq!(zone.w, 60.0);

        run(&mut p, &TickInput::default(), 60); // 1 s > 0.7 s window
        assert!(!p.attacking);
        assert!(p.attack_hitbox().is_none());
    }

    #[test]
    fn test_dash_displaces_and_suspends_gravity() {
        let mut p = player();
        // get airborne so gravity suspension is observable
        p.pos.y = 50.0;
        p.on_ground = false;
        let start_x = p.pos.x;
        let y_before = p.pos.y;
        let input = TickInput {
            dash: true,
            ..Default::default()
        };
        let mut events = Vec::new();
        p.tick(SIM_DT, &input, &mut events);
        assert!(p.dashing);
        assert!(p.pos.x > start_x);
        assert_eq!(p.pos.y, y_before);
        assert!(!p.dash_cooldown.is_ready());
        assert!(events.contains(&GameEvent::Dashed));
    }

    #[test]
    fn test_dash_total_displacement() {
        let mut p = player();
        let start_x = p.pos.x;
        let input = TickInput {
            dash: true,
            ..Default::default()
        };
        run(&mut p, &input, 1);
        run(&mut p, &TickInput::default(), 20);
        assert!(!p.dashing);
        // 0.15 s at 900 px/s, quantized to whole ticks
        let moved = p.pos.x - start_x;
        let per_tick = 900.0 * SIM_DT;
        assert!(moved >= 135.0 - 1e-3 && moved <= 135.0 + per_tick, "{moved}");
    }

    #[test]
    fn test_jump_and_land() {
        let mut p = player();
        let input = TickInput {
            jump: true,
            ..Default::default()
        };
        run(&mut p, &input, 1);
        assert!(!p.on_ground);
        assert!(p.vel_y > 0.0);
        run(&mut p, &TickInput::default(), 120); // 2 s, plenty to land
        assert!(p.on_ground);
        assert_eq!(p.pos.y, 0.0);
    }

    #[test]
    fn test_position_clamped_to_world() {
        let mut p = player();
        p.pos.x = 1.0;
        let input = TickInput {
            move_left: true,
            sprint: true,
            ..Default::default()
        };
        run(&mut p, &input, 10);
        assert_eq!(p.pos.x, 0.0);
        assert_eq!(p.hitbox.x, 0.0);
    }

    #[test]
    fn test_dead_player_ignores_input() {
        let mut p = player();
        p.take_damage(1000.0);
        assert!(p.is_dead());
        let x = p.pos.x;
        let input = TickInput {
            move_right: true,
            ..Default::default()
        };
        run(&mut p, &input, 10);
        assert_eq!(p.pos.x, x);
    }
}
