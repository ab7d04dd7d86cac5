//! Data-driven game balance
//!
//! Every gameplay constant lives here so encounters can be rebalanced from a
//! JSON file without touching simulation code. `Default` carries the
//! canonical values the game ships with.

use serde::{Deserialize, Serialize};

/// Player ability and movement balance
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(default)]
pub struct PlayerTuning {
    pub max_health: f32,
    /// Walk speed (px/s)
    pub walk_speed: f32,
    /// Sprint speed while the sprint modifier is held
    pub sprint_speed: f32,
    /// Reduced speed while shielding
    pub shield_speed: f32,
    /// Downward acceleration (px/s^2, negative)
    pub gravity: f32,
    /// Upward velocity applied on jump
    pub jump_impulse: f32,
    /// Dash burst: fixed duration at fixed speed, gated by cooldown
    pub dash_duration: f32,
    pub dash_speed: f32,
    pub dash_cooldown: f32,
    /// Heal: flat restore up to max, gated by cooldown
    pub heal_amount: f32,
    pub heal_cooldown: f32,
    /// Attack window duration and melee zone width
    pub attack_duration: f32,
    pub attack_width: f32,
    /// Damage dealt per landed swing to enemies / to the boss
    pub melee_damage_enemy: f32,
    pub melee_damage_boss: f32,
    /// Invulnerability window after taking damage
    pub damage_cooldown: f32,
    /// Hitbox size
    pub hitbox_w: f32,
    pub hitbox_h: f32,
}

impl Default for PlayerTuning {
    fn default() -> Self {
        Self {
            max_health: 100.0,
            walk_speed: 200.0,
            sprint_speed: 550.0,
            shield_speed: 100.0,
            gravity: -800.0,
            jump_impulse: 400.0,
            dash_duration: 0.15,
            dash_speed: 900.0,
            dash_cooldown: 3.0,
            heal_amount: 30.0,
            heal_cooldown: 5.0,
            attack_duration: 0.7,
            attack_width: 60.0,
            melee_damage_enemy: 100.0,
            melee_damage_boss: 30.0,
            damage_cooldown: 0.3,
            hitbox_w: 100.0,
            hitbox_h: 155.0,
        }
    }
}

/// Enemy AI bands and timers
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(default)]
pub struct EnemyTuning {
    pub max_health: f32,
    pub speed: f32,
    /// Horizontal center distance at which the enemy notices the player
    pub detection_radius: f32,
    /// Idle reaction time after detection before the enemy may act
    pub detect_delay: f32,
    /// Inside this band the enemy stops and attacks instead of chasing
    pub attack_range: f32,
    /// Patrol leg length bounds (random per leg)
    pub patrol_min_move: f32,
    pub patrol_max_move: f32,
    /// Attack window and the fire offset within it
    pub attack_duration: f32,
    pub fire_delay: f32,
    pub shoot_cooldown: f32,
    pub bullet_speed: f32,
    pub bullet_damage: f32,
    pub bullet_size: f32,
    pub damage_cooldown: f32,
    /// Time a dead body lingers before the director removes it
    pub death_linger: f32,
    pub hitbox_w: f32,
    pub hitbox_h: f32,
}

impl Default for EnemyTuning {
    fn default() -> Self {
        Self {
            max_health: 100.0,
            speed: 100.0,
            detection_radius: 450.0,
            detect_delay: 2.0,
            attack_range: 300.0,
            patrol_min_move: 100.0,
            patrol_max_move: 300.0,
            attack_duration: 0.4,
            fire_delay: 0.2,
            shoot_cooldown: 2.0,
            bullet_speed: 500.0,
            bullet_damage: 10.0,
            bullet_size: 20.0,
            damage_cooldown: 0.35,
            death_linger: 0.5,
            hitbox_w: 128.0,
            hitbox_h: 128.0,
        }
    }
}

/// Boss decision thresholds, cooldowns, and trial probabilities
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(default)]
pub struct BossTuning {
    pub max_health: f32,
    pub speed: f32,
    /// Outside this range the boss idles entirely
    pub engage_range: f32,
    /// Inside this range the boss stops chasing and may burst
    pub burst_range: f32,
    /// Roll is only considered at or inside this distance
    pub roll_range: f32,
    pub roll_distance: f32,
    pub roll_speed: f32,
    pub roll_cooldown: f32,
    /// Bernoulli success probability per ready tick
    pub roll_chance: f64,
    pub bomb_cooldown: f32,
    pub bomb_chance: f64,
    /// Burst: fixed shot count at a fixed sub-interval; cooldown armed after
    /// the last shot only
    pub burst_count: u32,
    pub burst_interval: f32,
    pub shoot_cooldown: f32,
    pub bullet_speed: f32,
    pub bullet_damage: f32,
    pub bullet_size: f32,
    pub damage_cooldown: f32,
    pub hitbox_w: f32,
    pub hitbox_h: f32,
}

impl Default for BossTuning {
    fn default() -> Self {
        Self {
            max_health: 500.0,
            speed: 150.0,
            engage_range: 800.0,
            burst_range: 300.0,
            roll_range: 400.0,
            roll_distance: 420.0,
            roll_speed: 450.0,
            roll_cooldown: 12.0,
            roll_chance: 0.35,
            bomb_cooldown: 5.0,
            bomb_chance: 0.25,
            burst_count: 3,
            burst_interval: 0.18,
            shoot_cooldown: 2.8,
            bullet_speed: 350.0,
            bullet_damage: 10.0,
            bullet_size: 40.0,
            damage_cooldown: 0.3,
            hitbox_w: 180.0,
            hitbox_h: 220.0,
        }
    }
}

/// Bomb and explosion balance
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(default)]
pub struct BombTuning {
    pub size: f32,
    /// Horizontal speed toward the target side
    pub speed_x: f32,
    /// Fixed descent rate (negative)
    pub fall_speed: f32,
    /// Direct contact damage to an unshielded target
    pub contact_damage: f32,
    pub explosion_radius: f32,
    pub explosion_life: f32,
    pub explosion_damage: f32,
}

impl Default for BombTuning {
    fn default() -> Self {
        Self {
            size: 50.0,
            speed_x: 200.0,
            fall_speed: -200.0,
            contact_damage: 20.0,
            explosion_radius: 100.0,
            explosion_life: 0.3,
            explosion_damage: 40.0,
        }
    }
}

/// Encounter pacing: waves, kill targets, dialog
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(default)]
pub struct EncounterTuning {
    pub wave_size: u32,
    pub kill_target: u32,
    /// Displayed kill count after defeating the boss
    pub win_target: u32,
    /// First-wave spawn band (narrow, away from the start position)
    pub first_wave_spawn_min: f32,
    pub first_wave_spawn_max: f32,
    /// Later waves spawn across a wider band
    pub spawn_min: f32,
    pub spawn_max: f32,
    pub dialog_lines: u32,
}

impl Default for EncounterTuning {
    fn default() -> Self {
        Self {
            wave_size: 4,
            kill_target: 20,
            win_target: 21,
            first_wave_spawn_min: 1000.0,
            first_wave_spawn_max: 2000.0,
            spawn_min: 200.0,
            spawn_max: 2000.0,
            dialog_lines: 3,
        }
    }
}

/// Complete balance sheet for one encounter
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
#[serde(default)]
pub struct Tuning {
    pub player: PlayerTuning,
    pub enemy: EnemyTuning,
    pub boss: BossTuning,
    pub bomb: BombTuning,
    pub encounter: EncounterTuning,
}

impl Tuning {
    /// Parse a tuning sheet from JSON. Missing sections fall back to defaults.
    pub fn from_json(json: &str) -> Result<Self, serde_json::Error> {
        serde_json::from_str(json)
    }

    /// Load from a file, falling back to defaults (with a warning) on any error
    pub fn load_or_default(path: &str) -> Self {
        match std::fs::read_to_string(path) {
            Ok(text) => match Self::from_json(&text) {
                Ok(t) => t,
                Err(e) => {
                    log::warn!("invalid tuning file {path}: {e}; using defaults");
                    Self::default()
                }
            },
            Err(e) => {
                log::warn!("cannot read tuning file {path}: {e}; using defaults");
                Self::default()
            }
        }
    }
}
