//! World state and core simulation types
//!
//! Everything the simulation mutates lives here, owned in one place: the
//! combatants, the projectile collections, the encounter counters, and the
//! seeded RNG. Collaborators (rendering, audio, input) only ever see
//! snapshots: state enums, positions, and the drained event list.

use rand::SeedableRng;
use rand_pcg::Pcg32;
use serde::{Deserialize, Serialize};

use crate::consts::WORLD_WIDTH;
use crate::tuning::Tuning;

use super::boss::Boss;
use super::enemy::Enemy;
use super::player::Player;
use super::projectile::{Bomb, Bullet, Explosion};

/// Global phase of the encounter
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum GamePhase {
    /// Intro dialog; the combat world is frozen
    Dialog,
    /// Wave spawn/clear cycles
    Explore,
    /// Boss fight
    Combat,
    /// Boss defeated (terminal)
    Victory,
    /// Player died (terminal)
    GameOver,
}

impl GamePhase {
    /// Terminal phases: no further simulation ticks affect combatants
    pub fn is_terminal(self) -> bool {
        matches!(self, GamePhase::Victory | GamePhase::GameOver)
    }
}

/// Discrete simulation events for the audio/presentation collaborators.
/// Fire-and-forget: drained by the embedder each frame, never read back by
/// the simulation.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum GameEvent {
    AttackSwung,
    HitLanded,
    Dashed,
    Healed,
    EnemyShot,
    BossShot,
    BombThrown,
    BombExploded,
    EnemyDied,
    BossActivated,
    BossDied,
    PlayerDied,
}

/// Serializable RNG seed wrapper. Snapshots carry only the seed; a restored
/// world calls [`WorldState::reseed_rng`] to rebuild the live generator.
#[derive(Debug, Clone, Copy, Serialize, Deserialize)]
pub struct RngState {
    pub seed: u64,
}

impl RngState {
    pub fn new(seed: u64) -> Self {
        Self { seed }
    }

    pub fn to_rng(&self) -> Pcg32 {
        Pcg32::seed_from_u64(self.seed)
    }
}

fn skipped_rng() -> Pcg32 {
    Pcg32::seed_from_u64(0)
}

/// Complete encounter state (deterministic for a fixed seed + input script)
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct WorldState {
    /// Run seed for reproducibility
    pub seed: u64,
    pub rng_state: RngState,
    /// Live generator; every random draw in the simulation goes through
    /// this. Not serialized: deserialization leaves a placeholder and the
    /// embedder must call [`WorldState::reseed_rng`] before ticking.
    #[serde(skip, default = "skipped_rng")]
    pub rng: Pcg32,

    pub phase: GamePhase,
    /// Simulation tick counter
    pub time_ticks: u64,
    /// Intro dialog progress
    pub dialog_index: u32,

    // Encounter bookkeeping
    pub kill_count: u32,
    pub wave_index: u32,

    pub player: Player,
    pub enemies: Vec<Enemy>,
    pub boss: Boss,

    // World-owned projectile collections; AI only ever appends
    pub bullets: Vec<Bullet>,
    pub bombs: Vec<Bomb>,
    pub explosions: Vec<Explosion>,

    /// Events raised this tick (cleared at the start of every tick)
    #[serde(skip)]
    pub events: Vec<GameEvent>,

    pub tuning: Tuning,
}

impl WorldState {
    /// Create a fresh encounter with the given seed and balance sheet.
    /// The first enemy wave is spawned immediately; it stays frozen until
    /// the dialog phase ends.
    pub fn new(seed: u64, tuning: Tuning) -> Self {
        let mut state = Self {
            seed,
            rng_state: RngState::new(seed),
            rng: Pcg32::seed_from_u64(seed),
            phase: GamePhase::Dialog,
            time_ticks: 0,
            dialog_index: 0,
            kill_count: 0,
            wave_index: 0,
            player: Player::new(100.0, 0.0, &tuning.player),
            enemies: Vec::new(),
            boss: Boss::new(
                WORLD_WIDTH - tuning.boss.hitbox_w - 300.0,
                0.0,
                &tuning.boss,
                &tuning.bomb,
            ),
            bullets: Vec::new(),
            bombs: Vec::new(),
            explosions: Vec::new(),
            events: Vec::new(),
            tuning,
        };
        super::director::spawn_wave(&mut state);
        state
    }

    /// Create with canonical balance
    pub fn with_seed(seed: u64) -> Self {
        Self::new(seed, Tuning::default())
    }

    /// Rebuild the live generator from the serialized seed. Restoring a
    /// snapshot replays the run's draw sequence from the start, not from the
    /// snapshot point.
    pub fn reseed_rng(&mut self) {
        self.rng = self.rng_state.to_rng();
    }
}
