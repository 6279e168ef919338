//! Stage state — everything the per-frame systems and script actions
//! mutate.
//!
//! This is the contract pattern callbacks and script actions are written
//! against: pooled fields, the enemy list, the player, flags, and the
//! stage-local clock. The script engine itself lives outside (in the
//! engine) so actions can freely mutate the stage.

use rand::SeedableRng;
use rand_chacha::ChaCha8Rng;

use barrage_core::config::GameConfig;
use barrage_core::enums::{CharacterId, StageId};
use barrage_core::events::AudioEvent;
use barrage_core::types::Playfield;

use crate::bullets::BulletField;
use crate::delayed::DelayedQueue;
use crate::dialogue::DialogueManager;
use crate::enemy::{Enemy, EnemyToken};
use crate::items::ItemField;
use crate::particles::ParticleField;
use crate::player::Player;
use crate::shots::ShotField;

/// Running score state.
#[derive(Debug, Clone, Copy, Default)]
pub struct ScoreState {
    pub score: u64,
    pub graze: u64,
}

pub struct Stage {
    pub config: GameConfig,
    pub stage_id: StageId,
    pub playfield: Playfield,
    pub rng: ChaCha8Rng,
    pub player: Player,
    pub bullets: BulletField,
    pub shots: ShotField,
    pub items: ItemField,
    pub particles: ParticleField,
    pub enemies: Vec<Enemy>,
    pub delayed: DelayedQueue,
    pub dialogue: DialogueManager,
    pub score: ScoreState,
    /// Fire-and-forget cues drained into each snapshot.
    pub audio: Vec<AudioEvent>,
    /// Enemy bullets, items, and the background are frozen while set.
    pub time_stop: bool,
    pub screen_flash: f64,
    pub camera_shake: f64,
    pub background_scroll: f64,
    /// Stage-local sim clock; keys the delayed-burst queue.
    pub elapsed: f64,
    next_token: u32,
}

impl Stage {
    pub fn new(config: GameConfig, character: CharacterId, stage_id: StageId) -> Self {
        Self {
            config,
            stage_id,
            playfield: Playfield::default(),
            rng: ChaCha8Rng::seed_from_u64(config.seed),
            player: Player::new(character, &config),
            bullets: BulletField::new(),
            shots: ShotField::new(),
            items: ItemField::new(),
            particles: ParticleField::new(),
            enemies: Vec::new(),
            delayed: DelayedQueue::new(),
            dialogue: DialogueManager::new(),
            score: ScoreState::default(),
            audio: Vec::new(),
            time_stop: false,
            screen_flash: 0.0,
            camera_shake: 0.0,
            background_scroll: 0.0,
            elapsed: 0.0,
            next_token: 0,
        }
    }

    /// Next stable enemy identifier. Never reused within a stage.
    pub fn next_token(&mut self) -> EnemyToken {
        let token = EnemyToken(self.next_token);
        self.next_token += 1;
        token
    }

    /// Whether a living boss suspends the stage script.
    pub fn boss_active(&self) -> bool {
        self.enemies.iter().any(|e| e.alive && e.is_boss)
    }

    pub fn spawn_enemy(&mut self, enemy: Enemy) {
        self.enemies.push(enemy);
    }
}
