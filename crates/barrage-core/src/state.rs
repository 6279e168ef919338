//! Frame snapshot — the complete visible state sent to the frontend each tick.
//!
//! Every view list is built from a pool's active range only; the frontend
//! never sees free slots.

use serde::{Deserialize, Serialize};

use crate::enums::*;
use crate::events::AudioEvent;
use crate::types::{SimTime, Vec2};

/// Complete frame state broadcast to the frontend after each tick.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct FrameSnapshot {
    pub time: SimTime,
    pub phase: GamePhase,
    pub stage: StageId,
    pub character: CharacterId,
    pub player: PlayerView,
    pub bullets: Vec<BulletView>,
    pub shots: Vec<ShotView>,
    pub items: Vec<ItemView>,
    pub particles: Vec<ParticleView>,
    pub enemies: Vec<EnemyView>,
    pub boss: Option<BossView>,
    pub dialogue: Option<DialogueView>,
    pub hud: HudView,
    pub audio_events: Vec<AudioEvent>,
    /// Screen flash alpha (0 = none).
    pub screen_flash: f64,
    /// Camera shake magnitude in pixels.
    pub camera_shake: f64,
    /// Whether enemy bullets/items/background are frozen.
    pub time_stop: bool,
    /// Background scroll offset in pixels.
    pub background_scroll: f64,
}

/// Player render state.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct PlayerView {
    pub position: Vec2,
    pub focused: bool,
    /// Blink the sprite while invulnerable.
    pub invulnerable: bool,
    /// Hidden while drifting back in after a death.
    pub respawning: bool,
    pub hitbox_radius: f64,
    pub show_hitbox: bool,
}

/// One enemy bullet.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct BulletView {
    pub position: Vec2,
    pub radius: f64,
    pub angle: f64,
    pub color: BulletColor,
}

/// One player shot, with its render trail (oldest first).
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ShotView {
    pub position: Vec2,
    pub kind: ShotKind,
    pub trail: Vec<Vec2>,
}

/// One falling or homing item.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ItemView {
    pub position: Vec2,
    pub kind: ItemKind,
}

/// One cosmetic particle.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ParticleView {
    pub position: Vec2,
    pub shape: ParticleShape,
    pub color: BulletColor,
    pub scale: f64,
    pub rotation: f64,
    /// Remaining life fraction (1 = fresh, 0 = expiring), used as alpha.
    pub alpha: f64,
}

/// One non-boss enemy.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct EnemyView {
    pub position: Vec2,
    pub radius: f64,
}

/// Boss status for the HUD and background tint.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct BossView {
    pub position: Vec2,
    pub name: String,
    /// Current spell card name, if the active phase is one.
    pub spell_name: Option<String>,
    pub phase_index: usize,
    pub phase_count: usize,
    /// Remaining HP fraction of the current phase (1.0 for timed phases).
    pub hp_fraction: f64,
    /// Spell-name HUD slide-in progress (0..1), driven by the phase clock.
    pub spell_slide: f64,
}

/// Active dialogue line.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct DialogueView {
    pub speaker: String,
    pub text: String,
}

/// Score panel state.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct HudView {
    pub score: u64,
    pub graze: u64,
    pub lives: i32,
    pub bombs: u32,
    pub power: u32,
    pub power_max: u32,
}
