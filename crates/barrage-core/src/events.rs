//! Events emitted by the simulation for audio and UI feedback.
//!
//! Fire-and-forget: the engine never waits on or checks the result of a
//! cue; the frontend sound system consumes them from each snapshot.

use serde::{Deserialize, Serialize};

use crate::enums::{BombKind, ItemKind};

/// Audio cues for the frontend sound system.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(tag = "type")]
pub enum AudioEvent {
    /// Player fired a volley.
    PlayerShoot,
    /// Near-miss scored on an enemy bullet.
    Graze,
    /// Player lost a life.
    PlayerHit,
    /// Bomb detonated.
    Bomb { kind: BombKind },
    /// An enemy took shot damage.
    EnemyHit,
    /// An enemy was destroyed.
    EnemyDestroyed,
    /// An item was collected.
    ItemCollect { kind: ItemKind },
    /// A boss entered a named spell card phase.
    SpellCardStart { name: String },
    /// Start a boss's battle theme.
    BossTheme { name: String },
    /// Stop the boss theme (boss defeated or fled).
    StopBossTheme,
    /// A dialogue line was presented.
    DialogueAdvance,
}
