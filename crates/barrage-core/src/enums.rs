//! Enumeration types used throughout the engine.

use serde::{Deserialize, Serialize};

/// Top-level game phase.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
pub enum GamePhase {
    #[default]
    MainMenu,
    Active,
    Paused,
    StageClear,
    GameOver,
}

/// Stage identifier.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum StageId {
    #[default]
    One,
    Two,
}

/// Playable character identifier.
///
/// All per-character behavior (speed, hitbox, shot, bomb) lives in the
/// character profile table, keyed by this id.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum CharacterId {
    /// Shrine maiden: balanced speed, homing amulets.
    #[default]
    Miko,
    /// Magician: fast, narrow piercing shot.
    Witch,
    /// Puppeteer: slow, wide wavy spread.
    Doll,
}

/// Enemy bullet render color.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
pub enum BulletColor {
    Red,
    Orange,
    Yellow,
    Green,
    Cyan,
    #[default]
    Blue,
    Purple,
    White,
}

/// Enemy bullet movement archetype.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
pub enum BulletMotion {
    /// Constant heading and speed.
    #[default]
    Straight,
    /// Heading rotates at the bullet's angular velocity.
    Curving,
    /// Speed changes at the bullet's acceleration rate.
    Accelerating,
}

/// Player shot movement archetype.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum ShotKind {
    /// Straight up at constant speed.
    #[default]
    Straight,
    /// Fired along its initial heading, never corrected.
    Aimed,
    /// Steers toward the nearest living enemy each tick.
    HomingSeek,
    /// Slow, wide homing shot with a stronger turn rate.
    Seeker,
    /// Reflects off the left/right playfield walls.
    WallBounce,
    /// Decelerates, reverses, and returns down the field.
    Boomerang,
    /// Lateral sine weave around a straight path.
    Wavy,
    /// Wider, slower sine weave.
    WideWavy,
    /// Gains speed along its heading every tick.
    Accelerating,
    /// Loses speed down to a floor.
    Decelerating,
    /// Decelerates to a stall, then accelerates hard (pierces).
    Lance,
    /// Constant speed, survives enemy hits.
    Piercing,
    /// Piercing shot that also homes.
    PiercingHoming,
    /// Accelerating piercing shot.
    Drill,
    /// Heading rotates continuously (corkscrew path).
    Orbiting,
    /// Arcs upward then falls under gravity.
    Rain,
    /// Launched sideways, curving up into the field.
    RiserLeft,
    /// Mirror of `RiserLeft`.
    RiserRight,
    /// Flips its horizontal velocity on a fixed cadence.
    ZigZag,
    /// Strong leftward drift while climbing.
    SideSweepLeft,
    /// Mirror of `SideSweepLeft`.
    SideSweepRight,
    /// Per-tick random jitter on the heading.
    Scatter,
}

impl ShotKind {
    /// Whether this archetype survives enemy hits.
    pub fn piercing(self) -> bool {
        matches!(
            self,
            ShotKind::Piercing | ShotKind::PiercingHoming | ShotKind::Drill | ShotKind::Lance
        )
    }

    /// Whether this archetype tracks an enemy target.
    pub fn homing(self) -> bool {
        matches!(
            self,
            ShotKind::HomingSeek | ShotKind::Seeker | ShotKind::PiercingHoming
        )
    }
}

/// Collectible item type.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
pub enum ItemKind {
    /// Small power increment.
    #[default]
    Power,
    /// Large power increment.
    BigPower,
    /// Fills power to maximum.
    FullPower,
    /// Score item.
    Point,
}

/// Cosmetic particle shape tag.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
pub enum ParticleShape {
    #[default]
    Circle,
    Square,
    Star,
    Spark,
    Ring,
}

/// Bomb effect archetype.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
pub enum BombKind {
    /// Full-field clear, magnetizes all items.
    #[default]
    SpiritSeal,
    /// Full-field clear plus heavy damage to every enemy.
    StarShower,
    /// Full-field clear with an extended immunity window.
    IceVeil,
}
