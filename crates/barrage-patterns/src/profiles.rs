//! Playable character descriptors.
//!
//! Everything that used to be per-character branching is a record here:
//! stats, shot archetypes, and bomb archetype. Adding a character is a
//! data change, dispatched by `CharacterId` lookup.

use barrage_core::enums::{BombKind, CharacterId, ShotKind};

/// Full capability set for a playable character.
#[derive(Debug, Clone, Copy)]
pub struct CharacterProfile {
    pub name: &'static str,
    /// Movement speed, unfocused (pixels/s).
    pub unfocused_speed: f64,
    /// Movement speed while focused.
    pub focused_speed: f64,
    /// Lethal hitbox radius.
    pub hitbox_radius: f64,
    /// Graze detection radius.
    pub graze_radius: f64,
    /// Archetype of the paired main shots.
    pub main_shot: ShotKind,
    /// Archetype of the option shots unlocked by power.
    pub option_shot: ShotKind,
    pub main_damage: f64,
    pub option_damage: f64,
    /// Ticks between volleys while the shoot key is held.
    pub fire_interval_ticks: u32,
    /// Launch speed of main shots (pixels/s).
    pub shot_speed: f64,
    pub bomb: BombKind,
    pub bomb_name: &'static str,
}

/// Look up the descriptor for a character.
pub fn get_profile(character: CharacterId) -> CharacterProfile {
    match character {
        CharacterId::Miko => CharacterProfile {
            name: "Hazuki",
            unfocused_speed: 220.0,
            focused_speed: 110.0,
            hitbox_radius: 3.0,
            graze_radius: 16.0,
            main_shot: ShotKind::Straight,
            option_shot: ShotKind::HomingSeek,
            main_damage: 8.0,
            option_damage: 5.0,
            fire_interval_ticks: 4,
            shot_speed: 520.0,
            bomb: BombKind::SpiritSeal,
            bomb_name: "Spirit Sign \u{300c}Binding Circle\u{300d}",
        },
        CharacterId::Witch => CharacterProfile {
            name: "Corin",
            unfocused_speed: 260.0,
            focused_speed: 130.0,
            hitbox_radius: 2.5,
            graze_radius: 15.0,
            main_shot: ShotKind::Accelerating,
            option_shot: ShotKind::Drill,
            main_damage: 10.0,
            option_damage: 3.0,
            fire_interval_ticks: 5,
            shot_speed: 460.0,
            bomb: BombKind::StarShower,
            bomb_name: "Star Sign \u{300c}Meteoric Shower\u{300d}",
        },
        CharacterId::Doll => CharacterProfile {
            name: "Elise",
            unfocused_speed: 180.0,
            focused_speed: 90.0,
            hitbox_radius: 3.5,
            graze_radius: 18.0,
            main_shot: ShotKind::WideWavy,
            option_shot: ShotKind::WallBounce,
            main_damage: 7.0,
            option_damage: 6.0,
            fire_interval_ticks: 4,
            shot_speed: 420.0,
            bomb: BombKind::IceVeil,
            bomb_name: "Frost Sign \u{300c}Porcelain Veil\u{300d}",
        },
    }
}
