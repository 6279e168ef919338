//! Player state.
//!
//! All per-character numbers come from the character profile table; the
//! player struct only tracks runtime state. Input handling, movement,
//! shooting, and bombing live in `systems::player`.

use barrage_core::config::GameConfig;
use barrage_core::constants::{PLAYER_START_X, PLAYER_START_Y, POWER_MAX};
use barrage_core::enums::CharacterId;
use barrage_core::types::{vec2, Vec2};
use barrage_patterns::profiles::{get_profile, CharacterProfile};

pub struct Player {
    pub character: CharacterId,
    pub profile: CharacterProfile,
    pub pos: Vec2,
    pub lives: i32,
    pub bombs: u32,
    pub power: u32,
    pub focused: bool,
    /// Death-immunity window (ticks). Does not grant grazes.
    pub invuln_ticks: u32,
    /// Drift-in window after a death; the player is absent from play.
    pub respawn_ticks: u32,
    pub fire_cooldown: u32,
}

impl Player {
    pub fn new(character: CharacterId, config: &GameConfig) -> Self {
        Self {
            character,
            profile: get_profile(character),
            pos: vec2(PLAYER_START_X, PLAYER_START_Y),
            lives: config.starting_lives,
            bombs: config.starting_bombs,
            power: 0,
            focused: false,
            invuln_ticks: 0,
            respawn_ticks: 0,
            fire_cooldown: 0,
        }
    }

    /// Inside the death-immunity window (or still drifting back in).
    pub fn is_invulnerable(&self) -> bool {
        self.invuln_ticks > 0 || self.respawn_ticks > 0
    }

    pub fn add_power(&mut self, amount: u32) {
        self.power = (self.power + amount).min(POWER_MAX);
    }
}
