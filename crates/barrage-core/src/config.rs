//! Persisted player configuration.
//!
//! Read once by the app shell at startup and handed to the engine at
//! stage construction. Every field has a default so a partial or missing
//! file degrades gracefully.

use serde::{Deserialize, Serialize};

/// Local settings and debug toggles.
#[derive(Debug, Clone, Copy, Serialize, Deserialize)]
#[serde(default)]
pub struct GameConfig {
    /// Lives at stage start.
    pub starting_lives: i32,
    /// Bombs at stage start (and after each death).
    pub starting_bombs: u32,
    /// RNG seed. Same seed = same simulation within a session.
    pub seed: u64,
    /// Debug: the player cannot die (still grazes).
    pub god_mode: bool,
    /// Debug: bombing never consumes a bomb.
    pub infinite_bombs: bool,
    /// Render the player hitbox.
    pub show_hitbox: bool,
}

impl Default for GameConfig {
    fn default() -> Self {
        Self {
            starting_lives: 3,
            starting_bombs: 3,
            seed: 42,
            god_mode: false,
            infinite_bombs: false,
            show_hitbox: false,
        }
    }
}
