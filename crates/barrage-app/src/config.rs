//! Config file loading.
//!
//! Read once at game-loop startup. Any failure — missing file, bad JSON —
//! falls back to defaults with a log line; the game never refuses to
//! start over a settings problem.

use std::fs;
use std::path::Path;

use barrage_core::config::GameConfig;

/// Settings file name, looked up in the working directory.
pub const CONFIG_FILE: &str = "barrage.config.json";

pub fn load_config(path: &Path) -> GameConfig {
    match fs::read_to_string(path) {
        Ok(text) => match serde_json::from_str(&text) {
            Ok(config) => config,
            Err(err) => {
                log::warn!("malformed {}: {}; using defaults", path.display(), err);
                GameConfig::default()
            }
        },
        Err(_) => {
            log::info!("no config at {}; using defaults", path.display());
            GameConfig::default()
        }
    }
}
