//! Player commands sent from the frontend to the simulation.
//!
//! Commands are queued and processed at the next tick boundary.

use serde::{Deserialize, Serialize};

use crate::enums::{CharacterId, StageId};

/// One tick's worth of held inputs, as sampled by the frontend.
///
/// Edge detection (pressed-this-tick) is derived inside the engine by
/// comparing consecutive frames.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct InputFrame {
    pub up: bool,
    pub down: bool,
    pub left: bool,
    pub right: bool,
    pub focus: bool,
    pub shoot: bool,
    pub bomb: bool,
}

/// All possible player actions.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(tag = "type")]
pub enum PlayerCommand {
    /// Replace the held-input snapshot for subsequent ticks.
    SetInput { frame: InputFrame },
    /// Select the playable character (main menu only).
    SelectCharacter { character: CharacterId },
    /// Start (or restart) a stage.
    StartStage { stage: StageId },
    /// Advance the active dialogue by one line.
    AdvanceDialogue,
    /// Pause the simulation.
    Pause,
    /// Resume the simulation.
    Resume,
    /// Return to the main menu.
    ReturnToMenu,
}
