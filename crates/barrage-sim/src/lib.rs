//! Simulation engine for BARRAGE.
//!
//! Owns the stage state (pooled projectile fields, enemy list, script
//! timeline), runs the per-frame systems in a fixed order, and produces
//! `FrameSnapshot`s for the frontend. Completely headless (no Tauri
//! dependency), enabling deterministic testing.

pub mod bullets;
pub mod delayed;
pub mod dialogue;
pub mod enemy;
pub mod engine;
pub mod items;
pub mod particles;
pub mod player;
pub mod pool;
pub mod script;
pub mod shots;
pub mod stage;
pub mod stages;
pub mod systems;

pub use barrage_core as core;
pub use engine::StageEngine;

#[cfg(test)]
mod tests;
