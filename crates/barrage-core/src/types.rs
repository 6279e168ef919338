//! Fundamental geometric and simulation types.

use serde::{Deserialize, Serialize};

/// 2D vector in playfield space (pixels; x = right, y = down).
pub use glam::DVec2 as Vec2;
pub use glam::dvec2 as vec2;

/// Simulation time tracking.
#[derive(Debug, Clone, Copy, Default, Serialize, Deserialize)]
pub struct SimTime {
    /// Current tick number (increments by 1 each tick).
    pub tick: u64,
    /// Elapsed simulation time in seconds.
    pub elapsed_secs: f64,
}

impl SimTime {
    /// Seconds per tick at the default tick rate.
    pub fn dt(&self) -> f64 {
        crate::constants::DT
    }

    /// Advance by one tick.
    pub fn advance(&mut self) {
        self.tick += 1;
        self.elapsed_secs += self.dt();
    }
}

/// The rectangular playfield, anchored at the origin.
#[derive(Debug, Clone, Copy, Serialize, Deserialize)]
pub struct Playfield {
    pub width: f64,
    pub height: f64,
}

impl Default for Playfield {
    fn default() -> Self {
        Self {
            width: crate::constants::PLAYFIELD_WIDTH,
            height: crate::constants::PLAYFIELD_HEIGHT,
        }
    }
}

impl Playfield {
    /// Whether a point lies inside the field expanded by `margin` on every side.
    pub fn contains_with_margin(&self, p: Vec2, margin: f64) -> bool {
        p.x >= -margin && p.x <= self.width + margin && p.y >= -margin && p.y <= self.height + margin
    }

    /// Clamp a point to the field, inset by `inset` on every side.
    pub fn clamp_inset(&self, p: Vec2, inset: f64) -> Vec2 {
        vec2(
            p.x.clamp(inset, self.width - inset),
            p.y.clamp(inset, self.height - inset),
        )
    }

    /// Center of the field.
    pub fn center(&self) -> Vec2 {
        vec2(self.width * 0.5, self.height * 0.5)
    }
}
