//! Enemy bullet spawn descriptor.
//!
//! Patterns emit `BulletSpec`s; the bullet field turns them into pooled
//! bullets. Keeping the descriptor in core lets the pattern crate stay
//! independent of the engine.

use serde::{Deserialize, Serialize};

use crate::enums::{BulletColor, BulletMotion};
use crate::types::Vec2;

/// Everything needed to spawn one enemy bullet.
#[derive(Debug, Clone, Copy, Serialize, Deserialize)]
pub struct BulletSpec {
    pub pos: Vec2,
    /// Initial heading in radians (0 = +x, increases clockwise in screen space).
    pub angle: f64,
    /// Initial speed (pixels/s).
    pub speed: f64,
    /// Heading change rate (radians/s), used by `Curving` bullets.
    pub angular_velocity: f64,
    /// Speed change rate (pixels/s²), used by `Accelerating` bullets.
    pub acceleration: f64,
    /// Visual/graze radius.
    pub radius: f64,
    pub color: BulletColor,
    pub motion: BulletMotion,
}

impl BulletSpec {
    /// A straight bullet with the default radius and color.
    pub fn new(pos: Vec2, angle: f64, speed: f64) -> Self {
        Self {
            pos,
            angle,
            speed,
            angular_velocity: 0.0,
            acceleration: 0.0,
            radius: 4.0,
            color: BulletColor::default(),
            motion: BulletMotion::Straight,
        }
    }

    pub fn with_color(mut self, color: BulletColor) -> Self {
        self.color = color;
        self
    }

    pub fn with_radius(mut self, radius: f64) -> Self {
        self.radius = radius;
        self
    }

    /// Turn into a curving bullet with the given angular velocity.
    pub fn curving(mut self, angular_velocity: f64) -> Self {
        self.motion = BulletMotion::Curving;
        self.angular_velocity = angular_velocity;
        self
    }

    /// Turn into an accelerating bullet with the given acceleration.
    pub fn accelerating(mut self, acceleration: f64) -> Self {
        self.motion = BulletMotion::Accelerating;
        self.acceleration = acceleration;
        self
    }
}
