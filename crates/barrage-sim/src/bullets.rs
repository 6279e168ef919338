//! Enemy bullet field — the largest pool in the game.
//!
//! Bullets re-derive their velocity from angle/speed each tick so that
//! curving and accelerating archetypes stay exact regardless of frame
//! pacing. On pool exhaustion the field grows by one slot rather than
//! dropping the spawn: a missing bullet is a visible hole in a pattern.

use barrage_core::constants::{CLEAR_PARTICLE_CAP, ENEMY_BULLET_CAP, OFFSCREEN_MARGIN};
use barrage_core::enums::{BulletColor, BulletMotion};
use barrage_core::projectile::BulletSpec;
use barrage_core::types::{Playfield, Vec2};

use crate::particles::ParticleField;
use crate::pool::Pool;

/// One pooled enemy bullet.
#[derive(Debug, Clone, Default)]
pub struct Bullet {
    pub alive: bool,
    pub pos: Vec2,
    pub vel: Vec2,
    /// Heading in radians.
    pub angle: f64,
    /// Speed along the heading (pixels/s).
    pub speed: f64,
    pub angular_velocity: f64,
    pub acceleration: f64,
    pub radius: f64,
    pub color: BulletColor,
    pub motion: BulletMotion,
    /// Set once the player has scored a near-miss on this bullet.
    pub grazed: bool,
}

pub struct BulletField {
    pub(crate) pool: Pool<Bullet>,
    playfield: Playfield,
    grown: usize,
}

impl Default for BulletField {
    fn default() -> Self {
        Self::new()
    }
}

impl BulletField {
    pub fn new() -> Self {
        Self {
            pool: Pool::with_capacity(ENEMY_BULLET_CAP),
            playfield: Playfield::default(),
            grown: 0,
        }
    }

    /// Spawn one bullet, growing the pool on exhaustion.
    pub fn spawn(&mut self, spec: &BulletSpec) {
        if self.pool.is_full() {
            self.grown += 1;
            if self.grown == 1 {
                log::warn!(
                    "enemy bullet pool exhausted; growing beyond {} slots",
                    ENEMY_BULLET_CAP
                );
            }
        }
        let b = self.pool.acquire_or_grow();
        *b = Bullet {
            alive: true,
            pos: spec.pos,
            vel: Vec2::from_angle(spec.angle) * spec.speed,
            angle: spec.angle,
            speed: spec.speed,
            angular_velocity: spec.angular_velocity,
            acceleration: spec.acceleration,
            radius: spec.radius,
            color: spec.color,
            motion: spec.motion,
            grazed: false,
        };
    }

    /// Drain a spec buffer into the field.
    pub fn spawn_batch(&mut self, specs: &mut Vec<BulletSpec>) {
        for spec in specs.drain(..) {
            self.spawn(&spec);
        }
    }

    /// Advance every live bullet; cull off-screen ones.
    pub fn update(&mut self, dt: f64) {
        let mut i = 0;
        while i < self.pool.active_count() {
            let b = self.pool.at_mut(i);
            match b.motion {
                BulletMotion::Straight => {}
                BulletMotion::Curving => b.angle += b.angular_velocity * dt,
                BulletMotion::Accelerating => b.speed = (b.speed + b.acceleration * dt).max(0.0),
            }
            b.vel = Vec2::from_angle(b.angle) * b.speed;
            b.pos += b.vel * dt;
            if !self.playfield.contains_with_margin(b.pos, OFFSCREEN_MARGIN) {
                b.alive = false;
            }
            if !b.alive {
                // revisit the swapped-in slot
                self.pool.release(i);
                continue;
            }
            i += 1;
        }
    }

    /// Deactivate every live bullet (bomb / boss-death sweep), emitting
    /// at most `CLEAR_PARTICLE_CAP` cleanup wisps. Returns how many
    /// bullets were cleared.
    pub fn clear(&mut self, particles: &mut ParticleField) -> u32 {
        let cleared = self.pool.active_count();
        for i in 0..cleared {
            let b = self.pool.at_mut(i);
            b.alive = false;
            let (pos, color) = (b.pos, b.color);
            if i < CLEAR_PARTICLE_CAP {
                particles.clear_wisp(pos, color);
            }
        }
        self.pool.release_all();
        cleared as u32
    }

    pub fn active_count(&self) -> usize {
        self.pool.active_count()
    }

    pub fn capacity(&self) -> usize {
        self.pool.capacity()
    }

    /// Slots added beyond the configured capacity.
    pub fn grown(&self) -> usize {
        self.grown
    }

    pub fn iter(&self) -> impl Iterator<Item = &Bullet> {
        self.pool.iter()
    }
}
