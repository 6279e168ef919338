//! Cosmetic particle field.
//!
//! Purely visual — nothing in gameplay reads a particle. When the pool
//! is full the particle closest to expiry is recycled in place, so a
//! heavy frame degrades effects instead of growing memory.

use std::f64::consts::TAU;

use rand::Rng;
use rand_chacha::ChaCha8Rng;

use barrage_core::constants::PARTICLE_CAP;
use barrage_core::enums::{BulletColor, ParticleShape};
use barrage_core::types::{vec2, Vec2};

use crate::pool::Pool;

/// One pooled particle.
#[derive(Debug, Clone)]
pub struct Particle {
    pub alive: bool,
    pub pos: Vec2,
    pub vel: Vec2,
    pub color: BulletColor,
    pub shape: ParticleShape,
    /// Remaining life in seconds; the particle dies at zero.
    pub life: f64,
    pub max_life: f64,
    /// Downward acceleration (pixels/s²).
    pub gravity: f64,
    /// Per-second velocity retention factor (1.0 = frictionless).
    pub friction: f64,
    pub scale: f64,
    pub scale_rate: f64,
    pub rotation: f64,
    pub rotation_rate: f64,
}

impl Default for Particle {
    fn default() -> Self {
        Self {
            alive: false,
            pos: Vec2::ZERO,
            vel: Vec2::ZERO,
            color: BulletColor::default(),
            shape: ParticleShape::default(),
            life: 0.0,
            max_life: 1.0,
            gravity: 0.0,
            friction: 1.0,
            scale: 1.0,
            scale_rate: 0.0,
            rotation: 0.0,
            rotation_rate: 0.0,
        }
    }
}

pub struct ParticleField {
    pub(crate) pool: Pool<Particle>,
}

impl Default for ParticleField {
    fn default() -> Self {
        Self::new()
    }
}

impl ParticleField {
    pub fn new() -> Self {
        Self {
            pool: Pool::with_capacity(PARTICLE_CAP),
        }
    }

    /// Spawn a particle; recycles the one closest to expiry when full.
    pub fn spawn(&mut self, particle: Particle) {
        if let Some(slot) = self.pool.acquire() {
            *slot = particle;
            return;
        }
        let mut oldest = 0;
        let mut least_life = f64::INFINITY;
        for (i, p) in self.pool.iter().enumerate() {
            if p.life < least_life {
                least_life = p.life;
                oldest = i;
            }
        }
        *self.pool.at_mut(oldest) = particle;
    }

    /// Advance every live particle. Particles run even under time-stop.
    pub fn update(&mut self, dt: f64) {
        let mut i = 0;
        while i < self.pool.active_count() {
            let p = self.pool.at_mut(i);
            p.life -= dt;
            if p.life <= 0.0 {
                p.alive = false;
                self.pool.release(i);
                continue;
            }
            p.vel.y += p.gravity * dt;
            p.vel *= p.friction.powf(dt);
            p.pos += p.vel * dt;
            p.scale = (p.scale + p.scale_rate * dt).max(0.0);
            p.rotation += p.rotation_rate * dt;
            i += 1;
        }
    }

    /// Radial explosion burst (enemy deaths, player hits).
    pub fn burst(&mut self, pos: Vec2, color: BulletColor, count: u32, rng: &mut ChaCha8Rng) {
        for _ in 0..count {
            let angle = rng.gen_range(0.0..TAU);
            let speed = rng.gen_range(40.0..160.0);
            let life = rng.gen_range(0.3..0.7);
            self.spawn(Particle {
                alive: true,
                pos,
                vel: Vec2::from_angle(angle) * speed,
                color,
                shape: ParticleShape::Spark,
                life,
                max_life: life,
                gravity: 60.0,
                friction: 0.2,
                scale: rng.gen_range(0.6..1.2),
                scale_rate: -0.8,
                rotation: angle,
                rotation_rate: rng.gen_range(-6.0..6.0),
            });
        }
    }

    /// Single graze/impact spark.
    pub fn spark(&mut self, pos: Vec2, color: BulletColor, rng: &mut ChaCha8Rng) {
        let angle = rng.gen_range(0.0..TAU);
        self.spawn(Particle {
            alive: true,
            pos,
            vel: Vec2::from_angle(angle) * rng.gen_range(60.0..120.0),
            color,
            shape: ParticleShape::Spark,
            life: 0.25,
            max_life: 0.25,
            friction: 0.1,
            scale: 0.8,
            ..Default::default()
        });
    }

    /// Deterministic upward wisp left behind by a cleared bullet.
    pub fn clear_wisp(&mut self, pos: Vec2, color: BulletColor) {
        self.spawn(Particle {
            alive: true,
            pos,
            vel: vec2(0.0, -30.0),
            color,
            shape: ParticleShape::Ring,
            life: 0.5,
            max_life: 0.5,
            scale: 0.5,
            scale_rate: 2.0,
            ..Default::default()
        });
    }

    pub fn active_count(&self) -> usize {
        self.pool.active_count()
    }

    pub fn iter(&self) -> impl Iterator<Item = &Particle> {
        self.pool.iter()
    }
}
