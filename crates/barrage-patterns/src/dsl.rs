//! Bullet emitters — the reusable danmaku vocabulary.
//!
//! Every emitter builds bullets from a `template` spec whose `pos` and
//! `angle` are overridden per bullet; color, radius, speed, and motion
//! carry over. Angles are radians, 0 = +x, increasing clockwise in
//! screen space (so `FRAC_PI_2` points straight down at the player side).

use std::f64::consts::TAU;

use rand::Rng;
use rand_chacha::ChaCha8Rng;

use barrage_core::projectile::BulletSpec;
use barrage_core::types::Vec2;

/// Heading from one point toward another.
pub fn aim_angle(from: Vec2, to: Vec2) -> f64 {
    let d = to - from;
    d.y.atan2(d.x)
}

/// A single bullet aimed at `target`.
pub fn aimed(template: BulletSpec, origin: Vec2, target: Vec2) -> BulletSpec {
    BulletSpec {
        pos: origin,
        angle: aim_angle(origin, target),
        ..template
    }
}

/// Evenly spaced full circle of `count` bullets starting at `base_angle`.
pub fn ring(
    out: &mut Vec<BulletSpec>,
    template: BulletSpec,
    origin: Vec2,
    base_angle: f64,
    count: u32,
) {
    if count == 0 {
        return;
    }
    for i in 0..count {
        let angle = base_angle + TAU * i as f64 / count as f64;
        out.push(BulletSpec {
            pos: origin,
            angle,
            ..template
        });
    }
}

/// Fan of `count` bullets centered on `center_angle`, `step` radians apart.
pub fn n_way(
    out: &mut Vec<BulletSpec>,
    template: BulletSpec,
    origin: Vec2,
    center_angle: f64,
    count: u32,
    step: f64,
) {
    if count == 0 {
        return;
    }
    let half = (count - 1) as f64 * 0.5;
    for i in 0..count {
        let angle = center_angle + (i as f64 - half) * step;
        out.push(BulletSpec {
            pos: origin,
            angle,
            ..template
        });
    }
}

/// One bullet per spiral arm, the whole set rotated by `t * spin_rate`.
///
/// Call every few ticks with the phase clock as `t` to trace a spiral.
pub fn spiral(
    out: &mut Vec<BulletSpec>,
    template: BulletSpec,
    origin: Vec2,
    t: f64,
    arms: u32,
    spin_rate: f64,
) {
    ring(out, template, origin, t * spin_rate, arms);
}

/// `count` bullets spread randomly within `spread` radians of
/// `center_angle`, each with a speed jitter of up to `speed_jitter`.
pub fn scatter(
    out: &mut Vec<BulletSpec>,
    template: BulletSpec,
    rng: &mut ChaCha8Rng,
    origin: Vec2,
    center_angle: f64,
    spread: f64,
    speed_jitter: f64,
    count: u32,
) {
    for _ in 0..count {
        let angle = center_angle + rng.gen_range(-spread..=spread) * 0.5;
        let speed = template.speed + rng.gen_range(-speed_jitter..=speed_jitter);
        out.push(BulletSpec {
            pos: origin,
            angle,
            speed: speed.max(10.0),
            ..template
        });
    }
}

/// Expanding ring: a full circle whose bullets accelerate outward from
/// near-standstill. Reads as a slow bloom that bursts.
pub fn expanding_ring(
    out: &mut Vec<BulletSpec>,
    template: BulletSpec,
    origin: Vec2,
    base_angle: f64,
    count: u32,
    acceleration: f64,
) {
    let slow = BulletSpec {
        speed: template.speed * 0.2,
        ..template
    }
    .accelerating(acceleration);
    ring(out, slow, origin, base_angle, count);
}
