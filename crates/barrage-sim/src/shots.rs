//! Player shot field.
//!
//! Each shot carries a movement archetype tag; the per-tick steering for
//! every archetype lives in one dispatch below. Homing shots hold an
//! `EnemyToken` and re-acquire the nearest living enemy whenever the
//! token goes stale. On pool exhaustion the spawn request is dropped —
//! bounded spam protection, the opposite policy from enemy bullets.

use rand::Rng;
use rand_chacha::ChaCha8Rng;

use barrage_core::constants::{OFFSCREEN_MARGIN, PLAYER_SHOT_CAP, SHOT_TRAIL_LEN};
use barrage_core::enums::ShotKind;
use barrage_core::types::{Playfield, Vec2};

use crate::enemy::{find_enemy, nearest_enemy, Enemy, EnemyToken};
use crate::pool::Pool;

const HOMING_TURN_RATE: f64 = 6.0;
const SEEKER_TURN_RATE: f64 = 11.0;
const SHOT_ACCEL: f64 = 900.0;
const SHOT_DECEL: f64 = 700.0;
const SHOT_MIN_SPEED: f64 = 90.0;
const BOOMERANG_REVERSAL: f64 = 1400.0;
const WAVY_FREQ: f64 = 18.0;
const WAVY_AMP: f64 = 140.0;
const WIDE_WAVY_FREQ: f64 = 9.0;
const WIDE_WAVY_AMP: f64 = 260.0;
const ORBIT_RATE: f64 = 3.2;
const RAIN_GRAVITY: f64 = 1100.0;
const RISER_TURN: f64 = 2.4;
const ZIGZAG_PERIOD: f64 = 0.22;
const SWEEP_ACCEL: f64 = 520.0;
const SCATTER_JITTER: f64 = 90.0;
const LANCE_STALL_SECS: f64 = 0.25;

/// Ring buffer of recent positions, rendering only.
#[derive(Debug, Clone)]
pub struct Trail {
    points: [Vec2; SHOT_TRAIL_LEN],
    len: usize,
    head: usize,
}

impl Default for Trail {
    fn default() -> Self {
        Self {
            points: [Vec2::ZERO; SHOT_TRAIL_LEN],
            len: 0,
            head: 0,
        }
    }
}

impl Trail {
    pub fn push(&mut self, p: Vec2) {
        self.points[self.head] = p;
        self.head = (self.head + 1) % SHOT_TRAIL_LEN;
        if self.len < SHOT_TRAIL_LEN {
            self.len += 1;
        }
    }

    pub fn len(&self) -> usize {
        self.len
    }

    pub fn is_empty(&self) -> bool {
        self.len == 0
    }

    /// Oldest to newest.
    pub fn iter(&self) -> impl Iterator<Item = Vec2> + '_ {
        (0..self.len).map(move |i| {
            let idx = (self.head + SHOT_TRAIL_LEN - self.len + i) % SHOT_TRAIL_LEN;
            self.points[idx]
        })
    }
}

/// One pooled player shot.
#[derive(Debug, Clone, Default)]
pub struct PlayerShot {
    pub alive: bool,
    pub pos: Vec2,
    pub vel: Vec2,
    pub kind: ShotKind,
    pub damage: f64,
    pub piercing: bool,
    /// Acquired homing target; stale tokens fail the lookup and trigger
    /// re-acquisition.
    pub target: Option<EnemyToken>,
    pub age: f64,
    /// Per-shot phase offset for weaving archetypes.
    pub phase: f64,
    pub trail: Trail,
}

pub struct ShotField {
    pub(crate) pool: Pool<PlayerShot>,
    playfield: Playfield,
    dropped: u64,
}

impl Default for ShotField {
    fn default() -> Self {
        Self::new()
    }
}

impl ShotField {
    pub fn new() -> Self {
        Self {
            pool: Pool::with_capacity(PLAYER_SHOT_CAP),
            playfield: Playfield::default(),
            dropped: 0,
        }
    }

    /// Spawn a shot; the request is dropped when the pool is full.
    pub fn spawn(&mut self, pos: Vec2, angle: f64, speed: f64, kind: ShotKind, damage: f64, phase: f64) {
        let Some(s) = self.pool.acquire() else {
            self.dropped += 1;
            return;
        };
        *s = PlayerShot {
            alive: true,
            pos,
            vel: Vec2::from_angle(angle) * speed,
            kind,
            damage,
            piercing: kind.piercing(),
            target: None,
            age: 0.0,
            phase,
            trail: Trail::default(),
        };
    }

    /// Advance every live shot.
    pub fn update(&mut self, enemies: &[Enemy], rng: &mut ChaCha8Rng, dt: f64) {
        let mut i = 0;
        while i < self.pool.active_count() {
            let s = self.pool.at_mut(i);
            steer(s, enemies, &self.playfield, rng, dt);
            s.pos += s.vel * dt;
            s.trail.push(s.pos);
            s.age += dt;
            if !self.playfield.contains_with_margin(s.pos, OFFSCREEN_MARGIN) {
                s.alive = false;
            }
            if !s.alive {
                self.pool.release(i);
                continue;
            }
            i += 1;
        }
    }

    pub fn active_count(&self) -> usize {
        self.pool.active_count()
    }

    pub fn capacity(&self) -> usize {
        self.pool.capacity()
    }

    /// Spawn requests refused because the pool was full.
    pub fn dropped(&self) -> u64 {
        self.dropped
    }

    pub fn iter(&self) -> impl Iterator<Item = &PlayerShot> {
        self.pool.iter()
    }
}

/// Per-archetype velocity shaping.
fn steer(s: &mut PlayerShot, enemies: &[Enemy], field: &Playfield, rng: &mut ChaCha8Rng, dt: f64) {
    use ShotKind::*;
    match s.kind {
        Straight | Aimed | Piercing => {}
        HomingSeek | PiercingHoming => home(s, enemies, HOMING_TURN_RATE, dt),
        Seeker => home(s, enemies, SEEKER_TURN_RATE, dt),
        WallBounce => {
            if (s.pos.x <= 0.0 && s.vel.x < 0.0) || (s.pos.x >= field.width && s.vel.x > 0.0) {
                s.vel.x = -s.vel.x;
            }
        }
        Boomerang => s.vel.y += BOOMERANG_REVERSAL * dt,
        Wavy => s.vel.x = (s.age * WAVY_FREQ + s.phase).sin() * WAVY_AMP,
        WideWavy => s.vel.x = (s.age * WIDE_WAVY_FREQ + s.phase).sin() * WIDE_WAVY_AMP,
        Accelerating | Drill => scale_speed(s, SHOT_ACCEL * dt),
        Decelerating => {
            let speed = s.vel.length();
            if speed > SHOT_MIN_SPEED {
                scale_speed(s, -(SHOT_DECEL * dt).min(speed - SHOT_MIN_SPEED));
            }
        }
        Lance => {
            if s.age < LANCE_STALL_SECS {
                let speed = s.vel.length();
                if speed > SHOT_MIN_SPEED {
                    scale_speed(s, -(SHOT_DECEL * dt).min(speed - SHOT_MIN_SPEED));
                }
            } else {
                scale_speed(s, SHOT_ACCEL * dt);
            }
        }
        Orbiting => s.vel = Vec2::from_angle(ORBIT_RATE * dt).rotate(s.vel),
        Rain => s.vel.y += RAIN_GRAVITY * dt,
        RiserLeft => s.vel = Vec2::from_angle(-RISER_TURN * dt).rotate(s.vel),
        RiserRight => s.vel = Vec2::from_angle(RISER_TURN * dt).rotate(s.vel),
        ZigZag => {
            let half = ((s.age / ZIGZAG_PERIOD) as u64) % 2 == 0;
            s.vel.x = s.vel.x.abs() * if half { 1.0 } else { -1.0 };
        }
        SideSweepLeft => s.vel.x -= SWEEP_ACCEL * dt,
        SideSweepRight => s.vel.x += SWEEP_ACCEL * dt,
        Scatter => s.vel.x += rng.gen_range(-SCATTER_JITTER..=SCATTER_JITTER) * dt * 60.0,
    }
}

fn scale_speed(s: &mut PlayerShot, delta: f64) {
    let speed = s.vel.length();
    if speed > f64::EPSILON {
        s.vel = s.vel / speed * (speed + delta).max(0.0);
    }
}

/// Steer toward the (re-)acquired target at a bounded turn rate.
fn home(s: &mut PlayerShot, enemies: &[Enemy], turn_rate: f64, dt: f64) {
    let target_pos = match s.target.and_then(|t| find_enemy(t, enemies)) {
        Some(p) => Some(p),
        None => {
            let nearest = nearest_enemy(s.pos, enemies);
            s.target = nearest.map(|(t, _)| t);
            nearest.map(|(_, p)| p)
        }
    };
    // No target: travel straight until something to chase appears.
    let Some(tp) = target_pos else { return };
    let speed = s.vel.length();
    if speed <= f64::EPSILON {
        return;
    }
    let current = s.vel / speed;
    let desired = (tp - s.pos).normalize_or_zero();
    if desired == Vec2::ZERO {
        return;
    }
    let angle_to = current.perp_dot(desired).atan2(current.dot(desired));
    let turn = angle_to.clamp(-turn_rate * dt, turn_rate * dt);
    s.vel = Vec2::from_angle(turn).rotate(current) * speed;
}
