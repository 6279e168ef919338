//! Enemies and the boss phase runner.
//!
//! Enemies are not pooled (small cardinality) — they live in the stage's
//! `Vec<Enemy>` and are swept once per frame. A boss is an enemy with
//! `is_boss` set and more than one phase; the phase state machine is
//! identical for both.
//!
//! Pattern callbacks are trusted, author-controlled content: they get the
//! enemy's own body, a read-only context, the stage RNG, and an output
//! buffer. They never reach into the scene.

use rand_chacha::ChaCha8Rng;

use barrage_core::enums::ItemKind;
use barrage_core::events::AudioEvent;
use barrage_core::projectile::BulletSpec;
use barrage_core::types::Vec2;

/// Stable enemy identifier. Monotonic per stage, never reused, so a
/// homing shot holding a stale token simply fails the lookup and
/// re-acquires instead of chasing a recycled slot.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct EnemyToken(pub u32);

/// The mutable transform handed to pattern callbacks.
#[derive(Debug, Clone, Copy, Default)]
pub struct EnemyBody {
    pub pos: Vec2,
    pub vel: Vec2,
    pub radius: f64,
}

/// Read-only situation for one pattern invocation.
pub struct PatternCtx {
    pub player_pos: Vec2,
    /// Seconds since the current phase began.
    pub phase_elapsed: f64,
    pub dt: f64,
    pub tick: u64,
}

/// Everything a pattern may emit in one invocation.
#[derive(Default)]
pub struct PatternOut {
    pub bullets: Vec<BulletSpec>,
    /// Bursts scheduled on the stage clock: (delay seconds, bullets).
    pub delayed: Vec<(f64, Vec<BulletSpec>)>,
    pub audio: Vec<AudioEvent>,
    /// Request to enter or leave time-stop.
    pub time_stop: Option<bool>,
}

impl PatternOut {
    pub fn clear(&mut self) {
        self.bullets.clear();
        self.delayed.clear();
        self.audio.clear();
        self.time_stop = None;
    }
}

/// Per-frame movement + attack callback.
pub type PatternFn =
    Box<dyn FnMut(&mut EnemyBody, &PatternCtx, &mut ChaCha8Rng, &mut PatternOut) + Send>;

/// One attack phase: an HP budget, a time budget, or both.
pub struct Phase {
    /// Spell card name; set for named boss attacks.
    pub spell_name: Option<String>,
    /// HP budget; `None` means the phase cannot be cleared by damage.
    pub hp: Option<f64>,
    /// Time budget in seconds; `None` means the phase never times out.
    pub time_limit: Option<f64>,
    /// When set, the time budget elapsing does not end the phase.
    pub must_clear: bool,
    pub pattern: PatternFn,
}

impl Phase {
    /// Damage-gated phase.
    pub fn new(hp: f64, pattern: PatternFn) -> Self {
        Self {
            spell_name: None,
            hp: Some(hp),
            time_limit: None,
            must_clear: false,
            pattern,
        }
    }

    /// Time-gated phase (survival).
    pub fn timed(secs: f64, pattern: PatternFn) -> Self {
        Self {
            spell_name: None,
            hp: None,
            time_limit: Some(secs),
            must_clear: false,
            pattern,
        }
    }

    /// Named spell card with both budgets.
    pub fn spell(name: &str, hp: f64, time_limit: f64, pattern: PatternFn) -> Self {
        Self {
            spell_name: Some(name.to_string()),
            hp: Some(hp),
            time_limit: Some(time_limit),
            must_clear: false,
            pattern,
        }
    }

    pub fn with_time_limit(mut self, secs: f64) -> Self {
        self.time_limit = Some(secs);
        self
    }

    pub fn with_must_clear(mut self) -> Self {
        self.must_clear = true;
        self
    }
}

/// Result of applying damage, mirrored by timeout transitions.
#[derive(Debug, Clone, Copy, Default)]
pub struct DamageResult {
    pub died: bool,
    pub phase_changed: bool,
}

pub struct Enemy {
    pub token: EnemyToken,
    pub body: EnemyBody,
    pub spawn_pos: Vec2,
    pub alive: bool,
    /// Set when the enemy died to damage (drops + score), as opposed to
    /// timing out or leaving the field.
    pub defeated: bool,
    pub is_boss: bool,
    pub name: String,
    /// Boss battle theme key, played when the script pushes the boss.
    pub theme: Option<String>,
    pub phases: Vec<Phase>,
    pub phase_index: usize,
    /// Phase-local clock: drives the pattern callback and HUD slide-in.
    pub phase_elapsed: f64,
    /// Remaining HP budget of the current phase (infinite for timed-only).
    pub phase_hp: f64,
    pub score_value: u64,
    pub drops: Vec<ItemKind>,
}

impl Enemy {
    pub fn new(token: EnemyToken, pos: Vec2, radius: f64, phases: Vec<Phase>) -> Self {
        let phase_hp = phases
            .first()
            .map(|p| p.hp.unwrap_or(f64::INFINITY))
            .unwrap_or(0.0);
        Self {
            token,
            body: EnemyBody {
                pos,
                vel: Vec2::ZERO,
                radius,
            },
            spawn_pos: pos,
            alive: !phases.is_empty(),
            defeated: false,
            is_boss: false,
            name: String::new(),
            theme: None,
            phases,
            phase_index: 0,
            phase_elapsed: 0.0,
            phase_hp,
            score_value: 0,
            drops: Vec::new(),
        }
    }

    pub fn boss(mut self, name: &str, theme: &str) -> Self {
        self.is_boss = true;
        self.name = name.to_string();
        self.theme = Some(theme.to_string());
        self
    }

    pub fn with_score(mut self, score: u64) -> Self {
        self.score_value = score;
        self
    }

    pub fn with_drops(mut self, drops: Vec<ItemKind>) -> Self {
        self.drops = drops;
        self
    }

    pub fn current_phase(&self) -> Option<&Phase> {
        self.phases.get(self.phase_index)
    }

    /// Whether the active phase is a named spell card.
    pub fn is_spell(&self) -> bool {
        self.current_phase()
            .map(|p| p.spell_name.is_some())
            .unwrap_or(false)
    }

    /// Remaining HP fraction of the current phase (1.0 for timed phases).
    pub fn hp_fraction(&self) -> f64 {
        match self.current_phase().and_then(|p| p.hp) {
            Some(budget) if budget > 0.0 => (self.phase_hp / budget).clamp(0.0, 1.0),
            _ => 1.0,
        }
    }

    /// Apply damage, overflowing leftover damage into the next phase.
    /// Damage is consumed exactly once — 150 into 100/100 phases leaves
    /// the second phase at 50.
    pub fn take_damage(&mut self, amount: f64) -> DamageResult {
        let mut result = DamageResult::default();
        if !self.alive {
            return result;
        }
        let mut remaining = amount;
        while remaining > 0.0 && self.alive {
            if self.phase_hp > remaining {
                self.phase_hp -= remaining;
                break;
            }
            remaining -= self.phase_hp;
            self.advance_phase();
            result.phase_changed = true;
        }
        result.died = !self.alive;
        if result.died {
            self.defeated = true;
        }
        result
    }

    fn advance_phase(&mut self) {
        self.phase_index += 1;
        if self.phase_index >= self.phases.len() {
            self.alive = false;
            return;
        }
        self.phase_elapsed = 0.0;
        self.phase_hp = self.phases[self.phase_index].hp.unwrap_or(f64::INFINITY);
    }

    /// Run one frame: pattern callback, movement integration, phase clock,
    /// timeout transition.
    pub fn update(&mut self, ctx: &PatternCtx, rng: &mut ChaCha8Rng, out: &mut PatternOut) {
        if !self.alive {
            return;
        }
        let Some(phase) = self.phases.get_mut(self.phase_index) else {
            self.alive = false;
            return;
        };
        (phase.pattern)(&mut self.body, ctx, rng, out);
        self.body.pos += self.body.vel * ctx.dt;
        self.phase_elapsed += ctx.dt;

        let timed_out = phase
            .time_limit
            .map(|limit| self.phase_elapsed >= limit)
            .unwrap_or(false);
        if timed_out && !phase.must_clear {
            self.advance_phase();
            if self.alive {
                if let Some(name) = self
                    .current_phase()
                    .and_then(|p| p.spell_name.clone())
                {
                    out.audio.push(AudioEvent::SpellCardStart { name });
                }
            }
        }
    }
}

/// Nearest living enemy to a point, for homing acquisition.
pub fn nearest_enemy(pos: Vec2, enemies: &[Enemy]) -> Option<(EnemyToken, Vec2)> {
    let mut best: Option<(EnemyToken, Vec2)> = None;
    let mut best_d2 = f64::INFINITY;
    for enemy in enemies {
        if !enemy.alive {
            continue;
        }
        let d2 = enemy.body.pos.distance_squared(pos);
        if d2 < best_d2 {
            best_d2 = d2;
            best = Some((enemy.token, enemy.body.pos));
        }
    }
    best
}

/// Position of a live enemy by token, if it still exists.
pub fn find_enemy(token: EnemyToken, enemies: &[Enemy]) -> Option<Vec2> {
    enemies
        .iter()
        .find(|e| e.alive && e.token == token)
        .map(|e| e.body.pos)
}
