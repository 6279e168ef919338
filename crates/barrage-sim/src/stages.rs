//! Built-in stage scripts.
//!
//! A stage is a timeline of one-shot actions: enemy waves, dialogue,
//! boss pushes. Beats are spaced so that a boss-suspended timeline has a
//! boss-less gap to settle in before the next event fires.

use std::f64::consts::FRAC_PI_2;

use barrage_core::enums::{BulletColor, ItemKind, StageId};
use barrage_core::events::AudioEvent;
use barrage_core::projectile::BulletSpec;
use barrage_core::types::{vec2, Vec2};
use barrage_patterns::dsl;
use barrage_patterns::motion::{self, MoveContext, MovePlan};

use crate::dialogue::DialogueLine;
use crate::enemy::{Enemy, EnemyToken, Phase, PatternFn};
use crate::script::{ScriptEvent, StageScript};
use crate::stage::Stage;

/// Resolve a stage id to its script. Unknown stages fall back to the
/// first stage rather than failing.
pub fn load_stage(stage: StageId) -> StageScript {
    match stage {
        StageId::One => stage_one(),
        other => {
            log::warn!("stage {:?} has no script yet; falling back to stage one", other);
            stage_one()
        }
    }
}

/// True once per `interval` seconds of phase time.
fn volley_due(elapsed: f64, interval: f64, fired: &mut u32) -> bool {
    let due = (elapsed / interval) as u32;
    if due > *fired {
        *fired = due;
        true
    } else {
        false
    }
}

/// Popcorn fairy: one phase, moves per its plan, fires aimed shots.
fn fairy(
    token: EnemyToken,
    pos: Vec2,
    plan: MovePlan,
    fire_interval: f64,
    color: BulletColor,
    drops: Vec<ItemKind>,
) -> Enemy {
    let spawn_pos = pos;
    let mut fired = 0u32;
    let pattern: PatternFn = Box::new(move |body, ctx, _rng, out| {
        let mctx = MoveContext {
            spawn_pos,
            position: body.pos,
            elapsed: ctx.phase_elapsed,
        };
        body.vel = motion::evaluate(&plan, &mctx);
        if volley_due(ctx.phase_elapsed, fire_interval, &mut fired) {
            let template = BulletSpec::new(Vec2::ZERO, 0.0, 150.0).with_color(color);
            out.bullets.push(dsl::aimed(template, body.pos, ctx.player_pos));
        }
    });
    Enemy::new(token, pos, 10.0, vec![Phase::new(24.0, pattern).with_time_limit(25.0)])
        .with_score(300)
        .with_drops(drops)
}

/// Sturdier fairy that fires full rings on a slow cadence.
fn ring_fairy(token: EnemyToken, pos: Vec2, hold: Vec2, drops: Vec<ItemKind>) -> Enemy {
    let spawn_pos = pos;
    let plan = MovePlan::EnterHoldLeave {
        target: hold,
        approach_secs: 1.2,
        hold_secs: 6.0,
        leave_velocity: vec2(0.0, -90.0),
    };
    let mut fired = 0u32;
    let pattern: PatternFn = Box::new(move |body, ctx, _rng, out| {
        let mctx = MoveContext {
            spawn_pos,
            position: body.pos,
            elapsed: ctx.phase_elapsed,
        };
        body.vel = motion::evaluate(&plan, &mctx);
        if volley_due(ctx.phase_elapsed, 1.4, &mut fired) {
            let template = BulletSpec::new(Vec2::ZERO, 0.0, 110.0).with_color(BulletColor::Green);
            dsl::ring(&mut out.bullets, template, body.pos, fired as f64 * 0.23, 14);
        }
    });
    Enemy::new(token, pos, 12.0, vec![Phase::new(90.0, pattern).with_time_limit(12.0)])
        .with_score(800)
        .with_drops(drops)
}

/// Midboss: one nonspell, one spell with delayed lattice bursts.
fn midboss(token: EnemyToken) -> Enemy {
    let hold = vec2(192.0, 96.0);

    let mut fired = 0u32;
    let nonspell: PatternFn = Box::new(move |body, ctx, _rng, out| {
        let mctx = MoveContext {
            spawn_pos: vec2(192.0, -24.0),
            position: body.pos,
            elapsed: ctx.phase_elapsed,
        };
        let plan = MovePlan::EnterHoldLeave {
            target: hold,
            approach_secs: 1.0,
            hold_secs: 1e9,
            leave_velocity: Vec2::ZERO,
        };
        body.vel = motion::evaluate(&plan, &mctx);
        if volley_due(ctx.phase_elapsed, 0.8, &mut fired) {
            let template = BulletSpec::new(Vec2::ZERO, 0.0, 160.0).with_color(BulletColor::Red);
            let aim = dsl::aim_angle(body.pos, ctx.player_pos);
            dsl::n_way(&mut out.bullets, template, body.pos, aim, 3, 0.22);
        }
    });

    let mut spiral_fired = 0u32;
    let mut burst_fired = 0u32;
    let spell: PatternFn = Box::new(move |body, ctx, _rng, out| {
        // Slow horizontal weave while holding altitude.
        body.vel = vec2((ctx.phase_elapsed * 1.1).sin() * 40.0, 0.0);
        if volley_due(ctx.phase_elapsed, 0.12, &mut spiral_fired) {
            let template = BulletSpec::new(Vec2::ZERO, 0.0, 130.0).with_color(BulletColor::Purple);
            dsl::spiral(&mut out.bullets, template, body.pos, ctx.phase_elapsed, 4, 1.7);
        }
        if volley_due(ctx.phase_elapsed, 1.2, &mut burst_fired) {
            // Lattice burst: lands half a second later, aimed at where
            // the player was when it was scheduled.
            let template = BulletSpec::new(Vec2::ZERO, 0.0, 200.0).with_color(BulletColor::Cyan);
            let mut burst = Vec::new();
            let aim = dsl::aim_angle(body.pos, ctx.player_pos);
            dsl::n_way(&mut burst, template, body.pos, aim, 5, 0.14);
            out.delayed.push((0.5, burst));
        }
    });

    Enemy::new(
        token,
        vec2(192.0, -24.0),
        16.0,
        vec![
            Phase::new(250.0, nonspell).with_time_limit(20.0),
            Phase::spell("Gate Sign \u{300c}Iron Lattice\u{300d}", 350.0, 30.0, spell),
        ],
    )
    .boss("Rin", "midboss")
    .with_score(10_000)
    .with_drops(vec![ItemKind::BigPower, ItemKind::Point, ItemKind::Point])
}

/// Stage boss: two nonspells, a cascade spell, and a time-stop finale.
fn boss(token: EnemyToken) -> Enemy {
    let hold = vec2(192.0, 88.0);
    let enter = MovePlan::EnterHoldLeave {
        target: hold,
        approach_secs: 1.5,
        hold_secs: 1e9,
        leave_velocity: Vec2::ZERO,
    };

    let mut fan_fired = 0u32;
    let mut ring_fired = 0u32;
    let nonspell_one: PatternFn = Box::new(move |body, ctx, _rng, out| {
        let mctx = MoveContext {
            spawn_pos: vec2(192.0, -32.0),
            position: body.pos,
            elapsed: ctx.phase_elapsed,
        };
        body.vel = motion::evaluate(&enter, &mctx);
        if volley_due(ctx.phase_elapsed, 0.7, &mut fan_fired) {
            let template = BulletSpec::new(Vec2::ZERO, 0.0, 170.0).with_color(BulletColor::Blue);
            let aim = dsl::aim_angle(body.pos, ctx.player_pos);
            dsl::n_way(&mut out.bullets, template, body.pos, aim, 5, 0.18);
        }
        if volley_due(ctx.phase_elapsed, 1.6, &mut ring_fired) {
            let template = BulletSpec::new(Vec2::ZERO, 0.0, 120.0).with_color(BulletColor::Yellow);
            dsl::ring(&mut out.bullets, template, body.pos, ring_fired as f64 * 0.31, 18);
        }
    });

    let mut bloom_fired = 0u32;
    let mut rain_fired = 0u32;
    let cascade: PatternFn = Box::new(move |body, ctx, rng, out| {
        body.vel = vec2((ctx.phase_elapsed * 0.9).sin() * 55.0, 0.0);
        if volley_due(ctx.phase_elapsed, 1.0, &mut bloom_fired) {
            let template = BulletSpec::new(Vec2::ZERO, 0.0, 180.0).with_color(BulletColor::White);
            dsl::expanding_ring(
                &mut out.bullets,
                template,
                body.pos,
                bloom_fired as f64 * 0.47,
                24,
                90.0,
            );
        }
        if volley_due(ctx.phase_elapsed, 0.25, &mut rain_fired) {
            let template = BulletSpec::new(Vec2::ZERO, 0.0, 140.0).with_color(BulletColor::Cyan);
            dsl::scatter(&mut out.bullets, template, rng, body.pos, FRAC_PI_2, 1.4, 40.0, 3);
        }
    });

    let mut weave_fired = 0u32;
    let nonspell_two: PatternFn = Box::new(move |body, ctx, _rng, out| {
        body.vel = vec2((ctx.phase_elapsed * 1.4).cos() * 70.0, 0.0);
        if volley_due(ctx.phase_elapsed, 0.3, &mut weave_fired) {
            let template = BulletSpec::new(Vec2::ZERO, 0.0, 150.0).with_color(BulletColor::Orange);
            let base = weave_fired as f64 * 0.7;
            dsl::n_way(&mut out.bullets, template.curving(0.5), body.pos, FRAC_PI_2 + base.sin(), 4, 0.35);
        }
    });

    // Finale: freeze the field for the first stretch of each cycle,
    // place a lattice of stationary rings, then release them all at once
    // when the freeze lifts.
    let mut placed = 0u32;
    let finale: PatternFn = Box::new(move |body, ctx, _rng, out| {
        body.vel = vec2(0.0, ((ctx.phase_elapsed * 0.8).sin()) * 18.0);
        let cycle_t = ctx.phase_elapsed % 6.0;
        out.time_stop = Some(cycle_t < 2.5);
        if cycle_t < 2.5 {
            if volley_due(ctx.phase_elapsed, 0.4, &mut placed) {
                let template = BulletSpec::new(Vec2::ZERO, 0.0, 95.0).with_color(BulletColor::Purple);
                dsl::ring(
                    &mut out.bullets,
                    template,
                    body.pos + vec2((placed as f64 * 53.0) % 160.0 - 80.0, (placed as f64 * 31.0) % 120.0),
                    placed as f64 * 0.41,
                    12,
                );
            }
        }
    });

    Enemy::new(
        token,
        vec2(192.0, -32.0),
        18.0,
        vec![
            Phase::new(400.0, nonspell_one).with_time_limit(25.0),
            Phase::spell("Moon Sign \u{300c}Silver Cascade\u{300d}", 450.0, 35.0, cascade),
            Phase::new(400.0, nonspell_two).with_time_limit(25.0),
            Phase::spell(
                "Eternity \u{300c}The Clock That Stops the World\u{300d}",
                500.0,
                45.0,
                finale,
            )
            .with_must_clear(),
        ],
    )
    .boss("Lady Midnight", "midnight")
    .with_score(100_000)
    .with_drops(vec![
        ItemKind::FullPower,
        ItemKind::Point,
        ItemKind::Point,
        ItemKind::Point,
    ])
}

/// Stage one: two fairy flights, ring fairies, a drift column, the
/// gatekeeper midboss, two more waves, then the stage boss.
pub fn stage_one() -> StageScript {
    let mut events = Vec::new();

    // Opening flight from the left.
    events.push(ScriptEvent::new(0.8, |stage: &mut Stage| {
        for i in 0..5 {
            let token = stage.next_token();
            let pos = vec2(-16.0, 40.0 + i as f64 * 22.0);
            stage.spawn_enemy(fairy(
                token,
                pos,
                MovePlan::Sweep {
                    velocity: vec2(130.0, 28.0),
                },
                1.1,
                BulletColor::Blue,
                vec![ItemKind::Power],
            ));
        }
    }));

    // Mirrored flight from the right.
    events.push(ScriptEvent::new(3.5, |stage: &mut Stage| {
        for i in 0..5 {
            let token = stage.next_token();
            let pos = vec2(400.0, 40.0 + i as f64 * 22.0);
            stage.spawn_enemy(fairy(
                token,
                pos,
                MovePlan::Sweep {
                    velocity: vec2(-130.0, 28.0),
                },
                1.1,
                BulletColor::Red,
                vec![ItemKind::Power],
            ));
        }
    }));

    // Ring fairies park at the top corners.
    events.push(ScriptEvent::new(7.0, |stage: &mut Stage| {
        let left = stage.next_token();
        stage.spawn_enemy(ring_fairy(
            left,
            vec2(96.0, -16.0),
            vec2(96.0, 90.0),
            vec![ItemKind::Power, ItemKind::Point],
        ));
        let right = stage.next_token();
        stage.spawn_enemy(ring_fairy(
            right,
            vec2(288.0, -16.0),
            vec2(288.0, 90.0),
            vec![ItemKind::Power, ItemKind::Point],
        ));
    }));

    // Weaving column down the middle.
    events.push(ScriptEvent::new(11.0, |stage: &mut Stage| {
        for i in 0..6 {
            let token = stage.next_token();
            let pos = vec2(160.0 + (i % 2) as f64 * 64.0, -16.0 - i as f64 * 26.0);
            stage.spawn_enemy(fairy(
                token,
                pos,
                MovePlan::SineDrift {
                    descent: 85.0,
                    amplitude: 60.0,
                    frequency: 0.35,
                },
                0.9,
                BulletColor::Green,
                vec![ItemKind::Power],
            ));
        }
    }));

    // Midboss beat.
    events.push(ScriptEvent::new(15.0, |stage: &mut Stage| {
        stage.dialogue.start(vec![
            DialogueLine::new("Rin", "The gate is closed. Turn back."),
            DialogueLine::new("You", "The gate is in my way."),
        ]);
    }));
    events.push(ScriptEvent::new(15.5, |stage: &mut Stage| {
        let token = stage.next_token();
        let midboss = midboss(token);
        if let Some(theme) = midboss.theme.clone() {
            stage.audio.push(AudioEvent::BossTheme { name: theme });
        }
        stage.spawn_enemy(midboss);
    }));

    // Post-midboss waves (fire once the midboss falls and the gap passes).
    events.push(ScriptEvent::new(17.5, |stage: &mut Stage| {
        for i in 0..4 {
            let token = stage.next_token();
            let pos = vec2(-16.0, 30.0 + i as f64 * 30.0);
            stage.spawn_enemy(fairy(
                token,
                pos,
                MovePlan::Glide {
                    initial: vec2(190.0, 55.0),
                    damping: 0.55,
                },
                0.8,
                BulletColor::Cyan,
                vec![ItemKind::Power],
            ));
        }
    }));
    events.push(ScriptEvent::new(21.0, |stage: &mut Stage| {
        let token = stage.next_token();
        stage.spawn_enemy(ring_fairy(
            token,
            vec2(192.0, -16.0),
            vec2(192.0, 80.0),
            vec![ItemKind::BigPower, ItemKind::Point],
        ));
    }));

    // Boss beat.
    events.push(ScriptEvent::new(26.0, |stage: &mut Stage| {
        stage.dialogue.start(vec![
            DialogueLine::new("Lady Midnight", "You broke my gate."),
            DialogueLine::new("You", "It was already broken."),
            DialogueLine::new("Lady Midnight", "Then I will stop the clock instead."),
        ]);
    }));
    events.push(ScriptEvent::new(27.0, |stage: &mut Stage| {
        let token = stage.next_token();
        let boss = boss(token);
        if let Some(theme) = boss.theme.clone() {
            stage.audio.push(AudioEvent::BossTheme { name: theme });
        }
        stage.spawn_enemy(boss);
    }));

    // Victory rain, after the boss settles.
    events.push(ScriptEvent::new(28.5, |stage: &mut Stage| {
        for i in 0..8 {
            let pos = vec2(48.0 + i as f64 * 42.0, -12.0);
            stage.items.spawn(pos, ItemKind::Point, &mut stage.rng);
        }
    }));

    StageScript { events }
}
