//! Tests for the pools, collision pass, phase runner, script engine, and
//! the engine's frame orchestration.

use rand::{Rng, SeedableRng};
use rand_chacha::ChaCha8Rng;

use barrage_core::commands::{InputFrame, PlayerCommand};
use barrage_core::config::GameConfig;
use barrage_core::constants::*;
use barrage_core::enums::{CharacterId, GamePhase, ItemKind, StageId};
use barrage_core::events::AudioEvent;
use barrage_core::projectile::BulletSpec;
use barrage_core::types::{vec2, Vec2};

use crate::bullets::BulletField;
use crate::delayed::DelayedQueue;
use crate::dialogue::DialogueLine;
use crate::enemy::{Enemy, EnemyToken, PatternCtx, PatternFn, PatternOut, Phase};
use crate::engine::StageEngine;
use crate::particles::{Particle, ParticleField};
use crate::pool::Pool;
use crate::script::{ScriptEngine, ScriptEvent};
use crate::shots::{ShotField, Trail};
use crate::stage::Stage;
use crate::stages;
use crate::systems;

fn test_config() -> GameConfig {
    GameConfig {
        seed: 7,
        ..Default::default()
    }
}

fn test_stage() -> Stage {
    Stage::new(test_config(), CharacterId::Miko, StageId::One)
}

fn noop_pattern() -> PatternFn {
    Box::new(|_, _, _, _| {})
}

fn marker_event(time: f64, name: &'static str) -> ScriptEvent {
    ScriptEvent::new(time, move |stage: &mut Stage| {
        stage.audio.push(AudioEvent::BossTheme {
            name: name.to_string(),
        })
    })
}

fn marker_names(audio: &[AudioEvent]) -> Vec<String> {
    audio
        .iter()
        .filter_map(|e| match e {
            AudioEvent::BossTheme { name } => Some(name.clone()),
            _ => None,
        })
        .collect()
}

// ---- Pool ----

#[test]
fn test_pool_invariant_spawn_to_capacity() {
    #[derive(Default)]
    struct Slot {
        alive: bool,
    }

    let mut pool: Pool<Slot> = Pool::with_capacity(8);
    for _ in 0..8 {
        let slot = pool.acquire().expect("free slot below capacity");
        slot.alive = true;
    }
    assert_eq!(pool.active_count(), 8);
    assert!(pool.acquire().is_none(), "full pool must refuse acquire");
    assert_eq!(pool.capacity(), 8);
    assert!(pool.iter().all(|s| s.alive));
}

#[test]
fn test_pool_swap_release_updates_each_entity_exactly_once() {
    #[derive(Default, Clone)]
    struct Slot {
        alive: bool,
        updates: u32,
        dies_this_frame: bool,
    }

    let mut pool: Pool<Slot> = Pool::with_capacity(16);
    for i in 0..10 {
        let slot = pool.acquire().unwrap();
        *slot = Slot {
            alive: true,
            updates: 0,
            // interleaved deactivations, including the first and last
            dies_this_frame: i % 3 == 0,
        };
    }

    // One update pass with self-removal mid-iteration.
    let mut i = 0;
    while i < pool.active_count() {
        let slot = pool.at_mut(i);
        slot.updates += 1;
        if slot.dies_this_frame {
            slot.alive = false;
        }
        if !slot.alive {
            pool.release(i);
            continue;
        }
        i += 1;
    }

    assert_eq!(pool.active_count(), 6);
    // Every slot — survivors and released alike — was updated exactly once.
    for i in 0..10 {
        assert_eq!(pool.at(i).updates, 1, "slot {} update count", i);
    }
    for slot in pool.iter() {
        assert!(slot.alive);
    }
}

// ---- Bullet field ----

/// End-to-end scenario A: 2000 spawns fit the configured capacity with
/// no growth.
#[test]
fn test_bullet_field_two_thousand_spawns_no_growth() {
    let mut field = BulletField::new();
    let center = vec2(PLAYFIELD_WIDTH * 0.5, PLAYFIELD_HEIGHT * 0.5);
    for _ in 0..2000 {
        field.spawn(&BulletSpec::new(center, 0.0, 0.0));
    }
    field.update(DT);
    assert_eq!(field.active_count(), 2000);
    assert_eq!(field.capacity(), ENEMY_BULLET_CAP);
    assert_eq!(field.grown(), 0);
}

#[test]
fn test_bullet_field_grows_past_capacity() {
    let mut field = BulletField::new();
    let center = vec2(190.0, 220.0);
    for _ in 0..ENEMY_BULLET_CAP + 3 {
        field.spawn(&BulletSpec::new(center, 0.0, 0.0));
    }
    assert_eq!(field.active_count(), ENEMY_BULLET_CAP + 3);
    assert_eq!(field.grown(), 3);
}

#[test]
fn test_bullet_field_culls_offscreen() {
    let mut field = BulletField::new();
    // Flies straight down from just above the bottom edge.
    field.spawn(&BulletSpec::new(
        vec2(100.0, PLAYFIELD_HEIGHT + OFFSCREEN_MARGIN - 5.0),
        std::f64::consts::FRAC_PI_2,
        600.0,
    ));
    field.update(DT);
    assert_eq!(field.active_count(), 0);
}

/// End-to-end scenario C: clearing 500 bullets emits at most the particle cap.
#[test]
fn test_bullet_clear_caps_particles() {
    let mut field = BulletField::new();
    let mut particles = ParticleField::new();
    let center = vec2(190.0, 220.0);
    for _ in 0..500 {
        field.spawn(&BulletSpec::new(center, 0.0, 50.0));
    }
    let cleared = field.clear(&mut particles);
    assert_eq!(cleared, 500);
    assert_eq!(field.active_count(), 0);
    assert!(particles.active_count() <= CLEAR_PARTICLE_CAP);
    assert_eq!(particles.active_count(), CLEAR_PARTICLE_CAP);
}

// ---- Shot field ----

#[test]
fn test_shot_field_drops_spawns_when_full() {
    let mut field = ShotField::new();
    for _ in 0..PLAYER_SHOT_CAP + 10 {
        field.spawn(vec2(100.0, 400.0), -1.5, 400.0, Default::default(), 8.0, 0.0);
    }
    assert_eq!(field.active_count(), PLAYER_SHOT_CAP);
    assert_eq!(field.dropped(), 10);
}

#[test]
fn test_homing_shot_reacquires_after_target_death() {
    use barrage_core::enums::ShotKind;

    let mut field = ShotField::new();
    field.spawn(vec2(200.0, 300.0), -1.5, 300.0, ShotKind::HomingSeek, 5.0, 0.0);

    let mut enemies = vec![
        Enemy::new(EnemyToken(0), vec2(100.0, 100.0), 10.0, vec![Phase::new(10.0, noop_pattern())]),
        Enemy::new(EnemyToken(1), vec2(260.0, 120.0), 10.0, vec![Phase::new(10.0, noop_pattern())]),
    ];
    let mut rng = ChaCha8Rng::seed_from_u64(1);

    field.update(&enemies, &mut rng, DT);
    let first = field.iter().next().unwrap().target;
    assert!(first.is_some());

    // Kill the acquired target: the stale token must fail the lookup and
    // the shot re-acquire the survivor.
    let dead = first.unwrap();
    enemies
        .iter_mut()
        .find(|e| e.token == dead)
        .unwrap()
        .alive = false;
    field.update(&enemies, &mut rng, DT);
    let second = field.iter().next().unwrap().target;
    assert!(second.is_some());
    assert_ne!(second.unwrap(), dead);
}

#[test]
fn test_trail_keeps_most_recent_positions() {
    let mut trail = Trail::default();
    for i in 0..12 {
        trail.push(vec2(i as f64, 0.0));
    }
    assert_eq!(trail.len(), SHOT_TRAIL_LEN);
    let points: Vec<Vec2> = trail.iter().collect();
    assert_eq!(points.first().unwrap().x, (12 - SHOT_TRAIL_LEN) as f64);
    assert_eq!(points.last().unwrap().x, 11.0);
}

#[test]
fn test_boomerang_shot_reverses() {
    use barrage_core::enums::ShotKind;

    let mut field = ShotField::new();
    field.spawn(vec2(200.0, 300.0), -std::f64::consts::FRAC_PI_2, 300.0, ShotKind::Boomerang, 5.0, 0.0);
    let mut rng = ChaCha8Rng::seed_from_u64(1);
    let enemies: Vec<Enemy> = Vec::new();

    assert!(field.iter().next().unwrap().vel.y < 0.0);
    // 20 ticks (~0.33 s): past the reversal point, still on the field.
    for _ in 0..20 {
        field.update(&enemies, &mut rng, DT);
    }
    let s = field.iter().next().expect("shot still on the field");
    assert!(s.vel.y > 0.0, "boomerang should have reversed by now");
}

// ---- Particles ----

#[test]
fn test_particle_pool_recycles_oldest_when_full() {
    let mut field = ParticleField::new();
    for i in 0..PARTICLE_CAP {
        field.spawn(Particle {
            alive: true,
            life: 1.0 + i as f64,
            max_life: 10.0,
            ..Default::default()
        });
    }
    assert_eq!(field.active_count(), PARTICLE_CAP);

    // One more: recycled in place, count unchanged, and the shortest-
    // lived particle is the one replaced.
    field.spawn(Particle {
        alive: true,
        life: 99.0,
        max_life: 99.0,
        ..Default::default()
    });
    assert_eq!(field.active_count(), PARTICLE_CAP);
    let min_life = field.iter().map(|p| p.life).fold(f64::INFINITY, f64::min);
    assert!(min_life >= 2.0, "the life=1.0 particle should be gone");
}

#[test]
fn test_particles_expire() {
    let mut field = ParticleField::new();
    field.spawn(Particle {
        alive: true,
        life: 0.05,
        max_life: 0.05,
        ..Default::default()
    });
    for _ in 0..10 {
        field.update(DT);
    }
    assert_eq!(field.active_count(), 0);
}

// ---- Enemy phase runner ----

/// End-to-end scenario B: damage overflow carries into the next phase
/// exactly once.
#[test]
fn test_boss_damage_overflow_carries_remainder() {
    let mut boss = Enemy::new(
        EnemyToken(0),
        vec2(192.0, 88.0),
        16.0,
        vec![Phase::new(100.0, noop_pattern()), Phase::new(100.0, noop_pattern())],
    );

    let result = boss.take_damage(150.0);
    assert!(result.phase_changed);
    assert!(!result.died);
    assert_eq!(boss.phase_index, 1);
    assert!((boss.phase_hp - 50.0).abs() < 1e-9);
    assert!(boss.alive);

    // The carried damage is not double-counted: 50 more finishes it.
    let result = boss.take_damage(50.0);
    assert!(result.died);
    assert!(!boss.alive);
    assert!(boss.defeated);
}

#[test]
fn test_phase_timeout_transition() {
    let mut enemy = Enemy::new(
        EnemyToken(0),
        vec2(100.0, 100.0),
        10.0,
        vec![
            Phase::timed(0.5, noop_pattern()),
            Phase::new(10.0, noop_pattern()),
        ],
    );
    let mut rng = ChaCha8Rng::seed_from_u64(1);
    let mut out = PatternOut::default();

    for tick in 0..40 {
        let ctx = PatternCtx {
            player_pos: vec2(192.0, 400.0),
            phase_elapsed: enemy.phase_elapsed,
            dt: DT,
            tick,
        };
        enemy.update(&ctx, &mut rng, &mut out);
    }
    assert_eq!(enemy.phase_index, 1);
    assert!(enemy.alive);
}

#[test]
fn test_must_clear_phase_ignores_timeout() {
    let mut enemy = Enemy::new(
        EnemyToken(0),
        vec2(100.0, 100.0),
        10.0,
        vec![Phase::new(50.0, noop_pattern())
            .with_time_limit(0.2)
            .with_must_clear()],
    );
    let mut rng = ChaCha8Rng::seed_from_u64(1);
    let mut out = PatternOut::default();

    for tick in 0..60 {
        let ctx = PatternCtx {
            player_pos: vec2(192.0, 400.0),
            phase_elapsed: enemy.phase_elapsed,
            dt: DT,
            tick,
        };
        enemy.update(&ctx, &mut rng, &mut out);
    }
    assert!(enemy.alive, "must-clear phase must survive its time budget");
    assert_eq!(enemy.phase_index, 0);
}

#[test]
fn test_timeout_into_spell_emits_cue() {
    let mut enemy = Enemy::new(
        EnemyToken(0),
        vec2(100.0, 100.0),
        10.0,
        vec![
            Phase::timed(0.1, noop_pattern()),
            Phase::spell("Test Sign", 100.0, 30.0, noop_pattern()),
        ],
    );
    let mut rng = ChaCha8Rng::seed_from_u64(1);
    let mut out = PatternOut::default();

    for tick in 0..10 {
        let ctx = PatternCtx {
            player_pos: vec2(192.0, 400.0),
            phase_elapsed: enemy.phase_elapsed,
            dt: DT,
            tick,
        };
        enemy.update(&ctx, &mut rng, &mut out);
    }
    assert!(enemy.is_spell());
    assert!(out
        .audio
        .iter()
        .any(|e| matches!(e, AudioEvent::SpellCardStart { name } if name == "Test Sign")));
}

// ---- Script engine ----

#[test]
fn test_script_fires_in_time_order_stable_on_ties() {
    let mut stage = test_stage();
    let mut script = ScriptEngine::new();
    script.load(vec![
        marker_event(5.0, "5"),
        marker_event(2.0, "2a"),
        marker_event(8.0, "8"),
        marker_event(2.0, "2b"),
    ]);

    script.update(10.0, &mut stage);
    assert_eq!(marker_names(&stage.audio), vec!["2a", "2b", "5", "8"]);
    assert!(script.is_finished());
    assert_eq!(script.next_event_time(), None);
}

#[test]
fn test_script_incremental_advance() {
    let mut stage = test_stage();
    let mut script = ScriptEngine::new();
    script.load(vec![
        marker_event(5.0, "5"),
        marker_event(2.0, "2a"),
        marker_event(8.0, "8"),
        marker_event(2.0, "2b"),
    ]);

    script.update(1.0, &mut stage);
    assert!(marker_names(&stage.audio).is_empty());
    assert!(!script.is_finished());
    assert_eq!(script.next_event_time(), Some(2.0));

    script.update(1.5, &mut stage);
    assert_eq!(marker_names(&stage.audio), vec!["2a", "2b"]);
    assert_eq!(script.next_event_time(), Some(5.0));

    script.update(10.0, &mut stage);
    assert!(script.is_finished());
}

#[test]
fn test_script_suspended_while_boss_alive() {
    let mut stage = test_stage();
    stage.spawn_enemy(
        Enemy::new(EnemyToken(9), vec2(192.0, 88.0), 16.0, vec![Phase::new(100.0, noop_pattern())])
            .boss("Test", "theme"),
    );

    let mut script = ScriptEngine::new();
    script.load(vec![marker_event(0.5, "beat")]);

    for _ in 0..100 {
        script.update(1.0, &mut stage);
    }
    assert_eq!(script.time(), 0.0, "clock must not advance under a boss");
    assert!(marker_names(&stage.audio).is_empty());

    // Boss down: the very next update resumes.
    stage.enemies[0].alive = false;
    script.update(1.0, &mut stage);
    assert_eq!(script.time(), 1.0);
    assert_eq!(marker_names(&stage.audio), vec!["beat"]);
}

#[test]
fn test_script_event_spawning_boss_does_not_block_same_tick() {
    let mut stage = test_stage();
    let mut script = ScriptEngine::new();
    script.load(vec![
        ScriptEvent::new(1.0, |stage: &mut Stage| {
            let token = stage.next_token();
            stage.spawn_enemy(
                Enemy::new(token, vec2(192.0, -20.0), 16.0, vec![Phase::new(100.0, noop_pattern())])
                    .boss("Test", "theme"),
            );
        }),
        marker_event(1.5, "after"),
    ]);

    // The guard is evaluated at entry only: both events fire this tick.
    script.update(2.0, &mut stage);
    assert!(stage.boss_active());
    assert_eq!(marker_names(&stage.audio), vec!["after"]);
    assert!(script.is_finished());

    // But the next call is a no-op again.
    script.update(1.0, &mut stage);
    assert_eq!(script.time(), 2.0);
}

#[test]
fn test_script_tolerates_unordered_load() {
    let script_pack = stages::load_stage(StageId::One);
    let count = script_pack.events.len();
    assert!(count >= 8);

    // Unknown stages fall back to stage one.
    let fallback = stages::load_stage(StageId::Two);
    assert_eq!(fallback.events.len(), count);
}

// ---- Delayed bursts ----

#[test]
fn test_delayed_queue_fires_only_when_due() {
    let mut queue = DelayedQueue::new();
    queue.push(1.0, vec![BulletSpec::new(vec2(10.0, 10.0), 0.0, 100.0)]);
    queue.push(2.0, vec![BulletSpec::new(vec2(20.0, 20.0), 0.0, 100.0)]);

    let mut out = Vec::new();
    queue.drain_due(0.5, &mut out);
    assert!(out.is_empty());
    assert_eq!(queue.len(), 2);

    queue.drain_due(1.0, &mut out);
    assert_eq!(out.len(), 1);
    assert_eq!(queue.len(), 1);

    queue.drain_due(5.0, &mut out);
    assert_eq!(out.len(), 2);
    assert!(queue.is_empty());
}

// ---- Collision ----

#[test]
fn test_graze_fires_once_per_bullet_lifetime() {
    let mut stage = test_stage();
    // Inside the graze ring (16 + 4 = 20), outside the lethal core.
    let pos = stage.player.pos + vec2(10.0, 0.0);
    stage.bullets.spawn(&BulletSpec::new(pos, 0.0, 0.0));

    for _ in 0..10 {
        systems::collision::run(&mut stage);
    }
    assert_eq!(stage.score.graze, 1);
    assert_eq!(stage.score.score, GRAZE_SCORE);
    assert_eq!(stage.bullets.active_count(), 1, "graze must not kill the bullet");
    assert_eq!(
        stage.audio.iter().filter(|e| matches!(e, AudioEvent::Graze)).count(),
        1
    );
}

#[test]
fn test_lethal_hit_kills_player_and_bullet() {
    let mut stage = test_stage();
    let lives_before = stage.player.lives;
    stage.bullets.spawn(&BulletSpec::new(stage.player.pos, 0.0, 0.0));

    systems::collision::run(&mut stage);

    assert_eq!(stage.player.lives, lives_before - 1);
    assert_eq!(stage.bullets.active_count(), 0);
    assert!(stage.player.respawn_ticks > 0);
    assert!(stage.player.invuln_ticks > 0);
    assert_eq!(stage.items.active_count(), DEATH_POWER_DROPS as usize);
    assert!(stage.audio.iter().any(|e| matches!(e, AudioEvent::PlayerHit)));
}

#[test]
fn test_god_mode_grazes_but_never_dies() {
    let mut stage = Stage::new(
        GameConfig {
            god_mode: true,
            ..test_config()
        },
        CharacterId::Miko,
        StageId::One,
    );
    let lives_before = stage.player.lives;
    stage.bullets.spawn(&BulletSpec::new(stage.player.pos, 0.0, 0.0));

    for _ in 0..5 {
        systems::collision::run(&mut stage);
    }
    assert_eq!(stage.player.lives, lives_before);
    assert_eq!(stage.score.graze, 1, "god mode still grazes");
    assert_eq!(stage.bullets.active_count(), 1);
}

#[test]
fn test_death_immunity_frames_do_not_graze() {
    let mut stage = test_stage();
    stage.player.invuln_ticks = 60;
    stage.bullets.spawn(&BulletSpec::new(stage.player.pos + vec2(10.0, 0.0), 0.0, 0.0));

    systems::collision::run(&mut stage);
    assert_eq!(stage.score.graze, 0);
    assert_eq!(stage.player.lives, test_config().starting_lives);
}

#[test]
fn test_piercing_shot_survives_hits() {
    let mut stage = test_stage();
    stage.spawn_enemy(Enemy::new(
        EnemyToken(0),
        vec2(200.0, 200.0),
        12.0,
        vec![Phase::new(1000.0, noop_pattern())],
    ));
    stage
        .shots
        .spawn(vec2(200.0, 200.0), -1.5, 0.0, barrage_core::enums::ShotKind::Piercing, 5.0, 0.0);
    stage
        .shots
        .spawn(vec2(200.0, 200.0), -1.5, 0.0, barrage_core::enums::ShotKind::Straight, 5.0, 0.0);

    systems::collision::run(&mut stage);

    // The straight shot died on impact; the piercing shot survived.
    assert_eq!(stage.shots.active_count(), 1);
    assert!(stage.shots.iter().next().unwrap().piercing);
    let enemy = &stage.enemies[0];
    assert!((enemy.phase_hp - 990.0).abs() < 1e-9);
    assert_eq!(stage.score.score, PIERCE_HIT_SCORE + HIT_SCORE);
}

#[test]
fn test_squared_distance_equivalence() {
    let mut rng = ChaCha8Rng::seed_from_u64(42);
    for _ in 0..1000 {
        let a = vec2(rng.gen_range(0.0..400.0), rng.gen_range(0.0..450.0));
        let b = vec2(rng.gen_range(0.0..400.0), rng.gen_range(0.0..450.0));
        let r: f64 = rng.gen_range(0.1..50.0);
        let squared = a.distance_squared(b) < r * r;
        let literal = a.distance(b) < r;
        assert_eq!(squared, literal);
    }
}

// ---- Items ----

#[test]
fn test_items_magnetize_above_auto_collect_line() {
    let mut stage = test_stage();
    stage.player.pos = vec2(192.0, AUTO_COLLECT_LINE - 10.0);
    let mut rng = ChaCha8Rng::seed_from_u64(3);
    stage.items.spawn(vec2(192.0, 300.0), ItemKind::Point, &mut rng);

    systems::items::run(&mut stage, DT);
    assert!(stage.items.iter().next().unwrap().magnetized);

    // Homing at 320 px/s closes ~190 px in under a second.
    for _ in 0..120 {
        systems::items::run(&mut stage, DT);
        if stage.items.active_count() == 0 {
            break;
        }
    }
    assert_eq!(stage.items.active_count(), 0);
    assert_eq!(stage.score.score, POINT_ITEM_SCORE);
    assert!(stage
        .audio
        .iter()
        .any(|e| matches!(e, AudioEvent::ItemCollect { kind: ItemKind::Point })));
}

#[test]
fn test_items_fall_and_despawn_below_field() {
    let mut stage = test_stage();
    stage.player.pos = vec2(20.0, PLAYFIELD_HEIGHT - 30.0);
    let mut rng = ChaCha8Rng::seed_from_u64(3);
    stage.items.spawn(vec2(350.0, 400.0), ItemKind::Power, &mut rng);

    for _ in 0..600 {
        systems::items::run(&mut stage, DT);
        if stage.items.active_count() == 0 {
            break;
        }
    }
    assert_eq!(stage.items.active_count(), 0);
    assert_eq!(stage.player.power, 0, "uncollected item grants nothing");
}

// ---- Engine ----

#[test]
fn test_determinism_same_seed() {
    let mut engine_a = StageEngine::new(test_config());
    let mut engine_b = StageEngine::new(test_config());

    for engine in [&mut engine_a, &mut engine_b] {
        engine.queue_command(PlayerCommand::StartStage { stage: StageId::One });
        engine.queue_command(PlayerCommand::SetInput {
            frame: InputFrame {
                shoot: true,
                left: true,
                ..Default::default()
            },
        });
    }

    for tick in 0..600 {
        let snap_a = engine_a.tick();
        let snap_b = engine_b.tick();
        let json_a = serde_json::to_string(&snap_a).unwrap();
        let json_b = serde_json::to_string(&snap_b).unwrap();
        assert_eq!(json_a, json_b, "snapshots diverged at tick {}", tick);
    }
}

#[test]
fn test_pause_resume_via_commands() {
    let mut engine = StageEngine::new(test_config());
    engine.queue_command(PlayerCommand::StartStage { stage: StageId::One });
    let snap = engine.tick();
    assert_eq!(snap.phase, GamePhase::Active);

    engine.queue_command(PlayerCommand::Pause);
    let snap = engine.tick();
    assert_eq!(snap.phase, GamePhase::Paused);
    let paused_tick = snap.time.tick;

    // Ticking while paused advances nothing.
    let snap = engine.tick();
    assert_eq!(snap.time.tick, paused_tick);

    engine.queue_command(PlayerCommand::Resume);
    let snap = engine.tick();
    assert_eq!(snap.phase, GamePhase::Active);
    assert!(snap.time.tick > paused_tick);
}

#[test]
fn test_dialogue_halts_simulation() {
    let mut engine = StageEngine::new(test_config());
    engine.queue_command(PlayerCommand::StartStage { stage: StageId::One });
    engine.tick();

    let stage = engine.stage_mut();
    stage.dialogue.start(vec![DialogueLine::new("A", "line one")]);
    stage
        .bullets
        .spawn(&BulletSpec::new(vec2(100.0, 100.0), 0.0, 200.0));

    let snap = engine.tick();
    assert!(snap.dialogue.is_some());
    let frozen = snap.bullets[0].position;

    let snap = engine.tick();
    assert_eq!(snap.bullets[0].position, frozen, "dialogue must halt bullets");

    engine.queue_command(PlayerCommand::AdvanceDialogue);
    engine.tick();
    let snap = engine.tick();
    assert!(snap.dialogue.is_none());
    assert_ne!(snap.bullets[0].position, frozen, "simulation must resume");
}

#[test]
fn test_time_stop_freezes_bullets_not_player() {
    let mut engine = StageEngine::new(test_config());
    engine.queue_command(PlayerCommand::StartStage { stage: StageId::One });
    engine.tick();

    {
        let stage = engine.stage_mut();
        // Keep an enemy around so the stage cannot clear.
        let token = stage.next_token();
        stage.spawn_enemy(Enemy::new(
            token,
            vec2(50.0, 50.0),
            10.0,
            vec![Phase::new(10_000.0, noop_pattern())],
        ));
        stage.time_stop = true;
        stage
            .bullets
            .spawn(&BulletSpec::new(vec2(100.0, 100.0), 0.0, 200.0));
    }
    // Overwrite the stage-one script so no scripted wave interferes.
    engine.script_mut().load(vec![marker_event(9999.0, "never")]);

    engine.queue_command(PlayerCommand::SetInput {
        frame: InputFrame {
            right: true,
            ..Default::default()
        },
    });

    let snap = engine.tick();
    let bullet_pos = snap.bullets[0].position;
    let player_pos = snap.player.position;

    let snap = engine.tick();
    assert!(snap.time_stop);
    assert_eq!(snap.bullets[0].position, bullet_pos, "bullets frozen");
    assert!(snap.player.position.x > player_pos.x, "player still moves");

    // Lifting the freeze lets bullets fly again.
    engine.stage_mut().time_stop = false;
    let snap = engine.tick();
    assert_ne!(snap.bullets[0].position, bullet_pos);
}

#[test]
fn test_collision_skipped_under_time_stop() {
    let mut engine = StageEngine::new(test_config());
    engine.queue_command(PlayerCommand::StartStage { stage: StageId::One });
    engine.tick();

    let player_pos = {
        let stage = engine.stage_mut();
        stage.time_stop = true;
        let pos = stage.player.pos;
        stage.bullets.spawn(&BulletSpec::new(pos, 0.0, 0.0));
        pos
    };
    engine.script_mut().load(vec![marker_event(9999.0, "never")]);

    let snap = engine.tick();
    assert_eq!(snap.hud.lives, test_config().starting_lives);
    assert_eq!(snap.bullets.len(), 1);

    // Releasing the freeze makes the overlap lethal on the next frame.
    engine.stage_mut().time_stop = false;
    engine.stage_mut().player.pos = player_pos;
    let snap = engine.tick();
    assert_eq!(snap.hud.lives, test_config().starting_lives - 1);
}

#[test]
fn test_fast_forward_compresses_idle_time_without_skipping() {
    let mut engine = StageEngine::new(test_config());
    engine.queue_command(PlayerCommand::StartStage { stage: StageId::One });
    engine.tick();
    engine.script_mut().load(vec![marker_event(10.0, "beat")]);

    let mut fired_at: Option<u64> = None;
    let mut fire_count = 0;
    for tick in 0..400u64 {
        let snap = engine.tick();
        let fired = marker_names(&snap.audio_events).iter().any(|n| n == "beat");
        if fired {
            fire_count += 1;
            fired_at.get_or_insert(tick);
        }
    }

    assert_eq!(fire_count, 1, "fast-forward must never skip or repeat an event");
    let fired_at = fired_at.expect("event must fire");
    // 8 idle seconds at 5x (96 ticks) + the final 2-second gap at 1x
    // (120 ticks) is far sooner than the 600 ticks of real time.
    assert!(fired_at < 260, "event fired at tick {}, expected ~216", fired_at);
    assert!(fired_at > 150);
}

#[test]
fn test_bomb_clears_field_and_damages_enemies() {
    let mut engine = StageEngine::new(test_config());
    engine.queue_command(PlayerCommand::StartStage { stage: StageId::One });
    engine.tick();
    engine.script_mut().load(vec![marker_event(9999.0, "never")]);

    {
        let stage = engine.stage_mut();
        let token = stage.next_token();
        stage.spawn_enemy(Enemy::new(
            token,
            vec2(192.0, 100.0),
            12.0,
            vec![Phase::new(1000.0, noop_pattern())],
        ));
        for i in 0..100 {
            stage
                .bullets
                .spawn(&BulletSpec::new(vec2(4.0 * i as f64, 60.0), 0.0, 0.0));
        }
    }

    engine.queue_command(PlayerCommand::SetInput {
        frame: InputFrame {
            bomb: true,
            ..Default::default()
        },
    });
    let snap = engine.tick();

    assert_eq!(snap.bullets.len(), 0, "bomb clears the bullet field");
    assert_eq!(snap.hud.bombs, test_config().starting_bombs - 1);
    assert!(snap
        .audio_events
        .iter()
        .any(|e| matches!(e, AudioEvent::Bomb { .. })));
    let stage = engine.stage_mut();
    assert!((stage.enemies[0].phase_hp - (1000.0 - BOMB_DAMAGE)).abs() < 1e-9);
    assert!(stage.player.invuln_ticks >= BOMB_IMMUNITY_TICKS);
}

#[test]
fn test_stage_clear_when_script_and_field_exhausted() {
    let mut engine = StageEngine::new(test_config());
    engine.queue_command(PlayerCommand::StartStage { stage: StageId::One });
    engine.tick();
    engine.script_mut().load(vec![]);

    let snap = engine.tick();
    assert_eq!(snap.phase, GamePhase::StageClear);
}

/// Full-stage smoke run: god mode, shoot every other tick (the edge also
/// advances dialogue), and the stage must finish cleanly.
#[test]
fn test_stage_one_runs_to_clear() {
    let mut engine = StageEngine::new(GameConfig {
        god_mode: true,
        ..test_config()
    });
    engine.queue_command(PlayerCommand::StartStage { stage: StageId::One });

    let mut last_phase = GamePhase::Active;
    for tick in 0..14400u64 {
        engine.queue_command(PlayerCommand::SetInput {
            frame: InputFrame {
                shoot: tick % 2 == 0,
                ..Default::default()
            },
        });
        let snap = engine.tick();
        last_phase = snap.phase;
        if last_phase == GamePhase::StageClear {
            break;
        }
    }

    assert_eq!(last_phase, GamePhase::StageClear, "stage one should complete");
    let stage = engine.stage();
    assert!(stage.score.score > 0);
    assert_eq!(stage.player.lives, test_config().starting_lives);
}
