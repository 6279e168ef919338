//! Enemy system: run every phase pattern, apply its output to the stage,
//! and sweep out dead enemies with their side effects.

use barrage_core::constants::{BOSS_DEATH_SHAKE, OFFSCREEN_MARGIN};
use barrage_core::enums::BulletColor;
use barrage_core::events::AudioEvent;

use crate::enemy::{PatternCtx, PatternOut};
use crate::stage::Stage;

pub fn run(stage: &mut Stage, dt: f64, tick: u64) {
    let Stage {
        player,
        enemies,
        bullets,
        items,
        particles,
        delayed,
        audio,
        rng,
        time_stop,
        screen_flash,
        camera_shake,
        score,
        playfield,
        elapsed,
        ..
    } = stage;

    let player_pos = player.pos;
    let mut out = PatternOut::default();

    for enemy in enemies.iter_mut() {
        if !enemy.alive {
            continue;
        }
        let ctx = PatternCtx {
            player_pos,
            phase_elapsed: enemy.phase_elapsed,
            dt,
            tick,
        };
        out.clear();
        enemy.update(&ctx, rng, &mut out);

        bullets.spawn_batch(&mut out.bullets);
        for (delay, burst) in out.delayed.drain(..) {
            delayed.push(*elapsed + delay, burst);
        }
        audio.append(&mut out.audio);
        if let Some(ts) = out.time_stop {
            *time_stop = ts;
        }

        // A non-boss that has wandered far off-field after entering is
        // gone for good: deactivate without drops or score.
        if !enemy.is_boss
            && enemy.phase_elapsed > 2.0
            && !playfield.contains_with_margin(enemy.body.pos, OFFSCREEN_MARGIN * 2.0)
        {
            enemy.alive = false;
        }
    }

    // Removal sweep.
    let mut boss_down = false;
    enemies.retain(|enemy| {
        if enemy.alive {
            return true;
        }
        if enemy.defeated {
            score.score += enemy.score_value;
            for kind in &enemy.drops {
                items.spawn(enemy.body.pos, *kind, rng);
            }
            particles.burst(enemy.body.pos, BulletColor::White, 12, rng);
            audio.push(AudioEvent::EnemyDestroyed);
        }
        if enemy.is_boss {
            boss_down = true;
            *screen_flash = 1.0;
            *camera_shake = BOSS_DEATH_SHAKE;
            *time_stop = false;
            audio.push(AudioEvent::StopBossTheme);
        }
        false
    });

    // Boss death zeroes the field for visual cleanup; the script
    // timeline resumes on its own now that no boss is alive.
    if boss_down {
        bullets.clear(particles);
    }
}
