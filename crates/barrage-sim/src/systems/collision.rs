//! Collision pass — one O(bullets × targets) sweep per frame.
//!
//! All comparisons use squared distance; with thousands of live bullets
//! the square roots would dominate the frame. Skipped entirely while the
//! field is time-stopped.

use rand::Rng;

use barrage_core::constants::*;
use barrage_core::enums::BulletColor;
use barrage_core::events::AudioEvent;

use crate::stage::Stage;
use crate::systems::player as player_system;

pub fn run(stage: &mut Stage) {
    let Stage {
        config,
        player,
        bullets,
        shots,
        enemies,
        items,
        particles,
        score,
        audio,
        rng,
        ..
    } = stage;

    // --- Enemy bullets vs player: graze, then lethal ---
    let player_pos = player.pos;
    let immune = player.is_invulnerable();
    // God mode still grazes; genuine death-immunity frames do not.
    let can_graze = config.god_mode || !immune;
    let can_die = !config.god_mode && !immune;
    let graze_r = player.profile.graze_radius;
    let hit_r = player.profile.hitbox_radius;

    let mut player_hit = false;
    let mut i = 0;
    while i < bullets.pool.active_count() {
        let b = bullets.pool.at_mut(i);
        let d2 = b.pos.distance_squared(player_pos);

        if can_graze && !b.grazed {
            let rr = graze_r + b.radius;
            if d2 < rr * rr {
                b.grazed = true;
                let spark_pos = b.pos;
                score.score += GRAZE_SCORE;
                score.graze += 1;
                audio.push(AudioEvent::Graze);
                particles.spark(spark_pos, BulletColor::White, rng);
            }
        }

        if can_die && !player_hit {
            let rr = hit_r + b.radius * LETHAL_BULLET_RADIUS_SCALE;
            if d2 < rr * rr {
                player_hit = true;
                b.alive = false;
            }
        }

        if !b.alive {
            bullets.pool.release(i);
            continue;
        }
        i += 1;
    }

    if player_hit {
        player_system::on_hit(player, items, particles, audio, config, rng);
    }

    // --- Player shots vs enemies ---
    let mut i = 0;
    while i < shots.pool.active_count() {
        let s = shots.pool.at_mut(i);
        for enemy in enemies.iter_mut() {
            if !enemy.alive {
                // lazy skip; the enemy system owns list compaction
                continue;
            }
            let rr = enemy.body.radius + SHOT_HALF_WIDTH;
            if s.pos.distance_squared(enemy.body.pos) < rr * rr {
                let result = enemy.take_damage(s.damage);
                score.score += if s.piercing { PIERCE_HIT_SCORE } else { HIT_SCORE };
                if rng.gen_bool(HIT_PARTICLE_CHANCE) {
                    particles.spark(s.pos, BulletColor::Yellow, rng);
                }
                if result.phase_changed && enemy.is_spell() {
                    if let Some(name) = enemy.current_phase().and_then(|p| p.spell_name.clone()) {
                        audio.push(AudioEvent::SpellCardStart { name });
                    }
                }
                if !s.piercing {
                    audio.push(AudioEvent::EnemyHit);
                    s.alive = false;
                    break;
                }
            }
        }
        if !s.alive {
            shots.pool.release(i);
            continue;
        }
        i += 1;
    }
}
