//! Player system: respawn drift, movement, shooting, bombing.
//!
//! Runs every active frame, including under time-stop — the player side
//! of the field is never frozen.

use std::f64::consts::FRAC_PI_2;

use rand::Rng;
use rand_chacha::ChaCha8Rng;

use barrage_core::constants::*;
use barrage_core::enums::{BombKind, BulletColor, ItemKind};
use barrage_core::events::AudioEvent;
use barrage_core::types::{vec2, Vec2};

use crate::engine::InputState;
use crate::items::ItemField;
use crate::particles::ParticleField;
use crate::player::Player;
use crate::stage::Stage;

/// Straight up in screen space (y is down).
const UP: f64 = -FRAC_PI_2;

pub fn run(stage: &mut Stage, input: &InputState, dt: f64) {
    let Stage {
        config,
        player,
        bullets,
        shots,
        items,
        particles,
        enemies,
        audio,
        playfield,
        rng,
        ..
    } = stage;

    // Drifting back in after a death: no control, no fire.
    if player.respawn_ticks > 0 {
        player.respawn_ticks -= 1;
        let target = vec2(PLAYER_START_X, PLAYER_START_Y);
        player.pos = player.pos.lerp(target, 0.12);
        if player.respawn_ticks == 0 {
            player.pos = target;
        }
        return;
    }

    if player.invuln_ticks > 0 {
        player.invuln_ticks -= 1;
    }

    player.focused = input.down.focus;

    // Movement
    let mut dir = Vec2::ZERO;
    if input.down.up {
        dir.y -= 1.0;
    }
    if input.down.down {
        dir.y += 1.0;
    }
    if input.down.left {
        dir.x -= 1.0;
    }
    if input.down.right {
        dir.x += 1.0;
    }
    let speed = if player.focused {
        player.profile.focused_speed
    } else {
        player.profile.unfocused_speed
    };
    let next = player.pos + dir.normalize_or_zero() * speed * dt;
    player.pos = playfield.clamp_inset(next, PLAYER_EDGE_INSET);

    // Shooting
    if player.fire_cooldown > 0 {
        player.fire_cooldown -= 1;
    }
    if input.down.shoot && player.fire_cooldown == 0 {
        player.fire_cooldown = player.profile.fire_interval_ticks;
        fire_volley(player, shots);
        audio.push(AudioEvent::PlayerShoot);
    }

    // Bombing
    if input.pressed.bomb && (player.bombs > 0 || config.infinite_bombs) {
        if !config.infinite_bombs {
            player.bombs -= 1;
        }
        audio.push(AudioEvent::Bomb {
            kind: player.profile.bomb,
        });

        bullets.clear(particles);
        items.magnetize_all();
        particles.burst(player.pos, BulletColor::White, 32, rng);

        let (damage, immunity) = match player.profile.bomb {
            BombKind::SpiritSeal => (BOMB_DAMAGE, BOMB_IMMUNITY_TICKS),
            BombKind::StarShower => (BOMB_DAMAGE * 2.0, BOMB_IMMUNITY_TICKS),
            BombKind::IceVeil => (BOMB_DAMAGE * 0.5, BOMB_IMMUNITY_TICKS * 2),
        };
        for enemy in enemies.iter_mut() {
            if !enemy.alive {
                continue;
            }
            let result = enemy.take_damage(damage);
            if result.phase_changed && enemy.is_spell() {
                if let Some(name) = enemy.current_phase().and_then(|p| p.spell_name.clone()) {
                    audio.push(AudioEvent::SpellCardStart { name });
                }
            }
        }
        player.invuln_ticks = player.invuln_ticks.max(immunity);
    }
}

/// Spawn the volley for the player's current power tier.
fn fire_volley(player: &mut Player, shots: &mut crate::shots::ShotField) {
    let p = &player.profile;
    let pos = player.pos;

    // Main pair.
    shots.spawn(pos + vec2(-6.0, -8.0), UP, p.shot_speed, p.main_shot, p.main_damage, 0.0);
    shots.spawn(pos + vec2(6.0, -8.0), UP, p.shot_speed, p.main_shot, p.main_damage, std::f64::consts::PI);

    // Wider second pair.
    if player.power >= 16 {
        shots.spawn(pos + vec2(-14.0, -4.0), UP - 0.08, p.shot_speed, p.main_shot, p.main_damage, 1.5);
        shots.spawn(pos + vec2(14.0, -4.0), UP + 0.08, p.shot_speed, p.main_shot, p.main_damage, 4.5);
    }

    // Option shots.
    if player.power >= 48 {
        shots.spawn(pos + vec2(-20.0, 2.0), UP, p.shot_speed * 0.8, p.option_shot, p.option_damage, 0.7);
        shots.spawn(pos + vec2(20.0, 2.0), UP, p.shot_speed * 0.8, p.option_shot, p.option_damage, 3.8);
    }
    if player.power >= 96 {
        shots.spawn(pos + vec2(-26.0, 8.0), UP - 0.25, p.shot_speed * 0.8, p.option_shot, p.option_damage, 2.2);
        shots.spawn(pos + vec2(26.0, 8.0), UP + 0.25, p.shot_speed * 0.8, p.option_shot, p.option_damage, 5.3);
    }
}

/// Death side effects: life loss, power drops, respawn drift. Called by
/// the collision pass on a lethal hit.
pub fn on_hit(
    player: &mut Player,
    items: &mut ItemField,
    particles: &mut ParticleField,
    audio: &mut Vec<AudioEvent>,
    config: &barrage_core::config::GameConfig,
    rng: &mut ChaCha8Rng,
) {
    player.lives -= 1;
    audio.push(AudioEvent::PlayerHit);
    particles.burst(player.pos, BulletColor::Red, 24, rng);

    for _ in 0..DEATH_POWER_DROPS {
        let jitter = vec2(rng.gen_range(-24.0..=24.0), rng.gen_range(-16.0..=0.0));
        items.spawn(player.pos + jitter, ItemKind::Power, rng);
    }
    player.power = player.power.saturating_sub(DEATH_POWER_LOSS);
    player.bombs = config.starting_bombs;

    // Re-enter from below the field.
    player.pos = vec2(PLAYER_START_X, PLAYFIELD_HEIGHT + 32.0);
    player.respawn_ticks = RESPAWN_TICKS;
    player.invuln_ticks = DEATH_IMMUNITY_TICKS;
}
