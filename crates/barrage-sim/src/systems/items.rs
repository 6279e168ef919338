//! Item motion and collection.
//!
//! Frozen under time-stop along with enemy bullets; the engine skips
//! this system while the field is stopped.

use barrage_core::constants::*;
use barrage_core::enums::ItemKind;
use barrage_core::events::AudioEvent;

use crate::player::Player;
use crate::stage::{ScoreState, Stage};

pub fn run(stage: &mut Stage, dt: f64) {
    let Stage {
        items,
        player,
        score,
        audio,
        playfield,
        ..
    } = stage;

    let in_play = player.respawn_ticks == 0;
    let auto_collect = in_play && player.pos.y <= AUTO_COLLECT_LINE;
    let player_pos = player.pos;

    let mut i = 0;
    while i < items.pool.active_count() {
        let item = items.pool.at_mut(i);
        if auto_collect {
            item.magnetized = true;
        }

        if item.magnetized && in_play {
            item.vel = (player_pos - item.pos).normalize_or_zero() * ITEM_HOMING_SPEED;
        } else {
            item.vel.y = (item.vel.y + ITEM_GRAVITY * dt).min(ITEM_TERMINAL_SPEED);
            item.vel.x *= (-3.0 * dt).exp();
        }
        item.pos += item.vel * dt;

        if in_play && item.pos.distance_squared(player_pos) < ITEM_COLLECT_RADIUS * ITEM_COLLECT_RADIUS
        {
            collect(item.kind, player, score, audio);
            item.alive = false;
        } else if item.pos.y > playfield.height + OFFSCREEN_MARGIN {
            item.alive = false;
        }

        if !item.alive {
            items.pool.release(i);
            continue;
        }
        i += 1;
    }
}

fn collect(kind: ItemKind, player: &mut Player, score: &mut ScoreState, audio: &mut Vec<AudioEvent>) {
    match kind {
        ItemKind::Power => {
            player.add_power(POWER_ITEM_VALUE);
            score.score += 100;
        }
        ItemKind::BigPower => {
            player.add_power(BIG_POWER_ITEM_VALUE);
            score.score += 1000;
        }
        ItemKind::FullPower => {
            player.add_power(POWER_MAX);
            score.score += 1000;
        }
        ItemKind::Point => {
            score.score += POINT_ITEM_SCORE;
        }
    }
    audio.push(AudioEvent::ItemCollect { kind });
}
