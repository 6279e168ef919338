//! Snapshot system: builds a complete `FrameSnapshot` from the stage.
//!
//! Read-only over the stage (audio events are handed in already drained).
//! Every view list walks a pool's active range only.

use barrage_core::constants::{POWER_MAX, SPELL_SLIDE_SECS};
use barrage_core::enums::GamePhase;
use barrage_core::enums::{CharacterId, StageId};
use barrage_core::events::AudioEvent;
use barrage_core::state::*;
use barrage_core::types::SimTime;

use crate::stage::Stage;

pub fn build(
    stage: &Stage,
    time: SimTime,
    phase: GamePhase,
    character: CharacterId,
    stage_id: StageId,
    audio_events: Vec<AudioEvent>,
) -> FrameSnapshot {
    FrameSnapshot {
        time,
        phase,
        stage: stage_id,
        character,
        player: build_player(stage),
        bullets: build_bullets(stage),
        shots: build_shots(stage),
        items: build_items(stage),
        particles: build_particles(stage),
        enemies: build_enemies(stage),
        boss: build_boss(stage),
        dialogue: stage.dialogue.current().map(|line| DialogueView {
            speaker: line.speaker.clone(),
            text: line.text.clone(),
        }),
        hud: HudView {
            score: stage.score.score,
            graze: stage.score.graze,
            lives: stage.player.lives,
            bombs: stage.player.bombs,
            power: stage.player.power,
            power_max: POWER_MAX,
        },
        audio_events,
        screen_flash: stage.screen_flash,
        camera_shake: stage.camera_shake,
        time_stop: stage.time_stop,
        background_scroll: stage.background_scroll,
    }
}

fn build_player(stage: &Stage) -> PlayerView {
    let p = &stage.player;
    PlayerView {
        position: p.pos,
        focused: p.focused,
        invulnerable: p.invuln_ticks > 0,
        respawning: p.respawn_ticks > 0,
        hitbox_radius: p.profile.hitbox_radius,
        show_hitbox: stage.config.show_hitbox || p.focused,
    }
}

fn build_bullets(stage: &Stage) -> Vec<BulletView> {
    stage
        .bullets
        .iter()
        .map(|b| BulletView {
            position: b.pos,
            radius: b.radius,
            angle: b.angle,
            color: b.color,
        })
        .collect()
}

fn build_shots(stage: &Stage) -> Vec<ShotView> {
    stage
        .shots
        .iter()
        .map(|s| ShotView {
            position: s.pos,
            kind: s.kind,
            trail: s.trail.iter().collect(),
        })
        .collect()
}

fn build_items(stage: &Stage) -> Vec<ItemView> {
    stage
        .items
        .iter()
        .map(|item| ItemView {
            position: item.pos,
            kind: item.kind,
        })
        .collect()
}

fn build_particles(stage: &Stage) -> Vec<ParticleView> {
    stage
        .particles
        .iter()
        .map(|p| ParticleView {
            position: p.pos,
            shape: p.shape,
            color: p.color,
            scale: p.scale,
            rotation: p.rotation,
            alpha: (p.life / p.max_life.max(1e-6)).clamp(0.0, 1.0),
        })
        .collect()
}

fn build_enemies(stage: &Stage) -> Vec<EnemyView> {
    stage
        .enemies
        .iter()
        .filter(|e| e.alive && !e.is_boss)
        .map(|e| EnemyView {
            position: e.body.pos,
            radius: e.body.radius,
        })
        .collect()
}

fn build_boss(stage: &Stage) -> Option<BossView> {
    let boss = stage.enemies.iter().find(|e| e.alive && e.is_boss)?;
    let spell_name = boss.current_phase().and_then(|p| p.spell_name.clone());
    let spell_slide = if spell_name.is_some() {
        (boss.phase_elapsed / SPELL_SLIDE_SECS).clamp(0.0, 1.0)
    } else {
        0.0
    };
    Some(BossView {
        position: boss.body.pos,
        name: boss.name.clone(),
        spell_name,
        phase_index: boss.phase_index,
        phase_count: boss.phases.len(),
        hp_fraction: boss.hp_fraction(),
        spell_slide,
    })
}
