//! Stage engine — the per-frame orchestrator.
//!
//! `StageEngine` owns the stage state and the script timeline, processes
//! queued player commands, runs the systems in a fixed order, and
//! produces a `FrameSnapshot` per tick. The order is load-bearing:
//! reordering changes observable behavior (see the frame walkthrough in
//! `run_frame`).

use std::collections::VecDeque;

use barrage_core::commands::{InputFrame, PlayerCommand};
use barrage_core::config::GameConfig;
use barrage_core::constants::*;
use barrage_core::enums::{CharacterId, GamePhase, StageId};
use barrage_core::events::AudioEvent;
use barrage_core::projectile::BulletSpec;
use barrage_core::state::FrameSnapshot;
use barrage_core::types::SimTime;

use crate::script::ScriptEngine;
use crate::stage::Stage;
use crate::stages;
use crate::systems;

/// Held and edge-triggered input for the current tick.
#[derive(Debug, Clone, Copy, Default)]
pub struct InputState {
    /// Level state: true while the key is held.
    pub down: InputFrame,
    /// Edge state: true only on the tick the key went down.
    pub pressed: InputFrame,
    prev: InputFrame,
}

impl InputState {
    fn begin_tick(&mut self, frame: InputFrame) {
        self.prev = self.down;
        self.down = frame;
        self.pressed = InputFrame {
            up: frame.up && !self.prev.up,
            down: frame.down && !self.prev.down,
            left: frame.left && !self.prev.left,
            right: frame.right && !self.prev.right,
            focus: frame.focus && !self.prev.focus,
            shoot: frame.shoot && !self.prev.shoot,
            bomb: frame.bomb && !self.prev.bomb,
        };
    }
}

pub struct StageEngine {
    config: GameConfig,
    stage: Stage,
    script: ScriptEngine,
    time: SimTime,
    phase: GamePhase,
    character: CharacterId,
    stage_id: StageId,
    command_queue: VecDeque<PlayerCommand>,
    pending_input: InputFrame,
    input: InputState,
    /// Reused drain buffer for due delayed bursts.
    burst_buf: Vec<BulletSpec>,
}

impl StageEngine {
    pub fn new(config: GameConfig) -> Self {
        let character = CharacterId::default();
        let stage_id = StageId::default();
        Self {
            config,
            stage: Stage::new(config, character, stage_id),
            script: ScriptEngine::new(),
            time: SimTime::default(),
            phase: GamePhase::default(),
            character,
            stage_id,
            command_queue: VecDeque::new(),
            pending_input: InputFrame::default(),
            input: InputState::default(),
            burst_buf: Vec::new(),
        }
    }

    /// Queue a player command for processing at the next tick boundary.
    pub fn queue_command(&mut self, command: PlayerCommand) {
        self.command_queue.push_back(command);
    }

    /// Queue multiple commands.
    pub fn queue_commands(&mut self, commands: impl IntoIterator<Item = PlayerCommand>) {
        self.command_queue.extend(commands);
    }

    /// Advance the simulation by one tick and return the resulting snapshot.
    pub fn tick(&mut self) -> FrameSnapshot {
        self.process_commands();
        self.input.begin_tick(self.pending_input);

        if self.phase == GamePhase::Active {
            self.run_frame();
            self.time.advance();
        }

        let audio = std::mem::take(&mut self.stage.audio);
        systems::snapshot::build(
            &self.stage,
            self.time,
            self.phase,
            self.character,
            self.stage_id,
            audio,
        )
    }

    pub fn phase(&self) -> GamePhase {
        self.phase
    }

    pub fn time(&self) -> SimTime {
        self.time
    }

    pub fn stage(&self) -> &Stage {
        &self.stage
    }

    pub fn script(&self) -> &ScriptEngine {
        &self.script
    }

    #[cfg(test)]
    pub(crate) fn stage_mut(&mut self) -> &mut Stage {
        &mut self.stage
    }

    #[cfg(test)]
    pub(crate) fn script_mut(&mut self) -> &mut ScriptEngine {
        &mut self.script
    }

    fn process_commands(&mut self) {
        while let Some(command) = self.command_queue.pop_front() {
            self.handle_command(command);
        }
    }

    fn handle_command(&mut self, command: PlayerCommand) {
        match command {
            PlayerCommand::SetInput { frame } => {
                self.pending_input = frame;
            }
            PlayerCommand::SelectCharacter { character } => {
                if self.phase == GamePhase::MainMenu {
                    self.character = character;
                }
            }
            PlayerCommand::StartStage { stage } => {
                self.stage_id = stage;
                self.stage = Stage::new(self.config, self.character, stage);
                self.script = ScriptEngine::new();
                self.script.load(stages::load_stage(stage).events);
                self.time = SimTime::default();
                self.phase = GamePhase::Active;
            }
            PlayerCommand::AdvanceDialogue => {
                if self.stage.dialogue.is_active() {
                    self.stage.dialogue.advance();
                    self.stage.audio.push(AudioEvent::DialogueAdvance);
                }
            }
            PlayerCommand::Pause => {
                if self.phase == GamePhase::Active {
                    self.phase = GamePhase::Paused;
                }
            }
            PlayerCommand::Resume => {
                if self.phase == GamePhase::Paused {
                    self.phase = GamePhase::Active;
                }
            }
            PlayerCommand::ReturnToMenu => {
                self.phase = GamePhase::MainMenu;
            }
        }
    }

    /// One active frame, in the fixed order:
    /// dialogue gate → particles → player/shots → fast-forward check →
    /// [time-stop guarded] background/bullets/items → script → delayed
    /// bursts → enemies → end checks → collision → cosmetic decay.
    fn run_frame(&mut self) {
        let dt = DT;

        // A dialogue box halts the whole simulation below it.
        if self.stage.dialogue.is_active() {
            if self.input.pressed.shoot {
                self.stage.dialogue.advance();
                self.stage.audio.push(AudioEvent::DialogueAdvance);
            }
            return;
        }

        self.stage.elapsed += dt;

        // Particles always run, even under time-stop.
        self.stage.particles.update(dt);

        // The player side of the field is never frozen.
        systems::player::run(&mut self.stage, &self.input, dt);
        {
            let Stage {
                shots,
                enemies,
                rng,
                ..
            } = &mut self.stage;
            shots.update(enemies, rng, dt);
        }

        // Long idle gap: compress wall time by running the script clock
        // faster. Never touches the cursor, so no event can be skipped.
        let script_dt = if self.idle_gap() { dt * FAST_FORWARD_RATE } else { dt };

        if !self.stage.time_stop {
            self.stage.background_scroll += BACKGROUND_SCROLL_SPEED * dt;
            self.stage.bullets.update(dt);
            systems::items::run(&mut self.stage, dt);
        }

        self.script.update(script_dt, &mut self.stage);

        // Delayed bursts ride the stage clock, so a paused stage pauses
        // every pending burst.
        self.stage
            .delayed
            .drain_due(self.stage.elapsed, &mut self.burst_buf);
        for spec in self.burst_buf.drain(..) {
            self.stage.bullets.spawn(&spec);
        }

        systems::enemies::run(&mut self.stage, dt, self.time.tick);

        self.check_end_conditions();

        if self.phase == GamePhase::Active && !self.stage.time_stop {
            systems::collision::run(&mut self.stage);
        }
        if self.stage.player.lives < 0 {
            self.phase = GamePhase::GameOver;
        }

        self.stage.screen_flash = (self.stage.screen_flash - SCREEN_FLASH_DECAY * dt).max(0.0);
        self.stage.camera_shake = (self.stage.camera_shake - CAMERA_SHAKE_DECAY * dt).max(0.0);
    }

    /// Nothing on screen and nothing due for a while.
    fn idle_gap(&self) -> bool {
        self.stage.enemies.is_empty()
            && self.stage.bullets.active_count() == 0
            && self
                .script
                .next_event_time()
                .map_or(false, |t| t - self.script.time() > FAST_FORWARD_GAP_SECS)
    }

    fn check_end_conditions(&mut self) {
        if self.script.is_finished()
            && self.stage.enemies.is_empty()
            && self.stage.bullets.active_count() == 0
            && self.stage.delayed.is_empty()
            && !self.stage.dialogue.is_active()
        {
            self.phase = GamePhase::StageClear;
        }
    }
}
