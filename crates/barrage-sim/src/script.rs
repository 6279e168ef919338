//! Stage script engine — a sorted, one-shot, time-triggered action list.
//!
//! Actions fire exactly once when the script clock crosses their
//! timestamp, in timestamp order (stable on ties). The clock does not
//! advance while a boss is alive in the stage: stage beats never fire
//! into a boss fight. The guard is evaluated once per call, so an event
//! fired this tick may push a boss and later-due events still fire this
//! same tick — authors leave a boss-less gap between beats.

use crate::stage::Stage;

pub type ScriptAction = Box<dyn FnOnce(&mut Stage) + Send>;

pub struct ScriptEvent {
    pub time: f64,
    action: Option<ScriptAction>,
}

impl ScriptEvent {
    pub fn new(time: f64, action: impl FnOnce(&mut Stage) + Send + 'static) -> Self {
        Self {
            time,
            action: Some(Box::new(action)),
        }
    }
}

/// A stage's full timeline, as produced by the stage registry.
pub struct StageScript {
    pub events: Vec<ScriptEvent>,
}

#[derive(Default)]
pub struct ScriptEngine {
    events: Vec<ScriptEvent>,
    time: f64,
    cursor: usize,
}

impl ScriptEngine {
    pub fn new() -> Self {
        Self::default()
    }

    /// Load a timeline, sorting defensively by time (stable on ties) and
    /// resetting the clock and cursor.
    pub fn load(&mut self, mut events: Vec<ScriptEvent>) {
        events.sort_by(|a, b| a.time.partial_cmp(&b.time).unwrap_or(std::cmp::Ordering::Equal));
        self.events = events;
        self.time = 0.0;
        self.cursor = 0;
    }

    /// Advance the clock and fire due events. No-op while a boss lives.
    pub fn update(&mut self, dt: f64, stage: &mut Stage) {
        if stage.boss_active() {
            return;
        }
        self.time += dt;
        while self.cursor < self.events.len() && self.events[self.cursor].time <= self.time {
            let action = self.events[self.cursor].action.take();
            self.cursor += 1;
            if let Some(action) = action {
                action(stage);
            }
        }
    }

    pub fn time(&self) -> f64 {
        self.time
    }

    /// True once every event has fired.
    pub fn is_finished(&self) -> bool {
        self.cursor >= self.events.len()
    }

    /// Timestamp of the next unfired event, `None` when exhausted.
    pub fn next_event_time(&self) -> Option<f64> {
        self.events.get(self.cursor).map(|e| e.time)
    }
}
