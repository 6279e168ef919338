//! Enemy movement archetypes.
//!
//! Pure functions that compute a velocity for an enemy body from its
//! movement plan and situation. No engine dependency — the phase runner
//! feeds a context in and applies the velocity out.

use barrage_core::types::Vec2;

/// How an enemy moves for the duration of a phase.
#[derive(Debug, Clone, Copy)]
pub enum MovePlan {
    /// Constant velocity across the field.
    Sweep { velocity: Vec2 },
    /// Ease from the spawn point to `target`, hold there, then leave.
    EnterHoldLeave {
        target: Vec2,
        approach_secs: f64,
        hold_secs: f64,
        leave_velocity: Vec2,
    },
    /// Descend at a fixed rate while weaving horizontally.
    SineDrift {
        descent: f64,
        amplitude: f64,
        frequency: f64,
    },
    /// Launch with `initial` velocity, damped exponentially to a stall.
    Glide { initial: Vec2, damping: f64 },
}

/// Input to the movement evaluation for a single enemy.
pub struct MoveContext {
    pub spawn_pos: Vec2,
    pub position: Vec2,
    /// Seconds since the phase (and plan) began.
    pub elapsed: f64,
}

/// Evaluate the plan: returns the velocity to apply this tick.
pub fn evaluate(plan: &MovePlan, ctx: &MoveContext) -> Vec2 {
    match *plan {
        MovePlan::Sweep { velocity } => velocity,
        MovePlan::EnterHoldLeave {
            target,
            approach_secs,
            hold_secs,
            leave_velocity,
        } => {
            let remaining = approach_secs - ctx.elapsed;
            if remaining > 0.0 {
                // Arrive exactly when the approach window closes.
                (target - ctx.position) / remaining.max(0.05)
            } else if ctx.elapsed < approach_secs + hold_secs {
                Vec2::ZERO
            } else {
                leave_velocity
            }
        }
        MovePlan::SineDrift {
            descent,
            amplitude,
            frequency,
        } => {
            let sway = (ctx.elapsed * frequency * std::f64::consts::TAU).cos() * amplitude;
            Vec2::new(sway, descent)
        }
        MovePlan::Glide { initial, damping } => initial * (-damping * ctx.elapsed).exp(),
    }
}
