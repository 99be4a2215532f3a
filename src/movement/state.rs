//! Movement domain: transient per-character state.

use super::timers::{DeferredTimers, TimerHandle};

/// Deferred events the controller schedules for itself.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum MovementTimer {
    JumpBufferExpired,
    CoyoteExpired,
}

/// Where the grounding state machine currently is.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum GroundPhase {
    Airborne,
    /// Touching ground but no longer eligible for a grounded jump.
    Grounded,
    /// Eligible for a grounded jump, touching or inside the coyote window.
    CoyoteGrounded,
}

#[derive(Debug, Clone, Default)]
pub struct MovementState {
    pub horizontal_direction: f32,
    pub jump_held: bool,
    /// A recent jump press that has not been consumed or timed out.
    pub jump_buffered: bool,
    pub remaining_extra_jumps: u32,
    /// Raw contact from this tick's ground probe.
    pub is_grounded: bool,
    /// Jump eligibility, raw contact plus grace.
    pub is_coyote_grounded: bool,
    pub(crate) timers: DeferredTimers<MovementTimer>,
    pub(crate) jump_buffer_timer: Option<TimerHandle>,
    pub(crate) coyote_timer: Option<TimerHandle>,
}

impl MovementState {
    pub fn new(initial_extra_jumps: u32) -> Self {
        Self {
            remaining_extra_jumps: initial_extra_jumps,
            ..Default::default()
        }
    }

    pub fn phase(&self) -> GroundPhase {
        match (self.is_coyote_grounded, self.is_grounded) {
            (true, _) => GroundPhase::CoyoteGrounded,
            (false, true) => GroundPhase::Grounded,
            (false, false) => GroundPhase::Airborne,
        }
    }

    /// Seconds left in the coyote window, if one is running.
    pub fn coyote_time_left(&self) -> Option<f32> {
        self.coyote_timer.and_then(|h| self.timers.remaining(h))
    }

    /// Seconds left in the jump buffer window, if one is open.
    pub fn jump_buffer_time_left(&self) -> Option<f32> {
        self.jump_buffer_timer.and_then(|h| self.timers.remaining(h))
    }

    pub(crate) fn cancel_coyote_timer(&mut self) {
        if let Some(handle) = self.coyote_timer.take() {
            self.timers.cancel(handle);
        }
    }

    pub(crate) fn restart_coyote_timer(&mut self, delay: f32) {
        self.cancel_coyote_timer();
        self.coyote_timer = Some(
            self.timers
                .schedule_once(delay, MovementTimer::CoyoteExpired),
        );
    }
}
