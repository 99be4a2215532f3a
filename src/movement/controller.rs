//! The per-character movement controller.
//!
//! Input and timer events arrive through `set_horizontal_intent`,
//! `set_jump_intent` and `advance_timers`. Once per fixed tick `step` runs the
//! ordered pipeline:
//!
//! 1. horizontal force or velocity snap, then the speed clamp
//! 2. linear drag selection
//! 3. ground probe and coyote state machine
//! 4. jump resolution, then gravity scale selection
//!
//! A tick runs on a copy of the state and a staged body; nothing is observable
//! until the whole pipeline has finished.

use bevy::log::{debug, trace};
use bevy::prelude::*;

use super::body::{BodyFrame, BodySnapshot};
use super::collaborators::{AnimationEffect, CollisionQuery, RigidBody2D};
use super::grounding::{expire_coyote, update_grounding};
use super::horizontal::{move_character, select_linear_drag};
use super::jump::{JumpKind, JumpResolution, resolve_jump, select_gravity_scale};
use super::resources::{MovementTuning, SquashSettings};
use super::state::{GroundPhase, MovementState, MovementTimer};
use crate::content::{ConfigError, validate_tuning};

/// Why a tick was skipped.
#[derive(Debug, Clone, PartialEq)]
pub enum StepError {
    /// The fixed delta was zero, negative, or not a number.
    InvalidDelta(f32),
    /// The body reported non-finite values, usually because it is being
    /// torn down.
    BodyUnavailable,
}

impl std::fmt::Display for StepError {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            StepError::InvalidDelta(dt) => write!(f, "invalid fixed delta {}", dt),
            StepError::BodyUnavailable => write!(f, "rigid body unavailable"),
        }
    }
}

impl std::error::Error for StepError {}

/// Everything one successful tick produced.
#[derive(Debug, Clone)]
pub struct TickOutcome {
    pub body: BodyFrame,
    pub jump: JumpResolution,
    pub landed: bool,
    pub snapped_to_flat_ground: bool,
    pub squash: Option<SquashSettings>,
}

impl TickOutcome {
    pub fn jumped(&self) -> Option<JumpKind> {
        self.jump.jumped()
    }

    /// Apply the staged body changes and fire the cosmetic effect.
    pub fn apply(&self, body: &mut impl RigidBody2D, effects: &mut impl AnimationEffect) {
        self.body.apply_to(body);
        if let Some(squash) = self.squash {
            effects.squash_and_stretch(squash.scale_x, squash.scale_y, squash.duration);
        }
    }
}

#[derive(Component, Debug, Clone)]
pub struct MovementController {
    tuning: MovementTuning,
    state: MovementState,
}

impl MovementController {
    /// Build a controller, rejecting tuning that fails validation.
    pub fn new(tuning: MovementTuning) -> Result<Self, ConfigError> {
        let errors = validate_tuning(&tuning);
        if !errors.is_empty() {
            return Err(ConfigError { errors });
        }
        let state = MovementState::new(tuning.initial_extra_jumps);
        Ok(Self { tuning, state })
    }

    pub fn tuning(&self) -> &MovementTuning {
        &self.tuning
    }

    pub fn state(&self) -> &MovementState {
        &self.state
    }

    pub fn phase(&self) -> GroundPhase {
        self.state.phase()
    }

    pub fn horizontal_direction(&self) -> f32 {
        self.state.horizontal_direction
    }

    pub fn jump_held(&self) -> bool {
        self.state.jump_held
    }

    pub fn jump_buffered(&self) -> bool {
        self.state.jump_buffered
    }

    pub fn remaining_extra_jumps(&self) -> u32 {
        self.state.remaining_extra_jumps
    }

    pub fn is_grounded(&self) -> bool {
        self.state.is_grounded
    }

    pub fn is_coyote_grounded(&self) -> bool {
        self.state.is_coyote_grounded
    }

    /// Foot anchor for a body at `position`.
    pub fn feet(&self, position: Vec2) -> Vec2 {
        self.tuning.feet(position)
    }

    /// Latch the latest horizontal axis value. Last write wins.
    pub fn set_horizontal_intent(&mut self, x: f32) {
        self.state.horizontal_direction = if x.is_finite() {
            x.clamp(-1.0, 1.0)
        } else {
            0.0
        };
    }

    /// Latch the jump button. A fresh press opens the buffer window unless
    /// one is already open.
    pub fn set_jump_intent(&mut self, pressed: bool) {
        let rising = pressed && !self.state.jump_held;
        self.state.jump_held = pressed;
        if !rising || self.state.jump_buffered {
            return;
        }

        self.state.jump_buffered = true;
        self.state.jump_buffer_timer = Some(self.state.timers.schedule_once(
            self.tuning.jump_input_buffer_time,
            MovementTimer::JumpBufferExpired,
        ));
        trace!("Jump buffered for {}s", self.tuning.jump_input_buffer_time);
    }

    /// Advance the deferred timers and handle whatever came due.
    /// `position` is the body position, used to re-check ground contact.
    pub fn advance_timers(&mut self, dt: f32, position: Vec2, sensors: &impl CollisionQuery) {
        let feet = self.feet(position);
        for (handle, event) in self.state.timers.advance(dt) {
            match event {
                MovementTimer::JumpBufferExpired => {
                    // A stale handle means the buffer was already consumed.
                    if self.state.jump_buffer_timer != Some(handle) {
                        continue;
                    }
                    self.state.jump_buffer_timer = None;
                    self.state.jump_buffered = false;
                    trace!("Jump buffer expired");
                }
                MovementTimer::CoyoteExpired => {
                    if self.state.coyote_timer != Some(handle) {
                        continue;
                    }
                    self.state.coyote_timer = None;
                    expire_coyote(&self.tuning, &mut self.state, feet, sensors);
                }
            }
        }
    }

    /// Run one fixed tick against a snapshot of the body.
    ///
    /// On error nothing changes. On success the controller state is already
    /// committed and the returned outcome must be applied to the body.
    pub fn step(
        &mut self,
        dt: f32,
        snapshot: BodySnapshot,
        sensors: &impl CollisionQuery,
    ) -> Result<TickOutcome, StepError> {
        if !(dt.is_finite() && dt > 0.0) {
            return Err(StepError::InvalidDelta(dt));
        }
        if !snapshot.is_finite() {
            return Err(StepError::BodyUnavailable);
        }

        let tuning = &self.tuning;
        let mut state = self.state.clone();
        let mut body = BodyFrame::new(snapshot);
        let feet = tuning.feet(snapshot.position);
        let direction = state.horizontal_direction;

        // 1. Horizontal movement
        let snapped = move_character(tuning, direction, &mut body, sensors);

        // 2. Linear drag, from last tick's contact
        let drag = select_linear_drag(tuning, state.is_grounded, direction, body.velocity().x);
        body.set_drag(drag);

        // 3. Grounding
        let landed = update_grounding(tuning, &mut state, feet, sensors);

        // 4. Jump, then gravity
        let jump = resolve_jump(tuning, &mut state, feet, &mut body, sensors);
        let gravity_scale =
            select_gravity_scale(tuning, body.velocity().y, state.is_grounded, state.jump_held);
        body.set_gravity_scale(gravity_scale);

        trace!(
            "Tick: dir={:.2}, vel={:?}, drag={}, gravity_scale={}, phase={:?}",
            direction,
            body.velocity(),
            drag,
            gravity_scale,
            state.phase()
        );
        if jump == JumpResolution::TooCloseToGround {
            debug!("Extra jump held back: ground within min height");
        }

        let squash = jump.jumped().map(|_| tuning.jump_squash);
        self.state = state;

        Ok(TickOutcome {
            body,
            jump,
            landed,
            snapped_to_flat_ground: snapped,
            squash,
        })
    }

    /// Convenience for callers that own the body directly: snapshot, step,
    /// and apply in one call.
    pub fn step_body(
        &mut self,
        dt: f32,
        body: &mut impl RigidBody2D,
        sensors: &impl CollisionQuery,
        effects: &mut impl AnimationEffect,
    ) -> Result<TickOutcome, StepError> {
        let outcome = self.step(dt, BodySnapshot::capture(body), sensors)?;
        outcome.apply(body, effects);
        Ok(outcome)
    }
}
