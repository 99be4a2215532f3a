//! Jump resolution and gravity shaping.

use bevy::log::debug;
use bevy::prelude::*;

use super::collaborators::{CollisionQuery, RigidBody2D};
use super::grounding::{min_height_probe, probe_overlaps};
use super::resources::{ControllerVariant, MovementTuning};
use super::state::MovementState;

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum JumpKind {
    /// Grounded or coyote jump.
    Primary,
    /// Air jump paid for with an extra-jump charge.
    Extra,
}

/// What jump resolution decided this tick.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum JumpResolution {
    Jumped(JumpKind),
    /// A buffered extra jump was refused because ground is too close below.
    TooCloseToGround,
    None,
}

impl JumpResolution {
    pub fn jumped(&self) -> Option<JumpKind> {
        match self {
            JumpResolution::Jumped(kind) => Some(*kind),
            _ => None,
        }
    }
}

fn launch(tuning: &MovementTuning, body: &mut impl RigidBody2D) {
    let velocity = body.velocity();
    body.set_velocity(Vec2::new(velocity.x, 0.0));
    body.apply_impulse(Vec2::Y * tuning.jump_force);
}

/// A grounded jump uses up the press so it cannot also pay for an air jump.
fn consume_jump_buffer(state: &mut MovementState) {
    state.jump_buffered = false;
    if let Some(handle) = state.jump_buffer_timer.take() {
        state.timers.cancel(handle);
    }
}

/// Grant at most one jump, primary before extra.
pub(crate) fn resolve_jump(
    tuning: &MovementTuning,
    state: &mut MovementState,
    feet: Vec2,
    body: &mut impl RigidBody2D,
    sensors: &impl CollisionQuery,
) -> JumpResolution {
    if state.is_coyote_grounded && state.jump_buffered {
        launch(tuning, body);
        state.cancel_coyote_timer();
        state.is_coyote_grounded = false;
        consume_jump_buffer(state);
        debug!(
            "Primary jump: grounded={}, extra_jumps_remaining={}",
            state.is_grounded, state.remaining_extra_jumps
        );
        return JumpResolution::Jumped(JumpKind::Primary);
    }

    if state.jump_buffered && state.remaining_extra_jumps > 0 {
        if probe_overlaps(tuning, min_height_probe(tuning, feet), sensors) {
            // Keep the buffer; it may still turn into a landing jump.
            return JumpResolution::TooCloseToGround;
        }
        // The press stays buffered until its timer runs out.
        launch(tuning, body);
        state.remaining_extra_jumps -= 1;
        debug!(
            "Extra jump: extra_jumps_remaining now {}",
            state.remaining_extra_jumps
        );
        return JumpResolution::Jumped(JumpKind::Extra);
    }

    JumpResolution::None
}

/// Pick the gravity scale for this tick.
///
/// Fast fall while descending, a heavier pull while rising with the button
/// released (short hop), and the baseline otherwise.
pub fn select_gravity_scale(
    tuning: &MovementTuning,
    vy: f32,
    grounded: bool,
    jump_held: bool,
) -> f32 {
    let falling = match tuning.variant {
        ControllerVariant::Basic => vy < 0.0,
        ControllerVariant::Refined => vy < 0.0 && !grounded,
    };

    if falling {
        tuning.fall_multiplier
    } else if vy > 0.0 && !jump_held {
        tuning.low_jump_fall_multiplier
    } else {
        tuning.base_gravity_scale
    }
}
