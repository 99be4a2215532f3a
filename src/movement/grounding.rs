//! Ground contact probes and the coyote-time state machine.

use bevy::log::debug;
use bevy::prelude::*;

use super::collaborators::CollisionQuery;
use super::resources::{ControllerVariant, MovementTuning};
use super::state::MovementState;

/// An axis-aligned query box in world space.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct ProbeBox {
    pub center: Vec2,
    pub size: Vec2,
}

/// Thin box just below the feet used for raw contact.
pub fn ground_probe(tuning: &MovementTuning, feet: Vec2) -> ProbeBox {
    ProbeBox {
        center: Vec2::new(feet.x, feet.y - tuning.ground_probe_depth / 2.0),
        size: Vec2::new(tuning.probe_width, tuning.ground_probe_depth),
    }
}

/// Tall box below the feet; ground inside it blocks an extra jump.
pub fn min_height_probe(tuning: &MovementTuning, feet: Vec2) -> ProbeBox {
    ProbeBox {
        center: Vec2::new(feet.x, feet.y - tuning.extra_jump_min_height / 2.0),
        size: Vec2::new(tuning.probe_width, tuning.extra_jump_min_height),
    }
}

pub(crate) fn probe_overlaps(
    tuning: &MovementTuning,
    probe: ProbeBox,
    sensors: &impl CollisionQuery,
) -> bool {
    sensors.overlap_box(probe.center, probe.size, tuning.ground_layer_mask)
}

/// Run the ground probe and advance the grounding state machine.
/// Returns true on a landing edge.
pub(crate) fn update_grounding(
    tuning: &MovementTuning,
    state: &mut MovementState,
    feet: Vec2,
    sensors: &impl CollisionQuery,
) -> bool {
    let touching = probe_overlaps(tuning, ground_probe(tuning, feet), sensors);
    let was_touching = state.is_grounded;
    state.is_grounded = touching;

    let landed = match tuning.variant {
        // Re-grounds whenever contact is seen without the coyote flag, so a
        // sustained contact lands again after every expiry.
        ControllerVariant::Basic => touching && !state.is_coyote_grounded,
        ControllerVariant::Refined => touching && !was_touching,
    };

    if landed {
        state.is_coyote_grounded = true;
        state.remaining_extra_jumps = tuning.initial_extra_jumps;
        state.restart_coyote_timer(tuning.coyote_jump_time);
        debug!(
            "Landed: feet={:?}, extra_jumps_remaining={}",
            feet, state.remaining_extra_jumps
        );
    } else if tuning.variant == ControllerVariant::Refined
        && was_touching
        && !touching
        && state.is_coyote_grounded
    {
        // Walked off an edge: the grace window starts now.
        state.restart_coyote_timer(tuning.coyote_jump_time);
        debug!("Left ground: coyote window {}s", tuning.coyote_jump_time);
    }

    landed
}

/// Handle the coyote timer running out.
pub(crate) fn expire_coyote(
    tuning: &MovementTuning,
    state: &mut MovementState,
    feet: Vec2,
    sensors: &impl CollisionQuery,
) {
    match tuning.variant {
        ControllerVariant::Basic => {
            state.is_coyote_grounded = false;
        }
        ControllerVariant::Refined => {
            // Contact seen by the last step still counts: its falling edge has
            // not been processed yet and will reopen the window.
            if state.is_grounded || probe_overlaps(tuning, ground_probe(tuning, feet), sensors) {
                debug!("Coyote timer expired while touching ground");
            } else {
                state.is_coyote_grounded = false;
                debug!("Coyote window closed");
            }
        }
    }
}
