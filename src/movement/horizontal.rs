//! Horizontal movement and drag selection.

use bevy::prelude::*;

use super::collaborators::{BodyConstraints, CollisionQuery, RigidBody2D};
use super::resources::{ControllerVariant, MovementTuning};

/// Limit a horizontal speed to `max`, keeping its sign.
pub fn clamp_horizontal_speed(vx: f32, max: f32) -> f32 {
    if vx.abs() > max {
        vx.signum() * max
    } else {
        vx
    }
}

/// Whether the feet stand on ground flat enough to snap velocity.
pub fn on_flat_ground(tuning: &MovementTuning, feet: Vec2, sensors: &impl CollisionQuery) -> bool {
    sensors
        .raycast(
            feet,
            Vec2::NEG_Y,
            tuning.flat_ground_probe_distance,
            tuning.ground_layer_mask,
        )
        .is_some_and(|hit| hit.normal.y.abs() >= tuning.flat_ground_min_normal_y)
}

/// Apply horizontal intent to the body, then clamp to the maximum speed.
/// Returns true when the flat-ground snap was used.
pub(crate) fn move_character(
    tuning: &MovementTuning,
    direction: f32,
    body: &mut impl RigidBody2D,
    sensors: &impl CollisionQuery,
) -> bool {
    let feet = tuning.feet(body.position());
    let snapped = match tuning.variant {
        ControllerVariant::Basic => {
            body.apply_force(Vec2::new(direction, 0.0) * tuning.movement_acceleration);
            false
        }
        ControllerVariant::Refined => {
            if on_flat_ground(tuning, feet, sensors) {
                let velocity = body.velocity();
                body.set_velocity(Vec2::new(tuning.max_move_speed * direction, velocity.y));
                body.set_constraints(if direction == 0.0 {
                    BodyConstraints::ROTATION_AND_X_LOCKED
                } else {
                    BodyConstraints::ROTATION_LOCKED
                });
                true
            } else {
                body.set_constraints(BodyConstraints::ROTATION_LOCKED);
                body.apply_force(Vec2::new(direction, 0.0) * tuning.movement_acceleration);
                false
            }
        }
    };

    let velocity = body.velocity();
    if velocity.x.abs() > tuning.max_move_speed {
        body.set_velocity(Vec2::new(
            clamp_horizontal_speed(velocity.x, tuning.max_move_speed),
            velocity.y,
        ));
    }

    snapped
}

/// True when the intent points against the current horizontal velocity.
pub fn is_changing_direction(vx: f32, direction: f32) -> bool {
    (vx > 0.0 && direction < 0.0) || (vx < 0.0 && direction > 0.0)
}

/// Pick the linear drag for this tick.
///
/// Ground drag while idling or turning on the ground, air drag while airborne,
/// and none while actively running on the ground.
pub fn select_linear_drag(
    tuning: &MovementTuning,
    grounded: bool,
    direction: f32,
    vx: f32,
) -> f32 {
    let idle = direction.abs() < tuning.horizontal_dead_zone;
    if grounded && (idle || is_changing_direction(vx, direction)) {
        tuning.ground_linear_drag
    } else if !grounded {
        tuning.air_linear_drag
    } else {
        0.0
    }
}
