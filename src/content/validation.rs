//! Validation for movement tuning values.
//!
//! Everything here runs when a profile is loaded or a controller is built,
//! never inside the fixed step.

use bevy::prelude::*;

use super::data::{MovementProfileDef, PROFILE_SCHEMA_VERSION};
use crate::movement::{MovementTuning, SquashSettings};

/// A validation error with context about which value failed.
#[derive(Debug, Clone, PartialEq)]
pub struct ValidationError {
    pub field: &'static str,
    pub value: String,
    pub reason: &'static str,
}

impl std::fmt::Display for ValidationError {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "'{}' = {} {}", self.field, self.value, self.reason)
    }
}

impl std::error::Error for ValidationError {}

/// Every validation failure found in one tuning set.
#[derive(Debug, Clone, PartialEq)]
pub struct ConfigError {
    pub errors: Vec<ValidationError>,
}

impl ConfigError {
    /// Returns true if any error refers to `field`.
    pub fn mentions(&self, field: &str) -> bool {
        self.errors.iter().any(|e| e.field == field)
    }
}

impl std::fmt::Display for ConfigError {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "invalid movement tuning ({} errors)", self.errors.len())?;
        for error in &self.errors {
            write!(f, "\n  - {}", error)?;
        }
        Ok(())
    }
}

impl std::error::Error for ConfigError {}

/// Push an error unless the value is a finite, non-negative magnitude.
macro_rules! check_magnitude {
    ($errors:expr, $field:expr, $value:expr) => {
        let value: f32 = $value;
        if !value.is_finite() {
            $errors.push(ValidationError {
                field: $field,
                value: value.to_string(),
                reason: "must be finite",
            });
        } else if value < 0.0 {
            $errors.push(ValidationError {
                field: $field,
                value: value.to_string(),
                reason: "must not be negative",
            });
        }
    };
}

/// Push an error unless the value lies in [0, 1].
macro_rules! check_unit_interval {
    ($errors:expr, $field:expr, $value:expr) => {
        let value: f32 = $value;
        if !(0.0..=1.0).contains(&value) {
            $errors.push(ValidationError {
                field: $field,
                value: value.to_string(),
                reason: "must lie in [0, 1]",
            });
        }
    };
}

/// Validate a runtime tuning set.
/// Returns a list of validation errors, empty if the tuning is usable.
pub fn validate_tuning(tuning: &MovementTuning) -> Vec<ValidationError> {
    let mut errors = Vec::new();

    // Movement variables
    check_magnitude!(errors, "movement_acceleration", tuning.movement_acceleration);
    check_magnitude!(errors, "max_move_speed", tuning.max_move_speed);
    check_magnitude!(errors, "ground_linear_drag", tuning.ground_linear_drag);
    check_magnitude!(errors, "air_linear_drag", tuning.air_linear_drag);
    check_unit_interval!(errors, "horizontal_dead_zone", tuning.horizontal_dead_zone);

    // Jumping
    check_magnitude!(errors, "jump_force", tuning.jump_force);
    check_magnitude!(errors, "extra_jump_min_height", tuning.extra_jump_min_height);
    check_magnitude!(errors, "fall_multiplier", tuning.fall_multiplier);
    check_magnitude!(errors, "low_jump_fall_multiplier", tuning.low_jump_fall_multiplier);
    check_magnitude!(errors, "base_gravity_scale", tuning.base_gravity_scale);

    // Timers
    check_magnitude!(errors, "jump_input_buffer_time", tuning.jump_input_buffer_time);
    check_magnitude!(errors, "coyote_jump_time", tuning.coyote_jump_time);

    // Probes
    if !tuning.foot_offset.is_finite() {
        errors.push(ValidationError {
            field: "foot_offset",
            value: format!("{:?}", tuning.foot_offset),
            reason: "must be finite",
        });
    }
    check_magnitude!(errors, "probe_width", tuning.probe_width);
    check_magnitude!(errors, "ground_probe_depth", tuning.ground_probe_depth);
    check_magnitude!(
        errors,
        "flat_ground_probe_distance",
        tuning.flat_ground_probe_distance
    );
    check_unit_interval!(
        errors,
        "flat_ground_min_normal_y",
        tuning.flat_ground_min_normal_y
    );
    if tuning.ground_layer_mask == 0 {
        errors.push(ValidationError {
            field: "ground_layer_mask",
            value: "0".to_string(),
            reason: "must select at least one layer",
        });
    }

    // Squash
    check_magnitude!(errors, "jump_squash.scale_x", tuning.jump_squash.scale_x);
    check_magnitude!(errors, "jump_squash.scale_y", tuning.jump_squash.scale_y);
    check_magnitude!(errors, "jump_squash.duration", tuning.jump_squash.duration);

    errors
}

/// Convert a loaded profile into runtime tuning, rejecting invalid values.
pub fn tuning_from_profile(def: &MovementProfileDef) -> Result<MovementTuning, ConfigError> {
    let mut errors = Vec::new();

    if def.schema_version != PROFILE_SCHEMA_VERSION {
        errors.push(ValidationError {
            field: "schema_version",
            value: def.schema_version.to_string(),
            reason: "is not supported",
        });
    }

    let initial_extra_jumps = match u32::try_from(def.jumping.extra_jumps) {
        Ok(count) => count,
        Err(_) => {
            errors.push(ValidationError {
                field: "initial_extra_jumps",
                value: def.jumping.extra_jumps.to_string(),
                reason: if def.jumping.extra_jumps < 0 {
                    "must not be negative"
                } else {
                    "is too large"
                },
            });
            0
        }
    };

    let tuning = MovementTuning {
        variant: def.variant,
        movement_acceleration: def.movement.acceleration,
        max_move_speed: def.movement.max_speed,
        ground_linear_drag: def.movement.ground_linear_drag,
        air_linear_drag: def.movement.air_linear_drag,
        horizontal_dead_zone: def.movement.dead_zone,
        jump_force: def.jumping.jump_force,
        initial_extra_jumps,
        extra_jump_min_height: def.jumping.extra_jump_min_height,
        fall_multiplier: def.jumping.fall_multiplier,
        low_jump_fall_multiplier: def.jumping.low_jump_fall_multiplier,
        base_gravity_scale: def.jumping.base_gravity_scale,
        jump_input_buffer_time: def.timing.jump_input_buffer_time,
        coyote_jump_time: def.timing.coyote_jump_time,
        foot_offset: Vec2::new(def.probes.foot_offset.0, def.probes.foot_offset.1),
        probe_width: def.probes.width,
        ground_probe_depth: def.probes.ground_depth,
        flat_ground_probe_distance: def.probes.flat_ground_distance,
        flat_ground_min_normal_y: def.probes.flat_ground_min_normal_y,
        ground_layer_mask: def.probes.ground_layer_mask,
        jump_squash: SquashSettings {
            scale_x: def.squash.scale_x,
            scale_y: def.squash.scale_y,
            duration: def.squash.duration,
        },
    };

    errors.extend(validate_tuning(&tuning));

    if errors.is_empty() {
        Ok(tuning)
    } else {
        Err(ConfigError { errors })
    }
}
