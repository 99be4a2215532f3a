//! Data definitions for movement profile files.
//!
//! These structs mirror the structure in assets/data/movement.ron and are used
//! for deserialization only. Runtime code works with `MovementTuning`, which is
//! produced from a profile through validation.

use bevy::prelude::*;
use serde::{Deserialize, Serialize};

use crate::movement::{ControllerVariant, MovementTuning, SquashSettings};

// ============================================================================
// Movement profile (movement.ron / movement.json)
// ============================================================================

/// Profile layout this build understands.
pub const PROFILE_SCHEMA_VERSION: u32 = 1;

#[derive(Debug, Clone, Deserialize, Serialize, Reflect)]
pub struct MovementProfileDef {
    pub schema_version: u32,
    #[serde(default)]
    pub variant: ControllerVariant,
    pub movement: MovementVariablesDef,
    pub jumping: JumpingDef,
    pub timing: TimingDef,
    #[serde(default)]
    pub probes: ProbesDef,
    #[serde(default)]
    pub squash: SquashDef,
}

#[derive(Debug, Clone, Deserialize, Serialize, Reflect)]
pub struct MovementVariablesDef {
    pub acceleration: f32,
    pub max_speed: f32,
    pub ground_linear_drag: f32,
    pub air_linear_drag: f32,
    #[serde(default = "default_dead_zone")]
    pub dead_zone: f32,
}

#[derive(Debug, Clone, Deserialize, Serialize, Reflect)]
pub struct JumpingDef {
    pub jump_force: f32,
    /// Signed so that a negative count is reported by validation instead of
    /// failing as a parse error.
    pub extra_jumps: i64,
    pub extra_jump_min_height: f32,
    pub fall_multiplier: f32,
    pub low_jump_fall_multiplier: f32,
    #[serde(default = "default_base_gravity_scale")]
    pub base_gravity_scale: f32,
}

#[derive(Debug, Clone, Deserialize, Serialize, Reflect)]
pub struct TimingDef {
    pub jump_input_buffer_time: f32,
    pub coyote_jump_time: f32,
}

#[derive(Debug, Clone, Deserialize, Serialize, Reflect)]
pub struct ProbesDef {
    pub foot_offset: (f32, f32),
    pub width: f32,
    pub ground_depth: f32,
    pub flat_ground_distance: f32,
    pub flat_ground_min_normal_y: f32,
    /// Bit mask of the ground collision layer.
    pub ground_layer_mask: u32,
}

#[derive(Debug, Clone, Deserialize, Serialize, Reflect)]
pub struct SquashDef {
    pub scale_x: f32,
    pub scale_y: f32,
    pub duration: f32,
}

fn default_dead_zone() -> f32 {
    MovementTuning::default().horizontal_dead_zone
}

fn default_base_gravity_scale() -> f32 {
    MovementTuning::default().base_gravity_scale
}

impl Default for ProbesDef {
    fn default() -> Self {
        let tuning = MovementTuning::default();
        Self {
            foot_offset: (tuning.foot_offset.x, tuning.foot_offset.y),
            width: tuning.probe_width,
            ground_depth: tuning.ground_probe_depth,
            flat_ground_distance: tuning.flat_ground_probe_distance,
            flat_ground_min_normal_y: tuning.flat_ground_min_normal_y,
            ground_layer_mask: tuning.ground_layer_mask,
        }
    }
}

impl Default for SquashDef {
    fn default() -> Self {
        let squash = SquashSettings::default();
        Self {
            scale_x: squash.scale_x,
            scale_y: squash.scale_y,
            duration: squash.duration,
        }
    }
}

impl From<&MovementTuning> for MovementProfileDef {
    fn from(tuning: &MovementTuning) -> Self {
        Self {
            schema_version: PROFILE_SCHEMA_VERSION,
            variant: tuning.variant,
            movement: MovementVariablesDef {
                acceleration: tuning.movement_acceleration,
                max_speed: tuning.max_move_speed,
                ground_linear_drag: tuning.ground_linear_drag,
                air_linear_drag: tuning.air_linear_drag,
                dead_zone: tuning.horizontal_dead_zone,
            },
            jumping: JumpingDef {
                jump_force: tuning.jump_force,
                extra_jumps: i64::from(tuning.initial_extra_jumps),
                extra_jump_min_height: tuning.extra_jump_min_height,
                fall_multiplier: tuning.fall_multiplier,
                low_jump_fall_multiplier: tuning.low_jump_fall_multiplier,
                base_gravity_scale: tuning.base_gravity_scale,
            },
            timing: TimingDef {
                jump_input_buffer_time: tuning.jump_input_buffer_time,
                coyote_jump_time: tuning.coyote_jump_time,
            },
            probes: ProbesDef {
                foot_offset: (tuning.foot_offset.x, tuning.foot_offset.y),
                width: tuning.probe_width,
                ground_depth: tuning.ground_probe_depth,
                flat_ground_distance: tuning.flat_ground_probe_distance,
                flat_ground_min_normal_y: tuning.flat_ground_min_normal_y,
                ground_layer_mask: tuning.ground_layer_mask,
            },
            squash: SquashDef {
                scale_x: tuning.jump_squash.scale_x,
                scale_y: tuning.jump_squash.scale_y,
                duration: tuning.jump_squash.duration,
            },
        }
    }
}
