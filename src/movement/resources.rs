//! Movement domain: tuning resource.

use bevy::prelude::*;
use serde::{Deserialize, Serialize};

/// Which generation of the controller logic to run.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Deserialize, Serialize, Reflect)]
pub enum ControllerVariant {
    /// Force-only horizontal movement; grounding clears unconditionally when
    /// the coyote timer runs out.
    Basic,
    /// Velocity snap on flat ground, coyote expiry re-checks contact, and fast
    /// fall only applies while airborne.
    #[default]
    Refined,
}

/// Squash-and-stretch played when a jump fires.
#[derive(Debug, Clone, Copy, PartialEq, Deserialize, Serialize, Reflect)]
pub struct SquashSettings {
    pub scale_x: f32,
    pub scale_y: f32,
    pub duration: f32,
}

impl Default for SquashSettings {
    fn default() -> Self {
        Self {
            scale_x: 0.5,
            scale_y: 1.2,
            duration: 0.1,
        }
    }
}

#[derive(Resource, Debug, Clone, PartialEq, Reflect)]
pub struct MovementTuning {
    pub variant: ControllerVariant,
    pub movement_acceleration: f32,
    pub max_move_speed: f32,
    pub ground_linear_drag: f32,
    pub air_linear_drag: f32,
    /// Below this absolute axis value the character counts as not steering.
    pub horizontal_dead_zone: f32,
    pub jump_force: f32,
    /// Air jumps granted per landing (0 = no double jump).
    pub initial_extra_jumps: u32,
    pub extra_jump_min_height: f32,
    pub fall_multiplier: f32,
    pub low_jump_fall_multiplier: f32,
    pub base_gravity_scale: f32,
    pub jump_input_buffer_time: f32,
    pub coyote_jump_time: f32,
    /// Foot anchor relative to the body position.
    pub foot_offset: Vec2,
    pub probe_width: f32,
    pub ground_probe_depth: f32,
    pub flat_ground_probe_distance: f32,
    pub flat_ground_min_normal_y: f32,
    pub ground_layer_mask: u32,
    pub jump_squash: SquashSettings,
}

impl Default for MovementTuning {
    fn default() -> Self {
        Self {
            variant: ControllerVariant::Refined,
            movement_acceleration: 70.0,
            max_move_speed: 12.0,
            ground_linear_drag: 7.0,
            air_linear_drag: 2.5,
            horizontal_dead_zone: 0.4,
            jump_force: 25.0,
            initial_extra_jumps: 1,
            extra_jump_min_height: 1.0,
            fall_multiplier: 8.0,
            low_jump_fall_multiplier: 14.0,
            base_gravity_scale: 2.0,
            jump_input_buffer_time: 0.2,
            coyote_jump_time: 0.2,
            foot_offset: Vec2::new(0.0, -0.5),
            probe_width: 0.95,
            ground_probe_depth: 0.05,
            flat_ground_probe_distance: 0.1,
            flat_ground_min_normal_y: 0.95,
            // GameLayer::Ground
            ground_layer_mask: 1 << 1,
            jump_squash: SquashSettings::default(),
        }
    }
}

impl MovementTuning {
    /// Foot anchor in world space for a body at `position`.
    pub fn feet(&self, position: Vec2) -> Vec2 {
        position + self.foot_offset
    }

    /// Apex height of a jump launched from rest, assuming unit mass and the
    /// baseline gravity scale. Uses h = v² / (2g).
    pub fn single_jump_height(&self, gravity: f32) -> f32 {
        let g = gravity * self.base_gravity_scale;
        if g <= 0.0 {
            return f32::INFINITY;
        }
        self.jump_force * self.jump_force / (2.0 * g)
    }
}
