//! Movement domain: controller core, tuning, and the avian2d integration.

mod body;
mod collaborators;
mod components;
mod controller;
pub mod dev;
mod grounding;
mod horizontal;
mod jump;
mod resources;
mod state;
pub(crate) mod systems;
mod timers;

pub use body::{BodyFrame, BodySnapshot};
pub use collaborators::{AnimationEffect, BodyConstraints, CollisionQuery, RayHit, RigidBody2D};
pub use components::{GameLayer, Ground, Player};
pub use controller::{MovementController, StepError, TickOutcome};
pub use grounding::{ProbeBox, ground_probe, min_height_probe};
pub use horizontal::{clamp_horizontal_speed, is_changing_direction, on_flat_ground, select_linear_drag};
pub use jump::{JumpKind, JumpResolution, select_gravity_scale};
pub use resources::{ControllerVariant, MovementTuning, SquashSettings};
pub use state::{GroundPhase, MovementState, MovementTimer};
pub use timers::{DeferredTimers, TimerHandle};

use bevy::prelude::*;

use crate::effects::JumpSquashed;
use crate::movement::systems::{advance_movement_timers, read_input, step_movement_controllers};

/// Ordering for the fixed-step movement systems.
#[derive(SystemSet, Debug, Clone, PartialEq, Eq, Hash)]
pub enum MovementSet {
    /// Deferred timers from the input clock.
    Timers,
    /// The ordered controller pipeline.
    Step,
}

pub struct MovementPlugin;

impl Plugin for MovementPlugin {
    fn build(&self, app: &mut App) {
        app.init_resource::<MovementTuning>()
            .register_type::<MovementTuning>()
            .add_message::<JumpSquashed>()
            .configure_sets(FixedUpdate, (MovementSet::Timers, MovementSet::Step).chain())
            .add_systems(Update, read_input)
            .add_systems(
                FixedUpdate,
                (
                    advance_movement_timers.in_set(MovementSet::Timers),
                    step_movement_controllers.in_set(MovementSet::Step),
                ),
            );
    }
}
