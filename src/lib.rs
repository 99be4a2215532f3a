//! A tight 2D platformer character controller for Bevy and avian2d.
//!
//! [`MovementController`](movement::MovementController) holds the per-character
//! state and runs the fixed-step pipeline against the
//! [`RigidBody2D`](movement::RigidBody2D) and
//! [`CollisionQuery`](movement::CollisionQuery) seams. The plugins wire it to
//! avian2d bodies and the keyboard.

pub mod content;
#[cfg(feature = "dev-tools")]
pub mod debug;
pub mod effects;
pub mod movement;

use bevy::app::PluginGroupBuilder;
use bevy::prelude::*;

/// Content, movement and effects plugins. Physics is left to the caller.
pub struct PlatformerPlugins;

impl PluginGroup for PlatformerPlugins {
    fn build(self) -> PluginGroupBuilder {
        let group = PluginGroupBuilder::start::<Self>()
            .add(content::ContentPlugin)
            .add(movement::MovementPlugin)
            .add(effects::EffectsPlugin);

        #[cfg(feature = "dev-tools")]
        let group = group.add(debug::DebugPlugin);

        group
    }
}
