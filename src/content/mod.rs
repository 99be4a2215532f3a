//! Content domain: movement profile files, loading, and validation.

mod data;
mod loader;
#[cfg(test)]
mod tests;
mod validation;

pub use data::{
    JumpingDef, MovementProfileDef, MovementVariablesDef, PROFILE_SCHEMA_VERSION, ProbesDef,
    SquashDef, TimingDef,
};
pub use loader::{
    ContentLoadError, ProfileFormat, load_movement_tuning, load_profile, parse_profile,
};
pub use validation::{ConfigError, ValidationError, tuning_from_profile, validate_tuning};

use bevy::prelude::*;
use std::path::PathBuf;

use crate::movement::MovementTuning;

/// Where the movement profile is read from at startup.
#[derive(Resource, Debug, Clone)]
pub struct MovementProfilePath(pub PathBuf);

impl Default for MovementProfilePath {
    fn default() -> Self {
        Self(PathBuf::from("assets/data/movement.ron"))
    }
}

pub struct ContentPlugin;

impl Plugin for ContentPlugin {
    fn build(&self, app: &mut App) {
        app.init_resource::<MovementProfilePath>()
            .init_resource::<MovementTuning>()
            .register_type::<MovementProfileDef>()
            .add_systems(PreStartup, load_movement_profile);
    }
}

/// Replace the default tuning with the profile on disk.
/// A missing or invalid profile keeps the defaults so the game still starts.
pub(crate) fn load_movement_profile(
    path: Res<MovementProfilePath>,
    mut tuning: ResMut<MovementTuning>,
) {
    match load_movement_tuning(&path.0) {
        Ok(loaded) => {
            info!(
                "Loaded movement profile {}: variant={:?}, max_speed={}, jump_force={}, extra_jumps={}",
                path.0.display(),
                loaded.variant,
                loaded.max_move_speed,
                loaded.jump_force,
                loaded.initial_extra_jumps
            );
            *tuning = loaded;
        }
        Err(e) => {
            if let Some(validation) = &e.validation {
                for error in &validation.errors {
                    error!("Movement profile {}: {}", e.file, error);
                }
            } else {
                error!("{}", e);
            }
            warn!("Using default movement tuning");
        }
    }
}
