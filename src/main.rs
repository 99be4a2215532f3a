use avian2d::prelude::*;
use bevy::prelude::*;

use tight_platformer::PlatformerPlugins;
use tight_platformer::movement::dev::{DEMO_GRAVITY, spawn_camera, spawn_player, spawn_test_room};

fn main() {
    App::new()
        .add_plugins(DefaultPlugins.set(WindowPlugin {
            primary_window: Some(Window {
                title: "Tight Platformer".to_string(),
                resolution: (1280, 720).into(),
                resizable: true,
                ..default()
            }),
            ..default()
        }))
        .add_plugins(PhysicsPlugins::default())
        .insert_resource(Gravity(Vec2::NEG_Y * DEMO_GRAVITY))
        .insert_resource(Time::<Fixed>::from_hz(50.0))
        .add_plugins(PlatformerPlugins)
        .add_systems(Startup, (spawn_camera, spawn_test_room, spawn_player))
        .run();
}
