//! Movement domain: the test room and player used by the demo binary.

use avian2d::prelude::*;
use bevy::prelude::*;

use crate::effects::SquashVisual;
use crate::movement::{GameLayer, Ground, MovementController, MovementTuning, Player};

/// Gravity of the demo world, in units per second squared.
pub const DEMO_GRAVITY: f32 = 9.81;

/// Player collider size. The default foot offset sits on its bottom edge.
pub const PLAYER_SIZE: Vec2 = Vec2::new(0.9, 1.0);

pub fn spawn_test_room(mut commands: Commands) {
    let ground_color = Color::srgb(0.4, 0.5, 0.4);
    let platform_color = Color::srgb(0.5, 0.4, 0.3);

    let ground_layers = CollisionLayers::new(GameLayer::Ground, [GameLayer::Player]);

    let mut spawn_ground = |size: Vec2, transform: Transform, color: Color| {
        commands.spawn((
            Ground,
            Sprite {
                color,
                custom_size: Some(size),
                ..default()
            },
            transform,
            RigidBody::Static,
            Collider::rectangle(size.x, size.y),
            ground_layers,
        ));
    };

    // Floor
    spawn_ground(
        Vec2::new(40.0, 1.0),
        Transform::from_xyz(0.0, -5.0, 0.0),
        ground_color,
    );

    // Low platform, reachable with a single jump
    spawn_ground(
        Vec2::new(4.0, 0.5),
        Transform::from_xyz(-8.0, -1.0, 0.0),
        platform_color,
    );

    // High platform, needs the extra jump
    spawn_ground(
        Vec2::new(4.0, 0.5),
        Transform::from_xyz(0.0, 3.5, 0.0),
        platform_color,
    );

    // Ledge for coyote jumps
    spawn_ground(
        Vec2::new(3.0, 0.5),
        Transform::from_xyz(8.0, 0.0, 0.0),
        platform_color,
    );

    // Slope: never counts as flat ground, so no velocity snap here
    spawn_ground(
        Vec2::new(6.0, 0.5),
        Transform::from_xyz(14.0, -3.2, 0.0).with_rotation(Quat::from_rotation_z(0.45)),
        ground_color,
    );
}

pub fn spawn_player(mut commands: Commands, tuning: Res<MovementTuning>) {
    let controller = match MovementController::new(tuning.clone()) {
        Ok(controller) => controller,
        Err(e) => {
            error!("Cannot spawn player: {}", e);
            return;
        }
    };

    info!(
        "Spawning player: single jump apex {:.2}, extra jumps {}",
        tuning.single_jump_height(DEMO_GRAVITY),
        tuning.initial_extra_jumps
    );

    commands
        .spawn((
            Player,
            controller,
            Transform::from_xyz(0.0, -3.0, 0.0),
            Visibility::default(),
            // Physics
            (
                RigidBody::Dynamic,
                Collider::rectangle(PLAYER_SIZE.x, PLAYER_SIZE.y),
                Mass(1.0),
                NoAutoMass,
                LockedAxes::ROTATION_LOCKED,
                LinearVelocity::default(),
                ConstantForce::default(),
                LinearDamping::default(),
                GravityScale(tuning.base_gravity_scale),
                Friction::new(0.0),
                CollisionLayers::new(GameLayer::Player, [GameLayer::Ground]),
            ),
        ))
        .with_children(|parent| {
            parent.spawn((
                SquashVisual,
                Sprite {
                    color: Color::srgb(0.9, 0.9, 0.9),
                    custom_size: Some(PLAYER_SIZE),
                    ..default()
                },
                Transform::default(),
            ));
        });
}

pub fn spawn_camera(mut commands: Commands) {
    commands.spawn((
        Camera2d,
        Projection::Orthographic(OrthographicProjection {
            scale: 1.0 / 32.0,
            ..OrthographicProjection::default_2d()
        }),
        Transform::from_xyz(3.0, 0.0, 0.0),
    ));
}
