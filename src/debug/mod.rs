//! Debug tooling for tuning movement feel (dev-tools feature).
//!
//! Features:
//! - Probe gizmos: ground probe and extra-jump min-height probe
//! - Info overlay with the controller state

use avian2d::prelude::*;
use bevy::prelude::*;

use crate::movement::{
    GroundPhase, MovementController, Player, ground_probe, min_height_probe,
};

// ============================================================================
// Debug State Resource
// ============================================================================

/// Resource tracking debug mode state
#[derive(Resource, Debug)]
pub struct DebugState {
    /// Whether probe boxes are drawn
    pub show_probes: bool,
    /// Whether to show the controller info overlay
    pub show_info: bool,
}

impl Default for DebugState {
    fn default() -> Self {
        Self {
            show_probes: true,
            show_info: false,
        }
    }
}

/// Marker for the debug info overlay
#[derive(Component, Debug)]
pub struct DebugInfoOverlay;

// ============================================================================
// Plugin
// ============================================================================

pub struct DebugPlugin;

impl Plugin for DebugPlugin {
    fn build(&self, app: &mut App) {
        app.init_resource::<DebugState>()
            .add_systems(Update, toggle_debug_views)
            .add_systems(
                Update,
                draw_movement_probes.run_if(|state: Res<DebugState>| state.show_probes),
            )
            .add_systems(Update, update_debug_info_overlay);
    }
}

// ============================================================================
// Systems
// ============================================================================

/// F1 toggles probe gizmos, F2 toggles the info overlay
fn toggle_debug_views(keyboard: Res<ButtonInput<KeyCode>>, mut debug_state: ResMut<DebugState>) {
    if keyboard.just_pressed(KeyCode::F1) {
        debug_state.show_probes = !debug_state.show_probes;
    }
    if keyboard.just_pressed(KeyCode::F2) {
        debug_state.show_info = !debug_state.show_info;
    }
}

/// Colour of the ground probe for a grounding phase
pub(crate) fn phase_color(phase: GroundPhase) -> Color {
    match phase {
        GroundPhase::CoyoteGrounded => Color::srgb(0.2, 0.9, 0.2),
        GroundPhase::Grounded => Color::srgb(0.9, 0.8, 0.2),
        GroundPhase::Airborne => Color::srgb(0.9, 0.2, 0.2),
    }
}

fn draw_movement_probes(mut gizmos: Gizmos, query: Query<(&MovementController, &Position)>) {
    for (controller, position) in &query {
        let feet = controller.feet(position.0);

        let min_height = min_height_probe(controller.tuning(), feet);
        gizmos.rect_2d(
            Isometry2d::from_translation(min_height.center),
            min_height.size,
            Color::srgb(0.1, 0.1, 0.1),
        );

        let ground = ground_probe(controller.tuning(), feet);
        gizmos.rect_2d(
            Isometry2d::from_translation(ground.center),
            ground.size,
            phase_color(controller.phase()),
        );
    }
}

/// One block of text describing a controller
pub(crate) fn describe_movement(
    controller: &MovementController,
    velocity: Vec2,
    gravity_scale: f32,
) -> String {
    format!(
        "Phase: {:?}\nVel: ({:.1}, {:.1})\nDir: {:.2}\nJump held: {}\nBuffered: {}\nExtra jumps: {}/{}\nGravity: {:.1}",
        controller.phase(),
        velocity.x,
        velocity.y,
        controller.horizontal_direction(),
        controller.jump_held(),
        controller.jump_buffered(),
        controller.remaining_extra_jumps(),
        controller.tuning().initial_extra_jumps,
        gravity_scale,
    )
}

/// Update the debug info overlay with current player state
fn update_debug_info_overlay(
    mut commands: Commands,
    debug_state: Res<DebugState>,
    player_query: Query<(&MovementController, &LinearVelocity, &GravityScale), With<Player>>,
    mut overlay_query: Query<&mut Text, With<DebugInfoOverlay>>,
    existing_overlay: Query<Entity, With<DebugInfoOverlay>>,
) {
    if !debug_state.show_info {
        // Cleanup overlay if it exists
        for entity in &existing_overlay {
            commands.entity(entity).despawn();
        }
        return;
    }

    // Ensure overlay exists
    if existing_overlay.is_empty() {
        spawn_debug_info_overlay(&mut commands);
        return;
    }

    if let (Some((controller, velocity, gravity_scale)), Ok(mut text)) =
        (player_query.iter().next(), overlay_query.single_mut())
    {
        **text = describe_movement(controller, velocity.0, gravity_scale.0);
    }
}

fn spawn_debug_info_overlay(commands: &mut Commands) {
    commands.spawn((
        DebugInfoOverlay,
        Text::new("Loading..."),
        TextFont {
            font_size: 12.0,
            ..default()
        },
        TextColor(Color::srgb(0.8, 0.9, 0.8)),
        Node {
            position_type: PositionType::Absolute,
            left: Val::Px(20.0),
            bottom: Val::Px(20.0),
            padding: UiRect::all(Val::Px(8.0)),
            ..default()
        },
        BackgroundColor(Color::srgba(0.0, 0.0, 0.0, 0.7)),
        ZIndex(500),
    ));
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::movement::MovementTuning;

    #[test]
    fn test_describe_movement_lists_extra_jumps() {
        let controller = MovementController::new(MovementTuning::default()).unwrap();
        let text = describe_movement(&controller, Vec2::new(3.0, -1.5), 8.0);
        assert!(text.contains("Phase: Airborne"));
        assert!(text.contains("Extra jumps: 1/1"));
        assert!(text.contains("Gravity: 8.0"));
    }

    #[test]
    fn test_phase_colors_are_distinct() {
        let colors = [
            phase_color(GroundPhase::Airborne),
            phase_color(GroundPhase::Grounded),
            phase_color(GroundPhase::CoyoteGrounded),
        ];
        assert_ne!(colors[0], colors[1]);
        assert_ne!(colors[1], colors[2]);
        assert_ne!(colors[0], colors[2]);
    }
}
