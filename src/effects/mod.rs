//! Effects domain: squash-and-stretch feedback for jumps.
//!
//! Purely visual. The tween scales a child sprite, never the physics body, so
//! colliders and gameplay state are untouched.


use bevy::ecs::message::{Message, MessageReader};
use bevy::prelude::*;

/// Message fired when a jump asks for squash-and-stretch.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct JumpSquashed {
    /// The body that jumped.
    pub entity: Entity,
    /// Peak scale of the visual.
    pub scale: Vec2,
    pub duration: f32,
}

impl Message for JumpSquashed {}

/// Marks the sprite child that squashes when its parent jumps.
#[derive(Component, Debug, Default)]
pub struct SquashVisual;

/// Playback of one squash-and-stretch.
#[derive(Component, Debug, Clone, PartialEq)]
pub struct SquashTween {
    pub peak: Vec2,
    pub duration: f32,
    pub elapsed: f32,
}

impl SquashTween {
    pub fn new(peak: Vec2, duration: f32) -> Self {
        Self {
            peak,
            duration,
            elapsed: 0.0,
        }
    }

    pub fn finished(&self) -> bool {
        self.elapsed >= self.duration
    }

    /// Scale at the current time: out to the peak over the first half, back
    /// to identity over the second.
    pub fn current_scale(&self) -> Vec2 {
        squash_scale(self.peak, self.duration, self.elapsed)
    }
}

/// Scale of a squash with the given peak after `elapsed` seconds.
pub fn squash_scale(peak: Vec2, duration: f32, elapsed: f32) -> Vec2 {
    if duration <= 0.0 || elapsed >= duration {
        return Vec2::ONE;
    }
    let half = duration / 2.0;
    if elapsed < half {
        Vec2::ONE.lerp(peak, elapsed / half)
    } else {
        peak.lerp(Vec2::ONE, (elapsed - half) / half)
    }
}

pub struct EffectsPlugin;

impl Plugin for EffectsPlugin {
    fn build(&self, app: &mut App) {
        app.add_message::<JumpSquashed>()
            .add_systems(Update, (start_squash, animate_squash).chain());
    }
}

/// Attach a fresh tween to the visuals of every body that jumped.
/// A body without a `SquashVisual` child is ignored.
pub(crate) fn start_squash(
    mut commands: Commands,
    mut squashes: MessageReader<JumpSquashed>,
    children: Query<&Children>,
    visuals: Query<(), With<SquashVisual>>,
) {
    for squash in squashes.read() {
        let Ok(kids) = children.get(squash.entity) else {
            continue;
        };
        for &child in &**kids {
            if visuals.contains(child) {
                commands
                    .entity(child)
                    .insert(SquashTween::new(squash.scale, squash.duration));
            }
        }
    }
}

pub(crate) fn animate_squash(
    mut commands: Commands,
    time: Res<Time>,
    mut tweens: Query<(Entity, &mut SquashTween, &mut Transform)>,
) {
    let dt = time.delta_secs();
    for (entity, mut tween, mut transform) in &mut tweens {
        tween.elapsed += dt;
        let scale = tween.current_scale();
        transform.scale = scale.extend(1.0);
        if tween.finished() {
            commands.entity(entity).remove::<SquashTween>();
        }
    }
}
