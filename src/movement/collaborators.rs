//! Interfaces the controller consumes from the outside world.
//!
//! The controller never talks to a physics engine directly. The avian2d
//! adapter in `systems` implements these traits for real bodies, and tests
//! implement them over plain data.

use bevy::prelude::*;

/// Axis freezes requested for a rigid body.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub struct BodyConstraints {
    pub freeze_rotation: bool,
    pub freeze_position_x: bool,
}

impl BodyConstraints {
    pub const ROTATION_LOCKED: Self = Self {
        freeze_rotation: true,
        freeze_position_x: false,
    };

    pub const ROTATION_AND_X_LOCKED: Self = Self {
        freeze_rotation: true,
        freeze_position_x: true,
    };
}

/// The dynamic body being driven.
///
/// Forces accumulate until the integrator's next step. An impulse changes the
/// velocity at once by `impulse * inverse_mass`.
pub trait RigidBody2D {
    fn position(&self) -> Vec2;
    fn velocity(&self) -> Vec2;
    /// Zero for static or massless bodies, which impulses cannot move.
    fn inverse_mass(&self) -> f32;
    fn set_velocity(&mut self, velocity: Vec2);
    fn apply_force(&mut self, force: Vec2);
    fn apply_impulse(&mut self, impulse: Vec2);
    fn drag(&self) -> f32;
    fn set_drag(&mut self, drag: f32);
    fn gravity_scale(&self) -> f32;
    fn set_gravity_scale(&mut self, scale: f32);
    fn constraints(&self) -> BodyConstraints;
    fn set_constraints(&mut self, constraints: BodyConstraints);
}

/// Result of a ray query.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct RayHit {
    pub distance: f32,
    pub normal: Vec2,
}

/// Geometry queries against the collision world.
///
/// A query that cannot find anything answers `false` / `None`; there is no
/// error path.
pub trait CollisionQuery {
    /// Whether an axis-aligned box overlaps any collider on `layer_mask`.
    fn overlap_box(&self, center: Vec2, size: Vec2, layer_mask: u32) -> bool;

    /// First hit along a ray against colliders on `layer_mask`.
    fn raycast(
        &self,
        origin: Vec2,
        direction: Vec2,
        max_distance: f32,
        layer_mask: u32,
    ) -> Option<RayHit>;
}

/// Fire-and-forget cosmetic feedback.
pub trait AnimationEffect {
    fn squash_and_stretch(&mut self, scale_x: f32, scale_y: f32, duration: f32);
}

/// Discards every request.
impl AnimationEffect for () {
    fn squash_and_stretch(&mut self, _scale_x: f32, _scale_y: f32, _duration: f32) {}
}
