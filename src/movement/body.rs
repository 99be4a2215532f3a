//! Staged rigid-body access for one fixed tick.
//!
//! The pipeline writes into a `BodyFrame` instead of the live body. The frame
//! is applied to the real body in one go once the whole tick has succeeded.

use bevy::prelude::*;

use super::collaborators::{BodyConstraints, RigidBody2D};

/// Values read from a body at the start of a tick.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct BodySnapshot {
    pub position: Vec2,
    pub velocity: Vec2,
    pub inverse_mass: f32,
    pub drag: f32,
    pub gravity_scale: f32,
    pub constraints: BodyConstraints,
}

impl BodySnapshot {
    pub fn capture(body: &impl RigidBody2D) -> Self {
        Self {
            position: body.position(),
            velocity: body.velocity(),
            inverse_mass: body.inverse_mass(),
            drag: body.drag(),
            gravity_scale: body.gravity_scale(),
            constraints: body.constraints(),
        }
    }

    pub fn is_finite(&self) -> bool {
        self.position.is_finite()
            && self.velocity.is_finite()
            && self.inverse_mass.is_finite()
            && self.drag.is_finite()
            && self.gravity_scale.is_finite()
    }
}

/// Pending writes to a body.
///
/// Reads return the staged value. Forces are accumulated for the integrator.
/// Impulses are recorded and also folded into the staged velocity, so later
/// stages of the tick see the launch speed.
#[derive(Debug, Clone, PartialEq)]
pub struct BodyFrame {
    snapshot: BodySnapshot,
    velocity: Vec2,
    drag: f32,
    gravity_scale: f32,
    constraints: BodyConstraints,
    force: Vec2,
    impulse: Vec2,
    velocity_written: bool,
}

impl BodyFrame {
    pub fn new(snapshot: BodySnapshot) -> Self {
        Self {
            snapshot,
            velocity: snapshot.velocity,
            drag: snapshot.drag,
            gravity_scale: snapshot.gravity_scale,
            constraints: snapshot.constraints,
            force: Vec2::ZERO,
            impulse: Vec2::ZERO,
            velocity_written: false,
        }
    }

    pub fn snapshot(&self) -> &BodySnapshot {
        &self.snapshot
    }

    /// Total force requested this tick.
    pub fn force(&self) -> Vec2 {
        self.force
    }

    /// Total impulse requested this tick. Already part of `velocity()`.
    pub fn impulse(&self) -> Vec2 {
        self.impulse
    }

    /// Write every staged change to `body`.
    pub fn apply_to(&self, body: &mut impl RigidBody2D) {
        if self.velocity_written {
            body.set_velocity(self.velocity);
        }
        body.set_drag(self.drag);
        body.set_gravity_scale(self.gravity_scale);
        body.set_constraints(self.constraints);
        body.apply_force(self.force);
    }
}

impl RigidBody2D for BodyFrame {
    fn position(&self) -> Vec2 {
        self.snapshot.position
    }

    fn velocity(&self) -> Vec2 {
        self.velocity
    }

    fn set_velocity(&mut self, velocity: Vec2) {
        self.velocity = velocity;
        self.velocity_written = true;
    }

    fn inverse_mass(&self) -> f32 {
        self.snapshot.inverse_mass
    }

    fn apply_force(&mut self, force: Vec2) {
        self.force += force;
    }

    fn apply_impulse(&mut self, impulse: Vec2) {
        self.impulse += impulse;
        self.velocity += impulse * self.snapshot.inverse_mass;
        self.velocity_written = true;
    }

    fn drag(&self) -> f32 {
        self.drag
    }

    fn set_drag(&mut self, drag: f32) {
        self.drag = drag;
    }

    fn gravity_scale(&self) -> f32 {
        self.gravity_scale
    }

    fn set_gravity_scale(&mut self, scale: f32) {
        self.gravity_scale = scale;
    }

    fn constraints(&self) -> BodyConstraints {
        self.constraints
    }

    fn set_constraints(&mut self, constraints: BodyConstraints) {
        self.constraints = constraints;
    }
}
