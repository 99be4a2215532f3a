//! Movement domain: fixed-step systems driving the controllers.

use avian2d::prelude::*;
use bevy::ecs::message::MessageWriter;
use bevy::ecs::query::QueryData;
use bevy::prelude::*;

use super::collisions::AvianGroundSensor;
use crate::effects::JumpSquashed;
use crate::movement::{
    AnimationEffect, BodyConstraints, BodySnapshot, MovementController, RigidBody2D,
};

/// Avian components the controller reads and writes.
#[derive(QueryData)]
#[query_data(mutable)]
pub(crate) struct AvianBodyData {
    entity: Entity,
    controller: &'static mut MovementController,
    position: &'static Position,
    velocity: &'static mut LinearVelocity,
    force: &'static mut ConstantForce,
    damping: &'static mut LinearDamping,
    gravity_scale: &'static mut GravityScale,
    locked: &'static mut LockedAxes,
    mass: &'static ComputedMass,
}

/// Avian component values copied out for one tick and written back after.
#[derive(Debug, Clone, Copy)]
pub(crate) struct AvianBody {
    pub position: Vec2,
    pub velocity: Vec2,
    /// Controller force for the coming physics step. Starts at zero each tick
    /// because `ConstantForce` persists between steps.
    pub force: Vec2,
    pub damping: f32,
    pub gravity_scale: f32,
    pub locked: LockedAxes,
    pub inverse_mass: f32,
}

impl AvianBody {
    pub(crate) fn read(
        position: &Position,
        velocity: &LinearVelocity,
        damping: &LinearDamping,
        gravity_scale: &GravityScale,
        locked: &LockedAxes,
        mass: &ComputedMass,
    ) -> Self {
        Self {
            position: position.0,
            velocity: velocity.0,
            force: Vec2::ZERO,
            damping: damping.0,
            gravity_scale: gravity_scale.0,
            locked: *locked,
            inverse_mass: Self::inverse_mass_of(mass),
        }
    }

    /// Copy the tick's result back. The force replaces last tick's.
    pub(crate) fn write(
        &self,
        velocity: &mut LinearVelocity,
        force: &mut ConstantForce,
        damping: &mut LinearDamping,
        gravity_scale: &mut GravityScale,
        locked: &mut LockedAxes,
    ) {
        velocity.0 = self.velocity;
        force.0 = self.force;
        damping.0 = self.damping;
        gravity_scale.0 = self.gravity_scale;
        *locked = self.locked;
    }

    pub(crate) fn inverse_mass_of(mass: &ComputedMass) -> f32 {
        let mass = mass.value();
        if mass > 0.0 && mass.is_finite() {
            1.0 / mass
        } else {
            0.0
        }
    }
}

impl RigidBody2D for AvianBody {
    fn position(&self) -> Vec2 {
        self.position
    }

    fn velocity(&self) -> Vec2 {
        self.velocity
    }

    fn set_velocity(&mut self, velocity: Vec2) {
        self.velocity = velocity;
    }

    fn inverse_mass(&self) -> f32 {
        self.inverse_mass
    }

    fn apply_force(&mut self, force: Vec2) {
        self.force += force;
    }

    fn apply_impulse(&mut self, impulse: Vec2) {
        // Impulse = mass * delta_v
        self.velocity += impulse * self.inverse_mass;
    }

    fn drag(&self) -> f32 {
        self.damping
    }

    fn set_drag(&mut self, drag: f32) {
        self.damping = drag;
    }

    fn gravity_scale(&self) -> f32 {
        self.gravity_scale
    }

    fn set_gravity_scale(&mut self, scale: f32) {
        self.gravity_scale = scale;
    }

    fn constraints(&self) -> BodyConstraints {
        BodyConstraints {
            freeze_rotation: self.locked.is_rotation_locked(),
            freeze_position_x: self.locked.is_translation_x_locked(),
        }
    }

    fn set_constraints(&mut self, constraints: BodyConstraints) {
        let mut locked = LockedAxes::new();
        if constraints.freeze_rotation {
            locked = locked.lock_rotation();
        }
        if constraints.freeze_position_x {
            locked = locked.lock_translation_x();
        }
        self.locked = locked;
    }
}

/// Collects squash requests for one entity until the tick is done.
struct SquashRequests {
    entity: Entity,
    pending: Vec<JumpSquashed>,
}

impl AnimationEffect for SquashRequests {
    fn squash_and_stretch(&mut self, scale_x: f32, scale_y: f32, duration: f32) {
        self.pending.push(JumpSquashed {
            entity: self.entity,
            scale: Vec2::new(scale_x, scale_y),
            duration,
        });
    }
}

pub(crate) fn advance_movement_timers(
    time: Res<Time>,
    spatial_query: SpatialQuery,
    mut query: Query<(&mut MovementController, &Position)>,
) {
    let dt = time.delta_secs();
    let sensor = AvianGroundSensor::new(&spatial_query);

    for (mut controller, position) in &mut query {
        controller.advance_timers(dt, position.0, &sensor);
    }
}

pub(crate) fn step_movement_controllers(
    time: Res<Time>,
    spatial_query: SpatialQuery,
    mut squashes: MessageWriter<JumpSquashed>,
    mut query: Query<AvianBodyData>,
) {
    let dt = time.delta_secs();
    let sensor = AvianGroundSensor::new(&spatial_query);

    for mut item in &mut query {
        let mut body = AvianBody::read(
            item.position,
            &item.velocity,
            &item.damping,
            &item.gravity_scale,
            &item.locked,
            item.mass,
        );

        let outcome = match item
            .controller
            .step(dt, BodySnapshot::capture(&body), &sensor)
        {
            Ok(outcome) => outcome,
            Err(e) => {
                warn!("Skipping movement tick for {:?}: {}", item.entity, e);
                continue;
            }
        };

        let mut effects = SquashRequests {
            entity: item.entity,
            pending: Vec::new(),
        };
        outcome.apply(&mut body, &mut effects);

        body.write(
            &mut item.velocity,
            &mut item.force,
            &mut item.damping,
            &mut item.gravity_scale,
            &mut item.locked,
        );

        for squash in effects.pending {
            squashes.write(squash);
        }
    }
}
