//! Movement domain: ground queries backed by avian2d.

use avian2d::prelude::*;
use bevy::prelude::*;

use crate::movement::{CollisionQuery, RayHit};

/// `CollisionQuery` over avian's spatial query pipeline.
pub(crate) struct AvianGroundSensor<'a, 'w, 's> {
    spatial_query: &'a SpatialQuery<'w, 's>,
}

impl<'a, 'w, 's> AvianGroundSensor<'a, 'w, 's> {
    pub(crate) fn new(spatial_query: &'a SpatialQuery<'w, 's>) -> Self {
        Self { spatial_query }
    }
}

impl CollisionQuery for AvianGroundSensor<'_, '_, '_> {
    fn overlap_box(&self, center: Vec2, size: Vec2, layer_mask: u32) -> bool {
        let filter = SpatialQueryFilter::from_mask(LayerMask(layer_mask));
        let shape = Collider::rectangle(size.x, size.y);
        !self
            .spatial_query
            .shape_intersections(&shape, center, 0.0, &filter)
            .is_empty()
    }

    fn raycast(
        &self,
        origin: Vec2,
        direction: Vec2,
        max_distance: f32,
        layer_mask: u32,
    ) -> Option<RayHit> {
        let filter = SpatialQueryFilter::from_mask(LayerMask(layer_mask));
        let direction = Dir2::new(direction).ok()?;
        self.spatial_query
            .cast_ray(origin, direction, max_distance, true, &filter)
            .map(|hit| RayHit {
                distance: hit.distance,
                normal: hit.normal,
            })
    }
}
