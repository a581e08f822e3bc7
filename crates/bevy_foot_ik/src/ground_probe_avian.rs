use avian3d::prelude::{LayerMask, SpatialQuery, SpatialQueryFilter};
use bevy::{
    ecs::entity::Entity,
    math::{Dir3, Vec3},
};
use bevy_foot_ik_core::ground_probe::{GroundHit, GroundLayers, GroundProbe};

/// Ground probe backed by Avian's spatial query pipeline.
pub struct AvianGroundProbe<'a, 'w, 's> {
    spatial_query: &'a SpatialQuery<'w, 's>,
    excluded: Option<Entity>,
}

impl<'a, 'w, 's> AvianGroundProbe<'a, 'w, 's> {
    pub fn new(spatial_query: &'a SpatialQuery<'w, 's>) -> Self {
        Self {
            spatial_query,
            excluded: None,
        }
    }

    /// Ignores the character's own collider.
    pub fn excluding(mut self, entity: Entity) -> Self {
        self.excluded = Some(entity);
        self
    }
}

/// Query filter that only hits `layers`, ignoring `excluded`.
pub fn ground_filter(layers: GroundLayers, excluded: Option<Entity>) -> SpatialQueryFilter {
    let filter = SpatialQueryFilter::from_mask(LayerMask(layers.bits()));
    match excluded {
        Some(entity) => filter.with_excluded_entities([entity]),
        None => filter,
    }
}

impl GroundProbe for AvianGroundProbe<'_, '_, '_> {
    fn cast_down(
        &self,
        origin: Vec3,
        max_distance: f32,
        layers: GroundLayers,
    ) -> Option<GroundHit> {
        let filter = ground_filter(layers, self.excluded);
        let hit = self
            .spatial_query
            .cast_ray(origin, Dir3::NEG_Y, max_distance, true, &filter)?;

        Some(GroundHit {
            point: origin + Vec3::NEG_Y * hit.distance,
            normal: hit.normal,
        })
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use bevy::ecs::world::World;

    #[test]
    fn filter_uses_ground_layers() {
        let filter = ground_filter(GroundLayers(0b101), None);

        assert_eq!(filter.mask, LayerMask(0b101));
        assert!(filter.excluded_entities.is_empty());
    }

    #[test]
    fn filter_excludes_character() {
        let mut world = World::new();
        let character = world.spawn_empty().id();
        let other = world.spawn_empty().id();

        let filter = ground_filter(GroundLayers::ALL, Some(character));

        assert_eq!(filter.mask, LayerMask::ALL);
        assert!(filter.excluded_entities.contains(&character));
        assert!(!filter.excluded_entities.contains(&other));
    }
}
