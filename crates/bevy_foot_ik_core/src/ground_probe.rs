use bevy::{
    math::Vec3,
    reflect::{Reflect, std_traits::ReflectDefault},
};
use serde::{Deserialize, Serialize};

/// Bitmask selecting which collision layers count as ground.
#[derive(Reflect, Clone, Copy, Debug, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[reflect(Default)]
pub struct GroundLayers(pub u32);

impl GroundLayers {
    pub const ALL: Self = Self(u32::MAX);
    pub const NONE: Self = Self(0);

    pub fn bits(&self) -> u32 {
        self.0
    }

    pub fn intersects(&self, other: GroundLayers) -> bool {
        self.0 & other.0 != 0
    }
}

impl Default for GroundLayers {
    fn default() -> Self {
        Self::ALL
    }
}

#[derive(Reflect, Clone, Copy, Debug, PartialEq)]
pub struct GroundHit {
    pub point: Vec3,
    pub normal: Vec3,
}

/// Finds the nearest ground surface straight below a point.
pub trait GroundProbe {
    /// Casts a ray from `origin` along world down, at most `max_distance` long, only
    /// hitting surfaces in `layers`.
    fn cast_down(
        &self,
        origin: Vec3,
        max_distance: f32,
        layers: GroundLayers,
    ) -> Option<GroundHit>;
}

impl<F> GroundProbe for F
where
    F: Fn(Vec3, f32, GroundLayers) -> Option<GroundHit>,
{
    fn cast_down(
        &self,
        origin: Vec3,
        max_distance: f32,
        layers: GroundLayers,
    ) -> Option<GroundHit> {
        self(origin, max_distance, layers)
    }
}

/// An infinite plane through `(0, height, 0)`.
#[derive(Reflect, Clone, Copy, Debug, PartialEq)]
pub struct GroundPlane {
    pub height: f32,
    /// Must not be horizontal.
    pub normal: Vec3,
    pub layers: GroundLayers,
}

impl GroundPlane {
    pub fn flat(height: f32) -> Self {
        Self {
            height,
            normal: Vec3::Y,
            layers: GroundLayers::ALL,
        }
    }

    pub fn with_layers(mut self, layers: GroundLayers) -> Self {
        self.layers = layers;
        self
    }
}

impl GroundProbe for GroundPlane {
    fn cast_down(
        &self,
        origin: Vec3,
        max_distance: f32,
        layers: GroundLayers,
    ) -> Option<GroundHit> {
        if !self.layers.intersects(layers) {
            return None;
        }

        let normal = self.normal.normalize_or(Vec3::Y);
        if normal.y <= f32::EPSILON {
            return None;
        }

        // Distance along -Y from the origin to the plane
        let distance = normal.dot(origin - Vec3::Y * self.height) / normal.y;
        if !(0.0..=max_distance).contains(&distance) {
            return None;
        }

        Some(GroundHit {
            point: origin - Vec3::Y * distance,
            normal,
        })
    }
}
