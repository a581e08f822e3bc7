use bevy::{
    math::{Quat, Vec3},
    reflect::{Reflect, std_traits::ReflectDefault},
};
use serde::{Deserialize, Serialize};
use std::ops::{Index, IndexMut};

#[derive(Reflect, Clone, Copy, Debug, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum Foot {
    Left,
    Right,
}

impl Foot {
    /// Order in which the evaluation stage visits the feet.
    pub const EVALUATION_ORDER: [Foot; 2] = [Foot::Right, Foot::Left];
}

/// Where a foot should be placed this frame.
#[derive(Reflect, Clone, Copy, Debug, Default, PartialEq)]
#[reflect(Default)]
pub enum FootTarget {
    /// Ground was found under the foot.
    Grounded { position: Vec3, rotation: Quat },
    /// No ground within probe range: leave the animated pose alone.
    #[default]
    Ungrounded,
}

impl FootTarget {
    pub fn is_grounded(&self) -> bool {
        matches!(self, FootTarget::Grounded { .. })
    }

    pub fn position(&self) -> Option<Vec3> {
        match self {
            FootTarget::Grounded { position, .. } => Some(*position),
            FootTarget::Ungrounded => None,
        }
    }
}

#[derive(Reflect, Clone, Debug, Default, PartialEq)]
#[reflect(Default)]
pub struct FootState {
    /// Origin of the last ground probe.
    pub sky_position: Vec3,
    pub target: FootTarget,
    /// Last smoothed vertical offset, in character space.
    pub last_applied_y: f32,
}

/// One value per foot.
#[derive(Reflect, Clone, Debug, Default, PartialEq)]
pub struct Feet<T> {
    pub left: T,
    pub right: T,
}

impl<T> Index<Foot> for Feet<T> {
    type Output = T;

    fn index(&self, foot: Foot) -> &T {
        match foot {
            Foot::Left => &self.left,
            Foot::Right => &self.right,
        }
    }
}

impl<T> IndexMut<Foot> for Feet<T> {
    fn index_mut(&mut self, foot: Foot) -> &mut T {
        match foot {
            Foot::Left => &mut self.left,
            Foot::Right => &mut self.right,
        }
    }
}
