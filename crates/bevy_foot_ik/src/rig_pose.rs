use bevy::{
    ecs::{entity::Entity, hierarchy::ChildOf, system::Query},
    math::{Quat, Vec3},
    transform::components::{GlobalTransform, Transform},
};
use bevy_foot_ik_core::{
    foot::Foot,
    pose_provider::{SkeletalPose, SkeletalPoseMut},
};

use crate::components::{FootIkCurves, FootIkGoals, FootIkRig, IkGoal};

pub type TransformQuery<'w, 's> = Query<'w, 's, (&'static Transform, Option<&'static ChildOf>)>;

/// Computes the global transform of an entity from the local transforms of its
/// ancestors.
///
/// Animation writes local transforms after the last transform propagation, so
/// [`GlobalTransform`] is one frame stale while the solver runs. Walking the
/// hierarchy is slower but reflects the pose being evaluated.
pub fn eager_global_transform(
    entity: Entity,
    lookup: impl Fn(Entity) -> Option<(Transform, Option<Entity>)>,
) -> Option<GlobalTransform> {
    let (local, mut parent) = lookup(entity)?;
    let mut global = GlobalTransform::from(local);

    while let Some(current) = parent {
        let Some((local, next)) = lookup(current) else {
            break;
        };
        global = GlobalTransform::from(local) * global;
        parent = next;
    }

    Some(global)
}

/// Read-only [`SkeletalPose`] over a character in the ECS.
#[derive(Clone, Copy)]
pub struct RigView<'a, 'w, 's> {
    root: Entity,
    rig: &'a FootIkRig,
    curves: &'a FootIkCurves,
    transforms: &'a TransformQuery<'w, 's>,
}

impl<'a, 'w, 's> RigView<'a, 'w, 's> {
    /// Returns `None` if the root or any rig bone has no [`Transform`].
    pub fn new(
        root: Entity,
        rig: &'a FootIkRig,
        curves: &'a FootIkCurves,
        transforms: &'a TransformQuery<'w, 's>,
    ) -> Option<Self> {
        let complete = [root, rig.left_foot, rig.right_foot, rig.hips]
            .into_iter()
            .all(|entity| transforms.contains(entity));
        if !complete {
            return None;
        }

        Some(Self {
            root,
            rig,
            curves,
            transforms,
        })
    }

    fn global_transform(&self, entity: Entity) -> GlobalTransform {
        eager_global_transform(entity, |entity| {
            self.transforms
                .get(entity)
                .ok()
                .map(|(transform, child_of)| (*transform, child_of.map(ChildOf::parent)))
        })
        .unwrap_or_default()
    }
}

impl SkeletalPose for RigView<'_, '_, '_> {
    fn reference_transform(&self) -> Transform {
        self.global_transform(self.root).compute_transform()
    }

    fn foot_bone_world_position(&self, foot: Foot) -> Vec3 {
        self.global_transform(self.rig.foot(foot)).translation()
    }

    fn curve_value(&self, curve: &str) -> f32 {
        self.curves.get(curve).unwrap_or_default()
    }

    fn ik_goal_position(&self, foot: Foot) -> Vec3 {
        self.foot_bone_world_position(foot)
    }

    fn body_position(&self) -> Vec3 {
        self.global_transform(self.rig.hips).translation()
    }
}

/// [`SkeletalPoseMut`] over a character in the ECS.
///
/// IK goals and the corrected body position are written to [`FootIkGoals`]; nothing
/// is written to the bones themselves.
pub struct RigPose<'a, 'w, 's> {
    view: RigView<'a, 'w, 's>,
    goals: &'a mut FootIkGoals,
}

impl<'a, 'w, 's> RigPose<'a, 'w, 's> {
    pub fn new(view: RigView<'a, 'w, 's>, goals: &'a mut FootIkGoals) -> Self {
        Self { view, goals }
    }

    /// Resets the goals to the animated pose with zero weights, and drops any
    /// pending body correction.
    pub fn begin_frame(&mut self) {
        for foot in Foot::EVALUATION_ORDER {
            let (_, rotation, position) = self
                .view
                .global_transform(self.view.rig.foot(foot))
                .to_scale_rotation_translation();
            self.goals.feet[foot] = IkGoal {
                position,
                rotation,
                ..Default::default()
            };
        }
        self.goals.body_position = None;
    }
}

impl SkeletalPose for RigPose<'_, '_, '_> {
    fn reference_transform(&self) -> Transform {
        self.view.reference_transform()
    }

    fn foot_bone_world_position(&self, foot: Foot) -> Vec3 {
        self.view.foot_bone_world_position(foot)
    }

    fn curve_value(&self, curve: &str) -> f32 {
        self.view.curve_value(curve)
    }

    fn ik_goal_position(&self, foot: Foot) -> Vec3 {
        self.view.ik_goal_position(foot)
    }

    fn body_position(&self) -> Vec3 {
        self.goals
            .body_position
            .unwrap_or_else(|| self.view.body_position())
    }
}

impl SkeletalPoseMut for RigPose<'_, '_, '_> {
    fn set_ik_goal_position(&mut self, foot: Foot, position: Vec3) {
        self.goals.feet[foot].position = position;
    }

    fn set_ik_goal_rotation(&mut self, foot: Foot, rotation: Quat) {
        self.goals.feet[foot].rotation = rotation;
    }

    fn set_ik_position_weight(&mut self, foot: Foot, weight: f32) {
        self.goals.feet[foot].position_weight = weight;
    }

    fn set_ik_rotation_weight(&mut self, foot: Foot, weight: f32) {
        self.goals.feet[foot].rotation_weight = weight;
    }

    fn set_body_position(&mut self, position: Vec3) {
        self.goals.body_position = Some(position);
    }
}
