use bevy::{
    math::{Quat, Vec3},
    transform::components::Transform,
};

use crate::foot::Foot;

/// Read access to the animated pose of one character.
///
/// Getters must report the pose as produced by the animation for the current frame.
/// This is all the simulation stage needs.
pub trait SkeletalPose {
    /// World transform of the character root the solver measures heights against.
    fn reference_transform(&self) -> Transform;

    fn foot_bone_world_position(&self, foot: Foot) -> Vec3;

    /// Value of a scalar animation curve. Unknown curves read as `0.0`.
    fn curve_value(&self, curve: &str) -> f32;

    /// Currently animated world position of the foot's IK goal.
    fn ik_goal_position(&self, foot: Foot) -> Vec3;

    /// World position of the body (hips) bone.
    fn body_position(&self) -> Vec3;
}

/// Write access used by the evaluation stage.
///
/// Positions set through this trait are IK goals for a downstream leg solver, not
/// bone transforms.
pub trait SkeletalPoseMut: SkeletalPose {
    fn set_ik_goal_position(&mut self, foot: Foot, position: Vec3);

    fn set_ik_goal_rotation(&mut self, foot: Foot, rotation: Quat);

    fn set_ik_position_weight(&mut self, foot: Foot, weight: f32);

    fn set_ik_rotation_weight(&mut self, foot: Foot, weight: f32);

    fn set_body_position(&mut self, position: Vec3);
}
