use bevy::{math::FloatExt, transform::components::Transform};

use crate::{
    config::FootIkConfig,
    foot::{Foot, FootState, FootTarget},
    pose_provider::{SkeletalPose, SkeletalPoseMut},
};

/// Writes one foot's IK goal and blend weights into the pose.
///
/// The vertical correction is smoothed in the space of `reference` rather than in
/// world space, so the character's own movement and turning does not leak into the
/// filter.
pub fn apply_foot(
    foot: Foot,
    state: &mut FootState,
    pose: &mut impl SkeletalPoseMut,
    config: &FootIkConfig,
    reference: &Transform,
) {
    let weight = pose.curve_value(config.curves.position_weight(foot));
    pose.set_ik_position_weight(foot, weight);
    if config.rotation_ik {
        pose.set_ik_rotation_weight(foot, weight);
    }

    let animated_goal = pose.ik_goal_position(foot);

    let FootTarget::Grounded { position, rotation } = state.target else {
        pose.set_ik_goal_position(foot, animated_goal);
        return;
    };

    let world_to_local = reference.compute_affine().inverse();
    let mut goal_local = world_to_local.transform_point3(animated_goal);
    let target_local = world_to_local.transform_point3(position);

    let y = state
        .last_applied_y
        .lerp(target_local.y, config.foot_smoothing);
    goal_local.y += y;
    state.last_applied_y = y;

    pose.set_ik_goal_rotation(foot, rotation);
    pose.set_ik_goal_position(foot, reference.transform_point(goal_local));
}
