use bevy::{
    log::trace,
    math::{Quat, Vec3},
    transform::components::Transform,
};

use crate::{
    config::FootIkConfig,
    debug::{DeferredGizmos, NORMAL_COLOR, PROBE_COLOR},
    foot::{Foot, FootTarget},
    ground_probe::GroundProbe,
    pose_provider::SkeletalPose,
};

/// Probe origin for a foot: the bone's horizontal position, lifted to a fixed height
/// above the character root.
///
/// Using the root height rather than the animated foot height keeps the probe above
/// the ground even when the animation has already sunk the foot into it.
pub fn sky_position(
    pose: &impl SkeletalPose,
    foot: Foot,
    reference: &Transform,
    config: &FootIkConfig,
) -> Vec3 {
    pose.foot_bone_world_position(foot)
        .with_y(reference.translation.y + config.height_from_ground_raycast)
}

/// Computes where a foot should go, given its probe origin.
///
/// `yaw_offset` is in degrees about world up, and is applied after aligning the
/// character's facing with the ground normal.
pub fn solve_foot(
    sky_position: Vec3,
    probe: &impl GroundProbe,
    config: &FootIkConfig,
    reference_rotation: Quat,
    yaw_offset: f32,
    mut gizmos: Option<&mut DeferredGizmos>,
) -> FootTarget {
    let probe_distance = config.probe_distance();

    if let Some(gizmos) = gizmos.as_deref_mut() {
        gizmos.line(
            sky_position,
            sky_position + Vec3::NEG_Y * probe_distance,
            PROBE_COLOR,
        );
    }

    let Some(hit) = probe.cast_down(sky_position, probe_distance, config.ground_layers) else {
        trace!("No ground below {sky_position}");
        return FootTarget::Ungrounded;
    };

    if let Some(gizmos) = gizmos {
        gizmos.ray(hit.point, hit.normal, NORMAL_COLOR);
    }

    let position = sky_position.with_y(hit.point.y + config.pelvis_offset);

    let normal = hit.normal.normalize_or(Vec3::Y);
    let ground_aligned = Quat::from_rotation_arc(Vec3::Y, normal) * reference_rotation;
    let rotation = Quat::from_axis_angle(Vec3::Y, yaw_offset.to_radians()) * ground_aligned;

    FootTarget::Grounded { position, rotation }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::{
        debug::DeferredGizmoCommand,
        ground_probe::{GroundLayers, GroundPlane},
        test_utils::TestPose,
    };
    use std::f32::consts::FRAC_PI_2;

    #[test]
    fn sky_position_uses_root_height() {
        let mut pose = TestPose::default();
        pose.reference.translation = Vec3::new(0., 2., 0.);
        pose.bones.left = Vec3::new(0.2, 1.75, 0.4);

        let config = FootIkConfig::default();
        let sky = sky_position(&pose, Foot::Left, &pose.reference, &config);

        assert_eq!(sky, Vec3::new(0.2, 3.2, 0.4));
    }

    #[test]
    fn flat_ground_target() {
        let config = FootIkConfig {
            pelvis_offset: 0.05,
            ..Default::default()
        };
        let sky = Vec3::new(0.1, 1.2, 0.3);

        let target = solve_foot(sky, &GroundPlane::flat(0.), &config, Quat::IDENTITY, 0., None);

        let FootTarget::Grounded { position, rotation } = target else {
            panic!("expected ground under the foot");
        };
        assert_eq!(position, Vec3::new(0.1, 0.05, 0.3));
        assert!(rotation.angle_between(Quat::IDENTITY) < 1e-5);
    }

    #[test]
    fn ground_below_probe_range_is_ungrounded() {
        let config = FootIkConfig::default();
        let sky = Vec3::new(0., 1.2, 0.);

        let target = solve_foot(sky, &GroundPlane::flat(-3.), &config, Quat::IDENTITY, 0., None);

        assert_eq!(target, FootTarget::Ungrounded);
    }

    #[test]
    fn ground_on_other_layer_is_ungrounded() {
        let config = FootIkConfig {
            ground_layers: GroundLayers(0b01),
            ..Default::default()
        };
        let plane = GroundPlane::flat(0.).with_layers(GroundLayers(0b10));

        let target = solve_foot(Vec3::Y, &plane, &config, Quat::IDENTITY, 0., None);

        assert_eq!(target, FootTarget::Ungrounded);
    }

    #[test]
    fn rotation_follows_ground_normal_and_facing() {
        let config = FootIkConfig::default();
        let plane = GroundPlane {
            height: 0.,
            normal: Vec3::new(-1., 1., 0.),
            layers: GroundLayers::ALL,
        };
        let facing = Quat::from_rotation_y(FRAC_PI_2);

        let FootTarget::Grounded { rotation, .. } =
            solve_foot(Vec3::Y, &plane, &config, facing, 0., None)
        else {
            panic!("expected ground under the foot");
        };

        let up = rotation * Vec3::Y;
        assert!(up.distance(Vec3::new(-1., 1., 0.).normalize()) < 1e-5);
    }

    #[test]
    fn yaw_offset_rotates_about_world_up() {
        let config = FootIkConfig::default();

        let FootTarget::Grounded { rotation, .. } = solve_foot(
            Vec3::Y,
            &GroundPlane::flat(0.),
            &config,
            Quat::IDENTITY,
            90.,
            None,
        ) else {
            panic!("expected ground under the foot");
        };

        let forward = rotation * Vec3::Z;
        assert!(forward.distance(Vec3::X) < 1e-5);
    }

    #[test]
    fn debug_gizmos_are_queued() {
        let config = FootIkConfig::default();
        let mut gizmos = DeferredGizmos::default();
        let sky = Vec3::new(0., 1.2, 0.);

        solve_foot(
            sky,
            &GroundPlane::flat(0.),
            &config,
            Quat::IDENTITY,
            0.,
            Some(&mut gizmos),
        );

        assert_eq!(
            gizmos.commands(),
            &[
                DeferredGizmoCommand::Line(sky, Vec3::new(0., -1.5, 0.), PROBE_COLOR),
                DeferredGizmoCommand::Ray(Vec3::ZERO, Vec3::Y, NORMAL_COLOR),
            ]
        );
    }
}
