use bevy::{
    asset::Assets,
    ecs::{
        entity::Entity,
        hierarchy::ChildOf,
        resource::Resource,
        system::{Query, Res},
    },
    gizmos::gizmos::Gizmos,
    log::{debug, warn_once},
    transform::components::{GlobalTransform, Transform},
};
use bevy_foot_ik_core::{config::FootIkConfig, ground_probe::GroundProbe};

use crate::{
    components::{
        AppliedHipsCorrection, FootIk, FootIkConfigHandle, FootIkCurves, FootIkGoals,
        FootIkHipsCorrection, FootIkRig,
    },
    rig_pose::{RigPose, RigView, TransformQuery, eager_global_transform},
};

type SimulationQuery<'w, 's> = Query<
    'w,
    's,
    (
        Entity,
        &'static FootIkRig,
        &'static mut FootIk,
        &'static FootIkCurves,
    ),
>;

type EvaluationQuery<'w, 's> = Query<
    'w,
    's,
    (
        Entity,
        &'static FootIkRig,
        &'static mut FootIk,
        &'static mut FootIkGoals,
        &'static FootIkCurves,
    ),
>;

/// Probes the ground for every character using a probe stored as a resource.
pub fn probe_foot_ik<P: GroundProbe + Resource>(
    probe: Res<P>,
    mut characters: SimulationQuery,
    transforms: TransformQuery,
) {
    for (root, rig, mut foot_ik, curves) in &mut characters {
        let Some(view) = RigView::new(root, rig, curves, &transforms) else {
            warn_once!("Foot IK rig of {root} references entities without a Transform");
            continue;
        };
        foot_ik.solver.advance_simulation(&view, &*probe);
    }
}

/// Probes the ground for every character using Avian's spatial queries.
#[cfg(feature = "physics_avian")]
pub fn probe_foot_ik_avian(
    spatial_query: avian3d::prelude::SpatialQuery,
    mut characters: SimulationQuery,
    transforms: TransformQuery,
) {
    use crate::ground_probe_avian::AvianGroundProbe;

    for (root, rig, mut foot_ik, curves) in &mut characters {
        let Some(view) = RigView::new(root, rig, curves, &transforms) else {
            warn_once!("Foot IK rig of {root} references entities without a Transform");
            continue;
        };
        let probe = AvianGroundProbe::new(&spatial_query).excluding(root);
        foot_ik.solver.advance_simulation(&view, &probe);
    }
}

/// Puts back the animated hips translation replaced by last frame's correction.
///
/// If something else wrote the hips since then (usually the animation), that value
/// is kept.
pub fn restore_animated_hips(
    mut characters: Query<(&FootIkRig, &mut FootIkHipsCorrection)>,
    mut transforms: Query<&mut Transform>,
) {
    for (rig, mut correction) in &mut characters {
        let Some(applied) = correction.applied.take() else {
            continue;
        };
        let Ok(mut hips) = transforms.get_mut(rig.hips) else {
            continue;
        };
        if hips.translation == applied.corrected {
            hips.translation = applied.animated;
        }
    }
}

/// Runs the pose-evaluation stage and fills in [`FootIkGoals`].
pub fn evaluate_foot_ik(mut characters: EvaluationQuery, transforms: TransformQuery) {
    for (root, rig, mut foot_ik, mut goals, curves) in &mut characters {
        let Some(view) = RigView::new(root, rig, curves, &transforms) else {
            warn_once!("Foot IK rig of {root} references entities without a Transform");
            continue;
        };
        let mut pose = RigPose::new(view, &mut goals);
        pose.begin_frame();
        foot_ik.solver.evaluate_ik(&mut pose);
    }
}

/// Moves the hips to the corrected body position, if any.
pub fn apply_pelvis_offsets(
    mut characters: Query<(&FootIkRig, &FootIkGoals, &mut FootIkHipsCorrection)>,
    mut transforms: Query<(&mut Transform, Option<&ChildOf>)>,
) {
    for (rig, goals, mut correction) in &mut characters {
        let Some(body_position) = goals.body_position else {
            continue;
        };
        let Ok((_, hips_parent)) = transforms.get(rig.hips) else {
            continue;
        };

        let parent_global = hips_parent
            .map(ChildOf::parent)
            .and_then(|parent| {
                eager_global_transform(parent, |entity| {
                    transforms
                        .get(entity)
                        .ok()
                        .map(|(transform, child_of)| (*transform, child_of.map(ChildOf::parent)))
                })
            })
            .unwrap_or(GlobalTransform::IDENTITY);
        let local = parent_global
            .affine()
            .inverse()
            .transform_point3(body_position);

        if let Ok((mut hips, _)) = transforms.get_mut(rig.hips) {
            correction.applied = Some(AppliedHipsCorrection {
                animated: hips.translation,
                corrected: local,
            });
            hips.translation = local;
        }
    }
}

/// Copies loaded or modified config assets into the solvers that use them.
pub fn sync_foot_ik_configs(
    configs: Res<Assets<FootIkConfig>>,
    mut characters: Query<(Entity, &FootIkConfigHandle, &mut FootIk)>,
) {
    for (entity, handle, mut foot_ik) in &mut characters {
        let Some(config) = configs.get(&handle.0) else {
            continue;
        };
        if config != foot_ik.solver.config() {
            debug!("Updating foot IK config of {entity}");
            foot_ik.solver.set_config(config.clone());
        }
    }
}

/// Draws the probes of the last simulation step.
pub fn draw_foot_ik_gizmos(characters: Query<&FootIk>, mut gizmos: Gizmos) {
    for foot_ik in &characters {
        foot_ik.solver.gizmos().apply(&mut gizmos);
    }
}
