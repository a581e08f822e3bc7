use bevy::reflect::{Reflect, std_traits::ReflectDefault};

use crate::{
    config::FootIkConfig,
    debug::DeferredGizmos,
    foot::{Feet, Foot, FootState},
    foot_solver::{sky_position, solve_foot},
    ground_probe::GroundProbe,
    ik_applier::apply_foot,
    pelvis::PelvisState,
    pose_provider::{SkeletalPose, SkeletalPoseMut},
};

/// Per-character foot and pelvis IK state.
///
/// The solver has two entry points that the host calls at their own cadence:
/// - [`FootIkSolver::advance_simulation`], at the simulation rate, probes the ground
///   and recomputes foot targets.
/// - [`FootIkSolver::evaluate_ik`], after the animation is evaluated and before the
///   pose is committed, moves the pelvis and writes the foot IK goals.
///
/// Smoothing is a fixed-rate exponential filter applied once per
/// [`FootIkSolver::evaluate_ik`] call, so results are reproducible for identical
/// inputs, and the filter's response time scales with the evaluation rate.
#[derive(Reflect, Clone, Debug, Default)]
#[reflect(Default)]
pub struct FootIkSolver {
    config: FootIkConfig,
    feet: Feet<FootState>,
    pelvis: PelvisState,
    gizmos: DeferredGizmos,
}

impl FootIkSolver {
    pub fn new(config: FootIkConfig) -> Self {
        Self {
            config,
            ..Default::default()
        }
    }

    pub fn config(&self) -> &FootIkConfig {
        &self.config
    }

    /// Replaces the configuration, keeping the smoothing state.
    pub fn set_config(&mut self, config: FootIkConfig) {
        self.config = config;
    }

    pub fn foot(&self, foot: Foot) -> &FootState {
        &self.feet[foot]
    }

    pub fn pelvis(&self) -> &PelvisState {
        &self.pelvis
    }

    /// Debug draw commands of the last simulation step.
    pub fn gizmos(&self) -> &DeferredGizmos {
        &self.gizmos
    }

    /// Forgets all targets and smoothing history.
    pub fn reset(&mut self) {
        self.feet = Feet::default();
        self.pelvis = PelvisState::default();
        self.gizmos.clear();
    }

    /// Simulation-rate step: probes the ground under both feet.
    pub fn advance_simulation(&mut self, pose: &impl SkeletalPose, probe: &impl GroundProbe) {
        self.gizmos.clear();

        if !self.config.enabled {
            return;
        }

        let reference = pose.reference_transform();

        for foot in Foot::EVALUATION_ORDER {
            self.feet[foot].sky_position = sky_position(pose, foot, &reference, &self.config);
        }

        for foot in Foot::EVALUATION_ORDER {
            let yaw_offset = pose.curve_value(self.config.curves.yaw_offset(foot));
            let gizmos = self.config.debug_draw.then_some(&mut self.gizmos);

            let target = solve_foot(
                self.feet[foot].sky_position,
                probe,
                &self.config,
                reference.rotation,
                yaw_offset,
                gizmos,
            );
            self.feet[foot].target = target;
        }
    }

    /// Pose-evaluation step: reconciles the pelvis height, then writes both feet's IK
    /// goals and weights.
    pub fn evaluate_ik(&mut self, pose: &mut impl SkeletalPoseMut) {
        if !self.config.enabled {
            return;
        }

        let reference = pose.reference_transform();

        self.pelvis.reconcile(
            &self.feet,
            pose,
            reference.translation.y,
            self.config.pelvis_smoothing,
        );

        for foot in Foot::EVALUATION_ORDER {
            apply_foot(foot, &mut self.feet[foot], pose, &self.config, &reference);
        }
    }
}
