use bevy::{
    app::{App, FixedUpdate, Plugin, PostUpdate},
    asset::AssetApp,
    ecs::{
        intern::Interned,
        schedule::{IntoScheduleConfigs, ScheduleLabel, SystemSet},
    },
    transform::TransformSystems,
};
use bevy_foot_ik_core::{
    config::{FootIkConfig, FootIkCurveNames},
    config_loader::FootIkConfigLoader,
    foot::{Foot, FootState, FootTarget},
    ground_probe::GroundLayers,
    pelvis::PelvisState,
    solver::FootIkSolver,
};

use crate::{
    components::{
        AppliedHipsCorrection, FootIk, FootIkConfigHandle, FootIkCurves, FootIkGoals,
        FootIkHipsCorrection, FootIkRig, IkGoal,
    },
    systems::{
        apply_pelvis_offsets, draw_foot_ik_gizmos, evaluate_foot_ik, restore_animated_hips,
        sync_foot_ik_configs,
    },
};

/// Adds foot IK to an app.
///
/// Characters opt in with [`FootIk`], [`FootIkRig`] and, optionally,
/// [`FootIkConfigHandle`]. With the `physics_avian` feature the ground is probed with
/// Avian's spatial queries; without it, add [`probe_foot_ik`] for your own probe
/// resource to [`FootIkSet::Probe`].
///
/// [`probe_foot_ik`]: crate::systems::probe_foot_ik
pub struct FootIkPlugin {
    /// Schedule the ground probes run in. Should tick at a fixed rate.
    pub simulation_schedule: Interned<dyn ScheduleLabel>,
    /// Schedule the pelvis and foot goals are evaluated in, once per rendered frame.
    pub evaluation_schedule: Interned<dyn ScheduleLabel>,
}

impl Default for FootIkPlugin {
    fn default() -> Self {
        Self {
            simulation_schedule: FixedUpdate.intern(),
            evaluation_schedule: PostUpdate.intern(),
        }
    }
}

#[derive(Clone, Debug, Copy, PartialEq, Eq, Hash, SystemSet)]
pub enum FootIkSet {
    /// Ground probing, runs in the simulation schedule.
    Probe,
    /// Pelvis and foot goal evaluation. Runs in the evaluation schedule, before
    /// transform propagation; order your animation systems before it.
    Evaluate,
}

impl Plugin for FootIkPlugin {
    fn build(&self, app: &mut App) {
        self.register_assets(app);
        self.register_types(app);

        app.configure_sets(
            self.evaluation_schedule,
            FootIkSet::Evaluate.before(TransformSystems::Propagate),
        );

        #[cfg(feature = "physics_avian")]
        app.add_systems(
            self.simulation_schedule,
            crate::systems::probe_foot_ik_avian.in_set(FootIkSet::Probe),
        );

        app.add_systems(
            self.evaluation_schedule,
            (
                sync_foot_ik_configs,
                restore_animated_hips,
                evaluate_foot_ik,
                apply_pelvis_offsets,
                draw_foot_ik_gizmos,
            )
                .chain()
                .in_set(FootIkSet::Evaluate),
        );
    }
}

impl FootIkPlugin {
    fn register_assets(&self, app: &mut App) {
        app.init_asset::<FootIkConfig>()
            .init_asset_loader::<FootIkConfigLoader>()
            .register_asset_reflect::<FootIkConfig>();
    }

    fn register_types(&self, app: &mut App) {
        app //
            .register_type::<FootIk>()
            .register_type::<FootIkRig>()
            .register_type::<FootIkCurves>()
            .register_type::<FootIkGoals>()
            .register_type::<FootIkConfigHandle>()
            .register_type::<IkGoal>()
            .register_type::<FootIkHipsCorrection>()
            .register_type::<AppliedHipsCorrection>()
            .register_type::<FootIkSolver>()
            .register_type::<FootIkCurveNames>()
            .register_type::<GroundLayers>()
            .register_type::<Foot>()
            .register_type::<FootState>()
            .register_type::<FootTarget>()
            .register_type::<PelvisState>();
    }
}
