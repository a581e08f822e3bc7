//! # Bevy Foot IK
//!
//! Procedural foot and pelvis adjustment for two-legged characters walking on uneven
//! ground. Each frame, the ground under both feet is probed with a downward ray, the
//! feet are moved onto it (and aligned with its normal), and the hips are lowered
//! so the lower foot can reach the ground. All corrections are smoothed over time
//! and blended with the animated pose using weights sampled from animation curves.
//!
//! The solver only produces foot IK goals (see [`FootIkGoals`]); bending the legs
//! to reach them is left to a leg IK solver downstream.
//!
//! ## Setup
//!
//! ```ignore
//! app.add_plugins(FootIkPlugin::default());
//!
//! commands.entity(character).insert((
//!     FootIk::default(),
//!     FootIkRig { left_foot, right_foot, hips },
//!     FootIkConfigHandle(asset_server.load("characters/human.footik.ron")),
//! ));
//! ```
//!
//! Configs are stored in `*.footik.ron` files. Every field is optional:
//!
//! ```ron
//! (
//!     height_from_ground_raycast: 1.2,
//!     raycast_down_distance: 1.5,
//!     pelvis_smoothing: 0.28,
//!     foot_smoothing: 0.5,
//!     curves: (
//!         left_position_weight: "LeftFootCurve",
//!         right_position_weight: "RightFootCurve",
//!     ),
//! )
//! ```
//!
//! Curve values are read from [`FootIkCurves`], which the animation layer is expected
//! to fill in before [`FootIkSet::Evaluate`].
//!
//! [`FootIkGoals`]: components::FootIkGoals
//! [`FootIkCurves`]: components::FootIkCurves
//! [`FootIkSet::Evaluate`]: plugin::FootIkSet::Evaluate

pub mod components;
#[cfg(feature = "physics_avian")]
pub mod ground_probe_avian;
pub mod plugin;
pub mod rig_pose;
pub mod systems;

pub use bevy_foot_ik_core as core;

pub mod prelude {
    pub use super::components::*;
    #[cfg(feature = "physics_avian")]
    pub use super::ground_probe_avian::AvianGroundProbe;
    pub use super::plugin::{FootIkPlugin, FootIkSet};
    pub use super::rig_pose::{RigPose, RigView};
    pub use bevy_foot_ik_core::prelude::*;
}
