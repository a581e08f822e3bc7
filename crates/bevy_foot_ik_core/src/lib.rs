//! Core of the ground-aware foot IK solver.
//!
//! This crate holds the engine-facing math and state: it talks to the animated pose
//! through [`SkeletalPose`] and to the world through [`GroundProbe`], and has no
//! opinion on when it is ticked. See the `bevy_foot_ik` crate for the ECS wiring.
//!
//! [`SkeletalPose`]: pose_provider::SkeletalPose
//! [`GroundProbe`]: ground_probe::GroundProbe

pub mod config;
pub mod config_loader;
pub mod debug;
pub mod errors;
pub mod foot;
pub mod foot_solver;
pub mod ground_probe;
pub mod ik_applier;
pub mod pelvis;
pub mod pose_provider;
pub mod solver;

#[cfg(test)]
pub(crate) mod test_utils;

pub mod prelude {
    pub use super::config::{FootIkConfig, FootIkCurveNames};
    pub use super::config_loader::FootIkConfigLoader;
    pub use super::debug::DeferredGizmos;
    pub use super::errors::{FootIkConfigError, FootIkLoaderError};
    pub use super::foot::{Feet, Foot, FootState, FootTarget};
    pub use super::ground_probe::{GroundHit, GroundLayers, GroundPlane, GroundProbe};
    pub use super::pelvis::PelvisState;
    pub use super::pose_provider::{SkeletalPose, SkeletalPoseMut};
    pub use super::solver::FootIkSolver;
}
