use bevy::{
    asset::Asset,
    reflect::{Reflect, std_traits::ReflectDefault},
};
use serde::{Deserialize, Serialize};

use crate::{errors::FootIkConfigError, foot::Foot, ground_probe::GroundLayers};

/// Tuning for a [`FootIkSolver`].
///
/// The solver treats this as immutable: changing it between ticks is allowed, but the
/// smoothing state carried over from the previous config is not reset.
///
/// Smoothing rates are fixed per-tick exponential filter factors, so the effective
/// response time of the filter depends on the rate at which the solver is ticked.
///
/// [`FootIkSolver`]: crate::solver::FootIkSolver
#[derive(Asset, Reflect, Clone, Debug, PartialEq, Serialize, Deserialize)]
#[reflect(Default)]
#[serde(default)]
pub struct FootIkConfig {
    /// When disabled, both solver stages are skipped and the animated pose passes through.
    pub enabled: bool,
    /// Height above the character root from which the ground probes are cast.
    pub height_from_ground_raycast: f32,
    /// How far below the character root the probes reach.
    pub raycast_down_distance: f32,
    pub ground_layers: GroundLayers,
    /// Vertical offset added on top of the detected ground height.
    pub pelvis_offset: f32,
    /// Pelvis filter factor in `[0, 1]`. `0` freezes the pelvis, `1` snaps it.
    pub pelvis_smoothing: f32,
    /// Foot filter factor in `[0, 1]`. `0` freezes the feet, `1` snaps them.
    pub foot_smoothing: f32,
    pub curves: FootIkCurveNames,
    /// Also drive the IK rotation weight from the position weight curve.
    pub rotation_ik: bool,
    /// Queue debug gizmos for every ground probe.
    pub debug_draw: bool,
}

impl Default for FootIkConfig {
    fn default() -> Self {
        Self {
            enabled: true,
            height_from_ground_raycast: 1.2,
            raycast_down_distance: 1.5,
            ground_layers: GroundLayers::ALL,
            pelvis_offset: 0.,
            pelvis_smoothing: 0.28,
            foot_smoothing: 0.5,
            curves: FootIkCurveNames::default(),
            rotation_ik: false,
            debug_draw: true,
        }
    }
}

impl FootIkConfig {
    /// Total length of a ground probe, measured from the sky position.
    pub fn probe_distance(&self) -> f32 {
        self.raycast_down_distance + self.height_from_ground_raycast
    }

    /// Checks the preconditions the solver relies on but does not enforce itself.
    pub fn validate(&self) -> Result<(), FootIkConfigError> {
        for (field, value) in [
            ("pelvis_smoothing", self.pelvis_smoothing),
            ("foot_smoothing", self.foot_smoothing),
        ] {
            if !(0.0..=1.0).contains(&value) {
                return Err(FootIkConfigError::SmoothingOutOfRange { field, value });
            }
        }

        for (field, value) in [
            ("height_from_ground_raycast", self.height_from_ground_raycast),
            ("raycast_down_distance", self.raycast_down_distance),
        ] {
            if !value.is_finite() || value < 0. {
                return Err(FootIkConfigError::InvalidDistance { field, value });
            }
        }

        self.curves.validate()
    }
}

/// Names of the scalar animation curves the solver samples from the pose.
#[derive(Reflect, Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
#[reflect(Default)]
#[serde(default)]
pub struct FootIkCurveNames {
    pub left_position_weight: String,
    pub right_position_weight: String,
    /// Yaw offset in degrees about world up.
    pub left_yaw_offset: String,
    /// Yaw offset in degrees about world up.
    pub right_yaw_offset: String,
}

impl Default for FootIkCurveNames {
    fn default() -> Self {
        Self {
            left_position_weight: "LeftFootCurve".into(),
            right_position_weight: "RightFootCurve".into(),
            left_yaw_offset: "LeftFootAngleY".into(),
            right_yaw_offset: "RightFootAngleY".into(),
        }
    }
}

impl FootIkCurveNames {
    pub fn position_weight(&self, foot: Foot) -> &str {
        match foot {
            Foot::Left => &self.left_position_weight,
            Foot::Right => &self.right_position_weight,
        }
    }

    pub fn yaw_offset(&self, foot: Foot) -> &str {
        match foot {
            Foot::Left => &self.left_yaw_offset,
            Foot::Right => &self.right_yaw_offset,
        }
    }

    fn validate(&self) -> Result<(), FootIkConfigError> {
        for (field, name) in [
            ("left_position_weight", &self.left_position_weight),
            ("right_position_weight", &self.right_position_weight),
            ("left_yaw_offset", &self.left_yaw_offset),
            ("right_yaw_offset", &self.right_yaw_offset),
        ] {
            if name.is_empty() {
                return Err(FootIkConfigError::EmptyCurveName(field));
            }
        }
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn default_config_is_valid() {
        let config = FootIkConfig::default();
        assert_eq!(config.validate(), Ok(()));
        assert!((config.probe_distance() - 2.7).abs() < 1e-6);
    }

    #[test]
    fn partial_ron_keeps_defaults() {
        let config: FootIkConfig =
            ron::de::from_str("(pelvis_offset: 0.05, curves: (left_yaw_offset: \"LYaw\"))")
                .unwrap();

        assert_eq!(config.pelvis_offset, 0.05);
        assert_eq!(config.curves.left_yaw_offset, "LYaw");
        assert_eq!(config.curves.right_yaw_offset, "RightFootAngleY");
        assert_eq!(config.foot_smoothing, 0.5);
        assert!(config.enabled);
    }

    #[test]
    fn out_of_range_smoothing_is_rejected() {
        let config = FootIkConfig {
            foot_smoothing: 1.5,
            ..Default::default()
        };
        assert_eq!(
            config.validate(),
            Err(FootIkConfigError::SmoothingOutOfRange {
                field: "foot_smoothing",
                value: 1.5
            })
        );
    }

    #[test]
    fn negative_distance_is_rejected() {
        let config = FootIkConfig {
            raycast_down_distance: -0.1,
            ..Default::default()
        };
        assert!(matches!(
            config.validate(),
            Err(FootIkConfigError::InvalidDistance {
                field: "raycast_down_distance",
                ..
            })
        ));
    }

    #[test]
    fn empty_curve_name_is_rejected() {
        let mut config = FootIkConfig::default();
        config.curves.right_position_weight.clear();
        assert_eq!(
            config.validate(),
            Err(FootIkConfigError::EmptyCurveName("right_position_weight"))
        );
    }
}
