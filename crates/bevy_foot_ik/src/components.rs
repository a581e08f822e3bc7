use bevy::{
    asset::Handle,
    ecs::{component::Component, entity::Entity, reflect::ReflectComponent},
    math::{Quat, Vec3},
    platform::collections::HashMap,
    reflect::{Reflect, std_traits::ReflectDefault},
};
use bevy_foot_ik_core::{
    config::FootIkConfig,
    foot::{Feet, Foot},
    solver::FootIkSolver,
};

/// Enables foot IK on a character. Add it to the character root, which is also
/// the reference the solver measures heights against.
#[derive(Component, Reflect, Clone, Debug, Default)]
#[reflect(Component, Default)]
#[require(FootIkGoals, FootIkCurves, FootIkHipsCorrection)]
pub struct FootIk {
    pub solver: FootIkSolver,
}

impl FootIk {
    pub fn new(config: FootIkConfig) -> Self {
        Self {
            solver: FootIkSolver::new(config),
        }
    }
}

/// Bones of the character driven by the solver. All of them must be descendants of
/// the entity holding [`FootIk`].
#[derive(Component, Reflect, Clone, Copy, Debug)]
#[reflect(Component)]
pub struct FootIkRig {
    pub left_foot: Entity,
    pub right_foot: Entity,
    pub hips: Entity,
}

impl FootIkRig {
    pub fn foot(&self, foot: Foot) -> Entity {
        match foot {
            Foot::Left => self.left_foot,
            Foot::Right => self.right_foot,
        }
    }
}

/// Scalar animation curves sampled this frame, keyed by curve name.
///
/// Whatever plays the animation is expected to keep these up to date.
#[derive(Component, Reflect, Clone, Debug, Default)]
#[reflect(Component, Default)]
pub struct FootIkCurves {
    values: HashMap<String, f32>,
}

impl FootIkCurves {
    pub fn get(&self, curve: &str) -> Option<f32> {
        self.values.get(curve).copied()
    }

    pub fn set(&mut self, curve: impl Into<String>, value: f32) {
        self.values.insert(curve.into(), value);
    }
}

#[derive(Reflect, Clone, Copy, Debug, Default, PartialEq)]
#[reflect(Default)]
pub struct IkGoal {
    pub position: Vec3,
    pub rotation: Quat,
    pub position_weight: f32,
    pub rotation_weight: f32,
}

/// Output of the solver for this frame, to be consumed by a leg IK solver.
#[derive(Component, Reflect, Clone, Debug, Default)]
#[reflect(Component, Default)]
pub struct FootIkGoals {
    pub feet: Feet<IkGoal>,
    /// World position the hips should be moved to, if the pelvis was corrected.
    pub body_position: Option<Vec3>,
}

/// Hips translation written by the last pelvis correction, with the animated
/// translation it replaced.
#[derive(Reflect, Clone, Copy, Debug, PartialEq)]
pub struct AppliedHipsCorrection {
    pub animated: Vec3,
    pub corrected: Vec3,
}

/// Lets the plugin undo its own hips correction before the next evaluation, so the
/// solver always reads the animated body height.
#[derive(Component, Reflect, Clone, Copy, Debug, Default)]
#[reflect(Component, Default)]
pub struct FootIkHipsCorrection {
    pub applied: Option<AppliedHipsCorrection>,
}

/// Keeps the character's solver config in sync with a config asset.
#[derive(Component, Reflect, Clone, Debug, Default)]
#[reflect(Component, Default)]
pub struct FootIkConfigHandle(pub Handle<FootIkConfig>);
