use bevy::{
    math::{Quat, Vec3},
    platform::collections::HashMap,
    transform::components::Transform,
};

use crate::{
    foot::{Feet, Foot},
    pose_provider::{SkeletalPose, SkeletalPoseMut},
};

/// In-memory pose that records everything the solver writes.
#[derive(Default, Debug)]
pub(crate) struct TestPose {
    pub reference: Transform,
    pub bones: Feet<Vec3>,
    pub curves: HashMap<String, f32>,
    pub animated_goals: Feet<Vec3>,
    pub goal_positions: Feet<Option<Vec3>>,
    pub goal_rotations: Feet<Option<Quat>>,
    pub position_weights: Feet<Option<f32>>,
    pub rotation_weights: Feet<Option<f32>>,
    pub body: Vec3,
    pub body_writes: usize,
}

impl TestPose {
    pub fn with_body(body: Vec3) -> Self {
        Self {
            body,
            ..Default::default()
        }
    }

    /// Feet animated at the given positions, fully weighted towards IK.
    pub fn standing(left: Vec3, right: Vec3) -> Self {
        Self {
            bones: Feet { left, right },
            animated_goals: Feet { left, right },
            ..Default::default()
        }
        .with_curve("LeftFootCurve", 1.)
        .with_curve("RightFootCurve", 1.)
    }

    pub fn with_curve(mut self, name: &str, value: f32) -> Self {
        self.curves.insert(name.to_string(), value);
        self
    }

    /// Starts a new frame: the animation rewrites the body and nothing is written yet.
    pub fn next_frame(&mut self, animated_body: Vec3) {
        self.body = animated_body;
        self.body_writes = 0;
        self.goal_positions = Feet::default();
        self.goal_rotations = Feet::default();
        self.position_weights = Feet::default();
        self.rotation_weights = Feet::default();
    }
}

impl SkeletalPose for TestPose {
    fn reference_transform(&self) -> Transform {
        self.reference
    }

    fn foot_bone_world_position(&self, foot: Foot) -> Vec3 {
        self.bones[foot]
    }

    fn curve_value(&self, curve: &str) -> f32 {
        self.curves.get(curve).copied().unwrap_or_default()
    }

    fn ik_goal_position(&self, foot: Foot) -> Vec3 {
        self.animated_goals[foot]
    }

    fn body_position(&self) -> Vec3 {
        self.body
    }
}

impl SkeletalPoseMut for TestPose {
    fn set_ik_goal_position(&mut self, foot: Foot, position: Vec3) {
        self.goal_positions[foot] = Some(position);
    }

    fn set_ik_goal_rotation(&mut self, foot: Foot, rotation: Quat) {
        self.goal_rotations[foot] = Some(rotation);
    }

    fn set_ik_position_weight(&mut self, foot: Foot, weight: f32) {
        self.position_weights[foot] = Some(weight);
    }

    fn set_ik_rotation_weight(&mut self, foot: Foot, weight: f32) {
        self.rotation_weights[foot] = Some(weight);
    }

    fn set_body_position(&mut self, position: Vec3) {
        self.body = position;
        self.body_writes += 1;
    }
}
