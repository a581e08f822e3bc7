use bevy::{
    math::FloatExt,
    reflect::{Reflect, std_traits::ReflectDefault},
};

use crate::{
    foot::{Feet, FootState},
    pose_provider::{SkeletalPose, SkeletalPoseMut},
};

#[derive(Reflect, Clone, Debug, Default, PartialEq)]
#[reflect(Default)]
pub struct PelvisState {
    /// Last smoothed body height. `0.0` means "not yet seeded", so a body that
    /// sits at exactly height zero is reseeded every frame and never corrected.
    pub last_y: f32,
}

impl PelvisState {
    pub fn is_initialized(&self) -> bool {
        self.last_y != 0.
    }

    /// Lowers (or raises) the body so that it follows the lower of the two feet.
    ///
    /// Taking the lower foot means the body drops to let that foot reach the ground;
    /// following the higher one would leave the other foot floating.
    pub fn reconcile(
        &mut self,
        feet: &Feet<FootState>,
        pose: &mut impl SkeletalPoseMut,
        reference_y: f32,
        smoothing: f32,
    ) {
        let body = pose.body_position();

        let (Some(left), Some(right)) = (feet.left.target.position(), feet.right.target.position())
        else {
            self.last_y = body.y;
            return;
        };

        if !self.is_initialized() {
            self.last_y = body.y;
            return;
        }

        let offset = (left.y - reference_y).min(right.y - reference_y);
        let y = self.last_y.lerp(body.y + offset, smoothing);

        pose.set_body_position(body.with_y(y));
        self.last_y = y;
    }
}
