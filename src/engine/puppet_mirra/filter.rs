use std::collections::HashMap;

use glam::{Quat, Vec3};
use math_mirra::{Angle, smooth_quat};

use crate::rig::BoneIndex;

// Default EMA factor; convergence takes on the order of 1/alpha ticks
pub const DEFAULT_SMOOTHING: f32 = 0.25;
// Adaptive visibility gate bounds
pub const VISIBILITY_FLOOR: f32 = 0.4;
pub const VISIBILITY_BASE: f32 = 0.7;

// A body-region chain updates only when both of its anchor confidences reach
// an adaptive threshold: the clamped average of the pair. Confident pairs are
// held to `base`; a detector reporting uniformly low confidence still tracks
// down to `floor`.
#[must_use]
pub fn chain_gate(vis_a: f32, vis_b: f32, floor: f32, base: f32) -> bool
{
    let threshold = (0.5 * (vis_a + vis_b)).clamp(floor, base);
    vis_a >= threshold && vis_b >= threshold
}

// Per-bone spherical smoothing state. Entries are created lazily from the
// bone's current rotation on first touch and dropped on reset, so the next
// update after a reset starts from the rig's actual pose.
#[derive(Debug, Default)]
pub struct RotationFilter
{
    states: HashMap<BoneIndex, Quat>,
}
impl RotationFilter
{
    // One smoothing step toward `target`; returns the rotation to apply
    pub fn smooth(&mut self, bone: BoneIndex, current: Quat, target: Quat, alpha: f32) -> Quat
    {
        let state = self.states.entry(bone).or_insert(current);
        *state = smooth_quat(*state, target, alpha);
        *state
    }

    pub fn reset(&mut self, bone: BoneIndex)
    {
        self.states.remove(&bone);
    }

    pub fn reset_all(&mut self)
    {
        self.states.clear();
    }

    #[inline] #[must_use]
    pub fn tracked_bones(&self) -> usize { self.states.len() }
}

// Component-wise Euler EMA for small-angle corrective chains (spine, head,
// fingers); wrap-aware per component. Not safe past +-90 degrees -- larger
// rotations belong on the quaternion path.
#[derive(Debug, Default)]
pub struct EulerFilter
{
    states: HashMap<BoneIndex, Vec3>,
}
impl EulerFilter
{
    pub fn smooth(&mut self, bone: BoneIndex, current: Vec3, target: Vec3, alpha: f32) -> Vec3
    {
        let state = self.states.entry(bone).or_insert(current);
        *state = Vec3::new(
            Angle::from_radians(state.x).lerp(Angle::from_radians(target.x), alpha).to_radians(),
            Angle::from_radians(state.y).lerp(Angle::from_radians(target.y), alpha).to_radians(),
            Angle::from_radians(state.z).lerp(Angle::from_radians(target.z), alpha).to_radians());
        *state
    }

    pub fn reset(&mut self, bone: BoneIndex)
    {
        self.states.remove(&bone);
    }

    pub fn reset_all(&mut self)
    {
        self.states.clear();
    }
}
