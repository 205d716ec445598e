use glam::{EulerRot, Quat, Vec3};
use math_mirra::Angle;

use crate::binding::{Side, SkeletonBinding};
use crate::rig::Rig;

// Symmetric per-axis limit; noisy source data must never overextend a joint
pub const AXIS_CLAMP: Angle = Angle::from_degrees(90.0);

#[derive(Debug, Copy, Clone, PartialEq, Eq)]
pub enum SourceAxis
{
    X,
    Y,
    Z,
}
impl SourceAxis
{
    #[inline] #[must_use]
    fn pick(self, angles: Vec3) -> f32
    {
        match self
        {
            Self::X => angles.x,
            Self::Y => angles.y,
            Self::Z => angles.z,
        }
    }
}

// One target-axis assignment: which source axis feeds it, and with what sign
#[derive(Debug, Copy, Clone)]
pub struct AxisTake
{
    pub axis: SourceAxis,
    pub flip: bool,
}
impl AxisTake
{
    #[must_use]
    pub const fn of(axis: SourceAxis) -> Self { Self { axis, flip: false } }
    #[must_use]
    pub const fn flipped(axis: SourceAxis) -> Self { Self { axis, flip: true } }

    fn take(self, angles: Vec3, clamp: Angle) -> f32
    {
        let v = self.axis.pick(angles);
        let v = if self.flip { -v } else { v };
        // straight clamp, no wrapping: an overshooting 200deg source angle
        // pins at the limit instead of flipping sign
        Angle::from_radians(v).clamp_symmetric(clamp).to_radians()
    }
}

// The two skeleton conventions disagree on which local axis is flexion vs
// abduction; each chain carries its own axis reassignment
#[derive(Debug, Copy, Clone)]
pub struct AxisPermutation
{
    pub x: AxisTake,
    pub y: AxisTake,
    pub z: AxisTake,
}
impl AxisPermutation
{
    #[must_use]
    pub fn apply(&self, source: Vec3, clamp: Angle) -> Vec3
    {
        Vec3::new(
            self.x.take(source, clamp),
            self.y.take(source, clamp),
            self.z.take(source, clamp))
    }
}

#[derive(Debug, Copy, Clone)]
pub enum Chain
{
    Arm(Side),
    // TODO: Leg(Side)/Hand(Side) once their permutations are verified against
    // a real rig pair; only the left arm mapping is authoritative so far
}

#[derive(Debug, Copy, Clone)]
pub struct ChainRetarget
{
    pub chain: Chain,
    pub permutation: AxisPermutation,
}

pub const LEFT_ARM: ChainRetarget = ChainRetarget
{
    chain: Chain::Arm(Side::Left),
    permutation: AxisPermutation
    {
        x: AxisTake::of(SourceAxis::Z),
        y: AxisTake::of(SourceAxis::X),
        z: AxisTake::flipped(SourceAxis::Y),
    },
};

// Re-expresses the source skeleton's already-smoothed local rotations on a
// differently-conventioned target skeleton. Reads source state only and
// writes absolute target rotations, so running it again without a source
// change reproduces the exact same target pose.
pub struct Retargeter
{
    table: Vec<ChainRetarget>,
    clamp: Angle,
}
impl Retargeter
{
    #[must_use]
    pub fn standard() -> Self
    {
        Self { table: vec![LEFT_ARM], clamp: AXIS_CLAMP }
    }

    #[must_use]
    pub fn with_table(table: Vec<ChainRetarget>, clamp: Angle) -> Self
    {
        Self { table, clamp }
    }

    pub fn run(
        &self,
        source_rig: &Rig, source: &SkeletonBinding,
        target_rig: &mut Rig, target: &SkeletonBinding)
    {
        for entry in &self.table
        {
            match entry.chain
            {
                Chain::Arm(side) =>
                {
                    let (Some(src), Some(dst)) = (source.arm(side), target.arm(side)) else
                    {
                        continue;
                    };
                    for (s, d) in [
                        (src.shoulder, dst.shoulder),
                        (src.elbow, dst.elbow),
                        (src.wrist, dst.wrist)]
                    {
                        let (sx, sy, sz) = source_rig.rotation(s).to_euler(EulerRot::XYZ);
                        let mapped = entry.permutation.apply(Vec3::new(sx, sy, sz), self.clamp);
                        target_rig.set_rotation(
                            d, Quat::from_euler(EulerRot::XYZ, mapped.x, mapped.y, mapped.z));
                    }
                }
            }
        }
    }
}
