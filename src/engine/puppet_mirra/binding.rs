use std::error::Error;
use std::fmt::{Debug, Display, Formatter};

use arrayvec::ArrayVec;

use crate::rig::{BoneIndex, Rig};

// wrist + 5 fingers x 4 segments, laid out to match the hand landmark
// topology (finger base bone slot == finger base landmark index)
pub const HAND_BONE_COUNT: usize = 21;

const FINGER_NAMES: [&str; 5] = ["Thumb", "Index", "Middle", "Ring", "Pinky"];

#[derive(Debug, Copy, Clone, PartialEq, Eq)]
pub enum Side
{
    Left,
    Right,
}
impl Side
{
    pub const BOTH: [Side; 2] = [Side::Left, Side::Right];

    // Camera input is mirrored: the user's left limb drives rig bones named
    // Right* and vice versa
    #[inline] #[must_use]
    pub fn rig_side(self) -> &'static str
    {
        match self
        {
            Side::Left => "Right",
            Side::Right => "Left",
        }
    }

    #[inline] #[must_use]
    pub fn opposite(self) -> Self
    {
        match self
        {
            Side::Left => Side::Right,
            Side::Right => Side::Left,
        }
    }
}

// How a rig spells its bone names
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum NamingConvention
{
    // e.g. "mixamorigRightForeArm"
    Prefixed(Box<str>),
    // bare "RightForeArm"
    Plain,
}
impl NamingConvention
{
    #[must_use]
    pub fn mixamo() -> Self { Self::Prefixed("mixamorig".into()) }

    #[must_use]
    pub fn bone_name(&self, base: &str) -> String
    {
        match self
        {
            Self::Prefixed(prefix) => format!("{prefix}{base}"),
            Self::Plain => base.to_string(),
        }
    }
}

#[derive(Debug)]
pub enum BindingError
{
    MissingRequiredBone(String),
}
impl Display for BindingError
{
    fn fmt(&self, f: &mut Formatter<'_>) -> std::fmt::Result { Debug::fmt(self, f) }
}
impl Error for BindingError { }

#[derive(Debug, Copy, Clone)]
pub struct ArmChain
{
    pub shoulder: BoneIndex,
    pub elbow: BoneIndex,
    pub wrist: BoneIndex,
}

#[derive(Debug, Copy, Clone)]
pub struct LegChain
{
    pub hip: BoneIndex,
    pub knee: BoneIndex,
    pub ankle: BoneIndex,
    pub toe: BoneIndex,
}
impl LegChain
{
    // the joints the pipeline rotates; the toe is only a chain endpoint
    #[inline] #[must_use]
    pub fn driven_joints(&self) -> [BoneIndex; 3] { [self.hip, self.knee, self.ankle] }
}

// Individual finger segments may be missing on simplified rigs
#[derive(Debug, Clone)]
pub struct HandChain
{
    bones: [Option<BoneIndex>; HAND_BONE_COUNT],
}
impl HandChain
{
    #[inline] #[must_use]
    pub fn bone(&self, slot: usize) -> Option<BoneIndex>
    {
        self.bones.get(slot).copied().flatten()
    }

    #[must_use]
    pub fn bound_count(&self) -> usize
    {
        self.bones.iter().filter(|b| b.is_some()).count()
    }
}

// Semantic-role view of a rig, resolved once per avatar load. Chains that the
// rig lacks stay unbound; every consumer treats an unbound chain as a no-op.
#[derive(Debug, Clone)]
pub struct SkeletonBinding
{
    pub hips: BoneIndex,
    pub spine: BoneIndex,
    pub head: BoneIndex,
    left_arm: Option<ArmChain>,
    right_arm: Option<ArmChain>,
    left_leg: Option<LegChain>,
    right_leg: Option<LegChain>,
    left_hand: Option<HandChain>,
    right_hand: Option<HandChain>,
}
impl SkeletonBinding
{
    pub fn bind(rig: &Rig, convention: &NamingConvention) -> Result<Self, BindingError>
    {
        let hips = require(rig, convention, "Hips")?;
        let spine = require(rig, convention, "Spine")?;
        let head = require(rig, convention, "Head")?;

        let mut binding = Self
        {
            hips,
            spine,
            head,
            left_arm: None,
            right_arm: None,
            left_leg: None,
            right_leg: None,
            left_hand: None,
            right_hand: None,
        };

        for side in Side::BOTH
        {
            let arm = bind_arm(rig, convention, hips, side);
            let leg = bind_leg(rig, convention, hips, side);
            let hand = arm.as_ref().and_then(|arm| bind_hand(rig, convention, arm.wrist, side));
            match side
            {
                Side::Left => { binding.left_arm = arm; binding.left_leg = leg; binding.left_hand = hand; }
                Side::Right => { binding.right_arm = arm; binding.right_leg = leg; binding.right_hand = hand; }
            }
        }

        Ok(binding)
    }

    #[inline] #[must_use]
    pub fn arm(&self, side: Side) -> Option<&ArmChain>
    {
        match side
        {
            Side::Left => self.left_arm.as_ref(),
            Side::Right => self.right_arm.as_ref(),
        }
    }

    #[inline] #[must_use]
    pub fn leg(&self, side: Side) -> Option<&LegChain>
    {
        match side
        {
            Side::Left => self.left_leg.as_ref(),
            Side::Right => self.right_leg.as_ref(),
        }
    }

    #[inline] #[must_use]
    pub fn hand(&self, side: Side) -> Option<&HandChain>
    {
        match side
        {
            Side::Left => self.left_hand.as_ref(),
            Side::Right => self.right_hand.as_ref(),
        }
    }

    // Every leg joint the gate reset has to touch
    #[must_use]
    pub fn leg_reset_bones(&self) -> ArrayVec<BoneIndex, 6>
    {
        let mut bones = ArrayVec::new();
        for side in Side::BOTH
        {
            if let Some(leg) = self.leg(side)
            {
                bones.extend(leg.driven_joints());
            }
        }
        bones
    }
}

fn require(rig: &Rig, convention: &NamingConvention, base: &str) -> Result<BoneIndex, BindingError>
{
    let name = convention.bone_name(base);
    rig.find(&name).ok_or(BindingError::MissingRequiredBone(name))
}

// Chain bones resolve globally by name, then get sanity-checked against the
// hierarchy; a chain binds all-or-none
fn chain_bone(rig: &Rig, convention: &NamingConvention, parent: BoneIndex, base: &str) -> Option<BoneIndex>
{
    let bone = rig.find(&convention.bone_name(base))?;
    rig.is_descendant_of(bone, parent).then_some(bone)
}

fn bind_arm(rig: &Rig, convention: &NamingConvention, root: BoneIndex, side: Side) -> Option<ArmChain>
{
    let rs = side.rig_side();
    let shoulder = chain_bone(rig, convention, root, &format!("{rs}Arm"));
    let elbow = shoulder.and_then(|s| chain_bone(rig, convention, s, &format!("{rs}ForeArm")));
    let wrist = elbow.and_then(|e| chain_bone(rig, convention, e, &format!("{rs}Hand")));

    match (shoulder, elbow, wrist)
    {
        (Some(shoulder), Some(elbow), Some(wrist)) => Some(ArmChain { shoulder, elbow, wrist }),
        _ =>
        {
            log::warn!("{side:?} arm chain incomplete; leaving it unbound");
            None
        }
    }
}

fn bind_leg(rig: &Rig, convention: &NamingConvention, root: BoneIndex, side: Side) -> Option<LegChain>
{
    let rs = side.rig_side();
    let hip = chain_bone(rig, convention, root, &format!("{rs}UpLeg"));
    let knee = hip.and_then(|h| chain_bone(rig, convention, h, &format!("{rs}Leg")));
    let ankle = knee.and_then(|k| chain_bone(rig, convention, k, &format!("{rs}Foot")));
    let toe = ankle.and_then(|a| chain_bone(rig, convention, a, &format!("{rs}Toe_End")));

    match (hip, knee, ankle, toe)
    {
        (Some(hip), Some(knee), Some(ankle), Some(toe)) => Some(LegChain { hip, knee, ankle, toe }),
        _ =>
        {
            log::warn!("{side:?} leg chain incomplete; leaving it unbound");
            None
        }
    }
}

fn bind_hand(rig: &Rig, convention: &NamingConvention, wrist: BoneIndex, side: Side) -> Option<HandChain>
{
    let rs = side.rig_side();
    let mut bones = [None; HAND_BONE_COUNT];
    bones[0] = Some(wrist);

    let mut missing = 0usize;
    for (finger, finger_name) in FINGER_NAMES.iter().enumerate()
    {
        for segment in 1..=4
        {
            let slot = 1 + finger * 4 + (segment - 1);
            let base = format!("{rs}Hand{finger_name}{segment}");
            bones[slot] = chain_bone(rig, convention, wrist, &base);
            if bones[slot].is_none() { missing += 1; }
        }
    }

    if missing == HAND_BONE_COUNT - 1
    {
        log::warn!("{side:?} hand has no finger bones; leaving it unbound");
        return None;
    }
    if missing > 0
    {
        log::warn!("{side:?} hand missing {missing} finger bones; binding the rest");
    }
    Some(HandChain { bones })
}

#[cfg(test)]
pub(crate) mod tests
{
    use crate::rig::RigBone;
    use super::*;

    // full mixamo-style humanoid, parent-before-child
    pub(crate) fn humanoid(prefix: &str) -> Rig
    {
        let mut bones = vec![
            RigBone::new(format!("{prefix}Hips"), -1),
            RigBone::new(format!("{prefix}Spine"), 0),
            RigBone::new(format!("{prefix}Head"), 1),
        ];
        for rig_side in ["Left", "Right"]
        {
            let arm_at = bones.len() as i16;
            bones.push(RigBone::new(format!("{prefix}{rig_side}Arm"), 1));
            bones.push(RigBone::new(format!("{prefix}{rig_side}ForeArm"), arm_at));
            bones.push(RigBone::new(format!("{prefix}{rig_side}Hand"), arm_at + 1));
            let wrist_at = arm_at + 2;
            for finger in FINGER_NAMES
            {
                let mut parent = wrist_at;
                for segment in 1..=4
                {
                    bones.push(RigBone::new(format!("{prefix}{rig_side}Hand{finger}{segment}"), parent));
                    parent = (bones.len() - 1) as i16;
                }
            }
            let leg_at = bones.len() as i16;
            bones.push(RigBone::new(format!("{prefix}{rig_side}UpLeg"), 0));
            bones.push(RigBone::new(format!("{prefix}{rig_side}Leg"), leg_at));
            bones.push(RigBone::new(format!("{prefix}{rig_side}Foot"), leg_at + 1));
            bones.push(RigBone::new(format!("{prefix}{rig_side}Toe_End"), leg_at + 2));
        }
        Rig::from_bones(bones)
    }

    #[test]
    fn binds_both_conventions()
    {
        for (rig, convention) in [
            (humanoid("mixamorig"), NamingConvention::mixamo()),
            (humanoid(""), NamingConvention::Plain),
        ]
        {
            let binding = SkeletonBinding::bind(&rig, &convention).unwrap();
            for side in Side::BOTH
            {
                assert!(binding.arm(side).is_some());
                assert!(binding.leg(side).is_some());
                let hand = binding.hand(side).unwrap();
                assert_eq!(hand.bound_count(), HAND_BONE_COUNT);
            }
            assert_eq!(binding.leg_reset_bones().len(), 6);
        }
    }

    #[test]
    fn mirrored_roles()
    {
        let rig = humanoid("");
        let binding = SkeletonBinding::bind(&rig, &NamingConvention::Plain).unwrap();
        let left = binding.arm(Side::Left).unwrap();
        assert_eq!(rig.bone(left.shoulder).name.as_str(), "RightArm");
        let right = binding.arm(Side::Right).unwrap();
        assert_eq!(rig.bone(right.shoulder).name.as_str(), "LeftArm");
    }

    #[test]
    fn missing_root_is_fatal()
    {
        let rig = Rig::from_bones(vec![RigBone::new("Spine", -1)]);
        assert!(matches!(
            SkeletonBinding::bind(&rig, &NamingConvention::Plain),
            Err(BindingError::MissingRequiredBone(name)) if name == "Hips"));
    }

    #[test]
    fn partial_rig_degrades_to_unbound_chains()
    {
        // torso only: arms/legs/hands must be None, binding still succeeds
        let rig = Rig::from_bones(vec![
            RigBone::new("Hips", -1),
            RigBone::new("Spine", 0),
            RigBone::new("Head", 1),
        ]);
        let binding = SkeletonBinding::bind(&rig, &NamingConvention::Plain).unwrap();
        for side in Side::BOTH
        {
            assert!(binding.arm(side).is_none());
            assert!(binding.leg(side).is_none());
            assert!(binding.hand(side).is_none());
        }
        assert!(binding.leg_reset_bones().is_empty());
    }

    #[test]
    fn hand_tolerates_missing_segments()
    {
        let mut rig = humanoid("");
        // a rig variant without pinky bones still binds the hand
        let bones: Vec<RigBone> = (0..rig.len())
            .map(|i| rig.bone(BoneIndex(i as u16)).clone())
            .filter(|b| !b.name.contains("Pinky"))
            .collect();
        // re-index parents by name since filtering shifts indices
        let mut rebuilt: Vec<RigBone> = Vec::with_capacity(bones.len());
        for bone in &bones
        {
            let parent = if bone.parent < 0 { -1 } else
            {
                let parent_name = rig.bone(BoneIndex(bone.parent as u16)).name.clone();
                rebuilt.iter().position(|b| b.name == parent_name).map_or(-1, |i| i as i16)
            };
            rebuilt.push(RigBone { name: bone.name.clone(), parent, rotation: bone.rotation });
        }
        rig = Rig::from_bones(rebuilt);

        let binding = SkeletonBinding::bind(&rig, &NamingConvention::Plain).unwrap();
        let hand = binding.hand(Side::Left).unwrap();
        assert_eq!(hand.bound_count(), HAND_BONE_COUNT - 4);
        assert!(hand.bone(crate::landmarks::hand_topo::PINKY_BASE).is_none());
        assert!(hand.bone(crate::landmarks::hand_topo::INDEX_BASE).is_some());
    }
}
