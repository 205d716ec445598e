use bitcode::{Decode, Encode};
use glam::{Quat, Vec3};
use unicase::UniCase;

#[derive(Debug, Copy, Clone, PartialEq, Eq, Hash, Encode, Decode)]
pub struct BoneIndex(pub u16);

#[derive(Debug, Clone, Encode, Decode)]
pub struct RigBone
{
    pub name: String,
    pub parent: i16, // -1 for the root
    pub rotation: Quat,
}
impl RigBone
{
    #[must_use]
    pub fn new(name: impl Into<String>, parent: i16) -> Self
    {
        Self { name: name.into(), parent, rotation: Quat::IDENTITY }
    }
}

// Flat bone arena in parent-before-child order. Built once by the
// (out of scope) rig loader; read-only afterward except for rotation and
// root-offset mutation by the animation pipeline.
#[derive(Debug, Clone, Encode, Decode)]
pub struct Rig
{
    bones: Box<[RigBone]>,
    // root-level translation (vertical tracking), written by the pipeline
    pub root_offset: Vec3,
}
impl Rig
{
    #[must_use]
    pub fn from_bones(bones: Vec<RigBone>) -> Self
    {
        debug_assert!(bones.len() <= u16::MAX as usize);
        debug_assert!(bones.iter().enumerate().all(|(i, b)| b.parent < i as i16),
            "bones must be ordered parent-before-child");

        Self { bones: bones.into_boxed_slice(), root_offset: Vec3::ZERO }
    }

    #[inline] #[must_use]
    pub fn len(&self) -> usize { self.bones.len() }
    #[inline] #[must_use]
    pub fn is_empty(&self) -> bool { self.bones.is_empty() }

    #[must_use]
    pub fn find(&self, name: &str) -> Option<BoneIndex>
    {
        let name = UniCase::new(name);
        self.bones.iter()
            .position(|b| UniCase::new(b.name.as_str()) == name)
            .map(|i| BoneIndex(i as u16))
    }

    #[inline] #[must_use]
    pub fn bone(&self, index: BoneIndex) -> &RigBone { &self.bones[index.0 as usize] }

    #[inline] #[must_use]
    pub fn rotation(&self, index: BoneIndex) -> Quat { self.bones[index.0 as usize].rotation }

    #[inline]
    pub fn set_rotation(&mut self, index: BoneIndex, rotation: Quat)
    {
        self.bones[index.0 as usize].rotation = rotation;
    }

    // Walks parent links; a bone does not descend from itself
    #[must_use]
    pub fn is_descendant_of(&self, bone: BoneIndex, ancestor: BoneIndex) -> bool
    {
        let mut parent = self.bone(bone).parent;
        while parent >= 0
        {
            if parent as u16 == ancestor.0 { return true; }
            parent = self.bones[parent as usize].parent;
        }
        false
    }
}
