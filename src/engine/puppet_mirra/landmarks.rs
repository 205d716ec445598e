use std::error::Error;
use std::fmt::{Debug, Display, Formatter};

use bitcode::{Decode, Encode};
use glam::Vec3;

// Fixed detector topology indices (MediaPipe-style holistic output).
// These are contracts with the upstream detector, not tunables.
pub mod body_topo
{
    pub const POINT_COUNT: usize = 33;

    pub const LEFT_SHOULDER: usize = 11;
    pub const RIGHT_SHOULDER: usize = 12;
    pub const LEFT_ELBOW: usize = 13;
    pub const RIGHT_ELBOW: usize = 14;
    pub const LEFT_WRIST: usize = 15;
    pub const RIGHT_WRIST: usize = 16;
    pub const LEFT_PINKY: usize = 17;
    pub const RIGHT_PINKY: usize = 18;
    pub const LEFT_INDEX: usize = 19;
    pub const RIGHT_INDEX: usize = 20;
    pub const LEFT_HIP: usize = 23;
    pub const RIGHT_HIP: usize = 24;
    pub const LEFT_KNEE: usize = 25;
    pub const RIGHT_KNEE: usize = 26;
    pub const LEFT_ANKLE: usize = 27;
    pub const RIGHT_ANKLE: usize = 28;
    pub const LEFT_FOOT: usize = 31;
    pub const RIGHT_FOOT: usize = 32;
}

pub mod hand_topo
{
    pub const POINT_COUNT: usize = 21;

    pub const WRIST: usize = 0;
    pub const THUMB_BASE: usize = 1;
    pub const INDEX_BASE: usize = 5;
    pub const MIDDLE_BASE: usize = 9;
    pub const RING_BASE: usize = 13;
    pub const PINKY_BASE: usize = 17;

    pub const FINGER_BASES: [usize; 5] =
        [THUMB_BASE, INDEX_BASE, MIDDLE_BASE, RING_BASE, PINKY_BASE];
    // bendable segments per finger; the 4th point past the base is the tip
    pub const SEGMENTS_PER_FINGER: usize = 3;
}

pub mod face_topo
{
    pub const POINT_COUNT: usize = 468;

    pub const NOSE: usize = 1;
    pub const NASAL_BRIDGE: usize = 4;
    pub const LEFT_EDGE: usize = 454;
    pub const RIGHT_EDGE: usize = 234;
    pub const TOP: usize = 10;
    pub const BOTTOM: usize = 152;

    pub const RIGHT_EYE_TOP: usize = 27;
    pub const RIGHT_EYE_BOTTOM: usize = 23;
    pub const LEFT_EYE_TOP: usize = 257;
    pub const LEFT_EYE_BOTTOM: usize = 253;
    pub const RIGHT_BROW: usize = 66;
    pub const LEFT_BROW: usize = 296;
    pub const MOUTH_TOP: usize = 13;
    pub const MOUTH_BOTTOM: usize = 14;
    pub const MOUTH_LEFT: usize = 308;
    pub const MOUTH_RIGHT: usize = 78;
    pub const NOSE_RIGHT: usize = 129;
    pub const NOSE_LEFT: usize = 358;
}

#[derive(Debug, Default, Copy, Clone, PartialEq, Encode, Decode)]
pub struct LandmarkPoint
{
    pub position: Vec3,
    pub visibility: Option<f32>,
}
impl LandmarkPoint
{
    #[inline] #[must_use]
    pub fn new(x: f32, y: f32, z: f32) -> Self
    {
        Self { position: Vec3::new(x, y, z), visibility: None }
    }

    #[inline] #[must_use]
    pub fn with_visibility(x: f32, y: f32, z: f32, visibility: f32) -> Self
    {
        Self { position: Vec3::new(x, y, z), visibility: Some(visibility) }
    }

    // Missing confidence reads as "not visible"
    #[inline] #[must_use]
    pub fn visibility(&self) -> f32 { self.visibility.unwrap_or(0.0) }
}

#[derive(Debug)]
pub enum FrameError
{
    TruncatedBody { got: usize },
    TruncatedHand { got: usize },
    TruncatedFace { got: usize },
}
impl Display for FrameError
{
    fn fmt(&self, f: &mut Formatter<'_>) -> std::fmt::Result { Debug::fmt(self, f) }
}
impl Error for FrameError { }

// One tick's worth of detector output, validated at ingestion and replaced
// wholesale every tick. `body` carries detector world-space points;
// `body_screen` optionally carries the screen-normalized duplicates some
// detectors emit alongside (used for root positioning only).
#[derive(Debug, Clone, Encode, Decode)]
pub struct LandmarkFrame
{
    pub body: Box<[LandmarkPoint]>,
    pub body_screen: Option<Box<[LandmarkPoint]>>,
    pub left_hand: Option<Box<[LandmarkPoint]>>,
    pub right_hand: Option<Box<[LandmarkPoint]>>,
    pub face: Option<Box<[LandmarkPoint]>>,
}
impl LandmarkFrame
{
    pub fn new(
        body: Vec<LandmarkPoint>,
        body_screen: Option<Vec<LandmarkPoint>>,
        left_hand: Option<Vec<LandmarkPoint>>,
        right_hand: Option<Vec<LandmarkPoint>>,
        face: Option<Vec<LandmarkPoint>>) -> Result<Self, FrameError>
    {
        if body.len() < body_topo::POINT_COUNT
        {
            return Err(FrameError::TruncatedBody { got: body.len() });
        }
        if let Some(screen) = &body_screen
        {
            if screen.len() < body_topo::POINT_COUNT
            {
                return Err(FrameError::TruncatedBody { got: screen.len() });
            }
        }
        for hand in [&left_hand, &right_hand].into_iter().flatten()
        {
            if hand.len() < hand_topo::POINT_COUNT
            {
                return Err(FrameError::TruncatedHand { got: hand.len() });
            }
        }
        if let Some(face) = &face
        {
            if face.len() < face_topo::POINT_COUNT
            {
                return Err(FrameError::TruncatedFace { got: face.len() });
            }
        }

        Ok(Self
        {
            body: body.into_boxed_slice(),
            body_screen: body_screen.map(Vec::into_boxed_slice),
            left_hand: left_hand.map(Vec::into_boxed_slice),
            right_hand: right_hand.map(Vec::into_boxed_slice),
            face: face.map(Vec::into_boxed_slice),
        })
    }

    pub fn body_only(body: Vec<LandmarkPoint>) -> Result<Self, FrameError>
    {
        Self::new(body, None, None, None, None)
    }

    #[inline] #[must_use]
    pub fn visibility_of(&self, index: usize) -> f32
    {
        self.body.get(index).map_or(0.0, LandmarkPoint::visibility)
    }
}
