#![allow(dead_code)]

use glam::Vec3;
use puppet_mirra::animator::Avatar;
use puppet_mirra::binding::NamingConvention;
use puppet_mirra::config::AnimatorConfig;
use puppet_mirra::landmarks::{LandmarkFrame, LandmarkPoint, body_topo as bt, face_topo as ft};
use puppet_mirra::rig::{Rig, RigBone};

const FINGER_NAMES: [&str; 5] = ["Thumb", "Index", "Middle", "Ring", "Pinky"];

// Full mixamo-shaped humanoid rig, parent-before-child
pub fn humanoid_rig(prefix: &str) -> Rig
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

pub fn mixamo_avatar() -> Avatar
{
    Avatar::new(
        humanoid_rig("mixamorig"),
        &NamingConvention::mixamo(),
        standard_morph_names(),
        AnimatorConfig::default())
        .expect("full humanoid must bind")
}

pub fn plain_avatar() -> Avatar
{
    Avatar::new(
        humanoid_rig(""),
        &NamingConvention::Plain,
        standard_morph_names(),
        AnimatorConfig::default())
        .expect("full humanoid must bind")
}

pub fn standard_morph_names() -> Vec<String>
{
    ["MouthOpen", "Blink_Left", "Blink_Right", "BrowsDown_Left", "BrowsDown_Right"]
        .map(String::from)
        .to_vec()
}

// Camera-space T-pose with bent knees, every point at the given confidence
pub fn posed_body(visibility: f32) -> Vec<LandmarkPoint>
{
    let mut body = vec![LandmarkPoint::with_visibility(0.0, 0.0, 0.0, visibility); bt::POINT_COUNT];
    let mut set = |index: usize, x: f32, y: f32, z: f32|
    {
        body[index] = LandmarkPoint::with_visibility(x, y, z, visibility);
    };
    // detector camera space: y grows downward, negated at ingestion
    set(bt::LEFT_SHOULDER, 0.2, -1.4, 0.0);
    set(bt::RIGHT_SHOULDER, -0.2, -1.4, 0.0);
    set(bt::LEFT_ELBOW, 0.5, -1.4, 0.0);
    set(bt::LEFT_WRIST, 0.8, -1.4, 0.0);
    set(bt::LEFT_PINKY, 0.9, -1.4, 0.0);
    set(bt::LEFT_INDEX, 0.9, -1.4, 0.0);
    set(bt::RIGHT_ELBOW, -0.5, -1.4, 0.0);
    set(bt::RIGHT_WRIST, -0.8, -1.4, 0.0);
    set(bt::RIGHT_PINKY, -0.9, -1.4, 0.0);
    set(bt::RIGHT_INDEX, -0.9, -1.4, 0.0);
    set(bt::LEFT_HIP, 0.15, -1.0, 0.0);
    set(bt::RIGHT_HIP, -0.15, -1.0, 0.0);
    // knees pushed forward so a passing gate visibly rotates the legs
    set(bt::LEFT_KNEE, 0.15, -0.55, -0.25);
    set(bt::RIGHT_KNEE, -0.15, -0.55, -0.25);
    set(bt::LEFT_ANKLE, 0.15, -0.1, 0.0);
    set(bt::RIGHT_ANKLE, -0.15, -0.1, 0.0);
    set(bt::LEFT_FOOT, 0.15, 0.0, -0.15);
    set(bt::RIGHT_FOOT, -0.15, 0.0, -0.15);
    body
}

pub fn posed_frame(body_visibility: f32) -> LandmarkFrame
{
    LandmarkFrame::body_only(posed_body(body_visibility)).expect("full-size body")
}

pub fn split_visibility_frame(shoulder_vis: f32, hip_vis: f32) -> LandmarkFrame
{
    let mut body = posed_body(shoulder_vis);
    for index in [bt::LEFT_HIP, bt::RIGHT_HIP]
    {
        body[index].visibility = Some(hip_vis);
    }
    LandmarkFrame::body_only(body).expect("full-size body")
}

// Face in the x/y plane, nose toward the camera, with a controllable mouth
// gap ratio (span-normalized)
pub fn synthetic_face(mouth_gap: f32) -> Vec<LandmarkPoint>
{
    let mut points = vec![LandmarkPoint::default(); ft::POINT_COUNT];
    let mut set = |index: usize, p: Vec3|
    {
        points[index] = LandmarkPoint::new(p.x, p.y, p.z);
    };
    set(ft::LEFT_EDGE, Vec3::new(-0.5, 0.0, 0.0));
    set(ft::RIGHT_EDGE, Vec3::new(0.5, 0.0, 0.0));
    set(ft::TOP, Vec3::new(0.0, -0.5, 0.0));
    set(ft::BOTTOM, Vec3::new(0.0, 0.5, 0.0));
    set(ft::NOSE, Vec3::new(0.0, 0.0, -0.3));
    set(ft::NASAL_BRIDGE, Vec3::new(0.0, -0.1, -0.3));
    set(ft::MOUTH_TOP, Vec3::ZERO);
    set(ft::MOUTH_BOTTOM, Vec3::new(0.0, mouth_gap, 0.0));
    points
}

pub fn face_frame(mouth_gap: f32) -> LandmarkFrame
{
    LandmarkFrame::new(
        posed_body(0.95),
        None,
        None,
        None,
        Some(synthetic_face(mouth_gap)))
        .expect("full-size frame")
}
