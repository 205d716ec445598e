use std::collections::HashMap;

use glam::{Vec2, Vec3};
use math_mirra::{smooth_f32, unit_ratio};

use crate::landmarks::face_topo as ft;

// Weight ramps (feature value at weight 0, at weight 1); tuned against a
// 16:9 capture. Several ramps are deliberately inverted (min > max).
const EYES_WIDE: (f32, f32) = (0.1, 0.12);
const SQUINT: (f32, f32) = (0.1, 0.095);
const BLINK: (f32, f32) = (0.1, 0.09);
const BROWS_UP: (f32, f32) = (0.35, 0.4);
const BROWS_DOWN: (f32, f32) = (0.35, 0.33);
const MOUTH_OPEN: (f32, f32) = (0.01, 0.15);
const MIDMOUTH: (f32, f32) = (-0.15, -0.11);
const FROWN: (f32, f32) = (-0.22, -0.25);
const SMILE: (f32, f32) = (-0.22, -0.18);
const NOSE_SCRUNCH: (f32, f32) = (-0.027, -0.018);

const MIN_FACE_SPAN: f32 = 1e-5;

// The mesh's blendshape channels: a name->index dictionary and the weight
// vector the renderer reads. Weights only move through the smoothing law.
#[derive(Debug, Clone)]
pub struct MorphTargets
{
    indices: HashMap<Box<str>, usize>,
    weights: Vec<f32>,
}
impl MorphTargets
{
    #[must_use]
    pub fn new<I>(names: I) -> Self
    where I: IntoIterator,
          I::Item: Into<Box<str>>
    {
        let indices: HashMap<Box<str>, usize> = names.into_iter()
            .enumerate()
            .map(|(i, name)| (name.into(), i))
            .collect();
        let weights = vec![0.0; indices.len()];
        Self { indices, weights }
    }

    #[inline] #[must_use]
    pub fn len(&self) -> usize { self.weights.len() }
    #[inline] #[must_use]
    pub fn is_empty(&self) -> bool { self.weights.is_empty() }

    #[must_use]
    pub fn weight(&self, name: &str) -> Option<f32>
    {
        self.indices.get(name).map(|&i| self.weights[i])
    }

    #[inline] #[must_use]
    pub fn weights(&self) -> &[f32] { &self.weights }

    // EMA-smoothed write, clamped into [0, 1]. A shape the mesh simply lacks
    // is a no-op, same as an unbound bone chain.
    pub fn write_smoothed(&mut self, name: &str, weight: f32, alpha: f32)
    {
        let Some(&index) = self.indices.get(name) else { return; };
        let w = &mut self.weights[index];
        *w = smooth_f32(*w, weight.clamp(0.0, 1.0), alpha).clamp(0.0, 1.0);
    }

    // Unsmoothed write for externally-tracked blendshape streams; false when
    // the mesh has no such shape
    pub fn write_raw(&mut self, name: &str, weight: f32) -> bool
    {
        let Some(&index) = self.indices.get(name) else { return false; };
        self.weights[index] = weight.clamp(0.0, 1.0);
        true
    }
}

// Mirror external blendshape names: camera input is mirrored, so a source
// `_L` shape feeds the avatar's right side and vice versa. None means the
// suffix convention is unknown.
#[must_use]
pub fn remap_blendshape_name(name: &str) -> Option<String>
{
    match name.rsplit_once('_')
    {
        None => Some(name.to_string()),
        Some((stem, "L")) => Some(format!("{stem}Right")),
        Some((stem, "R")) => Some(format!("{stem}Left")),
        Some(_) => None,
    }
}

// Feed an external blendshape stream through the suffix remap; unknown
// suffixes and shapes the mesh lacks are dropped with a diagnostic
pub fn apply_external_blendshapes<'n>(
    morphs: &mut MorphTargets,
    shapes: impl IntoIterator<Item = (&'n str, f32)>)
{
    for (name, weight) in shapes
    {
        let Some(mapped) = remap_blendshape_name(name) else
        {
            log::warn!("blendshape '{name}': unknown side suffix, dropping");
            continue;
        };
        if !morphs.write_raw(&mapped, weight)
        {
            log::warn!("blendshape '{name}' -> '{mapped}': no such morph target, dropping");
        }
    }
}

// Local 2D frame spanned across the face, used to make every feature a
// ratio of face spans rather than an absolute distance
#[derive(Debug, Copy, Clone)]
pub struct FacePlane
{
    origin: Vec3,
    x: Vec3,
    pub y: Vec3,
    pub z: Vec3,
    inv_width: f32,
    inv_height: f32,
}
impl FacePlane
{
    // None when the face spans collapse (degenerate input)
    #[must_use]
    pub fn from_points(points: &[Vec3]) -> Option<Self>
    {
        let left = points[ft::LEFT_EDGE];
        let right = points[ft::RIGHT_EDGE];
        let top = points[ft::TOP];
        let bottom = points[ft::BOTTOM];

        let width = right.distance(left);
        let height = bottom.distance(top);
        if width < MIN_FACE_SPAN || height < MIN_FACE_SPAN
        {
            return None;
        }

        let origin = points[ft::NOSE];
        let mid = left.lerp(right, 0.5);
        let z = (origin - mid).try_normalize()?;

        // nasal bridge projected onto the plane gives the in-plane up
        let v = points[ft::NASAL_BRIDGE] - origin;
        let y = (v - z * z.dot(v)).try_normalize()?;
        let x = -z.cross(y).try_normalize()?;

        Some(Self
        {
            origin,
            x,
            y,
            z,
            inv_width: 1.0 / width,
            inv_height: 1.0 / height,
        })
    }

    // Span-normalized in-plane coordinates of a face point
    #[must_use]
    pub fn local(&self, point: Vec3) -> Vec2
    {
        let v = point - self.origin;
        Vec2::new(self.x.dot(v) * self.inv_width, self.y.dot(v) * self.inv_height)
    }
}

// Face landmarks -> smoothed blendshape weights. Left/right shape names are
// already mirrored relative to the user (camera mirror).
pub fn drive_morphs(plane: &FacePlane, points: &[Vec3], morphs: &mut MorphTargets, alpha: f32)
{
    let eye_r_gap = plane.local(points[ft::RIGHT_EYE_TOP]).y - plane.local(points[ft::RIGHT_EYE_BOTTOM]).y;
    let eye_l_gap = plane.local(points[ft::LEFT_EYE_TOP]).y - plane.local(points[ft::LEFT_EYE_BOTTOM]).y;

    morphs.write_smoothed("EyesWide_Left", unit_ratio(EYES_WIDE.0, EYES_WIDE.1, eye_r_gap), alpha);
    morphs.write_smoothed("EyesWide_Right", unit_ratio(EYES_WIDE.0, EYES_WIDE.1, eye_l_gap), alpha);
    morphs.write_smoothed("Squint_Left", unit_ratio(SQUINT.0, SQUINT.1, eye_r_gap), alpha);
    morphs.write_smoothed("Squint_Right", unit_ratio(SQUINT.0, SQUINT.1, eye_l_gap), alpha);
    morphs.write_smoothed("Blink_Left", unit_ratio(BLINK.0, BLINK.1, eye_r_gap), alpha);
    morphs.write_smoothed("Blink_Right", unit_ratio(BLINK.0, BLINK.1, eye_l_gap), alpha);

    let brow_r = plane.local(points[ft::RIGHT_BROW]).y;
    let brow_l = plane.local(points[ft::LEFT_BROW]).y;
    morphs.write_smoothed("BrowsUp_Left", unit_ratio(BROWS_UP.0, BROWS_UP.1, brow_r), alpha);
    morphs.write_smoothed("BrowsUp_Right", unit_ratio(BROWS_UP.0, BROWS_UP.1, brow_l), alpha);
    morphs.write_smoothed("BrowsDown_Left", unit_ratio(BROWS_DOWN.0, BROWS_DOWN.1, brow_r), alpha);
    morphs.write_smoothed("BrowsDown_Right", unit_ratio(BROWS_DOWN.0, BROWS_DOWN.1, brow_l), alpha);

    let mouth_gap = plane.local(points[ft::MOUTH_TOP]).y - plane.local(points[ft::MOUTH_BOTTOM]).y;
    morphs.write_smoothed("MouthOpen", unit_ratio(MOUTH_OPEN.0, MOUTH_OPEN.1, mouth_gap), alpha);

    let mouth_r = plane.local(points[ft::MOUTH_RIGHT]);
    let mouth_l = plane.local(points[ft::MOUTH_LEFT]);
    morphs.write_smoothed("Midmouth_Right", unit_ratio(MIDMOUTH.0, MIDMOUTH.1, mouth_r.x), alpha);
    morphs.write_smoothed("Midmouth_Left", unit_ratio(-MIDMOUTH.0, -MIDMOUTH.1, mouth_l.x), alpha);
    morphs.write_smoothed("Frown_Left", unit_ratio(FROWN.0, FROWN.1, mouth_r.y), alpha);
    morphs.write_smoothed("Frown_Right", unit_ratio(FROWN.0, FROWN.1, mouth_l.y), alpha);
    morphs.write_smoothed("Smile_Left", unit_ratio(SMILE.0, SMILE.1, mouth_r.y), alpha);
    morphs.write_smoothed("Smile_Right", unit_ratio(SMILE.0, SMILE.1, mouth_l.y), alpha);

    let nose_r = plane.local(points[ft::NOSE_RIGHT]).y;
    let nose_l = plane.local(points[ft::NOSE_LEFT]).y;
    morphs.write_smoothed("NoseScrunch_Left", unit_ratio(NOSE_SCRUNCH.0, NOSE_SCRUNCH.1, nose_r), alpha);
    morphs.write_smoothed("NoseScrunch_Right", unit_ratio(NOSE_SCRUNCH.0, NOSE_SCRUNCH.1, nose_l), alpha);
}
