use glam::Vec3;
use math_mirra::Basis;

use crate::binding::Side;
use crate::landmarks::{LandmarkPoint, body_topo as bt, hand_topo as ht};

// Degenerate frames (zero-length difference vectors) fall back to the
// identity basis locally instead of propagating NaN downstream
fn basis_or_identity(basis: Option<Basis>, what: &'static str) -> Basis
{
    basis.unwrap_or_else(||
    {
        log::debug!("degenerate {what} basis; holding the identity frame");
        Basis::IDENTITY
    })
}

// Detector world landmarks arrive in camera space; flip into avatar space
#[must_use]
pub fn body_joints(points: &[LandmarkPoint]) -> Vec<Vec3>
{
    points.iter().map(|p| -p.position).collect()
}

// Hand landmarks are screen-normalized: undo the aspect anisotropy and flip
// y so up is up
#[must_use]
pub fn hand_joints(points: &[LandmarkPoint], aspect: f32) -> Vec<Vec3>
{
    points.iter()
        .map(|p| Vec3::new(p.position.x * aspect, -p.position.y, p.position.z * aspect))
        .collect()
}

// Face landmarks keep the detector's y direction (the morph ramp constants
// were tuned in that space); only the aspect is undone
#[must_use]
pub fn face_points(points: &[LandmarkPoint], aspect: f32) -> Vec<Vec3>
{
    points.iter()
        .map(|p| Vec3::new(p.position.x * aspect, p.position.y, p.position.z * aspect))
        .collect()
}

// Shoulder-girdle frame: x across the shoulders, y along the shoulder
// midpoint direction (roughly spine-up; NOT re-orthogonalized against x),
// z completing out of the chest
#[must_use]
pub fn shoulder_basis(joints: &[Vec3]) -> Basis
{
    let x = joints[bt::RIGHT_SHOULDER] - joints[bt::LEFT_SHOULDER];
    let y = joints[bt::RIGHT_SHOULDER].lerp(joints[bt::LEFT_SHOULDER], 0.5);
    basis_or_identity(Basis::from_xy(x, y), "shoulder")
}

// Hip frame; y borrows the shoulder midpoint direction because the hip
// landmarks alone cannot disambiguate forward/back tilt
#[must_use]
pub fn hip_basis(joints: &[Vec3]) -> Basis
{
    let x = joints[bt::RIGHT_HIP] - joints[bt::LEFT_HIP];
    let y = joints[bt::RIGHT_SHOULDER].lerp(joints[bt::LEFT_SHOULDER], 0.5);
    basis_or_identity(Basis::from_xy(x, y), "hip")
}

// Hand frame: x from the middle-finger base toward the wrist, z across the
// knuckles, y completing; both x and y mirror between hands
#[must_use]
pub fn hand_basis(joints: &[Vec3], side: Side) -> Basis
{
    let mut x = joints[ht::WRIST] - joints[ht::MIDDLE_BASE];
    if side == Side::Right
    {
        x = -x;
    }
    let z = joints[ht::INDEX_BASE] - joints[ht::RING_BASE];
    let basis = basis_or_identity(Basis::from_xz(x, z), "hand");
    match side
    {
        Side::Left => basis.flipped_y(),
        Side::Right => basis,
    }
}

#[cfg(test)]
mod tests
{
    use approx::assert_abs_diff_eq;
    use crate::landmarks::body_topo;
    use super::*;

    fn body_with_shoulders_and_hips() -> Vec<Vec3>
    {
        let mut joints = vec![Vec3::ZERO; body_topo::POINT_COUNT];
        // already in avatar space (post-flip): y up
        joints[bt::LEFT_SHOULDER] = Vec3::new(-0.2, 1.4, 0.0);
        joints[bt::RIGHT_SHOULDER] = Vec3::new(0.2, 1.4, 0.0);
        joints[bt::LEFT_HIP] = Vec3::new(-0.15, 1.0, 0.0);
        joints[bt::RIGHT_HIP] = Vec3::new(0.15, 1.0, 0.0);
        joints
    }

    #[test]
    fn shoulder_frame_axes()
    {
        let basis = shoulder_basis(&body_with_shoulders_and_hips());
        assert_abs_diff_eq!(basis.x, Vec3::X, epsilon = 1e-6);
        assert_abs_diff_eq!(basis.y, Vec3::Y, epsilon = 1e-6);
        assert_abs_diff_eq!(basis.z, Vec3::Z, epsilon = 1e-6);
    }

    #[test]
    fn hip_frame_borrows_shoulder_up()
    {
        let mut joints = body_with_shoulders_and_hips();
        // lean the shoulder midpoint; the hip frame's y must follow it
        joints[bt::LEFT_SHOULDER] = Vec3::new(-0.2, 1.4, 0.4);
        joints[bt::RIGHT_SHOULDER] = Vec3::new(0.2, 1.4, 0.4);
        let basis = hip_basis(&joints);
        let expected_y = Vec3::new(0.0, 1.4, 0.4).normalize();
        assert_abs_diff_eq!(basis.y, expected_y, epsilon = 1e-6);
        assert_abs_diff_eq!(basis.x, Vec3::X, epsilon = 1e-6);
    }

    #[test]
    fn coincident_shoulders_fall_back_to_identity()
    {
        let mut joints = body_with_shoulders_and_hips();
        joints[bt::RIGHT_SHOULDER] = joints[bt::LEFT_SHOULDER];
        let basis = shoulder_basis(&joints);
        assert_eq!(basis, Basis::IDENTITY);
        assert!(!basis.x.is_nan() && !basis.y.is_nan() && !basis.z.is_nan());
    }

    #[test]
    fn hand_frames_mirror()
    {
        let mut joints = vec![Vec3::ZERO; ht::POINT_COUNT];
        joints[ht::WRIST] = Vec3::new(0.0, -0.5, 0.0);
        joints[ht::MIDDLE_BASE] = Vec3::new(0.0, 0.5, 0.0);
        joints[ht::INDEX_BASE] = Vec3::new(0.3, 0.4, 0.0);
        joints[ht::RING_BASE] = Vec3::new(-0.3, 0.4, 0.0);

        let left = hand_basis(&joints, Side::Left);
        let right = hand_basis(&joints, Side::Right);
        assert_abs_diff_eq!(left.x, -right.x, epsilon = 1e-6);
        assert_abs_diff_eq!(left.z, right.z, epsilon = 1e-6);
        assert_abs_diff_eq!(left.y, right.y, epsilon = 1e-6);
    }
}
