use glam::{Quat, Vec3};
use math_mirra::{Angle, Basis};

// Limb bones rest pointing along +y of their local frame in bind pose
pub const LIMB_REST_DIR: Vec3 = Vec3::Y;
// Legs hang down the hip frame
pub const LEG_REST_DIR: Vec3 = Vec3::NEG_Y;

// How much more each finger segment bends than the one before it
pub const CURL_TIP_GAIN: f32 = 0.5;

#[inline]
fn acos_clamped(v: f32) -> f32
{
    v.clamp(-1.0, 1.0).acos()
}

// Direct alignment: express the observed limb direction in the joint's local
// frame (full inverse -- the frame is only approximately orthonormal) and
// return the rotation taking the rest reference onto it. Anti-parallel input
// is a known singularity; from_rotation_arc resolves it with an arbitrary
// perpendicular axis rather than failing.
#[must_use]
pub fn align_to_direction(basis: &Basis, world_dir: Vec3, reference: Vec3) -> Quat
{
    let local = basis.world_to_local(world_dir).normalize_or_zero();
    if local == Vec3::ZERO
    {
        return Quat::IDENTITY;
    }
    Quat::from_rotation_arc(reference, local).normalize()
}

// Projected-axis extraction: per-axis angle offsets of the observed direction
// relative to a rest direction, both expressed in the given frame. For axes
// perpendicular to the rest direction this reduces to acos(dot) - pi/2; the
// rest-relative form makes the triple exactly zero when dir lands on rest.
#[must_use]
pub fn projected_offsets(basis: &Basis, world_dir: Vec3, local_rest: Vec3) -> Vec3
{
    let dir = basis.project(world_dir).normalize_or_zero();
    let rest = local_rest.normalize_or_zero();
    if dir == Vec3::ZERO || rest == Vec3::ZERO
    {
        return Vec3::ZERO;
    }
    Vec3::new(
        acos_clamped(dir.x) - acos_clamped(rest.x),
        acos_clamped(dir.y) - acos_clamped(rest.y),
        acos_clamped(dir.z) - acos_clamped(rest.z))
}

// Torso lean/twist straight off the shoulder frame axes
#[must_use]
pub fn torso_offsets(basis: &Basis) -> Vec3
{
    Vec3::new(
        acos_clamped(basis.z.y) - std::f32::consts::FRAC_PI_2,
        -acos_clamped(basis.z.x) + std::f32::consts::FRAC_PI_2,
        acos_clamped(basis.y.x) - std::f32::consts::FRAC_PI_2)
}

// Whole-body yaw from the hip frame
#[must_use]
pub fn hip_yaw(basis: &Basis) -> f32
{
    -acos_clamped(basis.z.x) + std::f32::consts::FRAC_PI_2
}

// Slight downward bias keeps the avatar's gaze level with the camera
pub const GAZE_PITCH_BIAS: f32 = -0.1 * std::f32::consts::PI;

// Head orientation from the face plane's normal (z) and in-plane up (y)
#[must_use]
pub fn gaze_offsets(plane_z: Vec3, plane_y: Vec3) -> Vec3
{
    Vec3::new(
        -(acos_clamped(plane_z.y) - std::f32::consts::FRAC_PI_2) + GAZE_PITCH_BIAS,
        acos_clamped(plane_z.x) - std::f32::consts::FRAC_PI_2,
        -(acos_clamped(plane_y.x) - std::f32::consts::FRAC_PI_2))
}

// Simplified curl model: one bend angle per finger, taken between the finger
// direction and the palm direction; no per-segment IK
#[must_use]
pub fn finger_curl(finger_dir: Vec3, palm_dir: Vec3) -> Angle
{
    let finger = finger_dir.normalize_or_zero();
    let palm = palm_dir.normalize_or_zero();
    if finger == Vec3::ZERO || palm == Vec3::ZERO
    {
        return Angle::ZERO;
    }
    Angle::from_radians(finger.angle_between(palm))
}

// Bend for the `segment`-th joint from the finger base; joints nearer the
// fingertip bend proportionally more, each clamped to [0, 90] degrees
#[must_use]
pub fn segment_bend(curl: Angle, segment: usize) -> Angle
{
    (curl * (1.0 + CURL_TIP_GAIN * segment as f32)).clamp(Angle::ZERO, Angle::PI_OVER_TWO)
}

#[cfg(test)]
mod tests
{
    use approx::{assert_abs_diff_eq, assert_ulps_eq};
    use std::f32::consts::FRAC_PI_2;
    use super::*;

    #[test]
    fn aligned_input_returns_identity()
    {
        let rot = align_to_direction(&Basis::IDENTITY, Vec3::Y, LIMB_REST_DIR);
        assert_abs_diff_eq!(rot.x, 0.0, epsilon = 1e-6);
        assert_abs_diff_eq!(rot.y, 0.0, epsilon = 1e-6);
        assert_abs_diff_eq!(rot.z, 0.0, epsilon = 1e-6);
        assert_abs_diff_eq!(rot.w.abs(), 1.0, epsilon = 1e-6);
    }

    #[test]
    fn antiparallel_input_is_a_half_turn()
    {
        let rot = align_to_direction(&Basis::IDENTITY, -Vec3::Y, LIMB_REST_DIR);
        assert!(!rot.is_nan());
        // half turn about some perpendicular axis
        assert_abs_diff_eq!((rot * LIMB_REST_DIR).y, -1.0, epsilon = 1e-5);
    }

    #[test]
    fn zero_direction_returns_identity()
    {
        let rot = align_to_direction(&Basis::IDENTITY, Vec3::ZERO, LIMB_REST_DIR);
        assert_eq!(rot, Quat::IDENTITY);
    }

    #[test]
    fn alignment_respects_the_frame()
    {
        // frame rotated a quarter turn about z: world +x is local -y...
        let basis = Basis::IDENTITY.rotated(Quat::from_rotation_z(FRAC_PI_2));
        let rot = align_to_direction(&basis, basis.y, LIMB_REST_DIR);
        // ...so a direction along the frame's own y solves to identity
        assert_abs_diff_eq!((rot * LIMB_REST_DIR - LIMB_REST_DIR).length(), 0.0, epsilon = 1e-5);
    }

    #[test]
    fn projected_offsets_zero_at_rest()
    {
        let offsets = projected_offsets(&Basis::IDENTITY, Vec3::NEG_Y, LEG_REST_DIR);
        assert_abs_diff_eq!(offsets, Vec3::ZERO, epsilon = 1e-6);
    }

    #[test]
    fn projected_offsets_match_quarter_offset_form()
    {
        // for axes perpendicular to rest, the offset is acos(dot) - pi/2
        let dir = Vec3::new(0.5, -1.0, 0.0).normalize();
        let offsets = projected_offsets(&Basis::IDENTITY, dir, LEG_REST_DIR);
        assert_ulps_eq!(offsets.x, dir.x.acos() - FRAC_PI_2, epsilon = 1e-6);
        assert_ulps_eq!(offsets.z, dir.z.acos() - FRAC_PI_2, epsilon = 1e-6);
    }

    #[test]
    fn projected_offsets_survive_zero_input()
    {
        let offsets = projected_offsets(&Basis::IDENTITY, Vec3::ZERO, LEG_REST_DIR);
        assert_eq!(offsets, Vec3::ZERO);
        assert!(!offsets.is_nan());
    }

    #[test]
    fn level_torso_has_no_offsets()
    {
        assert_abs_diff_eq!(torso_offsets(&Basis::IDENTITY), Vec3::ZERO, epsilon = 1e-6);
        assert_ulps_eq!(hip_yaw(&Basis::IDENTITY), 0.0);
    }

    #[test]
    fn curl_flat_finger_is_zero()
    {
        let palm = Vec3::X;
        assert_ulps_eq!(finger_curl(Vec3::X, palm).to_radians(), 0.0);
        assert_ulps_eq!(finger_curl(-Vec3::X, palm).to_radians(), std::f32::consts::PI);
        assert_eq!(finger_curl(Vec3::ZERO, palm), Angle::ZERO);
    }

    #[test]
    fn curl_grows_toward_the_tip_and_clamps()
    {
        let curl = Angle::from_degrees(40.0);
        let bends: Vec<f32> = (0..3).map(|i| segment_bend(curl, i).to_degrees()).collect();
        assert_ulps_eq!(bends[0], 40.0);
        assert_ulps_eq!(bends[1], 60.0);
        assert_ulps_eq!(bends[2], 80.0);
        assert!(bends.windows(2).all(|w| w[0] <= w[1]));

        // saturates at 90 degrees
        assert_ulps_eq!(segment_bend(Angle::from_degrees(80.0), 2).to_degrees(), 90.0);
    }
}
