use glam::Quat;

#[inline] #[must_use]
pub fn lerp(from: f32, to: f32, rel: f32) -> f32
{
    ((1.0 - rel) * from) + (rel * to)
}

#[inline] #[must_use]
pub fn inv_lerp(from: f32, to: f32, value: f32) -> f32
{
    (value - from) / (to - from)
}

#[inline] #[must_use]
pub fn remap(orig_from: f32, orig_to: f32, target_from: f32, target_to: f32, value: f32) -> f32
{
    let rel = inv_lerp(orig_from, orig_to, value);
    lerp(target_from, target_to, rel)
}

// Where value sits between from and to, clamped into [0, 1].
// from > to is allowed and inverts the ramp.
#[inline] #[must_use]
pub fn unit_ratio(from: f32, to: f32, value: f32) -> f32
{
    inv_lerp(from, to, value).clamp(0.0, 1.0)
}

// One EMA step: s' = s + (target - s) * alpha
#[inline] #[must_use]
pub fn smooth_f32(smoothed: f32, target: f32, alpha: f32) -> f32
{
    smoothed + (target - smoothed) * alpha
}

// Spherical EMA step; slerp already walks the shortest arc, so successive
// steps approach the target monotonically without sign flips
#[inline] #[must_use]
pub fn smooth_quat(smoothed: Quat, target: Quat, alpha: f32) -> Quat
{
    smoothed.slerp(target, alpha).normalize()
}

#[cfg(test)]
mod tests
{
    use approx::{assert_abs_diff_eq, assert_ulps_eq};
    use super::*;

    #[test]
    fn lerp_endpoints()
    {
        assert_ulps_eq!(lerp(2.0, 6.0, 0.0), 2.0);
        assert_ulps_eq!(lerp(2.0, 6.0, 1.0), 6.0);
        assert_ulps_eq!(inv_lerp(2.0, 6.0, 4.0), 0.5);
        assert_ulps_eq!(remap(0.0, 1.0, 10.0, 20.0, 0.25), 12.5);
    }

    #[test]
    fn unit_ratio_clamps_and_inverts()
    {
        assert_ulps_eq!(unit_ratio(0.01, 0.15, 0.10), (0.10 - 0.01) / (0.15 - 0.01));
        assert_ulps_eq!(unit_ratio(0.0, 1.0, -5.0), 0.0);
        assert_ulps_eq!(unit_ratio(0.0, 1.0, 5.0), 1.0);
        // inverted ramp: smaller values map higher
        assert_ulps_eq!(unit_ratio(0.1, 0.09, 0.09), 1.0);
        assert_ulps_eq!(unit_ratio(0.1, 0.09, 0.1), 0.0);
    }

    #[test]
    fn ema_converges_monotonically()
    {
        let mut s = 0.0;
        let mut last_gap = 1.0_f32;
        for _ in 0..32
        {
            s = smooth_f32(s, 1.0, 0.25);
            let gap = (1.0 - s).abs();
            assert!(gap < last_gap, "EMA must approach the target without overshoot");
            last_gap = gap;
        }
        assert!(last_gap < 1e-3);
    }

    #[test]
    fn quat_ema_fixed_point()
    {
        let target = Quat::from_rotation_y(0.4);
        let smoothed = smooth_quat(target, target, 0.25);
        assert_abs_diff_eq!(smoothed.x, target.x, epsilon = 1e-6);
        assert_abs_diff_eq!(smoothed.y, target.y, epsilon = 1e-6);
        assert_abs_diff_eq!(smoothed.z, target.z, epsilon = 1e-6);
        assert_abs_diff_eq!(smoothed.w, target.w, epsilon = 1e-6);
    }

    #[test]
    fn quat_ema_converges()
    {
        let target = Quat::from_rotation_x(2.0); // well past 90 degrees
        let mut s = Quat::IDENTITY;
        for _ in 0..48
        {
            s = smooth_quat(s, target, 0.25);
        }
        assert!(s.angle_between(target) < 1e-3);
    }
}
