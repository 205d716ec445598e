#[cfg(test)]
mod cross_convention
{
    use approx::assert_abs_diff_eq;
    use glam::{EulerRot, Quat};
    use puppet_mirra::binding::Side;
    use puppet_mirra::retarget::Retargeter;
    use crate::common;

    // drive a mixamo-conventioned source, re-express it on a plain-named rig
    #[test]
    fn driven_pose_lands_on_the_target_left_arm()
    {
        let mut source = common::mixamo_avatar();
        let mut target = common::plain_avatar();
        for _ in 0..16
        {
            source.drive(&common::posed_frame(0.95));
        }

        source.retarget_onto(&Retargeter::standard(), &mut target);

        let src_arm = *source.binding().arm(Side::Left).unwrap();
        let dst_arm = *target.binding().arm(Side::Left).unwrap();

        let (sx, sy, sz) = source.rig.rotation(src_arm.shoulder).to_euler(EulerRot::XYZ);
        let (tx, ty, tz) = target.rig.rotation(dst_arm.shoulder).to_euler(EulerRot::XYZ);
        // left arm permutation: x <- z, y <- x, z <- -y (all within the clamp here)
        assert_abs_diff_eq!(tx, sz, epsilon = 1e-4);
        assert_abs_diff_eq!(ty, sx, epsilon = 1e-4);
        assert_abs_diff_eq!(tz, -sy, epsilon = 1e-4);
    }

    #[test]
    fn rerunning_without_source_changes_is_idempotent()
    {
        let mut source = common::mixamo_avatar();
        let mut target = common::plain_avatar();
        for _ in 0..8
        {
            source.drive(&common::posed_frame(0.95));
        }

        let retargeter = Retargeter::standard();
        source.retarget_onto(&retargeter, &mut target);
        let first: Vec<Quat> = (0..target.rig.len())
            .map(|i| target.rig.rotation(puppet_mirra::rig::BoneIndex(i as u16)))
            .collect();

        source.retarget_onto(&retargeter, &mut target);
        for (i, &expected) in first.iter().enumerate()
        {
            let index = puppet_mirra::rig::BoneIndex(i as u16);
            assert_eq!(target.rig.rotation(index), expected, "bone {i} drifted on rerun");
        }
    }

    // chains beyond the left arm are deliberately not mapped yet; the right
    // arm must come through untouched
    #[test]
    fn unmapped_chains_are_left_alone()
    {
        let mut source = common::mixamo_avatar();
        let mut target = common::plain_avatar();
        for _ in 0..8
        {
            source.drive(&common::posed_frame(0.95));
        }

        let right = *target.binding().arm(Side::Right).unwrap();
        let before = target.rig.rotation(right.shoulder);
        source.retarget_onto(&Retargeter::standard(), &mut target);
        assert_eq!(target.rig.rotation(right.shoulder), before);
    }
}
