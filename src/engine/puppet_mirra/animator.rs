use glam::{EulerRot, Quat, Vec3};
use math_mirra::Basis;
use nab_mirra::{TickNumber, debug_panic};

use crate::binding::{ArmChain, BindingError, NamingConvention, Side, SkeletonBinding};
use crate::config::AnimatorConfig;
use crate::filter::{EulerFilter, RotationFilter, chain_gate};
use crate::frames;
use crate::landmarks::{LandmarkFrame, body_topo as bt, hand_topo as ht};
use crate::morph::{FacePlane, MorphTargets, drive_morphs};
use crate::retarget::Retargeter;
use crate::rig::{BoneIndex, Rig};
use crate::solver;

// Constant forward lean countering the root yaw writeback (tuned against the
// reference rigs, same value for both conventions)
const SPINE_COUNTER_LEAN: f32 = std::f32::consts::FRAC_PI_4;

// Runs one frame's worth of retargeting: bases -> solve -> smooth -> write.
// Owns every piece of temporal state; nothing else writes bone rotations.
pub struct Animator
{
    cfg: AnimatorConfig,
    bones: RotationFilter,
    small: EulerFilter,
    tick: TickNumber,
}
impl Animator
{
    #[must_use]
    pub fn new(mut cfg: AnimatorConfig) -> Self
    {
        for alpha in [&mut cfg.smoothing, &mut cfg.morph_smoothing]
        {
            if !(*alpha > 0.0 && *alpha <= 1.0)
            {
                debug_panic!("smoothing factor {alpha} outside (0, 1]; using the default");
                *alpha = crate::filter::DEFAULT_SMOOTHING;
            }
        }

        Self
        {
            cfg,
            bones: RotationFilter::default(),
            small: EulerFilter::default(),
            tick: TickNumber::default(),
        }
    }

    #[inline] #[must_use]
    pub fn config(&self) -> &AnimatorConfig { &self.cfg }

    #[inline] #[must_use]
    pub fn ticks(&self) -> TickNumber { self.tick }

    // One full synchronous pipeline pass for one landmark frame
    pub fn advance(
        &mut self,
        rig: &mut Rig,
        binding: &SkeletonBinding,
        morphs: &mut MorphTargets,
        frame: &LandmarkFrame)
    {
        self.tick.increment();

        self.body_pass(rig, binding, frame);
        for side in Side::BOTH
        {
            self.hand_pass(rig, binding, frame, side);
        }
        self.face_pass(rig, binding, morphs, frame);
    }

    fn body_pass(&mut self, rig: &mut Rig, binding: &SkeletonBinding, frame: &LandmarkFrame)
    {
        let joints = frames::body_joints(&frame.body);

        let upper_visible = chain_gate(
            frame.visibility_of(bt::LEFT_SHOULDER),
            frame.visibility_of(bt::RIGHT_SHOULDER),
            self.cfg.visibility_floor,
            self.cfg.visibility_base);
        if upper_visible
        {
            self.upper_body_pass(rig, binding, &joints);
        }
        // a failed upper gate holds the last pose rather than resetting

        let lower_visible = chain_gate(
            frame.visibility_of(bt::LEFT_HIP),
            frame.visibility_of(bt::RIGHT_HIP),
            self.cfg.visibility_floor,
            self.cfg.visibility_base);
        if lower_visible
        {
            self.lower_body_pass(rig, binding, &joints, frame);
        }
        else
        {
            self.reset_legs(rig, binding);
        }
    }

    fn upper_body_pass(&mut self, rig: &mut Rig, binding: &SkeletonBinding, joints: &[Vec3])
    {
        let basis = frames::shoulder_basis(joints);

        // torso lean/twist from the shoulder line
        self.smooth_small(rig, binding.spine, solver::torso_offsets(&basis));

        for side in Side::BOTH
        {
            if let Some(arm) = binding.arm(side)
            {
                self.arm_pass(rig, *arm, joints, side, basis);
            }
        }
    }

    // Direct-alignment chain: each solved joint rotates the frame carried to
    // the next joint down
    fn arm_pass(&mut self, rig: &mut Rig, arm: ArmChain, joints: &[Vec3], side: Side, basis: Basis)
    {
        let (shoulder_i, elbow_i, wrist_i, pinky_i, index_i) = match side
        {
            Side::Left => (bt::LEFT_SHOULDER, bt::LEFT_ELBOW, bt::LEFT_WRIST, bt::LEFT_PINKY, bt::LEFT_INDEX),
            Side::Right => (bt::RIGHT_SHOULDER, bt::RIGHT_ELBOW, bt::RIGHT_WRIST, bt::RIGHT_PINKY, bt::RIGHT_INDEX),
        };
        let alpha = self.cfg.smoothing;

        let upper_arm = joints[elbow_i] - joints[shoulder_i];
        let solved = solver::align_to_direction(&basis, upper_arm, solver::LIMB_REST_DIR);
        let applied = self.bones.smooth(arm.shoulder, rig.rotation(arm.shoulder), solved, alpha);
        rig.set_rotation(arm.shoulder, applied);
        let basis = basis.rotated(solved);

        let forearm = joints[wrist_i] - joints[elbow_i];
        let solved = solver::align_to_direction(&basis, forearm, solver::LIMB_REST_DIR);
        let applied = self.bones.smooth(arm.elbow, rig.rotation(arm.elbow), solved, alpha);
        rig.set_rotation(arm.elbow, applied);
        let basis = basis.rotated(solved);

        // wrist aims at the midline between the index and pinky knuckles
        let hand = joints[pinky_i].lerp(joints[index_i], 0.5) - joints[wrist_i];
        let solved = solver::align_to_direction(&basis, hand, solver::LIMB_REST_DIR);
        let applied = self.bones.smooth(arm.wrist, rig.rotation(arm.wrist), solved, alpha);
        rig.set_rotation(arm.wrist, applied);
    }

    fn lower_body_pass(
        &mut self,
        rig: &mut Rig,
        binding: &SkeletonBinding,
        joints: &[Vec3],
        frame: &LandmarkFrame)
    {
        let basis = frames::hip_basis(joints);

        // whole-body yaw on the root, countered on the spine so the torso
        // keeps facing the camera
        let yaw = solver::hip_yaw(&basis);
        self.smooth_small(rig, binding.hips, Vec3::new(0.0, yaw, 0.0));
        self.smooth_small(rig, binding.spine, Vec3::new(SPINE_COUNTER_LEAN, -yaw, 0.0));

        self.track_root_height(rig, frame);

        for side in Side::BOTH
        {
            self.leg_pass(rig, binding, joints, side, &basis);
        }
    }

    // Vertical root travel from the screen-normalized hip midpoint, when the
    // detector provides the screen stream; written unsmoothed, as observed
    fn track_root_height(&mut self, rig: &mut Rig, frame: &LandmarkFrame)
    {
        let Some(screen) = &frame.body_screen else { return; };

        let lh = screen[bt::LEFT_HIP].position.truncate().extend(0.0);
        let rh = screen[bt::RIGHT_HIP].position.truncate().extend(0.0);
        let midpoint = rh + (lh - rh) / 3.0;
        let user_height = rh.distance(lh) * self.cfg.root_height_scale;
        rig.root_offset = Vec3::new(0.0, -user_height * (midpoint.y - 0.5), 0.0);
    }

    // Projected-axis chain: all three joints extract against the fixed hip
    // frame
    fn leg_pass(
        &mut self,
        rig: &mut Rig,
        binding: &SkeletonBinding,
        joints: &[Vec3],
        side: Side,
        basis: &Basis)
    {
        let Some(leg) = binding.leg(side) else { return; };
        let (hip_i, knee_i, ankle_i, foot_i) = match side
        {
            Side::Left => (bt::LEFT_HIP, bt::LEFT_KNEE, bt::LEFT_ANKLE, bt::LEFT_FOOT),
            Side::Right => (bt::RIGHT_HIP, bt::RIGHT_KNEE, bt::RIGHT_ANKLE, bt::RIGHT_FOOT),
        };
        let alpha = self.cfg.smoothing;

        let segments = [
            (leg.hip, joints[knee_i] - joints[hip_i]),
            (leg.knee, joints[ankle_i] - joints[knee_i]),
            (leg.ankle, joints[foot_i] - joints[ankle_i]),
        ];
        for (bone, world_dir) in segments
        {
            let offsets = solver::projected_offsets(basis, world_dir, solver::LEG_REST_DIR);
            let target = Quat::from_euler(EulerRot::XYZ, offsets.x, offsets.y, offsets.z);
            let applied = self.bones.smooth(bone, rig.rotation(bone), target, alpha);
            rig.set_rotation(bone, applied);
        }
    }

    // Force-reset: exact identity this tick, no smoothing toward it, and the
    // filter history goes with it
    fn reset_legs(&mut self, rig: &mut Rig, binding: &SkeletonBinding)
    {
        for bone in binding.leg_reset_bones()
        {
            self.bones.reset(bone);
            rig.set_rotation(bone, Quat::IDENTITY);
        }
    }

    fn hand_pass(&mut self, rig: &mut Rig, binding: &SkeletonBinding, frame: &LandmarkFrame, side: Side)
    {
        let Some(hand) = binding.hand(side) else { return; };
        let points = match side
        {
            Side::Left => frame.left_hand.as_deref(),
            Side::Right => frame.right_hand.as_deref(),
        };
        let Some(points) = points else { return; };

        let joints = frames::hand_joints(points, self.cfg.camera_aspect);
        let basis = frames::hand_basis(&joints, side);
        // palm direction: wrist toward the middle-finger base
        let palm = match side
        {
            Side::Left => -basis.x,
            Side::Right => basis.x,
        };

        for (finger, base) in ht::FINGER_BASES.into_iter().enumerate()
        {
            let curl = solver::finger_curl(joints[base + 3] - joints[base], palm);
            for segment in 0..ht::SEGMENTS_PER_FINGER
            {
                let Some(bone) = hand.bone(base + segment) else { continue; };
                let bend = solver::segment_bend(curl, segment).to_radians();
                // the thumb folds across the palm (x axis); the other fingers
                // curl about z; signs mirror between hands
                let target = match (finger, side)
                {
                    (0, Side::Left) => Vec3::new(bend, 0.0, 0.0),
                    (0, Side::Right) => Vec3::new(-bend, 0.0, 0.0),
                    (_, Side::Left) => Vec3::new(0.0, 0.0, bend),
                    (_, Side::Right) => Vec3::new(0.0, 0.0, -bend),
                };
                self.smooth_small(rig, bone, target);
            }
        }
    }

    fn face_pass(
        &mut self,
        rig: &mut Rig,
        binding: &SkeletonBinding,
        morphs: &mut MorphTargets,
        frame: &LandmarkFrame)
    {
        let Some(points) = frame.face.as_deref() else { return; };
        let points = frames::face_points(points, self.cfg.camera_aspect);
        let Some(plane) = FacePlane::from_points(&points) else
        {
            log::debug!("degenerate face plane; skipping the face pass");
            return;
        };

        // the gaze drives the head bone; the morphs ride the same plane
        self.smooth_small(rig, binding.head, solver::gaze_offsets(plane.z, plane.y));
        drive_morphs(&plane, &points, morphs, self.cfg.morph_smoothing);
    }

    // Euler EMA write for small-angle corrective bones
    fn smooth_small(&mut self, rig: &mut Rig, bone: BoneIndex, target: Vec3)
    {
        let (cx, cy, cz) = rig.rotation(bone).to_euler(EulerRot::XYZ);
        let applied = self.small.smooth(bone, Vec3::new(cx, cy, cz), target, self.cfg.smoothing);
        rig.set_rotation(bone, Quat::from_euler(EulerRot::XYZ, applied.x, applied.y, applied.z));
    }

    // Drop all temporal state (avatar swap, seek, tracking restart)
    pub fn reset(&mut self)
    {
        self.bones.reset_all();
        self.small.reset_all();
    }
}

// One rigged character and everything needed to puppet it
pub struct Avatar
{
    pub rig: Rig,
    binding: SkeletonBinding,
    pub morphs: MorphTargets,
    animator: Animator,
}
impl Avatar
{
    // A binding failure leaves the avatar unpuppeted (static pose); the
    // caller decides whether that is fatal
    pub fn new<M>(
        rig: Rig,
        convention: &NamingConvention,
        morph_names: M,
        cfg: AnimatorConfig) -> Result<Self, BindingError>
    where M: IntoIterator,
          M::Item: Into<Box<str>>
    {
        let binding = SkeletonBinding::bind(&rig, convention)?;
        Ok(Self
        {
            rig,
            binding,
            morphs: MorphTargets::new(morph_names),
            animator: Animator::new(cfg),
        })
    }

    #[inline] #[must_use]
    pub fn binding(&self) -> &SkeletonBinding { &self.binding }

    #[inline] #[must_use]
    pub fn animator(&self) -> &Animator { &self.animator }

    // One pipeline pass; call once per tick with the latest frame
    pub fn drive(&mut self, frame: &LandmarkFrame)
    {
        self.animator.advance(&mut self.rig, &self.binding, &mut self.morphs, frame);
    }

    // Re-express this avatar's current pose onto a differently-conventioned
    // rig; run after `drive` each tick
    pub fn retarget_onto(&self, retargeter: &Retargeter, target: &mut Avatar)
    {
        retargeter.run(&self.rig, &self.binding, &mut target.rig, &target.binding);
    }
}
