#![allow(dead_code)]

use glam::Vec3;
use ik_chain_rs::{Axis, Chain, ChainConfig, JointLimit, JointLimits};
use rand::Rng;

pub const ROOT_HALF_RANGE: f32 = core::f32::consts::FRAC_PI_4;

/// 6 joints at (0, -3, 0), root hinged +-45 degrees on X and Z, Y locked,
/// free intermediate joints.
pub fn hinged_rig(step: f32) -> Chain {
    let root_limits = JointLimits::new(
        JointLimit::symmetric(ROOT_HALF_RANGE),
        JointLimit::fixed(),
        JointLimit::symmetric(ROOT_HALF_RANGE),
    );
    let config = ChainConfig::default()
        .with_joint_count(6)
        .with_root_limits(root_limits)
        .with_joint_limits(JointLimits::unlimited())
        .with_step(step);
    return Chain::from_config(&config, Vec3::new(0.0, -3.0, 0.0)).unwrap();
}

pub fn assert_within_limits(chain: &Chain) {
    for (nth, joint) in chain.joints().enumerate() {
        let pose = joint.pose();
        for axis in Axis::ALL {
            let limit = joint.limits().get(axis);
            let angle = pose[axis.index()];
            assert!(
                limit.contains(angle),
                "joint {} axis {:?} angle {} out of [{}, {}]",
                nth,
                axis,
                angle,
                limit.min(),
                limit.max()
            );
        }
    }
}

pub fn random_limit<R: Rng>(rng: &mut R) -> JointLimit {
    return match rng.gen_range(0..4) {
        0 => JointLimit::fixed(),
        1 => JointLimit::unlimited(),
        2 => JointLimit::symmetric(rng.gen_range(0.0..core::f32::consts::PI)),
        _ => {
            let a: f32 = rng.gen_range(-3.0..3.0);
            let b: f32 = rng.gen_range(-3.0..3.0);
            JointLimit::new(a.min(b), a.max(b)).unwrap()
        }
    };
}

pub fn random_limits<R: Rng>(rng: &mut R) -> JointLimits {
    return JointLimits::new(random_limit(rng), random_limit(rng), random_limit(rng));
}

/// Small, medium and absurdly large deltas, both signs.
pub fn random_delta<R: Rng>(rng: &mut R) -> Vec3 {
    let scale: f32 = match rng.gen_range(0..3) {
        0 => 0.01,
        1 => 10.0,
        _ => 1e7,
    };
    return Vec3::new(
        rng.gen_range(-1.0f32..1.0) * scale,
        rng.gen_range(-1.0f32..1.0) * scale,
        rng.gen_range(-1.0f32..1.0) * scale,
    );
}
