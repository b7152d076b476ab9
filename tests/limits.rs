use glam::Vec3;
use ik_chain_rs::*;
use rand::rngs::StdRng;
use rand::{Rng, SeedableRng};
use wasm_bindgen_test::*;

mod common;
use common::*;

#[test]
#[wasm_bindgen_test]
fn test_random_increments_stay_in_limits() {
    let mut rng = StdRng::seed_from_u64(0x1c0ffee);
    for _ in 0..100 {
        let limits = random_limits(&mut rng);
        let pose = random_delta(&mut rng);
        let mut joint = Joint::new(1.0, pose, Vec3::new(0.0, 1.0, 0.0), limits);
        assert!(limits.contains(joint.pose()));

        for _ in 0..100 {
            joint.increment_pose(random_delta(&mut rng));
            assert!(limits.contains(joint.pose()), "{:?} not in {:?}", joint.pose(), limits);
            assert!(joint.pose().is_finite());
        }
    }
}

#[test]
#[wasm_bindgen_test]
fn test_huge_increments_saturate() {
    let limits = JointLimits::new(
        JointLimit::new(-0.3, 0.6).unwrap(),
        JointLimit::fixed(),
        JointLimit::unlimited(),
    );
    let mut joint = Joint::new(1.0, Vec3::ZERO, Vec3::ZERO, limits);

    joint.increment_pose(Vec3::splat(1e6));
    assert_eq!(joint.pose(), Vec3::new(0.6, 0.0, NO_LIMIT));
    joint.increment_pose(Vec3::splat(-1e6));
    assert_eq!(joint.pose(), Vec3::new(-0.3, 0.0, -NO_LIMIT));
    joint.increment_pose(Vec3::new(f32::INFINITY, f32::NEG_INFINITY, f32::NAN));
    assert_eq!(joint.pose(), Vec3::new(0.6, 0.0, -NO_LIMIT));
}

#[test]
#[wasm_bindgen_test]
fn test_random_chains_stay_in_limits() {
    let mut rng = StdRng::seed_from_u64(42);
    for _ in 0..20 {
        let config = ChainConfig::default()
            .with_joint_count(rng.gen_range(1..8))
            .with_root_limits(random_limits(&mut rng))
            .with_joint_limits(random_limits(&mut rng))
            .with_step(rng.gen_range(0.001..0.1));
        let mut chain = Chain::from_config(&config, Vec3::ZERO).unwrap();
        let target = Vec3::new(
            rng.gen_range(-4.0..4.0),
            rng.gen_range(-4.0..4.0),
            rng.gen_range(-4.0..4.0),
        );

        for _ in 0..100 {
            chain.update();
            chain.move_toward(target);
            assert_within_limits(&chain);
        }
    }
}

#[test]
#[wasm_bindgen_test]
fn test_oversized_gain_stays_in_limits() {
    // a gain this large throws poses against their bounds every frame
    let mut chain = hinged_rig(1000.0);
    let target = Vec3::new(2.0, 0.0, -2.0);
    for _ in 0..100 {
        chain.update();
        chain.move_toward(target);
        assert_within_limits(&chain);
        assert_eq!(chain.root().pose().y, 0.0);
    }
    assert!(chain.root().pose().x.abs() <= ROOT_HALF_RANGE);
    assert!(chain.root().pose().z.abs() <= ROOT_HALF_RANGE);
}

#[test]
#[wasm_bindgen_test]
fn test_invalid_config() {
    let config = ChainConfig::default();
    assert!(Chain::from_config(&config.with_joint_count(0), Vec3::ZERO)
        .unwrap_err()
        .is_invalid_joint_count());
    assert!(Chain::from_config(&config.with_joint_count(CHAIN_MAX_JOINTS + 1), Vec3::ZERO)
        .unwrap_err()
        .is_invalid_joint_count());
    assert!(Chain::from_config(&config.with_step(0.0), Vec3::ZERO)
        .unwrap_err()
        .is_invalid_gain());
    assert!(Chain::from_config(&config.with_step(f32::NAN), Vec3::ZERO)
        .unwrap_err()
        .is_invalid_gain());
    assert!(Chain::from_config(&config.with_epsilon(-1.0), Vec3::ZERO)
        .unwrap_err()
        .is_invalid_epsilon());
    assert!(Chain::from_config(&config.with_joint_count(CHAIN_MAX_JOINTS), Vec3::ZERO).is_ok());
}
