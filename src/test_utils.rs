//!
//! Helpers shared by unit tests, integration tests and the demo.
//!

use glam::{EulerRot, Mat4, Quat, Vec3};

use crate::chain::Chain;

/// Rebuilds every world matrix of `chain` (root to tip) from poses and
/// offsets only, without reading any cached matrix.
///
/// Rotations go through a quaternion, so this does not share the matrix
/// composition code of `Joint`.
pub fn reference_world_matrices(chain: &Chain) -> Vec<Mat4> {
    let mut worlds = Vec::with_capacity(chain.num_joints());
    let mut parent = *chain.model();
    for joint in chain.joints() {
        let pose = joint.pose();
        let rotation = Quat::from_euler(EulerRot::ZYX, pose.z, pose.y, pose.x);
        let world = parent * Mat4::from_rotation_translation(rotation, joint.offset());
        worlds.push(world);
        parent = world;
    }
    return worlds;
}

/// Drives `chain` for `frames` frames toward `target`, returns the tip
/// distance measured after each `update()`.
pub fn track(chain: &mut Chain, target: Vec3, frames: usize) -> Vec<f32> {
    let mut distances = Vec::with_capacity(frames + 1);
    for _ in 0..frames {
        chain.update();
        distances.push(chain.distance_to(target));
        chain.move_toward(target);
    }
    chain.update();
    distances.push(chain.distance_to(target));
    return distances;
}

/// Largest increase between two consecutive distances, negative when the
/// sequence strictly decreases.
pub fn max_increase(distances: &[f32]) -> f32 {
    return distances
        .windows(2)
        .map(|pair| pair[1] - pair[0])
        .fold(f32::MIN, f32::max);
}
