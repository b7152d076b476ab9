use glam::{Mat4, Vec3};
use log::{debug, trace};

use crate::base::IkError;
use crate::config::ChainConfig;
use crate::joint::Joint;
use crate::render::JointRenderer;
use crate::skeleton::Skeleton;

/// Outcome of one `Chain::move_toward()` pass.
#[derive(Debug, Clone, Copy, PartialEq)]
pub enum IkStep {
    /// Tip already within epsilon, no pose was touched.
    Converged { distance: f32 },
    /// Every joint received a correction. `distance` is measured before it.
    Corrected { distance: f32 },
}

impl IkStep {
    /// Tip to target distance measured at the start of the pass.
    #[inline]
    pub fn distance(&self) -> f32 {
        return match self {
            IkStep::Converged { distance } => *distance,
            IkStep::Corrected { distance } => *distance,
        };
    }

    #[inline]
    pub fn is_converged(&self) -> bool {
        return matches!(self, IkStep::Converged { .. });
    }
}

///
/// An unbranching joint chain and its Jacobian-transpose IK solver.
///
/// The chain owns a `Skeleton` holding one root and `count - 1` descendants,
/// each the sole child of the previous one. `joints` keeps their indices in
/// root to tip order, fixed after construction.
///
/// Per frame, call `update()` then `move_toward()`. Corrections applied by
/// `move_toward()` only reach the world matrices at the next `update()`, the
/// solver always reads the world matrices of the previous update.
///
#[derive(Debug, Clone)]
#[cfg_attr(feature = "rkyv", derive(rkyv::Archive, rkyv::Serialize, rkyv::Deserialize))]
pub struct Chain {
    skeleton: Skeleton,
    joints: Vec<usize>,
    model: Mat4,
    step: f32,
    epsilon: f32,
}

impl Chain {
    /// Builds a `count` joints chain placed at `offset`, with the default config.
    pub fn new(count: usize, offset: Vec3) -> Result<Chain, IkError> {
        return Chain::from_config(&ChainConfig::default().with_joint_count(count), offset);
    }

    /// Builds a chain from `config`, placed at `offset`.
    pub fn from_config(config: &ChainConfig, offset: Vec3) -> Result<Chain, IkError> {
        config.validate()?;

        let mut skeleton = Skeleton::with_capacity(config.joint_count);
        let mut joints = Vec::with_capacity(config.joint_count);

        let root = skeleton.add_root(Joint::new(config.root_length, Vec3::ZERO, Vec3::ZERO, config.root_limits));
        joints.push(root);

        let mut prev = root;
        for _ in 1..config.joint_count {
            let joint = Joint::new(
                config.segment_length,
                Vec3::ZERO,
                Vec3::new(0.0, config.segment_length, 0.0),
                config.joint_limits,
            );
            prev = skeleton.add_child(prev, joint)?;
            joints.push(prev);
        }

        debug!("Chain built, {} joints at {:?}", joints.len(), offset);
        return Ok(Chain {
            skeleton,
            joints,
            model: Mat4::from_translation(offset),
            step: config.step,
            epsilon: config.epsilon,
        });
    }
}

impl Chain {
    /// Gets the number of joints.
    #[inline]
    pub fn num_joints(&self) -> usize {
        return self.joints.len();
    }

    /// Gets the underlying skeleton.
    #[inline]
    pub fn skeleton(&self) -> &Skeleton {
        return &self.skeleton;
    }

    /// Gets the placement matrix.
    #[inline]
    pub fn model(&self) -> &Mat4 {
        return &self.model;
    }

    #[inline]
    pub fn step(&self) -> f32 {
        return self.step;
    }

    #[inline]
    pub fn epsilon(&self) -> f32 {
        return self.epsilon;
    }

    #[inline]
    pub fn root(&self) -> &Joint {
        return self.skeleton.joint(self.joints[0]);
    }

    #[inline]
    pub fn tip(&self) -> &Joint {
        return self.skeleton.joint(self.joints[self.joints.len() - 1]);
    }

    /// Gets the `nth` joint from the root, `None` past the tip.
    #[inline]
    pub fn joint(&self, nth: usize) -> Option<&Joint> {
        return self.joints.get(nth).map(|idx| self.skeleton.joint(*idx));
    }

    /// Iterates joints from root to tip.
    pub fn joints(&self) -> impl Iterator<Item = &Joint> + '_ {
        return self.joints.iter().map(|idx| self.skeleton.joint(*idx));
    }

    /// Gets every pose from root to tip.
    pub fn poses(&self) -> Vec<Vec3> {
        return self.joints().map(|joint| joint.pose()).collect();
    }

    /// World position of the tip end, as of the last `update()`.
    #[inline]
    pub fn tip_location(&self) -> Vec3 {
        return self.tip().end_location();
    }

    /// Distance from the tip end to `target`, as of the last `update()`.
    #[inline]
    pub fn distance_to(&self, target: Vec3) -> f32 {
        return (target - self.tip_location()).length();
    }

    /// Recomputes every world matrix from the current poses.
    ///
    /// Call once per frame, before any location query, `move_toward()` or `draw()`.
    pub fn update(&mut self) {
        let root = self.joints[0];
        self.skeleton.update_from(root, &self.model);
    }

    /// Runs one Jacobian-transpose correction pass toward `target`.
    ///
    /// Nothing changes when the tip is within `epsilon`. Otherwise each joint,
    /// root to tip, gets `step * (jacobian_axis(target) . difference)` per axis,
    /// clamped into its limits and applied before the next joint is visited.
    /// Jacobians read the world matrices of the last `update()`.
    pub fn move_toward(&mut self, target: Vec3) -> IkStep {
        let difference = target - self.tip_location();
        let distance = difference.length();
        if distance <= self.epsilon {
            trace!("Chain converged, distance {}", distance);
            return IkStep::Converged { distance };
        }

        let step = self.step;
        for idx in self.joints.iter() {
            let joint = self.skeleton.joint_mut(*idx);
            let delta = Vec3::new(
                step * joint.jacobian_x(target).dot(difference),
                step * joint.jacobian_y(target).dot(difference),
                step * joint.jacobian_z(target).dot(difference),
            );
            joint.increment_pose(delta);
        }

        trace!("Chain corrected, distance {}", distance);
        return IkStep::Corrected { distance };
    }

    /// Hands every joint, root first, to `renderer`.
    pub fn draw<R: JointRenderer + ?Sized>(&self, view_proj: &Mat4, shader: &R::Shader, renderer: &mut R) {
        self.skeleton.draw(self.joints[0], view_proj, shader, renderer);
    }
}
