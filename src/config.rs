use crate::base::{Axis, IkError, CHAIN_MAX_JOINTS, DEFAULT_EPSILON, DEFAULT_STEP};
use crate::joint::{JointLimit, JointLimits};

///
/// Construction parameters of a `Chain`.
///
/// The default reproduces the reference rig: 6 unit joints, a root that only
/// rotates about Z, free intermediate joints, gain 0.001 and a 0.01 radius.
///
#[derive(Debug, Clone, Copy, PartialEq)]
#[cfg_attr(feature = "rkyv", derive(rkyv::Archive, rkyv::Serialize, rkyv::Deserialize))]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
#[cfg_attr(feature = "serde", serde(default))]
pub struct ChainConfig {
    /// Number of joints, root included.
    pub joint_count: usize,
    /// Length of the root segment.
    pub root_length: f32,
    /// Length of every other segment, also their offset along the parent's +Y.
    pub segment_length: f32,
    /// Limits of the base mount.
    ///
    /// When deserialized, axes missing from the object are unlimited, not
    /// fixed like in `Default`. A Z hinge must spell out `x` and `y` as
    /// `{ "min": 0.0, "max": 0.0 }`.
    pub root_limits: JointLimits,
    /// Limits of every non-root joint.
    pub joint_limits: JointLimits,
    /// Gain applied to `jacobian . difference`.
    pub step: f32,
    /// Distance at which the tip is on target.
    pub epsilon: f32,
}

impl Default for ChainConfig {
    fn default() -> ChainConfig {
        return ChainConfig {
            joint_count: 6,
            root_length: 1.0,
            segment_length: 1.0,
            root_limits: JointLimits::hinge(Axis::Z, JointLimit::unlimited()),
            joint_limits: JointLimits::unlimited(),
            step: DEFAULT_STEP,
            epsilon: DEFAULT_EPSILON,
        };
    }
}

impl ChainConfig {
    pub fn with_joint_count(mut self, joint_count: usize) -> ChainConfig {
        self.joint_count = joint_count;
        return self;
    }

    pub fn with_root_length(mut self, root_length: f32) -> ChainConfig {
        self.root_length = root_length;
        return self;
    }

    pub fn with_segment_length(mut self, segment_length: f32) -> ChainConfig {
        self.segment_length = segment_length;
        return self;
    }

    pub fn with_root_limits(mut self, root_limits: JointLimits) -> ChainConfig {
        self.root_limits = root_limits;
        return self;
    }

    pub fn with_joint_limits(mut self, joint_limits: JointLimits) -> ChainConfig {
        self.joint_limits = joint_limits;
        return self;
    }

    pub fn with_step(mut self, step: f32) -> ChainConfig {
        self.step = step;
        return self;
    }

    pub fn with_epsilon(mut self, epsilon: f32) -> ChainConfig {
        self.epsilon = epsilon;
        return self;
    }

    /// Validates the config.
    ///
    /// Limits are re-checked here since a deserialized config never went
    /// through `JointLimit::new()`.
    pub fn validate(&self) -> Result<(), IkError> {
        if self.joint_count == 0 || self.joint_count > CHAIN_MAX_JOINTS {
            return Err(IkError::InvalidJointCount(self.joint_count));
        }
        if !(self.step.is_finite() && self.step > 0.0) {
            return Err(IkError::InvalidGain(self.step));
        }
        if !(self.epsilon.is_finite() && self.epsilon >= 0.0) {
            return Err(IkError::InvalidEpsilon(self.epsilon));
        }
        for limits in [&self.root_limits, &self.joint_limits] {
            for axis in Axis::ALL {
                let limit = limits.get(axis);
                JointLimit::new(limit.min(), limit.max())?;
            }
        }
        return Ok(());
    }
}
