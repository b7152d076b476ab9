//!
//! Base types, constants and errors.
//!

use thiserror::Error;

/// Ik error type.
#[derive(Error, Debug, Clone, Copy, PartialEq)]
pub enum IkError {
    /// Limit interval with `min > max`, or a NaN bound.
    #[error("Invalid limit [{min}, {max}]")]
    InvalidLimit { min: f32, max: f32 },
    /// Joint count out of `[1, CHAIN_MAX_JOINTS]`.
    #[error("Invalid joint count {0}")]
    InvalidJointCount(usize),
    /// Solver gain must be positive and finite.
    #[error("Invalid gain {0}")]
    InvalidGain(f32),
    /// Convergence radius must be non-negative and finite.
    #[error("Invalid epsilon {0}")]
    InvalidEpsilon(f32),
    /// Joint index out of the skeleton.
    #[error("Invalid index {0}")]
    InvalidIndex(usize),
}

impl IkError {
    pub fn is_invalid_limit(&self) -> bool {
        matches!(self, IkError::InvalidLimit { .. })
    }

    pub fn is_invalid_joint_count(&self) -> bool {
        matches!(self, IkError::InvalidJointCount(_))
    }

    pub fn is_invalid_gain(&self) -> bool {
        matches!(self, IkError::InvalidGain(_))
    }

    pub fn is_invalid_epsilon(&self) -> bool {
        matches!(self, IkError::InvalidEpsilon(_))
    }

    pub fn is_invalid_index(&self) -> bool {
        matches!(self, IkError::InvalidIndex(_))
    }
}

/// Defines the maximum number of joints in a chain.
/// Keeps worst case solver passes bounded.
pub const CHAIN_MAX_JOINTS: usize = 1024;

/// Bound used to emulate an unconstrained axis.
/// Limits are always finite, a very wide interval stands in for "no limit".
pub const NO_LIMIT: f32 = 100000.0;

/// Default gain applied to `jacobian . difference` when computing pose deltas.
pub const DEFAULT_STEP: f32 = 0.001;

/// Default distance under which the tip is considered on target.
pub const DEFAULT_EPSILON: f32 = 0.01;

/// Default half width of the joint bounding box.
pub const JOINT_BOX_HALF_WIDTH: f32 = 0.1;

/// Local rotation axis of a joint.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum Axis {
    X,
    Y,
    Z,
}

impl Axis {
    /// All axes, in pose component order.
    pub const ALL: [Axis; 3] = [Axis::X, Axis::Y, Axis::Z];

    /// Gets the component index of the axis in a pose vector.
    #[inline]
    pub fn index(self) -> usize {
        return match self {
            Axis::X => 0,
            Axis::Y => 1,
            Axis::Z => 2,
        };
    }

    /// Gets the unit vector of the axis.
    #[inline]
    pub fn unit(self) -> glam::Vec3 {
        return match self {
            Axis::X => glam::Vec3::X,
            Axis::Y => glam::Vec3::Y,
            Axis::Z => glam::Vec3::Z,
        };
    }
}
