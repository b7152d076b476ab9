mod base;
mod chain;
mod config;
mod joint;
mod math;
mod render;
mod skeleton;
mod tracker;

pub mod test_utils;

pub use base::*;
pub use chain::{Chain, IkStep};
pub use config::ChainConfig;
pub use joint::{Joint, JointLimit, JointLimits};
pub use math::{local_matrix, transform_point, transform_vector};
pub use render::{BoxMesh, JointDraw, JointRenderer};
pub use skeleton::Skeleton;
pub use tracker::{TargetNudge, Tracker, DEFAULT_NUDGE_STEP};
