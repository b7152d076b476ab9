use glam::{Mat4, Vec3};

use crate::base::{Axis, IkError, JOINT_BOX_HALF_WIDTH, NO_LIMIT};
use crate::math::{local_matrix, transform_point, transform_vector};
use crate::render::{BoxMesh, JointDraw, JointRenderer};

///
/// Inclusive `[min, max]` rotation interval of one pose axis, in radians.
///
/// A zero width interval locks the axis. There is no true unbounded interval,
/// `JointLimit::unlimited()` uses the wide finite `NO_LIMIT` bound instead.
///
#[derive(Debug, Clone, Copy, PartialEq)]
#[cfg_attr(feature = "rkyv", derive(rkyv::Archive, rkyv::Serialize, rkyv::Deserialize))]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
#[cfg_attr(feature = "serde", serde(try_from = "RawJointLimit"))]
pub struct JointLimit {
    min: f32,
    max: f32,
}

/// Unchecked serde form of `JointLimit`, validated through `JointLimit::new()`.
#[cfg(feature = "serde")]
#[derive(serde::Deserialize)]
struct RawJointLimit {
    min: f32,
    max: f32,
}

#[cfg(feature = "serde")]
impl TryFrom<RawJointLimit> for JointLimit {
    type Error = IkError;

    fn try_from(raw: RawJointLimit) -> Result<JointLimit, IkError> {
        return JointLimit::new(raw.min, raw.max);
    }
}

impl JointLimit {
    /// Creates a limit, fails if `min > max` or any bound is NaN.
    pub fn new(min: f32, max: f32) -> Result<JointLimit, IkError> {
        if min.is_nan() || max.is_nan() || min > max {
            return Err(IkError::InvalidLimit { min, max });
        }
        return Ok(JointLimit { min, max });
    }

    /// Zero width interval at 0, the axis never rotates.
    #[inline]
    pub const fn fixed() -> JointLimit {
        return JointLimit { min: 0.0, max: 0.0 };
    }

    /// `[-NO_LIMIT, NO_LIMIT]`.
    #[inline]
    pub const fn unlimited() -> JointLimit {
        return JointLimit {
            min: -NO_LIMIT,
            max: NO_LIMIT,
        };
    }

    /// `[-half_range, half_range]`, the absolute value of `half_range` is used.
    /// A NaN `half_range` gives `fixed()`.
    #[inline]
    pub fn symmetric(half_range: f32) -> JointLimit {
        if half_range.is_nan() {
            return JointLimit::fixed();
        }
        let half_range = half_range.abs();
        return JointLimit {
            min: -half_range,
            max: half_range,
        };
    }

    #[inline]
    pub fn min(&self) -> f32 {
        return self.min;
    }

    #[inline]
    pub fn max(&self) -> f32 {
        return self.max;
    }

    #[inline]
    pub fn width(&self) -> f32 {
        return self.max - self.min;
    }

    #[inline]
    pub fn is_fixed(&self) -> bool {
        return self.min == self.max;
    }

    #[inline]
    pub fn contains(&self, angle: f32) -> bool {
        return angle >= self.min && angle <= self.max;
    }

    /// Clamps `angle` into the interval. NaN collapses to `min`.
    ///
    /// Never panics, even on a limit that bypassed `new()` such as rkyv data:
    /// `max` wins over `min` when the bounds are inverted.
    #[inline]
    pub fn clamp(&self, angle: f32) -> f32 {
        if angle.is_nan() {
            return self.min;
        }
        return angle.max(self.min).min(self.max);
    }
}

impl Default for JointLimit {
    fn default() -> JointLimit {
        return JointLimit::unlimited();
    }
}

/// Limits of the three pose axes.
#[derive(Debug, Default, Clone, Copy, PartialEq)]
#[cfg_attr(feature = "rkyv", derive(rkyv::Archive, rkyv::Serialize, rkyv::Deserialize))]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
#[cfg_attr(feature = "serde", serde(default))]
pub struct JointLimits {
    pub x: JointLimit,
    pub y: JointLimit,
    pub z: JointLimit,
}

impl JointLimits {
    #[inline]
    pub const fn new(x: JointLimit, y: JointLimit, z: JointLimit) -> JointLimits {
        return JointLimits { x, y, z };
    }

    /// All axes locked.
    #[inline]
    pub const fn fixed() -> JointLimits {
        return JointLimits::new(JointLimit::fixed(), JointLimit::fixed(), JointLimit::fixed());
    }

    /// All axes free.
    #[inline]
    pub const fn unlimited() -> JointLimits {
        return JointLimits::new(JointLimit::unlimited(), JointLimit::unlimited(), JointLimit::unlimited());
    }

    /// Hinge about `axis`, the two other axes locked.
    #[inline]
    pub fn hinge(axis: Axis, limit: JointLimit) -> JointLimits {
        let mut limits = JointLimits::fixed();
        *limits.get_mut(axis) = limit;
        return limits;
    }

    #[inline]
    pub fn get(&self, axis: Axis) -> &JointLimit {
        return match axis {
            Axis::X => &self.x,
            Axis::Y => &self.y,
            Axis::Z => &self.z,
        };
    }

    #[inline]
    pub fn get_mut(&mut self, axis: Axis) -> &mut JointLimit {
        return match axis {
            Axis::X => &mut self.x,
            Axis::Y => &mut self.y,
            Axis::Z => &mut self.z,
        };
    }

    /// Clamps every pose component into its own interval.
    #[inline]
    pub fn clamp(&self, pose: Vec3) -> Vec3 {
        return Vec3::new(self.x.clamp(pose.x), self.y.clamp(pose.y), self.z.clamp(pose.z));
    }

    #[inline]
    pub fn contains(&self, pose: Vec3) -> bool {
        return self.x.contains(pose.x) && self.y.contains(pose.y) && self.z.contains(pose.z);
    }
}

///
/// A node of the kinematic tree.
///
/// The local transform is parameterized by a 3-axis Euler `pose` and a rigid
/// `offset` from the parent joint origin. Two transforms are cached:
///
/// * `local`, rebuilt eagerly each time the pose changes.
/// * `world`, rebuilt only by `update()`. Between two updates it keeps the
///   value of the last one, even if the pose changed meanwhile.
///
/// Parent and children are indices into the owning `Skeleton`.
///
#[derive(Debug, Clone)]
#[cfg_attr(feature = "rkyv", derive(rkyv::Archive, rkyv::Serialize, rkyv::Deserialize))]
pub struct Joint {
    length: f32,
    pose: Vec3,
    offset: Vec3,
    limits: JointLimits,
    local: Mat4,
    world: Mat4,
    color: Vec3,
    mesh: BoxMesh,
    pub(crate) parent: Option<usize>,
    pub(crate) children: Vec<usize>,
}

impl Joint {
    /// Creates a joint. `pose` is clamped into `limits`.
    ///
    /// The world matrix is identity until the first `update()`.
    pub fn new(length: f32, pose: Vec3, offset: Vec3, limits: JointLimits) -> Joint {
        let pose = limits.clamp(pose);
        return Joint {
            length,
            pose,
            offset,
            limits,
            local: local_matrix(offset, pose),
            world: Mat4::IDENTITY,
            color: Vec3::new(0.0, 1.0, 1.0),
            mesh: BoxMesh::new(length, JOINT_BOX_HALF_WIDTH),
            parent: None,
            children: Vec::new(),
        };
    }

    #[inline]
    pub fn length(&self) -> f32 {
        return self.length;
    }

    #[inline]
    pub fn pose(&self) -> Vec3 {
        return self.pose;
    }

    #[inline]
    pub fn offset(&self) -> Vec3 {
        return self.offset;
    }

    #[inline]
    pub fn limits(&self) -> &JointLimits {
        return &self.limits;
    }

    #[inline]
    pub fn local_matrix(&self) -> &Mat4 {
        return &self.local;
    }

    #[inline]
    pub fn world_matrix(&self) -> &Mat4 {
        return &self.world;
    }

    #[inline]
    pub fn color(&self) -> Vec3 {
        return self.color;
    }

    #[inline]
    pub fn set_color(&mut self, color: Vec3) {
        self.color = color;
    }

    #[inline]
    pub fn mesh(&self) -> &BoxMesh {
        return &self.mesh;
    }

    /// Gets parent index, `None` for a root.
    #[inline]
    pub fn parent(&self) -> Option<usize> {
        return self.parent;
    }

    /// Gets child indices, in insertion order.
    #[inline]
    pub fn children(&self) -> &[usize] {
        return &self.children;
    }

    /// Sets `world = parent_world * local`. Children are not visited here,
    /// see `Skeleton::update_from()`.
    #[inline]
    pub fn update(&mut self, parent_world: &Mat4) {
        self.world = *parent_world * self.local;
    }

    /// World position of the joint origin.
    #[inline]
    pub fn joint_location(&self) -> Vec3 {
        return transform_point(&self.world, Vec3::ZERO);
    }

    /// World position of the far end of the segment, `length` along local +Y.
    #[inline]
    pub fn end_location(&self) -> Vec3 {
        return transform_point(&self.world, Vec3::new(0.0, self.length, 0.0));
    }

    /// Jacobian column of a rotation about `axis`.
    ///
    /// `axis` is taken in world space from the cached world matrix, and
    /// `target` stands in for the effector: `axis_ws x (target - joint_location)`.
    #[inline]
    pub fn jacobian(&self, axis: Axis, target: Vec3) -> Vec3 {
        let axis_ws = transform_vector(&self.world, axis.unit());
        let difference = target - self.joint_location();
        return axis_ws.cross(difference);
    }

    #[inline]
    pub fn jacobian_x(&self, target: Vec3) -> Vec3 {
        return self.jacobian(Axis::X, target);
    }

    #[inline]
    pub fn jacobian_y(&self, target: Vec3) -> Vec3 {
        return self.jacobian(Axis::Y, target);
    }

    #[inline]
    pub fn jacobian_z(&self, target: Vec3) -> Vec3 {
        return self.jacobian(Axis::Z, target);
    }

    /// Adds `delta` to the pose, clamps into limits and rebuilds the local
    /// matrix. The world matrix is left stale until the next `update()`.
    pub fn increment_pose(&mut self, delta: Vec3) {
        self.pose = self.limits.clamp(self.pose + delta);
        self.local = local_matrix(self.offset, self.pose);
    }

    /// Hands this joint to `renderer`. Children are not visited here, see
    /// `Skeleton::draw()`.
    pub fn draw<R: JointRenderer + ?Sized>(&self, index: usize, view_proj: &Mat4, shader: &R::Shader, renderer: &mut R) {
        renderer.draw_joint(
            view_proj,
            shader,
            &JointDraw {
                index,
                world: &self.world,
                color: self.color,
                mesh: &self.mesh,
            },
        );
    }
}

#[cfg(test)]
mod tests {
    use core::f32::consts;
    use wasm_bindgen_test::*;

    use super::*;

    #[test]
    #[wasm_bindgen_test]
    fn test_joint_limit() {
        assert!(JointLimit::new(1.0, -1.0).unwrap_err().is_invalid_limit());
        assert!(JointLimit::new(f32::NAN, 1.0).is_err());
        assert!(JointLimit::new(0.0, f32::NAN).is_err());

        let limit = JointLimit::new(-0.5, 0.25).unwrap();
        assert_eq!(limit.clamp(1.0), 0.25);
        assert_eq!(limit.clamp(-1.0), -0.5);
        assert_eq!(limit.clamp(0.1), 0.1);
        assert_eq!(limit.clamp(f32::NAN), -0.5);
        assert_eq!(limit.clamp(f32::INFINITY), 0.25);
        assert_eq!(limit.width(), 0.75);
        assert!(!limit.is_fixed());

        assert!(JointLimit::fixed().is_fixed());
        assert_eq!(JointLimit::fixed().clamp(3.0), 0.0);
        assert_eq!(JointLimit::symmetric(-0.5), JointLimit::new(-0.5, 0.5).unwrap());
        assert_eq!(JointLimit::unlimited().clamp(1000.0), 1000.0);
    }

    #[test]
    #[wasm_bindgen_test]
    fn test_bad_limits_never_panic() {
        let limit = JointLimit::symmetric(f32::NAN);
        assert_eq!(limit, JointLimit::fixed());
        let limits = JointLimits::new(limit, JointLimit::fixed(), JointLimit::fixed());
        let mut joint = Joint::new(1.0, Vec3::ONE, Vec3::ZERO, limits);
        joint.increment_pose(Vec3::splat(1.0));
        assert_eq!(joint.pose(), Vec3::ZERO);

        // inverted bounds only reachable by bypassing new()
        let inverted = JointLimit { min: 1.0, max: -1.0 };
        assert_eq!(inverted.clamp(0.0), -1.0);
        assert_eq!(inverted.clamp(5.0), -1.0);
        let nan = JointLimit {
            min: f32::NAN,
            max: f32::NAN,
        };
        assert!(nan.clamp(0.3).is_finite());
        let joint = Joint::new(1.0, Vec3::ONE, Vec3::ZERO, JointLimits::new(inverted, nan, JointLimit::fixed()));
        assert_eq!(joint.pose().x, -1.0);
    }

    #[cfg(feature = "serde")]
    #[test]
    #[wasm_bindgen_test]
    fn test_serde_limits_validated() {
        let limits: JointLimits = serde_json::from_str(r#"{ "z": { "min": -0.5, "max": 0.5 } }"#).unwrap();
        assert_eq!(limits.z, JointLimit::symmetric(0.5));
        let json = serde_json::to_string(&limits).unwrap();
        assert_eq!(serde_json::from_str::<JointLimits>(&json).unwrap(), limits);

        assert!(serde_json::from_str::<JointLimits>(r#"{ "x": { "min": 1.0, "max": -1.0 } }"#).is_err());
        assert!(serde_json::from_str::<JointLimit>(r#"{ "min": 1.0, "max": -1.0 }"#).is_err());
    }

    #[test]
    #[wasm_bindgen_test]
    fn test_joint_limits_hinge() {
        let limits = JointLimits::hinge(Axis::Z, JointLimit::symmetric(1.0));
        assert!(limits.x.is_fixed());
        assert!(limits.y.is_fixed());
        assert_eq!(*limits.get(Axis::Z), JointLimit::symmetric(1.0));
        assert_eq!(limits.clamp(Vec3::new(2.0, -2.0, 2.0)), Vec3::new(0.0, 0.0, 1.0));
        assert!(limits.contains(Vec3::new(0.0, 0.0, -1.0)));
        assert!(!limits.contains(Vec3::new(0.1, 0.0, 0.0)));
    }

    #[test]
    #[wasm_bindgen_test]
    fn test_new_clamps_pose() {
        let limits = JointLimits::new(JointLimit::fixed(), JointLimit::symmetric(0.5), JointLimit::unlimited());
        let joint = Joint::new(1.0, Vec3::new(1.0, 1.0, 1.0), Vec3::ZERO, limits);
        assert_eq!(joint.pose(), Vec3::new(0.0, 0.5, 1.0));
        assert_eq!(*joint.local_matrix(), local_matrix(Vec3::ZERO, Vec3::new(0.0, 0.5, 1.0)));
        assert_eq!(*joint.world_matrix(), Mat4::IDENTITY);
        assert!(joint.children().is_empty());
        assert_eq!(joint.parent(), None);
        assert_eq!(joint.color(), Vec3::new(0.0, 1.0, 1.0));
    }

    #[test]
    #[wasm_bindgen_test]
    fn test_locations() {
        let mut joint = Joint::new(2.0, Vec3::ZERO, Vec3::new(0.0, 1.0, 0.0), JointLimits::unlimited());
        joint.update(&Mat4::from_translation(Vec3::new(1.0, 0.0, 0.0)));
        assert!(joint.joint_location().abs_diff_eq(Vec3::new(1.0, 1.0, 0.0), 1e-6));
        assert!(joint.end_location().abs_diff_eq(Vec3::new(1.0, 3.0, 0.0), 1e-6));

        joint.increment_pose(Vec3::new(0.0, 0.0, consts::FRAC_PI_2));
        // world matrix is stale until the next update
        assert!(joint.end_location().abs_diff_eq(Vec3::new(1.0, 3.0, 0.0), 1e-6));
        joint.update(&Mat4::from_translation(Vec3::new(1.0, 0.0, 0.0)));
        assert!(joint.end_location().abs_diff_eq(Vec3::new(-1.0, 1.0, 0.0), 1e-6));
    }

    #[test]
    #[wasm_bindgen_test]
    fn test_jacobian() {
        let mut joint = Joint::new(1.0, Vec3::ZERO, Vec3::ZERO, JointLimits::unlimited());
        joint.update(&Mat4::IDENTITY);

        let target = Vec3::new(0.0, 2.0, 0.0);
        // rotating about x pushes a point on +Y towards +Z
        assert!(joint.jacobian_x(target).abs_diff_eq(Vec3::new(0.0, 0.0, 2.0), 1e-6));
        // rotating about the line through the point moves nothing
        assert!(joint.jacobian_y(target).abs_diff_eq(Vec3::ZERO, 1e-6));
        assert!(joint.jacobian_z(target).abs_diff_eq(Vec3::new(-2.0, 0.0, 0.0), 1e-6));
        assert_eq!(joint.jacobian(Axis::Z, target), joint.jacobian_z(target));

        // translation never leaks into the axis direction
        joint.update(&Mat4::from_translation(Vec3::new(5.0, 5.0, 5.0)));
        let target = Vec3::new(5.0, 7.0, 5.0);
        assert!(joint.jacobian_z(target).abs_diff_eq(Vec3::new(-2.0, 0.0, 0.0), 1e-6));
    }

    #[test]
    #[wasm_bindgen_test]
    fn test_jacobian_matches_finite_difference() {
        let mut joint = Joint::new(1.5, Vec3::new(0.3, -0.2, 0.4), Vec3::new(0.1, 0.7, -0.2), JointLimits::unlimited());
        let parent = Mat4::from_rotation_y(0.6) * Mat4::from_translation(Vec3::new(0.5, 0.0, 0.2));
        joint.update(&parent);
        let end = joint.end_location();

        // x is applied first (innermost), so the world x column is exactly the
        // rotation axis of a pose.x change
        let h = 1e-3;
        let mut probe = joint.clone();
        probe.increment_pose(Vec3::new(h, 0.0, 0.0));
        probe.update(&parent);
        let numeric = (probe.end_location() - end) / h;
        assert!(numeric.abs_diff_eq(joint.jacobian_x(end), 1e-2));
    }

    #[test]
    #[wasm_bindgen_test]
    fn test_increment_pose_clamps() {
        let limits = JointLimits::new(
            JointLimit::symmetric(0.5),
            JointLimit::new(0.0, 1.0).unwrap(),
            JointLimit::fixed(),
        );
        let mut joint = Joint::new(1.0, Vec3::ZERO, Vec3::ZERO, limits);
        joint.increment_pose(Vec3::new(10.0, -10.0, 10.0));
        assert_eq!(joint.pose(), Vec3::new(0.5, 0.0, 0.0));
        joint.increment_pose(Vec3::new(-1e9, 1e9, -1e9));
        assert_eq!(joint.pose(), Vec3::new(-0.5, 1.0, 0.0));
        assert_eq!(*joint.local_matrix(), local_matrix(Vec3::ZERO, Vec3::new(-0.5, 1.0, 0.0)));
    }
}
