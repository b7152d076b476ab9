use glam::{Mat4, Vec3, Vec4};

/// Builds a joint local matrix: `translate(offset) * rot_z * rot_y * rot_x`.
///
/// Rotations are applied to a point X first, then Y, then Z, then the offset.
#[inline]
pub fn local_matrix(offset: Vec3, pose: Vec3) -> Mat4 {
    let translate = Mat4::from_translation(offset);
    let rot_x = Mat4::from_rotation_x(pose.x);
    let rot_y = Mat4::from_rotation_y(pose.y);
    let rot_z = Mat4::from_rotation_z(pose.z);
    return translate * rot_z * rot_y * rot_x;
}

/// Transforms a point (w = 1).
#[inline]
pub fn transform_point(mat: &Mat4, point: Vec3) -> Vec3 {
    return (*mat * point.extend(1.0)).truncate();
}

/// Transforms a direction (w = 0), the translation column is ignored.
#[inline]
pub fn transform_vector(mat: &Mat4, vector: Vec3) -> Vec3 {
    return (*mat * Vec4::new(vector.x, vector.y, vector.z, 0.0)).truncate();
}
