//!
//! Renderer seam. The crate never talks to a graphics API, a host implements
//! `JointRenderer` and receives one call per joint.
//!

use glam::{Mat4, Vec3};

///
/// Bounding box geometry of a joint segment.
///
/// An axis aligned box from `y = 0` to `y = length` with a square cross
/// section of `2 * half_width`. Six faces of four vertices each, so every
/// vertex carries its face normal. Indices are two counter-clockwise
/// triangles per face.
///
#[derive(Debug, Clone, PartialEq)]
#[cfg_attr(feature = "rkyv", derive(rkyv::Archive, rkyv::Serialize, rkyv::Deserialize))]
pub struct BoxMesh {
    positions: Vec<Vec3>,
    normals: Vec<Vec3>,
    indices: Vec<u32>,
}

impl BoxMesh {
    /// Builds the box of a segment of `length` and `half_width`.
    pub fn new(length: f32, half_width: f32) -> BoxMesh {
        let w = half_width;
        let l = length;

        let positions = vec![
            // front
            Vec3::new(-w, 0.0, w),
            Vec3::new(w, 0.0, w),
            Vec3::new(w, l, w),
            Vec3::new(-w, l, w),
            // back
            Vec3::new(w, 0.0, -w),
            Vec3::new(-w, 0.0, -w),
            Vec3::new(-w, l, -w),
            Vec3::new(w, l, -w),
            // top
            Vec3::new(-w, l, w),
            Vec3::new(w, l, w),
            Vec3::new(w, l, -w),
            Vec3::new(-w, l, -w),
            // bottom
            Vec3::new(-w, 0.0, -w),
            Vec3::new(w, 0.0, -w),
            Vec3::new(w, 0.0, w),
            Vec3::new(-w, 0.0, w),
            // left
            Vec3::new(-w, 0.0, -w),
            Vec3::new(-w, 0.0, w),
            Vec3::new(-w, l, w),
            Vec3::new(-w, l, -w),
            // right
            Vec3::new(w, 0.0, w),
            Vec3::new(w, 0.0, -w),
            Vec3::new(w, l, -w),
            Vec3::new(w, l, w),
        ];

        let face_normals = [Vec3::Z, Vec3::NEG_Z, Vec3::Y, Vec3::NEG_Y, Vec3::NEG_X, Vec3::X];
        let mut normals = Vec::with_capacity(24);
        let mut indices = Vec::with_capacity(36);
        for (face, normal) in face_normals.iter().enumerate() {
            normals.extend_from_slice(&[*normal; 4]);
            let base = (face * 4) as u32;
            indices.extend_from_slice(&[base, base + 1, base + 2, base, base + 2, base + 3]);
        }

        return BoxMesh {
            positions,
            normals,
            indices,
        };
    }

    /// Gets vertex positions, in joint local space.
    #[inline]
    pub fn positions(&self) -> &[Vec3] {
        return &self.positions;
    }

    /// Gets per vertex normals, in joint local space.
    #[inline]
    pub fn normals(&self) -> &[Vec3] {
        return &self.normals;
    }

    /// Gets triangle list indices.
    #[inline]
    pub fn indices(&self) -> &[u32] {
        return &self.indices;
    }
}

/// Everything a renderer needs to draw one joint.
#[derive(Debug, Clone, Copy)]
pub struct JointDraw<'t> {
    pub index: usize,
    pub world: &'t Mat4,
    pub color: Vec3,
    pub mesh: &'t BoxMesh,
}

/// Draws joints on behalf of a `Chain`.
///
/// `Shader` is an opaque handle passed through untouched to every call, the
/// renderer owns all GPU state.
pub trait JointRenderer {
    type Shader: ?Sized;

    fn draw_joint(&mut self, view_proj: &Mat4, shader: &Self::Shader, joint: &JointDraw<'_>);
}
