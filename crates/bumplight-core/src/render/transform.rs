//! Transform stage: source positions to device space, once per frame.
//!
//! No perspective divide happens here. Submitted x, y, z are the raw
//! matrix output; any division by w is left to the consumer of the list.

use glam::{Mat4, Vec4};

use crate::config::{Frustum, Projection};
use crate::render::Tile;

/// Holds the current view/projection matrix.
#[derive(Clone, Copy, Debug, PartialEq)]
pub struct TransformStage {
    matrix: Mat4,
}

impl Default for TransformStage {
    fn default() -> Self {
        Self::identity()
    }
}

impl TransformStage {
    pub fn identity() -> Self {
        Self {
            matrix: Mat4::IDENTITY,
        }
    }

    pub fn from_matrix(matrix: Mat4) -> Self {
        Self { matrix }
    }

    pub fn from_projection(projection: &Projection) -> Self {
        match projection {
            Projection::Identity => Self::identity(),
            Projection::Frustum(frustum) => Self::from_matrix(frustum_matrix(frustum)),
        }
    }

    pub fn matrix(&self) -> &Mat4 {
        &self.matrix
    }

    /// Transform one point without dividing by w.
    #[inline]
    pub fn transform_point(&self, position: Vec4) -> Vec4 {
        self.matrix * Vec4::new(position.x, position.y, position.z, 1.0)
    }

    /// Fill the transformed copy of all four corners of `tile`.
    /// Texture coordinates and strip flags are shared and stay untouched.
    pub fn transform_tile(&self, tile: &mut Tile) {
        for vertex in &mut tile.vertices {
            vertex.transformed = self.transform_point(vertex.position);
        }
    }
}

/// Frustum matrix with the viewport centred on the origin.
///
/// Columns: (c, 0, 0, 0), (0, c, 0, 0), (0, 0, -(f+n)/(n-f), -1),
/// (0, 0, 2fn/(n-f), 1) with c = cot(fov_y / 2).
pub fn frustum_matrix(frustum: &Frustum) -> Mat4 {
    let c = frustum.cot_fovy_2;
    let n = frustum.znear;
    let f = frustum.zfar;
    Mat4::from_cols(
        Vec4::new(c, 0.0, 0.0, 0.0),
        Vec4::new(0.0, c, 0.0, 0.0),
        Vec4::new(0.0, 0.0, -(f + n) / (n - f), -1.0),
        Vec4::new(0.0, 0.0, 2.0 * f * n / (n - f), 1.0),
    )
}
