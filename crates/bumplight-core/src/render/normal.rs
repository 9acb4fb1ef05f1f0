//! Flat surface normals for tiles.

use glam::Vec4;

use crate::math::vector::{cross, normalize};

/// Unit normal of the plane through `p0`, `p1`, `p2`.
///
/// Uses `(p1 - p0) x (p2 - p0)`: with `p1` along +x and `p2` along +y from
/// `p0` the result is +z. Degenerate (collinear) corners give the zero
/// vector.
pub fn surface_normal(p0: Vec4, p1: Vec4, p2: Vec4) -> Vec4 {
    let e1 = p1 - p0;
    let e2 = p2 - p0;
    normalize(cross(e1, e2))
}
