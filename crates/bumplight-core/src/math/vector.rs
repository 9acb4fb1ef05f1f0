//! Three-component vector operations on homogeneous `Vec4` values.
//!
//! Only x, y and z take part in the arithmetic; w is carried through as
//! the homogeneous/padding field.

use glam::Vec4;

use super::approx::fast_rsqrt;

/// Squared length of the x, y, z part.
#[inline]
pub fn magnitude_squared(v: Vec4) -> f32 {
    v.x * v.x + v.y * v.y + v.z * v.z
}

/// Scale `v` to unit length using the fast reciprocal square root.
///
/// A zero-length input yields the zero vector with w kept, never NaN.
#[inline]
pub fn normalize(v: Vec4) -> Vec4 {
    let inv = fast_rsqrt(magnitude_squared(v));
    if !inv.is_finite() {
        return Vec4::new(0.0, 0.0, 0.0, v.w);
    }
    Vec4::new(v.x * inv, v.y * inv, v.z * inv, v.w)
}

/// Dot product of the x, y, z parts.
#[inline]
pub fn dot(a: Vec4, b: Vec4) -> f32 {
    a.x * b.x + a.y * b.y + a.z * b.z
}

/// Right-handed cross product. The result's w is 1.0.
#[inline]
pub fn cross(a: Vec4, b: Vec4) -> Vec4 {
    Vec4::new(
        a.y * b.z - a.z * b.y,
        a.z * b.x - a.x * b.z,
        a.x * b.y - a.y * b.x,
        1.0,
    )
}

/// Length of the x, y, z part, computed as `|v|² · rsqrt(|v|²)`.
#[inline]
pub fn magnitude(v: Vec4) -> f32 {
    let sq = magnitude_squared(v);
    if sq == 0.0 {
        return 0.0;
    }
    sq * fast_rsqrt(sq)
}

/// Point with w = 1.
#[inline]
pub fn point(x: f32, y: f32, z: f32) -> Vec4 {
    Vec4::new(x, y, z, 1.0)
}
