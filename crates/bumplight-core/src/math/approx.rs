//! Fast approximations used by the lighting and bump paths.
//!
//! These are part of the visual contract: lit colors and bump angles are
//! computed with exactly these functions, so they must not be swapped for
//! the exact libm versions.

use core::f32::consts::{FRAC_PI_2, PI};

/// Initial-guess constant for the bit-level reciprocal square root.
const RSQRT_MAGIC: u32 = 0x5F37_5A86;

/// Coefficient of the rational arctangent approximation.
const ATAN_K: f32 = 0.28;

/// Maximum relative error of [`fast_rsqrt`] for positive normal inputs.
pub const RSQRT_MAX_REL_ERROR: f32 = 1.0e-5;

/// Maximum absolute error of [`fast_atan2`], in radians.
pub const ATAN2_MAX_ERROR: f32 = 0.0055;

/// Approximate `1 / sqrt(x)`.
///
/// Bit-level initial guess refined by two Newton-Raphson steps. Relative
/// error stays below [`RSQRT_MAX_REL_ERROR`]. Returns +inf for 0.
#[inline]
pub fn fast_rsqrt(x: f32) -> f32 {
    if x == 0.0 {
        return f32::INFINITY;
    }
    let half = 0.5 * x;
    let mut y = f32::from_bits(RSQRT_MAGIC.wrapping_sub(x.to_bits() >> 1));
    y *= 1.5 - half * y * y;
    y *= 1.5 - half * y * y;
    y
}

/// Approximate `atan2(y, x)` with a rational polynomial.
///
/// Result lies in (-pi, pi]; absolute error below [`ATAN2_MAX_ERROR`].
pub fn fast_atan2(y: f32, x: f32) -> f32 {
    if x == 0.0 {
        if y > 0.0 {
            return FRAC_PI_2;
        }
        if y == 0.0 {
            return 0.0;
        }
        return -FRAC_PI_2;
    }

    let z = y / x;
    if libm::fabsf(z) < 1.0 {
        let atan = z / (1.0 + ATAN_K * z * z);
        if x < 0.0 {
            if y < 0.0 {
                return atan - PI;
            }
            return atan + PI;
        }
        atan
    } else {
        let atan = FRAC_PI_2 - z / (z * z + ATAN_K);
        if y < 0.0 {
            return atan - PI;
        }
        atan
    }
}

/// Cubic Hermite ease between `lo` and `hi`.
///
/// 0 below `lo`, 1 at or above `hi`, `3t² - 2t³` in between.
#[inline]
pub fn smoothstep(lo: f32, hi: f32, x: f32) -> f32 {
    if x < lo {
        return 0.0;
    }
    if x >= hi {
        return 1.0;
    }
    let t = (x - lo) / (hi - lo);
    3.0 * t * t - 2.0 * t * t * t
}
