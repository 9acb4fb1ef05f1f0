//! Vector helpers, fast approximations and packed-word conversions.

pub mod approx;
pub mod fixed;
pub mod vector;

pub use approx::{fast_atan2, fast_rsqrt, smoothstep};
pub use vector::{cross, dot, magnitude, normalize};
