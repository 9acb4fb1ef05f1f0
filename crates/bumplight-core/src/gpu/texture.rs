//! Texture metadata handed to the renderer by the asset loader.

use super::registers::{TXRFMT_PIXEL_MASK, TXRFMT_PIXEL_SHIFT};

/// Address of a texture in GPU memory.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq)]
pub struct TextureHandle(pub u32);

/// A GPU-resident texture. Parsing and upload happen outside the core.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub struct TextureInfo {
    pub width: u16,
    pub height: u16,
    /// Hardware texture format code (pixel class, twiddling, palette bank).
    pub format: u32,
    pub handle: TextureHandle,
}

impl TextureInfo {
    /// Pixel class field of the format code.
    pub fn pixel_class(&self) -> u32 {
        (self.format >> TXRFMT_PIXEL_SHIFT) & TXRFMT_PIXEL_MASK
    }
}

/// 3-bit size code for a texture dimension (8 -> 0 ... 1024 -> 7).
///
/// Dimensions that are not a power of two round up; the result is clamped
/// to the 8..=1024 range the hardware supports.
pub fn size_code(dim: u16) -> u32 {
    let pow2 = dim.max(8).min(1024).next_power_of_two();
    pow2.trailing_zeros() - 3
}
