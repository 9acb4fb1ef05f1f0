//! Conversions from f32 color values to the GPU's packed 8-bit formats.

/// Convert a unit-range channel to 8 bits.
///
/// Clamped to [0, 1] first, then scaled by 255 and truncated.
pub fn unit_to_u8(val: f32) -> u8 {
    (val.clamp(0.0, 1.0) * 255.0) as u8
}

/// Narrow a float the way the target's C conversion does: truncate toward
/// zero to an integer, then keep the low 8 bits.
///
/// Used by the bump packing, whose inputs may be negative or exceed 255.
pub fn wrap_to_u8(val: f32) -> u8 {
    (val as i32) as u8
}

/// Pack ARGB unit-range channels into a 32-bit color word (A in [31:24]).
pub fn pack_argb(a: f32, r: f32, g: f32, b: f32) -> u32 {
    argb_to_packed(unit_to_u8(a), unit_to_u8(r), unit_to_u8(g), unit_to_u8(b))
}

/// Pack ARGB bytes into a u32 (A in [31:24], B in [7:0]).
pub fn argb_to_packed(a: u8, r: u8, g: u8, b: u8) -> u32 {
    ((a as u32) << 24) | ((r as u32) << 16) | ((g as u32) << 8) | (b as u32)
}
