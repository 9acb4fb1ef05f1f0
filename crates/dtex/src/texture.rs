//! DTEX texture files: a 16-byte little-endian header followed by the
//! texel payload exactly as the GPU stores it.
//!
//! ```text
//! 0   'DTEX'
//! 4   u16 width
//! 6   u16 height
//! 8   u32 format code
//! 12  u32 payload size
//! 16  payload
//! ```

use bumplight_core::gpu::registers::{
    TXRFMT_PIXEL_MASK, TXRFMT_PIXEL_PAL4BPP, TXRFMT_PIXEL_PAL8BPP, TXRFMT_PIXEL_SHIFT,
};

use crate::error::AssetError;
use crate::palette::PaletteKind;

pub const TEXTURE_MAGIC: [u8; 4] = *b"DTEX";
pub const TEXTURE_HEADER_BYTES: usize = 16;

/// Parsed DTEX header.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub struct TextureHeader {
    pub width: u16,
    pub height: u16,
    pub format: u32,
    pub size: u32,
}

impl TextureHeader {
    /// Pixel class field of the format code.
    pub fn pixel_class(&self) -> u32 {
        (self.format >> TXRFMT_PIXEL_SHIFT) & TXRFMT_PIXEL_MASK
    }

    /// Palette layout the texture needs, if it is palettized.
    pub fn palette_kind(&self) -> Option<PaletteKind> {
        match self.pixel_class() {
            TXRFMT_PIXEL_PAL4BPP => Some(PaletteKind::Bpp4),
            TXRFMT_PIXEL_PAL8BPP => Some(PaletteKind::Bpp8),
            _ => None,
        }
    }
}

/// A texture ready for upload.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct Texture {
    pub header: TextureHeader,
    pub data: Vec<u8>,
}

impl Texture {
    /// Format code to put in poly headers. Includes the palette bank once
    /// one has been assigned.
    pub fn format(&self) -> u32 {
        self.header.format
    }
}

pub(crate) fn check_magic(bytes: &[u8], expected: [u8; 4], what: &'static str) -> Result<(), AssetError> {
    let found: [u8; 4] = bytes
        .get(..4)
        .and_then(|s| s.try_into().ok())
        .ok_or(AssetError::Truncated {
            what,
            needed: 4,
            available: bytes.len(),
        })?;
    if found != expected {
        return Err(AssetError::BadMagic { expected, found });
    }
    Ok(())
}

pub(crate) fn read_u16(bytes: &[u8], offset: usize) -> u16 {
    u16::from_le_bytes([bytes[offset], bytes[offset + 1]])
}

pub(crate) fn read_u32(bytes: &[u8], offset: usize) -> u32 {
    u32::from_le_bytes([
        bytes[offset],
        bytes[offset + 1],
        bytes[offset + 2],
        bytes[offset + 3],
    ])
}

/// Parse a complete DTEX file.
pub fn parse_texture(bytes: &[u8]) -> Result<Texture, AssetError> {
    check_magic(bytes, TEXTURE_MAGIC, "texture header")?;
    if bytes.len() < TEXTURE_HEADER_BYTES {
        return Err(AssetError::Truncated {
            what: "texture header",
            needed: TEXTURE_HEADER_BYTES,
            available: bytes.len(),
        });
    }

    let header = TextureHeader {
        width: read_u16(bytes, 4),
        height: read_u16(bytes, 6),
        format: read_u32(bytes, 8),
        size: read_u32(bytes, 12),
    };

    let payload = &bytes[TEXTURE_HEADER_BYTES..];
    let declared = header.size as usize;
    if payload.len() < declared {
        return Err(AssetError::Truncated {
            what: "texture payload",
            needed: declared,
            available: payload.len(),
        });
    }
    if payload.len() > declared {
        return Err(AssetError::SizeMismatch {
            declared,
            actual: payload.len(),
        });
    }

    Ok(Texture {
        header,
        data: payload.to_vec(),
    })
}

/// Serialize a texture back into DTEX form.
pub fn encode_texture(texture: &Texture) -> Vec<u8> {
    let mut out = Vec::with_capacity(TEXTURE_HEADER_BYTES + texture.data.len());
    out.extend_from_slice(&TEXTURE_MAGIC);
    out.extend_from_slice(&texture.header.width.to_le_bytes());
    out.extend_from_slice(&texture.header.height.to_le_bytes());
    out.extend_from_slice(&texture.header.format.to_le_bytes());
    out.extend_from_slice(&(texture.data.len() as u32).to_le_bytes());
    out.extend_from_slice(&texture.data);
    out
}
