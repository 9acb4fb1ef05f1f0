//! Simulated texture memory and palette RAM.
//!
//! Textures are placed by a bump allocator on 32-byte boundaries and never
//! freed. Palettes go to the bank `dtex` assigned when the texture was
//! loaded.

use anyhow::{bail, Result};
use bumplight_core::gpu::registers::TXRFMT_PIXEL_SHIFT;
use bumplight_core::gpu::{TextureHandle, TextureInfo};
use dtex::{write_bank, LoadedTexture, PALETTE_ENTRIES};

/// Texture memory available to the host.
pub const VRAM_BYTES: usize = 8 * 1024 * 1024;

const TEXTURE_ALIGN: usize = 32;

/// Pixel class 4: bump map, 16 bits per texel.
const BUMP_FORMAT: u32 = 4 << TXRFMT_PIXEL_SHIFT;

pub struct Vram {
    texels: Vec<u8>,
    next: usize,
    palette_ram: Box<[u32; PALETTE_ENTRIES]>,
}

impl Vram {
    pub fn new(bytes: usize) -> Self {
        Self {
            texels: vec![0; bytes],
            next: 0,
            palette_ram: Box::new([0; PALETTE_ENTRIES]),
        }
    }

    /// Bytes still free for textures.
    pub fn free_bytes(&self) -> usize {
        self.texels.len() - self.next
    }

    /// Palette RAM entries holding a color.
    pub fn palette_entries_used(&self) -> usize {
        self.palette_ram.iter().filter(|&&entry| entry != 0).count()
    }

    /// Copy a loaded texture and its palette in and describe it for the
    /// renderer.
    pub fn upload(&mut self, loaded: &LoadedTexture) -> Result<TextureInfo> {
        let header = &loaded.texture.header;
        let handle = self.place(&loaded.texture.data)?;
        if let Some((slot, palette)) = &loaded.palette {
            write_bank(&mut self.palette_ram, *slot, palette)?;
        }
        Ok(TextureInfo {
            width: header.width,
            height: header.height,
            format: loaded.texture.format(),
            handle,
        })
    }

    /// Flat `size` x `size` bump map for runs without a bump map file.
    ///
    /// Every texel points straight up, so the overlay shades the whole tile
    /// by the light direction alone.
    pub fn flat_bump_map(&mut self, size: u16) -> Result<TextureInfo> {
        let texel: [u8; 2] = [0x00, 0xFF];
        let data: Vec<u8> = texel
            .iter()
            .copied()
            .cycle()
            .take(size as usize * size as usize * 2)
            .collect();
        let handle = self.place(&data)?;
        Ok(TextureInfo {
            width: size,
            height: size,
            format: BUMP_FORMAT,
            handle,
        })
    }

    fn place(&mut self, data: &[u8]) -> Result<TextureHandle> {
        let start = self.next.next_multiple_of(TEXTURE_ALIGN);
        let end = start + data.len();
        if end > self.texels.len() {
            bail!(
                "out of texture memory: need {} bytes, {} free",
                data.len(),
                self.texels.len().saturating_sub(start)
            );
        }
        self.texels[start..end].copy_from_slice(data);
        self.next = end;
        log::debug!("placed {} texture bytes at {start:#08x}", data.len());
        Ok(TextureHandle(start as u32))
    }
}
