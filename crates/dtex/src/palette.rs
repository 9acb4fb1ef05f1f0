//! DPAL palette files and palette RAM bank allocation.
//!
//! Palette RAM holds 1024 ARGB entries. The first 512 are split into 32
//! banks of 16 for 4bpp textures, the second 512 into 2 banks of 256 for
//! 8bpp textures. Banks are handed out round robin; once every bank has
//! been used the oldest is overwritten.

use bumplight_core::gpu::registers::{TXRFMT_PAL4_BANK_SHIFT, TXRFMT_PAL8_BANK_SHIFT};

use crate::error::AssetError;
use crate::texture::{check_magic, read_u32};

pub const PALETTE_MAGIC: [u8; 4] = *b"DPAL";
pub const PALETTE_HEADER_BYTES: usize = 8;

/// Total palette RAM entries.
pub const PALETTE_ENTRIES: usize = 1024;

/// Palette layout of a palettized texture.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum PaletteKind {
    Bpp4,
    Bpp8,
}

impl PaletteKind {
    /// Entries per bank.
    pub const fn bank_entries(self) -> usize {
        match self {
            PaletteKind::Bpp4 => 16,
            PaletteKind::Bpp8 => 256,
        }
    }

    pub const fn bank_count(self) -> u32 {
        match self {
            PaletteKind::Bpp4 => 32,
            PaletteKind::Bpp8 => 2,
        }
    }

    /// First palette RAM entry of this kind's region.
    const fn region_base(self) -> usize {
        match self {
            PaletteKind::Bpp4 => 0,
            PaletteKind::Bpp8 => 512,
        }
    }
}

/// A DPAL palette: packed ARGB8888 entries.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct Palette {
    pub entries: Vec<u32>,
}

/// Parse a complete DPAL file.
pub fn parse_palette(bytes: &[u8]) -> Result<Palette, AssetError> {
    check_magic(bytes, PALETTE_MAGIC, "palette header")?;
    if bytes.len() < PALETTE_HEADER_BYTES {
        return Err(AssetError::Truncated {
            what: "palette header",
            needed: PALETTE_HEADER_BYTES,
            available: bytes.len(),
        });
    }
    let count = read_u32(bytes, 4) as usize;
    let body = &bytes[PALETTE_HEADER_BYTES..];
    let needed = count * 4;
    if body.len() < needed {
        return Err(AssetError::Truncated {
            what: "palette entries",
            needed,
            available: body.len(),
        });
    }
    if body.len() > needed {
        return Err(AssetError::SizeMismatch {
            declared: needed,
            actual: body.len(),
        });
    }
    let entries = body
        .chunks_exact(4)
        .map(|c| u32::from_le_bytes([c[0], c[1], c[2], c[3]]))
        .collect();
    Ok(Palette { entries })
}

/// Serialize a palette back into DPAL form.
pub fn encode_palette(palette: &Palette) -> Vec<u8> {
    let mut out = Vec::with_capacity(PALETTE_HEADER_BYTES + palette.entries.len() * 4);
    out.extend_from_slice(&PALETTE_MAGIC);
    out.extend_from_slice(&(palette.entries.len() as u32).to_le_bytes());
    for entry in &palette.entries {
        out.extend_from_slice(&entry.to_le_bytes());
    }
    out
}

/// A bank assigned to one texture.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub struct PaletteSlot {
    pub kind: PaletteKind,
    /// Bank number within the kind's region.
    pub bank: u32,
}

impl PaletteSlot {
    /// First palette RAM entry of the bank.
    pub fn base_entry(&self) -> usize {
        self.kind.region_base() + self.bank as usize * self.kind.bank_entries()
    }

    /// Bank selector bits to OR into the texture format code.
    pub fn format_bits(&self) -> u32 {
        match self.kind {
            PaletteKind::Bpp4 => self.bank << TXRFMT_PAL4_BANK_SHIFT,
            PaletteKind::Bpp8 => (self.bank + 2) << TXRFMT_PAL8_BANK_SHIFT,
        }
    }
}

/// Round-robin allocator over the palette RAM banks.
#[derive(Clone, Debug, Default)]
pub struct PaletteBanks {
    next_4bpp: u32,
    next_8bpp: u32,
}

impl PaletteBanks {
    pub fn new() -> Self {
        Self::default()
    }

    /// Take the next bank of `kind`, wrapping to bank 0 after the last.
    pub fn allocate(&mut self, kind: PaletteKind) -> PaletteSlot {
        let next = match kind {
            PaletteKind::Bpp4 => &mut self.next_4bpp,
            PaletteKind::Bpp8 => &mut self.next_8bpp,
        };
        let bank = *next;
        *next += 1;
        if *next == kind.bank_count() {
            log::debug!("{kind:?} palette banks exhausted, wrapping");
            *next = 0;
        }
        PaletteSlot { kind, bank }
    }
}

/// Copy `palette` into its bank of `ram`.
///
/// Fails when the palette has more entries than the bank holds.
pub fn write_bank(
    ram: &mut [u32; PALETTE_ENTRIES],
    slot: PaletteSlot,
    palette: &Palette,
) -> Result<(), AssetError> {
    let capacity = slot.kind.bank_entries();
    if palette.entries.len() > capacity {
        return Err(AssetError::Palette(format!(
            "{} entries do not fit a {:?} bank of {}",
            palette.entries.len(),
            slot.kind,
            capacity
        )));
    }
    let base = slot.base_entry();
    ram[base..base + palette.entries.len()].copy_from_slice(&palette.entries);
    Ok(())
}
