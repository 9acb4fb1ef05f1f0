/// Error types for asset loading.
pub mod error;

/// DPAL palettes and palette bank allocation.
pub mod palette;

/// DTEX texture parsing.
pub mod texture;

pub use error::AssetError;
pub use palette::{
    parse_palette, write_bank, Palette, PaletteBanks, PaletteKind, PaletteSlot, PALETTE_ENTRIES,
};
pub use texture::{parse_texture, Texture, TextureHeader};

use std::fs;
use std::path::{Path, PathBuf};

/// A texture loaded from disk, with its palette if it is palettized.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct LoadedTexture {
    /// Texture whose format code already carries the palette bank bits.
    pub texture: Texture,
    pub palette: Option<(PaletteSlot, Palette)>,
}

/// Path of the palette belonging to `texture_path`: the texture path with
/// `.pal` appended.
pub fn palette_path(texture_path: &Path) -> PathBuf {
    let mut name = texture_path.as_os_str().to_owned();
    name.push(".pal");
    PathBuf::from(name)
}

/// Read and parse a DPAL file.
pub fn load_palette(path: &Path) -> Result<Palette, AssetError> {
    let bytes = fs::read(path)?;
    parse_palette(&bytes)
}

/// Read a DTEX file and, for palettized formats, its `.pal` companion.
///
/// Palettized textures get the next free bank from `banks`; the bank
/// selector is ORed into the returned format code.
pub fn load_texture(path: &Path, banks: &mut PaletteBanks) -> Result<LoadedTexture, AssetError> {
    let bytes = fs::read(path)?;
    let mut texture = parse_texture(&bytes)?;
    log::info!(
        "Loaded texture {}: {}x{}, format {:#010x}, {} bytes",
        path.display(),
        texture.header.width,
        texture.header.height,
        texture.header.format,
        texture.data.len()
    );

    let Some(kind) = texture.header.palette_kind() else {
        return Ok(LoadedTexture {
            texture,
            palette: None,
        });
    };

    let pal_path = palette_path(path);
    let palette = load_palette(&pal_path)?;
    if palette.entries.len() > kind.bank_entries() {
        return Err(AssetError::Palette(format!(
            "{}: {} entries do not fit a {:?} bank",
            pal_path.display(),
            palette.entries.len(),
            kind
        )));
    }
    let slot = banks.allocate(kind);
    texture.header.format |= slot.format_bits();
    log::info!(
        "  palette {}: {} entries in {:?} bank {}",
        pal_path.display(),
        palette.entries.len(),
        kind,
        slot.bank
    );

    Ok(LoadedTexture {
        texture,
        palette: Some((slot, palette)),
    })
}
