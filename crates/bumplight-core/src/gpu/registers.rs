//! Command words and poly header bit fields of the command-list interface.

/// Poly header command base.
pub const CMD_POLYHDR: u32 = 0x8084_0000;
/// Vertex inside a strip.
pub const CMD_VERTEX: u32 = 0xE000_0000;
/// Last vertex of a strip.
pub const CMD_VERTEX_EOL: u32 = 0xF000_0000;
/// Top three bits of a command word select the record type.
pub const CMD_TYPE_MASK: u32 = 0xE000_0000;
/// Record type of a poly header.
pub const CMD_TYPE_POLYHDR: u32 = 0x8000_0000;
/// End-of-strip bit of a vertex command word.
pub const CMD_EOL_BIT: u32 = 0x1000_0000;

// Header command word fields.
pub const TA_CMD_TYPE_SHIFT: u32 = 24;
pub const TA_CMD_TYPE_MASK: u32 = 7 << TA_CMD_TYPE_SHIFT;
pub const TA_CMD_TEXTURED: u32 = 1 << 3;
pub const TA_CMD_SPECULAR_SHIFT: u32 = 2;
pub const TA_CMD_SHADE_SHIFT: u32 = 1;

// Polygon mode 1.
pub const PM1_DEPTHCMP_SHIFT: u32 = 29;
pub const PM1_CULLING_SHIFT: u32 = 27;
pub const PM1_DEPTHWRITE_SHIFT: u32 = 26;
pub const PM1_TXRENABLE_SHIFT: u32 = 25;

// Polygon mode 2.
pub const PM2_SRCBLEND_SHIFT: u32 = 29;
pub const PM2_DSTBLEND_SHIFT: u32 = 26;
pub const PM2_FOG_SHIFT: u32 = 22;
pub const PM2_CLAMP_SHIFT: u32 = 21;
pub const PM2_ALPHA_SHIFT: u32 = 20;
pub const PM2_TXRALPHA_SHIFT: u32 = 19;
pub const PM2_FILTER_SHIFT: u32 = 12;
pub const PM2_MIPBIAS_SHIFT: u32 = 8;
pub const PM2_TXRENV_SHIFT: u32 = 6;
pub const PM2_USIZE_SHIFT: u32 = 3;
pub const PM2_VSIZE_SHIFT: u32 = 0;

// Polygon mode 3.
pub const PM3_TXR_ADDR_MASK: u32 = 0x00FF_FFF8;

/// Unused header words are filled with this value.
pub const HEADER_PAD: u32 = 0xFFFF_FFFF;

/// Default mipmap bias ("normal").
pub const MIPBIAS_NORMAL: u32 = 4;

// Texture format code fields.
pub const TXRFMT_PIXEL_SHIFT: u32 = 27;
pub const TXRFMT_PIXEL_MASK: u32 = 7;
pub const TXRFMT_PIXEL_PAL4BPP: u32 = 5;
pub const TXRFMT_PIXEL_PAL8BPP: u32 = 6;
pub const TXRFMT_PAL4_BANK_SHIFT: u32 = 21;
pub const TXRFMT_PAL8_BANK_SHIFT: u32 = 25;

/// Depth comparison function.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq)]
pub enum DepthCompare {
    Never = 0,
    Less = 1,
    Equal = 2,
    LessEqual = 3,
    #[default]
    Greater = 4,
    NotEqual = 5,
    GreaterEqual = 6,
    Always = 7,
}

/// Face culling mode.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq)]
pub enum Culling {
    None = 0,
    Small = 1,
    #[default]
    Ccw = 2,
    Cw = 3,
}

/// Blend factor.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum Blend {
    Zero = 0,
    One = 1,
    DestColor = 2,
    InvDestColor = 3,
    SrcAlpha = 4,
    InvSrcAlpha = 5,
    DestAlpha = 6,
    InvDestAlpha = 7,
}

/// Texture filter.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq)]
pub enum Filter {
    Nearest = 0,
    #[default]
    Bilinear = 2,
    Trilinear1 = 4,
    Trilinear2 = 6,
}

/// Fog mode.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq)]
pub enum Fog {
    Table = 0,
    Vertex = 1,
    #[default]
    Disabled = 2,
    Table2 = 3,
}

/// How texels combine with the vertex color.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq)]
pub enum TexEnv {
    Replace = 0,
    Modulate = 1,
    Decal = 2,
    #[default]
    ModulateAlpha = 3,
}

/// Shading mode.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq)]
pub enum Shading {
    Flat = 0,
    #[default]
    Gouraud = 1,
}
