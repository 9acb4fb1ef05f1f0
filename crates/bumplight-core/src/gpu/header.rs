//! Polygon contexts and their compiled poly header records.
//!
//! A [`PolyContext`] describes render state in named fields. `compile()`
//! turns it into the four state words the GPU expects at the start of each
//! primitive batch.

use bumplight_hal::{ListKind, Record};

use super::registers::*;
use super::texture::{size_code, TextureInfo};

/// Texture state of a poly context.
#[derive(Clone, Copy, Debug, PartialEq)]
pub struct TextureState {
    pub info: TextureInfo,
    pub filter: Filter,
    pub env: TexEnv,
    /// Use the texture's alpha channel.
    pub alpha: bool,
    pub mipmap: bool,
    pub mipmap_bias: u32,
}

impl TextureState {
    /// Bilinear, modulate-alpha, no mipmaps.
    pub fn new(info: TextureInfo) -> Self {
        Self {
            info,
            filter: Filter::Bilinear,
            env: TexEnv::ModulateAlpha,
            alpha: true,
            mipmap: false,
            mipmap_bias: MIPBIAS_NORMAL,
        }
    }
}

/// Render state for one batch of primitives.
#[derive(Clone, Copy, Debug, PartialEq)]
pub struct PolyContext {
    pub list: ListKind,
    pub shading: Shading,
    /// Vertex/blend alpha.
    pub alpha: bool,
    /// Offset color (oargb) enable.
    pub specular: bool,
    pub culling: Culling,
    pub depth_compare: DepthCompare,
    pub depth_write: bool,
    pub blend_src: Blend,
    pub blend_dst: Blend,
    pub fog: Fog,
    pub color_clamp: bool,
    pub texture: Option<TextureState>,
}

impl PolyContext {
    /// Untextured Gouraud context with the list's default blending.
    pub fn colored(list: ListKind) -> Self {
        let translucent = matches!(list, ListKind::Translucent);
        Self {
            list,
            shading: Shading::Gouraud,
            alpha: translucent,
            specular: false,
            culling: Culling::Ccw,
            depth_compare: DepthCompare::Greater,
            depth_write: true,
            blend_src: if translucent { Blend::SrcAlpha } else { Blend::One },
            blend_dst: if translucent {
                Blend::InvSrcAlpha
            } else {
                Blend::Zero
            },
            fog: Fog::Disabled,
            color_clamp: false,
            texture: None,
        }
    }

    /// Textured context with the list's default blending.
    pub fn textured(list: ListKind, texture: TextureInfo) -> Self {
        Self {
            texture: Some(TextureState::new(texture)),
            ..Self::colored(list)
        }
    }

    /// Lit surface pass: opaque, Gouraud, bilinear, ONE/ZERO.
    pub fn opaque_surface(texture: Option<TextureInfo>) -> Self {
        match texture {
            Some(info) => Self::textured(ListKind::Opaque, info),
            None => Self::colored(ListKind::Opaque),
        }
    }

    /// Bump overlay pass: translucent, alpha blended, offset color on,
    /// no depth writes.
    pub fn bump_overlay(bump_map: TextureInfo) -> Self {
        Self {
            specular: true,
            depth_write: false,
            ..Self::textured(ListKind::Translucent, bump_map)
        }
    }

    pub fn compile(&self) -> PolyHeader {
        let mut cmd = CMD_POLYHDR & !TA_CMD_TYPE_MASK;
        cmd |= self.list.type_code() << TA_CMD_TYPE_SHIFT;
        cmd |= (self.shading as u32) << TA_CMD_SHADE_SHIFT;
        cmd |= (self.specular as u32) << TA_CMD_SPECULAR_SHIFT;
        if self.texture.is_some() {
            cmd |= TA_CMD_TEXTURED;
        }

        let mut mode1 = (self.depth_compare as u32) << PM1_DEPTHCMP_SHIFT;
        mode1 |= (self.culling as u32) << PM1_CULLING_SHIFT;
        mode1 |= (!self.depth_write as u32) << PM1_DEPTHWRITE_SHIFT;
        if self.texture.is_some() {
            mode1 |= 1 << PM1_TXRENABLE_SHIFT;
        }

        let mut mode2 = (self.blend_src as u32) << PM2_SRCBLEND_SHIFT;
        mode2 |= (self.blend_dst as u32) << PM2_DSTBLEND_SHIFT;
        mode2 |= (self.fog as u32) << PM2_FOG_SHIFT;
        mode2 |= (self.color_clamp as u32) << PM2_CLAMP_SHIFT;
        mode2 |= (self.alpha as u32) << PM2_ALPHA_SHIFT;

        let mut mode3 = 0;
        if let Some(tex) = &self.texture {
            // Texture alpha field is a disable bit.
            mode2 |= (!tex.alpha as u32) << PM2_TXRALPHA_SHIFT;
            mode2 |= (tex.filter as u32) << PM2_FILTER_SHIFT;
            mode2 |= tex.mipmap_bias << PM2_MIPBIAS_SHIFT;
            mode2 |= (tex.env as u32) << PM2_TXRENV_SHIFT;
            mode2 |= size_code(tex.info.width) << PM2_USIZE_SHIFT;
            mode2 |= size_code(tex.info.height) << PM2_VSIZE_SHIFT;

            mode3 = ((tex.mipmap as u32) << 31) | tex.info.format;
            mode3 |= (tex.info.handle.0 & PM3_TXR_ADDR_MASK) >> 3;
        }

        PolyHeader {
            cmd,
            mode1,
            mode2,
            mode3,
        }
    }
}

/// Compiled header state words.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub struct PolyHeader {
    pub cmd: u32,
    pub mode1: u32,
    pub mode2: u32,
    pub mode3: u32,
}

impl PolyHeader {
    /// `[cmd, mode1, mode2, mode3, d1..d4]` with padding words all ones.
    pub fn to_record(&self) -> Record {
        Record([
            self.cmd, self.mode1, self.mode2, self.mode3, HEADER_PAD, HEADER_PAD, HEADER_PAD,
            HEADER_PAD,
        ])
    }

    /// List type encoded in the command word.
    pub fn list_type(&self) -> u32 {
        (self.cmd & TA_CMD_TYPE_MASK) >> TA_CMD_TYPE_SHIFT
    }
}
