//! Surface data model: lights, materials, vertices and tiles.
//!
//! Tiles own their vertices and material; the light array lives in
//! [`crate::scene::Scene`]. Both are plain values passed by reference into
//! each pipeline stage.

pub mod bump;
pub mod grid;
pub mod lighting;
pub mod normal;
pub mod transform;

use glam::{Vec2, Vec3, Vec4};

use crate::gpu::registers;
use crate::gpu::texture::TextureInfo;
use crate::math::vector::point;

/// Distance attenuation coefficients: `1 / (constant + linear·d + quadratic/d)`.
#[derive(Clone, Copy, Debug, PartialEq)]
pub struct Attenuation {
    pub constant: f32,
    pub linear: f32,
    pub quadratic: f32,
}

impl Attenuation {
    /// No falloff: `constant = 1`.
    pub const NONE: Self = Self {
        constant: 1.0,
        linear: 0.0,
        quadratic: 0.0,
    };
}

impl Default for Attenuation {
    fn default() -> Self {
        Self::NONE
    }
}

/// Dual-cone spotlight parameters.
#[derive(Clone, Copy, Debug, PartialEq)]
pub struct Spotlight {
    /// Unit direction the spotlight points along.
    pub direction: Vec4,
    /// Cosine of the full-intensity cone half-angle.
    pub cos_inner: f32,
    /// Cosine of the zero-intensity cone half-angle (`cos_outer < cos_inner`).
    pub cos_outer: f32,
}

/// A point light, optionally restricted to a spotlight cone.
#[derive(Clone, Copy, Debug, PartialEq)]
pub struct Light {
    pub position: Vec4,
    /// Per-channel intensity; values above 1 are allowed.
    pub color: Vec3,
    pub attenuation: Attenuation,
    pub spot: Option<Spotlight>,
    pub enabled: bool,
}

impl Light {
    /// Enabled point light.
    pub fn point(position: Vec3, color: Vec3, attenuation: Attenuation) -> Self {
        Self {
            position: point(position.x, position.y, position.z),
            color,
            attenuation,
            spot: None,
            enabled: true,
        }
    }

    /// Turn this light into a spotlight.
    pub fn with_spot(mut self, spot: Spotlight) -> Self {
        self.spot = Some(spot);
        self
    }
}

/// Surface material of a tile.
#[derive(Clone, Copy, Debug, PartialEq)]
pub struct Material {
    pub emissive: Vec3,
    pub ambient: Vec3,
    pub diffuse: Vec3,
    pub specular: Vec3,
    /// Specular exponent, >= 0.
    pub shininess: f32,
    pub bump_map: Option<TextureInfo>,
    pub bump_enabled: bool,
}

impl Material {
    /// Pure white diffuse, no bump map.
    pub const fn diffuse_white() -> Self {
        Self {
            emissive: Vec3::ZERO,
            ambient: Vec3::ZERO,
            diffuse: Vec3::ONE,
            specular: Vec3::ZERO,
            shininess: 1.0,
            bump_map: None,
            bump_enabled: false,
        }
    }

    /// Attach and enable a bump map.
    pub fn with_bump_map(mut self, texture: TextureInfo) -> Self {
        self.bump_map = Some(texture);
        self.bump_enabled = true;
        self
    }

    /// The bump map, if one is attached and enabled.
    pub fn active_bump_map(&self) -> Option<&TextureInfo> {
        if self.bump_enabled {
            self.bump_map.as_ref()
        } else {
            None
        }
    }
}

impl Default for Material {
    fn default() -> Self {
        Self::diffuse_white()
    }
}

/// Position of a vertex within its triangle strip.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq)]
pub enum StripFlag {
    #[default]
    Strip,
    /// Last vertex of a strip; lets the rasterizer find primitive boundaries.
    EndOfStrip,
}

impl StripFlag {
    /// Command word for a vertex record carrying this flag.
    pub const fn command_word(self) -> u32 {
        match self {
            StripFlag::Strip => registers::CMD_VERTEX,
            StripFlag::EndOfStrip => registers::CMD_VERTEX_EOL,
        }
    }
}

/// One tile corner.
#[derive(Clone, Copy, Debug, PartialEq)]
pub struct Vertex {
    /// Source position (w = 1).
    pub position: Vec4,
    pub uv: Vec2,
    /// Running lit color. Scratch: zero at the start of each lighting pass
    /// and after each draw.
    pub color: Vec3,
    /// Output of the transform stage, undivided.
    pub transformed: Vec4,
    pub flag: StripFlag,
    /// Packed offset color; carries the bump parameter in the bump pass.
    pub offset_color: u32,
}

impl Vertex {
    fn new(x: f32, y: f32, z: f32, u: f32, v: f32, flag: StripFlag) -> Self {
        Self {
            position: point(x, y, z),
            uv: Vec2::new(u, v),
            color: Vec3::ZERO,
            transformed: Vec4::ZERO,
            flag,
            offset_color: 0,
        }
    }
}

/// An axis-aligned quad drawn as a four-vertex strip.
///
/// Corner order: 0 = origin, 1 = +x, 2 = +y, 3 = +x+y (end of strip).
#[derive(Clone, Copy, Debug, PartialEq)]
pub struct Tile {
    pub vertices: [Vertex; 4],
    pub material: Material,
    /// Flat surface normal shared by all four vertices.
    pub normal: Vec4,
}

impl Tile {
    /// Build a `w` x `h` tile with its origin corner at (x, y, z).
    pub fn new(x: f32, y: f32, z: f32, w: f32, h: f32, material: Material) -> Self {
        let vertices = [
            Vertex::new(x, y, z, 0.0, 0.0, StripFlag::Strip),
            Vertex::new(x + w, y, z, 1.0, 0.0, StripFlag::Strip),
            Vertex::new(x, y + h, z, 0.0, 1.0, StripFlag::Strip),
            Vertex::new(x + w, y + h, z, 1.0, 1.0, StripFlag::EndOfStrip),
        ];
        let mut tile = Self {
            vertices,
            material,
            normal: Vec4::new(0.0, 0.0, 1.0, 1.0),
        };
        tile.refresh_normal();
        tile
    }

    /// Move the four corners and recompute the surface normal.
    pub fn set_corners(&mut self, corners: [Vec3; 4]) {
        for (vertex, corner) in self.vertices.iter_mut().zip(corners) {
            vertex.position = point(corner.x, corner.y, corner.z);
        }
        self.refresh_normal();
    }

    /// Recompute the flat normal from the current corner positions.
    pub fn refresh_normal(&mut self) {
        self.normal = normal::surface_normal(
            self.vertices[0].position,
            self.vertices[1].position,
            self.vertices[2].position,
        );
    }

    /// Zero the running color and offset word of every vertex.
    pub fn reset_colors(&mut self) {
        for vertex in &mut self.vertices {
            vertex.color = Vec3::ZERO;
            vertex.offset_color = 0;
        }
    }

    /// Tile extent along x and y.
    pub fn size(&self) -> Vec2 {
        let origin = self.vertices[0].position;
        let far = self.vertices[3].position;
        Vec2::new(far.x - origin.x, far.y - origin.y)
    }
}
