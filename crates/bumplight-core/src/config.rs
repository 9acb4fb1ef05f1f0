//! Layout constants and startup configuration.
//!
//! Everything here is fixed once the frame loop starts; there is no hot
//! reload.

use glam::{Vec3, Vec4};

/// Display width in pixels.
pub const SCREEN_WIDTH: u32 = 640;
/// Display height in pixels.
pub const SCREEN_HEIGHT: u32 = 480;

/// Edge length of one square tile, in pixels.
pub const TILE_SIZE: u32 = 32;
/// Tiles per grid row.
pub const GRID_COLUMNS: usize = (SCREEN_WIDTH / TILE_SIZE) as usize;
/// Tile rows in the grid.
pub const GRID_ROWS: usize = (SCREEN_HEIGHT / TILE_SIZE) as usize;
/// Number of tiles in the layer.
pub const LAYER_SIZE: usize = GRID_COLUMNS * GRID_ROWS;
/// Depth of the surface plane.
pub const LAYER_Z: f32 = 1.0;

/// Capacity of the light array.
pub const MAX_LIGHTS: usize = 3;

/// Bytes reserved for each command list. One tile costs 5 records
/// (header + 4 vertices), so 512 KiB holds the full layer many times over.
pub const LIST_BUFFER_BYTES: usize = 512 * 1024;
/// Records per command list buffer.
pub const LIST_BUFFER_RECORDS: usize = LIST_BUFFER_BYTES / bumplight_hal::RECORD_BYTES;

/// Frames between statistics log lines.
pub const STATS_INTERVAL: u64 = 120;

/// Which aggregate light position feeds the bump encoder.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq)]
pub enum BumpMode {
    /// Direction to the first active light only.
    SingleLight,
    /// Direction to the centroid of all active lights.
    #[default]
    Centroid,
}

/// Which vertex positions the lighting model reads.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq)]
pub enum LightingSpace {
    /// Source (model/world space) positions.
    #[default]
    Model,
    /// Output of the transform stage.
    Transformed,
}

/// View/projection applied by the transform stage.
#[derive(Clone, Copy, Debug, Default, PartialEq)]
pub enum Projection {
    /// Identity: vertices are submitted in screen space as authored.
    #[default]
    Identity,
    /// Fixed frustum built from the `Frustum` parameters.
    Frustum(Frustum),
}

/// Frustum parameters.
#[derive(Clone, Copy, Debug, PartialEq)]
pub struct Frustum {
    /// cot(fov_y / 2).
    pub cot_fovy_2: f32,
    pub znear: f32,
    pub zfar: f32,
}

impl Default for Frustum {
    fn default() -> Self {
        Self {
            cot_fovy_2: 1.0,
            znear: 0.1,
            zfar: 255.0,
        }
    }
}

/// Startup configuration of the renderer.
#[derive(Clone, Copy, Debug, PartialEq)]
pub struct RenderConfig {
    /// Scene-wide ambient color, modulated by each material's ambient term.
    pub global_ambient: Vec3,
    /// Viewer position for the specular half-vector.
    pub eye: Vec4,
    pub projection: Projection,
    pub lighting_space: LightingSpace,
    pub bump_mode: BumpMode,
    /// Bump strength handed to the bump packing, in [0, 1].
    pub bumpiness: f32,
}

impl Default for RenderConfig {
    fn default() -> Self {
        Self {
            global_ambient: Vec3::ZERO,
            eye: Vec4::new(
                SCREEN_WIDTH as f32 / 2.0,
                SCREEN_HEIGHT as f32 / 2.0,
                256.0,
                1.0,
            ),
            projection: Projection::Identity,
            lighting_space: LightingSpace::Model,
            bump_mode: BumpMode::Centroid,
            bumpiness: 1.0,
        }
    }
}
