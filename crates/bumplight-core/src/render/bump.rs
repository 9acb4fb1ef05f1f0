//! Per-tile bump parameters from the aggregate light direction.
//!
//! The hardware bump stage takes one (bumpiness, elevation, azimuth)
//! triple per vertex. Tiles are flat, so all four vertices of a tile get the
//! same word.

use core::f32::consts::TAU;

use glam::{Vec3, Vec4};

use crate::config::BumpMode;
use crate::gpu::vertex::pack_bump;
use crate::math::approx::{fast_atan2, fast_rsqrt};
use crate::math::vector::magnitude_squared;
use crate::render::{Light, Tile};

/// Spherical bump angles for one tile.
#[derive(Clone, Copy, Debug, PartialEq)]
pub struct BumpAngles {
    /// Elevation-like term `T`: inverse distance scaled by 2π.
    pub elevation: f32,
    /// Azimuth `Q` of the direction in the surface plane, in (-π, π].
    pub azimuth: f32,
}

/// Position the bump pass treats as "the light" for every tile.
///
/// `SingleLight` uses the first enabled light. `Centroid` averages all
/// enabled light positions, which is an approximation and not a sum of
/// per-light bump terms. `None` when no light is enabled.
pub fn aggregate_light_position<'a, I>(lights: I, mode: BumpMode) -> Option<Vec4>
where
    I: IntoIterator<Item = &'a Light>,
{
    let mut enabled = lights.into_iter().filter(|l| l.enabled);
    match mode {
        BumpMode::SingleLight => enabled.next().map(|l| l.position),
        BumpMode::Centroid => {
            let mut sum = Vec3::ZERO;
            let mut count = 0u32;
            for light in enabled {
                sum += light.position.truncate();
                count += 1;
            }
            if count == 0 {
                return None;
            }
            let centroid = sum / count as f32;
            Some(centroid.extend(1.0))
        }
    }
}

/// Reference point of a tile: its centre in x and y, at the origin corner's
/// depth.
pub fn reference_point(tile: &Tile) -> Vec4 {
    let origin = tile.vertices[0].position;
    let half = tile.size() * 0.5;
    Vec4::new(origin.x + half.x, origin.y + half.y, origin.z, 1.0)
}

/// Angles for a direction `d` running from the aggregate light to the tile.
///
/// `T = rsqrt(|d|²) · 2π` is derived from inverse distance rather than a
/// polar angle; the hardware output depends on this exact form.
pub fn bump_angles(d: Vec4) -> BumpAngles {
    BumpAngles {
        elevation: fast_rsqrt(magnitude_squared(d)) * TAU,
        azimuth: fast_atan2(d.y, d.x),
    }
}

/// Packed bump parameter word for `tile` lit from `light_position`.
pub fn encode_tile(tile: &Tile, light_position: Vec4, bumpiness: f32) -> u32 {
    let d = reference_point(tile) - light_position;
    let angles = bump_angles(d);
    pack_bump(bumpiness, angles.elevation, angles.azimuth)
}

/// Attach a bump word to all four vertices and clear their base color.
///
/// The bump pass draws black base color; only the offset word matters.
pub fn apply_bump(tile: &mut Tile, word: u32) {
    for vertex in &mut tile.vertices {
        vertex.offset_color = word;
        vertex.color = Vec3::ZERO;
    }
}
