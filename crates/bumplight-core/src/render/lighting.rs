//! Per-vertex lighting: ambient, diffuse and Blinn specular with distance
//! attenuation and dual-cone spotlight falloff.

use glam::{Vec3, Vec4};

use crate::config::{LightingSpace, RenderConfig};
use crate::math::approx::smoothstep;
use crate::math::vector::{dot, magnitude, normalize};
use crate::render::{Light, Material, Spotlight, Tile};

/// Scene-wide inputs of the lighting model.
#[derive(Clone, Copy, Debug, PartialEq)]
pub struct LightingEnv {
    pub global_ambient: Vec3,
    /// Viewer position for the specular half-vector.
    pub eye: Vec4,
}

impl LightingEnv {
    pub fn from_config(config: &RenderConfig) -> Self {
        Self {
            global_ambient: config.global_ambient,
            eye: config.eye,
        }
    }
}

/// Distance attenuation: `1 / (aa + ab·d + ac/d)`.
///
/// The third term divides by the raw distance, not its square. It is left
/// out entirely when its coefficient is zero, so a light sitting on a vertex
/// does not turn the result into NaN.
#[inline]
pub fn attenuation(light: &Light, distance: f32) -> f32 {
    let a = &light.attenuation;
    let quadratic = if a.quadratic == 0.0 {
        0.0
    } else {
        a.quadratic / distance
    };
    1.0 / (a.constant + a.linear * distance + quadratic)
}

/// Spotlight cone factor for a vertex at `position`.
///
/// 1 inside the inner cone, 0 outside the outer cone, cubic ease between.
#[inline]
pub fn spot_factor(light_position: Vec4, spot: &Spotlight, position: Vec4) -> f32 {
    let to_vertex = normalize(position - light_position);
    let cos_direction = dot(to_vertex, spot.direction);
    smoothstep(spot.cos_outer, spot.cos_inner, cos_direction)
}

/// Color contributed by one light to a vertex at `position` with surface
/// `normal`.
///
/// Includes the material's emissive and ambient terms, so every light adds
/// them once.
pub fn light_contribution(
    position: Vec4,
    normal: Vec4,
    light: &Light,
    material: &Material,
    env: &LightingEnv,
) -> Vec3 {
    let to_light = light.position - position;
    let l = normalize(to_light);
    let diffuse_factor = dot(normal, l).max(0.0);

    let atten = attenuation(light, magnitude(to_light));

    let v = normalize(env.eye - position);
    let h = normalize(l + v);
    let mut specular_factor = libm::powf(dot(normal, h).max(0.0), material.shininess);
    if diffuse_factor <= 0.0 {
        specular_factor = 0.0;
    }

    let spot = match &light.spot {
        Some(spot) => spot_factor(light.position, spot, position),
        None => 1.0,
    };

    let ambient = material.ambient * env.global_ambient;
    let diffuse = material.diffuse * light.color * (diffuse_factor * atten * spot);
    let specular = material.specular * light.color * (specular_factor * atten * spot);

    material.emissive + ambient + diffuse + specular
}

/// Add `delta` to `color` and clamp each channel to [0, 1].
///
/// Clamping happens after every light, so saturation depends on the order
/// in which lights are applied.
#[inline]
pub fn accumulate_clamped(color: &mut Vec3, delta: Vec3) {
    *color = (*color + delta).clamp(Vec3::ZERO, Vec3::ONE);
}

/// Apply one light to all four vertices of a tile.
pub fn light_tile(tile: &mut Tile, light: &Light, env: &LightingEnv, space: LightingSpace) {
    let normal = tile.normal;
    let material = tile.material;
    for vertex in &mut tile.vertices {
        let position = match space {
            LightingSpace::Model => vertex.position,
            LightingSpace::Transformed => vertex.transformed,
        };
        let delta = light_contribution(position, normal, light, &material, env);
        accumulate_clamped(&mut vertex.color, delta);
    }
}

/// Reset the tile's colors and accumulate every enabled light, in order.
/// Returns the number of lights applied.
pub fn light_tile_all<'a, I>(
    tile: &mut Tile,
    lights: I,
    env: &LightingEnv,
    space: LightingSpace,
) -> usize
where
    I: IntoIterator<Item = &'a Light>,
{
    tile.reset_colors();
    let mut applied = 0;
    for light in lights.into_iter().filter(|l| l.enabled) {
        light_tile(tile, light, env, space);
        applied += 1;
    }
    applied
}
