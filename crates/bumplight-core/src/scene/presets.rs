//! Startup light set and surface material.

use glam::Vec3;

use crate::config::{MAX_LIGHTS, SCREEN_HEIGHT, SCREEN_WIDTH};
use crate::gpu::texture::TextureInfo;
use crate::render::{Attenuation, Light, Material};

/// Height of the preset lights above the origin plane.
pub const LIGHT_Z: f32 = 10.0;

/// Intensity of each preset light's lit channels.
pub const LIGHT_INTENSITY: f32 = 5.0;

/// Three point lights without falloff: white in the top-left corner, red
/// near the top edge, blue right of centre.
pub fn default_lights() -> [Light; MAX_LIGHTS] {
    let w = SCREEN_WIDTH as f32;
    let h = SCREEN_HEIGHT as f32;
    [
        Light::point(
            Vec3::new(0.0, 0.0, LIGHT_Z),
            Vec3::splat(LIGHT_INTENSITY),
            Attenuation::NONE,
        ),
        Light::point(
            Vec3::new(w / 2.0, 64.0, LIGHT_Z),
            Vec3::new(LIGHT_INTENSITY, 0.0, 0.0),
            Attenuation::NONE,
        ),
        Light::point(
            Vec3::new(w * 0.75, h / 2.0, LIGHT_Z),
            Vec3::new(0.0, 0.0, LIGHT_INTENSITY),
            Attenuation::NONE,
        ),
    ]
}

/// Surface material of the layer: white diffuse, optionally bump mapped.
pub fn surface_material(bump_map: Option<TextureInfo>) -> Material {
    let material = Material::diffuse_white();
    match bump_map {
        Some(texture) => material.with_bump_map(texture),
        None => material,
    }
}

