//! Scene state: the light array, the selected light and the user toggles.
//!
//! The scene is only mutated between frames, by [`Scene::apply`].

pub mod presets;

use bumplight_hal::{ColorChannel, InputEvent};
use heapless::Vec;

use crate::config::MAX_LIGHTS;
use crate::render::Light;

/// Distance a light moves per input step.
pub const MOVE_STEP: f32 = 4.0;
/// Color channel increment per input step.
pub const COLOR_STEP: f32 = 1.0;
/// Color channels above this value wrap to zero.
pub const COLOR_MAX: f32 = 10.0;

/// What the host loop should do after an input event.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum SceneControl {
    Continue,
    Quit,
}

/// Lights and toggles for the frame loop.
#[derive(Clone, Debug)]
pub struct Scene {
    lights: Vec<Light, MAX_LIGHTS>,
    active: usize,
    selected: usize,
    pub bump_enabled: bool,
    pub stats_enabled: bool,
}

impl Default for Scene {
    fn default() -> Self {
        Self::new(presets::default_lights())
    }
}

impl Scene {
    /// Scene with every given light active and bump mapping on.
    /// Lights beyond `MAX_LIGHTS` are dropped.
    pub fn new<I: IntoIterator<Item = Light>>(lights: I) -> Self {
        let mut array = Vec::new();
        for light in lights {
            if array.push(light).is_err() {
                log::warn!("light array full, dropping extra lights");
                break;
            }
        }
        let mut scene = Self {
            active: array.len(),
            lights: array,
            selected: 0,
            bump_enabled: true,
            stats_enabled: false,
        };
        scene.sync_enabled();
        scene
    }

    pub fn lights(&self) -> &[Light] {
        &self.lights
    }

    pub fn lights_mut(&mut self) -> &mut [Light] {
        &mut self.lights
    }

    /// Number of leading lights that are enabled.
    pub fn active_count(&self) -> usize {
        self.active
    }

    /// Enable the first `count` lights and disable the rest.
    pub fn set_active_count(&mut self, count: usize) {
        self.active = count.min(self.lights.len());
        if self.selected >= self.active {
            self.selected = 0;
        }
        self.sync_enabled();
    }

    pub fn selected(&self) -> usize {
        self.selected
    }

    pub fn selected_light(&self) -> Option<&Light> {
        self.lights.get(self.selected)
    }

    /// Apply one input event.
    pub fn apply(&mut self, event: InputEvent) -> SceneControl {
        match event {
            InputEvent::MoveLight { dx, dy } => {
                if let Some(light) = self.lights.get_mut(self.selected) {
                    light.position.x += dx * MOVE_STEP;
                    light.position.y += dy * MOVE_STEP;
                    log::trace!(
                        "light {} at ({}, {})",
                        self.selected,
                        light.position.x,
                        light.position.y
                    );
                }
            }
            InputEvent::SelectNextLight => {
                self.selected += 1;
                if self.selected >= self.active {
                    self.selected = 0;
                }
                log::debug!("selected light {}", self.selected);
            }
            InputEvent::CycleLightCount => {
                let count = match self.active {
                    0 => self.lights.len(),
                    n => n - 1,
                };
                self.set_active_count(count);
                log::debug!("{} active lights", self.active);
            }
            InputEvent::CycleColor(channel) => {
                if let Some(light) = self.lights.get_mut(self.selected) {
                    let value = match channel {
                        ColorChannel::Red => &mut light.color.x,
                        ColorChannel::Green => &mut light.color.y,
                        ColorChannel::Blue => &mut light.color.z,
                    };
                    *value = step_color(*value);
                    log::debug!("light {} color {:?}", self.selected, light.color);
                }
            }
            InputEvent::ToggleBump => {
                self.bump_enabled = !self.bump_enabled;
                log::info!("bump pass {}", on_off(self.bump_enabled));
            }
            InputEvent::ToggleStats => {
                self.stats_enabled = !self.stats_enabled;
                log::info!("statistics {}", on_off(self.stats_enabled));
            }
            InputEvent::Quit => return SceneControl::Quit,
        }
        SceneControl::Continue
    }

    fn sync_enabled(&mut self) {
        for (i, light) in self.lights.iter_mut().enumerate() {
            light.enabled = i < self.active;
        }
    }
}

/// One color step, wrapping past `COLOR_MAX` to zero.
pub fn step_color(value: f32) -> f32 {
    let next = value + COLOR_STEP;
    if next > COLOR_MAX {
        0.0
    } else {
        next
    }
}

fn on_off(flag: bool) -> &'static str {
    if flag {
        "on"
    } else {
        "off"
    }
}
