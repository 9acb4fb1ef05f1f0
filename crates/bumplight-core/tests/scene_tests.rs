//! Tests for scene input handling.

use bumplight_core::config::MAX_LIGHTS;
use bumplight_core::render::{Attenuation, Light};
use bumplight_core::scene::{presets, step_color, Scene, SceneControl, MOVE_STEP};
use bumplight_hal::{ColorChannel, InputEvent};
use glam::Vec3;

fn enabled_flags(scene: &Scene) -> Vec<bool> {
    scene.lights().iter().map(|l| l.enabled).collect()
}

#[test]
fn default_scene_uses_presets() {
    let scene = Scene::default();
    assert_eq!(scene.lights().len(), MAX_LIGHTS);
    assert_eq!(scene.active_count(), MAX_LIGHTS);
    assert_eq!(scene.lights()[0], presets::default_lights()[0]);
    assert!(scene.bump_enabled);
    assert!(!scene.stats_enabled);
}

#[test]
fn extra_lights_are_dropped() {
    let light = Light::point(Vec3::ZERO, Vec3::ONE, Attenuation::NONE);
    let scene = Scene::new([light; MAX_LIGHTS + 2]);
    assert_eq!(scene.lights().len(), MAX_LIGHTS);
}

#[test]
fn move_selected_light() {
    let mut scene = Scene::default();
    let before = scene.lights()[0].position;
    scene.apply(InputEvent::MoveLight { dx: 1.0, dy: -1.0 });
    let after = scene.lights()[0].position;
    assert_eq!(after.x, before.x + MOVE_STEP);
    assert_eq!(after.y, before.y - MOVE_STEP);
    assert_eq!(after.z, before.z);
    assert_eq!(scene.lights()[1], presets::default_lights()[1]);
}

#[test]
fn select_wraps_at_active_count() {
    let mut scene = Scene::default();
    let mut seen = Vec::new();
    for _ in 0..4 {
        scene.apply(InputEvent::SelectNextLight);
        seen.push(scene.selected());
    }
    assert_eq!(seen, vec![1, 2, 0, 1]);

    scene.set_active_count(2);
    scene.apply(InputEvent::SelectNextLight);
    assert_eq!(scene.selected(), 0);
}

#[test]
fn light_count_cycles_down_then_wraps() {
    let mut scene = Scene::default();
    let mut counts = Vec::new();
    for _ in 0..4 {
        scene.apply(InputEvent::CycleLightCount);
        counts.push(scene.active_count());
    }
    assert_eq!(counts, vec![2, 1, 0, 3]);
}

#[test]
fn light_count_drives_enable_flags() {
    let mut scene = Scene::default();
    scene.apply(InputEvent::CycleLightCount);
    assert_eq!(enabled_flags(&scene), vec![true, true, false]);
    scene.set_active_count(0);
    assert_eq!(enabled_flags(&scene), vec![false, false, false]);
}

#[test]
fn shrinking_light_count_resets_selection() {
    let mut scene = Scene::default();
    scene.apply(InputEvent::SelectNextLight);
    scene.apply(InputEvent::SelectNextLight);
    assert_eq!(scene.selected(), 2);
    scene.apply(InputEvent::CycleLightCount);
    assert_eq!(scene.selected(), 0);
}

#[test]
fn color_steps_and_wraps() {
    assert_eq!(step_color(0.0), 1.0);
    assert_eq!(step_color(9.0), 10.0);
    assert_eq!(step_color(10.0), 0.0);

    let mut scene = Scene::default();
    // Preset light 0 is white at intensity 5.
    scene.apply(InputEvent::CycleColor(ColorChannel::Red));
    scene.apply(InputEvent::CycleColor(ColorChannel::Blue));
    assert_eq!(scene.lights()[0].color, Vec3::new(6.0, 5.0, 6.0));

    for _ in 0..5 {
        scene.apply(InputEvent::CycleColor(ColorChannel::Green));
    }
    assert_eq!(scene.lights()[0].color.y, 10.0);
    scene.apply(InputEvent::CycleColor(ColorChannel::Green));
    assert_eq!(scene.lights()[0].color.y, 0.0);
}

#[test]
fn toggles_and_quit() {
    let mut scene = Scene::default();
    assert_eq!(scene.apply(InputEvent::ToggleBump), SceneControl::Continue);
    assert!(!scene.bump_enabled);
    scene.apply(InputEvent::ToggleStats);
    assert!(scene.stats_enabled);
    assert_eq!(scene.apply(InputEvent::Quit), SceneControl::Quit);
}
