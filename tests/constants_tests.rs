// Host-side tests for the tuning presets and colour helpers.
// The main crate is wasm-only, so we include the pure-Rust modules directly.

#![allow(dead_code)]
mod constants {
    include!("../src/constants.rs");
}

use constants::*;

fn approx(a: f32, b: f32) -> bool {
    (a - b).abs() < 1e-4
}

#[test]
fn preset_from_attr_defaults_to_vivid() {
    assert_eq!(Preset::from_attr(None), Preset::Vivid);
    assert_eq!(Preset::from_attr(Some("")), Preset::Vivid);
    assert_eq!(Preset::from_attr(Some("vivid")), Preset::Vivid);
    assert_eq!(Preset::from_attr(Some("something-else")), Preset::Vivid);
}

#[test]
fn preset_from_attr_accepts_clean_in_any_case() {
    assert_eq!(Preset::from_attr(Some("clean")), Preset::Clean);
    assert_eq!(Preset::from_attr(Some("CLEAN")), Preset::Clean);
    assert_eq!(Preset::from_attr(Some(" Clean ")), Preset::Clean);
}

#[test]
fn presets_carry_their_primitive_counts() {
    let v = Preset::Vivid.tuning();
    assert_eq!(v.nodes.count, 120);
    assert_eq!(v.links.max_distance, 100.0);
    assert_eq!(v.signals.count, 50);
    assert_eq!(v.particles.count, 600);
    assert_eq!((v.streams.count, v.streams.points), (6, 40));
    assert_eq!(v.waves.count, 3);
    assert_eq!(v.camera.distance, 500.0);

    let c = Preset::Clean.tuning();
    assert_eq!(c.nodes.count, 100);
    assert_eq!(c.links.max_distance, 90.0);
    assert_eq!(c.signals.count, 40);
    assert_eq!(c.particles.count, 800);
    assert_eq!((c.streams.count, c.streams.points), (5, 35));
    assert_eq!(c.waves.count, 2);
    assert_eq!(c.camera.distance, 450.0);
}

#[test]
#[allow(clippy::assertions_on_constants)]
fn tuning_values_are_within_reasonable_bounds() {
    for t in [&VIVID, &CLEAN] {
        assert!(t.scroll_smoothing > 0.0 && t.scroll_smoothing <= 1.0, "{}", t.name);
        assert!(t.camera.follow_rate > 0.0 && t.camera.follow_rate <= 1.0);
        assert!(t.camera.znear > 0.0 && t.camera.znear < t.camera.zfar);
        assert!(t.particles.size_min < t.particles.size_max);
        assert!(t.waves.flicker_amplitude < 1.0);
        // Every wave keeps a positive base opacity
        assert!(t.waves.opacity_base - (t.waves.count as f32 - 1.0) * t.waves.opacity_step > 0.0);
        assert!(t.nodes.count >= NODE_LAYERS);
    }
    assert!(TIME_STEP > 0.0);
    assert!(MAX_PIXEL_RATIO >= 1.0);
}

#[test]
fn hex_to_linear_maps_extremes() {
    assert_eq!(hex_to_linear(0x000000), [0.0, 0.0, 0.0]);
    let white = hex_to_linear(0xffffff);
    assert!(white.iter().all(|&c| approx(c, 1.0)));
    let red = hex_to_linear(0xff0000);
    assert!(approx(red[0], 1.0) && red[1] == 0.0 && red[2] == 0.0);
}

#[test]
fn hex_to_linear_darkens_midtones() {
    // sRGB 0x80 is roughly 0.2158 in linear light
    let [r, _, _] = hex_to_linear(0x800000);
    assert!((r - 0.2158).abs() < 1e-3, "got {r}");
}

#[test]
fn hsl_to_linear_primary_hues() {
    let red = hsl_to_linear(0.0, 1.0, 0.5);
    assert!(approx(red[0], 1.0) && approx(red[1], 0.0) && approx(red[2], 0.0));
    let cyan = hsl_to_linear(0.5, 1.0, 0.5);
    assert!(approx(cyan[0], 0.0) && approx(cyan[1], 1.0) && approx(cyan[2], 1.0));
    // Hue wraps around
    assert_eq!(hsl_to_linear(1.5, 1.0, 0.5), cyan);
}

#[test]
fn hsl_to_linear_without_saturation_is_grey() {
    let [r, g, b] = hsl_to_linear(0.3, 0.0, 0.5);
    assert_eq!(r, g);
    assert_eq!(g, b);
}
