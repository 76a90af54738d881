// Host-side tests for the per-frame update and the camera rig.
// The main crate is wasm-only, so we include the pure-Rust modules directly.

#![allow(dead_code)]
mod constants {
    include!("../src/constants.rs");
}
mod camera {
    include!("../src/camera.rs");
}
mod scene {
    include!("../src/scene.rs");
}
mod animate {
    include!("../src/animate.rs");
}

use animate::*;
use camera::CameraRig;
use constants::*;
use glam::Vec2;
use scene::{Direction, Scene};

fn still() -> FrameInput {
    FrameInput {
        mouse: Vec2::ZERO,
        target_scroll_y: 0.0,
        scroll_range: 2000.0,
    }
}

#[test]
fn clock_advances_by_fixed_step() {
    let mut s = Scene::new(&VIVID, 1);
    for _ in 0..10 {
        s.advance(&still());
    }
    assert!((s.clock.time - 10.0 * TIME_STEP).abs() < 1e-5);
}

#[test]
fn counts_never_change_across_frames() {
    let mut s = Scene::new(&CLEAN, 2);
    let before = s.counts();
    let input = FrameInput {
        mouse: Vec2::new(0.4, -0.3),
        target_scroll_y: 900.0,
        scroll_range: 1500.0,
    };
    for _ in 0..300 {
        s.advance(&input);
    }
    assert_eq!(s.counts(), before);
}

#[test]
fn smoothed_scroll_converges_monotonically() {
    let mut s = Scene::new(&VIVID, 3);
    let input = FrameInput {
        target_scroll_y: 1000.0,
        ..still()
    };
    let mut prev = s.clock.scroll_y;
    for _ in 0..400 {
        s.advance(&input);
        assert!(s.clock.scroll_y >= prev);
        assert!(s.clock.scroll_y <= 1000.0);
        prev = s.clock.scroll_y;
    }
    assert!((s.clock.scroll_y - 1000.0).abs() < 1.0);
    assert!((s.clock.scroll_norm - 0.5).abs() < 1e-3);
}

#[test]
fn smooth_toward_moves_a_fraction_of_the_gap() {
    assert!((smooth_toward(0.0, 100.0, 0.1) - 10.0).abs() < 1e-5);
    assert_eq!(smooth_toward(50.0, 50.0, 0.3), 50.0);
}

#[test]
fn scroll_norm_is_clamped() {
    assert_eq!(scroll_norm(500.0, 1000.0), 0.5);
    assert_eq!(scroll_norm(5000.0, 1000.0), 1.0);
    assert_eq!(scroll_norm(-20.0, 1000.0), 0.0);
    assert_eq!(scroll_norm(300.0, 0.0), 0.0);
    assert_eq!(scroll_norm(300.0, -10.0), 0.0);
    assert_eq!(scroll_norm(f32::NAN, 1000.0), 0.0);
}

#[test]
fn short_page_keeps_scroll_norm_at_zero() {
    let mut s = Scene::new(&VIVID, 4);
    let input = FrameInput {
        target_scroll_y: 300.0,
        scroll_range: 0.0,
        ..still()
    };
    for _ in 0..50 {
        s.advance(&input);
    }
    assert_eq!(s.clock.scroll_norm, 0.0);
}

#[test]
fn signals_stay_on_valid_connections() {
    let mut s = Scene::new(&VIVID, 5);
    let input = FrameInput {
        target_scroll_y: 2000.0,
        ..still()
    };
    let n = s.connections().len();
    for _ in 0..1000 {
        s.advance(&input);
        for sig in s.signals() {
            assert!(sig.connection < n);
            assert!((0.0..=1.0).contains(&sig.progress), "progress {}", sig.progress);
        }
    }
}

#[test]
fn forward_signal_past_the_end_restarts_at_zero() {
    let mut s = Scene::new(&VIVID, 31);
    for sig in &mut s.signals {
        sig.progress = 0.999;
        sig.direction = Direction::Forward;
    }
    s.advance(&still());
    let n = s.connections().len();
    for sig in s.signals() {
        assert_eq!(sig.progress, 0.0);
        assert!(sig.connection < n);
    }
}

#[test]
fn backward_signal_past_the_start_restarts_at_one() {
    let mut s = Scene::new(&VIVID, 32);
    for sig in &mut s.signals {
        sig.progress = 0.001;
        sig.direction = Direction::Backward;
    }
    s.advance(&still());
    let n = s.connections().len();
    for sig in s.signals() {
        assert_eq!(sig.progress, 1.0);
        assert!(sig.connection < n);
    }
}

#[test]
fn rebinding_redraws_connections() {
    let mut s = Scene::new(&VIVID, 33);
    let before: Vec<usize> = s.signals().iter().map(|sig| sig.connection).collect();
    for sig in &mut s.signals {
        sig.progress = 0.999;
        sig.direction = Direction::Forward;
    }
    s.advance(&still());
    let moved = s
        .signals()
        .iter()
        .zip(&before)
        .filter(|(sig, old)| sig.connection != **old)
        .count();
    assert!(moved > 0);
}

#[test]
fn signal_sits_between_its_endpoints() {
    let mut s = Scene::new(&VIVID, 6);
    s.advance(&still());
    for sig in s.signals() {
        let c = &s.connections()[sig.connection];
        let a = s.nodes()[c.start].position;
        let b = s.nodes()[c.end].position;
        let expected = a.lerp(b, sig.progress);
        assert!(sig.position.distance(expected) < 1e-3);
    }
}

#[test]
fn node_displacement_is_bounded() {
    let t = &VIVID.nodes;
    let mut s = Scene::new(&VIVID, 7);
    let input = FrameInput {
        target_scroll_y: 1200.0,
        ..still()
    };
    for _ in 0..500 {
        s.advance(&input);
        for node in s.nodes() {
            let d = node.position - node.origin;
            assert!(d.x.abs() <= node.amplitude + 1e-3);
            assert!(d.y.abs() <= node.amplitude * t.y_factor + t.scroll_amplitude + 1e-3);
            assert!(d.z.abs() <= t.z_amplitude + 1e-3);
        }
    }
}

#[test]
fn connection_opacity_pulses_around_base() {
    let l = &VIVID.links;
    let mut s = Scene::new(&VIVID, 8);
    for _ in 0..200 {
        s.advance(&still());
        let gain = 1.0 + s.clock.scroll_norm * l.scroll_gain;
        for c in s.connections() {
            assert!(c.opacity >= c.base_opacity * 0.4 - 1e-6);
            assert!(c.opacity <= c.base_opacity * gain + 1e-6);
        }
    }
}

#[test]
fn waves_spin_in_alternating_directions() {
    let mut s = Scene::new(&VIVID, 9);
    for _ in 0..30 {
        s.advance(&still());
    }
    let w = s.waves();
    assert!(w[0].rotation_z > 0.0);
    assert!((w[0].rotation_z + w[1].rotation_z).abs() < 1e-5);
    assert!(w[1].opacity < w[0].opacity);
    assert!(w.iter().all(|w| w.opacity > 0.0));
}

#[test]
fn streams_lift_with_scroll() {
    let mut low = Scene::new(&VIVID, 10);
    let mut high = Scene::new(&VIVID, 10);
    let scrolled = FrameInput {
        target_scroll_y: 2000.0,
        ..still()
    };
    for _ in 0..200 {
        low.advance(&still());
        high.advance(&scrolled);
    }
    let y_low = low.streams()[0].points[0].position.y;
    let y_high = high.streams()[0].points[0].position.y;
    assert!(y_high > y_low);
}

#[test]
fn particle_field_tilts_within_amplitude() {
    let t = &CLEAN.particles;
    let mut s = Scene::new(&CLEAN, 11);
    for _ in 0..100 {
        s.advance(&still());
        assert!(s.field.rotation.x.abs() <= t.tilt_amplitude + 1e-6);
    }
    assert!((s.field.rotation.y - s.clock.time * t.spin).abs() < 1e-5);
}

#[test]
fn camera_pulls_in_with_scroll() {
    let t = &VIVID.camera;
    let mut cam = CameraRig::new(t);
    cam.follow(0.0, Vec2::ZERO, 0.0, t);
    assert_eq!(cam.position.z, t.distance);
    cam.follow(0.0, Vec2::ZERO, 1.0, t);
    assert_eq!(cam.position.z, t.distance - t.scroll_pull);
}

#[test]
fn camera_eases_toward_the_pointer() {
    let t = &VIVID.camera;
    let mut cam = CameraRig::new(t);
    let mut prev = cam.position.x;
    for _ in 0..50 {
        // Time held at zero so the drift term stays fixed
        cam.follow(0.0, Vec2::new(1.0, 0.0), 0.0, t);
        assert!(cam.position.x > prev);
        prev = cam.position.x;
    }
    assert!(cam.position.x < t.mouse_gain_x);
}

#[test]
fn camera_ignores_degenerate_viewports() {
    let mut cam = CameraRig::new(&VIVID.camera);
    cam.set_viewport(1600.0, 800.0);
    assert_eq!(cam.aspect, 2.0);
    cam.set_viewport(1600.0, 0.0);
    assert_eq!(cam.aspect, 2.0);
}
