// Host-side tests for packing the scene into GPU buffers.
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
mod geometry {
    include!("../src/geometry.rs");
}

use animate::FrameInput;
use constants::*;
use geometry::*;
use glam::{Mat3, Vec2, Vec3};
use scene::Scene;

fn animated_scene(frames: usize) -> Scene {
    let mut s = Scene::new(&VIVID, 21);
    let input = FrameInput {
        mouse: Vec2::new(0.2, 0.1),
        target_scroll_y: 600.0,
        scroll_range: 1800.0,
    };
    for _ in 0..frames {
        s.advance(&input);
    }
    s
}

#[test]
fn uniform_block_matches_shader_layout() {
    assert_eq!(std::mem::size_of::<SceneUniforms>(), 192);
    assert_eq!(std::mem::size_of::<SceneUniforms>() % 16, 0);
    assert_eq!(std::mem::size_of::<PointInstance>(), 48);
    assert_eq!(std::mem::size_of::<MeshVertex>(), 28);
}

#[test]
fn packed_buffers_fill_their_capacities() {
    let s = animated_scene(5);
    let caps = Capacities::for_scene(&s);
    let mut points = Vec::new();
    let mut lines = Vec::new();
    let mut rings = Vec::new();
    pack_points(&s, &mut points);
    pack_lines(&s, &mut lines);
    pack_rings(&s, &mut rings);
    assert_eq!(points.len(), caps.points);
    assert_eq!(lines.len(), caps.line_vertices);
    assert_eq!(rings.len(), caps.ring_vertices);
    assert_eq!(rings.len(), VIVID.waves.count * RING_SEGMENTS * 6);
}

#[test]
fn packing_reuses_the_output_vector() {
    let s = animated_scene(1);
    let mut points = Vec::new();
    pack_points(&s, &mut points);
    let first = points.len();
    pack_points(&s, &mut points);
    assert_eq!(points.len(), first);
}

#[test]
fn points_are_grouped_by_kind() {
    let s = animated_scene(3);
    let c = s.counts();
    let mut points = Vec::new();
    pack_points(&s, &mut points);
    let kinds: Vec<f32> = points.iter().map(|p| p.params[0]).collect();
    let (nodes, rest) = kinds.split_at(c.nodes);
    let (signals, rest) = rest.split_at(c.signals);
    let (particles, streams) = rest.split_at(c.particles);
    assert!(nodes.iter().all(|&k| k == KIND_NODE));
    assert!(signals.iter().all(|&k| k == KIND_SIGNAL));
    assert!(particles.iter().all(|&k| k == KIND_PARTICLE));
    assert_eq!(streams.len(), c.stream_points);
    assert!(streams.iter().all(|&k| k == KIND_STREAM));
}

#[test]
fn node_instances_follow_node_positions() {
    let s = animated_scene(10);
    let mut points = Vec::new();
    pack_points(&s, &mut points);
    for (node, inst) in s.nodes().iter().zip(&points) {
        assert_eq!(Vec3::from_slice(&inst.pos_size[..3]), node.position);
        assert_eq!(inst.pos_size[3], VIVID.nodes.radius);
        assert_eq!(inst.params[1], node.intensity);
    }
}

#[test]
fn line_vertices_carry_connection_opacity() {
    let s = animated_scene(4);
    let mut lines = Vec::new();
    pack_lines(&s, &mut lines);
    for (conn, pair) in s.connections().iter().zip(lines.chunks(2)) {
        assert_eq!(pair[0].position, s.nodes()[conn.start].position.to_array());
        assert_eq!(pair[1].position, s.nodes()[conn.end].position.to_array());
        assert_eq!(pair[0].color_alpha[3], conn.opacity);
        assert_eq!(pair[1].color_alpha[3], conn.opacity);
    }
}

#[test]
fn rings_lie_flat_at_their_depth() {
    let s = animated_scene(12);
    let z = VIVID.waves.z;
    let mut rings = Vec::new();
    pack_rings(&s, &mut rings);
    let per_wave = RING_SEGMENTS * 6;
    for (wave, verts) in s.waves().iter().zip(rings.chunks(per_wave)) {
        let inner = wave.inner_radius * wave.scale;
        let outer = wave.outer_radius * wave.scale;
        for v in verts {
            let p = Vec3::from_array(v.position);
            assert!(p.y.abs() < 1e-3, "ring vertex off plane: {p:?}");
            let r = Vec2::new(p.x, p.z - z).length();
            assert!(r >= inner - 1e-2 && r <= outer + 1e-2, "radius {r} outside [{inner}, {outer}]");
        }
    }
}

#[test]
fn field_rotation_without_tilt_is_a_y_rotation() {
    let a = 0.7;
    let m = field_rotation(0.0, a);
    let expected = Mat3::from_rotation_y(a);
    assert!(m.abs_diff_eq(expected, 1e-6));
}

#[test]
fn uniforms_follow_camera_and_clock() {
    let mut s = animated_scene(8);
    s.camera.set_viewport(1280.0, 720.0);
    let u = scene_uniforms(&s, [1280.0, 720.0]);
    assert_eq!(u.view, s.camera.view_matrix().to_cols_array_2d());
    assert_eq!(u.proj, s.camera.projection_matrix().to_cols_array_2d());
    assert_eq!(u.time, s.clock.time);
    assert_eq!(u.scroll, s.clock.scroll_norm);
    assert_eq!(u.viewport, [1280.0, 720.0]);
    assert_eq!(u.fog[3], VIVID.fog_density);
}

#[test]
fn signal_shading_follows_the_preset() {
    for tuning in [&VIVID, &CLEAN] {
        let s = Scene::new(tuning, 41);
        let c = s.counts();
        let mut points = Vec::new();
        pack_points(&s, &mut points);
        for inst in &points[c.nodes..c.nodes + c.signals] {
            assert_eq!(inst.color_alpha[3], tuning.signals.alpha);
            assert_eq!(inst.params[3], tuning.signals.glow_exponent);
        }
        let u = scene_uniforms(&s, [800.0, 600.0]);
        assert_eq!(
            u.pulse,
            [
                tuning.shading.node_x_phase,
                tuning.shading.node_scroll_phase,
                tuning.signals.pulse_base,
                tuning.signals.pulse_speed,
            ]
        );
    }
}

#[test]
fn clean_preset_uses_its_own_signal_look() {
    assert_eq!(CLEAN.signals.glow_exponent, 1.8);
    assert_eq!(CLEAN.signals.alpha, 0.9);
    assert_eq!((CLEAN.signals.pulse_base, CLEAN.signals.pulse_speed), (0.85, 4.0));
    assert_eq!(CLEAN.shading.node_scroll_phase, 0.0);
    assert_eq!(VIVID.signals.glow_exponent, 1.5);
    assert_eq!((VIVID.signals.pulse_base, VIVID.signals.pulse_speed), (0.8, 5.0));
}
