// CPU-side packing of the scene into GPU-ready buffers.
//
// Kept free of wgpu so the packing rules can be checked on the host.

use crate::constants::{hex_to_linear, RING_SEGMENTS};
use crate::scene::{EnergyWave, Scene};
use glam::{Mat3, Mat4, Vec3};
use std::f32::consts::{FRAC_PI_2, TAU};

pub const KIND_NODE: f32 = 0.0;
pub const KIND_SIGNAL: f32 = 1.0;
pub const KIND_PARTICLE: f32 = 2.0;
pub const KIND_STREAM: f32 = 3.0;

/// One billboard. `params` is `(kind, a, b, c)`:
/// nodes use `(kind, intensity, core_base, pulse_base)` and are sized in world
/// units; sprites use `(kind, twinkle, attenuation, glow_exponent)` and are
/// sized in pixels scaled by `attenuation / depth`.
#[repr(C)]
#[derive(Copy, Clone, Debug, Default, bytemuck::Pod, bytemuck::Zeroable)]
pub struct PointInstance {
    pub pos_size: [f32; 4],
    pub color_alpha: [f32; 4],
    pub params: [f32; 4],
}

#[repr(C)]
#[derive(Copy, Clone, Debug, Default, bytemuck::Pod, bytemuck::Zeroable)]
pub struct MeshVertex {
    pub position: [f32; 3],
    pub color_alpha: [f32; 4],
}

/// Mirrors `Globals` in the sprite and mesh shaders.
#[repr(C)]
#[derive(Copy, Clone, Debug, bytemuck::Pod, bytemuck::Zeroable)]
pub struct SceneUniforms {
    pub proj: [[f32; 4]; 4],
    pub view: [[f32; 4]; 4],
    pub fog: [f32; 4],
    pub viewport: [f32; 2],
    pub time: f32,
    pub scroll: f32,
    pub shading: [f32; 4],
    /// Node x and scroll phase, signal pulse base and speed.
    pub pulse: [f32; 4],
}

/// Fixed buffer sizes derived once from the scene counts.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub struct Capacities {
    pub points: usize,
    pub line_vertices: usize,
    pub ring_vertices: usize,
}

impl Capacities {
    pub fn for_scene(scene: &Scene) -> Self {
        let c = scene.counts();
        Self {
            points: c.nodes + c.signals + c.particles + c.stream_points,
            line_vertices: c.connections * 2,
            ring_vertices: c.waves * RING_SEGMENTS * 6,
        }
    }
}

pub fn scene_uniforms(scene: &Scene, viewport: [f32; 2]) -> SceneUniforms {
    let tuning = scene.tuning;
    let bg = hex_to_linear(tuning.palette.background);
    let s = &tuning.shading;
    SceneUniforms {
        proj: scene.camera.projection_matrix().to_cols_array_2d(),
        view: scene.camera.view_matrix().to_cols_array_2d(),
        fog: [bg[0], bg[1], bg[2], tuning.fog_density],
        viewport,
        time: scene.clock.time,
        scroll: scene.clock.scroll_norm,
        shading: [
            s.twinkle_base,
            s.twinkle_speed,
            s.twinkle_phase,
            s.node_pulse_speed,
        ],
        pulse: [
            s.node_x_phase,
            s.node_scroll_phase,
            tuning.signals.pulse_base,
            tuning.signals.pulse_speed,
        ],
    }
}

/// Rotation applied to the particle field (X then Y, as an XYZ Euler).
#[inline]
pub fn field_rotation(rx: f32, ry: f32) -> Mat3 {
    Mat3::from_rotation_x(rx) * Mat3::from_rotation_y(ry)
}

pub fn pack_points(scene: &Scene, out: &mut Vec<PointInstance>) {
    out.clear();
    let tuning = scene.tuning;

    let n = &tuning.nodes;
    let node_rgb = hex_to_linear(tuning.palette.node);
    out.extend(scene.nodes.iter().map(|node| PointInstance {
        pos_size: node.position.extend(n.radius).to_array(),
        color_alpha: [node_rgb[0], node_rgb[1], node_rgb[2], n.alpha],
        params: [KIND_NODE, node.intensity, n.core_base, n.pulse_base],
    }));

    let sig = &tuning.signals;
    let primary = hex_to_linear(tuning.palette.primary);
    if !scene.connections.is_empty() {
        out.extend(scene.signals.iter().map(|s| PointInstance {
            pos_size: s.position.extend(s.size).to_array(),
            color_alpha: [primary[0], primary[1], primary[2], sig.alpha],
            params: [KIND_SIGNAL, 0.0, sig.attenuation, sig.glow_exponent],
        }));
    }

    let p = &tuning.particles;
    let particle_rgb = hex_to_linear(tuning.palette.particle).map(|c| c * p.brightness);
    let rot = field_rotation(scene.field.rotation.x, scene.field.rotation.y);
    out.extend(scene.field.particles.iter().map(|part| PointInstance {
        pos_size: (rot * part.position).extend(part.size).to_array(),
        color_alpha: [
            particle_rgb[0],
            particle_rgb[1],
            particle_rgb[2],
            part.alpha * p.alpha_scale,
        ],
        params: [KIND_PARTICLE, part.twinkle, p.attenuation, p.glow_exponent],
    }));

    let st = &tuning.streams;
    for stream in &scene.streams {
        let rot = Mat3::from_rotation_y(stream.rotation_y);
        let [r, g, b] = stream.color;
        out.extend(stream.points.iter().map(|pt| PointInstance {
            pos_size: (rot * pt.position).extend(pt.size).to_array(),
            color_alpha: [r, g, b, pt.alpha],
            params: [KIND_STREAM, 0.0, st.attenuation, st.glow_exponent],
        }));
    }
}

pub fn pack_lines(scene: &Scene, out: &mut Vec<MeshVertex>) {
    out.clear();
    let [r, g, b] = hex_to_linear(scene.tuning.palette.connection);
    for conn in &scene.connections {
        let color_alpha = [r, g, b, conn.opacity];
        out.push(MeshVertex {
            position: scene.nodes[conn.start].position.to_array(),
            color_alpha,
        });
        out.push(MeshVertex {
            position: scene.nodes[conn.end].position.to_array(),
            color_alpha,
        });
    }
}

/// Model matrix of a wave: laid flat, spun around its own axis, scaled in its
/// plane and pushed back along Z.
pub fn wave_transform(wave: &EnergyWave, z: f32) -> Mat4 {
    Mat4::from_translation(Vec3::new(0.0, 0.0, z))
        * Mat4::from_rotation_x(FRAC_PI_2)
        * Mat4::from_rotation_z(wave.rotation_z)
        * Mat4::from_scale(Vec3::new(wave.scale, wave.scale, 1.0))
}

pub fn pack_rings(scene: &Scene, out: &mut Vec<MeshVertex>) {
    out.clear();
    let [r, g, b] = hex_to_linear(scene.tuning.palette.primary);
    let z = scene.tuning.waves.z;
    for wave in &scene.waves {
        let model = wave_transform(wave, z);
        let color_alpha = [r, g, b, wave.opacity.max(0.0)];
        let at = |radius: f32, k: usize| {
            let a = k as f32 / RING_SEGMENTS as f32 * TAU;
            model
                .transform_point3(Vec3::new(a.cos() * radius, a.sin() * radius, 0.0))
                .to_array()
        };
        for k in 0..RING_SEGMENTS {
            let i0 = at(wave.inner_radius, k);
            let o0 = at(wave.outer_radius, k);
            let i1 = at(wave.inner_radius, k + 1);
            let o1 = at(wave.outer_radius, k + 1);
            for position in [i0, o0, o1, i0, o1, i1] {
                out.push(MeshVertex {
                    position,
                    color_alpha,
                });
            }
        }
    }
}
