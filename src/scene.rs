// Scene bootstrap: every primitive of the background is created once here.
//
// Counts are fixed for the lifetime of a `Scene`; the per-frame update in
// `animate.rs` only rewrites positions, opacities and scales in place.

use crate::camera::CameraRig;
use crate::constants::{hsl_to_linear, Tuning, NODE_LAYERS};
use glam::{Vec2, Vec3};
use rand::prelude::*;
use std::f32::consts::TAU;

#[derive(Clone, Debug)]
pub struct Node {
    pub origin: Vec3,
    pub position: Vec3,
    pub phase: f32,
    pub speed: f32,
    pub amplitude: f32,
    pub intensity: f32,
}

/// Line between two nodes that were closer than the link distance at bootstrap.
#[derive(Clone, Debug)]
pub struct Connection {
    pub start: usize,
    pub end: usize,
    pub base_opacity: f32,
    pub opacity: f32,
}

#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum Direction {
    Forward,
    Backward,
}

impl Direction {
    pub fn sign(self) -> f32 {
        match self {
            Direction::Forward => 1.0,
            Direction::Backward => -1.0,
        }
    }

    pub fn random(rng: &mut impl Rng) -> Self {
        if rng.gen::<f32>() > 0.5 {
            Direction::Forward
        } else {
            Direction::Backward
        }
    }
}

/// Marker travelling along one connection.
#[derive(Clone, Debug)]
pub struct Signal {
    pub connection: usize,
    pub progress: f32,
    pub speed: f32,
    pub direction: Direction,
    pub size: f32,
    pub position: Vec3,
}

#[derive(Clone, Debug)]
pub struct Particle {
    pub position: Vec3,
    pub size: f32,
    pub alpha: f32,
    pub twinkle: f32,
}

/// Background dust; the whole field rotates as one group.
#[derive(Clone, Debug, Default)]
pub struct ParticleField {
    pub particles: Vec<Particle>,
    /// Group rotation in radians around X and Y.
    pub rotation: Vec2,
}

#[derive(Clone, Debug)]
pub struct StreamPoint {
    pub position: Vec3,
    pub size: f32,
    pub alpha: f32,
}

/// A tapering helix of points rotating around the Y axis.
#[derive(Clone, Debug)]
pub struct Stream {
    pub angle: f32,
    pub radius: f32,
    pub speed: f32,
    pub offset: f32,
    pub color: [f32; 3],
    pub rotation_y: f32,
    pub points: Vec<StreamPoint>,
}

/// Flat ring lying in the XZ plane behind the network.
#[derive(Clone, Debug)]
pub struct EnergyWave {
    pub inner_radius: f32,
    pub outer_radius: f32,
    pub base_scale: f32,
    pub speed: f32,
    pub phase: f32,
    pub scale: f32,
    pub rotation_z: f32,
    pub opacity: f32,
}

/// Clock and smoothed scroll shared by every update step.
#[derive(Clone, Debug, Default)]
pub struct Clock {
    pub time: f32,
    pub scroll_y: f32,
    pub scroll_norm: f32,
}

#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub struct SceneCounts {
    pub nodes: usize,
    pub connections: usize,
    pub signals: usize,
    pub particles: usize,
    pub stream_points: usize,
    pub waves: usize,
}

pub struct Scene {
    pub tuning: &'static Tuning,
    pub nodes: Vec<Node>,
    pub connections: Vec<Connection>,
    pub signals: Vec<Signal>,
    pub field: ParticleField,
    pub streams: Vec<Stream>,
    pub waves: Vec<EnergyWave>,
    pub camera: CameraRig,
    pub clock: Clock,
    pub(crate) rng: StdRng,
}

impl Scene {
    pub fn new(tuning: &'static Tuning, seed: u64) -> Self {
        Self::build(tuning, StdRng::seed_from_u64(seed))
    }

    pub fn build(tuning: &'static Tuning, mut rng: StdRng) -> Self {
        let nodes = create_nodes(tuning, &mut rng);
        let connections = create_connections(tuning, &nodes);
        let signals = create_signals(tuning, connections.len(), &mut rng);
        let field = create_particle_field(tuning, &mut rng);
        let streams = create_streams(tuning, &mut rng);
        let waves = create_waves(tuning);
        Self {
            tuning,
            nodes,
            connections,
            signals,
            field,
            streams,
            waves,
            camera: CameraRig::new(&tuning.camera),
            clock: Clock::default(),
            rng,
        }
    }

    pub fn nodes(&self) -> &[Node] {
        &self.nodes
    }

    pub fn connections(&self) -> &[Connection] {
        &self.connections
    }

    pub fn signals(&self) -> &[Signal] {
        &self.signals
    }

    pub fn particles(&self) -> &[Particle] {
        &self.field.particles
    }

    pub fn streams(&self) -> &[Stream] {
        &self.streams
    }

    pub fn waves(&self) -> &[EnergyWave] {
        &self.waves
    }

    pub fn counts(&self) -> SceneCounts {
        SceneCounts {
            nodes: self.nodes.len(),
            connections: self.connections.len(),
            signals: self.signals.len(),
            particles: self.field.particles.len(),
            stream_points: self.streams.iter().map(|s| s.points.len()).sum(),
            waves: self.waves.len(),
        }
    }
}

#[inline]
fn centered(rng: &mut impl Rng) -> f32 {
    rng.gen::<f32>() - 0.5
}

fn create_nodes(tuning: &Tuning, rng: &mut StdRng) -> Vec<Node> {
    let t = &tuning.nodes;
    let per_layer = (t.count as f32 / NODE_LAYERS as f32).max(1.0);
    (0..t.count)
        .map(|i| {
            let layer = (i as f32 / per_layer).floor();
            let origin = Vec3::new(
                centered(rng) * t.spread_x,
                centered(rng) * t.spread_y,
                (layer - 2.0) * t.layer_spacing + centered(rng) * t.z_jitter,
            );
            Node {
                origin,
                position: origin,
                intensity: t.intensity_min + rng.gen::<f32>() * t.intensity_span,
                phase: rng.gen::<f32>() * TAU,
                speed: t.speed_min + rng.gen::<f32>() * t.speed_span,
                amplitude: t.amplitude_min + rng.gen::<f32>() * t.amplitude_span,
            }
        })
        .collect()
}

/// Pairwise O(n²) pass over the initial layout; the topology never changes
/// afterwards even though the nodes keep moving.
pub fn create_connections(tuning: &Tuning, nodes: &[Node]) -> Vec<Connection> {
    let l = &tuning.links;
    let mut out = Vec::new();
    for i in 0..nodes.len() {
        for j in (i + 1)..nodes.len() {
            let dist = nodes[i].position.distance(nodes[j].position);
            if dist < l.max_distance {
                let opacity = l.opacity_base + (1.0 - dist / l.max_distance) * l.opacity_span;
                out.push(Connection {
                    start: i,
                    end: j,
                    base_opacity: opacity,
                    opacity,
                });
            }
        }
    }
    out
}

fn create_signals(tuning: &Tuning, connection_count: usize, rng: &mut StdRng) -> Vec<Signal> {
    if connection_count == 0 {
        return Vec::new();
    }
    let t = &tuning.signals;
    let sizes: Vec<f32> = (0..t.count)
        .map(|_| t.size_min + rng.gen::<f32>() * t.size_span)
        .collect();
    sizes
        .into_iter()
        .map(|size| Signal {
            connection: rng.gen_range(0..connection_count),
            progress: rng.gen::<f32>(),
            speed: t.speed_min + rng.gen::<f32>() * t.speed_span,
            direction: Direction::random(rng),
            size,
            position: Vec3::ZERO,
        })
        .collect()
}

fn create_particle_field(tuning: &Tuning, rng: &mut StdRng) -> ParticleField {
    let t = &tuning.particles;
    let particles = (0..t.count)
        .map(|_| {
            let position = Vec3::new(
                centered(rng) * t.field_size,
                centered(rng) * t.field_size,
                centered(rng) * t.field_size * t.depth_factor,
            );
            Particle {
                position,
                size: t.size_min + rng.gen::<f32>() * (t.size_max - t.size_min),
                alpha: t.alpha_min + rng.gen::<f32>() * t.alpha_span,
                twinkle: rng.gen::<f32>() * TAU,
            }
        })
        .collect();
    ParticleField {
        particles,
        rotation: Vec2::ZERO,
    }
}

/// Height of stream point `j` before any per-frame offsets.
#[inline]
pub fn stream_base_y(j: usize, points: usize, height: f32) -> f32 {
    let t = j as f32 / points as f32;
    (t - 0.5) * height
}

fn create_streams(tuning: &Tuning, rng: &mut StdRng) -> Vec<Stream> {
    let t = &tuning.streams;
    (0..t.count)
        .map(|s| {
            let angle = s as f32 / t.count as f32 * TAU;
            let radius = t.radius_min + rng.gen::<f32>() * t.radius_span;
            let points = (0..t.points)
                .map(|j| {
                    let u = j as f32 / t.points as f32;
                    let taper = radius * (1.0 - u * 0.3);
                    StreamPoint {
                        position: Vec3::new(
                            (angle + u * 2.0).cos() * taper,
                            stream_base_y(j, t.points, t.height),
                            (angle + u * 2.0).sin() * taper,
                        ),
                        size: t.size_min + (1.0 - u) * t.size_span,
                        alpha: (1.0 - u) * t.alpha,
                    }
                })
                .collect();
            let hue = s as f32 / t.count as f32;
            Stream {
                angle,
                radius,
                speed: t.speed_min + rng.gen::<f32>() * t.speed_span,
                offset: rng.gen::<f32>() * TAU,
                color: hsl_to_linear(0.5 + hue * t.hue_span, t.saturation, t.lightness),
                rotation_y: 0.0,
                points,
            }
        })
        .collect()
}

fn create_waves(tuning: &Tuning) -> Vec<EnergyWave> {
    let t = &tuning.waves;
    (0..t.count)
        .map(|w| {
            let w = w as f32;
            let inner_radius = t.inner_radius + w * t.radius_step;
            EnergyWave {
                inner_radius,
                outer_radius: inner_radius + t.width,
                base_scale: 1.0,
                speed: t.speed_min + w * t.speed_step,
                phase: w * t.phase_step,
                scale: 1.0,
                rotation_z: 0.0,
                opacity: t.opacity_base - w * t.opacity_step,
            }
        })
        .collect()
}
