// Per-frame animation update.
//
// Every primitive is recomputed from closed-form functions of the clock and
// its per-instance parameters; only particle drift and signal progress
// accumulate across frames.

use crate::constants::TIME_STEP;
use crate::scene::{stream_base_y, Direction, Scene};
use glam::Vec2;
use rand::Rng;
use std::f32::consts::PI;

/// Input snapshot read once at the start of a frame.
#[derive(Clone, Copy, Debug, Default)]
pub struct FrameInput {
    /// Pointer position normalized to [-1, 1] on both axes.
    pub mouse: Vec2,
    pub target_scroll_y: f32,
    /// Scrollable distance: page height minus viewport height.
    pub scroll_range: f32,
}

#[inline]
pub fn smooth_toward(current: f32, target: f32, rate: f32) -> f32 {
    current + (target - current) * rate
}

/// Smoothed scroll offset as a fraction of the scrollable range, in [0, 1].
#[inline]
pub fn scroll_norm(scroll_y: f32, scroll_range: f32) -> f32 {
    if scroll_range <= 0.0 || !scroll_y.is_finite() {
        return 0.0;
    }
    (scroll_y / scroll_range).clamp(0.0, 1.0)
}

impl Scene {
    /// Advance the whole scene by one frame.
    pub fn advance(&mut self, input: &FrameInput) {
        let tuning = self.tuning;
        self.clock.time += TIME_STEP;
        self.clock.scroll_y = smooth_toward(
            self.clock.scroll_y,
            input.target_scroll_y,
            tuning.scroll_smoothing,
        );
        self.clock.scroll_norm = scroll_norm(self.clock.scroll_y, input.scroll_range);

        let time = self.clock.time;
        let scroll = self.clock.scroll_norm;
        self.camera.follow(time, input.mouse, scroll, &tuning.camera);

        self.update_nodes(time, scroll);
        self.update_connections(time, scroll);
        self.update_signals(scroll);
        self.update_particles(time, scroll);
        self.update_streams(time, scroll);
        self.update_waves(time, scroll);
    }

    fn update_nodes(&mut self, time: f32, scroll: f32) {
        let t = &self.tuning.nodes;
        for node in &mut self.nodes {
            let scroll_effect = (scroll * PI * t.scroll_freq + node.phase).sin() * t.scroll_amplitude;
            let arg = time * node.speed;
            node.position.x = node.origin.x + (arg + node.phase).sin() * node.amplitude;
            node.position.y = node.origin.y
                + (arg * 0.7 + node.phase).cos() * node.amplitude * t.y_factor
                + scroll_effect;
            node.position.z = node.origin.z + (arg * t.z_speed + node.phase).sin() * t.z_amplitude;
        }
    }

    fn update_connections(&mut self, time: f32, scroll: f32) {
        let l = &self.tuning.links;
        for conn in &mut self.connections {
            let pulse = 0.7 + 0.3 * (time * l.pulse_rate + conn.start as f32 * l.pulse_phase).sin();
            conn.opacity = conn.base_opacity * pulse * (1.0 + scroll * l.scroll_gain);
        }
    }

    fn update_signals(&mut self, scroll: f32) {
        let count = self.connections.len();
        if count == 0 {
            return;
        }
        let boost = 1.0 + scroll * self.tuning.scroll_multiplier;
        for signal in &mut self.signals {
            signal.progress += signal.speed * signal.direction.sign() * boost;

            if signal.progress >= 1.0 || signal.progress <= 0.0 {
                signal.connection = self.rng.gen_range(0..count);
                signal.progress = match signal.direction {
                    Direction::Forward => 0.0,
                    Direction::Backward => 1.0,
                };
                signal.direction = Direction::random(&mut self.rng);
            }

            let conn = &self.connections[signal.connection];
            let start = self.nodes[conn.start].position;
            let end = self.nodes[conn.end].position;
            signal.position = start.lerp(end, signal.progress);
        }
    }

    fn update_particles(&mut self, time: f32, scroll: f32) {
        let t = &self.tuning.particles;
        let field = &mut self.field;
        field.rotation.y = time * t.spin + scroll * t.scroll_spin;
        field.rotation.x = (time * t.tilt_rate).sin() * t.tilt_amplitude;

        let [ya, yb, yc] = t.drift_y;
        let [xa, xb, xc] = t.drift_x;
        for (i, p) in field.particles.iter_mut().enumerate() {
            let i = i as f32;
            p.position.y += (time * ya + i * yb).sin() * yc;
            p.position.x += (time * xa + i * xb).cos() * xc;
        }
    }

    fn update_streams(&mut self, time: f32, scroll: f32) {
        let t = &self.tuning.streams;
        for stream in &mut self.streams {
            stream.rotation_y = time * stream.speed + stream.offset + scroll * t.scroll_spin;
            let n = stream.points.len();
            for (j, point) in stream.points.iter_mut().enumerate() {
                let wave = (time * t.wave_rate + j as f32 * t.wave_phase + stream.offset).sin()
                    * t.wave_amplitude;
                point.position.y = stream_base_y(j, n, t.height)
                    + wave
                    + scroll * t.scroll_lift;
            }
        }
    }

    fn update_waves(&mut self, time: f32, scroll: f32) {
        let t = &self.tuning.waves;
        let flicker = 1.0 + (time * t.flicker_rate).sin() * t.flicker_amplitude;
        for (i, wave) in self.waves.iter_mut().enumerate() {
            wave.scale = wave.base_scale
                + (time * wave.speed + wave.phase).sin() * t.pulse_amplitude
                + scroll * t.scroll_gain;
            let spin = if i % 2 == 0 { 1.0 } else { -1.0 };
            wave.rotation_z = time * t.spin * spin;
            wave.opacity = (t.opacity_base - i as f32 * t.opacity_step) * flicker;
        }
    }
}
