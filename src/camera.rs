// Drifting perspective camera that always looks at the scene origin.

use crate::constants::CameraTuning;
use glam::{Mat4, Vec2, Vec3};

/// Right-handed perspective camera aimed at the origin.
#[derive(Clone, Debug)]
pub struct CameraRig {
    pub position: Vec3,
    pub fovy_degrees: f32,
    pub aspect: f32,
    pub znear: f32,
    pub zfar: f32,
}

impl CameraRig {
    pub fn new(tuning: &CameraTuning) -> Self {
        Self {
            position: Vec3::new(0.0, 0.0, tuning.distance),
            fovy_degrees: tuning.fovy_degrees,
            aspect: 1.0,
            znear: tuning.znear,
            zfar: tuning.zfar,
        }
    }

    pub fn set_viewport(&mut self, width: f32, height: f32) {
        if width > 0.0 && height > 0.0 {
            self.aspect = width / height;
        }
    }

    /// Ease the camera along its drift path, offset by the pointer, and pull it
    /// toward the origin as the page scrolls.
    pub fn follow(&mut self, time: f32, mouse: Vec2, scroll_norm: f32, tuning: &CameraTuning) {
        let drift = time * tuning.drift_speed;
        let drift_x = (drift * 1000.0).sin() * tuning.drift_radius;
        let drift_y = (drift * 800.0).cos() * tuning.drift_radius * tuning.drift_y_factor;
        let drift_z = (drift * tuning.drift_z_freq).sin() * tuning.drift_z_amplitude;

        let p = &mut self.position;
        p.x += (drift_x + mouse.x * tuning.mouse_gain_x - p.x) * tuning.follow_rate;
        p.y += (drift_y - mouse.y * tuning.mouse_gain_y - p.y) * tuning.follow_rate;
        p.z = tuning.distance - scroll_norm * tuning.scroll_pull + drift_z;
    }

    pub fn view_matrix(&self) -> Mat4 {
        Mat4::look_at_rh(self.position, Vec3::ZERO, Vec3::Y)
    }

    pub fn projection_matrix(&self) -> Mat4 {
        Mat4::perspective_rh(
            self.fovy_degrees.to_radians(),
            self.aspect,
            self.znear,
            self.zfar,
        )
    }
}
