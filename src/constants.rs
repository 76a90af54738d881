// Animation tuning presets and palette.
//
// Every magic number of the background lives here so the update loop reads as
// formulas. Two presets exist: `VIVID` (denser, brighter, faster) and `CLEAN`
// (calmer, wider particle field).

/// Seconds added to the animation clock per rendered frame.
pub const TIME_STEP: f32 = 0.016;

/// Number of depth layers nodes are spread across.
pub const NODE_LAYERS: usize = 5;

/// Segments used to tessellate an energy-wave annulus.
pub const RING_SEGMENTS: usize = 64;

// Device pixel ratio cap for the canvas backing store
pub const MAX_PIXEL_RATIO: f64 = 2.0;

// Scroll reveal
pub const REVEAL_THRESHOLD: f64 = 0.1;
pub const REVEAL_SELECTOR: &str = ".project-card, .blog-card, .sidebar-card";

// Post-processing
pub const BLOOM_STRENGTH: f32 = 0.8;
pub const BLOOM_THRESHOLD: f32 = 0.25;

#[derive(Clone, Copy, Debug, PartialEq)]
pub struct Palette {
    pub primary: u32,
    pub background: u32,
    pub node: u32,
    pub connection: u32,
    pub particle: u32,
}

#[derive(Clone, Copy, Debug, PartialEq)]
pub struct NodeTuning {
    pub count: usize,
    pub radius: f32,
    pub spread_x: f32,
    pub spread_y: f32,
    pub layer_spacing: f32,
    pub z_jitter: f32,
    pub intensity_min: f32,
    pub intensity_span: f32,
    pub speed_min: f32,
    pub speed_span: f32,
    pub amplitude_min: f32,
    pub amplitude_span: f32,
    pub y_factor: f32,
    pub z_speed: f32,
    pub z_amplitude: f32,
    pub scroll_freq: f32,
    pub scroll_amplitude: f32,
    // fragment shading
    pub pulse_base: f32,
    pub core_base: f32,
    pub alpha: f32,
}

#[derive(Clone, Copy, Debug, PartialEq)]
pub struct LinkTuning {
    pub max_distance: f32,
    pub opacity_base: f32,
    pub opacity_span: f32,
    pub pulse_rate: f32,
    pub pulse_phase: f32,
    pub scroll_gain: f32,
}

#[derive(Clone, Copy, Debug, PartialEq)]
pub struct SignalTuning {
    pub count: usize,
    pub size_min: f32,
    pub size_span: f32,
    pub speed_min: f32,
    pub speed_span: f32,
    pub attenuation: f32,
    // fragment shading
    pub glow_exponent: f32,
    pub alpha: f32,
    pub pulse_base: f32,
    pub pulse_speed: f32,
}

#[derive(Clone, Copy, Debug, PartialEq)]
pub struct ParticleTuning {
    pub count: usize,
    pub field_size: f32,
    pub depth_factor: f32,
    pub size_min: f32,
    pub size_max: f32,
    pub alpha_min: f32,
    pub alpha_span: f32,
    pub spin: f32,
    pub scroll_spin: f32,
    pub tilt_rate: f32,
    pub tilt_amplitude: f32,
    // cumulative drift: y += sin(t*a + i*b)*c, x += cos(t*d + i*e)*f
    pub drift_y: [f32; 3],
    pub drift_x: [f32; 3],
    pub attenuation: f32,
    pub glow_exponent: f32,
    pub brightness: f32,
    pub alpha_scale: f32,
}

#[derive(Clone, Copy, Debug, PartialEq)]
pub struct StreamTuning {
    pub count: usize,
    pub points: usize,
    pub radius_min: f32,
    pub radius_span: f32,
    pub height: f32,
    pub size_min: f32,
    pub size_span: f32,
    pub alpha: f32,
    pub hue_span: f32,
    pub saturation: f32,
    pub lightness: f32,
    pub speed_min: f32,
    pub speed_span: f32,
    pub scroll_spin: f32,
    pub wave_rate: f32,
    pub wave_phase: f32,
    pub wave_amplitude: f32,
    pub scroll_lift: f32,
    pub attenuation: f32,
    pub glow_exponent: f32,
}

#[derive(Clone, Copy, Debug, PartialEq)]
pub struct WaveTuning {
    pub count: usize,
    pub inner_radius: f32,
    pub radius_step: f32,
    pub width: f32,
    pub z: f32,
    pub speed_min: f32,
    pub speed_step: f32,
    pub phase_step: f32,
    pub pulse_amplitude: f32,
    pub scroll_gain: f32,
    pub spin: f32,
    pub opacity_base: f32,
    pub opacity_step: f32,
    pub flicker_rate: f32,
    pub flicker_amplitude: f32,
}

#[derive(Clone, Copy, Debug, PartialEq)]
pub struct CameraTuning {
    pub fovy_degrees: f32,
    pub znear: f32,
    pub zfar: f32,
    pub distance: f32,
    pub drift_speed: f32,
    pub drift_radius: f32,
    pub drift_y_factor: f32,
    pub drift_z_freq: f32,
    pub drift_z_amplitude: f32,
    pub mouse_gain_x: f32,
    pub mouse_gain_y: f32,
    pub follow_rate: f32,
    pub scroll_pull: f32,
}

/// Shading constants consumed by the sprite shader.
#[derive(Clone, Copy, Debug, PartialEq)]
pub struct ShadingTuning {
    pub twinkle_base: f32,
    pub twinkle_speed: f32,
    pub twinkle_phase: f32,
    pub node_pulse_speed: f32,
    /// Node pulse phase per unit of local x.
    pub node_x_phase: f32,
    /// Node pulse phase per unit of normalized scroll.
    pub node_scroll_phase: f32,
}

/// A complete set of animation constants.
#[derive(Clone, Copy, Debug, PartialEq)]
pub struct Tuning {
    pub name: &'static str,
    pub nodes: NodeTuning,
    pub links: LinkTuning,
    pub signals: SignalTuning,
    pub particles: ParticleTuning,
    pub streams: StreamTuning,
    pub waves: WaveTuning,
    pub camera: CameraTuning,
    pub shading: ShadingTuning,
    pub palette: Palette,
    pub scroll_smoothing: f32,
    pub scroll_multiplier: f32,
    pub fog_density: f32,
}

pub const VIVID: Tuning = Tuning {
    name: "vivid",
    nodes: NodeTuning {
        count: 120,
        radius: 2.0,
        spread_x: 600.0,
        spread_y: 450.0,
        layer_spacing: 70.0,
        z_jitter: 50.0,
        intensity_min: 0.4,
        intensity_span: 0.4,
        speed_min: 0.2,
        speed_span: 0.3,
        amplitude_min: 8.0,
        amplitude_span: 15.0,
        y_factor: 0.8,
        z_speed: 0.4,
        z_amplitude: 8.0,
        scroll_freq: 3.0,
        scroll_amplitude: 25.0,
        pulse_base: 0.7,
        core_base: 0.3,
        alpha: 0.9,
    },
    links: LinkTuning {
        max_distance: 100.0,
        opacity_base: 0.06,
        opacity_span: 0.1,
        pulse_rate: 2.5,
        pulse_phase: 0.1,
        scroll_gain: 0.8,
    },
    signals: SignalTuning {
        count: 50,
        size_min: 2.0,
        size_span: 4.0,
        speed_min: 0.003,
        speed_span: 0.006,
        attenuation: 300.0,
        glow_exponent: 1.5,
        alpha: 0.95,
        pulse_base: 0.8,
        pulse_speed: 5.0,
    },
    particles: ParticleTuning {
        count: 600,
        field_size: 900.0,
        depth_factor: 0.6,
        size_min: 0.3,
        size_max: 1.5,
        alpha_min: 0.3,
        alpha_span: 0.7,
        spin: 0.03,
        scroll_spin: 0.8,
        tilt_rate: 0.02,
        tilt_amplitude: 0.1,
        drift_y: [0.5, 0.05, 0.15],
        drift_x: [0.3, 0.03, 0.08],
        attenuation: 300.0,
        glow_exponent: 2.5,
        brightness: 1.5,
        alpha_scale: 1.0,
    },
    streams: StreamTuning {
        count: 6,
        points: 40,
        radius_min: 180.0,
        radius_span: 80.0,
        height: 450.0,
        size_min: 1.0,
        size_span: 3.0,
        alpha: 0.7,
        hue_span: 0.12,
        saturation: 1.0,
        lightness: 0.5,
        speed_min: 0.25,
        speed_span: 0.25,
        scroll_spin: 3.0,
        wave_rate: 2.5,
        wave_phase: 0.25,
        wave_amplitude: 12.0,
        scroll_lift: 120.0,
        attenuation: 400.0,
        glow_exponent: 1.5,
    },
    waves: WaveTuning {
        count: 3,
        inner_radius: 40.0,
        radius_step: 60.0,
        width: 4.0,
        z: -100.0,
        speed_min: 0.4,
        speed_step: 0.15,
        phase_step: 0.5,
        pulse_amplitude: 0.4,
        scroll_gain: 0.6,
        spin: 0.12,
        opacity_base: 0.06,
        opacity_step: 0.015,
        flicker_rate: 2.5,
        flicker_amplitude: 0.4,
    },
    camera: CameraTuning {
        fovy_degrees: 60.0,
        znear: 1.0,
        zfar: 2000.0,
        distance: 500.0,
        drift_speed: 0.0003,
        drift_radius: 100.0,
        drift_y_factor: 0.7,
        drift_z_freq: 600.0,
        drift_z_amplitude: 30.0,
        mouse_gain_x: 50.0,
        mouse_gain_y: 30.0,
        follow_rate: 0.02,
        scroll_pull: 200.0,
    },
    shading: ShadingTuning {
        twinkle_base: 0.6,
        twinkle_speed: 3.0,
        twinkle_phase: 10.0,
        node_pulse_speed: 3.0,
        node_x_phase: 0.1,
        node_scroll_phase: 0.5,
    },
    palette: Palette {
        primary: 0x00d4ff,
        background: 0x050508,
        node: 0x00d4ff,
        connection: 0x1a2a3a,
        particle: 0x00d4ff,
    },
    scroll_smoothing: 0.08,
    scroll_multiplier: 2.5,
    fog_density: 0.0008,
};

pub const CLEAN: Tuning = Tuning {
    name: "clean",
    nodes: NodeTuning {
        count: 100,
        radius: 1.8,
        spread_x: 550.0,
        spread_y: 400.0,
        layer_spacing: 60.0,
        z_jitter: 40.0,
        intensity_min: 0.35,
        intensity_span: 0.35,
        speed_min: 0.15,
        speed_span: 0.25,
        amplitude_min: 6.0,
        amplitude_span: 12.0,
        y_factor: 0.7,
        z_speed: 0.35,
        z_amplitude: 6.0,
        scroll_freq: 2.5,
        scroll_amplitude: 20.0,
        pulse_base: 0.75,
        core_base: 0.35,
        alpha: 0.85,
    },
    links: LinkTuning {
        max_distance: 90.0,
        opacity_base: 0.04,
        opacity_span: 0.08,
        pulse_rate: 2.0,
        pulse_phase: 0.08,
        scroll_gain: 0.6,
    },
    signals: SignalTuning {
        count: 40,
        size_min: 1.5,
        size_span: 3.0,
        speed_min: 0.002,
        speed_span: 0.004,
        attenuation: 250.0,
        glow_exponent: 1.8,
        alpha: 0.9,
        pulse_base: 0.85,
        pulse_speed: 4.0,
    },
    particles: ParticleTuning {
        count: 800,
        field_size: 1000.0,
        depth_factor: 0.5,
        size_min: 0.2,
        size_max: 0.8,
        alpha_min: 0.2,
        alpha_span: 0.6,
        spin: 0.02,
        scroll_spin: 0.6,
        tilt_rate: 0.015,
        tilt_amplitude: 0.08,
        drift_y: [0.4, 0.04, 0.1],
        drift_x: [0.25, 0.025, 0.06],
        attenuation: 250.0,
        glow_exponent: 3.0,
        brightness: 1.8,
        alpha_scale: 0.9,
    },
    streams: StreamTuning {
        count: 5,
        points: 35,
        radius_min: 160.0,
        radius_span: 60.0,
        height: 400.0,
        size_min: 0.8,
        size_span: 2.0,
        alpha: 0.6,
        hue_span: 0.1,
        saturation: 0.9,
        lightness: 0.55,
        speed_min: 0.2,
        speed_span: 0.2,
        scroll_spin: 2.5,
        wave_rate: 2.0,
        wave_phase: 0.2,
        wave_amplitude: 10.0,
        scroll_lift: 100.0,
        attenuation: 350.0,
        glow_exponent: 1.8,
    },
    waves: WaveTuning {
        count: 2,
        inner_radius: 35.0,
        radius_step: 50.0,
        width: 3.0,
        z: -80.0,
        speed_min: 0.35,
        speed_step: 0.12,
        phase_step: 0.4,
        pulse_amplitude: 0.35,
        scroll_gain: 0.5,
        spin: 0.1,
        opacity_base: 0.05,
        opacity_step: 0.012,
        flicker_rate: 2.0,
        flicker_amplitude: 0.35,
    },
    camera: CameraTuning {
        fovy_degrees: 55.0,
        znear: 1.0,
        zfar: 2000.0,
        distance: 450.0,
        drift_speed: 0.0002,
        drift_radius: 80.0,
        drift_y_factor: 0.6,
        drift_z_freq: 500.0,
        drift_z_amplitude: 25.0,
        mouse_gain_x: 40.0,
        mouse_gain_y: 25.0,
        follow_rate: 0.015,
        scroll_pull: 180.0,
    },
    shading: ShadingTuning {
        twinkle_base: 0.5,
        twinkle_speed: 2.5,
        twinkle_phase: 8.0,
        node_pulse_speed: 2.5,
        node_x_phase: 0.08,
        node_scroll_phase: 0.0,
    },
    palette: Palette {
        primary: 0x00d4ff,
        background: 0x030306,
        node: 0x00d4ff,
        connection: 0x1a2535,
        particle: 0x00d4ff,
    },
    scroll_smoothing: 0.06,
    scroll_multiplier: 2.0,
    fog_density: 0.0006,
};

/// Named preset, chosen from the canvas `data-preset` attribute.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Default)]
pub enum Preset {
    #[default]
    Vivid,
    Clean,
}

impl Preset {
    pub fn from_attr(value: Option<&str>) -> Self {
        match value.map(str::trim) {
            Some(v) if v.eq_ignore_ascii_case("clean") => Preset::Clean,
            _ => Preset::Vivid,
        }
    }

    pub fn tuning(self) -> &'static Tuning {
        match self {
            Preset::Vivid => &VIVID,
            Preset::Clean => &CLEAN,
        }
    }
}

#[inline]
fn srgb_channel_to_linear(c: f32) -> f32 {
    if c <= 0.04045 {
        c / 12.92
    } else {
        ((c + 0.055) / 1.055).powf(2.4)
    }
}

/// Convert a `0xRRGGBB` sRGB colour to linear RGB.
pub fn hex_to_linear(hex: u32) -> [f32; 3] {
    let r = ((hex >> 16) & 0xff) as f32 / 255.0;
    let g = ((hex >> 8) & 0xff) as f32 / 255.0;
    let b = (hex & 0xff) as f32 / 255.0;
    [
        srgb_channel_to_linear(r),
        srgb_channel_to_linear(g),
        srgb_channel_to_linear(b),
    ]
}

/// Convert HSL (all in 0..1, hue wraps) to linear RGB.
pub fn hsl_to_linear(h: f32, s: f32, l: f32) -> [f32; 3] {
    let h = h.rem_euclid(1.0);
    let s = s.clamp(0.0, 1.0);
    let l = l.clamp(0.0, 1.0);
    if s == 0.0 {
        let c = srgb_channel_to_linear(l);
        return [c, c, c];
    }
    let q = if l < 0.5 { l * (1.0 + s) } else { l + s - l * s };
    let p = 2.0 * l - q;
    let hue = |t: f32| {
        let t = t.rem_euclid(1.0);
        if t < 1.0 / 6.0 {
            p + (q - p) * 6.0 * t
        } else if t < 0.5 {
            q
        } else if t < 2.0 / 3.0 {
            p + (q - p) * 6.0 * (2.0 / 3.0 - t)
        } else {
            p
        }
    };
    [
        srgb_channel_to_linear(hue(h + 1.0 / 3.0)),
        srgb_channel_to_linear(hue(h)),
        srgb_channel_to_linear(hue(h - 1.0 / 3.0)),
    ]
}
