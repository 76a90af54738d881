// Shared input scalars written by event listeners and read once per frame,
// plus the pure math behind the scroll-driven page glue.

use glam::Vec2;

#[derive(Clone, Copy, Debug, Default)]
pub struct InputState {
    /// Pointer position normalized to [-1, 1]; +y points down the page.
    pub mouse: Vec2,
    pub target_scroll_y: f32,
    /// Viewport size in CSS pixels.
    pub viewport: Vec2,
}

/// Map client coordinates to [-1, 1] across the viewport.
#[inline]
pub fn normalize_pointer(client_x: f32, client_y: f32, width: f32, height: f32) -> Vec2 {
    let axis = |v: f32, extent: f32| {
        if extent > 0.0 {
            ((v / extent) * 2.0 - 1.0).clamp(-1.0, 1.0)
        } else {
            0.0
        }
    };
    Vec2::new(axis(client_x, width), axis(client_y, height))
}

/// Fraction of the page scrolled, clamped to [0, 1].
#[inline]
pub fn scroll_fraction(scroll_y: f64, scroll_height: f64, inner_height: f64) -> f64 {
    let range = scroll_height - inner_height;
    if range <= 0.0 || !scroll_y.is_finite() {
        return 0.0;
    }
    (scroll_y / range).clamp(0.0, 1.0)
}

#[inline]
pub fn progress_percent(scroll_y: f64, scroll_height: f64, inner_height: f64) -> f64 {
    (scroll_fraction(scroll_y, scroll_height, inner_height) * 100.0).clamp(0.0, 100.0)
}

/// CSS width value for the progress bar.
pub fn progress_width(percent: f64) -> String {
    format!("{}%", percent)
}

/// Vertical extent of a page section relative to the viewport.
#[derive(Clone, Debug)]
pub struct SectionRect {
    pub id: String,
    pub top: f64,
    pub bottom: f64,
}

/// Id of the section straddling the middle of the viewport. When several do,
/// the last one in document order wins.
pub fn active_section(sections: &[SectionRect], viewport_height: f64) -> Option<&str> {
    let mid = viewport_height / 2.0;
    sections
        .iter()
        .filter(|s| s.top <= mid && s.bottom >= mid)
        .last()
        .map(|s| s.id.as_str())
}

/// Whether a link or dot tagged `data-section` should carry `active`. With no
/// active section every highlight is cleared.
#[inline]
pub fn is_highlighted(link_section: Option<&str>, active: Option<&str>) -> bool {
    match (link_section, active) {
        (Some(link), Some(current)) => link == current,
        _ => false,
    }
}
