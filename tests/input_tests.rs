// Host-side tests for pure input functions.
// The main crate is wasm-only, so we include the pure-Rust modules directly.

#![allow(dead_code)]
mod input {
    include!("../src/input.rs");
}

use glam::Vec2;
use input::*;

fn section(id: &str, top: f64, bottom: f64) -> SectionRect {
    SectionRect {
        id: id.to_string(),
        top,
        bottom,
    }
}

#[test]
fn pointer_maps_viewport_to_unit_square() {
    assert_eq!(normalize_pointer(400.0, 300.0, 800.0, 600.0), Vec2::ZERO);
    assert_eq!(normalize_pointer(0.0, 0.0, 800.0, 600.0), Vec2::new(-1.0, -1.0));
    assert_eq!(normalize_pointer(800.0, 600.0, 800.0, 600.0), Vec2::new(1.0, 1.0));
}

#[test]
fn pointer_outside_viewport_is_clamped() {
    assert_eq!(normalize_pointer(-50.0, 900.0, 800.0, 600.0), Vec2::new(-1.0, 1.0));
}

#[test]
fn pointer_with_empty_viewport_is_centred() {
    assert_eq!(normalize_pointer(120.0, 80.0, 0.0, 0.0), Vec2::ZERO);
}

#[test]
fn scroll_fraction_is_clamped() {
    assert_eq!(scroll_fraction(500.0, 2000.0, 1000.0), 0.5);
    assert_eq!(scroll_fraction(-10.0, 2000.0, 1000.0), 0.0);
    assert_eq!(scroll_fraction(1500.0, 2000.0, 1000.0), 1.0);
}

#[test]
fn page_shorter_than_viewport_has_no_progress() {
    assert_eq!(scroll_fraction(0.0, 800.0, 1000.0), 0.0);
    assert_eq!(progress_percent(20.0, 1000.0, 1000.0), 0.0);
}

#[test]
fn progress_percent_and_width() {
    assert_eq!(progress_percent(250.0, 2000.0, 1000.0), 25.0);
    assert_eq!(progress_percent(5000.0, 2000.0, 1000.0), 100.0);
    assert_eq!(progress_width(25.0), "25%");
    assert_eq!(progress_width(12.5), "12.5%");
}

#[test]
fn active_section_straddles_viewport_middle() {
    let sections = [
        section("about", -800.0, -100.0),
        section("projects", -100.0, 700.0),
        section("blog", 700.0, 1400.0),
    ];
    assert_eq!(active_section(&sections, 800.0), Some("projects"));
}

#[test]
fn active_section_prefers_the_last_match() {
    let sections = [section("outer", 0.0, 1000.0), section("inner", 200.0, 600.0)];
    assert_eq!(active_section(&sections, 800.0), Some("inner"));
}

#[test]
fn active_section_none_when_nothing_straddles() {
    let sections = [section("a", 500.0, 900.0)];
    assert_eq!(active_section(&sections, 800.0), None);
    assert_eq!(active_section(&[], 800.0), None);
}

#[test]
fn highlight_follows_the_active_section() {
    assert!(is_highlighted(Some("projects"), Some("projects")));
    assert!(!is_highlighted(Some("about"), Some("projects")));
    assert!(!is_highlighted(None, Some("projects")));
}

#[test]
fn gap_between_sections_clears_every_highlight() {
    let sections = [section("a", 900.0, 1500.0)];
    let current = active_section(&sections, 800.0);
    assert_eq!(current, None);
    assert!(!is_highlighted(Some("a"), current));
    assert!(!is_highlighted(Some(""), current));
    assert!(!is_highlighted(None, current));
}
