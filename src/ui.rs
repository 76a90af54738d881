// Page glue around the background: scroll progress, section highlighting,
// mobile navigation and scroll reveal. Every function is a no-op when the
// elements it looks for are absent.

use crate::constants::{REVEAL_SELECTOR, REVEAL_THRESHOLD};
use crate::dom;
use crate::input::{self, SectionRect};
use wasm_bindgen::closure::Closure;
use wasm_bindgen::JsCast;
use web_sys as web;

pub fn update_scroll_progress(document: &web::Document) {
    let Ok(Some(bar)) = document.query_selector(".scroll-progress-bar") else {
        return;
    };
    let Some(bar) = bar.dyn_ref::<web::HtmlElement>() else {
        return;
    };
    let inner_height = dom::viewport_size().map(|(_, h)| h).unwrap_or(0.0);
    let pct = input::progress_percent(dom::scroll_y(), dom::scroll_height(), inner_height);
    _ = bar
        .style()
        .set_property("width", &input::progress_width(pct));
}

pub fn update_active_section(document: &web::Document) {
    let sections: Vec<SectionRect> = dom::query_all(document, ".section")
        .into_iter()
        .map(|el| {
            let rect = el.get_bounding_client_rect();
            SectionRect {
                id: el.id(),
                top: rect.top(),
                bottom: rect.bottom(),
            }
        })
        .collect();
    let viewport_height = dom::viewport_size().map(|(_, h)| h).unwrap_or(0.0);
    let current = input::active_section(&sections, viewport_height);

    for el in dom::query_all(document, ".nav-link, .section-dot") {
        let on = input::is_highlighted(el.get_attribute("data-section").as_deref(), current);
        _ = el.class_list().toggle_with_force("active", on);
    }
}

pub fn init_navigation(document: &web::Document) {
    wire_nav_toggle(document);
    wire_smooth_anchors(document);
}

fn wire_nav_toggle(document: &web::Document) {
    let Ok(Some(toggle)) = document.query_selector(".nav-toggle") else {
        return;
    };
    let Ok(Some(links)) = document.query_selector(".nav-links") else {
        return;
    };

    {
        let toggle_el = toggle.clone();
        let links_el = links.clone();
        dom::add_listener(&toggle, "click", move |_: web::Event| {
            _ = toggle_el.class_list().toggle("active");
            _ = links_el.class_list().toggle("active");
        });
    }

    let Ok(anchors) = links.query_selector_all("a") else {
        return;
    };
    for i in 0..anchors.length() {
        let Some(anchor) = anchors.item(i) else {
            continue;
        };
        let toggle_el = toggle.clone();
        let links_el = links.clone();
        dom::add_listener(&anchor, "click", move |_: web::Event| {
            _ = toggle_el.class_list().remove_1("active");
            _ = links_el.class_list().remove_1("active");
        });
    }
}

fn wire_smooth_anchors(document: &web::Document) {
    for anchor in dom::query_all(document, "a[href^=\"#\"]") {
        let Some(href) = anchor.get_attribute("href") else {
            continue;
        };
        // A bare "#" is not a valid selector
        if href.len() < 2 {
            continue;
        }
        let doc = document.clone();
        dom::add_listener(&anchor, "click", move |ev: web::Event| {
            ev.prevent_default();
            if let Ok(Some(target)) = doc.query_selector(&href) {
                let opts = web::ScrollIntoViewOptions::new();
                opts.set_behavior(web::ScrollBehavior::Smooth);
                opts.set_block(web::ScrollLogicalPosition::Start);
                target.scroll_into_view_with_scroll_into_view_options(&opts);
            }
        });
    }
}

/// Add `visible` to cards as they enter the viewport.
pub fn init_scroll_reveal(document: &web::Document) {
    let cards = dom::query_all(document, REVEAL_SELECTOR);
    if cards.is_empty() {
        return;
    }

    let callback = Closure::wrap(Box::new(move |entries: js_sys::Array| {
        for entry in entries.iter() {
            let Ok(entry) = entry.dyn_into::<web::IntersectionObserverEntry>() else {
                continue;
            };
            if entry.is_intersecting() {
                _ = entry.target().class_list().add_1("visible");
            }
        }
    }) as Box<dyn FnMut(js_sys::Array)>);

    let init = web::IntersectionObserverInit::new();
    init.set_threshold(&wasm_bindgen::JsValue::from_f64(REVEAL_THRESHOLD));
    let observer = match web::IntersectionObserver::new_with_options(
        callback.as_ref().unchecked_ref(),
        &init,
    ) {
        Ok(o) => o,
        Err(e) => {
            log::warn!("[ui] IntersectionObserver unavailable: {:?}", e);
            return;
        }
    };
    callback.forget();

    for card in &cards {
        observer.observe(card);
    }
    log::debug!("[ui] observing {} cards", cards.len());
}
