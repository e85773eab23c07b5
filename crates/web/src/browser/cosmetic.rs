//! Decorations installed once at startup.

use wasm_bindgen::JsCast;
use wasm_bindgen::prelude::*;
use web_sys::{HtmlElement, MediaQueryListEvent, ScrollBehavior, ScrollToOptions};

use super::dom::{self, Listener};
use crate::cosmetic::{DARK_MODE_CLASS, DARK_SCHEME_QUERY, PARTICLE_CLASS, PARTICLES_ID, anchor_scroll_top, particles};
use crate::scroll::parallax_transform;

pub fn install() -> Result<Vec<Listener>, JsValue> {
    let mut listeners = Vec::new();
    listeners.extend(dark_mode()?);
    spawn_particles()?;
    listeners.extend(anchor_links()?);
    listeners.push(parallax()?);
    Ok(listeners)
}

fn dark_mode() -> Result<Option<Listener>, JsValue> {
    let window = dom::window()?;
    let Some(root) = dom::document()?.document_element() else {
        return Ok(None);
    };
    let Some(scheme) = window.match_media(DARK_SCHEME_QUERY)? else {
        return Ok(None);
    };

    dom::set_class(&root, DARK_MODE_CLASS, scheme.matches());
    let listener = Listener::new(&scheme, "change", move |event| {
        if let Some(event) = event.dyn_ref::<MediaQueryListEvent>() {
            dom::set_class(&root, DARK_MODE_CLASS, event.matches());
        }
    })?;
    Ok(Some(listener))
}

fn spawn_particles() -> Result<(), JsValue> {
    let doc = dom::document()?;
    let Some(container) = doc.get_element_by_id(PARTICLES_ID) else {
        return Ok(());
    };
    for spec in particles(js_sys::Math::random) {
        let particle = doc.create_element("div")?;
        particle.set_class_name(PARTICLE_CLASS);
        for (property, value) in spec.style() {
            dom::set_styles(&particle, &[(property, value.as_str())]);
        }
        container.append_child(&particle)?;
    }
    Ok(())
}

fn anchor_links() -> Result<Vec<Listener>, JsValue> {
    let window = dom::window()?;
    let doc = dom::document()?;
    let mut listeners = Vec::new();

    for link in dom::query_all(&doc, r##"a[href^="#"]"##) {
        let (window, doc, anchor) = (window.clone(), doc.clone(), link.clone());
        listeners.push(Listener::new(&link, "click", move |event| {
            event.prevent_default();
            let Some(href) = anchor.get_attribute("href") else { return };
            let Some(target) = dom::query(&doc, &href).and_then(|el| el.dyn_into::<HtmlElement>().ok()) else {
                return;
            };
            let header_height = dom::query(&doc, ".main-header")
                .and_then(|el| el.dyn_into::<HtmlElement>().ok())
                .map_or(0, |header| header.offset_height());

            let options = ScrollToOptions::new();
            options.set_top(anchor_scroll_top(f64::from(target.offset_top()), f64::from(header_height)));
            options.set_behavior(ScrollBehavior::Smooth);
            window.scroll_to_with_scroll_to_options(&options);
        })?);
    }
    Ok(listeners)
}

fn parallax() -> Result<Listener, JsValue> {
    let window = dom::window()?;
    let win = window.clone();
    Listener::new(&window, "scroll", move |_| {
        let Some(doc) = win.document() else { return };
        let transform = parallax_transform(win.scroll_y().unwrap_or(0.0));
        for el in dom::query_all(&doc, ".gradient-bg") {
            dom::set_styles(&el, &[("transform", transform.as_str())]);
        }
    })
}
