//! Small DOM helpers and RAII handles for listeners and observers.

use js_sys::Array;
use wasm_bindgen::JsCast;
use wasm_bindgen::prelude::*;
use web_sys::{
    Document, Element, Event, EventTarget, HtmlElement, IntersectionObserver, IntersectionObserverEntry,
    IntersectionObserverInit, Node, Window,
};

use crate::reveal::{OBSERVER_ROOT_MARGIN, OBSERVER_THRESHOLD};

pub fn window() -> Result<Window, JsValue> {
    web_sys::window().ok_or_else(|| JsValue::from_str("no window"))
}

pub fn document() -> Result<Document, JsValue> {
    window()?.document().ok_or_else(|| JsValue::from_str("no document"))
}

pub fn query(doc: &Document, selector: &str) -> Option<Element> {
    doc.query_selector(selector).ok().flatten()
}

pub fn query_all(doc: &Document, selector: &str) -> Vec<Element> {
    let Ok(list) = doc.query_selector_all(selector) else {
        return Vec::new();
    };
    (0..list.length()).filter_map(|i| list.item(i)).filter_map(|node| node.dyn_into::<Element>().ok()).collect()
}

pub fn set_styles(el: &Element, styles: &[(&str, &str)]) {
    if let Some(el) = el.dyn_ref::<HtmlElement>() {
        let style = el.style();
        for (property, value) in styles {
            let _ = style.set_property(property, value);
        }
    }
}

pub fn set_display(el: &Element, visible: bool) {
    set_styles(el, &[("display", if visible { "block" } else { "none" })]);
}

pub fn set_class(el: &Element, class: &str, on: bool) {
    let _ = el.class_list().toggle_with_force(class, on);
}

/// Whether the event target lies inside `container`.
pub fn event_within(container: &Element, event: &Event) -> bool {
    event
        .target()
        .and_then(|target| target.dyn_into::<Node>().ok())
        .is_some_and(|node| container.contains(Some(&node)))
}

pub fn event_element(event: &Event) -> Option<Element> {
    event.target().and_then(|target| target.dyn_into::<Element>().ok())
}

/// An event listener that is removed from its target when dropped.
pub struct Listener {
    target: EventTarget,
    kind: &'static str,
    callback: Closure<dyn FnMut(Event)>,
}

impl Listener {
    pub fn new(target: &EventTarget, kind: &'static str, handler: impl FnMut(Event) + 'static) -> Result<Self, JsValue> {
        let callback = Closure::<dyn FnMut(Event)>::new(handler);
        target.add_event_listener_with_callback(kind, callback.as_ref().unchecked_ref())?;
        Ok(Self { target: target.clone(), kind, callback })
    }
}

impl Drop for Listener {
    fn drop(&mut self) {
        let _ = self.target.remove_event_listener_with_callback(self.kind, self.callback.as_ref().unchecked_ref());
    }
}

type ObserverCallback = Closure<dyn FnMut(Array, IntersectionObserver)>;

/// An intersection observer that disconnects when dropped.
pub struct Observer {
    observer: IntersectionObserver,
    _callback: ObserverCallback,
}

impl Observer {
    /// Observer using the page-wide reveal threshold and root margin.
    pub fn reveal(handler: impl FnMut(&IntersectionObserverEntry, &IntersectionObserver) + 'static) -> Result<Self, JsValue> {
        let options = IntersectionObserverInit::new();
        options.set_threshold(&JsValue::from_f64(OBSERVER_THRESHOLD));
        options.set_root_margin(OBSERVER_ROOT_MARGIN);
        Self::build(handler, &options)
    }

    /// Observer with browser defaults.
    pub fn plain(handler: impl FnMut(&IntersectionObserverEntry, &IntersectionObserver) + 'static) -> Result<Self, JsValue> {
        Self::build(handler, &IntersectionObserverInit::new())
    }

    fn build(
        mut handler: impl FnMut(&IntersectionObserverEntry, &IntersectionObserver) + 'static,
        options: &IntersectionObserverInit,
    ) -> Result<Self, JsValue> {
        let callback: ObserverCallback = Closure::new(move |entries: Array, observer: IntersectionObserver| {
            for entry in entries.iter() {
                if let Ok(entry) = entry.dyn_into::<IntersectionObserverEntry>() {
                    handler(&entry, &observer);
                }
            }
        });
        let observer = IntersectionObserver::new_with_options(callback.as_ref().unchecked_ref(), options)?;
        Ok(Self { observer, _callback: callback })
    }

    pub fn observe(&self, el: &Element) {
        self.observer.observe(el);
    }
}

impl Drop for Observer {
    fn drop(&mut self) {
        self.observer.disconnect();
    }
}
