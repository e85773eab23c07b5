//! Search box wiring against the current header subtree.

use std::rc::Rc;

use wasm_bindgen::JsCast;
use wasm_bindgen::prelude::*;
use web_sys::{Document, Element, HtmlInputElement, KeyboardEvent};

use rsx_core::search::search_bar;

use super::App;
use super::dom::{self, Listener};
use crate::controller::WireOutcome;
use crate::search_box::SearchView;

const CONTAINER: &str = ".search-container";
const HEADER_NAV: &str = ".header-nav";

#[derive(Clone)]
struct Widgets {
    input: HtmlInputElement,
    clear: Element,
    results: Element,
}

impl Widgets {
    fn show(&self, view: &SearchView) {
        self.results.set_inner_html(&view.results_html);
        dom::set_display(&self.results, view.results_visible);
        dom::set_display(&self.clear, view.clear_visible);
        if self.input.value() != view.input {
            self.input.set_value(&view.input);
        }
        if !view.focused {
            let _ = self.input.blur();
        }
    }
}

pub fn wire(app: &Rc<App>) -> Result<(), JsValue> {
    let doc = dom::document()?;
    let container = match dom::query(&doc, CONTAINER) {
        Some(container) => container,
        None => {
            let Some(nav) = dom::query(&doc, HEADER_NAV) else {
                tracing::debug!("no header navigation, search skipped");
                return Ok(());
            };
            let container = doc.create_element("div")?;
            container.set_class_name("search-container");
            container.set_inner_html(&search_bar().into_string());
            nav.insert_before(&container, nav.first_child().as_ref())?;
            container
        }
    };

    let (Some(input), Some(clear), Some(results)) = (
        dom::query(&doc, ".search-input").and_then(|el| el.dyn_into::<HtmlInputElement>().ok()),
        dom::query(&doc, ".search-clear"),
        dom::query(&doc, ".search-results"),
    ) else {
        return Ok(());
    };

    match app.controller.wire_search() {
        WireOutcome::Attached { .. } => {}
        WireOutcome::AlreadyWired { .. } | WireOutcome::NotReady => return Ok(()),
    }

    let widgets = Widgets { input, clear, results };
    let listeners = listen(app, &doc, container, widgets)?;
    *app.search.borrow_mut() = listeners;
    Ok(())
}

fn listen(app: &Rc<App>, doc: &Document, container: Element, widgets: Widgets) -> Result<Vec<Listener>, JsValue> {
    let mut listeners = Vec::new();

    let weak = Rc::downgrade(app);
    let w = widgets.clone();
    listeners.push(Listener::new(&widgets.input, "input", move |_| {
        let Some(app) = weak.upgrade() else { return };
        if let Some(view) = app.controller.search_input(&w.input.value()) {
            w.show(&view);
        }
    })?);

    let weak = Rc::downgrade(app);
    let w = widgets.clone();
    listeners.push(Listener::new(&widgets.clear, "click", move |_| {
        let Some(app) = weak.upgrade() else { return };
        if let Some(view) = app.controller.with_search(|sb| sb.on_clear().clone()) {
            w.show(&view);
        }
    })?);

    let weak = Rc::downgrade(app);
    let w = widgets.clone();
    listeners.push(Listener::new(&widgets.input, "keydown", move |event| {
        let Some(key) = event.dyn_ref::<KeyboardEvent>().map(KeyboardEvent::key) else { return };
        let Some(app) = weak.upgrade() else { return };
        if let Some(view) = app.controller.with_search(|sb| sb.on_key(&key).clone()) {
            w.show(&view);
        }
    })?);

    let weak = Rc::downgrade(app);
    listeners.push(Listener::new(doc, "click", move |event| {
        let inside = dom::event_within(&container, &event);
        let Some(app) = weak.upgrade() else { return };
        if inside {
            return;
        }
        if let Some(view) = app.controller.with_search(|sb| sb.on_document_click(false).clone()) {
            widgets.show(&view);
        }
    })?);

    tracing::debug!(generation = app.controller.header_generation(), "search listeners attached");
    Ok(listeners)
}
