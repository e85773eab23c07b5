//! DOM side of the enhanced features: toasts, back-to-top, progress bar,
//! card reveal and lazy images.

use std::cell::RefCell;
use std::rc::{Rc, Weak};
use std::time::Duration;

use wasm_bindgen::prelude::*;
use web_sys::{Element, ScrollBehavior, ScrollToOptions};

use rsx_client::delay;

use super::App;
use super::dom::{self, Listener, Observer};
use crate::reveal::{
    ANIMATE_IN_CLASS, HIDDEN_STYLE, LAZY_CLASS, LAZY_SELECTOR, LazyImages, REVEAL_SELECTOR, REVEALED_STYLE,
    RevealTracker,
};
use crate::scroll;
use crate::toast::{self, Toast, ToastId, ToastKind, ToastStack};

const TOAST_ID_ATTR: &str = "data-toast-id";

/// Elements and handles created once per page.
pub struct FeatureDom {
    toast_container: Element,
    _listeners: Vec<Listener>,
    _observers: Vec<Observer>,
}

pub fn install(app: &Rc<App>) -> Result<FeatureDom, JsValue> {
    let window = dom::window()?;
    let doc = dom::document()?;
    let body = doc.body().ok_or_else(|| JsValue::from_str("no body"))?;
    let mut listeners = Vec::new();

    let toast_container = doc.create_element("div")?;
    toast_container.set_class_name("toast-container");
    body.append_child(&toast_container)?;
    let weak = Rc::downgrade(app);
    listeners.push(Listener::new(&toast_container, "click", move |event| close_toast(&weak, &event))?);

    let button = doc.create_element("button")?;
    button.set_class_name("back-to-top");
    button.set_inner_html(r#"<i class="fas fa-chevron-up"></i>"#);
    button.set_attribute("aria-label", "Voltar ao topo")?;
    body.append_child(&button)?;

    let progress = doc.create_element("div")?;
    progress.set_class_name("progress-bar");
    body.append_child(&progress)?;

    let weak = Rc::downgrade(app);
    let win = window.clone();
    let scroll_button = button.clone();
    listeners.push(Listener::new(&window, "scroll", move |_| {
        let Some(app) = weak.upgrade() else { return };
        let offset = win.scroll_y().unwrap_or(0.0);
        if let Some(visible) = app.controller.scrolled(offset) {
            dom::set_class(&scroll_button, "show", visible);
        }
        if let Some(root) = win.document().and_then(|d| d.document_element()) {
            let top = win.document().and_then(|d| d.body()).map_or(0, |b| b.scroll_top()).max(root.scroll_top());
            let width = scroll::progress_width(f64::from(top), f64::from(root.scroll_height()), f64::from(root.client_height()));
            dom::set_styles(&progress, &[("width", width.as_str())]);
        }
    })?);

    let weak = Rc::downgrade(app);
    let win = window.clone();
    listeners.push(Listener::new(&button, "click", move |_| {
        let options = ScrollToOptions::new();
        options.set_top(0.0);
        options.set_behavior(ScrollBehavior::Smooth);
        win.scroll_to_with_scroll_to_options(&options);
        if let Some(app) = weak.upgrade() {
            let _ = show_toast(&app, scroll::BACK_TO_TOP_MESSAGE, ToastKind::Info, Some(scroll::BACK_TO_TOP_TOAST));
        }
    })?);

    let observers = vec![observe_cards()?, observe_lazy_images()?];
    tracing::debug!("enhanced feature elements installed");

    Ok(FeatureDom { toast_container, _listeners: listeners, _observers: observers })
}

fn observe_cards() -> Result<Observer, JsValue> {
    let cards = dom::query_all(&dom::document()?, REVEAL_SELECTOR);
    for card in &cards {
        dom::set_styles(card, HIDDEN_STYLE);
    }

    let tracker = RefCell::new(RevealTracker::new(cards.len()));
    let targets = cards.clone();
    let observer = Observer::reveal(move |entry, _| {
        let target = entry.target();
        let Some(index) = targets.iter().position(|card| *card == target) else { return };
        if tracker.borrow_mut().on_intersect(index, entry.is_intersecting()) {
            let _ = target.class_list().add_1(ANIMATE_IN_CLASS);
            dom::set_styles(&target, REVEALED_STYLE);
        }
    })?;
    for card in &cards {
        observer.observe(card);
    }
    Ok(observer)
}

fn observe_lazy_images() -> Result<Observer, JsValue> {
    let images = dom::query_all(&dom::document()?, LAZY_SELECTOR);
    let sources = images.iter().map(|img| img.get_attribute("data-src").unwrap_or_default());

    let pending = RefCell::new(LazyImages::new(sources));
    let targets = images.clone();
    let observer = Observer::plain(move |entry, observer| {
        let target = entry.target();
        let Some(index) = targets.iter().position(|img| *img == target) else { return };
        if let Some(src) = pending.borrow_mut().on_intersect(index, entry.is_intersecting()) {
            let _ = target.set_attribute("src", &src);
            let _ = target.class_list().remove_1(LAZY_CLASS);
            observer.unobserve(&target);
        }
    })?;
    for img in &images {
        observer.observe(img);
    }
    Ok(observer)
}

/// Append a toast and schedule its enter and exit transitions.
pub fn show_toast(app: &Rc<App>, message: &str, kind: ToastKind, duration: Option<Duration>) -> Result<(), JsValue> {
    let Some(container) = app.features.borrow().as_ref().map(|f| f.toast_container.clone()) else {
        return Ok(());
    };
    let Some(id) = app.controller.show_toast(message, kind, duration) else {
        return Ok(());
    };
    let Some(toast) = app.controller.with_toasts(|toasts| toasts.get(id).cloned()).flatten() else {
        return Ok(());
    };

    let el = dom::document()?.create_element("div")?;
    el.set_class_name(&toast.class_list());
    el.set_attribute(TOAST_ID_ATTR, &id.get().to_string())?;
    el.set_inner_html(&toast.render().into_string());
    container.append_child(&el)?;

    let weak = Rc::downgrade(app);
    wasm_bindgen_futures::spawn_local(async move {
        delay::sleep(toast::ENTER_DELAY).await;
        let Some(class) = advance(&weak, id, ToastStack::reveal) else { return };
        el.set_class_name(&class);

        delay::sleep(toast.duration).await;
        let Some(class) = advance(&weak, id, ToastStack::begin_exit) else { return };
        el.set_class_name(&class);

        delay::sleep(toast::EXIT_DURATION).await;
        let removed = weak.upgrade().and_then(|app| app.controller.with_toasts(|toasts| toasts.remove(id)));
        if removed == Some(true) {
            el.remove();
        }
    });
    Ok(())
}

/// Apply a transition and return the new class list, or `None` once the toast is gone.
fn advance(app: &Weak<App>, id: ToastId, step: fn(&mut ToastStack, ToastId) -> bool) -> Option<String> {
    let app = app.upgrade()?;
    app.controller
        .with_toasts(|toasts| if step(toasts, id) { toasts.get(id).map(Toast::class_list) } else { None })
        .flatten()
}

fn close_toast(app: &Weak<App>, event: &web_sys::Event) {
    let Some(target) = dom::event_element(event) else { return };
    if !target.class_list().contains("toast-close") {
        return;
    }
    let Some(el) = target.closest(".toast").ok().flatten() else { return };
    if let (Some(app), Some(id)) = (app.upgrade(), el.get_attribute(TOAST_ID_ATTR).as_deref().and_then(ToastId::parse)) {
        app.controller.with_toasts(|toasts| toasts.remove(id));
    }
    el.remove();
}
