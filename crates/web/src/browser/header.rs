//! Behaviour attached after header and footer injection.
//!
//! Injection replaces the whole subtree, so every call re-queries fresh
//! elements. The returned handles replace the previous ones, which removes
//! the old document-level listeners.

use std::rc::Rc;

use wasm_bindgen::prelude::*;
use web_sys::Element;

use super::App;
use super::dom::{self, Listener, Observer};
use crate::menu::{ACTIVE_CLASS, MobileMenu};
use crate::reveal::{FOOTER_ID, FOOTER_VISIBLE_CLASS};

const MENU_TOGGLE_ID: &str = "mobileMenuToggle";
const MOBILE_NAV_ID: &str = "mobileNav";
const MOBILE_NAV_LINK: &str = ".mobile-nav-link";

pub fn bind_menu(app: &Rc<App>) -> Result<Vec<Listener>, JsValue> {
    let doc = dom::document()?;
    let (Some(toggle), Some(nav)) = (doc.get_element_by_id(MENU_TOGGLE_ID), doc.get_element_by_id(MOBILE_NAV_ID))
    else {
        return Ok(Vec::new());
    };

    let show = {
        let (toggle, nav) = (toggle.clone(), nav.clone());
        move |open: Option<bool>| {
            if let Some(open) = open {
                dom::set_class(&toggle, ACTIVE_CLASS, open);
                dom::set_class(&nav, ACTIVE_CLASS, open);
            }
        }
    };

    let mut listeners = Vec::new();

    let weak = Rc::downgrade(app);
    let apply = show.clone();
    listeners.push(Listener::new(&toggle, "click", move |_| {
        if let Some(app) = weak.upgrade() {
            apply(app.controller.with_menu(MobileMenu::toggle));
        }
    })?);

    for link in dom::query_all(&doc, MOBILE_NAV_LINK) {
        let weak = Rc::downgrade(app);
        let apply = show.clone();
        listeners.push(Listener::new(&link, "click", move |_| {
            if let Some(app) = weak.upgrade() {
                apply(app.controller.with_menu(MobileMenu::link_clicked));
            }
        })?);
    }

    let weak = Rc::downgrade(app);
    listeners.push(Listener::new(&doc, "click", move |event| {
        let inside = dom::event_within(&toggle, &event) || dom::event_within(&nav, &event);
        if let Some(app) = weak.upgrade() {
            show(app.controller.with_menu(|menu| menu.document_clicked(inside)));
        }
    })?);

    Ok(listeners)
}

pub fn bind_footer(app: &Rc<App>) -> Result<Option<Observer>, JsValue> {
    let Some(footer) = dom::document()?.get_element_by_id(FOOTER_ID) else {
        return Ok(None);
    };

    let weak = Rc::downgrade(app);
    let observer = Observer::reveal(move |entry, _| {
        let Some(app) = weak.upgrade() else { return };
        if app.controller.with_footer(|f| f.on_intersect(entry.is_intersecting())) == Some(true) {
            reveal(&entry.target());
        }
    })?;
    observer.observe(&footer);
    Ok(Some(observer))
}

fn reveal(footer: &Element) {
    let _ = footer.class_list().add_1(FOOTER_VISIBLE_CLASS);
}
