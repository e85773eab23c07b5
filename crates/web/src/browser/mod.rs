//! Browser entry point.
//!
//! `start` builds the one [`App`] for the page, installs the decorative
//! effects and loads the shared header/footer. The exported functions reach
//! the same `App` through a thread-local handle set once at startup.

mod console;
mod cosmetic;
mod dom;
mod features;
mod header;
mod page;
mod search;
mod storage;

use std::cell::RefCell;
use std::rc::Rc;
use std::time::Duration;

use url::Url;
use wasm_bindgen::prelude::*;

use rsx_client::{ComponentLoader, FetchConfig, HttpFragmentSource, LoadReport, RegionHooks};
use rsx_core::{Region, SiteConfig};

use crate::controller::PageController;
use crate::toast::ToastKind;

use self::dom::{Listener, Observer};
use self::page::DomPage;
use self::storage::BrowserStore;

thread_local! {
    static APP: RefCell<Option<Rc<App>>> = const { RefCell::new(None) };
}

fn app() -> Option<Rc<App>> {
    APP.with(|slot| slot.borrow().clone())
}

/// Everything the page owns, plus the DOM handles that keep its listeners alive.
pub(crate) struct App {
    controller: PageController,
    loader: ComponentLoader<HttpFragmentSource, BrowserStore>,
    page: DomPage,
    features: RefCell<Option<features::FeatureDom>>,
    header: RefCell<Vec<Listener>>,
    footer: RefCell<Option<Observer>>,
    search: RefCell<Vec<Listener>>,
    cosmetics: RefCell<Vec<Listener>>,
}

impl App {
    fn new(config: SiteConfig) -> Result<Self, JsValue> {
        let window = dom::window()?;
        let location = window.location();
        let path = location.pathname()?;
        let page_url = Url::parse(&location.href()?).map_err(|e| JsValue::from_str(&e.to_string()))?;

        let source = HttpFragmentSource::new(page_url, &FetchConfig::default())
            .map_err(|e| JsValue::from_str(&e.to_string()))?;
        let loader = ComponentLoader::new(&config, &path, source, BrowserStore::open());

        Ok(Self {
            controller: PageController::new(config),
            loader,
            page: DomPage::new(dom::document()?),
            features: RefCell::new(None),
            header: RefCell::new(Vec::new()),
            footer: RefCell::new(None),
            search: RefCell::new(Vec::new()),
            cosmetics: RefCell::new(Vec::new()),
        })
    }

    async fn load(self: &Rc<Self>, reload: bool) -> LoadReport {
        let hooks = BrowserHooks { app: self };
        let report = if reload {
            self.loader.force_reload(&self.page, &hooks).await
        } else {
            self.loader.load_all(&self.page, &hooks).await
        };
        tracing::info!(header = ?report.header, footer = ?report.footer, "components ready");
        report
    }
}

/// Region hooks that update the controller and then rebind the DOM.
struct BrowserHooks<'a> {
    app: &'a Rc<App>,
}

impl RegionHooks for BrowserHooks<'_> {
    fn after_inject(&self, region: Region) {
        self.app.controller.after_inject(region);
        match region {
            Region::Header => match header::bind_menu(self.app) {
                Ok(listeners) => *self.app.header.borrow_mut() = listeners,
                Err(e) => tracing::warn!(error = ?e, "mobile menu not bound"),
            },
            Region::Footer => match header::bind_footer(self.app) {
                Ok(observer) => *self.app.footer.borrow_mut() = observer,
                Err(e) => tracing::warn!(error = ?e, "footer reveal not bound"),
            },
        }
    }

    fn components_ready(&self) {
        if self.app.controller.ensure_features() {
            match features::install(self.app) {
                Ok(feature_dom) => *self.app.features.borrow_mut() = Some(feature_dom),
                Err(e) => tracing::warn!(error = ?e, "enhanced features not bound"),
            }
        }
        if let Err(e) = search::wire(self.app) {
            tracing::warn!(error = ?e, "search not wired");
        }
    }
}

#[wasm_bindgen(start)]
pub async fn start() -> Result<(), JsValue> {
    console_error_panic_hook::set_once();
    console::init();

    let app = Rc::new(App::new(SiteConfig::default())?);
    APP.with(|slot| *slot.borrow_mut() = Some(Rc::clone(&app)));

    match cosmetic::install() {
        Ok(listeners) => *app.cosmetics.borrow_mut() = listeners,
        Err(e) => tracing::warn!(error = ?e, "decorations not installed"),
    }

    app.load(false).await;
    Ok(())
}

/// Remove cached fragments and the version tag from local storage.
#[wasm_bindgen(js_name = clearComponentsCache)]
pub async fn clear_components_cache() -> Result<(), JsValue> {
    if let Some(app) = app() {
        app.loader.clear_cache().await;
    }
    Ok(())
}

/// Clear the cache and load header and footer again from the network.
#[wasm_bindgen(js_name = reloadComponents)]
pub async fn reload_components() -> Result<(), JsValue> {
    if let Some(app) = app() {
        app.load(true).await;
    }
    Ok(())
}

#[wasm_bindgen(js_name = showToast)]
pub fn show_toast(message: &str, kind: Option<String>, duration_ms: Option<u32>) -> Result<(), JsValue> {
    let Some(app) = app() else {
        return Ok(());
    };
    let kind = ToastKind::from_name(kind.as_deref());
    let duration = duration_ms.map(|ms| Duration::from_millis(u64::from(ms)));
    features::show_toast(&app, message, kind, duration)
}
