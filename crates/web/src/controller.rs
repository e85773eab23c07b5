//! The page controller: one owner for every enhanced feature on a page.
//!
//! Feature construction happens at most once per controller, however many
//! times readiness is signalled. Search wiring is keyed by the header
//! generation: every header injection replaces the subtree the search box
//! lives in and bumps the generation, so wiring twice against the same
//! subtree is a no-op while a fresh subtree gets fresh listeners.

use std::cell::{Cell, RefCell};
use std::time::Duration;

use rsx_client::RegionHooks;
use rsx_core::{Catalog, Region, SiteConfig};

use crate::menu::MobileMenu;
use crate::reveal::FooterReveal;
use crate::scroll::{self, BackToTop};
use crate::search_box::{SearchBox, SearchView};
use crate::toast::{ToastId, ToastKind, ToastStack};

/// Result of a search wiring attempt.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum WireOutcome {
    /// Listeners were attached for the current header generation.
    Attached { generation: u64 },
    /// The current generation is already wired.
    AlreadyWired { generation: u64 },
    /// Enhanced features do not exist yet.
    NotReady,
}

/// Features that exist once per page.
#[derive(Debug)]
pub struct EnhancedFeatures {
    initialized: bool,
    toasts: ToastStack,
    toast_duration: Duration,
    back_to_top: BackToTop,
    search: Option<(u64, SearchBox)>,
    catalog: Catalog,
}

impl EnhancedFeatures {
    fn new(config: &SiteConfig) -> Self {
        Self {
            initialized: true,
            toasts: ToastStack::new(),
            toast_duration: config.toast_duration(),
            back_to_top: BackToTop::new(config.back_to_top_threshold),
            search: None,
            catalog: config.catalog.clone(),
        }
    }

    pub fn is_initialized(&self) -> bool {
        self.initialized
    }

    pub fn toasts(&self) -> &ToastStack {
        &self.toasts
    }

    /// Header generation the search box is wired to, if any.
    pub fn search_generation(&self) -> Option<u64> {
        self.search.as_ref().map(|(generation, _)| *generation)
    }
}

pub struct PageController {
    config: SiteConfig,
    features: RefCell<Option<EnhancedFeatures>>,
    header_generation: Cell<u64>,
    menu: RefCell<Option<MobileMenu>>,
    footer: RefCell<Option<FooterReveal>>,
}

impl PageController {
    pub fn new(config: SiteConfig) -> Self {
        Self {
            config,
            features: RefCell::new(None),
            header_generation: Cell::new(0),
            menu: RefCell::new(None),
            footer: RefCell::new(None),
        }
    }

    pub fn config(&self) -> &SiteConfig {
        &self.config
    }

    /// Create the enhanced features unless they already exist and report
    /// themselves initialized. Returns true when they were created by this call.
    pub fn ensure_features(&self) -> bool {
        let mut features = self.features.borrow_mut();
        if features.as_ref().is_some_and(EnhancedFeatures::is_initialized) {
            return false;
        }
        *features = Some(EnhancedFeatures::new(&self.config));
        tracing::info!("enhanced features initialized");
        true
    }

    pub fn is_initialized(&self) -> bool {
        self.features.borrow().as_ref().is_some_and(EnhancedFeatures::is_initialized)
    }

    pub fn with_features<R>(&self, f: impl FnOnce(&EnhancedFeatures) -> R) -> Option<R> {
        self.features.borrow().as_ref().map(f)
    }

    /// Number of header injections seen so far.
    pub fn header_generation(&self) -> u64 {
        self.header_generation.get()
    }

    /// Record a fresh header subtree. Menu state restarts and the search
    /// binding becomes stale.
    pub fn header_injected(&self) -> u64 {
        let generation = self.header_generation.get() + 1;
        self.header_generation.set(generation);
        *self.menu.borrow_mut() = Some(MobileMenu::default());
        generation
    }

    pub fn footer_injected(&self) {
        *self.footer.borrow_mut() = Some(FooterReveal::default());
    }

    /// Attach search to the current header generation at most once.
    pub fn wire_search(&self) -> WireOutcome {
        let generation = self.header_generation.get();
        let mut features = self.features.borrow_mut();
        let Some(features) = features.as_mut() else {
            return WireOutcome::NotReady;
        };

        if features.search_generation() == Some(generation) {
            tracing::debug!(generation, "search already wired");
            return WireOutcome::AlreadyWired { generation };
        }

        features.search = Some((generation, SearchBox::new(features.catalog.clone())));
        tracing::debug!(generation, "search wired");
        WireOutcome::Attached { generation }
    }

    pub fn with_search<R>(&self, f: impl FnOnce(&mut SearchBox) -> R) -> Option<R> {
        let mut features = self.features.borrow_mut();
        let (_, search) = features.as_mut()?.search.as_mut()?;
        Some(f(search))
    }

    /// Feed one keystroke's worth of input to the search box.
    pub fn search_input(&self, raw: &str) -> Option<SearchView> {
        self.with_search(|sb| sb.on_input(raw).clone())
    }

    /// Total filter passes run by the current search box.
    pub fn filter_passes(&self) -> usize {
        self.with_search(|sb| sb.passes()).unwrap_or(0)
    }

    /// Queue a toast; `None` duration uses the configured default.
    pub fn show_toast(&self, message: &str, kind: ToastKind, duration: Option<Duration>) -> Option<ToastId> {
        let mut features = self.features.borrow_mut();
        let features = features.as_mut()?;
        let duration = duration.unwrap_or(features.toast_duration);
        Some(features.toasts.push(message, kind, duration))
    }

    pub fn with_toasts<R>(&self, f: impl FnOnce(&mut ToastStack) -> R) -> Option<R> {
        self.features.borrow_mut().as_mut().map(|features| f(&mut features.toasts))
    }

    /// The back-to-top button was clicked.
    pub fn back_to_top_clicked(&self) -> Option<ToastId> {
        self.show_toast(scroll::BACK_TO_TOP_MESSAGE, ToastKind::Info, Some(scroll::BACK_TO_TOP_TOAST))
    }

    /// Scroll offset changed; returns whether the back-to-top button shows.
    pub fn scrolled(&self, offset: f64) -> Option<bool> {
        self.features.borrow_mut().as_mut().map(|features| features.back_to_top.on_scroll(offset))
    }

    pub fn with_menu<R>(&self, f: impl FnOnce(&mut MobileMenu) -> R) -> Option<R> {
        self.menu.borrow_mut().as_mut().map(f)
    }

    pub fn with_footer<R>(&self, f: impl FnOnce(&mut FooterReveal) -> R) -> Option<R> {
        self.footer.borrow_mut().as_mut().map(f)
    }
}

impl RegionHooks for PageController {
    fn after_inject(&self, region: Region) {
        match region {
            Region::Header => {
                let generation = self.header_injected();
                tracing::debug!(generation, "header behaviour attached");
            }
            Region::Footer => self.footer_injected(),
        }
    }

    fn components_ready(&self) {
        self.ensure_features();
        self.wire_search();
    }
}
