//! Search box UI state.
//!
//! The box filters synchronously on every keystroke; there is no debounce.

use rsx_core::{Catalog, search};

/// What the search widgets should currently display.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct SearchView {
    pub input: String,
    pub results_html: String,
    pub results_visible: bool,
    pub clear_visible: bool,
    pub focused: bool,
}

#[derive(Debug, Clone)]
pub struct SearchBox {
    catalog: Catalog,
    view: SearchView,
    passes: usize,
}

impl SearchBox {
    pub fn new(catalog: Catalog) -> Self {
        Self { catalog, view: SearchView::default(), passes: 0 }
    }

    /// Number of filter passes run so far.
    pub fn passes(&self) -> usize {
        self.passes
    }

    /// Input changed to `raw`.
    pub fn on_input(&mut self, raw: &str) -> &SearchView {
        self.view.input = raw.to_string();
        self.view.focused = true;

        let outcome = search(&self.catalog, raw);
        if outcome.shows_panel() {
            self.passes += 1;
            self.view.results_html = outcome.render().into_string();
            self.view.results_visible = true;
            self.view.clear_visible = true;
        } else {
            self.hide_results();
        }
        &self.view
    }

    /// The clear control was clicked: empty the input and the results.
    pub fn on_clear(&mut self) -> &SearchView {
        self.view.input.clear();
        self.hide_results();
        &self.view
    }

    /// A key was pressed inside the input.
    pub fn on_key(&mut self, key: &str) -> &SearchView {
        if key == "Escape" {
            self.dismiss();
        }
        &self.view
    }

    /// A click landed somewhere in the document.
    pub fn on_document_click(&mut self, inside_container: bool) -> &SearchView {
        if !inside_container {
            self.dismiss();
        }
        &self.view
    }

    /// Clear the results and drop focus, keeping the typed text.
    pub fn dismiss(&mut self) {
        self.hide_results();
        self.view.focused = false;
    }

    fn hide_results(&mut self) {
        self.view.results_html.clear();
        self.view.results_visible = false;
        self.view.clear_visible = false;
    }
}
