//! Page enhancements for the RSX site.
//!
//! Every feature is a plain state model, tested natively and owned by a single
//! [`PageController`]. On `wasm32` the `browser` module binds those models to
//! the live document, loads the shared header/footer and exports the page-level
//! functions (`clearComponentsCache`, `reloadComponents`, `showToast`).

pub mod controller;
pub mod cosmetic;
pub mod menu;
pub mod reveal;
pub mod scroll;
pub mod search_box;
pub mod toast;

#[cfg(target_arch = "wasm32")]
mod browser;

pub use controller::{EnhancedFeatures, PageController, WireOutcome};
pub use search_box::{SearchBox, SearchView};
pub use toast::{Toast, ToastId, ToastKind, ToastStack};
