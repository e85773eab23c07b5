//! Client code for the RSX site layer.
//!
//! This crate provides the fragment fetch pipeline, the page placeholder
//! contract and the component loader shared by the browser build and the CLI.

pub mod delay;
pub mod fetch;
pub mod loader;
pub mod page;

pub use fetch::{FetchConfig, FragmentSource, HttpFragmentSource};
pub use loader::{ComponentLoader, LoadReport, RegionOutcome};
pub use page::{Page, RegionHooks, StaticPage};
