//! Core types and shared functionality for the RSX site layer.
//!
//! This crate provides:
//! - The searchable catalog and the search filter
//! - Base-path resolution for pages at different depths
//! - A version-tagged fragment cache over pluggable key-value stores
//! - Unified error types
//! - Configuration structures

pub mod base_path;
pub mod cache;
pub mod catalog;
pub mod config;
pub mod error;
pub mod region;
pub mod search;

pub use base_path::resolve_base_path;
pub use cache::{CachedFragment, FragmentCache, KeyValueStore, MemoryStore};
#[cfg(not(target_arch = "wasm32"))]
pub use cache::SqliteStore;
pub use catalog::{Catalog, CatalogEntry};
pub use config::{ConfigError, SiteConfig};
pub use error::Error;
pub use region::Region;
pub use search::{SearchOutcome, SearchQuery, search};
