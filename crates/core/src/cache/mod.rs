//! Version-tagged fragment cache over a local key-value store.
//!
//! Fragments are stored as opaque HTML strings under one key per region,
//! with a single shared version tag:
//!
//! - `rsx_header_html`
//! - `rsx_footer_html`
//! - `rsx_components_version`
//!
//! A cached fragment is only served when the stored version tag equals the
//! running version. Stale entries are overwritten on the next successful
//! fetch and only deleted by an explicit clear.

#[cfg(not(target_arch = "wasm32"))]
pub mod connection;
pub mod memory;
#[cfg(not(target_arch = "wasm32"))]
pub mod migrations;

use async_trait::async_trait;

pub use crate::Error;
use crate::region::Region;

#[cfg(not(target_arch = "wasm32"))]
pub use connection::SqliteStore;
pub use memory::MemoryStore;

/// Key holding the version tag shared by all cached fragments.
pub const VERSION_KEY: &str = "rsx_components_version";

/// A local string key-value store (browser `localStorage`, SQLite, memory).
///
/// Futures are not `Send`: every store is driven from the single page thread.
#[async_trait(?Send)]
pub trait KeyValueStore {
    async fn get(&self, key: &str) -> Result<Option<String>, Error>;

    async fn set(&self, key: &str, value: &str) -> Result<(), Error>;

    async fn remove(&self, key: &str) -> Result<(), Error>;
}

#[async_trait(?Send)]
impl<S: KeyValueStore + ?Sized> KeyValueStore for &S {
    async fn get(&self, key: &str) -> Result<Option<String>, Error> {
        (**self).get(key).await
    }

    async fn set(&self, key: &str, value: &str) -> Result<(), Error> {
        (**self).set(key, value).await
    }

    async fn remove(&self, key: &str) -> Result<(), Error> {
        (**self).remove(key).await
    }
}

/// A fragment as read back from the store.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct CachedFragment {
    pub key: &'static str,
    pub html: String,
    pub version: String,
}

/// Fragment cache bound to one version tag.
#[derive(Debug, Clone)]
pub struct FragmentCache<S> {
    store: S,
    version: String,
}

impl<S: KeyValueStore> FragmentCache<S> {
    pub fn new(store: S, version: impl Into<String>) -> Self {
        Self { store, version: version.into() }
    }

    pub fn version(&self) -> &str {
        &self.version
    }

    pub fn store(&self) -> &S {
        &self.store
    }

    /// Read a region's fragment if it was stored under the running version.
    ///
    /// Empty stored fragments count as absent. Store failures are logged and
    /// treated as a miss.
    pub async fn get(&self, region: Region) -> Option<CachedFragment> {
        match self.lookup(region).await {
            Ok(hit) => hit,
            Err(e) => {
                tracing::warn!(region = %region, error = %e, "fragment cache read failed");
                None
            }
        }
    }

    async fn lookup(&self, region: Region) -> Result<Option<CachedFragment>, Error> {
        let Some(html) = self.store.get(region.cache_key()).await? else {
            return Ok(None);
        };
        if html.is_empty() {
            return Ok(None);
        }

        let version = self.store.get(VERSION_KEY).await?;
        if version.as_deref() != Some(self.version.as_str()) {
            tracing::debug!(
                region = %region,
                cached = version.as_deref().unwrap_or("<none>"),
                running = %self.version,
                "cached fragment has a stale version tag"
            );
            return Ok(None);
        }

        Ok(Some(CachedFragment { key: region.cache_key(), html, version: self.version.clone() }))
    }

    /// Store a freshly fetched fragment together with the running version tag.
    pub async fn put(&self, region: Region, html: &str) -> Result<(), Error> {
        self.store.set(region.cache_key(), html).await?;
        self.store.set(VERSION_KEY, &self.version).await
    }

    /// Remove both fragments and the version tag.
    pub async fn clear(&self) -> Result<(), Error> {
        for region in Region::ALL {
            self.store.remove(region.cache_key()).await?;
        }
        self.store.remove(VERSION_KEY).await
    }
}
