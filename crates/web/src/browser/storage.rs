//! `window.localStorage` as a fragment cache backend.

use async_trait::async_trait;
use wasm_bindgen::JsValue;
use web_sys::Storage;

use rsx_core::{Error, KeyValueStore, MemoryStore};

pub struct LocalStorage {
    storage: Storage,
}

impl LocalStorage {
    pub fn open() -> Result<Self, Error> {
        let window = web_sys::window().ok_or_else(|| Error::Store("no window".to_string()))?;
        let storage = window
            .local_storage()
            .map_err(js_error)?
            .ok_or_else(|| Error::Store("localStorage unavailable".to_string()))?;
        Ok(Self { storage })
    }
}

fn js_error(value: JsValue) -> Error {
    Error::Store(value.as_string().unwrap_or_else(|| format!("{value:?}")))
}

#[async_trait(?Send)]
impl KeyValueStore for LocalStorage {
    async fn get(&self, key: &str) -> Result<Option<String>, Error> {
        self.storage.get_item(key).map_err(js_error)
    }

    async fn set(&self, key: &str, value: &str) -> Result<(), Error> {
        self.storage.set_item(key, value).map_err(js_error)
    }

    async fn remove(&self, key: &str) -> Result<(), Error> {
        self.storage.remove_item(key).map_err(js_error)
    }
}

/// `localStorage` when the browser allows it, otherwise a per-page map.
pub enum BrowserStore {
    Local(LocalStorage),
    Memory(MemoryStore),
}

impl BrowserStore {
    pub fn open() -> Self {
        match LocalStorage::open() {
            Ok(storage) => BrowserStore::Local(storage),
            Err(e) => {
                tracing::warn!(error = %e, "localStorage unavailable, caching in memory");
                BrowserStore::Memory(MemoryStore::new())
            }
        }
    }
}

#[async_trait(?Send)]
impl KeyValueStore for BrowserStore {
    async fn get(&self, key: &str) -> Result<Option<String>, Error> {
        match self {
            BrowserStore::Local(s) => s.get(key).await,
            BrowserStore::Memory(s) => s.get(key).await,
        }
    }

    async fn set(&self, key: &str, value: &str) -> Result<(), Error> {
        match self {
            BrowserStore::Local(s) => s.set(key, value).await,
            BrowserStore::Memory(s) => s.set(key, value).await,
        }
    }

    async fn remove(&self, key: &str) -> Result<(), Error> {
        match self {
            BrowserStore::Local(s) => s.remove(key).await,
            BrowserStore::Memory(s) => s.remove(key).await,
        }
    }
}
