//! Fragment fetching over HTTP.
//!
//! Fragment paths are relative (`./components/header.html`,
//! `../../components/footer.html`) and are resolved against the page URL the
//! way a browser resolves a relative `fetch()`.
//!
//! ### Failure classes
//! - Transport error before a response: `Error::Network`
//! - Non-2xx status: `Error::HttpStatus`
//!
//! Both are reported to the loader, which turns them into "fragment unavailable".

pub mod url;

use std::time::Duration;

use async_trait::async_trait;
use reqwest::{Client, Url};

pub use self::url::{UrlError, resolve_fragment_url};

use rsx_core::Error;

/// Anything that can return the HTML of a fragment path.
#[async_trait(?Send)]
pub trait FragmentSource {
    /// Fetch the fragment at `path`, relative to the current page.
    async fn fetch(&self, path: &str) -> Result<String, Error>;
}

#[async_trait(?Send)]
impl<F: FragmentSource + ?Sized> FragmentSource for &F {
    async fn fetch(&self, path: &str) -> Result<String, Error> {
        (**self).fetch(path).await
    }
}

/// Configuration for the HTTP fragment source.
#[derive(Debug, Clone)]
pub struct FetchConfig {
    /// User agent string (ignored in the browser)
    pub user_agent: String,

    /// Request timeout (ignored in the browser)
    pub timeout: Duration,
}

impl Default for FetchConfig {
    fn default() -> Self {
        Self { user_agent: concat!("rsx-site/", env!("CARGO_PKG_VERSION")).to_string(), timeout: Duration::from_secs(10) }
    }
}

/// HTTP fragment source anchored at a page URL.
#[derive(Debug, Clone)]
pub struct HttpFragmentSource {
    http: Client,
    page_url: Url,
}

impl HttpFragmentSource {
    /// Create a source that resolves fragment paths against `page_url`.
    pub fn new(page_url: Url, config: &FetchConfig) -> Result<Self, Error> {
        let http = build_client(config)?;
        Ok(Self { http, page_url })
    }

    pub fn page_url(&self) -> &Url {
        &self.page_url
    }
}

#[cfg(not(target_arch = "wasm32"))]
fn build_client(config: &FetchConfig) -> Result<Client, Error> {
    Client::builder()
        .user_agent(&config.user_agent)
        .timeout(config.timeout)
        .use_rustls_tls()
        .gzip(true)
        .brotli(true)
        .deflate(true)
        .build()
        .map_err(|e| Error::Network(format!("failed to build HTTP client: {e}")))
}

#[cfg(target_arch = "wasm32")]
fn build_client(_config: &FetchConfig) -> Result<Client, Error> {
    Ok(Client::new())
}

#[async_trait(?Send)]
impl FragmentSource for HttpFragmentSource {
    async fn fetch(&self, path: &str) -> Result<String, Error> {
        let url = resolve_fragment_url(&self.page_url, path).map_err(|e| Error::InvalidUrl(e.to_string()))?;

        let response = self
            .http
            .get(url.as_str())
            .header("Accept", "text/html,*/*;q=0.8")
            .send()
            .await
            .map_err(|e| Error::Network(e.to_string()))?;

        let status = response.status();
        if !status.is_success() {
            return Err(Error::HttpStatus { status: status.as_u16(), url: url.to_string() });
        }

        let body = response
            .text()
            .await
            .map_err(|e| Error::Network(format!("failed to read response: {e}")))?;

        tracing::debug!(url = %url, bytes = body.len(), "fetched fragment");

        Ok(body)
    }
}
