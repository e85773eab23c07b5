//! Component loader: fetch, cache and inject the shared header and footer.
//!
//! ### Region loading
//! - Placeholder absent: nothing happens (no cache read, no fetch, no hook).
//! - Cache hit under the running version: inject cached HTML, run the hook.
//! - Otherwise fetch; a non-empty body is injected, cached with the version
//!   tag, and the hook runs. An empty body (including any fetch failure)
//!   leaves the placeholder untouched and writes nothing.
//!
//! ### Whole page
//! Both regions read the cache first, then fetch concurrently; neither fetch
//! waits on the other. Once both settle and the ready delay elapses,
//! `RegionHooks::components_ready` runs.

use std::time::Duration;

use futures_util::future::join;

use rsx_core::{CachedFragment, FragmentCache, KeyValueStore, Region, SiteConfig, resolve_base_path};

use crate::delay;
use crate::fetch::FragmentSource;
use crate::page::{Page, RegionHooks};

/// How a region load ended.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum RegionOutcome {
    /// Served from the local cache.
    Cached,
    /// Fetched from the network, injected and cached.
    Fetched,
    /// The fragment could not be retrieved; the placeholder was left alone.
    Unavailable,
    /// The page has no placeholder for this region.
    NoPlaceholder,
}

impl RegionOutcome {
    pub fn injected(self) -> bool {
        matches!(self, RegionOutcome::Cached | RegionOutcome::Fetched)
    }
}

/// Outcome of loading both regions.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct LoadReport {
    pub header: RegionOutcome,
    pub footer: RegionOutcome,
}

/// Cache state of a region, read before any fetch.
enum Lookup {
    Skip,
    Hit(CachedFragment),
    Miss,
}

/// Loads shared fragments into a page through a version-tagged cache.
pub struct ComponentLoader<F, S> {
    source: F,
    cache: FragmentCache<S>,
    base_path: &'static str,
    components_dir: String,
    ready_delay: Duration,
}

impl<F: FragmentSource, S: KeyValueStore> ComponentLoader<F, S> {
    /// Create a loader for the page at `page_path` (e.g. `/rsx-store/index.html`).
    pub fn new(config: &SiteConfig, page_path: &str, source: F, store: S) -> Self {
        Self {
            source,
            cache: FragmentCache::new(store, config.components_version.clone()),
            base_path: resolve_base_path(page_path, &config.nested_sections),
            components_dir: config.components_dir.trim_matches('/').to_string(),
            ready_delay: config.ready_delay(),
        }
    }

    /// Relative prefix from the page to the site root.
    pub fn base_path(&self) -> &str {
        self.base_path
    }

    pub fn version(&self) -> &str {
        self.cache.version()
    }

    pub fn cache(&self) -> &FragmentCache<S> {
        &self.cache
    }

    /// `{base_path}{components_dir}/{name}.html`
    pub fn fragment_path(&self, name: &str) -> String {
        format!("{}{}/{}.html", self.base_path, self.components_dir, name)
    }

    /// Fetch a fragment by name. Any failure is logged and yields an empty string.
    pub async fn fetch_fragment(&self, name: &str) -> String {
        let path = self.fragment_path(name);
        match self.source.fetch(&path).await {
            Ok(html) => html,
            Err(e) => {
                tracing::error!(
                    fragment = name,
                    path = %path,
                    error = %e,
                    fetch_failure = e.is_fetch_failure(),
                    "failed to load component"
                );
                String::new()
            }
        }
    }

    /// Check the placeholder and the cache for one region without touching the network.
    async fn lookup<P>(&self, region: Region, page: &P) -> Lookup
    where
        P: Page + ?Sized,
    {
        if !page.has_placeholder(region.placeholder_id()) {
            tracing::debug!(region = %region, placeholder = region.placeholder_id(), "no placeholder on page");
            return Lookup::Skip;
        }
        match self.cache.get(region).await {
            Some(cached) => Lookup::Hit(cached),
            None => Lookup::Miss,
        }
    }

    /// Inject a looked-up region, fetching and caching it on a miss.
    async fn settle<P, H>(&self, region: Region, lookup: Lookup, page: &P, hooks: &H) -> RegionOutcome
    where
        P: Page + ?Sized,
        H: RegionHooks + ?Sized,
    {
        let placeholder = region.placeholder_id();
        match lookup {
            Lookup::Skip => return RegionOutcome::NoPlaceholder,
            Lookup::Hit(cached) => {
                page.inject(placeholder, &cached.html);
                tracing::debug!(region = %region, version = %cached.version, "injected cached fragment");
                hooks.after_inject(region);
                return RegionOutcome::Cached;
            }
            Lookup::Miss => {}
        }

        let html = self.fetch_fragment(region.fragment_name()).await;
        if html.is_empty() {
            return RegionOutcome::Unavailable;
        }

        page.inject(placeholder, &html);
        if let Err(e) = self.cache.put(region, &html).await {
            tracing::warn!(region = %region, error = %e, "failed to cache fragment");
        }
        hooks.after_inject(region);

        RegionOutcome::Fetched
    }

    /// Fill one region's placeholder from cache or network.
    pub async fn load_region<P, H>(&self, region: Region, page: &P, hooks: &H) -> RegionOutcome
    where
        P: Page + ?Sized,
        H: RegionHooks + ?Sized,
    {
        let lookup = self.lookup(region, page).await;
        self.settle(region, lookup, page, hooks).await
    }

    /// Load header and footer concurrently, then signal readiness after the ready delay.
    ///
    /// Both cache lookups finish before either region fetches, so a write of
    /// the new version tag by one region never validates the other's stale entry.
    pub async fn load_all<P, H>(&self, page: &P, hooks: &H) -> LoadReport
    where
        P: Page + ?Sized,
        H: RegionHooks + ?Sized,
    {
        let header = self.lookup(Region::Header, page).await;
        let footer = self.lookup(Region::Footer, page).await;
        let (header, footer) = join(
            self.settle(Region::Header, header, page, hooks),
            self.settle(Region::Footer, footer, page, hooks),
        )
        .await;

        delay::sleep(self.ready_delay).await;
        hooks.components_ready();

        LoadReport { header, footer }
    }

    /// Drop cached fragments and the version tag.
    pub async fn clear_cache(&self) {
        match self.cache.clear().await {
            Ok(()) => tracing::info!("component cache cleared"),
            Err(e) => tracing::warn!(error = %e, "failed to clear component cache"),
        }
    }

    /// Clear the cache and load everything again from the network.
    pub async fn force_reload<P, H>(&self, page: &P, hooks: &H) -> LoadReport
    where
        P: Page + ?Sized,
        H: RegionHooks + ?Sized,
    {
        self.clear_cache().await;
        self.load_all(page, hooks).await
    }
}

#[cfg(test)]
mod tests {
    use std::cell::{Cell, RefCell};
    use std::collections::HashMap;
    use std::io;
    use std::sync::{Arc, Mutex};

    use async_trait::async_trait;
    use rsx_core::{Error, MemoryStore};

    use super::*;
    use crate::page::StaticPage;

    const PAGE: &str = r#"<body><div id="header-placeholder"></div><main></main><div id="footer-placeholder"></div></body>"#;

    /// Scripted source: per-path responses, counting every request.
    #[derive(Default)]
    struct ScriptedSource {
        responses: HashMap<String, Result<String, u16>>,
        calls: RefCell<Vec<String>>,
    }

    impl ScriptedSource {
        fn with(mut self, path: &str, response: Result<&str, u16>) -> Self {
            self.responses.insert(path.to_string(), response.map(str::to_string));
            self
        }

        fn calls(&self) -> usize {
            self.calls.borrow().len()
        }
    }

    #[async_trait(?Send)]
    impl FragmentSource for ScriptedSource {
        async fn fetch(&self, path: &str) -> Result<String, Error> {
            self.calls.borrow_mut().push(path.to_string());
            match self.responses.get(path) {
                Some(Ok(html)) => Ok(html.clone()),
                Some(Err(status)) => Err(Error::HttpStatus { status: *status, url: path.to_string() }),
                None => Err(Error::Network("connection refused".into())),
            }
        }
    }

    #[derive(Default)]
    struct RecordingHooks {
        injected: RefCell<Vec<Region>>,
        ready: Cell<usize>,
    }

    impl RegionHooks for RecordingHooks {
        fn after_inject(&self, region: Region) {
            self.injected.borrow_mut().push(region);
        }

        fn components_ready(&self) {
            self.ready.set(self.ready.get() + 1);
        }
    }

    /// Log sink shared with a scoped subscriber.
    #[derive(Clone, Default)]
    struct LogBuffer(Arc<Mutex<Vec<u8>>>);

    impl LogBuffer {
        fn contents(&self) -> String {
            String::from_utf8_lossy(&self.0.lock().unwrap()).into_owned()
        }
    }

    impl io::Write for LogBuffer {
        fn write(&mut self, buf: &[u8]) -> io::Result<usize> {
            self.0.lock().unwrap().extend_from_slice(buf);
            Ok(buf.len())
        }

        fn flush(&mut self) -> io::Result<()> {
            Ok(())
        }
    }

    fn config() -> SiteConfig {
        SiteConfig { ready_delay_ms: 0, ..Default::default() }
    }

    fn healthy_source() -> ScriptedSource {
        ScriptedSource::default()
            .with("./components/header.html", Ok("<header>H</header>"))
            .with("./components/footer.html", Ok("<footer id=\"footer\">F</footer>"))
    }

    #[test]
    fn test_fragment_paths() {
        let store = MemoryStore::new();
        let root = ComponentLoader::new(&config(), "/index.html", ScriptedSource::default(), &store);
        assert_eq!(root.base_path(), "./");
        assert_eq!(root.fragment_path("header"), "./components/header.html");

        let nested = ComponentLoader::new(&config(), "/rsx-bots/", ScriptedSource::default(), &store);
        assert_eq!(nested.base_path(), "../../");
        assert_eq!(nested.fragment_path("footer"), "../../components/footer.html");
    }

    #[tokio::test]
    async fn test_fetch_fragment_failure_is_empty() {
        let store = MemoryStore::new();
        let source = ScriptedSource::default().with("./components/header.html", Err(404));
        let loader = ComponentLoader::new(&config(), "/", source, &store);
        assert_eq!(loader.fetch_fragment("header").await, "");
        assert_eq!(loader.fetch_fragment("footer").await, "");
    }

    #[tokio::test]
    async fn test_load_all_fetches_and_caches() {
        let store = MemoryStore::new();
        let source = healthy_source();
        let loader = ComponentLoader::new(&config(), "/", &source, &store);
        let page = StaticPage::new(PAGE);
        let hooks = RecordingHooks::default();

        let report = loader.load_all(&page, &hooks).await;

        assert_eq!(report, LoadReport { header: RegionOutcome::Fetched, footer: RegionOutcome::Fetched });
        assert_eq!(page.inner_html("header-placeholder").unwrap(), "<header>H</header>");
        assert_eq!(page.inner_html("footer-placeholder").unwrap(), "<footer id=\"footer\">F</footer>");
        assert_eq!(store.get("rsx_header_html").await.unwrap().as_deref(), Some("<header>H</header>"));
        assert_eq!(store.get("rsx_components_version").await.unwrap().as_deref(), Some("1.1.0"));
        assert_eq!(*hooks.injected.borrow(), vec![Region::Header, Region::Footer]);
        assert_eq!(hooks.ready.get(), 1);
        assert_eq!(source.calls(), 2);
    }

    #[tokio::test]
    async fn test_second_load_served_from_cache() {
        let store = MemoryStore::new();
        let source = healthy_source();
        let loader = ComponentLoader::new(&config(), "/", &source, &store);

        loader.load_all(&StaticPage::new(PAGE), &()).await;
        assert_eq!(source.calls(), 2);

        let page = StaticPage::new(PAGE);
        let report = loader.load_all(&page, &()).await;
        assert_eq!(report, LoadReport { header: RegionOutcome::Cached, footer: RegionOutcome::Cached });
        assert_eq!(source.calls(), 2);
        assert_eq!(page.inner_html("header-placeholder").unwrap(), "<header>H</header>");
    }

    #[tokio::test]
    async fn test_version_bump_forces_fetch() {
        let store = MemoryStore::new();
        let source = healthy_source();

        ComponentLoader::new(&config(), "/", &source, &store).load_all(&StaticPage::new(PAGE), &()).await;

        let bumped = SiteConfig { components_version: "1.2.0".into(), ..config() };
        let loader = ComponentLoader::new(&bumped, "/", &source, &store);
        let report = loader.load_all(&StaticPage::new(PAGE), &()).await;

        assert_eq!(report.header, RegionOutcome::Fetched);
        assert_eq!(source.calls(), 4);
        assert_eq!(store.get("rsx_components_version").await.unwrap().as_deref(), Some("1.2.0"));
    }

    #[tokio::test]
    async fn test_header_500_leaves_placeholder_empty_footer_proceeds() {
        let logs = LogBuffer::default();
        let writer = logs.clone();
        let subscriber = tracing_subscriber::fmt()
            .with_writer(move || writer.clone())
            .with_ansi(false)
            .json()
            .finish();
        let _guard = tracing::subscriber::set_default(subscriber);

        let store = MemoryStore::new();
        let source = ScriptedSource::default()
            .with("./components/header.html", Err(500))
            .with("./components/footer.html", Ok("<footer>F</footer>"));
        let loader = ComponentLoader::new(&config(), "/", &source, &store);
        let page = StaticPage::new(PAGE);
        let hooks = RecordingHooks::default();

        let report = loader.load_all(&page, &hooks).await;

        assert_eq!(report.header, RegionOutcome::Unavailable);
        assert_eq!(report.footer, RegionOutcome::Fetched);
        assert_eq!(page.inner_html("header-placeholder").unwrap(), "");
        assert_eq!(page.inner_html("footer-placeholder").unwrap(), "<footer>F</footer>");
        assert!(store.get("rsx_header_html").await.unwrap().is_none());
        assert_eq!(*hooks.injected.borrow(), vec![Region::Footer]);
        assert_eq!(hooks.ready.get(), 1);

        let logs = logs.contents();
        let failure = logs.lines().find(|line| line.contains("failed to load component")).unwrap();
        assert!(failure.contains("\"ERROR\""));
        assert!(failure.contains("\"fragment\":\"header\""));
        assert!(failure.contains("HTTP_ERROR: status 500"));
        assert!(failure.contains("\"fetch_failure\":true"));
        assert!(!logs.contains("\"fragment\":\"footer\""));
    }

    #[tokio::test]
    async fn test_stale_entries_are_not_revalidated_by_a_concurrent_fetch() {
        let store = MemoryStore::new();
        store.set("rsx_header_html", "<header>OLD</header>").await.unwrap();
        store.set("rsx_footer_html", "<footer>OLD</footer>").await.unwrap();
        store.set("rsx_components_version", "1.0.0").await.unwrap();

        let source = healthy_source();
        let loader = ComponentLoader::new(&config(), "/", &source, &store);
        let page = StaticPage::new(PAGE);

        let report = loader.load_all(&page, &()).await;

        assert_eq!(report, LoadReport { header: RegionOutcome::Fetched, footer: RegionOutcome::Fetched });
        assert_eq!(source.calls(), 2);
        assert_eq!(page.inner_html("footer-placeholder").unwrap(), "<footer id=\"footer\">F</footer>");
        assert_eq!(store.get("rsx_footer_html").await.unwrap().as_deref(), Some("<footer id=\"footer\">F</footer>"));
        assert_eq!(store.get("rsx_components_version").await.unwrap().as_deref(), Some("1.1.0"));
    }

    #[tokio::test]
    async fn test_empty_body_is_not_injected_or_cached() {
        let store = MemoryStore::new();
        let source = ScriptedSource::default().with("./components/header.html", Ok(""));
        let loader = ComponentLoader::new(&config(), "/", &source, &store);
        let page = StaticPage::new(PAGE);

        let outcome = loader.load_region(Region::Header, &page, &()).await;

        assert_eq!(outcome, RegionOutcome::Unavailable);
        assert!(store.is_empty());
    }

    #[tokio::test]
    async fn test_missing_placeholder_skips_fetch() {
        let store = MemoryStore::new();
        let source = healthy_source();
        let loader = ComponentLoader::new(&config(), "/", &source, &store);
        let page = StaticPage::new(r#"<div id="header-placeholder"></div>"#);

        let report = loader.load_all(&page, &()).await;

        assert_eq!(report.footer, RegionOutcome::NoPlaceholder);
        assert_eq!(*source.calls.borrow(), vec!["./components/header.html".to_string()]);
    }

    #[tokio::test]
    async fn test_nested_page_uses_nested_paths() {
        let store = MemoryStore::new();
        let source = ScriptedSource::default()
            .with("../../components/header.html", Ok("<header>nested</header>"))
            .with("../../components/footer.html", Ok("<footer>nested</footer>"));
        let loader = ComponentLoader::new(&config(), "/rsx-system/index.html", &source, &store);
        let page = StaticPage::new(PAGE);

        let report = loader.load_all(&page, &()).await;
        assert!(report.header.injected() && report.footer.injected());
    }

    #[tokio::test]
    async fn test_clear_cache_and_force_reload() {
        let store = MemoryStore::new();
        let source = healthy_source();
        let loader = ComponentLoader::new(&config(), "/", &source, &store);

        loader.load_all(&StaticPage::new(PAGE), &()).await;
        loader.clear_cache().await;
        assert!(store.is_empty());

        loader.load_all(&StaticPage::new(PAGE), &()).await;
        assert_eq!(source.calls(), 4);

        let hooks = RecordingHooks::default();
        let report = loader.force_reload(&StaticPage::new(PAGE), &hooks).await;
        assert_eq!(report.header, RegionOutcome::Fetched);
        assert_eq!(source.calls(), 6);
        assert_eq!(hooks.ready.get(), 1);
    }
}
