//! Command implementations, kept free of argument parsing and printing.

use anyhow::Result;

use rsx_client::fetch::url::page_url;
use rsx_client::{ComponentLoader, FetchConfig, HttpFragmentSource, LoadReport, RegionHooks, StaticPage};
use rsx_core::{Catalog, FragmentCache, Region, SearchOutcome, SiteConfig, SqliteStore, resolve_base_path, search};

/// A page with its regions filled in.
pub struct Assembled {
    pub html: String,
    pub report: LoadReport,
}

struct ReadyLog;

impl RegionHooks for ReadyLog {
    fn after_inject(&self, region: Region) {
        tracing::debug!(region = %region, "fragment injected");
    }

    fn components_ready(&self) {
        tracing::info!("components ready");
    }
}

/// Run the component loader for a page served under `path`.
pub async fn assemble(config: &SiteConfig, page_html: &str, path: &str, reload: bool) -> Result<Assembled> {
    let url = page_url(&config.site_url, path)?;
    let fetch = FetchConfig { user_agent: config.user_agent.clone(), timeout: config.timeout() };
    let source = HttpFragmentSource::new(url, &fetch)?;
    let store = SqliteStore::open(&config.db_path).await?;

    let loader = ComponentLoader::new(config, path, source, store);
    tracing::debug!(base_path = loader.base_path(), version = loader.version(), "assembling page");

    let page = StaticPage::new(page_html);
    let report = if reload {
        loader.force_reload(&page, &ReadyLog).await
    } else {
        loader.load_all(&page, &ReadyLog).await
    };
    tracing::info!(header = ?report.header, footer = ?report.footer, "page assembled");

    Ok(Assembled { html: page.into_html(), report })
}

/// One output line per matching record, or the no-results message.
pub fn search_lines(catalog: &Catalog, query: &str) -> Vec<String> {
    match search(catalog, query) {
        SearchOutcome::Idle => Vec::new(),
        SearchOutcome::NoResults(query) => vec![format!("Nenhum resultado encontrado para \"{}\"", query.as_str())],
        SearchOutcome::Matches(_, entries) => entries.iter().map(|e| format!("{}\t{}", e.name, e.url)).collect(),
    }
}

pub fn base_path(config: &SiteConfig, path: &str) -> &'static str {
    resolve_base_path(path, &config.nested_sections)
}

pub async fn clear_cache(config: &SiteConfig) -> Result<()> {
    let store = SqliteStore::open(&config.db_path).await?;
    FragmentCache::new(store, config.components_version.clone()).clear().await?;
    tracing::info!(db = %config.db_path.display(), "component cache cleared");
    Ok(())
}

#[cfg(test)]
mod tests {
    use std::path::PathBuf;
    use std::sync::Arc;
    use std::sync::atomic::{AtomicUsize, Ordering};

    use rsx_client::RegionOutcome;
    use tokio::io::{AsyncReadExt, AsyncWriteExt};
    use tokio::net::TcpListener;

    use super::*;

    const PAGE: &str = r#"<body><div id="header-placeholder"></div><main>conteúdo</main><div id="footer-placeholder"></div></body>"#;

    /// Serve `/components/{header,footer}.html` until the test ends, counting requests.
    async fn serve_components() -> (String, Arc<AtomicUsize>) {
        let listener = TcpListener::bind("127.0.0.1:0").await.unwrap();
        let addr = listener.local_addr().unwrap();
        let hits = Arc::new(AtomicUsize::new(0));
        let counter = Arc::clone(&hits);

        tokio::spawn(async move {
            loop {
                let Ok((mut socket, _)) = listener.accept().await else { return };
                counter.fetch_add(1, Ordering::SeqCst);
                let mut request = Vec::new();
                let mut buf = [0u8; 1024];
                while !request.windows(4).any(|w| w == b"\r\n\r\n") {
                    let n = socket.read(&mut buf).await.unwrap_or(0);
                    if n == 0 {
                        break;
                    }
                    request.extend_from_slice(&buf[..n]);
                }
                let request = String::from_utf8_lossy(&request);
                let (status, body) = if request.starts_with("GET /components/header.html") {
                    ("200 OK", "<nav>RSX</nav>")
                } else if request.starts_with("GET /components/footer.html") {
                    ("200 OK", "<footer id=\"footer\">RSX</footer>")
                } else {
                    ("404 Not Found", "")
                };
                let response = format!(
                    "HTTP/1.1 {status}\r\nContent-Type: text/html\r\nContent-Length: {}\r\nConnection: close\r\n\r\n{body}",
                    body.len()
                );
                let _ = socket.write_all(response.as_bytes()).await;
                let _ = socket.shutdown().await;
            }
        });

        (format!("http://{addr}/"), hits)
    }

    fn temp_db(name: &str) -> PathBuf {
        let dir = std::env::temp_dir().join(format!("rsx-site-{}-{name}", std::process::id()));
        std::fs::create_dir_all(&dir).unwrap();
        dir.join("cache.sqlite")
    }

    fn config(site_url: String, db_path: PathBuf) -> SiteConfig {
        SiteConfig { site_url, db_path, ready_delay_ms: 0, ..SiteConfig::default() }
    }

    #[test]
    fn test_search_lines() {
        let catalog = Catalog::default();
        assert_eq!(search_lines(&catalog, "STEAM"), vec!["RSX System\t/rsx-system".to_string()]);
        assert_eq!(search_lines(&catalog, "  xyz123 "), vec!["Nenhum resultado encontrado para \"xyz123\"".to_string()]);
        assert!(search_lines(&catalog, "   ").is_empty());
    }

    #[test]
    fn test_base_path() {
        let config = SiteConfig::default();
        assert_eq!(base_path(&config, "/rsx-store/index.html"), "../../");
        assert_eq!(base_path(&config, "/index.html"), "./");
    }

    #[tokio::test]
    async fn test_assemble_fetches_then_uses_cache() {
        let (site_url, hits) = serve_components().await;
        let db = temp_db("assemble");
        let config = config(site_url, db.clone());

        let first = assemble(&config, PAGE, "/index.html", false).await.unwrap();
        assert_eq!(first.report.header, RegionOutcome::Fetched);
        assert_eq!(first.report.footer, RegionOutcome::Fetched);
        assert!(first.html.contains(r#"<div id="header-placeholder"><nav>RSX</nav></div>"#));
        assert!(first.html.contains("<main>conteúdo</main>"));
        assert_eq!(hits.load(Ordering::SeqCst), 2);

        let second = assemble(&config, PAGE, "/index.html", false).await.unwrap();
        assert_eq!(second.report.header, RegionOutcome::Cached);
        assert_eq!(second.html, first.html);
        assert_eq!(hits.load(Ordering::SeqCst), 2);

        let reloaded = assemble(&config, PAGE, "/index.html", true).await.unwrap();
        assert_eq!(reloaded.report.footer, RegionOutcome::Fetched);
        assert_eq!(hits.load(Ordering::SeqCst), 4);

        std::fs::remove_dir_all(db.parent().unwrap()).ok();
    }

    #[tokio::test]
    async fn test_clear_cache_forces_refetch() {
        let (site_url, hits) = serve_components().await;
        let db = temp_db("clear");
        let config = config(site_url, db.clone());

        assemble(&config, PAGE, "/index.html", false).await.unwrap();
        clear_cache(&config).await.unwrap();
        let after = assemble(&config, PAGE, "/index.html", false).await.unwrap();

        assert_eq!(after.report.header, RegionOutcome::Fetched);
        assert_eq!(hits.load(Ordering::SeqCst), 4);

        std::fs::remove_dir_all(db.parent().unwrap()).ok();
    }

    #[tokio::test]
    async fn test_assemble_nested_page_with_missing_fragments() {
        let (site_url, _) = serve_components().await;
        let db = temp_db("nested");
        let config = SiteConfig { components_dir: "missing".into(), ..config(site_url, db.clone()) };

        let assembled = assemble(&config, PAGE, "/rsx-bots/index.html", false).await.unwrap();
        assert_eq!(assembled.report.header, RegionOutcome::Unavailable);
        assert_eq!(assembled.html, PAGE);

        std::fs::remove_dir_all(db.parent().unwrap()).ok();
    }
}
