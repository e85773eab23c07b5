//! Fragment URL resolution.

/// Error type for fragment URL resolution failures.
#[derive(Debug, Clone, thiserror::Error)]
pub enum UrlError {
    #[error("empty fragment path")]
    Empty,

    #[error("unsupported scheme: {0}")]
    UnsupportedScheme(String),

    #[error("invalid URL: {0}")]
    InvalidUrl(String),
}

/// Resolve a relative fragment path against the URL of the page requesting it.
///
/// Mirrors how a browser resolves a relative `fetch()`: `../` segments climb
/// from the page's directory and clamp at the origin root. The fragment
/// identifier of the page is never carried over.
pub fn resolve_fragment_url(page_url: &url::Url, path: &str) -> Result<url::Url, UrlError> {
    let trimmed = path.trim();
    if trimmed.is_empty() {
        return Err(UrlError::Empty);
    }

    let mut resolved = page_url.join(trimmed).map_err(|e| UrlError::InvalidUrl(e.to_string()))?;

    match resolved.scheme() {
        "http" | "https" => {}
        scheme => return Err(UrlError::UnsupportedScheme(scheme.to_string())),
    }

    resolved.set_fragment(None);
    Ok(resolved)
}

/// Build the page URL for a site path, e.g. `http://localhost:8000/` + `/rsx-store/`.
pub fn page_url(site_url: &str, page_path: &str) -> Result<url::Url, UrlError> {
    let site = url::Url::parse(site_url.trim()).map_err(|e| UrlError::InvalidUrl(e.to_string()))?;
    site.join(page_path.trim()).map_err(|e| UrlError::InvalidUrl(e.to_string()))
}

#[cfg(test)]
mod tests {
    use super::*;

    fn page(s: &str) -> url::Url {
        url::Url::parse(s).unwrap()
    }

    #[test]
    fn test_resolve_root_page() {
        let url = resolve_fragment_url(&page("https://rsx.example/index.html"), "./components/header.html").unwrap();
        assert_eq!(url.as_str(), "https://rsx.example/components/header.html");
    }

    #[test]
    fn test_resolve_nested_page() {
        let url =
            resolve_fragment_url(&page("https://rsx.example/rsx-store/index.html"), "../../components/footer.html")
                .unwrap();
        assert_eq!(url.as_str(), "https://rsx.example/components/footer.html");
    }

    #[test]
    fn test_resolve_deeper_page() {
        let url =
            resolve_fragment_url(&page("https://rsx.example/site/rsx-bots/planos/"), "../../components/header.html")
                .unwrap();
        assert_eq!(url.as_str(), "https://rsx.example/site/components/header.html");
    }

    #[test]
    fn test_resolve_drops_page_fragment() {
        let url = resolve_fragment_url(&page("https://rsx.example/#top"), "./components/header.html").unwrap();
        assert_eq!(url.fragment(), None);
    }

    #[test]
    fn test_resolve_empty_path() {
        let result = resolve_fragment_url(&page("https://rsx.example/"), "  ");
        assert!(matches!(result, Err(UrlError::Empty)));
    }

    #[test]
    fn test_resolve_rejects_other_schemes() {
        let result = resolve_fragment_url(&page("https://rsx.example/"), "file:///etc/passwd");
        assert!(matches!(result, Err(UrlError::UnsupportedScheme(_))));
    }

    #[test]
    fn test_page_url() {
        let url = page_url("http://localhost:8000/", "/rsx-store/").unwrap();
        assert_eq!(url.as_str(), "http://localhost:8000/rsx-store/");
        assert!(matches!(page_url("nope", "/"), Err(UrlError::InvalidUrl(_))));
    }
}
