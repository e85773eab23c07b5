//! Relative prefix from a page to the site root.

/// Prefix for pages nested inside a known section directory.
pub const NESTED_PREFIX: &str = "../../";

/// Prefix for pages at the site root.
pub const ROOT_PREFIX: &str = "./";

/// Section directories whose pages live two levels below the site root.
pub const DEFAULT_SECTIONS: &[&str] = &["rsx-store", "rsx-bots", "rsx-system", "contato", "termos", "politica"];

/// Map a page path to the relative prefix where `components/` lives.
///
/// A path is nested when it contains `/{section}/` for any reserved section.
pub fn resolve_base_path<S: AsRef<str>>(path: &str, sections: &[S]) -> &'static str {
    let nested = sections.iter().any(|section| {
        let section = section.as_ref().trim_matches('/');
        !section.is_empty() && path.contains(&format!("/{section}/"))
    });

    if nested { NESTED_PREFIX } else { ROOT_PREFIX }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_nested_sections() {
        for path in [
            "/rsx-store/",
            "/rsx-bots/index.html",
            "/site/rsx-system/pagina/",
            "/contato/",
            "/termos/index.html",
            "/politica/",
        ] {
            assert_eq!(resolve_base_path(path, DEFAULT_SECTIONS), "../../", "path {path}");
        }
    }

    #[test]
    fn test_root_pages() {
        for path in ["/", "/index.html", "/rsx-store", "/sobre/", "/rsx-storefront/"] {
            assert_eq!(resolve_base_path(path, DEFAULT_SECTIONS), "./", "path {path}");
        }
    }

    #[test]
    fn test_custom_sections() {
        let sections = vec!["docs".to_string(), "/blog/".to_string()];
        assert_eq!(resolve_base_path("/docs/intro.html", &sections), "../../");
        assert_eq!(resolve_base_path("/blog/2024/", &sections), "../../");
        assert_eq!(resolve_base_path("/rsx-store/", &sections), "./");
    }

    #[test]
    fn test_blank_section_ignored() {
        let sections = ["", "/"];
        assert_eq!(resolve_base_path("/anything/", &sections), "./");
    }
}
