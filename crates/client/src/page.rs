//! The placeholder contract between the loader and a page.
//!
//! A page exposes elements by id; the loader replaces the contents of a
//! placeholder with fragment HTML. Methods take `&self`: both regions load
//! concurrently on one thread and inject into the same page.

use std::cell::RefCell;
use std::ops::Range;
use std::sync::LazyLock;

use regex::Regex;

use rsx_core::Region;

/// A document with injectable placeholder elements.
pub trait Page {
    /// Whether an element with this id exists.
    fn has_placeholder(&self, id: &str) -> bool;

    /// Replace the element's contents with `html`. Returns false when absent.
    fn inject(&self, id: &str, html: &str) -> bool;
}

impl<P: Page + ?Sized> Page for &P {
    fn has_placeholder(&self, id: &str) -> bool {
        (**self).has_placeholder(id)
    }

    fn inject(&self, id: &str, html: &str) -> bool {
        (**self).inject(id, html)
    }
}

/// Callbacks the loader runs as regions settle.
pub trait RegionHooks {
    /// A region's fragment was just injected (from cache or network).
    fn after_inject(&self, _region: Region) {}

    /// Both regions settled and the ready delay elapsed.
    fn components_ready(&self) {}
}

impl RegionHooks for () {}

impl<H: RegionHooks + ?Sized> RegionHooks for &H {
    fn after_inject(&self, region: Region) {
        (**self).after_inject(region)
    }

    fn components_ready(&self) {
        (**self).components_ready()
    }
}

/// A page held as an HTML string, used outside the browser.
///
/// Placeholders are located by their `id` attribute; their inner content is
/// replaced wholesale, like an `innerHTML` assignment.
#[derive(Debug, Default)]
pub struct StaticPage {
    html: RefCell<String>,
}

impl StaticPage {
    pub fn new(html: impl Into<String>) -> Self {
        Self { html: RefCell::new(html.into()) }
    }

    /// Current document HTML.
    pub fn html(&self) -> String {
        self.html.borrow().clone()
    }

    pub fn into_html(self) -> String {
        self.html.into_inner()
    }

    /// Inner HTML of the element with `id`, if present.
    pub fn inner_html(&self, id: &str) -> Option<String> {
        let html = self.html.borrow();
        inner_range(&html, id).map(|range| html[range].to_string())
    }
}

impl Page for StaticPage {
    fn has_placeholder(&self, id: &str) -> bool {
        inner_range(&self.html.borrow(), id).is_some()
    }

    fn inject(&self, id: &str, fragment: &str) -> bool {
        let mut html = self.html.borrow_mut();
        match inner_range(&html, id) {
            Some(range) => {
                html.replace_range(range, fragment);
                true
            }
            None => false,
        }
    }
}

/// Any start or end tag: closing slash, lowercase-insensitive name, attributes.
static TAG: LazyLock<Option<Regex>> = LazyLock::new(|| pattern(r"(?is)<(/?)([a-z][a-z0-9-]*)((?:\s[^>]*|/)?)>"));

/// An `id` attribute inside a tag's attribute text.
static ID_ATTR: LazyLock<Option<Regex>> = LazyLock::new(|| pattern(r#"(?i)(?:^|\s)id\s*=\s*["']([^"']*)["']"#));

fn pattern(source: &str) -> Option<Regex> {
    Regex::new(source)
        .map_err(|e| tracing::error!(pattern = source, error = %e, "invalid placeholder pattern"))
        .ok()
}

/// Byte range of the inner content of the first element carrying `id`.
///
/// Nested elements of the same tag are balanced; self-closing or unclosed
/// elements yield `None`.
fn inner_range(html: &str, id: &str) -> Option<Range<usize>> {
    let (tag_re, id_re) = (TAG.as_ref()?, ID_ATTR.as_ref()?);
    let mut tags = tag_re.captures_iter(html);

    let open = tags.by_ref().find(|caps| {
        caps[1].is_empty() && id_re.captures(&caps[3]).is_some_and(|attr| &attr[1] == id)
    })?;
    if open[3].trim_end().ends_with('/') {
        return None;
    }

    let name = open[2].to_ascii_lowercase();
    let body_start = open.get(0)?.end();
    let mut depth = 1usize;
    for caps in tags {
        if !caps[2].eq_ignore_ascii_case(&name) {
            continue;
        }
        if !caps[1].is_empty() {
            depth -= 1;
            if depth == 0 {
                return Some(body_start..caps.get(0)?.start());
            }
        } else if !caps[3].trim_end().ends_with('/') {
            depth += 1;
        }
    }

    None
}

#[cfg(test)]
mod tests {
    use super::*;

    const PAGE: &str = r#"<!DOCTYPE html>
<html>
<body>
    <div id="header-placeholder"></div>
    <main><div class="product-card"><div>card</div></div></main>
    <div class="wrap" id="footer-placeholder">old <div>nested</div> content</div>
</body>
</html>"#;

    #[test]
    fn test_has_placeholder() {
        let page = StaticPage::new(PAGE);
        assert!(page.has_placeholder("header-placeholder"));
        assert!(page.has_placeholder("footer-placeholder"));
        assert!(!page.has_placeholder("missing"));
    }

    #[test]
    fn test_inject_into_empty_placeholder() {
        let page = StaticPage::new(PAGE);
        assert!(page.inject("header-placeholder", "<header class=\"main-header\">RSX</header>"));
        assert_eq!(page.inner_html("header-placeholder").unwrap(), "<header class=\"main-header\">RSX</header>");
        assert!(page.html().contains("<main><div class=\"product-card\">"));
    }

    #[test]
    fn test_inject_replaces_nested_content() {
        let page = StaticPage::new(PAGE);
        assert!(page.inject("footer-placeholder", "<footer id=\"footer\"></footer>"));
        let html = page.into_html();
        assert!(html.contains(r#"<div class="wrap" id="footer-placeholder"><footer id="footer"></footer></div>"#));
        assert!(!html.contains("nested"));
    }

    #[test]
    fn test_inject_twice_replaces() {
        let page = StaticPage::new(PAGE);
        page.inject("header-placeholder", "<p>one</p>");
        page.inject("header-placeholder", "<p>two</p>");
        assert_eq!(page.inner_html("header-placeholder").unwrap(), "<p>two</p>");
    }

    #[test]
    fn test_inject_missing_placeholder() {
        let page = StaticPage::new(PAGE);
        assert!(!page.inject("nope", "<p>x</p>"));
        assert_eq!(page.html(), PAGE);
    }

    #[test]
    fn test_data_id_is_not_an_id() {
        let page = StaticPage::new(r#"<div data-id="header-placeholder"></div>"#);
        assert!(!page.has_placeholder("header-placeholder"));
    }

    #[test]
    fn test_hyphenated_tag_does_not_count_as_nesting() {
        let page = StaticPage::new(r#"<div id="header-placeholder"><div-x>a</div-x><div>b</div></div><p>after</p>"#);
        assert_eq!(page.inner_html("header-placeholder").unwrap(), "<div-x>a</div-x><div>b</div>");
        assert!(page.inject("header-placeholder", "<nav></nav>"));
        assert_eq!(page.html(), r#"<div id="header-placeholder"><nav></nav></div><p>after</p>"#);
    }

    #[test]
    fn test_uppercase_tags_balance() {
        let page = StaticPage::new(r#"<DIV ID="footer-placeholder"><Div>x</DIV></div>"#);
        assert_eq!(page.inner_html("footer-placeholder").unwrap(), "<Div>x</DIV>");
    }

    #[test]
    fn test_self_closing_placeholder_is_absent() {
        let page = StaticPage::new(r#"<div id="header-placeholder" />"#);
        assert!(!page.has_placeholder("header-placeholder"));
    }
}
