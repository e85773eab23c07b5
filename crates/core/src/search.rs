//! Catalog search: query normalization, filtering and result rendering.
//!
//! Matching is a case-insensitive substring test against an entry's name,
//! description and each feature keyword. There is no tokenization and no
//! ranking: results keep catalog order.

use maud::{Markup, html};

use crate::catalog::{Catalog, CatalogEntry};

/// A normalized search query (lower-cased, trimmed).
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct SearchQuery(String);

impl SearchQuery {
    /// Normalize raw input-box text.
    pub fn parse(raw: &str) -> Self {
        Self(raw.trim().to_lowercase())
    }

    pub fn as_str(&self) -> &str {
        &self.0
    }

    pub fn is_empty(&self) -> bool {
        self.0.is_empty()
    }

    /// Whether this query is contained in the entry's name, description or any feature.
    pub fn matches(&self, entry: &CatalogEntry) -> bool {
        let needle = self.0.as_str();
        entry.name.to_lowercase().contains(needle)
            || entry.description.to_lowercase().contains(needle)
            || entry.features.iter().any(|f| f.to_lowercase().contains(needle))
    }
}

/// Outcome of running one query over the catalog.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum SearchOutcome<'a> {
    /// Empty or whitespace-only query: nothing to show.
    Idle,
    /// Non-empty query with no matching entries.
    NoResults(SearchQuery),
    /// Matching entries, in catalog order.
    Matches(SearchQuery, Vec<&'a CatalogEntry>),
}

impl SearchOutcome<'_> {
    /// Whether the results panel should be visible.
    pub fn shows_panel(&self) -> bool {
        !matches!(self, SearchOutcome::Idle)
    }

    /// Rendered results panel contents. Empty for `Idle`.
    pub fn render(&self) -> Markup {
        match self {
            SearchOutcome::Idle => html! {},
            SearchOutcome::NoResults(query) => render_no_results(query),
            SearchOutcome::Matches(_, entries) => html! {
                @for entry in entries {
                    (render_result_row(entry))
                }
            },
        }
    }
}

/// Filter the catalog by raw query text.
pub fn search<'a>(catalog: &'a Catalog, raw: &str) -> SearchOutcome<'a> {
    let query = SearchQuery::parse(raw);
    if query.is_empty() {
        return SearchOutcome::Idle;
    }

    let matches: Vec<&CatalogEntry> = catalog.iter().filter(|entry| query.matches(entry)).collect();
    if matches.is_empty() { SearchOutcome::NoResults(query) } else { SearchOutcome::Matches(query, matches) }
}

fn render_result_row(entry: &CatalogEntry) -> Markup {
    html! {
        a.search-result-item href=(entry.url) {
            div.search-result-icon {
                i class=(entry.icon) {}
            }
            div.search-result-content {
                h4 { (entry.name) }
            }
            div.search-result-arrow {
                i.fas.fa-chevron-right {}
            }
        }
    }
}

fn render_no_results(query: &SearchQuery) -> Markup {
    html! {
        div.search-no-results {
            i.fas.fa-search {}
            p { "Nenhum resultado encontrado para \"" (query.as_str()) "\"" }
        }
    }
}

/// Markup for a search bar, used when the header fragment does not carry one.
pub fn search_bar() -> Markup {
    html! {
        div.search-bar {
            i.fas.fa-search.search-icon {}
            input.search-input type="text" placeholder="Buscar lojas, produtos, serviços...";
            button.search-clear style="display: none;" {
                i.fas.fa-times {}
            }
        }
        div.search-results {}
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn names<'a>(outcome: &SearchOutcome<'a>) -> Vec<&'a str> {
        match outcome {
            SearchOutcome::Matches(_, entries) => entries.iter().map(|e| e.name.as_str()).collect(),
            _ => Vec::new(),
        }
    }

    #[test]
    fn test_query_normalization() {
        assert_eq!(SearchQuery::parse("  SteAM \t").as_str(), "steam");
        assert!(SearchQuery::parse("   ").is_empty());
    }

    #[test]
    fn test_empty_and_whitespace_queries_are_idle() {
        let catalog = Catalog::default();
        for raw in ["", " ", "\t\n  "] {
            let outcome = search(&catalog, raw);
            assert_eq!(outcome, SearchOutcome::Idle);
            assert!(!outcome.shows_panel());
            assert!(outcome.render().into_string().is_empty());
        }
    }

    #[test]
    fn test_steam_matches_system_only() {
        let catalog = Catalog::default();
        let outcome = search(&catalog, "steam");
        assert_eq!(names(&outcome), ["RSX System"]);

        let html = outcome.render().into_string();
        assert_eq!(html.matches("search-result-item").count(), 1);
        assert!(html.contains(r#"href="/rsx-system""#));
        assert!(html.contains("fas fa-gamepad"));
        assert!(html.contains("<h4>RSX System</h4>"));
    }

    #[test]
    fn test_no_results_contains_query() {
        let catalog = Catalog::default();
        let outcome = search(&catalog, "xyz123");
        assert!(matches!(outcome, SearchOutcome::NoResults(_)));
        assert!(outcome.shows_panel());
        let html = outcome.render().into_string();
        assert!(html.contains("search-no-results"));
        assert!(html.contains("xyz123"));
    }

    #[test]
    fn test_results_keep_catalog_order() {
        let catalog = Catalog::default();
        let outcome = search(&catalog, "rsx");
        assert_eq!(names(&outcome), ["RSX Store", "RSX Bots", "RSX System"]);
    }

    #[test]
    fn test_case_insensitive_feature_match() {
        let catalog = Catalog::default();
        assert_eq!(names(&search(&catalog, "DISCORD")), ["RSX Bots"]);
        assert_eq!(names(&search(&catalog, "Automação")), ["RSX Bots"]);
        assert_eq!(names(&search(&catalog, "gift")), ["RSX System"]);
    }

    #[test]
    fn test_no_false_positives_or_negatives() {
        let catalog = Catalog::default();
        for raw in ["a", "st", "entrega", "api", "gaming", "zzz", "digitais", "o"] {
            let query = SearchQuery::parse(raw);
            let expected: Vec<&str> =
                catalog.iter().filter(|e| query.matches(e)).map(|e| e.name.as_str()).collect();
            assert_eq!(names(&search(&catalog, raw)), expected, "query {raw:?}");
        }
    }

    #[test]
    fn test_rendered_query_is_escaped() {
        let catalog = Catalog::default();
        let html = search(&catalog, "<b>x").render().into_string();
        assert!(html.contains("&lt;b&gt;x"));
        assert!(!html.contains("<b>x"));
    }

    #[test]
    fn test_search_bar_markup() {
        let html = search_bar().into_string();
        assert!(html.contains("search-input"));
        assert!(html.contains("search-clear"));
        assert!(html.contains("search-results"));
    }
}
