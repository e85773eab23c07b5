//! The searchable store catalog.
//!
//! The catalog is plain data: it ships with the three RSX storefronts as its
//! default, but any list of records can be injected through configuration.

use serde::{Deserialize, Serialize};

use crate::Error;

/// One searchable store record.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct CatalogEntry {
    pub name: String,
    pub description: String,
    /// Feature keywords, kept in display order.
    #[serde(default)]
    pub features: Vec<String>,
    pub url: String,
    /// Icon class list, e.g. `fas fa-store`.
    pub icon: String,
}

impl CatalogEntry {
    fn new(name: &str, description: &str, features: &[&str], url: &str, icon: &str) -> Self {
        Self {
            name: name.to_string(),
            description: description.to_string(),
            features: features.iter().map(|f| f.to_string()).collect(),
            url: url.to_string(),
            icon: icon.to_string(),
        }
    }
}

/// Ordered, immutable sequence of catalog entries.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(transparent)]
pub struct Catalog {
    entries: Vec<CatalogEntry>,
}

impl Catalog {
    pub fn new(entries: Vec<CatalogEntry>) -> Self {
        Self { entries }
    }

    /// Parse a catalog from a JSON array of entries.
    pub fn from_json(json: &str) -> Result<Self, Error> {
        serde_json::from_str(json).map_err(|e| Error::InvalidInput(format!("catalog: {e}")))
    }

    pub fn entries(&self) -> &[CatalogEntry] {
        &self.entries
    }

    pub fn len(&self) -> usize {
        self.entries.len()
    }

    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }

    pub fn iter(&self) -> std::slice::Iter<'_, CatalogEntry> {
        self.entries.iter()
    }
}

impl Default for Catalog {
    fn default() -> Self {
        Self::new(vec![
            CatalogEntry::new(
                "RSX Store",
                "Produtos digitais com entrega automática",
                &["produtos digitais", "entrega automática", "suporte especializado", "preços acessíveis", "garantia total"],
                "/rsx-store",
                "fas fa-store",
            ),
            CatalogEntry::new(
                "RSX Bots",
                "Bots personalizados para Discord e automação",
                &["bots discord", "automação", "aplicações personalizadas", "integrações api", "mensalidades"],
                "/rsx-bots",
                "fas fa-robot",
            ),
            CatalogEntry::new(
                "RSX System",
                "Jogos Steam, gift cards e métodos Steam",
                &["jogos steam", "gift cards", "métodos steam", "contas steam", "gaming"],
                "/rsx-system",
                "fas fa-gamepad",
            ),
        ])
    }
}

impl<'a> IntoIterator for &'a Catalog {
    type Item = &'a CatalogEntry;
    type IntoIter = std::slice::Iter<'a, CatalogEntry>;

    fn into_iter(self) -> Self::IntoIter {
        self.entries.iter()
    }
}
