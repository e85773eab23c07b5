//! Site configuration with layered loading.
//!
//! Configuration is loaded with figment from multiple sources:
//!
//! 1. Environment variables (RSX_*)
//! 2. TOML config file (if RSX_CONFIG_FILE set)
//! 3. Built-in defaults
//!
//! The browser build never reads the environment and uses `SiteConfig::default()`.

use std::path::PathBuf;
use std::time::Duration;

use figment::{
    Figment,
    providers::{Env, Format, Serialized, Toml},
};
use serde::{Deserialize, Serialize};

use crate::base_path::DEFAULT_SECTIONS;
use crate::catalog::Catalog;

mod validation;

pub use validation::ConfigError;

/// Site configuration with layered loading.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct SiteConfig {
    /// Version tag stored next to cached fragments.
    ///
    /// Bumping it invalidates every cached header/footer.
    #[serde(default = "default_components_version")]
    pub components_version: String,

    /// Directory (relative to the site root) holding `header.html` and `footer.html`.
    #[serde(default = "default_components_dir")]
    pub components_dir: String,

    /// Section directories whose pages sit two levels deep.
    #[serde(default = "default_nested_sections")]
    pub nested_sections: Vec<String>,

    /// Delay between both regions settling and features being set up.
    #[serde(default = "default_ready_delay_ms")]
    pub ready_delay_ms: u64,

    /// Default toast lifetime in milliseconds.
    #[serde(default = "default_toast_duration_ms")]
    pub toast_duration_ms: u64,

    /// Scroll offset (px) past which the back-to-top button shows.
    #[serde(default = "default_back_to_top_threshold")]
    pub back_to_top_threshold: f64,

    /// Site origin used to resolve relative fragment paths outside a browser.
    ///
    /// Set via RSX_SITE_URL environment variable.
    #[serde(default = "default_site_url")]
    pub site_url: String,

    /// Path to the SQLite fragment cache used by the native tool.
    ///
    /// Set via RSX_DB_PATH environment variable.
    #[serde(default = "default_db_path")]
    pub db_path: PathBuf,

    /// User-Agent string for fragment requests.
    #[serde(default = "default_user_agent")]
    pub user_agent: String,

    /// HTTP request timeout in milliseconds.
    #[serde(default = "default_timeout_ms")]
    pub timeout_ms: u64,

    /// Searchable store records.
    #[serde(default)]
    pub catalog: Catalog,
}

fn default_components_version() -> String {
    "1.1.0".into()
}

fn default_components_dir() -> String {
    "components".into()
}

fn default_nested_sections() -> Vec<String> {
    DEFAULT_SECTIONS.iter().map(|s| s.to_string()).collect()
}

fn default_ready_delay_ms() -> u64 {
    300
}

fn default_toast_duration_ms() -> u64 {
    4000
}

fn default_back_to_top_threshold() -> f64 {
    300.0
}

fn default_site_url() -> String {
    "http://localhost:8000/".into()
}

fn default_db_path() -> PathBuf {
    PathBuf::from("./rsx-components.sqlite")
}

fn default_user_agent() -> String {
    concat!("rsx-site/", env!("CARGO_PKG_VERSION")).into()
}

fn default_timeout_ms() -> u64 {
    10_000
}

impl Default for SiteConfig {
    fn default() -> Self {
        Self {
            components_version: default_components_version(),
            components_dir: default_components_dir(),
            nested_sections: default_nested_sections(),
            ready_delay_ms: default_ready_delay_ms(),
            toast_duration_ms: default_toast_duration_ms(),
            back_to_top_threshold: default_back_to_top_threshold(),
            site_url: default_site_url(),
            db_path: default_db_path(),
            user_agent: default_user_agent(),
            timeout_ms: default_timeout_ms(),
            catalog: Catalog::default(),
        }
    }
}

impl SiteConfig {
    pub fn timeout(&self) -> Duration {
        Duration::from_millis(self.timeout_ms)
    }

    pub fn ready_delay(&self) -> Duration {
        Duration::from_millis(self.ready_delay_ms)
    }

    pub fn toast_duration(&self) -> Duration {
        Duration::from_millis(self.toast_duration_ms)
    }

    /// Load configuration from all sources with layered precedence.
    ///
    /// Priority (highest wins):
    /// 1. Environment variables prefixed with `RSX_`
    /// 2. TOML file from `RSX_CONFIG_FILE` (if set)
    /// 3. Built-in defaults via `Default::default()`
    ///
    /// # Errors
    ///
    /// Returns `ConfigError` if a source cannot be parsed or validation fails.
    pub fn load() -> Result<Self, ConfigError> {
        let mut figment = Figment::from(Serialized::defaults(Self::default()));

        if let Ok(config_path) = std::env::var("RSX_CONFIG_FILE") {
            figment = figment.merge(Toml::file(&config_path));
        }

        figment = figment.merge(
            Env::prefixed("RSX_")
                .map(|key| key.as_str().to_lowercase().into())
                .split("__"),
        );

        Self::extract(figment)
    }

    /// Load from a TOML string layered over the defaults.
    pub fn from_toml_str(toml: &str) -> Result<Self, ConfigError> {
        Self::extract(Figment::from(Serialized::defaults(Self::default())).merge(Toml::string(toml)))
    }

    fn extract(figment: Figment) -> Result<Self, ConfigError> {
        let config: Self = figment.extract().map_err(|e| ConfigError::LoadFailed(e.to_string()))?;
        config.validate()?;
        Ok(config)
    }
}
