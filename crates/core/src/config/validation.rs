//! Configuration validation rules.
//!
//! This module provides validation logic for `SiteConfig` values
//! after they have been loaded from environment, files, or defaults.

use crate::config::SiteConfig;
use thiserror::Error;

/// Configuration validation errors.
#[derive(Debug, Error)]
pub enum ConfigError {
    #[error("failed to load configuration: {0}")]
    LoadFailed(String),

    #[error("invalid configuration: {field} - {reason}")]
    Invalid { field: String, reason: String },
}

impl SiteConfig {
    /// Validate configuration values after loading.
    ///
    /// # Errors
    ///
    /// Returns `ConfigError::Invalid` if:
    /// - `components_version` or `components_dir` is empty
    /// - `timeout_ms` is less than 100ms or exceeds 5 minutes
    /// - `toast_duration_ms` is 0
    /// - `site_url` is not an absolute http(s) URL
    /// - a catalog entry has an empty name or url
    pub fn validate(&self) -> Result<(), ConfigError> {
        if self.components_version.trim().is_empty() {
            return Err(ConfigError::Invalid {
                field: "components_version".into(),
                reason: "must not be empty".into(),
            });
        }

        if self.components_dir.trim_matches('/').is_empty() {
            return Err(ConfigError::Invalid { field: "components_dir".into(), reason: "must not be empty".into() });
        }

        if self.timeout_ms < 100 {
            return Err(ConfigError::Invalid { field: "timeout_ms".into(), reason: "must be at least 100ms".into() });
        }
        if self.timeout_ms > 300_000 {
            return Err(ConfigError::Invalid {
                field: "timeout_ms".into(),
                reason: "must not exceed 5 minutes (300000ms)".into(),
            });
        }

        if self.toast_duration_ms == 0 {
            return Err(ConfigError::Invalid {
                field: "toast_duration_ms".into(),
                reason: "must be greater than 0".into(),
            });
        }

        match url::Url::parse(&self.site_url) {
            Ok(url) if matches!(url.scheme(), "http" | "https") => {}
            Ok(url) => {
                return Err(ConfigError::Invalid {
                    field: "site_url".into(),
                    reason: format!("unsupported scheme: {}", url.scheme()),
                });
            }
            Err(e) => return Err(ConfigError::Invalid { field: "site_url".into(), reason: e.to_string() }),
        }

        if let Some(entry) = self.catalog.iter().find(|e| e.name.trim().is_empty() || e.url.trim().is_empty()) {
            return Err(ConfigError::Invalid {
                field: "catalog".into(),
                reason: format!("entry {:?} needs a name and a url", entry.name),
            });
        }

        if self.catalog.is_empty() {
            tracing::warn!("catalog is empty; every search will report no results");
        }

        Ok(())
    }
}
