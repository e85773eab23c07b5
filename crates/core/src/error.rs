//! Unified error types for the component layer.
//!
//! Every variant carries an upper-case code prefix so log lines can be
//! grepped by failure class.

#[cfg(not(target_arch = "wasm32"))]
use tokio_rusqlite::rusqlite;

/// Unified error type shared by the store, the fetcher and the loader.
#[derive(Debug, thiserror::Error)]
pub enum Error {
    /// Invalid input parameters (e.g., empty fragment name).
    #[error("INVALID_INPUT: {0}")]
    InvalidInput(String),

    /// Fragment URL could not be built.
    #[error("INVALID_URL: {0}")]
    InvalidUrl(String),

    /// Non-success HTTP response.
    #[error("HTTP_ERROR: status {status} for {url}")]
    HttpStatus { status: u16, url: String },

    /// Transport failure before a response arrived.
    #[error("NETWORK_ERROR: {0}")]
    Network(String),

    /// Key-value store operation failed.
    #[error("STORE_ERROR: {0}")]
    Store(String),

    /// Database operation failed.
    #[cfg(not(target_arch = "wasm32"))]
    #[error("STORE_ERROR: {0}")]
    Database(tokio_rusqlite::Error),

    /// Migration failed to apply.
    #[error("MIGRATION_FAILED: {0}")]
    MigrationFailed(String),
}

#[cfg(not(target_arch = "wasm32"))]
impl From<tokio_rusqlite::Error<Error>> for Error {
    fn from(err: tokio_rusqlite::Error<Error>) -> Self {
        match err {
            tokio_rusqlite::Error::Error(e) => e,
            tokio_rusqlite::Error::ConnectionClosed => Error::Database(tokio_rusqlite::Error::ConnectionClosed),
            tokio_rusqlite::Error::Close(c) => Error::Database(tokio_rusqlite::Error::Close(c)),
            _ => Error::Database(tokio_rusqlite::Error::ConnectionClosed),
        }
    }
}

#[cfg(not(target_arch = "wasm32"))]
impl From<tokio_rusqlite::Error<rusqlite::Error>> for Error {
    fn from(err: tokio_rusqlite::Error<rusqlite::Error>) -> Self {
        Error::Database(err)
    }
}

#[cfg(not(target_arch = "wasm32"))]
impl From<rusqlite::Error> for Error {
    fn from(err: rusqlite::Error) -> Self {
        Error::Database(tokio_rusqlite::Error::Error(err))
    }
}

impl Error {
    /// True for failures that mean "the fragment could not be retrieved".
    pub fn is_fetch_failure(&self) -> bool {
        matches!(self, Error::HttpStatus { .. } | Error::Network(_) | Error::InvalidUrl(_))
    }
}
