//! Error types shared by the persistence layer, the remote beer source and the
//! repository that ties them together. The binary converts these into
//! `anyhow::Error` at the edges; everything below `main` keeps them typed so the
//! UI can tell a network hiccup apart from a broken database.

use thiserror::Error;

/// Failures raised by the SQLite-backed beer store.
#[derive(Debug, Error)]
pub enum StorageError {
    /// The database file (or its parent directory) could not be opened.
    #[error("failed to open beer database at {path}")]
    Open {
        path: String,
        #[source]
        source: Box<dyn std::error::Error + Send + Sync>,
    },

    /// The schema statement was rejected.
    #[error("failed to create beers table")]
    Schema(#[source] rusqlite::Error),

    /// A row operation (insert, select, delete) failed.
    #[error("failed to {action}")]
    Query {
        action: &'static str,
        #[source]
        source: rusqlite::Error,
    },

    /// Closing the connection failed; pending statements may not have been
    /// finalized.
    #[error("failed to close beer database")]
    Close(#[source] rusqlite::Error),
}

impl StorageError {
    pub(crate) fn query(action: &'static str, source: rusqlite::Error) -> Self {
        Self::Query { action, source }
    }
}

/// Failures talking to the remote beer source. Callers treat every variant the
/// same way (a recoverable "could not fetch" message); the split only exists
/// for logging.
#[derive(Debug, Error)]
pub enum FetchError {
    /// Connection refused, DNS failure, TLS error and friends.
    #[error("request to beer source failed")]
    Transport(#[source] reqwest::Error),

    /// The source answered with a non-success status.
    #[error("beer source returned HTTP {0}")]
    Status(u16),

    /// The body was not a JSON object with string fields.
    #[error("beer source returned an unreadable body")]
    Decode(#[source] serde_json::Error),

    /// The background task running the request died before reporting back.
    #[error("beer fetch task did not complete")]
    Interrupted,
}

/// Everything the repository can report back to the UI.
#[derive(Debug, Error)]
pub enum BeerError {
    #[error(transparent)]
    Fetch(#[from] FetchError),

    #[error(transparent)]
    Storage(#[from] StorageError),
}

/// Problems resolving the runtime configuration.
#[derive(Debug, Error)]
pub enum ConfigError {
    #[error("could not locate home directory")]
    NoHomeDir,

    #[error("invalid beer source endpoint {0:?}: expected an http(s) URL")]
    InvalidEndpoint(String),
}
