//! Error types for HTTP transport operations.
//!
//! These variants separate transport failures (network, timeout) from
//! status-level failures so callers can react differently to each.

use std::path::PathBuf;

use thiserror::Error;

/// Errors surfaced by the HTTP client and response persistence.
#[derive(Debug, Error)]
pub enum HttpError {
    /// Network-level failure: DNS, connection refused, TLS, or a broken
    /// body stream.
    #[error("network error requesting {url}: {source}")]
    Network {
        /// The URL being requested.
        url: String,
        /// The underlying reqwest error.
        #[source]
        source: reqwest::Error,
    },

    /// The request did not complete within its timeout.
    #[error("timeout requesting {url}")]
    Timeout {
        /// The URL being requested.
        url: String,
    },

    /// A response status a caller chose to surface as an error.
    #[error("HTTP {status} from {url}")]
    Status {
        /// The URL that answered.
        url: String,
        /// The HTTP status code.
        status: u16,
    },

    /// File system failure while persisting a response body.
    #[error("IO error writing to {path}: {source}")]
    Io {
        /// The path being written.
        path: PathBuf,
        /// The underlying IO error.
        #[source]
        source: std::io::Error,
    },
}

// Helper constructors keep call sites terse. There are deliberately no
// `From` impls here: a bare reqwest::Error cannot tell us which URL was in
// flight, so conversions stay explicit.
impl HttpError {
    /// Creates a network error for `url`.
    pub fn network(url: impl Into<String>, source: reqwest::Error) -> Self {
        Self::Network {
            url: url.into(),
            source,
        }
    }

    /// Creates a timeout error for `url`.
    pub fn timeout(url: impl Into<String>) -> Self {
        Self::Timeout { url: url.into() }
    }

    /// Creates a status error for `url`.
    pub fn status(url: impl Into<String>, status: u16) -> Self {
        Self::Status {
            url: url.into(),
            status,
        }
    }

    /// Creates an IO error for `path`.
    pub fn io(path: impl Into<PathBuf>, source: std::io::Error) -> Self {
        Self::Io {
            path: path.into(),
            source,
        }
    }
}
