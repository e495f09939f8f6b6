//! Download error type, split so the sync loop can tell which failures it may skip.

use std::path::PathBuf;

/// Error returned by a single GET (curl failure, HTTP status, or local write failure).
#[derive(Debug, thiserror::Error)]
pub enum FetchError {
    /// Server answered with a non-2xx status.
    #[error("HTTP {code} for {url}")]
    Http { code: u32, url: String },
    /// Curl could not complete the request (bad URL, DNS, connect, transport).
    #[error("{source} for {url}")]
    Url {
        #[source]
        source: curl::Error,
        url: String,
    },
    /// Writing or renaming the local archive failed.
    #[error("storage: {path}: {source}")]
    Storage {
        #[source]
        source: std::io::Error,
        path: PathBuf,
    },
}

impl FetchError {
    /// True for network-side failures (HTTP status or URL/connection error).
    /// Storage failures are local and abort the run.
    pub fn is_recoverable(&self) -> bool {
        matches!(self, FetchError::Http { .. } | FetchError::Url { .. })
    }

    /// Human-readable reason for a URL error, without the URL.
    pub fn reason(&self) -> String {
        match self {
            FetchError::Http { code, .. } => code.to_string(),
            FetchError::Url { source, .. } => source.description().to_string(),
            FetchError::Storage { source, .. } => source.to_string(),
        }
    }

    pub(crate) fn url(source: curl::Error, url: &str) -> Self {
        FetchError::Url {
            source,
            url: url.to_string(),
        }
    }

    pub(crate) fn storage(source: std::io::Error, path: impl Into<PathBuf>) -> Self {
        FetchError::Storage {
            source,
            path: path.into(),
        }
    }
}
