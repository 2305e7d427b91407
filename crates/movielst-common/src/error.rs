//! Error types for metadata lookups and catalog storage.

use std::path::PathBuf;

/// Why a metadata lookup produced no record.
#[derive(Debug, thiserror::Error)]
pub enum FetchError {
    /// The service answered, but has no movie by that title.
    #[error("Movie not found: {title}")]
    NotFound { title: String },

    /// The request never got an answer (DNS, connect, timeout).
    #[error("Transport error: {0}")]
    Transport(String),

    /// The service answered with a non-success HTTP status.
    #[error("Service returned HTTP {status}")]
    Status { status: u16 },

    /// The service refused the query for a reason other than "not found"
    /// (bad key, quota exhausted).
    #[error("Request rejected: {0}")]
    Rejected(String),

    /// The response body could not be decoded.
    #[error("Malformed response: {0}")]
    Malformed(String),
}

impl FetchError {
    pub fn not_found<S: Into<String>>(title: S) -> Self {
        Self::NotFound {
            title: title.into(),
        }
    }

    /// A clean "no such movie" answer, as opposed to a service failure.
    pub fn is_not_found(&self) -> bool {
        matches!(self, Self::NotFound { .. })
    }
}

/// Catalog persistence failures.
#[derive(Debug, thiserror::Error)]
pub enum StoreError {
    /// No catalog has been written at this location yet.
    #[error("No catalog at {}", path.display())]
    NotIndexed { path: PathBuf },

    #[error("Catalog I/O failed at {}: {source}", path.display())]
    Io {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },

    #[error("Catalog at {} is corrupt: {source}", path.display())]
    Corrupt {
        path: PathBuf,
        #[source]
        source: serde_json::Error,
    },
}

impl StoreError {
    pub fn io(path: impl Into<PathBuf>, source: std::io::Error) -> Self {
        Self::Io {
            path: path.into(),
            source,
        }
    }

    /// The index step has never run for this catalog location.
    pub fn is_not_indexed(&self) -> bool {
        matches!(self, Self::NotIndexed { .. })
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_fetch_error_display() {
        let err = FetchError::not_found("Inception");
        assert_eq!(err.to_string(), "Movie not found: Inception");
        assert!(err.is_not_found());

        let err = FetchError::Status { status: 503 };
        assert_eq!(err.to_string(), "Service returned HTTP 503");
        assert!(!err.is_not_found());

        let err = FetchError::Rejected("Invalid API key!".into());
        assert_eq!(err.to_string(), "Request rejected: Invalid API key!");
    }

    #[test]
    fn test_store_error_kinds() {
        let err = StoreError::NotIndexed {
            path: PathBuf::from("/tmp/movies.json"),
        };
        assert!(err.is_not_indexed());
        assert_eq!(err.to_string(), "No catalog at /tmp/movies.json");

        let io = std::io::Error::new(std::io::ErrorKind::PermissionDenied, "denied");
        let err = StoreError::io("/tmp/movies.json", io);
        assert!(!err.is_not_indexed());
        assert!(std::error::Error::source(&err).is_some());
    }
}
