// src/error.rs
// =============================================================================
// Errors produced by the browsing core.
//
// Every failure the user can see ends up as one BrowseError. The state
// container keeps the most recent one as its "current error", which is why
// the type is Clone + PartialEq and stores text rather than the underlying
// reqwest error.
// =============================================================================

use thiserror::Error;

/// Errors that can occur while loading or browsing a repository.
#[derive(Error, Debug, Clone, PartialEq, Eq)]
pub enum BrowseError {
    /// Blank repository submission.
    #[error("please enter a repository URL")]
    EmptyInput,

    /// The input did not contain a recognizable `owner/name` pair.
    #[error("invalid repository identifier: {input}")]
    InvalidFormat {
        /// The text as entered.
        input: String,
    },

    /// Non-2xx response or network failure on a remote lookup.
    #[error("{}", describe_fetch(.status, .detail))]
    Fetch {
        /// HTTP status code, when a response was received.
        status: Option<u16>,
        /// Response body or transport error text.
        detail: String,
    },

    /// Navigation or selection attempted before a repository was loaded.
    #[error("no repository loaded")]
    NoRepository,

    /// A listing was requested for a path that is a file.
    #[error("not a directory: {path}")]
    NotADirectory {
        /// Path that was requested.
        path: String,
    },

    /// Named entry is not part of the current listing.
    #[error("no such entry: {path}")]
    NotFound {
        /// Name or path the caller asked for.
        path: String,
    },
}

/// Result type for browsing operations.
pub type BrowseResult<T> = Result<T, BrowseError>;

impl BrowseError {
    /// Builds a fetch error from an HTTP status and response body.
    pub fn http(status: u16, detail: impl Into<String>) -> Self {
        BrowseError::Fetch {
            status: Some(status),
            detail: detail.into(),
        }
    }
}

impl From<reqwest::Error> for BrowseError {
    fn from(error: reqwest::Error) -> Self {
        BrowseError::Fetch {
            status: error.status().map(|s| s.as_u16()),
            detail: error.to_string(),
        }
    }
}

fn describe_fetch(status: &Option<u16>, detail: &str) -> String {
    match (*status, detail.trim()) {
        (Some(code), "") => format!("fetch failed: HTTP {}", code),
        (Some(code), detail) => format!("fetch failed: HTTP {}: {}", code, detail),
        (None, detail) => format!("fetch failed: {}", detail),
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_fetch_error_display_includes_status() {
        let err = BrowseError::http(404, "Not Found");
        assert_eq!(err.to_string(), "fetch failed: HTTP 404: Not Found");
    }

    #[test]
    fn test_fetch_error_display_without_body() {
        let err = BrowseError::http(500, "  ");
        assert_eq!(err.to_string(), "fetch failed: HTTP 500");
    }

    #[test]
    fn test_network_error_display() {
        let err = BrowseError::Fetch {
            status: None,
            detail: "connection refused".to_string(),
        };
        assert_eq!(err.to_string(), "fetch failed: connection refused");
    }
}
