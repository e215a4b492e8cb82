//! Error types for the image finder plugin.
//!
//! [`SearchError`] is the single failure the search controller knows about: a
//! search request that did not produce a usable page of results. Network
//! failures, non-success HTTP statuses and malformed bodies all collapse into
//! it. [`ImageFinderError`] is the crate-wide error used by configuration,
//! theming and I/O code, with [`Result`] as the matching alias.

use thiserror::Error;

/// A search request failed.
///
/// Carries the human-readable description that ends up in the inline error
/// display and the error notification. The `Display` output is the message
/// itself with no prefix, so `error.to_string()` is exactly what the user sees.
///
/// # Examples
///
/// ```
/// use imagefinder::domain::SearchError;
///
/// let error = SearchError::new("network timeout");
/// assert_eq!(error.to_string(), "network timeout");
/// ```
#[derive(Debug, Clone, PartialEq, Eq, Error)]
#[error("{message}")]
pub struct SearchError {
    message: String,
}

impl SearchError {
    /// Creates a search error from any displayable description.
    pub fn new(message: impl Into<String>) -> Self {
        Self {
            message: message.into(),
        }
    }

    /// Returns the description of the failure.
    #[must_use]
    pub fn message(&self) -> &str {
        &self.message
    }
}

/// The main error type for plugin operations outside the search controller.
#[derive(Debug, Error)]
pub enum ImageFinderError {
    /// A search request failed.
    #[error("Search request failed: {0}")]
    Search(#[from] SearchError),

    /// Filesystem or I/O operation failed.
    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),

    /// Theme parsing or loading failed.
    #[error("Theme error: {0}")]
    Theme(String),

    /// Configuration is invalid or missing.
    ///
    /// Raised by [`crate::Config::validate`], most commonly when no API key
    /// was configured.
    #[error("Configuration error: {0}")]
    Config(String),
}

/// A specialized `Result` type for plugin operations.
pub type Result<T> = std::result::Result<T, ImageFinderError>;

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn search_error_displays_bare_message() {
        let error = SearchError::new("Request failed with status code 400");
        assert_eq!(error.to_string(), "Request failed with status code 400");
        assert_eq!(error.message(), "Request failed with status code 400");
    }

    #[test]
    fn search_error_converts_into_crate_error() {
        let error: ImageFinderError = SearchError::new("boom").into();
        assert!(matches!(error, ImageFinderError::Search(_)));
        assert_eq!(error.to_string(), "Search request failed: boom");
    }
}
