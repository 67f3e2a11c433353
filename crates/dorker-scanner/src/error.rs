//! Harvest error types.
//!
//! A [`ScanError`] aborts the remaining pages of one harvest. It never
//! reaches the harvest caller, who receives the partial result instead.

use thiserror::Error;

/// Reasons a result page could not be fetched or read.
#[derive(Debug, Error)]
pub enum ScanError {
    /// Session construction, navigation or DOM access failed
    #[error("Browser error: {0}")]
    Browser(#[from] dorker_browser::BrowserError),

    /// The configured search endpoint cannot be turned into a URL
    #[error("Invalid search URL {url}: {reason}")]
    InvalidSearchUrl {
        /// Offending base URL
        url: String,
        /// Parser message
        reason: String,
    },

    /// The configured result selector does not parse
    #[error("Selectors outdated: {reason}")]
    SelectorsOutdated {
        /// Parser message
        reason: String,
    },
}

/// Result type alias using [`ScanError`].
pub type Result<T> = std::result::Result<T, ScanError>;
