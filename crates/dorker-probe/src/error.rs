//! Probe error types.
//!
//! A [`ProbeError`] degrades the fields of one [`dorker_core::SiteRecord`]
//! to their defaults. It never escapes [`crate::DetailProbe::probe`].

use thiserror::Error;

/// Reasons a single probe step could not complete.
#[derive(Debug, Error)]
pub enum ProbeError {
    /// The server certificate failed validation
    #[error("Certificate validation failed: {0}")]
    Certificate(String),

    /// Any other transport or HTTP failure
    #[error("Request failed: {0}")]
    Request(String),

    /// The HTTP client could not be constructed
    #[error("HTTP client error: {0}")]
    Client(String),

    /// Host name resolution failed
    #[error("DNS resolution failed for {host}: {reason}")]
    Dns {
        /// Host that was looked up
        host: String,
        /// Resolver message
        reason: String,
    },
}

impl ProbeError {
    /// Whether the failure was a certificate validation failure.
    #[must_use]
    pub fn is_certificate(&self) -> bool {
        matches!(self, Self::Certificate(_))
    }
}

/// Result type alias using [`ProbeError`].
pub type Result<T> = std::result::Result<T, ProbeError>;
