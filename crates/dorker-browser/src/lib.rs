//! Browser automation for search result pages.
//!
//! Provides disposable headless browser sessions with anti-fingerprinting,
//! one per page fetch, plus best-effort consent dialog dismissal.

pub mod actions;
pub mod consent;
pub mod error;
pub mod fingerprint;
pub mod session;

pub use actions::{BrowserActions, SessionFactory};
pub use consent::ConsentHandler;
pub use error::{BrowserError, Result};
pub use fingerprint::FingerprintConfig;
pub use session::{BrowserSession, ChromiumSessionFactory, SessionConfig};
