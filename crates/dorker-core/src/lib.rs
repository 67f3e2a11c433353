//! Dorker Core - Foundation crate for the dorker reconnaissance pipeline.
//!
//! This crate provides the record types every stage produces or consumes,
//! the read-only signature vocabularies, and configuration management that
//! all other dorker crates depend on.
//!
//! # Modules
//!
//! - [`error`] - Configuration error types using thiserror
//! - [`config`] - TOML-based configuration with XDG paths and the pacing policy
//! - [`types`] - `SiteRecord` and its field enums
//! - [`vocabulary`] - Technology signature term lists
//!
//! # Example
//!
//! ```rust
//! use dorker_core::{AppConfig, SiteRecord};
//!
//! let config = AppConfig::default();
//! assert!(config.validate().is_ok());
//!
//! let record = SiteRecord::new("https://example.com");
//! assert_eq!(record.status_code, 0);
//! assert_eq!(record.gateways.to_string(), "None");
//! ```

#![warn(missing_docs)]
#![warn(clippy::all)]
#![warn(clippy::pedantic)]
#![allow(clippy::module_name_repetitions)]
#![allow(clippy::missing_errors_doc)]
#![allow(clippy::missing_panics_doc)]

pub mod config;
pub mod error;
pub mod types;
pub mod vocabulary;

// Re-export commonly used types
pub use config::{
    AppConfig, BrowserConfig, HarvestConfig, PacingConfig, PacingPolicy, ProbeConfig,
    DEFAULT_USER_AGENT, HARD_PAGE_CEILING,
};
pub use error::{ConfigError, ConfigResult};
pub use types::{DnsStatus, SiteRecord, SslStatus, TermSet, UNKNOWN_LANGUAGE};
pub use vocabulary::Vocabulary;
