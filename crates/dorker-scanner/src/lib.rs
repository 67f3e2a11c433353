//! Dorker Scanner - Paginated search result harvesting.
//!
//! This crate turns a search query into an ordered list of unique result
//! URLs. Each result page is fetched in its own disposable browser session,
//! consent dialogs are dismissed, result links are parsed from the rendered
//! page, and pagination stops at the requested limit, the page ceiling, or
//! the first empty page.
//!
//! Only one browser session is ever alive at a time. A failing page ends the
//! harvest early and the links gathered so far are returned.
//!
//! # Example
//!
//! ```rust,ignore
//! use dorker_browser::{ChromiumSessionFactory, SessionConfig};
//! use dorker_core::{HarvestConfig, PacingPolicy};
//! use dorker_scanner::PaginatedHarvester;
//!
//! let factory = ChromiumSessionFactory::new(SessionConfig::default());
//! let harvester =
//!     PaginatedHarvester::new(factory, HarvestConfig::default(), PacingPolicy::default())?;
//!
//! let urls = harvester.harvest("intext:\"powered by shopify\"", 50, 0).await;
//! ```

#![warn(missing_docs)]
#![warn(clippy::all)]
#![warn(clippy::pedantic)]
#![allow(clippy::module_name_repetitions)]
#![allow(clippy::missing_errors_doc)]
#![allow(clippy::missing_panics_doc)]

pub mod error;
pub mod harvester;
#[allow(missing_docs)]
pub mod parser;
#[allow(missing_docs)]
pub mod url_builder;

// Re-export commonly used types
pub use error::{Result, ScanError};
pub use harvester::{pages_needed, PaginatedHarvester};
pub use parser::{is_http_url, ResultParser};
pub use url_builder::build_search_url;
