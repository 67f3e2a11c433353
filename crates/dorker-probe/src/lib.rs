//! Dorker Probe - per-site enrichment for harvested URLs.
//!
//! This crate turns a URL into a [`dorker_core::SiteRecord`]: host
//! resolution, an HTTP fetch with a single certificate fallback, header and
//! body heuristics, and vocabulary matching. [`ProbeCoordinator`] runs many
//! probes under a concurrency bound.
//!
//! # Example
//!
//! ```rust,ignore
//! use dorker_core::AppConfig;
//! use dorker_probe::{DetailProbe, ProbeCoordinator};
//! use std::sync::Arc;
//!
//! let config = AppConfig::default();
//! let probe = DetailProbe::from_config(&config.probe, Arc::new(config.vocabulary))?;
//! let coordinator = ProbeCoordinator::new(Arc::new(probe))
//!     .with_max_concurrent(config.probe.concurrency);
//!
//! let records = coordinator
//!     .enrich_all(&["https://example.com".to_string()])
//!     .await;
//! println!("{}: {}", records[0].url, records[0].status_code);
//! ```

#![warn(missing_docs)]
#![warn(clippy::all)]
#![warn(clippy::pedantic)]
#![allow(clippy::module_name_repetitions)]
#![allow(clippy::missing_errors_doc)]
#![allow(clippy::missing_panics_doc)]

pub mod coordinator;
pub mod dns;
pub mod error;
pub mod fetch;
pub mod probe;
pub mod signature;

pub use coordinator::{ProbeCoordinator, DEFAULT_MAX_CONCURRENT};
pub use dns::{host_of, HostResolver, SystemResolver};
pub use error::{ProbeError, Result};
pub use fetch::{is_certificate_error, FetchedPage, PageFetcher, ReqwestFetcher, TlsMode};
pub use probe::DetailProbe;
pub use signature::{declared_language, SignatureDetector, TechStack};
