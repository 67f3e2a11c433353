//! Record types shared across the pipeline.
//!
//! A [`SiteRecord`] is created with every field at its default, filled in
//! step by step by the probe, and handed to the caller once complete. The
//! `Display` impls on the field types are the exact values downstream
//! formatting relies on.

use serde::{Deserialize, Serialize};
use std::collections::BTreeSet;
use std::fmt;

/// Sentinel for a page that declares no language.
pub const UNKNOWN_LANGUAGE: &str = "unknown";

/// Sentinel rendered in place of an empty [`TermSet`].
const NONE_LABEL: &str = "None";

/// Sentinel rendered for steps that never ran.
const NOT_APPLICABLE_LABEL: &str = "N/A";

/// Outcome of resolving the host of a probed URL.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum DnsStatus {
    /// Host resolved to at least one address
    Resolvable,
    /// Resolution failed
    Unresolvable,
    /// No host could be parsed from the URL
    #[default]
    NotApplicable,
}

impl fmt::Display for DnsStatus {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Resolvable => write!(f, "resolvable"),
            Self::Unresolvable => write!(f, "unresolvable"),
            Self::NotApplicable => write!(f, "{NOT_APPLICABLE_LABEL}"),
        }
    }
}

/// Outcome of certificate validation for a probed URL.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum SslStatus {
    /// Fetch succeeded with full certificate validation
    Valid,
    /// Certificate validation failed
    Invalid,
    /// No TLS verdict was reached
    #[default]
    NotApplicable,
}

impl fmt::Display for SslStatus {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Valid => write!(f, "valid"),
            Self::Invalid => write!(f, "invalid"),
            Self::NotApplicable => write!(f, "{NOT_APPLICABLE_LABEL}"),
        }
    }
}

/// Set of matched vocabulary terms.
///
/// Ordered so rendering is stable. Displays as `"None"` when empty and as a
/// comma-joined list otherwise.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(transparent)]
pub struct TermSet(BTreeSet<String>);

impl TermSet {
    /// Create an empty set.
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Add a term. Returns `false` if it was already present.
    pub fn insert(&mut self, term: impl Into<String>) -> bool {
        self.0.insert(term.into())
    }

    /// Whether the term is present.
    #[must_use]
    pub fn contains(&self, term: &str) -> bool {
        self.0.contains(term)
    }

    /// Number of distinct terms.
    #[must_use]
    pub fn len(&self) -> usize {
        self.0.len()
    }

    /// Whether no term matched.
    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.0.is_empty()
    }

    /// Iterate terms in sorted order.
    pub fn iter(&self) -> impl Iterator<Item = &str> {
        self.0.iter().map(String::as_str)
    }
}

impl<S: Into<String>> FromIterator<S> for TermSet {
    fn from_iter<I: IntoIterator<Item = S>>(iter: I) -> Self {
        Self(iter.into_iter().map(Into::into).collect())
    }
}

impl fmt::Display for TermSet {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        if self.0.is_empty() {
            return write!(f, "{NONE_LABEL}");
        }
        let joined = self.iter().collect::<Vec<_>>().join(", ");
        write!(f, "{joined}")
    }
}

/// Enrichment outcome for one URL.
///
/// Every field has a defined default so a record is complete no matter how
/// many probe steps succeeded.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct SiteRecord {
    /// Probed URL, as harvested
    pub url: String,
    /// Host resolution outcome
    pub dns: DnsStatus,
    /// Certificate validation outcome
    pub ssl: SslStatus,
    /// HTTP status of the analysed response (0 = no response obtained)
    pub status_code: u16,
    /// A CDN signature appeared in a response header name or value
    pub cloudflare: bool,
    /// An anti-bot challenge marker appeared in the body
    pub captcha: bool,
    /// The body mentions GraphQL
    pub graphql: bool,
    /// Declared document language, or [`UNKNOWN_LANGUAGE`]
    pub language: String,
    /// Payment gateway terms found
    pub gateways: TermSet,
    /// Frontend framework terms found
    pub front_end: TermSet,
    /// Backend framework terms found
    pub back_end: TermSet,
    /// Design library terms found
    pub design: TermSet,
}

impl SiteRecord {
    /// Create a record for `url` with every field at its default.
    #[must_use]
    pub fn new(url: impl Into<String>) -> Self {
        Self {
            url: url.into(),
            dns: DnsStatus::default(),
            ssl: SslStatus::default(),
            status_code: 0,
            cloudflare: false,
            captcha: false,
            graphql: false,
            language: UNKNOWN_LANGUAGE.to_string(),
            gateways: TermSet::new(),
            front_end: TermSet::new(),
            back_end: TermSet::new(),
            design: TermSet::new(),
        }
    }

    /// `"YES"` or `"NO"` for the GraphQL field.
    #[must_use]
    pub fn graphql_label(&self) -> &'static str {
        if self.graphql {
            "YES"
        } else {
            "NO"
        }
    }
}
