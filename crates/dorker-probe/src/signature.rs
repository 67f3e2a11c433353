//! Heuristic technology detection by substring containment.
//!
//! A term matches if it occurs anywhere in the lowercased body, including
//! inside longer tokens. No markup is parsed.

use dorker_core::{TermSet, Vocabulary, UNKNOWN_LANGUAGE};
use regex::Regex;
use std::sync::{Arc, OnceLock};

/// Technology sets detected on one page.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct TechStack {
    /// Payment gateway terms
    pub gateways: TermSet,
    /// Frontend framework terms
    pub front_end: TermSet,
    /// Backend framework terms
    pub back_end: TermSet,
    /// Design library terms
    pub design: TermSet,
}

/// Classifies page bodies against a read-only [`Vocabulary`].
#[derive(Debug, Clone)]
pub struct SignatureDetector {
    vocabulary: Arc<Vocabulary>,
}

impl SignatureDetector {
    /// Create a detector over `vocabulary`.
    #[must_use]
    pub fn new(vocabulary: Arc<Vocabulary>) -> Self {
        Self { vocabulary }
    }

    /// Terms from `terms` that occur in `body_lowercased`.
    ///
    /// `body_lowercased` must already be lowercase; terms are lowercased here
    /// and reported as configured.
    #[must_use]
    pub fn classify<S: AsRef<str>>(body_lowercased: &str, terms: &[S]) -> TermSet {
        terms
            .iter()
            .map(|term| term.as_ref())
            .filter(|term| !term.is_empty() && body_lowercased.contains(&term.to_lowercase()))
            .collect()
    }

    /// Whether any of `terms` occurs in `body_lowercased`.
    #[must_use]
    pub fn contains_any<S: AsRef<str>>(body_lowercased: &str, terms: &[S]) -> bool {
        terms.iter().map(|term| term.as_ref()).any(|term| {
            !term.is_empty() && body_lowercased.contains(&term.to_lowercase())
        })
    }

    /// Run all four technology vocabularies over `body`.
    #[must_use]
    pub fn detect(&self, body: &str) -> TechStack {
        let lowered = body.to_lowercase();
        TechStack {
            gateways: Self::classify(&lowered, &self.vocabulary.payment_gateways),
            front_end: Self::classify(&lowered, &self.vocabulary.front_end),
            back_end: Self::classify(&lowered, &self.vocabulary.back_end),
            design: Self::classify(&lowered, &self.vocabulary.design),
        }
    }

    /// Whether any header name or value mentions a CDN signature.
    #[must_use]
    pub fn behind_cdn(&self, headers: &[(String, String)]) -> bool {
        headers.iter().any(|(name, value)| {
            Self::contains_any(&name.to_lowercase(), &self.vocabulary.cdn_signatures)
                || Self::contains_any(&value.to_lowercase(), &self.vocabulary.cdn_signatures)
        })
    }

    /// Whether the lowercased body carries an anti-bot challenge marker.
    #[must_use]
    pub fn has_captcha(&self, body_lowercased: &str) -> bool {
        Self::contains_any(body_lowercased, &self.vocabulary.captcha_markers)
    }

    /// Whether the lowercased body mentions GraphQL.
    #[must_use]
    pub fn uses_graphql(&self, body_lowercased: &str) -> bool {
        Self::contains_any(body_lowercased, &self.vocabulary.graphql_markers)
    }
}

fn lang_pattern() -> &'static Regex {
    static PATTERN: OnceLock<Regex> = OnceLock::new();
    PATTERN.get_or_init(|| {
        Regex::new(r#"(?i)<html[^>]*\slang=['"]([^'"]+)['"]"#).expect("valid lang regex")
    })
}

/// Language declared on the root `<html>` tag, or `"unknown"`.
#[must_use]
pub fn declared_language(html: &str) -> String {
    lang_pattern()
        .captures(html)
        .and_then(|caps| caps.get(1))
        .map_or_else(|| UNKNOWN_LANGUAGE.to_string(), |m| m.as_str().to_string())
}
