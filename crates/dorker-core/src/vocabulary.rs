//! Technology signature vocabularies.
//!
//! Loaded once with the rest of [`AppConfig`](crate::AppConfig) and shared
//! read-only afterwards. Tests can substitute smaller lists.

use serde::{Deserialize, Serialize};

const PAYMENT_GATEWAYS: &[&str] = &[
    "paypal",
    "stripe",
    "braintree",
    "square",
    "magento",
    "avs",
    "convergepay",
    "paysimple",
    "oceanpayments",
    "eprocessing",
    "hipay",
    "worldpay",
    "cybersource",
    "payjunction",
    "authorize.net",
    "2checkout",
    "adyen",
    "checkout.com",
    "payflow",
    "payeezy",
    "usaepay",
    "creo",
    "squareup",
    "authnet",
    "ebizcharge",
    "cpay",
    "moneris",
    "recurly",
    "cardknox",
    "chargify",
    "paytrace",
    "hostedpayments",
    "securepay",
    "eway",
    "blackbaud",
    "lawpay",
    "clover",
    "cardconnect",
    "bluepay",
    "fluidpay",
    "rocketgateway",
    "rocketgate",
    "shopify",
    "woocommerce",
    "bigcommerce",
    "opencart",
    "prestashop",
    "razorpay",
];

const FRONTEND_FRAMEWORKS: &[&str] = &["react", "angular", "vue", "svelte"];

const BACKEND_FRAMEWORKS: &[&str] = &[
    "wordpress",
    "laravel",
    "django",
    "node.js",
    "express",
    "ruby on rails",
    "flask",
    "php",
    "asp.net",
    "spring",
];

const DESIGN_LIBRARIES: &[&str] = &["bootstrap", "tailwind", "bulma", "foundation", "materialize"];

const CDN_SIGNATURES: &[&str] = &["cloudflare"];

const CAPTCHA_MARKERS: &[&str] = &["captcha", "recaptcha"];

const GRAPHQL_MARKERS: &[&str] = &["graphql"];

/// Term lists the probe matches page content against.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct Vocabulary {
    /// Payment gateway and storefront platform terms
    pub payment_gateways: Vec<String>,
    /// Frontend framework terms
    pub front_end: Vec<String>,
    /// Backend framework terms
    pub back_end: Vec<String>,
    /// CSS / design library terms
    pub design: Vec<String>,
    /// Terms that mark a CDN / anti-bot proxy in response headers
    pub cdn_signatures: Vec<String>,
    /// Terms that mark an anti-bot challenge in the body
    pub captcha_markers: Vec<String>,
    /// Terms that mark GraphQL usage in the body
    pub graphql_markers: Vec<String>,
}

fn owned(terms: &[&str]) -> Vec<String> {
    terms.iter().map(|t| (*t).to_string()).collect()
}

impl Default for Vocabulary {
    fn default() -> Self {
        Self {
            payment_gateways: owned(PAYMENT_GATEWAYS),
            front_end: owned(FRONTEND_FRAMEWORKS),
            back_end: owned(BACKEND_FRAMEWORKS),
            design: owned(DESIGN_LIBRARIES),
            cdn_signatures: owned(CDN_SIGNATURES),
            captcha_markers: owned(CAPTCHA_MARKERS),
            graphql_markers: owned(GRAPHQL_MARKERS),
        }
    }
}

impl Vocabulary {
    /// A vocabulary with every list empty.
    #[must_use]
    pub fn empty() -> Self {
        Self {
            payment_gateways: Vec::new(),
            front_end: Vec::new(),
            back_end: Vec::new(),
            design: Vec::new(),
            cdn_signatures: Vec::new(),
            captcha_markers: Vec::new(),
            graphql_markers: Vec::new(),
        }
    }

    /// Drop blank entries. Matching is case-insensitive so case is kept as
    /// configured for display.
    #[must_use]
    pub fn cleaned(mut self) -> Self {
        for list in [
            &mut self.payment_gateways,
            &mut self.front_end,
            &mut self.back_end,
            &mut self.design,
            &mut self.cdn_signatures,
            &mut self.captcha_markers,
            &mut self.graphql_markers,
        ] {
            list.retain(|term| !term.trim().is_empty());
        }
        self
    }
}
