use crate::error::{Result, ScanError};
use scraper::{Html, Selector};
use url::Url;

/// Extracts result links from a rendered search page
pub struct ResultParser {
    link_selector: Selector,
}

impl ResultParser {
    pub fn new(link_selector: &str) -> Result<Self> {
        let link_selector =
            Selector::parse(link_selector).map_err(|e| ScanError::SelectorsOutdated {
                reason: format!("Invalid result selector: {}", e),
            })?;

        Ok(Self { link_selector })
    }

    /// `href` of every matched anchor, in document order.
    ///
    /// No scheme filtering happens here; an empty result means the page had
    /// no results at all.
    pub fn extract_links(&self, html: &str) -> Vec<String> {
        let document = Html::parse_document(html);

        document
            .select(&self.link_selector)
            .filter_map(|el| el.value().attr("href"))
            .map(|href| href.trim().to_string())
            .filter(|href| !href.is_empty())
            .collect()
    }
}

/// Whether `link` is an absolute http(s) URL
#[must_use]
pub fn is_http_url(link: &str) -> bool {
    Url::parse(link).is_ok_and(|u| matches!(u.scheme(), "http" | "https") && u.has_host())
}
