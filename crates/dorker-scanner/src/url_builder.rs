use crate::error::{Result, ScanError};
use dorker_core::HarvestConfig;
use url::Url;

/// Result page URL for `query` starting at result offset `start`.
///
/// Requests `page_size` results per page with the locale pinned to the
/// configured language and region.
pub fn build_search_url(config: &HarvestConfig, query: &str, start: usize) -> Result<String> {
    let num = config.page_size.to_string();
    let start = start.to_string();

    let url = Url::parse_with_params(
        &config.search_url,
        &[
            ("q", query),
            ("num", num.as_str()),
            ("start", start.as_str()),
            ("hl", config.language.as_str()),
            ("gl", config.region.as_str()),
        ],
    )
    .map_err(|e| ScanError::InvalidSearchUrl {
        url: config.search_url.clone(),
        reason: e.to_string(),
    })?;

    Ok(url.into())
}
