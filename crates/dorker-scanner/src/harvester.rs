//! Paginated harvesting of search result URLs.
//!
//! This module provides the [`PaginatedHarvester`], which drives one
//! disposable browser session per result page and accumulates unique result
//! links in encounter order.

use crate::error::Result;
use crate::parser::{is_http_url, ResultParser};
use crate::url_builder::build_search_url;
use dorker_browser::{BrowserActions, ConsentHandler, SessionFactory};
use dorker_core::{HarvestConfig, PacingPolicy, HARD_PAGE_CEILING};
use std::collections::HashSet;
use std::time::Duration;

/// Number of result pages to request for `limit` results.
///
/// `ceil(limit / page_size)`, clamped to `max_pages` and never above
/// [`HARD_PAGE_CEILING`].
#[must_use]
pub fn pages_needed(limit: usize, page_size: usize, max_pages: usize) -> usize {
    if page_size == 0 {
        return 0;
    }
    limit
        .div_ceil(page_size)
        .min(max_pages)
        .min(HARD_PAGE_CEILING)
}

/// Harvests result URLs for a query across paginated search results.
pub struct PaginatedHarvester<F> {
    /// Opens one fresh browser session per page
    factory: F,
    /// Dismisses consent interstitials
    consent: ConsentHandler,
    /// Pulls result links out of a rendered page
    parser: ResultParser,
    config: HarvestConfig,
    pacing: PacingPolicy,
}

impl<F: SessionFactory> PaginatedHarvester<F> {
    /// Create a harvester.
    ///
    /// Fails only if the configured result selector does not parse.
    pub fn new(factory: F, config: HarvestConfig, pacing: PacingPolicy) -> Result<Self> {
        let parser = ResultParser::new(&config.result_selector)?;
        let consent = ConsentHandler::from_config(&config, &pacing);

        Ok(Self {
            factory,
            consent,
            parser,
            config,
            pacing,
        })
    }

    /// Collect up to `limit` unique result URLs for `query`, starting at
    /// result offset `offset`.
    ///
    /// Never fails: a page that cannot be fetched ends the harvest and the
    /// URLs gathered so far are returned. Order is encounter order across
    /// pages.
    pub async fn harvest(&self, query: &str, limit: usize, offset: usize) -> Vec<String> {
        let max_pages = pages_needed(limit, self.config.page_size, self.config.max_pages);
        let mut seen = HashSet::new();
        let mut links = Vec::new();

        tracing::info!(
            "Harvesting query={:?} limit={} offset={} (up to {} pages)",
            query,
            limit,
            offset,
            max_pages
        );

        for page_index in 0..max_pages {
            let start = offset.saturating_add(page_index.saturating_mul(self.config.page_size));

            let page_links = match self.fetch_page(query, start).await {
                Ok(page_links) => page_links,
                Err(e) => {
                    tracing::error!(
                        "Harvest aborted on page {} (start={}): {}",
                        page_index,
                        start,
                        e
                    );
                    break;
                }
            };

            if page_links.is_empty() {
                tracing::info!("No results on page {}, stopping", page_index);
                break;
            }

            let found = page_links.len();
            for link in page_links.into_iter().filter(|l| is_http_url(l)) {
                if seen.insert(link.clone()) {
                    links.push(link);
                }
                if links.len() >= limit {
                    break;
                }
            }

            tracing::info!(
                "Found {} links on page {}, accumulated {}",
                found,
                page_index,
                links.len()
            );

            if links.len() >= limit {
                break;
            }

            if page_index + 1 < max_pages {
                sleep_unless_zero(self.pacing.inter_page).await;
            }
        }

        links.truncate(limit);
        links
    }

    /// Fetch one result page in its own session.
    ///
    /// The session is closed before returning, whether or not the fetch
    /// succeeded.
    async fn fetch_page(&self, query: &str, start: usize) -> Result<Vec<String>> {
        let url = build_search_url(&self.config, query, start)?;
        let session = self.factory.open().await?;

        let result = self.scrape(&session, &url).await;

        if let Err(e) = session.close().await {
            tracing::warn!("Failed to close browser session: {}", e);
        }

        result
    }

    async fn scrape(&self, session: &F::Session, url: &str) -> Result<Vec<String>> {
        tracing::info!("Navigating to: {}", url);
        session.navigate(url).await?;

        self.consent.dismiss(session).await;
        sleep_unless_zero(self.pacing.render_settle).await;

        let html = session.content().await?;
        Ok(self.parser.extract_links(&html))
    }
}

async fn sleep_unless_zero(delay: Duration) {
    if !delay.is_zero() {
        tokio::time::sleep(delay).await;
    }
}
