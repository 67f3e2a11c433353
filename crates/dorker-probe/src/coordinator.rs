//! Bounded-concurrency enrichment of a harvested URL list.

use crate::probe::DetailProbe;
use dorker_core::SiteRecord;
use futures::stream::{FuturesUnordered, StreamExt};
use std::sync::Arc;

/// Default number of probes in flight at once.
pub const DEFAULT_MAX_CONCURRENT: usize = 5;

/// Runs [`DetailProbe`] over many URLs, preserving input order.
pub struct ProbeCoordinator {
    probe: Arc<DetailProbe>,
    max_concurrent: usize,
}

impl ProbeCoordinator {
    /// Create a coordinator with [`DEFAULT_MAX_CONCURRENT`] slots.
    #[must_use]
    pub fn new(probe: Arc<DetailProbe>) -> Self {
        Self {
            probe,
            max_concurrent: DEFAULT_MAX_CONCURRENT,
        }
    }

    /// Set the number of probes in flight. `1` probes strictly in order.
    #[must_use]
    pub fn with_max_concurrent(mut self, max: usize) -> Self {
        self.max_concurrent = max.max(1);
        self
    }

    /// Configured concurrency bound.
    #[must_use]
    pub fn max_concurrent(&self) -> usize {
        self.max_concurrent
    }

    /// One record per URL, in input order regardless of completion order.
    pub async fn enrich_all(&self, urls: &[String]) -> Vec<SiteRecord> {
        let mut slots: Vec<Option<SiteRecord>> = vec![None; urls.len()];
        let mut futures = FuturesUnordered::new();

        tracing::info!(
            "Probing {} URLs ({} concurrent)",
            urls.len(),
            self.max_concurrent
        );

        for (index, url) in urls.iter().enumerate() {
            let probe = Arc::clone(&self.probe);
            let url = url.clone();
            futures.push(async move {
                let handle = tokio::spawn({
                    let url = url.clone();
                    async move { probe.probe(&url).await }
                });
                let record = match handle.await {
                    Ok(record) => record,
                    Err(e) => {
                        tracing::error!("Probe task for {} failed: {}", url, e);
                        SiteRecord::new(url)
                    }
                };
                (index, record)
            });

            // Respect concurrency limit
            while futures.len() >= self.max_concurrent {
                if let Some((index, record)) = futures.next().await {
                    slots[index] = Some(record);
                }
            }
        }

        while let Some((index, record)) = futures.next().await {
            slots[index] = Some(record);
        }

        slots
            .into_iter()
            .zip(urls)
            .map(|(slot, url)| slot.unwrap_or_else(|| SiteRecord::new(url.as_str())))
            .collect()
    }
}
