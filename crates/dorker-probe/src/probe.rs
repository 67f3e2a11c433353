//! Single-URL enrichment.
//!
//! [`DetailProbe::probe`] runs DNS resolution, one HTTP fetch with a single
//! certificate fallback, and content heuristics. Every failure is absorbed
//! into the record's default field values.

use crate::dns::{host_of, HostResolver, SystemResolver};
use crate::error::Result;
use crate::fetch::{FetchedPage, PageFetcher, ReqwestFetcher, TlsMode};
use crate::signature::{declared_language, SignatureDetector};
use dorker_core::{DnsStatus, ProbeConfig, SiteRecord, SslStatus, Vocabulary};
use std::sync::Arc;

/// Probes one URL into a fully populated [`SiteRecord`].
#[derive(Clone)]
pub struct DetailProbe {
    fetcher: Arc<dyn PageFetcher>,
    resolver: Arc<dyn HostResolver>,
    detector: SignatureDetector,
}

impl DetailProbe {
    /// Assemble a probe from its collaborators.
    pub fn new(
        fetcher: Arc<dyn PageFetcher>,
        resolver: Arc<dyn HostResolver>,
        detector: SignatureDetector,
    ) -> Self {
        Self {
            fetcher,
            resolver,
            detector,
        }
    }

    /// Probe backed by reqwest and the system resolver.
    pub fn from_config(config: &ProbeConfig, vocabulary: Arc<Vocabulary>) -> Result<Self> {
        Ok(Self::new(
            Arc::new(ReqwestFetcher::new(config)?),
            Arc::new(SystemResolver),
            SignatureDetector::new(vocabulary),
        ))
    }

    /// Enrich `url`. Never fails.
    pub async fn probe(&self, url: &str) -> SiteRecord {
        let mut record = SiteRecord::new(url);

        if let Some(host) = host_of(url) {
            record.dns = match self.resolver.resolve(&host).await {
                Ok(()) => DnsStatus::Resolvable,
                Err(e) => {
                    tracing::debug!("{}", e);
                    DnsStatus::Unresolvable
                }
            };
        }

        let page = match self.fetcher.fetch(url, TlsMode::Verify).await {
            Ok(page) => {
                record.ssl = SslStatus::Valid;
                page
            }
            Err(e) if e.is_certificate() => {
                tracing::warn!("Certificate rejected for {}, retrying without validation: {}", url, e);
                record.ssl = SslStatus::Invalid;
                match self.fetcher.fetch(url, TlsMode::AcceptInvalid).await {
                    Ok(page) => page,
                    Err(e) => {
                        tracing::warn!("Fallback fetch of {} failed: {}", url, e);
                        return record;
                    }
                }
            }
            Err(e) => {
                tracing::warn!("Fetch of {} failed: {}", url, e);
                return record;
            }
        };

        self.analyse(&mut record, &page);
        tracing::debug!(
            "Probed {}: status={} dns={} ssl={}",
            url,
            record.status_code,
            record.dns,
            record.ssl
        );
        record
    }

    fn analyse(&self, record: &mut SiteRecord, page: &FetchedPage) {
        let lowered = page.body.to_lowercase();

        record.status_code = page.status;
        record.cloudflare = self.detector.behind_cdn(&page.headers);
        record.captcha = self.detector.has_captcha(&lowered);
        record.graphql = self.detector.uses_graphql(&lowered);
        record.language = declared_language(&page.body);

        let stack = self.detector.detect(&page.body);
        record.gateways = stack.gateways;
        record.front_end = stack.front_end;
        record.back_end = stack.back_end;
        record.design = stack.design;
    }
}
