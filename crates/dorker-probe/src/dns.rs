//! Host resolution.

use crate::error::{ProbeError, Result};
use async_trait::async_trait;
use url::Url;

/// Resolves host names to addresses.
#[async_trait]
pub trait HostResolver: Send + Sync {
    /// Succeeds if `host` resolves to at least one address.
    async fn resolve(&self, host: &str) -> Result<()>;
}

/// Resolver backed by the operating system.
#[derive(Debug, Clone, Copy, Default)]
pub struct SystemResolver;

#[async_trait]
impl HostResolver for SystemResolver {
    async fn resolve(&self, host: &str) -> Result<()> {
        let mut addrs = tokio::net::lookup_host((host, 0))
            .await
            .map_err(|e| ProbeError::Dns {
                host: host.to_string(),
                reason: e.to_string(),
            })?;

        if addrs.next().is_none() {
            return Err(ProbeError::Dns {
                host: host.to_string(),
                reason: "no addresses returned".to_string(),
            });
        }
        Ok(())
    }
}

/// Host component of `url`, if it has one.
pub fn host_of(url: &str) -> Option<String> {
    let parsed = Url::parse(url).ok()?;
    let host = parsed.host_str()?;
    if host.is_empty() {
        return None;
    }
    // Bracketed IPv6 literals resolve without the brackets
    Some(host.trim_start_matches('[').trim_end_matches(']').to_string())
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_host_of() {
        assert_eq!(
            host_of("https://shop.example.com/path?q=1").as_deref(),
            Some("shop.example.com")
        );
        assert_eq!(
            host_of("http://user:pw@example.org:8080/").as_deref(),
            Some("example.org")
        );
        assert_eq!(host_of("http://[::1]:8080/").as_deref(), Some("::1"));
    }

    #[test]
    fn test_host_of_without_host() {
        assert_eq!(host_of("not a url"), None);
        assert_eq!(host_of("mailto:someone@example.com"), None);
        assert_eq!(host_of("/relative/path"), None);
    }

    #[tokio::test]
    async fn test_resolve_localhost() {
        assert!(SystemResolver.resolve("localhost").await.is_ok());
    }

    #[tokio::test]
    async fn test_resolve_reserved_tld_fails() {
        let err = SystemResolver
            .resolve("nonexistent.invalid")
            .await
            .expect_err("reserved TLD must not resolve");
        assert!(matches!(err, ProbeError::Dns { .. }));
    }
}
