//! HTTP fetching with a switchable certificate policy.

use crate::error::{ProbeError, Result};
use async_trait::async_trait;
use dorker_core::ProbeConfig;
use std::error::Error as StdError;

/// Certificate validation policy for one fetch.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum TlsMode {
    /// Full certificate validation
    Verify,
    /// Accept any certificate
    AcceptInvalid,
}

/// Response data the probe analyses.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct FetchedPage {
    /// HTTP status code
    pub status: u16,
    /// Header names and values, in response order
    pub headers: Vec<(String, String)>,
    /// Decoded body
    pub body: String,
}

/// Fetches a URL under a given certificate policy.
#[async_trait]
pub trait PageFetcher: Send + Sync {
    /// GET `url`.
    ///
    /// A certificate validation failure must be reported as
    /// [`ProbeError::Certificate`] so the caller can decide to retry.
    async fn fetch(&self, url: &str, tls: TlsMode) -> Result<FetchedPage>;
}

/// [`PageFetcher`] over two reqwest clients, one per [`TlsMode`].
pub struct ReqwestFetcher {
    strict: reqwest::Client,
    insecure: reqwest::Client,
}

impl ReqwestFetcher {
    /// Build both clients with the configured timeout and user agent.
    pub fn new(config: &ProbeConfig) -> Result<Self> {
        let build = |accept_invalid: bool| {
            reqwest::Client::builder()
                .user_agent(config.user_agent.as_str())
                .timeout(config.timeout())
                .danger_accept_invalid_certs(accept_invalid)
                .build()
                .map_err(|e| ProbeError::Client(e.to_string()))
        };

        Ok(Self {
            strict: build(false)?,
            insecure: build(true)?,
        })
    }

    fn client(&self, tls: TlsMode) -> &reqwest::Client {
        match tls {
            TlsMode::Verify => &self.strict,
            TlsMode::AcceptInvalid => &self.insecure,
        }
    }
}

#[async_trait]
impl PageFetcher for ReqwestFetcher {
    async fn fetch(&self, url: &str, tls: TlsMode) -> Result<FetchedPage> {
        let response = self
            .client(tls)
            .get(url)
            .send()
            .await
            .map_err(classify_error)?;

        let status = response.status().as_u16();
        let headers = response
            .headers()
            .iter()
            .map(|(name, value)| {
                (
                    name.as_str().to_string(),
                    String::from_utf8_lossy(value.as_bytes()).into_owned(),
                )
            })
            .collect();

        let body = match response.text().await {
            Ok(body) => body,
            Err(e) => {
                tracing::warn!("Failed to read body of {}: {}", url, e);
                String::new()
            }
        };

        Ok(FetchedPage {
            status,
            headers,
            body,
        })
    }
}

fn classify_error(err: reqwest::Error) -> ProbeError {
    if is_certificate_error(&err) {
        ProbeError::Certificate(error_chain(&err))
    } else {
        ProbeError::Request(error_chain(&err))
    }
}

/// Whether the source chain contains a rustls certificate rejection.
///
/// TLS handshake failures reach reqwest as an `io::Error` wrapping the
/// `rustls::Error`, and `io::Error::source` skips the wrapped error, so
/// both shapes are checked at every level.
pub fn is_certificate_error(err: &(dyn StdError + 'static)) -> bool {
    let mut current = Some(err);
    while let Some(e) = current {
        if is_rustls_certificate_error(e) {
            return true;
        }
        let wrapped = e
            .downcast_ref::<std::io::Error>()
            .and_then(std::io::Error::get_ref)
            .map(|inner| inner as &(dyn StdError + 'static));
        if wrapped.is_some_and(|inner| is_rustls_certificate_error(inner)) {
            return true;
        }
        current = e.source();
    }
    false
}

fn is_rustls_certificate_error(err: &(dyn StdError + 'static)) -> bool {
    matches!(
        err.downcast_ref::<rustls::Error>(),
        Some(rustls::Error::InvalidCertificate(_))
    )
}

fn error_chain(err: &(dyn StdError + 'static)) -> String {
    let mut parts = vec![err.to_string()];
    let mut current = err.source();
    while let Some(e) = current {
        parts.push(e.to_string());
        current = e.source();
    }
    parts.join(": ")
}

#[cfg(test)]
mod tests {
    use super::*;
    use tokio::io::{AsyncReadExt, AsyncWriteExt};
    use tokio::net::TcpListener;

    #[test]
    fn test_rustls_rejection_inside_io_error() {
        let err = std::io::Error::new(
            std::io::ErrorKind::InvalidData,
            rustls::Error::InvalidCertificate(rustls::CertificateError::UnknownIssuer),
        );
        assert!(is_certificate_error(&err));
    }

    #[test]
    fn test_bare_rustls_rejection() {
        let err = rustls::Error::InvalidCertificate(rustls::CertificateError::Expired);
        assert!(is_certificate_error(&err));
    }

    #[test]
    fn test_certificate_in_message_is_not_a_rejection() {
        let err = std::io::Error::new(
            std::io::ErrorKind::ConnectionRefused,
            "connect to /gift-certificates refused: invalid peer certificate",
        );
        assert!(!is_certificate_error(&err));
    }

    #[test]
    fn test_other_tls_errors_are_not_certificate_errors() {
        let err = std::io::Error::new(
            std::io::ErrorKind::InvalidData,
            rustls::Error::DecryptError,
        );
        assert!(!is_certificate_error(&err));
    }

    #[test]
    fn test_error_chain_joins_sources() {
        let err = std::io::Error::other("outer");
        assert_eq!(error_chain(&err), "outer");
    }

    #[tokio::test]
    async fn test_fetch_reads_status_headers_and_body() {
        let listener = TcpListener::bind("127.0.0.1:0").await.expect("bind");
        let addr = listener.local_addr().expect("local addr");

        tokio::spawn(async move {
            let (mut socket, _) = listener.accept().await.expect("accept");
            let mut buf = [0u8; 1024];
            let _ = socket.read(&mut buf).await;
            let body = "<html lang=\"de\">hi</html>";
            let response = format!(
                "HTTP/1.1 404 Not Found\r\nServer: cloudflare\r\nContent-Length: {}\r\nConnection: close\r\n\r\n{}",
                body.len(),
                body
            );
            let _ = socket.write_all(response.as_bytes()).await;
        });

        let fetcher = ReqwestFetcher::new(&ProbeConfig::default()).expect("client builds");
        let page = fetcher
            .fetch(&format!("http://{addr}/"), TlsMode::Verify)
            .await
            .expect("fetch succeeds");

        assert_eq!(page.status, 404);
        assert!(page
            .headers
            .iter()
            .any(|(name, value)| name == "server" && value == "cloudflare"));
        assert_eq!(page.body, "<html lang=\"de\">hi</html>");
    }

    #[tokio::test]
    async fn test_fetch_connection_refused_is_request_error() {
        let listener = TcpListener::bind("127.0.0.1:0").await.expect("bind");
        let addr = listener.local_addr().expect("local addr");
        drop(listener);

        let fetcher = ReqwestFetcher::new(&ProbeConfig::default()).expect("client builds");
        let err = fetcher
            .fetch(&format!("http://{addr}/gift-certificates"), TlsMode::Verify)
            .await
            .expect_err("nothing is listening");

        assert!(matches!(err, ProbeError::Request(_)));
    }
}
