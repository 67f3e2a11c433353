//! Certificate handling against a local TLS server with a self-signed
//! certificate.

use dorker_core::{ProbeConfig, SslStatus, Vocabulary};
use dorker_probe::{
    DetailProbe, PageFetcher, ProbeError, ReqwestFetcher, SignatureDetector, SystemResolver,
    TlsMode,
};
use rustls::pki_types::{CertificateDer, PrivateKeyDer, PrivatePkcs8KeyDer};
use std::io::{Read, Write};
use std::net::SocketAddr;
use std::sync::Arc;
use std::time::Duration;

const CERT_DER: &[u8] = include_bytes!("fixtures/self_signed_cert.der");
const KEY_DER: &[u8] = include_bytes!("fixtures/self_signed_key.der");

const BODY: &str = "<html lang=\"pt\">loja powered by shopify</html>";

fn server_config() -> Arc<rustls::ServerConfig> {
    let cert = CertificateDer::from(CERT_DER.to_vec());
    let key = PrivateKeyDer::Pkcs8(PrivatePkcs8KeyDer::from(KEY_DER.to_vec()));
    let config = rustls::ServerConfig::builder_with_provider(Arc::new(
        rustls::crypto::ring::default_provider(),
    ))
    .with_safe_default_protocol_versions()
    .expect("protocol versions")
    .with_no_client_auth()
    .with_single_cert(vec![cert], key)
    .expect("server certificate");
    Arc::new(config)
}

fn has_full_head(request: &[u8]) -> bool {
    request.windows(4).any(|w| w == b"\r\n\r\n")
}

/// Serve `connections` TLS connections, answering each complete request
/// with [`BODY`]. Handshakes the client aborts are skipped.
fn spawn_tls_server(connections: usize) -> SocketAddr {
    let config = server_config();
    let listener = std::net::TcpListener::bind("127.0.0.1:0").expect("bind");
    let addr = listener.local_addr().expect("local addr");

    std::thread::spawn(move || {
        for stream in listener.incoming().take(connections) {
            let Ok(stream) = stream else { continue };
            let _ = stream.set_read_timeout(Some(Duration::from_secs(5)));
            let Ok(conn) = rustls::ServerConnection::new(Arc::clone(&config)) else {
                continue;
            };
            let mut tls = rustls::StreamOwned::new(conn, stream);

            let mut request = Vec::new();
            let mut buf = [0u8; 1024];
            while !has_full_head(&request) {
                match tls.read(&mut buf) {
                    Ok(0) | Err(_) => break,
                    Ok(n) => request.extend_from_slice(&buf[..n]),
                }
            }
            if !has_full_head(&request) {
                continue;
            }

            let response = format!(
                "HTTP/1.1 200 OK\r\nServer: cloudflare\r\nContent-Length: {}\r\nConnection: close\r\n\r\n{}",
                BODY.len(),
                BODY
            );
            let _ = tls.write_all(response.as_bytes());
            tls.conn.send_close_notify();
            let _ = tls.flush();
        }
    });

    addr
}

fn fetcher() -> ReqwestFetcher {
    ReqwestFetcher::new(&ProbeConfig::default()).expect("client builds")
}

fn live_detail() -> DetailProbe {
    DetailProbe::new(
        Arc::new(fetcher()),
        Arc::new(SystemResolver),
        SignatureDetector::new(Arc::new(Vocabulary::default())),
    )
}

#[tokio::test]
async fn test_self_signed_certificate_is_classified_as_certificate_error() {
    let addr = spawn_tls_server(2);
    let url = format!("https://{addr}/");
    let fetcher = fetcher();

    let err = fetcher
        .fetch(&url, TlsMode::Verify)
        .await
        .expect_err("self-signed certificate must be rejected");
    assert!(matches!(err, ProbeError::Certificate(_)), "got {err:?}");

    let page = fetcher
        .fetch(&url, TlsMode::AcceptInvalid)
        .await
        .expect("unverified fetch succeeds");
    assert_eq!(page.status, 200);
    assert_eq!(page.body, BODY);
}

#[tokio::test]
async fn test_self_signed_site_falls_back_once_and_is_analysed() {
    let addr = spawn_tls_server(2);

    let record = live_detail().probe(&format!("https://{addr}/")).await;

    assert_eq!(record.ssl, SslStatus::Invalid);
    assert_eq!(record.status_code, 200);
    assert!(record.cloudflare);
    assert_eq!(record.language, "pt");
    assert!(record.gateways.contains("shopify"));
}

#[tokio::test]
async fn test_refused_url_mentioning_certificates_is_not_a_certificate_error() {
    let listener = std::net::TcpListener::bind("127.0.0.1:0").expect("bind");
    let addr = listener.local_addr().expect("local addr");
    drop(listener);
    let url = format!("http://{addr}/gift-certificates");

    let err = fetcher()
        .fetch(&url, TlsMode::Verify)
        .await
        .expect_err("nothing is listening");
    assert!(matches!(err, ProbeError::Request(_)), "got {err:?}");

    let record = live_detail().probe(&url).await;
    assert_eq!(record.ssl, SslStatus::NotApplicable);
    assert_eq!(record.status_code, 0);
}
