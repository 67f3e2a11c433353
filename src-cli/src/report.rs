//! Report rendering and output.

use crate::args::ReportFormat;
use anyhow::{Context, Result};
use dorker_core::SiteRecord;
use std::fmt::Write as _;
use std::path::{Path, PathBuf};

const SEPARATOR: &str = "----------------------------------------";

fn flag(value: bool) -> &'static str {
    if value {
        "✅ YES"
    } else {
        "🔥 NO"
    }
}

/// One text block per record, each followed by a separator line.
pub fn render_text(records: &[SiteRecord]) -> String {
    let mut out = String::new();
    for r in records {
        // Writing to a String cannot fail
        let _ = write!(
            out,
            "URL: {}\n\
             DNS: {}\n\
             SSL: {}\n\
             Status: {}\n\
             Cloudflare: {}\n\
             Captcha: {}\n\
             Gateways: {}\n\
             GraphQL: {}\n\
             Language: {}\n\
             Front-end: {}\n\
             Back-end: {}\n\
             Design: {}\n\
             \n\
             {}\n",
            r.url,
            r.dns,
            r.ssl,
            r.status_code,
            flag(r.cloudflare),
            flag(r.captcha),
            r.gateways,
            r.graphql_label(),
            r.language,
            r.front_end,
            r.back_end,
            r.design,
            SEPARATOR,
        );
    }
    out
}

pub fn render(records: &[SiteRecord], format: ReportFormat) -> Result<String> {
    match format {
        ReportFormat::Text => Ok(render_text(records)),
        ReportFormat::Json => {
            serde_json::to_string_pretty(records).context("Failed to serialize records")
        }
    }
}

/// `results_<unix timestamp>.<ext>` under `dir`.
pub fn report_path(dir: &Path, timestamp: i64, format: ReportFormat) -> PathBuf {
    dir.join(format!("results_{timestamp}.{}", format.extension()))
}

/// Render `records` and write them to a timestamped file in `dir`.
pub fn write_report(
    dir: &Path,
    records: &[SiteRecord],
    format: ReportFormat,
    timestamp: i64,
) -> Result<PathBuf> {
    let path = report_path(dir, timestamp, format);
    let body = render(records, format)?;
    std::fs::write(&path, body)
        .with_context(|| format!("Failed to write report to {}", path.display()))?;
    Ok(path)
}

#[cfg(test)]
mod tests {
    use super::*;
    use dorker_core::{DnsStatus, SslStatus, TermSet};
    use tempfile::TempDir;

    fn probed() -> SiteRecord {
        SiteRecord {
            dns: DnsStatus::Resolvable,
            ssl: SslStatus::Invalid,
            status_code: 200,
            cloudflare: true,
            captcha: false,
            graphql: true,
            language: "en".to_string(),
            gateways: ["stripe", "paypal"].into_iter().collect::<TermSet>(),
            front_end: ["react"].into_iter().collect(),
            ..SiteRecord::new("https://shop.example.com/")
        }
    }

    #[test]
    fn test_render_text_block() {
        let text = render_text(&[probed()]);
        let expected = "URL: https://shop.example.com/\n\
                        DNS: resolvable\n\
                        SSL: invalid\n\
                        Status: 200\n\
                        Cloudflare: ✅ YES\n\
                        Captcha: 🔥 NO\n\
                        Gateways: paypal, stripe\n\
                        GraphQL: YES\n\
                        Language: en\n\
                        Front-end: react\n\
                        Back-end: None\n\
                        Design: None\n\
                        \n\
                        ----------------------------------------\n";
        assert_eq!(text, expected);
    }

    #[test]
    fn test_render_text_defaults() {
        let text = render_text(&[SiteRecord::new("https://down.example.com/")]);
        assert!(text.contains("DNS: N/A\n"));
        assert!(text.contains("SSL: N/A\n"));
        assert!(text.contains("Status: 0\n"));
        assert!(text.contains("GraphQL: NO\n"));
        assert!(text.contains("Language: unknown\n"));
        assert!(text.contains("Gateways: None\n"));
    }

    #[test]
    fn test_render_text_keeps_record_order() {
        let text = render_text(&[
            SiteRecord::new("https://b.example.com/"),
            SiteRecord::new("https://a.example.com/"),
        ]);
        let b = text.find("https://b.example.com/").expect("b present");
        let a = text.find("https://a.example.com/").expect("a present");
        assert!(b < a);
        assert_eq!(text.matches(SEPARATOR).count(), 2);
    }

    #[test]
    fn test_render_json() {
        let json = render(&[probed()], ReportFormat::Json).expect("serializes");
        let value: serde_json::Value = serde_json::from_str(&json).expect("valid JSON");
        assert_eq!(value[0]["url"], "https://shop.example.com/");
        assert_eq!(value[0]["ssl"], "invalid");
        assert_eq!(value[0]["gateways"][0], "paypal");
    }

    #[test]
    fn test_write_report() {
        let dir = TempDir::new().expect("temp dir");
        let path = write_report(dir.path(), &[probed()], ReportFormat::Text, 1_700_000_000)
            .expect("report written");

        assert_eq!(path, dir.path().join("results_1700000000.txt"));
        let content = std::fs::read_to_string(&path).expect("readable");
        assert!(content.starts_with("URL: https://shop.example.com/\n"));
    }

    #[test]
    fn test_write_report_missing_dir() {
        let dir = TempDir::new().expect("temp dir");
        let missing = dir.path().join("nope");
        assert!(write_report(&missing, &[], ReportFormat::Json, 1).is_err());
    }
}
