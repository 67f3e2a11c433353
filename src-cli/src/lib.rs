pub mod args;
pub mod report;

use anyhow::{Context, Result};
use args::Args;
use dorker_browser::{ChromiumSessionFactory, SessionConfig};
use dorker_core::AppConfig;
use dorker_probe::{DetailProbe, ProbeCoordinator};
use dorker_scanner::PaginatedHarvester;
use std::path::PathBuf;
use std::sync::Arc;
use tracing::info;

fn init_tracing() {
    use tracing_subscriber::{fmt, prelude::*, EnvFilter};

    let filter =
        EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("info,dorker=debug"));

    tracing_subscriber::registry()
        .with(fmt::layer().with_target(true).with_writer(std::io::stderr))
        .with(filter)
        .init();
}

/// Load configuration, either from an explicit file or from the default
/// location with environment overrides, and reject invalid values.
pub fn load_config(explicit: Option<&std::path::Path>) -> Result<AppConfig> {
    let config = match explicit {
        Some(path) => {
            let mut config = AppConfig::load_from(path)
                .with_context(|| format!("Failed to load config from {}", path.display()))?;
            config.apply_env_overrides(|key| std::env::var(key).ok());
            config
        }
        None => AppConfig::load_with_env().context("Failed to load config")?,
    };

    config.validate().context("Invalid configuration")?;
    Ok(config)
}

/// Harvest, enrich and write the report.
///
/// Returns the report path, or `None` when the harvest found nothing.
pub async fn execute(args: &Args, config: AppConfig) -> Result<Option<PathBuf>> {
    let limit = args.limit();
    info!(
        "Searching for up to {} results for {:?} (offset {})",
        limit, args.query, args.offset
    );

    let factory = ChromiumSessionFactory::new(SessionConfig::from(&config.browser));
    let harvester = PaginatedHarvester::new(factory, config.harvest.clone(), config.pacing.policy())
        .context("Failed to set up harvester")?;

    let urls = harvester.harvest(&args.query, limit, args.offset).await;
    if urls.is_empty() {
        return Ok(None);
    }
    info!("Harvested {} URLs", urls.len());

    let probe = DetailProbe::from_config(&config.probe, Arc::new(config.vocabulary.clone()))
        .context("Failed to set up probe")?;
    let coordinator =
        ProbeCoordinator::new(Arc::new(probe)).with_max_concurrent(config.probe.concurrency);
    let records = coordinator.enrich_all(&urls).await;

    let dir = args.output.clone().unwrap_or_else(|| PathBuf::from("."));
    let path = report::write_report(&dir, &records, args.format, chrono::Utc::now().timestamp())?;
    Ok(Some(path))
}

/// Entry point for the `dorker` binary.
pub async fn run(args: Args) -> Result<()> {
    init_tracing();

    info!("Starting Dorker v{}", env!("CARGO_PKG_VERSION"));

    let config = load_config(args.config.as_deref())?;

    match execute(&args, config).await? {
        Some(path) => println!("{}", path.display()),
        None => println!("No results found"),
    }
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;
    use tempfile::TempDir;

    #[test]
    fn test_load_config_from_explicit_file() {
        let dir = TempDir::new().expect("temp dir");
        let path = dir.path().join("config.toml");
        std::fs::write(&path, "[probe]\nconcurrency = 1\n").expect("write config");

        let config = load_config(Some(&path)).expect("config loads");
        assert_eq!(config.probe.concurrency, 1);
    }

    #[test]
    fn test_load_config_missing_explicit_file() {
        let dir = TempDir::new().expect("temp dir");
        assert!(load_config(Some(&dir.path().join("missing.toml"))).is_err());
    }

    #[test]
    fn test_load_config_rejects_invalid_values() {
        let dir = TempDir::new().expect("temp dir");
        let path = dir.path().join("config.toml");
        std::fs::write(&path, "[harvest]\npage_size = 0\n").expect("write config");

        let err = load_config(Some(&path)).expect_err("zero page size is invalid");
        assert!(format!("{err:#}").contains("page_size"));
    }
}
