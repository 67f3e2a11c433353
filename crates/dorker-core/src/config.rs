//! Configuration management for dorker.
//!
//! Provides TOML-based configuration with XDG-compliant paths and
//! environment variable overrides.

use crate::error::{ConfigError, ConfigResult};
use crate::vocabulary::Vocabulary;
use directories::ProjectDirs;
use serde::{Deserialize, Serialize};
use std::fs;
use std::path::{Path, PathBuf};
use std::time::Duration;

/// Upper bound on result pages fetched by one harvest, whatever the
/// configured `max_pages`.
pub const HARD_PAGE_CEILING: usize = 10;

/// Main application configuration.
///
/// This is loaded from `~/.config/dorker/config.toml` (or platform equivalent).
/// If the file doesn't exist, default values are used.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
#[serde(default)]
pub struct AppConfig {
    /// Browser automation settings
    pub browser: BrowserConfig,
    /// Search result harvesting settings
    pub harvest: HarvestConfig,
    /// Fixed delays between automation steps
    pub pacing: PacingConfig,
    /// Per-URL probe settings
    pub probe: ProbeConfig,
    /// Technology signature vocabularies
    pub vocabulary: Vocabulary,
}

impl AppConfig {
    /// Load configuration from disk, falling back to defaults if not found.
    ///
    /// # Errors
    /// Returns error if:
    /// - Config directory cannot be determined
    /// - File exists but cannot be read
    /// - File contents are not valid TOML
    pub fn load() -> ConfigResult<Self> {
        let config_path = Self::config_path()?;

        if config_path.exists() {
            Self::load_from(&config_path)
        } else {
            tracing::debug!("Config file not found, using defaults");
            Ok(Self::default())
        }
    }

    /// Load configuration from an explicit path. The file must exist.
    pub fn load_from(path: &Path) -> ConfigResult<Self> {
        if !path.exists() {
            return Err(ConfigError::NotFound {
                path: path.display().to_string(),
            });
        }

        tracing::debug!("Loading config from {}", path.display());
        let contents = fs::read_to_string(path)?;
        let mut config: Self = toml::from_str(&contents)?;
        config.vocabulary = config.vocabulary.cleaned();
        Ok(config)
    }

    /// Load configuration with environment variable overrides.
    ///
    /// See [`AppConfig::apply_env_overrides`] for the supported variables.
    pub fn load_with_env() -> ConfigResult<Self> {
        let mut config = Self::load()?;
        config.apply_env_overrides(|key| std::env::var(key).ok());
        Ok(config)
    }

    /// Apply overrides from a variable lookup.
    ///
    /// Supports the following variables:
    /// - `DORKER_HEADLESS`: Override browser headless mode (true/false)
    /// - `DORKER_PROBE_CONCURRENCY`: Override concurrent probe count
    /// - `DORKER_PROBE_TIMEOUT_SECS`: Override probe HTTP timeout
    /// - `DORKER_MAX_PAGES`: Override the harvest page ceiling
    ///
    /// Unparseable values are ignored.
    pub fn apply_env_overrides<F>(&mut self, lookup: F)
    where
        F: Fn(&str) -> Option<String>,
    {
        if let Some(headless) = lookup("DORKER_HEADLESS").and_then(|v| v.parse().ok()) {
            self.browser.headless = headless;
            tracing::debug!("Override browser.headless from env: {}", headless);
        }

        if let Some(concurrency) = lookup("DORKER_PROBE_CONCURRENCY").and_then(|v| v.parse().ok())
        {
            self.probe.concurrency = concurrency;
            tracing::debug!("Override probe.concurrency from env: {}", concurrency);
        }

        if let Some(secs) = lookup("DORKER_PROBE_TIMEOUT_SECS").and_then(|v| v.parse().ok()) {
            self.probe.timeout_secs = secs;
            tracing::debug!("Override probe.timeout_secs from env: {}", secs);
        }

        if let Some(pages) = lookup("DORKER_MAX_PAGES").and_then(|v| v.parse().ok()) {
            self.harvest.max_pages = pages;
            tracing::debug!("Override harvest.max_pages from env: {}", pages);
        }
    }

    /// Check that every required value is present and usable.
    pub fn validate(&self) -> ConfigResult<()> {
        if self.harvest.search_url.trim().is_empty() {
            return Err(ConfigError::invalid("harvest.search_url", "must not be empty"));
        }
        if !self.harvest.search_url.starts_with("http://")
            && !self.harvest.search_url.starts_with("https://")
        {
            return Err(ConfigError::invalid(
                "harvest.search_url",
                "must be an absolute http(s) URL",
            ));
        }
        if self.harvest.result_selector.trim().is_empty() {
            return Err(ConfigError::invalid(
                "harvest.result_selector",
                "must not be empty",
            ));
        }
        if self.harvest.page_size == 0 {
            return Err(ConfigError::invalid("harvest.page_size", "must be at least 1"));
        }
        if self.harvest.max_pages == 0 || self.harvest.max_pages > HARD_PAGE_CEILING {
            return Err(ConfigError::invalid(
                "harvest.max_pages",
                format!("must be between 1 and {HARD_PAGE_CEILING}"),
            ));
        }
        if self.browser.page_load_timeout_secs == 0 {
            return Err(ConfigError::invalid(
                "browser.page_load_timeout_secs",
                "must be at least 1",
            ));
        }
        if self.probe.concurrency == 0 {
            return Err(ConfigError::invalid("probe.concurrency", "must be at least 1"));
        }
        if self.probe.timeout_secs == 0 {
            return Err(ConfigError::invalid("probe.timeout_secs", "must be at least 1"));
        }
        Ok(())
    }

    /// Get the path to the configuration file.
    ///
    /// Uses XDG base directories: `~/.config/dorker/config.toml`
    pub fn config_path() -> ConfigResult<PathBuf> {
        let dirs = ProjectDirs::from("com", "dorker", "dorker").ok_or(ConfigError::NoConfigDir)?;
        Ok(dirs.config_dir().join("config.toml"))
    }
}

/// Browser automation settings.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(default)]
pub struct BrowserConfig {
    /// Run browser in headless mode
    pub headless: bool,
    /// Browser window width
    pub window_width: u32,
    /// Browser window height
    pub window_height: u32,
    /// Page load timeout in seconds
    pub page_load_timeout_secs: u64,
    /// User agent presented to search pages
    pub user_agent: String,
    /// Explicit Chrome/Chromium binary; auto-detected when unset
    pub chrome_executable: Option<PathBuf>,
}

/// Desktop Chrome user agent used for both browsing and probing.
pub const DEFAULT_USER_AGENT: &str = "Mozilla/5.0 (Windows NT 10.0; Win64; x64) \
     AppleWebKit/537.36 (KHTML, like Gecko) Chrome/110.0.5481.105 Safari/537.36";

impl Default for BrowserConfig {
    fn default() -> Self {
        Self {
            headless: true,
            window_width: 1920,
            window_height: 1080,
            page_load_timeout_secs: 20,
            user_agent: DEFAULT_USER_AGENT.to_string(),
            chrome_executable: None,
        }
    }
}

impl BrowserConfig {
    /// Page load bound as a `Duration`.
    #[must_use]
    pub fn page_load_timeout(&self) -> Duration {
        Duration::from_secs(self.page_load_timeout_secs)
    }
}

/// Search result harvesting settings.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(default)]
pub struct HarvestConfig {
    /// Search endpoint, without query string
    pub search_url: String,
    /// Results requested per page
    pub page_size: usize,
    /// Pages fetched per harvest, at most [`HARD_PAGE_CEILING`]
    pub max_pages: usize,
    /// CSS selector for result anchors
    pub result_selector: String,
    /// Consent button selectors, tried in order
    pub consent_selectors: Vec<String>,
    /// Interface language (`hl`)
    pub language: String,
    /// Result region (`gl`)
    pub region: String,
}

impl Default for HarvestConfig {
    fn default() -> Self {
        Self {
            search_url: "https://www.google.com/search".to_string(),
            page_size: 100,
            max_pages: HARD_PAGE_CEILING,
            result_selector: "div.yuRUbf > a".to_string(),
            consent_selectors: vec![
                "button#L2AGLb".to_string(),
                "button#W0wltc".to_string(),
                "div[role='none'] button:nth-of-type(2)".to_string(),
            ],
            language: "en".to_string(),
            region: "us".to_string(),
        }
    }
}

/// Fixed delays, in milliseconds.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(default)]
pub struct PacingConfig {
    /// Wait before looking for a consent dialog
    pub consent_settle_ms: u64,
    /// Wait after dismissing a consent dialog
    pub consent_click_ms: u64,
    /// Wait for dynamic result content to render
    pub render_settle_ms: u64,
    /// Wait between result pages
    pub inter_page_ms: u64,
}

impl Default for PacingConfig {
    fn default() -> Self {
        Self {
            consent_settle_ms: 2000,
            consent_click_ms: 1500,
            render_settle_ms: 2000,
            inter_page_ms: 3000,
        }
    }
}

impl PacingConfig {
    /// Convert to the runtime policy.
    #[must_use]
    pub fn policy(&self) -> PacingPolicy {
        PacingPolicy {
            consent_settle: Duration::from_millis(self.consent_settle_ms),
            consent_after_click: Duration::from_millis(self.consent_click_ms),
            render_settle: Duration::from_millis(self.render_settle_ms),
            inter_page: Duration::from_millis(self.inter_page_ms),
        }
    }
}

/// Deliberate delays applied during harvesting.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct PacingPolicy {
    /// Before trying consent locators
    pub consent_settle: Duration,
    /// After a consent button was clicked
    pub consent_after_click: Duration,
    /// Before reading result links
    pub render_settle: Duration,
    /// Between consecutive result pages
    pub inter_page: Duration,
}

impl Default for PacingPolicy {
    fn default() -> Self {
        PacingConfig::default().policy()
    }
}

impl PacingPolicy {
    /// No delays at all.
    #[must_use]
    pub fn none() -> Self {
        Self {
            consent_settle: Duration::ZERO,
            consent_after_click: Duration::ZERO,
            render_settle: Duration::ZERO,
            inter_page: Duration::ZERO,
        }
    }
}

/// Per-URL probe settings.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(default)]
pub struct ProbeConfig {
    /// HTTP request timeout in seconds
    pub timeout_secs: u64,
    /// Probes in flight at once (1 = sequential)
    pub concurrency: usize,
    /// User agent sent with probe requests
    pub user_agent: String,
}

impl Default for ProbeConfig {
    fn default() -> Self {
        Self {
            timeout_secs: 10,
            concurrency: 5,
            user_agent: DEFAULT_USER_AGENT.to_string(),
        }
    }
}

impl ProbeConfig {
    /// Request timeout as a `Duration`.
    #[must_use]
    pub fn timeout(&self) -> Duration {
        Duration::from_secs(self.timeout_secs)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::collections::HashMap;
    use tempfile::TempDir;

    #[test]
    fn test_default_config() {
        let config = AppConfig::default();
        assert!(config.browser.headless);
        assert_eq!(config.browser.page_load_timeout(), Duration::from_secs(20));
        assert_eq!(config.harvest.page_size, 100);
        assert_eq!(config.harvest.max_pages, 10);
        assert_eq!(config.harvest.consent_selectors.len(), 3);
        assert_eq!(config.probe.concurrency, 5);
        assert_eq!(config.probe.timeout(), Duration::from_secs(10));
        assert!(config.validate().is_ok());
    }

    #[test]
    fn test_default_pacing() {
        let policy = PacingPolicy::default();
        assert_eq!(policy.consent_settle, Duration::from_secs(2));
        assert_eq!(policy.consent_after_click, Duration::from_millis(1500));
        assert_eq!(policy.render_settle, Duration::from_secs(2));
        assert_eq!(policy.inter_page, Duration::from_secs(3));
        assert_eq!(PacingPolicy::none().inter_page, Duration::ZERO);
    }

    #[test]
    fn test_config_serialization() {
        let config = AppConfig::default();
        let toml_str = toml::to_string_pretty(&config).expect("serialize default config");
        assert!(toml_str.contains("[browser]"));
        assert!(toml_str.contains("[harvest]"));
        assert!(toml_str.contains("[probe]"));

        let parsed: AppConfig = toml::from_str(&toml_str).expect("parse serialized config");
        assert_eq!(parsed.harvest.search_url, config.harvest.search_url);
        assert_eq!(parsed.vocabulary, config.vocabulary);
    }

    #[test]
    fn test_config_load_from_file() {
        let tmp = TempDir::new().expect("create temp dir");
        let config_path = tmp.path().join("config.toml");

        let mut config = AppConfig::default();
        config.probe.concurrency = 1;
        config.vocabulary.front_end = vec!["htmx".to_string(), " ".to_string()];

        let contents = toml::to_string_pretty(&config).expect("serialize config");
        fs::write(&config_path, contents).expect("write config");
        let loaded = AppConfig::load_from(&config_path).expect("load config");

        assert_eq!(loaded.probe.concurrency, 1);
        assert_eq!(loaded.vocabulary.front_end, vec!["htmx"]);
    }

    #[test]
    fn test_load_from_missing_file() {
        let tmp = TempDir::new().expect("create temp dir");
        let result = AppConfig::load_from(&tmp.path().join("absent.toml"));
        assert!(matches!(result, Err(ConfigError::NotFound { .. })));
    }

    #[test]
    fn test_env_overrides() {
        let vars: HashMap<&str, &str> = [
            ("DORKER_HEADLESS", "false"),
            ("DORKER_PROBE_CONCURRENCY", "1"),
            ("DORKER_PROBE_TIMEOUT_SECS", "not-a-number"),
            ("DORKER_MAX_PAGES", "3"),
        ]
        .into_iter()
        .collect();

        let mut config = AppConfig::default();
        config.apply_env_overrides(|key| vars.get(key).map(|v| (*v).to_string()));

        assert!(!config.browser.headless);
        assert_eq!(config.probe.concurrency, 1);
        // Unparseable value leaves the default in place
        assert_eq!(config.probe.timeout_secs, 10);
        assert_eq!(config.harvest.max_pages, 3);
    }

    #[test]
    fn test_partial_config() {
        let toml_str = r#"
[probe]
concurrency = 2

[pacing]
inter_page_ms = 0
"#;

        let config: AppConfig = toml::from_str(toml_str).expect("parse partial config");
        assert_eq!(config.probe.concurrency, 2);
        assert_eq!(config.pacing.policy().inter_page, Duration::ZERO);
        // These should be defaults
        assert_eq!(config.probe.timeout_secs, 10);
        assert_eq!(config.pacing.consent_settle_ms, 2000);
    }

    #[test]
    fn test_validate_rejects_invalid_values() {
        let mut config = AppConfig::default();
        config.probe.concurrency = 0;
        assert!(matches!(
            config.validate(),
            Err(ConfigError::InvalidValue { ref field, .. }) if field == "probe.concurrency"
        ));

        let mut config = AppConfig::default();
        config.harvest.search_url = "ftp://example.com".to_string();
        assert!(config.validate().is_err());

        let mut config = AppConfig::default();
        config.harvest.result_selector = "   ".to_string();
        assert!(config.validate().is_err());

        let mut config = AppConfig::default();
        config.harvest.page_size = 0;
        assert!(config.validate().is_err());
    }

    #[test]
    fn test_max_pages_above_ceiling_is_rejected() {
        let mut config = AppConfig::default();
        config.harvest.max_pages = HARD_PAGE_CEILING;
        assert!(config.validate().is_ok());

        config.apply_env_overrides(|key| (key == "DORKER_MAX_PAGES").then(|| "50".to_string()));
        assert_eq!(config.harvest.max_pages, 50);
        assert!(matches!(
            config.validate(),
            Err(ConfigError::InvalidValue { ref field, .. }) if field == "harvest.max_pages"
        ));

        let config: AppConfig =
            toml::from_str("[harvest]\nmax_pages = 11\n").expect("parse config");
        assert!(config.validate().is_err());
    }
}
