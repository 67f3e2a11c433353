use crate::actions::{BrowserActions, SessionFactory};
use crate::error::{BrowserError, Result};
use crate::fingerprint::FingerprintConfig;
use chromiumoxide::browser::{Browser, BrowserConfig as ChromiumConfig};
use chromiumoxide::cdp::browser_protocol::network::SetUserAgentOverrideParams;
use chromiumoxide::cdp::browser_protocol::page::AddScriptToEvaluateOnNewDocumentParams;
use chromiumoxide::Page;
use dorker_core::BrowserConfig;
use futures_util::stream::StreamExt;
use std::path::PathBuf;
use std::time::Duration;
use tokio::task::JoinHandle;

/// Settings for launching a session
#[derive(Debug, Clone)]
pub struct SessionConfig {
    pub headless: bool,
    pub page_load_timeout: Duration,
    pub fingerprint: FingerprintConfig,
    pub chrome_executable: Option<PathBuf>,
}

impl From<&BrowserConfig> for SessionConfig {
    fn from(config: &BrowserConfig) -> Self {
        Self {
            headless: config.headless,
            page_load_timeout: config.page_load_timeout(),
            fingerprint: FingerprintConfig::from_browser_config(config),
            chrome_executable: config.chrome_executable.clone(),
        }
    }
}

impl Default for SessionConfig {
    fn default() -> Self {
        Self::from(&BrowserConfig::default())
    }
}

/// One browser process with a single stealth-patched page.
///
/// Sessions are never reused. Call [`BrowserActions::close`] when done; if a
/// session is dropped instead, the CDP handler task is aborted and
/// chromiumoxide kills the child process.
pub struct BrowserSession {
    browser: Browser,
    page: Page,
    handler: JoinHandle<()>,
    page_load_timeout: Duration,
}

impl BrowserSession {
    /// Launch a fresh browser and prepare a page with the fingerprint applied
    pub async fn open(config: &SessionConfig) -> Result<Self> {
        let fingerprint = &config.fingerprint;

        let mut builder = ChromiumConfig::builder()
            .no_sandbox()
            .window_size(fingerprint.viewport_width, fingerprint.viewport_height)
            .request_timeout(config.page_load_timeout)
            .arg("--incognito")
            .arg("--disable-blink-features=AutomationControlled")
            .arg("--disable-dev-shm-usage")
            .arg("--disable-gpu")
            .arg("--disable-extensions")
            .arg("--disable-software-rasterizer")
            .arg("--disable-infobars")
            .arg("--no-first-run")
            .arg(format!("--lang={}", fingerprint.primary_language()));

        if !config.headless {
            builder = builder.with_head();
        }
        if let Some(path) = &config.chrome_executable {
            builder = builder.chrome_executable(path);
        }

        let chromium_config = builder.build().map_err(BrowserError::ChromiumError)?;

        let (mut browser, mut handler) = Browser::launch(chromium_config)
            .await
            .map_err(|e| BrowserError::ChromiumError(e.to_string()))?;

        // Spawn browser handler
        let handler = tokio::spawn(async move {
            while let Some(event) = handler.next().await {
                if event.is_err() {
                    break;
                }
            }
        });

        let page = match Self::prepare_page(&browser, fingerprint).await {
            Ok(page) => page,
            Err(e) => {
                let _ = browser.close().await;
                handler.abort();
                return Err(e);
            }
        };

        tracing::debug!("Browser session opened");

        Ok(Self {
            browser,
            page,
            handler,
            page_load_timeout: config.page_load_timeout,
        })
    }

    async fn prepare_page(browser: &Browser, fingerprint: &FingerprintConfig) -> Result<Page> {
        let page = browser
            .new_page("about:blank")
            .await
            .map_err(|e| BrowserError::ChromiumError(e.to_string()))?;

        let user_agent = SetUserAgentOverrideParams::builder()
            .user_agent(fingerprint.user_agent.clone())
            .accept_language(fingerprint.accept_language())
            .platform(fingerprint.platform.clone())
            .build()
            .map_err(BrowserError::ChromiumError)?;
        page.execute(user_agent)
            .await
            .map_err(|e| BrowserError::ChromiumError(e.to_string()))?;

        page.execute(AddScriptToEvaluateOnNewDocumentParams::new(
            fingerprint.stealth_script(),
        ))
        .await
        .map_err(|e| BrowserError::ChromiumError(e.to_string()))?;

        Ok(page)
    }
}

#[async_trait::async_trait]
impl BrowserActions for BrowserSession {
    async fn navigate(&self, url: &str) -> Result<()> {
        match tokio::time::timeout(self.page_load_timeout, self.page.goto(url)).await {
            Ok(Ok(_)) => Ok(()),
            Ok(Err(e)) => Err(BrowserError::NavigationError(e.to_string())),
            Err(_) => Err(BrowserError::Timeout(format!(
                "page load exceeded {}s: {url}",
                self.page_load_timeout.as_secs()
            ))),
        }
    }

    async fn click(&self, selector: &str) -> Result<()> {
        let element = self
            .page
            .find_element(selector)
            .await
            .map_err(|_| BrowserError::SelectorNotFound(selector.to_string()))?;
        element
            .click()
            .await
            .map_err(|e| BrowserError::ChromiumError(e.to_string()))?;
        Ok(())
    }

    async fn content(&self) -> Result<String> {
        self.page
            .content()
            .await
            .map_err(|e| BrowserError::ChromiumError(e.to_string()))
    }

    async fn close(mut self) -> Result<()> {
        let _ = self.page.clone().close().await;
        let closed = self
            .browser
            .close()
            .await
            .map_err(|e| BrowserError::ChromiumError(e.to_string()));
        if closed.is_err() {
            // The CDP close never reached Chrome; end the process directly.
            let _ = self.browser.kill().await;
        }
        let _ = self.browser.wait().await;
        self.handler.abort();
        tracing::debug!("Browser session closed");
        closed.map(|_| ())
    }
}

impl Drop for BrowserSession {
    fn drop(&mut self) {
        self.handler.abort();
    }
}

/// Launches a new Chromium process for every session
#[derive(Debug, Clone, Default)]
pub struct ChromiumSessionFactory {
    config: SessionConfig,
}

impl ChromiumSessionFactory {
    pub fn new(config: SessionConfig) -> Self {
        Self { config }
    }
}

#[async_trait::async_trait]
impl SessionFactory for ChromiumSessionFactory {
    type Session = BrowserSession;

    async fn open(&self) -> Result<BrowserSession> {
        BrowserSession::open(&self.config).await
    }
}
