use crate::actions::BrowserActions;
use dorker_core::{HarvestConfig, PacingPolicy};
use std::time::Duration;

/// Best-effort dismissal of cookie / consent interstitials.
///
/// A page without a consent dialog is the normal case, not an error.
#[derive(Debug, Clone)]
pub struct ConsentHandler {
    selectors: Vec<String>,
    settle: Duration,
    after_click: Duration,
}

impl ConsentHandler {
    pub fn new(selectors: Vec<String>, settle: Duration, after_click: Duration) -> Self {
        Self {
            selectors,
            settle,
            after_click,
        }
    }

    pub fn from_config(config: &HarvestConfig, pacing: &PacingPolicy) -> Self {
        Self::new(
            config.consent_selectors.clone(),
            pacing.consent_settle,
            pacing.consent_after_click,
        )
    }

    /// Click the first matching consent button, if any.
    ///
    /// Returns `true` when a button was clicked.
    pub async fn dismiss<S: BrowserActions + ?Sized>(&self, session: &S) -> bool {
        sleep_unless_zero(self.settle).await;

        for selector in &self.selectors {
            match session.click(selector).await {
                Ok(()) => {
                    tracing::info!("Clicked consent button: {}", selector);
                    sleep_unless_zero(self.after_click).await;
                    return true;
                }
                Err(e) => tracing::debug!("Consent locator {} not usable: {}", selector, e),
            }
        }

        false
    }
}

pub(crate) async fn sleep_unless_zero(delay: Duration) {
    if !delay.is_zero() {
        tokio::time::sleep(delay).await;
    }
}
