use crate::error::Result;

/// Browser actions for automation
#[async_trait::async_trait]
pub trait BrowserActions: Send + Sync {
    /// Navigate to a URL, bounded by the session's page load timeout
    async fn navigate(&self, url: &str) -> Result<()>;

    /// Click an element by selector
    async fn click(&self, selector: &str) -> Result<()>;

    /// Serialized DOM of the current page
    async fn content(&self) -> Result<String>;

    /// Release the session. Must be called on every exit path.
    async fn close(self) -> Result<()>
    where
        Self: Sized;
}

/// Opens a fresh, isolated session per page fetch
#[async_trait::async_trait]
pub trait SessionFactory: Send + Sync {
    type Session: BrowserActions;

    async fn open(&self) -> Result<Self::Session>;
}
