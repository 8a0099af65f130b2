//! Browser session abstraction.
//!
//! The crawler never talks to a browser directly. Everything it needs from
//! the page (navigation, element lookup, reading rendered text, clicks and
//! typing) goes through [`BrowserSession`], with CSS selectors standing in
//! for element handles. Waiting on page state is layered on top in [`wait`].

#[cfg(feature = "chrome")]
pub mod chrome;
#[cfg(test)]
pub(crate) mod fake;
pub mod wait;

use async_trait::async_trait;

use crate::error::Result;

#[cfg(feature = "chrome")]
pub use chrome::ChromeSession;
pub use wait::{Condition, wait_for};

/// One interactive browser tab driven by the crawler.
#[async_trait]
pub trait BrowserSession: Send {
    /// Load `url` and resolve once the page has loaded.
    async fn navigate(&mut self, url: &str) -> Result<()>;

    /// URL of the currently loaded page.
    async fn current_url(&mut self) -> Result<String>;

    /// Number of elements matching `selector`.
    async fn count(&mut self, selector: &str) -> Result<usize>;

    /// Whether at least one element matches `selector`.
    async fn exists(&mut self, selector: &str) -> Result<bool> {
        Ok(self.count(selector).await? > 0)
    }

    /// Rendered text of the first element matching `selector`.
    async fn inner_text(&mut self, selector: &str) -> Result<Option<String>>;

    /// Attribute (or resolved property, for `href`) of the first match.
    async fn attribute(&mut self, selector: &str, name: &str) -> Result<Option<String>>;

    /// Activate the first element matching `selector`.
    async fn click(&mut self, selector: &str) -> Result<()>;

    /// Type `text` into the first element matching `selector`, key by key.
    async fn type_text(&mut self, selector: &str, text: &str) -> Result<()>;

    /// Overwrite the value of the first input matching `selector`.
    async fn set_value(&mut self, selector: &str, value: &str) -> Result<()>;
}
