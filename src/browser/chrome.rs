//! [`BrowserSession`] backed by a Chromium instance over the DevTools protocol.
//!
//! Element access goes through small JavaScript snippets evaluated in the
//! page. Every snippet returns `JSON.stringify(...)` so the result always
//! crosses the protocol as a plain string, including `null`.

use async_trait::async_trait;
use chromiumoxide::Page;
use chromiumoxide::browser::{Browser, BrowserConfig as ChromeConfig};
use futures::StreamExt;
use serde::de::DeserializeOwned;
use tokio::task::JoinHandle;

use super::BrowserSession;
use crate::error::{AppError, Result};
use crate::models::BrowserConfig;

/// A single Chromium tab owned by the crawler.
pub struct ChromeSession {
    browser: Browser,
    page: Page,
    handler: JoinHandle<()>,
}

impl ChromeSession {
    /// Launch Chromium and open one blank tab.
    pub async fn launch(config: &BrowserConfig) -> Result<Self> {
        let mut builder = ChromeConfig::builder().window_size(config.window_width, config.window_height);
        if !config.headless {
            builder = builder.with_head();
        }
        if let Some(path) = &config.executable {
            builder = builder.chrome_executable(path);
        }
        if let Some(dir) = &config.user_data_dir {
            builder = builder.user_data_dir(dir);
        }
        let chrome_config = builder.build().map_err(AppError::browser)?;

        let (browser, mut events) = Browser::launch(chrome_config).await?;
        let handler = tokio::spawn(async move {
            while let Some(event) = events.next().await {
                if let Err(e) = event {
                    log::debug!("Browser handler stopped: {}", e);
                    break;
                }
            }
        });

        let page = browser.new_page("about:blank").await?;
        log::info!("Browser launched (headless: {})", config.headless);

        Ok(Self {
            browser,
            page,
            handler,
        })
    }

    /// Close the browser and stop the event handler.
    pub async fn close(mut self) -> Result<()> {
        self.browser.close().await?;
        let _ = self.browser.wait().await;
        self.handler.abort();
        Ok(())
    }

    /// Evaluate `body` (a function body) against the page and decode its result.
    async fn eval<T: DeserializeOwned>(&mut self, body: &str) -> Result<T> {
        let script = format!("JSON.stringify((() => {{ {body} }})() ?? null)");
        let raw: String = self.page.evaluate(script).await?.into_value()?;
        Ok(serde_json::from_str(&raw)?)
    }
}

/// Quote a string as a JavaScript literal.
fn js_str(value: &str) -> String {
    serde_json::Value::from(value).to_string()
}

#[async_trait]
impl BrowserSession for ChromeSession {
    async fn navigate(&mut self, url: &str) -> Result<()> {
        self.page.goto(url).await?;
        self.page.wait_for_navigation().await?;
        Ok(())
    }

    async fn current_url(&mut self) -> Result<String> {
        self.eval("return document.location.href;").await
    }

    async fn count(&mut self, selector: &str) -> Result<usize> {
        self.eval(&format!(
            "return document.querySelectorAll({}).length;",
            js_str(selector)
        ))
        .await
    }

    async fn inner_text(&mut self, selector: &str) -> Result<Option<String>> {
        self.eval(&format!(
            "const el = document.querySelector({}); return el ? el.innerText : null;",
            js_str(selector)
        ))
        .await
    }

    async fn attribute(&mut self, selector: &str, name: &str) -> Result<Option<String>> {
        // Prefer the resolved property so `href` comes back absolute.
        self.eval(&format!(
            "const el = document.querySelector({sel}); \
             if (!el) return null; \
             const prop = el[{name}]; \
             return typeof prop === 'string' ? prop : el.getAttribute({name});",
            sel = js_str(selector),
            name = js_str(name)
        ))
        .await
    }

    async fn click(&mut self, selector: &str) -> Result<()> {
        let clicked: bool = self
            .eval(&format!(
                "const el = document.querySelector({}); if (!el) return false; el.click(); return true;",
                js_str(selector)
            ))
            .await?;
        if clicked {
            Ok(())
        } else {
            Err(AppError::browser(format!("no element matches {selector}")))
        }
    }

    async fn type_text(&mut self, selector: &str, text: &str) -> Result<()> {
        self.page
            .find_element(selector)
            .await?
            .click()
            .await?
            .type_str(text)
            .await?;
        Ok(())
    }

    async fn set_value(&mut self, selector: &str, value: &str) -> Result<()> {
        let found: bool = self
            .eval(&format!(
                "const el = document.querySelector({}); if (!el) return false; \
                 el.value = {}; el.dispatchEvent(new Event('input', {{ bubbles: true }})); return true;",
                js_str(selector),
                js_str(value)
            ))
            .await?;
        if found {
            Ok(())
        } else {
            Err(AppError::browser(format!("no element matches {selector}")))
        }
    }
}
