//! Application configuration structures.

use std::fs;
use std::path::{Path, PathBuf};
use std::time::Duration;

use serde::{Deserialize, Serialize};

use crate::error::{AppError, Result};
use crate::models::criteria::{SearchConfig, SearchCriteria};
use crate::models::search::MAX_PAGE_SIZE;
use crate::models::selectors::JobSelectors;

/// Root application configuration.
#[derive(Debug, Clone, Serialize, Deserialize, Default)]
pub struct Config {
    /// Browser launch settings
    #[serde(default)]
    pub browser: BrowserConfig,

    /// Paging, pacing and wait budgets
    #[serde(default)]
    pub crawler: CrawlerConfig,

    /// Site entry points
    #[serde(default)]
    pub site: SiteConfig,

    /// CSS selectors for the search pages
    #[serde(default)]
    pub selectors: JobSelectors,

    /// What to search for and how to filter it
    #[serde(default)]
    pub search: SearchConfig,
}

impl Config {
    /// Load configuration from a TOML file.
    pub fn load(path: impl AsRef<Path>) -> Result<Self> {
        let content = fs::read_to_string(path)?;
        Ok(toml::from_str(&content)?)
    }

    /// Load configuration or return default if loading fails.
    pub fn load_or_default(path: impl AsRef<Path>) -> Self {
        Self::load(&path).unwrap_or_else(|e| {
            log::warn!(
                "Config load failed from {:?}: {}. Using defaults.",
                path.as_ref(),
                e
            );
            Self::default()
        })
    }

    /// Validate configuration values for basic sanity.
    ///
    /// Search criteria are checked separately by [`Config::criteria`].
    pub fn validate(&self) -> Result<()> {
        let crawler = &self.crawler;
        if crawler.page_size == 0 || crawler.page_size > MAX_PAGE_SIZE {
            return Err(AppError::validation(format!(
                "crawler.page_size must be within 1..={MAX_PAGE_SIZE}"
            )));
        }
        for (key, value) in [
            ("metadata_timeout_ms", crawler.metadata_timeout_ms),
            ("page_ready_timeout_ms", crawler.page_ready_timeout_ms),
            ("navigation_timeout_ms", crawler.navigation_timeout_ms),
            ("detail_timeout_ms", crawler.detail_timeout_ms),
            ("poll_interval_ms", crawler.poll_interval_ms),
        ] {
            if value == 0 {
                return Err(AppError::validation(format!("crawler.{key} must be > 0")));
            }
        }

        for (key, value) in [
            ("search_surface_url", &self.site.search_surface_url),
            ("search_url", &self.site.search_url),
        ] {
            url::Url::parse(value)
                .map_err(|e| AppError::validation(format!("site.{key} is invalid: {e}")))?;
        }

        if let Some((key, _)) = self
            .selectors
            .entries()
            .into_iter()
            .find(|(_, s)| s.trim().is_empty())
        {
            return Err(AppError::validation(format!("selectors.{key} is empty")));
        }

        Ok(())
    }

    /// Compile the `[search]` section.
    pub fn criteria(&self) -> Result<SearchCriteria> {
        SearchCriteria::from_config(&self.search)
    }
}

/// Browser launch settings.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct BrowserConfig {
    /// Run without a visible window
    #[serde(default)]
    pub headless: bool,

    /// Chromium executable; auto-detected when absent
    #[serde(default)]
    pub executable: Option<PathBuf>,

    /// Profile directory holding an already logged-in session
    #[serde(default)]
    pub user_data_dir: Option<PathBuf>,

    /// Window width in pixels
    #[serde(default = "defaults::window_width")]
    pub window_width: u32,

    /// Window height in pixels
    #[serde(default = "defaults::window_height")]
    pub window_height: u32,
}

impl Default for BrowserConfig {
    fn default() -> Self {
        Self {
            headless: false,
            executable: None,
            user_data_dir: None,
            window_width: defaults::window_width(),
            window_height: defaults::window_height(),
        }
    }
}

/// Paging, pacing and wait budgets.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct CrawlerConfig {
    /// Items handled per result page
    #[serde(default = "defaults::page_size")]
    pub page_size: usize,

    /// Pause between page fetches; keeps request pacing human-like
    #[serde(default = "defaults::page_delay")]
    pub page_delay_ms: u64,

    /// Budget for the result count to appear after submitting
    #[serde(default = "defaults::metadata_timeout")]
    pub metadata_timeout_ms: u64,

    /// Budget for a result page to render its items
    #[serde(default = "defaults::page_ready_timeout")]
    pub page_ready_timeout_ms: u64,

    /// Budget for the search submission to redirect to the results
    #[serde(default = "defaults::navigation_timeout")]
    pub navigation_timeout_ms: u64,

    /// Budget for an item's detail pane to load
    #[serde(default = "defaults::detail_timeout")]
    pub detail_timeout_ms: u64,

    /// Interval between condition checks while waiting
    #[serde(default = "defaults::poll_interval")]
    pub poll_interval_ms: u64,
}

impl Default for CrawlerConfig {
    fn default() -> Self {
        Self {
            page_size: defaults::page_size(),
            page_delay_ms: defaults::page_delay(),
            metadata_timeout_ms: defaults::metadata_timeout(),
            page_ready_timeout_ms: defaults::page_ready_timeout(),
            navigation_timeout_ms: defaults::navigation_timeout(),
            detail_timeout_ms: defaults::detail_timeout(),
            poll_interval_ms: defaults::poll_interval(),
        }
    }
}

impl CrawlerConfig {
    pub fn page_delay(&self) -> Duration {
        Duration::from_millis(self.page_delay_ms)
    }

    pub fn metadata_timeout(&self) -> Duration {
        Duration::from_millis(self.metadata_timeout_ms)
    }

    pub fn page_ready_timeout(&self) -> Duration {
        Duration::from_millis(self.page_ready_timeout_ms)
    }

    pub fn navigation_timeout(&self) -> Duration {
        Duration::from_millis(self.navigation_timeout_ms)
    }

    pub fn detail_timeout(&self) -> Duration {
        Duration::from_millis(self.detail_timeout_ms)
    }

    pub fn poll_interval(&self) -> Duration {
        Duration::from_millis(self.poll_interval_ms)
    }
}

/// Site entry points.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct SiteConfig {
    /// Page holding the search form
    #[serde(default = "defaults::search_surface_url")]
    pub search_surface_url: String,

    /// Endpoint the paged result URLs are built on
    #[serde(default = "defaults::search_url")]
    pub search_url: String,
}

impl Default for SiteConfig {
    fn default() -> Self {
        Self {
            search_surface_url: defaults::search_surface_url(),
            search_url: defaults::search_url(),
        }
    }
}

mod defaults {
    // Browser defaults
    pub fn window_width() -> u32 {
        1280
    }
    pub fn window_height() -> u32 {
        900
    }

    // Crawler defaults
    pub fn page_size() -> usize {
        7
    }
    pub fn page_delay() -> u64 {
        2000
    }
    pub fn metadata_timeout() -> u64 {
        5000
    }
    pub fn page_ready_timeout() -> u64 {
        5000
    }
    pub fn navigation_timeout() -> u64 {
        30_000
    }
    pub fn detail_timeout() -> u64 {
        10_000
    }
    pub fn poll_interval() -> u64 {
        100
    }

    // Site defaults
    pub fn search_surface_url() -> String {
        "https://www.linkedin.com/jobs".into()
    }
    pub fn search_url() -> String {
        "https://www.linkedin.com/jobs/search".into()
    }
}
