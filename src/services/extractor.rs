//! Result item extraction.
//!
//! Fetches one posting's record from the result list and its detail pane.

use std::time::Duration;

use url::Url;

use super::language::LanguageDetector;
use crate::browser::{BrowserSession, Condition, wait_for};
use crate::error::{AppError, Result};
use crate::models::{Config, JobSelectors, ResultItem, UNKNOWN_COMPANY};
use crate::utils::resolve_url;

/// Service extracting [`ResultItem`]s from the current result page.
pub struct ItemExtractor {
    selectors: JobSelectors,
    base_url: Url,
    detail_timeout: Duration,
    poll_interval: Duration,
    detector: Box<dyn LanguageDetector>,
}

impl ItemExtractor {
    /// Create an extractor with the given configuration.
    pub fn new(config: &Config, detector: Box<dyn LanguageDetector>) -> Result<Self> {
        Ok(Self {
            selectors: config.selectors.clone(),
            base_url: Url::parse(&config.site.search_url)?,
            detail_timeout: config.crawler.detail_timeout(),
            poll_interval: config.crawler.poll_interval(),
            detector,
        })
    }

    /// Extract the item at 1-based `index` on the current page.
    ///
    /// Selecting the item loads its detail pane, so items must be extracted
    /// one at a time.
    pub async fn extract(
        &self,
        session: &mut dyn BrowserSession,
        index: usize,
    ) -> Result<ResultItem> {
        let s = &self.selectors;
        let link_selector = s.nth_item(index, &s.result_item_link);

        session.click(&link_selector).await?;
        let href = session
            .attribute(&link_selector, "href")
            .await?
            .filter(|href| !href.trim().is_empty())
            .ok_or_else(|| AppError::extraction(index, "item has no link"))?;
        let link = resolve_url(&self.base_url, &href);
        let title = session
            .inner_text(&s.nth_item(index, &s.result_item_title))
            .await?
            .map(|t| t.trim().to_string())
            .unwrap_or_default();

        if !wait_for(
            session,
            &self.detail_ready(),
            Some(self.detail_timeout),
            self.poll_interval,
        )
        .await
        {
            return Err(AppError::extraction(
                index,
                format!("detail pane not loaded within {:?}", self.detail_timeout),
            ));
        }

        let company = self.company(session, index).await;
        let description = session
            .inner_text(&s.job_description)
            .await?
            .ok_or_else(|| AppError::extraction(index, "description disappeared"))?;
        let is_applicable = session.exists(&s.easy_apply_enabled).await?;
        let language = self.detector.detect(&description);

        Ok(ResultItem {
            link,
            title,
            company,
            description,
            is_applicable,
            language,
        })
    }

    /// Description text present and the apply status shown.
    fn detail_ready(&self) -> Condition {
        Condition::All(vec![
            Condition::HasText(self.selectors.job_description.clone()),
            Condition::Any(vec![
                Condition::Present(self.selectors.easy_apply_enabled.clone()),
                Condition::Present(self.selectors.applied_feedback.clone()),
            ]),
        ])
    }

    async fn company(&self, session: &mut dyn BrowserSession, index: usize) -> String {
        let selector = self
            .selectors
            .nth_item(index, &self.selectors.result_item_company);
        match session.inner_text(&selector).await {
            Ok(Some(name)) if !name.trim().is_empty() => name.trim().to_string(),
            Ok(_) => UNKNOWN_COMPANY.to_string(),
            Err(e) => {
                log::debug!("Company lookup failed for item {}: {}", index, e);
                UNKNOWN_COMPANY.to_string()
            }
        }
    }
}
