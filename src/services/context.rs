//! Search submission and result metadata.

use std::time::Duration;

use crate::browser::{BrowserSession, Condition, wait_for};
use crate::error::{AppError, Result};
use crate::models::{Config, JobSelectors, SearchMetadata};
use crate::utils::parse_count;

/// Query parameter carrying the site's geographic id.
pub const GEO_ID_PARAM: &str = "geoId";

/// Submits the search form and reads the session-scoped metadata.
pub struct SearchContextResolver {
    selectors: JobSelectors,
    surface_url: String,
    navigation_timeout: Duration,
    metadata_timeout: Duration,
    poll_interval: Duration,
}

impl SearchContextResolver {
    pub fn new(config: &Config) -> Self {
        Self {
            selectors: config.selectors.clone(),
            surface_url: config.site.search_surface_url.clone(),
            navigation_timeout: config.crawler.navigation_timeout(),
            metadata_timeout: config.crawler.metadata_timeout(),
            poll_interval: config.crawler.poll_interval(),
        }
    }

    /// Run the search for `keywords` in `location`.
    ///
    /// Leaves the session on the first result page.
    pub async fn resolve(
        &self,
        session: &mut dyn BrowserSession,
        keywords: &str,
        location: &str,
    ) -> Result<SearchMetadata> {
        let s = &self.selectors;
        log::info!("Submitting search for '{}' in '{}'", keywords, location);

        session.navigate(&self.surface_url).await?;
        session.type_text(&s.keyword_input, keywords).await?;

        let location_ready = Condition::Present(s.location_input.clone());
        if !wait_for(session, &location_ready, Some(self.metadata_timeout), self.poll_interval).await {
            return Err(AppError::metadata_timeout(
                "the location input",
                millis(self.metadata_timeout),
            ));
        }
        session.set_value(&s.location_input, location).await?;
        // A keystroke makes the site pick up the new location.
        session.type_text(&s.location_input, " ").await?;
        session.click(&s.search_submit).await?;

        let has_geo = Condition::UrlHasParam(GEO_ID_PARAM.to_string());
        if !wait_for(session, &has_geo, Some(self.navigation_timeout), self.poll_interval).await {
            return Err(AppError::metadata_timeout(
                "a geoId in the result URL",
                millis(self.navigation_timeout),
            ));
        }
        let geo_id = geo_id_from(&session.current_url().await?);

        let count_ready = Condition::Present(s.result_count.clone());
        if !wait_for(session, &count_ready, Some(self.metadata_timeout), self.poll_interval).await {
            return Err(AppError::metadata_timeout(
                "the result count",
                millis(self.metadata_timeout),
            ));
        }
        let count_text = session.inner_text(&s.result_count).await?.unwrap_or_default();
        let total_available = parse_count(&count_text).unwrap_or_else(|| {
            log::warn!("Unreadable result count '{}', treating as 0", count_text.trim());
            0
        });

        log::info!(
            "Search resolved: {} result(s), geoId {}",
            total_available,
            geo_id.as_deref().unwrap_or("-")
        );

        Ok(SearchMetadata {
            geo_id,
            total_available,
        })
    }
}

fn geo_id_from(current: &str) -> Option<String> {
    url::Url::parse(current).ok().and_then(|u| {
        u.query_pairs()
            .find(|(key, value)| key == GEO_ID_PARAM && !value.is_empty())
            .map(|(_, value)| value.into_owned())
    })
}

fn millis(duration: Duration) -> u64 {
    u64::try_from(duration.as_millis()).unwrap_or(u64::MAX)
}
