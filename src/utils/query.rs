// src/utils/query.rs

//! Canonical search URL construction.

use url::Url;

use crate::error::Result;
use crate::models::SearchCriteria;

/// Server-side part of a search, fixed for the whole traversal.
///
/// Only the `start` offset differs between the URLs of successive pages.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct SearchQuery {
    endpoint: Url,
    keywords: String,
    location: String,
    workplace: Option<String>,
    easy_apply: bool,
    recency: Option<&'static str>,
    geo_id: Option<String>,
}

impl SearchQuery {
    /// Build the query from criteria and the resolved geo id.
    ///
    /// Title, description and language filters are applied client-side and
    /// do not appear in the query.
    pub fn new(search_url: &str, criteria: &SearchCriteria, geo_id: Option<&str>) -> Result<Self> {
        let workplace = criteria
            .workplace
            .iter()
            .map(|mode| mode.code().to_string())
            .collect::<Vec<_>>()
            .join(",");

        Ok(Self {
            endpoint: Url::parse(search_url)?,
            keywords: criteria.keywords.clone(),
            location: criteria.location.clone(),
            workplace: (!workplace.is_empty()).then_some(workplace),
            easy_apply: criteria.applicability_required,
            recency: criteria.date_posted.token(),
            geo_id: geo_id.map(str::to_string),
        })
    }

    /// URL of the result page starting at item offset `start`.
    pub fn url(&self, start: usize) -> String {
        let mut url = self.endpoint.clone();
        {
            let mut pairs = url.query_pairs_mut();
            pairs.clear();
            pairs.append_pair("keywords", &self.keywords);
            pairs.append_pair("location", &self.location);
            pairs.append_pair("start", &start.to_string());
            if let Some(workplace) = &self.workplace {
                pairs.append_pair("f_WT", workplace);
            }
            if self.easy_apply {
                pairs.append_pair("f_AL", "true");
            }
            if let Some(recency) = self.recency {
                pairs.append_pair("f_TPR", recency);
            }
            if let Some(geo_id) = &self.geo_id {
                pairs.append_pair("geoId", geo_id);
            }
        }
        url.into()
    }
}
