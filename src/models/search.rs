//! Per-traversal state: resolved metadata, the paging cursor and run statistics.

use chrono::{DateTime, Utc};
use serde::Serialize;

/// Largest page size the search endpoint serves.
pub const MAX_PAGE_SIZE: usize = 25;

/// Session-scoped values resolved once when the search is submitted.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct SearchMetadata {
    /// Geographic id the site attached to the location
    pub geo_id: Option<String>,

    /// Result count shown when the search was submitted
    pub total_available: usize,
}

/// Running count of items already processed.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct TraversalCursor {
    items_seen: usize,
    page_size: usize,
}

impl TraversalCursor {
    pub fn new(page_size: usize) -> Self {
        Self {
            items_seen: 0,
            page_size: page_size.clamp(1, MAX_PAGE_SIZE),
        }
    }

    pub fn items_seen(&self) -> usize {
        self.items_seen
    }

    pub fn page_size(&self) -> usize {
        self.page_size
    }

    /// Items still expected before reaching `total`.
    pub fn remaining(&self, total: usize) -> usize {
        total.saturating_sub(self.items_seen)
    }

    /// Minimum number of items the next page must render.
    pub fn expected_on_page(&self, total: usize) -> usize {
        self.page_size.min(self.remaining(total))
    }

    pub fn is_exhausted(&self, total: usize) -> bool {
        self.items_seen >= total
    }

    /// Advance by the number of items actually found on a page.
    pub fn advance(&mut self, found: usize) {
        self.items_seen += found;
    }
}

/// Counters collected over one traversal.
#[derive(Debug, Clone, Serialize)]
pub struct TraversalStats {
    pub started_at: DateTime<Utc>,
    pub finished_at: Option<DateTime<Utc>>,
    pub total_available: usize,
    pub pages_fetched: usize,
    pub items_examined: usize,
    pub extraction_failures: usize,
    pub accepted: usize,
    pub rejected: usize,
    pub duplicate_companies: usize,
}

impl Default for TraversalStats {
    fn default() -> Self {
        Self {
            started_at: Utc::now(),
            finished_at: None,
            total_available: 0,
            pages_fetched: 0,
            items_examined: 0,
            extraction_failures: 0,
            accepted: 0,
            rejected: 0,
            duplicate_companies: 0,
        }
    }
}

impl TraversalStats {
    /// Key/value lines for a run summary.
    pub fn summary_items(&self) -> Vec<(&'static str, String)> {
        let elapsed = self
            .finished_at
            .unwrap_or_else(Utc::now)
            .signed_duration_since(self.started_at);

        vec![
            ("Available", self.total_available.to_string()),
            ("Pages", self.pages_fetched.to_string()),
            ("Examined", self.items_examined.to_string()),
            ("Accepted", self.accepted.to_string()),
            ("Rejected", self.rejected.to_string()),
            ("Duplicate companies", self.duplicate_companies.to_string()),
            ("Extraction failures", self.extraction_failures.to_string()),
            ("Elapsed", format!("{}s", elapsed.num_seconds())),
        ]
    }
}
