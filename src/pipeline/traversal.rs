// src/pipeline/traversal.rs

//! Page-by-page traversal of the search results.

use std::time::Duration;

use crate::browser::{BrowserSession, Condition, wait_for};
use crate::error::{AppError, Result};
use crate::models::{Config, SearchMetadata, TraversalCursor};
use crate::utils::SearchQuery;

/// Where the traversal currently stands.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum TraversalState {
    /// Metadata not resolved yet
    Idle,
    /// The next page must be loaded
    FetchingPage,
    /// A page is loaded; items `next..=min(found, page_size)` are pending
    PageReady { found: usize, next: usize },
    /// Every available item has been seen
    Exhausted,
    /// A fatal error ended the traversal
    Failed,
}

/// Drives the result pages against the total resolved at the start.
///
/// The total is a snapshot: it is never re-read, even if the live result
/// count changes while paging.
#[derive(Debug)]
pub struct PageTraversal {
    state: TraversalState,
    cursor: TraversalCursor,
    total: usize,
    query: Option<SearchQuery>,
    pages_fetched: usize,
    item_selector: String,
    page_delay: Duration,
    page_ready_timeout: Duration,
    poll_interval: Duration,
}

impl PageTraversal {
    pub fn new(config: &Config) -> Self {
        Self {
            state: TraversalState::Idle,
            cursor: TraversalCursor::new(config.crawler.page_size),
            total: 0,
            query: None,
            pages_fetched: 0,
            item_selector: config.selectors.result_item.clone(),
            page_delay: config.crawler.page_delay(),
            page_ready_timeout: config.crawler.page_ready_timeout(),
            poll_interval: config.crawler.poll_interval(),
        }
    }

    pub fn state(&self) -> TraversalState {
        self.state
    }

    pub fn cursor(&self) -> &TraversalCursor {
        &self.cursor
    }

    pub fn total(&self) -> usize {
        self.total
    }

    pub fn pages_fetched(&self) -> usize {
        self.pages_fetched
    }

    /// Leave `Idle` with the resolved metadata.
    pub fn start(&mut self, query: SearchQuery, metadata: &SearchMetadata) {
        if self.state != TraversalState::Idle {
            return;
        }
        self.query = Some(query);
        self.total = metadata.total_available;
        self.state = if self.cursor.is_exhausted(self.total) {
            TraversalState::Exhausted
        } else {
            TraversalState::FetchingPage
        };
    }

    /// Mark the traversal as failed.
    pub fn fail(&mut self) {
        self.state = TraversalState::Failed;
    }

    /// Load the page at the cursor and wait for its items.
    ///
    /// Returns the number of items found on the page.
    pub async fn fetch_page(&mut self, session: &mut dyn BrowserSession) -> Result<usize> {
        if self.state != TraversalState::FetchingPage {
            return Ok(0);
        }
        if self.cursor.is_exhausted(self.total) {
            self.state = TraversalState::Exhausted;
            return Ok(0);
        }

        let start = self.cursor.items_seen();
        let expected = self.cursor.expected_on_page(self.total);
        let url = match &self.query {
            Some(query) => query.url(start),
            None => {
                self.fail();
                return Err(AppError::config("traversal started without a query"));
            }
        };

        if self.pages_fetched > 0 && !self.page_delay.is_zero() {
            tokio::time::sleep(self.page_delay).await;
        }

        log::info!(
            "Fetching results {}..{} of {}",
            start + 1,
            start + expected,
            self.total
        );
        match self.load(session, &url, expected).await {
            Ok(found) => {
                self.pages_fetched += 1;
                if found == 0 {
                    log::warn!("Result page at start={} is empty, stopping", start);
                    self.state = TraversalState::Exhausted;
                } else {
                    self.state = TraversalState::PageReady { found, next: 1 };
                }
                Ok(found)
            }
            Err(e) => {
                self.fail();
                Err(e)
            }
        }
    }

    async fn load(
        &self,
        session: &mut dyn BrowserSession,
        url: &str,
        expected: usize,
    ) -> Result<usize> {
        session.navigate(url).await?;

        let ready = Condition::CountAtLeast(self.item_selector.clone(), expected);
        if !wait_for(session, &ready, Some(self.page_ready_timeout), self.poll_interval).await {
            return Err(AppError::PageReadyTimeout {
                start: self.cursor.items_seen(),
                expected,
                waited_ms: u64::try_from(self.page_ready_timeout.as_millis()).unwrap_or(u64::MAX),
            });
        }

        session.count(&self.item_selector).await
    }

    /// Hand out the next 1-based item index on the loaded page.
    pub fn next_item(&mut self) -> Option<usize> {
        match self.state {
            TraversalState::PageReady { found, next } if next <= found.min(self.cursor.page_size()) => {
                self.state = TraversalState::PageReady {
                    found,
                    next: next + 1,
                };
                Some(next)
            }
            _ => None,
        }
    }

    /// Close the loaded page and advance the cursor by what it held.
    pub fn finish_page(&mut self) {
        if let TraversalState::PageReady { found, .. } = self.state {
            self.cursor.advance(found);
            self.state = if self.cursor.is_exhausted(self.total) {
                TraversalState::Exhausted
            } else {
                TraversalState::FetchingPage
            };
        }
    }
}
