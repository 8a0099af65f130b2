// src/pipeline/stream.rs

//! Lazy stream of matching postings.

use chrono::Utc;
use futures::Stream;

use super::traversal::{PageTraversal, TraversalState};
use crate::browser::BrowserSession;
use crate::error::{AppError, Result};
use crate::models::{Config, JobLink, SearchCriteria, TraversalStats};
use crate::services::{
    Decision, ItemExtractor, LanguageDetector, RejectReason, SearchContextResolver, SeenCompanies,
    decide,
};
use crate::utils::SearchQuery;

/// Pull-based, single-pass sequence of accepted postings.
///
/// Nothing happens until the first [`next_match`](Self::next_match) call.
/// Each call runs the traversal only as far as the next accepted posting,
/// so the consumer can stop at any point between items. A fatal error is
/// returned once and ends the sequence.
pub struct ResultStream<S> {
    session: S,
    criteria: SearchCriteria,
    search_url: String,
    resolver: SearchContextResolver,
    extractor: ItemExtractor,
    traversal: PageTraversal,
    seen: SeenCompanies,
    stats: TraversalStats,
}

impl<S: BrowserSession> ResultStream<S> {
    pub fn new(
        session: S,
        criteria: SearchCriteria,
        config: &Config,
        detector: Box<dyn LanguageDetector>,
    ) -> Result<Self> {
        Ok(Self {
            session,
            criteria,
            search_url: config.site.search_url.clone(),
            resolver: SearchContextResolver::new(config),
            extractor: ItemExtractor::new(config, detector)?,
            traversal: PageTraversal::new(config),
            seen: SeenCompanies::new(),
            stats: TraversalStats::default(),
        })
    }

    /// Produce the next accepted posting, `None` once the results are exhausted.
    pub async fn next_match(&mut self) -> Option<Result<JobLink>> {
        loop {
            match self.traversal.state() {
                TraversalState::Idle => {
                    if let Err(e) = self.begin().await {
                        return Some(Err(self.abort(e)));
                    }
                }
                TraversalState::FetchingPage => {
                    let fetched = self.traversal.fetch_page(&mut self.session).await;
                    self.stats.pages_fetched = self.traversal.pages_fetched();
                    if let Err(e) = fetched {
                        return Some(Err(self.abort(e)));
                    }
                }
                TraversalState::PageReady { .. } => match self.traversal.next_item() {
                    Some(index) => {
                        if let Some(link) = self.examine(index).await {
                            return Some(Ok(link));
                        }
                    }
                    None => self.traversal.finish_page(),
                },
                TraversalState::Exhausted | TraversalState::Failed => {
                    if self.stats.finished_at.is_none() {
                        self.stats.finished_at = Some(Utc::now());
                        log::info!(
                            "Traversal finished: {} match(es) from {} item(s)",
                            self.stats.accepted,
                            self.stats.items_examined
                        );
                    }
                    return None;
                }
            }
        }
    }

    /// Turn the traversal into a `futures::Stream`.
    pub fn into_stream(self) -> impl Stream<Item = Result<JobLink>> {
        futures::stream::unfold(self, |mut results| async move {
            let item = results.next_match().await?;
            Some((item, results))
        })
    }

    pub fn state(&self) -> TraversalState {
        self.traversal.state()
    }

    pub fn stats(&self) -> &TraversalStats {
        &self.stats
    }

    pub fn seen_companies(&self) -> &SeenCompanies {
        &self.seen
    }

    /// The browser session, for use between pulls.
    pub fn session_mut(&mut self) -> &mut S {
        &mut self.session
    }

    /// Stop the traversal and take the session back.
    pub fn into_session(self) -> S {
        self.session
    }

    async fn begin(&mut self) -> Result<()> {
        let metadata = self
            .resolver
            .resolve(
                &mut self.session,
                &self.criteria.keywords,
                &self.criteria.location,
            )
            .await?;
        let query = SearchQuery::new(&self.search_url, &self.criteria, metadata.geo_id.as_deref())?;

        self.stats.total_available = metadata.total_available;
        self.traversal.start(query, &metadata);
        Ok(())
    }

    /// Extract and filter one item; `Some` when it is accepted.
    async fn examine(&mut self, index: usize) -> Option<JobLink> {
        self.stats.items_examined += 1;
        let page_start = self.traversal.cursor().items_seen();

        let item = match self.extractor.extract(&mut self.session, index).await {
            Ok(item) => item,
            Err(e) => {
                self.stats.extraction_failures += 1;
                let e = match e {
                    AppError::ItemExtraction { .. } => e,
                    other => AppError::extraction(index, other),
                };
                log::warn!("Skipping result {}: {}", page_start + index, e);
                return None;
            }
        };

        match decide(&item, &mut self.seen, &self.criteria) {
            Decision::Accept => {
                self.stats.accepted += 1;
                log::info!("Match: {} at {} ({})", item.title, item.company, item.link);
                Some(item.to_link())
            }
            Decision::Reject(reason) => {
                self.stats.rejected += 1;
                if reason == RejectReason::DuplicateCompany {
                    self.stats.duplicate_companies += 1;
                }
                log::debug!("Rejected '{}' at {}: {}", item.title, item.company, reason);
                None
            }
        }
    }

    fn abort(&mut self, e: AppError) -> AppError {
        self.traversal.fail();
        self.stats.finished_at = Some(Utc::now());
        log::error!("Traversal aborted: {}", e);
        e
    }
}
