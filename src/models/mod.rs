// src/models/mod.rs

//! Domain models for the job crawler.
//!
//! This module contains all data structures used throughout the crate,
//! organized by their primary purpose.

mod config;
mod criteria;
mod job;
mod search;
mod selectors;

// Re-export all public types
pub use config::{BrowserConfig, Config, CrawlerConfig, SiteConfig};
pub use criteria::{
    ANY_LANGUAGE, DatePosted, LanguagePolicy, MatchMode, SearchConfig, SearchCriteria,
    WorkplaceMode,
};
pub use job::{JobLink, ResultItem, UNKNOWN_COMPANY};
pub use search::{MAX_PAGE_SIZE, SearchMetadata, TraversalCursor, TraversalStats};
pub use selectors::JobSelectors;
