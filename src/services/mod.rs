//! Service layer for the job crawler.
//!
//! This module contains the business logic for:
//! - Search submission and metadata (`SearchContextResolver`)
//! - Result item extraction (`ItemExtractor`)
//! - Description language detection (`LanguageDetector`)
//! - The accept/reject policy (`decide`)

mod context;
mod extractor;
pub mod filter;
pub mod language;

pub use context::{GEO_ID_PARAM, SearchContextResolver};
pub use extractor::ItemExtractor;
pub use filter::{Decision, RejectReason, SeenCompanies, decide};
pub use language::{LanguageDetector, WhatlangDetector};
