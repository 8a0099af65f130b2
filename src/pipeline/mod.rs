//! Pipeline entry points for job searches.
//!
//! - `search`: Build a lazy [`ResultStream`] over a browser session
//! - [`PageTraversal`]: The page-by-page state machine behind it

pub mod stream;
pub mod traversal;

pub use stream::ResultStream;
pub use traversal::{PageTraversal, TraversalState};

use crate::browser::BrowserSession;
use crate::error::Result;
use crate::models::{Config, SearchCriteria};
use crate::services::WhatlangDetector;

/// Start a search for `criteria` on `session`.
///
/// No page is touched until the first result is pulled.
pub fn search<S: BrowserSession>(
    session: S,
    criteria: SearchCriteria,
    config: &Config,
) -> Result<ResultStream<S>> {
    ResultStream::new(session, criteria, config, Box::new(WhatlangDetector))
}
