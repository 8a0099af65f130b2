//! Waiting on page state.
//!
//! A [`Condition`] is a small predicate tree evaluated against the live
//! session; [`wait_for`] re-evaluates it until it holds or the budget runs out.

use std::time::Duration;

use futures::future::BoxFuture;
use tokio::time::Instant;

use super::BrowserSession;
use crate::error::Result;

/// Predicate over the current page.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Condition {
    /// Some element matches the selector
    Present(String),
    /// The first match has non-blank rendered text
    HasText(String),
    /// At least `n` elements match the selector
    CountAtLeast(String, usize),
    /// The current URL carries the query parameter
    UrlHasParam(String),
    All(Vec<Condition>),
    Any(Vec<Condition>),
}

impl Condition {
    /// Evaluate the condition once.
    pub fn holds<'a>(
        &'a self,
        session: &'a mut (dyn BrowserSession + '_),
    ) -> BoxFuture<'a, Result<bool>> {
        Box::pin(async move {
            match self {
                Condition::Present(selector) => session.exists(selector).await,
                Condition::HasText(selector) => Ok(session
                    .inner_text(selector)
                    .await?
                    .is_some_and(|text| !text.trim().is_empty())),
                Condition::CountAtLeast(selector, n) => Ok(session.count(selector).await? >= *n),
                Condition::UrlHasParam(name) => {
                    let current = session.current_url().await?;
                    Ok(url::Url::parse(&current)
                        .map(|u| u.query_pairs().any(|(key, _)| key == name.as_str()))
                        .unwrap_or(false))
                }
                Condition::All(conditions) => {
                    for condition in conditions {
                        if !condition.holds(&mut *session).await? {
                            return Ok(false);
                        }
                    }
                    Ok(true)
                }
                Condition::Any(conditions) => {
                    for condition in conditions {
                        if condition.holds(&mut *session).await? {
                            return Ok(true);
                        }
                    }
                    Ok(false)
                }
            }
        })
    }
}

/// Poll `condition` until it holds.
///
/// Returns `false` once `timeout` has elapsed without the condition holding;
/// with no timeout the wait only ends when the condition holds. Errors while
/// evaluating count as "not yet": pages routinely throw while they re-render.
pub async fn wait_for(
    session: &mut dyn BrowserSession,
    condition: &Condition,
    timeout: Option<Duration>,
    poll_interval: Duration,
) -> bool {
    let deadline = timeout.map(|t| Instant::now() + t);

    loop {
        match condition.holds(&mut *session).await {
            Ok(true) => return true,
            Ok(false) => {}
            Err(e) => log::debug!("Condition {:?} not evaluable yet: {}", condition, e),
        }

        if let Some(deadline) = deadline {
            let now = Instant::now();
            if now >= deadline {
                return false;
            }
            tokio::time::sleep(poll_interval.min(deadline - now)).await;
        } else {
            tokio::time::sleep(poll_interval).await;
        }
    }
}
