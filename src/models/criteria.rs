//! Search criteria and the filter settings they are compiled from.

use std::collections::BTreeSet;

use regex::{Regex, RegexBuilder};
use serde::{Deserialize, Serialize};

use crate::error::{AppError, Result};

/// Language label that disables the description language filter.
pub const ANY_LANGUAGE: &str = "any";

/// Workplace arrangement offered by a posting.
///
/// Variant order is the order of the site's numeric codes, so a
/// `BTreeSet<WorkplaceMode>` always iterates on-site, remote, hybrid.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
#[serde(rename_all = "kebab-case")]
pub enum WorkplaceMode {
    #[serde(alias = "onsite", alias = "on_site")]
    OnSite,
    Remote,
    Hybrid,
}

impl WorkplaceMode {
    /// Numeric code used by the search endpoint.
    pub fn code(self) -> u8 {
        match self {
            WorkplaceMode::OnSite => 1,
            WorkplaceMode::Remote => 2,
            WorkplaceMode::Hybrid => 3,
        }
    }
}

/// Recency window for postings.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
pub enum DatePosted {
    #[default]
    #[serde(rename = "any", alias = "none")]
    Any,
    #[serde(rename = "past-24h", alias = "PAST_24_HOURS")]
    Past24Hours,
    #[serde(rename = "past-week", alias = "PAST_WEEK")]
    PastWeek,
    #[serde(rename = "past-month", alias = "PAST_MONTH")]
    PastMonth,
}

impl DatePosted {
    /// Query token for the recency filter, `None` when unrestricted.
    pub fn token(self) -> Option<&'static str> {
        match self {
            DatePosted::Any => None,
            DatePosted::Past24Hours => Some("r86400"),
            DatePosted::PastWeek => Some("r604800"),
            DatePosted::PastMonth => Some("r2592000"),
        }
    }
}

/// Matching policy applied to extracted items.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum MatchMode {
    /// Every content filter must pass
    #[default]
    Strict,
    /// Only the applicability check applies
    Permissive,
}

/// Which detected description languages are acceptable.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum LanguagePolicy {
    Any,
    Only(BTreeSet<String>),
}

impl LanguagePolicy {
    /// Build a policy from configured labels; `"any"` anywhere wins.
    pub fn from_labels<S: AsRef<str>>(labels: &[S]) -> Self {
        let labels: BTreeSet<String> = labels
            .iter()
            .map(|l| l.as_ref().trim().to_lowercase())
            .filter(|l| !l.is_empty())
            .collect();

        if labels.contains(ANY_LANGUAGE) {
            LanguagePolicy::Any
        } else {
            LanguagePolicy::Only(labels)
        }
    }

    pub fn allows(&self, language: &str) -> bool {
        match self {
            LanguagePolicy::Any => true,
            LanguagePolicy::Only(labels) => labels.contains(&language.to_lowercase()),
        }
    }
}

/// The `[search]` section of the configuration file.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct SearchConfig {
    /// Keywords typed into the search box
    #[serde(default)]
    pub keywords: String,

    /// Location typed into the location box
    #[serde(default)]
    pub location: String,

    /// Accepted workplace modes
    #[serde(default)]
    pub workplace: Vec<WorkplaceMode>,

    /// Recency window
    #[serde(default)]
    pub date_posted: DatePosted,

    /// Pattern the title must match
    #[serde(default)]
    pub title: String,

    /// Pattern the title must not match (empty disables the check)
    #[serde(default)]
    pub title_excluded: String,

    /// Pattern the description must match
    #[serde(default)]
    pub description: String,

    /// Accepted description languages, or `["any"]`
    #[serde(default = "default_languages")]
    pub languages: Vec<String>,

    /// Only return postings with a quick-apply button
    #[serde(default = "default_easy_apply_only")]
    pub easy_apply_only: bool,

    /// Matching policy
    #[serde(default)]
    pub mode: MatchMode,
}

fn default_languages() -> Vec<String> {
    vec![ANY_LANGUAGE.to_string()]
}

fn default_easy_apply_only() -> bool {
    true
}

impl Default for SearchConfig {
    fn default() -> Self {
        Self {
            keywords: String::new(),
            location: String::new(),
            workplace: Vec::new(),
            date_posted: DatePosted::default(),
            title: String::new(),
            title_excluded: String::new(),
            description: String::new(),
            languages: default_languages(),
            easy_apply_only: default_easy_apply_only(),
            mode: MatchMode::default(),
        }
    }
}

/// Compiled, immutable criteria for one traversal.
#[derive(Debug, Clone)]
pub struct SearchCriteria {
    pub keywords: String,
    pub location: String,
    pub workplace: BTreeSet<WorkplaceMode>,
    pub date_posted: DatePosted,
    pub title_include: Regex,
    pub title_exclude: Option<Regex>,
    pub description: Regex,
    pub languages: LanguagePolicy,
    pub applicability_required: bool,
    pub mode: MatchMode,
}

impl SearchCriteria {
    /// Compile the configured patterns into criteria.
    pub fn from_config(config: &SearchConfig) -> Result<Self> {
        if config.keywords.trim().is_empty() {
            return Err(AppError::validation("search.keywords is empty"));
        }
        if config.languages.is_empty() {
            return Err(AppError::validation(
                "search.languages is empty; use [\"any\"] to accept every language",
            ));
        }

        let title_exclude = if config.title_excluded.is_empty() {
            None
        } else {
            Some(compile(&config.title_excluded)?)
        };

        Ok(Self {
            keywords: config.keywords.trim().to_string(),
            location: config.location.trim().to_string(),
            workplace: config.workplace.iter().copied().collect(),
            date_posted: config.date_posted,
            title_include: compile(&config.title)?,
            title_exclude,
            description: compile(&config.description)?,
            languages: LanguagePolicy::from_labels(&config.languages),
            applicability_required: config.easy_apply_only,
            mode: config.mode,
        })
    }
}

/// Compile a case-insensitive search pattern.
fn compile(pattern: &str) -> Result<Regex> {
    Ok(RegexBuilder::new(pattern).case_insensitive(true).build()?)
}
