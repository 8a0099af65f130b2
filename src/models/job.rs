//! Job posting data structures.

use serde::{Deserialize, Serialize};

/// Company name used when the listing does not expose one.
pub const UNKNOWN_COMPANY: &str = "Unknown";

/// Everything extracted from one result item and its detail pane.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ResultItem {
    /// Absolute URL of the posting
    pub link: String,

    /// Visible posting title
    pub title: String,

    /// Employer name, or `"Unknown"`
    pub company: String,

    /// Full description text from the detail pane
    pub description: String,

    /// Whether a quick-apply button is enabled
    pub is_applicable: bool,

    /// Highest-confidence language of the description
    pub language: String,
}

impl ResultItem {
    /// The part of the item handed to the caller.
    pub fn to_link(&self) -> JobLink {
        JobLink {
            link: self.link.clone(),
            title: self.title.clone(),
            company: self.company.clone(),
        }
    }
}

/// A posting accepted by the filters.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq, Eq)]
pub struct JobLink {
    /// Absolute URL of the posting
    pub link: String,

    /// Posting title
    pub title: String,

    /// Employer name
    pub company: String,
}

impl JobLink {
    /// Format the posting for display using a template.
    ///
    /// Supported placeholders: `{link}`, `{title}`, `{company}`
    pub fn format(&self, template: &str) -> String {
        template
            .replace("{link}", &self.link)
            .replace("{title}", &self.title)
            .replace("{company}", &self.company)
    }
}
