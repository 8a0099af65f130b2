// src/models/selectors.rs

//! CSS selectors for driving the job search pages.

use serde::{Deserialize, Serialize};

/// CSS selectors for the search form, the result list and the detail pane.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct JobSelectors {
    /// Keyword input on the search surface
    #[serde(default = "defaults::keyword_input")]
    pub keyword_input: String,

    /// Location input on the search surface
    #[serde(default = "defaults::location_input")]
    pub location_input: String,

    /// Button submitting the search form
    #[serde(default = "defaults::search_submit")]
    pub search_submit: String,

    /// Element whose text holds the total result count
    #[serde(default = "defaults::result_count")]
    pub result_count: String,

    /// Each item in the result list
    #[serde(default = "defaults::result_item")]
    pub result_item: String,

    /// Anchor within an item that opens the detail pane
    #[serde(default = "defaults::result_item_link")]
    pub result_item_link: String,

    /// Visible title text within an item
    #[serde(default = "defaults::result_item_title")]
    pub result_item_title: String,

    /// Company name within an item
    #[serde(default = "defaults::result_item_company")]
    pub result_item_company: String,

    /// Description body in the detail pane
    #[serde(default = "defaults::job_description")]
    pub job_description: String,

    /// Enabled quick-apply button in the detail pane
    #[serde(default = "defaults::easy_apply_enabled")]
    pub easy_apply_enabled: String,

    /// Notice shown instead of the button once applied
    #[serde(default = "defaults::applied_feedback")]
    pub applied_feedback: String,
}

impl Default for JobSelectors {
    fn default() -> Self {
        Self {
            keyword_input: defaults::keyword_input(),
            location_input: defaults::location_input(),
            search_submit: defaults::search_submit(),
            result_count: defaults::result_count(),
            result_item: defaults::result_item(),
            result_item_link: defaults::result_item_link(),
            result_item_title: defaults::result_item_title(),
            result_item_company: defaults::result_item_company(),
            job_description: defaults::job_description(),
            easy_apply_enabled: defaults::easy_apply_enabled(),
            applied_feedback: defaults::applied_feedback(),
        }
    }
}

impl JobSelectors {
    /// Scope `inner` to the `index`-th (1-based) result item.
    pub fn nth_item(&self, index: usize, inner: &str) -> String {
        format!("{}:nth-child({}) {}", self.result_item, index, inner)
    }

    /// All selectors with their config key, for validation.
    pub fn entries(&self) -> [(&'static str, &str); 11] {
        [
            ("keyword_input", self.keyword_input.as_str()),
            ("location_input", self.location_input.as_str()),
            ("search_submit", self.search_submit.as_str()),
            ("result_count", self.result_count.as_str()),
            ("result_item", self.result_item.as_str()),
            ("result_item_link", self.result_item_link.as_str()),
            ("result_item_title", self.result_item_title.as_str()),
            ("result_item_company", self.result_item_company.as_str()),
            ("job_description", self.job_description.as_str()),
            ("easy_apply_enabled", self.easy_apply_enabled.as_str()),
            ("applied_feedback", self.applied_feedback.as_str()),
        ]
    }
}

mod defaults {
    pub fn keyword_input() -> String {
        "input[id*=\"jobs-search-box-keyword-id\"]".into()
    }
    pub fn location_input() -> String {
        "input[id*=\"jobs-search-box-location-id\"]".into()
    }
    pub fn search_submit() -> String {
        "button.jobs-search-box__submit-button".into()
    }
    pub fn result_count() -> String {
        ".jobs-search-results-list__subtitle".into()
    }
    pub fn result_item() -> String {
        ".scaffold-layout__list-container > li".into()
    }
    pub fn result_item_link() -> String {
        "a.job-card-list__title".into()
    }
    pub fn result_item_title() -> String {
        "a.job-card-list__title span[aria-hidden=\"true\"]".into()
    }
    pub fn result_item_company() -> String {
        ".artdeco-entity-lockup__subtitle".into()
    }
    pub fn job_description() -> String {
        "div.jobs-description-content__text".into()
    }
    pub fn easy_apply_enabled() -> String {
        "button.jobs-apply-button:enabled".into()
    }
    pub fn applied_feedback() -> String {
        ".artdeco-inline-feedback--success".into()
    }
}
