//! Scripted in-memory job board used by the tests.

use async_trait::async_trait;
use url::Url;

use super::BrowserSession;
use crate::error::{AppError, Result};
use crate::models::{Config, JobSelectors};

/// One posting on the fake board.
#[derive(Debug, Clone)]
pub(crate) struct FakeJob {
    pub href: Option<String>,
    pub title: String,
    pub company: Option<String>,
    pub description: String,
    pub easy_apply: bool,
    /// Clicking the item fails
    pub broken: bool,
    /// The detail pane never finishes loading
    pub stalls: bool,
}

impl FakeJob {
    pub fn new(title: &str, company: &str) -> Self {
        Self {
            href: Some(format!("/jobs/view/{}", title.to_lowercase().replace(' ', "-"))),
            title: title.to_string(),
            company: Some(company.to_string()),
            description: "We offer remote work and a friendly team.".to_string(),
            easy_apply: true,
            broken: false,
            stalls: false,
        }
    }

    pub fn description(mut self, text: &str) -> Self {
        self.description = text.to_string();
        self
    }

    pub fn not_applicable(mut self) -> Self {
        self.easy_apply = false;
        self
    }

    pub fn broken(mut self) -> Self {
        self.broken = true;
        self
    }

    pub fn stalls(mut self) -> Self {
        self.stalls = true;
        self
    }

    pub fn without_company(mut self) -> Self {
        self.company = None;
        self
    }
}

/// A browser session simulating the search surface and the paged results.
pub(crate) struct FakeSite {
    selectors: JobSelectors,
    search_url: String,
    jobs: Vec<FakeJob>,
    per_page: usize,
    /// Result count text shown after submitting
    pub count_text: Option<String>,
    /// Geo id the site attaches to the result URL
    pub geo_id: Option<String>,
    /// Caps how many items a result page renders
    pub render_cap: Option<usize>,
    current_url: String,
    page_start: Option<usize>,
    selected: Option<usize>,
    submitted: bool,
    /// Every URL passed to `navigate`
    pub navigations: Vec<String>,
    /// Every `(selector, text)` typed or set
    pub typed: Vec<(String, String)>,
}

impl FakeSite {
    pub fn new(jobs: Vec<FakeJob>) -> Self {
        let config = Config::default();
        Self {
            selectors: config.selectors,
            search_url: config.site.search_url,
            count_text: Some(format!("{} results", jobs.len())),
            per_page: config.crawler.page_size,
            jobs,
            geo_id: Some("101282230".to_string()),
            render_cap: None,
            current_url: "about:blank".to_string(),
            page_start: None,
            selected: None,
            submitted: false,
            navigations: Vec::new(),
            typed: Vec::new(),
        }
    }

    pub fn selectors(&self) -> &JobSelectors {
        &self.selectors
    }

    pub fn set_url(&mut self, url: &str) {
        self.current_url = url.to_string();
    }

    /// Show the result page starting at `start` without navigating.
    pub fn open_results(&mut self, start: usize) {
        self.page_start = Some(start);
        self.selected = None;
    }

    /// Open the detail pane of the job at absolute position `index`.
    pub fn select(&mut self, index: usize) {
        self.selected = Some(index);
    }

    /// Navigations to the paged result endpoint.
    pub fn page_loads(&self) -> Vec<&String> {
        self.navigations
            .iter()
            .filter(|url| url.starts_with(&self.search_url))
            .collect()
    }

    fn page_len(&self) -> usize {
        let Some(start) = self.page_start else {
            return 0;
        };
        let len = self.jobs.len().saturating_sub(start).min(self.per_page);
        self.render_cap.map_or(len, |cap| len.min(cap))
    }

    /// Resolve an item-scoped selector to `(absolute job index, inner selector)`.
    fn item_part(&self, selector: &str) -> Option<(usize, &str)> {
        let start = self.page_start?;
        let parts = [
            self.selectors.result_item_link.as_str(),
            self.selectors.result_item_title.as_str(),
            self.selectors.result_item_company.as_str(),
        ];
        (1..=self.page_len()).find_map(|i| {
            parts
                .iter()
                .find(|inner| self.selectors.nth_item(i, inner) == selector)
                .map(|inner| (start + i - 1, *inner))
        })
    }

    fn selected_job(&self) -> Option<&FakeJob> {
        self.selected
            .and_then(|i| self.jobs.get(i))
            .filter(|job| !job.stalls)
    }
}

#[async_trait]
impl BrowserSession for FakeSite {
    async fn navigate(&mut self, url: &str) -> Result<()> {
        self.navigations.push(url.to_string());
        self.current_url = url.to_string();
        self.selected = None;

        if url.starts_with(&self.search_url) {
            let parsed = Url::parse(url)?;
            let start = parsed
                .query_pairs()
                .find(|(key, _)| key == "start")
                .and_then(|(_, value)| value.parse().ok())
                .unwrap_or(0);
            self.page_start = Some(start);
        } else {
            self.page_start = None;
            self.submitted = false;
        }
        Ok(())
    }

    async fn current_url(&mut self) -> Result<String> {
        Ok(self.current_url.clone())
    }

    async fn count(&mut self, selector: &str) -> Result<usize> {
        let s = &self.selectors;
        let found = if selector == s.result_item {
            self.page_len()
        } else if selector == s.keyword_input
            || selector == s.location_input
            || selector == s.search_submit
        {
            usize::from(self.page_start.is_none())
        } else if selector == s.result_count {
            usize::from(self.submitted && self.count_text.is_some())
        } else if selector == s.job_description {
            usize::from(self.selected_job().is_some())
        } else if selector == s.easy_apply_enabled {
            usize::from(self.selected_job().is_some_and(|job| job.easy_apply))
        } else if selector == s.applied_feedback {
            usize::from(self.selected_job().is_some_and(|job| !job.easy_apply))
        } else if let Some((index, inner)) = self.item_part(selector) {
            let job = &self.jobs[index];
            let present = if inner == s.result_item_company {
                job.company.is_some()
            } else {
                true
            };
            usize::from(present)
        } else {
            0
        };
        Ok(found)
    }

    async fn inner_text(&mut self, selector: &str) -> Result<Option<String>> {
        let s = &self.selectors;
        if selector == s.result_count {
            return Ok(self.count_text.clone().filter(|_| self.submitted));
        }
        if selector == s.job_description {
            return Ok(self.selected_job().map(|job| job.description.clone()));
        }
        let Some((index, inner)) = self.item_part(selector) else {
            return Ok(None);
        };
        let job = &self.jobs[index];
        if inner == s.result_item_title {
            Ok(Some(format!("  {}  ", job.title)))
        } else if inner == s.result_item_company {
            Ok(job.company.clone())
        } else {
            Ok(Some(job.title.clone()))
        }
    }

    async fn attribute(&mut self, selector: &str, name: &str) -> Result<Option<String>> {
        match self.item_part(selector) {
            Some((index, inner)) if inner == self.selectors.result_item_link && name == "href" => {
                Ok(self.jobs[index].href.clone())
            }
            _ => Ok(None),
        }
    }

    async fn click(&mut self, selector: &str) -> Result<()> {
        if selector == self.selectors.search_submit {
            self.submitted = true;
            self.current_url = match &self.geo_id {
                Some(geo_id) => format!("{}/?geoId={geo_id}&keywords=rust", self.search_url),
                None => format!("{}/?keywords=rust", self.search_url),
            };
            return Ok(());
        }

        match self.item_part(selector) {
            Some((index, _)) if self.jobs[index].broken => {
                Err(AppError::browser("element is detached from the document"))
            }
            Some((index, _)) => {
                self.selected = Some(index);
                Ok(())
            }
            None => Err(AppError::browser(format!("no element matches {selector}"))),
        }
    }

    async fn type_text(&mut self, selector: &str, text: &str) -> Result<()> {
        self.typed.push((selector.to_string(), text.to_string()));
        Ok(())
    }

    async fn set_value(&mut self, selector: &str, value: &str) -> Result<()> {
        self.typed.push((selector.to_string(), value.to_string()));
        Ok(())
    }
}
