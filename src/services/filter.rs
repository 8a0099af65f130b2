//! Accept/reject policy for extracted items.

use std::collections::HashSet;
use std::fmt;

use crate::models::{MatchMode, ResultItem, SearchCriteria};

/// Company names seen so far in one traversal, in first-seen order.
#[derive(Debug, Default, Clone)]
pub struct SeenCompanies {
    order: Vec<String>,
    index: HashSet<String>,
}

impl SeenCompanies {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn contains(&self, company: &str) -> bool {
        self.index.contains(company)
    }

    /// Record a company; returns `false` if it was already present.
    pub fn record(&mut self, company: &str) -> bool {
        if self.index.insert(company.to_string()) {
            self.order.push(company.to_string());
            true
        } else {
            false
        }
    }

    pub fn len(&self) -> usize {
        self.order.len()
    }

    pub fn is_empty(&self) -> bool {
        self.order.is_empty()
    }

    pub fn iter(&self) -> impl Iterator<Item = &str> {
        self.order.iter().map(String::as_str)
    }
}

/// Why an item was rejected.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum RejectReason {
    DuplicateCompany,
    NotApplicable,
    TitleMismatch,
    TitleExcluded,
    DescriptionMismatch,
    LanguageMismatch,
}

impl fmt::Display for RejectReason {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let text = match self {
            RejectReason::DuplicateCompany => "company already seen",
            RejectReason::NotApplicable => "no quick apply",
            RejectReason::TitleMismatch => "title does not match",
            RejectReason::TitleExcluded => "title is excluded",
            RejectReason::DescriptionMismatch => "description does not match",
            RejectReason::LanguageMismatch => "description language not allowed",
        };
        f.write_str(text)
    }
}

/// Outcome of filtering one item.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Decision {
    Accept,
    Reject(RejectReason),
}

impl Decision {
    pub fn is_accept(&self) -> bool {
        matches!(self, Decision::Accept)
    }
}

/// Decide whether `item` is yielded, then record its company.
///
/// A company that was already seen rejects the item in every mode; the
/// first item of each company always gets a real decision.
pub fn decide(item: &ResultItem, seen: &mut SeenCompanies, criteria: &SearchCriteria) -> Decision {
    let decision = if seen.contains(&item.company) {
        Decision::Reject(RejectReason::DuplicateCompany)
    } else {
        match criteria.mode {
            MatchMode::Strict => strict(item, criteria),
            MatchMode::Permissive => permissive(item),
        }
    };

    seen.record(&item.company);
    decision
}

fn strict(item: &ResultItem, criteria: &SearchCriteria) -> Decision {
    let reason = if !item.is_applicable {
        RejectReason::NotApplicable
    } else if !criteria.title_include.is_match(&item.title) {
        RejectReason::TitleMismatch
    } else if criteria
        .title_exclude
        .as_ref()
        .is_some_and(|re| re.is_match(&item.title))
    {
        RejectReason::TitleExcluded
    } else if !criteria.description.is_match(&item.description) {
        RejectReason::DescriptionMismatch
    } else if !criteria.languages.allows(&item.language) {
        RejectReason::LanguageMismatch
    } else {
        return Decision::Accept;
    };
    Decision::Reject(reason)
}

fn permissive(item: &ResultItem) -> Decision {
    if item.is_applicable {
        Decision::Accept
    } else {
        Decision::Reject(RejectReason::NotApplicable)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::models::SearchConfig;

    fn strict_criteria(languages: &[&str]) -> SearchCriteria {
        SearchCriteria::from_config(&SearchConfig {
            keywords: "engineer".to_string(),
            title: "engineer".to_string(),
            title_excluded: "intern".to_string(),
            description: "remote".to_string(),
            languages: languages.iter().map(|l| l.to_string()).collect(),
            mode: MatchMode::Strict,
            ..SearchConfig::default()
        })
        .unwrap()
    }

    fn permissive_criteria() -> SearchCriteria {
        SearchCriteria {
            mode: MatchMode::Permissive,
            ..strict_criteria(&["english"])
        }
    }

    fn item(company: &str) -> ResultItem {
        ResultItem {
            link: "https://www.linkedin.com/jobs/view/1".to_string(),
            title: "Senior Engineer".to_string(),
            company: company.to_string(),
            description: "Fully remote work, async culture".to_string(),
            is_applicable: true,
            language: "english".to_string(),
        }
    }

    fn decide_fresh(item: &ResultItem, criteria: &SearchCriteria) -> Decision {
        decide(item, &mut SeenCompanies::new(), criteria)
    }

    #[test]
    fn test_strict_accepts_when_all_conditions_hold() {
        assert_eq!(decide_fresh(&item("Acme"), &strict_criteria(&["english"])), Decision::Accept);
    }

    #[test]
    fn test_strict_each_condition_flips_outcome() {
        let criteria = strict_criteria(&["english"]);

        let mut not_applicable = item("Acme");
        not_applicable.is_applicable = false;
        assert_eq!(
            decide_fresh(&not_applicable, &criteria),
            Decision::Reject(RejectReason::NotApplicable)
        );

        let mut wrong_title = item("Acme");
        wrong_title.title = "Product Manager".to_string();
        assert_eq!(
            decide_fresh(&wrong_title, &criteria),
            Decision::Reject(RejectReason::TitleMismatch)
        );

        let mut excluded = item("Acme");
        excluded.title = "Engineering Intern".to_string();
        assert_eq!(
            decide_fresh(&excluded, &criteria),
            Decision::Reject(RejectReason::TitleExcluded)
        );

        let mut wrong_description = item("Acme");
        wrong_description.description = "Office based in Munich".to_string();
        assert_eq!(
            decide_fresh(&wrong_description, &criteria),
            Decision::Reject(RejectReason::DescriptionMismatch)
        );

        let mut wrong_language = item("Acme");
        wrong_language.language = "german".to_string();
        assert_eq!(
            decide_fresh(&wrong_language, &criteria),
            Decision::Reject(RejectReason::LanguageMismatch)
        );
    }

    #[test]
    fn test_strict_matching_ignores_case() {
        let mut shouty = item("Acme");
        shouty.title = "SENIOR ENGINEER".to_string();
        shouty.description = "REMOTE FIRST".to_string();
        assert!(decide_fresh(&shouty, &strict_criteria(&["english"])).is_accept());
    }

    #[test]
    fn test_any_language_accepts_every_language() {
        let criteria = strict_criteria(&["any"]);
        for language in ["english", "german", "unknown"] {
            let mut posting = item("Acme");
            posting.language = language.to_string();
            assert!(decide_fresh(&posting, &criteria).is_accept(), "{language}");
        }
    }

    #[test]
    fn test_permissive_only_checks_applicability() {
        let criteria = permissive_criteria();

        let mut off_topic = item("Acme");
        off_topic.title = "Engineering Intern".to_string();
        off_topic.description = "On-site only".to_string();
        off_topic.language = "french".to_string();
        assert!(decide_fresh(&off_topic, &criteria).is_accept());

        off_topic.is_applicable = false;
        assert_eq!(
            decide_fresh(&off_topic, &criteria),
            Decision::Reject(RejectReason::NotApplicable)
        );
    }

    #[test]
    fn test_duplicate_company_rejected_in_both_modes() {
        for criteria in [strict_criteria(&["english"]), permissive_criteria()] {
            let mut seen = SeenCompanies::new();
            assert!(decide(&item("Acme"), &mut seen, &criteria).is_accept());
            assert_eq!(
                decide(&item("Acme"), &mut seen, &criteria),
                Decision::Reject(RejectReason::DuplicateCompany)
            );
            assert!(decide(&item("Globex"), &mut seen, &criteria).is_accept());
        }
    }

    #[test]
    fn test_rejected_company_still_recorded() {
        let criteria = strict_criteria(&["english"]);
        let mut seen = SeenCompanies::new();

        let mut first = item("Acme");
        first.title = "Engineering Intern".to_string();
        assert!(!decide(&first, &mut seen, &criteria).is_accept());

        // A matching posting from the same company is now suppressed.
        assert_eq!(
            decide(&item("Acme"), &mut seen, &criteria),
            Decision::Reject(RejectReason::DuplicateCompany)
        );
        assert_eq!(seen.iter().collect::<Vec<_>>(), vec!["Acme"]);
    }

    #[test]
    fn test_seen_companies_keep_order() {
        let mut seen = SeenCompanies::new();
        assert!(seen.record("Globex"));
        assert!(seen.record("Acme"));
        assert!(!seen.record("Globex"));
        assert_eq!(seen.len(), 2);
        assert_eq!(seen.iter().collect::<Vec<_>>(), vec!["Globex", "Acme"]);
    }
}
