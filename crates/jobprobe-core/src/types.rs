//! Core data types for jobprobe
//!
//! Contains the site rule read from the scraper configuration and the
//! report produced by an inspection run.

use serde::{Deserialize, Serialize};

/// Name of the built-in site rule
pub const JOBBER_SITE: &str = "jobber.md";

/// Scraper rule for a single job site
///
/// Mirrors one entry of `config/scraper_rules.json`.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct SiteRule {
    /// Site name (e.g., "jobber.md")
    pub name: String,

    /// CSS selector of the links leading to individual job pages
    #[serde(rename = "job-url-class-selector")]
    pub job_url_selector: String,

    /// Listing URL template where `{page}` stands for the page number
    /// (e.g., "https://jobber.md/jobs/page-{page}/")
    pub pagination: String,
}

impl SiteRule {
    /// Built-in rule for jobber.md
    pub fn jobber() -> Self {
        Self {
            name: JOBBER_SITE.to_string(),
            job_url_selector: "a.mui-8ugpds".to_string(),
            pagination: "https://jobber.md/jobs/page-{page}/".to_string(),
        }
    }
}

/// Rules file entry before validation
///
/// Any key may be missing; incomplete entries are skipped by callers.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct RawSiteRule {
    pub name: Option<String>,

    #[serde(rename = "job-url-class-selector")]
    pub job_url_selector: Option<String>,

    pub pagination: Option<String>,
}

impl RawSiteRule {
    /// Converts into a [`SiteRule`] if all keys are present and non-empty
    pub fn into_rule(self) -> Option<SiteRule> {
        let non_empty = |v: Option<String>| v.filter(|s| !s.trim().is_empty());
        Some(SiteRule {
            name: non_empty(self.name)?,
            job_url_selector: non_empty(self.job_url_selector)?,
            pagination: non_empty(self.pagination)?,
        })
    }
}

/// Summary of one inspection run
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct InspectionReport {
    /// Site rule name
    pub site: String,

    /// URL the page was loaded from
    pub current_url: String,

    /// Heuristic first-page URL suggestion
    pub first_page_url: String,

    /// Selector used for job links
    pub job_link_selector: String,

    /// Selector used for pagination links
    pub pagination_selector: String,

    /// Number of elements matching the job link selector
    pub job_links: usize,

    /// Number of elements matching the pagination selector
    pub pagination_links: usize,

    /// Number of elements that currently carry the highlight
    pub highlighted: usize,
}
