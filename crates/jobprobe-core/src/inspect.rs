//! Inspection runs
//!
//! One run computes the first-page URL of the page, highlights its job
//! and pagination links, and hands back an [`Inspection`] that can undo
//! the highlighting.

use tracing::info;

use crate::error::Result;
use crate::highlight::{HighlightStyle, StyleSnapshot, highlight, unhighlight};
use crate::page::{ElementId, Page};
use crate::selector::LinkSelectors;
use crate::types::{InspectionReport, SiteRule};
use crate::url::{PaginationPattern, first_page_url};

/// Result of highlighting one page with one site rule
///
/// Holds the page, the matched links, and the snapshots needed by
/// [`Inspection::reset`]. Independent runs never share state.
pub struct Inspection {
    site: String,
    page: Page,
    selectors: LinkSelectors,
    first_page_url: String,
    job_links: Vec<ElementId>,
    pagination_links: Vec<ElementId>,
    snapshots: Vec<(ElementId, StyleSnapshot)>,
}

impl Inspection {
    /// Runs an inspection of `page` for `rule`
    ///
    /// # Errors
    /// - `InvalidPattern` if the pagination template yields a bad regex
    /// - `InvalidSelector` if the job link selector does not parse
    ///
    /// # Example
    /// ```
    /// use jobprobe_core::{HighlightStyle, Inspection, Page, SiteRule};
    ///
    /// let html = r#"<a class="mui-8ugpds" href="/job/1">Dev</a><a href="/jobs/page-2/">2</a>"#;
    /// let page = Page::parse("https://jobber.md/jobs/page-4/", html);
    /// let mut run = Inspection::run(page, &SiteRule::jobber(), &HighlightStyle::default()).unwrap();
    /// assert_eq!(run.first_page_url(), "https://jobber.md/jobs/page-1/");
    /// assert_eq!(run.job_links().len(), 1);
    /// assert_eq!(run.reset(), 2);
    /// ```
    pub fn run(page: Page, rule: &SiteRule, style: &HighlightStyle) -> Result<Self> {
        let pattern = PaginationPattern::derive(&rule.pagination)?;
        let selectors = LinkSelectors::for_rule(rule, &pattern)?;
        Ok(Self::run_with(page, &rule.name, &pattern, selectors, style))
    }

    /// Runs an inspection with an explicit pattern and selectors
    pub fn run_with(
        mut page: Page,
        site: &str,
        pattern: &PaginationPattern,
        selectors: LinkSelectors,
        style: &HighlightStyle,
    ) -> Self {
        info!("Highlighting job links and pagination on {}", site);

        let first_page_url = first_page_url(page.url(), pattern);
        info!("Potential first page URL: {}", first_page_url);

        let matches = selectors.match_links(&page);
        let mut snapshots = Vec::new();
        for &id in matches.job_links.iter().chain(&matches.pagination_links) {
            if let Some(snapshot) = highlight(&mut page, id, style) {
                snapshots.push((id, snapshot));
            }
        }

        info!(
            "Highlighting complete: {} elements highlighted. Call reset() on the inspection to remove highlights.",
            snapshots.len()
        );

        Self {
            site: site.to_string(),
            page,
            selectors,
            first_page_url,
            job_links: matches.job_links,
            pagination_links: matches.pagination_links,
            snapshots,
        }
    }

    /// Removes every highlight applied by this run
    ///
    /// Restores each element to the style it had before highlighting.
    /// Calling it again is a no-op.
    ///
    /// # Returns
    /// Number of elements restored
    pub fn reset(&mut self) -> usize {
        let mut restored = 0;
        for (id, snapshot) in self.snapshots.drain(..) {
            if unhighlight(&mut self.page, id, &snapshot) {
                restored += 1;
            }
        }
        info!("Highlights removed for {}.", self.site);
        restored
    }

    pub fn site(&self) -> &str {
        &self.site
    }

    pub fn page(&self) -> &Page {
        &self.page
    }

    /// Suggested first-page URL
    pub fn first_page_url(&self) -> &str {
        &self.first_page_url
    }

    /// Job links in document order
    pub fn job_links(&self) -> &[ElementId] {
        &self.job_links
    }

    /// Pagination links in document order
    pub fn pagination_links(&self) -> &[ElementId] {
        &self.pagination_links
    }

    /// Number of elements currently highlighted by this run
    pub fn highlighted(&self) -> usize {
        self.snapshots.len()
    }

    /// Page HTML with the current highlights applied
    pub fn render_html(&self) -> String {
        self.page.render()
    }

    pub fn report(&self) -> InspectionReport {
        InspectionReport {
            site: self.site.clone(),
            current_url: self.page.url().to_string(),
            first_page_url: self.first_page_url.clone(),
            job_link_selector: self.selectors.job_link_selector().to_string(),
            pagination_selector: self.selectors.pagination_selector().to_string(),
            job_links: self.job_links.len(),
            pagination_links: self.pagination_links.len(),
            highlighted: self.highlighted(),
        }
    }
}
