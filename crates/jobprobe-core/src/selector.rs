//! Job and pagination link matching
//!
//! Compiles the two selectors of a site rule and queries a page with them.

use scraper::Selector;
use tracing::info;

use crate::error::{JobprobeError, Result};
use crate::page::{ElementId, Page};
use crate::types::SiteRule;
use crate::url::PaginationPattern;

/// Compiled job link and pagination link selectors
#[derive(Debug, Clone)]
pub struct LinkSelectors {
    job_link_source: String,
    pagination_source: String,
    job_link: Selector,
    pagination: Selector,
}

/// Elements matched by [`LinkSelectors::match_links`], in document order
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct LinkMatches {
    pub job_links: Vec<ElementId>,
    pub pagination_links: Vec<ElementId>,
}

impl LinkSelectors {
    /// Compiles both selectors
    ///
    /// # Errors
    /// - `InvalidSelector` if either selector does not parse
    pub fn new(job_link: &str, pagination: &str) -> Result<Self> {
        Ok(Self {
            job_link: parse_selector(job_link)?,
            pagination: parse_selector(pagination)?,
            job_link_source: job_link.to_string(),
            pagination_source: pagination.to_string(),
        })
    }

    /// Selectors for a site rule: its job link selector and
    /// `a[href*="<pattern>"]` for pagination
    pub fn for_rule(rule: &SiteRule, pattern: &PaginationPattern) -> Result<Self> {
        Self::new(&rule.job_url_selector, &pattern.link_selector())
    }

    pub fn job_link_selector(&self) -> &str {
        &self.job_link_source
    }

    pub fn pagination_selector(&self) -> &str {
        &self.pagination_source
    }

    /// Queries the page for job links and pagination links
    ///
    /// Zero matches is not an error; the sequence is simply empty.
    pub fn match_links(&self, page: &Page) -> LinkMatches {
        let job_links = page.select(&self.job_link);
        info!(
            "Found {} job links matching selector \"{}\".",
            job_links.len(),
            self.job_link_source
        );

        let pagination_links = page.select(&self.pagination);
        info!(
            "Found {} potential pagination links matching selector \"{}\".",
            pagination_links.len(),
            self.pagination_source
        );

        LinkMatches {
            job_links,
            pagination_links,
        }
    }
}

fn parse_selector(selector: &str) -> Result<Selector> {
    Selector::parse(selector)
        .map_err(|e| JobprobeError::InvalidSelector(format!("{} ({:?})", selector, e)))
}

#[cfg(test)]
mod tests {
    use super::*;

    const LISTING: &str = r#"
    <html><body>
    <main>
        <a class="mui-8ugpds" href="/job/101">Backend developer</a>
        <a class="mui-8ugpds other" href="/job/102">Accountant</a>
        <a class="mui-x" href="/job/103">Not a job card</a>
    </main>
    <nav>
        <a href="/jobs/page-1/">1</a>
        <a href="/jobs/page-2/">2</a>
        <a href="/jobs/page-3/">3</a>
        <a href="/about">About</a>
    </nav>
    </body></html>
    "#;

    fn jobber_selectors() -> LinkSelectors {
        let rule = SiteRule::jobber();
        let pattern = PaginationPattern::derive(&rule.pagination).unwrap();
        LinkSelectors::for_rule(&rule, &pattern).unwrap()
    }

    #[test]
    fn test_for_rule_selectors() {
        let selectors = jobber_selectors();
        assert_eq!(selectors.job_link_selector(), "a.mui-8ugpds");
        assert_eq!(selectors.pagination_selector(), r#"a[href*="page-"]"#);
    }

    #[test]
    fn test_match_links_counts() {
        let page = Page::parse("https://jobber.md/jobs/page-2/", LISTING);
        let matches = jobber_selectors().match_links(&page);
        assert_eq!(matches.job_links.len(), 2);
        assert_eq!(matches.pagination_links.len(), 3);
    }

    #[test]
    fn test_match_links_document_order_no_duplicates() {
        let page = Page::parse("https://jobber.md/jobs/page-2/", LISTING);
        let matches = jobber_selectors().match_links(&page);
        let hrefs: Vec<&str> = matches
            .pagination_links
            .iter()
            .filter_map(|i| page.element(*i)?.value().attr("href"))
            .collect();
        assert_eq!(hrefs, vec!["/jobs/page-1/", "/jobs/page-2/", "/jobs/page-3/"]);

        let mut dedup = matches.pagination_links.clone();
        dedup.dedup();
        assert_eq!(dedup, matches.pagination_links);
    }

    #[test]
    fn test_match_links_empty_page() {
        let page = Page::parse("https://jobber.md/jobs/", "<html><body><p>No jobs</p></body></html>");
        let matches = jobber_selectors().match_links(&page);
        assert_eq!(matches, LinkMatches::default());
    }

    #[test]
    fn test_invalid_selector() {
        let result = LinkSelectors::new("a[", "a");
        match result {
            Err(JobprobeError::InvalidSelector(msg)) => assert!(msg.starts_with("a[")),
            _ => panic!("Expected InvalidSelector error"),
        }
    }
}
