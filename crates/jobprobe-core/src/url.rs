//! Pagination URL heuristics
//!
//! Derives the pagination marker of a site from its listing URL template
//! and guesses the first-page URL from the URL currently being inspected.
//! Everything here is plain text substitution, no URL parsing is done.

use regex::{Regex, RegexBuilder};

use crate::error::{JobprobeError, Result};

/// Placeholder for the page number in pagination templates
pub const PAGE_PLACEHOLDER: &str = "{page}";

/// Generic match used when the template gives no usable marker
const GENERIC_REGEX: &str = r"(?P<prefix>page=|/)\d+\b";
const GENERIC_REPLACEMENT: &str = "${prefix}1";

/// Pagination pattern of a site
///
/// Built from a listing URL template such as
/// `https://jobber.md/jobs/page-{page}/`.
#[derive(Debug, Clone)]
pub struct PaginationPattern {
    pattern: String,
    regex: Regex,
    replacement: String,
    first_page_url: String,
}

impl PaginationPattern {
    /// Derives the pattern from a pagination template
    ///
    /// # Arguments
    /// * `template` - Listing URL with `{page}` in place of the page number
    ///
    /// # Errors
    /// - `InvalidPattern` if the derived regex does not compile
    ///
    /// # Example
    /// ```
    /// use jobprobe_core::url::PaginationPattern;
    /// let p = PaginationPattern::derive("https://jobber.md/jobs/page-{page}/").unwrap();
    /// assert_eq!(p.pattern(), "page-");
    /// assert_eq!(p.first_page_url(), "https://jobber.md/jobs/page-1/");
    /// ```
    pub fn derive(template: &str) -> Result<Self> {
        let first_page_url = fill_page(template);
        let parts: Vec<&str> = template.split(PAGE_PLACEHOLDER).collect();

        let (pattern, regex, replacement) = if let &[before, _after] = parts.as_slice() {
            derive_from_prefix(before)
        } else {
            derive_without_placeholder(template)
        };

        Self::new(pattern, &regex, replacement, first_page_url)
    }

    /// Builds a pattern from explicit parts
    ///
    /// `regex` is compiled case-insensitively. `replacement` may reference
    /// named groups of `regex` (`${name}`).
    pub fn new(
        pattern: impl Into<String>,
        regex: &str,
        replacement: impl Into<String>,
        first_page_url: impl Into<String>,
    ) -> Result<Self> {
        let regex = RegexBuilder::new(regex)
            .case_insensitive(true)
            .build()
            .map_err(|e| JobprobeError::InvalidPattern(e.to_string()))?;

        Ok(Self {
            pattern: pattern.into(),
            regex,
            replacement: replacement.into(),
            first_page_url: fill_page(&first_page_url.into()),
        })
    }

    /// Substring that identifies pagination links (e.g., "page-")
    pub fn pattern(&self) -> &str {
        &self.pattern
    }

    /// Regex matching the page number part of a URL
    pub fn regex(&self) -> &Regex {
        &self.regex
    }

    /// Replacement producing the first page (e.g., "page-1")
    pub fn replacement(&self) -> &str {
        &self.replacement
    }

    /// Fallback first-page URL used when the current URL carries no page number
    pub fn first_page_url(&self) -> &str {
        &self.first_page_url
    }

    /// CSS selector for pagination links
    ///
    /// # Example
    /// ```
    /// use jobprobe_core::url::PaginationPattern;
    /// let p = PaginationPattern::derive("https://jobber.md/jobs/page-{page}/").unwrap();
    /// assert_eq!(p.link_selector(), r#"a[href*="page-"]"#);
    /// ```
    pub fn link_selector(&self) -> String {
        format!(
            "a[href*=\"{}\"]",
            self.pattern.replace('\\', "\\\\").replace('"', "\\\"")
        )
    }
}

/// Guesses the first-page URL for the URL being inspected
///
/// If `current_url` contains the page number pattern (case-insensitive),
/// its first occurrence is replaced with the first-page replacement.
/// Otherwise the pattern's fallback first-page URL is returned.
/// Never fails: malformed input only yields a meaningless string.
///
/// # Example
/// ```
/// use jobprobe_core::url::{first_page_url, PaginationPattern};
/// let p = PaginationPattern::derive("https://jobber.md/jobs/page-{page}/").unwrap();
/// assert_eq!(
///     first_page_url("https://jobber.md/jobs/page-3/listing", &p),
///     "https://jobber.md/jobs/page-1/listing"
/// );
/// ```
pub fn first_page_url(current_url: &str, pattern: &PaginationPattern) -> String {
    if pattern.regex.is_match(current_url) {
        pattern
            .regex
            .replacen(current_url, 1, pattern.replacement.as_str())
            .into_owned()
    } else {
        pattern.first_page_url.clone()
    }
}

/// Substitutes page 1 into a template
fn fill_page(template: &str) -> String {
    template.replace(PAGE_PLACEHOLDER, "1")
}

/// Replacement text taken literally by `Regex::replacen`
fn literal(text: &str) -> String {
    text.replace('$', "$$")
}

/// Checks whether a path segment looks like a page indicator
fn looks_like_page(segment: &str) -> bool {
    let Ok(re) = RegexBuilder::new(r"(?:page|p|pg)").case_insensitive(true).build() else {
        return false;
    };
    re.is_match(segment)
}

/// Finds the first `page-`, `p_`, `pg=` style marker in a template
fn find_page_marker(template: &str) -> Option<String> {
    let re = Regex::new(r"(?:page|p|pg)(?:-|_|=)").ok()?;
    re.find(&template.to_lowercase()).map(|m| m.as_str().to_string())
}

/// Template has a single `{page}`; `before` is everything in front of it
fn derive_from_prefix(before: &str) -> (String, String, String) {
    if let Some((_, query)) = before.rsplit_once('?') {
        let param = query.split('=').next().unwrap_or(query);
        return (
            format!("{param}="),
            format!(r"{}=\d+", regex::escape(param)),
            literal(&format!("{param}=1")),
        );
    }

    let trimmed = before.trim_matches('/');
    let path_parts: Vec<&str> = trimmed.split('/').collect();
    let base = match path_parts.as_slice() {
        [.., last] if !last.is_empty() => *last,
        [.., second, _] => *second,
        _ => "page",
    };

    if !base.is_empty() && looks_like_page(base) {
        return (
            base.to_string(),
            format!(r"{}\d+", regex::escape(base)),
            literal(&format!("{base}1")),
        );
    }

    let last_segment = trimmed.split('/').filter(|s| !s.is_empty()).next_back();
    match last_segment {
        Some(segment) if looks_like_page(segment) => {
            let pattern = format!("{segment}/");
            (
                pattern.clone(),
                format!(r"{}\d+", regex::escape(&pattern)),
                literal(&format!("{segment}/1")),
            )
        }
        _ => (
            "page".to_string(),
            GENERIC_REGEX.to_string(),
            GENERIC_REPLACEMENT.to_string(),
        ),
    }
}

/// Template without a usable `{page}` placeholder
fn derive_without_placeholder(template: &str) -> (String, String, String) {
    let pattern = if let Some((_, query)) = template.rsplit_once('?') {
        let param = query.split('=').next().unwrap_or(query);
        format!("{param}=")
    } else {
        find_page_marker(template).unwrap_or_else(|| "page=".to_string())
    };

    let regex = if pattern.contains('=') {
        format!(r"{}\d+", regex::escape(&pattern))
    } else {
        format!(r"{}\d+\b", regex::escape(&pattern))
    };
    let replacement = literal(&format!("{pattern}1"));

    (pattern, regex, replacement)
}
