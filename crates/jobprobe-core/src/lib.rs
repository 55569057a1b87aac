//! jobprobe core library
//!
//! Debugging aid for job-site scraper rules: shows which links a rule's
//! selectors pick up on a listing page and guesses the listing's first page.
//!
//! # Overview
//!
//! - [`Page`] - a parsed listing page and the URL it came from
//! - [`LinkSelectors`] - job link and pagination link matching
//! - [`url::first_page_url`] - first-page URL heuristic
//! - [`highlight`] / [`unhighlight`] - reversible element highlighting
//! - [`Inspection`] - one highlighting run with a `reset()` handle
//! - [`script`] - browser-console debug scripts for live pages
//!
//! # Example
//!
//! ```
//! use jobprobe_core::{HighlightStyle, Inspection, Page, SiteRule};
//!
//! let html = r#"
//!     <a class="mui-8ugpds" href="/job/7">Rust developer</a>
//!     <a href="/jobs/page-2/">2</a>
//! "#;
//! let page = Page::parse("https://jobber.md/jobs/page-3/", html);
//! let mut inspection = Inspection::run(page, &SiteRule::jobber(), &HighlightStyle::default())?;
//!
//! assert_eq!(inspection.first_page_url(), "https://jobber.md/jobs/page-1/");
//! assert!(inspection.render_html().contains("outline: 3px solid red"));
//!
//! inspection.reset();
//! assert!(!inspection.render_html().contains("outline"));
//! # Ok::<(), jobprobe_core::JobprobeError>(())
//! ```

mod client;
pub mod config;
mod error;
mod highlight;
mod inspect;
mod page;
pub mod script;
mod selector;
mod style;
mod types;
pub mod url;

// Re-export client types
pub use client::{ClientConfig, PageClient};

// Re-export configuration
pub use config::{Config, find_rule, load_rules};

// Re-export error types
pub use error::{JobprobeError, Result};

// Re-export highlighting
pub use highlight::{HighlightStyle, StyleSnapshot, highlight, unhighlight};

// Re-export the inspection API
pub use inspect::Inspection;

// Re-export page model
pub use page::{ElementId, Page};
pub use style::InlineStyle;

// Re-export selector matching
pub use selector::{LinkMatches, LinkSelectors};

// Re-export data types
pub use types::{InspectionReport, JOBBER_SITE, RawSiteRule, SiteRule};

// Re-export URL helpers for convenience
pub use url::{PaginationPattern, first_page_url};

// Re-export script generation
pub use script::{generate_scripts, render_script};
