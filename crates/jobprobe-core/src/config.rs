//! Configuration and scraper rules loading

use std::fs;
use std::io::ErrorKind;
use std::path::{Path, PathBuf};

use serde::{Deserialize, Serialize};
use tracing::warn;

use crate::client::ClientConfig;
use crate::error::{JobprobeError, Result};
use crate::highlight::HighlightStyle;
use crate::types::{JOBBER_SITE, RawSiteRule, SiteRule};

/// Default location of the scraper rules file
pub const DEFAULT_RULES_PATH: &str = "config/scraper_rules.json";

/// Default output directory for generated debug scripts
pub const DEFAULT_SCRIPTS_DIR: &str = "js";

/// Tool configuration
///
/// Every field has a default, so a config file only needs the keys it
/// changes.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct Config {
    /// Scraper rules file (default: "config/scraper_rules.json")
    pub rules_path: PathBuf,
    /// Output directory for debug scripts (default: "js")
    pub scripts_dir: PathBuf,
    /// Highlight applied to matched links
    pub highlight: HighlightStyle,
    /// HTTP client settings
    pub client: ClientConfig,
}

impl Default for Config {
    fn default() -> Self {
        Self {
            rules_path: PathBuf::from(DEFAULT_RULES_PATH),
            scripts_dir: PathBuf::from(DEFAULT_SCRIPTS_DIR),
            highlight: HighlightStyle::default(),
            client: ClientConfig::default(),
        }
    }
}

impl Config {
    /// Reads a JSON config file
    ///
    /// # Errors
    /// - `ConfigNotFound` if the file does not exist
    /// - `Json` if it is not valid JSON for [`Config`]
    pub fn from_file(path: &Path) -> Result<Self> {
        let text = read_config(path)?;
        Ok(serde_json::from_str(&text)?)
    }
}

/// Reads every entry of a scraper rules file
///
/// # Errors
/// - `ConfigNotFound` if the file does not exist
/// - `Json` if the file is not a JSON array of objects
pub fn load_rules(path: &Path) -> Result<Vec<RawSiteRule>> {
    let text = read_config(path)?;
    Ok(serde_json::from_str(&text)?)
}

/// Keeps the complete entries, warning about the others
pub fn complete_rules(raw: Vec<RawSiteRule>) -> Vec<SiteRule> {
    raw.into_iter()
        .filter_map(|entry| {
            let rule = entry.clone().into_rule();
            if rule.is_none() {
                warn!(
                    "Skipping entry due to missing 'name', 'job-url-class-selector', or 'pagination' keys: {:?}",
                    entry
                );
            }
            rule
        })
        .collect()
}

/// Finds the rule for `site`
///
/// With a rules file, the site must be one of its complete entries.
/// Without one, only the built-in jobber.md rule is known.
///
/// # Errors
/// - `UnknownSite` if no rule has that name
/// - Any error from [`load_rules`]
pub fn find_rule(rules_path: Option<&Path>, site: &str) -> Result<SiteRule> {
    let Some(path) = rules_path else {
        if site.eq_ignore_ascii_case(JOBBER_SITE) {
            return Ok(SiteRule::jobber());
        }
        return Err(JobprobeError::UnknownSite(site.to_string()));
    };

    complete_rules(load_rules(path)?)
        .into_iter()
        .find(|rule| rule.name.eq_ignore_ascii_case(site))
        .ok_or_else(|| JobprobeError::UnknownSite(site.to_string()))
}

fn read_config(path: &Path) -> Result<String> {
    fs::read_to_string(path).map_err(|e| match e.kind() {
        ErrorKind::NotFound => JobprobeError::ConfigNotFound(path.to_path_buf()),
        _ => JobprobeError::Io(e),
    })
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::io::Write;
    use tempfile::NamedTempFile;

    fn rules_file(json: &str) -> NamedTempFile {
        let mut file = NamedTempFile::new().unwrap();
        file.write_all(json.as_bytes()).unwrap();
        file
    }

    const RULES: &str = r#"[
        {"name": "jobber.md", "job-url-class-selector": "a.mui-8ugpds", "pagination": "https://jobber.md/jobs/page-{page}/"},
        {"name": "delucru.md", "job-url-class-selector": "a.job-title", "pagination": "https://www.delucru.md/jobs?page={page}"},
        {"name": "broken.md", "pagination": "https://broken.md/{page}"}
    ]"#;

    #[test]
    fn test_config_default() {
        let config = Config::default();
        assert_eq!(config.rules_path, PathBuf::from("config/scraper_rules.json"));
        assert_eq!(config.scripts_dir, PathBuf::from("js"));
        assert_eq!(config.highlight, HighlightStyle::default());
    }

    #[test]
    fn test_config_from_partial_file() {
        let file = rules_file(r#"{"scripts_dir": "out", "client": {"timeout_secs": 3}}"#);
        let config = Config::from_file(file.path()).unwrap();
        assert_eq!(config.scripts_dir, PathBuf::from("out"));
        assert_eq!(config.client.timeout_secs, 3);
        assert_eq!(config.rules_path, PathBuf::from(DEFAULT_RULES_PATH));
    }

    #[test]
    fn test_load_rules_keeps_incomplete_entries() {
        let file = rules_file(RULES);
        let raw = load_rules(file.path()).unwrap();
        assert_eq!(raw.len(), 3);
        assert_eq!(complete_rules(raw).len(), 2);
    }

    #[test]
    fn test_load_rules_missing_file() {
        let result = load_rules(Path::new("does/not/exist.json"));
        assert!(matches!(result, Err(JobprobeError::ConfigNotFound(_))));
    }

    #[test]
    fn test_load_rules_invalid_json() {
        let file = rules_file("{not json");
        assert!(matches!(load_rules(file.path()), Err(JobprobeError::Json(_))));
    }

    #[test]
    fn test_find_rule_in_file() {
        let file = rules_file(RULES);
        let rule = find_rule(Some(file.path()), "delucru.md").unwrap();
        assert_eq!(rule.job_url_selector, "a.job-title");
    }

    #[test]
    fn test_find_rule_skipped_entry_is_unknown() {
        let file = rules_file(RULES);
        let result = find_rule(Some(file.path()), "broken.md");
        assert!(matches!(result, Err(JobprobeError::UnknownSite(_))));
    }

    #[test]
    fn test_find_rule_builtin() {
        assert_eq!(find_rule(None, "jobber.md").unwrap(), SiteRule::jobber());
        assert!(matches!(find_rule(None, "rabota.md"), Err(JobprobeError::UnknownSite(_))));
    }
}
