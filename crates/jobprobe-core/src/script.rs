//! Browser-console debug script generation
//!
//! Renders, for each site rule, a JavaScript snippet to paste into the
//! developer console of a live listing page. The snippet does in the browser
//! what [`crate::Inspection`] does on a parsed page.

use std::fs;
use std::path::{Path, PathBuf};

use tracing::{info, warn};

use crate::config::{complete_rules, load_rules};
use crate::error::{JobprobeError, Result};
use crate::highlight::HighlightStyle;
use crate::types::SiteRule;
use crate::url::PaginationPattern;

/// Console script template; `__NAME__` tokens are substituted per site
const DEBUG_SCRIPT_JS: &str = r#"// jobprobe debug script for __SITE__
console.log('Highlighting job links and pagination on __SITE__');

const jobLinkSelector = '__JOB_SELECTOR__';
const paginationSelector = '__PAGINATION_SELECTOR__';
const pageNumberRegex = new RegExp('__PAGE_REGEX__', 'i');

const currentUrl = window.location.href;
const firstPageUrl = pageNumberRegex.test(currentUrl)
  ? currentUrl.replace(pageNumberRegex, '__REPLACEMENT__')
  : '__FIRST_PAGE_URL__';
console.log('Potential first page URL (copy and paste into address bar):', firstPageUrl);

const highlightStyle = {
  outline: '__OUTLINE__',
  outlineOffset: '__OUTLINE_OFFSET__',
  backgroundColor: '__BACKGROUND_COLOR__',
};
const snapshots = new Map();

function highlightElement(element) {
  if (!element || element.style.outline || snapshots.has(element)) {
    return;
  }
  snapshots.set(element, {
    outline: element.style.outline,
    outlineOffset: element.style.outlineOffset,
    backgroundColor: element.style.backgroundColor,
  });
  Object.assign(element.style, highlightStyle);
}

function removeHighlight(element) {
  const snapshot = element && snapshots.get(element);
  if (!snapshot) {
    return;
  }
  Object.assign(element.style, snapshot);
  snapshots.delete(element);
}

const jobLinks = document.querySelectorAll(jobLinkSelector);
console.log(`Found ${jobLinks.length} job links matching selector "${jobLinkSelector}".`);
jobLinks.forEach((link) => highlightElement(link));

const paginationLinks = document.querySelectorAll(paginationSelector);
console.log(`Found ${paginationLinks.length} potential pagination links matching selector "${paginationSelector}".`);
paginationLinks.forEach((link) => highlightElement(link));

window.__REMOVE_FN__ = function () {
  jobLinks.forEach(removeHighlight);
  paginationLinks.forEach(removeHighlight);
  console.log('Highlights removed for __SITE__.');
};

console.log('Highlighting complete. Check the console for counts and the potential first page URL. Run __REMOVE_FN__() to remove highlights.');
"#;

/// Makes a site name usable as a file name
///
/// # Example
/// ```
/// use jobprobe_core::script::sanitize_site_name;
/// assert_eq!(sanitize_site_name("jobber.md"), "jobber_md");
/// ```
pub fn sanitize_site_name(name: &str) -> String {
    name.replace(['.', '/', '\\', ' '], "_")
}

/// Name of the global reset function installed by a site's script
///
/// # Example
/// ```
/// use jobprobe_core::script::remove_function_name;
/// assert_eq!(remove_function_name("jobber.md"), "removeJOBBER_MDHighlights");
/// ```
pub fn remove_function_name(site: &str) -> String {
    let ident: String = sanitize_site_name(site)
        .to_uppercase()
        .chars()
        .map(|c| if c.is_ascii_alphanumeric() || c == '_' { c } else { '_' })
        .collect();
    format!("remove{}Highlights", ident)
}

/// Renders the console script for one site
///
/// # Errors
/// - `InvalidPattern` if the pagination template yields a bad regex
pub fn render_script(rule: &SiteRule, style: &HighlightStyle) -> Result<String> {
    let pattern = PaginationPattern::derive(&rule.pagination)?;

    let values = [
        ("__JOB_SELECTOR__", js_escape(&rule.job_url_selector)),
        ("__PAGINATION_SELECTOR__", js_escape(&pattern.link_selector())),
        ("__PAGE_REGEX__", js_escape(&js_regex(pattern.regex().as_str()))),
        ("__REPLACEMENT__", js_escape(&js_replacement(pattern.replacement()))),
        ("__FIRST_PAGE_URL__", js_escape(pattern.first_page_url())),
        ("__OUTLINE__", js_escape(&style.outline)),
        ("__OUTLINE_OFFSET__", js_escape(&style.outline_offset)),
        ("__BACKGROUND_COLOR__", js_escape(&style.background_color)),
        ("__REMOVE_FN__", remove_function_name(&rule.name)),
        ("__SITE__", js_escape(&rule.name)),
    ];

    Ok(fill_placeholders(DEBUG_SCRIPT_JS, &values))
}

/// Replaces every placeholder of `template` in one left-to-right pass
///
/// Substituted text is never scanned again.
fn fill_placeholders(template: &str, values: &[(&str, String)]) -> String {
    let mut out = String::with_capacity(template.len());
    let mut rest = template;
    while let Some((start, key, value)) = values
        .iter()
        .filter_map(|(key, value)| rest.find(key).map(|start| (start, *key, value)))
        .min_by_key(|(start, _, _)| *start)
    {
        out.push_str(&rest[..start]);
        out.push_str(value);
        rest = &rest[start + key.len()..];
    }
    out.push_str(rest);
    out
}

/// Generates debug scripts for every complete rule in a rules file
///
/// # Errors
/// - `ConfigNotFound` / `Json` if the rules file cannot be read
/// - `NoScriptsGenerated` if no script was written
pub fn generate_scripts(
    rules_path: &Path,
    out_dir: &Path,
    style: &HighlightStyle,
) -> Result<Vec<PathBuf>> {
    let rules = complete_rules(load_rules(rules_path)?);
    write_scripts(&rules, out_dir, style)
}

/// Writes one `<sanitized name>.js` per rule into `out_dir`
///
/// Rules whose script cannot be rendered or written are logged and skipped.
pub fn write_scripts(
    rules: &[SiteRule],
    out_dir: &Path,
    style: &HighlightStyle,
) -> Result<Vec<PathBuf>> {
    fs::create_dir_all(out_dir)?;

    let mut generated = Vec::new();
    for rule in rules {
        let script = match render_script(rule, style) {
            Ok(script) => script,
            Err(e) => {
                warn!("Skipping '{}': {}", rule.name, e);
                continue;
            }
        };

        let path = out_dir.join(format!("{}.js", sanitize_site_name(&rule.name)));
        match fs::write(&path, script) {
            Ok(()) => {
                info!("  - Generated: {}", path.display());
                generated.push(path);
            }
            Err(e) => warn!("Error writing file {}: {}", path.display(), e),
        }
    }

    if generated.is_empty() {
        return Err(JobprobeError::NoScriptsGenerated);
    }

    info!(
        "Successfully generated {} debug JavaScript files in '{}'.",
        generated.len(),
        out_dir.display()
    );
    info!("The scripts log the potential first page URL; navigate to it manually.");
    Ok(generated)
}

/// Escapes text for a single-quoted JavaScript string literal
fn js_escape(text: &str) -> String {
    let mut out = String::with_capacity(text.len());
    for c in text.chars() {
        match c {
            '\\' => out.push_str("\\\\"),
            '\'' => out.push_str("\\'"),
            '\n' => out.push_str("\\n"),
            '\r' => out.push_str("\\r"),
            '\u{2028}' => out.push_str("\\u2028"),
            '\u{2029}' => out.push_str("\\u2029"),
            _ => out.push(c),
        }
    }
    out
}

/// Converts `regex` crate named groups to JavaScript syntax
fn js_regex(regex: &str) -> String {
    regex.replace("(?P<", "(?<")
}

/// Converts `${name}` group references to JavaScript `$<name>`
fn js_replacement(replacement: &str) -> String {
    let mut out = String::with_capacity(replacement.len());
    let mut rest = replacement;
    while let Some(start) = rest.find("${") {
        let Some(len) = rest[start..].find('}') else {
            break;
        };
        out.push_str(&rest[..start]);
        out.push_str("$<");
        out.push_str(&rest[start + 2..start + len]);
        out.push('>');
        rest = &rest[start + len + 1..];
    }
    out.push_str(rest);
    out
}
