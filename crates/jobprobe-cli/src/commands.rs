//! Subcommand implementations

use std::fs;
use std::path::{Path, PathBuf};

use anyhow::{Context, Result};
use tracing::info;

use jobprobe_core::{
    Config, InspectionReport, Inspection, Page, PageClient, PaginationPattern, SiteRule,
    find_rule, first_page_url, generate_scripts,
};

use crate::cli::{Cli, Command, FirstPageArgs, GenerateArgs, InspectArgs};

pub async fn dispatch(cli: Cli) -> Result<()> {
    let config = match &cli.config {
        Some(path) => Config::from_file(path)
            .with_context(|| format!("Failed to load config {}", path.display()))?,
        None => Config::default(),
    };

    match cli.command {
        Command::Inspect(args) => {
            let json = args.json;
            let report = inspect(args, &config).await?;
            if json {
                println!("{}", serde_json::to_string_pretty(&report)?);
            } else {
                println!("{}", report.first_page_url);
            }
        }
        Command::FirstPage(args) => println!("{}", first_page(&args, &config)?),
        Command::Generate(args) => {
            for path in generate(&args, &config)? {
                println!("{}", path.display());
            }
        }
    }
    Ok(())
}

/// Runs one inspection and writes the resulting page if asked
pub async fn inspect(args: InspectArgs, config: &Config) -> Result<InspectionReport> {
    let rule = resolve_rule(args.rules.as_deref(), config, &args.site)?;

    let page = match &args.html {
        Some(path) => {
            let html = fs::read_to_string(path)
                .with_context(|| format!("Failed to read {}", path.display()))?;
            Page::parse(args.url.as_str(), &html)
        }
        None => PageClient::with_config(&config.client)?
            .fetch_page(&args.url)
            .await
            .with_context(|| format!("Failed to load {}", args.url))?,
    };

    let mut inspection = Inspection::run(page, &rule, &config.highlight)?;
    if args.reset {
        inspection.reset();
    }

    if let Some(output) = &args.output {
        fs::write(output, inspection.render_html())
            .with_context(|| format!("Failed to write {}", output.display()))?;
        info!("Highlighted page written to {}", output.display());
    }

    Ok(inspection.report())
}

pub fn first_page(args: &FirstPageArgs, config: &Config) -> Result<String> {
    let rule = resolve_rule(args.rules.as_deref(), config, &args.site)?;
    let pattern = PaginationPattern::derive(&rule.pagination)?;
    Ok(first_page_url(&args.url, &pattern))
}

pub fn generate(args: &GenerateArgs, config: &Config) -> Result<Vec<PathBuf>> {
    let rules = args.rules.as_deref().unwrap_or(config.rules_path.as_path());
    let out = args.out.as_deref().unwrap_or(config.scripts_dir.as_path());
    Ok(generate_scripts(rules, out, &config.highlight)?)
}

/// Explicit rules file, else the configured one if present, else built-ins
fn resolve_rule(rules: Option<&Path>, config: &Config, site: &str) -> Result<SiteRule> {
    let path = rules.or_else(|| config.rules_path.exists().then_some(config.rules_path.as_path()));
    Ok(find_rule(path, site)?)
}
