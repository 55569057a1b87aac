use std::path::PathBuf;

use clap::{Args, Parser, Subcommand};

#[derive(Parser, Debug)]
#[command(name = "jobprobe")]
#[command(about = "Check scraper selectors and pagination on job listing pages")]
#[command(version)]
pub struct Cli {
    /// Increase verbosity (-v info, -vv debug)
    #[arg(short, long, global = true, action = clap::ArgAction::Count)]
    pub verbose: u8,

    /// JSON config file overriding the built-in defaults
    #[arg(short, long, global = true, value_name = "FILE")]
    pub config: Option<PathBuf>,

    #[command(subcommand)]
    pub command: Command,
}

#[derive(Subcommand, Debug)]
pub enum Command {
    /// Highlight job and pagination links of one page
    Inspect(InspectArgs),

    /// Print the guessed first-page URL for a listing URL
    FirstPage(FirstPageArgs),

    /// Write browser-console debug scripts for every site rule
    Generate(GenerateArgs),
}

#[derive(Args, Debug)]
pub struct InspectArgs {
    /// Address of the page being inspected
    #[arg(short, long)]
    pub url: String,

    /// Read the page from this HTML file instead of fetching the URL
    #[arg(long, value_name = "FILE")]
    pub html: Option<PathBuf>,

    /// Site rule to use
    #[arg(short, long, default_value = jobprobe_core::JOBBER_SITE)]
    pub site: String,

    /// Scraper rules file
    #[arg(short, long, value_name = "FILE")]
    pub rules: Option<PathBuf>,

    /// Write the highlighted page here
    #[arg(short, long, value_name = "FILE")]
    pub output: Option<PathBuf>,

    /// Remove the highlights again before writing the page
    #[arg(long)]
    pub reset: bool,

    /// Print the inspection report as JSON
    #[arg(long)]
    pub json: bool,
}

#[derive(Args, Debug)]
pub struct FirstPageArgs {
    /// Listing URL currently open
    pub url: String,

    /// Site rule to use
    #[arg(short, long, default_value = jobprobe_core::JOBBER_SITE)]
    pub site: String,

    /// Scraper rules file
    #[arg(short, long, value_name = "FILE")]
    pub rules: Option<PathBuf>,
}

#[derive(Args, Debug)]
pub struct GenerateArgs {
    /// Scraper rules file
    #[arg(short, long, value_name = "FILE")]
    pub rules: Option<PathBuf>,

    /// Output directory for the scripts
    #[arg(short, long, value_name = "DIR")]
    pub out: Option<PathBuf>,
}

#[cfg(test)]
mod tests {
    use super::*;
    use clap::CommandFactory;

    #[test]
    fn test_cli_definition() {
        Cli::command().debug_assert();
    }

    #[test]
    fn test_parse_inspect() {
        let cli = Cli::try_parse_from([
            "jobprobe",
            "-vv",
            "inspect",
            "--url",
            "https://jobber.md/jobs/page-3/",
            "--html",
            "page.html",
            "--reset",
        ])
        .unwrap();
        assert_eq!(cli.verbose, 2);
        let Command::Inspect(args) = cli.command else {
            panic!("Expected inspect command");
        };
        assert_eq!(args.site, "jobber.md");
        assert_eq!(args.html, Some(PathBuf::from("page.html")));
        assert!(args.reset);
        assert!(!args.json);
    }

    #[test]
    fn test_parse_first_page() {
        let cli = Cli::try_parse_from(["jobprobe", "first-page", "https://jobber.md/jobs/PAGE-7/"])
            .unwrap();
        let Command::FirstPage(args) = cli.command else {
            panic!("Expected first-page command");
        };
        assert_eq!(args.url, "https://jobber.md/jobs/PAGE-7/");
        assert_eq!(args.rules, None);
    }

    #[test]
    fn test_inspect_requires_url() {
        assert!(Cli::try_parse_from(["jobprobe", "inspect"]).is_err());
    }
}
