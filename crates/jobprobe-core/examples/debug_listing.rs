//! Debug script to check the jobber.md selectors against the live listing
//!
//! Run with: cargo run --example debug_listing -p jobprobe-core [URL]

use jobprobe_core::{HighlightStyle, Inspection, PageClient, SiteRule};

#[tokio::main]
async fn main() -> Result<(), Box<dyn std::error::Error>> {
    tracing_subscriber::fmt().with_target(false).init();

    let url = std::env::args()
        .nth(1)
        .unwrap_or_else(|| "https://jobber.md/jobs/page-2/".to_string());

    println!("Fetching {}...\n", url);
    let page = PageClient::new()?.fetch_page(&url).await?;

    let mut inspection = Inspection::run(page, &SiteRule::jobber(), &HighlightStyle::default())?;
    let report = inspection.report();

    println!("Job links:        {}", report.job_links);
    println!("Pagination links: {}", report.pagination_links);
    println!("First page:       {}", report.first_page_url);

    std::fs::write("debug_listing.html", inspection.render_html())?;
    println!("\nHighlighted HTML saved to debug_listing.html");

    inspection.reset();
    Ok(())
}
