use crate::prelude::{println, *};
use colored::Colorize;
use regex::Regex;
use seotools_core::headings::Severity;

pub mod analyze;
pub mod headings;

// Re-export public data functions
pub use analyze::analyze_page_data;
pub use headings::analyze_headings_data;

#[derive(Debug, clap::Parser)]
#[command(name = "page")]
#[command(about = "Analyze web pages for SEO quality")]
pub struct App {
    #[command(subcommand)]
    pub command: Commands,
}

#[derive(Debug, clap::Subcommand)]
pub enum Commands {
    /// Run the full SEO analysis and composite score for a page
    #[clap(name = "analyze")]
    Analyze(analyze::AnalyzeOptions),

    /// Inspect the heading hierarchy and its structural issues
    #[clap(name = "headings")]
    Headings(headings::HeadingsOptions),
}

pub async fn run(app: App, global: crate::Global) -> Result<()> {
    if global.verbose {
        println!("Timeout: {}s", global.timeout);
        println!("User-Agent: {}", global.user_agent);
        println!();
    }

    match app.command {
        Commands::Analyze(options) => analyze::run(options, global).await,
        Commands::Headings(options) => headings::run(options, global).await,
    }
}

// Shared utility functions
pub fn normalize_url(input: &str) -> Result<String> {
    let trimmed = input.trim();
    if trimmed.is_empty() {
        return Err(Error::InvalidUrl(input.to_string()).into());
    }

    if let Some((scheme, _)) = trimmed.split_once("://") {
        if scheme.eq_ignore_ascii_case("http") || scheme.eq_ignore_ascii_case("https") {
            return Ok(trimmed.to_string());
        }
        return Err(Error::InvalidUrl(trimmed.to_string()).into());
    }

    // A scheme without "//" (mailto:, javascript:) is not fetchable. A colon
    // followed by digits is a port, not a scheme.
    let scheme_re = Regex::new(r"^[a-zA-Z][a-zA-Z0-9+.-]*:[^0-9]").unwrap();
    if scheme_re.is_match(trimmed) {
        return Err(Error::InvalidUrl(trimmed.to_string()).into());
    }

    // Bare domains get https.
    Ok(f!("https://{trimmed}"))
}

pub fn build_client(global: &crate::Global) -> Result<reqwest::Client> {
    reqwest::Client::builder()
        .timeout(std::time::Duration::from_secs(global.timeout))
        .user_agent(global.user_agent.clone())
        .build()
        .map_err(|e| eyre!("Failed to build HTTP client: {e}"))
}

pub fn severity_label(severity: Severity) -> colored::ColoredString {
    let label = f!("{:?}", severity).to_lowercase();
    match severity {
        Severity::Critical => label.bright_red().bold(),
        Severity::High => label.red(),
        Severity::Medium => label.yellow(),
        Severity::Low => label.bright_black(),
    }
}

pub async fn fetch_page_html(client: &reqwest::Client, url: &str) -> Result<String> {
    let response = client
        .get(url)
        .send()
        .await
        .map_err(|e| Error::Network(e.to_string()))?;

    let status = response.status();
    if !status.is_success() {
        return Err(Error::FetchStatus {
            status: status.as_u16(),
            url: url.to_string(),
        }
        .into());
    }

    response
        .text()
        .await
        .map_err(|e| Error::Network(e.to_string()).into())
}
