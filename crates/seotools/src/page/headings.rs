use crate::prelude::{println, *};
use chrono::Utc;
use colored::Colorize;
use seotools_core::config::SeoThresholds;
use seotools_core::document::scan_document;
use seotools_core::headings::{analyze_headings, HeadingAnalysis, HeadingNode};
use serde::Serialize;
use std::io::IsTerminal;
use std::time::Instant;

use super::{build_client, fetch_page_html, normalize_url, severity_label};

#[derive(Debug, clap::Args, Clone)]
pub struct HeadingsOptions {
    /// URL of the page to analyze (bare domains get https://)
    #[clap(env = "SEOTOOLS_URL")]
    pub url: String,

    /// Target keyword to check against the headings
    #[arg(short, long, env = "SEOTOOLS_KEYWORD")]
    pub keyword: Option<String>,

    /// Output format: indented, markdown, or json (default: indented)
    #[arg(long, env = "SEOTOOLS_OUTPUT", default_value = "indented")]
    pub output: OutputFormat,

    /// Output as JSON (alias for --output json)
    #[arg(long)]
    pub json: bool,
}

#[derive(Debug, Clone, clap::ValueEnum, serde::Serialize, serde::Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum OutputFormat {
    /// Indented text format (2 spaces per depth level)
    Indented,
    /// Markdown nested list format
    Markdown,
    /// JSON format with structured data
    Json,
}

/// Headings payload plus fetch metadata stamped by the shell.
#[derive(Debug, Serialize)]
pub struct HeadingsOutput {
    pub url: String,
    #[serde(flatten)]
    pub analysis: HeadingAnalysis,
    pub fetch_time_ms: u64,
    pub fetched_at: String,
}

pub async fn run(options: HeadingsOptions, global: crate::Global) -> Result<()> {
    if global.verbose {
        println!("Analyzing headings: {}", options.url);
    }

    let output =
        analyze_headings_data(options.url.clone(), options.keyword.clone(), &global).await?;

    // --json takes precedence over --output
    let format = if options.json || !std::io::stdout().is_terminal() {
        OutputFormat::Json
    } else {
        options.output.clone()
    };

    match format {
        OutputFormat::Json => output_json(&output)?,
        _ => output_formatted(&output, &format)?,
    }

    Ok(())
}

/// Fetches a page and runs the heading analysis pipeline over it
pub async fn analyze_headings_data(
    url: String,
    keyword: Option<String>,
    global: &crate::Global,
) -> Result<HeadingsOutput> {
    let url = normalize_url(&url)?;
    let client = build_client(global)?;

    // Fetch the page (I/O)
    let start = Instant::now();
    let html = fetch_page_html(&client, &url).await?;
    let fetch_time_ms = start.elapsed().as_millis() as u64;

    // Scan and analyze using core functions
    let facts = scan_document(&html, &url);
    let thresholds = SeoThresholds::default();
    let analysis = analyze_headings(facts.headings, keyword.as_deref(), thresholds.max_h1_count);

    Ok(HeadingsOutput {
        url,
        analysis,
        fetch_time_ms,
        fetched_at: Utc::now().to_rfc3339(),
    })
}

/// Build JSON string for the headings payload
fn format_headings_json(output: &HeadingsOutput) -> Result<String> {
    serde_json::to_string_pretty(output).map_err(|e| eyre!("JSON serialization failed: {}", e))
}

fn output_json(output: &HeadingsOutput) -> Result<()> {
    let json = format_headings_json(output)?;
    println!("{}", json);
    Ok(())
}

fn render_nodes(nodes: &[HeadingNode], depth: usize, markdown: bool, out: &mut String) {
    for node in nodes {
        let indent = "  ".repeat(depth);
        let text = if node.text.is_empty() {
            "(empty)"
        } else {
            node.text.as_str()
        };
        if markdown {
            out.push_str(&f!("{indent}* [{}] {text}\n", node.level.tag()));
        } else {
            out.push_str(&f!("{indent}[{}] {text}\n", node.level.tag()));
        }
        render_nodes(&node.children, depth + 1, markdown, out);
    }
}

/// Format the heading forest as indented text (2 spaces per depth level)
pub fn format_tree_indented(nodes: &[HeadingNode]) -> String {
    let mut out = String::new();
    render_nodes(nodes, 0, false, &mut out);
    out
}

/// Format the heading forest as a markdown nested list
pub fn format_tree_markdown(nodes: &[HeadingNode]) -> String {
    let mut out = String::new();
    render_nodes(nodes, 0, true, &mut out);
    out
}

/// Build formatted text output with metadata, the tree, issues, and usage hints
fn format_headings_text(output: &HeadingsOutput, format: &OutputFormat) -> String {
    let analysis = &output.analysis;
    let mut result = String::new();

    // Header
    result.push_str(&f!("\n{}\n", "=".repeat(80).bright_cyan()));
    result.push_str(&f!("{}\n", "HEADING ANALYSIS".bright_cyan().bold()));
    result.push_str(&f!("{}\n", "=".repeat(80).bright_cyan()));

    result.push_str(&f!(
        "\n{}: {}\n",
        "URL".green(),
        output.url.cyan().underline()
    ));
    result.push_str(&f!(
        "{}: {}\n",
        "Total Headings".green(),
        analysis.flat_list.len().to_string().bright_yellow().bold()
    ));

    let counts = analysis
        .counts
        .iter()
        .map(|(level, count)| f!("{}: {count}", level.tag()))
        .collect::<Vec<_>>()
        .join(", ");
    if !counts.is_empty() {
        result.push_str(&f!("{}: {}\n", "Counts".green(), counts.bright_white()));
    }
    result.push_str(&f!(
        "{}: {}\n",
        "Fetch Time".green(),
        f!("{} ms", output.fetch_time_ms).bright_yellow()
    ));

    // Keyword section
    if let Some(presence) = &analysis.keyword_presence {
        result.push_str(&f!(
            "\n{}: {}\n",
            "Keyword".green(),
            presence.keyword.bright_white().bold()
        ));
        result.push_str(&f!(
            "{}: {}\n",
            "In H1".green(),
            if presence.in_h1 {
                "yes".green()
            } else {
                "no".red()
            }
        ));
        result.push_str(&f!(
            "{}: {}\n",
            "Total Matches".green(),
            presence.total_matches.to_string().bright_yellow()
        ));
        if !presence.h2_matches.is_empty() {
            result.push_str(&f!(
                "{}: {}\n",
                "Matching H2s".green(),
                presence.h2_matches.join(" | ").bright_white()
            ));
        }
    }

    // Tree section
    result.push_str(&f!("\n{}\n", "=".repeat(80).bright_magenta()));
    result.push_str(&f!("{}\n", "HEADING TREE".bright_magenta().bold()));
    result.push_str(&f!("{}\n", "=".repeat(80).bright_magenta()));
    result.push('\n');

    if analysis.heading_tree.is_empty() {
        result.push_str(&f!("{}\n", "No headings found on this page.".yellow()));
    } else {
        let tree = match format {
            OutputFormat::Markdown => format_tree_markdown(&analysis.heading_tree),
            _ => format_tree_indented(&analysis.heading_tree),
        };
        result.push_str(&tree);
    }

    // Issues section
    result.push_str(&f!("\n{}\n", "=".repeat(80).bright_magenta()));
    result.push_str(&f!(
        "{} {}\n",
        "ISSUES".bright_magenta().bold(),
        f!("({} found)", analysis.issues.len()).bright_cyan().bold()
    ));
    result.push_str(&f!("{}\n", "=".repeat(80).bright_magenta()));

    if analysis.issues.is_empty() {
        result.push_str(&f!("\n{}\n", "No issues detected.".green()));
    } else {
        result.push('\n');
        for issue in &analysis.issues {
            result.push_str(&f!(
                "  {} [{}] {}\n",
                "-".bright_black(),
                severity_label(issue.severity),
                issue.detail.white()
            ));
        }
    }

    // Usage section
    result.push_str(&f!("\n{}\n", "=".repeat(80).bright_yellow()));
    result.push_str(&f!("{}\n", "USAGE".bright_yellow().bold()));
    result.push_str(&f!("{}\n", "=".repeat(80).bright_yellow()));

    result.push_str(&f!(
        "\n{}:\n",
        "To run the full SEO analysis".bright_white().bold()
    ));
    result.push_str(&f!(
        "  {}\n",
        f!("seotools page analyze {}", output.url).cyan()
    ));
    result.push_str(&f!(
        "\n{}:\n",
        "To render the tree as markdown".bright_white().bold()
    ));
    result.push_str(&f!(
        "  {}\n",
        f!("seotools page headings {} --output markdown", output.url).cyan()
    ));
    result.push_str(&f!("\n{}:\n", "To get JSON output".bright_white().bold()));
    result.push_str(&f!(
        "  {}\n",
        f!("seotools page headings {} --json", output.url).cyan()
    ));
    result.push('\n');

    result
}

fn output_formatted(output: &HeadingsOutput, format: &OutputFormat) -> Result<()> {
    let formatted = format_headings_text(output, format);
    print!("{}", formatted);
    Ok(())
}
