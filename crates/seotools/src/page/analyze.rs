use crate::prelude::{println, *};
use chrono::Utc;
use colored::Colorize;
use seotools_core::config::AnalysisConfig;
use seotools_core::document::scan_document;
use seotools_core::page::{build_page_report, PageReport};
use serde::Serialize;
use std::io::IsTerminal;
use std::time::Instant;

use super::{build_client, fetch_page_html, normalize_url, severity_label};

#[derive(Debug, clap::Args, Clone)]
pub struct AnalyzeOptions {
    /// URL of the page to analyze (bare domains get https://)
    #[clap(env = "SEOTOOLS_URL")]
    pub url: String,

    /// Target keyword to check against the page headings
    #[arg(short, long, env = "SEOTOOLS_KEYWORD")]
    pub keyword: Option<String>,

    /// Skip the body content analysis
    #[arg(long)]
    pub skip_content: bool,

    /// Output as JSON
    #[arg(long)]
    pub json: bool,
}

/// Page report plus fetch metadata stamped by the shell.
#[derive(Debug, Serialize)]
pub struct AnalyzeOutput {
    #[serde(flatten)]
    pub report: PageReport,
    pub fetch_time_ms: u64,
    pub fetched_at: String,
}

pub async fn run(options: AnalyzeOptions, global: crate::Global) -> Result<()> {
    if global.verbose {
        println!("Analyzing page: {}", options.url);
    }

    let output = analyze_page_data(
        options.url.clone(),
        options.keyword.clone(),
        options.skip_content,
        &global,
    )
    .await?;

    if options.json || !std::io::stdout().is_terminal() {
        output_json(&output)?;
    } else {
        output_formatted(&output)?;
    }

    Ok(())
}

/// Fetches a page and runs the full analysis pipeline over it
pub async fn analyze_page_data(
    url: String,
    keyword: Option<String>,
    skip_content: bool,
    global: &crate::Global,
) -> Result<AnalyzeOutput> {
    let url = normalize_url(&url)?;
    let client = build_client(global)?;

    // Fetch the page (I/O)
    let start = Instant::now();
    let html = fetch_page_html(&client, &url).await?;
    let fetch_time_ms = start.elapsed().as_millis() as u64;

    // Scan, analyze, and score using core functions
    let facts = scan_document(&html, &url);
    let config = AnalysisConfig {
        skip_content,
        ..AnalysisConfig::default()
    };
    let report = build_page_report(url, facts, keyword.as_deref(), &config);

    Ok(AnalyzeOutput {
        report,
        fetch_time_ms,
        fetched_at: Utc::now().to_rfc3339(),
    })
}

/// Build JSON string for the analysis report
fn format_report_json(output: &AnalyzeOutput) -> Result<String> {
    serde_json::to_string_pretty(output).map_err(|e| eyre!("JSON serialization failed: {}", e))
}

fn output_json(output: &AnalyzeOutput) -> Result<()> {
    let json = format_report_json(output)?;
    println!("{}", json);
    Ok(())
}

fn score_cell(score: u8) -> colored::ColoredString {
    let text = f!("{score}/100");
    if score >= 80 {
        text.green()
    } else if score >= 50 {
        text.yellow()
    } else {
        text.red()
    }
}

fn push_issue_section(result: &mut String, label: &str, issues: &[String]) {
    for issue in issues {
        result.push_str(&f!(
            "  {} {}: {}\n",
            "-".bright_black(),
            label.green(),
            issue.white()
        ));
    }
}

/// Build formatted text output for the analysis report
fn format_report_text(output: &AnalyzeOutput) -> String {
    let analysis = &output.report.analysis;
    let score = &output.report.score;
    let mut result = String::new();

    // Header
    result.push_str(&f!("\n{}\n", "=".repeat(80).bright_cyan()));
    result.push_str(&f!("{}\n", "SEO ANALYSIS".bright_cyan().bold()));
    result.push_str(&f!("{}\n", "=".repeat(80).bright_cyan()));

    result.push_str(&f!(
        "\n{}: {}\n",
        "URL".green(),
        analysis.url.cyan().underline()
    ));
    if let Some(title) = &analysis.title.text {
        result.push_str(&f!(
            "{}: {}\n",
            "Title".green(),
            title.bright_white().bold()
        ));
    }
    result.push_str(&f!(
        "{}: {}\n",
        "Fetch Time".green(),
        f!("{} ms", output.fetch_time_ms).bright_yellow()
    ));
    result.push_str(&f!(
        "{}: {}\n",
        "Fetched At".green(),
        output.fetched_at.bright_black()
    ));

    // Score section
    result.push_str(&f!("\n{}\n", "=".repeat(80).bright_magenta()));
    result.push_str(&f!(
        "{} {}\n",
        "SCORE".bright_magenta().bold(),
        f!("({} overall)", score.overall).bright_cyan().bold()
    ));
    result.push_str(&f!("{}\n", "=".repeat(80).bright_magenta()));
    result.push('\n');

    let mut table = crate::prelude::new_table();
    table.add_row(prettytable::row![
        "Category".bold().cyan(),
        "Score".bold().cyan()
    ]);
    table.add_row(prettytable::row!["Title", score_cell(score.breakdown.title)]);
    table.add_row(prettytable::row![
        "Meta description",
        score_cell(score.breakdown.meta)
    ]);
    table.add_row(prettytable::row![
        "Headings",
        score_cell(score.breakdown.headings)
    ]);
    table.add_row(prettytable::row![
        "Images",
        score_cell(score.breakdown.images)
    ]);
    table.add_row(prettytable::row!["Links", score_cell(score.breakdown.links)]);
    table.add_row(prettytable::row![
        "Technical",
        score_cell(score.breakdown.technical)
    ]);
    table.add_row(prettytable::row![
        "Overall".bold(),
        score_cell(score.overall).bold()
    ]);
    result.push_str(&table.to_string());

    // Issues section
    let heading_issues = &analysis.headings.issues;
    let flat_issue_count = analysis.title.issues.len()
        + analysis.meta_description.issues.len()
        + analysis.canonical.issues.len()
        + analysis.open_graph.issues.len()
        + analysis.images.issues.len()
        + analysis.links.issues.len()
        + analysis.content.as_ref().map_or(0, |c| c.issues.len());

    result.push_str(&f!("\n{}\n", "=".repeat(80).bright_magenta()));
    result.push_str(&f!(
        "{} {}\n",
        "ISSUES".bright_magenta().bold(),
        f!("({} found)", heading_issues.len() + flat_issue_count)
            .bright_cyan()
            .bold()
    ));
    result.push_str(&f!("{}\n", "=".repeat(80).bright_magenta()));

    if heading_issues.is_empty() && flat_issue_count == 0 {
        result.push_str(&f!("\n{}\n", "No issues detected.".green()));
    } else {
        result.push('\n');
        for issue in heading_issues {
            result.push_str(&f!(
                "  {} {} [{}]: {}\n",
                "-".bright_black(),
                "Headings".green(),
                severity_label(issue.severity),
                issue.detail.white()
            ));
        }
        push_issue_section(&mut result, "Title", &analysis.title.issues);
        push_issue_section(
            &mut result,
            "Meta description",
            &analysis.meta_description.issues,
        );
        push_issue_section(&mut result, "Canonical", &analysis.canonical.issues);
        push_issue_section(&mut result, "Open Graph", &analysis.open_graph.issues);
        push_issue_section(&mut result, "Images", &analysis.images.issues);
        push_issue_section(&mut result, "Links", &analysis.links.issues);
        if let Some(content) = &analysis.content {
            push_issue_section(&mut result, "Content", &content.issues);
        }
    }

    // Robots note
    if !analysis.robots.is_indexable {
        result.push_str(&f!(
            "\n{} {}\n",
            "Warning:".bright_red().bold(),
            "page is blocked from indexing by its robots directive".white()
        ));
    }

    // Usage section
    result.push_str(&f!("\n{}\n", "=".repeat(80).bright_yellow()));
    result.push_str(&f!("{}\n", "USAGE".bright_yellow().bold()));
    result.push_str(&f!("{}\n", "=".repeat(80).bright_yellow()));

    result.push_str(&f!(
        "\n{}:\n",
        "To inspect the heading hierarchy".bright_white().bold()
    ));
    result.push_str(&f!(
        "  {}\n",
        f!("seotools page headings {}", analysis.url).cyan()
    ));
    result.push_str(&f!(
        "\n{}:\n",
        "To check a target keyword".bright_white().bold()
    ));
    result.push_str(&f!(
        "  {}\n",
        f!("seotools page analyze {} --keyword <keyword>", analysis.url).cyan()
    ));
    result.push_str(&f!("\n{}:\n", "To get JSON output".bright_white().bold()));
    result.push_str(&f!(
        "  {}\n",
        f!("seotools page analyze {} --json", analysis.url).cyan()
    ));
    result.push('\n');

    result
}

fn output_formatted(output: &AnalyzeOutput) -> Result<()> {
    let formatted = format_report_text(output);
    print!("{}", formatted);
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;

    const FIXTURE: &str = r#"<html>
<head>
    <title>Example Store - Gadgets and Widgets for Everyone</title>
    <meta name="description" content="Buy gadgets and widgets at the example store, with free shipping on every order and a lifetime warranty included.">
    <link rel="canonical" href="https://example.com/store">
</head>
<body>
    <h1>Example Store</h1>
    <h2>Products</h2>
    <h4>Gadgets</h4>
    <p>Words about gadgets and widgets.</p>
    <a href="/products">Products</a>
    <a href="https://partner.example.net">Partner</a>
    <img src="/a.png">
</body>
</html>"#;

    fn fixture_output() -> AnalyzeOutput {
        let url = "https://example.com/store".to_string();
        let facts = scan_document(FIXTURE, &url);
        let report = build_page_report(
            url,
            facts,
            Some("widgets"),
            &AnalysisConfig::default(),
        );

        AnalyzeOutput {
            report,
            fetch_time_ms: 123,
            fetched_at: "2025-01-01T00:00:00+00:00".to_string(),
        }
    }

    #[test]
    fn test_format_report_json_shape() {
        let output = fixture_output();

        let json = format_report_json(&output).unwrap();
        let value: serde_json::Value = serde_json::from_str(&json).unwrap();

        assert_eq!(value["url"], "https://example.com/store");
        assert_eq!(value["fetch_time_ms"], 123);
        assert!(value["score"]["overall"].is_number());
        assert!(value["score"]["breakdown"]["technical"].is_number());
        assert_eq!(value["headings"]["counts"]["h1"], 1);
        // The h3 gap between h2 and h4 must be reported.
        assert!(json.contains("skipped_level"));
    }

    #[test]
    fn test_format_report_text_sections() {
        let output = fixture_output();

        let result = format_report_text(&output);

        assert!(result.contains("SEO ANALYSIS"));
        assert!(result.contains("https://example.com/store"));
        assert!(result.contains("Example Store - Gadgets and Widgets for Everyone"));
        assert!(result.contains("SCORE"));
        assert!(result.contains("Meta description"));
        assert!(result.contains("Technical"));
        assert!(result.contains("Overall"));
        assert!(result.contains("ISSUES"));
        assert!(result.contains("USAGE"));
        assert!(result.contains("123 ms"));
    }

    #[test]
    fn test_format_report_text_lists_detected_issues() {
        let output = fixture_output();

        let result = format_report_text(&output);

        // The fixture skips H3 and its keyword is absent from the H1.
        assert!(result.contains("skipped"));
        assert!(result.contains("widgets"));
        assert!(result.contains("missing alt text"));
    }

    #[test]
    fn test_format_report_text_clean_page_has_no_issue_lines() {
        let html = r#"<html>
<head>
    <title>A title sized to sit inside the ideal window yes</title>
    <meta name="description" content="A meta description written to land comfortably inside the ideal length window for scoring, with some filler to get it there ok.">
    <link rel="canonical" href="https://example.com/">
    <meta property="og:title" content="T">
    <meta property="og:description" content="D">
    <meta property="og:image" content="https://example.com/c.png">
    <meta property="og:url" content="https://example.com/">
    <meta property="og:type" content="website">
</head>
<body>
    <h1>Heading</h1>
    <p>{}</p>
    <a href="/in">In</a>
</body>
</html>"#
            .replace("{}", &"word ".repeat(700));
        let url = "https://example.com/".to_string();
        let report = build_page_report(
            url.clone(),
            scan_document(&html, &url),
            None,
            &AnalysisConfig::default(),
        );
        let output = AnalyzeOutput {
            report,
            fetch_time_ms: 5,
            fetched_at: "2025-01-01T00:00:00+00:00".to_string(),
        };

        let result = format_report_text(&output);

        assert!(result.contains("No issues detected."));
        assert!(!result.contains("Warning:"));
    }
}
