//! Per-category sub-analyses and full page analysis assembly.
//!
//! Each builder is a pure constructor from [`DocumentFacts`] fields to one
//! category record, recording its own issue strings. [`build_page_report`]
//! assembles every category and attaches the composite score.

use serde::Serialize;

use crate::config::{AnalysisConfig, SeoThresholds};
use crate::document::{DocumentFacts, ImageFact, LinkFact, OpenGraphTags};
use crate::headings::{analyze_headings, HeadingAnalysis};
use crate::score::{calculate_score, SeoScore};

#[derive(Debug, Clone, Serialize)]
pub struct TitleAnalysis {
    pub text: Option<String>,
    pub length: usize,
    pub issues: Vec<String>,
}

#[derive(Debug, Clone, Serialize)]
pub struct MetaDescriptionAnalysis {
    pub text: Option<String>,
    pub length: usize,
    pub issues: Vec<String>,
}

#[derive(Debug, Clone, Serialize)]
pub struct CanonicalAnalysis {
    pub url: Option<String>,
    pub issues: Vec<String>,
}

#[derive(Debug, Clone, Serialize)]
pub struct RobotsAnalysis {
    pub directive: Option<String>,
    pub is_indexable: bool,
    pub is_followable: bool,
}

#[derive(Debug, Clone, Serialize)]
pub struct OpenGraphAnalysis {
    pub title: Option<String>,
    pub description: Option<String>,
    pub image: Option<String>,
    pub url: Option<String>,
    #[serde(rename = "type")]
    pub og_type: Option<String>,
    pub issues: Vec<String>,
}

#[derive(Debug, Clone, Serialize)]
pub struct ImageAnalysis {
    pub total: usize,
    pub missing_alt: usize,
    pub issues: Vec<String>,
}

#[derive(Debug, Clone, Serialize)]
pub struct LinkAnalysis {
    pub internal: usize,
    pub external: usize,
    pub total: usize,
    pub issues: Vec<String>,
}

#[derive(Debug, Clone, Serialize)]
pub struct ContentAnalysis {
    pub word_count: usize,
    pub issues: Vec<String>,
}

/// The fully populated analysis snapshot the scorer consumes. Every
/// sub-analysis is computed before scoring; the scorer never recomputes or
/// mutates any of these fields.
#[derive(Debug, Clone, Serialize)]
pub struct PageAnalysis {
    pub url: String,
    pub title: TitleAnalysis,
    pub meta_description: MetaDescriptionAnalysis,
    pub canonical: CanonicalAnalysis,
    pub robots: RobotsAnalysis,
    pub open_graph: OpenGraphAnalysis,
    pub headings: HeadingAnalysis,
    pub images: ImageAnalysis,
    pub links: LinkAnalysis,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub content: Option<ContentAnalysis>,
}

/// A page analysis with its composite score attached.
#[derive(Debug, Clone, Serialize)]
pub struct PageReport {
    #[serde(flatten)]
    pub analysis: PageAnalysis,
    pub score: SeoScore,
}

pub fn analyze_title(text: Option<String>, thresholds: &SeoThresholds) -> TitleAnalysis {
    let length = text.as_ref().map(|t| t.chars().count()).unwrap_or(0);
    let mut issues = Vec::new();

    match &text {
        None => issues.push("Page is missing a title tag".to_string()),
        Some(_) if length < thresholds.title_min_length => issues.push(format!(
            "Title is too short ({length} characters; minimum {})",
            thresholds.title_min_length
        )),
        Some(_) if length > thresholds.title_max_length => issues.push(format!(
            "Title is too long ({length} characters; maximum {})",
            thresholds.title_max_length
        )),
        _ => {}
    }

    TitleAnalysis {
        text,
        length,
        issues,
    }
}

pub fn analyze_meta_description(
    text: Option<String>,
    thresholds: &SeoThresholds,
) -> MetaDescriptionAnalysis {
    let length = text.as_ref().map(|t| t.chars().count()).unwrap_or(0);
    let mut issues = Vec::new();

    match &text {
        None => issues.push("Page is missing a meta description".to_string()),
        Some(_) if length < thresholds.meta_min_length => issues.push(format!(
            "Meta description is too short ({length} characters; minimum {})",
            thresholds.meta_min_length
        )),
        Some(_) if length > thresholds.meta_max_length => issues.push(format!(
            "Meta description is too long ({length} characters; maximum {})",
            thresholds.meta_max_length
        )),
        _ => {}
    }

    MetaDescriptionAnalysis {
        text,
        length,
        issues,
    }
}

pub fn analyze_canonical(url: Option<String>) -> CanonicalAnalysis {
    let mut issues = Vec::new();

    if let Some(canonical) = &url {
        if !canonical.starts_with("http://") && !canonical.starts_with("https://") {
            issues.push("Canonical URL is not absolute".to_string());
        }
    }

    CanonicalAnalysis { url, issues }
}

pub fn analyze_robots(directive: Option<String>) -> RobotsAnalysis {
    let lowered = directive.as_deref().map(str::to_lowercase);
    let is_indexable = lowered.as_deref().is_none_or(|d| !d.contains("noindex"));
    let is_followable = lowered.as_deref().is_none_or(|d| !d.contains("nofollow"));

    RobotsAnalysis {
        directive,
        is_indexable,
        is_followable,
    }
}

pub fn analyze_open_graph(tags: OpenGraphTags) -> OpenGraphAnalysis {
    let mut issues = Vec::new();

    if let Some(image) = &tags.image {
        if !image.starts_with("http://") && !image.starts_with("https://") {
            issues.push("og:image is not an absolute URL".to_string());
        }
    }

    OpenGraphAnalysis {
        title: tags.title,
        description: tags.description,
        image: tags.image,
        url: tags.url,
        og_type: tags.og_type,
        issues,
    }
}

pub fn analyze_images(images: &[ImageFact]) -> ImageAnalysis {
    let total = images.len();
    let missing_alt = images
        .iter()
        .filter(|image| image.alt.as_deref().is_none_or(|alt| alt.trim().is_empty()))
        .count();
    let empty_src = images
        .iter()
        .filter(|image| image.src.as_deref().is_none_or(|src| src.trim().is_empty()))
        .count();

    let mut issues = Vec::new();
    if missing_alt > 0 {
        issues.push(format!("{missing_alt} of {total} images are missing alt text"));
    }
    if empty_src > 0 {
        issues.push(format!("{empty_src} images have an empty src attribute"));
    }

    ImageAnalysis {
        total,
        missing_alt,
        issues,
    }
}

pub fn analyze_links(links: &[LinkFact], thresholds: &SeoThresholds) -> LinkAnalysis {
    let total = links.len();
    let internal = links.iter().filter(|link| link.is_internal).count();
    let external = total - internal;

    let mut issues = Vec::new();
    if total > 0 && internal == 0 {
        issues.push("Page has no internal links".to_string());
    }
    if total > thresholds.max_links_per_page {
        issues.push(format!(
            "Page has {total} links; recommended maximum is {}",
            thresholds.max_links_per_page
        ));
    }

    LinkAnalysis {
        internal,
        external,
        total,
        issues,
    }
}

pub fn analyze_content(word_count: usize, thresholds: &SeoThresholds) -> ContentAnalysis {
    let mut issues = Vec::new();

    if word_count < thresholds.thin_content_words {
        issues.push(format!(
            "Page body has {word_count} words; fewer than {} counts as thin content",
            thresholds.thin_content_words
        ));
    } else if word_count < thresholds.min_content_words {
        issues.push(format!(
            "Page body has {word_count} words; {} or more is recommended",
            thresholds.min_content_words
        ));
    }

    ContentAnalysis { word_count, issues }
}

/// Assemble every sub-analysis from the scanned facts and attach the
/// composite score.
pub fn build_page_report(
    url: String,
    facts: DocumentFacts,
    keyword: Option<&str>,
    config: &AnalysisConfig,
) -> PageReport {
    let thresholds = &config.thresholds;

    let analysis = PageAnalysis {
        title: analyze_title(facts.title, thresholds),
        meta_description: analyze_meta_description(facts.meta_description, thresholds),
        canonical: analyze_canonical(facts.canonical),
        robots: analyze_robots(facts.robots_directive),
        open_graph: analyze_open_graph(facts.open_graph),
        headings: analyze_headings(facts.headings, keyword, thresholds.max_h1_count),
        images: analyze_images(&facts.images),
        links: analyze_links(&facts.links, thresholds),
        content: (!config.skip_content)
            .then(|| analyze_content(facts.word_count, thresholds)),
        url,
    };

    let score = calculate_score(&analysis, &config.weights, thresholds);

    PageReport { analysis, score }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::document::scan_document;

    fn thresholds() -> SeoThresholds {
        SeoThresholds::default()
    }

    #[test]
    fn test_analyze_title_missing() {
        let analysis = analyze_title(None, &thresholds());

        assert_eq!(analysis.length, 0);
        assert_eq!(analysis.issues.len(), 1);
        assert!(analysis.issues[0].contains("missing"));
    }

    #[test]
    fn test_analyze_title_too_short() {
        let analysis = analyze_title(Some("Hi".to_string()), &thresholds());

        assert_eq!(analysis.length, 2);
        assert_eq!(analysis.issues.len(), 1);
        assert!(analysis.issues[0].contains("too short"));
    }

    #[test]
    fn test_analyze_title_too_long() {
        let analysis = analyze_title(Some("x".repeat(90)), &thresholds());

        assert_eq!(analysis.issues.len(), 1);
        assert!(analysis.issues[0].contains("too long"));
    }

    #[test]
    fn test_analyze_title_in_range() {
        let analysis = analyze_title(Some("A perfectly reasonable page title here".to_string()), &thresholds());

        assert!(analysis.issues.is_empty());
    }

    #[test]
    fn test_analyze_title_counts_characters_not_bytes() {
        let analysis = analyze_title(Some("café".to_string()), &thresholds());

        assert_eq!(analysis.length, 4);
    }

    #[test]
    fn test_analyze_meta_description_bounds() {
        let missing = analyze_meta_description(None, &thresholds());
        assert!(missing.issues[0].contains("missing"));

        let short = analyze_meta_description(Some("Too short".to_string()), &thresholds());
        assert!(short.issues[0].contains("too short"));

        let long = analyze_meta_description(Some("x".repeat(200)), &thresholds());
        assert!(long.issues[0].contains("too long"));

        let fine = analyze_meta_description(Some("d".repeat(150)), &thresholds());
        assert!(fine.issues.is_empty());
    }

    #[test]
    fn test_analyze_canonical() {
        let absolute = analyze_canonical(Some("https://example.com/page".to_string()));
        assert!(absolute.issues.is_empty());

        let relative = analyze_canonical(Some("/page".to_string()));
        assert_eq!(relative.issues.len(), 1);
        assert!(relative.issues[0].contains("not absolute"));

        let missing = analyze_canonical(None);
        assert!(missing.issues.is_empty());
    }

    #[test]
    fn test_analyze_robots() {
        let open = analyze_robots(None);
        assert!(open.is_indexable);
        assert!(open.is_followable);

        let indexed = analyze_robots(Some("index, follow".to_string()));
        assert!(indexed.is_indexable);
        assert!(indexed.is_followable);

        let blocked = analyze_robots(Some("NOINDEX, NOFOLLOW".to_string()));
        assert!(!blocked.is_indexable);
        assert!(!blocked.is_followable);

        let mixed = analyze_robots(Some("noindex".to_string()));
        assert!(!mixed.is_indexable);
        assert!(mixed.is_followable);
    }

    #[test]
    fn test_analyze_open_graph_relative_image() {
        let tags = OpenGraphTags {
            title: Some("T".to_string()),
            image: Some("/cover.png".to_string()),
            ..OpenGraphTags::default()
        };

        let analysis = analyze_open_graph(tags);

        assert_eq!(analysis.issues.len(), 1);
        assert!(analysis.issues[0].contains("og:image"));
    }

    #[test]
    fn test_analyze_open_graph_clean() {
        let tags = OpenGraphTags {
            title: Some("T".to_string()),
            description: Some("D".to_string()),
            image: Some("https://example.com/c.png".to_string()),
            url: Some("https://example.com".to_string()),
            og_type: Some("website".to_string()),
        };

        let analysis = analyze_open_graph(tags);

        assert!(analysis.issues.is_empty());
        assert_eq!(analysis.og_type.as_deref(), Some("website"));
    }

    #[test]
    fn test_analyze_images() {
        let images = vec![
            ImageFact {
                src: Some("/a.png".to_string()),
                alt: Some("A".to_string()),
            },
            ImageFact {
                src: Some("/b.png".to_string()),
                alt: Some("   ".to_string()),
            },
            ImageFact {
                src: None,
                alt: None,
            },
        ];

        let analysis = analyze_images(&images);

        assert_eq!(analysis.total, 3);
        assert_eq!(analysis.missing_alt, 2);
        assert_eq!(analysis.issues.len(), 2);
        assert!(analysis.issues[0].contains("2 of 3"));
        assert!(analysis.issues[1].contains("empty src"));
    }

    #[test]
    fn test_analyze_images_empty() {
        let analysis = analyze_images(&[]);

        assert_eq!(analysis.total, 0);
        assert_eq!(analysis.missing_alt, 0);
        assert!(analysis.issues.is_empty());
    }

    #[test]
    fn test_analyze_links() {
        let links = vec![
            LinkFact {
                href: "/a".to_string(),
                is_internal: true,
            },
            LinkFact {
                href: "https://other.net".to_string(),
                is_internal: false,
            },
        ];

        let analysis = analyze_links(&links, &thresholds());

        assert_eq!(analysis.internal, 1);
        assert_eq!(analysis.external, 1);
        assert_eq!(analysis.total, 2);
        assert!(analysis.issues.is_empty());
    }

    #[test]
    fn test_analyze_links_no_internal() {
        let links = vec![LinkFact {
            href: "https://other.net".to_string(),
            is_internal: false,
        }];

        let analysis = analyze_links(&links, &thresholds());

        assert_eq!(analysis.issues.len(), 1);
        assert!(analysis.issues[0].contains("no internal links"));
    }

    #[test]
    fn test_analyze_links_over_maximum() {
        let links: Vec<LinkFact> = (0..150)
            .map(|i| LinkFact {
                href: format!("/{i}"),
                is_internal: true,
            })
            .collect();

        let analysis = analyze_links(&links, &thresholds());

        assert_eq!(analysis.issues.len(), 1);
        assert!(analysis.issues[0].contains("150"));
        assert!(analysis.issues[0].contains("100"));
    }

    #[test]
    fn test_analyze_content_tiers() {
        let thin = analyze_content(120, &thresholds());
        assert!(thin.issues[0].contains("thin content"));

        let light = analyze_content(450, &thresholds());
        assert_eq!(light.issues.len(), 1);
        assert!(light.issues[0].contains("recommended"));

        let fine = analyze_content(900, &thresholds());
        assert!(fine.issues.is_empty());
    }

    #[test]
    fn test_build_page_report_from_scanned_fixture() {
        let html = r#"<html>
<head>
    <title>Example Store - Gadgets and Widgets for Everyone</title>
    <meta name="robots" content="index">
</head>
<body>
    <h1>Example Store</h1>
    <h2>Products</h2>
    <p>Words words words.</p>
    <a href="/products">Products</a>
</body>
</html>"#;
        let facts = scan_document(html, "https://example.com");

        let report = build_page_report(
            "https://example.com".to_string(),
            facts,
            Some("store"),
            &AnalysisConfig::default(),
        );

        assert_eq!(report.analysis.url, "https://example.com");
        assert!(report.analysis.title.issues.is_empty());
        assert!(report.analysis.headings.issues.is_empty());
        assert!(report
            .analysis
            .headings
            .keyword_presence
            .as_ref()
            .unwrap()
            .in_h1);
        assert!(report.analysis.content.is_some());
        assert!(report.score.overall <= 100);
    }

    #[test]
    fn test_build_page_report_skip_content() {
        let facts = scan_document("<html><body></body></html>", "https://example.com");
        let config = AnalysisConfig {
            skip_content: true,
            ..AnalysisConfig::default()
        };

        let report = build_page_report("https://example.com".to_string(), facts, None, &config);

        assert!(report.analysis.content.is_none());
    }

    #[test]
    fn test_report_wire_format_embeds_score() {
        let facts = scan_document("<html><body><h1>T</h1></body></html>", "https://example.com");
        let report = build_page_report(
            "https://example.com".to_string(),
            facts,
            None,
            &AnalysisConfig::default(),
        );

        let value = serde_json::to_value(&report).unwrap();

        assert!(value.get("url").is_some());
        assert!(value.get("score").is_some());
        assert!(value["score"].get("overall").is_some());
        assert!(value["score"]["breakdown"].get("technical").is_some());
    }
}
