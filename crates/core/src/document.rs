//! Fact extraction from an already-fetched HTML document.
//!
//! Everything here operates on an in-memory HTML string; fetching is the
//! shell's job. The extracted [`DocumentFacts`] value feeds the sub-analysis
//! builders in [`crate::page`].

use regex::Regex;
use scraper::{Html, Selector};

use crate::headings::{HeadingLevel, HeadingObservation};

/// The Open Graph meta tags of a document, unvalidated.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct OpenGraphTags {
    pub title: Option<String>,
    pub description: Option<String>,
    pub image: Option<String>,
    pub url: Option<String>,
    pub og_type: Option<String>,
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ImageFact {
    pub src: Option<String>,
    pub alt: Option<String>,
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct LinkFact {
    pub href: String,
    pub is_internal: bool,
}

/// Everything one scan extracts from a document.
#[derive(Debug, Clone, Default)]
pub struct DocumentFacts {
    pub title: Option<String>,
    pub meta_description: Option<String>,
    pub canonical: Option<String>,
    pub robots_directive: Option<String>,
    pub open_graph: OpenGraphTags,
    pub headings: Vec<HeadingObservation>,
    pub images: Vec<ImageFact>,
    pub links: Vec<LinkFact>,
    pub word_count: usize,
}

/// Remove script and style tags from HTML
pub fn clean_html(html: &str) -> String {
    let script_regex = Regex::new(r"(?is)<script\b[^>]*>.*?</script>").unwrap();
    let html = script_regex.replace_all(html, "");

    let style_regex = Regex::new(r"(?is)<style\b[^>]*>.*?</style>").unwrap();
    let html = style_regex.replace_all(&html, "");

    html.to_string()
}

/// Collapse whitespace runs to single spaces and trim the ends.
pub fn normalize_whitespace(text: &str) -> String {
    text.split_whitespace().collect::<Vec<_>>().join(" ")
}

/// Extract the host of an absolute URL, lowercased and without a leading
/// `www.` prefix. Returns `None` for relative URLs.
pub fn host_of(url: &str) -> Option<String> {
    let re = Regex::new(r"^[a-zA-Z][a-zA-Z0-9+.-]*://([^/?#]+)").unwrap();
    re.captures(url)
        .and_then(|caps| caps.get(1))
        .map(|host| host.as_str().trim_start_matches("www.").to_lowercase())
}

/// Classify a link target as internal to `base_host` or external.
///
/// Relative targets (including fragments) are internal; mailto/tel/javascript
/// targets are external; absolute and protocol-relative targets compare hosts.
pub fn is_internal_link(href: &str, base_host: Option<&str>) -> bool {
    let href = href.trim();
    let lowered = href.to_lowercase();

    if lowered.starts_with("mailto:")
        || lowered.starts_with("tel:")
        || lowered.starts_with("javascript:")
    {
        return false;
    }

    if let Some(rest) = href.strip_prefix("//") {
        let host = rest
            .split(['/', '?', '#'])
            .next()
            .unwrap_or("")
            .trim_start_matches("www.")
            .to_lowercase();
        return base_host.is_some_and(|base| host == base);
    }

    if lowered.starts_with("http://") || lowered.starts_with("https://") {
        return match (host_of(href), base_host) {
            (Some(host), Some(base)) => host == base,
            _ => false,
        };
    }

    true
}

fn select_text(document: &Html, selector: &str) -> Option<String> {
    let selector = Selector::parse(selector).unwrap();
    document
        .select(&selector)
        .next()
        .map(|element| normalize_whitespace(&element.text().collect::<String>()))
        .filter(|text| !text.is_empty())
}

fn select_attr(document: &Html, selector: &str, attr: &str) -> Option<String> {
    let selector = Selector::parse(selector).unwrap();
    document
        .select(&selector)
        .next()
        .and_then(|element| element.value().attr(attr))
        .map(|value| value.trim().to_string())
        .filter(|value| !value.is_empty())
}

/// Scan a document and extract every fact the analyzers consume.
///
/// `base_url` is only used to classify links as internal or external.
/// Heading text is whitespace-normalized and headings keep their source
/// order (1-based). Word counting runs over the script/style-stripped body.
pub fn scan_document(html: &str, base_url: &str) -> DocumentFacts {
    let cleaned = clean_html(html);
    let document = Html::parse_document(&cleaned);
    let base_host = host_of(base_url);

    let open_graph = OpenGraphTags {
        title: select_attr(&document, r#"meta[property="og:title"]"#, "content"),
        description: select_attr(&document, r#"meta[property="og:description"]"#, "content"),
        image: select_attr(&document, r#"meta[property="og:image"]"#, "content"),
        url: select_attr(&document, r#"meta[property="og:url"]"#, "content"),
        og_type: select_attr(&document, r#"meta[property="og:type"]"#, "content"),
    };

    let heading_selector = Selector::parse("h1, h2, h3, h4, h5, h6").unwrap();
    let mut headings = Vec::new();
    for element in document.select(&heading_selector) {
        if let Some(level) = HeadingLevel::from_tag(element.value().name()) {
            headings.push(HeadingObservation {
                level,
                text: normalize_whitespace(&element.text().collect::<String>()),
                order: headings.len() + 1,
            });
        }
    }

    let img_selector = Selector::parse("img").unwrap();
    let images = document
        .select(&img_selector)
        .map(|element| ImageFact {
            src: element.value().attr("src").map(str::to_string),
            alt: element.value().attr("alt").map(str::to_string),
        })
        .collect();

    let link_selector = Selector::parse("a[href]").unwrap();
    let links = document
        .select(&link_selector)
        .filter_map(|element| {
            let href = element.value().attr("href")?.trim().to_string();
            if href.is_empty() {
                return None;
            }
            let is_internal = is_internal_link(&href, base_host.as_deref());
            Some(LinkFact { href, is_internal })
        })
        .collect();

    let body_selector = Selector::parse("body").unwrap();
    let word_count = document
        .select(&body_selector)
        .next()
        .map(|body| {
            body.text()
                .map(|chunk| chunk.split_whitespace().count())
                .sum::<usize>()
        })
        .unwrap_or(0);

    DocumentFacts {
        title: select_text(&document, "title"),
        meta_description: select_attr(&document, r#"meta[name="description"]"#, "content"),
        canonical: select_attr(&document, r#"link[rel="canonical"]"#, "href"),
        robots_directive: select_attr(&document, r#"meta[name="robots"]"#, "content"),
        open_graph,
        headings,
        images,
        links,
        word_count,
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    const FIXTURE: &str = r##"<!DOCTYPE html>
<html>
<head>
    <title>  Example   Store  </title>
    <meta name="description" content="A store that sells examples of all shapes and sizes.">
    <meta name="robots" content="index, follow">
    <link rel="canonical" href="https://example.com/store">
    <meta property="og:title" content="Example Store">
    <meta property="og:image" content="https://example.com/cover.png">
    <meta property="og:type" content="website">
    <style>h1 { color: red; }</style>
</head>
<body>
    <h1>  Example
        Store  </h1>
    <h2>Products</h2>
    <h3>Gadgets</h3>
    <h2>About us</h2>
    <p>We sell examples. Lots of them.</p>
    <img src="/a.png" alt="A gadget">
    <img src="/b.png" alt="">
    <img src="/c.png">
    <a href="/products">Products</a>
    <a href="https://example.com/about">About</a>
    <a href="https://www.example.com/contact">Contact</a>
    <a href="https://other.example.net/partner">Partner</a>
    <a href="mailto:hi@example.com">Mail</a>
    <a href="#top">Top</a>
    <script>console.log("noise words everywhere");</script>
</body>
</html>"##;

    #[test]
    fn test_scan_extracts_head_facts() {
        let facts = scan_document(FIXTURE, "https://example.com/store");

        assert_eq!(facts.title.as_deref(), Some("Example Store"));
        assert_eq!(
            facts.meta_description.as_deref(),
            Some("A store that sells examples of all shapes and sizes.")
        );
        assert_eq!(facts.canonical.as_deref(), Some("https://example.com/store"));
        assert_eq!(facts.robots_directive.as_deref(), Some("index, follow"));
        assert_eq!(facts.open_graph.title.as_deref(), Some("Example Store"));
        assert_eq!(
            facts.open_graph.image.as_deref(),
            Some("https://example.com/cover.png")
        );
        assert_eq!(facts.open_graph.og_type.as_deref(), Some("website"));
        assert!(facts.open_graph.description.is_none());
        assert!(facts.open_graph.url.is_none());
    }

    #[test]
    fn test_scan_headings_in_order_and_normalized() {
        let facts = scan_document(FIXTURE, "https://example.com/store");

        let tags: Vec<&str> = facts
            .headings
            .iter()
            .map(|h| h.level.tag())
            .collect();
        assert_eq!(tags, vec!["h1", "h2", "h3", "h2"]);

        let orders: Vec<usize> = facts.headings.iter().map(|h| h.order).collect();
        assert_eq!(orders, vec![1, 2, 3, 4]);

        // Inner newlines and runs of spaces collapse to single spaces.
        assert_eq!(facts.headings[0].text, "Example Store");
        assert_eq!(facts.headings[3].text, "About us");
    }

    #[test]
    fn test_scan_images_keep_missing_attributes() {
        let facts = scan_document(FIXTURE, "https://example.com/store");

        assert_eq!(facts.images.len(), 3);
        assert_eq!(facts.images[0].alt.as_deref(), Some("A gadget"));
        assert_eq!(facts.images[1].alt.as_deref(), Some(""));
        assert!(facts.images[2].alt.is_none());
    }

    #[test]
    fn test_scan_links_classified_against_base_host() {
        let facts = scan_document(FIXTURE, "https://example.com/store");

        let internal: Vec<&str> = facts
            .links
            .iter()
            .filter(|l| l.is_internal)
            .map(|l| l.href.as_str())
            .collect();
        let external: Vec<&str> = facts
            .links
            .iter()
            .filter(|l| !l.is_internal)
            .map(|l| l.href.as_str())
            .collect();

        assert_eq!(
            internal,
            vec![
                "/products",
                "https://example.com/about",
                "https://www.example.com/contact",
                "#top"
            ]
        );
        assert_eq!(
            external,
            vec!["https://other.example.net/partner", "mailto:hi@example.com"]
        );
    }

    #[test]
    fn test_scan_word_count_ignores_script_and_style() {
        let facts = scan_document(FIXTURE, "https://example.com/store");

        assert!(facts.word_count > 0);
        // The script body would add several words if it leaked through.
        let plain = scan_document(
            "<html><body><p>one two three</p><script>four five six seven eight nine ten</script></body></html>",
            "https://example.com",
        );
        assert_eq!(plain.word_count, 3);
    }

    #[test]
    fn test_scan_empty_document() {
        let facts = scan_document("<html><body></body></html>", "https://example.com");

        assert!(facts.title.is_none());
        assert!(facts.meta_description.is_none());
        assert!(facts.headings.is_empty());
        assert!(facts.images.is_empty());
        assert!(facts.links.is_empty());
        assert_eq!(facts.word_count, 0);
    }

    #[test]
    fn test_scan_empty_title_is_none() {
        let facts = scan_document(
            "<html><head><title>   </title></head><body></body></html>",
            "https://example.com",
        );

        assert!(facts.title.is_none());
    }

    #[test]
    fn test_clean_html_removes_script_and_style() {
        let html = r#"<div>Content</div><script>alert('hi');</script><style>.c { color: red; }</style><p>More</p>"#;
        let cleaned = clean_html(html);
        assert!(!cleaned.contains("<script"));
        assert!(!cleaned.contains("<style"));
        assert!(cleaned.contains("<div>Content</div>"));
        assert!(cleaned.contains("<p>More</p>"));
    }

    #[test]
    fn test_normalize_whitespace() {
        assert_eq!(normalize_whitespace("  a \t b\n\nc  "), "a b c");
        assert_eq!(normalize_whitespace("plain"), "plain");
        assert_eq!(normalize_whitespace("   "), "");
    }

    #[test]
    fn test_host_of_variants() {
        assert_eq!(
            host_of("https://www.Example.com/path?q=1").as_deref(),
            Some("example.com")
        );
        assert_eq!(host_of("http://example.com").as_deref(), Some("example.com"));
        assert_eq!(host_of("/relative/path"), None);
        assert_eq!(host_of("mailto:hi@example.com"), None);
    }

    #[test]
    fn test_is_internal_link() {
        let base = Some("example.com");

        assert!(is_internal_link("/about", base));
        assert!(is_internal_link("about.html", base));
        assert!(is_internal_link("#section", base));
        assert!(is_internal_link("https://example.com/x", base));
        assert!(is_internal_link("//example.com/cdn.js", base));

        assert!(!is_internal_link("https://other.net/x", base));
        assert!(!is_internal_link("//cdn.other.net/x", base));
        assert!(!is_internal_link("mailto:a@b.c", base));
        assert!(!is_internal_link("tel:+123", base));
        assert!(!is_internal_link("javascript:void(0)", base));
        assert!(!is_internal_link("https://example.com/x", None));
    }
}
