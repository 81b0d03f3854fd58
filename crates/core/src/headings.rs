//! Heading hierarchy reconstruction and structural issue detection.
//!
//! The input is the flat, order-preserving sequence of heading observations
//! produced by scanning a document top to bottom. From it this module builds
//! the nested heading forest, the per-level counts, the optional keyword
//! presence facts, and the ordered list of structural issues.

use std::collections::BTreeMap;

use serde::{Deserialize, Serialize};

/// Heading level h1..h6, parsed once at ingestion.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum HeadingLevel {
    H1,
    H2,
    H3,
    H4,
    H5,
    H6,
}

impl HeadingLevel {
    /// Numeric rank 1-6. Lower rank means higher in the hierarchy.
    pub fn rank(self) -> u8 {
        match self {
            HeadingLevel::H1 => 1,
            HeadingLevel::H2 => 2,
            HeadingLevel::H3 => 3,
            HeadingLevel::H4 => 4,
            HeadingLevel::H5 => 5,
            HeadingLevel::H6 => 6,
        }
    }

    pub fn from_rank(rank: u8) -> Option<HeadingLevel> {
        match rank {
            1 => Some(HeadingLevel::H1),
            2 => Some(HeadingLevel::H2),
            3 => Some(HeadingLevel::H3),
            4 => Some(HeadingLevel::H4),
            5 => Some(HeadingLevel::H5),
            6 => Some(HeadingLevel::H6),
            _ => None,
        }
    }

    /// Parse an element name like `h2` (case-insensitive).
    pub fn from_tag(tag: &str) -> Option<HeadingLevel> {
        match tag.to_ascii_lowercase().as_str() {
            "h1" => Some(HeadingLevel::H1),
            "h2" => Some(HeadingLevel::H2),
            "h3" => Some(HeadingLevel::H3),
            "h4" => Some(HeadingLevel::H4),
            "h5" => Some(HeadingLevel::H5),
            "h6" => Some(HeadingLevel::H6),
            _ => None,
        }
    }

    pub fn tag(self) -> &'static str {
        match self {
            HeadingLevel::H1 => "h1",
            HeadingLevel::H2 => "h2",
            HeadingLevel::H3 => "h3",
            HeadingLevel::H4 => "h4",
            HeadingLevel::H5 => "h5",
            HeadingLevel::H6 => "h6",
        }
    }
}

/// One heading element as encountered while scanning a document in source
/// order. `order` is 1-based and strictly increasing per document.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct HeadingObservation {
    #[serde(rename = "tag")]
    pub level: HeadingLevel,
    pub text: String,
    pub order: usize,
}

/// A node in the reconstructed heading hierarchy. Children always have a
/// strictly greater rank than their parent and keep their source order.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct HeadingNode {
    #[serde(rename = "tag")]
    pub level: HeadingLevel,
    pub text: String,
    pub order: usize,
    pub children: Vec<HeadingNode>,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(rename_all = "snake_case")]
pub enum IssueKind {
    MissingH1,
    MultipleH1,
    EmptyHeading,
    SkippedLevel,
    NoH1First,
    KeywordMissingH1,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(rename_all = "lowercase")]
pub enum Severity {
    Critical,
    High,
    Medium,
    Low,
}

/// A detected structural defect. Issues are produced in a deterministic
/// order that is part of the output contract.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct SeoIssue {
    #[serde(rename = "type")]
    pub kind: IssueKind,
    pub severity: Severity,
    pub detail: String,
}

/// Where a target keyword showed up across the headings.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct KeywordPresence {
    pub keyword: String,
    pub in_h1: bool,
    pub h2_matches: Vec<String>,
    pub total_matches: usize,
}

/// Complete headings result: the reconstructed tree, the raw flat list,
/// per-level counts, optional keyword facts, and the detected issues.
#[derive(Debug, Clone, Serialize)]
pub struct HeadingAnalysis {
    pub heading_tree: Vec<HeadingNode>,
    pub flat_list: Vec<HeadingObservation>,
    pub counts: BTreeMap<HeadingLevel, usize>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub keyword_presence: Option<KeywordPresence>,
    pub issues: Vec<SeoIssue>,
}

/// Count observations per heading level. Only observed levels get an entry.
pub fn count_by_level(flat: &[HeadingObservation]) -> BTreeMap<HeadingLevel, usize> {
    let mut counts = BTreeMap::new();
    for observation in flat {
        *counts.entry(observation.level).or_insert(0) += 1;
    }
    counts
}

/// Reconstruct the heading forest from the flat sequence.
///
/// Maintains a stack of open ancestors. Each incoming heading closes every
/// open heading of equal or deeper rank (equal rank does not nest, it
/// becomes a sibling), then attaches to the remaining stack top or becomes
/// a new forest root. Single left-to-right pass; every node is pushed and
/// popped exactly once.
pub fn build_heading_tree(flat: &[HeadingObservation]) -> Vec<HeadingNode> {
    let mut roots: Vec<HeadingNode> = Vec::new();
    let mut stack: Vec<HeadingNode> = Vec::new();

    for observation in flat {
        let node = HeadingNode {
            level: observation.level,
            text: observation.text.clone(),
            order: observation.order,
            children: Vec::new(),
        };

        while stack
            .last()
            .is_some_and(|open| open.level.rank() >= node.level.rank())
        {
            let closed = stack.pop().unwrap();
            match stack.last_mut() {
                Some(parent) => parent.children.push(closed),
                None => roots.push(closed),
            }
        }

        stack.push(node);
    }

    while let Some(closed) = stack.pop() {
        match stack.last_mut() {
            Some(parent) => parent.children.push(closed),
            None => roots.push(closed),
        }
    }

    roots
}

/// Check every heading for a case-insensitive substring match of `keyword`.
pub fn find_keyword(flat: &[HeadingObservation], keyword: &str) -> KeywordPresence {
    let needle = keyword.to_lowercase();
    let mut in_h1 = false;
    let mut h2_matches = Vec::new();
    let mut total_matches = 0;

    for observation in flat {
        if observation.text.to_lowercase().contains(&needle) {
            total_matches += 1;
            match observation.level {
                HeadingLevel::H1 => in_h1 = true,
                HeadingLevel::H2 => h2_matches.push(observation.text.clone()),
                _ => {}
            }
        }
    }

    KeywordPresence {
        keyword: keyword.to_string(),
        in_h1,
        h2_matches,
        total_matches,
    }
}

/// Detect structural heading issues.
///
/// Detection order is fixed: H1 count, empty headings in source order,
/// skipped levels in ascending order, first-heading rank, keyword-in-H1.
/// Identical inputs always produce the identical issue list.
pub fn detect_heading_issues(
    flat: &[HeadingObservation],
    counts: &BTreeMap<HeadingLevel, usize>,
    max_h1: usize,
    keyword: Option<&KeywordPresence>,
) -> Vec<SeoIssue> {
    let mut issues = Vec::new();

    let h1_count = counts.get(&HeadingLevel::H1).copied().unwrap_or(0);
    if h1_count == 0 {
        issues.push(SeoIssue {
            kind: IssueKind::MissingH1,
            severity: Severity::Critical,
            detail: "Page has no H1 heading".to_string(),
        });
    } else if h1_count > max_h1 {
        issues.push(SeoIssue {
            kind: IssueKind::MultipleH1,
            severity: Severity::High,
            detail: format!("Page has {h1_count} H1 headings; recommended maximum is {max_h1}"),
        });
    }

    for observation in flat {
        if observation.text.trim().is_empty() {
            issues.push(SeoIssue {
                kind: IssueKind::EmptyHeading,
                severity: Severity::Medium,
                detail: format!("Heading at position {} is empty", observation.order),
            });
        }
    }

    // BTreeMap keys iterate in ascending rank order already.
    let used: Vec<u8> = counts.keys().map(|level| level.rank()).collect();
    if used.len() > 1 {
        for pair in used.windows(2) {
            let (lower, upper) = (pair[0], pair[1]);
            if upper - lower > 1 {
                let detail = if upper - lower == 2 {
                    format!(
                        "Heading level H{} skipped between H{lower} and H{upper}",
                        lower + 1
                    )
                } else {
                    format!(
                        "Heading levels H{}-H{} skipped between H{lower} and H{upper}",
                        lower + 1,
                        upper - 1
                    )
                };
                issues.push(SeoIssue {
                    kind: IssueKind::SkippedLevel,
                    severity: Severity::Medium,
                    detail,
                });
            }
        }
    }

    if let Some(first) = flat.first() {
        if first.level != HeadingLevel::H1 {
            issues.push(SeoIssue {
                kind: IssueKind::NoH1First,
                severity: Severity::Medium,
                detail: format!(
                    "First heading is an {} element; the document should open with an H1",
                    first.level.tag().to_uppercase()
                ),
            });
        }
    }

    if let Some(presence) = keyword {
        if !presence.in_h1 {
            issues.push(SeoIssue {
                kind: IssueKind::KeywordMissingH1,
                severity: Severity::High,
                detail: format!(
                    "Target keyword \"{}\" does not appear in any H1 heading",
                    presence.keyword
                ),
            });
        }
    }

    issues
}

/// Run the full headings pipeline over one flat sequence.
pub fn analyze_headings(
    flat: Vec<HeadingObservation>,
    keyword: Option<&str>,
    max_h1: usize,
) -> HeadingAnalysis {
    let counts = count_by_level(&flat);
    let keyword_presence = keyword.map(|needle| find_keyword(&flat, needle));
    let issues = detect_heading_issues(&flat, &counts, max_h1, keyword_presence.as_ref());
    let heading_tree = build_heading_tree(&flat);

    HeadingAnalysis {
        heading_tree,
        flat_list: flat,
        counts,
        keyword_presence,
        issues,
    }
}
