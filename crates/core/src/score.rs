//! The composite scoring model.
//!
//! Each category scores independently on a 0-100 scale, then the overall
//! score blends five top-level categories plus one synthetic `technical`
//! category through the fixed weight table in [`crate::config::ScoreWeights`].
//! The technical umbrella exists so four low-impact signals (canonical,
//! Open Graph, robots, content) do not each need top-level weight slots.

use serde::Serialize;

use crate::config::{ScoreWeights, SeoThresholds};
use crate::headings::{HeadingAnalysis, HeadingLevel};
use crate::page::{
    CanonicalAnalysis, ContentAnalysis, ImageAnalysis, LinkAnalysis, MetaDescriptionAnalysis,
    OpenGraphAnalysis, PageAnalysis, RobotsAnalysis, TitleAnalysis,
};

/// Per-category rounded sub-scores. Diagnostic; the `overall` field is the
/// single blended number.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
pub struct ScoreBreakdown {
    pub title: u8,
    pub meta: u8,
    pub headings: u8,
    pub images: u8,
    pub links: u8,
    pub technical: u8,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
pub struct SeoScore {
    pub overall: u8,
    pub breakdown: ScoreBreakdown,
}

/// Constrain a raw score to the 0-100 range.
pub fn clamp_score(value: f64) -> f64 {
    value.clamp(0.0, 100.0)
}

fn length_score(length: usize, min: usize, max: usize, ideal_min: usize, ideal_max: usize) -> f64 {
    if length >= ideal_min && length <= ideal_max {
        100.0
    } else if length >= min && length <= max {
        80.0
    } else if length > max {
        50.0
    } else if length > 0 {
        40.0
    } else {
        60.0
    }
}

pub fn score_title(title: &TitleAnalysis, thresholds: &SeoThresholds) -> f64 {
    if title.text.is_none() {
        return 0.0;
    }

    let base = length_score(
        title.length,
        thresholds.title_min_length,
        thresholds.title_max_length,
        thresholds.title_ideal_min,
        thresholds.title_ideal_max,
    );

    clamp_score(base - 10.0 * title.issues.len() as f64)
}

pub fn score_meta_description(
    meta: &MetaDescriptionAnalysis,
    thresholds: &SeoThresholds,
) -> f64 {
    if meta.text.is_none() {
        return 0.0;
    }

    let base = length_score(
        meta.length,
        thresholds.meta_min_length,
        thresholds.meta_max_length,
        thresholds.meta_ideal_min,
        thresholds.meta_ideal_max,
    );

    clamp_score(base - 10.0 * meta.issues.len() as f64)
}

pub fn score_headings(headings: &HeadingAnalysis, thresholds: &SeoThresholds) -> f64 {
    let mut score = 100.0;

    let h1_count = headings
        .counts
        .get(&HeadingLevel::H1)
        .copied()
        .unwrap_or(0);
    if h1_count == 0 {
        score -= 40.0;
    } else if h1_count > thresholds.max_h1_count {
        score -= 20.0;
    }

    if headings.flat_list.is_empty() {
        score -= 30.0;
    }

    score -= 10.0 * headings.issues.len() as f64;

    clamp_score(score)
}

pub fn score_images(images: &ImageAnalysis) -> f64 {
    // A page without images is not penalized.
    if images.total == 0 {
        return 100.0;
    }

    let mut score = 100.0;

    let missing_ratio = images.missing_alt as f64 / images.total as f64;
    if missing_ratio > 0.5 {
        score -= 40.0;
    } else if missing_ratio > 0.2 {
        score -= 20.0;
    } else if missing_ratio > 0.0 {
        score -= 10.0;
    }

    score -= 5.0 * images.issues.len() as f64;

    clamp_score(score)
}

pub fn score_links(links: &LinkAnalysis, thresholds: &SeoThresholds) -> f64 {
    let mut score = 100.0;

    if links.internal == 0 {
        score -= 20.0;
    }
    if links.total > thresholds.max_links_per_page {
        score -= 15.0;
    }
    if links.total == 0 {
        score -= 30.0;
    }

    clamp_score(score)
}

pub fn score_canonical(canonical: &CanonicalAnalysis) -> f64 {
    match &canonical.url {
        None => 30.0,
        Some(_) => clamp_score(100.0 - 15.0 * canonical.issues.len() as f64),
    }
}

pub fn score_open_graph(open_graph: &OpenGraphAnalysis) -> f64 {
    let mut score = 0.0;

    if open_graph.title.is_some() {
        score += 25.0;
    }
    if open_graph.description.is_some() {
        score += 25.0;
    }
    if open_graph.image.is_some() {
        score += 25.0;
    }
    if open_graph.url.is_some() {
        score += 15.0;
    }
    if open_graph.og_type.is_some() {
        score += 10.0;
    }

    score -= 10.0 * open_graph.issues.len() as f64;

    clamp_score(score)
}

pub fn score_robots(robots: &RobotsAnalysis) -> f64 {
    if robots.is_indexable {
        100.0
    } else {
        20.0
    }
}

pub fn score_content(content: Option<&ContentAnalysis>, thresholds: &SeoThresholds) -> f64 {
    let Some(content) = content else {
        return 50.0;
    };

    let mut score = 100.0;
    if content.word_count < thresholds.thin_content_words {
        score -= 40.0;
    } else if content.word_count < thresholds.min_content_words {
        score -= 20.0;
    }

    clamp_score(score)
}

/// Blend every category into the overall score.
///
/// `technical` is the weighted average of the canonical, Open Graph, robots,
/// and content scores over their own sub-weights, and enters the blend with
/// the sum of those sub-weights.
pub fn calculate_score(
    analysis: &PageAnalysis,
    weights: &ScoreWeights,
    thresholds: &SeoThresholds,
) -> SeoScore {
    let title = score_title(&analysis.title, thresholds);
    let meta = score_meta_description(&analysis.meta_description, thresholds);
    let headings = score_headings(&analysis.headings, thresholds);
    let images = score_images(&analysis.images);
    let links = score_links(&analysis.links, thresholds);

    let canonical = score_canonical(&analysis.canonical);
    let open_graph = score_open_graph(&analysis.open_graph);
    let robots = score_robots(&analysis.robots);
    let content = score_content(analysis.content.as_ref(), thresholds);

    let technical_weight = weights.technical();
    let technical = (canonical * weights.canonical
        + open_graph * weights.open_graph
        + robots * weights.robots
        + content * weights.content)
        / technical_weight;

    let blended = [
        (title, weights.title),
        (meta, weights.meta_description),
        (headings, weights.headings),
        (images, weights.images),
        (links, weights.links),
        (technical, technical_weight),
    ];
    let total_weight: f64 = blended.iter().map(|(_, weight)| weight).sum();
    let overall = blended
        .iter()
        .map(|(score, weight)| score * weight)
        .sum::<f64>()
        / total_weight;

    SeoScore {
        overall: clamp_score(overall).round() as u8,
        breakdown: ScoreBreakdown {
            title: title.round() as u8,
            meta: meta.round() as u8,
            headings: headings.round() as u8,
            images: images.round() as u8,
            links: links.round() as u8,
            technical: technical.round() as u8,
        },
    }
}
