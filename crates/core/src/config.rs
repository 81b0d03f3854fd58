//! Thresholds and weights for the analyzers and the scorer.
//!
//! The core reads these values but never owns or validates them; the caller
//! constructs a configuration (usually [`AnalysisConfig::default`]) and passes
//! it by reference into the analysis entry points.

/// Length and count limits used by the sub-analyzers and the scorer.
#[derive(Debug, Clone)]
pub struct SeoThresholds {
    /// Minimum acceptable title length, in characters.
    pub title_min_length: usize,
    /// Maximum acceptable title length, in characters.
    pub title_max_length: usize,
    /// Lower bound of the ideal title length window.
    pub title_ideal_min: usize,
    /// Upper bound of the ideal title length window.
    pub title_ideal_max: usize,
    /// Minimum acceptable meta description length, in characters.
    pub meta_min_length: usize,
    /// Maximum acceptable meta description length, in characters.
    pub meta_max_length: usize,
    /// Lower bound of the ideal meta description length window.
    pub meta_ideal_min: usize,
    /// Upper bound of the ideal meta description length window.
    pub meta_ideal_max: usize,
    /// Recommended maximum number of H1 headings per page.
    pub max_h1_count: usize,
    /// Recommended maximum number of links per page.
    pub max_links_per_page: usize,
    /// Pages with fewer body words than this count as thin content.
    pub thin_content_words: usize,
    /// Recommended minimum number of body words.
    pub min_content_words: usize,
}

impl Default for SeoThresholds {
    fn default() -> Self {
        Self {
            title_min_length: 30,
            title_max_length: 60,
            title_ideal_min: 50,
            title_ideal_max: 60,
            meta_min_length: 120,
            meta_max_length: 160,
            meta_ideal_min: 140,
            meta_ideal_max: 160,
            max_h1_count: 1,
            max_links_per_page: 100,
            thin_content_words: 300,
            min_content_words: 600,
        }
    }
}

/// Relative weight of each category in the overall score.
///
/// Title and headings carry the most weight. The canonical, Open Graph,
/// robots, and content weights are blended into the single `technical`
/// breakdown entry rather than getting top-level slots of their own.
#[derive(Debug, Clone)]
pub struct ScoreWeights {
    pub title: f64,
    pub meta_description: f64,
    pub headings: f64,
    pub images: f64,
    pub links: f64,
    pub canonical: f64,
    pub open_graph: f64,
    pub robots: f64,
    pub content: f64,
}

impl Default for ScoreWeights {
    fn default() -> Self {
        Self {
            title: 0.20,
            meta_description: 0.15,
            headings: 0.20,
            images: 0.10,
            links: 0.10,
            canonical: 0.05,
            open_graph: 0.05,
            robots: 0.10,
            content: 0.05,
        }
    }
}

impl ScoreWeights {
    /// Combined weight of the four signals blended into `technical`.
    pub fn technical(&self) -> f64 {
        self.canonical + self.open_graph + self.robots + self.content
    }
}

/// Everything the analysis entry points need beyond the document itself.
#[derive(Debug, Clone, Default)]
pub struct AnalysisConfig {
    pub thresholds: SeoThresholds,
    pub weights: ScoreWeights,
    /// Skip the body content analysis; the content category then scores a
    /// neutral 50.
    pub skip_content: bool,
}
