//! Configuration for segmentation, scoring and selection

use crate::error::{Error, Result};
use excerpt_text::{english_stop_words, KeywordExtractor, StopWords};
use serde::{Deserialize, Serialize};
use std::time::Duration;

/// Per-signal weights folded into a section score
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct ScoreWeights {
    /// Per shared stem, multiplied by the stem's query weight
    pub exact_match: f64,
    /// Per distinct prefix-related stem pair
    pub partial_match: f64,
    /// Per distinct query stem found in the title
    pub title: f64,
    /// Scales the diversity x fullness density factor
    pub density: f64,
    /// Added to every section
    pub floor: f64,
}

impl ScoreWeights {
    pub fn new() -> Self {
        Self {
            exact_match: 2.0,
            partial_match: 0.5,
            title: 3.0,
            density: 1.0,
            floor: 0.1,
        }
    }

    fn validate(&self) -> Result<()> {
        let named = [
            ("exact_match", self.exact_match),
            ("partial_match", self.partial_match),
            ("title", self.title),
            ("density", self.density),
            ("floor", self.floor),
        ];
        for (name, value) in named {
            if !value.is_finite() || value < 0.0 {
                return Err(Error::invalid(format!(
                    "scoring.weights.{} must be a finite number >= 0",
                    name
                )));
            }
        }
        Ok(())
    }
}

impl Default for ScoreWeights {
    fn default() -> Self {
        Self::new()
    }
}

/// Scorer weights and thresholds
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct ScoringConfig {
    pub weights: ScoreWeights,

    /// Query stems weighing less than this never count as exact matches
    pub exact_match_threshold: f64,

    /// Shortest stem allowed to take part in a prefix (partial) match
    pub min_partial_prefix: usize,

    /// Body length (tokens) at which the density factor stops growing
    pub density_saturation_tokens: usize,
}

impl ScoringConfig {
    pub fn new() -> Self {
        Self {
            weights: ScoreWeights::new(),
            exact_match_threshold: 1.0,
            min_partial_prefix: 4,
            density_saturation_tokens: 50,
        }
    }
}

impl Default for ScoringConfig {
    fn default() -> Self {
        Self::new()
    }
}

/// Segmenter thresholds
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct SegmentConfig {
    /// Lines at or above this length are never headings
    pub title_max_chars: usize,

    /// Headings have at most this many words
    pub max_heading_words: usize,

    /// Synthesized titles are cut to this length
    pub synth_title_chars: usize,

    /// Heading strategy is trusted at this many headings per page
    pub min_headings_per_page: f64,

    /// Paragraph strategy is trusted at this many broken blocks per page
    pub min_paragraphs_per_page: f64,

    /// Paragraph blocks shorter than this are dropped
    pub min_block_chars: usize,

    /// Window size for fixed-size chunking
    pub chunk_chars: usize,

    /// Words taken from a chunk to name it
    pub chunk_title_words: usize,

    /// Upper bound for a sub-excerpt span
    pub sub_excerpt_chars: usize,

    /// Sentence runs shorter than this merge into a neighbour
    pub min_sentence_chars: usize,
}

impl SegmentConfig {
    pub fn new() -> Self {
        Self {
            title_max_chars: 80,
            max_heading_words: 12,
            synth_title_chars: 60,
            min_headings_per_page: 0.5,
            min_paragraphs_per_page: 1.0,
            min_block_chars: 30,
            chunk_chars: 400,
            chunk_title_words: 6,
            sub_excerpt_chars: 400,
            min_sentence_chars: 20,
        }
    }
}

impl Default for SegmentConfig {
    fn default() -> Self {
        Self::new()
    }
}

/// Keyword extraction settings
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct KeywordConfig {
    /// Function words removed before weighting
    pub stop_words: Vec<String>,

    /// Shorter tokens are ignored (CJK tokens excepted)
    pub min_term_chars: usize,
}

impl KeywordConfig {
    pub fn new() -> Self {
        Self {
            stop_words: english_stop_words(),
            min_term_chars: KeywordExtractor::DEFAULT_MIN_TERM_CHARS,
        }
    }

    pub fn extractor(&self) -> KeywordExtractor {
        KeywordExtractor::new(
            StopWords::from_words(&self.stop_words),
            self.min_term_chars,
        )
    }
}

impl Default for KeywordConfig {
    fn default() -> Self {
        Self::new()
    }
}

/// Run configuration
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct Config {
    /// Caps the global ranked output
    pub max_sections: usize,

    /// Caps sub-excerpts per ranked section
    pub max_sub_excerpts: usize,

    /// Pages past this number are never read
    pub max_pages_per_document: usize,

    /// Section bodies are truncated to this many characters
    pub max_section_chars: usize,

    /// Pages with less trimmed text than this are noise
    pub min_page_chars: usize,

    /// Worker threads (0 = available parallelism)
    pub workers: usize,

    /// Run deadline in milliseconds; unfinished documents are skipped
    pub timeout_ms: Option<u64>,

    pub scoring: ScoringConfig,
    pub segment: SegmentConfig,
    pub keywords: KeywordConfig,
}

impl Config {
    pub fn new() -> Self {
        Self {
            max_sections: 5,
            max_sub_excerpts: 3,
            max_pages_per_document: 20,
            max_section_chars: 800,
            min_page_chars: 50,
            workers: 0,
            timeout_ms: None,
            scoring: ScoringConfig::new(),
            segment: SegmentConfig::new(),
            keywords: KeywordConfig::new(),
        }
    }

    pub fn timeout(&self) -> Option<Duration> {
        self.timeout_ms.map(Duration::from_millis)
    }

    /// Resolved worker count, never zero
    pub fn worker_count(&self) -> usize {
        if self.workers > 0 {
            return self.workers;
        }
        std::thread::available_parallelism()
            .map(|n| n.get())
            .unwrap_or(1)
    }

    pub fn validate(&self) -> Result<()> {
        let positive = [
            ("max_sections", self.max_sections),
            ("max_pages_per_document", self.max_pages_per_document),
            ("max_section_chars", self.max_section_chars),
            ("segment.title_max_chars", self.segment.title_max_chars),
            ("segment.max_heading_words", self.segment.max_heading_words),
            ("segment.synth_title_chars", self.segment.synth_title_chars),
            ("segment.chunk_chars", self.segment.chunk_chars),
            ("segment.chunk_title_words", self.segment.chunk_title_words),
            ("segment.sub_excerpt_chars", self.segment.sub_excerpt_chars),
            (
                "scoring.density_saturation_tokens",
                self.scoring.density_saturation_tokens,
            ),
        ];
        for (name, value) in positive {
            if value == 0 {
                return Err(Error::invalid(format!("{} must be at least 1", name)));
            }
        }

        let ratios = [
            ("segment.min_headings_per_page", self.segment.min_headings_per_page),
            (
                "segment.min_paragraphs_per_page",
                self.segment.min_paragraphs_per_page,
            ),
            (
                "scoring.exact_match_threshold",
                self.scoring.exact_match_threshold,
            ),
        ];
        for (name, value) in ratios {
            if !value.is_finite() || value < 0.0 {
                return Err(Error::invalid(format!(
                    "{} must be a finite number >= 0",
                    name
                )));
            }
        }

        self.scoring.weights.validate()
    }
}

impl Default for Config {
    fn default() -> Self {
        Self::new()
    }
}
