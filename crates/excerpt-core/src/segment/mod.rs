//! Section segmentation as an ordered cascade of strategies
//!
//! Each strategy walks the page stream and proposes sections together with a
//! confidence. The segmenter accepts the first proposal that clears the
//! strategy's own threshold; later strategies only run when earlier ones
//! found no usable boundaries.

mod chunk;
mod heading;
mod paragraph;
mod sentence;

pub use chunk::ChunkStrategy;
pub use heading::HeadingStrategy;
pub use paragraph::ParagraphStrategy;
pub use sentence::SentenceStrategy;

use crate::config::{Config, SegmentConfig};
use crate::types::{Document, Section, SectionOrigin};
use excerpt_text::truncate_chars;
use serde::{Deserialize, Serialize};
use std::fmt;

/// Which strategy produced a segmentation
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum StrategyKind {
    Heading,
    Paragraph,
    Chunk,
    Sentence,
}

impl StrategyKind {
    /// Chunking ignores structure entirely
    pub fn is_degraded(self) -> bool {
        matches!(self, StrategyKind::Chunk)
    }
}

impl fmt::Display for StrategyKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let name = match self {
            StrategyKind::Heading => "heading",
            StrategyKind::Paragraph => "paragraph",
            StrategyKind::Chunk => "chunk",
            StrategyKind::Sentence => "sentence",
        };
        f.write_str(name)
    }
}

/// A section before document metadata, ordinals and truncation are applied
#[derive(Debug, Clone, PartialEq)]
pub struct Draft {
    pub title: String,
    pub pages: Vec<u32>,
    /// Body offset where each entry of `pages` begins
    pub page_starts: Vec<usize>,
    pub body: String,
    pub origin: SectionOrigin,
}

impl Draft {
    pub fn new(title: impl Into<String>, page: u32, origin: SectionOrigin) -> Self {
        Self {
            title: title.into(),
            pages: vec![page],
            page_starts: vec![0],
            body: String::new(),
            origin,
        }
    }

    /// Append a body line, recording the page once it carries text
    pub fn push_line(&mut self, line: &str, page: u32) {
        if line.trim().is_empty() {
            if !self.body.is_empty() {
                self.body.push('\n');
            }
            return;
        }
        if self.pages.last() != Some(&page) {
            self.pages.push(page);
            self.page_starts.push(self.body.len());
        }
        self.body.push_str(line);
        self.body.push('\n');
    }

    pub fn has_body(&self) -> bool {
        !self.body.trim().is_empty()
    }
}

/// A strategy's proposal for one document
#[derive(Debug, Clone)]
pub struct Attempt {
    pub sections: Vec<Draft>,
    pub confidence: f64,
}

/// One boundary heuristic in the cascade
pub trait SegmentStrategy: Send + Sync {
    fn kind(&self) -> StrategyKind;

    /// Confidence an attempt must reach to be accepted
    fn threshold(&self, config: &SegmentConfig) -> f64;

    /// Propose sections, or `None` when no boundary of this kind exists
    fn attempt(&self, document: &Document, config: &SegmentConfig) -> Option<Attempt>;
}

/// Sections of one document and how they were found
#[derive(Debug, Clone, PartialEq)]
pub struct Segmentation {
    pub sections: Vec<Section>,
    pub strategy: Option<StrategyKind>,
    pub degraded: bool,
}

impl Segmentation {
    pub fn empty() -> Self {
        Self {
            sections: Vec::new(),
            strategy: None,
            degraded: false,
        }
    }
}

/// Runs a strategy cascade over documents
pub struct Segmenter {
    strategies: Vec<Box<dyn SegmentStrategy>>,
    config: SegmentConfig,
    max_body_chars: usize,
}

impl Segmenter {
    /// Document-level cascade: headings, then paragraphs, then fixed chunks
    pub fn new(config: &Config) -> Self {
        Self::with_strategies(
            vec![
                Box::new(HeadingStrategy),
                Box::new(ParagraphStrategy),
                Box::new(ChunkStrategy),
            ],
            config.segment.clone(),
            config.max_section_chars,
        )
    }

    /// Finer cascade used inside a ranked section: paragraphs, then sentences
    pub fn fine(config: &Config) -> Self {
        Self::with_strategies(
            vec![Box::new(ParagraphStrategy), Box::new(SentenceStrategy)],
            config.segment.clone(),
            config.segment.sub_excerpt_chars,
        )
    }

    pub fn with_strategies(
        strategies: Vec<Box<dyn SegmentStrategy>>,
        config: SegmentConfig,
        max_body_chars: usize,
    ) -> Self {
        Self {
            strategies,
            config,
            max_body_chars,
        }
    }

    pub fn strategies(&self) -> Vec<StrategyKind> {
        self.strategies.iter().map(|s| s.kind()).collect()
    }

    pub fn segment(&self, document: &Document) -> Segmentation {
        if document.is_empty() {
            return Segmentation::empty();
        }

        for strategy in &self.strategies {
            let kind = strategy.kind();
            let threshold = strategy.threshold(&self.config);
            match strategy.attempt(document, &self.config) {
                Some(attempt) if !attempt.sections.is_empty() && attempt.confidence >= threshold => {
                    tracing::debug!(
                        document = %document.id,
                        strategy = %kind,
                        confidence = attempt.confidence,
                        sections = attempt.sections.len(),
                        "segmentation accepted"
                    );
                    return self.finalize(document, attempt.sections, kind);
                }
                Some(attempt) => {
                    tracing::debug!(
                        document = %document.id,
                        strategy = %kind,
                        confidence = attempt.confidence,
                        threshold,
                        "segmentation below threshold"
                    );
                }
                None => {
                    tracing::debug!(document = %document.id, strategy = %kind, "no boundaries found");
                }
            }
        }

        Segmentation::empty()
    }

    fn finalize(&self, document: &Document, drafts: Vec<Draft>, kind: StrategyKind) -> Segmentation {
        let sections = drafts
            .into_iter()
            .enumerate()
            .map(|(ordinal, draft)| {
                let first_page = draft.pages.first().copied().unwrap_or(1);
                // Title is fixed before the body budget is applied
                let title = if draft.title.trim().is_empty() {
                    format!("Page {}", first_page)
                } else {
                    draft.title
                };
                let lead = draft.body.len() - draft.body.trim_start().len();
                let body = truncate_chars(draft.body.trim(), self.max_body_chars).to_string();
                let page_starts = draft
                    .page_starts
                    .iter()
                    .map(|start| start.saturating_sub(lead).min(body.len()))
                    .collect();
                Section {
                    document: document.id.clone(),
                    document_index: document.ingest_index,
                    ordinal,
                    title,
                    pages: draft.pages,
                    page_starts,
                    body,
                    origin: draft.origin,
                    score: None,
                }
            })
            .collect();

        Segmentation {
            sections,
            strategy: Some(kind),
            degraded: kind.is_degraded(),
        }
    }
}
