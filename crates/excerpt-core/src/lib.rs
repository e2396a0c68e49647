//! Section segmentation, relevance scoring and ranking

mod config;
mod error;
mod pipeline;
mod rank;
mod score;
pub mod segment;
mod types;

pub use config::{Config, KeywordConfig, ScoreWeights, ScoringConfig, SegmentConfig};
pub use error::{Error, LoadError, Result};
pub use pipeline::{
    CancelToken, DocumentSource, DocumentSummary, Pipeline, ProcessedDocument, Query, RunOutcome,
};
pub use rank::{compare_sections, rank, Ranker};
pub use score::{
    content_density, exact_match, length_normalizer, partial_match, title_hits, Contribution,
    ScoreBreakdown, Scorer, Signal,
};
pub use segment::{Segmentation, Segmenter, StrategyKind};
pub use types::{
    Document, DocumentFailure, FailureReason, Page, RankedResult, Section, SectionOrigin,
    SubExcerpt,
};

pub use excerpt_text::{KeywordExtractor, KeywordSignature};
