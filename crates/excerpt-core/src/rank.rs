//! Global ranking and sub-excerpt selection

use crate::config::Config;
use crate::score::Scorer;
use crate::segment::Segmenter;
use crate::types::{Document, Page, RankedResult, Section, SubExcerpt};
use excerpt_text::KeywordSignature;
use std::cmp::Ordering;
use std::sync::Arc;

/// Score descending, then ingestion order, first page and ordinal
pub fn compare_sections(a: &Section, b: &Section) -> Ordering {
    b.score_or_zero()
        .total_cmp(&a.score_or_zero())
        .then_with(|| a.document_index.cmp(&b.document_index))
        .then_with(|| a.first_page().cmp(&b.first_page()))
        .then_with(|| a.ordinal.cmp(&b.ordinal))
}

/// Order scored sections and keep the top `max_sections`, ranked from 1
pub fn rank(mut sections: Vec<Section>, max_sections: usize) -> Vec<RankedResult> {
    sections.sort_by(compare_sections);
    sections
        .into_iter()
        .take(max_sections)
        .enumerate()
        .map(|(i, section)| RankedResult {
            rank: i + 1,
            score: section.score_or_zero(),
            section,
            sub_excerpts: Vec::new(),
        })
        .collect()
}

/// Ranks sections and fills in their best sub-excerpts
pub struct Ranker {
    fine: Segmenter,
    scorer: Arc<Scorer>,
    max_sections: usize,
    max_sub_excerpts: usize,
}

impl Ranker {
    pub fn new(config: &Config, scorer: Arc<Scorer>) -> Self {
        Self {
            fine: Segmenter::fine(config),
            scorer,
            max_sections: config.max_sections,
            max_sub_excerpts: config.max_sub_excerpts,
        }
    }

    /// Re-segment a section body finely and keep the best-scoring spans
    pub fn select_sub_excerpts(&self, section: &Section, query: &KeywordSignature) -> Vec<SubExcerpt> {
        if self.max_sub_excerpts == 0 {
            return Vec::new();
        }

        let pages = section
            .page_spans()
            .into_iter()
            .map(|(page, text)| Page::new(section.document.clone(), page.max(1), text))
            .collect();
        let inner =
            Document::new(section.document.clone(), pages).with_ingest_index(section.document_index);

        let mut spans = self.fine.segment(&inner).sections;
        for span in &mut spans {
            span.score = Some(self.scorer.score(span, query));
        }
        spans.sort_by(compare_sections);

        spans
            .into_iter()
            .take(self.max_sub_excerpts)
            .map(|span| SubExcerpt {
                page: span.first_page(),
                score: span.score_or_zero(),
                title: span.title,
                snippet: span.body,
            })
            .collect()
    }

    pub fn rank_with_excerpts(
        &self,
        sections: Vec<Section>,
        query: &KeywordSignature,
    ) -> Vec<RankedResult> {
        let mut ranked = rank(sections, self.max_sections);
        for result in &mut ranked {
            result.sub_excerpts = self.select_sub_excerpts(&result.section, query);
        }
        ranked
    }
}
