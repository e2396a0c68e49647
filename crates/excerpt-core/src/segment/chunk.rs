//! Fixed-size window strategy, the last resort of the cascade

use super::{Attempt, Draft, SegmentStrategy, StrategyKind};
use crate::config::SegmentConfig;
use crate::types::{Document, SectionOrigin};
use excerpt_text::{collapse_whitespace, shorten};

#[derive(Debug, Clone, Copy, Default)]
pub struct ChunkStrategy;

impl SegmentStrategy for ChunkStrategy {
    fn kind(&self) -> StrategyKind {
        StrategyKind::Chunk
    }

    fn threshold(&self, _config: &SegmentConfig) -> f64 {
        0.0
    }

    fn attempt(&self, document: &Document, config: &SegmentConfig) -> Option<Attempt> {
        let mut drafts = Vec::new();

        for page in &document.pages {
            let chars: Vec<char> = collapse_whitespace(&page.text).chars().collect();
            for window in chars.chunks(config.chunk_chars.max(1)) {
                let text: String = window.iter().collect();
                let body = text.trim();
                if body.is_empty() {
                    continue;
                }
                let title = body
                    .split_whitespace()
                    .take(config.chunk_title_words)
                    .collect::<Vec<_>>()
                    .join(" ");
                let mut draft = Draft::new(
                    shorten(&title, config.synth_title_chars),
                    page.index,
                    SectionOrigin::Chunk,
                );
                draft.push_line(body, page.index);
                drafts.push(draft);
            }
        }

        if drafts.is_empty() {
            return None;
        }
        Some(Attempt {
            sections: drafts,
            confidence: 1.0,
        })
    }
}
