//! Blank-line paragraph strategy

use super::{Attempt, Draft, SegmentStrategy, StrategyKind};
use crate::config::SegmentConfig;
use crate::types::{Document, SectionOrigin};
use excerpt_text::shorten;
use regex::Regex;
use std::sync::OnceLock;

static BREAK_RE: OnceLock<Regex> = OnceLock::new();

fn break_re() -> &'static Regex {
    BREAK_RE.get_or_init(|| Regex::new(r"\n[ \t\r\x0C]*\n").unwrap())
}

/// One section per blank-line separated block
#[derive(Debug, Clone, Copy, Default)]
pub struct ParagraphStrategy;

impl SegmentStrategy for ParagraphStrategy {
    fn kind(&self) -> StrategyKind {
        StrategyKind::Paragraph
    }

    fn threshold(&self, config: &SegmentConfig) -> f64 {
        config.min_paragraphs_per_page
    }

    fn attempt(&self, document: &Document, config: &SegmentConfig) -> Option<Attempt> {
        let mut drafts = Vec::new();
        let mut broken = 0usize;

        for page in &document.pages {
            let blocks: Vec<&str> = break_re()
                .split(&page.text)
                .map(str::trim)
                .filter(|b| !b.is_empty())
                .collect();
            let has_break = blocks.len() > 1;

            let mut kept: Vec<&str> = blocks
                .into_iter()
                .filter(|b| b.chars().count() >= config.min_block_chars)
                .collect();
            if has_break {
                broken += kept.len();
            }
            if kept.is_empty() {
                let whole = page.text.trim();
                if whole.is_empty() {
                    continue;
                }
                kept.push(whole);
            }

            for block in kept {
                drafts.push(block_draft(block, page.index, config));
            }
        }

        if broken == 0 {
            return None;
        }

        Some(Attempt {
            sections: drafts,
            confidence: broken as f64 / document.pages.len() as f64,
        })
    }
}

fn block_draft(block: &str, page: u32, config: &SegmentConfig) -> Draft {
    let first_line = block.lines().next().unwrap_or_default();
    let mut draft = Draft::new(
        shorten(first_line, config.synth_title_chars),
        page,
        SectionOrigin::Paragraph,
    );
    for line in block.lines() {
        draft.push_line(line, page);
    }
    draft
}
