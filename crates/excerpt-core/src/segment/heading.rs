//! Heading-pattern strategy

use super::{Attempt, Draft, SegmentStrategy, StrategyKind};
use crate::config::SegmentConfig;
use crate::types::{Document, SectionOrigin};
use excerpt_text::shorten;
use regex::Regex;
use std::sync::OnceLock;

static NUMBERED_RE: OnceLock<Regex> = OnceLock::new();

/// "1.", "1.2", "3.1.4", "IV." followed by text
fn numbered_re() -> &'static Regex {
    NUMBERED_RE.get_or_init(|| {
        Regex::new(r"^(?:\d{1,3}(?:\.\d{1,3})*\.?|[IVXLC]{1,6}\.)\s+\S").unwrap()
    })
}

/// Opens a section at every structural heading line
#[derive(Debug, Clone, Copy, Default)]
pub struct HeadingStrategy;

impl SegmentStrategy for HeadingStrategy {
    fn kind(&self) -> StrategyKind {
        StrategyKind::Heading
    }

    fn threshold(&self, config: &SegmentConfig) -> f64 {
        config.min_headings_per_page
    }

    fn attempt(&self, document: &Document, config: &SegmentConfig) -> Option<Attempt> {
        let mut drafts = Vec::new();
        let mut current: Option<Draft> = None;
        let mut headings = 0usize;

        for page in &document.pages {
            let lines: Vec<&str> = page.text.lines().collect();
            for (i, line) in lines.iter().enumerate() {
                if is_heading(&lines, i, config) {
                    headings += 1;
                    if let Some(done) = current.take() {
                        drafts.push(done);
                    }
                    current = Some(Draft::new(
                        shorten(line, config.title_max_chars),
                        page.index,
                        SectionOrigin::Heading,
                    ));
                    continue;
                }
                if current.is_none() && line.trim().is_empty() {
                    continue;
                }
                current
                    .get_or_insert_with(|| Draft::new("", page.index, SectionOrigin::Preamble))
                    .push_line(line, page.index);
            }
        }

        if let Some(done) = current {
            drafts.push(done);
        }
        if headings == 0 {
            return None;
        }

        // Back-to-back headings leave empty sections behind
        drafts.retain(Draft::has_body);

        Some(Attempt {
            sections: drafts,
            confidence: headings as f64 / document.pages.len() as f64,
        })
    }
}

/// Whether `lines[i]` reads as a heading
pub(crate) fn is_heading(lines: &[&str], i: usize, config: &SegmentConfig) -> bool {
    let line = lines[i].trim();
    if line.is_empty() {
        return false;
    }
    let chars = line.chars().count();
    if chars >= config.title_max_chars || line.split_whitespace().count() > config.max_heading_words
    {
        return false;
    }

    if is_structural(line) {
        return true;
    }

    is_title_like(line) && follows_break(lines, i) && precedes_body(lines, i, chars)
}

fn is_structural(line: &str) -> bool {
    numbered_re().is_match(line) || is_all_caps(line)
}

fn is_all_caps(line: &str) -> bool {
    let letters: Vec<char> = line.chars().filter(|c| c.is_alphabetic()).collect();
    letters.len() >= 3 && letters.iter().all(|c| c.is_uppercase())
}

fn is_title_like(line: &str) -> bool {
    let Some(first) = line.chars().next() else {
        return false;
    };
    let Some(last) = line.chars().last() else {
        return false;
    };
    first.is_alphabetic() && !first.is_lowercase() && !".,;!?-".contains(last)
}

fn follows_break(lines: &[&str], i: usize) -> bool {
    if i == 0 {
        return true;
    }
    let prev = lines[i - 1].trim();
    prev.is_empty() || prev.ends_with(['.', '!', '?', ':'])
}

fn precedes_body(lines: &[&str], i: usize, chars: usize) -> bool {
    let Some(next) = lines.get(i + 1).map(|l| l.trim()) else {
        return false;
    };
    !next.is_empty() && next.chars().count() > chars && !is_structural(next)
}
