//! Sentence-window strategy for sub-excerpt selection

use super::{Attempt, Draft, SegmentStrategy, StrategyKind};
use crate::config::SegmentConfig;
use crate::types::{Document, SectionOrigin};
use excerpt_text::{collapse_whitespace, sentences, shorten};

/// Packs consecutive sentences into spans of bounded length
#[derive(Debug, Clone, Copy, Default)]
pub struct SentenceStrategy;

impl SegmentStrategy for SentenceStrategy {
    fn kind(&self) -> StrategyKind {
        StrategyKind::Sentence
    }

    fn threshold(&self, _config: &SegmentConfig) -> f64 {
        0.0
    }

    fn attempt(&self, document: &Document, config: &SegmentConfig) -> Option<Attempt> {
        let mut drafts = Vec::new();

        for page in &document.pages {
            let collapsed: Vec<String> = sentences(&page.text)
                .into_iter()
                .map(collapse_whitespace)
                .collect();
            for span in pack(
                collapsed,
                config.sub_excerpt_chars,
                config.min_sentence_chars,
            ) {
                let mut draft = Draft::new(
                    shorten(&span.first, config.synth_title_chars),
                    page.index,
                    SectionOrigin::Sentence,
                );
                draft.push_line(&span.text, page.index);
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

struct Span {
    first: String,
    text: String,
}

impl Span {
    fn start(sentence: String) -> Self {
        Self {
            first: sentence.clone(),
            text: sentence,
        }
    }

    fn append(&mut self, sentence: &str) {
        self.text.push(' ');
        self.text.push_str(sentence);
    }

    fn chars(&self) -> usize {
        self.text.chars().count()
    }
}

/// Greedy packing; fragments under `min_chars` never stand alone
fn pack(sentences: Vec<String>, max_chars: usize, min_chars: usize) -> Vec<Span> {
    let mut spans: Vec<Span> = Vec::new();
    let mut current: Option<Span> = None;

    for sentence in sentences {
        let len = sentence.chars().count();
        current = match current.take() {
            None => Some(Span::start(sentence)),
            Some(mut span) => {
                if span.chars() >= min_chars && span.chars() + 1 + len > max_chars {
                    spans.push(span);
                    Some(Span::start(sentence))
                } else {
                    span.append(&sentence);
                    Some(span)
                }
            }
        };
    }

    if let Some(tail) = current {
        match spans.last_mut() {
            Some(last) if tail.chars() < min_chars => last.append(&tail.text),
            _ => spans.push(tail),
        }
    }
    spans
}

#[cfg(test)]
mod tests {
    use super::*;

    fn owned(items: &[&str]) -> Vec<String> {
        items.iter().map(|s| s.to_string()).collect()
    }

    #[test]
    fn test_pack_respects_limit() {
        let input = owned(&[
            "The first sentence is about trains.",
            "The second sentence is about buses.",
            "The third sentence is about ferries.",
        ]);
        let spans = pack(input, 75, 20);
        assert_eq!(spans.len(), 2);
        assert_eq!(
            spans[0].text,
            "The first sentence is about trains. The second sentence is about buses."
        );
        assert_eq!(spans[0].first, "The first sentence is about trains.");
    }

    #[test]
    fn test_short_fragments_merge() {
        let input = owned(&["Yes.", "This sentence is long enough to stand on its own.", "Ok."]);
        let spans = pack(input, 50, 20);
        assert_eq!(spans.len(), 1);
        assert!(spans[0].text.starts_with("Yes. This"));
        assert!(spans[0].text.ends_with("Ok."));
    }

    #[test]
    fn test_attempt_titles_from_first_sentence() {
        let text = "Budget hotels are plentiful near the station. They fill up early in summer.";
        let doc = Document::from_texts("a.txt", [text]);
        let attempt = SentenceStrategy.attempt(&doc, &SegmentConfig::new()).unwrap();
        assert_eq!(attempt.sections.len(), 1);
        assert_eq!(
            attempt.sections[0].title,
            "Budget hotels are plentiful near the station."
        );
        assert_eq!(attempt.sections[0].origin, SectionOrigin::Sentence);
    }

    #[test]
    fn test_empty_page_is_none() {
        let doc = Document::from_texts("a.txt", [""]);
        assert!(SentenceStrategy.attempt(&doc, &SegmentConfig::new()).is_none());
    }
}
