//! Core types for section ranking

use serde::{Deserialize, Serialize};
use std::fmt;

/// One page of extracted text
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Page {
    pub document: String,
    /// 1-based page number
    pub index: u32,
    pub text: String,
}

impl Page {
    pub fn new(document: impl Into<String>, index: u32, text: impl Into<String>) -> Self {
        Self {
            document: document.into(),
            index,
            text: text.into(),
        }
    }

    /// Character count of the trimmed text, used by the noise filter
    pub fn content_chars(&self) -> usize {
        self.text.trim().chars().count()
    }
}

/// A document as an ordered page stream
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Document {
    pub id: String,
    /// Position in the request; breaks ranking ties
    #[serde(default)]
    pub ingest_index: usize,
    pub pages: Vec<Page>,
}

impl Document {
    pub fn new(id: impl Into<String>, pages: Vec<Page>) -> Self {
        Self {
            id: id.into(),
            ingest_index: 0,
            pages,
        }
    }

    /// Build a document from page texts, numbering pages from 1
    pub fn from_texts<I, S>(id: impl Into<String>, texts: I) -> Self
    where
        I: IntoIterator<Item = S>,
        S: Into<String>,
    {
        let id = id.into();
        let pages = texts
            .into_iter()
            .enumerate()
            .map(|(i, text)| Page::new(id.clone(), i as u32 + 1, text))
            .collect();
        Self::new(id, pages)
    }

    pub fn with_ingest_index(mut self, ingest_index: usize) -> Self {
        self.ingest_index = ingest_index;
        self
    }

    /// Drop pages past the page cap and pages below the content floor
    pub fn retain_content(&mut self, min_page_chars: usize, max_pages: usize) {
        self.pages
            .retain(|p| p.index as usize <= max_pages && p.content_chars() >= min_page_chars);
    }

    /// First meaningful line of the first page, falling back to the id
    pub fn title(&self) -> String {
        self.pages
            .first()
            .and_then(|page| {
                page.text
                    .lines()
                    .map(str::trim)
                    .filter(|l| !l.is_empty())
                    .take(3)
                    .find(|l| (11..100).contains(&l.chars().count()))
            })
            .map(str::to_string)
            .unwrap_or_else(|| self.id.clone())
    }

    pub fn is_empty(&self) -> bool {
        self.pages.is_empty()
    }
}

/// How a section's boundaries were found
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum SectionOrigin {
    /// Opened by a detected heading line
    Heading,
    /// Text before the first heading of a document
    Preamble,
    /// A blank-line separated block
    Paragraph,
    /// A fixed-size character window
    Chunk,
    /// A run of sentences (sub-excerpt pass)
    Sentence,
}

/// A titled span of one document
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Section {
    pub document: String,
    pub document_index: usize,
    /// Position within the document's segmentation
    pub ordinal: usize,
    pub title: String,
    /// Page numbers spanned, in order
    pub pages: Vec<u32>,
    /// Byte offset in `body` where each entry of `pages` begins
    #[serde(default)]
    pub page_starts: Vec<usize>,
    pub body: String,
    pub origin: SectionOrigin,
    #[serde(default)]
    pub score: Option<f64>,
}

impl Section {
    pub fn first_page(&self) -> u32 {
        self.pages.first().copied().unwrap_or(0)
    }

    /// Body text split back into its pages, skipping pages with no text.
    ///
    /// Without usable offsets the whole body is attributed to the first page.
    pub fn page_spans(&self) -> Vec<(u32, &str)> {
        let usable = self.page_starts.len() == self.pages.len()
            && self
                .page_starts
                .iter()
                .all(|&start| start <= self.body.len() && self.body.is_char_boundary(start));
        if !usable {
            return if self.body.trim().is_empty() {
                Vec::new()
            } else {
                vec![(self.first_page(), self.body.as_str())]
            };
        }

        let mut spans = Vec::new();
        for (i, (&page, &start)) in self.pages.iter().zip(&self.page_starts).enumerate() {
            let end = self
                .page_starts
                .get(i + 1)
                .copied()
                .unwrap_or(self.body.len())
                .max(start);
            let text = &self.body[start..end];
            if !text.trim().is_empty() {
                spans.push((page, text));
            }
        }
        spans
    }

    pub fn score_or_zero(&self) -> f64 {
        self.score.unwrap_or(0.0)
    }
}

/// A scored span inside a ranked section
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct SubExcerpt {
    pub title: String,
    pub snippet: String,
    pub page: u32,
    pub score: f64,
}

/// A section placed in the global ranking
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct RankedResult {
    /// 1-based
    pub rank: usize,
    pub score: f64,
    pub section: Section,
    pub sub_excerpts: Vec<SubExcerpt>,
}

/// Why a document is missing from the ranking
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(tag = "kind", rename_all = "snake_case")]
pub enum FailureReason {
    LoadFailed { message: String },
    NoPages,
    TimedOut,
    WorkerLost,
}

impl fmt::Display for FailureReason {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            FailureReason::LoadFailed { message } => write!(f, "failed to load: {}", message),
            FailureReason::NoPages => write!(f, "no page above the content threshold"),
            FailureReason::TimedOut => write!(f, "not finished before the run deadline"),
            FailureReason::WorkerLost => write!(f, "worker exited without reporting"),
        }
    }
}

/// A per-document failure record
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct DocumentFailure {
    pub document: String,
    pub reason: FailureReason,
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_from_texts_numbers_pages() {
        let doc = Document::from_texts("a.txt", ["one", "two"]);
        assert_eq!(doc.pages[0].index, 1);
        assert_eq!(doc.pages[1].index, 2);
        assert_eq!(doc.pages[1].document, "a.txt");
    }

    #[test]
    fn test_retain_content_filters_noise_and_cap() {
        let long = "x".repeat(60);
        let mut doc = Document::from_texts(
            "a.txt",
            [long.as_str(), "   short page   ", long.as_str(), long.as_str()],
        );
        doc.retain_content(50, 3);
        let kept: Vec<u32> = doc.pages.iter().map(|p| p.index).collect();
        assert_eq!(kept, vec![1, 3]);
    }

    #[test]
    fn test_document_title_uses_first_meaningful_line() {
        let doc = Document::from_texts("guide.txt", ["Short\nA Guide to the South of France\nbody"]);
        assert_eq!(doc.title(), "A Guide to the South of France");

        let untitled = Document::from_texts("guide.txt", ["tiny\nlines\nonly"]);
        assert_eq!(untitled.title(), "guide.txt");
    }

    #[test]
    fn test_failure_reason_serializes_tagged() {
        let failure = DocumentFailure {
            document: "b.txt".to_string(),
            reason: FailureReason::LoadFailed {
                message: "not found".to_string(),
            },
        };
        let json = serde_json::to_value(&failure).unwrap();
        assert_eq!(json["reason"]["kind"], "load_failed");
        assert_eq!(json["reason"]["message"], "not found");
    }
}
