//! Weighted keyword signatures

use crate::normalize::{is_unspaced, normalize};
use crate::stem::stem;
use crate::stop_words::StopWords;
use serde::Serialize;
use std::collections::{BTreeMap, BTreeSet};

/// Weighted term set derived from a piece of text.
///
/// Keys are stems; a stem's weight is the number of surviving tokens that
/// reduced to it, so `design` and `designing` share one bucket. Backed by
/// ordered maps so iteration is reproducible.
#[derive(Debug, Clone, Default, PartialEq, Serialize)]
pub struct KeywordSignature {
    weights: BTreeMap<String, f64>,
    variants: BTreeMap<String, BTreeSet<String>>,
    token_count: usize,
}

impl KeywordSignature {
    pub fn new() -> Self {
        Self::default()
    }

    /// Weight of a stem, zero when absent
    pub fn weight(&self, term: &str) -> f64 {
        self.weights.get(term).copied().unwrap_or(0.0)
    }

    pub fn contains(&self, term: &str) -> bool {
        self.weights.contains_key(term)
    }

    /// Terms and weights in lexicographic term order
    pub fn iter(&self) -> impl Iterator<Item = (&str, f64)> {
        self.weights.iter().map(|(t, &w)| (t.as_str(), w))
    }

    pub fn terms(&self) -> impl Iterator<Item = &str> {
        self.weights.keys().map(String::as_str)
    }

    /// Surface forms that collapsed into `term`
    pub fn variants(&self, term: &str) -> Option<&BTreeSet<String>> {
        self.variants.get(term)
    }

    /// Tokens that survived stop-word and length filtering
    pub fn token_count(&self) -> usize {
        self.token_count
    }

    pub fn len(&self) -> usize {
        self.weights.len()
    }

    pub fn is_empty(&self) -> bool {
        self.weights.is_empty()
    }

    /// Highest-weighted terms, ties broken by term
    pub fn top(&self, n: usize) -> Vec<(&str, f64)> {
        let mut ranked: Vec<(&str, f64)> = self.iter().collect();
        ranked.sort_by(|a, b| b.1.total_cmp(&a.1).then_with(|| a.0.cmp(b.0)));
        ranked.truncate(n);
        ranked
    }

    fn record(&mut self, surface: &str) {
        let key = stem(surface);
        *self.weights.entry(key.clone()).or_insert(0.0) += 1.0;
        self.variants
            .entry(key)
            .or_default()
            .insert(surface.to_string());
        self.token_count += 1;
    }
}

/// Turns free text into a [`KeywordSignature`]
#[derive(Debug, Clone)]
pub struct KeywordExtractor {
    stop_words: StopWords,
    min_term_chars: usize,
}

impl KeywordExtractor {
    pub const DEFAULT_MIN_TERM_CHARS: usize = 2;

    pub fn new(stop_words: StopWords, min_term_chars: usize) -> Self {
        Self {
            stop_words,
            min_term_chars,
        }
    }

    pub fn stop_words(&self) -> &StopWords {
        &self.stop_words
    }

    pub fn extract(&self, text: &str) -> KeywordSignature {
        self.extract_tokens(&normalize(text))
    }

    /// Build a signature from tokens that were already normalized
    pub fn extract_tokens(&self, tokens: &[String]) -> KeywordSignature {
        let mut signature = KeywordSignature::new();
        for token in tokens.iter().filter(|t| self.keeps(t)) {
            signature.record(token);
        }
        signature
    }

    /// Whether a normalized token survives filtering
    pub fn keeps(&self, token: &str) -> bool {
        if self.stop_words.contains(token) {
            return false;
        }
        // Pure numbers and list markers carry no topic
        if !token.chars().any(char::is_alphabetic) {
            return false;
        }
        token.chars().count() >= self.min_term_chars || token.chars().any(is_unspaced)
    }
}

impl Default for KeywordExtractor {
    fn default() -> Self {
        Self::new(StopWords::english(), Self::DEFAULT_MIN_TERM_CHARS)
    }
}

/// Extract a signature with the default English stop words
pub fn extract_keywords(text: &str) -> KeywordSignature {
    KeywordExtractor::default().extract(text)
}
