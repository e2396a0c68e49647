//! Closed-class stop word sets

use std::collections::HashSet;

/// English function words: articles, pronouns, auxiliaries, prepositions,
/// conjunctions and determiners. No content words.
static ENGLISH: &[&str] = &[
    "a", "an", "the", "is", "are", "was", "were", "be", "been", "being", "am", "have", "has",
    "had", "do", "does", "did", "will", "would", "could", "should", "shall", "may", "might",
    "must", "can", "to", "of", "in", "for", "on", "with", "at", "by", "from", "as", "into",
    "through", "about", "over", "under", "between", "after", "before", "during", "without",
    "within", "and", "or", "nor", "but", "if", "then", "than", "so", "because", "while", "that",
    "this", "these", "those", "it", "its", "i", "me", "my", "we", "us", "our", "you", "your",
    "he", "him", "his", "she", "her", "they", "them", "their", "what", "which", "who", "whom",
    "whose", "when", "where", "why", "how", "all", "each", "every", "both", "either", "neither",
    "some", "any", "no", "not", "such", "own", "same", "other", "too", "very", "also", "just",
    "only", "there", "here", "up", "down", "out", "off", "again", "once",
];

/// An injected set of words removed before keyword weighting
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct StopWords {
    words: HashSet<String>,
}

impl StopWords {
    /// The default English function-word set
    pub fn english() -> Self {
        Self::from_words(ENGLISH.iter().copied())
    }

    /// No stop words at all
    pub fn none() -> Self {
        Self {
            words: HashSet::new(),
        }
    }

    /// Build a set from arbitrary words; entries are lowercased
    pub fn from_words<I, S>(words: I) -> Self
    where
        I: IntoIterator<Item = S>,
        S: AsRef<str>,
    {
        Self {
            words: words
                .into_iter()
                .map(|w| w.as_ref().trim().to_lowercase())
                .filter(|w| !w.is_empty())
                .collect(),
        }
    }

    pub fn contains(&self, word: &str) -> bool {
        self.words.contains(word)
    }

    pub fn len(&self) -> usize {
        self.words.len()
    }

    pub fn is_empty(&self) -> bool {
        self.words.is_empty()
    }
}

impl Default for StopWords {
    fn default() -> Self {
        Self::english()
    }
}

/// The default English list as owned strings, for config defaults
pub fn english_stop_words() -> Vec<String> {
    ENGLISH.iter().map(|w| w.to_string()).collect()
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_english_contains_function_words_only() {
        let stop = StopWords::english();
        assert!(stop.contains("the"));
        assert!(stop.contains("with"));
        assert!(!stop.contains("review"));
        assert!(!stop.contains("literature"));
    }

    #[test]
    fn test_from_words_lowercases() {
        let stop = StopWords::from_words(["Der", " die ", ""]);
        assert_eq!(stop.len(), 2);
        assert!(stop.contains("der"));
        assert!(stop.contains("die"));
    }

    #[test]
    fn test_none_is_empty() {
        assert!(StopWords::none().is_empty());
    }
}
