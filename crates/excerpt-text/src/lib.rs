//! Text normalization and keyword signatures

mod keywords;
mod normalize;
mod stem;
mod stop_words;

pub use keywords::{extract_keywords, KeywordExtractor, KeywordSignature};
pub use normalize::{
    collapse_whitespace, is_unspaced, normalize, sentences, shorten, truncate_chars,
    UNSPACED_WINDOW,
};
pub use stem::stem;
pub use stop_words::{english_stop_words, StopWords};
