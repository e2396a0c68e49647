//! Unicode-aware normalization and tokenization

use unicode_normalization::UnicodeNormalization;
use unicode_script::{Script, UnicodeScript};
use unicode_segmentation::UnicodeSegmentation;

/// Window width for scripts written without word separators
pub const UNSPACED_WINDOW: usize = 2;

/// Normalize text into an ordered token stream.
///
/// NFKC-folds and lowercases the input, drops control and zero-width
/// characters, then splits on UAX #29 word boundaries. Runs of scripts that
/// carry no separators (Han, kana, Thai, Lao, Khmer, Myanmar) are emitted as
/// overlapping character windows of `UNSPACED_WINDOW` instead. Shared letters
/// such as the prolonged sound mark `ー` extend a run they sit inside.
pub fn normalize(text: &str) -> Vec<String> {
    let cleaned = clean(text);
    let mut tokens = Vec::new();
    let mut spaced = String::new();
    let mut unspaced: Vec<char> = Vec::new();

    for ch in cleaned.chars() {
        if is_unspaced(ch) || (!unspaced.is_empty() && extends_run(ch)) {
            if !spaced.is_empty() {
                push_words(&spaced, &mut tokens);
                spaced.clear();
            }
            unspaced.push(ch);
        } else {
            if !unspaced.is_empty() {
                push_windows(&unspaced, &mut tokens);
                unspaced.clear();
            }
            spaced.push(ch);
        }
    }

    if !spaced.is_empty() {
        push_words(&spaced, &mut tokens);
    }
    if !unspaced.is_empty() {
        push_windows(&unspaced, &mut tokens);
    }

    tokens
}

/// True for characters of scripts that do not separate words with spaces
pub fn is_unspaced(ch: char) -> bool {
    matches!(
        ch.script(),
        Script::Han
            | Script::Hiragana
            | Script::Katakana
            | Script::Thai
            | Script::Lao
            | Script::Khmer
            | Script::Myanmar
    )
}

// Script-neutral letters and marks continue the surrounding run
fn extends_run(ch: char) -> bool {
    matches!(ch.script(), Script::Common | Script::Inherited) && ch.is_alphabetic()
}

/// Cut `text` to at most `max_chars` characters without splitting a code point
pub fn truncate_chars(text: &str, max_chars: usize) -> &str {
    match text.char_indices().nth(max_chars) {
        Some((idx, _)) => &text[..idx],
        None => text,
    }
}

/// Replace every whitespace run with a single space and trim the ends
pub fn collapse_whitespace(text: &str) -> String {
    text.split_whitespace().collect::<Vec<_>>().join(" ")
}

/// Shorten text to a phrase of at most `max_chars`, preferring word boundaries
pub fn shorten(text: &str, max_chars: usize) -> String {
    let collapsed = collapse_whitespace(text);
    if collapsed.chars().count() <= max_chars {
        return collapsed;
    }

    let mut out = String::new();
    let mut used = 0;
    for word in collapsed.split(' ') {
        let len = word.chars().count();
        let needed = if out.is_empty() { len } else { len + 1 };
        if used + needed > max_chars {
            break;
        }
        if !out.is_empty() {
            out.push(' ');
        }
        out.push_str(word);
        used += needed;
    }

    // A single oversized word (or an unspaced script) still needs a cut
    if out.is_empty() {
        out = truncate_chars(&collapsed, max_chars).to_string();
    }
    out
}

/// Split text on UAX #29 sentence boundaries, dropping blank fragments
pub fn sentences(text: &str) -> Vec<&str> {
    text.split_sentence_bounds()
        .map(str::trim)
        .filter(|s| !s.is_empty())
        .collect()
}

fn clean(text: &str) -> String {
    let mut out = String::with_capacity(text.len());
    for ch in text.nfkc() {
        if is_zero_width(ch) {
            continue;
        }
        if ch.is_control() {
            out.push(' ');
            continue;
        }
        out.extend(ch.to_lowercase());
    }
    out
}

fn is_zero_width(ch: char) -> bool {
    matches!(
        ch,
        '\u{00AD}' // soft hyphen
            | '\u{034F}' // combining grapheme joiner
            | '\u{200B}' // zero width space
            | '\u{200C}' // zero width non-joiner
            | '\u{200D}' // zero width joiner
            | '\u{2060}' // word joiner
            | '\u{FEFF}' // zero width no-break space
    )
}

fn push_words(text: &str, tokens: &mut Vec<String>) {
    tokens.extend(text.unicode_words().map(str::to_string));
}

fn push_windows(chars: &[char], tokens: &mut Vec<String>) {
    if chars.len() < UNSPACED_WINDOW {
        tokens.push(chars.iter().collect());
        return;
    }
    tokens.extend(chars.windows(UNSPACED_WINDOW).map(|w| w.iter().collect::<String>()));
}
