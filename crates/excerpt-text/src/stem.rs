//! Light suffix stripping so inflected forms share one weight bucket

const MIN_STEM_CHARS: usize = 3;

/// Checked in order; the first suffix that leaves a long enough stem wins
const SUFFIXES: &[(&str, &str)] = &[
    ("ations", ""),
    ("ingly", ""),
    ("ation", ""),
    ("ings", ""),
    ("edly", ""),
    ("sses", "ss"),
    ("ing", ""),
    ("ies", "y"),
    ("ied", "y"),
    ("ed", ""),
    ("es", ""),
    ("s", ""),
    ("e", ""),
];

/// Suffixes after which a doubled final consonant is collapsed (planning -> plan)
const UNDOUBLE_AFTER: &[&str] = &["ings", "ing", "edly", "ed"];

/// Reduce a normalized term to its stem.
///
/// Only lowercase ASCII words are stemmed; anything else (numbers, CJK
/// windows, accented words) is returned unchanged.
pub fn stem(term: &str) -> String {
    if term.len() <= MIN_STEM_CHARS || !term.bytes().all(|b| b.is_ascii_lowercase()) {
        return term.to_string();
    }

    for &(suffix, replacement) in SUFFIXES {
        let Some(base) = term.strip_suffix(suffix) else {
            continue;
        };
        if base.len() + replacement.len() < MIN_STEM_CHARS {
            continue;
        }
        // class, focus, analysis keep their final s
        if suffix == "s" && (base.ends_with('s') || base.ends_with('u') || base.ends_with('i')) {
            return term.to_string();
        }

        let mut out = format!("{}{}", base, replacement);
        if UNDOUBLE_AFTER.contains(&suffix) {
            undouble(&mut out);
        }
        return out;
    }

    term.to_string()
}

fn undouble(stem: &mut String) {
    let bytes = stem.as_bytes();
    let n = bytes.len();
    if n <= MIN_STEM_CHARS {
        return;
    }
    let last = bytes[n - 1];
    if last == bytes[n - 2] && !b"aeioulsz".contains(&last) {
        stem.pop();
    }
}
