//! Token-set overlap between two spans of text.
//!
//! Text is lower-cased, stripped of anything that is neither a word character
//! nor whitespace, and split into a set of unique tokens. Similarity is the
//! Jaccard index of the two sets: `|A ∩ B| / (|A| + |B| - |A ∩ B|)`.

use once_cell::sync::Lazy;
use regex::Regex;
use std::collections::HashSet;

static NON_WORD: Lazy<Regex> = Lazy::new(|| Regex::new(r"[^\w\s]").unwrap());

/// Unique lower-cased tokens of `text`.
pub fn tokenize(text: &str) -> HashSet<String> {
    let lowered = text.to_lowercase();
    NON_WORD
        .replace_all(&lowered, "")
        .split_whitespace()
        .map(str::to_string)
        .collect()
}

/// Jaccard index of two token sets; `0.0` when both are empty.
pub fn jaccard(a: &HashSet<String>, b: &HashSet<String>) -> f64 {
    let (small, large) = if a.len() <= b.len() { (a, b) } else { (b, a) };
    let shared = small.iter().filter(|token| large.contains(*token)).count();
    let union = a.len() + b.len() - shared;
    if union == 0 {
        return 0.0;
    }
    shared as f64 / union as f64
}

/// Lexical overlap of two texts in `[0, 1]`.
pub fn similarity(a: &str, b: &str) -> f64 {
    jaccard(&tokenize(a), &tokenize(b))
}
