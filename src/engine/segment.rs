//! Length-windowed sentence segmentation.
//!
//! Text is whitespace-normalized and then cut into maximal runs of
//! `min..=max` characters that are not `.`, `!` or `?`, each optionally
//! followed by one such mark. Fragments shorter than `min` are dropped and
//! runs longer than `max` are split mid-text. This is deliberately crude: no
//! abbreviation handling, no quote tracking.

use once_cell::sync::Lazy;
use regex::Regex;

static WHITESPACE: Lazy<Regex> = Lazy::new(|| Regex::new(r"\s+").unwrap());

/// Splits text into candidate sentences of bounded length.
#[derive(Debug, Clone)]
pub struct Segmenter {
    pattern: Regex,
}

impl Segmenter {
    /// Build a segmenter accepting runs of `min_chars..=max_chars` characters.
    pub fn new(min_chars: usize, max_chars: usize) -> Result<Self, regex::Error> {
        let pattern = Regex::new(&format!(r"[^.!?]{{{},{}}}[.!?]?", min_chars, max_chars))?;
        Ok(Self { pattern })
    }

    /// Sentences of `text`, trimmed, in source order.
    ///
    /// Nothing is matched until the returned iterator is advanced. It owns
    /// the normalized text, so it can outlive `text` and be
    /// [`rewound`](Sentences::rewind) or cloned to walk the sentences again.
    pub fn segment(&self, text: &str) -> Sentences<'_> {
        Sentences {
            pattern: &self.pattern,
            text: normalize(text),
            pos: 0,
        }
    }
}

fn normalize(text: &str) -> String {
    WHITESPACE.replace_all(text, " ").into_owned()
}

/// Owning iterator over the trimmed sentences of one text.
#[derive(Debug, Clone)]
pub struct Sentences<'r> {
    pattern: &'r Regex,
    text: String,
    pos: usize,
}

impl Sentences<'_> {
    /// Start again from the first sentence.
    pub fn rewind(&mut self) {
        self.pos = 0;
    }
}

impl Iterator for Sentences<'_> {
    type Item = String;

    fn next(&mut self) -> Option<String> {
        while self.pos <= self.text.len() {
            let span = self.pattern.find_at(&self.text, self.pos)?;
            self.pos = if span.is_empty() {
                span.end()
                    + self.text[span.end()..]
                        .chars()
                        .next()
                        .map_or(1, char::len_utf8)
            } else {
                span.end()
            };
            let sentence = span.as_str().trim();
            if !sentence.is_empty() {
                return Some(sentence.to_string());
            }
        }
        None
    }
}
