//! Loaded-language neutralizer.
//!
//! Strips partisan labels and sensational adjectives from headlines and
//! rewrites charged reporting verbs to "said", so wording alone does not
//! decide whether two outlets appear to agree.

use once_cell::sync::Lazy;
use regex::Regex;

static PARTISAN: Lazy<Regex> = Lazy::new(|| {
    Regex::new(r"(?i)\b(democrat|republican|left-wing|right-wing|conservative|liberal)\b").unwrap()
});

static CHARGED_VERBS: Lazy<Regex> =
    Lazy::new(|| Regex::new(r"(?i)\b(criticized|slammed|blasted|attacked)\b").unwrap());

static SENSATIONAL: Lazy<Regex> =
    Lazy::new(|| Regex::new(r"(?i)\b(shocking|outrageous|controversial)\b").unwrap());

/// Rewrite loaded wording in `text` and trim the result.
pub fn neutralize(text: &str) -> String {
    if text.is_empty() {
        return String::new();
    }
    let text = PARTISAN.replace_all(text, "");
    let text = CHARGED_VERBS.replace_all(&text, "said");
    let text = SENSATIONAL.replace_all(&text, "");
    text.trim().to_string()
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_removes_partisan_labels() {
        assert_eq!(neutralize("Republican senator speaks"), "senator speaks");
        assert_eq!(neutralize("the Left-Wing group"), "the  group");
    }

    #[test]
    fn test_rewrites_charged_verbs() {
        assert_eq!(neutralize("Mayor BLASTED the budget"), "Mayor said the budget");
    }

    #[test]
    fn test_removes_sensational_adjectives() {
        assert_eq!(neutralize("A shocking result"), "A  result");
    }

    #[test]
    fn test_word_boundaries_are_respected() {
        assert_eq!(neutralize("liberalization continues"), "liberalization continues");
        assert_eq!(neutralize(""), "");
    }
}
