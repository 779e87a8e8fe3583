//! Claim extraction.
//!
//! The first `max_claims` sentences of an article's title and description are
//! its claims. No ranking is applied; earlier sentences win.

use crate::engine::segment::Segmenter;
use crate::models::{Article, Claim};

/// Extract up to `max_claims` claims from `article`.
///
/// `article_index` is the article's position in the mainstream pool and is
/// carried on each claim so cross-referencing can skip the article itself.
pub fn extract_claims(
    segmenter: &Segmenter,
    article: &Article,
    article_index: usize,
    max_claims: usize,
) -> Vec<Claim> {
    segmenter
        .segment(&article.combined_text())
        .take(max_claims)
        .map(|sentence| Claim {
            sentence,
            source: article.source.clone(),
            link: article.link.clone(),
            article_index,
        })
        .collect()
}

#[cfg(test)]
mod tests {
    use super::*;

    fn article(title: &str, description: &str) -> Article {
        Article {
            source: "npr.org".to_string(),
            title: title.to_string(),
            link: "https://npr.org/story".to_string(),
            description: description.to_string(),
            published: String::new(),
        }
    }

    #[test]
    fn test_claims_follow_article_order() {
        let seg = Segmenter::new(30, 250).unwrap();
        let a = article(
            "Flood warning issued for coastal regions as storm intensifies.",
            "Residents in low-lying areas were urged to leave before nightfall. \
             Schools across three counties will remain closed on Friday.",
        );
        let claims = extract_claims(&seg, &a, 7, 4);
        let sentences: Vec<&str> = claims.iter().map(|c| c.sentence.as_str()).collect();
        assert_eq!(
            sentences,
            vec![
                "Flood warning issued for coastal regions as storm intensifies.",
                "Residents in low-lying areas were urged to leave before nightfall.",
                "Schools across three counties will remain closed on Friday.",
            ]
        );
        assert!(claims.iter().all(|c| c.source == "npr.org"));
        assert!(claims.iter().all(|c| c.link == "https://npr.org/story"));
        assert!(claims.iter().all(|c| c.article_index == 7));
    }

    #[test]
    fn test_claim_count_is_capped() {
        let seg = Segmenter::new(30, 250).unwrap();
        let description = (0..10)
            .map(|i| format!("This is sentence number {} of the long description.", i))
            .collect::<Vec<_>>()
            .join(" ");
        let claims = extract_claims(&seg, &article("", &description), 0, 4);
        assert_eq!(claims.len(), 4);
        assert!(claims[0].sentence.contains("number 0"));
        assert!(claims[3].sentence.contains("number 3"));
    }

    #[test]
    fn test_short_title_is_separated_from_description() {
        let seg = Segmenter::new(30, 250).unwrap();
        let a = article("Storm update", "The coast guard suspended all ferry crossings overnight.");
        let claims = extract_claims(&seg, &a, 0, 4);
        assert_eq!(claims.len(), 1);
        assert_eq!(
            claims[0].sentence,
            "The coast guard suspended all ferry crossings overnight."
        );
    }

    #[test]
    fn test_article_without_text_has_no_claims() {
        let seg = Segmenter::new(30, 250).unwrap();
        assert!(extract_claims(&seg, &article("", ""), 0, 4).is_empty());
    }
}
