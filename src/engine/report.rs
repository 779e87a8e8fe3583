//! Assembly of per-article reports and run statistics.

use crate::config::EngineConfig;
use crate::engine::claims::extract_claims;
use crate::engine::confidence::confidence;
use crate::engine::crossref::{cross_reference_pools, CandidatePool};
use crate::engine::segment::Segmenter;
use crate::models::{Article, ArticleReport, ClaimReport, RunStats};
use itertools::Itertools;

/// Extract, cross-reference and score every claim of one article.
pub fn build_article_report(
    segmenter: &Segmenter,
    article: &Article,
    article_index: usize,
    mainstream: &CandidatePool<'_>,
    fact_checks: &CandidatePool<'_>,
    config: &EngineConfig,
) -> ArticleReport {
    let claims = extract_claims(segmenter, article, article_index, config.max_claims_per_article)
        .into_iter()
        .map(|claim| {
            let found = cross_reference_pools(&claim, mainstream, Some(claim.article_index), fact_checks, config);
            let score = confidence(&found.matches, &found.fact_matches, &config.confidence);
            ClaimReport {
                claim: claim.sentence,
                source: claim.source,
                link: claim.link,
                matches: found.matches,
                fact_matches: found.fact_matches,
                confidence: score,
            }
        })
        .collect();

    ArticleReport {
        source: article.source.clone(),
        title: article.title.clone(),
        link: article.link.clone(),
        claims,
    }
}

/// Aggregate counts over the mainstream pool and the finished reports.
pub fn compute_stats(articles: &[Article], reports: &[ArticleReport]) -> RunStats {
    RunStats {
        distinct_sources: articles.iter().map(|a| a.source.as_str()).unique().count(),
        article_count: articles.len(),
        claim_count: reports.iter().map(|r| r.claims.len()).sum(),
    }
}
