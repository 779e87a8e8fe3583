//! Cross-referencing of claims against the mainstream and fact-check pools.
//!
//! Each candidate contributes at most one [`Match`] per claim:
//!
//! 1. **Fast path**: the candidate's lower-cased title + description contains
//!    the claim's first `prefix_chars` characters, lower-cased. The match
//!    carries no score.
//! 2. **Fallback**: otherwise the token overlap between the claim and the
//!    candidate text is computed and the candidate matches when it exceeds
//!    `similarity_threshold`. The match carries the score.
//!
//! The caller names the candidate to skip (the article the claim was
//! extracted from) by its index in the mainstream pool, so a claim never
//! corroborates itself.

use crate::config::EngineConfig;
use crate::engine::similarity::{jaccard, tokenize};
use crate::models::{Article, Claim, Match, MatchKind};
use std::collections::HashSet;
use tracing::trace;

/// A pool entry with its comparison text prepared once per run.
#[derive(Debug)]
pub struct Candidate<'a> {
    pub article: &'a Article,
    lowered: String,
    tokens: HashSet<String>,
}

impl<'a> Candidate<'a> {
    pub fn new(article: &'a Article) -> Self {
        let text = article.combined_text();
        Self {
            article,
            lowered: text.to_lowercase(),
            tokens: tokenize(&text),
        }
    }
}

/// A prepared pool of candidates of one kind.
#[derive(Debug)]
pub struct CandidatePool<'a> {
    kind: MatchKind,
    candidates: Vec<Candidate<'a>>,
}

impl<'a> CandidatePool<'a> {
    pub fn new(kind: MatchKind, articles: &'a [Article]) -> Self {
        Self {
            kind,
            candidates: articles.iter().map(Candidate::new).collect(),
        }
    }

    pub fn len(&self) -> usize {
        self.candidates.len()
    }

    pub fn is_empty(&self) -> bool {
        self.candidates.is_empty()
    }
}

/// Matches found for one claim.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct CrossReference {
    /// Corroborating mainstream matches.
    pub matches: Vec<Match>,
    /// Fact-check matches.
    pub fact_matches: Vec<Match>,
}

/// Compare one claim against both prepared pools.
///
/// # Arguments
///
/// * `claim` - The claim to look for
/// * `mainstream` - Prepared mainstream pool
/// * `exclude` - Index in `mainstream` of the article the claim came from;
///   that candidate is skipped. `None` when the caller already left it out.
/// * `fact_checks` - Prepared fact-check pool; never subject to exclusion
/// * `config` - Prefix length and similarity threshold
///
/// # Returns
///
/// Matches from each pool, in pool order.
pub fn cross_reference_pools(
    claim: &Claim,
    mainstream: &CandidatePool<'_>,
    exclude: Option<usize>,
    fact_checks: &CandidatePool<'_>,
    config: &EngineConfig,
) -> CrossReference {
    let key = ClaimKey::new(claim, config.prefix_chars);
    CrossReference {
        matches: scan(&key, mainstream, exclude, config),
        fact_matches: scan(&key, fact_checks, None, config),
    }
}

/// Compare one claim against unprepared article slices.
///
/// Convenience wrapper over [`cross_reference_pools`] for single claims;
/// batch callers should build the pools once and reuse them.
///
/// `exclude` is an index into `articles`, not into whatever pool the claim
/// was originally extracted from. Pass `Some(claim.article_index)` when
/// `articles` is that same pool, and `None` when the originating article has
/// already been removed from `articles`.
pub fn cross_reference(
    claim: &Claim,
    articles: &[Article],
    exclude: Option<usize>,
    fact_checks: &[Article],
    config: &EngineConfig,
) -> CrossReference {
    let mainstream = CandidatePool::new(MatchKind::Mainstream, articles);
    let fact_checks = CandidatePool::new(MatchKind::Factcheck, fact_checks);
    cross_reference_pools(claim, &mainstream, exclude, &fact_checks, config)
}

struct ClaimKey {
    prefix: String,
    tokens: HashSet<String>,
}

impl ClaimKey {
    fn new(claim: &Claim, prefix_chars: usize) -> Self {
        let prefix: String = claim.sentence.chars().take(prefix_chars).collect();
        Self {
            prefix: prefix.to_lowercase(),
            tokens: tokenize(&claim.sentence),
        }
    }
}

fn scan(
    key: &ClaimKey,
    pool: &CandidatePool<'_>,
    exclude: Option<usize>,
    config: &EngineConfig,
) -> Vec<Match> {
    pool.candidates
        .iter()
        .enumerate()
        .filter(|(index, _)| Some(*index) != exclude)
        .filter_map(|(_, candidate)| check(key, candidate, pool.kind, config.similarity_threshold))
        .collect()
}

fn check(
    key: &ClaimKey,
    candidate: &Candidate<'_>,
    kind: MatchKind,
    threshold: f64,
) -> Option<Match> {
    let score = if !key.prefix.is_empty() && candidate.lowered.contains(&key.prefix) {
        None
    } else {
        let score = jaccard(&key.tokens, &candidate.tokens);
        if score <= threshold {
            return None;
        }
        Some(score)
    };

    trace!(?kind, source = %candidate.article.source, ?score, "Candidate matched claim");
    Some(Match {
        kind,
        source: candidate.article.source.clone(),
        title: candidate.article.title.clone(),
        link: candidate.article.link.clone(),
        score,
    })
}
