//! Data models for feed articles, extracted claims, and their reports.
//!
//! This module defines the records that flow through the engine:
//! - [`Article`]: one syndication entry, from either the mainstream or the
//!   fact-check pool ([`FactCheckEntry`] is the same shape)
//! - [`Claim`]: a sentence extracted from an article
//! - [`Match`]: one hit for a claim in either pool
//! - [`ClaimReport`] / [`ArticleReport`]: scored output per claim / article
//! - [`RunStats`] / [`AnalysisOutput`]: the result of a whole run
//!
//! Report records serialize with camelCase field names so the JSON output
//! reads naturally to browser clients (`factMatches`, `claimCount`).

use serde::{Deserialize, Serialize};

/// A single entry parsed from an RSS `item` or Atom `entry`.
///
/// `source` is a display label (feed name or hostname), not an identifier.
/// Two feeds may share a label and are not deduplicated.
#[derive(Debug, Clone, Default, PartialEq, Eq, Deserialize, Serialize)]
pub struct Article {
    /// Label of the feed the entry came from.
    pub source: String,
    /// Entry headline.
    pub title: String,
    /// Link to the full story, or empty.
    pub link: String,
    /// Entry description, summary, or content.
    pub description: String,
    /// Publication timestamp as it appeared in the feed.
    pub published: String,
}

/// An entry from a dedicated fact-checking feed.
///
/// Structurally an [`Article`]; the distinction is which pool it sits in.
pub type FactCheckEntry = Article;

impl Article {
    /// Title and description joined into one span of text.
    ///
    /// A `". "` separator is inserted when the title does not already end in
    /// terminal punctuation so the segmenter sees a sentence boundary there.
    pub fn combined_text(&self) -> String {
        let title = self.title.trim();
        let description = self.description.trim();
        match (title.is_empty(), description.is_empty()) {
            (true, true) => String::new(),
            (false, true) => title.to_string(),
            (true, false) => description.to_string(),
            (false, false) if title.ends_with(['.', '!', '?']) => {
                format!("{} {}", title, description)
            }
            (false, false) => format!("{}. {}", title, description),
        }
    }
}

/// Raw feed text paired with the label of its source.
#[derive(Debug, Clone, Deserialize, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct FeedText {
    /// Display label copied onto every parsed article.
    pub source_label: String,
    /// The syndication document as fetched.
    pub raw_xml: String,
}

/// A sentence extracted from an article and treated as one assertion.
#[derive(Debug, Clone, PartialEq, Eq, Deserialize, Serialize)]
pub struct Claim {
    /// The extracted sentence, trimmed.
    pub sentence: String,
    /// Source label of the originating article.
    pub source: String,
    /// Link of the originating article.
    pub link: String,
    /// Position of the originating article in the mainstream pool.
    #[serde(skip)]
    pub article_index: usize,
}

/// Which pool a [`Match`] was found in.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Deserialize, Serialize)]
#[serde(rename_all = "lowercase")]
pub enum MatchKind {
    /// A mainstream article corroborating the claim.
    Mainstream,
    /// A fact-check entry touching the claim.
    Factcheck,
}

/// One pool entry that overlaps with a claim.
#[derive(Debug, Clone, PartialEq, Deserialize, Serialize)]
pub struct Match {
    /// Pool the candidate came from.
    pub kind: MatchKind,
    /// Source label of the candidate.
    pub source: String,
    /// Title of the candidate.
    pub title: String,
    /// Link of the candidate.
    pub link: String,
    /// Token overlap score; absent when the prefix fast path matched.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub score: Option<f64>,
}

/// A scored claim.
#[derive(Debug, Clone, PartialEq, Deserialize, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct ClaimReport {
    /// The claim sentence.
    pub claim: String,
    /// Source label of the originating article.
    pub source: String,
    /// Link of the originating article.
    pub link: String,
    /// Corroborating mainstream matches, in pool order.
    pub matches: Vec<Match>,
    /// Fact-check matches, in pool order.
    pub fact_matches: Vec<Match>,
    /// Heuristic trust score in `[0, 1]`, two decimals.
    pub confidence: f64,
}

/// All scored claims for one mainstream article.
#[derive(Debug, Clone, PartialEq, Deserialize, Serialize)]
pub struct ArticleReport {
    pub source: String,
    pub title: String,
    pub link: String,
    pub claims: Vec<ClaimReport>,
}

/// Aggregate counts over one run.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Deserialize, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct RunStats {
    /// Distinct source labels across the mainstream pool.
    pub distinct_sources: usize,
    /// Number of mainstream articles analyzed.
    pub article_count: usize,
    /// Number of claims across all reports.
    pub claim_count: usize,
}

/// Everything one engine run produces.
#[derive(Debug, Clone, Default, PartialEq, Deserialize, Serialize)]
pub struct AnalysisOutput {
    pub reports: Vec<ArticleReport>,
    pub stats: RunStats,
}

/// One published run of the analysis.
///
/// Each execution of the binary produces one `Edition`, which is written to
/// both JSON and Markdown.
///
/// # Edition Naming
///
/// The `time_of_day` field categorizes editions as:
/// - `"morning"`: 00:00 - 08:00
/// - `"afternoon"`: 08:00 - 16:00
/// - `"evening"`: 16:00 - 24:00
#[derive(Debug, Clone, Deserialize, Serialize)]
pub struct Edition {
    /// The date of the run in `YYYY-MM-DD` format.
    pub local_date: String,
    /// "morning", "afternoon", or "evening".
    pub time_of_day: String,
    /// The exact local time of the run.
    pub local_time: String,
    /// Feed category that was analyzed.
    pub category: String,
    #[serde(flatten)]
    pub output: AnalysisOutput,
}
