//! Claim extraction and cross-referencing engine.
//!
//! The engine is a pure, synchronous transformation: given a mainstream pool
//! and a fact-check pool it returns one [`ArticleReport`] per mainstream
//! article plus [`RunStats`]. It fetches nothing and keeps no state between
//! runs.
//!
//! # Pipeline
//!
//! 1. [`segment`]: split title + description into bounded sentences
//! 2. [`claims`]: keep the first few sentences per article as claims
//! 3. [`crossref`]: look for each claim in both pools (prefix fast path,
//!    then [`similarity`] fallback)
//! 4. [`confidence`]: turn the matches into a bounded score
//! 5. [`report`]: assemble reports and aggregate counts
//!
//! # Example
//!
//! ```ignore
//! let engine = Engine::new(EngineConfig::default())?;
//! let output = engine.analyze(&articles, &fact_checks);
//! for report in &output.reports {
//!     println!("{}: {} claims", report.title, report.claims.len());
//! }
//! ```

pub mod claims;
pub mod confidence;
pub mod crossref;
pub mod report;
pub mod segment;
pub mod similarity;

use crate::config::EngineConfig;
use crate::error::ConfigError;
use crate::feeds::{parse_feeds, ParseOptions, XmlParser};
use crate::models::{AnalysisOutput, Article, ArticleReport, FactCheckEntry, FeedText, MatchKind};
use crossref::CandidatePool;
use segment::Segmenter;
use tracing::{debug, info, instrument, warn};

/// A configured engine. Build one per run.
#[derive(Debug, Clone)]
pub struct Engine {
    config: EngineConfig,
    segmenter: Segmenter,
}

impl Engine {
    /// Validate `config` and prepare the segmenter.
    ///
    /// # Errors
    ///
    /// Returns [`ConfigError::Invalid`] for out-of-range tunables.
    pub fn new(config: EngineConfig) -> Result<Self, ConfigError> {
        config.validate()?;
        let segmenter = Segmenter::new(config.min_sentence_chars, config.max_sentence_chars)
            .map_err(|e| ConfigError::Invalid(format!("sentence bounds: {}", e)))?;
        Ok(Self { config, segmenter })
    }

    pub fn config(&self) -> &EngineConfig {
        &self.config
    }

    /// Feed parsing options derived from this engine's configuration.
    pub fn parse_options(&self) -> ParseOptions {
        ParseOptions::from(&self.config)
    }

    /// Score every claim of every mainstream article.
    ///
    /// Reports come back in `articles` order, claims in sentence order and
    /// matches in pool order, so identical inputs give identical output.
    ///
    /// # Arguments
    ///
    /// * `articles` - The mainstream pool; each article is both a claim
    ///   source and a corroboration candidate for the others
    /// * `fact_checks` - Entries from fact-checking feeds, used only as a
    ///   penalty signal
    ///
    /// # Returns
    ///
    /// One [`ArticleReport`] per article plus aggregate [`crate::models::RunStats`].
    #[instrument(level = "info", skip_all, fields(articles = articles.len(), fact_checks = fact_checks.len()))]
    pub fn analyze(&self, articles: &[Article], fact_checks: &[FactCheckEntry]) -> AnalysisOutput {
        let mainstream = CandidatePool::new(MatchKind::Mainstream, articles);
        let fact_pool = CandidatePool::new(MatchKind::Factcheck, fact_checks);
        debug!(
            mainstream = mainstream.len(),
            fact_checks = fact_pool.len(),
            "Prepared candidate pools"
        );
        if fact_pool.is_empty() {
            warn!("Fact-check pool is empty; no claim can be penalized");
        }

        let reports: Vec<ArticleReport> = articles
            .iter()
            .enumerate()
            .map(|(index, article)| {
                report::build_article_report(
                    &self.segmenter,
                    article,
                    index,
                    &mainstream,
                    &fact_pool,
                    &self.config,
                )
            })
            .collect();

        let stats = report::compute_stats(articles, &reports);
        info!(
            distinct_sources = stats.distinct_sources,
            article_count = stats.article_count,
            claim_count = stats.claim_count,
            "Analysis complete"
        );
        AnalysisOutput { reports, stats }
    }

    /// Parse both pools from raw feed text, then [`Engine::analyze`] them.
    ///
    /// Feeds that fail to parse contribute no articles.
    ///
    /// # Arguments
    ///
    /// * `parser` - XML capability used to read every document
    /// * `mainstream` - Raw mainstream feeds with their source labels
    /// * `fact_checks` - Raw fact-check feeds with their source labels
    ///
    /// # Returns
    ///
    /// The same [`AnalysisOutput`] [`Engine::analyze`] would give for the
    /// parsed articles, in feed order.
    pub fn analyze_feeds<P>(
        &self,
        parser: &P,
        mainstream: &[FeedText],
        fact_checks: &[FeedText],
    ) -> AnalysisOutput
    where
        P: XmlParser + ?Sized,
    {
        let options = self.parse_options();
        let articles = parse_feeds(parser, mainstream, &options);
        let fact_entries = parse_feeds(parser, fact_checks, &options);
        info!(
            mainstream_feeds = mainstream.len(),
            articles = articles.len(),
            factcheck_feeds = fact_checks.len(),
            fact_entries = fact_entries.len(),
            "Parsed feed pools"
        );
        self.analyze(&articles, &fact_entries)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::feeds::QuickXmlParser;

    fn article(source: &str, title: &str, description: &str) -> Article {
        Article {
            source: source.to_string(),
            title: title.to_string(),
            link: format!("https://{}/story", source),
            description: description.to_string(),
            published: String::new(),
        }
    }

    fn engine() -> Engine {
        Engine::new(EngineConfig::default()).unwrap()
    }

    #[test]
    fn test_new_rejects_invalid_config() {
        let config = EngineConfig {
            min_sentence_chars: 10,
            max_sentence_chars: 5,
            ..EngineConfig::default()
        };
        assert!(Engine::new(config).is_err());
    }

    #[test]
    fn test_verbatim_repeat_is_corroborated_once() {
        let articles = vec![
            article(
                "a.com",
                "Flood warning issued for coastal regions as storm intensifies.",
                "",
            ),
            article(
                "b.com",
                "Evening briefing",
                "Flood warning issued for coastal regions as storm intensifies. Roads are closing.",
            ),
        ];
        let output = engine().analyze(&articles, &[]);
        let claim = &output.reports[0].claims[0];
        assert_eq!(claim.claim, "Flood warning issued for coastal regions as storm intensifies.");
        assert_eq!(claim.matches.len(), 1);
        assert_eq!(claim.matches[0].source, "b.com");
        assert_eq!(claim.matches[0].score, None);
        assert!(claim.fact_matches.is_empty());
        assert_eq!(claim.confidence, 0.62);
    }

    #[test]
    fn test_unmatched_claim_scores_base() {
        let articles = vec![
            article("a.com", "Zebras were seen migrating north during the monsoon season.", ""),
            article("b.com", "Quarterly earnings beat analyst expectations this spring.", ""),
        ];
        let facts = vec![article("Snopes", "Viral shark photo on flooded highway is fake", "")];
        let output = engine().analyze(&articles, &facts);
        let claim = &output.reports[0].claims[0];
        assert!(claim.matches.is_empty());
        assert!(claim.fact_matches.is_empty());
        assert_eq!(claim.confidence, 0.5);
    }

    #[test]
    fn test_two_sources_and_a_fact_check() {
        let text = "Officials say the city water supply is safe to drink again.";
        let articles = vec![
            article("origin.com", text, ""),
            article("a.com", text, ""),
            article("b.com", text, ""),
        ];
        let facts = vec![article("PolitiFact", text, "Rated: missing context.")];
        let output = engine().analyze(&articles, &facts);
        let claim = &output.reports[0].claims[0];
        assert_eq!(claim.matches.len(), 2);
        assert_eq!(claim.fact_matches.len(), 1);
        assert_eq!(claim.confidence, 0.29);
    }

    #[test]
    fn test_stats_and_order() {
        let articles = vec![
            article("a.com", "First article headline is long enough to count.", ""),
            article("b.com", "Second article headline is also long enough.", ""),
            article("a.com", "Short", ""),
        ];
        let output = engine().analyze(&articles, &[]);
        let titles: Vec<&str> = output.reports.iter().map(|r| r.title.as_str()).collect();
        assert_eq!(titles, vec![articles[0].title.as_str(), articles[1].title.as_str(), "Short"]);
        assert!(output.reports[2].claims.is_empty());
        assert_eq!(output.stats.distinct_sources, 2);
        assert_eq!(output.stats.article_count, 3);
        assert_eq!(output.stats.claim_count, 2);
    }

    #[test]
    fn test_runs_are_deterministic() {
        let articles = vec![
            article("a.com", "Storm intensifies along the coast as flood warnings spread.", ""),
            article("b.com", "Coastal flood warnings spread as the storm intensifies.", ""),
            article("c.com", "Flood warnings spread along the coast tonight.", ""),
        ];
        let e = engine();
        assert_eq!(e.analyze(&articles, &[]), e.analyze(&articles, &[]));
    }

    #[test]
    fn test_empty_pools() {
        let output = engine().analyze(&[], &[]);
        assert!(output.reports.is_empty());
        assert_eq!(output.stats.article_count, 0);
        assert_eq!(output.stats.distinct_sources, 0);
    }

    #[test]
    fn test_analyze_feeds_tolerates_broken_sources() {
        let good = FeedText {
            source_label: "good.com".to_string(),
            raw_xml: r#"<rss><channel>
                <item><title>Flood warning issued for coastal regions as storm intensifies.</title><link>https://good.com/1</link></item>
                <item><title>Weather</title><description>Flood warning issued for coastal regions as storm intensifies, officials said.</description></item>
            </channel></rss>"#
                .to_string(),
        };
        let broken = FeedText {
            source_label: "broken.com".to_string(),
            raw_xml: "<html><body>Service Unavailable".to_string(),
        };
        let facts = FeedText {
            source_label: "Snopes".to_string(),
            raw_xml: "not xml".to_string(),
        };

        let output = engine().analyze_feeds(&QuickXmlParser, &[good, broken], &[facts]);
        assert_eq!(output.stats.article_count, 2);
        assert_eq!(output.stats.distinct_sources, 1);
        let claim = &output.reports[0].claims[0];
        assert_eq!(claim.link, "https://good.com/1");
        assert_eq!(claim.matches.len(), 1);
        assert_eq!(claim.confidence, 0.62);
    }
}
