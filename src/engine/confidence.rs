//! Corroboration-count confidence.
//!
//! ```text
//! confidence = clamp(base + bonus * min(distinct_sources, max_sources)
//!                    - (penalty if any fact-check match), 0, 1)
//! ```
//!
//! rounded to two decimals. With the defaults a claim starts at 0.5, gains
//! 0.12 per distinct corroborating outlet up to four outlets, and loses 0.45
//! the moment any fact-check entry touches it, however many outlets repeat it.
//! This is a heuristic score, not a probability.

use crate::config::ConfidenceConfig;
use crate::models::Match;
use itertools::Itertools;

/// Number of distinct source labels among `matches`.
pub fn distinct_sources(matches: &[Match]) -> usize {
    matches.iter().map(|m| m.source.as_str()).unique().count()
}

/// Score a claim from its mainstream and fact-check matches.
pub fn confidence(matches: &[Match], fact_matches: &[Match], config: &ConfidenceConfig) -> f64 {
    let credited = distinct_sources(matches).min(config.max_bonus_sources);
    let mut score = config.base + config.per_source_bonus * credited as f64;
    if !fact_matches.is_empty() {
        score -= config.factcheck_penalty;
    }
    round2(score.clamp(0.0, 1.0))
}

/// Round to two decimal places.
pub fn round2(value: f64) -> f64 {
    (value * 100.0).round() / 100.0
}
