//! Markdown rendering of an [`Edition`].
//!
//! The document opens with the edition heading and run statistics, followed
//! by one section per analyzed article. Each claim becomes a bullet with its
//! confidence, a trust label, the corroborating sources and any fact-check
//! hits.

use crate::models::{ClaimReport, Edition, Match};
use crate::utils::{slugify_title, upcase};
use itertools::Itertools;
use std::fmt::Write;

/// Human label for a confidence score.
pub fn trust_label(confidence: f64) -> &'static str {
    if confidence >= 0.75 {
        "likely reliable"
    } else if confidence >= 0.45 {
        "unverified"
    } else {
        "doubtful"
    }
}

/// Confidence as a whole percentage, e.g. `0.62` -> `"62%"`.
fn percent(confidence: f64) -> String {
    format!("{:.0}%", confidence * 100.0)
}

fn link_or_text(text: &str, link: &str) -> String {
    if link.is_empty() {
        text.to_string()
    } else {
        format!("[{}]({})", text, link)
    }
}

fn write_claim(md: &mut String, claim: &ClaimReport) {
    writeln!(
        md,
        "- **{}** ({}) {}",
        percent(claim.confidence),
        trust_label(claim.confidence),
        claim.claim
    )
    .unwrap();

    if claim.matches.is_empty() {
        writeln!(md, "  - Corroborated by: none").unwrap();
    } else {
        let sources = claim.matches.iter().map(|m| m.source.as_str()).unique().join(", ");
        writeln!(md, "  - Corroborated by: {}", sources).unwrap();
    }

    for hit in &claim.fact_matches {
        writeln!(md, "  - Fact-check: {}", fact_check_line(hit)).unwrap();
    }
}

fn fact_check_line(hit: &Match) -> String {
    format!("{} ({})", link_or_text(&hit.title, &hit.link), hit.source)
}

/// Render an [`Edition`] as a Markdown document.
pub fn edition_to_markdown(edition: &Edition) -> String {
    let mut md = String::new();
    let stats = &edition.output.stats;

    writeln!(
        md,
        "# {} Fact Check - {} ({})\n",
        upcase(&edition.time_of_day),
        edition.local_date,
        edition.category
    )
    .unwrap();
    writeln!(md, "_Generated at {}_\n", edition.local_time).unwrap();
    writeln!(md, "| Sources | Articles | Claims |").unwrap();
    writeln!(md, "|---|---|---|").unwrap();
    writeln!(
        md,
        "| {} | {} | {} |\n",
        stats.distinct_sources, stats.article_count, stats.claim_count
    )
    .unwrap();

    for report in &edition.output.reports {
        let title = if report.title.is_empty() {
            "(untitled)"
        } else {
            report.title.as_str()
        };
        writeln!(md, "<a id=\"{}\"></a>", slugify_title(title)).unwrap();
        writeln!(md, "## {}\n", link_or_text(title, &report.link)).unwrap();
        writeln!(md, "_Source: {}_\n", report.source).unwrap();

        if report.claims.is_empty() {
            writeln!(md, "No checkable claims found.\n").unwrap();
            continue;
        }
        for claim in &report.claims {
            write_claim(&mut md, claim);
        }
        md.push('\n');
    }

    md
}
