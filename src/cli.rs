//! Command-line interface definitions for Awful Fact Check.
//!
//! This module defines the CLI arguments and options using the `clap` crate.
//! Output directories and the config path can also come from environment
//! variables.

use clap::Parser;
use std::path::PathBuf;

/// Command-line arguments for the Awful Fact Check application.
///
/// Flags given here override the matching values from the config file.
///
/// # Examples
///
/// ```sh
/// # Analyze the default category, fetching over the network
/// awful_fact_check -j ./json -m ./markdown
///
/// # Only world news, no proxy fallback
/// awful_fact_check -j ./json --category world --no-proxy
///
/// # Offline, from local feed files
/// awful_fact_check -j ./json --feed-file bbc=./bbc.xml --factcheck-file Snopes=./snopes.xml
/// ```
#[derive(Parser, Debug)]
#[command(author, version, about)]
pub struct Cli {
    /// Output directory for the JSON API file
    #[arg(short, long, env = "FACT_CHECK_JSON_DIR")]
    pub json_output_dir: String,

    /// Output directory for the Markdown file
    #[arg(short, long, env = "FACT_CHECK_MARKDOWN_DIR")]
    pub markdown_output_dir: Option<String>,

    /// Optional path to config.yaml file
    #[arg(short, long, env = "FACT_CHECK_CONFIG")]
    pub config: Option<PathBuf>,

    /// Feed category to analyze
    #[arg(long, default_value = "all")]
    pub category: String,

    /// Fetch feeds directly, without the proxy fallback
    #[arg(long)]
    pub no_proxy: bool,

    /// Maximum claims extracted per article
    #[arg(long)]
    pub max_claims: Option<usize>,

    /// Similarity threshold for fuzzy matches (0.0 - 1.0)
    #[arg(long)]
    pub threshold: Option<f64>,

    /// Local mainstream feed as LABEL=PATH (repeatable; disables fetching)
    #[arg(long = "feed-file", value_name = "LABEL=PATH", value_parser = parse_labeled_path)]
    pub feed_files: Vec<(String, PathBuf)>,

    /// Local fact-check feed as LABEL=PATH (repeatable)
    #[arg(long = "factcheck-file", value_name = "LABEL=PATH", value_parser = parse_labeled_path)]
    pub factcheck_files: Vec<(String, PathBuf)>,
}

impl Cli {
    /// True when any local feed file was given, so nothing is fetched.
    pub fn is_offline(&self) -> bool {
        !self.feed_files.is_empty() || !self.factcheck_files.is_empty()
    }
}

/// Parse a `LABEL=PATH` pair.
fn parse_labeled_path(s: &str) -> Result<(String, PathBuf), String> {
    match s.split_once('=') {
        Some((label, path)) if !label.trim().is_empty() && !path.trim().is_empty() => {
            Ok((label.trim().to_string(), PathBuf::from(path.trim())))
        }
        _ => Err(format!("expected LABEL=PATH, got `{}`", s)),
    }
}
