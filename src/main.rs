//! # Awful Fact Check
//!
//! Pulls a category of mainstream news feeds plus a set of fact-checking
//! feeds, extracts claims from every article, cross-references them, and
//! writes a scored edition as JSON and Markdown.
//!
//! ## Usage
//!
//! ```sh
//! awful_fact_check -j ./json -m ./markdown --category world
//! ```
//!
//! ## Architecture
//!
//! The application follows a pipeline architecture:
//! 1. **Configuration**: Load YAML config and apply CLI overrides
//! 2. **Fetching**: Download feeds concurrently, or read local feed files
//! 3. **Analysis**: Parse both pools and run the claim engine
//! 4. **Output**: Write JSON API files and a Markdown report

use awful_fact_check::config::Config;
use awful_fact_check::fetch::{fetcher_from_config, gather_feeds};
use awful_fact_check::models::{Edition, FeedText};
use awful_fact_check::outputs::{json, markdown};
use awful_fact_check::utils::{ensure_writable_dir, time_of_day};
use awful_fact_check::{Engine, QuickXmlParser};
use chrono::Local;
use clap::Parser;
use std::error::Error;
use std::path::PathBuf;
use tracing::{debug, error, info, instrument, warn};
use tracing_subscriber::{fmt as tfmt, EnvFilter};

mod cli;

use cli::Cli;

/// Read `LABEL=PATH` feed files from disk, skipping unreadable ones.
#[instrument(level = "info", skip_all, fields(files = files.len()))]
async fn read_local_feeds(files: &[(String, PathBuf)]) -> Vec<FeedText> {
    let mut feeds = Vec::with_capacity(files.len());
    for (label, path) in files {
        match tokio::fs::read_to_string(path).await {
            Ok(raw_xml) => {
                debug!(source = %label, path = %path.display(), bytes = raw_xml.len(), "Read local feed");
                feeds.push(FeedText {
                    source_label: label.clone(),
                    raw_xml,
                });
            }
            Err(e) => {
                warn!(source = %label, path = %path.display(), error = %e, "Failed to read local feed; skipping");
            }
        }
    }
    feeds
}

#[tokio::main]
#[instrument]
async fn main() -> Result<(), Box<dyn Error>> {
    // --- Tracing init ---
    let filter = EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("info"));
    tfmt()
        .with_env_filter(filter)
        .with_target(true)
        .with_file(false)
        .with_line_number(false)
        .with_timer(tracing_subscriber::fmt::time::UtcTime::rfc_3339())
        .init();

    let start_time = std::time::Instant::now();
    info!("fact_check starting up");

    // Parse CLI
    let args = Cli::parse();
    debug!(?args.json_output_dir, ?args.markdown_output_dir, ?args.config, "Parsed CLI arguments");

    // ---- Load config & apply overrides ----
    let mut config = Config::load(args.config.as_deref())?;
    if args.no_proxy {
        config.fetch.use_proxy = false;
    }
    if let Some(max_claims) = args.max_claims {
        config.engine.max_claims_per_article = max_claims;
    }
    if let Some(threshold) = args.threshold {
        config.engine.similarity_threshold = threshold;
    }

    let engine = match Engine::new(config.engine.clone()) {
        Ok(engine) => engine,
        Err(e) => {
            error!(error = %e, "Invalid engine configuration");
            return Err(e.into());
        }
    };
    info!(
        max_claims = engine.config().max_claims_per_article,
        threshold = engine.config().similarity_threshold,
        use_proxy = config.fetch.use_proxy,
        "Engine configured"
    );

    // Early check: ensure output dirs are writable
    if let Err(e) = ensure_writable_dir(&args.json_output_dir).await {
        error!(
            path = %args.json_output_dir,
            error = %e,
            "JSON output directory is not writable (fix perms or choose a different path)"
        );
        return Err(e);
    }
    if let Some(ref markdown_dir) = args.markdown_output_dir {
        if let Err(e) = ensure_writable_dir(markdown_dir).await {
            error!(path = %markdown_dir, error = %e, "Markdown output directory is not writable");
            return Err(e);
        }
    }

    // ---- Gather feeds ----
    let (mainstream, fact_checks) = if args.is_offline() {
        info!(
            feed_files = args.feed_files.len(),
            factcheck_files = args.factcheck_files.len(),
            "Reading local feed files; network fetching disabled"
        );
        (
            read_local_feeds(&args.feed_files).await,
            read_local_feeds(&args.factcheck_files).await,
        )
    } else {
        let fetcher = fetcher_from_config(&config.fetch)?;
        debug!(categories = ?config.feeds.categories(), "Available feed categories");
        let sources = config.feeds.category(&args.category);
        info!(category = %args.category, sources = sources.len(), "Fetching mainstream feeds");
        let mainstream = gather_feeds(&fetcher, sources, config.fetch.concurrency).await;

        info!(sources = config.feeds.factcheck.len(), "Fetching fact-check feeds");
        let fact_checks = gather_feeds(&fetcher, &config.feeds.factcheck, config.fetch.concurrency).await;
        (mainstream, fact_checks)
    };

    if mainstream.is_empty() {
        warn!("No mainstream feeds available; the edition will be empty");
    }

    // ---- Analyze ----
    let output = engine.analyze_feeds(&QuickXmlParser, &mainstream, &fact_checks);

    let now = Local::now();
    let edition = Edition {
        local_date: now.date_naive().to_string(),
        time_of_day: time_of_day(),
        local_time: now.time().to_string(),
        category: args.category.clone(),
        output,
    };
    info!(
        time_of_day = %edition.time_of_day,
        local_date = %edition.local_date,
        local_time = %edition.local_time,
        articles = edition.output.stats.article_count,
        claims = edition.output.stats.claim_count,
        "Edition assembled"
    );

    // ---- JSON output ----
    if let Err(e) = json::write_edition(&edition, &args.json_output_dir).await {
        error!(error = %e, "Failed to write final JSON");
    }

    // ---- Markdown output ----
    if let Some(ref markdown_dir) = args.markdown_output_dir {
        let md = markdown::edition_to_markdown(&edition);
        let output_markdown_filename = format!(
            "{}/{}_{}.md",
            markdown_dir.trim_end_matches('/'),
            edition.local_date,
            edition.time_of_day
        );

        info!(path = %output_markdown_filename, "Writing Markdown");
        if let Err(e) = tokio::fs::write(&output_markdown_filename, md).await {
            error!(path = %output_markdown_filename, error = %e, "Failed writing Markdown");
        } else {
            info!(path = %output_markdown_filename, "Wrote edition Markdown");
        }
    }

    let elapsed = start_time.elapsed();
    info!(
        ?elapsed,
        secs = elapsed.as_secs(),
        millis = elapsed.subsec_millis(),
        "Execution complete"
    );

    Ok(())
}
