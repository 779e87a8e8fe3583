//! # Awful Fact Check
//!
//! Extracts short factual claims from syndicated news feeds and scores each
//! one by how widely it is repeated across independent outlets and whether
//! dedicated fact-checking feeds are discussing it.
//!
//! ## Modules
//!
//! - [`feeds`]: RSS/Atom parsing behind the [`feeds::XmlParser`] capability,
//!   the default feed catalog, and the loaded-language neutralizer
//! - [`engine`]: sentence segmentation, claim extraction, cross-referencing
//!   and confidence scoring
//! - [`fetch`]: HTTP fetching with proxy fallback and retries
//! - [`outputs`]: JSON and Markdown writers
//! - [`config`], [`error`], [`models`], [`utils`]
//!
//! ## Example
//!
//! ```ignore
//! use awful_fact_check::{Engine, EngineConfig, QuickXmlParser};
//!
//! let engine = Engine::new(EngineConfig::default())?;
//! let output = engine.analyze_feeds(&QuickXmlParser, &mainstream, &fact_checks);
//! println!("{} claims", output.stats.claim_count);
//! ```

pub mod config;
pub mod engine;
pub mod error;
pub mod feeds;
pub mod fetch;
pub mod models;
pub mod outputs;
pub mod utils;

pub use config::{Config, EngineConfig};
pub use engine::Engine;
pub use feeds::{parse_feed, QuickXmlParser, XmlParser};
pub use models::{
    AnalysisOutput, Article, ArticleReport, Claim, ClaimReport, Edition, FactCheckEntry,
    FeedText, Match, MatchKind, RunStats,
};
