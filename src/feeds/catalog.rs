//! Built-in feed lists and source labelling.
//!
//! Mainstream feeds are grouped by category; fact-check feeds form a single
//! pool that is consulted for every category. Both can be replaced from the
//! `feeds:` section of the config file, where a source may be written as a
//! bare URL or as `{ url, name }`.

use serde::{Deserialize, Serialize};
use std::collections::BTreeMap;
use tracing::warn;

/// Category used when none, or an unknown one, is requested.
pub const DEFAULT_CATEGORY: &str = "all";

/// One feed URL and an optional display name.
#[derive(Debug, Clone, PartialEq, Eq, Deserialize, Serialize)]
#[serde(from = "FeedSourceRepr")]
pub struct FeedSource {
    pub url: String,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub name: Option<String>,
}

#[derive(Deserialize)]
#[serde(untagged)]
enum FeedSourceRepr {
    Url(String),
    Full { url: String, name: Option<String> },
}

impl From<FeedSourceRepr> for FeedSource {
    fn from(repr: FeedSourceRepr) -> Self {
        match repr {
            FeedSourceRepr::Url(url) => FeedSource { url, name: None },
            FeedSourceRepr::Full { url, name } => FeedSource { url, name },
        }
    }
}

impl FeedSource {
    pub fn new(url: &str) -> Self {
        Self {
            url: url.to_string(),
            name: None,
        }
    }

    pub fn named(name: &str, url: &str) -> Self {
        Self {
            url: url.to_string(),
            name: Some(name.to_string()),
        }
    }

    /// Display label: the configured name, else the hostname without `www.`.
    ///
    /// For example: "https://www.npr.org/rss/rss.php?id=1001" -> "npr.org"
    pub fn label(&self) -> String {
        if let Some(name) = self.name.as_deref().filter(|n| !n.trim().is_empty()) {
            return name.trim().to_string();
        }
        url::Url::parse(&self.url)
            .ok()
            .and_then(|parsed| parsed.host_str().map(|h| h.strip_prefix("www.").unwrap_or(h).to_string()))
            .unwrap_or_else(|| self.url.clone())
    }
}

/// Mainstream feeds by category plus the fact-check pool.
#[derive(Debug, Clone, PartialEq, Deserialize, Serialize)]
#[serde(default)]
pub struct FeedCatalog {
    pub mainstream: BTreeMap<String, Vec<FeedSource>>,
    pub factcheck: Vec<FeedSource>,
}

impl Default for FeedCatalog {
    fn default() -> Self {
        default_catalog()
    }
}

impl FeedCatalog {
    /// Mainstream feeds for `category`, falling back to [`DEFAULT_CATEGORY`].
    pub fn category(&self, category: &str) -> &[FeedSource] {
        if let Some(feeds) = self.mainstream.get(category) {
            return feeds;
        }
        warn!(%category, fallback = DEFAULT_CATEGORY, "Unknown feed category");
        self.mainstream
            .get(DEFAULT_CATEGORY)
            .map(Vec::as_slice)
            .unwrap_or(&[])
    }

    /// Names of all configured categories, sorted.
    pub fn categories(&self) -> Vec<&str> {
        self.mainstream.keys().map(String::as_str).collect()
    }
}

fn sources(urls: &[&str]) -> Vec<FeedSource> {
    urls.iter().map(|url| FeedSource::new(url)).collect()
}

/// The feeds shipped with the application.
pub fn default_catalog() -> FeedCatalog {
    let mut mainstream = BTreeMap::new();
    mainstream.insert(
        "all".to_string(),
        sources(&[
            // National
            "https://www.npr.org/rss/rss.php?id=1001",
            "https://rss.cnn.com/rss/edition.rss",
            "https://feeds.foxnews.com/foxnews/latest",
            "https://www.reutersagency.com/feed/?best-topics=world&post_type=best",
            // International
            "https://www.aljazeera.com/xml/rss/all.xml",
            "https://feeds.bbci.co.uk/news/rss.xml",
            // Tech
            "https://www.theverge.com/rss/index.xml",
            "https://feeds.arstechnica.com/arstechnica/index",
            // Health
            "https://www.cdc.gov/rss/rss.aspx",
            // Business
            "https://www.marketwatch.com/rss/topstories",
            // Sports
            "https://www.espn.com/espn/rss/news",
            // Travel
            "https://www.travelpulse.com/rss/2.xml",
            // Local
            "https://news.yahoo.com/rss/",
        ]),
    );
    mainstream.insert(
        "politics".to_string(),
        sources(&[
            "https://rss.nytimes.com/services/xml/rss/nyt/Politics.xml",
            "https://www.politico.com/rss/congress.xml",
            "https://feeds.foxnews.com/foxnews/politics",
        ]),
    );
    mainstream.insert(
        "world".to_string(),
        sources(&[
            "https://feeds.bbci.co.uk/news/world/rss.xml",
            "https://www.aljazeera.com/xml/rss/all.xml",
        ]),
    );
    mainstream.insert(
        "tech".to_string(),
        sources(&[
            "https://www.theverge.com/rss/index.xml",
            "https://www.engadget.com/rss.xml",
        ]),
    );
    mainstream.insert(
        "health".to_string(),
        sources(&[
            "https://www.cdc.gov/rss/rss.aspx",
            "https://medicalxpress.com/rss-feed/",
        ]),
    );
    mainstream.insert(
        "business".to_string(),
        sources(&[
            "https://www.marketwatch.com/rss/topstories",
            "https://www.investing.com/rss/news.rss",
        ]),
    );
    mainstream.insert(
        "sports".to_string(),
        sources(&["https://www.espn.com/espn/rss/news"]),
    );
    mainstream.insert(
        "travel".to_string(),
        sources(&["https://www.travelpulse.com/rss/2.xml"]),
    );
    mainstream.insert("local".to_string(), sources(&["https://news.yahoo.com/rss/"]));

    FeedCatalog {
        mainstream,
        factcheck: vec![
            FeedSource::named("Snopes", "https://www.snopes.com/feed/"),
            FeedSource::named("PolitiFact", "https://www.politifact.com/rss/all/"),
            FeedSource::named("FactCheck.org", "https://www.factcheck.org/feed/"),
            FeedSource::named("Full Fact", "https://fullfact.org/feed/"),
        ],
    }
}
