//! Feed retrieval with proxy fallback and exponential backoff.
//!
//! The engine only ever sees raw feed text. This module is the collaborator
//! that produces it.
//!
//! # Architecture
//!
//! - [`FetchText`]: core trait for "give me the body behind this URL"
//! - [`HttpFetch`]: plain `reqwest` GET
//! - [`ProxyFallback`]: tries the URL directly, then through a CORS-style
//!   proxy that takes the target as a percent-encoded suffix
//! - [`RetryFetch`]: decorator adding backoff retries to any [`FetchText`]
//! - [`gather_feeds`]: fetches many sources concurrently, keeping only the
//!   ones that succeed
//!
//! # Retry Strategy
//!
//! ```text
//! delay = min(base_delay * 2^(attempt-1), 30s) + random_jitter(0..250ms)
//! ```

use crate::config::FetchConfig;
use crate::feeds::FeedSource;
use crate::models::FeedText;
use futures::stream::{self, StreamExt};
use rand::{rng, Rng};
use reqwest::Client;
use std::error::Error;
use std::fmt;
use std::time::{Duration as StdDuration, Instant};
use tokio::time::sleep;
use tracing::{debug, error, info, instrument, warn};

/// Trait for fetching the text body behind a URL.
pub trait FetchText {
    async fn fetch(&self, url: &str) -> Result<String, Box<dyn Error>>;
}

/// Direct HTTP GET.
#[derive(Debug, Clone)]
pub struct HttpFetch {
    client: Client,
}

impl HttpFetch {
    /// Build a client with the configured timeout and user agent.
    pub fn new(config: &FetchConfig) -> Result<Self, Box<dyn Error>> {
        let client = Client::builder()
            .timeout(StdDuration::from_secs(config.timeout_secs))
            .user_agent(config.user_agent.clone())
            .build()?;
        Ok(Self { client })
    }
}

impl FetchText for HttpFetch {
    #[instrument(level = "debug", skip(self))]
    async fn fetch(&self, url: &str) -> Result<String, Box<dyn Error>> {
        let response = self.client.get(url).send().await?;
        let status = response.status();
        if !status.is_success() {
            return Err(format!("HTTP {} from {}", status.as_u16(), url).into());
        }
        Ok(response.text().await?)
    }
}

/// Fetch directly, and on failure retry once through a proxy.
#[derive(Debug, Clone)]
pub struct ProxyFallback<T> {
    inner: T,
    /// Prefix the percent-encoded target URL is appended to; `None` disables
    /// the fallback.
    proxy_url: Option<String>,
}

impl<T> ProxyFallback<T> {
    pub fn new(inner: T, proxy_url: Option<String>) -> Self {
        Self { inner, proxy_url }
    }

    /// The URL used to reach `url` through the proxy, if one is configured.
    pub fn proxied(&self, url: &str) -> Option<String> {
        self.proxy_url
            .as_ref()
            .map(|prefix| format!("{}{}", prefix, urlencoding::encode(url)))
    }
}

impl<T: FetchText> FetchText for ProxyFallback<T> {
    async fn fetch(&self, url: &str) -> Result<String, Box<dyn Error>> {
        match self.inner.fetch(url).await {
            Ok(body) => Ok(body),
            Err(direct_err) => match self.proxied(url) {
                Some(proxied) => {
                    debug!(%url, error = %direct_err, "Direct fetch failed; trying proxy");
                    self.inner.fetch(&proxied).await
                }
                None => Err(direct_err),
            },
        }
    }
}

/// Wrapper that adds exponential backoff retry logic to any [`FetchText`].
pub struct RetryFetch<T> {
    inner: T,
    max_retries: usize,
    base_delay: StdDuration,
    max_delay: StdDuration,
}

impl<T> RetryFetch<T>
where
    T: FetchText,
{
    /// Wrap `inner`, retrying up to `max_retries` times after the first attempt.
    pub fn new(inner: T, max_retries: usize, base_delay: StdDuration) -> Self {
        Self {
            inner,
            max_retries,
            base_delay,
            max_delay: StdDuration::from_secs(30),
        }
    }
}

impl<T> fmt::Debug for RetryFetch<T> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("RetryFetch")
            .field("max_retries", &self.max_retries)
            .field("base_delay", &self.base_delay)
            .field("max_delay", &self.max_delay)
            .finish()
    }
}

impl<T> FetchText for RetryFetch<T>
where
    T: FetchText,
{
    #[instrument(level = "debug", skip(self))]
    async fn fetch(&self, url: &str) -> Result<String, Box<dyn Error>> {
        let total_t0 = Instant::now();
        let mut attempt = 0usize;

        loop {
            match self.inner.fetch(url).await {
                Ok(body) => return Ok(body),
                Err(e) => {
                    attempt += 1;
                    let total_dt = total_t0.elapsed();

                    if attempt > self.max_retries {
                        warn!(
                            attempt,
                            max = self.max_retries,
                            elapsed_ms_total = total_dt.as_millis() as u64,
                            error = %e,
                            "fetch() exhausted retries"
                        );
                        return Err(e);
                    }

                    let mut delay = self.base_delay.saturating_mul(1 << (attempt - 1).min(16));
                    if delay > self.max_delay {
                        delay = self.max_delay;
                    }
                    let jitter_ms: u64 = rng().random_range(0..=250);
                    let delay = delay + StdDuration::from_millis(jitter_ms);

                    debug!(
                        attempt,
                        max = self.max_retries,
                        ?delay,
                        error = %e,
                        "fetch() attempt failed; backing off"
                    );
                    sleep(delay).await;
                }
            }
        }
    }
}

/// The fetcher stack described by `config`: retries around proxy fallback
/// around plain HTTP.
pub fn fetcher_from_config(
    config: &FetchConfig,
) -> Result<RetryFetch<ProxyFallback<HttpFetch>>, Box<dyn Error>> {
    let proxy = config.use_proxy.then(|| config.proxy_url.clone());
    Ok(RetryFetch::new(
        ProxyFallback::new(HttpFetch::new(config)?, proxy),
        config.max_retries,
        StdDuration::from_millis(config.base_delay_ms),
    ))
}

/// Fetch every source, `concurrency` at a time.
///
/// Results keep the order of `sources`. A source that cannot be fetched is
/// logged and left out; it never fails the batch.
///
/// # Arguments
///
/// * `fetcher` - Transport used for each download, usually retry plus proxy fallback
/// * `sources` - Feeds to download, labelled by outlet
/// * `concurrency` - Maximum downloads in flight; `0` is treated as `1`
///
/// # Returns
///
/// One [`FeedText`] per source that produced a body, in `sources` order.
#[instrument(level = "info", skip_all, fields(sources = sources.len()))]
pub async fn gather_feeds<F>(fetcher: &F, sources: &[FeedSource], concurrency: usize) -> Vec<FeedText>
where
    F: FetchText,
{
    let t0 = Instant::now();
    let feeds: Vec<FeedText> = stream::iter(sources)
        .map(|source| async move {
            let label = source.label();
            match fetcher.fetch(&source.url).await {
                Ok(raw_xml) => {
                    debug!(source = %label, bytes = raw_xml.len(), "Fetched feed");
                    Some(FeedText {
                        source_label: label,
                        raw_xml,
                    })
                }
                Err(e) => {
                    error!(source = %label, url = %source.url, error = %e, "Feed fetch failed; skipping source");
                    None
                }
            }
        })
        .buffered(concurrency.max(1))
        .filter_map(|feed| std::future::ready(feed))
        .collect()
        .await;

    info!(
        fetched = feeds.len(),
        failed = sources.len() - feeds.len(),
        elapsed_ms = t0.elapsed().as_millis() as u64,
        "Gathered feeds"
    );
    feeds
}
