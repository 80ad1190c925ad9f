//! HTTP client for RSS feeds.

use std::time::Duration;

use collabdb_core::{Article, FeedSource};
use reqwest::Client;

use crate::error::FeedError;
use crate::parse::parse_rss_items;
use crate::rate_limit::retry_with_backoff;

const CONNECT_TIMEOUT_SECS: u64 = 10;

/// Fetches RSS documents and parses them into [`Article`]s.
///
/// Transient errors (network failures, 429, 5xx) are retried with
/// exponential backoff up to `max_retries` additional attempts.
#[derive(Debug, Clone)]
pub struct FeedClient {
    client: Client,
    max_retries: u32,
    backoff_base_secs: u64,
}

impl FeedClient {
    /// Creates a `FeedClient` with a request timeout, `User-Agent` and retry policy.
    ///
    /// # Errors
    ///
    /// Returns [`FeedError::Http`] if the underlying `reqwest::Client`
    /// cannot be constructed.
    pub fn new(
        timeout_secs: u64,
        user_agent: &str,
        max_retries: u32,
        backoff_base_secs: u64,
    ) -> Result<Self, FeedError> {
        let client = Client::builder()
            .timeout(Duration::from_secs(timeout_secs))
            .connect_timeout(Duration::from_secs(CONNECT_TIMEOUT_SECS))
            .user_agent(user_agent)
            .build()?;
        Ok(Self {
            client,
            max_retries,
            backoff_base_secs,
        })
    }

    /// Fetches the raw body of `url`, retrying transient failures.
    ///
    /// # Errors
    ///
    /// - [`FeedError::RateLimited`] for HTTP 429 after all retries.
    /// - [`FeedError::UnexpectedStatus`] for any other non-2xx status (5xx retried).
    /// - [`FeedError::Http`] for network or TLS failures after all retries.
    pub async fn fetch_body(&self, url: &str) -> Result<String, FeedError> {
        retry_with_backoff(self.max_retries, self.backoff_base_secs, || async move {
            let response = self
                .client
                .get(url)
                .header(
                    reqwest::header::ACCEPT,
                    "application/rss+xml,application/xml;q=0.9,text/xml;q=0.8,*/*;q=0.5",
                )
                .send()
                .await?;
            let status = response.status();

            if status == reqwest::StatusCode::TOO_MANY_REQUESTS {
                return Err(FeedError::RateLimited {
                    url: url.to_owned(),
                });
            }
            if !status.is_success() {
                return Err(FeedError::UnexpectedStatus {
                    status: status.as_u16(),
                    url: url.to_owned(),
                });
            }

            Ok(response.text().await?)
        })
        .await
    }

    /// Fetches one feed and returns at most `max_items` articles from it.
    ///
    /// # Errors
    ///
    /// Any error from [`FeedClient::fetch_body`], or [`FeedError::Xml`] when
    /// the body is not well-formed XML (not retried).
    pub async fn fetch_feed(
        &self,
        source: &FeedSource,
        max_items: usize,
    ) -> Result<Vec<Article>, FeedError> {
        let body = self.fetch_body(&source.url).await?;
        let articles = parse_rss_items(&body, &source.name, max_items)?;
        tracing::debug!(
            source = %source.name,
            count = articles.len(),
            "feeds: parsed feed"
        );
        Ok(articles)
    }
}
