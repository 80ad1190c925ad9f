//! Multi-source article collection.

use std::collections::HashSet;

use collabdb_core::{AppConfig, Article, FeedSource};
use futures::future::BoxFuture;

use crate::client::FeedClient;
use crate::error::FeedError;
use crate::ArticleSource;

/// Number of leading characters of the lowercased title used as the
/// cross-source duplicate key.
pub const TITLE_DEDUP_PREFIX: usize = 50;

/// Pulls articles from a fixed list of RSS feeds.
#[derive(Debug, Clone)]
pub struct FeedCollector {
    client: FeedClient,
    sources: Vec<FeedSource>,
    max_items: usize,
}

impl FeedCollector {
    #[must_use]
    pub fn new(client: FeedClient, sources: Vec<FeedSource>, max_items: usize) -> Self {
        Self {
            client,
            sources,
            max_items,
        }
    }

    /// Builds a collector from runtime configuration.
    ///
    /// # Errors
    ///
    /// Returns [`FeedError::Http`] if the HTTP client cannot be constructed.
    pub fn from_app_config(config: &AppConfig, sources: Vec<FeedSource>) -> Result<Self, FeedError> {
        let client = FeedClient::new(
            config.feed_request_timeout_secs,
            &config.feed_user_agent,
            config.feed_max_retries,
            config.feed_retry_backoff_base_secs,
        )?;
        Ok(Self::new(client, sources, config.feed_max_items))
    }

    #[must_use]
    pub fn sources(&self) -> &[FeedSource] {
        &self.sources
    }

    /// Fetches every source in order and drops cross-source duplicates.
    ///
    /// A source that fails after retries is logged and contributes nothing.
    pub async fn collect_articles(&self) -> Vec<Article> {
        let mut all = Vec::new();
        for source in &self.sources {
            match self.client.fetch_feed(source, self.max_items).await {
                Ok(articles) => {
                    tracing::info!(
                        source = %source.name,
                        count = articles.len(),
                        "feeds: fetched"
                    );
                    all.extend(articles);
                }
                Err(e) => {
                    tracing::warn!(
                        source = %source.name,
                        url = %source.url,
                        error = %e,
                        "feeds: source failed, skipping"
                    );
                }
            }
        }
        dedup_by_title(all)
    }
}

impl ArticleSource for FeedCollector {
    fn fetch_articles(&self) -> BoxFuture<'_, Vec<Article>> {
        Box::pin(self.collect_articles())
    }
}

/// Keeps the first article for each title key (the first
/// [`TITLE_DEDUP_PREFIX`] characters of the lowercased title).
#[must_use]
pub fn dedup_by_title(articles: Vec<Article>) -> Vec<Article> {
    let mut seen = HashSet::new();
    articles
        .into_iter()
        .filter(|article| seen.insert(title_key(&article.title)))
        .collect()
}

fn title_key(title: &str) -> String {
    title.to_lowercase().chars().take(TITLE_DEDUP_PREFIX).collect()
}

#[cfg(test)]
mod tests {
    use super::*;

    fn article(title: &str, source: &str) -> Article {
        Article {
            title: title.to_string(),
            description: None,
            source: source.to_string(),
            source_url: format!("https://example.com/{}", title.len()),
            image_url: None,
        }
    }

    #[test]
    fn dedup_keeps_first_occurrence_case_insensitively() {
        let articles = vec![
            article("Supreme x Nike Air Force 1", "Hypebeast"),
            article("SUPREME X NIKE AIR FORCE 1", "Sneaker News"),
            article("Kith x Asics Gel-Lyte III", "Nice Kicks"),
        ];
        let kept = dedup_by_title(articles);
        assert_eq!(kept.len(), 2);
        assert_eq!(kept[0].source, "Hypebeast");
        assert_eq!(kept[1].title, "Kith x Asics Gel-Lyte III");
    }

    #[test]
    fn dedup_compares_only_the_title_prefix() {
        let prefix = "a".repeat(TITLE_DEDUP_PREFIX);
        let articles = vec![
            article(&format!("{prefix} first ending"), "Hypebeast"),
            article(&format!("{prefix} second ending"), "Highsnobiety"),
            article(&"a".repeat(TITLE_DEDUP_PREFIX - 1), "Nice Kicks"),
        ];
        let kept = dedup_by_title(articles);
        assert_eq!(kept.len(), 2);
        assert_eq!(kept[0].source, "Hypebeast");
        assert_eq!(kept[1].source, "Nice Kicks");
    }

    #[test]
    fn title_key_counts_characters_not_bytes() {
        let title = "é".repeat(60);
        assert_eq!(title_key(&title).chars().count(), TITLE_DEDUP_PREFIX);
    }
}
