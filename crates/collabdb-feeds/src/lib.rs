//! RSS ingestion for collabdb: fetch configured feeds, parse items into
//! [`Article`]s, and drop cross-source duplicates.

pub mod client;
pub mod collect;
pub mod error;
pub mod parse;
pub(crate) mod rate_limit;

use collabdb_core::Article;
use futures::future::BoxFuture;

pub use client::FeedClient;
pub use collect::{dedup_by_title, FeedCollector, TITLE_DEDUP_PREFIX};
pub use error::FeedError;
pub use parse::{parse_rss_items, strip_html};

/// Anything that can hand the scanner a batch of articles.
///
/// Implementations swallow their own failures: a source that cannot be
/// reached yields an empty batch rather than an error.
pub trait ArticleSource: Send + Sync {
    fn fetch_articles(&self) -> BoxFuture<'_, Vec<Article>>;
}
