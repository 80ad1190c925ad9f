//! In-memory state for collabdb: the collaboration dedup store, trending
//! searches, price history, the release calendar, and scan counters.
//!
//! Each collection lives behind its own lock inside [`Store`], so every
//! public operation is atomic with respect to concurrent callers.
//! Nothing survives a restart.

pub mod collabs;
pub mod prices;
pub mod releases;
pub mod scan_stats;
pub mod trending;

use std::sync::Arc;

use chrono::Utc;
use collabdb_core::{
    AppConfig, Article, CollaborationRecord, NewCollaboration, NewPricePoint, NewRelease,
    PricePoint, PriceStats, Release, ScanStatsSnapshot, TrendingEntry,
};
use tokio::sync::Mutex;

pub use collabs::{CollabStore, HOT_DISPLAY_LIMIT, SEARCH_RESULT_LIMIT};
pub use prices::PriceHistory;
pub use releases::{ReleaseCalendar, DEFAULT_UPCOMING_DAYS, MAX_UPCOMING_DAYS};
pub use scan_stats::{ScanReport, ScanStats};
pub use trending::TrendingTable;

const DEFAULT_COLLAB_CAP: usize = 500;
const DEFAULT_TRENDING_CAP: usize = 100;
const DEFAULT_PRICE_HISTORY_CAP: usize = 100;
const DEFAULT_RELEASE_CAP: usize = 500;

/// Retention caps for the bounded collections.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct StoreConfig {
    pub collab_cap: usize,
    pub trending_cap: usize,
    pub price_history_cap: usize,
    pub release_cap: usize,
}

impl Default for StoreConfig {
    fn default() -> Self {
        Self {
            collab_cap: DEFAULT_COLLAB_CAP,
            trending_cap: DEFAULT_TRENDING_CAP,
            price_history_cap: DEFAULT_PRICE_HISTORY_CAP,
            release_cap: DEFAULT_RELEASE_CAP,
        }
    }
}

impl StoreConfig {
    #[must_use]
    pub fn from_app_config(config: &AppConfig) -> Self {
        Self {
            collab_cap: config.collab_cap,
            trending_cap: config.trending_cap,
            price_history_cap: config.price_history_cap,
            release_cap: config.release_cap,
        }
    }
}

#[derive(Debug)]
struct Inner {
    collabs: Mutex<CollabStore>,
    trending: Mutex<TrendingTable>,
    prices: Mutex<PriceHistory>,
    releases: Mutex<ReleaseCalendar>,
    scans: Mutex<ScanStats>,
}

/// Shared handle to the process's in-memory state. Cheap to clone.
#[derive(Debug, Clone)]
pub struct Store {
    inner: Arc<Inner>,
}

impl Default for Store {
    fn default() -> Self {
        Self::new(StoreConfig::default())
    }
}

impl Store {
    #[must_use]
    pub fn new(config: StoreConfig) -> Self {
        Self {
            inner: Arc::new(Inner {
                collabs: Mutex::new(CollabStore::new(config.collab_cap)),
                trending: Mutex::new(TrendingTable::new(config.trending_cap)),
                prices: Mutex::new(PriceHistory::new(config.price_history_cap)),
                releases: Mutex::new(ReleaseCalendar::new(config.release_cap)),
                scans: Mutex::new(ScanStats::default()),
            }),
        }
    }

    /// Offer a collaboration; returns `false` if its fingerprint is already retained.
    pub async fn submit_collab(&self, collab: NewCollaboration) -> bool {
        let title = collab.title.clone();
        let accepted = self.inner.collabs.lock().await.submit(collab, Utc::now());
        if accepted {
            tracing::debug!(title = %title, "store: collaboration accepted");
        } else {
            tracing::debug!(title = %title, "store: duplicate collaboration ignored");
        }
        accepted
    }

    pub async fn all_collabs(&self) -> Vec<CollaborationRecord> {
        self.inner.collabs.lock().await.all()
    }

    pub async fn latest_collabs(&self, n: usize) -> Vec<CollaborationRecord> {
        self.inner.collabs.lock().await.latest(n)
    }

    pub async fn hot_collabs(&self) -> Vec<CollaborationRecord> {
        self.inner.collabs.lock().await.hot()
    }

    /// Search retained collaborations and count the query as a trending search.
    pub async fn search_collabs(&self, query: &str) -> Vec<CollaborationRecord> {
        let results = self.inner.collabs.lock().await.search(query);
        self.inner.trending.lock().await.record(query, Utc::now());
        results
    }

    pub async fn trending(&self, limit: usize) -> Vec<TrendingEntry> {
        self.inner.trending.lock().await.top(limit)
    }

    pub async fn add_price_point(&self, point: NewPricePoint) -> PricePoint {
        self.inner.prices.lock().await.add(point, Utc::now())
    }

    pub async fn price_history(&self, product_id: &str) -> Vec<PricePoint> {
        self.inner.prices.lock().await.history(product_id)
    }

    pub async fn price_stats(&self, product_id: &str) -> Option<PriceStats> {
        self.inner.prices.lock().await.stats(product_id)
    }

    pub async fn lowest_price(&self, product_id: &str) -> Option<PricePoint> {
        self.inner.prices.lock().await.lowest(product_id)
    }

    pub async fn highest_price(&self, product_id: &str) -> Option<PricePoint> {
        self.inner.prices.lock().await.highest(product_id)
    }

    pub async fn add_release(&self, release: NewRelease) -> Release {
        self.inner.releases.lock().await.add(release, Utc::now())
    }

    /// Releases dated today (UTC) or later, soonest first.
    pub async fn all_releases(&self) -> Vec<Release> {
        let today = Utc::now().date_naive();
        self.inner.releases.lock().await.all_upcoming(today)
    }

    /// Releases from today (UTC) through the next `days` days.
    pub async fn upcoming_releases(&self, days: u32) -> Vec<Release> {
        let today = Utc::now().date_naive();
        self.inner.releases.lock().await.upcoming(today, days)
    }

    pub async fn todays_releases(&self) -> Vec<Release> {
        let today = Utc::now().date_naive();
        self.inner.releases.lock().await.on_day(today)
    }

    pub async fn delete_release(&self, id: u64) -> bool {
        self.inner.releases.lock().await.remove(id)
    }

    /// One scan pass over already-fetched articles: classify them, offer every
    /// detected collaboration, and count the pass as a completed scan.
    pub async fn ingest_articles(&self, articles: &[Article]) -> ScanReport {
        let detected = collabdb_core::detect_collabs(articles);
        let detected_count = detected.len();

        let mut accepted = 0;
        for collab in detected {
            if self.submit_collab(collab).await {
                accepted += 1;
            }
        }
        self.record_scan_completion().await;

        ScanReport {
            articles: articles.len(),
            detected: detected_count,
            accepted,
        }
    }

    pub async fn record_scan_completion(&self) {
        self.inner.scans.lock().await.record_completion(Utc::now());
    }

    pub async fn scan_stats(&self) -> ScanStatsSnapshot {
        let (total_collabs, hot_collabs) = {
            let collabs = self.inner.collabs.lock().await;
            (collabs.len(), collabs.hot_count())
        };
        let scans = self.inner.scans.lock().await.clone();
        ScanStatsSnapshot {
            total_scans: scans.total_scans,
            total_collabs,
            hot_collabs,
            last_scan: scans.last_scan,
        }
    }
}

#[cfg(test)]
mod tests {
    use rust_decimal::Decimal;

    use super::*;

    fn collab(title: &str, brands: &[&str], hot: bool) -> NewCollaboration {
        NewCollaboration {
            title: title.to_string(),
            brands: brands.iter().map(ToString::to_string).collect(),
            source: "Nice Kicks".to_string(),
            source_url: "https://www.nicekicks.com/example/".to_string(),
            image_url: None,
            category: "Sneakers".to_string(),
            hot,
        }
    }

    #[test]
    fn store_config_defaults() {
        let config = StoreConfig::default();
        assert_eq!(config.collab_cap, 500);
        assert_eq!(config.trending_cap, 100);
        assert_eq!(config.price_history_cap, 100);
        assert_eq!(config.release_cap, 500);
    }

    #[tokio::test]
    async fn search_updates_trending() {
        let store = Store::default();
        store
            .submit_collab(collab("Nike x Jordan surprise collab", &["Nike", "Jordan"], false))
            .await;

        for _ in 0..3 {
            assert_eq!(store.search_collabs("jordan").await.len(), 1);
        }
        store.search_collabs("nike").await;

        let top = store.trending(2).await;
        assert_eq!(top.len(), 2);
        assert_eq!((top[0].query.as_str(), top[0].count), ("jordan", 3));
        assert_eq!((top[1].query.as_str(), top[1].count), ("nike", 1));
    }

    #[tokio::test]
    async fn scan_stats_snapshot_counts_collabs_and_scans() {
        let store = Store::default();
        let empty = store.scan_stats().await;
        assert_eq!(empty.total_scans, 0);
        assert!(empty.last_scan.is_none());

        assert!(store.submit_collab(collab("a", &["Nike", "Dior"], true)).await);
        assert!(store.submit_collab(collab("b", &["Kith", "Asics"], false)).await);
        assert!(!store.submit_collab(collab("a", &["Dior", "Nike"], true)).await);
        store.record_scan_completion().await;

        let stats = store.scan_stats().await;
        assert_eq!(stats.total_scans, 1);
        assert_eq!(stats.total_collabs, 2);
        assert_eq!(stats.hot_collabs, 1);
        assert!(stats.last_scan.is_some());
    }

    #[tokio::test]
    async fn concurrent_duplicate_submissions_accept_exactly_one() {
        let store = Store::default();
        let mut handles = Vec::new();
        for _ in 0..16 {
            let store = store.clone();
            handles.push(tokio::spawn(async move {
                store
                    .submit_collab(collab("Palace x Gucci Collection", &["Palace", "Gucci"], true))
                    .await
            }));
        }

        let mut accepted = 0;
        for handle in handles {
            if handle.await.expect("task panicked") {
                accepted += 1;
            }
        }
        assert_eq!(accepted, 1);
        assert_eq!(store.all_collabs().await.len(), 1);
    }

    #[tokio::test]
    async fn price_queries_go_through_handle() {
        let store = Store::default();
        for price in [100, 90, 120] {
            let point = NewPricePoint::new("aj1", Decimal::from(price), None).expect("valid");
            store.add_price_point(point).await;
        }

        assert_eq!(store.price_history("aj1").await.len(), 3);
        assert_eq!(
            store.lowest_price("aj1").await.map(|p| p.price),
            Some(Decimal::from(90))
        );
        assert_eq!(
            store.highest_price("aj1").await.map(|p| p.price),
            Some(Decimal::from(120))
        );
        let stats = store.price_stats("aj1").await.expect("stats");
        assert_eq!(stats.average, Decimal::from(103));
        assert!(store.price_stats("unknown").await.is_none());
    }

    #[tokio::test]
    async fn caps_come_from_config() {
        let store = Store::new(StoreConfig {
            collab_cap: 2,
            trending_cap: 1,
            price_history_cap: 1,
            release_cap: 1,
        });
        for i in 0..3 {
            store
                .submit_collab(collab(&format!("drop {i}"), &["Nike", "Sacai"], false))
                .await;
        }
        assert_eq!(store.all_collabs().await.len(), 2);
        assert_eq!(store.latest_collabs(1).await[0].title, "drop 2");

        store.search_collabs("one").await;
        store.search_collabs("two").await;
        assert_eq!(store.trending(10).await.len(), 1);

        for price in [1, 2] {
            let point = NewPricePoint::new("x", Decimal::from(price), None).expect("valid");
            store.add_price_point(point).await;
        }
        assert_eq!(store.price_history("x").await.len(), 1);
        assert!(store.hot_collabs().await.is_empty());
    }

    fn article(title: &str) -> Article {
        Article {
            title: title.to_string(),
            description: None,
            source: "Hypebeast".to_string(),
            source_url: "https://hypebeast.com/example".to_string(),
            image_url: None,
        }
    }

    #[tokio::test]
    async fn ingest_articles_submits_detected_collabs_and_counts_the_scan() {
        let store = Store::default();
        let articles = vec![
            article("Supreme x Nike SB Dunk Low"),
            article("Weekly release roundup"),
            article("Kith x Asics Gel-Lyte III limited"),
        ];

        let first = store.ingest_articles(&articles).await;
        assert_eq!(
            first,
            ScanReport {
                articles: 3,
                detected: 2,
                accepted: 2,
            }
        );

        let second = store.ingest_articles(&articles).await;
        assert_eq!(second.accepted, 0);
        assert_eq!(second.detected, 2);

        let stats = store.scan_stats().await;
        assert_eq!(stats.total_scans, 2);
        assert_eq!(stats.total_collabs, 2);
        assert_eq!(stats.hot_collabs, 1);
    }

    #[tokio::test]
    async fn empty_ingest_still_counts_as_a_scan() {
        let store = Store::default();
        assert_eq!(store.ingest_articles(&[]).await, ScanReport::default());
        assert_eq!(store.scan_stats().await.total_scans, 1);
    }

    #[tokio::test]
    async fn release_calendar_goes_through_handle() {
        let store = Store::default();
        let today = Utc::now().date_naive();
        let in_days = |n: u64| today.checked_add_days(chrono::Days::new(n)).expect("date in range");
        let yesterday = today.checked_sub_days(chrono::Days::new(1)).expect("date in range");

        for (name, date) in [
            ("next month", in_days(30)),
            ("today", today),
            ("yesterday", yesterday),
            ("in a week", in_days(7)),
        ] {
            store
                .add_release(NewRelease::new(name, date).expect("valid release"))
                .await;
        }

        let names = |releases: Vec<Release>| -> Vec<String> {
            releases.into_iter().map(|r| r.name).collect()
        };
        assert_eq!(
            names(store.all_releases().await),
            vec!["today", "in a week", "next month"]
        );
        assert_eq!(
            names(store.upcoming_releases(DEFAULT_UPCOMING_DAYS).await),
            vec!["today", "in a week"]
        );
        assert_eq!(names(store.todays_releases().await), vec!["today"]);

        assert!(store.delete_release(2).await);
        assert!(!store.delete_release(2).await);
        assert!(store.todays_releases().await.is_empty());
    }
}
