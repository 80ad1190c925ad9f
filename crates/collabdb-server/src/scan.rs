//! Single-flight scan pipeline: fetch → classify → submit → record.

use std::sync::atomic::{AtomicBool, Ordering};
use std::sync::Arc;

use collabdb_feeds::ArticleSource;
use collabdb_store::{ScanReport, Store};
use tokio::sync::Mutex;

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ScanOutcome {
    /// This trigger ran the pipeline (plus any re-runs queued meanwhile).
    Completed(ScanReport),
    /// Another scan was in flight; it will run once more on this trigger's behalf.
    Queued,
}

/// Runs scans so that at most one is in flight at a time.
///
/// Triggers that arrive while a scan is running set a re-run flag and return
/// immediately. However many arrive, the running scan performs exactly one
/// additional pass after its current one.
pub struct Scanner {
    source: Arc<dyn ArticleSource>,
    store: Store,
    running: Mutex<()>,
    rerun_requested: AtomicBool,
}

impl Scanner {
    #[must_use]
    pub fn new(source: Arc<dyn ArticleSource>, store: Store) -> Self {
        Self {
            source,
            store,
            running: Mutex::new(()),
            rerun_requested: AtomicBool::new(false),
        }
    }

    pub async fn trigger(&self) -> ScanOutcome {
        // Request first, then compete for the lock, so a request raised just
        // before the holder releases is never lost.
        self.rerun_requested.store(true, Ordering::SeqCst);
        let mut report: Option<ScanReport> = None;

        loop {
            let Ok(guard) = self.running.try_lock() else {
                tracing::info!("scan: already in flight, re-run queued");
                break;
            };
            while self.rerun_requested.swap(false, Ordering::SeqCst) {
                let pass = self.run_once().await;
                report = Some(report.map_or(pass, |r| r.merge(pass)));
            }
            drop(guard);

            if !self.rerun_requested.load(Ordering::SeqCst) {
                break;
            }
        }

        report.map_or(ScanOutcome::Queued, ScanOutcome::Completed)
    }

    async fn run_once(&self) -> ScanReport {
        tracing::info!("scan: starting");
        let articles = self.source.fetch_articles().await;
        let report = self.store.ingest_articles(&articles).await;
        tracing::info!(
            articles = report.articles,
            detected = report.detected,
            accepted = report.accepted,
            "scan: complete"
        );
        report
    }
}
