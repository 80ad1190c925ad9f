//! Background scan scheduling.
//!
//! Registers the recurring scan job on a [`JobScheduler`] and fires one
//! delayed scan shortly after startup.

use std::sync::Arc;
use std::time::Duration;

use tokio::task::JoinHandle;
use tokio_cron_scheduler::{Job, JobScheduler, JobSchedulerError};

use crate::scan::{ScanOutcome, Scanner};

/// Handle to the running scan schedule. Call [`ScanScheduler::shutdown`]
/// before exit.
pub struct ScanScheduler {
    scheduler: JobScheduler,
    startup_scan: Option<JoinHandle<()>>,
}

impl ScanScheduler {
    /// Builds and starts the scheduler.
    ///
    /// `schedule` is a six-field cron expression (seconds first). The startup
    /// scan runs once after `startup_delay`.
    ///
    /// # Errors
    ///
    /// Returns [`JobSchedulerError`] if the scheduler cannot be initialised,
    /// the cron expression is rejected, or the scheduler fails to start.
    pub async fn start(
        scanner: Arc<Scanner>,
        schedule: &str,
        startup_delay: Duration,
    ) -> Result<Self, JobSchedulerError> {
        let scheduler = JobScheduler::new().await?;

        let cron_scanner = Arc::clone(&scanner);
        let job = Job::new_async(schedule, move |_uuid, _lock| {
            let scanner = Arc::clone(&cron_scanner);
            Box::pin(async move {
                run_scan(&scanner, "cron").await;
            })
        })?;
        scheduler.add(job).await?;
        scheduler.start().await?;
        tracing::info!(schedule, "scheduler: recurring scan registered");

        let startup_scan = tokio::spawn(async move {
            tokio::time::sleep(startup_delay).await;
            run_scan(&scanner, "startup").await;
        });

        Ok(Self {
            scheduler,
            startup_scan: Some(startup_scan),
        })
    }

    /// Stops the recurring job and cancels the startup scan if it has not run.
    ///
    /// # Errors
    ///
    /// Returns [`JobSchedulerError`] if the scheduler fails to shut down.
    pub async fn shutdown(mut self) -> Result<(), JobSchedulerError> {
        if let Some(handle) = self.startup_scan.take() {
            handle.abort();
        }
        self.scheduler.shutdown().await?;
        tracing::info!("scheduler: stopped");
        Ok(())
    }
}

async fn run_scan(scanner: &Scanner, trigger: &'static str) {
    match scanner.trigger().await {
        ScanOutcome::Completed(report) => tracing::info!(
            trigger,
            accepted = report.accepted,
            "scheduler: scan finished"
        ),
        ScanOutcome::Queued => {
            tracing::info!(trigger, "scheduler: scan already running, re-run queued");
        }
    }
}
