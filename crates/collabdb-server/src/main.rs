mod api;
mod middleware;
mod scan;
mod scheduler;

use std::sync::Arc;
use std::time::Duration;

use collabdb_feeds::FeedCollector;
use collabdb_store::{Store, StoreConfig};
use tracing_subscriber::EnvFilter;

use crate::{
    api::{build_app, default_rate_limit_state, AppState},
    scan::Scanner,
    scheduler::ScanScheduler,
};

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    dotenvy::dotenv().ok();
    let config = collabdb_core::load_app_config()?;
    let env_filter = EnvFilter::try_from_default_env()
        .or_else(|_| EnvFilter::try_new(config.log_level.clone()))?;
    tracing_subscriber::fmt().with_env_filter(env_filter).init();

    let feeds = collabdb_core::load_feeds(&config.feeds_path)?;
    tracing::info!(
        env = %config.env,
        feeds = feeds.feeds.len(),
        "collabdb-server starting"
    );

    let store = Store::new(StoreConfig::from_app_config(&config));
    let collector = FeedCollector::from_app_config(&config, feeds.feeds)?;
    let scanner = Arc::new(Scanner::new(Arc::new(collector), store.clone()));

    let scheduler = ScanScheduler::start(
        Arc::clone(&scanner),
        &config.scan_schedule,
        Duration::from_secs(config.startup_scan_delay_secs),
    )
    .await?;

    let app = build_app(AppState { store, scanner }, default_rate_limit_state());

    let listener = tokio::net::TcpListener::bind(config.bind_addr).await?;
    tracing::info!(addr = %config.bind_addr, "listening");
    axum::serve(listener, app)
        .with_graceful_shutdown(shutdown_signal())
        .await?;

    scheduler.shutdown().await?;
    Ok(())
}

async fn shutdown_signal() {
    let ctrl_c = async {
        if let Err(e) = tokio::signal::ctrl_c().await {
            tracing::error!(error = %e, "failed to listen for ctrl-c");
            std::future::pending::<()>().await;
        }
    };

    #[cfg(unix)]
    let terminate = async {
        match tokio::signal::unix::signal(tokio::signal::unix::SignalKind::terminate()) {
            Ok(mut signal) => {
                signal.recv().await;
            }
            Err(e) => {
                tracing::error!(error = %e, "failed to install SIGTERM handler");
                std::future::pending::<()>().await;
            }
        }
    };

    #[cfg(not(unix))]
    let terminate = std::future::pending::<()>();

    tokio::select! {
        () = ctrl_c => {},
        () = terminate => {},
    }

    tracing::info!("received shutdown signal, starting graceful shutdown");
}
