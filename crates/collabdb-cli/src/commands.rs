//! Command handlers for the CLI.

use anyhow::Context;
use collabdb_core::{AppConfig, Article};
use collabdb_feeds::FeedCollector;
use collabdb_store::{Store, StoreConfig};

pub(crate) fn run_classify(
    title: String,
    description: Option<String>,
    source: String,
) -> anyhow::Result<()> {
    let article = Article {
        title,
        description,
        source,
        source_url: String::new(),
        image_url: None,
    };

    match collabdb_core::classify(&article) {
        Some(collab) => println!("{}", serde_json::to_string_pretty(&collab)?),
        None => println!("not a collaboration"),
    }
    Ok(())
}

/// One-off scan into a throwaway store. Nothing outlives the process.
///
/// # Errors
///
/// Returns an error if the feeds file cannot be loaded or the HTTP client
/// cannot be built. Per-feed failures are logged and skipped.
pub(crate) async fn run_scan(config: &AppConfig, limit: usize) -> anyhow::Result<()> {
    let feeds = collabdb_core::load_feeds(&config.feeds_path)?;
    let collector = FeedCollector::from_app_config(config, feeds.feeds)
        .context("failed to build feed client")?;
    let store = Store::new(StoreConfig::from_app_config(config));

    let articles = collector.collect_articles().await;
    let report = store.ingest_articles(&articles).await;
    tracing::info!(
        articles = report.articles,
        detected = report.detected,
        accepted = report.accepted,
        "scan complete"
    );

    let records = store.latest_collabs(limit).await;
    println!("{}", serde_json::to_string_pretty(&records)?);
    println!(
        "{} articles, {} detected, {} unique collaborations",
        report.articles, report.detected, report.accepted
    );
    Ok(())
}

pub(crate) fn run_feeds(config: &AppConfig) -> anyhow::Result<()> {
    let feeds = collabdb_core::load_feeds(&config.feeds_path)?;
    for feed in &feeds.feeds {
        println!("{:<16} {}", feed.name, feed.url);
    }
    Ok(())
}

pub(crate) fn run_brands() {
    for brand in collabdb_core::BRANDS {
        println!("{brand}");
    }
}
