use super::*;

#[test]
fn no_command_is_none() {
    let cli = Cli::try_parse_from(["collabdb-cli"]).expect("expected valid cli args");
    assert!(cli.command.is_none());
}

#[test]
fn parses_classify_with_description() {
    let cli = Cli::try_parse_from([
        "collabdb-cli",
        "classify",
        "--title",
        "Sacai x Nike LDWaffle",
        "--description",
        "limited edition",
    ])
    .expect("expected valid cli args");

    assert!(matches!(
        cli.command,
        Some(Commands::Classify {
            ref title,
            description: Some(ref d),
            ref source,
        }) if title == "Sacai x Nike LDWaffle" && d == "limited edition" && source == "cli"
    ));
}

#[test]
fn classify_requires_title() {
    assert!(Cli::try_parse_from(["collabdb-cli", "classify"]).is_err());
}

#[test]
fn scan_limit_defaults_to_twenty() {
    let cli = Cli::try_parse_from(["collabdb-cli", "scan"]).expect("expected valid cli args");
    assert!(matches!(cli.command, Some(Commands::Scan { limit: 20 })));
}

#[test]
fn scan_accepts_limit() {
    let cli = Cli::try_parse_from(["collabdb-cli", "scan", "--limit", "5"])
        .expect("expected valid cli args");
    assert!(matches!(cli.command, Some(Commands::Scan { limit: 5 })));
}

#[test]
fn scan_rejects_non_numeric_limit() {
    assert!(Cli::try_parse_from(["collabdb-cli", "scan", "--limit", "many"]).is_err());
}

#[test]
fn parses_listing_commands() {
    let feeds = Cli::try_parse_from(["collabdb-cli", "feeds"]).expect("expected valid cli args");
    assert!(matches!(feeds.command, Some(Commands::Feeds)));

    let brands = Cli::try_parse_from(["collabdb-cli", "brands"]).expect("expected valid cli args");
    assert!(matches!(brands.command, Some(Commands::Brands)));
}

#[test]
fn unknown_command_is_rejected() {
    assert!(Cli::try_parse_from(["collabdb-cli", "migrate"]).is_err());
}

fn scan_config(user_agent: &str) -> collabdb_core::AppConfig {
    collabdb_core::AppConfig {
        env: collabdb_core::Environment::Test,
        bind_addr: "127.0.0.1:0".parse().expect("valid socket addr"),
        log_level: "info".to_string(),
        feeds_path: std::path::PathBuf::from(concat!(
            env!("CARGO_MANIFEST_DIR"),
            "/../../config/feeds.yaml"
        )),
        collab_cap: 500,
        trending_cap: 100,
        price_history_cap: 100,
        release_cap: 500,
        scan_schedule: "0 */5 * * * *".to_string(),
        startup_scan_delay_secs: 0,
        feed_request_timeout_secs: 1,
        feed_user_agent: user_agent.to_string(),
        feed_max_items: 15,
        feed_max_retries: 0,
        feed_retry_backoff_base_secs: 0,
    }
}

#[tokio::test]
async fn scan_reports_client_build_failure_with_context() {
    let err = commands::run_scan(&scan_config("collabdb\nbroken"), 5)
        .await
        .expect_err("invalid user agent must fail");
    assert_eq!(err.to_string(), "failed to build feed client");
    assert!(err.chain().count() > 1, "underlying reqwest error should be kept");
}

#[tokio::test]
async fn scan_fails_when_feeds_file_is_missing() {
    let mut config = scan_config("collabdb-test");
    config.feeds_path = std::path::PathBuf::from("/nonexistent/feeds.yaml");
    assert!(commands::run_scan(&config, 5).await.is_err());
}
