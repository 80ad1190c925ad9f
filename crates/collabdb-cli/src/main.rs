mod commands;

use clap::{Parser, Subcommand};
use tracing_subscriber::EnvFilter;

#[derive(Debug, Parser)]
#[command(name = "collabdb-cli")]
#[command(about = "Detect sneaker and streetwear collaborations from the command line")]
struct Cli {
    #[command(subcommand)]
    command: Option<Commands>,
}

#[derive(Debug, Subcommand)]
enum Commands {
    /// Run the classifier over a single headline
    Classify {
        #[arg(long)]
        title: String,
        #[arg(long)]
        description: Option<String>,
        #[arg(long, default_value = "cli")]
        source: String,
    },
    /// Fetch the configured feeds once and print the collaborations found
    Scan {
        /// Maximum number of records to print, newest first
        #[arg(long, default_value_t = 20)]
        limit: usize,
    },
    /// List the configured feeds
    Feeds,
    /// List the brands the classifier recognizes
    Brands,
}

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    dotenvy::dotenv().ok();
    let cli = Cli::parse();
    let config = collabdb_core::load_app_config()?;
    let env_filter = EnvFilter::try_from_default_env()
        .or_else(|_| EnvFilter::try_new(config.log_level.clone()))?;
    tracing_subscriber::fmt()
        .with_env_filter(env_filter)
        .with_writer(std::io::stderr)
        .init();

    match cli.command {
        Some(Commands::Classify {
            title,
            description,
            source,
        }) => commands::run_classify(title, description, source)?,
        Some(Commands::Scan { limit }) => commands::run_scan(&config, limit).await?,
        Some(Commands::Feeds) => commands::run_feeds(&config)?,
        Some(Commands::Brands) => commands::run_brands(),
        None => println!("collabdb-cli ready; run with --help to list commands"),
    }

    Ok(())
}

#[cfg(test)]
mod tests;
