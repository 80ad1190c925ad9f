//! Shared domain types, configuration, and the pure detection functions
//! (classifier and fingerprint) used by every other collabdb crate.

pub mod app_config;
pub mod config;
pub mod detector;
pub mod fingerprint;
pub mod sources;
pub mod types;

use thiserror::Error;

pub use app_config::{AppConfig, Environment};
pub use config::{load_app_config, load_app_config_from_env};
pub use detector::{classify, detect_collabs, BRANDS, COLLAB_CATEGORY};
pub use fingerprint::fingerprint;
pub use sources::{load_feeds, FeedSource, FeedsFile};
pub use types::{
    Article, CollaborationRecord, NewCollaboration, NewPricePoint, NewRelease, PricePoint,
    PriceStats, Release, ScanStatsSnapshot, TrendingEntry, DEFAULT_RELEASE_CATEGORY,
    DEFAULT_RELEASE_TIME,
};

#[derive(Debug, Error)]
pub enum CoreError {
    #[error("collaboration title must be non-empty")]
    EmptyTitle,
    #[error("collaboration must name at least one brand")]
    NoBrands,
    #[error("product id must be non-empty")]
    EmptyProductId,
    #[error("invalid price {0}: must be greater than 0 and at most 1000000000")]
    InvalidPrice(rust_decimal::Decimal),
    #[error("release name must be non-empty")]
    EmptyReleaseName,
    #[error("invalid release time {0:?}: expected HH:MM")]
    InvalidReleaseTime(String),
}

#[derive(Debug, Error)]
pub enum ConfigError {
    #[error("invalid value for {var}: {reason}")]
    InvalidEnvVar { var: String, reason: String },

    #[error("failed to read feeds file {path}: {source}")]
    FeedsFileIo {
        path: String,
        #[source]
        source: std::io::Error,
    },

    #[error("failed to parse feeds file: {0}")]
    FeedsFileParse(#[from] serde_yaml::Error),

    #[error("feeds validation failed: {0}")]
    Validation(String),
}
