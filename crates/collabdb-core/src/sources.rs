use std::collections::HashSet;
use std::path::Path;

use serde::{Deserialize, Serialize};

use crate::ConfigError;

/// One RSS feed polled during a scan.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct FeedSource {
    /// Display name, copied onto every article as its `source`.
    pub name: String,
    pub url: String,
}

#[derive(Debug, Deserialize)]
pub struct FeedsFile {
    pub feeds: Vec<FeedSource>,
}

/// Load and validate the feed list from a YAML file.
///
/// # Errors
///
/// Returns `ConfigError` if the file cannot be read, parsed, or fails validation.
pub fn load_feeds(path: &Path) -> Result<FeedsFile, ConfigError> {
    let content = std::fs::read_to_string(path).map_err(|e| ConfigError::FeedsFileIo {
        path: path.display().to_string(),
        source: e,
    })?;

    let feeds_file: FeedsFile =
        serde_yaml::from_str(&content).map_err(ConfigError::FeedsFileParse)?;

    validate_feeds(&feeds_file)?;

    Ok(feeds_file)
}

fn validate_feeds(feeds_file: &FeedsFile) -> Result<(), ConfigError> {
    let mut seen_names = HashSet::new();

    for feed in &feeds_file.feeds {
        if feed.name.trim().is_empty() {
            return Err(ConfigError::Validation(
                "feed name must be non-empty".to_string(),
            ));
        }

        if !(feed.url.starts_with("https://") || feed.url.starts_with("http://")) {
            return Err(ConfigError::Validation(format!(
                "feed '{}' has invalid url '{}'; must start with http:// or https://",
                feed.name, feed.url
            )));
        }

        if !seen_names.insert(feed.name.to_lowercase()) {
            return Err(ConfigError::Validation(format!(
                "duplicate feed name: '{}'",
                feed.name
            )));
        }
    }

    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;

    fn feed(name: &str, url: &str) -> FeedSource {
        FeedSource {
            name: name.to_string(),
            url: url.to_string(),
        }
    }

    #[test]
    fn validate_accepts_distinct_feeds() {
        let feeds_file = FeedsFile {
            feeds: vec![
                feed("Hypebeast", "https://hypebeast.com/feed"),
                feed("Sneaker News", "https://sneakernews.com/feed/"),
            ],
        };
        assert!(validate_feeds(&feeds_file).is_ok());
    }

    #[test]
    fn validate_rejects_empty_name() {
        let feeds_file = FeedsFile {
            feeds: vec![feed("  ", "https://hypebeast.com/feed")],
        };
        let err = validate_feeds(&feeds_file).unwrap_err();
        assert!(err.to_string().contains("non-empty"));
    }

    #[test]
    fn validate_rejects_non_http_url() {
        let feeds_file = FeedsFile {
            feeds: vec![feed("Hypebeast", "ftp://hypebeast.com/feed")],
        };
        let err = validate_feeds(&feeds_file).unwrap_err();
        assert!(err.to_string().contains("invalid url"));
    }

    #[test]
    fn validate_rejects_duplicate_name_case_insensitively() {
        let feeds_file = FeedsFile {
            feeds: vec![
                feed("Nice Kicks", "https://www.nicekicks.com/feed/"),
                feed("nice kicks", "https://nicekicks.com/feed/"),
            ],
        };
        let err = validate_feeds(&feeds_file).unwrap_err();
        assert!(err.to_string().contains("duplicate feed name"));
    }

    #[test]
    fn load_feeds_reports_missing_file() {
        let err = load_feeds(Path::new("./does/not/exist/feeds.yaml")).unwrap_err();
        assert!(matches!(err, ConfigError::FeedsFileIo { .. }));
    }

    #[test]
    fn load_feeds_parses_repository_config() {
        let path = Path::new(env!("CARGO_MANIFEST_DIR")).join("../../config/feeds.yaml");
        let feeds_file = load_feeds(&path).expect("repository feeds.yaml should load");
        assert_eq!(feeds_file.feeds.len(), 4);
        assert_eq!(feeds_file.feeds[0].name, "Hypebeast");
    }

    #[test]
    fn yaml_parse_error_is_reported() {
        let err = serde_yaml::from_str::<FeedsFile>("feeds: [name: 1")
            .map_err(ConfigError::FeedsFileParse)
            .unwrap_err();
        assert!(err.to_string().starts_with("failed to parse feeds file"));
    }
}
