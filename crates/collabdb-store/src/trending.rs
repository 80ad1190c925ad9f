//! Frequency-ranked table of search queries.

use chrono::{DateTime, Utc};
use collabdb_core::TrendingEntry;

/// Search queries ranked by count, ties broken by most recent search.
#[derive(Debug)]
pub struct TrendingTable {
    entries: Vec<TrendingEntry>,
    cap: usize,
}

impl TrendingTable {
    #[must_use]
    pub fn new(cap: usize) -> Self {
        Self {
            entries: Vec::new(),
            cap: cap.max(1),
        }
    }

    /// Count one occurrence of `query`.
    ///
    /// Queries are identified by their trimmed, lowercased form; blank queries
    /// are ignored. The table is re-ranked and truncated to its cap after
    /// every update, so the lowest-ranked entry is the one evicted.
    pub fn record(&mut self, query: &str, now: DateTime<Utc>) {
        let normalized = normalize_query(query);
        if normalized.is_empty() {
            return;
        }

        if let Some(entry) = self.entries.iter_mut().find(|e| e.query == normalized) {
            entry.count += 1;
            entry.last_searched = now;
        } else {
            self.entries.push(TrendingEntry {
                query: normalized,
                count: 1,
                last_searched: now,
            });
        }

        self.entries.sort_by(|a, b| {
            b.count
                .cmp(&a.count)
                .then_with(|| b.last_searched.cmp(&a.last_searched))
        });
        self.entries.truncate(self.cap);
    }

    /// The `n` highest-ranked entries.
    #[must_use]
    pub fn top(&self, n: usize) -> Vec<TrendingEntry> {
        self.entries.iter().take(n).cloned().collect()
    }

    #[must_use]
    pub fn len(&self) -> usize {
        self.entries.len()
    }

    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }
}

fn normalize_query(query: &str) -> String {
    query.trim().to_lowercase()
}
