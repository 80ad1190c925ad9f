//! Bounded, fingerprint-deduplicated collaboration store.

use std::collections::{HashSet, VecDeque};

use chrono::{DateTime, Utc};
use collabdb_core::{fingerprint, CollaborationRecord, NewCollaboration};

/// Maximum number of records returned by [`CollabStore::hot`].
pub const HOT_DISPLAY_LIMIT: usize = 20;

/// Maximum number of records returned by [`CollabStore::search`].
pub const SEARCH_RESULT_LIMIT: usize = 30;

/// Collaboration records ordered most-recent-first, capped at `cap` entries.
///
/// No two retained records share a fingerprint. When the cap is exceeded the
/// oldest records are evicted and their fingerprints forgotten, so an evicted
/// collaboration can be accepted again later.
#[derive(Debug)]
pub struct CollabStore {
    records: VecDeque<CollaborationRecord>,
    fingerprints: HashSet<String>,
    next_id: u64,
    cap: usize,
}

impl CollabStore {
    #[must_use]
    pub fn new(cap: usize) -> Self {
        Self {
            records: VecDeque::new(),
            fingerprints: HashSet::new(),
            next_id: 1,
            cap: cap.max(1),
        }
    }

    /// Offer a collaboration to the store.
    ///
    /// Returns `false` without touching the store when a retained record has
    /// the same fingerprint. Otherwise the record gets the next sequence id and
    /// `now` as its detection time, goes to the front, and `true` is returned.
    pub fn submit(&mut self, collab: NewCollaboration, now: DateTime<Utc>) -> bool {
        let key = fingerprint(&collab.title, &collab.brands);
        if self.fingerprints.contains(&key) {
            return false;
        }

        let id = self.next_id;
        self.next_id += 1;
        self.fingerprints.insert(key.clone());
        self.records
            .push_front(CollaborationRecord::from_new(collab, id, now, key));

        while self.records.len() > self.cap {
            if let Some(evicted) = self.records.pop_back() {
                self.fingerprints.remove(&evicted.fingerprint);
            }
        }
        true
    }

    /// All retained records, most recent first.
    #[must_use]
    pub fn all(&self) -> Vec<CollaborationRecord> {
        self.records.iter().cloned().collect()
    }

    /// The `n` most recent records.
    #[must_use]
    pub fn latest(&self, n: usize) -> Vec<CollaborationRecord> {
        self.records.iter().take(n).cloned().collect()
    }

    /// Hot records in store order, at most [`HOT_DISPLAY_LIMIT`].
    #[must_use]
    pub fn hot(&self) -> Vec<CollaborationRecord> {
        self.records
            .iter()
            .filter(|r| r.hot)
            .take(HOT_DISPLAY_LIMIT)
            .cloned()
            .collect()
    }

    /// Case-insensitive substring search over titles and brand names.
    ///
    /// Results keep store order and are capped at [`SEARCH_RESULT_LIMIT`].
    #[must_use]
    pub fn search(&self, query: &str) -> Vec<CollaborationRecord> {
        let needle = query.to_lowercase();
        self.records
            .iter()
            .filter(|r| {
                r.title.to_lowercase().contains(&needle)
                    || r.brands.iter().any(|b| b.to_lowercase().contains(&needle))
            })
            .take(SEARCH_RESULT_LIMIT)
            .cloned()
            .collect()
    }

    #[must_use]
    pub fn len(&self) -> usize {
        self.records.len()
    }

    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.records.is_empty()
    }

    #[must_use]
    pub fn hot_count(&self) -> usize {
        self.records.iter().filter(|r| r.hot).count()
    }
}
