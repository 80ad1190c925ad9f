//! Release calendar of announced product drops.
//!
//! Dates are calendar days in UTC. A release is upcoming from the start of
//! its day until the day is over, so a drop scheduled for today is listed by
//! every view until midnight.

use chrono::{DateTime, Days, NaiveDate, Utc};
use collabdb_core::{NewRelease, Release};

/// Window used by [`ReleaseCalendar::upcoming`] when the caller gives none.
pub const DEFAULT_UPCOMING_DAYS: u32 = 7;

/// Longest window accepted by [`ReleaseCalendar::upcoming`].
pub const MAX_UPCOMING_DAYS: u32 = 366;

/// Releases in insertion order, capped at `cap` entries.
///
/// When the cap is exceeded the release with the earliest date is evicted,
/// so past drops go before future ones.
#[derive(Debug)]
pub struct ReleaseCalendar {
    releases: Vec<Release>,
    next_id: u64,
    cap: usize,
}

impl ReleaseCalendar {
    #[must_use]
    pub fn new(cap: usize) -> Self {
        Self {
            releases: Vec::new(),
            next_id: 1,
            cap: cap.max(1),
        }
    }

    /// Store a release under the next sequence id and return it.
    pub fn add(&mut self, release: NewRelease, now: DateTime<Utc>) -> Release {
        let id = self.next_id;
        self.next_id += 1;
        let release = release.into_release(id, now);
        self.releases.push(release.clone());

        while self.releases.len() > self.cap {
            let earliest = self
                .releases
                .iter()
                .enumerate()
                .min_by_key(|(_, r)| (r.date, r.id))
                .map(|(idx, _)| idx);
            match earliest {
                Some(idx) => {
                    self.releases.remove(idx);
                }
                None => break,
            }
        }
        release
    }

    /// Every release dated `today` or later, soonest first.
    #[must_use]
    pub fn all_upcoming(&self, today: NaiveDate) -> Vec<Release> {
        self.sorted(|r| r.date >= today)
    }

    /// Releases from `today` through `today + days` inclusive, soonest first.
    ///
    /// `days` is clamped to `1..=MAX_UPCOMING_DAYS`.
    #[must_use]
    pub fn upcoming(&self, today: NaiveDate, days: u32) -> Vec<Release> {
        let days = days.clamp(1, MAX_UPCOMING_DAYS);
        let until = today
            .checked_add_days(Days::new(u64::from(days)))
            .unwrap_or(NaiveDate::MAX);
        self.sorted(|r| r.date >= today && r.date <= until)
    }

    /// Releases dropping on `today`, by drop time.
    #[must_use]
    pub fn on_day(&self, today: NaiveDate) -> Vec<Release> {
        self.sorted(|r| r.date == today)
    }

    /// Remove a release; returns `false` if no release has that id.
    pub fn remove(&mut self, id: u64) -> bool {
        match self.releases.iter().position(|r| r.id == id) {
            Some(idx) => {
                self.releases.remove(idx);
                true
            }
            None => false,
        }
    }

    #[must_use]
    pub fn len(&self) -> usize {
        self.releases.len()
    }

    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.releases.is_empty()
    }

    fn sorted(&self, keep: impl Fn(&Release) -> bool) -> Vec<Release> {
        let mut out: Vec<Release> = self.releases.iter().filter(|r| keep(r)).cloned().collect();
        // "HH:MM" strings order the same way as the times they name.
        out.sort_by(|a, b| {
            a.date
                .cmp(&b.date)
                .then_with(|| a.time.cmp(&b.time))
                .then_with(|| a.id.cmp(&b.id))
        });
        out
    }
}
