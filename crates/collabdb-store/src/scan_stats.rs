use chrono::{DateTime, Utc};

/// Counters updated once per completed scan.
#[derive(Debug, Default, Clone, PartialEq, Eq)]
pub struct ScanStats {
    pub total_scans: u64,
    pub last_scan: Option<DateTime<Utc>>,
}

/// Counts from one or more scan passes.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct ScanReport {
    pub articles: usize,
    pub detected: usize,
    pub accepted: usize,
}

impl ScanReport {
    #[must_use]
    pub fn merge(self, other: Self) -> Self {
        Self {
            articles: self.articles + other.articles,
            detected: self.detected + other.detected,
            accepted: self.accepted + other.accepted,
        }
    }
}

impl ScanStats {
    pub fn record_completion(&mut self, now: DateTime<Utc>) {
        self.total_scans += 1;
        self.last_scan = Some(now);
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn starts_empty() {
        let stats = ScanStats::default();
        assert_eq!(stats.total_scans, 0);
        assert!(stats.last_scan.is_none());
    }

    #[test]
    fn completion_increments_and_stamps() {
        let mut stats = ScanStats::default();
        let t0 = Utc::now();
        stats.record_completion(t0);
        let t1 = t0 + chrono::Duration::minutes(5);
        stats.record_completion(t1);
        assert_eq!(stats.total_scans, 2);
        assert_eq!(stats.last_scan, Some(t1));
    }

    #[test]
    fn reports_merge_field_by_field() {
        let a = ScanReport {
            articles: 10,
            detected: 3,
            accepted: 2,
        };
        let b = ScanReport {
            articles: 5,
            detected: 1,
            accepted: 0,
        };
        assert_eq!(
            a.merge(b),
            ScanReport {
                articles: 15,
                detected: 4,
                accepted: 2,
            }
        );
    }
}
