//! Per-product price history with derived statistics.

use std::collections::{HashMap, VecDeque};

use chrono::{DateTime, Utc};
use collabdb_core::{NewPricePoint, PricePoint, PriceStats};
use rust_decimal::Decimal;

/// Bounded, chronologically ordered price points keyed by product id.
#[derive(Debug)]
pub struct PriceHistory {
    products: HashMap<String, VecDeque<PricePoint>>,
    cap: usize,
}

impl PriceHistory {
    #[must_use]
    pub fn new(cap: usize) -> Self {
        Self {
            products: HashMap::new(),
            cap: cap.max(1),
        }
    }

    /// Append a point stamped with `now`, dropping the oldest points past the cap.
    pub fn add(&mut self, point: NewPricePoint, now: DateTime<Utc>) -> PricePoint {
        let point = point.into_point(now);
        let history = self
            .products
            .entry(point.product_id.clone())
            .or_default();
        history.push_back(point.clone());
        while history.len() > self.cap {
            history.pop_front();
        }
        point
    }

    /// Retained points for a product, oldest first. Empty for unknown products.
    #[must_use]
    pub fn history(&self, product_id: &str) -> Vec<PricePoint> {
        self.products
            .get(product_id)
            .map(|h| h.iter().cloned().collect())
            .unwrap_or_default()
    }

    /// The cheapest retained point; the oldest one wins ties.
    #[must_use]
    pub fn lowest(&self, product_id: &str) -> Option<PricePoint> {
        self.points(product_id).and_then(lowest_point).cloned()
    }

    /// The most expensive retained point; the oldest one wins ties.
    #[must_use]
    pub fn highest(&self, product_id: &str) -> Option<PricePoint> {
        self.points(product_id).and_then(highest_point).cloned()
    }

    /// Summary statistics, or `None` when the product has no points.
    #[must_use]
    pub fn stats(&self, product_id: &str) -> Option<PriceStats> {
        let history = self.points(product_id)?;
        let first = history.front()?;
        let last = history.back()?;
        let lowest = lowest_point(history)?;
        let highest = highest_point(history)?;

        let sum: Decimal = history.iter().map(|p| p.price).sum();
        let average = round_half_up(sum / Decimal::from(history.len()));

        let change_percent = if history.len() > 1 {
            round_half_up((last.price - first.price) / first.price * Decimal::ONE_HUNDRED)
        } else {
            Decimal::ZERO
        };

        Some(PriceStats {
            current: last.price,
            lowest: lowest.clone(),
            highest: highest.clone(),
            average,
            change_percent,
            data_points: history.len(),
        })
    }

    fn points(&self, product_id: &str) -> Option<&VecDeque<PricePoint>> {
        self.products.get(product_id).filter(|h| !h.is_empty())
    }
}

fn lowest_point(history: &VecDeque<PricePoint>) -> Option<&PricePoint> {
    history
        .iter()
        .reduce(|min, p| if p.price < min.price { p } else { min })
}

fn highest_point(history: &VecDeque<PricePoint>) -> Option<&PricePoint> {
    history
        .iter()
        .reduce(|max, p| if p.price > max.price { p } else { max })
}

/// Round to the nearest integer with halves going toward positive infinity,
/// so `2.5` becomes `3` and `-2.5` becomes `-2`.
fn round_half_up(value: Decimal) -> Decimal {
    (value + Decimal::new(5, 1)).floor()
}
