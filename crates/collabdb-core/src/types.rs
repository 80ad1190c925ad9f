use chrono::{DateTime, NaiveDate, NaiveTime, Utc};
use rust_decimal::Decimal;
use serde::{Deserialize, Serialize};

use crate::CoreError;

/// Largest price accepted by [`NewPricePoint::new`].
pub const MAX_PRICE: Decimal = Decimal::from_parts(1_000_000_000, 0, 0, false, 0);

/// Decimal places kept on an ingested price.
const PRICE_SCALE: u32 = 4;

/// Drop time used when a release is announced without one.
pub const DEFAULT_RELEASE_TIME: &str = "10:00";

/// Category used when a release is announced without one.
pub const DEFAULT_RELEASE_CATEGORY: &str = "Sneakers";

const RELEASE_TIME_FORMAT: &str = "%H:%M";

/// A raw article handed over by the feed collector.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Article {
    pub title: String,
    pub description: Option<String>,
    /// Feed display name, e.g. `"Hypebeast"`.
    pub source: String,
    pub source_url: String,
    pub image_url: Option<String>,
}

/// A detected collaboration that has not been offered to the store yet.
///
/// Produced by [`crate::classify`] or submitted directly through the API.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct NewCollaboration {
    pub title: String,
    /// Brand names in detection order, without duplicates.
    pub brands: Vec<String>,
    pub source: String,
    pub source_url: String,
    #[serde(default)]
    pub image_url: Option<String>,
    pub category: String,
    #[serde(default)]
    pub hot: bool,
}

impl NewCollaboration {
    /// Build a collaboration from raw parts.
    ///
    /// The title and each brand are trimmed. Blank brands are dropped and a
    /// brand repeated under any casing keeps only its first spelling.
    ///
    /// # Errors
    ///
    /// Returns [`CoreError::EmptyTitle`] if the trimmed title is blank, or
    /// [`CoreError::NoBrands`] if no brand survives.
    pub fn new(
        title: &str,
        brands: impl IntoIterator<Item = String>,
        source: String,
        source_url: String,
        image_url: Option<String>,
        category: String,
        hot: bool,
    ) -> Result<Self, CoreError> {
        let title = title.trim();
        if title.is_empty() {
            return Err(CoreError::EmptyTitle);
        }

        let mut unique: Vec<String> = Vec::new();
        for brand in brands {
            let brand = brand.trim();
            if !brand.is_empty() && !unique.iter().any(|b| b.eq_ignore_ascii_case(brand)) {
                unique.push(brand.to_string());
            }
        }
        if unique.is_empty() {
            return Err(CoreError::NoBrands);
        }

        Ok(Self {
            title: title.to_string(),
            brands: unique,
            source,
            source_url,
            image_url,
            category,
            hot,
        })
    }
}

/// A collaboration retained by the dedup store. Never mutated after insertion.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct CollaborationRecord {
    /// Monotonic sequence id assigned at insertion; never reused.
    pub id: u64,
    pub title: String,
    pub brands: Vec<String>,
    pub source: String,
    pub source_url: String,
    pub image_url: Option<String>,
    pub category: String,
    pub hot: bool,
    pub detected_at: DateTime<Utc>,
    pub fingerprint: String,
}

impl CollaborationRecord {
    #[must_use]
    pub fn from_new(
        new: NewCollaboration,
        id: u64,
        detected_at: DateTime<Utc>,
        fingerprint: String,
    ) -> Self {
        Self {
            id,
            title: new.title,
            brands: new.brands,
            source: new.source,
            source_url: new.source_url,
            image_url: new.image_url,
            category: new.category,
            hot: new.hot,
            detected_at,
            fingerprint,
        }
    }
}

/// A validated price observation waiting to be timestamped by the store.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct NewPricePoint {
    product_id: String,
    price: Decimal,
    source: Option<String>,
}

impl NewPricePoint {
    /// Validate and normalize a price observation.
    ///
    /// The price is rounded to four decimal places and must then be in
    /// `(0, MAX_PRICE]`. A blank `source` is treated as absent.
    ///
    /// # Errors
    ///
    /// Returns [`CoreError::EmptyProductId`] or [`CoreError::InvalidPrice`].
    pub fn new(
        product_id: impl Into<String>,
        price: Decimal,
        source: Option<String>,
    ) -> Result<Self, CoreError> {
        let product_id = product_id.into();
        if product_id.trim().is_empty() {
            return Err(CoreError::EmptyProductId);
        }
        let price = price.round_dp(PRICE_SCALE);
        if price <= Decimal::ZERO || price > MAX_PRICE {
            return Err(CoreError::InvalidPrice(price));
        }
        let source = source.filter(|s| !s.trim().is_empty());
        Ok(Self {
            product_id,
            price,
            source,
        })
    }

    #[must_use]
    pub fn product_id(&self) -> &str {
        &self.product_id
    }

    #[must_use]
    pub fn price(&self) -> Decimal {
        self.price
    }

    #[must_use]
    pub fn into_point(self, recorded_at: DateTime<Utc>) -> PricePoint {
        PricePoint {
            product_id: self.product_id,
            price: self.price,
            source: self.source,
            recorded_at,
        }
    }
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct PricePoint {
    pub product_id: String,
    pub price: Decimal,
    pub source: Option<String>,
    #[serde(rename = "date")]
    pub recorded_at: DateTime<Utc>,
}

/// Derived statistics over a product's retained price points.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct PriceStats {
    /// Price of the most recent point.
    pub current: Decimal,
    pub lowest: PricePoint,
    pub highest: PricePoint,
    /// Mean price rounded to the nearest integer.
    pub average: Decimal,
    /// Whole-number percent change from the oldest to the newest point.
    pub change_percent: Decimal,
    pub data_points: usize,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct TrendingEntry {
    /// Normalized (trimmed, lowercased) query text.
    pub query: String,
    pub count: u64,
    pub last_searched: DateTime<Utc>,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ScanStatsSnapshot {
    pub total_scans: u64,
    pub total_collabs: usize,
    pub hot_collabs: usize,
    pub last_scan: Option<DateTime<Utc>>,
}

/// A release calendar entry that has not been assigned an id yet.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct NewRelease {
    pub name: String,
    pub brand: Option<String>,
    pub date: NaiveDate,
    /// Local drop time as `HH:MM`.
    pub time: String,
    pub price: Option<Decimal>,
    pub image_url: Option<String>,
    pub url: Option<String>,
    pub category: String,
    pub hot: bool,
}

impl NewRelease {
    /// A release named `name` dropping on `date`, with default time and category.
    ///
    /// # Errors
    ///
    /// Returns [`CoreError::EmptyReleaseName`] if the trimmed name is blank.
    pub fn new(name: &str, date: NaiveDate) -> Result<Self, CoreError> {
        let name = name.trim();
        if name.is_empty() {
            return Err(CoreError::EmptyReleaseName);
        }
        Ok(Self {
            name: name.to_string(),
            brand: None,
            date,
            time: DEFAULT_RELEASE_TIME.to_string(),
            price: None,
            image_url: None,
            url: None,
            category: DEFAULT_RELEASE_CATEGORY.to_string(),
            hot: false,
        })
    }

    /// Set the drop time, which must parse as `HH:MM`.
    ///
    /// # Errors
    ///
    /// Returns [`CoreError::InvalidReleaseTime`] for anything else.
    pub fn with_time(mut self, time: &str) -> Result<Self, CoreError> {
        let time = time.trim();
        NaiveTime::parse_from_str(time, RELEASE_TIME_FORMAT)
            .map_err(|_| CoreError::InvalidReleaseTime(time.to_string()))?;
        self.time = time.to_string();
        Ok(self)
    }

    /// Set the retail price, which must be in `(0, MAX_PRICE]`.
    ///
    /// # Errors
    ///
    /// Returns [`CoreError::InvalidPrice`] for an out-of-range price.
    pub fn with_price(mut self, price: Decimal) -> Result<Self, CoreError> {
        let price = price.round_dp(PRICE_SCALE);
        if price <= Decimal::ZERO || price > MAX_PRICE {
            return Err(CoreError::InvalidPrice(price));
        }
        self.price = Some(price);
        Ok(self)
    }

    #[must_use]
    pub fn into_release(self, id: u64, created_at: DateTime<Utc>) -> Release {
        Release {
            id,
            name: self.name,
            brand: self.brand,
            date: self.date,
            time: self.time,
            price: self.price,
            image_url: self.image_url,
            url: self.url,
            category: self.category,
            hot: self.hot,
            created_at,
        }
    }
}

/// A scheduled product drop on the release calendar.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Release {
    pub id: u64,
    pub name: String,
    pub brand: Option<String>,
    /// Calendar day of the drop, serialized as `YYYY-MM-DD`.
    pub date: NaiveDate,
    pub time: String,
    pub price: Option<Decimal>,
    pub image_url: Option<String>,
    pub url: Option<String>,
    pub category: String,
    pub hot: bool,
    pub created_at: DateTime<Utc>,
}
