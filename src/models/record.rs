use std::collections::HashMap;

use chrono::NaiveDate;
use serde::{Deserialize, Serialize};

/// One snapshot row as read from disk, keyed by the canonical column names
/// (`id`, `product-name`, `console-name`, `loose-price`, ...).
pub type RawRecord = HashMap<String, serde_json::Value>;

// ---------------------------------------------------------------------------
// PriceRecord: One card at one point in time
// ---------------------------------------------------------------------------

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub struct PriceRecord {
    pub id: String,
    pub product_name: String,
    pub console_name: Option<String>,
    pub loose_price: Option<f64>,
    pub psa10_price: Option<f64>,
    pub sales_volume: Option<u64>,
    pub release_date: Option<NaiveDate>,
}

// ---------------------------------------------------------------------------
// NormalizedRecord: PriceRecord plus derived fields
// ---------------------------------------------------------------------------

/// A [`PriceRecord`] with its derived fields.
///
/// `grading_profitability` and `market_cap` fall back to `0.0` when an operand
/// is missing. Use [`has_grading_profitability`](Self::has_grading_profitability)
/// and [`has_market_cap`](Self::has_market_cap) to tell a real zero from an
/// unknown value.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub struct NormalizedRecord {
    #[serde(flatten)]
    pub record: PriceRecord,
    pub grading_profitability: f64,
    pub market_cap: f64,
    pub release_year: i32,
    pub product_url: String,
}

impl NormalizedRecord {
    pub fn id(&self) -> &str {
        &self.record.id
    }

    pub fn has_grading_profitability(&self) -> bool {
        self.record.psa10_price.is_some() && self.record.loose_price.is_some()
    }

    pub fn has_market_cap(&self) -> bool {
        self.record.loose_price.is_some() && self.record.sales_volume.is_some()
    }
}

// ---------------------------------------------------------------------------
// NormalizedSnapshot: Ordered collection of normalized records
// ---------------------------------------------------------------------------

#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct NormalizedSnapshot {
    pub records: Vec<NormalizedRecord>,
}

impl NormalizedSnapshot {
    pub fn new(records: Vec<NormalizedRecord>) -> Self {
        Self { records }
    }

    pub fn len(&self) -> usize {
        self.records.len()
    }

    pub fn is_empty(&self) -> bool {
        self.records.is_empty()
    }

    pub fn iter(&self) -> std::slice::Iter<'_, NormalizedRecord> {
        self.records.iter()
    }

    /// Look up a record by product id.
    pub fn get(&self, id: &str) -> Option<&NormalizedRecord> {
        self.records.iter().find(|r| r.id() == id)
    }

    /// Product ids in snapshot order.
    pub fn ids(&self) -> Vec<&str> {
        self.records.iter().map(|r| r.id()).collect()
    }
}

impl<'a> IntoIterator for &'a NormalizedSnapshot {
    type Item = &'a NormalizedRecord;
    type IntoIter = std::slice::Iter<'a, NormalizedRecord>;

    fn into_iter(self) -> Self::IntoIter {
        self.records.iter()
    }
}

// ---------------------------------------------------------------------------
// RecordField: Numeric fields a snapshot view can be ranked by
// ---------------------------------------------------------------------------

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum RecordField {
    LoosePrice,
    Psa10Price,
    SalesVolume,
    GradingProfitability,
    MarketCap,
    ReleaseYear,
}

// ---------------------------------------------------------------------------
// ScatterPoint: Loose vs PSA 10 price pair for charting
// ---------------------------------------------------------------------------

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub struct ScatterPoint {
    pub id: String,
    pub product_name: String,
    pub console_name: Option<String>,
    pub product_url: String,
    pub loose_price: f64,
    pub psa10_price: f64,
}
