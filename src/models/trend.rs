use std::fmt;

use serde::{Deserialize, Serialize};

// ---------------------------------------------------------------------------
// TrendMetric: Metrics tracked across snapshots
// ---------------------------------------------------------------------------

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum TrendMetric {
    LoosePrice,
    Psa10Price,
    SalesVolume,
}

impl TrendMetric {
    pub const ALL: [TrendMetric; 3] = [
        TrendMetric::LoosePrice,
        TrendMetric::Psa10Price,
        TrendMetric::SalesVolume,
    ];

    /// Human-readable column heading.
    pub fn label(&self) -> &'static str {
        match self {
            TrendMetric::LoosePrice => "Loose Price",
            TrendMetric::Psa10Price => "PSA 10 Price",
            TrendMetric::SalesVolume => "Sales Volume",
        }
    }
}

impl fmt::Display for TrendMetric {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.label())
    }
}

// ---------------------------------------------------------------------------
// MetricDelta: Old/new values and percentage change for one metric
// ---------------------------------------------------------------------------

#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct MetricDelta {
    pub old: Option<f64>,
    pub new: Option<f64>,
    /// Percentage change, `0.0` when `old` is zero, either side is missing,
    /// or the ratio is not finite.
    pub change: f64,
}

// ---------------------------------------------------------------------------
// TrendRecord: One product joined across two snapshots
// ---------------------------------------------------------------------------

/// Descriptive fields come from the current snapshot.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub struct TrendRecord {
    pub id: String,
    pub product_name: String,
    pub console_name: Option<String>,
    pub product_url: String,
    pub loose_price: MetricDelta,
    pub psa10_price: MetricDelta,
    pub sales_volume: MetricDelta,
}

impl TrendRecord {
    pub fn metric(&self, metric: TrendMetric) -> &MetricDelta {
        match metric {
            TrendMetric::LoosePrice => &self.loose_price,
            TrendMetric::Psa10Price => &self.psa10_price,
            TrendMetric::SalesVolume => &self.sales_volume,
        }
    }
}

// ---------------------------------------------------------------------------
// TrendField: Numeric fields a trend view can be ranked by
// ---------------------------------------------------------------------------

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case", tag = "kind", content = "metric")]
pub enum TrendField {
    Old(TrendMetric),
    New(TrendMetric),
    Change(TrendMetric),
}
