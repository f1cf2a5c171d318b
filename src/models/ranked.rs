use serde::{Deserialize, Serialize};

use super::{NormalizedRecord, TrendMetric, TrendRecord};

// ---------------------------------------------------------------------------
// Direction
// ---------------------------------------------------------------------------

/// `Descending` for top/gainer views, `Ascending` for loser views.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum Direction {
    Ascending,
    #[default]
    Descending,
}

// ---------------------------------------------------------------------------
// RankedView: Sorted records with dense ranks
// ---------------------------------------------------------------------------

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct RankedEntry<T> {
    /// Dense rank starting at 1.
    pub rank: usize,
    pub record: T,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct RankedView<T> {
    pub entries: Vec<RankedEntry<T>>,
}

impl<T> RankedView<T> {
    pub fn len(&self) -> usize {
        self.entries.len()
    }

    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }

    pub fn iter(&self) -> std::slice::Iter<'_, RankedEntry<T>> {
        self.entries.iter()
    }

    /// Keep only the first `n` entries.
    pub fn top(mut self, n: usize) -> Self {
        self.entries.truncate(n);
        self
    }

    pub fn ranks(&self) -> Vec<usize> {
        self.entries.iter().map(|e| e.rank).collect()
    }

    pub fn records(&self) -> Vec<&T> {
        self.entries.iter().map(|e| &e.record).collect()
    }
}

impl<T> Default for RankedView<T> {
    fn default() -> Self {
        Self {
            entries: Vec::new(),
        }
    }
}

// ---------------------------------------------------------------------------
// Summaries: The default dashboard views in one value
// ---------------------------------------------------------------------------

/// Card count plus the top market cap and profitability rankings.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct MarketSummary {
    pub total_cards: usize,
    pub top_market_cap: RankedView<NormalizedRecord>,
    pub top_profitability: RankedView<NormalizedRecord>,
}

/// Biggest gainers and losers for one tracked metric.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct MetricMovers {
    pub metric: TrendMetric,
    pub gainers: RankedView<TrendRecord>,
    pub losers: RankedView<TrendRecord>,
}

// ---------------------------------------------------------------------------
// Display projections
// ---------------------------------------------------------------------------

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct DisplayRow<D> {
    pub rank: usize,
    pub values: D,
}

/// Formatted projection of a normalized record.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub struct RecordDisplay {
    pub id: String,
    pub product_name: String,
    pub console_name: String,
    pub product_url: String,
    pub loose_price: String,
    pub psa10_price: String,
    pub sales_volume: String,
    pub grading_profitability: String,
    pub market_cap: String,
    pub release_year: String,
}

/// Formatted projection of a trend record.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub struct TrendDisplay {
    pub id: String,
    pub product_name: String,
    pub console_name: String,
    pub product_url: String,
    pub loose_price_old: String,
    pub loose_price_new: String,
    pub loose_price_change: String,
    pub psa10_price_old: String,
    pub psa10_price_new: String,
    pub psa10_price_change: String,
    pub sales_volume_old: String,
    pub sales_volume_new: String,
    pub sales_volume_change: String,
}
