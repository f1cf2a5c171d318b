//! Two-snapshot views: percentage movers per tracked metric.

use log::warn;

use crate::config::DEFAULT_TREND_TOP_N;
use crate::connection::Connection;
use crate::error::Result;
use crate::models::{
    Direction, FilterSpec, MetricMovers, RankedView, TrendField, TrendMetric, TrendRecord,
};
use crate::rank::rank;
use crate::snapshots::{SnapshotStore, TrendAvailability};
use crate::trend::compare;

/// Rank trend records by the change in `metric` and keep the first `n`.
pub fn movers(
    trends: &[TrendRecord],
    metric: TrendMetric,
    direction: Direction,
    n: usize,
) -> RankedView<TrendRecord> {
    rank(trends, TrendField::Change(metric), direction).top(n)
}

// ---------------------------------------------------------------------------
// TrendQuery
// ---------------------------------------------------------------------------

/// Trend views comparing two snapshots.
pub struct TrendQuery<'a> {
    conn: &'a Connection,
    store: &'a SnapshotStore,
}

impl<'a> TrendQuery<'a> {
    /// Create a new `TrendQuery` bound to the given connection and store.
    pub fn new(conn: &'a Connection, store: &'a SnapshotStore) -> Self {
        Self { conn, store }
    }

    /// Whether the two most recent snapshots exist.
    pub fn availability(&self) -> Result<TrendAvailability> {
        self.store.trend_availability()
    }

    /// Compare the two most recent snapshots.
    ///
    /// Fails with [`InsufficientSnapshots`](crate::CardMarketError::InsufficientSnapshots)
    /// when fewer than two exist.
    pub fn compare_latest(&self, spec: &FilterSpec) -> Result<Vec<TrendRecord>> {
        let (current, previous) = self.store.require_trend_pair()?;
        let current = self.store.load(self.conn, &current)?;
        let previous = self.store.load(self.conn, &previous)?;
        Ok(compare(&current, &previous, spec))
    }

    /// Compare two explicitly selected snapshots by stamp.
    pub fn compare(
        &self,
        current: &str,
        previous: &str,
        spec: &FilterSpec,
    ) -> Result<Vec<TrendRecord>> {
        if current == previous {
            warn!("Comparing snapshot {} with itself", current);
        }
        let current = self.store.load(self.conn, &self.store.get(current)?)?;
        let previous = self.store.load(self.conn, &self.store.get(previous)?)?;
        Ok(compare(&current, &previous, spec))
    }

    /// Top 10 gainers and losers for every tracked metric, from one
    /// comparison of the two most recent snapshots.
    pub fn summary(&self, spec: &FilterSpec) -> Result<Vec<MetricMovers>> {
        let trends = self.compare_latest(spec)?;
        Ok(TrendMetric::ALL
            .iter()
            .map(|&metric| MetricMovers {
                metric,
                gainers: movers(&trends, metric, Direction::Descending, DEFAULT_TREND_TOP_N),
                losers: movers(&trends, metric, Direction::Ascending, DEFAULT_TREND_TOP_N),
            })
            .collect())
    }

    /// Top `n` cards by percentage increase in `metric`.
    pub fn top_gainers(
        &self,
        metric: TrendMetric,
        spec: &FilterSpec,
        n: usize,
    ) -> Result<RankedView<TrendRecord>> {
        let trends = self.compare_latest(spec)?;
        Ok(movers(&trends, metric, Direction::Descending, n))
    }

    /// Top `n` cards by percentage decrease in `metric`.
    pub fn top_losers(
        &self,
        metric: TrendMetric,
        spec: &FilterSpec,
        n: usize,
    ) -> Result<RankedView<TrendRecord>> {
        let trends = self.compare_latest(spec)?;
        Ok(movers(&trends, metric, Direction::Ascending, n))
    }
}
