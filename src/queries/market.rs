//! Single-snapshot views: market cap and grading profitability rankings.

use std::collections::BTreeSet;

use crate::config::DEFAULT_TOP_N;
use crate::connection::Connection;
use crate::error::Result;
use crate::filter::apply_filters;
use crate::models::{
    Direction, FilterSpec, MarketSummary, NormalizedRecord, NormalizedSnapshot, RankedView,
    RecordField, ScatterPoint,
};
use crate::rank::rank;
use crate::snapshots::{SnapshotId, SnapshotStore};

// ---------------------------------------------------------------------------
// Pure views
// ---------------------------------------------------------------------------

/// Top `n` records by `market_cap`, descending.
pub fn market_cap_view(
    snapshot: &NormalizedSnapshot,
    spec: &FilterSpec,
    n: usize,
) -> RankedView<NormalizedRecord> {
    top_by(snapshot, spec, RecordField::MarketCap, n)
}

/// Top `n` records by `grading_profitability`, descending.
pub fn profitability_view(
    snapshot: &NormalizedSnapshot,
    spec: &FilterSpec,
    n: usize,
) -> RankedView<NormalizedRecord> {
    top_by(snapshot, spec, RecordField::GradingProfitability, n)
}

/// Loose vs PSA 10 price pairs for records where both prices are present.
pub fn scatter_points(snapshot: &NormalizedSnapshot, spec: &FilterSpec) -> Vec<ScatterPoint> {
    apply_filters(snapshot, spec)
        .iter()
        .filter_map(|r| {
            let (loose, psa10) = (r.record.loose_price?, r.record.psa10_price?);
            Some(ScatterPoint {
                id: r.record.id.clone(),
                product_name: r.record.product_name.clone(),
                console_name: r.record.console_name.clone(),
                product_url: r.product_url.clone(),
                loose_price: loose,
                psa10_price: psa10,
            })
        })
        .collect()
}

/// Distinct set names, sorted. Records without a set are skipped.
pub fn set_names(snapshot: &NormalizedSnapshot) -> Vec<String> {
    snapshot
        .iter()
        .filter_map(|r| r.record.console_name.clone())
        .collect::<BTreeSet<_>>()
        .into_iter()
        .collect()
}

/// Distinct known release years, sorted ascending.
pub fn release_years(snapshot: &NormalizedSnapshot) -> Vec<i32> {
    snapshot
        .iter()
        .map(|r| r.release_year)
        .filter(|y| *y != 0)
        .collect::<BTreeSet<_>>()
        .into_iter()
        .collect()
}

fn top_by(
    snapshot: &NormalizedSnapshot,
    spec: &FilterSpec,
    key: RecordField,
    n: usize,
) -> RankedView<NormalizedRecord> {
    let filtered = apply_filters(snapshot, spec);
    rank(&filtered.records, key, Direction::Descending).top(n)
}

// ---------------------------------------------------------------------------
// MarketQuery
// ---------------------------------------------------------------------------

/// Market views over one snapshot: the latest, or a specific one.
pub struct MarketQuery<'a> {
    conn: &'a Connection,
    store: &'a SnapshotStore,
    stamp: Option<String>,
}

impl<'a> MarketQuery<'a> {
    /// Create a `MarketQuery` over the latest snapshot.
    pub fn new(conn: &'a Connection, store: &'a SnapshotStore) -> Self {
        Self {
            conn,
            store,
            stamp: None,
        }
    }

    /// Create a `MarketQuery` pinned to the snapshot with the given stamp.
    pub fn at(conn: &'a Connection, store: &'a SnapshotStore, stamp: &str) -> Self {
        Self {
            conn,
            store,
            stamp: Some(stamp.to_string()),
        }
    }

    /// The snapshot this query reads.
    pub fn snapshot_id(&self) -> Result<SnapshotId> {
        match &self.stamp {
            Some(stamp) => self.store.get(stamp),
            None => self.store.latest(),
        }
    }

    /// Load and normalize the snapshot this query reads.
    pub fn snapshot(&self) -> Result<NormalizedSnapshot> {
        let id = self.snapshot_id()?;
        self.store.load(self.conn, &id)
    }

    /// Number of cards passing `spec`.
    pub fn total_cards(&self, spec: &FilterSpec) -> Result<usize> {
        Ok(apply_filters(&self.snapshot()?, spec).len())
    }

    /// Top `n` cards by market cap.
    pub fn top_by_market_cap(
        &self,
        spec: &FilterSpec,
        n: usize,
    ) -> Result<RankedView<NormalizedRecord>> {
        Ok(market_cap_view(&self.snapshot()?, spec, n))
    }

    /// Top `n` cards by grading profitability.
    pub fn top_by_profitability(
        &self,
        spec: &FilterSpec,
        n: usize,
    ) -> Result<RankedView<NormalizedRecord>> {
        Ok(profitability_view(&self.snapshot()?, spec, n))
    }

    /// Card count and the top 20 by market cap and by profitability,
    /// all from a single load of the snapshot.
    pub fn summary(&self, spec: &FilterSpec) -> Result<MarketSummary> {
        let snapshot = self.snapshot()?;
        Ok(MarketSummary {
            total_cards: apply_filters(&snapshot, spec).len(),
            top_market_cap: market_cap_view(&snapshot, spec, DEFAULT_TOP_N),
            top_profitability: profitability_view(&snapshot, spec, DEFAULT_TOP_N),
        })
    }

    /// Rank all cards passing `spec` by any field.
    pub fn ranked(
        &self,
        spec: &FilterSpec,
        key: RecordField,
        direction: Direction,
    ) -> Result<RankedView<NormalizedRecord>> {
        let filtered = apply_filters(&self.snapshot()?, spec);
        Ok(rank(&filtered.records, key, direction))
    }

    /// Loose vs PSA 10 price series for charting.
    pub fn price_scatter(&self, spec: &FilterSpec) -> Result<Vec<ScatterPoint>> {
        Ok(scatter_points(&self.snapshot()?, spec))
    }

    /// Set names available for the set filter.
    pub fn set_names(&self) -> Result<Vec<String>> {
        Ok(set_names(&self.snapshot()?))
    }

    /// Release years available for the year filter.
    pub fn release_years(&self) -> Result<Vec<i32>> {
        Ok(release_years(&self.snapshot()?))
    }
}
