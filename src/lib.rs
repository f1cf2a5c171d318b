//! Card Market SDK for Rust.
//!
//! Ranks collectible-card price snapshots by market cap and grading
//! profitability, and compares two snapshots to find the biggest movers.
//! Snapshot CSV files are read through an in-memory DuckDB connection; all
//! ranking and trend logic runs on plain Rust values.
//!
//! # Quick start
//!
//! ```no_run
//! use card_market_sdk::{CardMarketSdk, FilterBuilder, TrendMetric};
//!
//! let sdk = CardMarketSdk::builder().data_dir("./data").build().unwrap();
//! let spec = FilterBuilder::new().min_sales_volume(5).build();
//!
//! // Top 20 cards by market cap in the latest snapshot
//! let top = sdk.market().top_by_market_cap(&spec, 20).unwrap();
//!
//! // Biggest PSA 10 price gainers between the two latest snapshots
//! let gainers = sdk.trends().top_gainers(TrendMetric::Psa10Price, &spec, 10).unwrap();
//! ```
//!
//! The pipeline functions ([`normalize`], [`apply_filters`], [`compare`],
//! [`rank()`], [`format_for_display`]) are pure and can be used without the
//! SDK.

#[cfg(feature = "async")]
pub mod async_client;
pub mod config;
pub mod connection;
pub mod error;
pub mod filter;
pub mod format;
pub mod models;
pub mod normalize;
pub mod queries;
pub mod rank;
pub mod snapshots;
pub mod trend;

#[cfg(feature = "async")]
pub use async_client::AsyncCardMarketSdk;
pub use connection::Connection;
pub use error::{CardMarketError, Result};
pub use filter::{apply_filters, FilterBuilder};
pub use format::{format_for_display, Formattable};
pub use models::*;
pub use normalize::{normalize, normalize_record};
pub use rank::{rank, rank_known, Rankable};
pub use snapshots::{SnapshotId, SnapshotStore, TrendAvailability};
pub use trend::{compare, percent_change};

use std::fmt;
use std::path::{Path, PathBuf};

// ---------------------------------------------------------------------------
// CardMarketSdkBuilder
// ---------------------------------------------------------------------------

/// Builder for configuring and constructing a [`CardMarketSdk`] instance.
///
/// Use [`CardMarketSdk::builder()`] to obtain a builder, chain configuration
/// methods, and call [`build()`](CardMarketSdkBuilder::build) to create the SDK.
#[derive(Default)]
pub struct CardMarketSdkBuilder {
    data_dir: Option<PathBuf>,
}

impl CardMarketSdkBuilder {
    /// Set the directory holding snapshot CSV files.
    ///
    /// If not set, the platform-appropriate default data directory is used
    /// (e.g. `~/.local/share/card-market-sdk` on Linux).
    pub fn data_dir<P: AsRef<Path>>(mut self, path: P) -> Self {
        self.data_dir = Some(path.as_ref().to_path_buf());
        self
    }

    /// Build the SDK, opening the snapshot store and DuckDB connection.
    ///
    /// No snapshot is read until a query needs it.
    pub fn build(self) -> Result<CardMarketSdk> {
        let store = SnapshotStore::new(self.data_dir)?;
        let conn = Connection::new()?;
        Ok(CardMarketSdk { conn, store })
    }
}

// ---------------------------------------------------------------------------
// CardMarketSdk
// ---------------------------------------------------------------------------

/// The main entry point for the Card Market SDK.
///
/// Owns a [`Connection`] and a [`SnapshotStore`] and exposes the dashboard
/// views as lightweight borrowing wrappers.
///
/// Created via [`CardMarketSdk::builder()`].
pub struct CardMarketSdk {
    conn: Connection,
    store: SnapshotStore,
}

impl CardMarketSdk {
    /// Create a new builder for configuring the SDK.
    pub fn builder() -> CardMarketSdkBuilder {
        CardMarketSdkBuilder::default()
    }

    // -- Query accessors ---------------------------------------------------

    /// Market cap and profitability views over the latest snapshot.
    pub fn market(&self) -> queries::market::MarketQuery<'_> {
        queries::market::MarketQuery::new(&self.conn, &self.store)
    }

    /// Market views over the snapshot with the given stamp.
    pub fn market_at(&self, stamp: &str) -> queries::market::MarketQuery<'_> {
        queries::market::MarketQuery::at(&self.conn, &self.store, stamp)
    }

    /// Trend views comparing two snapshots.
    pub fn trends(&self) -> queries::trends::TrendQuery<'_> {
        queries::trends::TrendQuery::new(&self.conn, &self.store)
    }

    // -- Snapshot access ---------------------------------------------------

    /// Available snapshots, newest first.
    pub fn snapshots(&self) -> Result<Vec<SnapshotId>> {
        self.store.list()
    }

    /// Load and normalize a snapshot.
    pub fn load(&self, id: &SnapshotId) -> Result<NormalizedSnapshot> {
        self.store.load(&self.conn, id)
    }

    /// Return a reference to the underlying [`SnapshotStore`].
    pub fn store(&self) -> &SnapshotStore {
        &self.store
    }

    /// Return a reference to the underlying [`Connection`] for advanced usage.
    pub fn connection(&self) -> &Connection {
        &self.conn
    }
}

// ---------------------------------------------------------------------------
// Display
// ---------------------------------------------------------------------------

impl fmt::Display for CardMarketSdk {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "CardMarketSdk(data_dir={})", self.store.data_dir.display())
    }
}
