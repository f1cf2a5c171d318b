//! Dashboard query modules.
//!
//! Each module provides a query struct that borrows the SDK's
//! [`Connection`](crate::connection::Connection) and
//! [`SnapshotStore`](crate::snapshots::SnapshotStore), loads the snapshots a
//! view needs, and runs them through the normalize / filter / compare / rank
//! pipeline. Nothing is cached between calls.

pub mod market;
pub mod trends;

pub use market::MarketQuery;
pub use trends::TrendQuery;
