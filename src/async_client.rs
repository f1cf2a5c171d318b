//! Async wrapper around [`CardMarketSdk`] for use in async runtimes (Tokio, etc.).
//!
//! Runs all SDK operations on a blocking thread pool via
//! [`tokio::task::spawn_blocking`], keeping the async event loop free.
//!
//! # Example
//!
//! ```no_run
//! use card_market_sdk::{AsyncCardMarketSdk, FilterSpec};
//!
//! #[tokio::main(flavor = "current_thread")]
//! async fn main() {
//!     let sdk = AsyncCardMarketSdk::builder().data_dir("./data").build().await.unwrap();
//!
//!     let top = sdk.run(|s| {
//!         s.market().top_by_market_cap(&FilterSpec::default(), 20)
//!     }).await.unwrap();
//! }
//! ```

use std::path::{Path, PathBuf};
use std::sync::{Arc, Mutex};

use crate::error::{CardMarketError, Result};
use crate::snapshots::{SnapshotId, TrendAvailability};
use crate::CardMarketSdk;

// ---------------------------------------------------------------------------
// AsyncCardMarketSdkBuilder
// ---------------------------------------------------------------------------

/// Builder for configuring and constructing an [`AsyncCardMarketSdk`] instance.
#[derive(Default)]
pub struct AsyncCardMarketSdkBuilder {
    data_dir: Option<PathBuf>,
}

impl AsyncCardMarketSdkBuilder {
    /// Set the directory holding snapshot CSV files.
    pub fn data_dir<P: AsRef<Path>>(mut self, path: P) -> Self {
        self.data_dir = Some(path.as_ref().to_path_buf());
        self
    }

    /// Build the async SDK on the blocking thread pool.
    pub async fn build(self) -> Result<AsyncCardMarketSdk> {
        tokio::task::spawn_blocking(move || {
            let mut builder = CardMarketSdk::builder();
            if let Some(dir) = self.data_dir {
                builder = builder.data_dir(dir);
            }
            let sdk = builder.build()?;
            Ok(AsyncCardMarketSdk {
                inner: Arc::new(Mutex::new(sdk)),
            })
        })
        .await
        .map_err(|e| CardMarketError::InvalidArgument(format!("Task join error: {e}")))?
    }
}

// ---------------------------------------------------------------------------
// AsyncCardMarketSdk
// ---------------------------------------------------------------------------

/// Async wrapper around [`CardMarketSdk`].
///
/// The DuckDB connection is not `Sync`, so the SDK sits behind a [`Mutex`]
/// and each call runs on a blocking thread.
pub struct AsyncCardMarketSdk {
    inner: Arc<Mutex<CardMarketSdk>>,
}

impl AsyncCardMarketSdk {
    /// Create a new builder for configuring the async SDK.
    pub fn builder() -> AsyncCardMarketSdkBuilder {
        AsyncCardMarketSdkBuilder::default()
    }

    /// Run a sync SDK operation on the blocking thread pool.
    pub async fn run<F, T>(&self, f: F) -> Result<T>
    where
        F: FnOnce(&CardMarketSdk) -> Result<T> + Send + 'static,
        T: Send + 'static,
    {
        let sdk = self.inner.clone();
        tokio::task::spawn_blocking(move || {
            let guard = sdk
                .lock()
                .map_err(|_| CardMarketError::InvalidArgument("SDK lock poisoned".into()))?;
            f(&guard)
        })
        .await
        .map_err(|e| CardMarketError::InvalidArgument(format!("Task join error: {e}")))?
    }

    /// Available snapshots, newest first.
    pub async fn snapshots(&self) -> Result<Vec<SnapshotId>> {
        self.run(|s| s.snapshots()).await
    }

    /// Whether the two most recent snapshots exist.
    pub async fn trend_availability(&self) -> Result<TrendAvailability> {
        self.run(|s| s.trends().availability()).await
    }
}
