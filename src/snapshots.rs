//! Snapshot discovery and loading.
//!
//! Snapshots are CSV files named `filtered_price_data_<stamp>.csv` in a data
//! directory. The stamp is a sortable date (e.g. `20240115`), so the newest
//! snapshot is the last one in lexical order.

use std::fmt;
use std::fs;
use std::path::{Path, PathBuf};

use log::{debug, info, warn};
use serde::Serialize;

use crate::config;
use crate::connection::Connection;
use crate::error::{CardMarketError, Result};
use crate::models::{NormalizedSnapshot, RawRecord};
use crate::normalize::normalize;

// ---------------------------------------------------------------------------
// SnapshotId
// ---------------------------------------------------------------------------

/// Identifies one snapshot file.
#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize)]
pub struct SnapshotId {
    /// The `<stamp>` part of the file name.
    pub stamp: String,
    pub path: PathBuf,
}

impl fmt::Display for SnapshotId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.stamp)
    }
}

// ---------------------------------------------------------------------------
// TrendAvailability
// ---------------------------------------------------------------------------

/// Whether a trend comparison can run, checked before calling
/// [`compare`](crate::trend::compare).
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
#[serde(tag = "status", rename_all = "snake_case")]
pub enum TrendAvailability {
    Available {
        current: SnapshotId,
        previous: SnapshotId,
    },
    Unavailable {
        found: usize,
    },
}

impl TrendAvailability {
    pub fn is_available(&self) -> bool {
        matches!(self, TrendAvailability::Available { .. })
    }

    /// Human-readable explanation for the unavailable case.
    pub fn message(&self) -> Option<String> {
        match self {
            TrendAvailability::Available { .. } => None,
            TrendAvailability::Unavailable { found } => Some(format!(
                "Trends unavailable: at least two snapshots are required, found {}",
                found
            )),
        }
    }
}

// ---------------------------------------------------------------------------
// SnapshotStore
// ---------------------------------------------------------------------------

/// Lists and loads snapshot files from a data directory.
pub struct SnapshotStore {
    /// Directory holding the snapshot CSV files.
    pub data_dir: PathBuf,
}

impl SnapshotStore {
    /// Create a store over `data_dir`.
    ///
    /// If `data_dir` is `None`, uses the platform-appropriate default data
    /// directory. The directory is not created; a missing directory is
    /// reported as [`CardMarketError::NotFound`] by [`list`](Self::list).
    pub fn new(data_dir: Option<PathBuf>) -> Result<Self> {
        let dir = data_dir.unwrap_or_else(config::default_data_dir);
        if !dir.is_dir() {
            debug!("Snapshot directory {} does not exist yet", dir.display());
        }
        Ok(Self { data_dir: dir })
    }

    /// All snapshots in the data directory, newest first.
    pub fn list(&self) -> Result<Vec<SnapshotId>> {
        if !self.data_dir.is_dir() {
            return Err(CardMarketError::NotFound(format!(
                "Snapshot directory {} does not exist",
                self.data_dir.display()
            )));
        }

        let mut snapshots = Vec::new();
        for entry in fs::read_dir(&self.data_dir)? {
            let entry = entry?;
            if !entry.file_type()?.is_file() {
                continue;
            }
            let file_name = entry.file_name();
            let Some(name) = file_name.to_str() else {
                continue;
            };
            if let Some(stamp) = snapshot_stamp(name) {
                snapshots.push(SnapshotId {
                    stamp: stamp.to_string(),
                    path: entry.path(),
                });
            }
        }

        snapshots.sort_by(|a, b| b.stamp.cmp(&a.stamp));
        debug!(
            "Found {} snapshots in {}",
            snapshots.len(),
            self.data_dir.display()
        );
        Ok(snapshots)
    }

    /// The most recent snapshot.
    pub fn latest(&self) -> Result<SnapshotId> {
        self.list()?.into_iter().next().ok_or_else(|| {
            CardMarketError::NotFound(format!(
                "No snapshot files found in {}",
                self.data_dir.display()
            ))
        })
    }

    /// Look up a snapshot by its stamp.
    pub fn get(&self, stamp: &str) -> Result<SnapshotId> {
        let path = self.data_dir.join(config::snapshot_file_name(stamp));
        if path.is_file() {
            Ok(SnapshotId {
                stamp: stamp.to_string(),
                path,
            })
        } else {
            Err(CardMarketError::NotFound(format!(
                "Snapshot {} not found in {}",
                stamp,
                self.data_dir.display()
            )))
        }
    }

    /// Check whether the two most recent snapshots exist.
    pub fn trend_availability(&self) -> Result<TrendAvailability> {
        let mut snapshots = self.list()?.into_iter();
        match (snapshots.next(), snapshots.next()) {
            (Some(current), Some(previous)) => Ok(TrendAvailability::Available { current, previous }),
            (first, _) => {
                let found = usize::from(first.is_some());
                warn!("Trends unavailable: found {} snapshot(s)", found);
                Ok(TrendAvailability::Unavailable { found })
            }
        }
    }

    /// The `(current, previous)` pair, or [`CardMarketError::InsufficientSnapshots`].
    pub fn require_trend_pair(&self) -> Result<(SnapshotId, SnapshotId)> {
        match self.trend_availability()? {
            TrendAvailability::Available { current, previous } => Ok((current, previous)),
            TrendAvailability::Unavailable { found } => {
                Err(CardMarketError::InsufficientSnapshots { found })
            }
        }
    }

    /// Read a snapshot's rows without normalizing them.
    ///
    /// Fails if the file lacks an `id` or `product-name` column.
    pub fn load_raw(&self, conn: &Connection, id: &SnapshotId) -> Result<Vec<RawRecord>> {
        check_columns(conn, &id.path)?;
        conn.read_csv(&id.path)
    }

    /// Read and normalize a snapshot.
    pub fn load(&self, conn: &Connection, id: &SnapshotId) -> Result<NormalizedSnapshot> {
        let raw = self.load_raw(conn, id)?;
        let snapshot = normalize(&raw)?;
        info!("Loaded snapshot {} ({} records)", id, snapshot.len());
        Ok(snapshot)
    }
}

/// Extract `<stamp>` from `filtered_price_data_<stamp>.csv`.
fn snapshot_stamp(file_name: &str) -> Option<&str> {
    file_name
        .strip_prefix(config::SNAPSHOT_PREFIX)?
        .strip_suffix(config::SNAPSHOT_EXTENSION)
        .filter(|stamp| !stamp.is_empty())
}

fn check_columns(conn: &Connection, path: &Path) -> Result<()> {
    let columns = conn.csv_columns(path)?;
    for required in [config::COL_ID, config::COL_PRODUCT_NAME] {
        if !columns.iter().any(|c| c == required) {
            return Err(CardMarketError::MissingColumn {
                column: required,
                file: path.display().to_string(),
            });
        }
    }
    Ok(())
}
