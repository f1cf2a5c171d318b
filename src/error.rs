#[derive(Debug, thiserror::Error)]
pub enum CardMarketError {
    #[error("DuckDB error: {0}")]
    DuckDb(#[from] duckdb::Error),

    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),

    #[error("Missing required field '{field}' in record {row}")]
    MissingField { field: &'static str, row: usize },

    #[error("Snapshot {file} has no '{column}' column")]
    MissingColumn { column: &'static str, file: String },

    #[error("Duplicate product id in snapshot: {0}")]
    DuplicateId(String),

    #[error("Trends need at least two snapshots, found {found}")]
    InsufficientSnapshots { found: usize },

    #[error("Not found: {0}")]
    NotFound(String),

    #[error("Invalid argument: {0}")]
    InvalidArgument(String),
}

pub type Result<T> = std::result::Result<T, CardMarketError>;
