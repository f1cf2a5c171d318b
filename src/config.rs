use std::path::PathBuf;

pub const PRODUCT_URL_BASE: &str = "https://www.pricecharting.com/offers?product=";

/// Snapshot files are named `filtered_price_data_<stamp>.csv`.
pub const SNAPSHOT_PREFIX: &str = "filtered_price_data_";
pub const SNAPSHOT_EXTENSION: &str = ".csv";

/// Top-N used by the market cap and profitability views.
pub const DEFAULT_TOP_N: usize = 20;
/// Top-N used by the trend views.
pub const DEFAULT_TREND_TOP_N: usize = 10;

/// Language marker found in `console-name` for Japanese-language sets.
pub const DEFAULT_LANGUAGE_MARKER: &str = "Japanese";

/// Placeholder rendered for missing numeric values.
pub const MISSING_PLACEHOLDER: &str = "N/A";

// Canonical snapshot column names.
pub const COL_ID: &str = "id";
pub const COL_PRODUCT_NAME: &str = "product-name";
pub const COL_CONSOLE_NAME: &str = "console-name";
pub const COL_LOOSE_PRICE: &str = "loose-price";
pub const COL_PSA10_PRICE: &str = "psa-10-price";
pub const COL_SALES_VOLUME: &str = "sales-volume";
pub const COL_RELEASE_DATE: &str = "release-date";

pub fn product_url(id: &str) -> String {
    format!("{}{}", PRODUCT_URL_BASE, id)
}

pub fn snapshot_file_name(stamp: &str) -> String {
    format!("{}{}{}", SNAPSHOT_PREFIX, stamp, SNAPSHOT_EXTENSION)
}

pub fn default_data_dir() -> PathBuf {
    if let Some(data) = dirs::data_dir() {
        data.join("card-market-sdk")
    } else {
        PathBuf::from(".card-market-data")
    }
}
