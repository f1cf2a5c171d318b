//! Record normalizer: raw snapshot rows to typed records with derived fields.
//!
//! Numeric and date fields are coerced leniently. A value that cannot be
//! parsed becomes missing and the record is kept. Only structural problems
//! (no `id` / `product-name` column, empty id, duplicate id) are errors.

use std::collections::HashSet;

use chrono::{Datelike, NaiveDate, NaiveDateTime};
use log::debug;
use serde_json::Value;

use crate::config;
use crate::error::{CardMarketError, Result};
use crate::models::{NormalizedRecord, NormalizedSnapshot, PriceRecord, RawRecord};

/// Date layouts seen in snapshot exports, tried in order.
const DATE_FORMATS: &[&str] = &["%Y-%m-%d", "%Y/%m/%d", "%m/%d/%Y", "%b %d, %Y", "%B %d, %Y"];
const DATETIME_FORMATS: &[&str] = &["%Y-%m-%d %H:%M:%S", "%Y-%m-%dT%H:%M:%S"];

/// Normalize a whole raw snapshot, preserving row order.
pub fn normalize(raw: &[RawRecord]) -> Result<NormalizedSnapshot> {
    let mut seen: HashSet<String> = HashSet::with_capacity(raw.len());
    let mut records = Vec::with_capacity(raw.len());

    for (row, raw_record) in raw.iter().enumerate() {
        let record = normalize_row(raw_record, row)?;
        if !seen.insert(record.record.id.clone()) {
            return Err(CardMarketError::DuplicateId(record.record.id));
        }
        records.push(record);
    }

    debug!("Normalized {} records", records.len());
    Ok(NormalizedSnapshot::new(records))
}

/// Normalize a single raw record.
pub fn normalize_record(raw: &RawRecord) -> Result<NormalizedRecord> {
    normalize_row(raw, 0)
}

/// Compute the derived fields for an already-typed record.
pub fn derive(record: PriceRecord) -> NormalizedRecord {
    let grading_profitability = match (record.psa10_price, record.loose_price) {
        (Some(psa10), Some(loose)) => psa10 - loose,
        _ => 0.0,
    };
    let market_cap = match (record.loose_price, record.sales_volume) {
        (Some(loose), Some(sales)) => loose * sales as f64,
        _ => 0.0,
    };
    let release_year = record.release_date.map(|d| d.year()).unwrap_or(0);
    let product_url = config::product_url(&record.id);

    NormalizedRecord {
        record,
        grading_profitability,
        market_cap,
        release_year,
        product_url,
    }
}

fn normalize_row(raw: &RawRecord, row: usize) -> Result<NormalizedRecord> {
    let id = raw
        .get(config::COL_ID)
        .and_then(text_value)
        .ok_or(CardMarketError::MissingField {
            field: config::COL_ID,
            row,
        })?;

    let product_name = raw
        .get(config::COL_PRODUCT_NAME)
        .ok_or(CardMarketError::MissingField {
            field: config::COL_PRODUCT_NAME,
            row,
        })
        .map(|v| text_value(v).unwrap_or_default())?;

    let console_name = raw.get(config::COL_CONSOLE_NAME).and_then(text_value);

    let loose_price = coerce(raw, config::COL_LOOSE_PRICE, row, parse_amount);
    let psa10_price = coerce(raw, config::COL_PSA10_PRICE, row, parse_amount);
    let sales_volume = coerce(raw, config::COL_SALES_VOLUME, row, parse_count);
    let release_date = coerce(raw, config::COL_RELEASE_DATE, row, parse_date);

    Ok(derive(PriceRecord {
        id,
        product_name,
        console_name,
        loose_price,
        psa10_price,
        sales_volume,
        release_date,
    }))
}

/// Parse an optional column, logging values that had to be dropped.
fn coerce<T>(
    raw: &RawRecord,
    column: &str,
    row: usize,
    parse: fn(&Value) -> Option<T>,
) -> Option<T> {
    let value = raw.get(column)?;
    if is_blank(value) {
        return None;
    }
    let parsed = parse(value);
    if parsed.is_none() {
        debug!("Row {}: unparseable {} value {} treated as missing", row, column, value);
    }
    parsed
}

fn is_blank(value: &Value) -> bool {
    match value {
        Value::Null => true,
        Value::String(s) => s.trim().is_empty(),
        _ => false,
    }
}

fn text_value(value: &Value) -> Option<String> {
    match value {
        Value::String(s) => {
            let trimmed = s.trim();
            if trimmed.is_empty() {
                None
            } else {
                Some(trimmed.to_string())
            }
        }
        Value::Number(n) => {
            if let Some(i) = n.as_i64() {
                Some(i.to_string())
            } else if let Some(u) = n.as_u64() {
                Some(u.to_string())
            } else {
                n.as_f64().map(|f| {
                    if f.fract() == 0.0 && f.abs() < i64::MAX as f64 {
                        (f as i64).to_string()
                    } else {
                        f.to_string()
                    }
                })
            }
        }
        Value::Bool(b) => Some(b.to_string()),
        _ => None,
    }
}

/// Non-negative finite amount. Accepts `12.5`, `"12.50"`, `"$1,234.56"`.
fn parse_amount(value: &Value) -> Option<f64> {
    let amount = match value {
        Value::Number(n) => n.as_f64()?,
        Value::String(s) => {
            let cleaned: String = s
                .trim()
                .trim_start_matches('$')
                .chars()
                .filter(|c| *c != ',')
                .collect();
            cleaned.trim().parse::<f64>().ok()?
        }
        _ => return None,
    };
    if amount.is_finite() && amount >= 0.0 {
        Some(amount)
    } else {
        None
    }
}

/// Non-negative whole number. `"1,200"` and `1200.0` are accepted, `12.5` is not.
fn parse_count(value: &Value) -> Option<u64> {
    if let Value::Number(n) = value {
        if let Some(u) = n.as_u64() {
            return Some(u);
        }
    }
    let amount = parse_amount(value)?;
    if amount.fract() == 0.0 && amount <= u64::MAX as f64 {
        Some(amount as u64)
    } else {
        None
    }
}

fn parse_date(value: &Value) -> Option<NaiveDate> {
    let text = match value {
        Value::String(s) => s.trim().to_string(),
        Value::Number(n) => n.as_i64()?.to_string(),
        _ => return None,
    };

    for fmt in DATE_FORMATS {
        if let Ok(date) = NaiveDate::parse_from_str(&text, fmt) {
            return Some(date);
        }
    }
    for fmt in DATETIME_FORMATS {
        if let Ok(dt) = NaiveDateTime::parse_from_str(&text, fmt) {
            return Some(dt.date());
        }
    }

    // Bare year
    if text.len() == 4 && text.chars().all(|c| c.is_ascii_digit()) {
        let year: i32 = text.parse().ok()?;
        return NaiveDate::from_ymd_opt(year, 1, 1);
    }

    None
}
