//! Shared test fixtures for the Card Market SDK integration tests.
//!
//! Provides raw-record builders for the pure pipeline tests and
//! `setup_data_dir()`, which writes small sample snapshot CSVs into a
//! temporary directory.

#![allow(dead_code)]

use std::fs;
use std::path::Path;

use card_market_sdk::{normalize, NormalizedSnapshot, RawRecord};
use serde_json::{json, Value};

pub const CSV_HEADER: &str =
    "id,product-name,console-name,loose-price,psa-10-price,sales-volume,release-date";

/// Convert a `json!` object into a raw record.
pub fn raw(value: Value) -> RawRecord {
    match value {
        Value::Object(map) => map.into_iter().collect(),
        other => panic!("expected a JSON object, got {other}"),
    }
}

/// Raw record with the four numeric fields used by most scenarios.
pub fn card(id: u64, loose: f64, psa10: f64, sales: u64) -> RawRecord {
    raw(json!({
        "id": id.to_string(),
        "product-name": format!("Card {id}"),
        "console-name": "Pokemon Base Set",
        "loose-price": loose,
        "psa-10-price": psa10,
        "sales-volume": sales,
        "release-date": "1999-01-09",
    }))
}

/// Normalize a list of raw records, panicking on structural errors.
pub fn snapshot(records: Vec<RawRecord>) -> NormalizedSnapshot {
    normalize(&records).unwrap()
}

/// A mixed catalog: English and Japanese sets, several years, one record
/// with unparseable prices.
pub fn catalog() -> NormalizedSnapshot {
    snapshot(vec![
        raw(json!({
            "id": "101",
            "product-name": "Charizard #4",
            "console-name": "Pokemon Base Set",
            "loose-price": "$350.00",
            "psa-10-price": "$12,500.00",
            "sales-volume": "120",
            "release-date": "1999-01-09",
        })),
        raw(json!({
            "id": "102",
            "product-name": "Blastoise #2",
            "console-name": "Pokemon Base Set",
            "loose-price": "$90.00",
            "psa-10-price": "$2,100.00",
            "sales-volume": "80",
            "release-date": "1999-01-09",
        })),
        raw(json!({
            "id": "201",
            "product-name": "Charizard ex #199",
            "console-name": "Pokemon Japanese Shiny Treasure ex",
            "loose-price": "45.5",
            "psa-10-price": "210",
            "sales-volume": "900",
            "release-date": "2023-12-01",
        })),
        raw(json!({
            "id": "301",
            "product-name": "Pikachu VMAX #44",
            "console-name": "Pokemon Vivid Voltage",
            "loose-price": "12.00",
            "psa-10-price": "95.00",
            "sales-volume": "1,500",
            "release-date": "2020-11-13",
        })),
        raw(json!({
            "id": "302",
            "product-name": "Mystery Promo",
            "console-name": null,
            "loose-price": "n/a",
            "psa-10-price": "",
            "sales-volume": "unknown",
            "release-date": "soon",
        })),
    ])
}

/// Write `filtered_price_data_<stamp>.csv` with the given data lines.
pub fn write_snapshot(dir: &Path, stamp: &str, lines: &[&str]) {
    let mut body = String::from(CSV_HEADER);
    body.push('\n');
    for line in lines {
        body.push_str(line);
        body.push('\n');
    }
    fs::write(dir.join(format!("filtered_price_data_{stamp}.csv")), body).unwrap();
}

/// Create a temporary data directory with three snapshots plus a file that
/// does not match the snapshot naming scheme.
///
/// Returns the `TempDir`. The caller must keep it alive for the duration of
/// the test so the directory is not deleted prematurely.
pub fn setup_data_dir() -> tempfile::TempDir {
    let tmp_dir = tempfile::tempdir().unwrap();
    let dir = tmp_dir.path();

    write_snapshot(
        dir,
        "20240101",
        &[
            "1,Charizard #4,Pokemon Base Set,$300.00,\"$10,000.00\",100,1999-01-09",
            "2,Blastoise #2,Pokemon Base Set,$100.00,\"$2,000.00\",50,1999-01-09",
            "4,Venusaur #15,Pokemon Base Set,$0.00,$800.00,10,1999-01-09",
        ],
    );
    write_snapshot(
        dir,
        "20240201",
        &[
            "1,Charizard #4,Pokemon Base Set,$330.00,\"$12,000.00\",110,1999-01-09",
            "2,Blastoise #2,Pokemon Base Set,$80.00,\"$2,000.00\",60,1999-01-09",
            "3,Pikachu ex #238,Pokemon Japanese Scarlet ex,$40.00,$150.00,700,2023-03-03",
            "4,Venusaur #15,Pokemon Base Set,$50.00,$900.00,,1999-01-09",
        ],
    );
    // Older snapshot, ignored when the two latest are compared
    write_snapshot(
        dir,
        "20231201",
        &["1,Charizard #4,Pokemon Base Set,$1.00,$1.00,1,1999-01-09"],
    );
    fs::write(dir.join("notes.txt"), "not a snapshot").unwrap();

    tmp_dir
}
