//! Ranking tests: dense ranks, direction, missing values, top-N.

mod common;

use card_market_sdk::{
    compare, rank, rank_known, Direction, FilterSpec, RecordField, TrendField, TrendMetric,
};
use serde_json::json;

fn ids<T>(view: &card_market_sdk::RankedView<T>, id: impl Fn(&T) -> &str) -> Vec<String> {
    view.iter().map(|e| id(&e.record).to_string()).collect()
}

// ---------------------------------------------------------------------------
// Dense ranking
// ---------------------------------------------------------------------------

#[test]
fn ties_share_rank_without_gaps() {
    let snap = common::snapshot(vec![
        common::card(1, 10.0, 10.0, 1),
        common::card(2, 10.0, 10.0, 1),
        common::card(3, 5.0, 5.0, 1),
    ]);

    let view = rank(&snap.records, RecordField::LoosePrice, Direction::Descending);
    assert_eq!(view.ranks(), vec![1, 1, 2]);
}

#[test]
fn profitability_scenario() {
    let snap = common::snapshot(vec![
        common::card(1, 10.0, 50.0, 100),
        common::card(2, 20.0, 20.0, 50),
    ]);

    let view = rank(
        &snap.records,
        RecordField::GradingProfitability,
        Direction::Descending,
    );
    assert_eq!(ids(&view, |r| r.id()), vec!["1", "2"]);
    assert_eq!(view.ranks(), vec![1, 2]);
    assert_eq!(view.entries[0].record.grading_profitability, 40.0);
    assert_eq!(view.entries[1].record.grading_profitability, 0.0);
}

#[test]
fn ascending_direction_for_losers() {
    let snap = common::snapshot(vec![
        common::card(1, 30.0, 0.0, 0),
        common::card(2, 10.0, 0.0, 0),
        common::card(3, 20.0, 0.0, 0),
    ]);

    let view = rank(&snap.records, RecordField::LoosePrice, Direction::Ascending);
    assert_eq!(ids(&view, |r| r.id()), vec!["2", "3", "1"]);
    assert_eq!(view.ranks(), vec![1, 2, 3]);
}

#[test]
fn sort_is_stable_for_ties() {
    let snap = common::snapshot(vec![
        common::card(9, 1.0, 1.0, 1),
        common::card(4, 1.0, 1.0, 1),
        common::card(7, 1.0, 1.0, 1),
    ]);

    let view = rank(&snap.records, RecordField::MarketCap, Direction::Descending);
    assert_eq!(ids(&view, |r| r.id()), vec!["9", "4", "7"]);
    assert_eq!(view.ranks(), vec![1, 1, 1]);
}

// ---------------------------------------------------------------------------
// Missing values
// ---------------------------------------------------------------------------

#[test]
fn missing_values_sort_last_in_both_directions() {
    let snap = common::catalog();

    let desc = rank(&snap.records, RecordField::LoosePrice, Direction::Descending);
    assert_eq!(desc.entries.last().unwrap().record.id(), "302");

    let asc = rank(&snap.records, RecordField::LoosePrice, Direction::Ascending);
    assert_eq!(asc.entries.last().unwrap().record.id(), "302");
    assert_eq!(asc.ranks(), vec![1, 2, 3, 4, 5]);
}

#[test]
fn all_missing_key_ranks_without_error() {
    let snap = common::snapshot(vec![
        common::raw(json!({ "id": "1", "product-name": "A" })),
        common::raw(json!({ "id": "2", "product-name": "B" })),
    ]);

    let view = rank(&snap.records, RecordField::Psa10Price, Direction::Descending);
    assert_eq!(view.len(), 2);
    assert_eq!(view.ranks(), vec![1, 1]);
}

#[test]
fn rank_known_excludes_fallback_zeros() {
    let snap = common::catalog();

    let all = rank(&snap.records, RecordField::MarketCap, Direction::Ascending);
    assert_eq!(all.entries[0].record.id(), "302");

    let known = rank_known(&snap.records, RecordField::MarketCap, Direction::Ascending);
    assert_eq!(known.len(), 4);
    assert!(known.iter().all(|e| e.record.id() != "302"));
}

// ---------------------------------------------------------------------------
// Top-N
// ---------------------------------------------------------------------------

#[test]
fn top_takes_first_n_after_sorting() {
    let snap = common::snapshot((1..=25).map(|i| common::card(i, i as f64, 0.0, 1)).collect());

    let view = rank(&snap.records, RecordField::LoosePrice, Direction::Descending).top(20);
    assert_eq!(view.len(), 20);
    assert_eq!(view.entries[0].record.id(), "25");
    assert_eq!(view.entries[19].record.id(), "6");

    let short = rank(&snap.records, RecordField::LoosePrice, Direction::Descending).top(100);
    assert_eq!(short.len(), 25);
}

// ---------------------------------------------------------------------------
// Trend records
// ---------------------------------------------------------------------------

#[test]
fn ranks_trend_records_by_change() {
    let previous = common::snapshot(vec![
        common::card(1, 10.0, 10.0, 1),
        common::card(2, 10.0, 10.0, 1),
        common::card(3, 10.0, 10.0, 1),
    ]);
    let current = common::snapshot(vec![
        common::card(1, 11.0, 10.0, 1),
        common::card(2, 30.0, 10.0, 1),
        common::card(3, 5.0, 10.0, 1),
    ]);
    let trends = compare(&current, &previous, &FilterSpec::default());

    let key = TrendField::Change(TrendMetric::LoosePrice);
    let gainers = rank(&trends, key, Direction::Descending);
    assert_eq!(ids(&gainers, |t| t.id.as_str()), vec!["2", "1", "3"]);

    let losers = rank(&trends, key, Direction::Ascending);
    assert_eq!(ids(&losers, |t| t.id.as_str()), vec!["3", "1", "2"]);
}

#[test]
fn rank_known_drops_guarded_changes() {
    let previous = common::snapshot(vec![
        common::card(1, 0.0, 10.0, 1),
        common::card(2, 10.0, 10.0, 1),
    ]);
    let current = common::snapshot(vec![
        common::card(1, 50.0, 10.0, 1),
        common::card(2, 5.0, 10.0, 1),
    ]);
    let trends = compare(&current, &previous, &FilterSpec::default());

    let view = rank_known(
        &trends,
        TrendField::Change(TrendMetric::LoosePrice),
        Direction::Descending,
    );
    assert_eq!(ids(&view, |t| t.id.as_str()), vec!["2"]);
}
