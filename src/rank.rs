//! Ranking: stable sort by a numeric key with dense ranks.
//!
//! Missing key values always sort after present ones, regardless of
//! direction, and share one final rank.

use std::cmp::Ordering;

use crate::models::{
    Direction, NormalizedRecord, RankedEntry, RankedView, RecordField, TrendField, TrendRecord,
};

/// A record type that can be ranked by one of its numeric fields.
pub trait Rankable {
    type Key: Copy;

    /// The value used for sorting, `None` if missing.
    fn sort_value(&self, key: Self::Key) -> Option<f64>;

    /// Whether the value is real data rather than a fallback.
    ///
    /// Defaults to "present".
    fn is_known(&self, key: Self::Key) -> bool {
        self.sort_value(key).is_some()
    }
}

impl Rankable for NormalizedRecord {
    type Key = RecordField;

    fn sort_value(&self, key: RecordField) -> Option<f64> {
        let r = &self.record;
        match key {
            RecordField::LoosePrice => r.loose_price,
            RecordField::Psa10Price => r.psa10_price,
            RecordField::SalesVolume => r.sales_volume.map(|v| v as f64),
            RecordField::GradingProfitability => Some(self.grading_profitability),
            RecordField::MarketCap => Some(self.market_cap),
            RecordField::ReleaseYear => Some(self.release_year as f64),
        }
    }

    fn is_known(&self, key: RecordField) -> bool {
        match key {
            RecordField::GradingProfitability => self.has_grading_profitability(),
            RecordField::MarketCap => self.has_market_cap(),
            RecordField::ReleaseYear => self.record.release_date.is_some(),
            _ => self.sort_value(key).is_some(),
        }
    }
}

impl Rankable for TrendRecord {
    type Key = TrendField;

    fn sort_value(&self, key: TrendField) -> Option<f64> {
        match key {
            TrendField::Old(m) => self.metric(m).old,
            TrendField::New(m) => self.metric(m).new,
            TrendField::Change(m) => Some(self.metric(m).change),
        }
    }

    fn is_known(&self, key: TrendField) -> bool {
        match key {
            TrendField::Change(m) => {
                let d = self.metric(m);
                match (d.old, d.new) {
                    (Some(old), Some(new)) if old != 0.0 => {
                        ((new - old) / old * 100.0).is_finite()
                    }
                    _ => false,
                }
            }
            _ => self.sort_value(key).is_some(),
        }
    }
}

/// Sort `records` by `key` in `direction` and assign dense ranks.
///
/// The sort is stable: equal values keep their input order.
pub fn rank<T: Rankable + Clone>(records: &[T], key: T::Key, direction: Direction) -> RankedView<T> {
    let mut keyed: Vec<(Option<f64>, &T)> = records
        .iter()
        .map(|r| (r.sort_value(key).filter(|v| !v.is_nan()), r))
        .collect();

    keyed.sort_by(|(a, _), (b, _)| compare_values(*a, *b, direction));

    let mut entries = Vec::with_capacity(keyed.len());
    let mut current_rank = 0;
    let mut previous: Option<Option<f64>> = None;
    for (value, record) in keyed {
        if previous != Some(value) {
            current_rank += 1;
            previous = Some(value);
        }
        entries.push(RankedEntry {
            rank: current_rank,
            record: record.clone(),
        });
    }

    RankedView { entries }
}

/// Like [`rank`], but leaves out records whose key value is unknown
/// (missing, or a zero fallback for a derived field).
pub fn rank_known<T: Rankable + Clone>(
    records: &[T],
    key: T::Key,
    direction: Direction,
) -> RankedView<T> {
    let known: Vec<T> = records.iter().filter(|r| r.is_known(key)).cloned().collect();
    rank(&known, key, direction)
}

fn compare_values(a: Option<f64>, b: Option<f64>, direction: Direction) -> Ordering {
    match (a, b) {
        (Some(a), Some(b)) => {
            let ord = a.partial_cmp(&b).unwrap_or(Ordering::Equal);
            match direction {
                Direction::Ascending => ord,
                Direction::Descending => ord.reverse(),
            }
        }
        (Some(_), None) => Ordering::Less,
        (None, Some(_)) => Ordering::Greater,
        (None, None) => Ordering::Equal,
    }
}
