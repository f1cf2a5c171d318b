//! Trend comparator: joins two snapshots on product id and computes
//! percentage changes.

use std::collections::HashMap;

use log::debug;

use crate::filter::apply_filters;
use crate::models::{FilterSpec, MetricDelta, NormalizedRecord, NormalizedSnapshot, TrendRecord};

/// Compare `current` against `previous`.
///
/// Both snapshots are filtered with `spec` before the join. The join is an
/// inner join on `id`, so products present on only one side are dropped.
/// Results follow the order of `current`.
pub fn compare(
    current: &NormalizedSnapshot,
    previous: &NormalizedSnapshot,
    spec: &FilterSpec,
) -> Vec<TrendRecord> {
    let current = apply_filters(current, spec);
    let previous = apply_filters(previous, spec);

    if current.is_empty() || previous.is_empty() {
        return Vec::new();
    }

    let by_id: HashMap<&str, &NormalizedRecord> =
        previous.iter().map(|r| (r.id(), r)).collect();

    let trends: Vec<TrendRecord> = current
        .iter()
        .filter_map(|new| by_id.get(new.id()).map(|old| join(new, old)))
        .collect();

    debug!(
        "Joined {} of {} current / {} previous records",
        trends.len(),
        current.len(),
        previous.len()
    );
    trends
}

/// `(new - old) / old * 100`, or `0.0` if `old` is zero, either side is
/// missing, or the ratio overflows to a non-finite value.
pub fn percent_change(old: Option<f64>, new: Option<f64>) -> f64 {
    match (old, new) {
        (Some(old), Some(new)) if old != 0.0 => {
            let change = (new - old) / old * 100.0;
            if change.is_finite() {
                change
            } else {
                0.0
            }
        }
        _ => 0.0,
    }
}

fn delta(old: Option<f64>, new: Option<f64>) -> MetricDelta {
    MetricDelta {
        old,
        new,
        change: percent_change(old, new),
    }
}

fn join(new: &NormalizedRecord, old: &NormalizedRecord) -> TrendRecord {
    let (n, o) = (&new.record, &old.record);
    TrendRecord {
        id: n.id.clone(),
        product_name: n.product_name.clone(),
        console_name: n.console_name.clone(),
        product_url: new.product_url.clone(),
        loose_price: delta(o.loose_price, n.loose_price),
        psa10_price: delta(o.psa10_price, n.psa10_price),
        sales_volume: delta(
            o.sales_volume.map(|v| v as f64),
            n.sales_volume.map(|v| v as f64),
        ),
    }
}
