//! Display formatting for ranked views.
//!
//! Formatting reads records and produces strings. It never touches the
//! numeric values that ranking and filtering use.

use crate::config::MISSING_PLACEHOLDER;
use crate::models::{
    DisplayRow, NormalizedRecord, RankedView, RecordDisplay, TrendDisplay, TrendRecord,
};

/// A record type with a display projection.
pub trait Formattable {
    type Display;

    fn to_display(&self) -> Self::Display;
}

/// Project every entry of a ranked view into display strings.
pub fn format_for_display<T: Formattable>(view: &RankedView<T>) -> Vec<DisplayRow<T::Display>> {
    view.iter()
        .map(|entry| DisplayRow {
            rank: entry.rank,
            values: entry.record.to_display(),
        })
        .collect()
}

impl Formattable for NormalizedRecord {
    type Display = RecordDisplay;

    fn to_display(&self) -> RecordDisplay {
        let r = &self.record;
        RecordDisplay {
            id: r.id.clone(),
            product_name: r.product_name.clone(),
            console_name: r.console_name.clone().unwrap_or_default(),
            product_url: self.product_url.clone(),
            loose_price: format_currency(r.loose_price),
            psa10_price: format_currency(r.psa10_price),
            sales_volume: format_count(r.sales_volume.map(|v| v as f64)),
            grading_profitability: format_currency(Some(self.grading_profitability)),
            market_cap: format_currency(Some(self.market_cap)),
            release_year: if self.release_year == 0 {
                MISSING_PLACEHOLDER.to_string()
            } else {
                self.release_year.to_string()
            },
        }
    }
}

impl Formattable for TrendRecord {
    type Display = TrendDisplay;

    fn to_display(&self) -> TrendDisplay {
        TrendDisplay {
            id: self.id.clone(),
            product_name: self.product_name.clone(),
            console_name: self.console_name.clone().unwrap_or_default(),
            product_url: self.product_url.clone(),
            loose_price_old: format_currency(self.loose_price.old),
            loose_price_new: format_currency(self.loose_price.new),
            loose_price_change: format_percent(Some(self.loose_price.change)),
            psa10_price_old: format_currency(self.psa10_price.old),
            psa10_price_new: format_currency(self.psa10_price.new),
            psa10_price_change: format_percent(Some(self.psa10_price.change)),
            sales_volume_old: format_count(self.sales_volume.old),
            sales_volume_new: format_count(self.sales_volume.new),
            sales_volume_change: format_percent(Some(self.sales_volume.change)),
        }
    }
}

/// `$1,234.56`, `-$40.00`, or `N/A`.
pub fn format_currency(value: Option<f64>) -> String {
    match value.filter(|v| v.is_finite()) {
        Some(v) => {
            let (sign, digits) = rounded(v, 2);
            format!("{}${}", sign, group_thousands(&digits))
        }
        None => MISSING_PLACEHOLDER.to_string(),
    }
}

/// `1,234` (rounded to a whole number), or `N/A`.
pub fn format_count(value: Option<f64>) -> String {
    match value.filter(|v| v.is_finite()) {
        Some(v) => {
            let (sign, digits) = rounded(v, 0);
            format!("{}{}", sign, group_thousands(&digits))
        }
        None => MISSING_PLACEHOLDER.to_string(),
    }
}

/// `12.34%`, or `N/A`.
pub fn format_percent(value: Option<f64>) -> String {
    match value.filter(|v| v.is_finite()) {
        Some(v) => {
            let (sign, digits) = rounded(v, 2);
            format!("{}{}%", sign, digits)
        }
        None => MISSING_PLACEHOLDER.to_string(),
    }
}

/// Round `|v|` to `decimals` places. The sign is `-` only if the rounded
/// magnitude is non-zero, so `-0.003` renders as `0.00`.
fn rounded(v: f64, decimals: usize) -> (&'static str, String) {
    let digits = format!("{:.*}", decimals, v.abs());
    let is_zero = digits.chars().all(|c| c == '0' || c == '.');
    let sign = if v < 0.0 && !is_zero { "-" } else { "" };
    (sign, digits)
}

/// Insert `,` separators into the integer part of an unsigned decimal string.
fn group_thousands(digits: &str) -> String {
    let (int_part, frac_part) = match digits.split_once('.') {
        Some((i, f)) => (i, Some(f)),
        None => (digits, None),
    };

    let mut grouped = String::with_capacity(int_part.len() + int_part.len() / 3);
    for (i, c) in int_part.chars().enumerate() {
        if i > 0 && (int_part.len() - i) % 3 == 0 {
            grouped.push(',');
        }
        grouped.push(c);
    }

    match frac_part {
        Some(f) => format!("{}.{}", grouped, f),
        None => grouped,
    }
}
