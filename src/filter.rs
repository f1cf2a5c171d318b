//! Filter engine and filter builder.
//!
//! A [`FilterSpec`] is the logical AND of its active predicates. Inactive
//! predicates (unset range, empty selection set, empty search, `LanguageRule::All`)
//! pass every record. Builder methods return `&mut Self` for chaining.
//!
//! # Example
//!
//! ```rust
//! use card_market_sdk::{FilterBuilder, LanguageRule};
//! let spec = FilterBuilder::new()
//!     .psa10_price(0.0, 500.0)
//!     .min_sales_volume(10)
//!     .sets(&["Pokemon Base Set"])
//!     .language(LanguageRule::Exclude("Japanese".to_string()))
//!     .build();
//! assert_eq!(spec.min_sales_volume, Some(10));
//! ```

use std::collections::BTreeSet;

use crate::models::{FilterSpec, LanguageRule, NormalizedRecord, NormalizedSnapshot, NumericRange};

/// Return the records of `snapshot` that satisfy `spec`, in input order.
///
/// The input snapshot is not modified.
pub fn apply_filters(snapshot: &NormalizedSnapshot, spec: &FilterSpec) -> NormalizedSnapshot {
    NormalizedSnapshot::new(
        snapshot
            .iter()
            .filter(|r| spec.matches(r))
            .cloned()
            .collect(),
    )
}

impl FilterSpec {
    /// Evaluate every active predicate against a single record.
    pub fn matches(&self, record: &NormalizedRecord) -> bool {
        let r = &record.record;

        if !range_matches(self.loose_price.as_ref(), r.loose_price) {
            return false;
        }
        if !range_matches(self.psa10_price.as_ref(), r.psa10_price) {
            return false;
        }
        if !range_matches(
            self.grading_profitability.as_ref(),
            Some(record.grading_profitability),
        ) {
            return false;
        }

        if let Some(min) = self.min_sales_volume {
            match r.sales_volume {
                Some(v) if v >= min => {}
                _ => return false,
            }
        }

        // Empty selections mean "all", not "none".
        if !self.release_years.is_empty() && !self.release_years.contains(&record.release_year) {
            return false;
        }
        if !self.selected_sets.is_empty() {
            match r.console_name.as_deref() {
                Some(set) if self.selected_sets.contains(set) => {}
                _ => return false,
            }
        }

        if let Some(term) = self.name_search.as_deref() {
            if !term.is_empty() && !contains_ignore_case(Some(&r.product_name), term) {
                return false;
            }
        }

        match &self.language {
            LanguageRule::All => true,
            LanguageRule::Only(marker) => contains_ignore_case(r.console_name.as_deref(), marker),
            LanguageRule::Exclude(marker) => {
                !contains_ignore_case(r.console_name.as_deref(), marker)
            }
        }
    }
}

fn range_matches(range: Option<&NumericRange>, value: Option<f64>) -> bool {
    match range {
        Some(range) => range.contains(value),
        None => true,
    }
}

fn contains_ignore_case(haystack: Option<&str>, needle: &str) -> bool {
    match haystack {
        Some(h) => h.to_lowercase().contains(&needle.to_lowercase()),
        None => false,
    }
}

// ---------------------------------------------------------------------------
// FilterBuilder
// ---------------------------------------------------------------------------

/// Builds a [`FilterSpec`] one predicate at a time.
#[derive(Debug, Clone, Default)]
pub struct FilterBuilder {
    spec: FilterSpec,
}

impl FilterBuilder {
    /// Create a builder with every predicate unset.
    pub fn new() -> Self {
        Self::default()
    }

    /// Inclusive range on `loose_price`.
    pub fn loose_price(&mut self, min: f64, max: f64) -> &mut Self {
        self.spec.loose_price = Some(NumericRange::new(min, max));
        self
    }

    /// Inclusive range on `psa10_price`.
    pub fn psa10_price(&mut self, min: f64, max: f64) -> &mut Self {
        self.spec.psa10_price = Some(NumericRange::new(min, max));
        self
    }

    /// Inclusive range on `grading_profitability`.
    pub fn grading_profitability(&mut self, min: f64, max: f64) -> &mut Self {
        self.spec.grading_profitability = Some(NumericRange::new(min, max));
        self
    }

    /// Lower bound on `sales_volume`.
    pub fn min_sales_volume(&mut self, min: u64) -> &mut Self {
        self.spec.min_sales_volume = Some(min);
        self
    }

    /// Add release years to the membership set.
    pub fn years(&mut self, years: &[i32]) -> &mut Self {
        self.spec.release_years.extend(years.iter().copied());
        self
    }

    /// Add set names to the membership set.
    pub fn sets(&mut self, sets: &[&str]) -> &mut Self {
        self.spec
            .selected_sets
            .extend(sets.iter().map(|s| s.to_string()));
        self
    }

    /// Case-insensitive substring search on `product_name`.
    pub fn name_contains(&mut self, term: &str) -> &mut Self {
        self.spec.name_search = Some(term.to_string());
        self
    }

    pub fn language(&mut self, rule: LanguageRule) -> &mut Self {
        self.spec.language = rule;
        self
    }

    /// Drop any selected sets, restoring "all sets".
    pub fn all_sets(&mut self) -> &mut Self {
        self.spec.selected_sets = BTreeSet::new();
        self
    }

    /// Build the final spec.
    pub fn build(&self) -> FilterSpec {
        self.spec.clone()
    }
}
