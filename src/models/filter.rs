use std::collections::BTreeSet;

use serde::{Deserialize, Serialize};

use crate::config::DEFAULT_LANGUAGE_MARKER;

// ---------------------------------------------------------------------------
// NumericRange: Inclusive bounds on a numeric field
// ---------------------------------------------------------------------------

#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct NumericRange {
    pub min: f64,
    pub max: f64,
}

impl NumericRange {
    pub fn new(min: f64, max: f64) -> Self {
        Self { min, max }
    }

    /// Inclusive on both ends. A missing value is never contained.
    pub fn contains(&self, value: Option<f64>) -> bool {
        match value {
            Some(v) => v >= self.min && v <= self.max,
            None => false,
        }
    }
}

// ---------------------------------------------------------------------------
// LanguageRule: Include-only / exclude / all toggle on `console_name`
// ---------------------------------------------------------------------------

#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case", tag = "mode", content = "marker")]
pub enum LanguageRule {
    #[default]
    All,
    Only(String),
    Exclude(String),
}

impl LanguageRule {
    /// Keep only Japanese-language sets.
    pub fn only_japanese() -> Self {
        LanguageRule::Only(DEFAULT_LANGUAGE_MARKER.to_string())
    }

    /// Drop Japanese-language sets.
    pub fn exclude_japanese() -> Self {
        LanguageRule::Exclude(DEFAULT_LANGUAGE_MARKER.to_string())
    }
}

// ---------------------------------------------------------------------------
// FilterSpec
// ---------------------------------------------------------------------------

/// Declarative filter over a normalized snapshot.
///
/// All fields are optional. `None`, an empty set, an empty search string and
/// [`LanguageRule::All`] each mean "no restriction" for that predicate. In
/// particular an empty `selected_sets` matches every set, not none.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct FilterSpec {
    pub loose_price: Option<NumericRange>,
    pub psa10_price: Option<NumericRange>,
    pub grading_profitability: Option<NumericRange>,
    pub min_sales_volume: Option<u64>,
    #[serde(default)]
    pub release_years: BTreeSet<i32>,
    #[serde(default)]
    pub selected_sets: BTreeSet<String>,
    pub name_search: Option<String>,
    #[serde(default)]
    pub language: LanguageRule,
}

impl FilterSpec {
    /// True if no predicate is active.
    pub fn is_unrestricted(&self) -> bool {
        self.loose_price.is_none()
            && self.psa10_price.is_none()
            && self.grading_profitability.is_none()
            && self.min_sales_volume.is_none()
            && self.release_years.is_empty()
            && self.selected_sets.is_empty()
            && self.name_search.as_deref().map_or(true, str::is_empty)
            && self.language == LanguageRule::All
    }
}
