//! Filter engine and FilterBuilder tests.

mod common;

use card_market_sdk::{apply_filters, FilterBuilder, FilterSpec, LanguageRule, NumericRange};

// ---------------------------------------------------------------------------
// Pass-through
// ---------------------------------------------------------------------------

#[test]
fn unset_spec_returns_input_unchanged() {
    let snap = common::catalog();
    let spec = FilterSpec::default();
    assert!(spec.is_unrestricted());

    let filtered = apply_filters(&snap, &spec);
    assert_eq!(filtered, snap);
}

#[test]
fn filtering_is_idempotent() {
    let snap = common::catalog();
    let spec = FilterBuilder::new()
        .loose_price(10.0, 400.0)
        .language(LanguageRule::Exclude("japanese".to_string()))
        .build();

    let once = apply_filters(&snap, &spec);
    let twice = apply_filters(&once, &spec);
    assert_eq!(once, twice);
    assert_eq!(once.ids(), vec!["101", "102", "301"]);
}

#[test]
fn input_snapshot_is_not_modified() {
    let snap = common::catalog();
    let before = snap.clone();
    let _ = apply_filters(&snap, &FilterBuilder::new().min_sales_volume(1000).build());
    assert_eq!(snap, before);
}

// ---------------------------------------------------------------------------
// Numeric ranges
// ---------------------------------------------------------------------------

#[test]
fn ranges_are_inclusive() {
    let snap = common::catalog();
    let spec = FilterBuilder::new().loose_price(12.0, 90.0).build();
    let filtered = apply_filters(&snap, &spec);
    assert_eq!(filtered.ids(), vec!["102", "201", "301"]);
}

#[test]
fn missing_value_fails_active_range() {
    let snap = common::catalog();
    let spec = FilterBuilder::new().psa10_price(0.0, f64::MAX).build();
    let filtered = apply_filters(&snap, &spec);
    assert!(filtered.get("302").is_none());
    assert_eq!(filtered.len(), 4);
}

#[test]
fn profitability_range_uses_zero_fallback() {
    let snap = common::catalog();
    let spec = FilterSpec {
        grading_profitability: Some(NumericRange::new(0.0, 0.0)),
        ..Default::default()
    };
    let filtered = apply_filters(&snap, &spec);
    assert_eq!(filtered.ids(), vec!["302"]);
}

#[test]
fn min_sales_volume_is_lower_bound() {
    let snap = common::catalog();
    let spec = FilterBuilder::new().min_sales_volume(900).build();
    let filtered = apply_filters(&snap, &spec);
    assert_eq!(filtered.ids(), vec!["201", "301"]);
}

// ---------------------------------------------------------------------------
// Set membership
// ---------------------------------------------------------------------------

#[test]
fn empty_selected_sets_matches_all() {
    let snap = common::catalog();
    let spec = FilterBuilder::new().sets(&[]).build();
    assert!(spec.selected_sets.is_empty());
    assert_eq!(apply_filters(&snap, &spec).len(), snap.len());
}

#[test]
fn empty_release_years_matches_all() {
    let snap = common::catalog();
    let spec = FilterBuilder::new().years(&[]).build();
    assert_eq!(apply_filters(&snap, &spec).len(), snap.len());
}

#[test]
fn selected_sets_restrict_to_members() {
    let snap = common::catalog();
    let spec = FilterBuilder::new()
        .sets(&["Pokemon Base Set", "Pokemon Vivid Voltage"])
        .build();
    let filtered = apply_filters(&snap, &spec);
    assert_eq!(filtered.ids(), vec!["101", "102", "301"]);
}

#[test]
fn all_sets_clears_selection() {
    let snap = common::catalog();
    let spec = FilterBuilder::new()
        .sets(&["Pokemon Base Set"])
        .all_sets()
        .build();
    assert_eq!(apply_filters(&snap, &spec).len(), snap.len());
}

#[test]
fn release_years_restrict_to_members() {
    let snap = common::catalog();
    let spec = FilterBuilder::new().years(&[2020, 2023]).build();
    let filtered = apply_filters(&snap, &spec);
    assert_eq!(filtered.ids(), vec!["201", "301"]);
}

// ---------------------------------------------------------------------------
// Substring predicates
// ---------------------------------------------------------------------------

#[test]
fn name_search_is_case_insensitive() {
    let snap = common::catalog();
    let spec = FilterBuilder::new().name_contains("CHARIZARD").build();
    let filtered = apply_filters(&snap, &spec);
    assert_eq!(filtered.ids(), vec!["101", "201"]);
}

#[test]
fn empty_name_search_matches_all() {
    let snap = common::catalog();
    let spec = FilterBuilder::new().name_contains("").build();
    assert!(spec.is_unrestricted());
    assert_eq!(apply_filters(&snap, &spec).len(), snap.len());
}

#[test]
fn language_only_keeps_marked_sets() {
    let snap = common::catalog();
    let spec = FilterBuilder::new()
        .language(LanguageRule::Only("Japanese".to_string()))
        .build();
    let filtered = apply_filters(&snap, &spec);
    assert_eq!(filtered.ids(), vec!["201"]);
}

#[test]
fn language_exclude_keeps_null_console_name() {
    let snap = common::catalog();
    let spec = FilterBuilder::new()
        .language(LanguageRule::Exclude("Japanese".to_string()))
        .build();
    let filtered = apply_filters(&snap, &spec);
    assert_eq!(filtered.ids(), vec!["101", "102", "301", "302"]);
}

#[test]
fn japanese_language_shortcuts() {
    let snap = common::catalog();

    let only = FilterBuilder::new().language(LanguageRule::only_japanese()).build();
    assert_eq!(apply_filters(&snap, &only).ids(), vec!["201"]);

    let exclude = FilterBuilder::new()
        .language(LanguageRule::exclude_japanese())
        .build();
    assert_eq!(
        apply_filters(&snap, &exclude).ids(),
        vec!["101", "102", "301", "302"]
    );
}

#[test]
fn language_all_disables_rule() {
    let snap = common::catalog();
    let spec = FilterBuilder::new().language(LanguageRule::All).build();
    assert_eq!(apply_filters(&snap, &spec).len(), snap.len());
}

// ---------------------------------------------------------------------------
// Combination
// ---------------------------------------------------------------------------

#[test]
fn predicates_are_anded() {
    let snap = common::catalog();
    let spec = FilterBuilder::new()
        .name_contains("charizard")
        .language(LanguageRule::Exclude("Japanese".to_string()))
        .min_sales_volume(100)
        .build();
    let filtered = apply_filters(&snap, &spec);
    assert_eq!(filtered.ids(), vec!["101"]);
}

#[test]
fn builder_sets_every_field() {
    let spec = FilterBuilder::new()
        .loose_price(1.0, 2.0)
        .psa10_price(3.0, 4.0)
        .grading_profitability(5.0, 6.0)
        .min_sales_volume(7)
        .years(&[1999])
        .sets(&["Base"])
        .name_contains("x")
        .language(LanguageRule::Only("Japanese".to_string()))
        .build();

    assert_eq!(spec.loose_price, Some(NumericRange::new(1.0, 2.0)));
    assert_eq!(spec.psa10_price, Some(NumericRange::new(3.0, 4.0)));
    assert_eq!(spec.grading_profitability, Some(NumericRange::new(5.0, 6.0)));
    assert_eq!(spec.min_sales_volume, Some(7));
    assert!(spec.release_years.contains(&1999));
    assert!(spec.selected_sets.contains("Base"));
    assert_eq!(spec.name_search.as_deref(), Some("x"));
    assert!(!spec.is_unrestricted());
}
