//! Integration tests for enumeration and SKU formatting.

use std::collections::BTreeSet;

use proptest::prelude::*;
use sku_catalog::{combinations, expected_count, records};
use sku_model::{ExclusionRule, ExclusionTable, SeriesSpec};

fn single_size_series(exclusions: ExclusionTable) -> SeriesSpec {
    SeriesSpec::builder("AB Series")
        .sizes(["AB042"])
        .ratio_tables(&[3], &[])
        .shaft_options(["S1", "S2", "S3"])
        .backlash_options(["P0", "P1", "P2"])
        .exclusions(exclusions)
        .build()
        .expect("valid series")
}

#[test]
fn single_pair_yields_nine_skus() {
    let spec = single_size_series(ExclusionTable::new());
    let skus: Vec<String> = records(&spec).map(|r| r.sku).collect();
    assert_eq!(
        skus,
        vec![
            "AB042-003-S1-P0",
            "AB042-003-S1-P1",
            "AB042-003-S1-P2",
            "AB042-003-S2-P0",
            "AB042-003-S2-P1",
            "AB042-003-S2-P2",
            "AB042-003-S3-P0",
            "AB042-003-S3-P1",
            "AB042-003-S3-P2",
        ]
    );
}

#[test]
fn excluded_pair_yields_nothing_regardless_of_options() {
    let rule = ExclusionRule::point("AB042", 3);
    let spec = single_size_series(ExclusionTable::from_rules([&rule]));
    assert_eq!(records(&spec).count(), 0);
    assert_eq!(expected_count(&spec), 0);
}

#[test]
fn shaftless_series_uses_absent_marker() {
    let spec = SeriesSpec::builder("AD Series")
        .sizes(["AD047"])
        .ratio_tables(&[4], &[16])
        .backlash_options(["P0", "P1"])
        .build()
        .expect("valid series");
    let rows: Vec<_> = records(&spec).collect();
    assert_eq!(rows.len(), 4);
    assert_eq!(rows[3].sku, "AD047-016-P1");
    for row in &rows {
        assert_eq!(row.shaft_option, "N/A");
        assert_eq!(row.sku.matches('-').count(), 2);
    }
}

#[test]
fn empty_sizes_or_ratios_yield_empty_catalog() {
    let no_sizes = SeriesSpec::builder("X")
        .ratio_tables(&[3], &[])
        .backlash_options(["P0"])
        .build()
        .expect("valid series");
    let no_ratios = SeriesSpec::builder("X")
        .sizes(["X1"])
        .backlash_options(["P0"])
        .build()
        .expect("valid series");
    assert_eq!(combinations(&no_sizes).count(), 0);
    assert_eq!(combinations(&no_ratios).count(), 0);
}

#[test]
fn wide_ratio_renders_full_width() {
    let spec = SeriesSpec::builder("X")
        .sizes(["X1"])
        .ratio_tables(&[1000], &[])
        .backlash_options(["P0"])
        .build()
        .expect("valid series");
    let row = records(&spec).next().expect("one row");
    assert_eq!(row.ratio, "1000");
    assert_eq!(row.sku, "X1-1000-P0");
}

fn arb_series() -> impl Strategy<Value = SeriesSpec> {
    (
        prop::collection::btree_set("[A-Z]{2}[0-9]{3}A?", 0..6),
        prop::collection::vec(1u32..250, 0..12),
        prop::collection::vec(1u32..250, 0..12),
        0usize..4,
        0usize..4,
        prop::collection::vec((0usize..8, 1u32..250), 0..20),
    )
        .prop_map(|(sizes, one, two, shafts, backlash, picks)| {
            let sizes: Vec<String> = sizes.into_iter().collect();
            let pairs: Vec<(String, u32)> = picks
                .into_iter()
                .map(|(idx, ratio)| {
                    let size = sizes
                        .get(idx)
                        .cloned()
                        .unwrap_or_else(|| format!("ZZ{idx:03}"));
                    (size, ratio)
                })
                .collect();
            SeriesSpec::builder("Prop Series")
                .sizes(sizes)
                .ratio_tables(&one, &two)
                .shaft_options((1..=shafts).map(|n| format!("S{n}")))
                .backlash_options((0..backlash).map(|n| format!("P{n}")))
                .exclusions(pairs.into_iter().collect())
                .build()
                .expect("generated series is valid")
        })
}

proptest! {
    #[test]
    fn count_matches_closed_form(spec in arb_series()) {
        let grid: usize = spec
            .sizes()
            .iter()
            .map(|size| spec.ratios().iter().filter(|&r| !spec.is_excluded(size, r)).count())
            .sum();
        let expected = grid
            * spec.shaft_options().len().max(1)
            * spec.backlash_options().len();
        prop_assert_eq!(combinations(&spec).count(), expected);
        prop_assert_eq!(expected_count(&spec), expected);
    }

    #[test]
    fn skus_are_pairwise_distinct(spec in arb_series()) {
        let skus: Vec<String> = records(&spec).map(|r| r.sku).collect();
        let unique: BTreeSet<&String> = skus.iter().collect();
        prop_assert_eq!(unique.len(), skus.len());
    }

    #[test]
    fn enumeration_is_reproducible(spec in arb_series()) {
        let first: Vec<_> = records(&spec).collect();
        let second: Vec<_> = records(&spec).collect();
        prop_assert_eq!(first, second);
    }

    #[test]
    fn order_is_size_major_then_ratio_ascending(spec in arb_series()) {
        let position = |size: &str| spec.sizes().iter().position(|s| s == size);
        let keys: Vec<(Option<usize>, u32)> = combinations(&spec)
            .map(|c| (position(c.size), c.ratio))
            .collect();
        prop_assert!(keys.windows(2).all(|w| w[0] <= w[1]));
        prop_assert!(combinations(&spec).all(|c| !spec.is_excluded(c.size, c.ratio)));
    }
}
