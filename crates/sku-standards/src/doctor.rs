//! Audit of exclusion-rule data.
//!
//! Exclusion tables are transcribed by hand from vendor catalogs, and the
//! usual mistakes (a size list pasted under the wrong family, a ratio that
//! no size can ship with) are invisible in the generated catalog. The doctor
//! reports them without altering what gets generated.

#![deny(unsafe_code)]

use std::collections::BTreeMap;

use serde::Serialize;
use sku_catalog::expected_count;
use sku_model::{ExclusionRule, SeriesSpec};

use crate::registry::SeriesRegistry;

#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Serialize)]
#[serde(rename_all = "snake_case")]
pub enum FindingKind {
    /// A rule names a size the series does not define.
    UnknownSize,
    /// A rule names a ratio outside the merged ratio set.
    UnknownRatio,
    /// Every pair of a rule is also contributed by another rule.
    RedundantRule,
    /// A ratio that is excluded for every size.
    DeadRatio,
    /// A size with every ratio excluded.
    EmptySize,
}

impl FindingKind {
    pub fn as_str(self) -> &'static str {
        match self {
            Self::UnknownSize => "unknown_size",
            Self::UnknownRatio => "unknown_ratio",
            Self::RedundantRule => "redundant_rule",
            Self::DeadRatio => "dead_ratio",
            Self::EmptySize => "empty_size",
        }
    }
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct Finding {
    pub series: String,
    pub kind: FindingKind,
    pub subject: String,
    pub message: String,
}

#[derive(Debug, Clone, Serialize)]
pub struct SeriesAudit {
    pub code: String,
    pub name: String,
    pub sizes: usize,
    pub ratios: usize,
    pub rules: usize,
    pub excluded_pairs: usize,
    pub rows: usize,
    pub findings: Vec<Finding>,
}

#[derive(Debug, Clone, Serialize)]
pub struct DoctorReport {
    pub schema: String,
    pub schema_version: u32,
    pub series: Vec<SeriesAudit>,
}

impl DoctorReport {
    pub fn from_registry(registry: &SeriesRegistry) -> Self {
        Self {
            schema: "sku-catalog.series-doctor".to_string(),
            schema_version: 1,
            series: registry
                .entries()
                .iter()
                .map(|entry| audit_series(&entry.code, &entry.spec, &entry.rules))
                .collect(),
        }
    }

    pub fn finding_count(&self) -> usize {
        self.series.iter().map(|audit| audit.findings.len()).sum()
    }

    pub fn findings(&self) -> impl Iterator<Item = &Finding> {
        self.series.iter().flat_map(|audit| audit.findings.iter())
    }
}

/// Audit one series against the rules it was built from.
pub fn audit_series(code: &str, spec: &SeriesSpec, rules: &[ExclusionRule]) -> SeriesAudit {
    let mut findings = Vec::new();
    let finding = |kind: FindingKind, subject: String, message: String| Finding {
        series: code.to_string(),
        kind,
        subject,
        message,
    };

    let rule_pairs: Vec<Vec<(&str, u32)>> = rules
        .iter()
        .map(|rule| {
            let mut pairs = rule.pairs();
            pairs.sort_unstable();
            pairs.dedup();
            pairs
        })
        .collect();

    let mut contributors: BTreeMap<(&str, u32), usize> = BTreeMap::new();
    for pairs in &rule_pairs {
        for &pair in pairs {
            *contributors.entry(pair).or_default() += 1;
        }
    }

    for (idx, (rule, pairs)) in rules.iter().zip(&rule_pairs).enumerate() {
        let label = format!("rule #{} ({})", idx + 1, rule.kind());

        let mut unknown_sizes: Vec<&str> = pairs
            .iter()
            .map(|&(size, _)| size)
            .filter(|&size| !spec.sizes().iter().any(|s| s.as_str() == size))
            .collect();
        unknown_sizes.dedup();
        for size in unknown_sizes {
            findings.push(finding(
                FindingKind::UnknownSize,
                size.to_string(),
                format!("{label} excludes size {size}, which is not defined for this series"),
            ));
        }

        let mut unknown_ratios: Vec<u32> = pairs
            .iter()
            .map(|&(_, ratio)| ratio)
            .filter(|&ratio| !spec.ratios().contains(ratio))
            .collect();
        unknown_ratios.sort_unstable();
        unknown_ratios.dedup();
        for ratio in unknown_ratios {
            findings.push(finding(
                FindingKind::UnknownRatio,
                ratio.to_string(),
                format!("{label} excludes ratio {ratio}, which is not in either ratio table"),
            ));
        }

        if !pairs.is_empty() && pairs.iter().all(|pair| contributors[pair] > 1) {
            findings.push(finding(
                FindingKind::RedundantRule,
                label.clone(),
                format!("{label} adds no pair that another rule does not already exclude"),
            ));
        }
    }

    if !spec.sizes().is_empty() {
        for ratio in spec.ratios().iter() {
            if spec.sizes().iter().all(|size| spec.is_excluded(size, ratio)) {
                findings.push(finding(
                    FindingKind::DeadRatio,
                    ratio.to_string(),
                    format!("ratio {ratio} is excluded for every size"),
                ));
            }
        }
    }

    if !spec.ratios().is_empty() {
        for size in spec.sizes() {
            if spec.ratios().iter().all(|ratio| spec.is_excluded(size, ratio)) {
                findings.push(finding(
                    FindingKind::EmptySize,
                    size.clone(),
                    format!("size {size} has every ratio excluded"),
                ));
            }
        }
    }

    SeriesAudit {
        code: code.to_string(),
        name: spec.name().to_string(),
        sizes: spec.sizes().len(),
        ratios: spec.ratios().len(),
        rules: rules.len(),
        excluded_pairs: spec.excluded_in_grid(),
        rows: expected_count(spec),
        findings,
    }
}
