//! Exclusion rules and the combined exclusion table.
//!
//! A series declares its unavailable (size, ratio) pairs as independent rule
//! groups. Rules only ever add pairs; the table is the union of all of them and
//! is frozen once built.

use std::collections::{BTreeMap, BTreeSet};

use serde::{Deserialize, Serialize};

/// One group of excluded (size, ratio) pairs.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(tag = "kind", rename_all = "snake_case")]
pub enum ExclusionRule {
    /// Every listed ratio is unavailable for every listed size.
    RatioBlanket { ratios: Vec<u32>, sizes: Vec<String> },
    /// The listed ratios are unavailable for a single size.
    SizeBlanket { size: String, ratios: Vec<u32> },
    /// A single unavailable combination.
    Point { size: String, ratio: u32 },
}

impl ExclusionRule {
    pub fn ratio_blanket<S: Into<String>>(
        ratios: impl IntoIterator<Item = u32>,
        sizes: impl IntoIterator<Item = S>,
    ) -> Self {
        Self::RatioBlanket {
            ratios: ratios.into_iter().collect(),
            sizes: sizes.into_iter().map(Into::into).collect(),
        }
    }

    pub fn size_blanket(size: impl Into<String>, ratios: impl IntoIterator<Item = u32>) -> Self {
        Self::SizeBlanket {
            size: size.into(),
            ratios: ratios.into_iter().collect(),
        }
    }

    pub fn point(size: impl Into<String>, ratio: u32) -> Self {
        Self::Point {
            size: size.into(),
            ratio,
        }
    }

    /// Short label used in logs and doctor findings.
    pub fn kind(&self) -> &'static str {
        match self {
            Self::RatioBlanket { .. } => "ratio_blanket",
            Self::SizeBlanket { .. } => "size_blanket",
            Self::Point { .. } => "point",
        }
    }

    /// Expand the rule into the pairs it contributes, ratio-major for blankets.
    pub fn pairs(&self) -> Vec<(&str, u32)> {
        match self {
            Self::RatioBlanket { ratios, sizes } => ratios
                .iter()
                .flat_map(|&ratio| sizes.iter().map(move |size| (size.as_str(), ratio)))
                .collect(),
            Self::SizeBlanket { size, ratios } => {
                ratios.iter().map(|&ratio| (size.as_str(), ratio)).collect()
            }
            Self::Point { size, ratio } => vec![(size.as_str(), *ratio)],
        }
    }
}

/// Set of (size, ratio) pairs that must never be enumerated.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct ExclusionTable {
    by_size: BTreeMap<String, BTreeSet<u32>>,
}

impl ExclusionTable {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn from_rules<'a>(rules: impl IntoIterator<Item = &'a ExclusionRule>) -> Self {
        let mut table = Self::new();
        for rule in rules {
            for (size, ratio) in rule.pairs() {
                table.insert(size, ratio);
            }
        }
        table
    }

    fn insert(&mut self, size: &str, ratio: u32) -> bool {
        self.by_size
            .entry(size.to_string())
            .or_default()
            .insert(ratio)
    }

    pub fn is_excluded(&self, size: &str, ratio: u32) -> bool {
        self.by_size
            .get(size)
            .is_some_and(|ratios| ratios.contains(&ratio))
    }

    /// Number of distinct pairs, including ones outside the series grid.
    pub fn len(&self) -> usize {
        self.by_size.values().map(BTreeSet::len).sum()
    }

    pub fn is_empty(&self) -> bool {
        self.by_size.is_empty()
    }

    /// All pairs ordered by size identifier then ratio.
    pub fn iter(&self) -> impl Iterator<Item = (&str, u32)> + '_ {
        self.by_size
            .iter()
            .flat_map(|(size, ratios)| ratios.iter().map(move |&ratio| (size.as_str(), ratio)))
    }
}

impl<S: Into<String>> FromIterator<(S, u32)> for ExclusionTable {
    fn from_iter<I: IntoIterator<Item = (S, u32)>>(iter: I) -> Self {
        let mut table = Self::new();
        for (size, ratio) in iter {
            let size: String = size.into();
            table.insert(&size, ratio);
        }
        table
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn ratio_blanket_covers_cross_product() {
        let rule = ExclusionRule::ratio_blanket([3, 4], ["AB060A", "AB090A"]);
        let table = ExclusionTable::from_rules([&rule]);
        assert_eq!(table.len(), 4);
        assert!(table.is_excluded("AB060A", 3));
        assert!(table.is_excluded("AB090A", 4));
        assert!(!table.is_excluded("AB060", 3));
    }

    #[test]
    fn duplicate_pairs_are_idempotent() {
        let rules = [
            ExclusionRule::point("AFR180", 6),
            ExclusionRule::point("AFR180", 6),
            ExclusionRule::size_blanket("AFR180", [6, 12]),
        ];
        let table = ExclusionTable::from_rules(&rules);
        assert_eq!(table.len(), 2);
        assert_eq!(
            table.iter().collect::<Vec<_>>(),
            vec![("AFR180", 6), ("AFR180", 12)]
        );
    }

    #[test]
    fn pairs_for_each_rule_shape() {
        assert_eq!(
            ExclusionRule::size_blanket("ADR047", [140, 200]).pairs(),
            vec![("ADR047", 140), ("ADR047", 200)]
        );
        assert_eq!(
            ExclusionRule::point("AFX100", 6).pairs(),
            vec![("AFX100", 6)]
        );
        assert!(ExclusionRule::ratio_blanket([], ["A"]).pairs().is_empty());
    }

    #[test]
    fn empty_table_excludes_nothing() {
        let table = ExclusionTable::new();
        assert!(table.is_empty());
        assert!(!table.is_excluded("AD047", 4));
    }
}
