//! Merged ratio tables.

use std::collections::BTreeSet;

use serde::{Deserialize, Serialize};

/// Ascending, de-duplicated set of reduction ratios for one series.
///
/// Built from the one-stage and two-stage tables of a catalog. The tables may
/// overlap (a ratio offered in both stages appears once).
///
/// Every constructor, deserialization included, normalizes its input.
#[derive(Debug, Clone, Default, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(from = "Vec<u32>", into = "Vec<u32>")]
pub struct RatioSet(Vec<u32>);

impl RatioSet {
    /// Union of both stage tables, sorted ascending.
    pub fn from_stages(one_stage: &[u32], two_stage: &[u32]) -> Self {
        let merged: BTreeSet<u32> = one_stage.iter().chain(two_stage).copied().collect();
        Self(merged.into_iter().collect())
    }

    pub fn as_slice(&self) -> &[u32] {
        &self.0
    }

    pub fn iter(&self) -> impl Iterator<Item = u32> + '_ {
        self.0.iter().copied()
    }

    pub fn contains(&self, ratio: u32) -> bool {
        self.0.binary_search(&ratio).is_ok()
    }

    pub fn len(&self) -> usize {
        self.0.len()
    }

    pub fn is_empty(&self) -> bool {
        self.0.is_empty()
    }
}

impl FromIterator<u32> for RatioSet {
    fn from_iter<I: IntoIterator<Item = u32>>(iter: I) -> Self {
        let merged: BTreeSet<u32> = iter.into_iter().collect();
        Self(merged.into_iter().collect())
    }
}

impl From<Vec<u32>> for RatioSet {
    fn from(ratios: Vec<u32>) -> Self {
        ratios.into_iter().collect()
    }
}

impl From<RatioSet> for Vec<u32> {
    fn from(set: RatioSet) -> Self {
        set.0
    }
}
