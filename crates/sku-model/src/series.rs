//! Declarative definition of one gearbox product family.

use std::collections::BTreeSet;

use crate::error::{ModelError, Result};
use crate::exclusion::ExclusionTable;
use crate::ratio::RatioSet;
use crate::record::OptionDimension;

/// A validated, read-only series definition.
///
/// Construct through [`SeriesSpec::builder`]. Ratio ordering and uniqueness
/// are guaranteed by [`RatioSet`]; everything else the enumerator relies on is
/// checked once in [`SeriesSpecBuilder::build`].
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct SeriesSpec {
    name: String,
    sizes: Vec<String>,
    ratios: RatioSet,
    shaft_options: Vec<String>,
    backlash_options: Vec<String>,
    exclusions: ExclusionTable,
}

impl SeriesSpec {
    pub fn builder(name: impl Into<String>) -> SeriesSpecBuilder {
        SeriesSpecBuilder {
            name: name.into(),
            sizes: Vec::new(),
            ratios: RatioSet::default(),
            shaft_options: Vec::new(),
            backlash_options: Vec::new(),
            exclusions: ExclusionTable::default(),
        }
    }

    pub fn name(&self) -> &str {
        &self.name
    }

    pub fn sizes(&self) -> &[String] {
        &self.sizes
    }

    pub fn ratios(&self) -> &RatioSet {
        &self.ratios
    }

    pub fn shaft_options(&self) -> &[String] {
        &self.shaft_options
    }

    pub fn backlash_options(&self) -> &[String] {
        &self.backlash_options
    }

    pub fn exclusions(&self) -> &ExclusionTable {
        &self.exclusions
    }

    pub fn has_shaft(&self) -> bool {
        !self.shaft_options.is_empty()
    }

    pub fn is_excluded(&self, size: &str, ratio: u32) -> bool {
        self.exclusions.is_excluded(size, ratio)
    }

    /// Size of the unfiltered size x ratio grid.
    pub fn grid_len(&self) -> usize {
        self.sizes.len() * self.ratios.len()
    }

    /// Number of excluded pairs that actually fall inside the size x ratio grid.
    pub fn excluded_in_grid(&self) -> usize {
        self.sizes
            .iter()
            .map(|size| {
                self.ratios
                    .iter()
                    .filter(|&ratio| self.is_excluded(size, ratio))
                    .count()
            })
            .sum()
    }
}

/// Builder for [`SeriesSpec`].
#[derive(Debug, Clone)]
pub struct SeriesSpecBuilder {
    name: String,
    sizes: Vec<String>,
    ratios: RatioSet,
    shaft_options: Vec<String>,
    backlash_options: Vec<String>,
    exclusions: ExclusionTable,
}

impl SeriesSpecBuilder {
    #[must_use]
    pub fn sizes<S: Into<String>>(mut self, sizes: impl IntoIterator<Item = S>) -> Self {
        self.sizes = sizes.into_iter().map(Into::into).collect();
        self
    }

    #[must_use]
    pub fn ratios(mut self, ratios: RatioSet) -> Self {
        self.ratios = ratios;
        self
    }

    /// Shorthand for `ratios(RatioSet::from_stages(..))`.
    #[must_use]
    pub fn ratio_tables(self, one_stage: &[u32], two_stage: &[u32]) -> Self {
        self.ratios(RatioSet::from_stages(one_stage, two_stage))
    }

    #[must_use]
    pub fn shaft_options<S: Into<String>>(mut self, options: impl IntoIterator<Item = S>) -> Self {
        self.shaft_options = options.into_iter().map(Into::into).collect();
        self
    }

    #[must_use]
    pub fn backlash_options<S: Into<String>>(
        mut self,
        options: impl IntoIterator<Item = S>,
    ) -> Self {
        self.backlash_options = options.into_iter().map(Into::into).collect();
        self
    }

    #[must_use]
    pub fn exclusions(mut self, exclusions: ExclusionTable) -> Self {
        self.exclusions = exclusions;
        self
    }

    /// Validate and freeze the definition.
    ///
    /// # Errors
    ///
    /// Returns a [`ModelError`] for an empty name, empty, malformed or
    /// duplicate size identifiers, a zero ratio, or empty, malformed or
    /// duplicate option codes.
    pub fn build(self) -> Result<SeriesSpec> {
        let name = self.name.trim().to_string();
        if name.is_empty() {
            return Err(ModelError::EmptySeriesName);
        }

        let mut seen = BTreeSet::new();
        for size in &self.sizes {
            if size.is_empty() {
                return Err(ModelError::EmptySize {
                    series: name.clone(),
                });
            }
            if !is_code_token(size) {
                return Err(ModelError::InvalidSize {
                    series: name.clone(),
                    size: size.clone(),
                });
            }
            if !seen.insert(size.as_str()) {
                return Err(ModelError::DuplicateSize {
                    series: name.clone(),
                    size: size.clone(),
                });
            }
        }

        if let Some(ratio) = self.ratios.iter().find(|&ratio| ratio == 0) {
            return Err(ModelError::InvalidRatio {
                series: name.clone(),
                ratio,
            });
        }

        validate_options(&name, OptionDimension::Shaft, &self.shaft_options)?;
        validate_options(&name, OptionDimension::Backlash, &self.backlash_options)?;

        Ok(SeriesSpec {
            name,
            sizes: self.sizes,
            ratios: self.ratios,
            shaft_options: self.shaft_options,
            backlash_options: self.backlash_options,
            exclusions: self.exclusions,
        })
    }
}

fn validate_options(series: &str, dimension: OptionDimension, options: &[String]) -> Result<()> {
    let mut seen = BTreeSet::new();
    for code in options {
        if code.is_empty() {
            return Err(ModelError::EmptyOption {
                series: series.to_string(),
                dimension,
            });
        }
        if !is_code_token(code) {
            return Err(ModelError::InvalidOption {
                series: series.to_string(),
                dimension,
                code: code.clone(),
            });
        }
        if !seen.insert(code.as_str()) {
            return Err(ModelError::DuplicateOption {
                series: series.to_string(),
                dimension,
                code: code.clone(),
            });
        }
    }
    Ok(())
}

/// SKU segments are hyphen-joined, so a segment must not contain one.
fn is_code_token(value: &str) -> bool {
    !value.chars().any(|c| c == '-' || c.is_whitespace())
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::exclusion::ExclusionRule;

    fn ab_builder() -> SeriesSpecBuilder {
        SeriesSpec::builder("AB Series")
            .sizes(["AB042", "AB060", "AB060A"])
            .ratio_tables(&[3, 4, 5], &[12, 15])
            .shaft_options(["S1", "S2", "S3"])
            .backlash_options(["P0", "P1", "P2"])
    }

    #[test]
    fn builds_valid_series() {
        let rule = ExclusionRule::ratio_blanket([3, 4, 5], ["AB060A"]);
        let spec = ab_builder()
            .exclusions(ExclusionTable::from_rules([&rule]))
            .build()
            .unwrap();
        assert_eq!(spec.name(), "AB Series");
        assert_eq!(spec.ratios().as_slice(), &[3, 4, 5, 12, 15]);
        assert_eq!(spec.grid_len(), 15);
        assert_eq!(spec.excluded_in_grid(), 3);
        assert!(spec.has_shaft());
    }

    #[test]
    fn exclusions_outside_grid_are_not_counted() {
        let rules = [
            ExclusionRule::point("AB999", 3),
            ExclusionRule::point("AB042", 7),
        ];
        let spec = ab_builder()
            .exclusions(ExclusionTable::from_rules(&rules))
            .build()
            .unwrap();
        assert_eq!(spec.exclusions().len(), 2);
        assert_eq!(spec.excluded_in_grid(), 0);
    }

    #[test]
    fn rejects_duplicate_size() {
        let err = ab_builder()
            .sizes(["AB042", "AB042"])
            .build()
            .unwrap_err();
        assert_eq!(
            err,
            ModelError::DuplicateSize {
                series: "AB Series".to_string(),
                size: "AB042".to_string(),
            }
        );
    }

    #[test]
    fn rejects_zero_ratio() {
        let err = ab_builder().ratio_tables(&[0, 3], &[]).build().unwrap_err();
        assert!(matches!(err, ModelError::InvalidRatio { ratio: 0, .. }));
    }

    #[test]
    fn rejects_hyphenated_option() {
        let err = ab_builder()
            .backlash_options(["P-0"])
            .build()
            .unwrap_err();
        assert!(matches!(
            err,
            ModelError::InvalidOption {
                dimension: OptionDimension::Backlash,
                ..
            }
        ));
    }

    #[test]
    fn rejects_blank_name() {
        let err = SeriesSpec::builder("  ").build().unwrap_err();
        assert_eq!(err, ModelError::EmptySeriesName);
    }

    #[test]
    fn empty_dimensions_are_allowed() {
        let spec = SeriesSpec::builder("Empty").build().unwrap();
        assert!(spec.sizes().is_empty());
        assert!(!spec.has_shaft());
        assert_eq!(spec.grid_len(), 0);
    }
}
