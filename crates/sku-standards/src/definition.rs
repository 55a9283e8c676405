//! TOML schema of a series definition file.
//!
//! A definition is configuration data, not engine logic: it lists the sizes,
//! both ratio tables, the option codes and the exclusion rule groups exactly
//! as the vendor catalog prints them. [`SeriesDefinition::to_spec`] resolves
//! stage references and hands the result to `sku-model` for validation.

#![deny(unsafe_code)]

use serde::{Deserialize, Serialize};
use sku_model::{ExclusionRule, ExclusionTable, ModelError, RatioSet, SeriesSpec};

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(deny_unknown_fields)]
pub struct SeriesDefinition {
    pub series: SeriesHeader,
    pub ratios: RatioTables,
    pub options: OptionTables,
    #[serde(default)]
    pub exclusions: Vec<RuleDefinition>,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(deny_unknown_fields)]
pub struct SeriesHeader {
    /// Short family code, also the manifest key (`AB`, `ADR`, ...).
    pub code: String,
    /// Label written to the `Series` column.
    pub name: String,
    /// Export file stem.
    pub catalog: String,
    #[serde(default)]
    pub source: Option<String>,
    pub sizes: Vec<String>,
}

#[derive(Debug, Clone, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(deny_unknown_fields)]
pub struct RatioTables {
    #[serde(default)]
    pub one_stage: Vec<u32>,
    #[serde(default)]
    pub two_stage: Vec<u32>,
}

#[derive(Debug, Clone, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(deny_unknown_fields)]
pub struct OptionTables {
    #[serde(default)]
    pub shaft: Vec<String>,
    #[serde(default)]
    pub backlash: Vec<String>,
}

/// Which ratio table a rule refers to.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum Stage {
    OneStage,
    TwoStage,
}

/// Ratios named by a rule: a whole stage table or an explicit list.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(untagged)]
pub enum RatioSelector {
    Stage(Stage),
    List(Vec<u32>),
}

impl RatioSelector {
    pub fn resolve(&self, tables: &RatioTables) -> Vec<u32> {
        match self {
            Self::Stage(Stage::OneStage) => tables.one_stage.clone(),
            Self::Stage(Stage::TwoStage) => tables.two_stage.clone(),
            Self::List(ratios) => ratios.clone(),
        }
    }
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(tag = "kind", rename_all = "snake_case")]
pub enum RuleDefinition {
    RatioBlanket {
        ratios: RatioSelector,
        sizes: Vec<String>,
        #[serde(default)]
        note: Option<String>,
    },
    SizeBlanket {
        size: String,
        ratios: RatioSelector,
        #[serde(default)]
        note: Option<String>,
    },
    Point {
        size: String,
        ratio: u32,
        #[serde(default)]
        note: Option<String>,
    },
}

impl RuleDefinition {
    pub fn note(&self) -> Option<&str> {
        match self {
            Self::RatioBlanket { note, .. }
            | Self::SizeBlanket { note, .. }
            | Self::Point { note, .. } => note.as_deref(),
        }
    }

    pub fn resolve(&self, tables: &RatioTables) -> ExclusionRule {
        match self {
            Self::RatioBlanket { ratios, sizes, .. } => {
                ExclusionRule::ratio_blanket(ratios.resolve(tables), sizes.iter().cloned())
            }
            Self::SizeBlanket { size, ratios, .. } => {
                ExclusionRule::size_blanket(size.clone(), ratios.resolve(tables))
            }
            Self::Point { size, ratio, .. } => ExclusionRule::point(size.clone(), *ratio),
        }
    }
}

impl SeriesDefinition {
    /// Exclusion rules with stage references resolved, in file order.
    pub fn exclusion_rules(&self) -> Vec<ExclusionRule> {
        self.exclusions
            .iter()
            .map(|rule| rule.resolve(&self.ratios))
            .collect()
    }

    /// Build the validated engine input for this definition.
    ///
    /// # Errors
    ///
    /// Returns the [`ModelError`] raised by series validation.
    pub fn to_spec(&self) -> Result<SeriesSpec, ModelError> {
        let rules = self.exclusion_rules();
        SeriesSpec::builder(self.series.name.clone())
            .sizes(self.series.sizes.iter().cloned())
            .ratios(RatioSet::from_stages(
                &self.ratios.one_stage,
                &self.ratios.two_stage,
            ))
            .shaft_options(self.options.shaft.iter().cloned())
            .backlash_options(self.options.backlash.iter().cloned())
            .exclusions(ExclusionTable::from_rules(&rules))
            .build()
    }
}
