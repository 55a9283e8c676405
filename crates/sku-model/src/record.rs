//! Enumerated combinations and the exported catalog record.

use std::fmt;

use serde::{Deserialize, Serialize};

/// Value written to the shaft column when a series has no shaft dimension.
pub const ABSENT_MARKER: &str = "N/A";

/// Fixed column order of every catalog export.
pub const CATALOG_HEADER: [&str; 6] = [
    "Series",
    "Gearbox Size",
    "Ratio",
    "Shaft Option",
    "Backlash",
    "SKU",
];

/// Secondary option dimensions of a series.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum OptionDimension {
    Shaft,
    Backlash,
}

impl fmt::Display for OptionDimension {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Shaft => f.write_str("shaft"),
            Self::Backlash => f.write_str("backlash"),
        }
    }
}

/// One valid (size, ratio, shaft, backlash) tuple, borrowed from its series.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub struct Combination<'a> {
    pub size: &'a str,
    pub ratio: u32,
    /// `None` when the series has no shaft dimension.
    pub shaft: Option<&'a str>,
    pub backlash: &'a str,
}

/// One exported catalog row.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct CatalogRecord {
    #[serde(rename = "Series")]
    pub series: String,
    #[serde(rename = "Gearbox Size")]
    pub size: String,
    #[serde(rename = "Ratio")]
    pub ratio: String,
    #[serde(rename = "Shaft Option")]
    pub shaft_option: String,
    #[serde(rename = "Backlash")]
    pub backlash: String,
    #[serde(rename = "SKU")]
    pub sku: String,
}

impl CatalogRecord {
    /// Fields in [`CATALOG_HEADER`] order.
    pub fn as_row(&self) -> [&str; 6] {
        [
            &self.series,
            &self.size,
            &self.ratio,
            &self.shaft_option,
            &self.backlash,
            &self.sku,
        ]
    }
}
