//! Data model for gearbox product-code catalogs.
//!
//! A [`SeriesSpec`] describes one product family: its frame sizes, the merged
//! [`RatioSet`], the optional shaft dimension, the backlash classes and the
//! [`ExclusionTable`] of combinations that are not manufactured.

pub mod error;
pub mod exclusion;
pub mod ratio;
pub mod record;
pub mod series;

pub use error::{ModelError, Result};
pub use exclusion::{ExclusionRule, ExclusionTable};
pub use ratio::RatioSet;
pub use record::{ABSENT_MARKER, CATALOG_HEADER, CatalogRecord, Combination, OptionDimension};
pub use series::{SeriesSpec, SeriesSpecBuilder};
