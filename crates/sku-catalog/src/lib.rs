//! Catalog combination engine.
//!
//! [`combinations`] walks a [`SeriesSpec`] in its canonical order and
//! [`to_record`] turns each combination into an exported row. [`records`]
//! chains the two for writers.

pub mod enumerate;
pub mod sku;

use sku_model::{CatalogRecord, SeriesSpec};

pub use enumerate::{combinations, expected_count};
pub use sku::{format_ratio, format_sku, to_record};

/// Lazily produce every catalog record of a series in enumeration order.
pub fn records(spec: &SeriesSpec) -> impl Iterator<Item = CatalogRecord> + '_ {
    tracing::debug!(
        series = spec.name(),
        sizes = spec.sizes().len(),
        ratios = spec.ratios().len(),
        excluded = spec.excluded_in_grid(),
        "enumerating series"
    );
    combinations(spec).map(move |combination| to_record(spec.name(), &combination))
}
