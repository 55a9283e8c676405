//! Per-series export pipeline: select, enumerate, write.

use std::path::PathBuf;
use std::time::Instant;

use anyhow::{Context, Result, bail};
use sku_catalog::{expected_count, records};
use sku_output::write_catalog_file;
use sku_standards::{SeriesEntry, SeriesRegistry};
use tracing::{info, info_span, warn};

use crate::types::SeriesSummary;

#[derive(Debug, Clone)]
pub struct ExportOptions {
    pub output_dir: PathBuf,
    pub dry_run: bool,
}

/// Resolve requested series codes, or every series in manifest order when none are given.
///
/// Codes match case-insensitively; repeated codes are exported once.
pub fn select_series<'a>(
    registry: &'a SeriesRegistry,
    codes: &[String],
) -> Result<Vec<&'a SeriesEntry>> {
    if codes.is_empty() {
        return Ok(registry.entries().iter().collect());
    }
    let mut selected: Vec<&SeriesEntry> = Vec::with_capacity(codes.len());
    for code in codes {
        let Some(entry) = registry.get(code) else {
            bail!(
                "unknown series '{code}' (known: {})",
                registry.codes().join(", ")
            );
        };
        if !selected.iter().any(|existing| existing.code == entry.code) {
            selected.push(entry);
        }
    }
    Ok(selected)
}

/// Enumerate one series and write (or, for dry runs, count) its catalog.
pub fn export_series(entry: &SeriesEntry, options: &ExportOptions) -> Result<SeriesSummary> {
    let span = info_span!("series", code = %entry.code);
    let _guard = span.enter();
    let start = Instant::now();
    let spec = &entry.spec;

    let output = if options.dry_run {
        None
    } else {
        Some(options.output_dir.join(entry.file_name()))
    };

    let rows = match &output {
        Some(path) => {
            write_catalog_file(path, records(spec))
                .with_context(|| format!("export {} catalog", entry.code))?
                .rows
        }
        None => records(spec).count(),
    };

    let expected = expected_count(spec);
    if rows != expected {
        warn!(rows, expected, "row count differs from closed-form count");
    }

    info!(
        rows,
        excluded_pairs = spec.excluded_in_grid(),
        path = ?output,
        duration_ms = start.elapsed().as_millis(),
        "series complete"
    );

    Ok(SeriesSummary {
        code: entry.code.clone(),
        name: spec.name().to_string(),
        sizes: spec.sizes().len(),
        ratios: spec.ratios().len(),
        excluded_pairs: spec.excluded_in_grid(),
        rows,
        output,
    })
}
