use std::path::Path;

use anyhow::{Context, Result};
use sku_standards::{DoctorReport, SeriesRegistry, resolve_standards_dir};
use tracing::{info, info_span, warn};

use sku_cli::pipeline::{ExportOptions, export_series, select_series};
use sku_cli::types::GenerateResult;

use crate::cli::{CheckArgs, GenerateArgs};
use crate::summary::{print_doctor_report, print_series_table};

fn load_registry(standards_dir: Option<&Path>) -> Result<SeriesRegistry> {
    let dir = resolve_standards_dir(standards_dir);
    let registry = SeriesRegistry::verify_and_load(&dir)
        .with_context(|| format!("load series definitions from {}", dir.display()))?;
    info!(
        standards_dir = %dir.display(),
        series = registry.entries().len(),
        "series definitions loaded"
    );
    Ok(registry)
}

pub fn run_generate(args: &GenerateArgs, standards_dir: Option<&Path>) -> Result<GenerateResult> {
    let registry = load_registry(standards_dir)?;
    let selected = select_series(&registry, &args.series)?;

    // Findings never change the catalog, but they are worth surfacing on every run.
    let report = DoctorReport::from_registry(&registry);
    for finding in report.findings() {
        if selected.iter().any(|entry| entry.code == finding.series) {
            warn!(
                series = %finding.series,
                kind = finding.kind.as_str(),
                subject = %finding.subject,
                "{}",
                finding.message
            );
        }
    }

    let options = ExportOptions {
        output_dir: args.output_dir.clone(),
        dry_run: args.dry_run,
    };
    let span = info_span!(
        "generate",
        output_dir = %options.output_dir.display(),
        dry_run = options.dry_run
    );
    let _guard = span.enter();

    let mut series = Vec::with_capacity(selected.len());
    for entry in selected {
        series.push(export_series(entry, &options)?);
    }

    Ok(GenerateResult {
        output_dir: options.output_dir,
        dry_run: options.dry_run,
        series,
    })
}

pub fn run_series(standards_dir: Option<&Path>) -> Result<()> {
    let registry = load_registry(standards_dir)?;
    print_series_table(&registry);
    Ok(())
}

pub fn run_check(args: &CheckArgs, standards_dir: Option<&Path>) -> Result<()> {
    let registry = load_registry(standards_dir)?;
    let report = DoctorReport::from_registry(&registry);
    if args.json {
        let json = serde_json::to_string_pretty(&report).context("serialize doctor report")?;
        println!("{json}");
    } else {
        print_doctor_report(&report);
    }
    Ok(())
}
